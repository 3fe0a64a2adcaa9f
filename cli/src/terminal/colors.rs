use std::sync::atomic::{AtomicBool, Ordering};

use colored::Color;
use ipscope_common::theme::ThemePreference;

pub struct Palette {
    pub primary: Color,
    pub accent: Color,
    pub separator: Color,
    pub text: Color,
    pub warning: Color,
    pub highlight: Color,
}

const DARK: Palette = Palette {
    primary: Color::TrueColor { r: 83, g: 179, b: 203 },
    accent: Color::Green,
    separator: Color::BrightBlack,
    text: Color::TrueColor { r: 192, g: 192, b: 192 },
    warning: Color::Yellow,
    highlight: Color::BrightGreen,
};

const LIGHT: Palette = Palette {
    primary: Color::TrueColor { r: 0, g: 95, b: 135 },
    accent: Color::TrueColor { r: 0, g: 135, b: 0 },
    separator: Color::TrueColor { r: 128, g: 128, b: 128 },
    text: Color::Black,
    warning: Color::TrueColor { r: 175, g: 95, b: 0 },
    highlight: Color::Blue,
};

static LIGHT_ACTIVE: AtomicBool = AtomicBool::new(false);

pub fn apply(theme: ThemePreference) {
    LIGHT_ACTIVE.store(theme == ThemePreference::Light, Ordering::Relaxed);
}

pub fn palette_for(theme: ThemePreference) -> &'static Palette {
    match theme {
        ThemePreference::Dark => &DARK,
        ThemePreference::Light => &LIGHT,
    }
}

pub fn current() -> ThemePreference {
    if LIGHT_ACTIVE.load(Ordering::Relaxed) {
        ThemePreference::Light
    } else {
        ThemePreference::Dark
    }
}

pub fn active() -> &'static Palette {
    palette_for(current())
}
