use ipscope_common::theme::{ThemePreference, ThemeState};

use crate::commands::ThemeAction;
use crate::terminal::{colors, print};

pub fn theme(state: &mut ThemeState, action: ThemeAction) {
    let preference: ThemePreference = match action {
        ThemeAction::Show => state.preference(),
        ThemeAction::Toggle => {
            let flipped = state.toggle();
            colors::apply(flipped);
            flipped
        }
    };
    print::aligned_line(
        "Theme",
        &format!("{} {}", preference.icon(), preference.label()),
    );
}
