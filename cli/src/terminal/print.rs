use colored::*;
use ipscope_core::panels::PanelUpdate;
use tracing::info;
use unicode_width::UnicodeWidthStr;

use crate::terminal::{colors, format};

pub const TOTAL_WIDTH: usize = 64;
pub const PRINT_TARGET: &str = "ipscope::print";

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

pub fn banner(no_banner: bool, q_level: u8) {
    if no_banner || q_level > 0 {
        return;
    }

    let text_content: String = format!("⟦ IPSCOPE v{} ⟧", env!("CARGO_PKG_VERSION"));
    let text_width: usize = UnicodeWidthStr::width(text_content.as_str());
    let text: ColoredString = text_content.color(colors::active().highlight).bold();
    let sep: ColoredString = "═"
        .repeat(TOTAL_WIDTH.saturating_sub(text_width) / 2)
        .color(colors::active().separator);
    print(&format!("{}{}{}", sep, text, sep));
    centerln(&format!(
        "{}",
        "Public, local and device network information"
            .italic()
            .color(colors::active().text)
    ));
}

pub fn panel(update: &PanelUpdate) {
    for line in format::panel_lines(update.panel, Some(&update.rows), false) {
        print(&line);
    }
}

pub fn aligned_line(key: &str, value: &str) {
    print(&format::row_line(key, value.color(colors::active().text)));
}

pub fn centerln(msg: &str) {
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(console::measure_text_width(msg)) / 2);
    print(&format!("{}{}", space, msg));
}

pub fn end_of_program(q_level: u8) {
    if q_level > 0 {
        return;
    }
    print(&format!(
        "{}",
        "═".repeat(TOTAL_WIDTH).color(colors::active().separator)
    ));
}
