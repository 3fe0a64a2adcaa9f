use colored::*;
use ipscope_core::panels::{Panel, Row, Tone};

use crate::terminal::colors;
use crate::terminal::print::TOTAL_WIDTH;

/// Wide enough for the longest row label ("Subnet Mask (Estimated)").
pub const KEY_WIDTH: usize = 24;

pub fn panel_header(panel: Panel, highlighted: bool) -> String {
    let palette = colors::active();
    let formatted: String = format!("⟦ {} ⟧", panel.title().to_uppercase());
    let dash_count: usize = TOTAL_WIDTH.saturating_sub(formatted.chars().count());
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let title: ColoredString = if highlighted {
        formatted.color(palette.highlight).bold().reversed()
    } else {
        formatted.color(palette.accent)
    };

    format!(
        "{}{}{}",
        "─".repeat(left).color(palette.separator),
        title,
        "─".repeat(right).color(palette.separator)
    )
}

pub fn row_line(key: &str, value: ColoredString) -> String {
    let palette = colors::active();
    let dots: String = ".".repeat(KEY_WIDTH.saturating_sub(key.chars().count()));
    format!(
        "{} {}{}{} {}",
        ">".color(palette.separator),
        key.color(palette.primary),
        dots.color(palette.separator),
        ":".color(palette.separator),
        value
    )
}

fn styled_value(row: &Row) -> ColoredString {
    let palette = colors::active();
    match row.tone {
        Tone::Normal => row.value.color(palette.text),
        Tone::Warning => row.value.color(palette.warning).bold(),
    }
}

/// Header plus one line per row. `None` renders a loading placeholder.
pub fn panel_lines(panel: Panel, rows: Option<&[Row]>, highlighted: bool) -> Vec<String> {
    let mut lines: Vec<String> = vec![panel_header(panel, highlighted)];
    match rows {
        Some(rows) => lines.extend(rows.iter().map(|row| row_line(&row.label, styled_value(row)))),
        None => lines.push(format!(
            "{} {}",
            ">".color(colors::active().separator),
            "Loading...".italic().color(colors::active().text)
        )),
    }
    lines
}
