//! Live dashboard state.
//!
//! Holds the latest rows for every panel plus the purely visual refresh
//! state. Panels are written independently; a panel that has not reported yet
//! shows a loading placeholder.

use std::collections::{BTreeMap, HashSet};
use std::io::{self, Write};

use colored::*;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};
use ipscope_common::device::Dimensions;
use ipscope_common::theme::ThemePreference;
use ipscope_core::panels::{self, Panel, PanelUpdate, Row};

use crate::terminal::{colors, format};

pub struct Dashboard {
    panels: BTreeMap<Panel, Vec<Row>>,
    flashing: HashSet<Panel>,
    refreshing: bool,
    theme: ThemePreference,
}

impl Dashboard {
    pub fn new(theme: ThemePreference) -> Self {
        Self {
            panels: BTreeMap::new(),
            flashing: HashSet::new(),
            refreshing: false,
            theme,
        }
    }

    pub fn apply(&mut self, update: PanelUpdate) {
        self.panels.insert(update.panel, update.rows);
    }

    pub fn rows(&self, panel: Panel) -> Option<&[Row]> {
        self.panels.get(&panel).map(Vec::as_slice)
    }

    /// Rewrites the viewport figure of the device panel, if it has loaded.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        if let Some(device) = self.panels.get_mut(&Panel::Device) {
            panels::overwrite_viewport(device, Dimensions::new(cols.into(), rows.into()));
        }
    }

    /// `idx` is a position in [`Panel::ALL`]; out-of-range indices are ignored.
    pub fn flash(&mut self, idx: usize, on: bool) {
        let Some(&panel) = Panel::ALL.get(idx) else {
            return;
        };
        if on {
            self.flashing.insert(panel);
        } else {
            self.flashing.remove(&panel);
        }
    }

    pub fn is_flashing(&self, panel: Panel) -> bool {
        self.flashing.contains(&panel)
    }

    pub fn set_refreshing(&mut self, refreshing: bool) {
        self.refreshing = refreshing;
        if !refreshing {
            self.flashing.clear();
        }
    }

    pub fn is_refreshing(&self) -> bool {
        self.refreshing
    }

    pub fn set_theme(&mut self, theme: ThemePreference) {
        self.theme = theme;
    }

    fn status_line(&self) -> String {
        let palette = colors::palette_for(self.theme);
        let mut line: String = format!(
            "{} {} {}  {}",
            "⟦ IPSCOPE ⟧".color(palette.highlight).bold(),
            self.theme.icon(),
            self.theme.label().color(palette.text),
            "[r] refresh  [t] theme  [q] quit".color(palette.separator)
        );
        if self.refreshing {
            line.push_str(&format!("  {}", "⟳ refreshing".color(palette.accent)));
        }
        line
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = vec![self.status_line(), String::new()];
        for panel in Panel::ALL {
            lines.extend(format::panel_lines(
                panel,
                self.rows(panel),
                self.is_flashing(panel),
            ));
            lines.push(String::new());
        }
        lines
    }

    /// Repaints the whole screen. Expects raw mode, hence the explicit `\r\n`.
    pub fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, MoveTo(0, 0), Clear(ClearType::All))?;
        for line in self.lines() {
            queue!(out, Print(line), Print("\r\n"))?;
        }
        out.flush()
    }
}
