use std::io::{self, Stdout, Write};
use std::sync::Arc;

use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ipscope_common::theme::ThemeState;
use ipscope_core::orchestrator::{self, RefreshStep, Services};
use ipscope_core::panels::{Panel, PanelUpdate};
use tokio::sync::mpsc::{self, UnboundedSender};
use tokio::time::{Instant, sleep_until};

use crate::terminal::colors;
use crate::terminal::dashboard::Dashboard;
use crate::terminal::input::{InputHandle, UiEvent};

/// Puts the terminal into dashboard mode and restores it when dropped.
struct ScreenGuard {
    out: Stdout,
}

impl ScreenGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        if let Err(e) = execute!(out, EnterAlternateScreen, Hide) {
            let _ = terminal::disable_raw_mode();
            return Err(e);
        }
        Ok(Self { out })
    }

    fn out(&mut self) -> &mut impl Write {
        &mut self.out
    }
}

impl Drop for ScreenGuard {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

pub async fn watch(services: Arc<Services>, theme: &mut ThemeState) -> anyhow::Result<()> {
    let mut screen = ScreenGuard::enter()?;
    let mut dashboard = Dashboard::new(theme.preference());

    let (panel_tx, mut panel_rx) = mpsc::unbounded_channel::<PanelUpdate>();
    let (ui_tx, mut ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let _input = InputHandle::start(ui_tx.clone());

    orchestrator::load_all(services.clone(), panel_tx.clone());
    dashboard.draw(screen.out())?;

    loop {
        tokio::select! {
            Some(update) = panel_rx.recv() => dashboard.apply(update),
            event = ui_rx.recv() => {
                let Some(event) = event else { break };
                if !handle_event(event, &mut dashboard, theme, &services, &panel_tx, &ui_tx) {
                    break;
                }
            }
        }
        dashboard.draw(screen.out())?;
    }

    Ok(())
}

/// Returns `false` when the dashboard should close.
fn handle_event(
    event: UiEvent,
    dashboard: &mut Dashboard,
    theme: &mut ThemeState,
    services: &Arc<Services>,
    panel_tx: &UnboundedSender<PanelUpdate>,
    ui_tx: &UnboundedSender<UiEvent>,
) -> bool {
    match event {
        UiEvent::Quit => return false,
        UiEvent::Refresh => {
            if !dashboard.is_refreshing() {
                dashboard.set_refreshing(true);
                tokio::spawn(play_refresh(ui_tx.clone()));
            }
        }
        UiEvent::ToggleTheme => {
            let preference = theme.toggle();
            colors::apply(preference);
            dashboard.set_theme(preference);
        }
        UiEvent::Resize(cols, rows) => dashboard.resize(cols, rows),
        UiEvent::Step(step) => match step {
            RefreshStep::FlashOn(idx) => dashboard.flash(idx, true),
            RefreshStep::FlashOff(idx) => dashboard.flash(idx, false),
            RefreshStep::Reload => orchestrator::load_all(services.clone(), panel_tx.clone()),
            RefreshStep::Done => dashboard.set_refreshing(false),
        },
    }
    true
}

async fn play_refresh(ui_tx: UnboundedSender<UiEvent>) {
    let origin: Instant = Instant::now();
    for (offset, step) in orchestrator::refresh_timeline(Panel::ALL.len()) {
        sleep_until(origin + offset).await;
        if ui_tx.send(UiEvent::Step(step)).is_err() {
            return;
        }
    }
}
