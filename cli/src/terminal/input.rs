use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ipscope_core::orchestrator::RefreshStep;
use tokio::sync::mpsc::UnboundedSender;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    Quit,
    Refresh,
    ToggleTheme,
    Resize(u16, u16),
    Step(RefreshStep),
}

/// Reads terminal events on a dedicated thread and forwards the ones the
/// dashboard cares about. Stops when dropped.
pub struct InputHandle {
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl InputHandle {
    pub fn start(tx: UnboundedSender<UiEvent>) -> Self {
        let running = Arc::new(AtomicBool::new(true));
        let flag = running.clone();

        let thread = thread::spawn(move || {
            while flag.load(Ordering::Relaxed) {
                match event::poll(POLL_INTERVAL) {
                    Ok(true) => {}
                    Ok(false) => continue,
                    Err(_) => {
                        let _ = tx.send(UiEvent::Quit);
                        break;
                    }
                }

                let ui_event: Option<UiEvent> = match event::read() {
                    Ok(event) => translate(event),
                    Err(_) => Some(UiEvent::Quit),
                };

                if let Some(ui_event) = ui_event {
                    if tx.send(ui_event).is_err() {
                        break;
                    }
                }
            }
        });

        Self {
            running,
            thread: Some(thread),
        }
    }
}

impl Drop for InputHandle {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn translate(event: Event) -> Option<UiEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => translate_key(key),
        Event::Resize(cols, rows) => Some(UiEvent::Resize(cols, rows)),
        _ => None,
    }
}

fn translate_key(key: KeyEvent) -> Option<UiEvent> {
    let is_ctrl_c =
        key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL);
    if is_ctrl_c {
        return Some(UiEvent::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(UiEvent::Quit),
        KeyCode::Char('r') | KeyCode::F(5) => Some(UiEvent::Refresh),
        KeyCode::Char('t') => Some(UiEvent::ToggleTheme),
        _ => None,
    }
}
