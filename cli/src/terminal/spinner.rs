use std::io::Write;
use std::sync::OnceLock;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::{Duration, Instant};

use colored::*;
use console::Term;
use indicatif::{ProgressBar, ProgressStyle};

use crate::terminal::colors;

const TIP_DURATION: Duration = Duration::from_secs(2);
const MESSAGE_READ_TIME: Duration = Duration::from_secs(1);
const MIN_TIP_VISIBILITY: Duration = Duration::from_millis(750);
const TIPS: &[&str] = &[
    "Local candidates are gathered for at most two seconds",
    "Try 'ipscope watch' for a live dashboard",
];

pub struct SpinnerHandle {
    spinner: ProgressBar,
    tx: Sender<String>,
}

impl SpinnerHandle {
    pub fn send_to_queue(&self, message: String) {
        let _ = self.tx.send(message);
    }

    pub fn println(&self, msg: &str) {
        self.spinner.println(msg);
    }

    pub fn finish_and_clear(&self) {
        self.spinner.finish_and_clear();
    }

    fn is_active(&self) -> bool {
        !self.spinner.is_finished() && !self.spinner.is_hidden()
    }
}

static SPINNER: OnceLock<SpinnerHandle> = OnceLock::new();

/// Starts the spinner on first call; later calls return the same handle.
pub fn start() -> &'static SpinnerHandle {
    SPINNER.get_or_init(init_spinner)
}

fn init_spinner() -> SpinnerHandle {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.blue} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&[
            "▁▁▁▁▁",
            "▁▂▂▂▁",
            "▁▄▂▄▁",
            "▂▄▆▄▂",
            "▄▆█▆▄",
            "▂▄▆▄▂",
            "▁▄▂▄▁",
            "▁▂▂▂▁",
        ]);

    pb.set_style(style);
    pb.set_message("Gathering network information...");
    pb.enable_steady_tick(Duration::from_millis(100));

    let (tx, rx) = mpsc::channel::<String>();
    let pb_clone = pb.clone();

    thread::spawn(move || {
        let mut tip_index = 0;
        let mut next_action_time = Instant::now() + TIP_DURATION;
        let mut is_showing_tip = false;
        let mut last_tip_time = Instant::now();

        loop {
            if pb_clone.is_finished() {
                break;
            }

            let wait_time = next_action_time.saturating_duration_since(Instant::now());

            match rx.recv_timeout(wait_time) {
                Ok(mut msg) => {
                    if is_showing_tip {
                        let elapsed = last_tip_time.elapsed();
                        if elapsed < MIN_TIP_VISIBILITY {
                            thread::sleep(MIN_TIP_VISIBILITY - elapsed);
                        }
                        is_showing_tip = false;
                    }
                    while let Ok(newer_msg) = rx.try_recv() {
                        msg = newer_msg;
                    }
                    pb_clone.set_message(msg);
                    next_action_time = Instant::now() + MESSAGE_READ_TIME;
                }
                Err(RecvTimeoutError::Timeout) => {
                    let tip = TIPS[tip_index % TIPS.len()];
                    pb_clone.set_message(format!("{}", tip.italic().color(colors::active().text)));

                    tip_index += 1;
                    is_showing_tip = true;
                    last_tip_time = Instant::now();

                    next_action_time = Instant::now() + TIP_DURATION;
                }
                Err(RecvTimeoutError::Disconnected) => {
                    break;
                }
            }
        }
    });

    SpinnerHandle { spinner: pb, tx }
}

pub fn report_progress(done: usize, total: usize) {
    if let Some(handle) = SPINNER.get() {
        handle.send_to_queue(format!(
            "Resolved {} of {} panels...",
            done.to_string().green().bold(),
            total
        ));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route {
    AboveSpinner,
    Stdout,
}

/// The spinner draws on stderr, so lines only go through it when stdout is
/// the same terminal. Redirected stdout always gets the lines itself.
fn route(spinner_active: bool, stdout_is_term: bool) -> Route {
    if spinner_active && stdout_is_term {
        Route::AboveSpinner
    } else {
        Route::Stdout
    }
}

/// Log sink that prints above a running spinner, or straight to stdout when
/// there is none (or stdout is not a terminal).
pub struct SpinnerWriter;

impl Write for SpinnerWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let handle = SPINNER.get().filter(|handle| handle.is_active());
        let stdout_is_term: bool = Term::stdout().is_term();
        match (handle, route(handle.is_some(), stdout_is_term)) {
            (Some(handle), Route::AboveSpinner) => {
                let msg = String::from_utf8_lossy(buf);
                handle.println(msg.trim_end());
                Ok(buf.len())
            }
            _ => std::io::stdout().write(buf),
        }
    }

    fn flush(&mut self) -> std::io::Result<()> {
        std::io::stdout().flush()
    }
}
