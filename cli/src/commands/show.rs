use std::sync::Arc;
use std::time::Instant;

use colored::*;
use ipscope_common::config::Config;
use ipscope_core::orchestrator::{self, Report, Services};
use ipscope_core::panels::{Panel, PanelUpdate};
use tokio::sync::mpsc;
use tracing::debug;

use crate::terminal::{colors, print, spinner};

/// Prints each panel as soon as it resolves.
pub async fn show(services: Arc<Services>, cfg: &Config) -> anyhow::Result<()> {
    let start_time: Instant = Instant::now();
    let handle = spinner::start();

    let (tx, mut rx) = mpsc::unbounded_channel::<PanelUpdate>();
    orchestrator::load_all(services, tx);

    let total: usize = Panel::ALL.len();
    let mut done: usize = 0;
    while let Some(update) = rx.recv().await {
        done += 1;
        debug!("{} resolved after {:?}", update.panel.title(), start_time.elapsed());
        print::panel(&update);
        spinner::report_progress(done, total);
    }

    handle.finish_and_clear();
    show_ends(done, start_time, cfg);
    Ok(())
}

fn show_ends(panels: usize, start_time: Instant, cfg: &Config) {
    if cfg.quiet > 0 {
        return;
    }
    let elapsed: ColoredString = format!("{:.2}s", start_time.elapsed().as_secs_f64())
        .bold()
        .yellow();
    print::end_of_program(cfg.quiet);
    print::centerln(&format!(
        "{}",
        format!("{panels} panels resolved in {elapsed}").color(colors::active().text)
    ));
}

/// Waits for everything and prints one JSON document.
pub async fn show_json(services: Arc<Services>) -> anyhow::Result<()> {
    let report: Report = orchestrator::gather_report(&services).await;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
