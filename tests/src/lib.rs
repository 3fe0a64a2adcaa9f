//! End-to-end checks across the workspace crates.

mod support;

mod fetcher;
mod orchestrator;
mod preferences;
mod prober;
