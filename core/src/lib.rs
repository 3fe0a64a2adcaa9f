pub mod fetcher;
pub mod inspector;
pub mod orchestrator;
pub mod panels;
pub mod prober;
