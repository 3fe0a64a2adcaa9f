pub mod config;
pub mod device;
pub mod network;
pub mod theme;
pub mod utils;
