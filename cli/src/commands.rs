pub mod show;
pub mod theme;
pub mod watch;

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use ipscope_common::config::{self, Config};

#[derive(Parser)]
#[command(name = "ipscope")]
#[command(version, about = "Public, local and device network information at a glance.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Public address endpoint; repeat to build the fallback list
    #[arg(long = "ip-endpoint", value_name = "URL", global = true)]
    pub ip_endpoints: Vec<String>,

    /// Geolocation endpoint; `{ip}` is replaced with the public address
    #[arg(long, value_name = "URL", global = true)]
    pub geo_endpoint: Option<String>,

    /// How long to gather local address candidates, in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 2000, global = true)]
    pub probe_timeout: u64,

    /// Per-request HTTP timeout in seconds; 0 leaves requests to the OS timeout
    #[arg(long, value_name = "SECS", default_value_t = 0, global = true)]
    pub http_timeout: u64,

    /// Identification string to classify instead of this host's own
    #[arg(long, env = "IPSCOPE_USER_AGENT", global = true)]
    pub user_agent: Option<String>,

    /// Preference file holding the theme
    #[arg(long, value_name = "PATH", global = true)]
    pub preferences: Option<PathBuf>,

    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Reduce output (-q hides decorations)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print every panel once (default)
    #[command(alias = "s")]
    Show {
        /// Emit a single JSON document instead of panels
        #[arg(long)]
        json: bool,
    },
    /// Live dashboard with refresh and theme toggle
    #[command(alias = "w")]
    Watch,
    /// Show or toggle the stored theme
    #[command(alias = "t")]
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeAction {
    Show,
    Toggle,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn resolved_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Show { json: false })
    }

    pub fn to_config(&self) -> Config {
        let ip_endpoints: Vec<String> = if self.ip_endpoints.is_empty() {
            config::DEFAULT_IP_ENDPOINTS.iter().map(|s| s.to_string()).collect()
        } else {
            self.ip_endpoints.clone()
        };

        Config {
            ip_endpoints,
            geo_endpoint: self
                .geo_endpoint
                .clone()
                .unwrap_or_else(|| config::DEFAULT_GEO_ENDPOINT.to_string()),
            probe_window: Duration::from_millis(self.probe_timeout),
            http_timeout: match self.http_timeout {
                0 => None,
                secs => Some(Duration::from_secs(secs)),
            },
            user_agent: self.user_agent.clone(),
            preferences: self.preferences.clone(),
            no_banner: self.no_banner,
            quiet: self.quiet,
        }
    }
}
