use crate::config::Config;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "gmaps-geo",
    version,
    about = "Resolve a map short link or share link to a geo: coordinate"
)]
pub struct Cli {
    #[arg(help = "Short link or share link to resolve")]
    pub url: String,
    #[arg(long, help = "TOML config file")]
    pub config: Option<PathBuf>,
    #[arg(long, help = "Output machine-readable JSON (trace included)")]
    pub json: bool,
    #[arg(long, short, help = "Do not print the resolution trace")]
    pub quiet: bool,
    #[arg(long, help = "Maximum number of 302 hops to follow")]
    pub max_redirects: Option<usize>,
    #[arg(long, help = "Per-request timeout in seconds")]
    pub timeout_secs: Option<u64>,
    #[arg(long, help = "Write logs to a daily rolling file in this directory")]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// Flags win over values from the config file.
    pub fn apply(&self, config: &mut Config) {
        if let Some(n) = self.max_redirects {
            config.resolver.max_redirects = n;
        }
        if let Some(secs) = self.timeout_secs {
            config.http.timeout_seconds = secs;
        }
        if let Some(dir) = &self.log_dir {
            config.logging.directory = Some(dir.clone());
        }
    }
}
