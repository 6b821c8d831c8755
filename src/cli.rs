//! CLI argument parsing and execution

use anyhow::Result;
use clap::Parser;

use etl_vendor::config::MirrorConfig;
use etl_vendor::git::{GitClone, GitIndex};
use etl_vendor::pipeline;

/// Mirror the latest ETL release into this repository
#[derive(Parser, Debug)]
#[command(name = "etl-vendor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Reuse the existing working copy instead of re-cloning upstream
    #[arg(long)]
    fast: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    /// Execute the mirror run
    pub fn execute(self) -> Result<()> {
        env_logger::Builder::new()
            .parse_filters(&self.log_level)
            .init();

        let config = MirrorConfig::etl();
        let report = pipeline::run(&config, &GitClone, &GitIndex::new("."), self.fast)?;

        println!(
            "Mirrored {} files from {} {}",
            report.entries.len(),
            config.repo_slug,
            report.tag
        );
        if report.committed {
            println!("Committed: {}", config.commit_message(&report.tag));
        } else {
            println!("Already up to date with {}", report.tag);
        }

        Ok(())
    }
}
