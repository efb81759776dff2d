//! CLI parsing for scandigest

use clap::Parser;

#[derive(Parser)]
#[command(name = "scandigest")]
#[command(about = "Files a summary issue for recently dismissed code-scanning alerts", long_about = None)]
#[command(version)]
pub struct Cli {
    /// API token used for authentication, overriding GITHUB_TOKEN
    #[arg(long)]
    pub token: Option<String>,
}
