use crate::enums::report_format::ReportFormat;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// Write a commented sample configuration file
    Init,
    /// Analyze a file or directory and print a report to stdout
    Analyze {
        /// File or directory to analyze
        path: PathBuf,
        #[clap(short, long)]
        model: Option<String>,
        /// Recurse into subdirectories when the target is a directory
        #[clap(short, long)]
        recursive: bool,
        /// Also save the report to a file
        #[clap(short, long)]
        output: Option<PathBuf>,
        #[clap(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
        /// Skip the AI pass and report static findings only
        #[clap(long)]
        no_ai: bool,
        #[clap(long)]
        no_security_scan: bool,
        #[clap(long)]
        no_performance_scan: bool,
    },
    /// Watch a file or directory and re-analyze on change (debounced)
    Watch {
        path: PathBuf,
        #[clap(short, long)]
        model: Option<String>,
        /// Override the configured debounce delay
        #[clap(long)]
        delay_ms: Option<u64>,
    },
    /// List known AI models by provider
    ListModels {
        /// Query the local Ollama daemon for installed models instead
        #[clap(long)]
        installed: bool,
    },
    /// Validate the configuration file
    Validate,
}
