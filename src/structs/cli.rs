use crate::enums::commands::Commands;
use clap::Parser;

#[derive(Parser)]
#[clap(name = "enhancer")]
#[clap(about = "AI-powered code analysis tool", long_about = None)]
#[clap(version)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}
