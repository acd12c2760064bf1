use clap::Parser;
use enhancer_core::structs::cli::Cli;
use enhancer_core::workers::command_runner::CommandRunner;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_target(false)
        .format_timestamp(None)
        .init();

    let cli = Cli::parse();
    let mut runner = CommandRunner::new();

    if let Err(e) = runner.run_command(cli.command).await {
        log::error!("❌ {}", e);
        std::process::exit(1);
    }
}
