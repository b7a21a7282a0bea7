use clap::Parser;
use robokit::commands;
use robokit::config::{Cli, Command};
use robokit::logging::init_logging;
use robokit::Config;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli.log_level)?;

    match cli.command {
        Command::Args(options) => {
            let config = Config::from_options(&options, cli.json)?;
            commands::args::run(&config)?;
        }
        Command::Run { options, program } => {
            let config = Config::from_options(&options, cli.json)?.with_program(program);
            let report = commands::run::run(&config).await?;
            if !report.outcome.success {
                // Pass robocopy's failure code through; signals map to 1.
                let code = report
                    .outcome
                    .code
                    .and_then(|c| u8::try_from(c).ok())
                    .unwrap_or(1);
                return Ok(ExitCode::from(code));
            }
        }
        Command::Parse { log } => {
            commands::parse::run(&log, cli.json)?;
        }
        Command::ValidateTask { name, schedule } => {
            commands::task::run(&name, &schedule, cli.json)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
