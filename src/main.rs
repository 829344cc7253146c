use std::process::ExitCode;

use clap::Parser;

use screener_cli::cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match screener_cli::app::run(cli).await {
        Ok(code) => code,
        Err(err) => {
            log::error!("{err:?}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
