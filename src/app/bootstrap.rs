use std::fs::OpenOptions;
use std::process::ExitCode;
use std::sync::Arc;

use env_logger::{Builder, Env, Target};
use log::info;

use crate::api::{HttpScreenerApi, ScreenerApi};
use crate::cli::{Cli, Commands};
use crate::config::{load_config, Config};
use crate::error::{Context, Result};
use crate::ui::{console, run_dashboard};
use crate::view::SharedView;

use super::{
    AskOutcome, HealthOutcome, HealthProbe, LoadOutcome, QaForm, ScreenForm, ScreeningController,
    StockListLoader, StockQa, SubmitOutcome,
};

/// Entry point used by `main`: load configuration, wire the controllers to the
/// HTTP client and run either the dashboard or one headless command.
pub async fn run(cli: Cli) -> Result<ExitCode> {
    let config = load_config(cli.config.as_deref(), cli.base_url.as_deref())?;
    let command = cli.command.unwrap_or(Commands::Tui);
    init_logging(&config, command == Commands::Tui)?;

    let http = HttpScreenerApi::new(&config.api)?;
    info!("Using screening backend at {}", http.base_url());
    let api: Arc<dyn ScreenerApi> = Arc::new(http);
    let view = SharedView::new(config.ui.warning_window());
    let timeout = config.api.request_timeout();

    let succeeded = match command {
        Commands::Tui => {
            run_dashboard(&config, api, view).await?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Health => {
            HealthProbe::new(api, view.clone(), timeout).run().await == HealthOutcome::Healthy
        }
        Commands::Screen {
            criteria,
            max_results,
            max_analyze,
        } => {
            let form = ScreenForm::with_defaults(criteria, &config.screening)
                .override_limits(max_results, max_analyze);
            let controller = ScreeningController::new(api, view.clone(), timeout);
            matches!(controller.submit(&form).await, SubmitOutcome::Shown { .. })
        }
        Commands::Stocks => {
            let loader = StockListLoader::new(api, view.clone(), timeout);
            !matches!(loader.load().await, LoadOutcome::Failed)
        }
        Commands::Ask { code, question } => {
            let qa = StockQa::new(api, view.clone(), timeout);
            qa.ask(&QaForm::new(code, question)).await == AskOutcome::Answered
        }
    };

    console::print_view(&view);

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// The dashboard owns the terminal, so its log output goes to a file; headless
/// commands log to stderr.
fn init_logging(config: &Config, dashboard: bool) -> Result<()> {
    let mut builder = if dashboard {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&config.ui.log_file)
            .with_context(|| {
                format!("Failed to open log file {}", config.ui.log_file.display())
            })?;
        let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
        builder.target(Target::Pipe(Box::new(file)));
        builder
    } else {
        let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
        builder.target(Target::Stderr);
        builder
    };

    builder
        .try_init()
        .context("Failed to initialise logging")?;
    Ok(())
}
