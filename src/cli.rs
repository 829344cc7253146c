use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "screener-cli")]
#[command(about = "Terminal client for the AI stock screening service")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Optional JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Base URL of the screening backend
    #[arg(long, env = "SCREENER_API_BASE_URL")]
    pub base_url: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Start the interactive dashboard (default)
    Tui,

    /// Check that the backend is reachable and configured
    Health,

    /// Screen stocks with natural-language criteria
    Screen {
        /// Screening criteria, e.g. "低估值 银行股"
        criteria: String,

        #[arg(long)]
        max_results: Option<String>,

        #[arg(long = "max-analyze")]
        max_analyze: Option<String>,
    },

    /// Show the reference stock list
    Stocks,

    /// Ask a question about one stock
    Ask {
        /// Stock code (e.g. 600036)
        code: String,
        question: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_subcommand_means_dashboard() {
        let cli = Cli::try_parse_from(["screener-cli"]).unwrap();
        assert_eq!(cli.command, None);
    }

    #[test]
    fn screen_accepts_limits() {
        let cli = Cli::try_parse_from([
            "screener-cli",
            "--base-url",
            "http://10.0.0.2:8000",
            "screen",
            "银行股",
            "--max-results",
            "5",
            "--max-analyze",
            "50",
        ])
        .unwrap();

        assert_eq!(cli.base_url.as_deref(), Some("http://10.0.0.2:8000"));
        assert_eq!(
            cli.command,
            Some(Commands::Screen {
                criteria: "银行股".into(),
                max_results: Some("5".into()),
                max_analyze: Some("50".into()),
            })
        );
    }

    #[test]
    fn ask_takes_code_and_question() {
        let cli = Cli::try_parse_from(["screener-cli", "ask", "600036", "估值如何?"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Ask { ref code, .. }) if code == "600036"));
    }
}
