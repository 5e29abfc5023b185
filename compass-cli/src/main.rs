use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod auth;
mod config;
mod llm;
mod render;
mod session;
mod state;

#[derive(Parser, Debug)]
#[command(name = "compass", version, about = "Personal financial planning CLI")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive planning session: simulate a ledger, derive metrics,
    /// generate a personalized plan
    Plan {
        /// User id to simulate data for (prompted when omitted)
        #[arg(long)]
        user: Option<String>,

        /// Load a ledger document from a JSON file instead of simulating one
        #[arg(long)]
        ledger: Option<PathBuf>,

        /// Months of future expenses to project (default from config)
        #[arg(long)]
        months: Option<usize>,
    },

    /// Parse a ledger document and print its tables and metrics (no network)
    Metrics {
        /// Path to a ledger JSON document
        #[arg(long)]
        ledger: PathBuf,

        /// Months of future expenses to project (default from config)
        #[arg(long)]
        months: Option<usize>,
    },

    /// Manage stored provider credentials (~/.compass/auth.json)
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },

    /// Manage ~/.compass/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum AuthCommand {
    /// Store an Anthropic API token
    PasteAnthropicToken,

    /// Store an OpenAI API key
    PasteOpenaiApiKey,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,

    /// Print the effective config
    Show,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Plan {
            user,
            ledger,
            months,
        } => {
            let cfg = config::load_config()?;
            let auth = auth::load_auth()?;
            let client = llm::LlmClient::from_settings(&cfg.llm, &auth)?;
            let opts = session::PlanOptions {
                user,
                ledger_path: ledger,
                months_ahead: months.unwrap_or(cfg.plan.months_ahead),
                transaction_rows: cfg.plan.transaction_rows,
            };
            session::run_plan(&client, &opts)?;
        }

        Command::Metrics { ledger, months } => {
            let cfg = config::load_config()?;
            session::run_metrics(
                &ledger,
                months.unwrap_or(cfg.plan.months_ahead),
                cfg.plan.transaction_rows,
            )?;
        }

        Command::Auth { command } => match command {
            AuthCommand::PasteAnthropicToken => auth::anthropic_paste_token()?,
            AuthCommand::PasteOpenaiApiKey => auth::openai_paste_api_key()?,
        },

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}
