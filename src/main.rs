use anyhow::Context;
use clap::{Parser, Subcommand};
use loan_advisor::calculator::{affordability, AffordabilityInput};
use loan_advisor::config::LoggingConfig;
use loan_advisor::metrics::METRICS;
use loan_advisor::{AdvisorConfig, LoanAdvisor};
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "loan-advisor", version, about = "Loan advisor backed by a fact store")]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive console session (default)
    Chat,
    /// Answer a single question and exit
    Ask {
        #[arg(required = true)]
        question: Vec<String>,
    },
    /// Estimate the loan amount a monthly budget can service
    Afford {
        #[arg(long)]
        income: f64,
        #[arg(long)]
        expenses: f64,
        /// Annual interest rate in percent
        #[arg(long)]
        rate: f64,
        /// Tenure in years
        #[arg(long)]
        years: f64,
    },
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = AdvisorConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    init_tracing(&config.logging);

    match cli.command.unwrap_or(Command::Chat) {
        Command::Afford {
            income,
            expenses,
            rate,
            years,
        } => {
            let result = affordability(&AffordabilityInput {
                monthly_income: income,
                monthly_expenses: expenses,
                annual_rate: rate,
                tenure_years: years,
            })?;
            println!("{}", result);
        }
        Command::Ask { question } => {
            let advisor = LoanAdvisor::from_config(&config).context("Failed to start advisor")?;
            println!("{}", advisor.respond(&question.join(" ")).await);
        }
        Command::Chat => {
            let advisor = LoanAdvisor::from_config(&config).context("Failed to start advisor")?;
            chat(&advisor).await?;
        }
    }

    debug!("Session metrics:\n{}", METRICS.render());
    Ok(())
}

async fn chat(advisor: &LoanAdvisor) -> anyhow::Result<()> {
    let mut stdout = tokio::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    stdout
        .write_all(b"Loan Advisor: Hey there! I'm your loan guru, ready to dive into all things loans with you. What's up?\n")
        .await?;

    loop {
        stdout.write_all(b"You: ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if matches!(input.to_lowercase().as_str(), "exit" | "quit" | "bye") {
            stdout
                .write_all(b"Loan Advisor: Catch you later! Hope I shed some light on your loan questions!\n")
                .await?;
            break;
        }

        let reply = advisor.respond(input).await;
        stdout.write_all(format!("Loan Advisor: {}\n", reply).as_bytes()).await?;
    }

    Ok(())
}
