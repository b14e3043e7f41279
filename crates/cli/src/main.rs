//! Qimen oracle CLI entry point.
//!
//! This binary is the composition root for the whole system. Responsibilities:
//!
//! 1. **Parse configuration**: load `.qimen/config.toml` (or `--config`) and
//!    validate it before anything else runs.
//! 2. **Wire observability**: install a `tracing-subscriber` registry with an
//!    env filter, a compact or JSON fmt layer, and an OpenTelemetry OTLP layer
//!    when an endpoint is configured.
//! 3. **Construct infrastructure**: the reference clock, the JSON-file points
//!    ledger and the text completer, injected into a
//!    [`readings::ReadingService`].
//! 4. **Dispatch the subcommand**: chart and prompt inspection, the four
//!    reading kinds, and the account and points operations.

mod config;
mod render;
mod telemetry;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use ledger::JsonFileLedger;
use qimen::{
    chart_to_prompt, generate_chart_with, parse_birth_instant, parse_civil_instant, ChartOptions,
    CivilInstant, Clock, Points, PointsLedger, UserId, ZoneClock,
};
use readings::{CryptoAsset, ReadingKind, ReadingService};
use tracing::info;

use crate::config::{CliConfig, DEFAULT_CONFIG_PATH};

#[derive(Debug, Parser)]
#[command(name = "qimen-oracle")]
#[command(about = "Qimen Dunjia charts and chart-guided readings")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Account to act as
    #[arg(long, global = true, default_value = "tester")]
    user: String,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the chart for an instant (default: now)
    Chart {
        /// Civil time "YYYY-MM-DD HH:MM[:SS]" in the reference zone
        #[arg(long)]
        at: Option<String>,
        /// Fly the eight deities as well
        #[arg(long)]
        deities: bool,
        /// Print the chart as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the prompt a reading would send
    Prompt {
        #[arg(long)]
        question: String,
        #[arg(long)]
        context: Option<String>,
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        deities: bool,
    },
    /// Ask a free-form question about the current chart
    Ask { question: String },
    /// Forecast a crypto asset (BTC or ETH)
    Quantify {
        #[arg(long)]
        asset: CryptoAsset,
    },
    /// General investment guidance for today
    Finance,
    /// Life overview from a birth chart
    Destiny {
        /// "YYYY-MM-DD"
        #[arg(long)]
        birth_date: String,
        /// "HH:MM[:SS]", optionally followed by a UTC offset such as "+08:00"
        #[arg(long)]
        birth_time: String,
    },
    /// Register a new account
    Signup {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Check credentials and print the account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Print the points balance
    Points,
    /// Claim today's sign-in award
    SignIn,
    /// Spend points
    Spend {
        #[arg(long)]
        amount: u64,
    },
}

/// Everything a subcommand may need, built once from the config.
struct App {
    config: CliConfig,
    clock: Arc<ZoneClock>,
    ledger: Arc<JsonFileLedger>,
    user: UserId,
}

impl App {
    fn new(config: CliConfig, user: &str) -> anyhow::Result<Self> {
        let clock = Arc::new(ZoneClock::new(config.reference_zone()?));
        let ledger = Arc::new(JsonFileLedger::new(config.ledger.clone()));
        let user = UserId::new(user).context("--user must not be blank")?;
        Ok(Self {
            config,
            clock,
            ledger,
            user,
        })
    }

    fn instant(&self, at: Option<&str>) -> anyhow::Result<CivilInstant> {
        match at {
            Some(raw) => Ok(parse_civil_instant(raw)?),
            None => Ok(self.clock.now()),
        }
    }

    fn reading_service(&self) -> anyhow::Result<ReadingService> {
        let completer = llm::completer_from_settings(&self.config.llm)?;
        Ok(ReadingService::new(
            self.clock.clone(),
            self.ledger.clone(),
            completer,
            self.config.readings.clone(),
        ))
    }

    async fn read(&self, kind: ReadingKind) -> anyhow::Result<()> {
        let outcome = self.reading_service()?.perform(&self.user, &kind).await?;
        println!("{}", outcome.answer);
        if let Some(points) = outcome.points_remaining {
            println!("\nPoints remaining: {points}");
        }
        Ok(())
    }

    async fn run(&self, command: Command) -> anyhow::Result<()> {
        match command {
            Command::Chart { at, deities, json } => {
                let chart = generate_chart_with(
                    self.instant(at.as_deref())?,
                    ChartOptions {
                        include_deities: deities || self.config.readings.include_deities,
                    },
                );
                if json {
                    println!("{}", serde_json::to_string_pretty(&chart)?);
                } else {
                    print!("{}", render::render_chart(&chart));
                }
            }
            Command::Prompt {
                question,
                context,
                at,
                deities,
            } => {
                if question.trim().is_empty() {
                    bail!("--question must not be blank");
                }
                let chart = generate_chart_with(
                    self.instant(at.as_deref())?,
                    ChartOptions {
                        include_deities: deities || self.config.readings.include_deities,
                    },
                );
                println!("{}", chart_to_prompt(&chart, &question, context.as_deref()));
            }
            Command::Ask { question } => self.read(ReadingKind::Inquiry { question }).await?,
            Command::Quantify { asset } => self.read(ReadingKind::Quantification { asset }).await?,
            Command::Finance => self.read(ReadingKind::Finance).await?,
            Command::Destiny {
                birth_date,
                birth_time,
            } => {
                let birth = parse_birth_instant(&birth_date, &birth_time, &self.clock.zone())?;
                self.read(ReadingKind::Destiny { birth }).await?;
            }
            Command::Signup { email, password } => {
                let account = self.ledger.create_user(&email, &password)?;
                println!("{}", serde_json::to_string_pretty(&account)?);
            }
            Command::Login { email, password } => {
                let account = self.ledger.authenticate(&email, &password)?;
                println!("{}", serde_json::to_string_pretty(&account)?);
            }
            Command::Points => {
                println!("{}", self.ledger.balance(&self.user)?);
            }
            Command::SignIn => {
                let today = self.clock.now().date();
                println!("{}", self.ledger.daily_sign_in(&self.user, today)?);
            }
            Command::Spend { amount } => {
                println!("{}", self.ledger.debit(&self.user, Points::new(amount))?);
            }
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = CliConfig::load(&cli.config)?;
    let telemetry = telemetry::init(cli.verbose, &config.telemetry)?;
    info!(config = %cli.config.display(), "configuration loaded");

    let result = match App::new(config, &cli.user) {
        Ok(app) => app.run(cli.command).await,
        Err(e) => Err(e),
    };

    telemetry.shutdown();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_have_defaults() {
        let cli = Cli::try_parse_from(["qimen-oracle", "points"]).unwrap();
        assert_eq!(cli.user, "tester");
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert!(!cli.verbose);
    }

    #[test]
    fn assets_parse_from_the_command_line() {
        let cli = Cli::try_parse_from(["qimen-oracle", "quantify", "--asset", "eth"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Quantify {
                asset: CryptoAsset::Eth
            }
        ));
        assert!(Cli::try_parse_from(["qimen-oracle", "quantify", "--asset", "doge"]).is_err());
    }

    #[test]
    fn destiny_takes_birth_date_and_time() {
        let cli = Cli::try_parse_from([
            "qimen-oracle",
            "--user",
            "ada",
            "destiny",
            "--birth-date",
            "1990-06-15",
            "--birth-time",
            "08:30",
        ])
        .unwrap();
        assert_eq!(cli.user, "ada");
        assert!(matches!(cli.command, Command::Destiny { .. }));
    }

    #[tokio::test]
    async fn ledger_commands_use_the_configured_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut config = CliConfig::default();
        config.ledger.path = dir.path().join("users.json");

        let app = App::new(config.clone(), "tester").unwrap();
        let account = app.ledger.create_user("ada@example.com", "secret1").unwrap();

        let app = App::new(config, account.id.as_str()).unwrap();
        app.run(Command::Spend { amount: 10 }).await.unwrap();
        assert_eq!(app.ledger.balance(&app.user).unwrap(), Points::new(20));
        assert!(app.run(Command::Spend { amount: 25 }).await.is_err());
    }

    #[test]
    fn clock_uses_the_configured_zone() {
        let app = App::new(CliConfig::default(), "tester").unwrap();
        assert_eq!(app.clock.zone(), chrono_tz::America::Los_Angeles);

        let mut config = CliConfig::default();
        config.clock.timezone = "Asia/Shanghai".to_string();
        let app = App::new(config, "tester").unwrap();
        assert_eq!(app.clock.zone(), chrono_tz::Asia::Shanghai);
    }

    #[tokio::test]
    async fn chart_at_a_given_instant_runs() {
        let app = App::new(CliConfig::default(), "tester").unwrap();
        app.run(Command::Chart {
            at: Some("2024-03-15 14:30".to_string()),
            deities: true,
            json: true,
        })
        .await
        .unwrap();
        assert!(app
            .run(Command::Chart {
                at: Some("yesterday".to_string()),
                deities: false,
                json: false,
            })
            .await
            .is_err());
    }
}
