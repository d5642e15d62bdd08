//! Timesheet service CLI
//!
//! Runs the HTTP API and the small set of admin chores that have no
//! endpoint: hashing passwords, provisioning and deactivating employees,
//! and purging expired sessions.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use timesheet_engine::api::{AppState, SessionCookie, create_router};
use timesheet_engine::clock::{Clock, SystemClock};
use timesheet_engine::config::{AppConfig, ConfigLoader};
use timesheet_engine::models::{NewEmployee, Role};
use timesheet_engine::service::{ServiceSettings, TimesheetService, hash_password};
use timesheet_engine::store::Store;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "timesheet",
    about = "Employee timesheet and pay service",
    version
)]
struct Cli {
    /// Path to the YAML configuration file. Defaults apply when omitted.
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP API
    Serve {
        /// Override the listen address from the configuration
        #[arg(long)]
        bind: Option<String>,
    },

    /// Print a bcrypt hash of a password
    HashPassword {
        /// The plaintext password
        password: String,
    },

    /// Create an active employee
    AddEmployee {
        /// Login name
        #[arg(long)]
        username: String,
        /// Initial password
        #[arg(long)]
        password: String,
        /// Given name
        #[arg(long)]
        first_name: String,
        /// Family name
        #[arg(long)]
        last_name: String,
        /// Contact email
        #[arg(long)]
        email: String,
        /// employee, manager or admin
        #[arg(long, default_value = "employee")]
        role: Role,
        /// Starting hourly rate
        #[arg(long, default_value = "0")]
        hourly_rate: Decimal,
        /// Hire date (YYYY-MM-DD); today when omitted
        #[arg(long)]
        hire_date: Option<NaiveDate>,
    },

    /// Mark an employee inactive
    DeactivateEmployee {
        /// The employee id
        id: i64,
    },

    /// Delete expired sessions
    PurgeSessions,
}

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.filter.as_str().into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn open_service(config: &AppConfig) -> anyhow::Result<TimesheetService> {
    let store = Store::connect(&config.database)
        .await
        .with_context(|| format!("failed to open database {}", config.database.url))?;
    Ok(TimesheetService::new(
        store,
        Arc::new(SystemClock),
        ServiceSettings::from_config(config),
    ))
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn serve(config: AppConfig, bind: Option<String>) -> anyhow::Result<()> {
    let bind = bind.unwrap_or_else(|| config.server.bind.clone());
    let service = open_service(&config).await?;
    let state = AppState::new(service, SessionCookie::from_config(&config.sessions));
    let app = create_router(state).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {}", bind))?;
    info!(bind = %bind, "Timesheet API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is normal
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = ConfigLoader::load_or_default(cli.config.as_ref())?
        .with_env_overrides()
        .into_config();
    init_tracing(&config);

    if let Some(path) = &cli.config {
        info!(path = %path.display(), "Configuration loaded");
    }

    match cli.command {
        Command::Serve { bind } => serve(config, bind).await?,
        Command::HashPassword { password } => {
            println!("{}", hash_password(&password, config.auth.bcrypt_cost)?);
        }
        Command::AddEmployee {
            username,
            password,
            first_name,
            last_name,
            email,
            role,
            hourly_rate,
            hire_date,
        } => {
            let service = open_service(&config).await?;
            let new = NewEmployee {
                username,
                password_hash: String::new(),
                first_name,
                last_name,
                email,
                role,
                hourly_rate,
                hire_date: hire_date.unwrap_or_else(|| SystemClock.today()),
            };
            let employee = service.add_employee(new, &password).await?;
            println!("{}", employee.id);
        }
        Command::DeactivateEmployee { id } => {
            open_service(&config).await?.deactivate_employee(id).await?;
        }
        Command::PurgeSessions => {
            let purged = open_service(&config).await?.purge_expired_sessions().await?;
            println!("{}", purged);
        }
    }

    Ok(())
}
