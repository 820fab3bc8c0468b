mod config;
mod constants;
mod database;
mod events;
mod handlers;
mod mailer;
mod models;
mod schedule;
mod shutdown;
mod store;
mod utils;

#[cfg(test)]
mod test_utils;

use std::sync::Arc;
use tokio::sync::watch;
use tracing::{error, info};

use crate::{
    config::Config,
    constants::{BIRTHDAY_TIMER_NAME, LOG_DIRECTIVE},
    database::Database,
    events::start_login_listener,
    mailer::build_mailer,
    models::Data,
    schedule::{ScheduleType, start_schedule_manager},
};

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    // Initialize logging
    initialize_logging();

    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Connect to database
    let db = match Database::new(&config.database_url).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            std::process::exit(1);
        }
    };

    // Register the daily birthday timer
    if let Err(e) = db
        .upsert_schedule(
            BIRTHDAY_TIMER_NAME,
            ScheduleType::Birthday,
            &config.birthday_cron,
            Some(config.birthday_start),
            true,
        )
        .await
    {
        error!("Failed to register {}: {}", BIRTHDAY_TIMER_NAME, e);
        std::process::exit(1);
    }

    let mailer = match build_mailer(&config.mail) {
        Ok(mailer) => mailer,
        Err(e) => {
            error!("Failed to create mailer: {}", e);
            std::process::exit(1);
        }
    };

    if config.mail.relay_url.is_none() {
        info!("MAIL_RELAY_URL not set, birthday emails will only be logged");
    }
    info!(
        "Counter strategy: {}, timezone: {}",
        config.counter_strategy, config.timezone
    );

    let data = Arc::new(Data::new(db, &config, mailer));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    // Bind the handlers to their triggers
    let schedule_task = start_schedule_manager(Arc::clone(&data), shutdown_rx.clone());
    let listener_task = start_login_listener(Arc::clone(&data), config.login_channel.clone(), shutdown_rx);

    info!("Service is running, press Ctrl-C to stop");

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
    }

    info!("Shutting down...");
    let _ = shutdown_tx.send(true);
    let (schedule_result, listener_result) = tokio::join!(schedule_task, listener_task);

    for result in [schedule_result, listener_result] {
        if let Err(e) = result {
            error!("Background task ended abnormally: {}", e);
        }
    }

    info!("Stopped");
}

/// Initialize the logging system (`LOG_FORMAT=json` for JSON lines)
fn initialize_logging() {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(LOG_DIRECTIVE.parse().expect("valid log directive"));

    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format == "json");

    if json {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
