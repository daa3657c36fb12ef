//! Reminder worker: periodically scans for visits due in the next 24 hours
//! and pushes a notification for each through the configured notifier.

use std::env;
use std::thread;
use std::time::Duration;

use chrono::Utc;
use config::Config;
use dotenvy::dotenv;

use tournee::db::establish_connection_pool;
use tournee::models::config::ServerConfig;
use tournee::repository::DieselRepository;
use tournee::services::notify::LogNotifier;
use tournee::services::visit::notify_upcoming_visits;

const SCAN_INTERVAL: Duration = Duration::from_secs(60 * 60);
const LOOKAHEAD_HOURS: i64 = 24;

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let settings = Config::builder()
        .add_source(config::File::with_name("config/default"))
        .add_source(config::File::with_name(&format!("config/{app_env}")).required(false))
        .add_source(config::Environment::with_prefix("APP"))
        .build();

    let settings = match settings {
        Ok(settings) => settings,
        Err(err) => {
            log::error!("Error loading settings: {err}");
            std::process::exit(1);
        }
    };

    let server_config = match settings.try_deserialize::<ServerConfig>() {
        Ok(server_config) => server_config,
        Err(err) => {
            log::error!("Error loading server config: {err}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&server_config.database_url) {
        Ok(pool) => pool,
        Err(err) => {
            log::error!("Failed to establish database connection: {err}");
            std::process::exit(1);
        }
    };

    let repo = DieselRepository::new(pool);
    let notifier = LogNotifier;

    log::info!("upcoming-visits worker started");
    loop {
        let now = Utc::now().naive_utc();
        let horizon = now + chrono::Duration::hours(LOOKAHEAD_HOURS);

        match notify_upcoming_visits(&repo, now, horizon, &notifier) {
            Ok(sent) => {
                log::info!("{sent} reminder(s) sent for visits due before {horizon}");
            }
            Err(err) => {
                log::error!("Failed to scan upcoming visits: {err}");
            }
        }

        thread::sleep(SCAN_INTERVAL);
    }
}
