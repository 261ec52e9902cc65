use std::env;
use std::fs::File;
use std::str::FromStr;
use std::time::Duration;

use chrono::Locale;
use dotenv::dotenv;
use log::LevelFilter;
use simplelog::{ColorChoice, CombinedLogger, TermLogger, TerminalMode, WriteLogger};

/// Runtime configuration for the dashboard client. Everything comes from the
/// environment once at startup; nothing here is mutated afterwards. The
/// display locale in particular is threaded explicitly into formatting calls
/// instead of being set process-wide.
#[derive(Clone)]
pub struct Settings {
    pub base_url: String,
    pub locale: Locale,
    pub poll_interval: Duration,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        dotenv().ok();

        let base_url = env::var("API_BASE_URL").expect("API_BASE_URL must be set");

        let locale = env::var("LOCALE")
            .map(|l| Locale::try_from(l.as_str()).expect("invalid LOCALE value"))
            .unwrap_or(Locale::fr_FR);

        let poll_interval = env::var("POLL_INTERVAL_SECS")
            .map(|s| s.parse().expect("failed to parse POLL_INTERVAL_SECS"))
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(15));

        Self {
            base_url,
            locale,
            poll_interval,
            connect_timeout: Duration::from_secs(2),
            request_timeout: Duration::from_secs(5),
        }
    }
}

impl Settings {
    pub fn init_logger() {
        let rust_log = env::var("RUST_LOG").unwrap_or("info".into());
        let level = LevelFilter::from_str(&rust_log).unwrap_or(LevelFilter::Info);
        let log_file = env::var("SERVICE_NAME")
            .map(|pkg| format!("{pkg}.log"))
            .unwrap_or("expat_desk.log".into());

        CombinedLogger::init(vec![
            TermLogger::new(
                level,
                simplelog::Config::default(),
                TerminalMode::Mixed,
                ColorChoice::Auto,
            ),
            WriteLogger::new(
                level,
                simplelog::Config::default(),
                File::create(log_file).expect("Failed to create log file"),
            ),
        ])
        .expect("Failed to initialize logger");
    }
}
