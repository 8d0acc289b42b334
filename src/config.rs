use crate::error::{config::ConfigError, AppError};

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_URL: &str = "sqlite://data/database.sqlite?mode=rwc";
const DEFAULT_SHEET_NAME: &str = "Participants";

pub struct Config {
    pub port: u16,
    pub database_url: String,

    /// Google Sheets mirror settings. `None` runs the service in
    /// local-only mode (spreadsheet mirroring disabled).
    pub sheets: Option<SheetsConfig>,
}

#[derive(Clone)]
pub struct SheetsConfig {
    pub service_account_email: String,
    pub private_key_pem: String,
    pub spreadsheet_id: String,
    pub sheet_name: String,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let port = match std::env::var("PORT") {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidEnvVar("PORT".to_string()))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            port,
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            sheets: SheetsConfig::from_env(),
        })
    }
}

impl SheetsConfig {
    /// Reads the mirror settings from the environment.
    ///
    /// Any missing piece disables the mirror instead of failing startup:
    /// the service must keep accepting reservations in local-only mode.
    fn from_env() -> Option<Self> {
        let enabled = std::env::var("GOOGLE_SHEETS_ENABLED")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        if !enabled {
            return None;
        }

        let Ok(service_account_email) = std::env::var("GOOGLE_SERVICE_ACCOUNT_EMAIL") else {
            tracing::warn!("GOOGLE_SERVICE_ACCOUNT_EMAIL not set, mirror disabled");
            return None;
        };

        let private_key_pem = match std::env::var("GOOGLE_PRIVATE_KEY") {
            // Keys passed inline carry escaped newlines
            Ok(key) => key.replace("\\n", "\n"),
            Err(_) => match std::env::var("GOOGLE_PRIVATE_KEY_FILE") {
                Ok(path) => match std::fs::read_to_string(&path) {
                    Ok(key) => key,
                    Err(err) => {
                        tracing::warn!("Failed to read {}: {}, mirror disabled", path, err);
                        return None;
                    }
                },
                Err(_) => {
                    tracing::warn!("No Google private key configured, mirror disabled");
                    return None;
                }
            },
        };

        let Ok(spreadsheet_id) = std::env::var("GOOGLE_SHEETS_SPREADSHEET_ID") else {
            tracing::warn!("GOOGLE_SHEETS_SPREADSHEET_ID not set, mirror disabled");
            return None;
        };

        Some(Self {
            service_account_email,
            private_key_pem,
            spreadsheet_id,
            sheet_name: std::env::var("GOOGLE_SHEETS_SHEET_NAME")
                .unwrap_or_else(|_| DEFAULT_SHEET_NAME.to_string()),
        })
    }
}
