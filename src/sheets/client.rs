//! Google Sheets client for the remote mirror.
//!
//! Talks to the Sheets values API with a service-account access token. The token is
//! obtained by signing an RS256 JWT assertion and exchanging it at Google's token
//! endpoint; it is cached until shortly before expiry.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use url::Url;

use crate::{
    config::SheetsConfig,
    error::sheets::SheetsError,
    sheets::{MirrorRow, MirrorSnapshot, RemoteMirror, SHEET_HEADER},
    util::validate,
};

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const TOKEN_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";
const TOKEN_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Refresh the cached token this long before it actually expires.
const TOKEN_EXPIRY_MARGIN_SECS: i64 = 60;

/// Sheet column index of the raffle number, zero-based.
const NUMBER_COLUMN: usize = 1;
/// Sheet column index of the CPF, zero-based.
const CPF_COLUMN: usize = 3;

#[derive(Serialize)]
struct TokenClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
}

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Remote mirror implementation over the Google Sheets REST API.
pub struct GoogleSheetsMirror {
    http: reqwest::Client,
    key: EncodingKey,
    service_account_email: String,
    spreadsheet_id: String,
    sheet_name: String,
    token: Mutex<Option<CachedToken>>,
}

impl GoogleSheetsMirror {
    /// Creates a mirror client from validated configuration.
    ///
    /// # Arguments
    /// - `config` - Mirror settings including the service-account PEM key
    ///
    /// # Returns
    /// - `Ok(GoogleSheetsMirror)` - Ready client with the key parsed
    /// - `Err(SheetsError::Jwt)` - The private key is not a valid RSA PEM
    pub fn new(config: SheetsConfig) -> Result<Self, SheetsError> {
        let key = EncodingKey::from_rsa_pem(config.private_key_pem.as_bytes())?;

        Ok(Self {
            http: reqwest::Client::new(),
            key,
            service_account_email: config.service_account_email,
            spreadsheet_id: config.spreadsheet_id,
            sheet_name: config.sheet_name,
            token: Mutex::new(None),
        })
    }

    /// Returns a valid access token, reusing the cached one when still fresh.
    async fn access_token(&self) -> Result<String, SheetsError> {
        let mut cached = self.token.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.expires_at - Duration::seconds(TOKEN_EXPIRY_MARGIN_SECS) > Utc::now() {
                return Ok(token.access_token.clone());
            }
        }

        let now = Utc::now();
        let claims = TokenClaims {
            iss: &self.service_account_email,
            scope: TOKEN_SCOPE,
            aud: TOKEN_URL,
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &self.key)?;

        let response = self
            .http
            .post(TOKEN_URL)
            .form(&[("grant_type", TOKEN_GRANT_TYPE), ("assertion", &assertion)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SheetsError::Api {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let token: TokenResponse = response.json().await?;
        let access_token = token.access_token.clone();
        *cached = Some(CachedToken {
            access_token: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in),
        });

        Ok(access_token)
    }

    fn values_url(&self, range: &str, suffix: &str) -> Result<Url, SheetsError> {
        // Url::parse percent-encodes spaces in sheet names.
        Ok(Url::parse(&format!(
            "{}/{}/values/{}{}",
            SHEETS_API_BASE, self.spreadsheet_id, range, suffix
        ))?)
    }

    fn range(&self, cells: &str) -> String {
        format!("{}!{}", self.sheet_name, cells)
    }

    async fn get_values(&self, cells: &str) -> Result<Vec<Vec<String>>, SheetsError> {
        let token = self.access_token().await?;
        let url = self.values_url(&self.range(cells), "")?;

        let response = self.http.get(url).bearer_auth(token).send().await?;
        if !response.status().is_success() {
            return Err(SheetsError::Api {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let range: ValueRange = response.json().await?;
        Ok(range
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    async fn append_values(&self, values: Vec<Vec<String>>) -> Result<(), SheetsError> {
        let token = self.access_token().await?;
        let mut url = self.values_url(&self.range("A1"), ":append")?;
        url.query_pairs_mut()
            .append_pair("valueInputOption", "USER_ENTERED")
            .append_pair("insertDataOption", "INSERT_ROWS");

        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(&serde_json::json!({ "values": values }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SheetsError::Api {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        Ok(())
    }

    async fn put_values(&self, cells: &str, values: Vec<Vec<String>>) -> Result<(), SheetsError> {
        let token = self.access_token().await?;
        let mut url = self.values_url(&self.range(cells), "")?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let response = self
            .http
            .put(url)
            .bearer_auth(token)
            .json(&serde_json::json!({ "values": values }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SheetsError::Api {
                status: response.status().as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        Ok(())
    }

    /// Rewrites the header row when the first row does not match the fixed shape.
    async fn ensure_header(&self) -> Result<(), SheetsError> {
        let first = self.get_values("A1:G1").await?;
        let current = first.into_iter().next().unwrap_or_default();

        if current.iter().map(String::as_str).eq(SHEET_HEADER) {
            return Ok(());
        }

        self.put_values(
            "A1:G1",
            vec![SHEET_HEADER.iter().map(|h| h.to_string()).collect()],
        )
        .await
    }
}

#[async_trait]
impl RemoteMirror for GoogleSheetsMirror {
    async fn snapshot(&self) -> Result<MirrorSnapshot, SheetsError> {
        let rows = self.get_values("A2:G").await?;

        let mut snapshot = MirrorSnapshot::default();
        for row in rows {
            // USER_ENTERED cells may have lost their zero padding; renormalize.
            if let Some(number) = row
                .get(NUMBER_COLUMN)
                .and_then(|cell| validate::canonical_number_from_str(cell))
            {
                snapshot.numbers.insert(number);
            }
            if let Some(cell) = row.get(CPF_COLUMN) {
                let digits = validate::only_digits(cell);
                if !digits.is_empty() {
                    snapshot.cpfs.insert(digits);
                }
            }
        }

        Ok(snapshot)
    }

    async fn append(&self, rows: &[MirrorRow]) -> Result<(), SheetsError> {
        self.ensure_header().await?;
        self.append_values(rows.iter().map(MirrorRow::to_values).collect())
            .await
    }
}

fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}
