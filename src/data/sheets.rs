//! Thin Google Sheets v4 client: one token grant at authorization time,
//! then plain bearer-authenticated GETs.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::auth::ServiceAccountKey;

const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const TOKEN_LIFETIME_SECS: u64 = 3600;
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// SheetsClient – the authorized data handle
// ---------------------------------------------------------------------------

/// A live authenticated connection to the Sheets API. Owned by the process;
/// the access token is fetched once and reused (re-authentication is not
/// supported — restart the process instead).
pub struct SheetsClient {
    agent: ureq::Agent,
    access_token: String,
}

impl SheetsClient {
    /// Exchange a signed service-account assertion for an access token.
    pub fn authorize(key: &ServiceAccountKey, scopes: &[&str]) -> Result<Self> {
        let agent = ureq::AgentBuilder::new().timeout(HTTP_TIMEOUT).build();

        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("system clock before the epoch")?
            .as_secs();
        let claims = grant_claims(key, scopes, now);

        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .context("reading the service-account private key")?;
        let assertion = jsonwebtoken::encode(
            &Header::new(Algorithm::RS256),
            &claims,
            &encoding_key,
        )
        .context("signing the token request")?;

        let response: TokenResponse = agent
            .post(&key.token_uri)
            .send_form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", &assertion)])
            .context("requesting an access token")?
            .into_json()
            .context("parsing the token response")?;

        Ok(SheetsClient {
            agent,
            access_token: response.access_token,
        })
    }

    /// Titles of every worksheet in the document, in document order.
    pub fn worksheet_titles(&self, spreadsheet_id: &str) -> Result<Vec<String>> {
        let url = format!("{SHEETS_API_BASE}/{spreadsheet_id}?fields=sheets.properties.title");
        let doc: DocumentResponse = self.get_json(&url)?;
        Ok(doc
            .sheets
            .into_iter()
            .map(|s| s.properties.title)
            .collect())
    }

    /// Every cell of one worksheet as raw JSON values, rows in sheet order.
    /// The first row is the header.
    pub fn worksheet_values(
        &self,
        spreadsheet_id: &str,
        title: &str,
    ) -> Result<Vec<Vec<JsonValue>>> {
        let url = format!(
            "{SHEETS_API_BASE}/{spreadsheet_id}/values/{}?valueRenderOption=UNFORMATTED_VALUE",
            values_range(title)
        );
        let body: ValuesResponse = self.get_json(&url)?;
        Ok(body.values)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.agent
            .get(url)
            .set("Authorization", &format!("Bearer {}", self.access_token))
            .call()
            .with_context(|| format!("GET {url}"))?
            .into_json()
            .context("parsing the API response")
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Claim set of the one-off authorization JWT.
#[derive(Debug, Serialize)]
struct GrantClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: u64,
    exp: u64,
}

fn grant_claims(key: &ServiceAccountKey, scopes: &[&str], now: u64) -> GrantClaims {
    GrantClaims {
        iss: key.client_email.clone(),
        scope: scopes.join(" "),
        aud: key.token_uri.clone(),
        iat: now,
        exp: now + TOKEN_LIFETIME_SECS,
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct DocumentResponse {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Deserialize)]
struct ValuesResponse {
    #[serde(default)]
    values: Vec<Vec<JsonValue>>,
}

// ---------------------------------------------------------------------------
// URL helpers
// ---------------------------------------------------------------------------

/// Extract the document id from a `docs.google.com/spreadsheets/d/<id>` URL.
pub fn spreadsheet_id_from_url(url: &str) -> Result<&str> {
    let Some(rest) = url.split("/d/").nth(1) else {
        bail!("'{url}' is not a spreadsheet URL (missing '/d/' segment)");
    };
    let id = rest.split(['/', '?', '#']).next().unwrap_or("");
    if id.is_empty() {
        bail!("'{url}' has an empty spreadsheet id");
    }
    Ok(id)
}

/// A1-notation range covering a whole worksheet, percent-encoded for the
/// request path. Titles are single-quoted; embedded quotes are doubled.
fn values_range(title: &str) -> String {
    let quoted = format!("'{}'", title.replace('\'', "''"));
    urlencoding::encode(&quoted).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key() -> ServiceAccountKey {
        serde_json::from_str(
            r#"{
                "client_email": "viewer@example.iam.gserviceaccount.com",
                "private_key": "pk",
                "token_uri": "https://oauth2.googleapis.com/token"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn spreadsheet_id_extraction() {
        let id = spreadsheet_id_from_url(
            "https://docs.google.com/spreadsheets/d/1dvx7XQDZCp1f60bdoEi6KcUGpvghO3kxdGZJkj_ZSiE",
        )
        .unwrap();
        assert_eq!(id, "1dvx7XQDZCp1f60bdoEi6KcUGpvghO3kxdGZJkj_ZSiE");

        let id = spreadsheet_id_from_url(
            "https://docs.google.com/spreadsheets/d/abc123/edit#gid=0",
        )
        .unwrap();
        assert_eq!(id, "abc123");
    }

    #[test]
    fn non_spreadsheet_url_is_rejected() {
        assert!(spreadsheet_id_from_url("https://example.com/").is_err());
        assert!(spreadsheet_id_from_url("https://docs.google.com/spreadsheets/d/").is_err());
    }

    #[test]
    fn values_range_quotes_and_encodes() {
        assert_eq!(values_range("Sheet1"), "%27Sheet1%27");
        // Korean worksheet titles survive encoding
        assert_eq!(
            values_range("클러스터별"),
            urlencoding::encode("'클러스터별'").into_owned()
        );
        // embedded quote doubled, gspread-style
        assert_eq!(values_range("it's"), urlencoding::encode("'it''s'").into_owned());
    }

    #[test]
    fn grant_claims_cover_scopes_and_lifetime() {
        let claims = grant_claims(&key(), &["scope-a", "scope-b"], 1_000);
        assert_eq!(claims.iss, "viewer@example.iam.gserviceaccount.com");
        assert_eq!(claims.scope, "scope-a scope-b");
        assert_eq!(claims.aud, "https://oauth2.googleapis.com/token");
        assert_eq!(claims.exp, 1_000 + TOKEN_LIFETIME_SECS);
    }
}
