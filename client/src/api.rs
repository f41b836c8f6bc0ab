//! Backend endpoint wrappers.
//!
//! One async method per consumed REST endpoint, sharing a single
//! [`reqwest::Client`]. No caching, no pagination, no retries: every call
//! maps one-to-one onto a backend request and surfaces its failure once.
//!
//! Two response conventions coexist on the backend:
//!
//! * the `/api/v1/users/*` family wraps payloads in a
//!   `{success, message, data, error}` envelope and takes no shard key;
//! * the `/institutions`, `/campaigns` and `/transactions` families return
//!   plain JSON bodies and require an opaque `shardKey` query parameter,
//!   passed through verbatim from configuration.

use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use campaign_lifecycle::Campaign;

use crate::config::Config;
use crate::donate::TransactionPayload;
use crate::errors::{ClientError, Result};
use crate::register::{InstitutionProfile, UserProfile};

// ─────────────────────────────────────────────────────────
// Response shapes
// ─────────────────────────────────────────────────────────

/// The `/api/v1/users/*` response wrapper.
#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
    pub error: Option<String>,
}

/// A user record as returned by the backend lookup endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// An institution record as returned by the full listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
pub struct InstitutionRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ─────────────────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────────────────

pub struct Backend {
    http: Client,
    base_url: String,
    shard_key: String,
}

impl Backend {
    pub fn new(http: Client, config: &Config) -> Self {
        Backend {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            shard_key: config.shard_key.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn shard(&self) -> [(&'static str, &str); 1] {
        [("shardKey", self.shard_key.as_str())]
    }

    // ── Users ────────────────────────────────────────────

    /// `POST /api/v1/users/register`
    pub async fn register_user(&self, profile: &UserProfile) -> Result<()> {
        let resp = self
            .http
            .post(self.url("/api/v1/users/register"))
            .json(profile)
            .send()
            .await?;
        check_mutation(resp, "Failed to register user").await
    }

    /// `GET /api/v1/users/email/{email}` — resolve a user record by email.
    pub async fn user_by_email(&self, email: &str) -> Result<UserRecord> {
        let path = format!("/api/v1/users/email/{}", encode_segment(email));
        let resp = self.http.get(self.url(&path)).send().await?;
        let status = resp.status();
        let body: Envelope<UserRecord> = resp.json().await?;

        if !status.is_success() {
            return Err(ClientError::NotFound(backend_message(
                body.message,
                body.error,
                format!("No user registered with {email}"),
            )));
        }
        body.data
            .ok_or_else(|| ClientError::NotFound(format!("No user registered with {email}")))
    }

    /// `GET /api/v1/users/check/email/{email}`
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let path = format!("/api/v1/users/check/email/{}", encode_segment(email));
        let resp = self.http.get(self.url(&path)).send().await?;
        let body: Envelope<bool> = resp.json().await?;
        Ok(body.data.unwrap_or(false))
    }

    // ── Institutions ─────────────────────────────────────

    /// `POST /institutions`
    pub async fn register_institution(&self, profile: &InstitutionProfile) -> Result<()> {
        let resp = self
            .http
            .post(self.url("/institutions"))
            .query(&self.shard())
            .json(profile)
            .send()
            .await?;
        check_mutation(resp, "Failed to register institution").await
    }

    /// `GET /institutions` — the full listing.
    ///
    /// The backend has no lookup-by-email endpoint; the session holder
    /// scans this listing instead.
    pub async fn institutions(&self) -> Result<Vec<InstitutionRecord>> {
        let resp = self
            .http
            .get(self.url("/institutions"))
            .query(&self.shard())
            .send()
            .await?;
        check_fetch(resp, "Failed to fetch institutions").await
    }

    // ── Campaigns ────────────────────────────────────────

    /// `GET /campaigns/live` — the public browse listing.
    pub async fn live_campaigns(&self) -> Result<Vec<Campaign>> {
        self.fetch_campaigns("/campaigns/live").await
    }

    /// `GET /campaigns` — the complete set, institution review only.
    pub async fn all_campaigns(&self) -> Result<Vec<Campaign>> {
        self.fetch_campaigns("/campaigns").await
    }

    /// `GET /campaigns/approved`
    pub async fn approved_campaigns(&self) -> Result<Vec<Campaign>> {
        self.fetch_campaigns("/campaigns/approved").await
    }

    /// `GET /campaigns/institution/{id}`
    pub async fn campaigns_by_institution(&self, institution_id: i64) -> Result<Vec<Campaign>> {
        self.fetch_campaigns(&format!("/campaigns/institution/{institution_id}"))
            .await
    }

    async fn fetch_campaigns(&self, path: &str) -> Result<Vec<Campaign>> {
        let resp = self
            .http
            .get(self.url(path))
            .query(&self.shard())
            .send()
            .await?;
        let campaigns: Vec<Campaign> = check_fetch(resp, "Failed to fetch campaigns").await?;
        debug!("Fetched {} campaigns from {path}", campaigns.len());
        Ok(campaigns)
    }

    /// `GET /campaigns/{id}`
    pub async fn campaign_by_id(&self, id: i64) -> Result<Campaign> {
        let resp = self
            .http
            .get(self.url(&format!("/campaigns/{id}")))
            .query(&self.shard())
            .send()
            .await?;
        if !resp.status().is_success() {
            return Err(ClientError::NotFound(format!("Campaign {id} not found")));
        }
        Ok(resp.json().await?)
    }

    /// `POST /campaigns`
    pub async fn create_campaign(&self, campaign: &Campaign) -> Result<()> {
        let resp = self
            .http
            .post(self.url("/campaigns"))
            .query(&self.shard())
            .json(campaign)
            .send()
            .await?;
        check_mutation(resp, "Failed to create campaign").await
    }

    /// `PUT /campaigns/{id}` — full-record update, used by the lifecycle
    /// transitions. The caller must pass the most recently fetched record.
    pub async fn update_campaign(&self, id: i64, campaign: &Campaign) -> Result<()> {
        let resp = self
            .http
            .put(self.url(&format!("/campaigns/{id}")))
            .query(&self.shard())
            .json(campaign)
            .send()
            .await?;
        check_mutation(resp, "Failed to update campaign").await
    }

    // ── Transactions ─────────────────────────────────────

    /// `POST /transactions`
    pub async fn create_transaction(&self, payload: &TransactionPayload) -> Result<()> {
        let resp = self
            .http
            .post(self.url("/transactions"))
            .query(&self.shard())
            .json(payload)
            .send()
            .await?;
        check_mutation(resp, "Failed to process donation").await
    }
}

// ─────────────────────────────────────────────────────────
// Status handling
// ─────────────────────────────────────────────────────────

/// Read failure contract: non-success status becomes `Fetch` with the
/// operation context; the body is not consulted.
async fn check_fetch<T: serde::de::DeserializeOwned>(resp: Response, context: &str) -> Result<T> {
    let status = resp.status();
    if !status.is_success() {
        return Err(ClientError::Fetch {
            status: status.as_u16(),
            context: context.to_string(),
        });
    }
    Ok(resp.json().await?)
}

/// Write failure contract: non-success status becomes `Mutation`, carrying
/// the backend's `message` (or `error`) when the body is JSON and has one,
/// else the per-operation fallback.
async fn check_mutation(resp: Response, fallback: &str) -> Result<()> {
    let status = resp.status();
    if status.is_success() {
        return Ok(());
    }

    let body: Value = resp.json().await.unwrap_or(Value::Null);
    let message = backend_message(
        body.get("message").and_then(Value::as_str).map(String::from),
        body.get("error").and_then(Value::as_str).map(String::from),
        fallback.to_string(),
    );
    Err(ClientError::Mutation {
        status: status.as_u16(),
        message,
    })
}

fn backend_message(message: Option<String>, error: Option<String>, fallback: String) -> String {
    message
        .filter(|m| !m.is_empty())
        .or_else(|| error.filter(|e| !e.is_empty()))
        .unwrap_or(fallback)
}

/// Percent-encode a path segment, leaving only unreserved characters bare.
fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
