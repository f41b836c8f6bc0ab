//! Donation recorder.
//!
//! Write-only from the client's perspective: a donation is submitted once
//! as a transaction record and never read back. The client re-fetches the
//! campaign afterwards to pick up any backend-side total update, but the
//! refreshed numbers may still predate settlement — that gap is surfaced
//! as-is, not masked.

use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use serde::Serialize;
use tracing::info;

use campaign_lifecycle::Campaign;

use crate::api::Backend;
use crate::errors::{ClientError, Result};
use crate::session::Session;

/// Status every new transaction is created with; owned by the backend
/// thereafter.
const STATUS_PENDING: &str = "PENDING";

/// Length of the random correlation-token suffix.
const TOKEN_SUFFIX_LEN: usize = 9;

/// Raw donation form input.
#[derive(Clone, Debug, Default)]
pub struct DonationRequest {
    /// Donor-entered amount, kept as text until validation.
    pub amount: String,
    /// Payment-instrument reference (a UPI id).
    pub upi_id: String,
    pub anonymous: bool,
    pub message: Option<String>,
}

/// The transaction record as posted to the backend.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayload {
    pub transaction_id: String,
    pub donor_id: i64,
    pub campaign_id: i64,
    pub amount: f64,
    pub upi_id: String,
    pub status: String,
    pub is_anonymous: bool,
    pub donor_message: String,
}

#[cfg(test)]
impl TransactionPayload {
    pub(crate) fn sample_for_tests() -> Self {
        TransactionPayload {
            transaction_id: "TXN_0_aaaaaaaaa".to_string(),
            donor_id: 1,
            campaign_id: 1,
            amount: 100.0,
            upi_id: "x@upi".to_string(),
            status: STATUS_PENDING.to_string(),
            is_anonymous: false,
            donor_message: String::new(),
        }
    }
}

/// Client-generated correlation token: `TXN_<unix-millis>_<random suffix>`.
///
/// Cosmetic only — not guaranteed unique under concurrent submissions in
/// the same millisecond, and the backend is not assumed to deduplicate
/// on it.
pub fn correlation_token() -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix: String = thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_SUFFIX_LEN)
        .map(char::from)
        .collect::<String>()
        .to_lowercase();
    format!("TXN_{millis}_{suffix}")
}

/// The only client-side validation: the amount must be present, numeric,
/// and positive. Everything else is backend-owned.
fn parse_amount(raw: &str) -> Result<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ClientError::Validation(
            "Donation amount is required".to_string(),
        ));
    }
    let amount: f64 = trimmed.parse().map_err(|_| {
        ClientError::Validation(format!("Donation amount must be a number, got {trimmed:?}"))
    })?;
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ClientError::Validation(
            "Donation amount must be positive".to_string(),
        ));
    }
    Ok(amount)
}

/// Validate the form input and assemble the wire payload. The donor
/// reference is the authenticated actor's id.
pub fn build_payload(
    session: &Session,
    campaign_id: i64,
    request: &DonationRequest,
) -> Result<TransactionPayload> {
    let amount = parse_amount(&request.amount)?;
    Ok(TransactionPayload {
        transaction_id: correlation_token(),
        donor_id: session.id,
        campaign_id,
        amount,
        upi_id: request.upi_id.clone(),
        status: STATUS_PENDING.to_string(),
        is_anonymous: request.anonymous,
        donor_message: request.message.clone().unwrap_or_default(),
    })
}

/// Submit a donation against a campaign, then re-fetch the campaign.
///
/// Validation failures return before any network call. The returned record
/// reflects whatever the backend had applied by re-fetch time.
pub async fn donate(
    backend: &Backend,
    session: &Session,
    campaign_id: i64,
    request: &DonationRequest,
) -> Result<Campaign> {
    let payload = build_payload(session, campaign_id, request)?;
    backend.create_transaction(&payload).await?;
    info!(
        "Recorded donation {} of {} against campaign {campaign_id}",
        payload.transaction_id, payload.amount
    );
    backend.campaign_by_id(campaign_id).await
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::session::Role;
    use mockito::Matcher;
    use reqwest::Client;
    use serde_json::json;

    fn donor_session() -> Session {
        Session {
            email: "asha@example.com".to_string(),
            role: Role::User,
            id: 7,
        }
    }

    #[test]
    fn empty_amount_is_rejected_before_any_network_call() {
        let request = DonationRequest {
            amount: String::new(),
            upi_id: "asha@upi".to_string(),
            ..Default::default()
        };
        let err = build_payload(&donor_session(), 42, &request).unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[test]
    fn non_numeric_and_non_positive_amounts_are_rejected() {
        for bad in ["abc", "-5", "0", "NaN"] {
            let request = DonationRequest {
                amount: bad.to_string(),
                ..Default::default()
            };
            let err = build_payload(&donor_session(), 42, &request).unwrap_err();
            assert!(
                matches!(err, ClientError::Validation(_)),
                "amount {bad:?} should fail validation"
            );
        }
    }

    #[test]
    fn valid_amount_builds_pending_payload_for_the_actor() {
        let request = DonationRequest {
            amount: "500".to_string(),
            upi_id: "asha@upi".to_string(),
            anonymous: true,
            message: Some("Get well soon".to_string()),
        };
        let payload = build_payload(&donor_session(), 42, &request).unwrap();

        assert_eq!(payload.amount, 500.0);
        assert_eq!(payload.status, "PENDING");
        assert_eq!(payload.donor_id, 7);
        assert_eq!(payload.campaign_id, 42);
        assert!(payload.is_anonymous);
        assert_eq!(payload.donor_message, "Get well soon");
    }

    #[test]
    fn correlation_token_has_the_expected_shape() {
        let token = correlation_token();
        let parts: Vec<&str> = token.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "TXN");
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), TOKEN_SUFFIX_LEN);
        assert!(parts[2]
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn payload_serializes_in_backend_field_names() {
        let payload = TransactionPayload::sample_for_tests();
        let wire = serde_json::to_value(&payload).unwrap();
        assert_eq!(wire["transactionId"], "TXN_0_aaaaaaaaa");
        assert_eq!(wire["donorId"], 1);
        assert_eq!(wire["campaignId"], 1);
        assert_eq!(wire["upiId"], "x@upi");
        assert_eq!(wire["isAnonymous"], false);
        assert_eq!(wire["donorMessage"], "");
    }

    #[tokio::test]
    async fn donate_posts_transaction_then_refetches_campaign() {
        let mut server = mockito::Server::new_async().await;

        let post = server
            .mock("POST", "/transactions")
            .match_query(Matcher::UrlEncoded("shardKey".into(), "test".into()))
            .match_body(Matcher::PartialJson(json!({
                "amount": 500.0,
                "status": "PENDING",
                "donorId": 7
            })))
            .with_status(201)
            .with_body("{}")
            .create_async()
            .await;

        let refetch = server
            .mock("GET", "/campaigns/42")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "id": 42, "beneficiaryId": 7, "institutionId": 3,
                    "title": "t", "description": "d",
                    "fundRaised": 250.0, "donorCount": 4, "priorityScore": 0,
                    "isLive": true, "isApproved": true, "isFulfilled": false
                })
                .to_string(),
            )
            .create_async()
            .await;

        let config = Config {
            api_base_url: server.url(),
            shard_key: "test".to_string(),
            session_file: "/tmp/unused-session.json".into(),
        };
        let backend = Backend::new(Client::new(), &config);

        let request = DonationRequest {
            amount: "500".to_string(),
            upi_id: "asha@upi".to_string(),
            ..Default::default()
        };
        let campaign = donate(&backend, &donor_session(), 42, &request)
            .await
            .unwrap();

        post.assert_async().await;
        refetch.assert_async().await;
        // The re-fetched total may still predate settlement.
        assert_eq!(campaign.fund_raised, 250.0);
    }
}
