//! Registration flows.
//!
//! Single-shot creation calls. The profiles are pass-through payloads: the
//! client checks required-field presence and the fixed-length identifier
//! formats, and leaves uniqueness and real validation to the backend.

use serde::Serialize;
use tracing::info;

use crate::api::Backend;
use crate::errors::{ClientError, Result};

const PAN_LEN: usize = 10;
const GST_LEN: usize = 15;
const IFSC_LEN: usize = 11;
const PHONE_LEN: usize = 10;
const PINCODE_LEN: usize = 6;

// ─────────────────────────────────────────────────────────
// Profiles
// ─────────────────────────────────────────────────────────

/// A new donor/beneficiary account.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub pan: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aadhar_card: Option<String>,
    pub is_beneficiary: bool,
}

impl UserProfile {
    pub fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require_digits("phone", &self.phone, PHONE_LEN)?;
        require_len("PAN", &self.pan, PAN_LEN)?;
        Ok(())
    }
}

/// A new reviewing institution.
///
/// However a front end chooses to collect this (the web UI uses a
/// three-step wizard), the whole record goes to the backend in one call;
/// there is no partial-save state.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub registered_gst: String,
    pub company_pan: String,
    pub institution_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pincode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registration_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ifsc_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_holder_name: Option<String>,
    pub is_verified: bool,
    pub is_active: bool,
}

impl InstitutionProfile {
    /// Build a profile with the required identifying fields; optional
    /// address and bank blocks default to absent.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        registered_gst: impl Into<String>,
        company_pan: impl Into<String>,
        institution_type: impl Into<String>,
    ) -> Self {
        InstitutionProfile {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            registered_gst: registered_gst.into(),
            company_pan: company_pan.into(),
            institution_type: institution_type.into(),
            address: None,
            city: None,
            state: None,
            pincode: None,
            country: None,
            registration_number: None,
            bank_account_number: None,
            bank_name: None,
            ifsc_code: None,
            account_holder_name: None,
            is_verified: false,
            is_active: true,
        }
    }

    pub fn validate(&self) -> Result<()> {
        require("name", &self.name)?;
        require("email", &self.email)?;
        require_digits("phone", &self.phone, PHONE_LEN)?;
        require_len("GST number", &self.registered_gst, GST_LEN)?;
        require_len("company PAN", &self.company_pan, PAN_LEN)?;
        require("institution type", &self.institution_type)?;
        if let Some(pincode) = &self.pincode {
            require_digits("pincode", pincode, PINCODE_LEN)?;
        }
        if let Some(ifsc) = &self.ifsc_code {
            require_len("IFSC code", ifsc, IFSC_LEN)?;
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────
// Flows
// ─────────────────────────────────────────────────────────

/// Create a user account. Runs an email-existence preflight so a duplicate
/// fails with a clear message instead of a backend constraint error.
pub async fn register_user(backend: &Backend, profile: &UserProfile) -> Result<()> {
    profile.validate()?;
    if backend.email_exists(&profile.email).await? {
        return Err(ClientError::Validation(format!(
            "An account already exists for {}",
            profile.email
        )));
    }
    backend.register_user(profile).await?;
    info!("Registered user {}", profile.email);
    Ok(())
}

/// Create an institution record.
pub async fn register_institution(backend: &Backend, profile: &InstitutionProfile) -> Result<()> {
    profile.validate()?;
    backend.register_institution(profile).await?;
    info!("Registered institution {}", profile.email);
    Ok(())
}

// ─────────────────────────────────────────────────────────
// Validation helpers
// ─────────────────────────────────────────────────────────

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ClientError::Validation(format!("{field} is required")));
    }
    Ok(())
}

fn require_len(field: &str, value: &str, expected: usize) -> Result<()> {
    require(field, value)?;
    if value.len() != expected {
        return Err(ClientError::Validation(format!(
            "{field} must be exactly {expected} characters"
        )));
    }
    Ok(())
}

fn require_digits(field: &str, value: &str, expected: usize) -> Result<()> {
    require(field, value)?;
    if value.len() != expected || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ClientError::Validation(format!(
            "{field} must be exactly {expected} digits"
        )));
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────
// Unit tests
// ─────────────────────────────────────────────────────────
