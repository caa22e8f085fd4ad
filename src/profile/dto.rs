use serde::{Deserialize, Serialize};

use crate::auth::dto::PublicUser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    CreditCard,
    DebitCard,
    Paypal,
    BankTransfer,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethod {
    pub kind: PaymentKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default)]
    pub is_default: bool,
}

/// Optional personal data embedded in the user record (stored as JSONB).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    /// Chilean national ID (RUT), e.g. `12.345.678-5`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rut: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub diagnosed_diseases: Vec<String>,
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethod>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePersonalInfoRequest {
    pub personal_info: PersonalInfo,
}

#[derive(Debug, Serialize)]
pub struct PersonalInfoResponse {
    pub personal_info: PersonalInfo,
}

#[derive(Debug, Serialize)]
pub struct UpdatePersonalInfoResponse {
    pub message: String,
    pub user: PublicUser,
}

#[derive(Debug, Deserialize)]
pub struct TrialPeriodRequest {
    pub trial_days: i64,
}

#[derive(Debug, Serialize)]
pub struct TrialPeriodResponse {
    pub message: String,
    pub trial_period_days: i32,
}
