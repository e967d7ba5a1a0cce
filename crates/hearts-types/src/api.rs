use serde::{Deserialize, Serialize};

// -- Submit --

/// Body of `POST /submit`.
///
/// Every field is optional at the type level so that a missing field is a
/// validation failure (400) rather than a parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub crush: Option<String>,
    #[serde(default)]
    pub result: Option<String>,
    #[serde(default)]
    pub client: Option<ClientInfo>,
    #[serde(default)]
    pub session: Option<SessionInfo>,
}

/// Browser metadata reported by the client. Unverified.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientInfo {
    #[serde(default)]
    pub device: Option<String>,
    #[serde(default)]
    pub screen: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub browser: Option<String>,
    #[serde(default)]
    pub os: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub referrer: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    pub submission_id: String,
    pub timestamp: String,
}

impl SubmitResponse {
    pub fn accepted(submission_id: String, timestamp: String) -> Self {
        Self {
            success: true,
            submission_id,
            timestamp,
        }
    }
}

// -- Errors --

/// Failure shape shared by every non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
