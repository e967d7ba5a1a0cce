use hearts_flames::Flames;
use serde::{Deserialize, Serialize};

/// One accepted form completion. Written once, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    pub id: String,
    pub timestamp: String,
    pub user_name: String,
    pub crush_name: String,
    pub result: Flames,
    pub device: Option<String>,
    pub screen: Option<String>,
    pub language: Option<String>,
    pub browser: Option<String>,
    pub os: Option<String>,
    pub country: String,
    pub city: String,
    pub ip_hash: String,
    pub session_id: Option<String>,
    pub referrer: Option<String>,
    pub page: Option<String>,
}

/// Key of the counter bumped once per accepted submission.
pub const TOTAL_SUBMISSIONS: &str = "totalSubmissions";
