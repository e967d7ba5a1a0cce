/// Row type for the `submissions` table. Kept separate from the API model so
/// the storage layer reads back exactly what SQLite holds.
#[derive(Debug, Clone)]
pub struct SubmissionRow {
    pub id: String,
    pub timestamp: String,
    pub user_name: String,
    pub crush_name: String,
    pub result: String,
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
