use base64::Engine;
use base64::engine::general_purpose::STANDARD as B64;
use serde::{Deserialize, Serialize};

use crate::LedgerError;

/// File metadata as returned by `GET .../contents/{path}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteFile {
    pub sha: String,
    /// Base64, wrapped with newlines by the host.
    #[serde(default)]
    pub content: String,
}

/// Body of `PUT .../contents/{path}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateRequest {
    pub message: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub branch: Option<String>,
}

/// Trimmed name, or why it cannot go into a line-per-name file.
pub fn normalize_name(name: &str) -> Result<&str, LedgerError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(LedgerError::EmptyName);
    }
    if name.contains(['\n', '\r']) {
        return Err(LedgerError::MultilineName);
    }
    Ok(name)
}

pub fn decode_content(encoded: &str) -> Result<String, LedgerError> {
    let compact: String = encoded.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = B64.decode(compact)?;
    Ok(String::from_utf8(bytes)?)
}

pub fn encode_content(text: &str) -> String {
    B64.encode(text)
}

/// `existing` plus one `name\n` line. A missing trailing newline on the
/// existing text is repaired first so names never run together.
pub fn append_line(existing: &str, name: &str) -> String {
    let mut out = String::with_capacity(existing.len() + name.len() + 2);
    out.push_str(existing);
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out.push_str(name);
    out.push('\n');
    out
}
