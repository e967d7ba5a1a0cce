use std::{env, fs::read_to_string};

use anyhow::{Context, Result, anyhow};
use tracing::info;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_PATH: &str = "names.txt";
pub const DEFAULT_COMMIT_MESSAGE: &str = "Add new name entry";

#[derive(Clone)]
pub struct LedgerConfig {
    pub api_base: String,
    pub owner: String,
    pub repo: String,
    pub path: String,
    pub branch: Option<String>,
    pub token: String,
    pub commit_message: String,
}

// Keeps the token out of logs.
impl std::fmt::Debug for LedgerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerConfig")
            .field("api_base", &self.api_base)
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("path", &self.path)
            .field("branch", &self.branch)
            .field("token", &"<redacted>")
            .finish()
    }
}

impl LedgerConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api_base: var_or("HEARTS_LEDGER_API_BASE", DEFAULT_API_BASE),
            owner: required("HEARTS_LEDGER_OWNER")?,
            repo: required("HEARTS_LEDGER_REPO")?,
            path: var_or("HEARTS_LEDGER_PATH", DEFAULT_PATH),
            branch: env::var("HEARTS_LEDGER_BRANCH").ok().filter(|b| !b.is_empty()),
            token: load_token()?,
            commit_message: var_or("HEARTS_LEDGER_COMMIT_MESSAGE", DEFAULT_COMMIT_MESSAGE),
        })
    }

    /// `{api_base}/repos/{owner}/{repo}/contents/{path}`
    pub fn contents_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/contents/{}",
            self.api_base.trim_end_matches('/'),
            self.owner,
            self.repo,
            self.path.trim_start_matches('/'),
        )
    }
}

fn var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    })
}

fn required(key: &str) -> Result<String> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| anyhow!("{key} must be set"))
}

/// `HEARTS_LEDGER_TOKEN`, or the contents of the file named by
/// `HEARTS_LEDGER_TOKEN_FILE` (e.g. a container secret).
fn load_token() -> Result<String> {
    if let Ok(token) = env::var("HEARTS_LEDGER_TOKEN") {
        if !token.trim().is_empty() {
            return Ok(token.trim().to_string());
        }
    }

    let path = required("HEARTS_LEDGER_TOKEN_FILE")
        .context("Set HEARTS_LEDGER_TOKEN or HEARTS_LEDGER_TOKEN_FILE")?;
    let token = read_to_string(&path)
        .with_context(|| format!("Failed to read ledger token from {path}"))?;
    let token = token.trim();
    if token.is_empty() {
        return Err(anyhow!("Ledger token file {path} is empty"));
    }
    Ok(token.to_string())
}
