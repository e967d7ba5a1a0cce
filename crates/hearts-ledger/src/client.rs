use anyhow::Result;
use reqwest::{Client, StatusCode, header};
use serde::Deserialize;
use tracing::{debug, info};

use crate::LedgerError;
use crate::config::LedgerConfig;
use crate::content::{self, RemoteFile, UpdateRequest};

const USER_AGENT: &str = concat!("hearts-ledger/", env!("CARGO_PKG_VERSION"));
const ACCEPT: &str = "application/vnd.github+json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendOutcome {
    /// The file did not exist before this append.
    pub created: bool,
    /// Line count after the append.
    pub lines: usize,
    pub commit_sha: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PutResponse {
    #[serde(default)]
    commit: Option<CommitRef>,
}

#[derive(Debug, Deserialize)]
struct CommitRef {
    sha: String,
}

pub struct LedgerClient {
    http: Client,
    config: LedgerConfig,
}

impl LedgerClient {
    pub fn new(config: LedgerConfig) -> Result<Self> {
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    fn request(&self, method: reqwest::Method) -> reqwest::RequestBuilder {
        self.http
            .request(method, self.config.contents_url())
            .bearer_auth(&self.config.token)
            .header(header::ACCEPT, ACCEPT)
    }

    /// Current file, or `None` if it does not exist yet.
    pub async fn fetch(&self) -> Result<Option<RemoteFile>, LedgerError> {
        let url = self.config.contents_url();
        let mut req = self.request(reqwest::Method::GET);
        if let Some(branch) = &self.config.branch {
            req = req.query(&[("ref", branch)]);
        }

        let res = req.send().await.map_err(|source| LedgerError::Http {
            url: url.clone(),
            source,
        })?;

        match res.status() {
            StatusCode::NOT_FOUND => {
                debug!("{} does not exist yet", self.config.path);
                Ok(None)
            }
            status if status.is_success() => {
                let file = res
                    .json::<RemoteFile>()
                    .await
                    .map_err(|source| LedgerError::Http { url, source })?;
                Ok(Some(file))
            }
            status => Err(LedgerError::Status {
                action: "Fetching the ledger file",
                status,
            }),
        }
    }

    /// Read-modify-write of the whole file. A concurrent writer makes the
    /// host reject the stale `sha` with 409, surfaced as `LedgerError::Status`.
    pub async fn append(&self, name: &str) -> Result<AppendOutcome, LedgerError> {
        let name = content::normalize_name(name)?;

        let existing = self.fetch().await?;
        let (text, sha) = match &existing {
            Some(file) => (content::decode_content(&file.content)?, Some(file.sha.clone())),
            None => (String::new(), None),
        };

        let updated = content::append_line(&text, name);
        let body = UpdateRequest {
            message: self.config.commit_message.clone(),
            content: content::encode_content(&updated),
            sha,
            branch: self.config.branch.clone(),
        };

        let url = self.config.contents_url();
        let res = self
            .request(reqwest::Method::PUT)
            .json(&body)
            .send()
            .await
            .map_err(|source| LedgerError::Http {
                url: url.clone(),
                source,
            })?;

        let status = res.status();
        if !status.is_success() {
            return Err(LedgerError::Status {
                action: "Writing the ledger file",
                status,
            });
        }

        let put: PutResponse = res
            .json()
            .await
            .map_err(|source| LedgerError::Http { url, source })?;

        let outcome = AppendOutcome {
            created: existing.is_none(),
            lines: updated.lines().count(),
            commit_sha: put.commit.map(|c| c.sha),
        };
        info!(
            "Appended a name to {}/{}:{} ({} lines)",
            self.config.owner, self.config.repo, self.config.path, outcome.lines
        );
        Ok(outcome)
    }
}
