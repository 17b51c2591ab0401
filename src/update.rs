//! Release check against the latest GitHub release.

use log::{debug, warn};
use reqwest::Client;
use serde::Deserialize;
use std::cmp::Ordering;

use crate::constants::{
    GITHUB_RELEASE_URL, PROJECT_URL, RELEASE_REQUEST_TIMEOUT, USER_AGENT, VERSION,
};
use crate::error::FetchError;

/// A release version, comparable with others of the same kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Version {
    Numeric(Vec<u64>),
    /// Fallback when a component does not fit an integer.
    Text(String),
}

impl Version {
    /// `"v0.3.1"` → `Numeric([0, 3, 1])`. Returns `None` when nothing numeric is left.
    pub fn parse(s: &str) -> Option<Self> {
        let v = s.trim_start_matches(['v', 'V']);
        let parts: Vec<&str> = v
            .split(|c: char| !c.is_ascii_digit())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            return None;
        }
        match parts
            .iter()
            .map(|p| p.parse::<u64>())
            .collect::<Result<Vec<u64>, _>>()
        {
            Ok(numbers) => Some(Version::Numeric(numbers)),
            Err(_) => Some(Version::Text(v.to_string())),
        }
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match (self, other) {
            (Version::Numeric(a), Version::Numeric(b)) => Some(a.cmp(b)),
            (Version::Text(a), Version::Text(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

pub fn is_newer(remote: &str, local: &str) -> bool {
    match (Version::parse(remote), Version::parse(local)) {
        (Some(r), Some(l)) => r > l,
        _ => false,
    }
}

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: Option<String>,
    name: Option<String>,
}

impl Release {
    fn version(self) -> Option<String> {
        self.tag_name
            .filter(|t| !t.is_empty())
            .or(self.name.filter(|n| !n.is_empty()))
    }
}

/// Version string of the latest published release.
pub async fn fetch_latest_version() -> Result<Option<String>, FetchError> {
    fetch_release_version(GITHUB_RELEASE_URL).await
}

/// Version string of the release document at `url`.
pub async fn fetch_release_version(url: &str) -> Result<Option<String>, FetchError> {
    let client = Client::builder()
        .timeout(RELEASE_REQUEST_TIMEOUT)
        .user_agent(USER_AGENT)
        .build()?;

    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status(status.as_u16()));
    }

    let body = response.text().await?;
    let release: Release = serde_json::from_str(&body)?;
    Ok(release.version())
}

/// Update prompt to print, if a newer release exists.
pub async fn check_for_update() -> Option<String> {
    let remote = match fetch_latest_version().await {
        Ok(Some(v)) => v,
        Ok(None) => return None,
        Err(e) => {
            warn!("Error fetching current github version number: {}", e);
            return None;
        }
    };
    debug!("Latest release: {} (local {})", remote, VERSION);

    if is_newer(&remote, VERSION) {
        Some(format!(
            "A newer version of PoEMarcut is available at {}: {} (you have {})",
            PROJECT_URL, remote, VERSION
        ))
    } else {
        None
    }
}
