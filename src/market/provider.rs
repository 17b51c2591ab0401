//! Exchange-rate providers.

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use std::time::Duration;

use crate::config::settings::Game;
use crate::constants::{CURRENCY_OVERVIEW_PATH, POE_NINJA_URL, RATE_REQUEST_TIMEOUT, USER_AGENT};
use crate::error::FetchError;
use crate::market::types::CurrencyOverview;

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Fetch the current currency exchange overview for a league.
    async fn fetch_overview(&self, game: Game, league: &str)
        -> Result<CurrencyOverview, FetchError>;
}

/// poe.ninja currency exchange API.
pub struct PoeNinjaProvider {
    client: Client,
    base_url: String,
}

impl PoeNinjaProvider {
    pub fn new() -> Self {
        Self::with_base_url(POE_NINJA_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: build_client(RATE_REQUEST_TIMEOUT),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_client(timeout);
        self
    }

    fn endpoint(&self, game: Game) -> String {
        format!(
            "{}/poe{}{}",
            self.base_url,
            game.number(),
            CURRENCY_OVERVIEW_PATH
        )
    }
}

fn build_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .unwrap_or_else(|_| Client::new())
}

impl Default for PoeNinjaProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateProvider for PoeNinjaProvider {
    async fn fetch_overview(
        &self,
        game: Game,
        league: &str,
    ) -> Result<CurrencyOverview, FetchError> {
        let url = self.endpoint(game);
        debug!("Fetching {} currency overview for '{}' from {}", game, league, url);

        let response = self
            .client
            .get(&url)
            .query(&[("league", league), ("type", "Currency")])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        // Read as text first so a malformed body surfaces as a JSON error
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
