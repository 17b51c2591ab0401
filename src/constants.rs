//! Central constants for poemarcut.
//!
//! Endpoints, timeouts and the few magic numbers used by the repricing
//! workflow live here so behaviour can be tuned without touching logic.

use std::time::Duration;

// =============================================================================
// VERSION
// =============================================================================

/// Compile-time version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Sent with every outgoing request.
pub const USER_AGENT: &str = concat!(
    "poemarcut/",
    env!("CARGO_PKG_VERSION"),
    " (+https://github.com/cdrg/poemarcut)"
);

// =============================================================================
// MARKET DATA
// =============================================================================

pub const POE_NINJA_URL: &str = "https://poe.ninja";

/// Appended to `/poe1` or `/poe2`.
pub const CURRENCY_OVERVIEW_PATH: &str = "/api/economy/exchange/current/overview";

/// Currency every other rate is expressed in. A snapshot without it is unusable.
pub const BASELINE_CURRENCY_ID: &str = "divine";

/// The exchange API only refreshes hourly, so cached data is good for this long.
pub const CACHE_MAX_AGE: Duration = Duration::from_secs(60 * 60);

/// Timeout for the currency overview request
pub const RATE_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// If 1 divine buys more than this many exalts, exalts are worth vendoring.
pub const POE2_EX_WORTHLESS_VAL: f64 = 500.0;

// =============================================================================
// RELEASE CHECK
// =============================================================================

pub const GITHUB_RELEASE_URL: &str = "https://api.github.com/repos/cdrg/poemarcut/releases/latest";
pub const PROJECT_URL: &str = "https://github.com/cdrg/poemarcut";

/// Timeout for the release check request
pub const RELEASE_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

// =============================================================================
// INPUT TIMING
// =============================================================================

/// Pause after pasting so the game finishes processing before more input arrives.
pub const PASTE_SETTLE_DELAY: Duration = Duration::from_millis(300);

/// Hold time between button down and up for the low-level click injector.
pub const CLICK_HOLD_DELAY: Duration = Duration::from_millis(30);
