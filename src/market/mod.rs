pub mod cache;
pub mod provider;
pub mod types;

pub use cache::PriceCache;
pub use provider::{PoeNinjaProvider, RateProvider};
pub use types::{CurrencyLine, CurrencyOverview, RateSnapshot, SnapshotSource};
