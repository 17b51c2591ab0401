//! Per-league currency snapshot cache in front of a [`RateProvider`].
//!
//! The exchange API only updates hourly, so a snapshot file younger than
//! [`CACHE_MAX_AGE`] is served without touching the network. The file's
//! modification time is the only freshness signal.

use log::{debug, error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::config::settings::Game;
use crate::constants::CACHE_MAX_AGE;
use crate::error::{CacheError, FetchError};
use crate::market::provider::RateProvider;
use crate::market::types::{CurrencyOverview, RateSnapshot, SnapshotSource};

pub struct PriceCache<P> {
    dir: PathBuf,
    provider: P,
    max_age: Duration,
}

impl<P: RateProvider> PriceCache<P> {
    pub fn new(dir: impl Into<PathBuf>, provider: P) -> Self {
        Self {
            dir: dir.into(),
            provider,
            max_age: CACHE_MAX_AGE,
        }
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn snapshot_path(&self, game: Game, league: &str) -> PathBuf {
        let safe: String = league
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("poe{}-{}.json", game.number(), safe))
    }

    /// Cached snapshot if fresh (or `force_no_refetch`), otherwise a fresh fetch.
    ///
    /// Cache read and write problems are logged and never fail the lookup;
    /// only the network side can produce an error.
    pub async fn get(
        &self,
        game: Game,
        league: &str,
        force_no_refetch: bool,
    ) -> Result<RateSnapshot, FetchError> {
        let path = self.snapshot_path(game, league);

        match self.read_cached(&path, force_no_refetch) {
            Ok(Some(snapshot)) => {
                debug!(
                    "Using cached {} data for '{}' from {}",
                    game,
                    league,
                    path.display()
                );
                return Ok(snapshot);
            }
            Ok(None) => {}
            Err(e) => error!("{} ({})", e, path.display()),
        }

        info!("Fetching {} currency data for '{}'...", game, league);
        let overview = self.provider.fetch_overview(game, league).await?;
        if !overview.is_valid() {
            return Err(FetchError::LeagueNotFound {
                league: league.to_string(),
            });
        }

        let updated_at = match self.write_cached(&path, &overview) {
            Ok(mtime) => mtime,
            Err(e) => {
                error!("Error writing cache file {}: {}", path.display(), e);
                SystemTime::now()
            }
        };

        Ok(RateSnapshot {
            overview,
            updated_at,
            source: SnapshotSource::Network,
        })
    }

    fn read_cached(
        &self,
        path: &Path,
        force_no_refetch: bool,
    ) -> Result<Option<RateSnapshot>, CacheError> {
        let mtime = match fs::metadata(path) {
            Ok(meta) => meta.modified()?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let age = SystemTime::now()
            .duration_since(mtime)
            .unwrap_or_default();
        if age >= self.max_age && !force_no_refetch {
            debug!("Cache file {} is stale ({:?} old)", path.display(), age);
            return Ok(None);
        }

        let content = fs::read_to_string(path)?;
        let overview: CurrencyOverview = serde_json::from_str(&content)?;
        if !overview.is_valid() {
            warn!(
                "Cache file {} has no baseline currency, ignoring it",
                path.display()
            );
            return Ok(None);
        }

        Ok(Some(RateSnapshot {
            overview,
            updated_at: mtime,
            source: SnapshotSource::Cache,
        }))
    }

    fn write_cached(
        &self,
        path: &Path,
        overview: &CurrencyOverview,
    ) -> Result<SystemTime, CacheError> {
        let content = serde_json::to_string_pretty(overview)?;
        fs::write(path, content)?;
        Ok(fs::metadata(path)?.modified()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::fs::File;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tempfile::tempdir;

    const VALID_BODY: &str = r#"{
        "core": {"primary": "divine"},
        "lines": [
            {"id": "divine", "primaryValue": 1.0},
            {"id": "chaos", "primaryValue": 0.005}
        ]
    }"#;

    const NO_DIVINE_BODY: &str = r#"{"lines": [{"id": "chaos", "primaryValue": 0.005}]}"#;

    enum Reply {
        Body(&'static str),
        Status(u16),
    }

    struct FakeProvider {
        reply: Reply,
        calls: Arc<AtomicUsize>,
    }

    impl FakeProvider {
        fn new(reply: Reply) -> (Self, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (
                Self {
                    reply,
                    calls: calls.clone(),
                },
                calls,
            )
        }
    }

    #[async_trait]
    impl RateProvider for FakeProvider {
        async fn fetch_overview(
            &self,
            _game: Game,
            _league: &str,
        ) -> Result<CurrencyOverview, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.reply {
                Reply::Body(body) => Ok(serde_json::from_str(body)?),
                Reply::Status(code) => Err(FetchError::Status(code)),
            }
        }
    }

    fn age_file(path: &Path, by: Duration) {
        let file = File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::now() - by).unwrap();
    }

    #[tokio::test]
    async fn test_fetch_then_serve_from_cache() {
        let dir = tempdir().unwrap();
        let (provider, calls) = FakeProvider::new(Reply::Body(VALID_BODY));
        let cache = PriceCache::new(dir.path(), provider);

        let fetched = cache.get(Game::Poe1, "Standard", false).await.unwrap();
        assert_eq!(fetched.source, SnapshotSource::Network);
        assert!(fetched.age() < Duration::from_secs(60));
        assert!(cache.snapshot_path(Game::Poe1, "Standard").exists());

        let cached = cache.get(Game::Poe1, "Standard", false).await.unwrap();
        assert_eq!(cached.source, SnapshotSource::Cache);
        assert_eq!(cached.overview, fetched.overview);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_stale_cache_refetches() {
        let dir = tempdir().unwrap();
        let (provider, calls) = FakeProvider::new(Reply::Body(VALID_BODY));
        let cache = PriceCache::new(dir.path(), provider);

        cache.get(Game::Poe2, "Standard", false).await.unwrap();
        age_file(
            &cache.snapshot_path(Game::Poe2, "Standard"),
            Duration::from_secs(2 * 60 * 60),
        );

        let snapshot = cache.get(Game::Poe2, "Standard", false).await.unwrap();
        assert_eq!(snapshot.source, SnapshotSource::Network);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_force_no_refetch_uses_stale_cache() {
        let dir = tempdir().unwrap();
        let (provider, calls) = FakeProvider::new(Reply::Body(VALID_BODY));
        let cache = PriceCache::new(dir.path(), provider);

        cache.get(Game::Poe1, "Standard", false).await.unwrap();
        let path = cache.snapshot_path(Game::Poe1, "Standard");
        age_file(&path, Duration::from_secs(5 * 60 * 60));

        let snapshot = cache.get(Game::Poe1, "Standard", true).await.unwrap();
        assert_eq!(snapshot.source, SnapshotSource::Cache);
        assert!(snapshot.age() >= Duration::from_secs(5 * 60 * 60 - 60));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_max_age_controls_freshness() {
        let dir = tempdir().unwrap();
        let (provider, calls) = FakeProvider::new(Reply::Body(VALID_BODY));
        let cache = PriceCache::new(dir.path(), provider).with_max_age(Duration::ZERO);

        cache.get(Game::Poe1, "Standard", false).await.unwrap();
        let snapshot = cache.get(Game::Poe1, "Standard", false).await.unwrap();
        assert_eq!(snapshot.source, SnapshotSource::Network);
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        // Forced reads ignore the age limit
        let snapshot = cache.get(Game::Poe1, "Standard", true).await.unwrap();
        assert_eq!(snapshot.source, SnapshotSource::Cache);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_force_no_refetch_still_fetches_without_cache() {
        let dir = tempdir().unwrap();
        let (provider, calls) = FakeProvider::new(Reply::Body(VALID_BODY));
        let cache = PriceCache::new(dir.path(), provider);

        let snapshot = cache.get(Game::Poe1, "Standard", true).await.unwrap();
        assert_eq!(snapshot.source, SnapshotSource::Network);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalid_cache_file_is_a_miss() {
        let dir = tempdir().unwrap();
        let (provider, calls) = FakeProvider::new(Reply::Body(VALID_BODY));
        let cache = PriceCache::new(dir.path(), provider);

        let path = cache.snapshot_path(Game::Poe1, "Standard");
        fs::write(&path, NO_DIVINE_BODY).unwrap();
        let snapshot = cache.get(Game::Poe1, "Standard", true).await.unwrap();
        assert_eq!(snapshot.source, SnapshotSource::Network);

        fs::write(&path, "not json at all").unwrap();
        let snapshot = cache.get(Game::Poe1, "Standard", true).await.unwrap();
        assert_eq!(snapshot.source, SnapshotSource::Network);
        assert_eq!(calls.load(Ordering::SeqCst), 2);

        // The bad file was replaced by the fetched data
        let cached = cache.get(Game::Poe1, "Standard", false).await.unwrap();
        assert_eq!(cached.source, SnapshotSource::Cache);
    }

    #[tokio::test]
    async fn test_missing_baseline_reports_league_not_found() {
        let dir = tempdir().unwrap();
        let (provider, _) = FakeProvider::new(Reply::Body(NO_DIVINE_BODY));
        let cache = PriceCache::new(dir.path(), provider);

        let err = cache.get(Game::Poe2, "Nope League", false).await.unwrap_err();
        assert!(matches!(err, FetchError::LeagueNotFound { ref league } if league == "Nope League"));
        assert!(!cache.snapshot_path(Game::Poe2, "Nope League").exists());
    }

    #[tokio::test]
    async fn test_network_error_is_returned() {
        let dir = tempdir().unwrap();
        let (provider, _) = FakeProvider::new(Reply::Status(503));
        let cache = PriceCache::new(dir.path(), provider);

        let err = cache.get(Game::Poe1, "Standard", false).await.unwrap_err();
        assert!(matches!(err, FetchError::Status(503)));
    }

    #[tokio::test]
    async fn test_unwritable_cache_still_returns_data() {
        let dir = tempdir().unwrap();
        let (provider, _) = FakeProvider::new(Reply::Body(VALID_BODY));
        let cache = PriceCache::new(dir.path().join("missing-subdir"), provider);

        let snapshot = cache.get(Game::Poe1, "Standard", false).await.unwrap();
        assert_eq!(snapshot.source, SnapshotSource::Network);
        assert!(snapshot.overview.is_valid());
    }

    #[test]
    fn test_snapshot_path_is_per_game_and_sanitised() {
        let (provider, _) = FakeProvider::new(Reply::Status(500));
        let cache = PriceCache::new("cache", provider);
        assert_eq!(
            cache.snapshot_path(Game::Poe1, "Standard"),
            PathBuf::from("cache/poe1-Standard.json")
        );
        assert_eq!(
            cache.snapshot_path(Game::Poe2, "Dawn of the Hunt"),
            PathBuf::from("cache/poe2-Dawn of the Hunt.json")
        );
        assert_eq!(
            cache.snapshot_path(Game::Poe2, "../etc"),
            PathBuf::from("cache/poe2-___etc.json")
        );
    }
}
