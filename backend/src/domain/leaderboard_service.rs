//! Leaderboard refresh orchestration.
//!
//! Refreshes fetch the full registration collection, aggregate it, and
//! publish the standings on a watch channel. Each refresh takes a
//! monotonically increasing request id; a refresh that finishes after a
//! newer one started discards its result instead of publishing stale data.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tracing::{debug, warn};

use super::error::DomainError;
use super::leaderboard::{aggregate, LeaderboardEntry};
use super::ports::{RealtimeFeed, RegistrationRepository};

/// Collection holding registration rows.
pub const REGISTRATIONS_COLLECTION: &str = "registrations";

/// Keeps published standings current with the registration collection.
pub struct LeaderboardService {
    registrations: Arc<dyn RegistrationRepository>,
    latest_request: AtomicU64,
    standings: watch::Sender<Vec<LeaderboardEntry>>,
    publish: Mutex<()>,
}

impl LeaderboardService {
    pub fn new(registrations: Arc<dyn RegistrationRepository>) -> Self {
        let (standings, _) = watch::channel(Vec::new());
        Self {
            registrations,
            latest_request: AtomicU64::new(0),
            standings,
            publish: Mutex::new(()),
        }
    }

    /// Fetch, aggregate, and publish fresh standings.
    ///
    /// Returns `Ok(None)` when a newer refresh started while this one was in
    /// flight; nothing is published in that case.
    ///
    /// # Errors
    /// Repository failures map to an internal error.
    pub async fn refresh(&self) -> Result<Option<Vec<LeaderboardEntry>>, DomainError> {
        let request = self.latest_request.fetch_add(1, Ordering::SeqCst) + 1;
        let rows = self
            .registrations
            .list_all()
            .await
            .map_err(|error| DomainError::internal(error.to_string()))?;
        let entries = aggregate(&rows);
        // The staleness check and the publish must be one atomic step, or a
        // superseded refresh could still overwrite newer standings between
        // its check and its send.
        let _guard = self.publish.lock().unwrap_or_else(PoisonError::into_inner);
        if self.latest_request.load(Ordering::SeqCst) != request {
            debug!(request, "discarding stale leaderboard refresh");
            return Ok(None);
        }
        self.standings.send_replace(entries.clone());
        Ok(Some(entries))
    }

    /// Last published standings.
    pub fn current(&self) -> Vec<LeaderboardEntry> {
        self.standings.borrow().clone()
    }

    /// Watch published standings for changes.
    pub fn subscribe(&self) -> watch::Receiver<Vec<LeaderboardEntry>> {
        self.standings.subscribe()
    }

    /// Refresh once, then keep refreshing whenever the change feed reports
    /// activity on the registration collection. Returns when the feed ends.
    pub async fn run(self: Arc<Self>, realtime: Arc<dyn RealtimeFeed>) {
        if let Err(error) = self.refresh().await {
            warn!(%error, "initial leaderboard refresh failed");
        }
        let mut stream = match realtime.subscribe(REGISTRATIONS_COLLECTION).await {
            Ok(stream) => stream,
            Err(error) => {
                warn!(%error, "realtime subscription failed; standings will not auto-refresh");
                return;
            }
        };
        while let Some(change) = stream.next().await {
            debug!(collection = %change.collection, kind = ?change.kind, "change notification");
            if let Err(error) = self.refresh().await {
                warn!(%error, "leaderboard refresh failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        ChangeEvent, ChangeKind, FixtureRealtimeFeed, FixtureRegistrationRepository,
        MockRegistrationRepository, RegistrationStoreError,
    };
    use crate::domain::registration::RegistrationRow;
    use std::time::Duration;

    fn rows() -> Vec<RegistrationRow> {
        vec![
            RegistrationRow {
                id: 1,
                email: Some("ann@x".into()),
                full_name: Some("Ann".into()),
                ..RegistrationRow::default()
            },
            RegistrationRow {
                id: 2,
                email: Some("ann@x".into()),
                ..RegistrationRow::default()
            },
        ]
    }

    #[tokio::test]
    async fn refresh_publishes_aggregated_standings() {
        let repo = Arc::new(FixtureRegistrationRepository::new().seed(rows()));
        let service = LeaderboardService::new(repo);
        let entries = service
            .refresh()
            .await
            .expect("refresh succeeds")
            .expect("refresh is current");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].points, 20);
        assert_eq!(service.current(), entries);
    }

    /// Repository whose first fetch stalls until the test releases it and
    /// returns an older snapshot than every later fetch.
    struct GatedRepository {
        first_started: Arc<tokio::sync::Notify>,
        first_release: Arc<tokio::sync::Notify>,
        calls: AtomicU64,
    }

    #[async_trait::async_trait]
    impl RegistrationRepository for GatedRepository {
        async fn list_all(&self) -> Result<Vec<RegistrationRow>, RegistrationStoreError> {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                self.first_started.notify_one();
                self.first_release.notified().await;
                // Older snapshot: a single row.
                return Ok(rows()[..1].to_vec());
            }
            Ok(rows())
        }

        async fn list_by_email(
            &self,
            _email: &str,
        ) -> Result<Vec<RegistrationRow>, RegistrationStoreError> {
            unreachable!("not exercised")
        }

        async fn insert(
            &self,
            _registration: crate::domain::registration::NewRegistration,
        ) -> Result<(), RegistrationStoreError> {
            unreachable!("not exercised")
        }
    }

    #[tokio::test]
    async fn superseded_refresh_publishes_nothing() {
        let first_started = Arc::new(tokio::sync::Notify::new());
        let first_release = Arc::new(tokio::sync::Notify::new());
        let service = Arc::new(LeaderboardService::new(Arc::new(GatedRepository {
            first_started: Arc::clone(&first_started),
            first_release: Arc::clone(&first_release),
            calls: AtomicU64::new(0),
        })));

        let slow = tokio::spawn({
            let service = Arc::clone(&service);
            async move { service.refresh().await }
        });
        first_started.notified().await;

        // A second refresh starts and finishes while the first is stalled.
        let fresh = service.refresh().await.expect("refresh succeeds");
        assert!(fresh.is_some());

        first_release.notify_one();
        let stale = slow
            .await
            .expect("task completes")
            .expect("refresh succeeds");
        assert!(stale.is_none(), "superseded refresh must not publish");
        // The stalled refresh saw the one-row snapshot; the published
        // standings must still reflect the newer two-row fetch.
        let current = service.current();
        assert_eq!(current.len(), 1, "fresh standings survive");
        assert_eq!(current[0].registrations, 2);
        assert_eq!(current[0].points, 20);
    }

    #[tokio::test]
    async fn refresh_surfaces_repository_failures() {
        let mut repo = MockRegistrationRepository::new();
        repo.expect_list_all()
            .returning(|| Err(RegistrationStoreError::unreachable("down")));
        let service = LeaderboardService::new(Arc::new(repo));
        let err = service.refresh().await.expect_err("repository failed");
        assert_eq!(err.code(), crate::domain::ErrorCode::InternalError);
    }

    #[tokio::test]
    async fn change_notifications_trigger_refreshes() {
        let repo = Arc::new(FixtureRegistrationRepository::new());
        let service = Arc::new(LeaderboardService::new(
            Arc::clone(&repo) as Arc<dyn RegistrationRepository>
        ));
        let feed = Arc::new(FixtureRealtimeFeed::new());
        let mut standings = service.subscribe();

        let runner = tokio::spawn(Arc::clone(&service).run(Arc::clone(&feed) as Arc<dyn RealtimeFeed>));
        standings.changed().await.expect("initial refresh publishes");

        repo.insert(crate::domain::registration::NewRegistration {
            full_name: "Ann".into(),
            email: "ann@x".into(),
            phone: None,
            department: None,
            year: None,
            message: None,
            event_name: "TechFest 2025".into(),
        })
        .await
        .expect("insert succeeds");
        feed.notify(ChangeEvent {
            collection: REGISTRATIONS_COLLECTION.into(),
            kind: ChangeKind::Insert,
        });

        tokio::time::timeout(Duration::from_secs(1), standings.changed())
            .await
            .expect("refresh happens in time")
            .expect("sender alive");
        assert_eq!(standings.borrow_and_update().len(), 1);
        runner.abort();
    }
}
