use crate::state::messages::StorageEvent;
use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tourcal_api::store::TournamentStore;
use tourcal_api::{LikedSet, Tournament};

/// Read the cached tournaments and the liked set off the UI thread.
///
/// Unreadable entries are logged and reported as empty.
pub fn spawn_startup_reads(
    store: Arc<dyn TournamentStore>,
    events: mpsc::Sender<StorageEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let cache_store = store.clone();
        let tournaments = tokio::task::spawn_blocking(move || cache_store.load_cached_tournaments())
            .await
            .map_err(|e| e.to_string())
            .and_then(|r| r.map_err(|e| e.to_string()))
            .unwrap_or_else(|e| {
                warn!("tournament cache unreadable: {e}");
                None
            });
        debug!("cache read done ({} tournaments)", tournaments.as_ref().map_or(0, Vec::len));
        if events.send(StorageEvent::CacheLoaded { tournaments }).await.is_err() {
            return;
        }

        let liked = tokio::task::spawn_blocking(move || store.load_liked_ids())
            .await
            .map_err(|e| e.to_string())
            .and_then(|r| r.map_err(|e| e.to_string()))
            .unwrap_or_else(|e| {
                warn!("liked tournaments unreadable: {e}");
                LikedSet::default()
            });
        let _ = events.send(StorageEvent::LikedLoaded { liked }).await;
    })
}

/// Persist the liked set in the background. Failures are only logged.
pub fn save_liked(store: Arc<dyn TournamentStore>, liked: LikedSet) {
    tokio::task::spawn_blocking(move || {
        if let Err(e) = store.save_liked_ids(&liked) {
            warn!("could not save liked tournaments: {e}");
        }
    });
}

/// Refresh the tournament cache in the background. Failures are only logged.
pub fn save_tournaments(store: Arc<dyn TournamentStore>, tournaments: Vec<Tournament>) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        if let Err(e) = store.save_tournaments(&tournaments) {
            warn!("could not refresh the tournament cache: {e}");
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tourcal_api::store::{LIKED_KEY, MemoryStore, TOURNAMENTS_KEY};

    #[tokio::test]
    async fn startup_reads_report_cache_then_liked() {
        let store = Arc::new(MemoryStore::new());
        store.insert_raw(TOURNAMENTS_KEY, "[]");
        store.insert_raw(LIKED_KEY, "[7]");
        let (tx, mut rx) = mpsc::channel(4);

        spawn_startup_reads(store, tx).await.unwrap();

        match rx.recv().await.unwrap() {
            StorageEvent::CacheLoaded { tournaments } => assert_eq!(tournaments, Some(vec![])),
            other => panic!("unexpected {other:?}"),
        }
        match rx.recv().await.unwrap() {
            StorageEvent::LikedLoaded { liked } => assert!(liked.contains(7)),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn corrupt_entries_read_as_empty() {
        let store = Arc::new(MemoryStore::new());
        store.insert_raw(TOURNAMENTS_KEY, "{oops");
        store.insert_raw(LIKED_KEY, "\"nope\"");
        let (tx, mut rx) = mpsc::channel(4);

        spawn_startup_reads(store, tx).await.unwrap();

        assert!(matches!(
            rx.recv().await.unwrap(),
            StorageEvent::CacheLoaded { tournaments: None }
        ));
        match rx.recv().await.unwrap() {
            StorageEvent::LikedLoaded { liked } => assert!(liked.is_empty()),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn live_data_is_written_to_the_cache() {
        let store = Arc::new(MemoryStore::new());
        save_tournaments(store.clone(), Vec::new()).await.unwrap();
        assert_eq!(store.load_cached_tournaments().unwrap(), Some(vec![]));
    }
}
