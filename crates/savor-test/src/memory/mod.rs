//! Process-local storage backend.

mod accounts;
mod comments;
mod reviews;
mod saved_restaurants;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use savor_core::store::StoreHealth;
use savor_core::{Account, Comment, Error, Result, Review, SavedRestaurant, Storage};
use tokio::sync::RwLock;

use crate::TRACING_TARGET_MEMORY;

/// Counters describing how a [`MemoryStore`] has been used.
#[derive(Debug, Default)]
pub struct StoreMetrics {
    round_trips: AtomicUsize,
    writes: AtomicUsize,
}

impl StoreMetrics {
    /// Total number of storage calls, reads and writes alike.
    pub fn round_trips(&self) -> usize {
        self.round_trips.load(Ordering::SeqCst)
    }

    /// Number of storage calls that modified state.
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Default)]
pub(crate) struct Tables {
    /// Kept in insertion order.
    pub comments: Vec<Comment>,
    pub reviews: Vec<Review>,
    pub accounts: Vec<Account>,
    pub saved_restaurants: Vec<SavedRestaurant>,
}

#[derive(Debug, Default)]
struct Inner {
    tables: RwLock<Tables>,
    metrics: StoreMetrics,
    unavailable: AtomicBool,
}

/// In-memory implementation of every storage trait.
///
/// Cloning is cheap and clones share state. Every trait call counts as one
/// round trip; each call holds the lock for its whole duration, so writes to
/// the same record are serialized the way a database serializes them.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Arc<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps a clone of this store in a [`Storage`] container.
    pub fn storage(&self) -> Storage {
        Storage::new(self.clone())
    }

    /// Returns the usage counters.
    pub fn metrics(&self) -> &StoreMetrics {
        &self.inner.metrics
    }

    /// Makes every subsequent call fail with a storage error, or restores service.
    pub fn set_available(&self, available: bool) {
        self.inner.unavailable.store(!available, Ordering::SeqCst);
        tracing::debug!(
            target: TRACING_TARGET_MEMORY,
            available,
            "Memory store availability changed"
        );
    }

    /// Runs `f` against a shared view of the tables as one read round trip.
    pub(crate) async fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> Result<T> {
        self.begin()?;
        let tables = self.inner.tables.read().await;
        Ok(f(&tables))
    }

    /// Runs `f` against the tables under the write lock as one round trip.
    ///
    /// The write counter only advances when `f` reports that it changed state.
    pub(crate) async fn write<T>(&self, f: impl FnOnce(&mut Tables) -> (T, bool)) -> Result<T> {
        self.begin()?;
        let mut tables = self.inner.tables.write().await;
        let (value, changed) = f(&mut tables);
        if changed {
            self.inner.metrics.writes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(value)
    }

    fn begin(&self) -> Result<()> {
        self.inner.metrics.round_trips.fetch_add(1, Ordering::SeqCst);
        if self.inner.unavailable.load(Ordering::SeqCst) {
            return Err(Error::storage("memory store is unavailable"));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl StoreHealth for MemoryStore {
    async fn ping(&self) -> Result<()> {
        self.read(|_| ()).await
    }
}
