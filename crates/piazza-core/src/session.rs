//! # Session Module
//!
//! The explicitly-constructed root handle combining the entity store, the
//! viewer's connection state, and a storage backend.
//!
//! There is no process-wide singleton: consumers construct a `Session`,
//! hold it for the process lifetime, and read through its accessors. Every
//! mutation is applied synchronously, persisted to the affected slot, and
//! then announced to subscribers, so a change is visible to all readers
//! before the next event is processed.
//!
//! ## Storage Backends
//!
//! - `Memory`: volatile slots (tests, throwaway sessions)
//! - `Persistent`: disk-backed slots via redb
//!
//! ## Fail-open Rehydration
//!
//! Absent or corrupt slot data degrades to default state with a structured
//! stderr warning. Storage trouble is never fatal to the session.

use crate::connections::ConnectionStore;
use crate::formats::{SeedMarker, slot_from_bytes, slot_to_bytes};
use crate::policy::{CONNECTIONS_SLOT, DEMO_DATA_SLOT};
use crate::seed::SeedData;
use crate::storage::{MemorySlots, RedbSlots, SlotStore};
use crate::store::EntityStore;
use crate::types::{PiazzaError, PostId, UserId};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::path::Path;

// =============================================================================
// ERROR LOGGING HELPERS
// =============================================================================

/// Log a storage error and fall back to the default value.
///
/// The core avoids a logging dependency to stay minimal; the app layer
/// redirects stderr into its tracing pipeline if needed.
#[inline]
fn warn_and_default<T: Default>(result: Result<T, PiazzaError>, context: &str) -> T {
    match result {
        Ok(v) => v,
        Err(e) => {
            eprintln!(
                "{{\"level\":\"warn\",\"target\":\"piazza_core::session\",\"message\":\"slot error in {}: {}\"}}",
                context, e
            );
            T::default()
        }
    }
}

/// Load and decode a slot, falling back to `T::default()` on any failure.
fn rehydrate_slot<T, S>(backend: &S, key: &str) -> T
where
    T: Default + DeserializeOwned,
    S: SlotStore,
{
    let decoded = backend.load_slot(key).and_then(|maybe| match maybe {
        Some(bytes) => slot_from_bytes(&bytes),
        None => Ok(T::default()),
    });
    warn_and_default(decoded, key)
}

// =============================================================================
// STORAGE BACKEND
// =============================================================================

/// Storage backend for a Session.
#[derive(Debug)]
pub enum StorageBackend {
    /// In-memory slots (fast, volatile).
    Memory(MemorySlots),
    /// Disk-backed slots using redb.
    Persistent(RedbSlots),
}

impl Default for StorageBackend {
    fn default() -> Self {
        Self::Memory(MemorySlots::new())
    }
}

impl SlotStore for StorageBackend {
    fn load_slot(&self, key: &str) -> Result<Option<Vec<u8>>, PiazzaError> {
        match self {
            Self::Memory(slots) => slots.load_slot(key),
            Self::Persistent(slots) => slots.load_slot(key),
        }
    }

    fn save_slot(&mut self, key: &str, bytes: &[u8]) -> Result<(), PiazzaError> {
        match self {
            Self::Memory(slots) => slots.save_slot(key, bytes),
            Self::Persistent(slots) => slots.save_slot(key, bytes),
        }
    }
}

// =============================================================================
// CHANGE NOTIFICATION
// =============================================================================

/// What changed in the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// The entity store was (re)seeded.
    Seeded,
    /// The viewer's connection state changed.
    ConnectionsChanged,
    /// A post's engagement state changed.
    PostEngagement(PostId),
}

/// Handle identifying a registered subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

type SubscriberFn = Box<dyn Fn(&ChangeEvent)>;

// =============================================================================
// SESSION
// =============================================================================

/// A Session combines the entity store, the connection store, a storage
/// backend, and the subscriber registry.
#[derive(Default)]
pub struct Session {
    store: EntityStore,
    connections: ConnectionStore,
    backend: StorageBackend,
    /// BTreeMap so notification order is deterministic.
    subscribers: BTreeMap<u64, SubscriberFn>,
    next_subscription_id: u64,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("seeded", &self.store.is_initialized())
            .field("following", &self.connections.following().len())
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Create a session with volatile in-memory storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session over an existing backend, rehydrating both slots.
    ///
    /// Connection state is restored in full. The seed marker restores only
    /// the initialized flag; when set, the entity store is re-seeded from
    /// the static source so lookups work without an explicit `seed` call.
    #[must_use]
    pub fn with_backend(backend: StorageBackend) -> Self {
        let connections: ConnectionStore = rehydrate_slot(&backend, CONNECTIONS_SLOT);
        let marker: SeedMarker = rehydrate_slot(&backend, DEMO_DATA_SLOT);

        let mut store = EntityStore::new();
        if marker.initialized {
            store.initialize(SeedData::demo());
        }

        Self {
            store,
            connections,
            backend,
            subscribers: BTreeMap::new(),
            next_subscription_id: 0,
        }
    }

    /// Open a session with persistent redb storage at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PiazzaError> {
        let slots = RedbSlots::open(path)?;
        Ok(Self::with_backend(StorageBackend::Persistent(slots)))
    }

    /// Check if using persistent storage.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        matches!(self.backend, StorageBackend::Persistent(_))
    }

    // =========================================================================
    // SEEDING
    // =========================================================================

    /// Populate the entity store from the static demo source and persist
    /// the seed marker.
    ///
    /// Re-seeding replaces the entity collections wholesale. Pending demo
    /// follow requests are queued on top of whatever connection state was
    /// rehydrated; existing followers are never re-queued.
    pub fn seed(&mut self) {
        let seed = SeedData::demo();
        let pending = seed.pending_requests.clone();

        self.store.initialize(seed);
        self.persist_slot(DEMO_DATA_SLOT, &SeedMarker { initialized: true });

        let mut queued = false;
        for id in pending {
            queued |= self.connections.queue_request(id);
        }
        if queued {
            self.persist_connections();
        }

        self.notify(&ChangeEvent::Seeded);
    }

    /// Whether the entity store has been seeded.
    #[must_use]
    pub fn is_seeded(&self) -> bool {
        self.store.is_initialized()
    }

    // =========================================================================
    // READ SURFACE
    // =========================================================================

    /// The canonical entity collections.
    #[must_use]
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// The viewer's connection state.
    #[must_use]
    pub fn connections(&self) -> &ConnectionStore {
        &self.connections
    }

    // =========================================================================
    // CONNECTION MUTATIONS
    // =========================================================================

    /// Follow a user. Persists and notifies when the state changed.
    pub fn follow(&mut self, id: UserId) -> bool {
        let changed = self.connections.follow(id);
        if changed {
            self.persist_connections();
            self.notify(&ChangeEvent::ConnectionsChanged);
        }
        changed
    }

    /// Unfollow a user. Persists and notifies when the state changed.
    pub fn unfollow(&mut self, id: &UserId) -> bool {
        let changed = self.connections.unfollow(id);
        if changed {
            self.persist_connections();
            self.notify(&ChangeEvent::ConnectionsChanged);
        }
        changed
    }

    /// Accept a pending follow request.
    pub fn accept_request(&mut self, id: &UserId) -> bool {
        let changed = self.connections.accept_request(id);
        if changed {
            self.persist_connections();
            self.notify(&ChangeEvent::ConnectionsChanged);
        }
        changed
    }

    /// Reject a pending follow request.
    pub fn reject_request(&mut self, id: &UserId) -> bool {
        let changed = self.connections.reject_request(id);
        if changed {
            self.persist_connections();
            self.notify(&ChangeEvent::ConnectionsChanged);
        }
        changed
    }

    // =========================================================================
    // ENGAGEMENT MUTATIONS
    // =========================================================================

    /// Toggle the viewer's like on a post. Notifies when the post exists.
    ///
    /// Entity state is rebuilt from the seed source each session, so
    /// engagement changes mutate in memory only; nothing is persisted.
    pub fn toggle_post_like(&mut self, id: &PostId) -> bool {
        let changed = self.store.toggle_post_like(id);
        if changed {
            self.notify(&ChangeEvent::PostEngagement(id.clone()));
        }
        changed
    }

    /// Toggle the viewer's bookmark on a post. Notifies when the post exists.
    pub fn toggle_post_bookmark(&mut self, id: &PostId) -> bool {
        let changed = self.store.toggle_post_bookmark(id);
        if changed {
            self.notify(&ChangeEvent::PostEngagement(id.clone()));
        }
        changed
    }

    // =========================================================================
    // SUBSCRIPTIONS
    // =========================================================================

    /// Register a subscriber. Returns a handle for `unsubscribe`.
    ///
    /// Subscribers run synchronously, in registration order, after the
    /// mutation has been applied and persisted.
    pub fn subscribe(&mut self, callback: impl Fn(&ChangeEvent) + 'static) -> SubscriptionId {
        let id = self.next_subscription_id;
        self.next_subscription_id = self.next_subscription_id.saturating_add(1);
        self.subscribers.insert(id, Box::new(callback));
        SubscriptionId(id)
    }

    /// Remove a subscriber. Unknown handles are ignored.
    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.subscribers.remove(&id.0);
    }

    /// Number of active subscribers.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.subscribers.len()
    }

    fn notify(&self, event: &ChangeEvent) {
        for callback in self.subscribers.values() {
            callback(event);
        }
    }

    // =========================================================================
    // PERSISTENCE
    // =========================================================================

    fn persist_connections(&mut self) {
        let snapshot = self.connections.clone();
        self.persist_slot(CONNECTIONS_SLOT, &snapshot);
    }

    fn persist_slot<T: Serialize>(&mut self, key: &str, value: &T) {
        let result = slot_to_bytes(value).and_then(|bytes| self.backend.save_slot(key, &bytes));
        warn_and_default(result, key);
    }
}

// =============================================================================
// TESTS
// =============================================================================
