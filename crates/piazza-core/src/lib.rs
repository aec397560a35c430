//! # piazza-core
//!
//! The deterministic demo-data engine for Piazza - THE LOGIC.
//!
//! This crate implements the data core of a social-networking demo: the
//! canonical entity collections, the viewer's follow/connection state, the
//! derived-view queries every surface renders from, and the slot
//! persistence boundary that carries state across sessions.
//!
//! ## Architectural Constraints
//!
//! The core:
//! - Is the ONLY place where state lives; consumers hold borrowed views
//! - Is synchronous and single-threaded: no async, no locking, no timers
//! - Is deterministic: `BTreeMap` only, no floats, no randomness, no clock
//!   reads (callers pass `now` explicitly)
//! - Treats unknown ids as absence, never as failure; every derived view
//!   is a total function
//! - Fails open at the storage boundary: corrupt or missing slot data
//!   degrades to default state

// =============================================================================
// MODULES
// =============================================================================

pub mod connections;
pub mod formats;
pub mod policy;
pub mod seed;
pub mod session;
pub mod storage;
pub mod store;
pub mod types;
pub mod views;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Attachment, Comment, CommentId, Event, EventId, EventLocation, Group, GroupId, Payload,
    PiazzaError, Post, PostId, Timestamp, TrendingTopic, User, UserId,
};

// =============================================================================
// RE-EXPORTS: Stores & Session
// =============================================================================

pub use connections::ConnectionStore;
pub use seed::SeedData;
pub use session::{ChangeEvent, Session, StorageBackend, SubscriptionId};
pub use storage::{MemorySlots, RedbSlots, SlotStore};
pub use store::EntityStore;

// =============================================================================
// RE-EXPORTS: Derived Views
// =============================================================================

pub use views::{
    EventFilter, GroupCategory, event_attendees, events_view, group_members, recommended_groups,
    recommended_users, search_groups, trending_posts,
};

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{SeedMarker, SlotHeader, slot_from_bytes, slot_to_bytes};
