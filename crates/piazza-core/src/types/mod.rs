//! # Core Type Definitions
//!
//! This module contains all core types for the Piazza deterministic demo-data
//! substrate:
//! - Entity identifiers (`UserId`, `GroupId`, `EventId`, `PostId`, `CommentId`)
//! - Entity records (`User`, `Group`, `Event`, `Post`, `Comment`)
//! - Timestamps (`Timestamp`)
//! - Opaque side-collection payloads (`Payload`)
//! - Error types (`PiazzaError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point)
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`
//! - Use saturating arithmetic for counters to prevent overflow/underflow

use serde::{Deserialize, Serialize};
use thiserror::Error;

// =============================================================================
// ENTITY IDENTIFIERS
// =============================================================================

macro_rules! id_newtype {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(pub String);

        impl $name {
            /// Create a new identifier from a string.
            #[must_use]
            pub fn new(s: impl Into<String>) -> Self {
                Self(s.into())
            }

            /// Get the identifier as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(
    /// Unique identifier for a user.
    /// Stable for the process lifetime; never reused.
    UserId
);
id_newtype!(
    /// Unique identifier for a group.
    GroupId
);
id_newtype!(
    /// Unique identifier for an event.
    EventId
);
id_newtype!(
    /// Unique identifier for a post.
    PostId
);
id_newtype!(
    /// Unique identifier for a comment.
    CommentId
);

// =============================================================================
// TIMESTAMP
// =============================================================================

/// A point in time as whole seconds since the Unix epoch.
///
/// Uses i64 so the core stays float-free; callers supply the clock.
/// The core itself never reads wall-clock time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct Timestamp(pub i64);

impl Timestamp {
    /// Create a timestamp from Unix seconds.
    #[must_use]
    pub const fn new(secs: i64) -> Self {
        Self(secs)
    }

    /// Get the raw Unix-seconds value.
    #[must_use]
    pub const fn secs(self) -> i64 {
        self.0
    }

    /// Offset this timestamp by a number of seconds, saturating at the bounds.
    #[must_use]
    pub const fn offset(self, secs: i64) -> Self {
        Self(self.0.saturating_add(secs))
    }
}

// =============================================================================
// OPAQUE PAYLOAD
// =============================================================================

/// An opaque, serializable side-collection payload.
///
/// The featured-content, media-gallery, activity-log, and engagement-metrics
/// collections carry no behavior in this core; they are stored and surfaced
/// without interpretation.
pub type Payload = serde_json::Value;

// =============================================================================
// USER
// =============================================================================

/// A user profile.
///
/// Invariant: `id` is globally unique and stable for the process lifetime.
/// Counter fields use saturating arithmetic and never underflow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub avatar: String,
    pub bio: String,
    pub location: String,
    pub website: Option<String>,
    pub followers_count: u64,
    pub following_count: u64,
    pub posts_count: u64,
    pub verified: bool,
    pub joined: Timestamp,
}

// =============================================================================
// GROUP
// =============================================================================

/// A group (community) record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub description: String,
    /// Private groups require membership approval; public groups do not.
    pub private: bool,
    pub members_count: u64,
    pub posts_count: u64,
    pub tags: Vec<String>,
    pub creator: UserId,
    pub created: Timestamp,
}

// =============================================================================
// EVENT
// =============================================================================

/// Where an event takes place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventLocation {
    /// A physical venue.
    Physical { venue: String },
    /// A virtual meeting reference.
    Virtual { meeting_url: String },
}

impl EventLocation {
    /// Check whether this is a virtual location.
    #[must_use]
    pub const fn is_virtual(&self) -> bool {
        matches!(self, Self::Virtual { .. })
    }
}

/// An event record.
///
/// Invariant: `starts <= ends`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub starts: Timestamp,
    pub ends: Timestamp,
    pub location: EventLocation,
    pub organizer: UserId,
    pub group: Option<GroupId>,
    pub attendees_count: u64,
    pub capacity: Option<u64>,
    /// Whether the viewing user is attending.
    pub attending: bool,
    pub tags: Vec<String>,
}

impl Event {
    /// Check whether the event is held virtually.
    #[must_use]
    pub const fn is_virtual(&self) -> bool {
        self.location.is_virtual()
    }
}

// =============================================================================
// POST
// =============================================================================

/// A media attachment on a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub url: String,
    pub kind: String,
}

/// A post record.
///
/// The author is a denormalized `User` snapshot taken at seed time, matching
/// the shape the consumer renders directly. Engagement counters are the only
/// fields mutated after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub content: String,
    pub author: User,
    pub group: Option<GroupId>,
    pub attachments: Vec<Attachment>,
    pub likes_count: u64,
    pub comments_count: u64,
    pub shares_count: u64,
    /// Whether the viewing user has liked this post.
    pub liked: bool,
    /// Whether the viewing user has bookmarked this post.
    pub bookmarked: bool,
    pub created: Timestamp,
}

impl Post {
    /// Engagement score: likes + comments + shares, equally weighted.
    ///
    /// This is the trending-rank metric. Saturating so pathological counters
    /// cannot wrap.
    #[must_use]
    pub const fn engagement_score(&self) -> u64 {
        self.likes_count
            .saturating_add(self.comments_count)
            .saturating_add(self.shares_count)
    }
}

// =============================================================================
// COMMENT
// =============================================================================

/// A comment on a post, optionally threaded under a parent comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub post: PostId,
    pub content: String,
    pub author: User,
    pub parent: Option<CommentId>,
    pub likes_count: u64,
    /// Whether the viewing user has liked this comment.
    pub liked: bool,
    pub replies: Vec<Comment>,
    pub created: Timestamp,
}

// =============================================================================
// TRENDING TOPIC
// =============================================================================

/// A trending hashtag with its post volume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendingTopic {
    pub tag: String,
    pub posts_count: u64,
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the Piazza system.
///
/// Derived-view queries are total and never produce these; the error surface
/// is confined to the persistence boundary and input parsing. The core never
/// panics; all errors are recoverable, and the session degrades to default
/// state when storage fails.
#[derive(Debug, Error)]
pub enum PiazzaError {
    /// A serialization error occurred.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// A deserialization error occurred.
    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    /// An I/O error occurred at the storage boundary.
    #[error("I/O error: {0}")]
    IoError(String),

    /// An input string could not be interpreted.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

// =============================================================================
// TESTS
// =============================================================================
