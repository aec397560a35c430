//! # Selection Policy
//!
//! Hardcoded runtime constants for the Piazza core.
//!
//! The demo starts with fixed logic and a fixed dataset. These constants are
//! compiled into the binary and immutable at runtime: sampling strides,
//! result caps, storage slot keys, and the slot wire-format header.
//!
//! The stride/cap pairs parameterize the deterministic sampling used for
//! group members, event attendees, and recommendations. Same id always
//! yields the same subset; that determinism is the observable contract.

/// Storage slot key for the viewer's full connection state.
///
/// Part of the observable contract: renaming breaks cross-session
/// continuity for existing databases.
pub const CONNECTIONS_SLOT: &str = "connections-storage";

/// Storage slot key for the seed marker.
///
/// Only the initialized flag is persisted; the bulk seed data is rebuilt
/// from the static source on startup.
pub const DEMO_DATA_SLOT: &str = "demo-data-storage";

/// Magic bytes for the Piazza slot wire format.
pub const MAGIC_BYTES: &[u8; 4] = b"PIAZ";

/// Current slot wire-format version.
///
/// Increment this when making breaking changes to the slot payload shape.
pub const FORMAT_VERSION: u8 = 1;

/// Maximum allowed slot payload size.
///
/// Validated BEFORE deserialization so corrupted length-prefixed data cannot
/// trigger large allocations. Connection state for a single viewer is tiny;
/// 4 MB is generous.
pub const MAX_SLOT_PAYLOAD_SIZE: usize = 4 * 1024 * 1024;

// =============================================================================
// DERIVED-VIEW LIMITS
// =============================================================================

/// Number of posts on the trending view.
pub const TRENDING_POST_LIMIT: usize = 5;

/// Sampling stride for group member selection.
pub const GROUP_MEMBER_STRIDE: u64 = 3;

/// Result cap for group member selection.
pub const GROUP_MEMBER_LIMIT: usize = 10;

/// Sampling stride for event attendee selection.
pub const EVENT_ATTENDEE_STRIDE: u64 = 4;

/// Result cap for event attendee selection.
pub const EVENT_ATTENDEE_LIMIT: usize = 8;

/// Sampling stride for group recommendations.
pub const RECOMMENDED_GROUP_STRIDE: u64 = 2;

/// Result cap for group recommendations.
pub const RECOMMENDED_GROUP_LIMIT: usize = 3;

/// Sampling stride for user recommendations.
pub const RECOMMENDED_USER_STRIDE: u64 = 3;

/// Result cap for user recommendations.
pub const RECOMMENDED_USER_LIMIT: usize = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_keys_are_stable() {
        // Observable contract; see module docs.
        assert_eq!(CONNECTIONS_SLOT, "connections-storage");
        assert_eq!(DEMO_DATA_SLOT, "demo-data-storage");
    }

    #[test]
    fn magic_bytes_correct() {
        assert_eq!(MAGIC_BYTES, b"PIAZ");
    }

    #[test]
    fn strides_are_nonzero() {
        for stride in [
            GROUP_MEMBER_STRIDE,
            EVENT_ATTENDEE_STRIDE,
            RECOMMENDED_GROUP_STRIDE,
            RECOMMENDED_USER_STRIDE,
        ] {
            assert!(stride > 0);
        }
    }
}
