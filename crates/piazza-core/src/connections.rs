//! # Connection Store
//!
//! Directed follow/follower/follow-request state for the single local
//! viewer.
//!
//! This is a pure state machine: no I/O, no clock, no side effects. The
//! session persists a snapshot of this store after every mutation.
//!
//! ## Invariants
//!
//! - `following` and `followers` are ordered, de-duplicated lists; repeated
//!   `follow` calls are no-ops rather than duplicate entries.
//! - A user id never appears in both `follow_requests` and `followers`:
//!   accept and reject always remove the id from the pending list, and
//!   accept inserts into `followers` only if absent.

use crate::types::UserId;
use serde::{Deserialize, Serialize};

/// The viewer's relationship edges.
///
/// Serializes directly as the `connections-storage` slot payload, so field
/// names and order are part of the persisted contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStore {
    following: Vec<UserId>,
    followers: Vec<UserId>,
    follow_requests: Vec<UserId>,
}

impl ConnectionStore {
    /// Create an empty connection store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // MUTATION
    // =========================================================================

    /// Follow a user. Returns `true` if the state changed.
    ///
    /// Already-followed ids are left untouched; `following` never holds
    /// duplicates.
    pub fn follow(&mut self, id: UserId) -> bool {
        if self.following.contains(&id) {
            return false;
        }
        self.following.push(id);
        true
    }

    /// Unfollow a user. Returns `true` if the state changed.
    ///
    /// Removes all occurrences, so state written by older builds that
    /// allowed duplicates is cleaned up on the way out.
    pub fn unfollow(&mut self, id: &UserId) -> bool {
        let before = self.following.len();
        self.following.retain(|u| u != id);
        self.following.len() != before
    }

    /// Record an inbound follow request toward the viewer.
    ///
    /// Ignored when the requester is already a follower or already pending.
    /// Returns `true` if the state changed.
    pub fn queue_request(&mut self, id: UserId) -> bool {
        if self.followers.contains(&id) || self.follow_requests.contains(&id) {
            return false;
        }
        self.follow_requests.push(id);
        true
    }

    /// Accept a pending follow request: the id moves out of the pending
    /// list and into `followers`. Returns `true` if a request was pending.
    pub fn accept_request(&mut self, id: &UserId) -> bool {
        let before = self.follow_requests.len();
        self.follow_requests.retain(|u| u != id);
        if self.follow_requests.len() == before {
            return false;
        }
        if !self.followers.contains(id) {
            self.followers.push(id.clone());
        }
        true
    }

    /// Reject a pending follow request: the id is removed from the pending
    /// list and nothing else changes. Returns `true` if a request was
    /// pending.
    pub fn reject_request(&mut self, id: &UserId) -> bool {
        let before = self.follow_requests.len();
        self.follow_requests.retain(|u| u != id);
        self.follow_requests.len() != before
    }

    // =========================================================================
    // MEMBERSHIP
    // =========================================================================

    /// Whether the viewer follows `id`.
    #[must_use]
    pub fn is_following(&self, id: &UserId) -> bool {
        self.following.contains(id)
    }

    /// Whether `id` follows the viewer.
    #[must_use]
    pub fn is_follower(&self, id: &UserId) -> bool {
        self.followers.contains(id)
    }

    /// Whether `id` has a pending follow request toward the viewer.
    #[must_use]
    pub fn has_request(&self, id: &UserId) -> bool {
        self.follow_requests.contains(id)
    }

    // =========================================================================
    // VIEWS
    // =========================================================================

    /// Users the viewer follows, in follow order.
    #[must_use]
    pub fn following(&self) -> &[UserId] {
        &self.following
    }

    /// Users following the viewer, in acceptance order.
    #[must_use]
    pub fn followers(&self) -> &[UserId] {
        &self.followers
    }

    /// Pending inbound requests, in arrival order.
    #[must_use]
    pub fn requests(&self) -> &[UserId] {
        &self.follow_requests
    }
}

// =============================================================================
// TESTS
// =============================================================================
