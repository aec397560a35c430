//! # Entity Store
//!
//! The canonical in-memory collections for the Piazza core.
//!
//! The store exclusively owns all entity data. Consumers and the view
//! engine hold only borrowed read-only views; the only mutations after the
//! bulk seed are the viewer's engagement toggles, which adjust counters
//! with saturating arithmetic.
//!
//! Lookups are linear scans by id equality. Collection sizes are demo
//! scale and insertion order is the iteration contract, so no index is
//! maintained. Absence is modeled as `None`/empty, never as an error.

use crate::seed::SeedData;
use crate::types::{
    Comment, Event, EventId, Group, GroupId, Payload, Post, PostId, TrendingTopic, User, UserId,
};
use std::collections::BTreeMap;

/// The canonical entity collections.
///
/// Created empty; populated wholesale by [`EntityStore::initialize`].
/// Re-initializing replaces every collection.
#[derive(Debug, Clone, Default)]
pub struct EntityStore {
    users: Vec<User>,
    groups: Vec<Group>,
    events: Vec<Event>,
    posts: Vec<Post>,
    /// Comments keyed by owning post, in display order.
    comments: BTreeMap<PostId, Vec<Comment>>,
    trending_topics: Vec<TrendingTopic>,
    featured_content: Vec<Payload>,
    media_gallery: Vec<Payload>,
    activity_log: Vec<Payload>,
    engagement_metrics: Payload,
    initialized: bool,
}

impl EntityStore {
    /// Create a new empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Populate all collections from a seed source.
    ///
    /// Calling this on an already-populated store replaces all collections
    /// wholesale; subsequent lookups see only the new seed data.
    pub fn initialize(&mut self, seed: SeedData) {
        self.users = seed.users;
        self.groups = seed.groups;
        self.events = seed.events;
        self.posts = seed.posts;
        self.comments = seed.comments;
        self.trending_topics = seed.trending_topics;
        self.featured_content = seed.featured_content;
        self.media_gallery = seed.media_gallery;
        self.activity_log = seed.activity_log;
        self.engagement_metrics = seed.engagement_metrics;
        self.initialized = true;
    }

    /// Whether the store has been seeded.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // =========================================================================
    // LOOKUP
    // =========================================================================

    /// Look up a user by id.
    #[must_use]
    pub fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|u| &u.id == id)
    }

    /// Look up a group by id.
    #[must_use]
    pub fn group(&self, id: &GroupId) -> Option<&Group> {
        self.groups.iter().find(|g| &g.id == id)
    }

    /// Look up an event by id.
    #[must_use]
    pub fn event(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| &e.id == id)
    }

    /// Look up a post by id.
    #[must_use]
    pub fn post(&self, id: &PostId) -> Option<&Post> {
        self.posts.iter().find(|p| &p.id == id)
    }

    /// Comments for a post, in display order.
    ///
    /// Unknown posts yield an empty slice, never a missing-key failure.
    #[must_use]
    pub fn post_comments(&self, id: &PostId) -> &[Comment] {
        self.comments.get(id).map_or(&[], Vec::as_slice)
    }

    /// Posts authored by a user, in insertion order.
    #[must_use]
    pub fn user_posts(&self, id: &UserId) -> Vec<&Post> {
        self.posts.iter().filter(|p| &p.author.id == id).collect()
    }

    /// Posts associated with a group, in insertion order.
    #[must_use]
    pub fn group_posts(&self, id: &GroupId) -> Vec<&Post> {
        self.posts
            .iter()
            .filter(|p| p.group.as_ref() == Some(id))
            .collect()
    }

    // =========================================================================
    // COLLECTIONS
    // =========================================================================

    /// All users in insertion order.
    #[must_use]
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// All groups in insertion order.
    #[must_use]
    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// All events in insertion order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// All posts in insertion order.
    #[must_use]
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// Trending topics in seed order.
    #[must_use]
    pub fn trending_topics(&self) -> &[TrendingTopic] {
        &self.trending_topics
    }

    /// Featured-content payloads, uninterpreted.
    #[must_use]
    pub fn featured_content(&self) -> &[Payload] {
        &self.featured_content
    }

    /// Media-gallery payloads, uninterpreted.
    #[must_use]
    pub fn media_gallery(&self) -> &[Payload] {
        &self.media_gallery
    }

    /// Activity-log payloads, uninterpreted.
    #[must_use]
    pub fn activity_log(&self) -> &[Payload] {
        &self.activity_log
    }

    /// Engagement-metrics payload, uninterpreted.
    #[must_use]
    pub fn engagement_metrics(&self) -> &Payload {
        &self.engagement_metrics
    }

    // =========================================================================
    // ENGAGEMENT ACTIONS
    // =========================================================================

    /// Toggle the viewer's like on a post.
    ///
    /// Adjusts `likes_count` with saturating arithmetic so the counter never
    /// underflows. Returns `false` when the post is unknown.
    pub fn toggle_post_like(&mut self, id: &PostId) -> bool {
        match self.posts.iter_mut().find(|p| &p.id == id) {
            Some(post) => {
                if post.liked {
                    post.liked = false;
                    post.likes_count = post.likes_count.saturating_sub(1);
                } else {
                    post.liked = true;
                    post.likes_count = post.likes_count.saturating_add(1);
                }
                true
            }
            None => false,
        }
    }

    /// Toggle the viewer's bookmark on a post.
    ///
    /// Returns `false` when the post is unknown.
    pub fn toggle_post_bookmark(&mut self, id: &PostId) -> bool {
        match self.posts.iter_mut().find(|p| &p.id == id) {
            Some(post) => {
                post.bookmarked = !post.bookmarked;
                true
            }
            None => false,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
