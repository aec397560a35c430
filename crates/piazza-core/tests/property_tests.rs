//! # Property-Based Tests
//!
//! Determinism and relationship-invariant checks for the Piazza core.

use piazza_core::seed::SEED_EPOCH;
use piazza_core::types::{Post, PostId, Timestamp, User, UserId};
use piazza_core::views::{self, EventFilter};
use piazza_core::{ConnectionStore, EntityStore, GroupId, SeedData};
use proptest::collection::vec;
use proptest::prelude::*;

fn user_id() -> impl Strategy<Value = UserId> {
    "[a-z][a-z0-9-]{0,11}".prop_map(UserId::new)
}

fn bare_user(id: &str) -> User {
    User {
        id: UserId::new(id),
        username: id.to_string(),
        email: format!("{id}@example.com"),
        display_name: id.to_string(),
        avatar: String::new(),
        bio: String::new(),
        location: String::new(),
        website: None,
        followers_count: 0,
        following_count: 0,
        posts_count: 0,
        verified: false,
        joined: Timestamp::new(0),
    }
}

fn bare_post(index: usize, likes: u64, comments: u64, shares: u64) -> Post {
    Post {
        id: PostId::new(format!("post-{index}")),
        content: String::new(),
        author: bare_user("author"),
        group: None,
        attachments: Vec::new(),
        likes_count: likes,
        comments_count: comments,
        shares_count: shares,
        liked: false,
        bookmarked: false,
        created: Timestamp::new(0),
    }
}

fn seeded() -> EntityStore {
    let mut store = EntityStore::new();
    store.initialize(SeedData::demo());
    store
}

// =============================================================================
// PROPERTY TESTS
// =============================================================================

proptest! {
    /// follow then is_following holds; unfollow then is_following does not,
    /// regardless of prior state.
    #[test]
    fn follow_unfollow_membership(ids in vec(user_id(), 0..20), probe in user_id()) {
        let mut store = ConnectionStore::new();
        for id in ids {
            store.follow(id);
        }

        store.follow(probe.clone());
        prop_assert!(store.is_following(&probe));

        store.unfollow(&probe);
        prop_assert!(!store.is_following(&probe));
    }

    /// Repeated follows never produce duplicate entries.
    #[test]
    fn following_is_duplicate_free(ids in vec(user_id(), 0..30)) {
        let mut store = ConnectionStore::new();
        for id in &ids {
            store.follow(id.clone());
            store.follow(id.clone());
        }

        let mut seen = std::collections::BTreeSet::new();
        for id in store.following() {
            prop_assert!(seen.insert(id.clone()), "duplicate entry: {id}");
        }
    }

    /// Accept moves the id from requests to followers; reject only removes.
    /// Either way the pending and follower lists stay disjoint.
    #[test]
    fn request_resolution(ids in vec(user_id(), 1..15), accept_mask in vec(any::<bool>(), 1..15)) {
        let mut store = ConnectionStore::new();
        for id in &ids {
            store.queue_request(id.clone());
        }

        for (id, accept) in ids.iter().zip(accept_mask.iter()) {
            let was_pending = store.has_request(id);
            if *accept {
                prop_assert_eq!(store.accept_request(id), was_pending);
                if was_pending {
                    prop_assert!(store.is_follower(id));
                }
            } else {
                prop_assert_eq!(store.reject_request(id), was_pending);
            }
            prop_assert!(!store.has_request(id));
        }

        for id in store.requests() {
            prop_assert!(!store.is_follower(id));
        }
    }

    /// Serde round-trip preserves connection state exactly.
    #[test]
    fn connection_snapshot_roundtrip(
        following in vec(user_id(), 0..10),
        requests in vec(user_id(), 0..10),
    ) {
        let mut store = ConnectionStore::new();
        for id in following {
            store.follow(id);
        }
        for id in requests {
            store.queue_request(id);
        }

        let bytes = piazza_core::slot_to_bytes(&store).expect("encode");
        let restored: ConnectionStore = piazza_core::slot_from_bytes(&bytes).expect("decode");
        prop_assert_eq!(store, restored);
    }

    /// Sampling is a pure function of (id, collection): repeated calls with
    /// unchanged store state yield identical ordered results.
    #[test]
    fn sampling_deterministic(raw_id in "[a-z-]{1,24}") {
        let store = seeded();
        let group = GroupId::new(raw_id);

        let first: Vec<String> = views::group_members(&store, &group)
            .iter()
            .map(|u| u.id.to_string())
            .collect();
        let second: Vec<String> = views::group_members(&store, &group)
            .iter()
            .map(|u| u.id.to_string())
            .collect();

        prop_assert_eq!(first, second);
    }

    /// Trending ranking is monotonically non-increasing in score and stable
    /// among ties (original insertion order preserved).
    #[test]
    fn ranking_monotonic_and_stable(counters in vec((0u64..50, 0u64..50, 0u64..50), 0..12)) {
        let posts: Vec<Post> = counters
            .iter()
            .enumerate()
            .map(|(i, (l, c, s))| bare_post(i, *l, *c, *s))
            .collect();
        let mut store = EntityStore::new();
        store.initialize(SeedData { posts, ..SeedData::default() });

        let ranked = views::trending_posts(&store);

        for pair in ranked.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!(a.engagement_score() >= b.engagement_score());
            if a.engagement_score() == b.engagement_score() {
                // Ids encode insertion order.
                let ia: usize = a.id.as_str().trim_start_matches("post-").parse().expect("index");
                let ib: usize = b.id.as_str().trim_start_matches("post-").parse().expect("index");
                prop_assert!(ia < ib);
            }
        }
    }

    /// The past/upcoming partition is exact at any evaluation instant.
    #[test]
    fn event_partition_exact(offset_days in -200i64..600) {
        let store = seeded();
        let now = SEED_EPOCH.offset(offset_days * 86_400);

        let upcoming = views::events_view(&store, EventFilter::Upcoming, now);
        let past = views::events_view(&store, EventFilter::Past, now);

        for event in store.events() {
            let in_upcoming = upcoming.iter().any(|e| e.id == event.id);
            let in_past = past.iter().any(|e| e.id == event.id);
            prop_assert_eq!(in_upcoming, event.starts > now);
            prop_assert_eq!(in_past, event.starts < now);
        }
    }
}
