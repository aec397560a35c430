//! # Derived Views
//!
//! Read-only computed projections over the entity store: event filtering,
//! engagement ranking, deterministic sampling, and group search.
//!
//! Every function here is pure and total: no mutation, no clock reads, no
//! randomness, and unknown ids yield empty results instead of errors. All
//! selection logic the consumer renders funnels through this module so the
//! same inputs always produce the same view.

use crate::policy::{
    EVENT_ATTENDEE_LIMIT, EVENT_ATTENDEE_STRIDE, GROUP_MEMBER_LIMIT, GROUP_MEMBER_STRIDE,
    RECOMMENDED_GROUP_LIMIT, RECOMMENDED_GROUP_STRIDE, RECOMMENDED_USER_LIMIT,
    RECOMMENDED_USER_STRIDE, TRENDING_POST_LIMIT,
};
use crate::store::EntityStore;
use crate::types::{Event, EventId, Group, GroupId, PiazzaError, Post, Timestamp, User, UserId};
use std::str::FromStr;

// =============================================================================
// EVENT FILTERING
// =============================================================================

/// How to partition the event collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFilter {
    /// Events starting after the given instant, soonest first.
    Upcoming,
    /// Events the viewer marked as attending, soonest first.
    Attending,
    /// Events that already started, most recent first.
    Past,
    /// Virtually-held events, soonest first.
    Virtual,
}

impl FromStr for EventFilter {
    type Err = PiazzaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "upcoming" => Ok(Self::Upcoming),
            "attending" => Ok(Self::Attending),
            "past" => Ok(Self::Past),
            "virtual" => Ok(Self::Virtual),
            other => Err(PiazzaError::InvalidInput(format!(
                "unknown event filter '{other}' (expected upcoming, attending, past, or virtual)"
            ))),
        }
    }
}

/// Partition and order events per the filter, evaluated at `now`.
///
/// `past` sorts descending by start time; every other filter sorts
/// ascending. Sorts are stable, so events sharing a start time keep their
/// insertion order.
#[must_use]
pub fn events_view(store: &EntityStore, filter: EventFilter, now: Timestamp) -> Vec<&Event> {
    let mut selected: Vec<&Event> = store
        .events()
        .iter()
        .filter(|e| match filter {
            EventFilter::Upcoming => e.starts > now,
            EventFilter::Attending => e.attending,
            EventFilter::Past => e.starts < now,
            EventFilter::Virtual => e.is_virtual(),
        })
        .collect();

    match filter {
        EventFilter::Past => selected.sort_by(|a, b| b.starts.cmp(&a.starts)),
        _ => selected.sort_by_key(|e| e.starts),
    }

    selected
}

// =============================================================================
// ENGAGEMENT RANKING
// =============================================================================

/// The trending view: posts ranked by engagement score.
///
/// Score is likes + comments + shares with equal weights and no time decay.
/// The sort is stable (equal scores keep their insertion order) and the
/// result is truncated to the trending limit.
#[must_use]
pub fn trending_posts(store: &EntityStore) -> Vec<&Post> {
    let mut ranked: Vec<&Post> = store.posts().iter().collect();
    ranked.sort_by(|a, b| b.engagement_score().cmp(&a.engagement_score()));
    ranked.truncate(TRENDING_POST_LIMIT);
    ranked
}

// =============================================================================
// DETERMINISTIC SAMPLING
// =============================================================================

/// Integer key for an id: the sum of its character code points.
///
/// This keyed stride selection is a deterministic stand-in for a real
/// membership/relevance model: same id, same subset, every time.
#[must_use]
fn id_key(id: &str) -> u64 {
    id.chars().map(|c| c as u64).sum()
}

/// Select every `stride`-th element, phase-shifted by `key`, capped at
/// `limit`. Selection index is the element's position in the full
/// collection, so the subset is a pure function of (key, collection).
fn sample_stride<T>(items: &[T], key: u64, stride: u64, limit: usize) -> Vec<&T> {
    items
        .iter()
        .enumerate()
        .filter(|(index, _)| (*index as u64).wrapping_add(key) % stride == 0)
        .map(|(_, item)| item)
        .take(limit)
        .collect()
}

/// Deterministic member subset for a group.
///
/// Unknown groups yield an empty result.
#[must_use]
pub fn group_members<'a>(store: &'a EntityStore, group: &GroupId) -> Vec<&'a User> {
    if store.group(group).is_none() {
        return Vec::new();
    }
    sample_stride(
        store.users(),
        id_key(group.as_str()),
        GROUP_MEMBER_STRIDE,
        GROUP_MEMBER_LIMIT,
    )
}

/// Deterministic attendee subset for an event.
///
/// Unknown events yield an empty result.
#[must_use]
pub fn event_attendees<'a>(store: &'a EntityStore, event: &EventId) -> Vec<&'a User> {
    if store.event(event).is_none() {
        return Vec::new();
    }
    sample_stride(
        store.users(),
        id_key(event.as_str()),
        EVENT_ATTENDEE_STRIDE,
        EVENT_ATTENDEE_LIMIT,
    )
}

/// Recommended groups for a viewer.
///
/// With a viewer id the subset is keyed off that id; with none, the first
/// groups in insertion order are returned.
#[must_use]
pub fn recommended_groups<'a>(store: &'a EntityStore, viewer: Option<&UserId>) -> Vec<&'a Group> {
    match viewer {
        Some(id) => sample_stride(
            store.groups(),
            id_key(id.as_str()),
            RECOMMENDED_GROUP_STRIDE,
            RECOMMENDED_GROUP_LIMIT,
        ),
        None => store.groups().iter().take(RECOMMENDED_GROUP_LIMIT).collect(),
    }
}

/// Recommended users for a viewer.
///
/// The viewer is excluded from the candidates. With no viewer id, the first
/// users in insertion order are returned.
#[must_use]
pub fn recommended_users<'a>(store: &'a EntityStore, viewer: Option<&UserId>) -> Vec<&'a User> {
    match viewer {
        Some(id) => {
            let key = id_key(id.as_str());
            store
                .users()
                .iter()
                .filter(|u| &u.id != id)
                .enumerate()
                .filter(|(index, _)| (*index as u64).wrapping_add(key) % RECOMMENDED_USER_STRIDE == 0)
                .map(|(_, user)| user)
                .take(RECOMMENDED_USER_LIMIT)
                .collect()
        }
        None => store.users().iter().take(RECOMMENDED_USER_LIMIT).collect(),
    }
}

// =============================================================================
// GROUP SEARCH
// =============================================================================

/// Fixed tag-to-category buckets for group discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupCategory {
    Technology,
    Creative,
    Sports,
    Food,
    Social,
}

impl GroupCategory {
    /// Tags belonging to this category.
    #[must_use]
    pub const fn tags(self) -> &'static [&'static str] {
        match self {
            Self::Technology => &["electronics", "software", "maker", "retro", "gaming"],
            Self::Creative => &["art", "photography", "drawing", "music"],
            Self::Sports => &["running", "fitness", "outdoors", "race"],
            Self::Food => &["baking", "food"],
            Self::Social => &["meetup", "swap", "qa", "tournament"],
        }
    }

    /// Whether any of the group's tags falls in this category.
    #[must_use]
    pub fn matches(self, group: &Group) -> bool {
        group
            .tags
            .iter()
            .any(|tag| self.tags().contains(&tag.to_ascii_lowercase().as_str()))
    }
}

impl FromStr for GroupCategory {
    type Err = PiazzaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "technology" => Ok(Self::Technology),
            "creative" => Ok(Self::Creative),
            "sports" => Ok(Self::Sports),
            "food" => Ok(Self::Food),
            "social" => Ok(Self::Social),
            other => Err(PiazzaError::InvalidInput(format!(
                "unknown group category '{other}'"
            ))),
        }
    }
}

/// Search groups by text and category.
///
/// The query is a case-insensitive substring match over name, description,
/// and tags; an empty query matches everything. When a category is given,
/// only groups with at least one tag in that category pass. Results keep
/// insertion order.
#[must_use]
pub fn search_groups<'a>(
    store: &'a EntityStore,
    query: &str,
    category: Option<GroupCategory>,
) -> Vec<&'a Group> {
    let needle = query.to_lowercase();

    store
        .groups()
        .iter()
        .filter(|g| category.is_none_or(|c| c.matches(g)))
        .filter(|g| {
            needle.is_empty()
                || g.name.to_lowercase().contains(&needle)
                || g.description.to_lowercase().contains(&needle)
                || g.tags.iter().any(|t| t.to_lowercase().contains(&needle))
        })
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;
    use crate::types::{EventLocation, Post, PostId, Timestamp, User};

    fn seeded() -> EntityStore {
        let mut store = EntityStore::new();
        store.initialize(SeedData::demo());
        store
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

    fn bare_post(id: &str, likes: u64, comments: u64, shares: u64) -> Post {
        Post {
            id: PostId::new(id),
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

    fn store_with(seed: SeedData) -> EntityStore {
        let mut store = EntityStore::new();
        store.initialize(seed);
        store
    }

    #[test]
    fn event_filter_parses() {
        assert_eq!("Past".parse::<EventFilter>().ok(), Some(EventFilter::Past));
        assert!("someday".parse::<EventFilter>().is_err());
    }

    #[test]
    fn upcoming_and_past_partition_by_now() {
        let store = seeded();
        let now = crate::seed::SEED_EPOCH;

        let upcoming = events_view(&store, EventFilter::Upcoming, now);
        let past = events_view(&store, EventFilter::Past, now);

        assert!(!upcoming.is_empty());
        assert!(!past.is_empty());
        assert!(upcoming.iter().all(|e| e.starts > now));
        assert!(past.iter().all(|e| e.starts < now));

        // upcoming: ascending, past: descending
        for pair in upcoming.windows(2) {
            assert!(pair[0].starts <= pair[1].starts);
        }
        for pair in past.windows(2) {
            assert!(pair[0].starts >= pair[1].starts);
        }
    }

    #[test]
    fn attending_and_virtual_filter_by_flag() {
        let store = seeded();
        let now = crate::seed::SEED_EPOCH;

        let attending = events_view(&store, EventFilter::Attending, now);
        assert!(!attending.is_empty());
        assert!(attending.iter().all(|e| e.attending));

        let virtual_events = events_view(&store, EventFilter::Virtual, now);
        assert!(!virtual_events.is_empty());
        assert!(
            virtual_events
                .iter()
                .all(|e| matches!(e.location, EventLocation::Virtual { .. }))
        );
    }

    #[test]
    fn trending_ranking_is_stable_and_monotonic() {
        let seed = SeedData {
            posts: vec![
                bare_post("post-a", 10, 0, 0),
                bare_post("post-b", 30, 0, 0),
                bare_post("post-c", 0, 30, 0),
                bare_post("post-d", 0, 0, 5),
            ],
            ..SeedData::default()
        };
        let store = store_with(seed);

        let ranked: Vec<&str> = trending_posts(&store)
            .iter()
            .map(|p| p.id.as_str())
            .collect();

        // 30-score posts first, preserving their relative order; then 10, then 5.
        assert_eq!(ranked, vec!["post-b", "post-c", "post-a", "post-d"]);
    }

    #[test]
    fn trending_truncates_to_limit() {
        let seed = SeedData {
            posts: (0..10)
                .map(|i| bare_post(&format!("post-{i}"), i, 0, 0))
                .collect(),
            ..SeedData::default()
        };
        let store = store_with(seed);

        assert_eq!(trending_posts(&store).len(), TRENDING_POST_LIMIT);
    }

    #[test]
    fn group_members_deterministic() {
        let store = seeded();
        let group = GroupId::new("group-trailheads");

        let first = group_members(&store, &group);
        let second = group_members(&store, &group);

        assert!(!first.is_empty());
        assert!(first.len() <= GROUP_MEMBER_LIMIT);
        let ids: Vec<_> = first.iter().map(|u| u.id.as_str()).collect();
        let ids_again: Vec<_> = second.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, ids_again);
    }

    #[test]
    fn different_ids_select_different_phases() {
        let store = seeded();

        // Keys congruent mod the stride share a subset; these two differ.
        let a = group_members(&store, &GroupId::new("group-streetframes"));
        let b = group_members(&store, &GroupId::new("group-trailheads"));
        let a_ids: Vec<_> = a.iter().map(|u| u.id.as_str()).collect();
        let b_ids: Vec<_> = b.iter().map(|u| u.id.as_str()).collect();

        assert_ne!(a_ids, b_ids);
    }

    #[test]
    fn unknown_ids_yield_empty_views() {
        let store = seeded();

        assert!(group_members(&store, &GroupId::new("group-none")).is_empty());
        assert!(event_attendees(&store, &EventId::new("event-none")).is_empty());
    }

    #[test]
    fn event_attendees_respect_cap() {
        let store = seeded();
        let attendees = event_attendees(&store, &EventId::new("event-chess-open"));

        assert!(!attendees.is_empty());
        assert!(attendees.len() <= EVENT_ATTENDEE_LIMIT);
    }

    #[test]
    fn stride_selection_formula() {
        // key = sum of char codes; element passes when (index + key) % stride == 0.
        let items: Vec<u64> = (0..12).collect();
        let key = id_key("ab"); // 97 + 98 = 195; 195 % 3 == 0
        assert_eq!(key, 195);

        let picked: Vec<u64> = sample_stride(&items, key, 3, 10)
            .into_iter()
            .copied()
            .collect();
        assert_eq!(picked, vec![0, 3, 6, 9]);
    }

    #[test]
    fn recommendations_without_viewer_take_prefix() {
        let seed = SeedData {
            users: vec![bare_user("a"), bare_user("b"), bare_user("c")],
            ..SeedData::default()
        };
        let store = store_with(seed);

        let recommended: Vec<&str> = recommended_users(&store, None)
            .iter()
            .map(|u| u.id.as_str())
            .collect();

        // Fewer users than the cap: all of them, in insertion order.
        assert_eq!(recommended, vec!["a", "b", "c"]);
    }

    #[test]
    fn recommended_users_exclude_viewer() {
        let store = seeded();
        let viewer = UserId::new("user-amara");

        let recommended = recommended_users(&store, Some(&viewer));

        assert!(!recommended.is_empty());
        assert!(recommended.len() <= RECOMMENDED_USER_LIMIT);
        assert!(recommended.iter().all(|u| u.id != viewer));
    }

    #[test]
    fn recommended_groups_deterministic_per_viewer() {
        let store = seeded();
        let viewer = UserId::new("user-bengt");

        let first = recommended_groups(&store, Some(&viewer));
        let second = recommended_groups(&store, Some(&viewer));

        assert!(first.len() <= RECOMMENDED_GROUP_LIMIT);
        let a: Vec<_> = first.iter().map(|g| g.id.as_str()).collect();
        let b: Vec<_> = second.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn search_matches_name_description_and_tags() {
        let store = seeded();

        let by_name = search_groups(&store, "synth", None);
        assert_eq!(by_name.len(), 1);
        assert_eq!(by_name[0].id.as_str(), "group-synthbuilders");

        let by_tag = search_groups(&store, "PHOTOGRAPHY", None);
        assert!(by_tag.iter().any(|g| g.id.as_str() == "group-streetframes"));

        assert!(search_groups(&store, "zzz-no-such", None).is_empty());
    }

    #[test]
    fn search_combines_query_and_category() {
        let store = seeded();

        let tech = search_groups(&store, "", Some(GroupCategory::Technology));
        assert!(!tech.is_empty());
        assert!(tech.iter().all(|g| GroupCategory::Technology.matches(g)));

        // Query and category must both hold.
        let narrowed = search_groups(&store, "retro", Some(GroupCategory::Technology));
        assert_eq!(narrowed.len(), 1);
        assert_eq!(narrowed[0].id.as_str(), "group-pixelarchive");

        let mismatch = search_groups(&store, "sourdough", Some(GroupCategory::Technology));
        assert!(mismatch.is_empty());
    }
}
