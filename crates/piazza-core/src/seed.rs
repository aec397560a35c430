//! # Seed Source
//!
//! The static demo dataset consumed by `EntityStore::initialize`.
//!
//! The dataset is built deterministically in code: fixed ids, fixed
//! timestamps, no I/O, no randomness. Building it twice yields identical
//! collections, which keeps every derived view reproducible across runs.

use crate::types::{
    Attachment, Comment, CommentId, Event, EventId, EventLocation, Group, GroupId, Payload, Post,
    PostId, Timestamp, TrendingTopic, User, UserId,
};
use serde_json::json;
use std::collections::BTreeMap;

/// Seconds per day, for offsetting seed timestamps.
const DAY: i64 = 86_400;

/// Reference instant for the seed dataset: 2025-08-01 00:00:00 UTC.
///
/// All seed timestamps are fixed offsets from this anchor so the dataset is
/// byte-identical on every build.
pub const SEED_EPOCH: Timestamp = Timestamp::new(1_754_006_400);

// =============================================================================
// SEED DATA
// =============================================================================

/// All collections consumed by one bulk `initialize` call.
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    pub users: Vec<User>,
    pub groups: Vec<Group>,
    pub events: Vec<Event>,
    pub posts: Vec<Post>,
    /// Comments keyed by owning post, in display order.
    pub comments: BTreeMap<PostId, Vec<Comment>>,
    pub featured_content: Vec<Payload>,
    pub media_gallery: Vec<Payload>,
    pub activity_log: Vec<Payload>,
    pub engagement_metrics: Payload,
    pub trending_topics: Vec<TrendingTopic>,
    /// Users with a pending follow request toward the viewer.
    pub pending_requests: Vec<UserId>,
}

impl SeedData {
    /// Build the fixed demo dataset.
    #[must_use]
    pub fn demo() -> Self {
        let users = demo_users();
        let groups = demo_groups();
        let events = demo_events();
        let posts = demo_posts(&users);
        let comments = demo_comments(&users, &posts);

        Self {
            users,
            groups,
            events,
            posts,
            comments,
            featured_content: demo_featured_content(),
            media_gallery: demo_media_gallery(),
            activity_log: demo_activity_log(),
            engagement_metrics: demo_engagement_metrics(),
            trending_topics: demo_trending_topics(),
            pending_requests: vec![UserId::new("user-priya"), UserId::new("user-tomas")],
        }
    }
}

// =============================================================================
// BUILDERS
// =============================================================================

fn user(
    id: &str,
    username: &str,
    display_name: &str,
    bio: &str,
    location: &str,
    verified: bool,
    joined_days_ago: i64,
    counters: (u64, u64, u64),
) -> User {
    let (followers, following, posts) = counters;
    User {
        id: UserId::new(id),
        username: username.to_string(),
        email: format!("{username}@piazza.example"),
        display_name: display_name.to_string(),
        avatar: format!("/avatars/{username}.png"),
        bio: bio.to_string(),
        location: location.to_string(),
        website: None,
        followers_count: followers,
        following_count: following,
        posts_count: posts,
        verified,
        joined: SEED_EPOCH.offset(-joined_days_ago * DAY),
    }
}

fn demo_users() -> Vec<User> {
    vec![
        user(
            "user-amara",
            "amara",
            "Amara Okafor",
            "Street photographer. Always chasing light.",
            "Lagos",
            true,
            900,
            (4_210, 312, 87),
        ),
        user(
            "user-bengt",
            "bengt",
            "Bengt Lindqvist",
            "Trail runner and map nerd.",
            "Uppsala",
            false,
            740,
            (380, 410, 54),
        ),
        user(
            "user-chen",
            "chen",
            "Chen Wei",
            "Builds tiny synthesizers on weekends.",
            "Shenzhen",
            false,
            700,
            (1_150, 98, 132),
        ),
        user(
            "user-dalia",
            "dalia",
            "Dalia Haddad",
            "Food writer. Ask me about za'atar.",
            "Amman",
            true,
            640,
            (9_870, 120, 201),
        ),
        user(
            "user-elif",
            "elif",
            "Elif Demir",
            "Urban sketching, fountain pens, strong tea.",
            "Istanbul",
            false,
            590,
            (2_045, 530, 76),
        ),
        user(
            "user-farid",
            "farid",
            "Farid Nazarov",
            "Chess club organizer.",
            "Tashkent",
            false,
            530,
            (260, 190, 23),
        ),
        user(
            "user-greta",
            "greta",
            "Greta Bauer",
            "Community gardens and compost evangelism.",
            "Leipzig",
            false,
            470,
            (730, 305, 64),
        ),
        user(
            "user-hiro",
            "hiro",
            "Hiro Tanaka",
            "Retro game preservation.",
            "Osaka",
            true,
            410,
            (15_300, 87, 149),
        ),
        user(
            "user-priya",
            "priya",
            "Priya Raman",
            "Marathon training, slowly.",
            "Chennai",
            false,
            260,
            (512, 640, 41),
        ),
        user(
            "user-tomas",
            "tomas",
            "Tomás Herrera",
            "Bread. Mostly sourdough.",
            "Valparaíso",
            false,
            150,
            (98, 112, 17),
        ),
    ]
}

fn group(
    id: &str,
    name: &str,
    description: &str,
    private: bool,
    members: u64,
    posts: u64,
    tags: &[&str],
    creator: &str,
    created_days_ago: i64,
) -> Group {
    Group {
        id: GroupId::new(id),
        name: name.to_string(),
        description: description.to_string(),
        private,
        members_count: members,
        posts_count: posts,
        tags: tags.iter().map(|t| (*t).to_string()).collect(),
        creator: UserId::new(creator),
        created: SEED_EPOCH.offset(-created_days_ago * DAY),
    }
}

fn demo_groups() -> Vec<Group> {
    vec![
        group(
            "group-synthbuilders",
            "Synth Builders",
            "DIY synthesizers, from breadboard to front panel.",
            false,
            1_824,
            963,
            &["electronics", "music", "maker"],
            "user-chen",
            620,
        ),
        group(
            "group-streetframes",
            "Street Frames",
            "Candid photography critique and photowalks.",
            false,
            5_410,
            2_280,
            &["photography", "art"],
            "user-amara",
            580,
        ),
        group(
            "group-trailheads",
            "Trailheads",
            "Trail running routes, races, and gear talk.",
            false,
            2_975,
            1_407,
            &["running", "outdoors", "fitness"],
            "user-bengt",
            505,
        ),
        group(
            "group-slowcrumb",
            "Slow Crumb",
            "Sourdough starters, bakes, and gentle failures.",
            false,
            1_148,
            826,
            &["baking", "food"],
            "user-tomas",
            330,
        ),
        group(
            "group-inklines",
            "Ink Lines",
            "Urban sketching meetups and technique swaps.",
            true,
            684,
            512,
            &["drawing", "art", "meetup"],
            "user-elif",
            290,
        ),
        group(
            "group-pixelarchive",
            "Pixel Archive",
            "Preserving and emulating retro games.",
            false,
            3_362,
            1_951,
            &["gaming", "retro", "software"],
            "user-hiro",
            240,
        ),
    ]
}

fn event(
    id: &str,
    title: &str,
    description: &str,
    starts_offset_days: i64,
    duration_hours: i64,
    location: EventLocation,
    organizer: &str,
    group: Option<&str>,
    attendees: u64,
    capacity: Option<u64>,
    attending: bool,
    tags: &[&str],
) -> Event {
    let starts = SEED_EPOCH.offset(starts_offset_days * DAY);
    Event {
        id: EventId::new(id),
        title: title.to_string(),
        description: description.to_string(),
        starts,
        ends: starts.offset(duration_hours * 3_600),
        location,
        organizer: UserId::new(organizer),
        group: group.map(GroupId::new),
        attendees_count: attendees,
        capacity,
        attending,
        tags: tags.iter().map(|t| (*t).to_string()).collect(),
    }
}

fn demo_events() -> Vec<Event> {
    vec![
        event(
            "event-photowalk-fall",
            "Old Town Photowalk",
            "Two hours of candid shooting, then coffee and critique.",
            -45,
            3,
            EventLocation::Physical {
                venue: "Old Town Square".to_string(),
            },
            "user-amara",
            Some("group-streetframes"),
            64,
            Some(80),
            true,
            &["photography", "meetup"],
        ),
        event(
            "event-synth-soldering",
            "Beginner Soldering Night",
            "Build a working 8-step sequencer from a kit.",
            -12,
            4,
            EventLocation::Physical {
                venue: "Makerspace Hall B".to_string(),
            },
            "user-chen",
            Some("group-synthbuilders"),
            28,
            Some(30),
            false,
            &["electronics", "workshop"],
        ),
        event(
            "event-trail-relay",
            "Midsummer Trail Relay",
            "Teams of four, 60 km of forest single-track.",
            430,
            10,
            EventLocation::Physical {
                venue: "Norra Lunsen trailhead".to_string(),
            },
            "user-bengt",
            Some("group-trailheads"),
            112,
            Some(160),
            true,
            &["running", "race"],
        ),
        event(
            "event-sourdough-qa",
            "Starter Rescue Q&A",
            "Bring your sluggish starter. We diagnose live.",
            450,
            2,
            EventLocation::Virtual {
                meeting_url: "https://meet.piazza.example/sourdough-qa".to_string(),
            },
            "user-tomas",
            Some("group-slowcrumb"),
            86,
            None,
            false,
            &["baking", "qa"],
        ),
        event(
            "event-sketch-sunday",
            "Sketch Sunday: Harbor Edition",
            "Meet at the ferry dock, draw until the light goes.",
            465,
            5,
            EventLocation::Physical {
                venue: "Karaköy ferry dock".to_string(),
            },
            "user-elif",
            Some("group-inklines"),
            22,
            Some(25),
            true,
            &["drawing", "meetup"],
        ),
        event(
            "event-speedrun-showcase",
            "Preservation Speedrun Showcase",
            "Archived builds, live commentary, donation drive.",
            480,
            6,
            EventLocation::Virtual {
                meeting_url: "https://meet.piazza.example/speedrun".to_string(),
            },
            "user-hiro",
            Some("group-pixelarchive"),
            540,
            None,
            false,
            &["gaming", "stream"],
        ),
        event(
            "event-chess-open",
            "Open Rapid Tournament",
            "Seven rounds, 15+10, all ratings welcome.",
            495,
            8,
            EventLocation::Physical {
                venue: "City Chess Club".to_string(),
            },
            "user-farid",
            None,
            41,
            Some(64),
            false,
            &["chess", "tournament"],
        ),
        event(
            "event-garden-swap",
            "Autumn Seed Swap",
            "Bring seeds, cuttings, and surplus harvest.",
            -90,
            4,
            EventLocation::Physical {
                venue: "Community Garden East".to_string(),
            },
            "user-greta",
            None,
            58,
            None,
            false,
            &["gardening", "swap"],
        ),
    ]
}

fn post(
    id: &str,
    author: &User,
    content: &str,
    group: Option<&str>,
    counters: (u64, u64, u64),
    days_ago: i64,
    attachments: Vec<Attachment>,
) -> Post {
    let (likes, comments, shares) = counters;
    Post {
        id: PostId::new(id),
        content: content.to_string(),
        author: author.clone(),
        group: group.map(GroupId::new),
        attachments,
        likes_count: likes,
        comments_count: comments,
        shares_count: shares,
        liked: false,
        bookmarked: false,
        created: SEED_EPOCH.offset(-days_ago * DAY),
    }
}

fn image(url: &str) -> Attachment {
    Attachment {
        url: url.to_string(),
        kind: "image".to_string(),
    }
}

fn demo_posts(users: &[User]) -> Vec<Post> {
    let by_id = |id: &str| -> &User {
        // Seed data is internally consistent; the fallback keeps this total.
        users
            .iter()
            .find(|u| u.id.as_str() == id)
            .unwrap_or(&users[0])
    };

    vec![
        post(
            "post-101",
            by_id("user-amara"),
            "Morning market series, frame 12. Shot through a bead curtain.",
            Some("group-streetframes"),
            (412, 37, 58),
            40,
            vec![image("/media/market-12.jpg")],
        ),
        post(
            "post-102",
            by_id("user-chen"),
            "Sequencer finally clocks cleanly at 180 BPM. Schematic in comments.",
            Some("group-synthbuilders"),
            (203, 44, 19),
            37,
            vec![image("/media/sequencer-board.jpg")],
        ),
        post(
            "post-103",
            by_id("user-dalia"),
            "Tested five tahini brands so you don't have to. Thread.",
            None,
            (980, 112, 240),
            35,
            Vec::new(),
        ),
        post(
            "post-104",
            by_id("user-bengt"),
            "Route notes from the northern ridge loop. Mud level: heroic.",
            Some("group-trailheads"),
            (87, 12, 6),
            33,
            vec![image("/media/ridge-loop.png")],
        ),
        post(
            "post-105",
            by_id("user-elif"),
            "Thirty-minute harbor sketch before the rain won.",
            Some("group-inklines"),
            (310, 28, 22),
            30,
            vec![image("/media/harbor-sketch.jpg")],
        ),
        post(
            "post-106",
            by_id("user-hiro"),
            "Recovered a playable build of a cancelled 1996 platformer.",
            Some("group-pixelarchive"),
            (2_150, 301, 540),
            28,
            Vec::new(),
        ),
        post(
            "post-107",
            by_id("user-tomas"),
            "Day 9: the starter lives. Naming it Horacio.",
            Some("group-slowcrumb"),
            (145, 63, 9),
            25,
            vec![image("/media/horacio.jpg")],
        ),
        post(
            "post-108",
            by_id("user-greta"),
            "Compost workshop recap and the three mistakes everyone makes.",
            None,
            (96, 21, 14),
            22,
            Vec::new(),
        ),
        post(
            "post-109",
            by_id("user-farid"),
            "Club championship bracket is out. Twelve boards, one trophy.",
            None,
            (54, 17, 3),
            18,
            Vec::new(),
        ),
        post(
            "post-110",
            by_id("user-amara"),
            "Why I stopped cropping in post. A short manifesto.",
            Some("group-streetframes"),
            (530, 88, 102),
            14,
            Vec::new(),
        ),
        post(
            "post-111",
            by_id("user-priya"),
            "Week 6 of marathon block: the long run finally felt long, not fatal.",
            Some("group-trailheads"),
            (77, 19, 2),
            10,
            Vec::new(),
        ),
        post(
            "post-112",
            by_id("user-chen"),
            "Filter module PCBs arrived. Purple solder mask was the right call.",
            Some("group-synthbuilders"),
            (188, 25, 11),
            7,
            vec![image("/media/filter-pcbs.jpg")],
        ),
        post(
            "post-113",
            by_id("user-dalia"),
            "The bakery on Rainbow Street changed their sesame supplier. Investigating.",
            None,
            (640, 95, 71),
            4,
            Vec::new(),
        ),
        post(
            "post-114",
            by_id("user-hiro"),
            "Cartridge dumping rig v3: now with 40% fewer alligator clips.",
            Some("group-pixelarchive"),
            (415, 52, 33),
            2,
            vec![image("/media/dump-rig.jpg")],
        ),
    ]
}

fn comment(
    id: &str,
    post_id: &str,
    author: &User,
    content: &str,
    parent: Option<&str>,
    likes: u64,
    days_ago: i64,
) -> Comment {
    Comment {
        id: CommentId::new(id),
        post: PostId::new(post_id),
        content: content.to_string(),
        author: author.clone(),
        parent: parent.map(CommentId::new),
        likes_count: likes,
        liked: false,
        replies: Vec::new(),
        created: SEED_EPOCH.offset(-days_ago * DAY),
    }
}

fn demo_comments(users: &[User], posts: &[Post]) -> BTreeMap<PostId, Vec<Comment>> {
    let by_id = |id: &str| -> &User {
        users
            .iter()
            .find(|u| u.id.as_str() == id)
            .unwrap_or(&users[0])
    };

    let mut map: BTreeMap<PostId, Vec<Comment>> = BTreeMap::new();

    let mut push = |c: Comment| map.entry(c.post.clone()).or_default().push(c);

    push(comment(
        "comment-9001",
        "post-102",
        by_id("user-hiro"),
        "That clock jitter fix is clever. Mind if I mirror the schematic?",
        None,
        14,
        36,
    ));
    push(comment(
        "comment-9002",
        "post-102",
        by_id("user-chen"),
        "Go ahead — CC-BY, credit the group.",
        Some("comment-9001"),
        9,
        36,
    ));
    push(comment(
        "comment-9003",
        "post-103",
        by_id("user-tomas"),
        "Brand three is the one my grandmother swears by. Validated.",
        None,
        41,
        34,
    ));
    push(comment(
        "comment-9004",
        "post-106",
        by_id("user-amara"),
        "This is museum-grade work. Incredible find.",
        None,
        120,
        27,
    ));
    push(comment(
        "comment-9005",
        "post-106",
        by_id("user-farid"),
        "Does the sound driver work under emulation yet?",
        None,
        33,
        27,
    ));
    push(comment(
        "comment-9006",
        "post-107",
        by_id("user-dalia"),
        "Horacio deserves a column. I'm serious.",
        None,
        18,
        24,
    ));
    push(comment(
        "comment-9007",
        "post-110",
        by_id("user-elif"),
        "Same journey with sketching: the frame you commit to on-site is the drawing.",
        None,
        26,
        13,
    ));

    debug_assert!(
        map.keys().all(|pid| posts.iter().any(|p| &p.id == pid)),
        "every comment thread must belong to a seeded post"
    );

    map
}

fn demo_featured_content() -> Vec<Payload> {
    vec![
        json!({
            "kind": "collection",
            "title": "Editors' picks: workshop week",
            "items": ["post-102", "post-112", "event-synth-soldering"],
        }),
        json!({
            "kind": "spotlight",
            "title": "Creator spotlight",
            "user": "user-hiro",
            "blurb": "Keeping cancelled games alive, one cartridge at a time.",
        }),
    ]
}

fn demo_media_gallery() -> Vec<Payload> {
    vec![
        json!({ "url": "/media/market-12.jpg", "post": "post-101", "kind": "image" }),
        json!({ "url": "/media/harbor-sketch.jpg", "post": "post-105", "kind": "image" }),
        json!({ "url": "/media/dump-rig.jpg", "post": "post-114", "kind": "image" }),
    ]
}

fn demo_activity_log() -> Vec<Payload> {
    vec![
        json!({ "action": "joined_group", "user": "user-priya", "group": "group-trailheads" }),
        json!({ "action": "rsvp", "user": "user-elif", "event": "event-sketch-sunday" }),
        json!({ "action": "shared_post", "user": "user-dalia", "post": "post-106" }),
    ]
}

fn demo_engagement_metrics() -> Payload {
    json!({
        "daily_active": 1840,
        "posts_per_day": 312,
        "comments_per_day": 945,
        "top_group": "group-streetframes",
    })
}

fn demo_trending_topics() -> Vec<TrendingTopic> {
    [
        ("retrogaming", 1_951u64),
        ("streetphotography", 1_407),
        ("sourdough", 826),
        ("trailrunning", 733),
        ("urbansketching", 512),
    ]
    .into_iter()
    .map(|(tag, posts_count)| TrendingTopic {
        tag: tag.to_string(),
        posts_count,
    })
    .collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_is_deterministic() {
        let a = SeedData::demo();
        let b = SeedData::demo();

        assert_eq!(a.users, b.users);
        assert_eq!(a.groups, b.groups);
        assert_eq!(a.events, b.events);
        assert_eq!(a.posts, b.posts);
        assert_eq!(a.comments, b.comments);
        assert_eq!(a.trending_topics, b.trending_topics);
    }

    #[test]
    fn user_ids_unique() {
        let seed = SeedData::demo();
        let mut ids: Vec<_> = seed.users.iter().map(|u| u.id.clone()).collect();
        let before = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn post_authors_exist() {
        let seed = SeedData::demo();
        for post in &seed.posts {
            assert!(
                seed.users.iter().any(|u| u.id == post.author.id),
                "post {} has unknown author {}",
                post.id,
                post.author.id
            );
        }
    }

    #[test]
    fn event_references_resolve() {
        let seed = SeedData::demo();
        for event in &seed.events {
            assert!(seed.users.iter().any(|u| u.id == event.organizer));
            if let Some(group) = &event.group {
                assert!(seed.groups.iter().any(|g| &g.id == group));
            }
            assert!(event.starts <= event.ends, "event {} ends before it starts", event.id);
        }
    }

    #[test]
    fn group_creators_exist() {
        let seed = SeedData::demo();
        for group in &seed.groups {
            assert!(seed.users.iter().any(|u| u.id == group.creator));
        }
    }

    #[test]
    fn comment_threads_belong_to_posts() {
        let seed = SeedData::demo();
        for (post_id, thread) in &seed.comments {
            assert!(seed.posts.iter().any(|p| &p.id == post_id));
            for c in thread {
                assert_eq!(&c.post, post_id);
                assert!(seed.users.iter().any(|u| u.id == c.author.id));
            }
        }
    }

    #[test]
    fn pending_requests_reference_seeded_users() {
        let seed = SeedData::demo();
        for id in &seed.pending_requests {
            assert!(seed.users.iter().any(|u| &u.id == id));
        }
    }

    #[test]
    fn events_span_past_and_future_of_anchor() {
        let seed = SeedData::demo();
        assert!(seed.events.iter().any(|e| e.starts < SEED_EPOCH));
        assert!(seed.events.iter().any(|e| e.starts > SEED_EPOCH));
    }
}
