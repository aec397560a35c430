//! # CLI Command Implementations
//!
//! One function per subcommand. The session is built by the dispatcher;
//! each command only reads or mutates it and renders either human-readable
//! text or JSON, per `--json-mode`.

use crate::cli::config::Settings;
use piazza_core::views::{self, EventFilter, GroupCategory};
use piazza_core::{
    Event, EventId, Group, GroupId, PiazzaError, Post, PostId, Session, Timestamp, User, UserId,
};
use serde_json::json;

/// Wall-clock instant for event partitioning.
///
/// The core never reads the clock; this is the single place the app does.
fn now() -> Timestamp {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default();
    Timestamp::new(secs)
}

fn emit_json(value: &serde_json::Value) -> Result<(), PiazzaError> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|e| PiazzaError::SerializationError(e.to_string()))?;
    println!("{rendered}");
    Ok(())
}

/// Trim post content to a single display line.
fn excerpt(content: &str) -> String {
    const MAX: usize = 60;
    let line = content.lines().next().unwrap_or_default();
    if line.chars().count() <= MAX {
        line.to_string()
    } else {
        let head: String = line.chars().take(MAX).collect();
        format!("{head}…")
    }
}

fn post_line(post: &Post) -> String {
    format!(
        "{:<12} @{:<10} likes={:<5} comments={:<4} shares={:<4} {}",
        post.id,
        post.author.username,
        post.likes_count,
        post.comments_count,
        post.shares_count,
        excerpt(&post.content)
    )
}

fn post_json(post: &Post) -> serde_json::Value {
    json!({
        "id": post.id,
        "author": post.author.username,
        "likes": post.likes_count,
        "comments": post.comments_count,
        "shares": post.shares_count,
        "score": post.engagement_score(),
        "liked": post.liked,
        "bookmarked": post.bookmarked,
        "content": post.content,
    })
}

fn user_line(user: &User) -> String {
    let badge = if user.verified { " [verified]" } else { "" };
    format!("{:<14} {}{} :: {}", user.id, user.display_name, badge, user.bio)
}

fn group_line(group: &Group) -> String {
    let visibility = if group.private { "private" } else { "public" };
    format!(
        "{:<22} {:<16} {:>6} members ({visibility}) tags: {}",
        group.id,
        group.name,
        group.members_count,
        group.tags.join(", ")
    )
}

fn event_line(event: &Event) -> String {
    let place = match &event.location {
        piazza_core::EventLocation::Physical { venue } => venue.clone(),
        piazza_core::EventLocation::Virtual { .. } => "online".to_string(),
    };
    let attending = if event.attending { " [attending]" } else { "" };
    format!(
        "{:<26} starts={:<12} {:<28} {}{}",
        event.id,
        event.starts.secs(),
        event.title,
        place,
        attending
    )
}

// =============================================================================
// COMMANDS
// =============================================================================

/// `piazza init`: seed the demo database.
pub fn cmd_init(session: &mut Session, settings: &Settings, force: bool) -> Result<(), PiazzaError> {
    if session.is_seeded() && !force {
        println!("Already initialized (use --force to re-seed)");
        return Ok(());
    }

    session.seed();
    tracing::info!(
        users = session.store().users().len(),
        posts = session.store().posts().len(),
        "seeded demo data"
    );

    if settings.json {
        return emit_json(&json!({
            "seeded": true,
            "users": session.store().users().len(),
            "groups": session.store().groups().len(),
            "events": session.store().events().len(),
            "posts": session.store().posts().len(),
        }));
    }

    println!(
        "Seeded {} users, {} groups, {} events, {} posts",
        session.store().users().len(),
        session.store().groups().len(),
        session.store().events().len(),
        session.store().posts().len()
    );
    Ok(())
}

/// `piazza status`: store and connection counts.
pub fn cmd_status(session: &Session, settings: &Settings) -> Result<(), PiazzaError> {
    let store = session.store();
    let connections = session.connections();

    if settings.json {
        return emit_json(&json!({
            "seeded": session.is_seeded(),
            "persistent": session.is_persistent(),
            "users": store.users().len(),
            "groups": store.groups().len(),
            "events": store.events().len(),
            "posts": store.posts().len(),
            "following": connections.following().len(),
            "followers": connections.followers().len(),
            "pending_requests": connections.requests().len(),
        }));
    }

    println!("Seeded:     {}", session.is_seeded());
    println!("Persistent: {}", session.is_persistent());
    println!(
        "Entities:   {} users, {} groups, {} events, {} posts",
        store.users().len(),
        store.groups().len(),
        store.events().len(),
        store.posts().len()
    );
    println!(
        "Viewer:     following {}, followers {}, pending requests {}",
        connections.following().len(),
        connections.followers().len(),
        connections.requests().len()
    );
    Ok(())
}

/// `piazza feed`: posts, optionally scoped to an author or a group.
pub fn cmd_feed(
    session: &Session,
    settings: &Settings,
    user: Option<&str>,
    group: Option<&str>,
) -> Result<(), PiazzaError> {
    let store = session.store();
    let posts: Vec<&Post> = match (user, group) {
        (Some(u), _) => store.user_posts(&UserId::new(u)),
        (None, Some(g)) => store.group_posts(&GroupId::new(g)),
        (None, None) => store.posts().iter().collect(),
    };

    if settings.json {
        let items: Vec<_> = posts.iter().map(|p| post_json(p)).collect();
        return emit_json(&json!({ "posts": items }));
    }

    if posts.is_empty() {
        println!("No posts");
        return Ok(());
    }
    for post in posts {
        println!("{}", post_line(post));
    }
    Ok(())
}

/// `piazza trending`: engagement-ranked posts plus trending topics.
pub fn cmd_trending(session: &Session, settings: &Settings) -> Result<(), PiazzaError> {
    let store = session.store();
    let ranked = views::trending_posts(store);

    if settings.json {
        let posts: Vec<_> = ranked.iter().map(|p| post_json(p)).collect();
        let topics: Vec<_> = store
            .trending_topics()
            .iter()
            .map(|t| json!({ "tag": t.tag, "posts": t.posts_count }))
            .collect();
        return emit_json(&json!({ "posts": posts, "topics": topics }));
    }

    println!("Trending posts:");
    for (rank, post) in ranked.iter().enumerate() {
        println!(
            "  {}. score={:<5} {}",
            rank + 1,
            post.engagement_score(),
            post_line(post)
        );
    }
    println!("Trending topics:");
    for topic in store.trending_topics() {
        println!("  #{:<20} {} posts", topic.tag, topic.posts_count);
    }
    Ok(())
}

/// `piazza events`: events partitioned by filter, evaluated now.
pub fn cmd_events(session: &Session, settings: &Settings, filter: &str) -> Result<(), PiazzaError> {
    let filter: EventFilter = filter.parse()?;
    let events = views::events_view(session.store(), filter, now());

    if settings.json {
        let items: Vec<_> = events
            .iter()
            .map(|e| {
                json!({
                    "id": e.id,
                    "title": e.title,
                    "starts": e.starts.secs(),
                    "ends": e.ends.secs(),
                    "attending": e.attending,
                    "virtual": e.is_virtual(),
                    "attendees": e.attendees_count,
                })
            })
            .collect();
        return emit_json(&json!({ "filter": format!("{filter:?}"), "events": items }));
    }

    if events.is_empty() {
        println!("No events match");
        return Ok(());
    }
    for event in events {
        println!("{}", event_line(event));
    }
    Ok(())
}

/// `piazza groups`: text + category search.
pub fn cmd_groups(
    session: &Session,
    settings: &Settings,
    query: &str,
    category: Option<&str>,
) -> Result<(), PiazzaError> {
    let category: Option<GroupCategory> = match category {
        Some(raw) => Some(raw.parse()?),
        None => None,
    };
    let groups = views::search_groups(session.store(), query, category);

    if settings.json {
        let items: Vec<_> = groups
            .iter()
            .map(|g| {
                json!({
                    "id": g.id,
                    "name": g.name,
                    "private": g.private,
                    "members": g.members_count,
                    "tags": g.tags,
                })
            })
            .collect();
        return emit_json(&json!({ "groups": items }));
    }

    if groups.is_empty() {
        println!("No groups match");
        return Ok(());
    }
    for group in groups {
        println!("{}", group_line(group));
    }
    Ok(())
}

/// `piazza members`: the deterministic member sample for a group.
pub fn cmd_members(session: &Session, settings: &Settings, group: &str) -> Result<(), PiazzaError> {
    let id = GroupId::new(group);
    let members = views::group_members(session.store(), &id);
    emit_users(settings, &id.to_string(), &members)
}

/// `piazza attendees`: the deterministic attendee sample for an event.
pub fn cmd_attendees(
    session: &Session,
    settings: &Settings,
    event: &str,
) -> Result<(), PiazzaError> {
    let id = EventId::new(event);
    let attendees = views::event_attendees(session.store(), &id);
    emit_users(settings, &id.to_string(), &attendees)
}

fn emit_users(settings: &Settings, scope: &str, users: &[&User]) -> Result<(), PiazzaError> {
    if settings.json {
        let items: Vec<_> = users
            .iter()
            .map(|u| json!({ "id": u.id, "display_name": u.display_name }))
            .collect();
        return emit_json(&json!({ "scope": scope, "users": items }));
    }

    if users.is_empty() {
        println!("No results for {scope}");
        return Ok(());
    }
    for user in users {
        println!("{}", user_line(user));
    }
    Ok(())
}

/// `piazza recommend`: recommended users or groups for the viewer.
pub fn cmd_recommend(session: &Session, settings: &Settings, kind: &str) -> Result<(), PiazzaError> {
    let store = session.store();
    let viewer = settings.viewer.as_ref();

    match kind.to_ascii_lowercase().as_str() {
        "users" => {
            let users = views::recommended_users(store, viewer);
            emit_users(settings, "recommended-users", &users)
        }
        "groups" => {
            let groups = views::recommended_groups(store, viewer);
            if settings.json {
                let items: Vec<_> = groups
                    .iter()
                    .map(|g| json!({ "id": g.id, "name": g.name }))
                    .collect();
                return emit_json(&json!({ "groups": items }));
            }
            if groups.is_empty() {
                println!("No recommendations");
                return Ok(());
            }
            for group in groups {
                println!("{}", group_line(group));
            }
            Ok(())
        }
        other => Err(PiazzaError::InvalidInput(format!(
            "unknown recommendation kind '{other}' (expected users or groups)"
        ))),
    }
}

/// `piazza follow`: follow a user.
pub fn cmd_follow(session: &mut Session, settings: &Settings, user: &str) -> Result<(), PiazzaError> {
    let id = UserId::new(user);
    let changed = session.follow(id.clone());

    if settings.json {
        return emit_json(&json!({ "user": id, "following": true, "changed": changed }));
    }
    if changed {
        println!("Now following {id}");
    } else {
        println!("Already following {id}");
    }
    Ok(())
}

/// `piazza unfollow`: unfollow a user.
pub fn cmd_unfollow(
    session: &mut Session,
    settings: &Settings,
    user: &str,
) -> Result<(), PiazzaError> {
    let id = UserId::new(user);
    let changed = session.unfollow(&id);

    if settings.json {
        return emit_json(&json!({ "user": id, "following": false, "changed": changed }));
    }
    if changed {
        println!("Unfollowed {id}");
    } else {
        println!("Was not following {id}");
    }
    Ok(())
}

/// `piazza requests`: list pending requests, or resolve one.
pub fn cmd_requests(
    session: &mut Session,
    settings: &Settings,
    accept: Option<&str>,
    reject: Option<&str>,
) -> Result<(), PiazzaError> {
    if let Some(user) = accept {
        let id = UserId::new(user);
        let resolved = session.accept_request(&id);
        if settings.json {
            return emit_json(&json!({ "user": id, "accepted": resolved }));
        }
        if resolved {
            println!("Accepted follow request from {id}");
        } else {
            println!("No pending request from {id}");
        }
        return Ok(());
    }

    if let Some(user) = reject {
        let id = UserId::new(user);
        let resolved = session.reject_request(&id);
        if settings.json {
            return emit_json(&json!({ "user": id, "rejected": resolved }));
        }
        if resolved {
            println!("Rejected follow request from {id}");
        } else {
            println!("No pending request from {id}");
        }
        return Ok(());
    }

    let pending = session.connections().requests();
    if settings.json {
        return emit_json(&json!({ "pending_requests": pending }));
    }
    if pending.is_empty() {
        println!("No pending follow requests");
        return Ok(());
    }
    for id in pending {
        println!("{id}");
    }
    Ok(())
}

/// `piazza like`: toggle the viewer's like on a post.
pub fn cmd_like(session: &mut Session, settings: &Settings, post: &str) -> Result<(), PiazzaError> {
    let id = PostId::new(post);
    let found = session.toggle_post_like(&id);
    emit_engagement(session, settings, &id, found)
}

/// `piazza bookmark`: toggle the viewer's bookmark on a post.
pub fn cmd_bookmark(
    session: &mut Session,
    settings: &Settings,
    post: &str,
) -> Result<(), PiazzaError> {
    let id = PostId::new(post);
    let found = session.toggle_post_bookmark(&id);
    emit_engagement(session, settings, &id, found)
}

fn emit_engagement(
    session: &Session,
    settings: &Settings,
    id: &PostId,
    found: bool,
) -> Result<(), PiazzaError> {
    if !found {
        if settings.json {
            return emit_json(&json!({ "post": id, "found": false }));
        }
        println!("No such post: {id}");
        return Ok(());
    }

    // Toggles only succeed on known posts.
    let post = session.store().post(id);
    if settings.json {
        return emit_json(&json!({
            "post": id,
            "found": true,
            "liked": post.map(|p| p.liked),
            "bookmarked": post.map(|p| p.bookmarked),
            "likes": post.map(|p| p.likes_count),
        }));
    }
    if let Some(post) = post {
        println!("{}", post_line(post));
    }
    Ok(())
}

/// `piazza profile`: a user with their posts.
pub fn cmd_profile(session: &Session, settings: &Settings, user: &str) -> Result<(), PiazzaError> {
    let id = UserId::new(user);
    let store = session.store();

    let Some(profile) = store.user(&id) else {
        if settings.json {
            return emit_json(&json!({ "user": id, "found": false }));
        }
        println!("No such user: {id}");
        return Ok(());
    };

    let posts = store.user_posts(&id);
    let following = session.connections().is_following(&id);

    if settings.json {
        let items: Vec<_> = posts.iter().map(|p| post_json(p)).collect();
        return emit_json(&json!({
            "user": profile,
            "found": true,
            "viewer_follows": following,
            "posts": items,
        }));
    }

    println!("{}", user_line(profile));
    println!(
        "  @{} · {} · joined at {}",
        profile.username,
        profile.location,
        profile.joined.secs()
    );
    println!(
        "  followers={} following={} posts={} viewer_follows={}",
        profile.followers_count, profile.following_count, profile.posts_count, following
    );
    for post in posts {
        println!("  {}", post_line(post));
    }
    Ok(())
}
