//! # Piazza CLI Module
//!
//! This module implements the CLI interface for the Piazza demo client.
//!
//! ## Available Commands
//!
//! - `init` - Seed the demo database
//! - `status` - Show store and connection counts
//! - `feed` - Show posts, optionally filtered by author or group
//! - `trending` - Show the trending posts and topics
//! - `events` - List events by filter (upcoming/attending/past/virtual)
//! - `groups` - Search groups by text and category
//! - `members` - Show the member sample for a group
//! - `attendees` - Show the attendee sample for an event
//! - `recommend` - Show recommended users or groups for the viewer
//! - `follow` / `unfollow` - Manage who the viewer follows
//! - `requests` - List, accept, or reject pending follow requests
//! - `like` / `bookmark` - Toggle engagement on a post
//! - `profile` - Show a user profile with their posts

pub mod commands;
pub mod config;

use clap::{Parser, Subcommand};
use config::Settings;
use piazza_core::{PiazzaError, Session, StorageBackend};
use std::path::PathBuf;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Piazza - Social Demo Client
///
/// A deterministic, single-user social-networking demo core.
/// All data is synthetic; only connection state persists across sessions.
#[derive(Parser, Debug)]
#[command(name = "piazza")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the slot database (overrides piazza.toml)
    #[arg(short = 'D', long, global = true)]
    pub database: Option<PathBuf>,

    /// Storage backend: "redb" (durable) or "memory" (volatile)
    #[arg(short = 'B', long, global = true)]
    pub backend: Option<String>,

    /// Viewer user id used for recommendations (overrides piazza.toml)
    #[arg(short = 'U', long, global = true)]
    pub viewer: Option<String>,

    /// Path to the config file (defaults to ./piazza.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Seed the demo database
    Init {
        /// Re-seed even if already initialized
        #[arg(short, long)]
        force: bool,
    },

    /// Show store and connection counts
    Status,

    /// Show posts, optionally filtered by author or group
    Feed {
        /// Only posts authored by this user id
        #[arg(short, long)]
        user: Option<String>,

        /// Only posts associated with this group id
        #[arg(short, long)]
        group: Option<String>,
    },

    /// Show trending posts and topics
    Trending,

    /// List events
    Events {
        /// Event filter (upcoming, attending, past, virtual)
        #[arg(short, long, default_value = "upcoming")]
        filter: String,
    },

    /// Search groups
    Groups {
        /// Case-insensitive substring over name, description, and tags
        #[arg(short = 'Q', long)]
        query: Option<String>,

        /// Category filter (technology, creative, sports, food, social)
        #[arg(short = 'C', long)]
        category: Option<String>,
    },

    /// Show the member sample for a group
    Members {
        /// Group id
        group: String,
    },

    /// Show the attendee sample for an event
    Attendees {
        /// Event id
        event: String,
    },

    /// Show recommendations for the viewer
    Recommend {
        /// What to recommend (users, groups)
        #[arg(short, long, default_value = "users")]
        kind: String,
    },

    /// Follow a user
    Follow {
        /// User id
        user: String,
    },

    /// Unfollow a user
    Unfollow {
        /// User id
        user: String,
    },

    /// List, accept, or reject pending follow requests
    Requests {
        /// Accept the pending request from this user id
        #[arg(long)]
        accept: Option<String>,

        /// Reject the pending request from this user id
        #[arg(long)]
        reject: Option<String>,
    },

    /// Toggle the viewer's like on a post
    Like {
        /// Post id
        post: String,
    },

    /// Toggle the viewer's bookmark on a post
    Bookmark {
        /// Post id
        post: String,
    },

    /// Show a user profile with their posts
    Profile {
        /// User id
        user: String,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), PiazzaError> {
    let file = config::Config::load(cli.config.as_deref())?;
    let settings = Settings::resolve(&cli, &file)?;
    let mut session = open_session(&settings)?;

    match cli.command {
        Some(Commands::Init { force }) => commands::cmd_init(&mut session, &settings, force),
        Some(Commands::Feed { user, group }) => {
            commands::cmd_feed(&session, &settings, user.as_deref(), group.as_deref())
        }
        Some(Commands::Trending) => commands::cmd_trending(&session, &settings),
        Some(Commands::Events { filter }) => commands::cmd_events(&session, &settings, &filter),
        Some(Commands::Groups { query, category }) => commands::cmd_groups(
            &session,
            &settings,
            query.as_deref().unwrap_or(""),
            category.as_deref(),
        ),
        Some(Commands::Members { group }) => commands::cmd_members(&session, &settings, &group),
        Some(Commands::Attendees { event }) => {
            commands::cmd_attendees(&session, &settings, &event)
        }
        Some(Commands::Recommend { kind }) => commands::cmd_recommend(&session, &settings, &kind),
        Some(Commands::Follow { user }) => commands::cmd_follow(&mut session, &settings, &user),
        Some(Commands::Unfollow { user }) => {
            commands::cmd_unfollow(&mut session, &settings, &user)
        }
        Some(Commands::Requests { accept, reject }) => commands::cmd_requests(
            &mut session,
            &settings,
            accept.as_deref(),
            reject.as_deref(),
        ),
        Some(Commands::Like { post }) => commands::cmd_like(&mut session, &settings, &post),
        Some(Commands::Bookmark { post }) => {
            commands::cmd_bookmark(&mut session, &settings, &post)
        }
        Some(Commands::Profile { user }) => commands::cmd_profile(&session, &settings, &user),
        Some(Commands::Status) | None => commands::cmd_status(&session, &settings),
    }
}

/// Open a session against the configured backend.
fn open_session(settings: &Settings) -> Result<Session, PiazzaError> {
    match settings.backend {
        config::BackendKind::Redb => Session::open(&settings.database),
        config::BackendKind::Memory => Ok(Session::with_backend(StorageBackend::default())),
    }
}
