//! # View Engine Benchmarks
//!
//! Performance benchmarks for piazza-core derived views.
//!
//! Run with: `cargo bench -p piazza-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use piazza_core::seed::SEED_EPOCH;
use piazza_core::types::{Post, PostId, Timestamp, User, UserId};
use piazza_core::views::{self, EventFilter};
use piazza_core::{EntityStore, GroupId, SeedData};
use std::hint::black_box;

/// Store with N synthetic posts and users layered over the demo seed.
fn scaled_store(size: usize) -> EntityStore {
    let mut seed = SeedData::demo();

    for i in 0..size {
        let id = format!("bench-user-{i}");
        seed.users.push(User {
            id: UserId::new(&id),
            username: id.clone(),
            email: format!("{id}@example.com"),
            display_name: id.clone(),
            avatar: String::new(),
            bio: String::new(),
            location: String::new(),
            website: None,
            followers_count: 0,
            following_count: 0,
            posts_count: 0,
            verified: false,
            joined: SEED_EPOCH,
        });
        seed.posts.push(Post {
            id: PostId::new(format!("bench-post-{i}")),
            content: String::new(),
            author: seed.users[0].clone(),
            group: None,
            attachments: Vec::new(),
            likes_count: (i as u64) % 97,
            comments_count: (i as u64) % 13,
            shares_count: (i as u64) % 7,
            liked: false,
            bookmarked: false,
            created: Timestamp::new(i as i64),
        });
    }

    let mut store = EntityStore::new();
    store.initialize(seed);
    store
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_trending(c: &mut Criterion) {
    let mut group = c.benchmark_group("trending_posts");

    for size in [100, 1000, 10000].iter() {
        let store = scaled_store(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(views::trending_posts(&store)));
        });
    }

    group.finish();
}

fn bench_group_members(c: &mut Criterion) {
    let mut group = c.benchmark_group("group_members");
    let target = GroupId::new("group-trailheads");

    for size in [100, 1000, 10000].iter() {
        let store = scaled_store(*size);

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| black_box(views::group_members(&store, &target)));
        });
    }

    group.finish();
}

fn bench_events_view(c: &mut Criterion) {
    let mut group = c.benchmark_group("events_view");
    let store = scaled_store(0);

    for filter in [EventFilter::Upcoming, EventFilter::Past] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{filter:?}")),
            &filter,
            |b, &filter| {
                b.iter(|| black_box(views::events_view(&store, filter, SEED_EPOCH)));
            },
        );
    }

    group.finish();
}

fn bench_search_groups(c: &mut Criterion) {
    let store = scaled_store(0);

    c.bench_function("search_groups", |b| {
        b.iter(|| black_box(views::search_groups(&store, "sketch", None)));
    });
}

criterion_group!(
    benches,
    bench_trending,
    bench_group_members,
    bench_events_view,
    bench_search_groups,
);

criterion_main!(benches);
