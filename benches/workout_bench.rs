// ABOUTME: Criterion benchmarks for workout listing and forking against in-memory SQLite
// ABOUTME: Measures owner listing, public listing with owners, and fork transaction latency
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the workout store.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use liftshare_server::config::DatabaseUrl;
use liftshare_server::database::{
    seed::seed_exercises, CreateWorkoutRequest, Database, ExerciseLinkRequest, NewUser,
};
use tokio::runtime::Runtime;

const BENCH_BCRYPT_COST: u32 = 4;

async fn create_user(db: &Database, email: &str) -> i64 {
    let new_user = NewUser {
        email: email.to_owned(),
        password: Some("benchmark-password".to_owned()),
        name: "Bench".to_owned(),
        google_id: None,
    };
    db.users().create(&new_user, BENCH_BCRYPT_COST).await.unwrap().id
}

fn workout_request(index: usize, is_public: bool) -> CreateWorkoutRequest {
    let exercises = (1..=5)
        .map(|exercise_id| ExerciseLinkRequest {
            exercise_id,
            sets: Some(3),
            reps: Some("8-12".to_owned()),
            order: None,
            notes: None,
        })
        .collect();
    CreateWorkoutRequest {
        name: Some(format!("Workout {index}")),
        description: Some("Benchmark workout".to_owned()),
        is_public: Some(is_public),
        exercises: Some(exercises),
    }
}

/// Database with a seeded catalog and one owner holding `count` workouts
async fn populated_db(count: usize) -> (Database, i64, Vec<i64>) {
    let db = Database::new(&DatabaseUrl::Memory).await.unwrap();
    seed_exercises(&db.exercises()).await.unwrap();
    let owner = create_user(&db, "owner@bench.test").await;

    let mut ids = Vec::with_capacity(count);
    for index in 0..count {
        let workout = db
            .workouts()
            .create(owner, &workout_request(index, index % 2 == 0))
            .await
            .unwrap();
        ids.push(workout.id);
    }
    (db, owner, ids)
}

fn bench_list_own(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let mut group = c.benchmark_group("workouts_list_own");

    for count in [10, 100] {
        let (db, owner, _) = rt.block_on(populated_db(count));
        group.bench_with_input(BenchmarkId::from_parameter(count), &owner, |b, &owner| {
            b.to_async(&rt)
                .iter(|| async { db.workouts().list_own(black_box(owner)).await.unwrap() });
        });
    }

    group.finish();
}

fn bench_list_public(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let (db, _, _) = rt.block_on(populated_db(100));

    c.bench_function("workouts_list_public_100", |b| {
        b.to_async(&rt)
            .iter(|| async { db.workouts().list_public().await.unwrap() });
    });
}

fn bench_fork(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let (db, _, ids) = rt.block_on(populated_db(10));
    let forker = rt.block_on(create_user(&db, "forker@bench.test"));
    let source = ids[0];

    c.bench_function("workouts_fork_public", |b| {
        b.to_async(&rt).iter(|| async {
            db.workouts()
                .fork_public(black_box(forker), black_box(source))
                .await
                .unwrap()
        });
    });
}

criterion_group!(benches, bench_list_own, bench_list_public, bench_fork);
criterion_main!(benches);
