// ABOUTME: Diagnostic binary listing workout totals and every public workout
// ABOUTME: Prints owner names so sharing issues can be checked without the HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use anyhow::Result;
use clap::Parser;
use liftshare_server::{config::DatabaseUrl, database::Database, logging};

#[derive(Parser)]
#[command(name = "check-public-workouts")]
#[command(about = "Print workout counts and the public workout list")]
pub struct Args {
    /// Database URL (`sqlite:<path>`); defaults to the local database file
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logging::init_from_env()?;

    let url = match args
        .database_url
        .or_else(|| std::env::var("DATABASE_URL").ok())
    {
        Some(url) => DatabaseUrl::parse_url(&url)?,
        None => DatabaseUrl::default(),
    };
    let database = Database::new(&url).await?;
    let workouts = database.workouts();

    let (total, public) = workouts.counts().await?;
    println!("Database: {url}");
    println!("Workouts: {total} total, {public} public");

    let listed = workouts.list_public().await?;
    if listed.is_empty() {
        println!("No public workouts found");
        return Ok(());
    }

    println!();
    for workout in &listed {
        let owner = workout.owner.as_ref().map_or_else(
            || "unknown".to_owned(),
            |o| format!("{} <{}>", o.name, o.email),
        );
        println!(
            "#{} {} | owner: {} | exercises: {} | created: {}",
            workout.id,
            workout.name,
            owner,
            workout.exercises.len(),
            workout.created_at.to_rfc3339()
        );
    }

    Ok(())
}
