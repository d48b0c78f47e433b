// ABOUTME: Liftshare API server binary
// ABOUTME: Loads configuration, prepares the database and catalog, and serves HTTP until shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Liftshare Server Binary
//!
//! Reads configuration from the environment; `--port` and `--database-url`
//! override the corresponding variables.

use anyhow::Result;
use clap::Parser;
use liftshare_server::{
    config::{DatabaseUrl, ServerConfig},
    database::{seed::seed_exercises, Database},
    logging,
    resources::ServerResources,
    server::LiftshareServer,
};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "liftshare-server")]
#[command(about = "Liftshare - workout building and sharing API")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    port: Option<u16>,

    /// Override database URL (`sqlite:<path>` or `sqlite::memory:`)
    #[arg(long)]
    database_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_from_env()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(port) = args.port {
        config.http_port = port;
    }
    if let Some(url) = args.database_url.as_deref() {
        config.database.url = DatabaseUrl::parse_url(url)?;
    }
    config.validate()?;
    info!("{}", config.summary());

    let database = Database::new(&config.database.url).await?;
    info!("Database ready: {}", config.database.url);

    if config.database.seed_exercises {
        let inserted = seed_exercises(&database.exercises()).await?;
        info!("Exercise catalog checked, {} new entries", inserted);
    }

    let resources = Arc::new(ServerResources::new(database, Arc::new(config)));
    let server = LiftshareServer::new(resources);

    display_available_endpoints(&server);

    if let Err(e) = server.run().await {
        error!("Server error: {:#}", e);
        return Err(e);
    }

    Ok(())
}

/// Log the public endpoint list
fn display_available_endpoints(server: &LiftshareServer) {
    let config = &server.resources().config;
    let base = format!("http://{}:{}", config.host, config.http_port);

    info!("=== Available API Endpoints ===");
    info!("Auth:      POST {base}/api/auth/register, POST {base}/api/auth/login");
    info!("Session:   GET  {base}/api/auth/me, PUT {base}/api/auth/change-password");
    info!("Exercises: GET/POST {base}/api/exercises, GET {base}/api/exercises/:id");
    info!("Workouts:  GET/POST {base}/api/workouts, GET/PUT/DELETE {base}/api/workouts/:id");
    info!("Public:    GET  {base}/api/workouts/public/list, POST {base}/api/workouts/public/:id/save");
    info!("Profile:   GET/PUT {base}/api/profile");
    info!("Uploads:   POST {base}/api/upload, GET {base}/uploads/<file>");
    info!("Health:    GET  {base}/api/health");
}
