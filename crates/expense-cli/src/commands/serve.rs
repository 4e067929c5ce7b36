//! Server command implementation

use std::path::Path;

use anyhow::{Context, Result};
use expense_core::RuleSet;
use expense_server::ServerConfig;

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    rules: RuleSet,
    host: &str,
    port: u16,
    static_dir: Option<&Path>,
) -> Result<()> {
    println!("🚀 Starting expense tracker web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);
    println!("   Classification rules: {}", rules.len());
    if let Some(dir) = static_dir {
        println!("   Static files: {}", dir.display());
    }

    let config = ServerConfig::from_env();
    if config.allowed_origins.is_empty() {
        println!("   CORS: same-origin only");
    } else {
        println!("   CORS: {}", config.allowed_origins.join(", "));
    }

    let db = open_db(db_path)?;

    let static_dir = static_dir
        .map(|d| d.to_str().context("Static dir path is not valid UTF-8"))
        .transpose()?;

    expense_server::serve_with_config(db, rules, host, port, static_dir, config).await
}
