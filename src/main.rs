//! RDA Tracker
//!
//! An MCP server for daily nutrition logging against RDA targets.

use rmcp::ServiceExt;
use tokio::io::{stdin, stdout};
use tracing_subscriber::EnvFilter;

use rda_tracker::build_info;
use rda_tracker::catalog;
use rda_tracker::config::Config;
use rda_tracker::db;
use rda_tracker::mcp::RdaService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logging goes to stderr; stdout is the MCP transport
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("rda_tracker=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    build_info::print_startup_banner(catalog::foods().len(), catalog::profiles().len());
    eprintln!("Starting MCP server on stdio...");

    let config = Config::from_env();
    eprintln!("Database path: {}", config.database_path.display());

    // Fail fast on a misconfigured default profile
    catalog::require_profile(&config.default_profile)?;

    if let Some(parent) = config.database_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    eprintln!("Initializing database...");
    let database = db::Database::new(&config.database_path)?;

    database.with_conn(|conn| {
        db::migrations::run_migrations(conn)?;
        let version = db::migrations::get_schema_version(conn)?;
        eprintln!("Database schema version: {}", version);
        Ok(())
    })?;

    let service = RdaService::new(&config, database);

    let server = service.serve((stdin(), stdout())).await?;
    server.waiting().await?;

    Ok(())
}
