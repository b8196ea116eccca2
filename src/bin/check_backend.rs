//! Operator utility that checks the hosted backend connection
//!
//! Prints the same report as `GET /api/diagnostics/connection`.
//! Exits with status 1 when the backend is not reachable.

use site_content::config::Config;
use site_content::content::provider::backend_from_config;
use site_content::diagnostics::{connection_report, ConnectionStatus};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    let backend = backend_from_config(&config.backend);

    println!("Backend Connection Test\n");
    println!(
        "Backend URL:   {}",
        config.backend.url.as_deref().unwrap_or("(not set)")
    );
    println!(
        "Anon Key Set:  {}",
        if config.backend.anon_key_set() { "Yes" } else { "No" }
    );

    let report = connection_report(&config.backend, backend.as_deref()).await;

    println!("\nConnection Status: {}", report.status);
    if let Some(error) = &report.error {
        println!("Error: {}", error);
    }

    if !report.tables.is_empty() {
        println!("\n{:<16} {:>12}  Status", "Table Name", "Record Count");
        for table in &report.tables {
            let status = table.error.as_deref().unwrap_or("Accessible");
            println!(
                "{:<16} {:>12}  {}",
                table.name.as_str(),
                table.record_count,
                status
            );
        }
        if report.all_tables_empty {
            println!("\nAll tables are empty. The site is using built-in fallback content.");
        }
    }

    if report.status != ConnectionStatus::Connected {
        std::process::exit(1);
    }
    Ok(())
}
