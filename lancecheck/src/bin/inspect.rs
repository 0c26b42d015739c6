// lancecheck/src/bin/inspect.rs
//
// Prints the schema, statistics and first rows of a Lance dataset, as the
// pglance functions would report them.

use lancecheck_core::infrastructure::adapters::NativeLanceInterface;
use lancecheck_core::ports::connector::QueryInterface;
use miette::{IntoDiagnostic, Result};
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let Some(path) = args.next() else {
        return Err(miette::miette!(
            "Usage: lancecheck-inspect <dataset path> [limit]"
        ));
    };
    let limit: u32 = match args.next() {
        Some(raw) => raw.parse().into_diagnostic()?,
        None => 5,
    };

    if !Path::new(&path).exists() {
        return Err(miette::miette!(
            "❌ Dataset not found at: {}\n👉 Have you run 'lancecheck generate'?",
            path
        ));
    }

    let interface = NativeLanceInterface::new();

    println!("\n🔍 Inspecting Dataset: '{}'", path);
    for column in interface.table_info(&path).await? {
        let nullable = if column.is_nullable { "" } else { " not null" };
        println!("   {}: {}{}", column.name, column.data_type, nullable);
    }

    let stats = interface.table_stats(&path).await?;
    println!(
        "   Version {} | {} rows | {} columns",
        stats.version, stats.num_rows, stats.num_columns
    );

    println!("   --- Rows (Limit {}) ---", limit);
    for row in interface.scan_rows(&path, limit).await? {
        println!("   ➜ {}", row);
    }

    interface.close().await?;
    Ok(())
}
