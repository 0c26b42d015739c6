// lancecheck-core/src/infrastructure/fs.rs

use std::io::Write;
use std::path::Path;
use tracing::info;

use crate::domain::error::DomainError;
use crate::domain::verification::AggregateReport;
use crate::error::CheckError;
use crate::infrastructure::error::InfrastructureError;

/// Writes `content` through a temporary file in the target directory, so
/// readers see either the old file or the complete new one.
pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(
    path: P,
    content: C,
) -> Result<(), InfrastructureError> {
    let path = path.as_ref();
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut temp_file = tempfile::NamedTempFile::new_in(parent).map_err(InfrastructureError::Io)?;

    temp_file
        .write_all(content.as_ref())
        .map_err(InfrastructureError::Io)?;

    temp_file
        .persist(path)
        .map_err(|e| InfrastructureError::Io(e.error))?;

    Ok(())
}

/// Machine-readable copy of the run report, for CI.
pub fn write_json_report(path: &Path, report: &AggregateReport) -> Result<(), CheckError> {
    let json = serde_json::to_string_pretty(report).map_err(DomainError::Encoding)?;
    atomic_write(path, json)?;
    info!(path = ?path, "JSON report written");
    Ok(())
}
