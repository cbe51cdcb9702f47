// src/output/writer.rs
//! Executes output operations by performing actual I/O.
//!
//! This module is the only place where file I/O operations occur,
//! keeping the rest of the codebase pure and testable.

use super::types::*;
use crate::error::AppError;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Delivers the output plan, performing all I/O operations.
pub fn deliver(plan: OutputPlan) -> Result<OutputReport, AppError> {
    let mut report = OutputReport::new();
    let start_time = Instant::now();

    log::debug!(
        "Executing output plan with {} operations",
        plan.operations.len()
    );

    for operation in plan.operations {
        let op_start = Instant::now();
        match execute_operation(&operation) {
            Ok(bytes_written) => {
                let duration_ms = op_start.elapsed().as_millis() as u64;
                report = report.with_completed(CompletedOperation {
                    operation,
                    bytes_written,
                    duration_ms,
                });
            }
            Err(e) => {
                log::error!("Operation failed: {}", e);
                report = report.with_failed(FailedOperation {
                    operation,
                    error: e.to_string(),
                });
            }
        }
    }

    report.stats.total_duration_ms = start_time.elapsed().as_millis() as u64;

    log::debug!(
        "Output plan execution complete: {} succeeded, {} failed in {}ms",
        report.stats.operations_completed,
        report.stats.operations_failed,
        report.stats.total_duration_ms
    );

    Ok(report)
}

fn execute_operation(operation: &DeliveryTarget) -> Result<usize, AppError> {
    match operation {
        DeliveryTarget::WriteFile { path, content } => write_file(path, content),
        DeliveryTarget::PrintToStdout { content } => {
            print_to_stdout(content)?;
            Ok(content.len())
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<usize, AppError> {
    log::debug!("Writing {} bytes to {}", content.len(), path.display());

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;

    log::info!("Wrote file: {}", path.display());
    Ok(content.len())
}

fn print_to_stdout(content: &str) -> Result<(), AppError> {
    println!("{}", content);
    std::io::stdout().flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_file_and_reports_bytes() {
        let dir = std::env::temp_dir().join(format!("topic2slides-{}", uuid::Uuid::new_v4()));
        let path = dir.join("nested").join("deck.json");

        let plan = OutputPlan::new().with_operation(DeliveryTarget::WriteFile {
            path: path.clone(),
            content: "{\"slides\":[]}".to_string(),
        });
        let report = deliver(plan).unwrap();

        assert!(report.is_success());
        assert_eq!(report.stats.bytes_written, 13);
        assert_eq!(fs::read_to_string(&path).unwrap(), "{\"slides\":[]}");

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn failures_are_collected_not_raised() {
        let dir = std::env::temp_dir().join(format!("topic2slides-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();

        // Writing to a path that is a directory fails.
        let plan = OutputPlan::new().with_operation(DeliveryTarget::WriteFile {
            path: dir.clone(),
            content: "x".to_string(),
        });
        let report = deliver(plan).unwrap();

        assert!(!report.is_success());
        assert_eq!(report.failures().len(), 1);

        fs::remove_dir_all(dir).unwrap();
    }
}
