// src/output/types.rs
//! Immutable descriptions of output operations and their outcomes.

use std::path::PathBuf;

/// An ordered list of deliveries to perform.
#[derive(Debug, Clone, Default)]
pub struct OutputPlan {
    pub operations: Vec<DeliveryTarget>,
}

impl OutputPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_operation(mut self, operation: DeliveryTarget) -> Self {
        self.operations.push(operation);
        self
    }

    /// Writes `content` to `output_file`, or prints it when no file is given.
    pub fn for_content(content: String, output_file: Option<PathBuf>) -> Self {
        let target = match output_file {
            Some(path) => DeliveryTarget::WriteFile { path, content },
            None => DeliveryTarget::PrintToStdout { content },
        };
        Self::new().with_operation(target)
    }
}

/// A single output operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryTarget {
    WriteFile { path: PathBuf, content: String },
    PrintToStdout { content: String },
}

/// Result of executing an output plan.
#[derive(Debug, Clone, Default)]
pub struct OutputReport {
    pub completed: Vec<CompletedOperation>,
    pub failed: Vec<FailedOperation>,
    pub stats: ExecutionStats,
}

impl OutputReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_completed(mut self, operation: CompletedOperation) -> Self {
        self.stats.operations_completed += 1;
        self.stats.bytes_written += operation.bytes_written;
        self.completed.push(operation);
        self
    }

    pub fn with_failed(mut self, operation: FailedOperation) -> Self {
        self.stats.operations_failed += 1;
        self.failed.push(operation);
        self
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }

    /// Error messages of the failed operations.
    pub fn failures(&self) -> Vec<String> {
        self.failed.iter().map(|f| f.error.clone()).collect()
    }
}

#[derive(Debug, Clone)]
pub struct CompletedOperation {
    pub operation: DeliveryTarget,
    pub bytes_written: usize,
    pub duration_ms: u64,
}

#[derive(Debug, Clone)]
pub struct FailedOperation {
    pub operation: DeliveryTarget,
    pub error: String,
}

#[derive(Debug, Clone, Default)]
pub struct ExecutionStats {
    pub operations_completed: usize,
    pub operations_failed: usize,
    pub bytes_written: usize,
    pub total_duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_goes_to_file_when_path_given() {
        let plan = OutputPlan::for_content("{}".into(), Some(PathBuf::from("deck.json")));
        assert_eq!(
            plan.operations,
            vec![DeliveryTarget::WriteFile {
                path: PathBuf::from("deck.json"),
                content: "{}".into()
            }]
        );
    }

    #[test]
    fn content_goes_to_stdout_otherwise() {
        let plan = OutputPlan::for_content("{}".into(), None);
        assert_eq!(
            plan.operations,
            vec![DeliveryTarget::PrintToStdout {
                content: "{}".into()
            }]
        );
    }
}
