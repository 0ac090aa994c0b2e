//! Partitioning requirements into install batches.

use crate::error::SyncError;
use crate::manifest::Requirement;
use crate::shell::CommandResult;

/// Default number of requirements per installer invocation.
pub const DEFAULT_BATCH_SIZE: usize = 4;

/// A group of requirements installed by one subprocess.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    /// Position of this batch in launch order.
    pub index: usize,

    /// Requirements in manifest order.
    pub requirements: Vec<Requirement>,
}

impl Batch {
    /// Requirement strings handed to the installer.
    pub fn install_args(&self) -> Vec<String> {
        self.requirements.iter().map(Requirement::to_line).collect()
    }

    /// Comma-separated requirement list for logs.
    pub fn describe(&self) -> String {
        self.install_args().join(", ")
    }
}

/// Split `requirements` into consecutive batches of at most `batch_size`.
///
/// Order is preserved within and across batches. A `batch_size` of zero is
/// treated as one.
pub fn partition(requirements: &[Requirement], batch_size: usize) -> Vec<Batch> {
    requirements
        .chunks(batch_size.max(1))
        .enumerate()
        .map(|(index, chunk)| Batch {
            index,
            requirements: chunk.to_vec(),
        })
        .collect()
}

/// How one batch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallResult {
    /// The batch that ran.
    pub batch: Batch,

    /// Installer exit code; `None` when it never started, was killed, or
    /// timed out.
    pub exit_code: Option<i32>,

    /// Whether the installer was killed for exceeding the timeout.
    pub timed_out: bool,

    /// Launch or wait error, if the process could not be observed.
    pub error: Option<String>,
}

impl InstallResult {
    /// Build a result from a finished command.
    pub fn finished(batch: Batch, result: &CommandResult) -> Self {
        Self {
            batch,
            exit_code: result.exit_code,
            timed_out: result.timed_out,
            error: None,
        }
    }

    /// Build a result for a batch whose process could not be run.
    pub fn errored(batch: Batch, error: &SyncError) -> Self {
        Self {
            batch,
            exit_code: None,
            timed_out: false,
            error: Some(error.to_string()),
        }
    }

    /// Whether every requirement in the batch installed.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// The failure as a typed error, or `None` on success.
    pub fn failure(&self) -> Option<SyncError> {
        (!self.success()).then(|| SyncError::BatchInstallFailure {
            packages: self.batch.describe(),
            code: self.exit_code,
        })
    }
}

/// Aggregated outcome of every batch in a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// One result per batch, in batch order.
    pub results: Vec<InstallResult>,
}

impl BatchReport {
    /// Requirements from batches that exited 0.
    pub fn installed(&self) -> Vec<&Requirement> {
        self.collect(true)
    }

    /// Requirements from batches that did not exit 0.
    pub fn failed(&self) -> Vec<&Requirement> {
        self.collect(false)
    }

    fn collect(&self, success: bool) -> Vec<&Requirement> {
        self.results
            .iter()
            .filter(|r| r.success() == success)
            .flat_map(|r| r.batch.requirements.iter())
            .collect()
    }
}
