//! Step runner for install and uninstall reconciliation.
//!
//! Steps are independent: each computes current state, mutates only when
//! needed, and reports what happened. A failing step is recorded and the
//! driver moves on — there is no rollback, and re-running the command is
//! the recovery mechanism because every step is idempotent.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// What a reconciliation step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// The step mutated state to reach the target.
    Changed,
    /// The target state was already in place; nothing was written.
    AlreadyConfigured,
    /// The user declined the step, or a precondition made it a no-op.
    Skipped,
    /// The step failed; later steps still ran.
    Failed,
}

impl StepStatus {
    /// Short human label used by the CLI formatters.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Changed => "done",
            Self::AlreadyConfigured => "already configured",
            Self::Skipped => "skipped",
            Self::Failed => "failed",
        }
    }
}

/// The non-failure result of one step.
#[derive(Debug, Clone)]
pub struct Outcome {
    pub status: StepStatus,
    pub detail: Option<String>,
}

impl Outcome {
    /// The step mutated state.
    pub fn changed(detail: impl Into<String>) -> Self {
        Self {
            status: StepStatus::Changed,
            detail: Some(detail.into()),
        }
    }

    /// The step found its target already satisfied.
    pub fn already(detail: impl Into<String>) -> Self {
        Self {
            status: StepStatus::AlreadyConfigured,
            detail: Some(detail.into()),
        }
    }

    /// The step was declined or not applicable.
    pub fn skipped(detail: impl Into<String>) -> Self {
        Self {
            status: StepStatus::Skipped,
            detail: Some(detail.into()),
        }
    }
}

/// Record of one executed step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
    /// Step name, stable across runs.
    pub name: String,
    /// What happened.
    pub status: StepStatus,
    /// Human-oriented detail (error text for failed steps).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Runs steps in order, accumulating reports and continuing past failures.
#[derive(Debug, Default)]
pub struct Driver {
    reports: Vec<StepReport>,
}

impl Driver {
    /// Create an empty driver.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run one step and record its report. Errors become `Failed` reports;
    /// the driver never propagates them.
    pub fn run_step(&mut self, name: &str, step: impl FnOnce() -> Result<Outcome>) {
        let report = match step() {
            Ok(outcome) => StepReport {
                name: name.to_string(),
                status: outcome.status,
                detail: outcome.detail,
            },
            Err(err) => {
                tracing::warn!(step = name, error = %err, "step failed, continuing");
                StepReport {
                    name: name.to_string(),
                    status: StepStatus::Failed,
                    detail: Some(err.to_string()),
                }
            }
        };
        self.reports.push(report);
    }

    /// Whether any step failed so far.
    pub fn has_failures(&self) -> bool {
        self.reports
            .iter()
            .any(|r| r.status == StepStatus::Failed)
    }

    /// Reports accumulated so far.
    pub fn reports(&self) -> &[StepReport] {
        &self.reports
    }

    /// Consume the driver, yielding all reports.
    pub fn into_reports(self) -> Vec<StepReport> {
        self.reports
    }
}
