//! Compliance-check workflow.
//!
//! `pending -> checking -> approved | rejected`. A new request may be issued
//! from any state and re-enters `checking`. Status only changes through an
//! explicit request or a fresh project load; nothing polls.

use crate::package::ComplianceStatus;

/// Handle for one in-flight compliance request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckTicket {
    seq: u64,
}

/// What a finished compliance request did to the workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Updated(ComplianceStatus),
    Failed(String),
    /// Superseded by a newer request or a reload.
    Stale,
}

#[derive(Debug, Clone, Default)]
pub struct ComplianceWorkflow {
    status: ComplianceStatus,
    checking: bool,
    error: Option<String>,
    seq: u64,
}

impl ComplianceWorkflow {
    pub fn new(status: ComplianceStatus) -> Self {
        Self {
            status,
            ..Default::default()
        }
    }

    /// Last settled status. Unchanged while a check is running.
    pub fn status(&self) -> &ComplianceStatus {
        &self.status
    }

    pub fn is_checking(&self) -> bool {
        self.checking
    }

    /// Action-scoped error from the last failed request.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Label for display: `checking` while a request is outstanding.
    pub fn display_status(&self) -> &str {
        if self.checking {
            "checking"
        } else {
            self.status.as_str()
        }
    }

    pub fn begin_check(&mut self) -> CheckTicket {
        self.seq += 1;
        self.checking = true;
        self.error = None;
        CheckTicket { seq: self.seq }
    }

    /// Apply a response. On failure the prior status is kept.
    pub fn finish_check(
        &mut self,
        ticket: CheckTicket,
        result: Result<ComplianceStatus, String>,
    ) -> CheckOutcome {
        if ticket.seq != self.seq {
            return CheckOutcome::Stale;
        }
        self.checking = false;
        match result {
            Ok(status) => {
                self.status = status.clone();
                CheckOutcome::Updated(status)
            }
            Err(message) => {
                self.error = Some(message.clone());
                CheckOutcome::Failed(message)
            }
        }
    }

    /// Adopt the status from a freshly loaded package.
    pub(crate) fn reset(&mut self, status: ComplianceStatus) {
        self.status = status;
        self.checking = false;
        self.error = None;
        self.seq += 1;
    }
}
