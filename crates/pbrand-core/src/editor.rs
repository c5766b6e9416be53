//! Per-field edit/save state machines.
//!
//! Each editable brand-package field (brand name, slogan, leaflet body) gets
//! its own [`FieldEditor`]:
//!
//! ```text
//! clean --input--> editing --save--> saving --ok--> clean
//!                     ^                 |
//!                     +-----error-------+
//! ```
//!
//! Every submission carries the editor's generation at submit time. A
//! response whose generation is no longer current is stale and is dropped,
//! so a slow earlier save can never overwrite a later one.

use serde::{Deserialize, Serialize};

use crate::error::{BrandError, BrandResult};
use crate::package::PackageField;

/// Editor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorState {
    Clean,
    Editing,
    Saving,
}

impl EditorState {
    /// Convert to string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clean => "clean",
            Self::Editing => "editing",
            Self::Saving => "saving",
        }
    }
}

/// A value handed to the backend, tagged with the generation it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub field: PackageField,
    pub generation: u64,
    pub value: String,
}

/// What happened when a save response was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Saved,
    Failed(String),
    /// A newer submission (or a reload) superseded this one.
    Stale,
}

/// Edit/save unit for a single brand-package field.
#[derive(Debug, Clone)]
pub struct FieldEditor {
    field: PackageField,
    value: String,
    confirmed: String,
    state: EditorState,
    error: Option<String>,
    generation: u64,
}

impl FieldEditor {
    /// Create a clean editor whose working and confirmed values are `confirmed`.
    pub fn new(field: PackageField, confirmed: impl Into<String>) -> Self {
        let confirmed = confirmed.into();
        Self {
            field,
            value: confirmed.clone(),
            confirmed,
            state: EditorState::Clean,
            error: None,
            generation: 0,
        }
    }

    pub fn field(&self) -> PackageField {
        self.field
    }

    /// Working value as typed.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Last value acknowledged by the backend.
    pub fn confirmed(&self) -> &str {
        &self.confirmed
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    /// Field-scoped error from the last failed save.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_dirty(&self) -> bool {
        self.value != self.confirmed
    }

    /// True only when the displayed value is the one the backend acknowledged.
    pub fn is_saved(&self) -> bool {
        self.state == EditorState::Clean && self.error.is_none() && !self.is_dirty()
    }

    pub fn can_save(&self) -> bool {
        self.state != EditorState::Saving
    }

    /// Apply a keystroke. The typed text is always kept.
    pub fn input(&mut self, text: impl Into<String>) {
        self.value = text.into();
        if self.state == EditorState::Saving {
            return;
        }
        if self.is_dirty() {
            self.state = EditorState::Editing;
        } else {
            self.state = EditorState::Clean;
            self.error = None;
        }
    }

    /// Explicit save action. Rejected while a save is already in flight.
    pub fn begin_save(&mut self) -> BrandResult<Submission> {
        if !self.can_save() {
            return Err(BrandError::SaveInProgress(self.field));
        }
        let value = self.value.clone();
        Ok(self.submit(value))
    }

    /// Submit `value`, superseding any submission still in flight.
    pub fn submit(&mut self, value: String) -> Submission {
        self.generation += 1;
        self.value = value.clone();
        self.state = EditorState::Saving;
        self.error = None;
        Submission {
            field: self.field,
            generation: self.generation,
            value,
        }
    }

    /// Apply the backend's answer to `submission`.
    pub fn resolve(&mut self, submission: &Submission, outcome: Result<(), String>) -> Resolution {
        if submission.field != self.field || submission.generation != self.generation {
            return Resolution::Stale;
        }
        match outcome {
            Ok(()) => {
                self.confirmed = submission.value.clone();
                self.error = None;
                self.state = if self.is_dirty() {
                    EditorState::Editing
                } else {
                    EditorState::Clean
                };
                Resolution::Saved
            }
            Err(message) => {
                self.state = EditorState::Editing;
                self.error = Some(message.clone());
                Resolution::Failed(message)
            }
        }
    }

    /// Reset to freshly loaded server state. In-flight submissions go stale.
    pub(crate) fn reseed(&mut self, confirmed: impl Into<String>) {
        let confirmed = confirmed.into();
        self.value = confirmed.clone();
        self.confirmed = confirmed;
        self.state = EditorState::Clean;
        self.error = None;
        self.generation += 1;
    }
}
