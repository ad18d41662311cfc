//! Trial disposition: the staff decision that closes (or extends) a
//! hearing-aid trial.
//!
//! [`DispositionDraft`] holds the three per-branch forms while the
//! dialog is open; only the active branch is turned into a
//! [`Disposition`] on submit. [`TrialDesk`] drives the dialog against
//! the backend.

mod draft;
mod workflow;

pub use draft::{
    BookForm, DeclineForm, Disposition, DispositionAction, DispositionDraft, FollowupDays,
    FollowupForm,
};
pub use workflow::{FailurePolicy, TrialDesk};

use thiserror::Error;

use crate::error::{ClientError, FieldErrors};

#[derive(Debug, Error)]
pub enum DispositionError {
    #[error("No trial is open for a decision")]
    NoOpenDialog,

    #[error("Invalid disposition: {0}")]
    Validation(FieldErrors),

    #[error(transparent)]
    Client(#[from] ClientError),
}

impl DispositionError {
    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::Client(err) => err.field_errors(),
            Self::NoOpenDialog => None,
        }
    }
}
