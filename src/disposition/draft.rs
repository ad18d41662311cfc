use serde::{Deserialize, Serialize};

use crate::error::FieldErrors;

/// The three mutually exclusive outcomes of a trial.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DispositionAction {
    #[default]
    Book,
    Decline,
    Followup,
}

/// Extension lengths offered for a follow-up, in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct FollowupDays(u32);

impl FollowupDays {
    pub const ALL: [FollowupDays; 5] = [
        FollowupDays(3),
        FollowupDays(5),
        FollowupDays(7),
        FollowupDays(10),
        FollowupDays(14),
    ];

    pub fn days(self) -> u32 {
        self.0
    }
}

impl TryFrom<u32> for FollowupDays {
    type Error = String;

    fn try_from(days: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|d| d.0 == days)
            .ok_or_else(|| format!("{days} is not an offered follow-up length"))
    }
}

impl From<FollowupDays> for u32 {
    fn from(days: FollowupDays) -> Self {
        days.0
    }
}

/// Payload of `POST clinical/trials/{id}/complete/`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "trial_decision")]
pub enum Disposition {
    #[serde(rename = "BOOK")]
    Book {
        booked_device_inventory: i64,
        booked_device_serial: String,
        completion_notes: String,
    },
    #[serde(rename = "DECLINE")]
    Decline { completion_notes: String },
    #[serde(rename = "TRIAL ACTIVE")]
    Followup {
        next_followup: FollowupDays,
        completion_notes: String,
    },
}

impl Disposition {
    pub fn action(&self) -> DispositionAction {
        match self {
            Self::Book { .. } => DispositionAction::Book,
            Self::Decline { .. } => DispositionAction::Decline,
            Self::Followup { .. } => DispositionAction::Followup,
        }
    }

    /// The `trial_decision` value sent for this outcome.
    pub fn decision_literal(&self) -> &'static str {
        match self {
            Self::Book { .. } => "BOOK",
            Self::Decline { .. } => "DECLINE",
            Self::Followup { .. } => "TRIAL ACTIVE",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookForm {
    pub device_id: Option<i64>,
    pub serial: Option<String>,
    pub notes: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclineForm {
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FollowupForm {
    pub days: Option<FollowupDays>,
    pub reason: String,
}

/// Everything typed into the decision dialog.
///
/// Switching `selected` keeps the other branches' fields so staff can
/// flip between options without retyping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispositionDraft {
    pub selected: DispositionAction,
    pub book: BookForm,
    pub decline: DeclineForm,
    pub followup: FollowupForm,
}

impl DispositionDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_valid(&self) -> bool {
        self.to_disposition().is_ok()
    }

    /// Build the payload for the active branch only.
    pub fn to_disposition(&self) -> Result<Disposition, FieldErrors> {
        let mut errors = FieldErrors::new();
        match self.selected {
            DispositionAction::Book => {
                let serial = self
                    .book
                    .serial
                    .as_deref()
                    .map(str::trim)
                    .filter(|s| !s.is_empty());
                if self.book.device_id.is_none() {
                    errors.add("booked_device_inventory", "Select a device");
                }
                if serial.is_none() {
                    errors.add("booked_device_serial", "Select a serial number");
                }
                match (self.book.device_id, serial) {
                    (Some(device), Some(serial)) if errors.is_empty() => Ok(Disposition::Book {
                        booked_device_inventory: device,
                        booked_device_serial: serial.to_string(),
                        completion_notes: self.book.notes.trim().to_string(),
                    }),
                    _ => Err(errors),
                }
            }
            DispositionAction::Decline => {
                let notes = self.decline.reason.trim();
                if notes.is_empty() {
                    errors.add("completion_notes", "Reason for declining is required");
                    return Err(errors);
                }
                Ok(Disposition::Decline {
                    completion_notes: notes.to_string(),
                })
            }
            DispositionAction::Followup => {
                let notes = self.followup.reason.trim();
                if self.followup.days.is_none() {
                    errors.add("next_followup", "Select a follow-up period");
                }
                if notes.is_empty() {
                    errors.add("completion_notes", "Reason for follow-up is required");
                }
                match self.followup.days {
                    Some(days) if errors.is_empty() => Ok(Disposition::Followup {
                        next_followup: days,
                        completion_notes: notes.to_string(),
                    }),
                    _ => Err(errors),
                }
            }
        }
    }
}
