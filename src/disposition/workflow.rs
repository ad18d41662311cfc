use std::sync::Arc;

use crate::busy::LoadingCounter;
use crate::error::{ClientError, FieldErrors};
use crate::listing::PagedList;
use crate::models::{Ack, DeviceOption, TrialDevice};
use crate::notify::Notifier;
use crate::services::{inventory, trials};
use crate::transport::Transport;

use super::draft::{DispositionAction, DispositionDraft, FollowupDays};
use super::{Disposition, DispositionError};

const TRIAL_LIST_FAILED: &str = "Failed to fetch active trial device list";
const DEVICE_LIST_FAILED: &str = "Failed to fetch device list";
const SERIAL_LIST_FAILED: &str = "Failed to fetch serial list of selected device";
const COMPLETED: &str = "Trial completed successfully";

/// What happens to the open dialog when the backend rejects a submit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Keep the dialog open with everything the user entered.
    #[default]
    KeepOpen,
    /// Close the dialog and discard the draft.
    CloseDialog,
}

/// Active-trial table plus the "Complete Trial" decision dialog.
pub struct TrialDesk {
    transport: Arc<dyn Transport>,
    notifier: Arc<dyn Notifier>,
    loading: LoadingCounter,
    policy: FailurePolicy,
    trials: PagedList<TrialDevice>,
    devices: Vec<DeviceOption>,
    serials: Vec<String>,
    dialog: Option<TrialDevice>,
    draft: DispositionDraft,
}

impl TrialDesk {
    pub fn new(transport: Arc<dyn Transport>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            transport,
            notifier,
            loading: LoadingCounter::new(),
            policy: FailurePolicy::default(),
            trials: PagedList::new(),
            devices: Vec::new(),
            serials: Vec::new(),
            dialog: None,
            draft: DispositionDraft::new(),
        }
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Share a page-wide busy counter instead of a private one.
    pub fn with_loading(mut self, loading: LoadingCounter) -> Self {
        self.loading = loading;
        self
    }

    pub fn trials(&self) -> &PagedList<TrialDevice> {
        &self.trials
    }

    pub fn devices(&self) -> &[DeviceOption] {
        &self.devices
    }

    /// Serials of the device currently selected in the BOOK branch.
    pub fn serials(&self) -> &[String] {
        &self.serials
    }

    /// The trial the dialog is open for, if any.
    pub fn dialog(&self) -> Option<&TrialDevice> {
        self.dialog.as_ref()
    }

    pub fn is_dialog_open(&self) -> bool {
        self.dialog.is_some()
    }

    pub fn draft(&self) -> &DispositionDraft {
        &self.draft
    }

    pub fn loading(&self) -> &LoadingCounter {
        &self.loading
    }

    // ═══════════════════════════════════════════
    // Trial list
    // ═══════════════════════════════════════════

    /// Fetch the active trials at the current page.
    pub fn refresh(&mut self) -> Result<(), ClientError> {
        let _busy = self.loading.begin();
        let transport = Arc::clone(&self.transport);
        match self
            .trials
            .load(|page| trials::list_active_trials(transport.as_ref(), page))
        {
            Ok(()) => {
                tracing::debug!(
                    page = self.trials.current_page(),
                    count = self.trials.items().len(),
                    "Active trials loaded"
                );
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Active trial fetch failed");
                self.notifier.error(TRIAL_LIST_FAILED);
                Err(e)
            }
        }
    }

    /// Move forward one page and fetch it. `Ok(false)` on the last page.
    pub fn next_page(&mut self) -> Result<bool, ClientError> {
        if !self.trials.next() {
            return Ok(false);
        }
        self.refresh_or_step_back(|list| {
            list.prev();
        })
    }

    /// Move back one page and fetch it. `Ok(false)` on the first page.
    pub fn prev_page(&mut self) -> Result<bool, ClientError> {
        if !self.trials.prev() {
            return Ok(false);
        }
        self.refresh_or_step_back(|list| {
            list.next();
        })
    }

    fn refresh_or_step_back(
        &mut self,
        undo: impl FnOnce(&mut PagedList<TrialDevice>),
    ) -> Result<bool, ClientError> {
        match self.refresh() {
            Ok(()) => Ok(true),
            Err(e) => {
                undo(&mut self.trials);
                Err(e)
            }
        }
    }

    /// Fill the booking dropdown with sellable devices.
    pub fn load_devices(&mut self) -> Result<(), ClientError> {
        let _busy = self.loading.begin();
        match inventory::list_bookable_devices(self.transport.as_ref()) {
            Ok(devices) => {
                self.devices = devices;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Device list fetch failed");
                self.notifier.error(DEVICE_LIST_FAILED);
                Err(e)
            }
        }
    }

    // ═══════════════════════════════════════════
    // Decision dialog
    // ═══════════════════════════════════════════

    /// Open the dialog for `trial` with a fresh draft on BOOK.
    pub fn open_decision_dialog(&mut self, trial: TrialDevice) {
        tracing::debug!(trial_id = trial.id, "Decision dialog opened");
        self.draft.reset();
        self.serials.clear();
        self.dialog = Some(trial);
    }

    /// Close the dialog and discard the draft.
    pub fn close_dialog(&mut self) {
        self.dialog = None;
        self.draft.reset();
        self.serials.clear();
    }

    fn draft_mut(&mut self) -> Result<&mut DispositionDraft, DispositionError> {
        if self.dialog.is_none() {
            return Err(DispositionError::NoOpenDialog);
        }
        Ok(&mut self.draft)
    }

    pub fn select_action(&mut self, action: DispositionAction) -> Result<(), DispositionError> {
        self.draft_mut()?.selected = action;
        Ok(())
    }

    /// Choose the device to book. Clears the serial selection and loads
    /// the serials of this device only.
    pub fn select_device(&mut self, device_id: i64) -> Result<(), DispositionError> {
        let book = &mut self.draft_mut()?.book;
        book.device_id = Some(device_id);
        book.serial = None;
        self.serials.clear();

        let _busy = self.loading.begin();
        match inventory::list_serials(self.transport.as_ref(), device_id) {
            Ok(serials) => {
                tracing::debug!(device_id, count = serials.len(), "Serials loaded");
                self.serials = serials;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(device_id, error = %e, "Serial list fetch failed");
                self.notifier.error(SERIAL_LIST_FAILED);
                Err(e.into())
            }
        }
    }

    /// Choose one of the serials loaded for the selected device.
    pub fn select_serial(&mut self, serial: &str) -> Result<(), DispositionError> {
        if self.dialog.is_none() {
            return Err(DispositionError::NoOpenDialog);
        }
        if !self.serials.iter().any(|s| s == serial) {
            let mut errors = FieldErrors::new();
            errors.add(
                "booked_device_serial",
                "Serial number is not available for this device",
            );
            return Err(DispositionError::Validation(errors));
        }
        self.draft.book.serial = Some(serial.to_string());
        Ok(())
    }

    pub fn set_book_notes(&mut self, notes: &str) -> Result<(), DispositionError> {
        self.draft_mut()?.book.notes = notes.to_string();
        Ok(())
    }

    pub fn set_decline_reason(&mut self, reason: &str) -> Result<(), DispositionError> {
        self.draft_mut()?.decline.reason = reason.to_string();
        Ok(())
    }

    pub fn set_followup_days(&mut self, days: FollowupDays) -> Result<(), DispositionError> {
        self.draft_mut()?.followup.days = Some(days);
        Ok(())
    }

    pub fn set_followup_reason(&mut self, reason: &str) -> Result<(), DispositionError> {
        self.draft_mut()?.followup.reason = reason.to_string();
        Ok(())
    }

    /// Whether the submit button is enabled.
    pub fn can_submit(&self) -> bool {
        self.dialog.is_some() && self.draft.is_valid() && !self.loading.is_busy()
    }

    /// Send the active branch to the backend.
    ///
    /// An invalid draft never reaches the network. On success the dialog
    /// closes, the draft resets and the current page is fetched again.
    pub fn submit(&mut self) -> Result<Ack, DispositionError> {
        let trial_id = self
            .dialog
            .as_ref()
            .map(|t| t.id)
            .ok_or(DispositionError::NoOpenDialog)?;
        let disposition: Disposition = self
            .draft
            .to_disposition()
            .map_err(DispositionError::Validation)?;

        let result = {
            let _busy = self.loading.begin();
            trials::complete_trial(self.transport.as_ref(), trial_id, &disposition)
        };

        match result {
            Ok(ack) => {
                self.notifier.success(ack.message_or(COMPLETED));
                self.close_dialog();
                if let Err(e) = self.refresh() {
                    tracing::warn!(trial_id, error = %e, "Refetch after disposition failed");
                }
                Ok(ack)
            }
            Err(e) => {
                tracing::warn!(trial_id, error = %e, policy = ?self.policy, "Disposition rejected");
                self.notifier.error(&e.user_message());
                if self.policy == FailurePolicy::CloseDialog {
                    self.close_dialog();
                }
                Err(e.into())
            }
        }
    }
}
