//! State machine behind the calendar's booking modal.
//!
//! ```text
//! Idle ──open_slot──▶ Creating ──submit──▶ Submitting ──ok──▶ Idle
//! Idle ──open_booking──▶ Editing ──submit──▶ Submitting ──err──▶ Editing / Creating
//! Editing ──request_delete──▶ ConfirmingDelete ──confirm──▶ Deleting ──ok──▶ Idle
//! ```
//!
//! Requests are issued by the caller with the [`SubmitCommand`] (or id)
//! returned by a transition. While a request is in flight every other
//! transition except its outcome is refused, so one form never issues two
//! writes at once.

use thiserror::Error;

use crate::forms::{BookingForm, FormError};
use crate::{Booking, BookingRequest};

pub const GENERIC_SAVE_ERROR: &str = "Failed to save booking";
pub const GENERIC_DELETE_ERROR: &str = "Failed to delete booking";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    #[error("no booking form is open")]
    NotOpen,
    #[error("a booking form is already open")]
    AlreadyOpen,
    #[error("a request for this booking is still pending")]
    SubmissionPending,
    #[error("confirm or cancel the deletion first")]
    ConfirmationPending,
    #[error("only existing bookings can be deleted")]
    NotEditing,
    #[error("no request is in flight")]
    NotInFlight,
    #[error(transparent)]
    InvalidForm(#[from] FormError),
}

/// Where a save goes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTarget {
    Create,
    Update(i64),
}

/// A validated write the caller must send exactly once
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitCommand {
    pub target: SubmitTarget,
    pub request: BookingRequest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Idle,
    Creating,
    Editing { booking_id: i64 },
    ConfirmingDelete { booking_id: i64 },
    Submitting { target: SubmitTarget },
    Deleting { booking_id: i64 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BookingEditor {
    state: EditorState,
    form: BookingForm,
    error: Option<String>,
}

impl Default for BookingEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingEditor {
    pub fn new() -> Self {
        Self {
            state: EditorState::Idle,
            form: BookingForm::default(),
            error: None,
        }
    }

    pub fn state(&self) -> EditorState {
        self.state
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    /// Message of the last failed submit or delete
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.state != EditorState::Idle
    }

    /// A write request is in flight
    pub fn is_busy(&self) -> bool {
        matches!(
            self.state,
            EditorState::Submitting { .. } | EditorState::Deleting { .. }
        )
    }

    /// Id of the booking being edited, if any
    pub fn booking_id(&self) -> Option<i64> {
        match self.state {
            EditorState::Editing { booking_id }
            | EditorState::ConfirmingDelete { booking_id }
            | EditorState::Deleting { booking_id }
            | EditorState::Submitting {
                target: SubmitTarget::Update(booking_id),
            } => Some(booking_id),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        if self.booking_id().is_some() {
            "Edit booking"
        } else {
            "New booking"
        }
    }

    /// Idle → Creating, prefilled from the selected slot.
    pub fn open_slot(&mut self, date: &str, time: &str, default_table: Option<i64>) -> Result<(), EditorError> {
        self.ensure_idle()?;
        self.form = BookingForm::for_slot(date, time, default_table);
        self.error = None;
        self.state = EditorState::Creating;
        Ok(())
    }

    /// Idle → Editing, prefilled from the selected booking.
    pub fn open_booking(&mut self, booking: &Booking) -> Result<(), EditorError> {
        self.ensure_idle()?;
        self.form = BookingForm::from_booking(booking);
        self.error = None;
        self.state = EditorState::Editing {
            booking_id: booking.id,
        };
        Ok(())
    }

    /// Apply a field change while the form is editable.
    pub fn update_form(&mut self, change: impl FnOnce(&mut BookingForm)) -> Result<(), EditorError> {
        match self.state {
            EditorState::Creating | EditorState::Editing { .. } => {
                change(&mut self.form);
                self.error = None;
                Ok(())
            }
            EditorState::Idle => Err(EditorError::NotOpen),
            EditorState::ConfirmingDelete { .. } => Err(EditorError::ConfirmationPending),
            EditorState::Submitting { .. } | EditorState::Deleting { .. } => {
                Err(EditorError::SubmissionPending)
            }
        }
    }

    /// Creating|Editing → Submitting.
    ///
    /// Validation runs first against `existing` (the bookings on the page);
    /// an invalid form stays open with the message set and nothing is sent.
    pub fn submit(&mut self, existing: &[Booking]) -> Result<SubmitCommand, EditorError> {
        let target = match self.state {
            EditorState::Creating => SubmitTarget::Create,
            EditorState::Editing { booking_id } => SubmitTarget::Update(booking_id),
            EditorState::Idle => return Err(EditorError::NotOpen),
            EditorState::ConfirmingDelete { .. } => return Err(EditorError::ConfirmationPending),
            EditorState::Submitting { .. } | EditorState::Deleting { .. } => {
                return Err(EditorError::SubmissionPending)
            }
        };

        let editing_id = match target {
            SubmitTarget::Update(id) => Some(id),
            SubmitTarget::Create => None,
        };
        let request = match self.form.to_request_checked(existing, editing_id) {
            Ok(request) => request,
            Err(error) => {
                self.error = Some(error.to_string());
                return Err(error.into());
            }
        };

        self.error = None;
        self.state = EditorState::Submitting { target };
        Ok(SubmitCommand { target, request })
    }

    /// Submitting → Idle. The caller reloads the bookings from the backend.
    pub fn submit_succeeded(&mut self) -> Result<(), EditorError> {
        match self.state {
            EditorState::Submitting { .. } => {
                self.reset();
                Ok(())
            }
            _ => Err(EditorError::NotInFlight),
        }
    }

    /// Submitting → back to the form with the input preserved.
    pub fn submit_failed(&mut self, message: Option<String>) -> Result<(), EditorError> {
        let EditorState::Submitting { target } = self.state else {
            return Err(EditorError::NotInFlight);
        };
        self.state = match target {
            SubmitTarget::Create => EditorState::Creating,
            SubmitTarget::Update(booking_id) => EditorState::Editing { booking_id },
        };
        self.error = Some(message.unwrap_or_else(|| GENERIC_SAVE_ERROR.to_string()));
        Ok(())
    }

    /// Editing → ConfirmingDelete. Nothing is sent yet.
    pub fn request_delete(&mut self) -> Result<(), EditorError> {
        match self.state {
            EditorState::Editing { booking_id } => {
                self.state = EditorState::ConfirmingDelete { booking_id };
                Ok(())
            }
            EditorState::Submitting { .. } | EditorState::Deleting { .. } => {
                Err(EditorError::SubmissionPending)
            }
            _ => Err(EditorError::NotEditing),
        }
    }

    /// ConfirmingDelete → Editing
    pub fn cancel_delete(&mut self) -> Result<(), EditorError> {
        match self.state {
            EditorState::ConfirmingDelete { booking_id } => {
                self.state = EditorState::Editing { booking_id };
                Ok(())
            }
            _ => Err(EditorError::NotEditing),
        }
    }

    /// ConfirmingDelete → Deleting. Returns the id to delete.
    pub fn confirm_delete(&mut self) -> Result<i64, EditorError> {
        match self.state {
            EditorState::ConfirmingDelete { booking_id } => {
                self.error = None;
                self.state = EditorState::Deleting { booking_id };
                Ok(booking_id)
            }
            EditorState::Deleting { .. } => Err(EditorError::SubmissionPending),
            _ => Err(EditorError::NotEditing),
        }
    }

    /// Deleting → Idle. The caller reloads the bookings from the backend.
    pub fn delete_succeeded(&mut self) -> Result<(), EditorError> {
        match self.state {
            EditorState::Deleting { .. } => {
                self.reset();
                Ok(())
            }
            _ => Err(EditorError::NotInFlight),
        }
    }

    /// Deleting → Editing with the error surfaced.
    pub fn delete_failed(&mut self, message: Option<String>) -> Result<(), EditorError> {
        let EditorState::Deleting { booking_id } = self.state else {
            return Err(EditorError::NotInFlight);
        };
        self.state = EditorState::Editing { booking_id };
        self.error = Some(message.unwrap_or_else(|| GENERIC_DELETE_ERROR.to_string()));
        Ok(())
    }

    /// Close the modal unless a request is in flight. Returns whether it closed.
    pub fn close(&mut self) -> bool {
        if self.is_busy() {
            return false;
        }
        self.reset();
        true
    }

    fn ensure_idle(&self) -> Result<(), EditorError> {
        match self.state {
            EditorState::Idle => Ok(()),
            EditorState::Submitting { .. } | EditorState::Deleting { .. } => {
                Err(EditorError::SubmissionPending)
            }
            _ => Err(EditorError::AlreadyOpen),
        }
    }

    fn reset(&mut self) {
        self.state = EditorState::Idle;
        self.form = BookingForm::default();
        self.error = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::booking;
    use crate::{BookingClass, BookingDuration, IntervalError};

    fn filled_slot(editor: &mut BookingEditor) {
        editor.open_slot("2025-03-10", "09:00", Some(1)).unwrap();
        editor.update_form(|form| form.customer_id = Some(3)).unwrap();
    }

    #[test]
    fn test_create_flow_issues_one_request() {
        let mut editor = BookingEditor::new();
        filled_slot(&mut editor);
        assert_eq!(editor.state(), EditorState::Creating);
        assert_eq!(editor.title(), "New booking");

        let command = editor.submit(&[]).unwrap();
        assert_eq!(command.target, SubmitTarget::Create);
        assert_eq!(command.request.duration, BookingDuration::Hour);
        assert!(editor.is_busy());

        // a second click while pending does not produce another command
        assert_eq!(editor.submit(&[]), Err(EditorError::SubmissionPending));
        assert!(!editor.close());
        assert_eq!(
            editor.update_form(|form| form.info = "late".to_string()),
            Err(EditorError::SubmissionPending)
        );

        editor.submit_succeeded().unwrap();
        assert_eq!(editor.state(), EditorState::Idle);
        assert_eq!(editor.form(), &BookingForm::default());
    }

    #[test]
    fn test_end_to_end_plain_booking() {
        let mut editor = BookingEditor::new();
        editor.open_slot("2025-03-10", "09:00", Some(1)).unwrap();
        editor.update_form(|form| form.customer_id = Some(3)).unwrap();
        let command = editor.submit(&[]).unwrap();

        let created = Booking {
            id: 11,
            customer_id: command.request.customer_id,
            trainer_id: command.request.trainer_id,
            table_id: command.request.table_id,
            date: command.request.date.clone(),
            time: command.request.time.clone(),
            duration: command.request.duration.minutes(),
            ..booking(0, 1, "", "", 0)
        };
        let interval = created.interval().unwrap();
        assert_eq!(interval.start_iso(), "2025-03-10T09:00:00");
        assert_eq!(interval.end_iso(), "2025-03-10T10:00:00");
        assert_eq!(created.class(), BookingClass::Plain);
    }

    #[test]
    fn test_failed_submit_keeps_form_and_message() {
        let mut editor = BookingEditor::new();
        filled_slot(&mut editor);
        editor.update_form(|form| form.info = "bring balls".to_string()).unwrap();
        editor.submit(&[]).unwrap();

        editor
            .submit_failed(Some("Time slot already booked".to_string()))
            .unwrap();
        assert_eq!(editor.state(), EditorState::Creating);
        assert_eq!(editor.error(), Some("Time slot already booked"));
        assert_eq!(editor.form().info, "bring balls");

        editor.submit(&[]).unwrap();
        editor.submit_failed(None).unwrap();
        assert_eq!(editor.error(), Some(GENERIC_SAVE_ERROR));
    }

    #[test]
    fn test_invalid_form_is_rejected_before_any_request() {
        let mut editor = BookingEditor::new();
        editor.open_slot("2025-03-10", "09:00", Some(1)).unwrap();
        assert!(matches!(
            editor.submit(&[]),
            Err(EditorError::InvalidForm(FormError::MissingCustomer))
        ));
        assert_eq!(editor.state(), EditorState::Creating);
        assert_eq!(editor.error(), Some("Please select a customer"));

        editor
            .update_form(|form| {
                form.customer_id = Some(1);
                form.time = "25:00".to_string();
            })
            .unwrap();
        assert_eq!(editor.error(), None);
        assert!(matches!(
            editor.submit(&[]),
            Err(EditorError::InvalidForm(FormError::Interval(IntervalError::InvalidTime(_))))
        ));
        assert!(!editor.is_busy());
    }

    #[test]
    fn test_edit_flow_targets_existing_booking() {
        let existing = vec![booking(5, 1, "2025-03-10", "9:00", 60)];
        let mut editor = BookingEditor::new();
        editor.open_booking(&existing[0]).unwrap();
        assert_eq!(editor.state(), EditorState::Editing { booking_id: 5 });
        assert_eq!(editor.form().trainer_id, None);
        assert_eq!(editor.form().time, "09:00");
        assert_eq!(editor.title(), "Edit booking");

        // the booking does not conflict with itself
        let command = editor.submit(&existing).unwrap();
        assert_eq!(command.target, SubmitTarget::Update(5));

        editor.submit_failed(None).unwrap();
        assert_eq!(editor.state(), EditorState::Editing { booking_id: 5 });
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let existing = booking(5, 1, "2025-03-10", "09:00", 60);
        let mut editor = BookingEditor::new();
        editor.open_booking(&existing).unwrap();

        editor.request_delete().unwrap();
        assert_eq!(editor.state(), EditorState::ConfirmingDelete { booking_id: 5 });
        assert_eq!(editor.submit(&[]), Err(EditorError::ConfirmationPending));

        editor.cancel_delete().unwrap();
        assert_eq!(editor.state(), EditorState::Editing { booking_id: 5 });

        editor.request_delete().unwrap();
        assert_eq!(editor.confirm_delete(), Ok(5));
        assert_eq!(editor.confirm_delete(), Err(EditorError::SubmissionPending));
        assert!(!editor.close());

        editor.delete_failed(None).unwrap();
        assert_eq!(editor.state(), EditorState::Editing { booking_id: 5 });
        assert_eq!(editor.error(), Some(GENERIC_DELETE_ERROR));

        editor.request_delete().unwrap();
        editor.confirm_delete().unwrap();
        editor.delete_succeeded().unwrap();
        assert_eq!(editor.state(), EditorState::Idle);
    }

    #[test]
    fn test_new_bookings_cannot_be_deleted() {
        let mut editor = BookingEditor::new();
        editor.open_slot("2025-03-10", "09:00", None).unwrap();
        assert_eq!(editor.request_delete(), Err(EditorError::NotEditing));
    }

    #[test]
    fn test_open_while_open_is_refused() {
        let mut editor = BookingEditor::new();
        editor.open_slot("2025-03-10", "09:00", None).unwrap();
        assert_eq!(
            editor.open_slot("2025-03-11", "10:00", None),
            Err(EditorError::AlreadyOpen)
        );
        assert!(editor.close());
        assert!(!editor.is_open());
        assert_eq!(editor.submit(&[]), Err(EditorError::NotOpen));
        assert_eq!(editor.submit_succeeded(), Err(EditorError::NotInFlight));
    }
}
