use std::cell::RefCell;
use std::rc::Rc;

use shared::{Booking, BookingEditor, BookingForm, EditorError, SubmitCommand, SubmitTarget};
use wasm_bindgen_futures::spawn_local;
use yew::functional::UseForceUpdateHandle;
use yew::prelude::*;

use crate::services::{ApiClient, Logger};

pub struct UseBookingEditorResult {
    /// Snapshot for rendering
    pub editor: BookingEditor,
    pub actions: BookingEditorActions,
}

#[derive(Clone, PartialEq)]
pub struct BookingEditorActions {
    /// `(date, time)` of the clicked slot
    pub open_slot: Callback<(String, String)>,
    pub open_booking: Callback<Booking>,
    pub update: Callback<BookingForm>,
    pub submit: Callback<()>,
    pub request_delete: Callback<()>,
    pub cancel_delete: Callback<()>,
    pub confirm_delete: Callback<()>,
    pub close: Callback<()>,
}

/// The booking modal of the calendar.
///
/// The editor lives in a `RefCell` so two clicks landing before the next
/// render still see the `Submitting` state and only one request is sent.
/// `on_saved` fires after every successful write so the page reloads.
#[hook]
pub fn use_booking_editor(
    api_client: &ApiClient,
    bookings: &[Booking],
    default_table: Option<i64>,
    on_saved: Callback<()>,
) -> UseBookingEditorResult {
    let editor = use_mut_ref(BookingEditor::new);
    let existing = use_mut_ref(Vec::<Booking>::new);
    let redraw = use_force_update();

    *existing.borrow_mut() = bookings.to_vec();

    let apply = {
        let editor = editor.clone();
        let redraw = redraw.clone();
        move |action: &'static str, change: &dyn Fn(&mut BookingEditor) -> Result<(), EditorError>| {
            let result = change(&mut editor.borrow_mut());
            match result {
                Ok(()) => redraw.force_update(),
                Err(err) => Logger::debug_with_component("booking-editor", &format!("{} ignored: {}", action, err)),
            }
        }
    };

    let open_slot = {
        let apply = apply.clone();
        Callback::from(move |(date, time): (String, String)| {
            apply("open slot", &|editor: &mut BookingEditor| editor.open_slot(&date, &time, default_table));
        })
    };

    let open_booking = {
        let apply = apply.clone();
        Callback::from(move |booking: Booking| {
            apply("open booking", &|editor: &mut BookingEditor| editor.open_booking(&booking));
        })
    };

    let update = {
        let apply = apply.clone();
        Callback::from(move |form: BookingForm| {
            apply("update form", &|editor: &mut BookingEditor| editor.update_form(|current| *current = form.clone()));
        })
    };

    let request_delete = {
        let apply = apply.clone();
        Callback::from(move |_| apply("request delete", &|editor: &mut BookingEditor| editor.request_delete()))
    };

    let cancel_delete = {
        let apply = apply.clone();
        Callback::from(move |_| apply("cancel delete", &|editor: &mut BookingEditor| editor.cancel_delete()))
    };

    let close = {
        let editor = editor.clone();
        let redraw = redraw.clone();
        Callback::from(move |_| {
            if editor.borrow_mut().close() {
                redraw.force_update();
            }
        })
    };

    let submit = {
        let api_client = api_client.clone();
        let editor = editor.clone();
        let existing = existing.clone();
        let redraw = redraw.clone();
        let on_saved = on_saved.clone();

        Callback::from(move |_| {
            let command = editor.borrow_mut().submit(&existing.borrow());
            redraw.force_update();
            match command {
                Ok(command) => send_booking(
                    api_client.clone(),
                    command,
                    editor.clone(),
                    redraw.clone(),
                    on_saved.clone(),
                ),
                Err(err) => Logger::debug_with_component("booking-editor", &format!("submit refused: {}", err)),
            }
        })
    };

    let confirm_delete = {
        let api_client = api_client.clone();
        let editor = editor.clone();
        let redraw = redraw.clone();
        let on_saved = on_saved.clone();

        Callback::from(move |_| {
            let booking_id = match editor.borrow_mut().confirm_delete() {
                Ok(booking_id) => booking_id,
                Err(err) => {
                    Logger::debug_with_component("booking-editor", &format!("delete refused: {}", err));
                    return;
                }
            };
            redraw.force_update();

            let api_client = api_client.clone();
            let editor = editor.clone();
            let redraw = redraw.clone();
            let on_saved = on_saved.clone();
            spawn_local(async move {
                let result = api_client.delete_booking(booking_id).await;
                let saved = {
                    let mut editor = editor.borrow_mut();
                    match &result {
                        Ok(()) => editor.delete_succeeded().is_ok(),
                        Err(err) => {
                            Logger::error_with_component(
                                "booking-editor",
                                &format!("delete of booking {} failed: {}", booking_id, err),
                            );
                            let _ = editor.delete_failed(err.backend_message());
                            false
                        }
                    }
                };
                redraw.force_update();
                if saved {
                    Logger::info_with_component("booking-editor", &format!("deleted booking {}", booking_id));
                    on_saved.emit(());
                }
            });
        })
    };

    let snapshot = editor.borrow().clone();
    UseBookingEditorResult {
        editor: snapshot,
        actions: BookingEditorActions {
            open_slot,
            open_booking,
            update,
            submit,
            request_delete,
            cancel_delete,
            confirm_delete,
            close,
        },
    }
}

fn send_booking(
    api_client: ApiClient,
    command: SubmitCommand,
    editor: Rc<RefCell<BookingEditor>>,
    redraw: UseForceUpdateHandle,
    on_saved: Callback<()>,
) {
    spawn_local(async move {
        let result = match command.target {
            SubmitTarget::Create => api_client.create_booking(&command.request).await,
            SubmitTarget::Update(id) => api_client.update_booking(id, &command.request).await,
        };

        // Release the editor before notifying; the reload re-renders this hook
        let saved = {
            let mut editor = editor.borrow_mut();
            match &result {
                Ok(booking) => {
                    Logger::info_with_component(
                        "booking-editor",
                        &format!("saved booking {} ({} {})", booking.id, booking.date, booking.time),
                    );
                    editor.submit_succeeded().is_ok()
                }
                Err(err) => {
                    if err.is_conflict() {
                        Logger::warn_with_component("booking-editor", "slot was taken in the meantime");
                    } else {
                        Logger::error_with_component("booking-editor", &format!("save failed: {}", err));
                    }
                    let _ = editor.submit_failed(err.backend_message());
                    false
                }
            }
        };
        redraw.force_update();
        if saved {
            on_saved.emit(());
        }
    });
}
