use shared::forms::{optional_id_value, parse_optional_id};
use shared::{
    BookingDuration, BookingEditor, BookingForm, Customer, EditorState, PricingMatrix, Table,
    Trainer,
};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement, MouseEvent};
use yew::prelude::*;

use crate::components::modal::{ErrorMessage, Modal};
use crate::hooks::BookingEditorActions;
use crate::services::date_utils::format_money;

#[derive(Properties, PartialEq)]
pub struct BookingModalProps {
    pub editor: BookingEditor,
    pub actions: BookingEditorActions,
    pub customers: Vec<Customer>,
    pub trainers: Vec<Trainer>,
    pub tables: Vec<Table>,
    /// Shown as a price preview when loaded
    #[prop_or_default]
    pub pricing: Option<PricingMatrix>,
}

/// Create/edit form of a single booking, driven by [`BookingEditor`]
#[function_component(BookingModal)]
pub fn booking_modal(props: &BookingModalProps) -> Html {
    let editor = &props.editor;
    if !editor.is_open() {
        return html! {};
    }

    let form = editor.form().clone();
    let busy = editor.is_busy();
    let locked = busy || matches!(editor.state(), EditorState::ConfirmingDelete { .. });

    // Every input replaces the whole form with one field changed
    let change = |apply: fn(&mut BookingForm, String)| {
        let update = props.actions.update.clone();
        let form = form.clone();
        move |value: String| {
            let mut next = form.clone();
            apply(&mut next, value);
            update.emit(next);
        }
    };

    let on_customer = {
        let emit = change(|form, value| form.customer_id = parse_optional_id(&value));
        Callback::from(move |e: Event| emit(e.target_unchecked_into::<HtmlSelectElement>().value()))
    };
    let on_trainer = {
        let emit = change(|form, value| form.trainer_id = parse_optional_id(&value));
        Callback::from(move |e: Event| emit(e.target_unchecked_into::<HtmlSelectElement>().value()))
    };
    let on_table = {
        let emit = change(|form, value| form.table_id = parse_optional_id(&value));
        Callback::from(move |e: Event| emit(e.target_unchecked_into::<HtmlSelectElement>().value()))
    };
    let on_date = {
        let emit = change(|form, value| form.date = value);
        Callback::from(move |e: Event| emit(e.target_unchecked_into::<HtmlInputElement>().value()))
    };
    let on_time = {
        let emit = change(|form, value| form.time = value);
        Callback::from(move |e: Event| emit(e.target_unchecked_into::<HtmlInputElement>().value()))
    };
    let on_duration = {
        let emit = change(|form, value| form.duration = value.parse().unwrap_or(form.duration));
        Callback::from(move |e: Event| emit(e.target_unchecked_into::<HtmlSelectElement>().value()))
    };
    let on_info = {
        let emit = change(|form, value| form.info = value);
        Callback::from(move |e: InputEvent| emit(e.target_unchecked_into::<HtmlTextAreaElement>().value()))
    };

    let on_submit = {
        let submit = props.actions.submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submit.emit(());
        })
    };
    let on_close = props.actions.close.clone();
    let on_cancel = {
        let close = props.actions.close.clone();
        Callback::from(move |_: MouseEvent| close.emit(()))
    };
    let on_delete = {
        let request_delete = props.actions.request_delete.clone();
        Callback::from(move |_: MouseEvent| request_delete.emit(()))
    };
    let on_confirm_delete = {
        let confirm_delete = props.actions.confirm_delete.clone();
        Callback::from(move |_: MouseEvent| confirm_delete.emit(()))
    };
    let on_cancel_delete = {
        let cancel_delete = props.actions.cancel_delete.clone();
        Callback::from(move |_: MouseEvent| cancel_delete.emit(()))
    };

    let price_preview = price_preview(props, &form);

    html! {
        <Modal title={editor.title()} {on_close} {busy}>
            {if let Some(error) = editor.error() {
                html! { <ErrorMessage text={error.to_string()} /> }
            } else {
                html! {}
            }}

            <form class="booking-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="booking-customer" class="form-label">{"Customer *"}</label>
                    <select id="booking-customer" class="form-input" onchange={on_customer} disabled={locked}>
                        <option value="" selected={form.customer_id.is_none()}>{"Select customer"}</option>
                        {for props.customers.iter().map(|customer| html! {
                            <option
                                value={customer.id.to_string()}
                                selected={form.customer_id == Some(customer.id)}
                            >
                                {customer.name.clone()}
                                {if customer.is_abo_holder { " (ABO)" } else { "" }}
                            </option>
                        })}
                    </select>
                </div>

                <div class="form-group">
                    <label for="booking-trainer" class="form-label">{"Trainer"}</label>
                    <select id="booking-trainer" class="form-input" onchange={on_trainer} disabled={locked}>
                        <option value={optional_id_value(None)} selected={form.trainer_id.is_none()}>{"No trainer"}</option>
                        {for props.trainers.iter().map(|trainer| html! {
                            <option
                                value={trainer.id.to_string()}
                                selected={form.trainer_id == Some(trainer.id)}
                            >
                                {trainer.name.clone()}
                            </option>
                        })}
                    </select>
                </div>

                <div class="form-group">
                    <label for="booking-table" class="form-label">{"Table *"}</label>
                    <select id="booking-table" class="form-input" onchange={on_table} disabled={locked}>
                        <option value="" selected={form.table_id.is_none()}>{"Select table"}</option>
                        {for props.tables.iter().map(|table| html! {
                            <option value={table.id.to_string()} selected={form.table_id == Some(table.id)}>
                                {table.name.clone()}
                            </option>
                        })}
                    </select>
                </div>

                <div class="form-row">
                    <div class="form-group">
                        <label for="booking-date" class="form-label">{"Date *"}</label>
                        <input id="booking-date" type="date" class="form-input"
                            value={form.date.clone()} onchange={on_date} disabled={locked} />
                    </div>
                    <div class="form-group">
                        <label for="booking-time" class="form-label">{"Time *"}</label>
                        <input id="booking-time" type="time" class="form-input" step="1800"
                            value={form.time.clone()} onchange={on_time} disabled={locked} />
                    </div>
                    <div class="form-group">
                        <label for="booking-duration" class="form-label">{"Duration *"}</label>
                        <select id="booking-duration" class="form-input" onchange={on_duration} disabled={locked}>
                            {for BookingDuration::ALL.iter().map(|duration| html! {
                                <option
                                    value={duration.minutes().to_string()}
                                    selected={form.duration == duration.minutes()}
                                >
                                    {duration.to_string()}
                                </option>
                            })}
                        </select>
                    </div>
                </div>

                <div class="form-group">
                    <label for="booking-info" class="form-label">{"Notes"}</label>
                    <textarea id="booking-info" class="form-input" rows="2"
                        value={form.info.clone()} oninput={on_info} disabled={locked} />
                </div>

                {price_preview}

                {if let EditorState::ConfirmingDelete { .. } = editor.state() {
                    html! {
                        <div class="confirm-delete">
                            <p>{"Delete this booking? This cannot be undone."}</p>
                            <div class="modal-buttons">
                                <button type="button" class="btn btn-danger" onclick={on_confirm_delete}>
                                    {"Yes, delete"}
                                </button>
                                <button type="button" class="btn btn-secondary" onclick={on_cancel_delete}>
                                    {"Keep booking"}
                                </button>
                            </div>
                        </div>
                    }
                } else {
                    html! {
                        <div class="modal-buttons">
                            <button type="submit" class="btn btn-primary" disabled={busy}>
                                {match editor.state() {
                                    EditorState::Submitting { .. } => "Saving...",
                                    _ => "Save",
                                }}
                            </button>
                            {if editor.booking_id().is_some() {
                                html! {
                                    <button type="button" class="btn btn-danger" onclick={on_delete} disabled={busy}>
                                        {match editor.state() {
                                            EditorState::Deleting { .. } => "Deleting...",
                                            _ => "Delete",
                                        }}
                                    </button>
                                }
                            } else {
                                html! {}
                            }}
                            <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={busy}>
                                {"Cancel"}
                            </button>
                        </div>
                    }
                }}
            </form>
        </Modal>
    }
}

fn price_preview(props: &BookingModalProps, form: &BookingForm) -> Html {
    let (Some(pricing), Ok(duration)) = (&props.pricing, BookingDuration::try_from(form.duration)) else {
        return html! {};
    };
    let is_abo = form
        .customer_id
        .and_then(|id| props.customers.iter().find(|customer| customer.id == id))
        .map(|customer| customer.is_abo_holder)
        .unwrap_or(false);
    let price = pricing.price_for(duration, form.trainer_id.is_some(), is_abo);

    html! {
        <div class="price-preview">
            {"Price: "}<strong>{format_money(price)}</strong>
        </div>
    }
}
