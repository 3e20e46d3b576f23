use shared::{Customer, CustomerForm};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

use crate::components::modal::{ErrorMessage, Modal};
use crate::hooks::use_submit_guard;
use crate::services::{ApiClient, Logger};

#[derive(Properties, PartialEq)]
pub struct CustomerModalProps {
    pub api_client: ApiClient,
    /// `None` creates a new customer
    pub customer: Option<Customer>,
    pub on_saved: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(CustomerModal)]
pub fn customer_modal(props: &CustomerModalProps) -> Html {
    let form = use_state(|| {
        props
            .customer
            .as_ref()
            .map(CustomerForm::from_customer)
            .unwrap_or_default()
    });
    let saving = use_submit_guard();
    let error_message = use_state(|| Option::<String>::None);

    let text_input = |apply: fn(&mut CustomerForm, String)| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            apply(&mut next, input.value());
            form.set(next);
        })
    };
    let on_name = text_input(|form, value| form.name = value);
    let on_contact = text_input(|form, value| form.contact = value);
    let on_abo_start = text_input(|form, value| form.abo_start = value);
    let on_abo_end = text_input(|form, value| form.abo_end = value);

    let on_abo_toggle = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.is_abo_holder = input.checked();
            form.set(next);
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let customer_id = props.customer.as_ref().map(|customer| customer.id);
        let form = form.clone();
        let saving = saving.clone();
        let error_message = error_message.clone();
        let on_saved = props.on_saved.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let request = match form.to_request() {
                Ok(request) => request,
                Err(err) => {
                    error_message.set(Some(err.to_string()));
                    return;
                }
            };

            if !saving.begin() {
                return;
            }
            error_message.set(None);

            let api_client = api_client.clone();
            let saving = saving.clone();
            let error_message = error_message.clone();
            let on_saved = on_saved.clone();
            spawn_local(async move {
                let result = match customer_id {
                    Some(id) => api_client.update_customer(id, &request).await,
                    None => api_client.create_customer(&request).await,
                };
                match result {
                    Ok(customer) => {
                        Logger::info_with_component("customer-modal", &format!("saved customer {}", customer.id));
                        on_saved.emit(());
                    }
                    Err(err) => {
                        Logger::error_with_component("customer-modal", &format!("save failed: {}", err));
                        error_message.set(Some(err.user_message("Failed to save customer")));
                    }
                }
                saving.finish();
            });
        })
    };

    let is_saving = saving.is_saving();

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let title = if props.customer.is_some() { "Edit Customer" } else { "Add Customer" };

    html! {
        <Modal {title} on_close={props.on_close.clone()} busy={is_saving}>
            {if let Some(error) = (*error_message).clone() {
                html! { <ErrorMessage text={error} /> }
            } else {
                html! {}
            }}
            <form class="entity-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="customer-name" class="form-label">{"Name *"}</label>
                    <input id="customer-name" type="text" class="form-input"
                        value={form.name.clone()} oninput={on_name} disabled={is_saving} />
                </div>
                <div class="form-group">
                    <label for="customer-contact" class="form-label">{"Contact"}</label>
                    <input id="customer-contact" type="text" class="form-input" placeholder="Email or phone"
                        value={form.contact.clone()} oninput={on_contact} disabled={is_saving} />
                </div>
                <div class="form-group form-check">
                    <input id="customer-abo" type="checkbox"
                        checked={form.is_abo_holder} onchange={on_abo_toggle} disabled={is_saving} />
                    <label for="customer-abo">{"ABO holder (monthly subscription)"}</label>
                </div>
                {if form.is_abo_holder {
                    html! {
                        <div class="form-row">
                            <div class="form-group">
                                <label for="customer-abo-start" class="form-label">{"ABO start"}</label>
                                <input id="customer-abo-start" type="date" class="form-input"
                                    value={form.abo_start.clone()} oninput={on_abo_start} disabled={is_saving} />
                            </div>
                            <div class="form-group">
                                <label for="customer-abo-end" class="form-label">{"ABO end"}</label>
                                <input id="customer-abo-end" type="date" class="form-input"
                                    value={form.abo_end.clone()} oninput={on_abo_end} disabled={is_saving} />
                            </div>
                        </div>
                    }
                } else {
                    html! {}
                }}
                <div class="modal-buttons">
                    <button type="submit" class="btn btn-primary" disabled={is_saving}>
                        {if is_saving { "Saving..." } else { "Save" }}
                    </button>
                    <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={is_saving}>
                        {"Cancel"}
                    </button>
                </div>
            </form>
        </Modal>
    }
}
