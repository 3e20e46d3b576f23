use shared::{Trainer, TrainerForm};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

use crate::components::modal::{ErrorMessage, Modal};
use crate::hooks::use_submit_guard;
use crate::services::{ApiClient, Logger};

#[derive(Properties, PartialEq)]
pub struct TrainerModalProps {
    pub api_client: ApiClient,
    pub trainer: Option<Trainer>,
    pub on_saved: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(TrainerModal)]
pub fn trainer_modal(props: &TrainerModalProps) -> Html {
    let form = use_state(|| {
        props
            .trainer
            .as_ref()
            .map(TrainerForm::from_trainer)
            .unwrap_or_default()
    });
    let saving = use_submit_guard();
    let error_message = use_state(|| Option::<String>::None);

    let text_input = |apply: fn(&mut TrainerForm, String)| {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            apply(&mut next, input.value());
            form.set(next);
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let trainer_id = props.trainer.as_ref().map(|trainer| trainer.id);
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
                let result = match trainer_id {
                    Some(id) => api_client.update_trainer(id, &request).await,
                    None => api_client.create_trainer(&request).await,
                };
                match result {
                    Ok(_) => on_saved.emit(()),
                    Err(err) => {
                        Logger::error_with_component("trainer-modal", &format!("save failed: {}", err));
                        error_message.set(Some(err.user_message("Failed to save trainer")));
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

    let title = if props.trainer.is_some() { "Edit Trainer" } else { "Add Trainer" };

    html! {
        <Modal {title} on_close={props.on_close.clone()} busy={is_saving}>
            {if let Some(error) = (*error_message).clone() {
                html! { <ErrorMessage text={error} /> }
            } else {
                html! {}
            }}
            <form class="entity-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="trainer-name" class="form-label">{"Name *"}</label>
                    <input id="trainer-name" type="text" class="form-input" value={form.name.clone()}
                        oninput={text_input(|form, value| form.name = value)} disabled={is_saving} />
                </div>
                <div class="form-group">
                    <label for="trainer-email" class="form-label">{"Email *"}</label>
                    <input id="trainer-email" type="email" class="form-input" value={form.email.clone()}
                        oninput={text_input(|form, value| form.email = value)} disabled={is_saving} />
                </div>
                <div class="form-group">
                    <label for="trainer-rate" class="form-label">{"Hourly rate ($)"}</label>
                    <input id="trainer-rate" type="number" min="0" step="0.01" class="form-input"
                        value={form.hourly_rate.clone()}
                        oninput={text_input(|form, value| form.hourly_rate = value)} disabled={is_saving} />
                </div>
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
