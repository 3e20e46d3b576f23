use shared::forms::{optional_id_value, parse_optional_id, MIN_PASSWORD_LEN};
use shared::{Role, Trainer, User, UserForm};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, MouseEvent};
use yew::prelude::*;

use crate::components::modal::{ErrorMessage, Modal};
use crate::hooks::use_submit_guard;
use crate::services::{ApiClient, Logger};

#[derive(Properties, PartialEq)]
pub struct UserModalProps {
    pub api_client: ApiClient,
    pub user: Option<User>,
    pub trainers: Vec<Trainer>,
    pub on_saved: Callback<()>,
    pub on_close: Callback<()>,
}

#[function_component(UserModal)]
pub fn user_modal(props: &UserModalProps) -> Html {
    let form = use_state(|| props.user.as_ref().map(UserForm::from_user).unwrap_or_default());
    let saving = use_submit_guard();
    let error_message = use_state(|| Option::<String>::None);
    let creating = props.user.is_none();

    let on_username = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.username = input.value();
            form.set(next);
        })
    };

    let on_password = {
        let form = form.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.password = input.value();
            form.set(next);
        })
    };

    let on_role = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Some(role) = Role::from_value(&select.value()) {
                let mut next = (*form).clone();
                next.set_role(role);
                form.set(next);
            }
        })
    };

    let on_trainer = {
        let form = form.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*form).clone();
            next.trainer_id = parse_optional_id(&select.value());
            form.set(next);
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let user_id = props.user.as_ref().map(|user| user.id);
        let form = form.clone();
        let saving = saving.clone();
        let error_message = error_message.clone();
        let on_saved = props.on_saved.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let request = match form.to_request(user_id.is_none()) {
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
                let result = match user_id {
                    Some(id) => api_client.update_user(id, &request).await,
                    None => api_client.create_user(&request).await,
                };
                match result {
                    Ok(user) => {
                        Logger::info_with_component("user-modal", &format!("saved user {}", user.username));
                        on_saved.emit(());
                    }
                    Err(err) => {
                        Logger::error_with_component("user-modal", &format!("save failed: {}", err));
                        error_message.set(Some(err.user_message("Failed to save user")));
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

    let title = if creating { "Add User" } else { "Edit User" };
    let password_label = if creating {
        "Password *".to_string()
    } else {
        "New password (leave blank to keep)".to_string()
    };

    html! {
        <Modal {title} on_close={props.on_close.clone()} busy={is_saving}>
            {if let Some(error) = (*error_message).clone() {
                html! { <ErrorMessage text={error} /> }
            } else {
                html! {}
            }}
            <form class="entity-form" onsubmit={on_submit}>
                <div class="form-group">
                    <label for="user-name" class="form-label">{"Username *"}</label>
                    <input id="user-name" type="text" class="form-input" autocomplete="off"
                        value={form.username.clone()} oninput={on_username} disabled={is_saving} />
                </div>
                <div class="form-group">
                    <label for="user-password" class="form-label">{password_label}</label>
                    <input id="user-password" type="password" class="form-input" autocomplete="new-password"
                        placeholder={format!("At least {} characters", MIN_PASSWORD_LEN)}
                        value={form.password.clone()} oninput={on_password} disabled={is_saving} />
                </div>
                <div class="form-group">
                    <label for="user-role" class="form-label">{"Role *"}</label>
                    <select id="user-role" class="form-input" onchange={on_role} disabled={is_saving}>
                        {for Role::ALL.iter().map(|role| html! {
                            <option value={role.as_str()} selected={form.role == *role}>{role.label()}</option>
                        })}
                    </select>
                </div>
                {if form.role == Role::Trainer {
                    html! {
                        <div class="form-group">
                            <label for="user-trainer" class="form-label">{"Linked trainer profile"}</label>
                            <select id="user-trainer" class="form-input" onchange={on_trainer} disabled={is_saving}>
                                <option value={optional_id_value(None)} selected={form.trainer_id.is_none()}>
                                    {"Not linked"}
                                </option>
                                {for props.trainers.iter().map(|trainer| html! {
                                    <option value={trainer.id.to_string()} selected={form.trainer_id == Some(trainer.id)}>
                                        {trainer.name.clone()}
                                    </option>
                                })}
                            </select>
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
