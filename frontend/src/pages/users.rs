use gloo::dialogs::{alert, confirm};
use shared::{Role, User};
use wasm_bindgen_futures::spawn_local;
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::components::modal::LoadingPanel;
use crate::components::user_modal::UserModal;
use crate::hooks::{use_trainers, use_users, LoadState};
use crate::services::{ApiClient, Logger};

#[derive(Properties, PartialEq)]
pub struct UsersPageProps {
    pub api_client: ApiClient,
}

/// Login accounts. Admin accounts can be edited but not deleted.
#[function_component(UsersPage)]
pub fn users_page(props: &UsersPageProps) -> Html {
    let users = use_users(&props.api_client);
    let trainers = use_trainers(&props.api_client);
    let editing = use_state(|| Option::<Option<User>>::None);

    let on_add = {
        let editing = editing.clone();
        Callback::from(move |_: MouseEvent| editing.set(Some(None)))
    };
    let on_close = {
        let editing = editing.clone();
        Callback::from(move |_: ()| editing.set(None))
    };
    let on_saved = {
        let editing = editing.clone();
        let reload = users.reload.clone();
        Callback::from(move |_: ()| {
            editing.set(None);
            reload.emit(());
        })
    };

    let on_delete = {
        let api_client = props.api_client.clone();
        let reload = users.reload.clone();
        Callback::from(move |user: User| {
            if user.role == Role::Admin {
                return;
            }
            if !confirm(&format!("Delete user \"{}\"?", user.username)) {
                return;
            }
            let api_client = api_client.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api_client.delete_user(user.id).await {
                    Ok(()) => reload.emit(()),
                    Err(err) => {
                        Logger::error_with_component("users", &format!("delete failed: {}", err));
                        alert(&err.user_message("Failed to delete user"));
                    }
                }
            });
        })
    };

    let trainer_list = trainers.state.value_or_default();
    let trainer_name = |id: Option<i64>| {
        id.and_then(|id| trainer_list.iter().find(|trainer| trainer.id == id))
            .map(|trainer| trainer.name.clone())
            .unwrap_or_else(|| "-".to_string())
    };

    let list = match &users.state {
        LoadState::Loading => html! { <LoadingPanel /> },
        LoadState::Failed(error) => html! { <LoadingPanel error={error.clone()} /> },
        LoadState::Ready(all) if all.is_empty() => html! {
            <div class="empty-state">{"No users yet."}</div>
        },
        LoadState::Ready(all) => html! {
            <table class="data-table">
                <thead>
                    <tr>
                        <th>{"Username"}</th>
                        <th>{"Role"}</th>
                        <th>{"Trainer profile"}</th>
                        <th class="actions-col">{"Actions"}</th>
                    </tr>
                </thead>
                <tbody>
                    {for all.iter().map(|user| {
                        let on_edit = {
                            let editing = editing.clone();
                            let user = user.clone();
                            Callback::from(move |_: MouseEvent| editing.set(Some(Some(user.clone()))))
                        };
                        let on_delete = {
                            let on_delete = on_delete.clone();
                            let user = user.clone();
                            Callback::from(move |_: MouseEvent| on_delete.emit(user.clone()))
                        };
                        html! {
                            <tr key={user.id}>
                                <td>{user.username.clone()}</td>
                                <td><span class={classes!("badge", format!("badge-{}", user.role.as_str()))}>{user.role.label()}</span></td>
                                <td>{trainer_name(user.trainer_id)}</td>
                                <td class="actions-col">
                                    <button class="btn btn-small btn-secondary" onclick={on_edit}>{"Edit"}</button>
                                    {if user.role == Role::Admin {
                                        html! {}
                                    } else {
                                        html! {
                                            <button class="btn btn-small btn-danger" onclick={on_delete}>{"Delete"}</button>
                                        }
                                    }}
                                </td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        },
    };

    html! {
        <div class="users-page">
            <div class="filter-bar">
                <button class="btn btn-primary" onclick={on_add}>{"+ Add User"}</button>
            </div>
            {list}
            {if let Some(user) = (*editing).clone() {
                html! {
                    <UserModal
                        api_client={props.api_client.clone()}
                        {user}
                        trainers={trainer_list.clone()}
                        {on_saved}
                        {on_close}
                    />
                }
            } else {
                html! {}
            }}
        </div>
    }
}
