use gloo::dialogs::{alert, confirm};
use shared::filter::search_trainers;
use shared::Trainer;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

use crate::components::modal::LoadingPanel;
use crate::components::trainer_modal::TrainerModal;
use crate::hooks::{use_trainers, LoadState};
use crate::services::date_utils::format_money;
use crate::services::{ApiClient, Logger};

#[derive(Properties, PartialEq)]
pub struct TrainersPageProps {
    pub api_client: ApiClient,
}

#[function_component(TrainersPage)]
pub fn trainers_page(props: &TrainersPageProps) -> Html {
    let trainers = use_trainers(&props.api_client);
    let search = use_state(String::new);
    // Some(None) adds a trainer
    let editing = use_state(|| Option::<Option<Trainer>>::None);

    let on_search = {
        let search = search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            search.set(input.value());
        })
    };
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
        let reload = trainers.reload.clone();
        Callback::from(move |_: ()| {
            editing.set(None);
            reload.emit(());
        })
    };

    let on_delete = {
        let api_client = props.api_client.clone();
        let reload = trainers.reload.clone();
        Callback::from(move |trainer: Trainer| {
            if !confirm(&format!("Delete trainer \"{}\"?", trainer.name)) {
                return;
            }
            let api_client = api_client.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api_client.delete_trainer(trainer.id).await {
                    Ok(()) => reload.emit(()),
                    Err(err) => {
                        Logger::error_with_component("trainers", &format!("delete failed: {}", err));
                        alert(&err.user_message("Failed to delete trainer"));
                    }
                }
            });
        })
    };

    let list = match &trainers.state {
        LoadState::Loading => html! { <LoadingPanel /> },
        LoadState::Failed(error) => html! { <LoadingPanel error={error.clone()} /> },
        LoadState::Ready(all) => {
            let visible = search_trainers(all, &search);
            if visible.is_empty() {
                html! { <div class="empty-state">{"No trainers found."}</div> }
            } else {
                html! {
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>{"Name"}</th>
                                <th>{"Email"}</th>
                                <th>{"Hourly rate"}</th>
                                <th class="actions-col">{"Actions"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {for visible.into_iter().map(|trainer| {
                                let on_edit = {
                                    let editing = editing.clone();
                                    let trainer = trainer.clone();
                                    Callback::from(move |_: MouseEvent| editing.set(Some(Some(trainer.clone()))))
                                };
                                let on_delete = {
                                    let on_delete = on_delete.clone();
                                    let trainer = trainer.clone();
                                    Callback::from(move |_: MouseEvent| on_delete.emit(trainer.clone()))
                                };
                                html! {
                                    <tr key={trainer.id}>
                                        <td>{trainer.name.clone()}</td>
                                        <td>{trainer.email.clone()}</td>
                                        <td>{format_money(trainer.hourly_rate)}</td>
                                        <td class="actions-col">
                                            <button class="btn btn-small btn-secondary" onclick={on_edit}>{"Edit"}</button>
                                            <button class="btn btn-small btn-danger" onclick={on_delete}>{"Delete"}</button>
                                        </td>
                                    </tr>
                                }
                            })}
                        </tbody>
                    </table>
                }
            }
        }
    };

    html! {
        <div class="trainers-page">
            <div class="filter-bar">
                <input type="search" class="form-input search-input" placeholder="Search name or email"
                    value={(*search).clone()} oninput={on_search} />
                <button class="btn btn-primary" onclick={on_add}>{"+ Add Trainer"}</button>
            </div>
            {list}
            {if let Some(trainer) = (*editing).clone() {
                html! {
                    <TrainerModal api_client={props.api_client.clone()} {trainer} {on_saved} {on_close} />
                }
            } else {
                html! {}
            }}
        </div>
    }
}
