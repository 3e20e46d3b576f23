use gloo::dialogs::{alert, confirm};
use shared::{
    BookingDuration, PricingKey, Settings, SettingsUpdate, Table, TableForm, LANGUAGES,
};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, MouseEvent};
use yew::prelude::*;

use crate::components::modal::{ErrorMessage, LoadingPanel, SuccessMessage};
use crate::hooks::{use_settings, use_tables, LoadState};
use crate::services::{ApiClient, Logger};

#[derive(Properties, PartialEq)]
pub struct SettingsPageProps {
    pub api_client: ApiClient,
}

#[function_component(SettingsPage)]
pub fn settings_page(props: &SettingsPageProps) -> Html {
    let settings = use_settings(&props.api_client);

    let pricing = match &settings.state {
        LoadState::Loading => html! { <LoadingPanel /> },
        LoadState::Failed(error) => html! { <LoadingPanel error={error.clone()} /> },
        LoadState::Ready(loaded) => html! {
            <PricingSettings
                api_client={props.api_client.clone()}
                settings={loaded.clone()}
                on_saved={settings.reload.clone()}
            />
        },
    };

    html! {
        <div class="settings-page">
            <section class="settings-section">
                <h2>{"Pricing & general"}</h2>
                {pricing}
            </section>
            <section class="settings-section">
                <h2>{"Tables"}</h2>
                <TableSettings api_client={props.api_client.clone()} />
            </section>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct PricingSettingsProps {
    api_client: ApiClient,
    settings: Settings,
    on_saved: Callback<()>,
}

#[function_component(PricingSettings)]
fn pricing_settings(props: &PricingSettingsProps) -> Html {
    let draft = use_state(|| SettingsUpdate::from(&props.settings));
    let monthly_rate = use_state(|| format!("{:.2}", props.settings.monthly_rate));
    let is_saving = use_state(|| false);
    let message = use_state(|| Option::<Result<String, String>>::None);

    let on_rate = {
        let monthly_rate = monthly_rate.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            monthly_rate.set(input.value());
        })
    };
    let on_language = {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            next.language = select.value();
            draft.set(next);
        })
    };

    let on_submit = {
        let api_client = props.api_client.clone();
        let draft = draft.clone();
        let monthly_rate = monthly_rate.clone();
        let is_saving = is_saving.clone();
        let message = message.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *is_saving {
                return;
            }
            let rate = match monthly_rate.trim().parse::<f64>() {
                Ok(rate) if rate.is_finite() && rate >= 0.0 => rate,
                _ => {
                    message.set(Some(Err("Monthly rate must be a non-negative number".to_string())));
                    return;
                }
            };
            let mut update = (*draft).clone();
            update.monthly_rate = rate;

            is_saving.set(true);
            message.set(None);
            let api_client = api_client.clone();
            let is_saving = is_saving.clone();
            let message = message.clone();
            let on_saved = on_saved.clone();
            spawn_local(async move {
                match api_client.update_settings(&update).await {
                    Ok(_) => {
                        Logger::info_with_component("settings", "settings saved");
                        message.set(Some(Ok("Settings saved".to_string())));
                        on_saved.emit(());
                        let message = message.clone();
                        gloo::timers::callback::Timeout::new(2500, move || message.set(None)).forget();
                    }
                    Err(err) => {
                        Logger::error_with_component("settings", &format!("save failed: {}", err));
                        message.set(Some(Err(err.user_message("Failed to save settings"))));
                    }
                }
                is_saving.set(false);
            });
        })
    };

    html! {
        <form class="settings-form" onsubmit={on_submit}>
            {match (*message).clone() {
                Some(Ok(text)) => html! { <SuccessMessage {text} /> },
                Some(Err(text)) => html! { <ErrorMessage {text} /> },
                None => html! {},
            }}
            <table class="pricing-table">
                <thead>
                    <tr>
                        <th>{"Booking type"}</th>
                        <th>{"Price ($)"}</th>
                    </tr>
                </thead>
                <tbody>
                    {for PricingKey::all().into_iter().map(|key| {
                        let oninput = {
                            let draft = draft.clone();
                            Callback::from(move |e: InputEvent| {
                                let input: HtmlInputElement = e.target_unchecked_into();
                                let mut next = (*draft).clone();
                                next.pricing_matrix.set_from_input(key, &input.value());
                                draft.set(next);
                            })
                        };
                        html! {
                            <tr key={key.key()}>
                                <td>{key.label()}</td>
                                <td>
                                    <input type="number" min="0" step="0.5" class="form-input"
                                        value={draft.pricing_matrix.get(key).to_string()}
                                        {oninput} disabled={*is_saving} />
                                </td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
            <div class="form-row">
                <div class="form-group">
                    <label for="settings-monthly-rate" class="form-label">{"Monthly ABO rate ($)"}</label>
                    <input id="settings-monthly-rate" type="number" min="0" step="0.01" class="form-input"
                        value={(*monthly_rate).clone()} oninput={on_rate} disabled={*is_saving} />
                </div>
                <div class="form-group">
                    <label for="settings-language" class="form-label">{"Default language"}</label>
                    <select id="settings-language" class="form-input" onchange={on_language} disabled={*is_saving}>
                        {for LANGUAGES.iter().map(|(code, name)| html! {
                            <option value={*code} selected={draft.language == *code}>{*name}</option>
                        })}
                    </select>
                </div>
            </div>
            <p class="form-hint">
                {format!(
                    "Prices apply per booking for each duration ({}).",
                    BookingDuration::ALL.iter().map(|duration| duration.to_string()).collect::<Vec<_>>().join(", "),
                )}
            </p>
            <button type="submit" class="btn btn-primary" disabled={*is_saving}>
                {if *is_saving { "Saving..." } else { "Save settings" }}
            </button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
struct TableSettingsProps {
    api_client: ApiClient,
}

/// Table inventory: add, rename in place, delete
#[function_component(TableSettings)]
fn table_settings(props: &TableSettingsProps) -> Html {
    let tables = use_tables(&props.api_client);
    let new_table = use_state(TableForm::default);
    let renaming = use_state(|| Option::<(i64, TableForm)>::None);
    let error = use_state(|| Option::<String>::None);

    let save = {
        let api_client = props.api_client.clone();
        let reload = tables.reload.clone();
        let error = error.clone();
        let new_table = new_table.clone();
        let renaming = renaming.clone();
        move |id: Option<i64>, form: TableForm| {
            let request = match form.to_request() {
                Ok(request) => request,
                Err(err) => {
                    error.set(Some(err.to_string()));
                    return;
                }
            };
            error.set(None);
            let api_client = api_client.clone();
            let reload = reload.clone();
            let error = error.clone();
            let new_table = new_table.clone();
            let renaming = renaming.clone();
            spawn_local(async move {
                let result = match id {
                    Some(id) => api_client.update_table(id, &request).await,
                    None => api_client.create_table(&request).await,
                };
                match result {
                    Ok(table) => {
                        Logger::info_with_component("tables", &format!("saved table {}", table.name));
                        match id {
                            Some(_) => renaming.set(None),
                            None => new_table.set(TableForm::default()),
                        }
                        reload.emit(());
                    }
                    Err(err) => {
                        Logger::error_with_component("tables", &format!("save failed: {}", err));
                        error.set(Some(err.user_message("Failed to save table")));
                    }
                }
            });
        }
    };

    let on_new_name = {
        let new_table = new_table.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            new_table.set(TableForm { name: input.value() });
        })
    };
    let on_add = {
        let save = save.clone();
        let new_table = new_table.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            save(None, (*new_table).clone());
        })
    };

    let on_delete = {
        let api_client = props.api_client.clone();
        let reload = tables.reload.clone();
        Callback::from(move |table: Table| {
            if !confirm(&format!("Delete table \"{}\"? Its bookings may be removed too.", table.name)) {
                return;
            }
            let api_client = api_client.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api_client.delete_table(table.id).await {
                    Ok(()) => reload.emit(()),
                    Err(err) => {
                        Logger::error_with_component("tables", &format!("delete failed: {}", err));
                        alert(&err.user_message("Failed to delete table"));
                    }
                }
            });
        })
    };

    let row = |table: &Table| -> Html {
        let editing = (*renaming).clone().filter(|(id, _)| *id == table.id);
        let on_delete = {
            let on_delete = on_delete.clone();
            let table = table.clone();
            Callback::from(move |_: MouseEvent| on_delete.emit(table.clone()))
        };

        match editing {
            Some((id, form)) => {
                let oninput = {
                    let renaming = renaming.clone();
                    Callback::from(move |e: InputEvent| {
                        let input: HtmlInputElement = e.target_unchecked_into();
                        renaming.set(Some((id, TableForm { name: input.value() })));
                    })
                };
                let on_save = {
                    let save = save.clone();
                    let form = form.clone();
                    Callback::from(move |_: MouseEvent| save(Some(id), form.clone()))
                };
                let on_cancel = {
                    let renaming = renaming.clone();
                    Callback::from(move |_: MouseEvent| renaming.set(None))
                };
                html! {
                    <li key={table.id} class="table-item editing">
                        <input type="text" class="form-input" value={form.name.clone()} {oninput} />
                        <button class="btn btn-small btn-primary" onclick={on_save}>{"Save"}</button>
                        <button class="btn btn-small btn-secondary" onclick={on_cancel}>{"Cancel"}</button>
                    </li>
                }
            }
            None => {
                let on_rename = {
                    let renaming = renaming.clone();
                    let table = table.clone();
                    Callback::from(move |_: MouseEvent| {
                        renaming.set(Some((table.id, TableForm::from_table(&table))))
                    })
                };
                html! {
                    <li key={table.id} class="table-item">
                        <span class="table-name">{table.name.clone()}</span>
                        <button class="btn btn-small btn-secondary" onclick={on_rename}>{"Rename"}</button>
                        <button class="btn btn-small btn-danger" onclick={on_delete}>{"Delete"}</button>
                    </li>
                }
            }
        }
    };

    html! {
        <div class="table-settings">
            {if let Some(text) = (*error).clone() {
                html! { <ErrorMessage {text} /> }
            } else {
                html! {}
            }}
            {match &tables.state {
                LoadState::Loading => html! { <LoadingPanel /> },
                LoadState::Failed(error) => html! { <LoadingPanel error={error.clone()} /> },
                LoadState::Ready(list) => html! {
                    <ul class="table-list">
                        {for list.iter().map(row)}
                    </ul>
                },
            }}
            <form class="inline-form" onsubmit={on_add}>
                <input type="text" class="form-input" placeholder="New table name"
                    value={new_table.name.clone()} oninput={on_new_name} />
                <button type="submit" class="btn btn-primary">{"+ Add Table"}</button>
            </form>
        </div>
    }
}
