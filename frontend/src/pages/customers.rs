use gloo::dialogs::{alert, confirm};
use shared::filter::search_customers;
use shared::Customer;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, MouseEvent};
use yew::prelude::*;

use crate::components::customer_modal::CustomerModal;
use crate::components::modal::LoadingPanel;
use crate::hooks::{use_customers, LoadState};
use crate::services::date_utils::{display_date, display_timestamp};
use crate::services::{ApiClient, Logger};

/// Which customer the modal edits; `Some(None)` adds a new one
type Editing = Option<Option<Customer>>;

#[derive(Properties, PartialEq)]
pub struct CustomersPageProps {
    pub api_client: ApiClient,
}

#[function_component(CustomersPage)]
pub fn customers_page(props: &CustomersPageProps) -> Html {
    let customers = use_customers(&props.api_client);
    let search = use_state(String::new);
    let editing = use_state(|| Editing::None);

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
        let reload = customers.reload.clone();
        Callback::from(move |_: ()| {
            editing.set(None);
            reload.emit(());
        })
    };

    let on_delete = {
        let api_client = props.api_client.clone();
        let reload = customers.reload.clone();
        Callback::from(move |customer: Customer| {
            if !confirm(&format!("Delete customer \"{}\"?", customer.name)) {
                return;
            }
            let api_client = api_client.clone();
            let reload = reload.clone();
            spawn_local(async move {
                match api_client.delete_customer(customer.id).await {
                    Ok(()) => {
                        Logger::info_with_component("customers", &format!("deleted customer {}", customer.id));
                        reload.emit(());
                    }
                    Err(err) => {
                        Logger::error_with_component("customers", &format!("delete failed: {}", err));
                        alert(&err.user_message("Failed to delete customer"));
                    }
                }
            });
        })
    };

    let list = match &customers.state {
        LoadState::Loading => html! { <LoadingPanel /> },
        LoadState::Failed(error) => html! { <LoadingPanel error={error.clone()} /> },
        LoadState::Ready(all) => {
            let visible = search_customers(all, &search);
            if visible.is_empty() {
                html! { <div class="empty-state">{"No customers found."}</div> }
            } else {
                html! {
                    <table class="data-table">
                        <thead>
                            <tr>
                                <th>{"Name"}</th>
                                <th>{"Contact"}</th>
                                <th>{"ABO"}</th>
                                <th>{"ABO period"}</th>
                                <th>{"Customer since"}</th>
                                <th class="actions-col">{"Actions"}</th>
                            </tr>
                        </thead>
                        <tbody>
                            {for visible.into_iter().map(|customer| {
                                let on_edit = {
                                    let editing = editing.clone();
                                    let customer = customer.clone();
                                    Callback::from(move |_: MouseEvent| editing.set(Some(Some(customer.clone()))))
                                };
                                let on_delete = {
                                    let on_delete = on_delete.clone();
                                    let customer = customer.clone();
                                    Callback::from(move |_: MouseEvent| on_delete.emit(customer.clone()))
                                };
                                let period = match (&customer.abo_start, &customer.abo_end) {
                                    (Some(start), Some(end)) => format!("{} - {}", display_date(start), display_date(end)),
                                    (Some(start), None) => format!("from {}", display_date(start)),
                                    _ => "-".to_string(),
                                };
                                html! {
                                    <tr key={customer.id}>
                                        <td>{customer.name.clone()}</td>
                                        <td>{customer.contact.clone().unwrap_or_else(|| "-".to_string())}</td>
                                        <td>
                                            {if customer.is_abo_holder {
                                                html! { <span class="badge badge-abo">{"ABO"}</span> }
                                            } else {
                                                html! { "-" }
                                            }}
                                        </td>
                                        <td>{period}</td>
                                        <td>{customer.created_at.as_deref().map(display_timestamp).unwrap_or_else(|| "-".to_string())}</td>
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
        <div class="customers-page">
            <div class="filter-bar">
                <input type="search" class="form-input search-input" placeholder="Search name or contact"
                    value={(*search).clone()} oninput={on_search} />
                <button class="btn btn-primary" onclick={on_add}>{"+ Add Customer"}</button>
            </div>
            {list}
            {if let Some(customer) = (*editing).clone() {
                html! {
                    <CustomerModal
                        api_client={props.api_client.clone()}
                        {customer}
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
