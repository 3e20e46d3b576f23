use shared::filter::sort_newest_first;
use shared::{BookingClass, BookingFilter, BookingStats, TableFilter, TrainerFilter};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::components::modal::LoadingPanel;
use crate::components::stat_card::StatCard;
use crate::hooks::{use_bookings, use_tables, use_trainers, LoadState};
use crate::services::date_utils::{display_date, format_money};
use crate::services::ApiClient;

#[derive(Properties, PartialEq)]
pub struct BookingsPageProps {
    pub api_client: ApiClient,
}

#[function_component(BookingsPage)]
pub fn bookings_page(props: &BookingsPageProps) -> Html {
    let bookings = use_bookings(&props.api_client);
    let tables = use_tables(&props.api_client);
    let trainers = use_trainers(&props.api_client);
    let filter = use_state(BookingFilter::default);

    let on_search = {
        let filter = filter.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*filter).clone();
            next.search = input.value();
            filter.set(next);
        })
    };
    let on_table = {
        let filter = filter.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*filter).clone();
            next.table = TableFilter::from_select_value(&select.value());
            filter.set(next);
        })
    };
    let on_trainer = {
        let filter = filter.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = (*filter).clone();
            next.trainer = TrainerFilter::from_select_value(&select.value());
            filter.set(next);
        })
    };

    let list = match &bookings.state {
        LoadState::Loading => html! { <LoadingPanel /> },
        LoadState::Failed(error) => html! { <LoadingPanel error={error.clone()} /> },
        LoadState::Ready(all) => {
            let mut visible = filter.apply(all);
            sort_newest_first(&mut visible);
            let stats = BookingStats::of(&visible);
            html! {
                <>
                    <div class="stats-grid">
                        <StatCard label="Bookings" value={stats.total.to_string()} />
                        <StatCard label="With trainer" value={stats.with_trainer.to_string()}
                            accent={BookingClass::WithTrainer.color()} />
                        <StatCard label="ABO holders" value={stats.subscription.to_string()}
                            accent={BookingClass::Subscription.color()} />
                        <StatCard label="Revenue" value={format_money(stats.revenue)} accent="#8b5cf6" />
                    </div>
                    {if visible.is_empty() {
                        html! { <div class="empty-state">{"No bookings match the current filters."}</div> }
                    } else {
                        html! {
                            <table class="data-table">
                                <thead>
                                    <tr>
                                        <th>{"Date"}</th>
                                        <th>{"Time"}</th>
                                        <th>{"Customer"}</th>
                                        <th>{"Table"}</th>
                                        <th>{"Trainer"}</th>
                                        <th>{"Duration"}</th>
                                        <th>{"Price"}</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {for visible.iter().map(|booking| {
                                        let time = booking
                                            .interval()
                                            .map(|interval| interval.time_range_label())
                                            .unwrap_or_else(|_| booking.time.clone());
                                        html! {
                                            <tr key={booking.id} class={classes!("booking-row", booking.class().css_class())}>
                                                <td>{display_date(&booking.date)}</td>
                                                <td>{time}</td>
                                                <td>
                                                    {booking.customer_name.clone()}
                                                    {if booking.is_abo {
                                                        html! { <span class="badge badge-abo">{"ABO"}</span> }
                                                    } else {
                                                        html! {}
                                                    }}
                                                </td>
                                                <td>{booking.table_name.clone()}</td>
                                                <td>{booking.trainer_name.clone().unwrap_or_else(|| "-".to_string())}</td>
                                                <td>{format!("{} min", booking.duration)}</td>
                                                <td>{format_money(booking.price)}</td>
                                            </tr>
                                        }
                                    })}
                                </tbody>
                            </table>
                        }
                    }}
                </>
            }
        }
    };

    html! {
        <div class="bookings-page">
            <div class="filter-bar">
                <input type="search" class="form-input search-input" placeholder="Search customer, table or trainer"
                    value={filter.search.clone()} oninput={on_search} />
                <select class="form-input" onchange={on_table}>
                    <option value="" selected={filter.table == TableFilter::All}>{"All tables"}</option>
                    {for tables.state.value_or_default().into_iter().map(|table| html! {
                        <option value={table.id.to_string()} selected={filter.table == TableFilter::Id(table.id)}>
                            {table.name}
                        </option>
                    })}
                </select>
                <select class="form-input" onchange={on_trainer}>
                    <option value="" selected={filter.trainer == TrainerFilter::All}>{"All trainers"}</option>
                    <option value={TrainerFilter::UNASSIGNED_VALUE} selected={filter.trainer == TrainerFilter::Unassigned}>
                        {"No trainer"}
                    </option>
                    {for trainers.state.value_or_default().into_iter().map(|trainer| html! {
                        <option value={trainer.id.to_string()} selected={filter.trainer == TrainerFilter::Id(trainer.id)}>
                            {trainer.name}
                        </option>
                    })}
                </select>
            </div>
            {list}
        </div>
    }
}
