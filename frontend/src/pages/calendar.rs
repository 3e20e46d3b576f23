use chrono::{NaiveDate, NaiveTime};
use shared::calendar::{build_events, slot_values};
use shared::{Access, CalendarView};
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::components::booking_modal::BookingModal;
use crate::components::legend::BookingLegend;
use crate::components::modal::LoadingPanel;
use crate::components::time_grid::TimeGrid;
use crate::hooks::{
    use_booking_editor, use_bookings, use_customers, use_settings, use_tables, use_trainers,
};
use crate::services::date_utils::today;
use crate::services::{ApiClient, AppConfig, Logger};

#[derive(Properties, PartialEq)]
pub struct CalendarPageProps {
    pub api_client: ApiClient,
    pub access: Access,
    pub config: AppConfig,
}

fn viewport_width() -> Option<f64> {
    web_sys::window()?.inner_width().ok()?.as_f64()
}

#[function_component(CalendarPage)]
pub fn calendar_page(props: &CalendarPageProps) -> Html {
    let today = use_state(today);
    let anchor = use_state(|| *today);
    let view = use_state(|| {
        viewport_width()
            .map(CalendarView::for_viewport)
            .unwrap_or(CalendarView::Week)
    });

    let bookings = use_bookings(&props.api_client);
    let customers = use_customers(&props.api_client);
    let trainers = use_trainers(&props.api_client);
    let tables = use_tables(&props.api_client);
    let settings = use_settings(&props.api_client);

    let loaded = bookings.state.value_or_default();
    let (events, skipped) = build_events(&loaded);

    {
        let skipped = skipped.clone();
        use_effect_with(skipped, |skipped| {
            for (id, err) in skipped {
                Logger::warn_with_component("calendar", &format!("booking {} not shown: {}", id, err));
            }
            || ()
        });
    }

    let table_list = tables.state.value_or_default();
    let default_table = table_list.first().map(|table| table.id);
    let editor = use_booking_editor(&props.api_client, &loaded, default_table, bookings.reload.clone());

    let on_slot_click = {
        let open_slot = editor.actions.open_slot.clone();
        let editable = props.access.can_edit_bookings();
        Callback::from(move |(date, time): (NaiveDate, NaiveTime)| {
            if editable {
                open_slot.emit(slot_values(date, time));
            }
        })
    };

    let on_event_click = {
        let open_booking = editor.actions.open_booking.clone();
        let editable = props.access.can_edit_bookings();
        let loaded = loaded.clone();
        Callback::from(move |id: i64| {
            if !editable {
                return;
            }
            match loaded.iter().find(|booking| booking.id == id) {
                Some(booking) => open_booking.emit(booking.clone()),
                None => Logger::warn_with_component("calendar", &format!("booking {} is no longer loaded", id)),
            }
        })
    };

    let navigate = |steps: i64| {
        let anchor = anchor.clone();
        let current = *view;
        Callback::from(move |_: MouseEvent| anchor.set(current.shift(*anchor, steps)))
    };
    let view_buttons: Vec<Html> = CalendarView::ALL
        .into_iter()
        .map(|option| {
            let view = view.clone();
            let class = classes!("btn", "btn-secondary", (*view == option).then_some("active"));
            let onclick = Callback::from(move |_: MouseEvent| view.set(option));
            html! { <button {class} {onclick}>{option.title()}</button> }
        })
        .collect();
    let on_today = {
        let anchor = anchor.clone();
        let today = *today;
        Callback::from(move |_: MouseEvent| anchor.set(today))
    };

    let grid = if let Some(error) = bookings.state.error() {
        html! { <LoadingPanel error={AttrValue::from(error.to_string())} /> }
    } else if bookings.state.is_loading() {
        html! { <LoadingPanel /> }
    } else {
        html! {
            <TimeGrid
                days={view.days(*anchor)}
                today={*today}
                {events}
                config={props.config.calendar.clone()}
                editable={props.access.can_edit_bookings()}
                {on_slot_click}
                {on_event_click}
            />
        }
    };

    html! {
        <div class="calendar-page">
            <div class="calendar-toolbar">
                <div class="calendar-nav">
                    <button class="btn btn-secondary" onclick={navigate(-1)}>{"‹ Previous"}</button>
                    <button class="btn btn-secondary" onclick={on_today}>{"Today"}</button>
                    <button class="btn btn-secondary" onclick={navigate(1)}>{"Next ›"}</button>
                </div>
                <h2 class="calendar-title">{view.label(*anchor)}</h2>
                <div class="view-switch">{for view_buttons}</div>
                <BookingLegend />
            </div>
            {if !skipped.is_empty() {
                html! {
                    <div class="calendar-warning">
                        {format!("{} booking(s) could not be shown because their date or time is invalid.", skipped.len())}
                    </div>
                }
            } else {
                html! {}
            }}
            {grid}
            <BookingModal
                editor={editor.editor.clone()}
                actions={editor.actions.clone()}
                customers={customers.state.value_or_default()}
                trainers={trainers.state.value_or_default()}
                tables={table_list}
                pricing={settings.state.ready().map(|settings| settings.pricing_matrix.clone())}
            />
        </div>
    }
}
