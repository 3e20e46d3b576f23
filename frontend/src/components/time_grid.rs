use chrono::{NaiveDate, NaiveTime};
use shared::calendar::{events_for_day, PlacedEvent};
use shared::{CalendarConfig, CalendarEvent};
use web_sys::MouseEvent;
use yew::prelude::*;

use crate::services::date_utils;

/// Pixel height of one slot row
const SLOT_HEIGHT_PX: f64 = 28.0;

#[derive(Properties, PartialEq)]
pub struct TimeGridProps {
    /// One column per date, left to right
    pub days: Vec<NaiveDate>,
    pub today: NaiveDate,
    pub events: Vec<CalendarEvent>,
    pub config: CalendarConfig,
    /// Empty slots react to clicks only when bookings may be created
    pub editable: bool,
    pub on_slot_click: Callback<(NaiveDate, NaiveTime)>,
    pub on_event_click: Callback<i64>,
}

#[function_component(TimeGrid)]
pub fn time_grid(props: &TimeGridProps) -> Html {
    let days = &props.days;
    let columns = format!("grid-template-columns: 60px repeat({}, 1fr);", days.len().max(1));
    let slots = props.config.time_slots();
    let column_height = slots.len() as f64 * SLOT_HEIGHT_PX;

    html! {
        <div class="time-grid">
            <div class="grid-header" style={columns.clone()}>
                <div class="time-gutter"></div>
                {for days.iter().map(|day| {
                    let class = classes!("day-header", (*day == props.today).then_some("today"));
                    html! { <div {class}>{date_utils::column_label(*day)}</div> }
                })}
            </div>
            <div class="grid-body" style={columns}>
                <div class="time-gutter">
                    {for slots.iter().map(|slot| html! {
                        <div class="time-label" style={format!("height: {}px;", SLOT_HEIGHT_PX)}>
                            {slot.format("%H:%M").to_string()}
                        </div>
                    })}
                </div>
                {for days.iter().map(|day| {
                    let placed = events_for_day(*day, &props.events, &props.config);
                    html! {
                        <div class="day-column" style={format!("height: {}px;", column_height)}>
                            {for slots.iter().map(|slot| slot_cell(props, *day, *slot))}
                            {for placed.iter().map(|event| event_block(props, event))}
                        </div>
                    }
                })}
            </div>
        </div>
    }
}

fn slot_cell(props: &TimeGridProps, day: NaiveDate, slot: NaiveTime) -> Html {
    let onclick = {
        let on_slot_click = props.on_slot_click.clone();
        let editable = props.editable;
        Callback::from(move |_: MouseEvent| {
            if editable {
                on_slot_click.emit((day, slot));
            }
        })
    };
    let class = classes!("slot", props.editable.then_some("slot-editable"));
    html! {
        <div {class} style={format!("height: {}px;", SLOT_HEIGHT_PX)} {onclick}></div>
    }
}

fn event_block(props: &TimeGridProps, placed: &PlacedEvent) -> Html {
    let event = &placed.event;
    let onclick = {
        let on_event_click = props.on_event_click.clone();
        let id = event.id;
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_event_click.emit(id);
        })
    };

    let lanes = placed.lanes.max(1) as f64;
    let style = format!(
        "top: {:.1}px; height: {:.1}px; left: {:.2}%; width: {:.2}%; background: {};",
        placed.top * SLOT_HEIGHT_PX,
        placed.height * SLOT_HEIGHT_PX,
        placed.lane as f64 * 100.0 / lanes,
        100.0 / lanes,
        event.class.color(),
    );

    html! {
        <div
            class={classes!("calendar-event", event.class.css_class())}
            {style}
            title={format!("{} ({})", event.title, event.interval.time_range_label())}
            data-start={event.interval.start_iso()}
            data-end={event.interval.end_iso()}
            {onclick}
        >
            <div class="event-time">{event.interval.time_range_label()}</div>
            <div class="event-title">{event.title.clone()}</div>
            {if let Some(trainer) = &event.booking.trainer_name {
                html! { <div class="event-trainer">{trainer.clone()}</div> }
            } else {
                html! {}
            }}
        </div>
    }
}
