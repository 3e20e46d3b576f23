use shared::BookingClass;
use yew::prelude::*;

#[function_component(BookingLegend)]
pub fn booking_legend() -> Html {
    html! {
        <div class="calendar-legend">
            {for BookingClass::ALL.iter().map(|class| html! {
                <span class="legend-item">
                    <span class="legend-swatch" style={format!("background: {};", class.color())}></span>
                    {class.label()}
                </span>
            })}
        </div>
    }
}
