use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StatCardProps {
    pub label: AttrValue,
    pub value: AttrValue,
    #[prop_or_default]
    pub accent: Option<AttrValue>,
}

#[function_component(StatCard)]
pub fn stat_card(props: &StatCardProps) -> Html {
    let style = props
        .accent
        .as_ref()
        .map(|color| format!("border-top: 4px solid {};", color))
        .unwrap_or_default();

    html! {
        <div class="stat-card" {style}>
            <div class="stat-label">{props.label.clone()}</div>
            <div class="stat-value">{props.value.clone()}</div>
        </div>
    }
}
