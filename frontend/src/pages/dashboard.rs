use shared::ReportPeriod;
use yew::prelude::*;

use crate::components::chart::{Chart, ChartKind};
use crate::components::modal::LoadingPanel;
use crate::components::stat_card::StatCard;
use crate::hooks::{use_abo_report, use_daily_report, use_monthly_report, LoadState};
use crate::services::date_utils::{format_money, long_date, today};
use crate::services::ApiClient;

#[derive(Properties, PartialEq)]
pub struct DashboardPageProps {
    pub api_client: ApiClient,
}

/// Today's numbers, the running month and the subscription count.
/// The three reports load independently.
#[function_component(DashboardPage)]
pub fn dashboard_page(props: &DashboardPageProps) -> Html {
    let today = use_state(today);
    let period = ReportPeriod::containing(*today);

    let daily = use_daily_report(&props.api_client, *today);
    let monthly = use_monthly_report(&props.api_client, period);
    let abo = use_abo_report(&props.api_client, period.year);

    let today_cards = match &daily.state {
        LoadState::Ready(report) => html! {
            <>
                <StatCard label="Today's earnings" value={format_money(report.total_earnings)} accent="#10b981" />
                <StatCard label="Today's bookings" value={report.total_bookings.to_string()} accent="#3b82f6" />
            </>
        },
        LoadState::Loading => html! { <LoadingPanel /> },
        LoadState::Failed(error) => html! { <LoadingPanel error={error.clone()} /> },
    };

    let month_card = match &monthly.state {
        LoadState::Ready(report) => html! {
            <StatCard
                label={format!("Revenue {}", report.period().label())}
                value={format_money(report.total_revenue)}
                accent="#8b5cf6"
            />
        },
        LoadState::Loading => html! {},
        LoadState::Failed(error) => html! { <LoadingPanel error={error.clone()} /> },
    };

    let abo_card = match &abo.state {
        LoadState::Ready(report) => html! {
            <StatCard label="Active subscriptions" value={report.active_abo_count.to_string()} accent="#f59e0b" />
        },
        LoadState::Loading => html! {},
        LoadState::Failed(error) => html! { <LoadingPanel error={error.clone()} /> },
    };

    let table_chart = monthly
        .state
        .ready()
        .map(|report| {
            let (labels, values): (Vec<String>, Vec<f64>) = report
                .table_earnings
                .iter()
                .map(|(table, earnings)| (table.clone(), *earnings))
                .unzip();
            html! {
                <Chart
                    title={format!("Earnings by table, {}", report.period().label())}
                    {labels}
                    {values}
                    kind={ChartKind::Bar}
                    y_desc="Earnings"
                />
            }
        })
        .unwrap_or_default();

    html! {
        <div class="dashboard-page">
            <p class="page-subtitle">{long_date(*today)}</p>
            <div class="stats-grid">
                {today_cards}
                {month_card}
                {abo_card}
            </div>
            {table_chart}
        </div>
    }
}
