use chrono::{Datelike, NaiveDate};
use shared::interval::parse_date;
use shared::reports::MONTH_NAMES;
use shared::{Access, ReportDownload, ReportPeriod, ReportTab};
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement, MouseEvent};
use yew::prelude::*;

use crate::components::chart::{Chart, ChartKind};
use crate::components::modal::{ErrorMessage, LoadingPanel};
use crate::components::stat_card::StatCard;
use crate::hooks::{use_abo_report, use_monthly_report, use_trainer_report, LoadState};
use crate::services::date_utils::{display_date, format_money, today};
use crate::services::download::save_file;
use crate::services::{ApiClient, Logger};

/// Years offered by the period picker, counted back from the current one
const YEAR_CHOICES: i32 = 5;

#[derive(Properties, PartialEq)]
pub struct ReportsPageProps {
    pub api_client: ApiClient,
    pub access: Access,
}

#[function_component(ReportsPage)]
pub fn reports_page(props: &ReportsPageProps) -> Html {
    let today = use_state(today);
    let period = use_state(|| ReportPeriod::containing(*today));
    let tab = use_state(|| props.access.default_report_tab());

    let on_month = {
        let period = period.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(month) = select.value().parse::<u32>() {
                period.set(ReportPeriod::new(period.year, month));
            }
        })
    };
    let on_year = {
        let period = period.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            if let Ok(year) = select.value().parse::<i32>() {
                period.set(ReportPeriod::new(year, period.month));
            }
        })
    };
    let step = |forward: bool| {
        let period = period.clone();
        Callback::from(move |_: MouseEvent| {
            period.set(if forward { period.next() } else { period.previous() })
        })
    };

    let tabs = props.access.report_tabs();
    // A tab the role lost access to falls back to the first allowed one
    let active = if tabs.contains(&*tab) { *tab } else { props.access.default_report_tab() };
    let current_year = today.year();

    let content = match active {
        ReportTab::Monthly => html! {
            <MonthlyTab
                api_client={props.api_client.clone()}
                period={*period}
                can_download={props.access.can_download_reports()}
            />
        },
        ReportTab::Subscriptions => html! {
            <SubscriptionTab api_client={props.api_client.clone()} year={period.year} />
        },
        ReportTab::TrainerBilling => html! {
            <TrainerBillingTab api_client={props.api_client.clone()} period={*period} />
        },
    };

    html! {
        <div class="reports-page">
            <div class="report-toolbar">
                <button class="btn btn-secondary" onclick={step(false)}>{"‹"}</button>
                <select class="form-input" onchange={on_month}>
                    {for MONTH_NAMES.iter().enumerate().map(|(index, name)| {
                        let month = index as u32 + 1;
                        html! {
                            <option value={month.to_string()} selected={period.month == month}>{*name}</option>
                        }
                    })}
                </select>
                <select class="form-input" onchange={on_year}>
                    {for (0..YEAR_CHOICES).map(|offset| {
                        let year = current_year - offset;
                        html! {
                            <option value={year.to_string()} selected={period.year == year}>{year.to_string()}</option>
                        }
                    })}
                    {if period.year < current_year - YEAR_CHOICES + 1 || period.year > current_year {
                        html! { <option value={period.year.to_string()} selected=true>{period.year.to_string()}</option> }
                    } else {
                        html! {}
                    }}
                </select>
                <button class="btn btn-secondary" onclick={step(true)}>{"›"}</button>
            </div>
            {if tabs.len() > 1 {
                html! {
                    <div class="tabs">
                        {for tabs.iter().map(|candidate| {
                            let candidate = *candidate;
                            let onclick = {
                                let tab = tab.clone();
                                Callback::from(move |_: MouseEvent| tab.set(candidate))
                            };
                            let class = classes!("tab", (candidate == active).then_some("active"));
                            html! { <button {class} {onclick}>{candidate.label()}</button> }
                        })}
                    </div>
                }
            } else {
                html! {}
            }}
            {content}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct MonthlyTabProps {
    api_client: ApiClient,
    period: ReportPeriod,
    can_download: bool,
}

#[function_component(MonthlyTab)]
fn monthly_tab(props: &MonthlyTabProps) -> Html {
    let report = use_monthly_report(&props.api_client, props.period);
    let daily_date = use_state(|| Option::<NaiveDate>::None);
    let downloading = use_state(|| false);
    let download_error = use_state(|| Option::<String>::None);

    let download = {
        let api_client = props.api_client.clone();
        let downloading = downloading.clone();
        let download_error = download_error.clone();
        move |request: ReportDownload| {
            if *downloading {
                return;
            }
            downloading.set(true);
            download_error.set(None);
            let api_client = api_client.clone();
            let downloading = downloading.clone();
            let download_error = download_error.clone();
            spawn_local(async move {
                let file_name = request.file_name();
                let result = match api_client.download_report(&request).await {
                    Ok(bytes) => save_file(&bytes, &file_name, request.format.mime_type())
                        .map_err(|err| format!("{:#}", err)),
                    Err(err) => Err(err.user_message("Failed to download report")),
                };
                match result {
                    Ok(()) => Logger::info_with_component("reports", &format!("downloaded {}", file_name)),
                    Err(message) => {
                        Logger::error_with_component("reports", &format!("download of {} failed: {}", file_name, message));
                        download_error.set(Some(message));
                    }
                }
                downloading.set(false);
            });
        }
    };

    let on_download_month = {
        let download = download.clone();
        let period = props.period;
        Callback::from(move |_: MouseEvent| download(ReportDownload::monthly(period)))
    };
    let on_daily_date = {
        let daily_date = daily_date.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            daily_date.set(parse_date(&input.value()).ok());
        })
    };
    let on_download_day = {
        let daily_date = daily_date.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(date) = *daily_date {
                download(ReportDownload::daily(date));
            }
        })
    };

    let body = match &report.state {
        LoadState::Loading => html! { <LoadingPanel /> },
        LoadState::Failed(error) => html! { <LoadingPanel error={error.clone()} /> },
        LoadState::Ready(report) => {
            let (labels, values): (Vec<String>, Vec<f64>) = report
                .table_earnings
                .iter()
                .map(|(table, earnings)| (table.clone(), *earnings))
                .unzip();
            html! {
                <>
                    <div class="stats-grid">
                        <StatCard label="Booking earnings" value={format_money(report.total_earnings)} accent="#10b981" />
                        <StatCard label="Bookings" value={report.total_bookings.to_string()} accent="#3b82f6" />
                        <StatCard label="ABO sold" value={report.abo_subscriptions_sold.to_string()} accent="#f59e0b" />
                        <StatCard label="ABO revenue" value={format_money(report.abo_revenue)} accent="#f59e0b" />
                        <StatCard label="Total revenue" value={format_money(report.total_revenue)} accent="#8b5cf6" />
                    </div>
                    <Chart
                        title={format!("Earnings by table, {}", report.period().label())}
                        {labels}
                        {values}
                        kind={ChartKind::Bar}
                        color={(16, 185, 129)}
                        y_desc="Earnings"
                    />
                </>
            }
        }
    };

    html! {
        <div class="report-tab">
            {if props.can_download {
                html! {
                    <div class="report-downloads">
                        <button class="btn btn-primary" onclick={on_download_month} disabled={*downloading}>
                            {format!("Download {} (CSV)", props.period.label())}
                        </button>
                        <input type="date" class="form-input" onchange={on_daily_date} />
                        <button class="btn btn-secondary" onclick={on_download_day}
                            disabled={*downloading || daily_date.is_none()}>
                            {"Download day (CSV)"}
                        </button>
                    </div>
                }
            } else {
                html! {}
            }}
            {if let Some(text) = (*download_error).clone() {
                html! { <ErrorMessage {text} /> }
            } else {
                html! {}
            }}
            {body}
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct SubscriptionTabProps {
    api_client: ApiClient,
    year: i32,
}

#[function_component(SubscriptionTab)]
fn subscription_tab(props: &SubscriptionTabProps) -> Html {
    let report = use_abo_report(&props.api_client, props.year);

    match &report.state {
        LoadState::Loading => html! { <LoadingPanel /> },
        LoadState::Failed(error) => html! { <LoadingPanel error={error.clone()} /> },
        LoadState::Ready(report) => {
            let labels: Vec<String> = MONTH_NAMES.iter().map(|name| name.chars().take(3).collect()).collect();
            let values: Vec<f64> = report.sales_by_month().iter().map(|count| *count as f64).collect();
            html! {
                <div class="report-tab">
                    <div class="stats-grid">
                        <StatCard label="Active ABO holders" value={report.active_abo_count.to_string()} accent="#10b981" />
                        <StatCard label="Monthly rate" value={format_money(report.monthly_rate)} accent="#f59e0b" />
                    </div>
                    <Chart
                        title={format!("ABO sales {}", report.year)}
                        {labels}
                        {values}
                        kind={ChartKind::Line}
                        color={(245, 158, 11)}
                        y_desc="Subscriptions"
                        currency={false}
                    />
                    {if report.active_abos.is_empty() {
                        html! { <div class="empty-state">{"No active subscriptions."}</div> }
                    } else {
                        html! {
                            <table class="data-table">
                                <thead>
                                    <tr>
                                        <th>{"Customer"}</th>
                                        <th>{"Start"}</th>
                                        <th>{"End"}</th>
                                    </tr>
                                </thead>
                                <tbody>
                                    {for report.active_abos.iter().map(|abo| html! {
                                        <tr key={abo.id}>
                                            <td>{abo.name.clone()}</td>
                                            <td>{abo.abo_start.as_deref().map(display_date).unwrap_or_else(|| "-".to_string())}</td>
                                            <td>{abo.abo_end.as_deref().map(display_date).unwrap_or_else(|| "-".to_string())}</td>
                                        </tr>
                                    })}
                                </tbody>
                            </table>
                        }
                    }}
                </div>
            }
        }
    }
}

#[derive(Properties, PartialEq)]
struct TrainerBillingTabProps {
    api_client: ApiClient,
    period: ReportPeriod,
}

#[function_component(TrainerBillingTab)]
fn trainer_billing_tab(props: &TrainerBillingTabProps) -> Html {
    let report = use_trainer_report(&props.api_client, props.period);

    match &report.state {
        LoadState::Loading => html! { <LoadingPanel /> },
        LoadState::Failed(error) => html! { <LoadingPanel error={error.clone()} /> },
        LoadState::Ready(report) if report.trainers.is_empty() => html! {
            <div class="empty-state">{format!("No trainer hours in {}.", props.period.label())}</div>
        },
        LoadState::Ready(report) => html! {
            <div class="report-tab">
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>{"Trainer"}</th>
                            <th>{"Hourly rate"}</th>
                            <th>{"Hours"}</th>
                            <th>{"Earnings"}</th>
                        </tr>
                    </thead>
                    <tbody>
                        {for report.trainers.iter().map(|billing| html! {
                            <tr key={billing.trainer_id}>
                                <td>{billing.trainer_name.clone()}</td>
                                <td>{format_money(billing.hourly_rate)}</td>
                                <td>{format!("{:.1}", billing.total_hours)}</td>
                                <td>{format_money(billing.total_earnings)}</td>
                            </tr>
                        })}
                    </tbody>
                    <tfoot>
                        <tr>
                            <th colspan="2">{"Total"}</th>
                            <th>{format!("{:.1}", report.total_hours())}</th>
                            <th>{format_money(report.total_earnings())}</th>
                        </tr>
                    </tfoot>
                </table>
            </div>
        },
    }
}
