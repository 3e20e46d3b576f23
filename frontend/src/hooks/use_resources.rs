//! Per-page loaders. Each one issues its own request and fails on its own.

use chrono::NaiveDate;
use shared::{
    AboReport, Booking, Customer, DailyReport, MonthlyReport, ReportPeriod, Settings, Table,
    Trainer, TrainerReport, User,
};
use yew::prelude::*;

use crate::hooks::use_load::{use_load, UseLoadResult};
use crate::services::ApiClient;

#[hook]
pub fn use_bookings(api_client: &ApiClient) -> UseLoadResult<Vec<Booking>> {
    use_load("bookings", api_client.clone(), |api| async move {
        api.get_bookings(None).await
    })
}

#[hook]
pub fn use_customers(api_client: &ApiClient) -> UseLoadResult<Vec<Customer>> {
    use_load("customers", api_client.clone(), |api| async move {
        api.get_customers().await
    })
}

#[hook]
pub fn use_trainers(api_client: &ApiClient) -> UseLoadResult<Vec<Trainer>> {
    use_load("trainers", api_client.clone(), |api| async move {
        api.get_trainers().await
    })
}

#[hook]
pub fn use_tables(api_client: &ApiClient) -> UseLoadResult<Vec<Table>> {
    use_load("tables", api_client.clone(), |api| async move {
        api.get_tables().await
    })
}

#[hook]
pub fn use_users(api_client: &ApiClient) -> UseLoadResult<Vec<User>> {
    use_load("users", api_client.clone(), |api| async move {
        api.get_users().await
    })
}

#[hook]
pub fn use_settings(api_client: &ApiClient) -> UseLoadResult<Settings> {
    use_load("settings", api_client.clone(), |api| async move {
        api.get_settings().await
    })
}

#[hook]
pub fn use_daily_report(api_client: &ApiClient, date: NaiveDate) -> UseLoadResult<DailyReport> {
    use_load("daily report", (api_client.clone(), date), |(api, date)| async move {
        api.get_daily_report(date).await
    })
}

#[hook]
pub fn use_monthly_report(api_client: &ApiClient, period: ReportPeriod) -> UseLoadResult<MonthlyReport> {
    use_load("monthly report", (api_client.clone(), period), |(api, period)| async move {
        api.get_monthly_report(period).await
    })
}

#[hook]
pub fn use_trainer_report(api_client: &ApiClient, period: ReportPeriod) -> UseLoadResult<TrainerReport> {
    use_load("trainer report", (api_client.clone(), period), |(api, period)| async move {
        api.get_trainer_report(period).await
    })
}

#[hook]
pub fn use_abo_report(api_client: &ApiClient, year: i32) -> UseLoadResult<AboReport> {
    use_load("subscription report", (api_client.clone(), year), |(api, year)| async move {
        api.get_abo_report(year).await
    })
}
