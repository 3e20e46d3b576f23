use chrono::NaiveDate;
use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::interval::DATE_FORMAT;
use shared::{
    AboReport, Booking, BookingRequest, Customer, CustomerRequest, DailyReport, ErrorBody,
    LoginRequest, LoginResponse, MessageResponse, MonthlyReport, ReportDownload, ReportPeriod,
    Settings, SettingsUpdate, Table, TableRequest, Trainer, TrainerReport, TrainerRequest, User,
    UserRequest,
};
use thiserror::Error;
use yew::Callback;

use crate::services::config::AppConfig;
use crate::services::Logger;

/// Failure of a single REST call
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),
    #[error("failed to encode request: {0}")]
    Serialization(String),
    #[error("not signed in or session expired")]
    Unauthorized,
    #[error("request failed with status {status}")]
    Backend { status: u16, message: Option<String> },
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text shown to the user: the backend's own message when it sent one,
    /// otherwise `generic`.
    pub fn user_message(&self, generic: &str) -> String {
        match self {
            ApiError::Backend {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            ApiError::Unauthorized => "Your session has expired, please sign in again".to_string(),
            _ => generic.to_string(),
        }
    }

    /// Message for the booking editor, `None` when only the generic text applies
    pub fn backend_message(&self) -> Option<String> {
        match self {
            ApiError::Backend {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => Some(message.clone()),
            _ => None,
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, ApiError::Backend { status: 409, .. })
    }
}

/// API client for the booking backend
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    on_unauthorized: Option<Callback<()>>,
}

impl ApiClient {
    /// Client for the configured base URL, without credentials
    pub fn new() -> Self {
        Self::with_base_url(AppConfig::from_build_env().api_base_url)
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url,
            token: None,
            on_unauthorized: None,
        }
    }

    /// Same client sending `Authorization: Bearer <token>`
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Called whenever the backend answers 401
    pub fn with_unauthorized_handler(mut self, handler: Callback<()>) -> Self {
        self.on_unauthorized = Some(handler);
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn execute(&self, method: &str, path: &str, request: Request) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        if response.ok() {
            return Ok(response);
        }

        let status = response.status();
        Logger::warn_with_component("api", &format!("{} {} returned {}", method, path, status));

        if status == 401 {
            if let Some(handler) = &self.on_unauthorized {
                handler.emit(());
            }
            return Err(ApiError::Unauthorized);
        }

        let message = response.text().await.ok().and_then(|body| error_message(&body));
        Err(ApiError::Backend { status, message })
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let request = self
            .authorized(Request::get(&self.url(path)))
            .build()
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Self::decode(self.execute("GET", path, request).await?).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let request = self
            .authorized(Request::post(&self.url(path)))
            .json(body)
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Self::decode(self.execute("POST", path, request).await?).await
    }

    async fn put<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let request = self
            .authorized(Request::put(&self.url(path)))
            .json(body)
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        Self::decode(self.execute("PUT", path, request).await?).await
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let request = self
            .authorized(Request::delete(&self.url(path)))
            .build()
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        let response = self.execute("DELETE", path, request).await?;
        // Acknowledgement body is optional
        let body = response.text().await.unwrap_or_default();
        if let Ok(ack) = serde_json::from_str::<MessageResponse>(&body) {
            Logger::debug_with_component("api", &format!("DELETE {}: {}", path, ack.message));
        }
        Ok(())
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        self.post("/auth/login", request).await
    }

    /// All bookings, or those between two dates inclusive
    pub async fn get_bookings(&self, range: Option<(NaiveDate, NaiveDate)>) -> Result<Vec<Booking>, ApiError> {
        let query = range
            .map(|(start, end)| {
                format!(
                    "?start_date={}&end_date={}",
                    start.format(DATE_FORMAT),
                    end.format(DATE_FORMAT)
                )
            })
            .unwrap_or_default();
        self.get(&format!("/bookings{}", query)).await
    }

    pub async fn create_booking(&self, request: &BookingRequest) -> Result<Booking, ApiError> {
        self.post("/bookings", request).await
    }

    pub async fn update_booking(&self, id: i64, request: &BookingRequest) -> Result<Booking, ApiError> {
        self.put(&format!("/bookings/{}", id), request).await
    }

    pub async fn delete_booking(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/bookings/{}", id)).await
    }

    pub async fn get_customers(&self) -> Result<Vec<Customer>, ApiError> {
        self.get("/customers").await
    }

    pub async fn create_customer(&self, request: &CustomerRequest) -> Result<Customer, ApiError> {
        self.post("/customers", request).await
    }

    pub async fn update_customer(&self, id: i64, request: &CustomerRequest) -> Result<Customer, ApiError> {
        self.put(&format!("/customers/{}", id), request).await
    }

    pub async fn delete_customer(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/customers/{}", id)).await
    }

    pub async fn get_trainers(&self) -> Result<Vec<Trainer>, ApiError> {
        self.get("/trainers").await
    }

    pub async fn create_trainer(&self, request: &TrainerRequest) -> Result<Trainer, ApiError> {
        self.post("/trainers", request).await
    }

    pub async fn update_trainer(&self, id: i64, request: &TrainerRequest) -> Result<Trainer, ApiError> {
        self.put(&format!("/trainers/{}", id), request).await
    }

    pub async fn delete_trainer(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/trainers/{}", id)).await
    }

    pub async fn get_tables(&self) -> Result<Vec<Table>, ApiError> {
        self.get("/tables").await
    }

    pub async fn create_table(&self, request: &TableRequest) -> Result<Table, ApiError> {
        self.post("/tables", request).await
    }

    pub async fn update_table(&self, id: i64, request: &TableRequest) -> Result<Table, ApiError> {
        self.put(&format!("/tables/{}", id), request).await
    }

    pub async fn delete_table(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/tables/{}", id)).await
    }

    pub async fn get_users(&self) -> Result<Vec<User>, ApiError> {
        self.get("/users").await
    }

    pub async fn create_user(&self, request: &UserRequest) -> Result<User, ApiError> {
        self.post("/users", request).await
    }

    pub async fn update_user(&self, id: i64, request: &UserRequest) -> Result<User, ApiError> {
        self.put(&format!("/users/{}", id), request).await
    }

    pub async fn delete_user(&self, id: i64) -> Result<(), ApiError> {
        self.delete(&format!("/users/{}", id)).await
    }

    pub async fn get_settings(&self) -> Result<Settings, ApiError> {
        self.get("/settings").await
    }

    pub async fn update_settings(&self, update: &SettingsUpdate) -> Result<Settings, ApiError> {
        self.put("/settings", update).await
    }

    pub async fn get_daily_report(&self, date: NaiveDate) -> Result<DailyReport, ApiError> {
        self.get(&format!("/reports/daily?date={}", date.format(DATE_FORMAT)))
            .await
    }

    pub async fn get_monthly_report(&self, period: ReportPeriod) -> Result<MonthlyReport, ApiError> {
        self.get(&format!("/reports/monthly?{}", period.query())).await
    }

    pub async fn get_trainer_report(&self, period: ReportPeriod) -> Result<TrainerReport, ApiError> {
        self.get(&format!("/reports/trainers?{}", period.query())).await
    }

    pub async fn get_abo_report(&self, year: i32) -> Result<AboReport, ApiError> {
        self.get(&format!("/reports/abo?year={}", year)).await
    }

    /// Raw bytes of a generated report file
    pub async fn download_report(&self, download: &ReportDownload) -> Result<Vec<u8>, ApiError> {
        let path = format!("/reports/download?{}", download.query());
        let request = self
            .authorized(Request::get(&self.url(&path)))
            .build()
            .map_err(|e| ApiError::Serialization(e.to_string()))?;
        self.execute("GET", &path, request)
            .await?
            .binary()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

/// `error` field of a JSON error body
fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body.trim())
        .ok()
        .map(|body| body.error)
        .filter(|error| !error.trim().is_empty())
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_backend_text() {
        let conflict = ApiError::Backend {
            status: 409,
            message: Some("Time slot already booked".to_string()),
        };
        assert_eq!(conflict.user_message("Failed to save booking"), "Time slot already booked");
        assert!(conflict.is_conflict());
        assert_eq!(conflict.backend_message().as_deref(), Some("Time slot already booked"));

        let blank = ApiError::Backend {
            status: 500,
            message: Some("  ".to_string()),
        };
        assert_eq!(blank.user_message("Failed to save booking"), "Failed to save booking");
        assert_eq!(blank.backend_message(), None);

        let network = ApiError::Network("offline".to_string());
        assert_eq!(network.user_message("Failed to load bookings"), "Failed to load bookings");
        assert!(!network.is_conflict());
    }

    #[test]
    fn test_error_message_reads_json_error_field() {
        assert_eq!(
            error_message(r#"{"error": "Time slot already booked"}"#).as_deref(),
            Some("Time slot already booked")
        );
        assert_eq!(error_message(""), None);
        assert_eq!(error_message("<html>Bad Gateway</html>"), None);
        assert_eq!(error_message(r#"{"error": ""}"#), None);
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let client = ApiClient::with_base_url("http://localhost:5008/api".to_string()).with_token("t");
        assert_eq!(client.url("/bookings/3"), "http://localhost:5008/api/bookings/3");
        assert_eq!(client.token.as_deref(), Some("t"));
    }
}
