//! Types shared by the booking manager front end: the wire records exchanged
//! with the REST backend and the pure booking logic the pages build on.

use serde::{Deserialize, Serialize};

pub mod access;
pub mod calendar;
pub mod classification;
pub mod editor;
pub mod filter;
pub mod forms;
pub mod interval;
pub mod pricing;
pub mod reports;

pub use access::{Access, Page, ReportTab, Role};
pub use calendar::{CalendarConfig, CalendarEvent, CalendarView};
pub use classification::BookingClass;
pub use editor::{BookingEditor, EditorError, EditorState, SubmitCommand, SubmitTarget};
pub use filter::{BookingFilter, BookingStats, TableFilter, TrainerFilter};
pub use forms::{BookingForm, CustomerForm, FormError, TableForm, TrainerForm, UserForm};
pub use interval::{BookingDuration, BookingInterval, IntervalError};
pub use pricing::{PricingKey, PricingMatrix};
pub use reports::{
    AboReport, ActiveAbo, DailyReport, MonthlyReport, MonthlySales, ReportDownload, ReportFormat,
    ReportKind, ReportPeriod, TrainerBilling, TrainerReport,
};

/// A booked table slot as returned by `GET /bookings`.
///
/// `date`, `time` and `duration` are kept exactly as the backend sent them;
/// the typed interval is derived per booking with [`Booking::interval`] so
/// one malformed record never breaks the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: i64,
    pub customer_id: i64,
    pub customer_name: String,
    #[serde(default)]
    pub trainer_id: Option<i64>,
    #[serde(default)]
    pub trainer_name: Option<String>,
    pub table_id: i64,
    pub table_name: String,
    /// Wall-clock date, `YYYY-MM-DD`
    pub date: String,
    /// Wall-clock time, `HH:MM`
    pub time: String,
    /// Minutes, 30 or 60
    pub duration: u32,
    pub price: f64,
    #[serde(default)]
    pub info: Option<String>,
    /// Customer holds an active subscription (ABO)
    #[serde(default)]
    pub is_abo: bool,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Booking {
    pub fn interval(&self) -> Result<BookingInterval, IntervalError> {
        BookingInterval::parse(&self.date, &self.time, self.duration)
    }

    pub fn has_trainer(&self) -> bool {
        self.trainer_id.is_some()
    }

    pub fn class(&self) -> BookingClass {
        BookingClass::of(self)
    }

    /// Calendar title, `Customer - Table`
    pub fn title(&self) -> String {
        format!("{} - {}", self.customer_name, self.table_name)
    }
}

/// Body of `POST /bookings` and `PUT /bookings/{id}`.
///
/// The backend derives the price from its pricing matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRequest {
    pub customer_id: i64,
    pub trainer_id: Option<i64>,
    pub table_id: i64,
    pub date: String,
    pub time: String,
    pub duration: BookingDuration,
    pub info: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub is_abo_holder: bool,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub abo_start: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub abo_end: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRequest {
    pub name: String,
    pub contact: Option<String>,
    pub is_abo_holder: bool,
    pub abo_start: Option<String>,
    pub abo_end: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trainer {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub hourly_rate: f64,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerRequest {
    pub name: String,
    pub email: String,
    pub hourly_rate: f64,
}

/// A physical table in the hall
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRequest {
    pub name: String,
}

/// An account that can sign in to the manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub role: Role,
    /// Trainer profile linked to a trainer account, used for billing reports
    #[serde(default)]
    pub trainer_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRequest {
    pub username: String,
    /// Omitted on update to keep the current password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub role: Role,
    pub trainer_id: Option<i64>,
}

/// Global settings returned by `GET /settings`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub id: Option<i64>,
    pub pricing_matrix: PricingMatrix,
    pub monthly_rate: f64,
    pub language: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub pricing_matrix: PricingMatrix,
    pub monthly_rate: f64,
    pub language: String,
}

impl From<&Settings> for SettingsUpdate {
    fn from(settings: &Settings) -> Self {
        Self {
            pricing_matrix: settings.pricing_matrix.clone(),
            monthly_rate: settings.monthly_rate,
            language: settings.language.clone(),
        }
    }
}

/// Languages the backend accepts as default UI language
pub const LANGUAGES: [(&str, &str); 4] = [
    ("en", "English"),
    ("de", "Deutsch"),
    ("ru", "Русский"),
    ("es", "Español"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
}

/// Error payload the backend sends with non-2xx responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Acknowledgement payload of delete endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    pub fn booking(id: i64, table_id: i64, date: &str, time: &str, duration: u32) -> Booking {
        Booking {
            id,
            customer_id: 1,
            customer_name: "Anna Schmidt".to_string(),
            trainer_id: None,
            trainer_name: None,
            table_id,
            table_name: format!("Table {}", table_id),
            date: date.to_string(),
            time: time.to_string(),
            duration,
            price: 10.0,
            info: None,
            is_abo: false,
            created_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_deserializes_backend_payload() {
        let json = r#"{
            "id": 7,
            "customer_id": 3,
            "customer_name": "Max Weber",
            "trainer_id": null,
            "trainer_name": null,
            "table_id": 2,
            "table_name": "Table 2",
            "date": "2025-03-10",
            "time": "09:00",
            "duration": 60,
            "price": 15.0,
            "info": "",
            "is_abo": false,
            "created_at": "2025-03-01T10:00:00"
        }"#;

        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.id, 7);
        assert!(!booking.has_trainer());
        assert_eq!(booking.title(), "Max Weber - Table 2");
        assert_eq!(booking.class(), BookingClass::Plain);

        let interval = booking.interval().unwrap();
        assert_eq!(interval.start_iso(), "2025-03-10T09:00:00");
        assert_eq!(interval.end_iso(), "2025-03-10T10:00:00");
    }

    #[test]
    fn test_malformed_booking_still_deserializes() {
        let json = r#"{
            "id": 8, "customer_id": 3, "customer_name": "Max", "table_id": 2,
            "table_name": "Table 2", "date": "2025-03-10", "time": "",
            "duration": 60, "price": 15.0
        }"#;

        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.interval(), Err(IntervalError::MissingTime));
    }

    #[test]
    fn test_booking_request_serializes_absent_trainer_as_null() {
        let request = BookingRequest {
            customer_id: 1,
            trainer_id: None,
            table_id: 2,
            date: "2025-03-10".to_string(),
            time: "09:00".to_string(),
            duration: BookingDuration::Hour,
            info: String::new(),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value["trainer_id"].is_null());
        assert_eq!(value["duration"], 60);
    }

    #[test]
    fn test_user_request_omits_blank_password() {
        let request = UserRequest {
            username: "coach".to_string(),
            password: None,
            role: Role::Trainer,
            trainer_id: Some(4),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["role"], "trainer");
    }
}
