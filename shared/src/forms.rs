//! Form models for the create/edit modals.
//!
//! Forms hold what the inputs show (strings and select values). The single
//! place where a select value becomes an optional id, and back, is
//! [`parse_optional_id`] / [`optional_id_value`].

use thiserror::Error;

use crate::interval::{self, find_conflict, BookingInterval, IntervalError};
use crate::{
    Booking, BookingDuration, BookingRequest, Customer, CustomerRequest, Role, Table, TableRequest,
    Trainer, TrainerRequest, User, UserRequest,
};

/// Minimum password length accepted when creating an account
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormError {
    #[error("Please select a customer")]
    MissingCustomer,
    #[error("Please select a table")]
    MissingTable,
    #[error("{0}")]
    Interval(#[from] IntervalError),
    #[error("Time slot already booked ({start} - {end})")]
    Conflict {
        booking_id: i64,
        start: String,
        end: String,
    },
    #[error("{0} is required")]
    MissingField(&'static str),
    #[error("{0} must be a number")]
    InvalidNumber(&'static str),
    #[error("Password must be at least 6 characters")]
    PasswordTooShort,
}

/// Select value to optional id. `""` and anything non-numeric mean "unset".
pub fn parse_optional_id(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// Optional id to select value. `None` becomes `""`, never `"null"`.
pub fn optional_id_value(id: Option<i64>) -> String {
    id.map(|id| id.to_string()).unwrap_or_default()
}

fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn required_text(value: &str, field: &'static str) -> Result<String, FormError> {
    optional_text(value).ok_or(FormError::MissingField(field))
}

/// Values of the booking modal
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BookingForm {
    pub customer_id: Option<i64>,
    pub trainer_id: Option<i64>,
    pub table_id: Option<i64>,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    pub duration: u32,
    pub info: String,
}

impl BookingForm {
    /// Prefill for an empty calendar slot
    pub fn for_slot(date: &str, time: &str, table_id: Option<i64>) -> Self {
        Self {
            customer_id: None,
            trainer_id: None,
            table_id,
            date: date.to_string(),
            time: interval::pad_time(time),
            duration: BookingDuration::default().minutes(),
            info: String::new(),
        }
    }

    /// Prefill from an existing booking
    pub fn from_booking(booking: &Booking) -> Self {
        Self {
            customer_id: Some(booking.customer_id),
            trainer_id: booking.trainer_id,
            table_id: Some(booking.table_id),
            date: booking.date.clone(),
            time: interval::pad_time(&booking.time),
            duration: booking.duration,
            info: booking.info.clone().unwrap_or_default(),
        }
    }

    pub fn interval(&self) -> Result<BookingInterval, IntervalError> {
        BookingInterval::parse(&self.date, &self.time, self.duration)
    }

    /// Validate locally and build the request body.
    pub fn to_request(&self) -> Result<BookingRequest, FormError> {
        let customer_id = self.customer_id.ok_or(FormError::MissingCustomer)?;
        let table_id = self.table_id.ok_or(FormError::MissingTable)?;
        let interval = self.interval()?;

        Ok(BookingRequest {
            customer_id,
            trainer_id: self.trainer_id,
            table_id,
            date: interval.wire_date(),
            time: interval.wire_time(),
            duration: interval.duration(),
            info: self.info.trim().to_string(),
        })
    }

    /// [`BookingForm::to_request`] plus an overlap check against the bookings
    /// already loaded on the page.
    pub fn to_request_checked(
        &self,
        existing: &[Booking],
        editing_id: Option<i64>,
    ) -> Result<BookingRequest, FormError> {
        let request = self.to_request()?;
        let candidate = self.interval()?;
        if let Some(conflict) = find_conflict(&candidate, request.table_id, existing, editing_id) {
            let (start, end) = conflict
                .interval()
                .map(|existing| (existing.start_iso(), existing.end_iso()))
                .unwrap_or_default();
            return Err(FormError::Conflict {
                booking_id: conflict.id,
                start,
                end,
            });
        }
        Ok(request)
    }
}

/// Values of the customer modal
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CustomerForm {
    pub name: String,
    pub contact: String,
    pub is_abo_holder: bool,
    pub abo_start: String,
    pub abo_end: String,
}

impl CustomerForm {
    pub fn from_customer(customer: &Customer) -> Self {
        Self {
            name: customer.name.clone(),
            contact: customer.contact.clone().unwrap_or_default(),
            is_abo_holder: customer.is_abo_holder,
            abo_start: customer.abo_start.clone().unwrap_or_default(),
            abo_end: customer.abo_end.clone().unwrap_or_default(),
        }
    }

    /// Subscription dates are only sent for subscription holders.
    pub fn to_request(&self) -> Result<CustomerRequest, FormError> {
        let name = required_text(&self.name, "Name")?;
        let (abo_start, abo_end) = if self.is_abo_holder {
            let start = optional_text(&self.abo_start);
            let end = optional_text(&self.abo_end);
            for date in [&start, &end].into_iter().flatten() {
                interval::parse_date(date)?;
            }
            (start, end)
        } else {
            (None, None)
        };

        Ok(CustomerRequest {
            name,
            contact: optional_text(&self.contact),
            is_abo_holder: self.is_abo_holder,
            abo_start,
            abo_end,
        })
    }
}

/// Values of the trainer modal
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TrainerForm {
    pub name: String,
    pub email: String,
    pub hourly_rate: String,
}

impl TrainerForm {
    pub fn from_trainer(trainer: &Trainer) -> Self {
        Self {
            name: trainer.name.clone(),
            email: trainer.email.clone(),
            hourly_rate: format!("{:.2}", trainer.hourly_rate),
        }
    }

    pub fn to_request(&self) -> Result<TrainerRequest, FormError> {
        let name = required_text(&self.name, "Name")?;
        let email = required_text(&self.email, "Email")?;
        let hourly_rate = match optional_text(&self.hourly_rate) {
            None => 0.0,
            Some(rate) => rate
                .parse::<f64>()
                .ok()
                .filter(|rate| rate.is_finite() && *rate >= 0.0)
                .ok_or(FormError::InvalidNumber("Hourly rate"))?,
        };
        Ok(TrainerRequest {
            name,
            email,
            hourly_rate,
        })
    }
}

/// Values of the user modal
#[derive(Debug, Clone, PartialEq)]
pub struct UserForm {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub trainer_id: Option<i64>,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            role: Role::Trainer,
            trainer_id: None,
        }
    }
}

impl UserForm {
    pub fn from_user(user: &User) -> Self {
        Self {
            username: user.username.clone(),
            password: String::new(),
            role: user.role,
            trainer_id: user.trainer_id,
        }
    }

    /// Changing the role drops any trainer link.
    pub fn set_role(&mut self, role: Role) {
        self.role = role;
        self.trainer_id = None;
    }

    /// A blank password on update keeps the current one.
    pub fn to_request(&self, creating: bool) -> Result<UserRequest, FormError> {
        let username = required_text(&self.username, "Username")?;
        // Sent exactly as typed
        let password = match self.password.as_str() {
            "" if creating => return Err(FormError::MissingField("Password")),
            "" => None,
            password if password.chars().count() < MIN_PASSWORD_LEN => {
                return Err(FormError::PasswordTooShort)
            }
            password => Some(password.to_string()),
        };
        let trainer_id = match self.role {
            Role::Trainer => self.trainer_id,
            Role::Admin => None,
        };
        Ok(UserRequest {
            username,
            password,
            role: self.role,
            trainer_id,
        })
    }
}

/// Values of the table inventory row editor
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableForm {
    pub name: String,
}

impl TableForm {
    pub fn from_table(table: &Table) -> Self {
        Self {
            name: table.name.clone(),
        }
    }

    pub fn to_request(&self) -> Result<TableRequest, FormError> {
        Ok(TableRequest {
            name: required_text(&self.name, "Table name")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::booking;

    #[test]
    fn test_select_value_normalization() {
        assert_eq!(parse_optional_id(""), None);
        assert_eq!(parse_optional_id("null"), None);
        assert_eq!(parse_optional_id(" 12 "), Some(12));
        assert_eq!(optional_id_value(None), "");
        assert_eq!(optional_id_value(Some(3)), "3");
    }

    #[test]
    fn test_slot_prefill_uses_default_duration() {
        let form = BookingForm::for_slot("2025-03-10", "9:00", Some(1));
        assert_eq!(form.duration, 60);
        assert_eq!(form.time, "09:00");
        assert_eq!(form.table_id, Some(1));
        assert_eq!(form.customer_id, None);
        assert_eq!(form.trainer_id, None);
    }

    #[test]
    fn test_edit_prefill_keeps_absent_trainer_unset() {
        let existing = booking(4, 2, "2025-03-10", "18:30", 30);
        let form = BookingForm::from_booking(&existing);
        assert_eq!(form.trainer_id, None);
        assert_eq!(optional_id_value(form.trainer_id), "");
        assert_eq!(form.info, "");
        assert_eq!(form.duration, 30);
    }

    #[test]
    fn test_request_requires_customer_table_and_interval() {
        let mut form = BookingForm::for_slot("2025-03-10", "09:00", None);
        assert_eq!(form.to_request(), Err(FormError::MissingCustomer));

        form.customer_id = Some(1);
        assert_eq!(form.to_request(), Err(FormError::MissingTable));

        form.table_id = Some(2);
        form.time = "nine".to_string();
        assert!(matches!(
            form.to_request(),
            Err(FormError::Interval(IntervalError::InvalidTime(_)))
        ));

        form.time = "9:00".to_string();
        form.duration = 90;
        assert_eq!(
            form.to_request(),
            Err(FormError::Interval(IntervalError::UnsupportedDuration(90)))
        );

        form.duration = 60;
        let request = form.to_request().unwrap();
        assert_eq!(request.time, "09:00");
        assert_eq!(request.date, "2025-03-10");
        assert_eq!(request.trainer_id, None);
    }

    #[test]
    fn test_conflict_check_skips_the_edited_booking() {
        let existing = vec![booking(1, 2, "2025-03-10", "09:00", 60)];
        let mut form = BookingForm::for_slot("2025-03-10", "09:30", Some(2));
        form.customer_id = Some(1);
        form.duration = 30;

        assert!(matches!(
            form.to_request_checked(&existing, None),
            Err(FormError::Conflict { booking_id: 1, .. })
        ));
        assert!(form.to_request_checked(&existing, Some(1)).is_ok());

        form.time = "10:00".to_string();
        assert!(form.to_request_checked(&existing, None).is_ok());
    }

    #[test]
    fn test_customer_form_drops_dates_without_subscription() {
        let form = CustomerForm {
            name: " Anna ".to_string(),
            contact: String::new(),
            is_abo_holder: false,
            abo_start: "2025-01-01".to_string(),
            abo_end: "2025-12-31".to_string(),
        };
        let request = form.to_request().unwrap();
        assert_eq!(request.name, "Anna");
        assert_eq!(request.contact, None);
        assert_eq!(request.abo_start, None);

        let subscribed = CustomerForm {
            is_abo_holder: true,
            abo_end: "31.12.2025".to_string(),
            ..form
        };
        assert!(matches!(
            subscribed.to_request(),
            Err(FormError::Interval(IntervalError::InvalidDate(_)))
        ));
    }

    #[test]
    fn test_trainer_form_rate_validation() {
        let mut form = TrainerForm {
            name: "Lena".to_string(),
            email: "lena@club.de".to_string(),
            hourly_rate: "25.5".to_string(),
        };
        assert_eq!(form.to_request().unwrap().hourly_rate, 25.5);

        form.hourly_rate = "abc".to_string();
        assert_eq!(form.to_request(), Err(FormError::InvalidNumber("Hourly rate")));

        form.hourly_rate = String::new();
        assert_eq!(form.to_request().unwrap().hourly_rate, 0.0);

        form.email = " ".to_string();
        assert_eq!(form.to_request(), Err(FormError::MissingField("Email")));
    }

    #[test]
    fn test_user_form_password_and_trainer_link() {
        let mut form = UserForm {
            username: "coach".to_string(),
            password: String::new(),
            role: Role::Trainer,
            trainer_id: Some(3),
        };
        assert_eq!(form.to_request(true), Err(FormError::MissingField("Password")));
        assert_eq!(form.to_request(false).unwrap().password, None);

        form.password = "123".to_string();
        assert_eq!(form.to_request(false), Err(FormError::PasswordTooShort));

        form.password = "secret1".to_string();
        assert_eq!(form.to_request(true).unwrap().trainer_id, Some(3));

        form.password = " secret1 ".to_string();
        assert_eq!(form.to_request(true).unwrap().password.as_deref(), Some(" secret1 "));

        form.set_role(Role::Admin);
        assert_eq!(form.trainer_id, None);
        form.trainer_id = Some(3);
        assert_eq!(form.to_request(true).unwrap().trainer_id, None);
    }
}
