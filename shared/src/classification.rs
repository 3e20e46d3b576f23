use serde::{Deserialize, Serialize};

use crate::Booking;

/// Visual category of a booking on the calendar and in lists.
///
/// Exactly one class applies. A subscription holder always wins over a
/// trainer assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BookingClass {
    Subscription,
    WithTrainer,
    Plain,
}

impl BookingClass {
    pub const ALL: [BookingClass; 3] = [
        BookingClass::Plain,
        BookingClass::WithTrainer,
        BookingClass::Subscription,
    ];

    pub fn classify(is_subscription_holder: bool, has_trainer: bool) -> Self {
        if is_subscription_holder {
            BookingClass::Subscription
        } else if has_trainer {
            BookingClass::WithTrainer
        } else {
            BookingClass::Plain
        }
    }

    pub fn of(booking: &Booking) -> Self {
        Self::classify(booking.is_abo, booking.has_trainer())
    }

    /// CSS modifier used by the calendar and the bookings table
    pub fn css_class(self) -> &'static str {
        match self {
            BookingClass::Subscription => "subscription",
            BookingClass::WithTrainer => "with-trainer",
            BookingClass::Plain => "plain",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            BookingClass::Subscription => "#10b981",
            BookingClass::WithTrainer => "#f59e0b",
            BookingClass::Plain => "#3b82f6",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BookingClass::Subscription => "ABO holder",
            BookingClass::WithTrainer => "With trainer",
            BookingClass::Plain => "Without trainer",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::booking;

    #[test]
    fn test_classification_precedence() {
        assert_eq!(BookingClass::classify(true, true), BookingClass::Subscription);
        assert_eq!(BookingClass::classify(true, false), BookingClass::Subscription);
        assert_eq!(BookingClass::classify(false, true), BookingClass::WithTrainer);
        assert_eq!(BookingClass::classify(false, false), BookingClass::Plain);
    }

    #[test]
    fn test_classification_of_bookings() {
        let mut plain = booking(1, 1, "2025-03-10", "09:00", 60);
        assert_eq!(plain.class(), BookingClass::Plain);

        plain.trainer_id = Some(2);
        assert_eq!(plain.class(), BookingClass::WithTrainer);

        plain.is_abo = true;
        assert_eq!(plain.class(), BookingClass::Subscription);
    }

    #[test]
    fn test_css_classes_are_distinct() {
        let classes: std::collections::HashSet<_> =
            BookingClass::ALL.iter().map(|class| class.css_class()).collect();
        assert_eq!(classes.len(), 3);
        assert_eq!(
            serde_json::to_string(&BookingClass::WithTrainer).unwrap(),
            "\"with-trainer\""
        );
    }
}
