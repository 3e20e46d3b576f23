//! In-memory filtering for the list pages. Filters re-run synchronously on
//! every input change; nothing here talks to the backend.

use serde::{Deserialize, Serialize};

use crate::{Booking, Customer, Trainer};

/// Table selector of the bookings page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableFilter {
    #[default]
    All,
    Id(i64),
}

impl TableFilter {
    /// Parse a `<select>` value: `""` means all tables, anything else an id.
    pub fn from_select_value(value: &str) -> Self {
        match value.trim().parse::<i64>() {
            Ok(id) => TableFilter::Id(id),
            Err(_) => TableFilter::All,
        }
    }

    pub fn select_value(&self) -> String {
        match self {
            TableFilter::All => String::new(),
            TableFilter::Id(id) => id.to_string(),
        }
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        match self {
            TableFilter::All => true,
            TableFilter::Id(id) => booking.table_id == *id,
        }
    }
}

/// Trainer selector of the bookings page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrainerFilter {
    #[default]
    All,
    /// Bookings without a trainer (`"none"` in the select)
    Unassigned,
    Id(i64),
}

impl TrainerFilter {
    pub const UNASSIGNED_VALUE: &'static str = "none";

    pub fn from_select_value(value: &str) -> Self {
        let value = value.trim();
        if value == Self::UNASSIGNED_VALUE {
            return TrainerFilter::Unassigned;
        }
        match value.parse::<i64>() {
            Ok(id) => TrainerFilter::Id(id),
            Err(_) => TrainerFilter::All,
        }
    }

    pub fn select_value(&self) -> String {
        match self {
            TrainerFilter::All => String::new(),
            TrainerFilter::Unassigned => Self::UNASSIGNED_VALUE.to_string(),
            TrainerFilter::Id(id) => id.to_string(),
        }
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        match self {
            TrainerFilter::All => true,
            TrainerFilter::Unassigned => booking.trainer_id.is_none(),
            TrainerFilter::Id(id) => booking.trainer_id == Some(*id),
        }
    }
}

/// Combined search + selectors of the bookings page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingFilter {
    pub search: String,
    pub table: TableFilter,
    pub trainer: TrainerFilter,
}

impl BookingFilter {
    pub fn matches(&self, booking: &Booking) -> bool {
        matches_search(booking, &self.search) && self.table.matches(booking) && self.trainer.matches(booking)
    }

    /// Keep the matching bookings in their original order.
    pub fn apply(&self, bookings: &[Booking]) -> Vec<Booking> {
        bookings.iter().filter(|booking| self.matches(booking)).cloned().collect()
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Customer, table or trainer name contains `term`, ignoring case.
/// An empty term matches everything.
pub fn matches_search(booking: &Booking, term: &str) -> bool {
    let term = term.to_lowercase();
    if term.is_empty() {
        return true;
    }
    contains_ci(&booking.customer_name, &term)
        || contains_ci(&booking.table_name, &term)
        || booking
            .trainer_name
            .as_deref()
            .map(|name| contains_ci(name, &term))
            .unwrap_or(false)
}

/// Latest booking first. Bookings without a valid interval sink to the end
/// and keep their relative order.
pub fn sort_newest_first(bookings: &mut [Booking]) {
    bookings.sort_by(|a, b| {
        let a_start = a.interval().ok().map(|interval| interval.start());
        let b_start = b.interval().ok().map(|interval| interval.start());
        b_start.cmp(&a_start)
    });
}

/// Summary cards of the bookings page
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingStats {
    pub total: usize,
    pub with_trainer: usize,
    pub subscription: usize,
    pub revenue: f64,
}

impl BookingStats {
    pub fn of(bookings: &[Booking]) -> Self {
        bookings.iter().fold(Self::default(), |mut stats, booking| {
            stats.total += 1;
            if booking.has_trainer() {
                stats.with_trainer += 1;
            }
            if booking.is_abo {
                stats.subscription += 1;
            }
            stats.revenue += booking.price;
            stats
        })
    }
}

/// Customers whose name or contact contains `term`, ignoring case.
pub fn search_customers(customers: &[Customer], term: &str) -> Vec<Customer> {
    let term = term.to_lowercase();
    customers
        .iter()
        .filter(|customer| {
            term.is_empty()
                || contains_ci(&customer.name, &term)
                || customer
                    .contact
                    .as_deref()
                    .map(|contact| contains_ci(contact, &term))
                    .unwrap_or(false)
        })
        .cloned()
        .collect()
}

/// Trainers whose name or email contains `term`, ignoring case.
pub fn search_trainers(trainers: &[Trainer], term: &str) -> Vec<Trainer> {
    let term = term.to_lowercase();
    trainers
        .iter()
        .filter(|trainer| {
            term.is_empty() || contains_ci(&trainer.name, &term) || contains_ci(&trainer.email, &term)
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::booking;

    fn sample() -> Vec<Booking> {
        let mut first = booking(1, 1, "2025-03-10", "09:00", 60);
        first.customer_name = "Anna Schmidt".to_string();

        let mut second = booking(2, 2, "2025-03-11", "18:00", 30);
        second.customer_name = "Boris Petrov".to_string();
        second.trainer_id = Some(5);
        second.trainer_name = Some("Lena Vogel".to_string());
        second.is_abo = true;
        second.price = 8.0;

        let mut third = booking(3, 1, "2025-03-09", "10:30", 60);
        third.customer_name = "Carla Diaz".to_string();
        third.trainer_id = Some(6);
        third.trainer_name = Some("Tomas Ruiz".to_string());

        vec![first, second, third]
    }

    fn ids(bookings: &[Booking]) -> Vec<i64> {
        bookings.iter().map(|booking| booking.id).collect()
    }

    #[test]
    fn test_empty_search_returns_everything() {
        let bookings = sample();
        let filter = BookingFilter::default();
        assert_eq!(filter.apply(&bookings), bookings);
    }

    #[test]
    fn test_whitespace_in_search_term_is_matched_literally() {
        let mut single = booking(1, 1, "2025-03-10", "09:00", 60);
        single.customer_name = "Anna".to_string();
        single.table_name = "Center".to_string();
        let mut full = booking(2, 1, "2025-03-10", "10:00", 60);
        full.customer_name = "Anna Schmidt".to_string();
        full.table_name = "Center".to_string();
        let bookings = vec![single, full];

        let search = |term: &str| {
            let filter = BookingFilter {
                search: term.to_string(),
                ..Default::default()
            };
            ids(&filter.apply(&bookings))
        };
        assert_eq!(search(" "), vec![2]);
        assert_eq!(search("anna "), vec![2]);
        assert!(search("schmidt ").is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_across_names() {
        let bookings = sample();
        let search = |term: &str| {
            let filter = BookingFilter {
                search: term.to_string(),
                ..Default::default()
            };
            ids(&filter.apply(&bookings))
        };

        assert_eq!(search("anna"), vec![1]);
        assert_eq!(search("TABLE 1"), vec![1, 3]);
        assert_eq!(search("vogel"), vec![2]);
        assert_eq!(search("r"), vec![2, 3]);
        assert!(search("nobody").is_empty());
    }

    #[test]
    fn test_trainer_filter() {
        let bookings = sample();
        let by_trainer = |value: &str| {
            let filter = BookingFilter {
                trainer: TrainerFilter::from_select_value(value),
                ..Default::default()
            };
            ids(&filter.apply(&bookings))
        };

        assert_eq!(by_trainer("none"), vec![1]);
        assert_eq!(by_trainer("5"), vec![2]);
        assert_eq!(by_trainer("6"), vec![3]);
        assert_eq!(by_trainer(""), vec![1, 2, 3]);
        assert!(by_trainer("99").is_empty());
    }

    #[test]
    fn test_table_filter_combines_with_search() {
        let bookings = sample();
        let filter = BookingFilter {
            search: "carla".to_string(),
            table: TableFilter::from_select_value("1"),
            trainer: TrainerFilter::All,
        };
        assert_eq!(ids(&filter.apply(&bookings)), vec![3]);

        let filter = BookingFilter {
            table: TableFilter::Id(2),
            trainer: TrainerFilter::Unassigned,
            ..Default::default()
        };
        assert!(filter.apply(&bookings).is_empty());
    }

    #[test]
    fn test_select_values_round_trip() {
        assert_eq!(TrainerFilter::Unassigned.select_value(), "none");
        assert_eq!(TrainerFilter::from_select_value("none"), TrainerFilter::Unassigned);
        assert_eq!(TableFilter::from_select_value(""), TableFilter::All);
        assert_eq!(TableFilter::Id(4).select_value(), "4");
    }

    #[test]
    fn test_sort_newest_first_puts_broken_records_last() {
        let mut bookings = sample();
        bookings.push(booking(4, 1, "garbage", "09:00", 60));
        bookings.insert(0, booking(5, 1, "2025-03-11", "9:00", 30));

        sort_newest_first(&mut bookings);
        assert_eq!(ids(&bookings), vec![2, 5, 1, 3, 4]);
    }

    #[test]
    fn test_stats() {
        let stats = BookingStats::of(&sample());
        assert_eq!(stats.total, 3);
        assert_eq!(stats.with_trainer, 2);
        assert_eq!(stats.subscription, 1);
        assert!((stats.revenue - 28.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_customer_and_trainer_search() {
        let customers = vec![
            Customer {
                id: 1,
                name: "Anna".to_string(),
                contact: Some("anna@example.com".to_string()),
                is_abo_holder: false,
                abo_start: None,
                abo_end: None,
                created_at: None,
            },
            Customer {
                id: 2,
                name: "Boris".to_string(),
                contact: None,
                is_abo_holder: true,
                abo_start: None,
                abo_end: None,
                created_at: None,
            },
        ];
        assert_eq!(search_customers(&customers, "EXAMPLE").len(), 1);
        assert_eq!(search_customers(&customers, "").len(), 2);
        assert!(search_customers(&customers, " ").is_empty());

        let trainers = vec![Trainer {
            id: 1,
            name: "Lena".to_string(),
            email: "lena@club.de".to_string(),
            hourly_rate: 25.0,
            created_at: None,
        }];
        assert_eq!(search_trainers(&trainers, "club").len(), 1);
        assert!(search_trainers(&trainers, "tomas").is_empty());
        assert!(search_trainers(&trainers, "lena ").is_empty());
    }
}
