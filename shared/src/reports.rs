//! Report payloads of the `/reports/*` endpoints and the query strings used
//! to request them.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::interval::DATE_FORMAT;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Year and month a report covers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub year: i32,
    /// 1 = January
    pub month: u32,
}

impl ReportPeriod {
    /// Month out of range is clamped into 1..=12.
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            year,
            month: month.clamp(1, 12),
        }
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    pub fn query(&self) -> String {
        format!("year={}&month={}", self.year, self.month)
    }

    pub fn month_name(&self) -> &'static str {
        self.month
            .checked_sub(1)
            .and_then(|index| MONTH_NAMES.get(index as usize))
            .copied()
            .unwrap_or("")
    }

    /// `March 2025`
    pub fn label(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }
}

/// `GET /reports/daily?date=YYYY-MM-DD`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyReport {
    pub date: String,
    pub total_earnings: f64,
    #[serde(default)]
    pub table_earnings: BTreeMap<String, f64>,
    pub total_bookings: u32,
}

/// `GET /reports/monthly?year=&month=`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyReport {
    pub year: i32,
    pub month: u32,
    pub total_earnings: f64,
    #[serde(default)]
    pub table_earnings: BTreeMap<String, f64>,
    pub total_bookings: u32,
    pub abo_subscriptions_sold: u32,
    pub abo_revenue: f64,
    pub total_revenue: f64,
}

impl MonthlyReport {
    pub fn period(&self) -> ReportPeriod {
        ReportPeriod::new(self.year, self.month)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerBilling {
    pub trainer_id: i64,
    pub trainer_name: String,
    pub hourly_rate: f64,
    pub total_hours: f64,
    pub total_earnings: f64,
}

/// `GET /reports/trainers?year=&month=`. Trainers only receive their own row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainerReport {
    pub year: i32,
    pub month: u32,
    #[serde(default)]
    pub trainers: Vec<TrainerBilling>,
}

impl TrainerReport {
    pub fn total_hours(&self) -> f64 {
        self.trainers.iter().map(|row| row.total_hours).sum()
    }

    pub fn total_earnings(&self) -> f64 {
        self.trainers.iter().map(|row| row.total_earnings).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveAbo {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub abo_start: Option<String>,
    #[serde(default)]
    pub abo_end: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlySales {
    pub month: u32,
    pub count: u32,
}

/// `GET /reports/abo?year=`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AboReport {
    pub active_abo_count: u32,
    #[serde(default)]
    pub active_abos: Vec<ActiveAbo>,
    pub monthly_rate: f64,
    pub year: i32,
    #[serde(default)]
    pub monthly_sales: Vec<MonthlySales>,
}

impl AboReport {
    /// Sales per month, January first, with missing months as zero
    pub fn sales_by_month(&self) -> [u32; 12] {
        let mut counts = [0; 12];
        for sale in &self.monthly_sales {
            if (1..=12).contains(&sale.month) {
                counts[(sale.month - 1) as usize] = sale.count;
            }
        }
        counts
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Daily(NaiveDate),
    Monthly(ReportPeriod),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ReportFormat {
    #[default]
    Csv,
}

impl ReportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReportFormat::Csv => "csv",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            ReportFormat::Csv => "text/csv",
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// `GET /reports/download` request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReportDownload {
    pub kind: ReportKind,
    pub format: ReportFormat,
}

impl ReportDownload {
    pub fn monthly(period: ReportPeriod) -> Self {
        Self {
            kind: ReportKind::Monthly(period),
            format: ReportFormat::Csv,
        }
    }

    pub fn daily(date: NaiveDate) -> Self {
        Self {
            kind: ReportKind::Daily(date),
            format: ReportFormat::Csv,
        }
    }

    pub fn query(&self) -> String {
        match self.kind {
            ReportKind::Daily(date) => format!(
                "type=daily&date={}&format={}",
                date.format(DATE_FORMAT),
                self.format
            ),
            ReportKind::Monthly(period) => {
                format!("type=monthly&{}&format={}", period.query(), self.format)
            }
        }
    }

    /// Name offered to the browser for the saved file
    pub fn file_name(&self) -> String {
        match self.kind {
            ReportKind::Daily(date) => {
                format!("daily_report_{}.{}", date.format(DATE_FORMAT), self.format)
            }
            ReportKind::Monthly(period) => format!(
                "monthly_report_{}_{}.{}",
                period.year, period.month, self.format
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_navigation_wraps_years() {
        let january = ReportPeriod::new(2025, 1);
        assert_eq!(january.previous(), ReportPeriod::new(2024, 12));
        assert_eq!(ReportPeriod::new(2024, 12).next(), january);
        assert_eq!(january.query(), "year=2025&month=1");
        assert_eq!(ReportPeriod::new(2025, 3).label(), "March 2025");
        assert_eq!(ReportPeriod::new(2025, 0).month, 1);
    }

    #[test]
    fn test_download_query_and_file_name() {
        let monthly = ReportDownload::monthly(ReportPeriod::new(2025, 3));
        assert_eq!(monthly.query(), "type=monthly&year=2025&month=3&format=csv");
        assert_eq!(monthly.file_name(), "monthly_report_2025_3.csv");

        let date = NaiveDate::from_ymd_opt(2025, 3, 9).unwrap();
        let daily = ReportDownload::daily(date);
        assert_eq!(daily.query(), "type=daily&date=2025-03-09&format=csv");
        assert_eq!(daily.file_name(), "daily_report_2025-03-09.csv");
    }

    #[test]
    fn test_monthly_report_deserializes() {
        let json = r#"{
            "year": 2025, "month": 3, "total_earnings": 120.5,
            "table_earnings": {"Table 1": 80.5, "Table 2": 40.0},
            "total_bookings": 9, "abo_subscriptions_sold": 2,
            "abo_revenue": 60.0, "total_revenue": 180.5
        }"#;
        let report: MonthlyReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.period(), ReportPeriod::new(2025, 3));
        assert_eq!(report.table_earnings.len(), 2);
    }

    #[test]
    fn test_abo_sales_fill_missing_months() {
        let report = AboReport {
            active_abo_count: 1,
            active_abos: vec![],
            monthly_rate: 30.0,
            year: 2025,
            monthly_sales: vec![
                MonthlySales { month: 2, count: 3 },
                MonthlySales { month: 12, count: 1 },
                MonthlySales { month: 13, count: 9 },
            ],
        };
        let sales = report.sales_by_month();
        assert_eq!(sales[1], 3);
        assert_eq!(sales[11], 1);
        assert_eq!(sales.iter().sum::<u32>(), 4);
    }

    #[test]
    fn test_trainer_totals() {
        let report = TrainerReport {
            year: 2025,
            month: 3,
            trainers: vec![
                TrainerBilling {
                    trainer_id: 1,
                    trainer_name: "Lena".to_string(),
                    hourly_rate: 20.0,
                    total_hours: 1.5,
                    total_earnings: 30.0,
                },
                TrainerBilling {
                    trainer_id: 2,
                    trainer_name: "Tomas".to_string(),
                    hourly_rate: 25.0,
                    total_hours: 2.0,
                    total_earnings: 50.0,
                },
            ],
        };
        assert_eq!(report.total_hours(), 3.5);
        assert_eq!(report.total_earnings(), 80.0);
    }
}
