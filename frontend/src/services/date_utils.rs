use chrono::{NaiveDate, NaiveDateTime};
use js_sys::Date;
use shared::interval::DATE_FORMAT;

/// Today's date in the browser's local timezone
pub fn today() -> NaiveDate {
    let now = Date::new_0();
    // JavaScript months are 0-indexed
    NaiveDate::from_ymd_opt(now.get_full_year() as i32, now.get_month() + 1, now.get_date())
        .unwrap_or_default()
}

/// `Monday, March 10, 2025`
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// `Mon 10.03.`
pub fn column_label(date: NaiveDate) -> String {
    date.format("%a %d.%m.").to_string()
}

/// Display form of a wire date, falling back to the raw text when it does
/// not parse.
pub fn display_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map(|date| date.format("%d.%m.%Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

/// Display form of an ISO timestamp such as `created_at`.
pub fn display_timestamp(raw: &str) -> String {
    let trimmed = raw.trim();
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|timestamp| timestamp.format("%d.%m.%Y %H:%M").to_string())
        .unwrap_or_else(|| raw.to_string())
}

pub fn format_money(amount: f64) -> String {
    format!("${:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_helpers() {
        assert_eq!(display_date("2025-03-10"), "10.03.2025");
        assert_eq!(display_date("soon"), "soon");
        assert_eq!(display_timestamp("2025-03-10T09:05:00.123456"), "10.03.2025 09:05");
        assert_eq!(format_money(12.5), "$12.50");

        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert_eq!(long_date(date), "Monday, March 10, 2025");
        assert_eq!(column_label(date), "Mon 10.03.");
    }
}
