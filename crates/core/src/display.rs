//! Display formatting helpers for rendering content.
//!
//! Small pure functions the page-rendering layer uses to turn record
//! fields into visitor-facing text.

use chrono::{DateTime, NaiveDate, Utc};

/// Format a price for display: `Free`, `$35`, or `$4.99`.
#[must_use]
pub fn format_price(price: f64) -> String {
    if price == 0.0 {
        return "Free".to_string();
    }
    if price.fract() == 0.0 {
        format!("${price:.0}")
    } else {
        format!("${price:.2}")
    }
}

/// Format a calendar date for display: `March 15, 2026`.
#[must_use]
pub fn format_full_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Human-friendly distance between a timestamp and `now`.
#[must_use]
pub fn relative_date(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let days = (now - ts).num_days();
    match days {
        0 => "Today".to_string(),
        1 => "Yesterday".to_string(),
        2..=6 => format!("{days} days ago"),
        7..=29 => {
            let weeks = days / 7;
            if weeks == 1 {
                "1 week ago".to_string()
            } else {
                format!("{weeks} weeks ago")
            }
        }
        _ => ts.format("%b %-d").to_string(),
    }
}

/// Visitor-facing label for a category or type slug.
///
/// Unknown slugs pass through unchanged so new categories added in the
/// dashboard still render something sensible.
#[must_use]
pub fn category_label(category: &str) -> &str {
    match category {
        "tournament" => "Tournament",
        "social" => "Social",
        "clinic" => "Clinic",
        "league" => "League",
        "beginner" => "Beginner",
        "intermediate" => "Intermediate",
        "advanced" => "Advanced",
        "all" => "All Levels",
        "apparel" => "Apparel",
        "equipment" => "Equipment",
        "accessories" => "Accessories",
        "announcement" => "Announcement",
        "news" => "News",
        "tip" => "Tip",
        other => other,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(0.0), "Free");
        assert_eq!(format_price(35.0), "$35");
        assert_eq!(format_price(4.99), "$4.99");
    }

    #[test]
    fn test_format_full_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 15).unwrap();
        assert_eq!(format_full_date(date), "March 15, 2026");
    }

    #[test]
    fn test_relative_date() {
        let now = DateTime::parse_from_rfc3339("2025-03-10T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let at = |s: &str| {
            DateTime::parse_from_rfc3339(s)
                .unwrap()
                .with_timezone(&Utc)
        };

        assert_eq!(relative_date(at("2025-03-10T09:00:00Z"), now), "Today");
        assert_eq!(relative_date(at("2025-03-09T09:00:00Z"), now), "Yesterday");
        assert_eq!(relative_date(at("2025-03-05T12:00:00Z"), now), "5 days ago");
        assert_eq!(relative_date(at("2025-02-25T12:00:00Z"), now), "1 week ago");
        assert_eq!(relative_date(at("2025-01-01T12:00:00Z"), now), "Jan 1");
    }

    #[test]
    fn test_category_label_passthrough() {
        assert_eq!(category_label("clinic"), "Clinic");
        assert_eq!(category_label("all"), "All Levels");
        assert_eq!(category_label("pickleball"), "pickleball");
    }
}
