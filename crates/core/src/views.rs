//! Pure, snapshot-based query views over collection contents.
//!
//! Views take a list of records and answer the domain questions the
//! public site and the dashboard ask (upcoming events, featured
//! products, recent posts). They never touch storage; callers hand them
//! a snapshot from whichever store variant they use.
//!
//! Date policy: the `date` field is parsed as a naive calendar date and
//! compared against the caller-supplied "today" (use [`today_utc`] for
//! the current UTC date). Records without a parseable date never count
//! as upcoming.

use chrono::{DateTime, NaiveDate, Utc};

use crate::record::Record;

/// The current calendar date in UTC.
#[must_use]
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

fn retain_visible(records: Vec<Record>) -> Vec<Record> {
    records.into_iter().filter(Record::is_visible).collect()
}

fn with_field_eq(records: &[Record], key: &str, value: &str) -> Vec<Record> {
    records
        .iter()
        .filter(|r| r.str_field(key) == Some(value))
        .cloned()
        .collect()
}

/// Queries over the events collection.
#[derive(Debug, Clone)]
pub struct EventsView {
    records: Vec<Record>,
}

impl EventsView {
    /// View over a full snapshot (dashboard reads).
    #[must_use]
    pub const fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    /// View restricted to visible records (public-site reads).
    #[must_use]
    pub fn visible_only(records: Vec<Record>) -> Self {
        Self::new(retain_visible(records))
    }

    /// Every record in the snapshot.
    #[must_use]
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    /// Visible events dated `today` or later, ascending by date.
    #[must_use]
    pub fn upcoming(&self, today: NaiveDate) -> Vec<Record> {
        let mut upcoming: Vec<(NaiveDate, Record)> = self
            .records
            .iter()
            .filter(|r| r.is_visible())
            .filter_map(|r| r.date().map(|d| (d, r.clone())))
            .filter(|(date, _)| *date >= today)
            .collect();
        upcoming.sort_by_key(|(date, _)| *date);
        upcoming.into_iter().map(|(_, record)| record).collect()
    }

    /// The event to spotlight: the first visible featured event, or the
    /// next upcoming one when nothing is flagged.
    #[must_use]
    pub fn featured(&self, today: NaiveDate) -> Option<Record> {
        self.records
            .iter()
            .find(|r| r.is_visible() && r.bool_field("featured") == Some(true))
            .cloned()
            .or_else(|| self.upcoming(today).into_iter().next())
    }

    /// Events in the given category, in snapshot order.
    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<Record> {
        with_field_eq(&self.records, "category", category)
    }
}

/// Queries over the programs collection.
#[derive(Debug, Clone)]
pub struct ProgramsView {
    records: Vec<Record>,
}

impl ProgramsView {
    #[must_use]
    pub const fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn visible_only(records: Vec<Record>) -> Self {
        Self::new(retain_visible(records))
    }

    #[must_use]
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    /// Programs at the given skill level.
    #[must_use]
    pub fn by_level(&self, level: &str) -> Vec<Record> {
        with_field_eq(&self.records, "level", level)
    }
}

/// Queries over the posts collection.
#[derive(Debug, Clone)]
pub struct PostsView {
    records: Vec<Record>,
}

impl PostsView {
    #[must_use]
    pub const fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn visible_only(records: Vec<Record>) -> Self {
        Self::new(retain_visible(records))
    }

    #[must_use]
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    /// Posts of the given type (announcement, news, tip).
    #[must_use]
    pub fn by_type(&self, post_type: &str) -> Vec<Record> {
        with_field_eq(&self.records, "type", post_type)
    }

    /// Visible posts only, in snapshot order.
    #[must_use]
    pub fn visible(&self) -> Vec<Record> {
        self.records
            .iter()
            .filter(|r| r.is_visible())
            .cloned()
            .collect()
    }

    /// The `count` most recent visible posts, newest first.
    ///
    /// Posts without a parseable `createdAt` sort last.
    #[must_use]
    pub fn recent(&self, count: usize) -> Vec<Record> {
        let mut posts: Vec<(Option<DateTime<Utc>>, Record)> = self
            .records
            .iter()
            .filter(|r| r.is_visible())
            .map(|r| (r.created_at(), r.clone()))
            .collect();
        posts.sort_by(|(a, _), (b, _)| b.cmp(a));
        posts
            .into_iter()
            .take(count)
            .map(|(_, record)| record)
            .collect()
    }
}

/// Queries over the announcements collection.
#[derive(Debug, Clone)]
pub struct AnnouncementsView {
    records: Vec<Record>,
}

impl AnnouncementsView {
    #[must_use]
    pub const fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn visible_only(records: Vec<Record>) -> Self {
        Self::new(retain_visible(records))
    }

    #[must_use]
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    /// Announcements currently shown to visitors.
    #[must_use]
    pub fn active(&self) -> Vec<Record> {
        self.records
            .iter()
            .filter(|r| r.is_visible())
            .cloned()
            .collect()
    }
}

/// Queries over the products collection.
#[derive(Debug, Clone)]
pub struct ProductsView {
    records: Vec<Record>,
}

impl ProductsView {
    #[must_use]
    pub const fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn visible_only(records: Vec<Record>) -> Self {
        Self::new(retain_visible(records))
    }

    #[must_use]
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    /// Products flagged for the featured shelf (visible only).
    #[must_use]
    pub fn featured(&self) -> Vec<Record> {
        self.records
            .iter()
            .filter(|r| r.is_visible() && r.bool_field("featured") == Some(true))
            .cloned()
            .collect()
    }

    /// Products in the given category, in snapshot order.
    #[must_use]
    pub fn by_category(&self, category: &str) -> Vec<Record> {
        with_field_eq(&self.records, "category", category)
    }
}

/// Dashboard summary numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct Stats {
    /// Visible events dated today or later.
    pub upcoming_events: usize,
    pub visible_programs: usize,
    pub visible_posts: usize,
    pub visible_products: usize,
    /// Sum of the `registered` field across all events.
    pub total_registrations: u64,
    /// Sum of `price * registered` across all events.
    pub estimated_revenue: f64,
}

impl Stats {
    /// Compute dashboard stats from collection snapshots.
    #[must_use]
    pub fn compute(
        events: &[Record],
        programs: &[Record],
        posts: &[Record],
        products: &[Record],
        today: NaiveDate,
    ) -> Self {
        let visible_count = |records: &[Record]| records.iter().filter(|r| r.is_visible()).count();

        let total_registrations = events
            .iter()
            .map(|e| {
                e.fields()
                    .get("registered")
                    .and_then(serde_json::Value::as_u64)
                    .unwrap_or(0)
            })
            .sum();

        let estimated_revenue = events
            .iter()
            .map(|e| {
                let price = e.number_field("price").unwrap_or(0.0);
                let registered = e.number_field("registered").unwrap_or(0.0);
                price * registered
            })
            .sum();

        Self {
            upcoming_events: EventsView::new(events.to_vec()).upcoming(today).len(),
            visible_programs: visible_count(programs),
            visible_posts: visible_count(posts),
            visible_products: visible_count(products),
            total_registrations,
            estimated_revenue,
        }
    }
}
