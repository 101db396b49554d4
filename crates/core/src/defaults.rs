//! Static default content used to seed an empty store.
//!
//! These records show up on a freshly deployed site before staff have
//! entered anything, and double as the reset target for the dashboard's
//! "restore defaults" action. Timestamps are fixed so seeding is
//! deterministic.

use serde_json::{Value, json};

use crate::collection::Collection;
use crate::record::Record;

/// Default records for one collection.
#[must_use]
pub fn defaults(collection: Collection) -> Vec<Record> {
    let value = match collection {
        Collection::Events => default_events(),
        Collection::Programs => default_programs(),
        Collection::Posts => default_posts(),
        Collection::Announcements => default_announcements(),
        Collection::Products => default_products(),
    };
    records(value)
}

/// Default records for every collection, in canonical order.
#[must_use]
pub fn all() -> Vec<(Collection, Vec<Record>)> {
    Collection::ALL
        .into_iter()
        .map(|c| (c, defaults(c)))
        .collect()
}

fn records(value: Value) -> Vec<Record> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .map(|item| Record::from_value(item).expect("default content entries are objects"))
            .collect(),
        _ => Vec::new(),
    }
}

fn default_events() -> Value {
    json!([
        {
            "id": "evt-001",
            "title": "Spring Tennis Mixer & Social",
            "date": "2026-03-15",
            "time": "10:00 AM - 2:00 PM",
            "description": "Kick off the spring season with our biggest social event! Mixed doubles round-robin, brunch, and prizes.",
            "price": 45,
            "capacity": 48,
            "registered": 24,
            "category": "social",
            "stripeLink": "",
            "featured": true,
            "visible": true,
            "createdAt": "2025-01-15T10:00:00Z"
        },
        {
            "id": "evt-002",
            "title": "Serve & Volley Clinic",
            "date": "2026-03-08",
            "time": "9:00 AM - 11:00 AM",
            "description": "Master the art of serve and volley with Coach Priya.",
            "price": 35,
            "capacity": 12,
            "registered": 4,
            "category": "clinic",
            "stripeLink": "",
            "featured": false,
            "visible": true,
            "createdAt": "2025-01-15T10:00:00Z"
        },
        {
            "id": "evt-003",
            "title": "Doubles Tournament",
            "date": "2026-03-22",
            "time": "8:00 AM - 4:00 PM",
            "description": "Competitive doubles tournament for 3.5+ level players.",
            "price": 60,
            "capacity": 24,
            "registered": 12,
            "category": "tournament",
            "stripeLink": "",
            "featured": false,
            "visible": true,
            "createdAt": "2025-01-15T10:00:00Z"
        }
    ])
}

fn default_programs() -> Value {
    json!([
        {
            "id": "prg-001",
            "title": "Foundations Clinic",
            "level": "beginner",
            "schedule": "Tuesdays & Thursdays",
            "time": "9:00 AM - 10:30 AM",
            "description": "Build your tennis fundamentals.",
            "price": 35,
            "priceType": "per session",
            "maxPlayers": 8,
            "stripeLink": "",
            "visible": true,
            "createdAt": "2025-01-10T10:00:00Z"
        },
        {
            "id": "prg-002",
            "title": "Stroke Development",
            "level": "intermediate",
            "schedule": "Mondays & Wednesdays",
            "time": "10:00 AM - 11:30 AM",
            "description": "Refine your technique and develop consistency.",
            "price": 45,
            "priceType": "per session",
            "maxPlayers": 6,
            "stripeLink": "",
            "visible": true,
            "createdAt": "2025-01-10T10:00:00Z"
        },
        {
            "id": "prg-003",
            "title": "Private Lesson",
            "level": "all",
            "schedule": "By Appointment",
            "time": "60 minutes",
            "description": "One-on-one instruction tailored to your goals.",
            "price": 85,
            "priceType": "per session",
            "maxPlayers": 1,
            "stripeLink": "",
            "visible": true,
            "createdAt": "2025-01-10T10:00:00Z"
        }
    ])
}

fn default_posts() -> Value {
    json!([
        {
            "id": "post-001",
            "title": "Spring Schedule Released",
            "type": "announcement",
            "content": "Our spring program schedule is now available! Check out new clinic times, league options, and special events planned for March through May.",
            "videoUrl": "",
            "affiliateLinks": [],
            "author": "Dana Whitfield",
            "visible": true,
            "createdAt": "2025-01-28T10:00:00Z"
        },
        {
            "id": "post-002",
            "title": "Court Resurfacing Complete",
            "type": "news",
            "content": "Great news! Courts 3 and 4 have been freshly resurfaced and are ready for play. Enjoy the improved bounce and grip!",
            "videoUrl": "",
            "affiliateLinks": [],
            "author": "Dana Whitfield",
            "visible": true,
            "createdAt": "2025-01-25T10:00:00Z"
        },
        {
            "id": "post-003",
            "title": "Winter Warm-Up Routine",
            "type": "tip",
            "content": "Cold muscles need extra care! Here's Coach Priya's favorite 10-minute warm-up routine to prevent injuries during winter play.",
            "videoUrl": "",
            "author": "Priya Raman",
            "visible": true,
            "createdAt": "2025-01-22T10:00:00Z"
        }
    ])
}

fn default_announcements() -> Value {
    json!([
        {
            "id": "ann-001",
            "title": "Spring Registration Now Open!",
            "content": "Sign up for our March events.",
            "link": "/events.html",
            "linkText": "View Events",
            "type": "banner",
            "visible": true,
            "createdAt": "2025-01-15T10:00:00Z"
        }
    ])
}

fn default_products() -> Value {
    json!([
        {
            "id": "prod-001",
            "title": "Courtside Performance Tee",
            "category": "apparel",
            "description": "Moisture-wicking fabric with embroidered logo.",
            "price": 35,
            "salePrice": null,
            "image": "",
            "stripeLink": "",
            "featured": true,
            "visible": true,
            "createdAt": "2025-01-15T10:00:00Z"
        },
        {
            "id": "prod-002",
            "title": "Courtside Tennis Skirt",
            "category": "apparel",
            "description": "Flattering A-line cut with built-in shorts.",
            "price": 48,
            "salePrice": null,
            "image": "",
            "stripeLink": "",
            "featured": false,
            "visible": true,
            "createdAt": "2025-01-15T10:00:00Z"
        },
        {
            "id": "prod-003",
            "title": "Championship Tennis Balls",
            "category": "equipment",
            "description": "Extra duty felt. 3-pack.",
            "price": 4.99,
            "salePrice": null,
            "image": "",
            "stripeLink": "",
            "featured": false,
            "visible": true,
            "createdAt": "2025-01-15T10:00:00Z"
        }
    ])
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_every_collection_has_defaults() {
        for (collection, records) in all() {
            assert!(
                !records.is_empty(),
                "no default content for {collection}"
            );
            for record in &records {
                let id = record.id().unwrap();
                assert!(id.starts_with(collection.id_prefix()));
                assert!(record.is_visible());
                assert!(record.created_at().is_some());
            }
        }
    }

    #[test]
    fn test_default_events_are_dated() {
        for event in defaults(Collection::Events) {
            assert!(event.date().is_some());
            assert!(event.number_field("capacity").is_some());
        }
    }
}
