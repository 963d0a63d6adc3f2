use chrono::{DateTime, Duration, Utc};
use log::{info, warn};
use web_sys::window;

use crate::config;
use crate::content::{CalendarFields, Venue};
use crate::countdown::TargetInstant;

/// Everything the calendar provider needs for an "add event" link.
#[derive(Clone, Debug, PartialEq)]
pub struct CalendarEvent {
    pub start: String,
    pub end: String,
    pub title: String,
    pub description: String,
    pub location: String,
}

impl CalendarEvent {
    /// Builds the event from the document. Missing start/end timestamps are
    /// derived from the countdown target.
    pub fn from_content(
        fields: &CalendarFields,
        venue: &Venue,
        target: Option<TargetInstant>,
    ) -> Self {
        let derived_start = target.map(|t| t.instant());
        let start = if fields.start.is_empty() {
            derived_start.map(compact_timestamp).unwrap_or_default()
        } else {
            fields.start.clone()
        };
        let end = if fields.end.is_empty() {
            derived_start
                .map(|at| compact_timestamp(at + Duration::hours(config::DEFAULT_EVENT_HOURS)))
                .unwrap_or_default()
        } else {
            fields.end.clone()
        };

        Self {
            start,
            end,
            title: fields.title.clone(),
            description: fields.description.clone(),
            location: venue_location(venue),
        }
    }
}

/// `YYYYMMDDTHHMMSSZ`, the compact UTC form calendar links expect.
pub fn compact_timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%dT%H%M%SZ").to_string()
}

pub fn calendar_url(event: &CalendarEvent) -> String {
    format!(
        "{}?action=TEMPLATE&text={}&dates={}/{}&details={}&location={}",
        config::CALENDAR_BASE_URL,
        urlencoding::encode(&event.title),
        urlencoding::encode(&event.start),
        urlencoding::encode(&event.end),
        urlencoding::encode(&event.description),
        urlencoding::encode(&event.location),
    )
}

/// "Salon, street, neighborhood, city", leaving out blank parts.
pub fn venue_location(venue: &Venue) -> String {
    [&venue.name, &venue.address, &venue.neighborhood, &venue.city]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn map_url(venue: &Venue) -> Option<&str> {
    let url = venue.maps_url.trim();
    (!url.is_empty()).then_some(url)
}

pub fn tel_uri(dial_phone: &str) -> String {
    format!("tel:{}", dial_phone)
}

pub fn open_in_new_tab(url: &str) {
    let Some(window) = window() else {
        warn!("No window available to open {}", url);
        return;
    };
    match window.open_with_url_and_target(url, "_blank") {
        Ok(_) => info!("Opened {}", url),
        Err(e) => warn!("Failed to open {}: {:?}", url, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn venue() -> Venue {
        Venue {
            name: "Salon".to_string(),
            address: "Calle 1".to_string(),
            neighborhood: "Colonia".to_string(),
            city: "Ciudad".to_string(),
            maps_url: "https://maps.google.com/?q=Salon".to_string(),
        }
    }

    fn query_param<'a>(url: &'a str, key: &str) -> &'a str {
        let (_, query) = url.split_once('?').unwrap();
        query
            .split('&')
            .find_map(|pair| pair.strip_prefix(key).and_then(|rest| rest.strip_prefix('=')))
            .unwrap()
    }

    #[test]
    fn calendar_link_is_percent_encoded() {
        let event = CalendarEvent {
            start: "20251226T000000Z".to_string(),
            end: "20251226T080000Z".to_string(),
            title: "XV Años".to_string(),
            description: "Fiesta & baile".to_string(),
            location: venue_location(&venue()),
        };
        let url = calendar_url(&event);

        assert!(url.starts_with("https://calendar.google.com/calendar/render?action=TEMPLATE&"));
        assert!(!url.contains(' '));
        assert_eq!(query_param(&url, "text"), "XV%20A%C3%B1os");
        assert_eq!(query_param(&url, "location"), "Salon%2C%20Calle%201%2C%20Colonia%2C%20Ciudad");
        assert_eq!(query_param(&url, "details"), "Fiesta%20%26%20baile");
        assert_eq!(query_param(&url, "dates"), "20251226T000000Z/20251226T080000Z");
    }

    #[test]
    fn location_skips_blank_parts() {
        let mut partial = venue();
        partial.neighborhood = "  ".to_string();
        assert_eq!(venue_location(&partial), "Salon, Calle 1, Ciudad");
        assert_eq!(venue_location(&Venue::default()), "");
    }

    #[test]
    fn calendar_times_fall_back_to_target() {
        let target = TargetInstant::new(Utc.with_ymd_and_hms(2025, 12, 26, 0, 0, 0).unwrap());
        let fields = CalendarFields { title: "XV".to_string(), ..CalendarFields::default() };
        let event = CalendarEvent::from_content(&fields, &venue(), Some(target));
        assert_eq!(event.start, "20251226T000000Z");
        assert_eq!(event.end, "20251226T050000Z");
        assert_eq!(event.location, "Salon, Calle 1, Colonia, Ciudad");
    }

    #[test]
    fn document_calendar_times_win() {
        let target = TargetInstant::new(Utc.with_ymd_and_hms(2025, 12, 26, 0, 0, 0).unwrap());
        let fields = CalendarFields {
            start: "20251225T180000".to_string(),
            end: "20251226T020000".to_string(),
            ..CalendarFields::default()
        };
        let event = CalendarEvent::from_content(&fields, &Venue::default(), Some(target));
        assert_eq!(event.start, "20251225T180000");
        assert_eq!(event.end, "20251226T020000");
    }

    #[test]
    fn malformed_fields_still_produce_a_link() {
        let event =
            CalendarEvent::from_content(&CalendarFields::default(), &Venue::default(), None);
        assert_eq!(
            calendar_url(&event),
            "https://calendar.google.com/calendar/render?action=TEMPLATE\
             &text=&dates=/&details=&location="
        );
    }

    #[test]
    fn map_and_phone_links() {
        assert_eq!(map_url(&venue()), Some("https://maps.google.com/?q=Salon"));
        assert_eq!(map_url(&Venue::default()), None);
        assert_eq!(tel_uri("+523312345678"), "tel:+523312345678");
    }
}
