use indexmap::IndexMap;
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::countdown::TargetInstant;
use crate::error::ContentError;

const INVITATION_JSON: &str = include_str!("../static/invitation.json");

/// The static invitation document.
///
/// Field names mirror the JSON document. Every field defaults to empty so a
/// missing or wrongly typed field renders as a blank slot on its own,
/// without taking the rest of the page with it.
#[derive(Deserialize, Clone, PartialEq, Debug, Default)]
#[serde(default)]
pub struct InvitationData {
    #[serde(rename = "quinceañera", deserialize_with = "lenient")]
    pub celebrant: Celebrant,
    #[serde(rename = "evento", deserialize_with = "lenient")]
    pub event: EventInfo,
    #[serde(rename = "lugar", deserialize_with = "lenient")]
    pub venue: Venue,
    #[serde(rename = "calendario", deserialize_with = "lenient")]
    pub calendar: CalendarFields,
    #[serde(rename = "contacto", deserialize_with = "lenient_entries")]
    pub contacts: IndexMap<String, Contact>,
    #[serde(rename = "regalos", deserialize_with = "lenient")]
    pub gifts: Gifts,
    #[serde(rename = "vestimenta", deserialize_with = "lenient")]
    pub dress_code: DressCode,
    #[serde(rename = "mensajes", deserialize_with = "lenient")]
    pub messages: Messages,
    #[serde(rename = "itinerario", deserialize_with = "lenient_list")]
    pub itinerary: Vec<ItineraryItem>,
}

#[derive(Deserialize, Clone, PartialEq, Debug, Default)]
#[serde(default)]
pub struct Celebrant {
    #[serde(rename = "nombre", deserialize_with = "lenient")]
    pub name: String,
}

#[derive(Deserialize, Clone, PartialEq, Debug, Default)]
#[serde(default)]
pub struct EventInfo {
    /// ISO-8601 start of the party, the countdown target.
    #[serde(rename = "fecha", deserialize_with = "lenient")]
    pub date: String,
    #[serde(rename = "fechaTexto", deserialize_with = "lenient")]
    pub date_text: String,
    #[serde(rename = "horaInicio", deserialize_with = "lenient")]
    pub start_time: String,
    #[serde(rename = "horaFin", alias = "horaIFin", deserialize_with = "lenient")]
    pub end_time: String,
    /// IANA zone `date` is written in. Viewer local time when absent.
    #[serde(rename = "zonaHoraria", deserialize_with = "lenient")]
    pub time_zone: Option<String>,
}

#[derive(Deserialize, Clone, PartialEq, Debug, Default)]
#[serde(default)]
pub struct Venue {
    #[serde(rename = "nombre", deserialize_with = "lenient")]
    pub name: String,
    #[serde(rename = "direccion", deserialize_with = "lenient")]
    pub address: String,
    #[serde(rename = "colonia", deserialize_with = "lenient")]
    pub neighborhood: String,
    #[serde(rename = "ciudad", deserialize_with = "lenient")]
    pub city: String,
    #[serde(rename = "googleMapsUrl", deserialize_with = "lenient")]
    pub maps_url: String,
}

/// Calendar timestamps are already in the compact `YYYYMMDDTHHMMSS` form.
#[derive(Deserialize, Clone, PartialEq, Debug, Default)]
#[serde(default)]
pub struct CalendarFields {
    #[serde(rename = "fechaInicio", deserialize_with = "lenient")]
    pub start: String,
    #[serde(rename = "fechaFin", deserialize_with = "lenient")]
    pub end: String,
    #[serde(rename = "titulo", deserialize_with = "lenient")]
    pub title: String,
    #[serde(rename = "descripcion", deserialize_with = "lenient")]
    pub description: String,
}

#[derive(Deserialize, Clone, PartialEq, Debug, Default)]
#[serde(default)]
pub struct Contact {
    #[serde(rename = "nombre", deserialize_with = "lenient")]
    pub name: String,
    #[serde(rename = "telefono", deserialize_with = "lenient")]
    pub phone: String,
    #[serde(rename = "telefonoUrl", deserialize_with = "lenient")]
    pub dial_phone: String,
}

#[derive(Deserialize, Clone, PartialEq, Debug, Default)]
#[serde(default)]
pub struct Gifts {
    #[serde(rename = "titulo", deserialize_with = "lenient")]
    pub title: String,
    #[serde(rename = "mensaje", deserialize_with = "lenient")]
    pub message: String,
    #[serde(rename = "lluviaSobres", deserialize_with = "lenient")]
    pub envelope_shower: String,
}

#[derive(Deserialize, Clone, PartialEq, Debug, Default)]
#[serde(default)]
pub struct DressCode {
    #[serde(rename = "tipo", deserialize_with = "lenient")]
    pub kind: String,
    #[serde(rename = "descripcion", deserialize_with = "lenient")]
    pub description: String,
    #[serde(rename = "coloresEvitar", deserialize_with = "lenient_list")]
    pub colors_to_avoid: Vec<String>,
    #[serde(rename = "sugerencias", deserialize_with = "lenient_list")]
    pub suggestions: Vec<String>,
}

#[derive(Deserialize, Clone, PartialEq, Debug, Default)]
#[serde(default)]
pub struct Messages {
    #[serde(rename = "bienvenida", deserialize_with = "lenient")]
    pub welcome: String,
    #[serde(rename = "cuentaRegresiva", deserialize_with = "lenient")]
    pub countdown: String,
    #[serde(rename = "contactoTexto", deserialize_with = "lenient")]
    pub contact: String,
    #[serde(rename = "presencia", deserialize_with = "lenient")]
    pub presence: String,
}

#[derive(Deserialize, Clone, PartialEq, Debug, Default)]
#[serde(default)]
pub struct ItineraryItem {
    #[serde(rename = "hora", deserialize_with = "lenient")]
    pub time: String,
    #[serde(rename = "evento", deserialize_with = "lenient")]
    pub title: String,
    #[serde(rename = "descripcion", deserialize_with = "lenient")]
    pub description: String,
    #[serde(rename = "icono", deserialize_with = "lenient")]
    pub icon: String,
}

/// Decodes one field, falling back to its default when the value has the
/// wrong shape.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_else(|e| {
        warn!("Ignoring malformed invitation field: {}", e);
        T::default()
    }))
}

/// Keeps the well-formed items of a list and drops the rest.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match T::deserialize(item) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!("Ignoring malformed invitation list item: {}", e);
                    None
                }
            })
            .collect()),
        Value::Null => Ok(Vec::new()),
        other => {
            warn!("Expected a list in the invitation, found {}", other);
            Ok(Vec::new())
        }
    }
}

/// Keeps the well-formed entries of an object, in document order.
fn lenient_entries<'de, D, T>(deserializer: D) -> Result<IndexMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Object(entries) => Ok(entries
            .into_iter()
            .filter_map(|(key, entry)| match T::deserialize(entry) {
                Ok(entry) => Some((key, entry)),
                Err(e) => {
                    warn!("Ignoring malformed invitation entry `{}`: {}", key, e);
                    None
                }
            })
            .collect()),
        Value::Null => Ok(IndexMap::new()),
        other => {
            warn!("Expected named entries in the invitation, found {}", other);
            Ok(IndexMap::new())
        }
    }
}

impl EventInfo {
    /// The countdown target described by `date` and `time_zone`.
    pub fn target(&self) -> Result<TargetInstant, ContentError> {
        TargetInstant::parse(&self.date, self.time_zone.as_deref())
    }
}

impl InvitationData {
    pub fn from_json(raw: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Parses the document bundled with the page. A broken document is
    /// logged and replaced by an empty one so the layout still renders.
    pub fn bundled() -> Self {
        match Self::from_json(INVITATION_JSON) {
            Ok(data) => {
                debug!("Loaded invitation for {}", data.celebrant.name);
                data
            }
            Err(e) => {
                error!("Failed to load invitation document: {}", e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_document_parses() {
        let data = InvitationData::from_json(INVITATION_JSON).unwrap();
        assert!(!data.celebrant.name.is_empty());
        assert!(!data.event.date.is_empty());
        assert!(!data.dress_code.colors_to_avoid.is_empty());
        assert!(!data.contacts.is_empty());
    }

    #[test]
    fn missing_groups_fall_back_to_empty() {
        let data =
            InvitationData::from_json(r#"{ "quinceañera": { "nombre": "Ana" } }"#).unwrap();
        assert_eq!(data.celebrant.name, "Ana");
        assert_eq!(data.event, EventInfo::default());
        assert!(data.itinerary.is_empty());
        assert!(data.contacts.is_empty());
    }

    #[test]
    fn accepts_legacy_end_time_key() {
        let data = InvitationData::from_json(
            r#"{ "evento": { "horaInicio": "7:00 PM", "horaIFin": "2:00 AM" } }"#,
        )
        .unwrap();
        assert_eq!(data.event.end_time, "2:00 AM");
    }

    #[test]
    fn bundled_event_has_a_target() {
        let data = InvitationData::from_json(INVITATION_JSON).unwrap();
        assert!(data.event.target().is_ok());
        assert!(matches!(EventInfo::default().target(), Err(ContentError::MissingDate)));
    }

    #[test]
    fn invalid_json_is_a_document_error() {
        let err = InvitationData::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ContentError::Document(_)));
    }

    #[test]
    fn wrongly_typed_field_only_blanks_itself() {
        let data = InvitationData::from_json(
            r#"{
                "quinceañera": { "nombre": "Ana" },
                "mensajes": { "bienvenida": "Hola" },
                "vestimenta": { "tipo": "Formal", "coloresEvitar": "Rojo" },
                "evento": { "fecha": 20251225, "fechaTexto": "25 de diciembre" }
            }"#,
        )
        .unwrap();
        assert_eq!(data.celebrant.name, "Ana");
        assert_eq!(data.messages.welcome, "Hola");
        assert_eq!(data.dress_code.kind, "Formal");
        assert!(data.dress_code.colors_to_avoid.is_empty());
        assert_eq!(data.event.date, "");
        assert_eq!(data.event.date_text, "25 de diciembre");
        assert!(matches!(data.event.target(), Err(ContentError::MissingDate)));
    }

    #[test]
    fn malformed_group_and_list_items_are_dropped() {
        let data = InvitationData::from_json(
            r#"{
                "quinceañera": { "nombre": "Ana" },
                "lugar": "Salon",
                "vestimenta": { "coloresEvitar": ["Rojo", 7, "Blanco"] },
                "itinerario": [{ "hora": "8:00 PM", "evento": "Vals" }, "brindis"],
                "contacto": { "mama": { "nombre": "Rosa" }, "tio": 5 }
            }"#,
        )
        .unwrap();
        assert_eq!(data.celebrant.name, "Ana");
        assert_eq!(data.venue, Venue::default());
        assert_eq!(data.dress_code.colors_to_avoid, vec!["Rojo", "Blanco"]);
        assert_eq!(data.itinerary.len(), 1);
        assert_eq!(data.itinerary[0].title, "Vals");
        assert_eq!(data.contacts.len(), 1);
        assert_eq!(data.contacts["mama"].name, "Rosa");
    }

    #[test]
    fn contacts_keep_document_order() {
        let data = InvitationData::from_json(
            r#"{ "contacto": {
                "papa": { "nombre": "Luis" },
                "mama": { "nombre": "Rosa" },
                "abuela": { "nombre": "Carmen" }
            } }"#,
        )
        .unwrap();
        let names: Vec<&str> = data.contacts.values().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Luis", "Rosa", "Carmen"]);
    }

    #[test]
    fn contacts_keep_every_entry() {
        let data = InvitationData::from_json(
            r#"{ "contacto": {
                "mama": {
                    "nombre": "Rosa",
                    "telefono": "55 1234 5678",
                    "telefonoUrl": "+525512345678"
                },
                "papa": { "nombre": "Luis" }
            } }"#,
        )
        .unwrap();
        assert_eq!(data.contacts.len(), 2);
        assert_eq!(data.contacts["mama"].dial_phone, "+525512345678");
        assert_eq!(data.contacts["papa"].phone, "");
    }
}
