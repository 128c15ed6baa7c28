//! The people service.
//!
//! | Method | Path | Answer |
//! |---|---|---|
//! | GET | `/people` | every person |
//! | GET | `/people/{id}` | one person, or the configured miss answer |
//! | POST | `/people/{id}` | every person, after appending the body under `id` |
//! | DELETE | `/people/{id}` | every person, after removing the first `id` match |

use serde::{Deserialize, Serialize};

use crate::config::ServiceConfig;
use crate::error::RecordError;
use crate::health;
use crate::method::Method;
use crate::router::Router;
use crate::service::{self, Service};
use crate::store::Record;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Person {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub firstname: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub lastname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub city: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub state: String,
}

impl Record for Person {
    fn id(&self) -> &str { &self.id }

    fn set_id(&mut self, id: String) { self.id = id; }

    fn validate(&self) -> Result<(), RecordError> {
        if self.firstname.trim().is_empty() {
            return Err(RecordError::InvalidInput("firstname is required".into()));
        }
        if self.lastname.trim().is_empty() {
            return Err(RecordError::InvalidInput("lastname is required".into()));
        }
        Ok(())
    }
}

pub fn seed() -> Vec<Person> {
    vec![
        Person {
            id: "1".into(),
            firstname: "Rosie".into(),
            lastname: "Hamilton".into(),
            address: Some(Address { city: "Newcastle".into(), state: "Tyne and Wear".into() }),
        },
        Person {
            id: "2".into(),
            firstname: "Jane".into(),
            lastname: "Doe".into(),
            address: None,
        },
    ]
}

pub fn routes(config: &ServiceConfig) -> Router<Service<Person>> {
    Router::new(Service::from_config(config, seed))
        .on(Method::Get,    "/people",      service::list::<Person>)
        .on(Method::Get,    "/people/{id}", service::get::<Person>)
        .on(Method::Post,   "/people/{id}", service::create_at_path_id::<Person>)
        .on(Method::Delete, "/people/{id}", service::remove::<Person>)
        .on(Method::Get,    "/healthz",     health::liveness::<Service<Person>>)
        .on(Method::Get,    "/readyz",      health::readiness::<Person>)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_are_omitted() {
        let json = serde_json::to_value(&seed()[1]).unwrap();
        assert_eq!(json, serde_json::json!({"id": "2", "firstname": "Jane", "lastname": "Doe"}));
        assert_eq!(serde_json::to_string(&Person::default()).unwrap(), "{}");
    }

    #[test]
    fn nested_address_round_trips() {
        let json = serde_json::to_value(&seed()[0]).unwrap();
        assert_eq!(json["address"]["state"], "Tyne and Wear");
        let back: Person = serde_json::from_value(json).unwrap();
        assert_eq!(back, seed()[0]);
    }

    #[test]
    fn names_are_required() {
        let mut p = seed().remove(1);
        assert!(p.validate().is_ok());
        p.lastname = "  ".into();
        assert!(matches!(p.validate(), Err(RecordError::InvalidInput(_))));
    }
}
