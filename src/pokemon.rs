//! The pokemon service.
//!
//! Ids in paths are numeric. New pokemon get the next free numeric id;
//! updates and deletes find their target by id, never by list position.

use serde::{Deserialize, Serialize};

use crate::config::ServiceConfig;
use crate::error::RecordError;
use crate::health;
use crate::method::Method;
use crate::router::Router;
use crate::service::{self, Service};
use crate::store::Record;

pub const DEFAULT_ADDR: &str = "0.0.0.0:8081";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pokemon {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Name, not id, of the pokemon this one evolves from. Not checked.
    #[serde(rename = "evolvesfrom", skip_serializing_if = "String::is_empty")]
    pub evolves_from: String,
    #[serde(rename = "evolvesinto", skip_serializing_if = "String::is_empty")]
    pub evolves_into: String,
}

impl Record for Pokemon {
    fn id(&self) -> &str { &self.id }

    fn set_id(&mut self, id: String) { self.id = id; }

    fn validate(&self) -> Result<(), RecordError> {
        if self.name.trim().is_empty() {
            return Err(RecordError::InvalidInput("name is required".into()));
        }
        if self.kind.trim().is_empty() {
            return Err(RecordError::InvalidInput("type is required".into()));
        }
        Ok(())
    }
}

fn pokemon(id: &str, name: &str, kind: &str, from: &str, into: &str) -> Pokemon {
    Pokemon {
        id: id.into(),
        name: name.into(),
        kind: kind.into(),
        evolves_from: from.into(),
        evolves_into: into.into(),
    }
}

pub fn seed() -> Vec<Pokemon> {
    vec![
        pokemon("1", "Lampent", "Ghost/Fire", "Litwick", "Chandelure"),
        pokemon("2", "Pikachu", "Electric", "Pichu", "Raichu"),
        pokemon("3", "Roselia", "Grass/Poison", "Budew", "Roserade"),
    ]
}

pub fn routes(config: &ServiceConfig) -> Router<Service<Pokemon>> {
    Router::new(Service::from_config(config, seed))
        .on(Method::Get,    "/pokemon/",                    service::list::<Pokemon>)
        .on(Method::Get,    "/pokemon/{id:[0-9]+}",         service::get::<Pokemon>)
        .on(Method::Post,   "/pokemon/add/",                service::create_with_next_id::<Pokemon>)
        .on(Method::Post,   "/pokemon/update/{id:[0-9]+}",  service::update::<Pokemon>)
        .on(Method::Delete, "/pokemon/{id:[0-9]+}",         service::remove::<Pokemon>)
        .on(Method::Get,    "/healthz",                     health::liveness::<Service<Pokemon>>)
        .on(Method::Get,    "/readyz",                      health::readiness::<Pokemon>)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_lowercase() {
        let json = serde_json::to_value(&seed()[1]).unwrap();
        assert_eq!(json, serde_json::json!({
            "id": "2",
            "name": "Pikachu",
            "type": "Electric",
            "evolvesfrom": "Pichu",
            "evolvesinto": "Raichu"
        }));
    }

    #[test]
    fn empty_evolutions_are_omitted() {
        let p = pokemon("4", "Tauros", "Normal", "", "");
        assert_eq!(
            serde_json::to_string(&p).unwrap(),
            r#"{"id":"4","name":"Tauros","type":"Normal"}"#,
        );
    }

    #[test]
    fn name_and_type_are_required() {
        assert!(pokemon("", "Eevee", "Normal", "", "").validate().is_ok());
        assert!(pokemon("", "", "Normal", "", "").validate().is_err());
        assert!(pokemon("", "Eevee", "", "", "").validate().is_err());
    }
}
