//! Generic CRUD handlers.
//!
//! Each entity module registers these against its own paths; the handler
//! bodies are the same for every [`Record`] type.

use std::sync::Arc;

use crate::config::{MissPolicy, ServiceConfig};
use crate::error::RecordError;
use crate::request::Request;
use crate::response::Json;
use crate::store::{Record, Store};

/// Router state for one entity type: the shared store and how lookups
/// answer a miss.
#[derive(Debug)]
pub struct Service<R> {
    pub store: Arc<Store<R>>,
    pub miss_policy: MissPolicy,
}

// Clones the `Arc`, not the records; no `R: Clone` bound.
impl<R> Clone for Service<R> {
    fn clone(&self) -> Self {
        Self { store: Arc::clone(&self.store), miss_policy: self.miss_policy }
    }
}

impl<R: Record> Service<R> {
    pub fn new(store: Store<R>, miss_policy: MissPolicy) -> Self {
        Self { store: Arc::new(store), miss_policy }
    }

    /// Builds the state from config, seeding unless `start-empty` is set.
    pub fn from_config(config: &ServiceConfig, seed: impl FnOnce() -> Vec<R>) -> Self {
        let store = if config.start_empty { Store::new() } else { Store::seeded(seed()) };
        Self::new(store, config.miss_policy)
    }
}

fn id(req: &Request) -> &str {
    req.param("id").unwrap_or_default()
}

/// Every record as a JSON array.
pub async fn list<R: Record>(_req: Request, svc: Service<R>) -> Json<Vec<R>> {
    Json(svc.store.list().await)
}

/// The first record matching the `id` path parameter.
pub async fn get<R: Record>(req: Request, svc: Service<R>) -> Result<Json<R>, RecordError> {
    match svc.store.get(id(&req)).await {
        Ok(record) => Ok(Json(record)),
        Err(RecordError::NotFound(_)) if svc.miss_policy == MissPolicy::EmptyRecord => {
            Ok(Json(R::default()))
        }
        Err(e) => Err(e),
    }
}

/// Decodes the body and appends it under the `id` path parameter, which
/// overrides any id in the body. Answers with the full list.
pub async fn create_at_path_id<R: Record>(
    req: Request,
    svc: Service<R>,
) -> Result<Json<Vec<R>>, RecordError> {
    let mut record: R = req.json()?;
    record.set_id(id(&req).to_owned());
    Ok(Json(svc.store.create(record).await?))
}

/// Decodes the body and appends it under the next free numeric id.
pub async fn create_with_next_id<R: Record>(
    req: Request,
    svc: Service<R>,
) -> Result<Json<Vec<R>>, RecordError> {
    let record: R = req.json()?;
    Ok(Json(svc.store.create_with_next_id(record).await?))
}

/// Replaces the record matching the `id` path parameter with the body.
pub async fn update<R: Record>(req: Request, svc: Service<R>) -> Result<Json<R>, RecordError> {
    let record: R = req.json()?;
    Ok(Json(svc.store.update(id(&req), record).await?))
}

/// Removes the first record matching the `id` path parameter; the full list
/// comes back whether or not anything was removed.
pub async fn remove<R: Record>(req: Request, svc: Service<R>) -> Json<Vec<R>> {
    Json(svc.store.remove(id(&req)).await)
}
