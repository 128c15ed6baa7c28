//! Health-check handlers.
//!
//! | Check | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? |
//! | **Readiness** | `/readyz` | Can it serve records? |
//!
//! Both services register them next to their record routes.

use tracing::trace;

use crate::request::Request;
use crate::response::Response;
use crate::service::Service;
use crate::store::Record;

/// Always `200 OK` with body `"ok"`. If the process answers HTTP at all, it
/// is alive.
pub async fn liveness<S: Send + 'static>(_req: Request, _state: S) -> Response {
    Response::text("ok")
}

/// `200 OK` with body `"ready"`. The store is in memory, so once the router
/// is serving, records are reachable.
pub async fn readiness<R: Record>(_req: Request, svc: Service<R>) -> Response {
    let records = svc.store.len().await;
    trace!(records, "readiness check");
    Response::text("ready")
}
