//! HTTP status codes as a typed enum.
//!
//! Only the codes this crate actually emits. Use [`Status`] anywhere a
//! status code is accepted: `Response::status()`,
//! `Response::builder().status()`, or as a bare handler return value.

/// Status codes produced by the record services.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                  // 200

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest,          // 400
    NotFound,            // 404
    MethodNotAllowed,    // 405
    Conflict,            // 409
    ContentTooLarge,     // 413

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError, // 500
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                   => 200,
            Status::BadRequest           => 400,
            Status::NotFound             => 404,
            Status::MethodNotAllowed     => 405,
            Status::Conflict             => 409,
            Status::ContentTooLarge      => 413,
            Status::InternalServerError  => 500,
        }
    }
}
