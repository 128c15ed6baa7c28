//! # corral
//!
//! Two small JSON services over in-memory record stores: one for people,
//! one for pokemon. Records live for as long as the process does.
//!
//! The crate is split in two layers:
//!
//! - HTTP plumbing: radix-tree routing via [`matchit`] with optional regex
//!   segment constraints, type-erased async handlers over shared state,
//!   hyper serving HTTP/1.1 and HTTP/2, graceful shutdown on SIGTERM / Ctrl-C.
//! - Records: a [`Store`] guarded by one lock, generic CRUD handlers in
//!   [`service`], and the [`people`] and [`pokemon`] route tables.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use corral::config::ServiceConfig;
//! use corral::{Server, pokemon};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), corral::Error> {
//!     let app = pokemon::routes(&ServiceConfig::default());
//!     Server::bind("127.0.0.1:8081")?.serve(app).await
//! }
//! ```

mod error;
mod handler;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod cli;
pub mod config;
pub mod health;
pub mod people;
pub mod pokemon;
pub mod service;
pub mod store;

pub use error::{Error, RecordError};
pub use handler::Handler;
pub use method::Method;
pub use request::Request;
pub use response::{IntoResponse, Json, Response, ResponseBuilder};
pub use router::Router;
pub use server::{DEFAULT_MAX_BODY_BYTES, Server};
pub use status::Status;
pub use store::{Record, Store};
