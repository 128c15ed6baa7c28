//! The people service.
//!
//! Try:
//!   curl http://localhost:8080/people
//!   curl -X POST http://localhost:8080/people/3 -d '{"firstname":"Ada","lastname":"Lovelace"}'
//!   curl -X DELETE http://localhost:8080/people/3

use std::process::ExitCode;

use clap::Parser;
use corral::cli::{self, Args};
use corral::people;

#[tokio::main]
async fn main() -> ExitCode {
    cli::init_tracing();

    match cli::run(Args::parse(), people::DEFAULT_ADDR, |c| c.people, people::routes).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
