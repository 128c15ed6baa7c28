//! The pokemon service.
//!
//! Try:
//!   curl http://localhost:8081/pokemon/
//!   curl http://localhost:8081/pokemon/2
//!   curl -X POST http://localhost:8081/pokemon/add/ -d '{"name":"Munchlax","type":"Normal","evolvesinto":"Snorlax"}'
//!   curl -X POST http://localhost:8081/pokemon/update/1 -d '{"name":"Litwick","type":"Ghost/Fire","evolvesinto":"Lampent"}'
//!   curl -X DELETE http://localhost:8081/pokemon/4

use std::process::ExitCode;

use clap::Parser;
use corral::cli::{self, Args};
use corral::pokemon;

#[tokio::main]
async fn main() -> ExitCode {
    cli::init_tracing();

    match cli::run(Args::parse(), pokemon::DEFAULT_ADDR, |c| c.pokemon, pokemon::routes).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
