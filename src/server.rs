//! HTTP server and graceful shutdown.
//!
//! On SIGTERM or Ctrl-C the server:
//! 1. Immediately stops `listener.accept()`, so no new connections are made.
//! 2. Lets every in-flight connection task run to completion.
//! 3. Returns from [`Server::serve`], which lets `main` exit cleanly.
//!
//! The records live only in process memory and are gone once `serve` returns.

use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use http_body_util::{BodyExt, Full, LengthLimitError, Limited};
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use crate::error::Error;
use crate::response::Response;
use crate::router::Router;
use crate::status::Status;

/// Request bodies larger than this are refused with `413` unless
/// [`Server::max_body_bytes`] says otherwise.
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// The HTTP server.
pub struct Server {
    addr: SocketAddr,
    listener: Option<TcpListener>,
    max_body_bytes: usize,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    pub fn bind(addr: &str) -> Result<Self, Error> {
        let parsed = addr.parse::<SocketAddr>().map_err(|source| Error::Addr { addr: addr.to_owned(), source })?;
        Ok(Self { addr: parsed, listener: None, max_body_bytes: DEFAULT_MAX_BODY_BYTES })
    }

    /// Serves on an already-bound listener, e.g. one bound to port 0.
    pub fn from_listener(listener: TcpListener) -> Result<Self, Error> {
        Ok(Self {
            addr: listener.local_addr()?,
            listener: Some(listener),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        })
    }

    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Caps how much of a request body is buffered before routing.
    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.max_body_bytes = limit;
        self
    }

    /// Starts accepting connections and dispatching them through `router`.
    ///
    /// Returns only after a full graceful shutdown (SIGTERM or Ctrl-C,
    /// followed by all in-flight requests completing).
    pub async fn serve<S>(self, router: Router<S>) -> Result<(), Error>
    where
        S: Clone + Send + Sync + 'static,
    {
        self.serve_with_shutdown(router, shutdown_signal()).await
    }

    /// Like [`serve`](Server::serve), but stops accepting when `signal`
    /// resolves instead of on a process signal.
    pub async fn serve_with_shutdown<S, F>(self, router: Router<S>, signal: F) -> Result<(), Error>
    where
        S: Clone + Send + Sync + 'static,
        F: Future<Output = ()>,
    {
        let listener = match self.listener {
            Some(listener) => listener,
            None => TcpListener::bind(self.addr).await?,
        };
        let addr = listener.local_addr()?;
        let router = Arc::new(router);
        let limit = self.max_body_bytes;

        info!(%addr, max_body_bytes = limit, "listening");

        let mut tasks = tokio::task::JoinSet::new();
        tokio::pin!(signal);

        loop {
            tokio::select! {
                // Shutdown is checked first so a signal stops accepting even
                // when more connections are queued.
                biased;

                () = &mut signal => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, peer) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("accept error: {e}");
                            continue;
                        }
                    };

                    let router = Arc::clone(&router);
                    let io = TokioIo::new(stream);

                    tasks.spawn(async move {
                        // Called once per request on the connection.
                        let svc = service_fn(move |req| {
                            let router = Arc::clone(&router);
                            async move { dispatch(router, req, peer, limit).await }
                        });

                        if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                            .serve_connection(io, svc)
                            .await
                        {
                            error!(%peer, "connection error: {e}");
                        }
                    });
                }

                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        while tasks.join_next().await.is_some() {}

        info!("stopped");
        Ok(())
    }
}

/// Buffers the body, routes the request, and logs the outcome. Failures are
/// answered with a status, so hyper never sees an error.
async fn dispatch<S>(
    router: Arc<Router<S>>,
    req: hyper::Request<Incoming>,
    peer: SocketAddr,
    limit: usize,
) -> Result<http::Response<Full<Bytes>>, Infallible>
where
    S: Clone + Send + Sync + 'static,
{
    let started = Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_owned();

    let (parts, body) = req.into_parts();
    let response = match Limited::new(body, limit).collect().await {
        Ok(collected) => router.handle(http::Request::from_parts(parts, collected.to_bytes())).await,
        Err(e) if e.downcast_ref::<LengthLimitError>().is_some() => {
            warn!(%peer, limit, "request body too large");
            Response::status(Status::ContentTooLarge)
        }
        Err(e) => {
            warn!(%peer, "failed to read request body: {e}");
            Response::status(Status::BadRequest)
        }
    };

    info!(
        %peer,
        %method,
        path = %path,
        status = response.status_code(),
        elapsed_us = started.elapsed().as_micros() as u64,
        "request"
    );
    Ok(response.into_inner())
}

/// Resolves on the first shutdown signal the process receives: SIGTERM or
/// SIGINT on Unix, Ctrl-C elsewhere.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c   => {}
        () = sigterm  => {}
    }
}
