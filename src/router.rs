//! Radix-tree request router.
//!
//! One tree per HTTP method, O(path-length) lookup via [`matchit`]. A path
//! segment may carry a regex constraint, `{id:[0-9]+}`; the whole segment
//! must match it or the route does not match at all.
//!
//! Routes match the raw path; captured values are percent-decoded before
//! constraints run and before handlers see them.

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use matchit::Router as MatchitRouter;
use percent_encoding::percent_decode_str;
use regex::Regex;
use tracing::debug;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

struct Route<S> {
    handler: BoxedHandler<S>,
    constraints: Vec<(String, Regex)>,
}

impl<S> Route<S> {
    fn accepts(&self, params: &HashMap<String, String>) -> bool {
        self.constraints.iter().all(|(name, re)| {
            params.get(name).is_some_and(|value| re.is_match(value))
        })
    }
}

enum Lookup<S> {
    Found(BoxedHandler<S>, HashMap<String, String>),
    /// A captured segment is not valid UTF-8 once decoded.
    BadParam(String),
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

/// Percent-decodes every captured value. `Err` names the first parameter
/// whose bytes are not UTF-8.
fn decode_params(params: &matchit::Params<'_, '_>) -> Result<HashMap<String, String>, String> {
    params.iter()
        .map(|(k, v)| {
            percent_decode_str(v)
                .decode_utf8()
                .map(|decoded| (k.to_owned(), decoded.into_owned()))
                .map_err(|_| k.to_owned())
        })
        .collect()
}

/// The application router.
///
/// Owns the application state `S` and clones it into every handler call.
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each [`Router::on`] call returns `self` so registrations chain naturally.
pub struct Router<S> {
    routes: HashMap<Method, MatchitRouter<Route<S>>>,
    state: S,
}

impl<S> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new(state: S) -> Self {
        Self { routes: HashMap::new(), state }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax and may be constrained with a
    /// regex, `{name:regex}`. `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if the pattern conflicts with an existing route or a
    /// constraint is not a valid regex.
    pub fn on(mut self, method: Method, pattern: &str, handler: impl Handler<S>) -> Self {
        let (path, constraints) = parse_pattern(pattern);
        let route = Route { handler: handler.into_boxed_handler(), constraints };
        self.routes
            .entry(method)
            .or_default()
            .insert(path, route)
            .unwrap_or_else(|e| panic!("invalid route `{pattern}`: {e}"));
        self
    }

    /// Routes one buffered request and produces one response.
    ///
    /// Unknown methods and paths registered only under other methods get
    /// `405`; unmatched paths get `404`.
    pub async fn handle(&self, req: http::Request<Bytes>) -> Response {
        let (parts, body) = req.into_parts();
        let Ok(method) = parts.method.as_str().parse::<Method>() else {
            return Response::status(Status::MethodNotAllowed);
        };
        let path = parts.uri.path().to_owned();

        match self.lookup(method, &path) {
            Lookup::Found(handler, params) => {
                let req = Request::new(method, path, parts.headers, body, params);
                handler.call(req, self.state.clone()).await
            }
            Lookup::BadParam(name) => {
                debug!(param = %name, "path parameter is not UTF-8");
                Response::builder()
                    .status(Status::BadRequest)
                    .text(format!("path parameter `{name}` is not valid UTF-8"))
            }
            Lookup::MethodNotAllowed(allowed) => {
                let allow = allowed.iter().map(|m| m.as_str()).collect::<Vec<_>>().join(", ");
                Response::builder()
                    .status(Status::MethodNotAllowed)
                    .header("allow", &allow)
                    .no_body()
            }
            Lookup::NotFound => Response::status(Status::NotFound),
        }
    }

    fn lookup(&self, method: Method, path: &str) -> Lookup<S> {
        if let Some(found) = self.matching(method, path) {
            return found;
        }
        let mut allowed: Vec<Method> = self.routes.keys()
            .copied()
            .filter(|&m| m != method && self.matching(m, path).is_some())
            .collect();
        if allowed.is_empty() {
            return Lookup::NotFound;
        }
        allowed.sort();
        Lookup::MethodNotAllowed(allowed)
    }

    fn matching(&self, method: Method, path: &str) -> Option<Lookup<S>> {
        let matched = self.routes.get(&method)?.at(path).ok()?;
        let params = match decode_params(&matched.params) {
            Ok(params) => params,
            Err(name) => return Some(Lookup::BadParam(name)),
        };
        if !matched.value.accepts(&params) {
            return None;
        }
        Some(Lookup::Found(Arc::clone(&matched.value.handler), params))
    }
}

/// Splits `{name:regex}` segments into a plain matchit path and the
/// anchored regexes to check after a match.
fn parse_pattern(pattern: &str) -> (String, Vec<(String, Regex)>) {
    let mut path = String::with_capacity(pattern.len());
    let mut constraints = Vec::new();
    let mut chars = pattern.chars();

    while let Some(c) = chars.next() {
        if c != '{' {
            path.push(c);
            continue;
        }
        // Braces inside the regex (e.g. `[0-9]{2}`) nest.
        let mut depth = 1;
        let mut segment = String::new();
        for c in chars.by_ref() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                _ => {}
            }
            segment.push(c);
        }
        match segment.split_once(':') {
            Some((name, expr)) => {
                let re = Regex::new(&format!("^(?:{expr})$"))
                    .unwrap_or_else(|e| panic!("invalid constraint in route `{pattern}`: {e}"));
                constraints.push((name.to_owned(), re));
                path.push('{');
                path.push_str(name);
                path.push('}');
            }
            None => {
                path.push('{');
                path.push_str(&segment);
                path.push('}');
            }
        }
    }
    (path, constraints)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn echo_id(req: Request, _state: ()) -> String {
        format!("{} {}", req.method(), req.param("id").unwrap_or("-"))
    }

    async fn echo_path(req: Request, _state: ()) -> String {
        format!("{} -> {}", req.path(), req.param("id").unwrap_or("-"))
    }

    async fn hello(_req: Request, _state: ()) -> &'static str {
        "hello"
    }

    fn get(uri: &str) -> http::Request<Bytes> {
        http::Request::builder().uri(uri).body(Bytes::new()).unwrap()
    }

    fn request(method: &str, uri: &str) -> http::Request<Bytes> {
        http::Request::builder().method(method).uri(uri).body(Bytes::new()).unwrap()
    }

    #[test]
    fn pattern_constraints_are_stripped() {
        let (path, constraints) = parse_pattern("/pokemon/update/{id:[0-9]{1,4}}");
        assert_eq!(path, "/pokemon/update/{id}");
        assert_eq!(constraints.len(), 1);
        assert_eq!(constraints[0].0, "id");
        assert!(constraints[0].1.is_match("12"));
        assert!(!constraints[0].1.is_match("12345"));

        let (path, constraints) = parse_pattern("/people/{id}");
        assert_eq!(path, "/people/{id}");
        assert!(constraints.is_empty());
    }

    #[tokio::test]
    async fn extracts_named_params() {
        let router = Router::new(()).on(Method::Get, "/people/{id}", echo_id);
        let res = router.handle(get("/people/abc")).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.body(), b"GET abc");
    }

    #[tokio::test]
    async fn constraint_failure_is_not_found() {
        let router = Router::new(()).on(Method::Get, "/pokemon/{id:[0-9]+}", echo_id);
        assert_eq!(router.handle(get("/pokemon/25")).await.body(), b"GET 25");
        assert_eq!(router.handle(get("/pokemon/pika")).await.status_code(), 404);
        assert_eq!(router.handle(get("/pokemon/25a")).await.status_code(), 404);
    }

    #[tokio::test]
    async fn static_and_param_segments_coexist() {
        let router = Router::new(())
            .on(Method::Get, "/pokemon/", hello)
            .on(Method::Get, "/pokemon/{id:[0-9]+}", echo_id);
        assert_eq!(router.handle(get("/pokemon/")).await.body(), b"hello");
        assert_eq!(router.handle(get("/pokemon/3")).await.body(), b"GET 3");
        assert_eq!(router.handle(get("/pokemon")).await.status_code(), 404);
    }

    #[tokio::test]
    async fn other_methods_yield_405_with_allow() {
        let router = Router::new(())
            .on(Method::Get, "/people/{id}", echo_id)
            .on(Method::Delete, "/people/{id}", echo_id);
        let res = router.handle(request("PUT", "/people/1")).await;
        assert_eq!(res.status_code(), 405);
        assert_eq!(res.header("allow"), Some("DELETE, GET"));

        let res = router.handle(request("PURGE", "/people/1")).await;
        assert_eq!(res.status_code(), 405);

        let res = router.handle(request("PUT", "/nowhere")).await;
        assert_eq!(res.status_code(), 404);
    }

    #[tokio::test]
    async fn params_are_percent_decoded() {
        let router = Router::new(()).on(Method::Get, "/people/{id}", echo_path);
        let res = router.handle(get("/people/a%20b")).await;
        assert_eq!(res.status_code(), 200);
        assert_eq!(res.body(), "/people/a%20b -> a b".as_bytes());

        let res = router.handle(get("/people/caf%C3%A9")).await;
        assert_eq!(res.body(), "/people/caf%C3%A9 -> café".as_bytes());
    }

    #[tokio::test]
    async fn constraints_see_decoded_values() {
        let router = Router::new(()).on(Method::Get, "/pokemon/{id:[0-9]+}", echo_id);
        assert_eq!(router.handle(get("/pokemon/%34%32")).await.body(), b"GET 42");
        assert_eq!(router.handle(get("/pokemon/4%20")).await.status_code(), 404);
    }

    #[tokio::test]
    async fn undecodable_params_are_bad_requests() {
        let router = Router::new(()).on(Method::Get, "/people/{id}", echo_id);
        let res = router.handle(get("/people/%FF%FE")).await;
        assert_eq!(res.status_code(), 400);
    }

    #[test]
    #[should_panic(expected = "invalid route")]
    fn conflicting_routes_panic() {
        let _ = Router::new(())
            .on(Method::Get, "/people/{id}", echo_id)
            .on(Method::Get, "/people/{name}", echo_id);
    }
}
