//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. Every handler receives a
//! clone of the router state next to the request, so shared resources (the
//! database store) are passed in explicitly instead of living in globals.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use matchit::Router as MatchitRouter;
use tracing::{Instrument, info_span};

use crate::error::ApiError;
use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::middleware::{cors, trace};
use crate::request::Request;
use crate::response::{IntoResponse, Response};
use crate::status::Status;

/// The application router.
///
/// Build it once at startup; pass it to [`Server::serve`](crate::Server::serve).
/// Each [`Router::on`] call returns `self` so registrations chain naturally.
pub struct Router<S> {
    routes: HashMap<Method, MatchitRouter<BoxedHandler<S>>>,
    state: S,
    cors: bool,
}

impl<S: Clone + Send + Sync + 'static> Router<S> {
    /// Creates an empty router whose handlers all receive `state`.
    pub fn with_state(state: S) -> Self {
        Self { routes: HashMap::new(), state, cors: false }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler<S>) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Enables permissive CORS: every response carries
    /// `access-control-allow-origin: *` and `OPTIONS` preflights are answered
    /// directly.
    pub fn cors(mut self, enabled: bool) -> Self {
        self.cors = enabled;
        self
    }

    /// Routes one request and produces one response.
    ///
    /// Never fails: unknown methods become `405`, unknown paths `404`.
    pub async fn dispatch(&self, req: http::Request<Bytes>) -> Response {
        let started = Instant::now();
        let span = info_span!("request", method = %req.method(), path = %req.uri().path());

        async move {
            let mut response = self.route(req).await;
            if self.cors {
                cors::decorate(&mut response);
            }
            trace::completed(&response, started);
            response
        }
        .instrument(span)
        .await
    }

    async fn route(&self, req: http::Request<Bytes>) -> Response {
        let Ok(method) = req.method().as_str().parse::<Method>() else {
            return Response::status(Status::MethodNotAllowed);
        };

        if self.cors && method == Method::Options {
            let requested = req
                .headers()
                .get("access-control-request-headers")
                .and_then(|v| v.to_str().ok());
            return cors::preflight(requested);
        }

        match self.lookup(method, req.uri().path()) {
            Some((handler, params)) => {
                handler.call(Request::new(req, params), self.state.clone()).await
            }
            None => ApiError::NotFound("not found".into()).into_response(),
        }
    }

    pub(crate) fn lookup(
        &self,
        method: Method,
        path: &str,
    ) -> Option<(BoxedHandler<S>, HashMap<String, String>)> {
        let tree = self.routes.get(&method)?;
        let matched = tree.at(path).ok()?;
        let handler = Arc::clone(matched.value);
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), v.to_owned()))
            .collect();
        Some((handler, params))
    }
}
