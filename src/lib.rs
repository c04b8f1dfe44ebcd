//! `httpfake` is an in-process fake HTTP client for tests. Instead of sending requests over
//! the network, a [`FakeClient`] resolves each call against routes registered by the test
//! and records every request so the test can assert on it afterwards.
//!
//! Code under test is written against the [`HttpClient`] trait. Production wiring hands
//! it a real client; tests hand it a `FakeClient`.
//!
//! # Getting Started
//! ```rust
//! use httpfake::prelude::*;
//! use serde_json::json;
//!
//! let client = FakeClient::new(|routes| {
//!     routes
//!         .get("/users/:id", |params, _, _| {
//!             Ok(json!({ "id": params.get("id"), "name": "Fred" }).into())
//!         })
//!         .get("/users/me", |_, _, res| {
//!             res.set_content_type("text/plain");
//!             Ok("the current user".into())
//!         });
//! })
//! .unwrap();
//!
//! let response = client.get("/users/5", RequestOptions::new()).unwrap();
//! assert_eq!(response.status(), 200);
//! assert_eq!(response.content_type(), Some("application/json"));
//! assert_eq!(response.text(), r#"{"id":"5","name":"Fred"}"#);
//!
//! // The more specific route wins, no matter in which order routes were registered.
//! let me = client.get("/users/me", RequestOptions::new()).unwrap();
//! assert_eq!(me.text(), "the current user");
//! assert_eq!(me.content_type(), Some("text/plain"));
//!
//! client.assert_hits(GET, "/users/5", 1);
//! ```
//!
//! # Routing
//! Path patterns consist of literal segments, named parameters (`:id` or `{id}`), typed
//! parameters (`{id:\d+}`) and a trailing splat (`*path`). See [`Pattern`].
//!
//! When several routes match a request, the one binding the fewest parameters wins. If
//! that still leaves a tie, the most recently added route wins. Registering the same
//! pattern again therefore overrides the earlier handler, and routes merged in through
//! [`FakeClient::merge`] or [`FakeClient::extend`] take precedence over equally specific
//! existing ones.
//!
//! A request that matches no route fails with [`Error::UnmatchedRoute`]. The error lists
//! every registered route, so a missing stub is easy to spot.
//!
//! # Branching
//! Configuration methods like [`HttpClient::header`] return a branch: a new client
//! carrying the additional options that shares routes and request log with its parent.
//! The parent itself is never changed.
//!
//! ```rust
//! use httpfake::prelude::*;
//!
//! let client = FakeClient::new(|routes| {
//!     routes.get("/me", |_, options, _| {
//!         Ok(options.header_value("authorization").unwrap_or("anonymous").into())
//!     });
//! })
//! .unwrap();
//!
//! let authed = client.bearer_auth("t0ken");
//! assert_eq!(authed.get("/me", RequestOptions::new()).unwrap().text(), "Bearer t0ken");
//! assert_eq!(client.get("/me", RequestOptions::new()).unwrap().text(), "anonymous");
//!
//! // Both requests end up in the same log.
//! assert_eq!(client.hits(GET, "/me"), 2);
//! ```
//!
//! # Threading
//! A `FakeClient` and its branches share state through `Rc`, so they are neither `Send`
//! nor `Sync`. Each test builds its own fake.
//!
//! # Debugging
//! `httpfake` logs through `tracing` with the `log` compatibility feature enabled. With the
//! `env_logger` backend, set `RUST_LOG=httpfake=trace` and call `env_logger::try_init()`
//! in your test to see how requests are resolved.
mod api;
mod common;
mod router;

pub use api::{
    Body, FakeClient, FakeClientBuilder, FakeResponse, HttpClient, ResponseBuilder,
    DEFAULT_CONTENT_TYPE_ENV, HTTP_VERSION,
};
pub use common::{
    data::{Method, Params, RequestOptions},
    error::{BoxError, Error},
};
pub use router::{
    BodyEncoder, FormEncoder, HandlerResult, JsonEncoder, Pattern, Registry, RequestLog,
    Responder,
};

pub mod prelude {
    #[doc(no_inline)]
    pub use crate::{
        Body, FakeClient, FakeResponse, HttpClient, Method, Params, RequestOptions,
        ResponseBuilder,
    };

    #[doc(no_inline)]
    pub use crate::Method::{DELETE, GET, PATCH, POST, PUT};
}
