use crate::{
    api::{builder::FakeClientBuilder, client::HttpClient, response::FakeResponse},
    common::{
        data::{Method, RequestOptions},
        error::Error,
    },
    router::{encoding::Encoders, history::RequestLog, registry::Registry},
};
use std::{
    cell::{OnceCell, RefCell},
    fmt,
    rc::Rc,
};
use url::Url;

pub(crate) struct Settings {
    pub(crate) base_url: Url,
    pub(crate) default_content_type: String,
    pub(crate) encoders: Encoders,
}

struct Shared {
    registry: RefCell<Registry>,
    log: OnceCell<RefCell<RequestLog>>,
    settings: Settings,
}

impl Shared {
    fn log(&self) -> &RefCell<RequestLog> {
        self.log.get_or_init(RefCell::default)
    }
}

/// An [`HttpClient`] that answers requests from registered routes instead of the network.
///
/// Branches created through [`HttpClient::branch`] (or any of the configuration methods
/// like [`HttpClient::header`]) share the route table and the request log with the
/// client they were created from. Only the accumulated request options differ.
///
/// A `FakeClient` is meant for single-threaded tests and is neither `Send` nor `Sync`.
///
/// # Example
/// ```
/// use httpfake::prelude::*;
/// use serde_json::json;
///
/// let client = FakeClient::new(|routes| {
///     routes
///         .get("/users/:id", |params, _, _| {
///             Ok(json!({ "id": params.parse::<u32>("id") }).into())
///         })
///         .post("/users", |_, options, res| {
///             res.set_status(201);
///             Ok(options.json_body().cloned().unwrap_or_default().into())
///         });
/// })
/// .unwrap();
///
/// let created = client
///     .post("/users", RequestOptions::new().json(json!({ "name": "Fred" })))
///     .unwrap();
/// assert_eq!(created.status(), 201);
/// assert_eq!(created.text(), r#"{"name":"Fred"}"#);
///
/// let fetched = client.get("/users/5", RequestOptions::new()).unwrap();
/// assert_eq!(fetched.text(), r#"{"id":5}"#);
///
/// assert_eq!(client.hits(POST, "/users"), 1);
/// ```
#[derive(Clone)]
pub struct FakeClient {
    shared: Rc<Shared>,
    options: RequestOptions,
}

impl FakeClient {
    /// Creates a client with default settings, running `configure` once to register
    /// routes.
    pub fn new<F>(configure: F) -> Result<Self, Error>
    where
        F: FnOnce(&mut Registry),
    {
        FakeClientBuilder::new().build(configure)
    }

    pub fn builder() -> FakeClientBuilder {
        FakeClientBuilder::new()
    }

    pub(crate) fn from_parts(
        registry: Registry,
        settings: Settings,
        options: RequestOptions,
    ) -> Self {
        Self {
            shared: Rc::new(Shared {
                registry: RefCell::new(registry),
                log: OnceCell::new(),
                settings,
            }),
            options,
        }
    }

    /// The options accumulated through branching.
    pub fn options(&self) -> &RequestOptions {
        &self.options
    }

    /// Adds all routes of `other` to this client's route table. The added routes win
    /// ties against routes already present. Affects every branch sharing the table.
    pub fn merge(&self, other: &FakeClient) -> &Self {
        let mut incoming = Registry::new();
        incoming.merge(&other.shared.registry.borrow());

        self.shared.registry.borrow_mut().merge(&incoming);
        self
    }

    /// Registers additional routes. Nothing is added if any of them is invalid.
    pub fn extend<F>(&self, configure: F) -> Result<&Self, Error>
    where
        F: FnOnce(&mut Registry),
    {
        let mut staged = Registry::new();
        configure(&mut staged);
        staged.take_deferred_error()?;

        self.shared.registry.borrow_mut().merge(&staged);
        Ok(self)
    }

    /// A snapshot of every request resolved so far.
    pub fn requests(&self) -> RequestLog {
        self.shared.log().borrow().clone()
    }

    /// The options of every `method` request to `path`, in call order. Paths are compared
    /// percent-decoded, so `path` may be given in either form.
    pub fn requests_for(&self, method: Method, path: &str) -> Vec<RequestOptions> {
        self.shared.log().borrow().entries(path, method).to_vec()
    }

    pub fn hits(&self, method: Method, path: &str) -> usize {
        self.shared.log().borrow().count(path, method)
    }

    /// Panics unless exactly `expected` `method` requests were made to `path`.
    #[track_caller]
    pub fn assert_hits(&self, method: Method, path: &str, expected: usize) {
        let log = self.shared.log().borrow();
        let actual = log.count(path, method);
        if actual != expected {
            let recorded: Vec<&str> = log.paths().collect();
            panic!(
                "expected {} {} to be requested {} time(s), but it was requested {} time(s) (recorded paths: {:?})",
                method, path, expected, actual, recorded
            );
        }
    }

    /// Forgets all recorded requests. Routes stay registered.
    pub fn reset_requests(&self) {
        self.shared.log().borrow_mut().clear();
    }

    pub fn routes(&self) -> Vec<(Method, String)> {
        self.shared.registry.borrow().routes()
    }

    /// Returns `true` if both clients resolve against the same route table.
    pub fn shares_routes_with(&self, other: &FakeClient) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }

    fn resolve_uri(&self, uri: &str) -> Result<Url, Error> {
        self.shared
            .settings
            .base_url
            .join(uri)
            .map_err(|err| Error::InvalidUri {
                uri: uri.to_string(),
                reason: err.to_string(),
            })
    }
}

impl HttpClient for FakeClient {
    type Response = FakeResponse;
    type Error = Error;

    fn request(
        &self,
        method: Method,
        uri: &str,
        options: RequestOptions,
    ) -> Result<FakeResponse, Error> {
        let options = self.options.merged(&options);
        let url = self.resolve_uri(uri)?;
        let path = url.path();

        let responder = {
            let registry = self.shared.registry.borrow();
            match registry.find(method, path) {
                Some(responder) => responder.clone(),
                None => {
                    tracing::debug!("No route matches {} {}", method, uri);
                    return Err(registry.unmatched(method, uri));
                }
            }
        };

        self.shared
            .log()
            .borrow_mut()
            .record(path, method, options.clone());

        let settings = &self.shared.settings;
        responder.call(
            uri,
            path,
            &options,
            &settings.default_content_type,
            &settings.encoders,
        )
    }

    fn branch(&self, options: RequestOptions) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
            options: self.options.merged(&options),
        }
    }
}

impl fmt::Debug for FakeClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeClient")
            .field("base_url", &self.shared.settings.base_url.as_str())
            .field("routes", &self.shared.registry.borrow().len())
            .field("options", &self.options)
            .finish()
    }
}
