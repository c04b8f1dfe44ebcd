use crate::{
    api::fake::{FakeClient, Settings},
    common::{data::RequestOptions, error::Error, util::read_env},
    router::{
        encoding::{BodyEncoder, Encoders, JSON_CONTENT_TYPE},
        registry::Registry,
    },
};
use std::rc::Rc;
use url::Url;

/// Environment variable consulted when no default content type is configured explicitly.
pub const DEFAULT_CONTENT_TYPE_ENV: &str = "HTTPFAKE_DEFAULT_CONTENT_TYPE";

const DEFAULT_BASE_URL: &str = "http://localhost/";

/// Configures and builds a [`FakeClient`].
///
/// # Example
/// ```
/// use httpfake::prelude::*;
///
/// let client = FakeClient::builder()
///     .base_url("https://api.example.com/v1/")
///     .default_content_type("text/plain")
///     .default_options(RequestOptions::new().header("user-agent", "tests"))
///     .build(|routes| {
///         routes.get("/v1/ping", |_, _, _| Ok("pong".into()));
///     })
///     .unwrap();
///
/// let response = client.get("ping", RequestOptions::new()).unwrap();
/// assert_eq!(response.text(), "pong");
/// assert_eq!(response.content_type(), Some("text/plain"));
/// ```
#[derive(Debug)]
pub struct FakeClientBuilder {
    default_content_type: Option<String>,
    base_url: Option<String>,
    default_options: RequestOptions,
    encoders: Encoders,
}

impl FakeClientBuilder {
    pub(crate) fn new() -> Self {
        Self {
            default_content_type: None,
            base_url: None,
            default_options: RequestOptions::default(),
            encoders: Encoders::default(),
        }
    }

    /// Sets the content type responses carry unless a handler sets one.
    ///
    /// Falls back to the `HTTPFAKE_DEFAULT_CONTENT_TYPE` environment variable and then
    /// to `application/json`.
    pub fn default_content_type<S: Into<String>>(mut self, content_type: S) -> Self {
        self.default_content_type = Some(content_type.into());
        self
    }

    /// Sets the base URL that relative request URIs are resolved against.
    /// Defaults to `http://localhost/`.
    pub fn base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets the options every request of the root client starts from.
    pub fn default_options(mut self, options: RequestOptions) -> Self {
        self.default_options = options;
        self
    }

    /// Registers an encoder for structured bodies of `content_type`. Replaces any encoder
    /// registered for the same media type, including the built-in ones.
    pub fn encoder<E>(mut self, content_type: &str, encoder: E) -> Self
    where
        E: BodyEncoder + 'static,
    {
        self.encoders.insert(content_type, Rc::new(encoder));
        self
    }

    /// Builds the client, running `configure` once to register its routes.
    pub fn build<F>(self, configure: F) -> Result<FakeClient, Error>
    where
        F: FnOnce(&mut Registry),
    {
        let base_url = self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL);
        let base_url = Url::parse(base_url).map_err(|err| Error::InvalidUri {
            uri: base_url.to_string(),
            reason: err.to_string(),
        })?;

        let default_content_type = self
            .default_content_type
            .unwrap_or_else(|| read_env(DEFAULT_CONTENT_TYPE_ENV, JSON_CONTENT_TYPE));

        let mut registry = Registry::new();
        configure(&mut registry);
        registry.take_deferred_error()?;

        tracing::debug!(
            "Built fake client with {} route(s), base URL {} and default content type {}",
            registry.len(),
            base_url,
            default_content_type
        );

        let settings = Settings {
            base_url,
            default_content_type,
            encoders: self.encoders,
        };

        Ok(FakeClient::from_parts(registry, settings, self.default_options))
    }
}

impl Default for FakeClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
