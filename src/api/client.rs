use crate::common::data::{Method, RequestOptions};
use std::time::Duration;

/// The fluent interface code under test talks to.
///
/// Implementors provide [`request`](HttpClient::request) and
/// [`branch`](HttpClient::branch); every verb method funnels into `request`, and every
/// configuration method returns a branch carrying the extra options. Code written against
/// this trait works unchanged with a real client or with a
/// [`FakeClient`](crate::FakeClient).
///
/// # Example
/// ```
/// use httpfake::prelude::*;
/// use serde_json::json;
///
/// fn fetch_user<C: HttpClient>(client: &C, id: u32) -> Result<C::Response, C::Error> {
///     client
///         .header("accept", "application/json")
///         .get(&format!("/users/{}", id), RequestOptions::new())
/// }
///
/// let client = FakeClient::new(|routes| {
///     routes.get("/users/:id", |params, _, _| Ok(json!({ "id": params.get("id") }).into()));
/// })
/// .unwrap();
///
/// let response = fetch_user(&client, 7).unwrap();
/// assert_eq!(response.text(), r#"{"id":"7"}"#);
/// ```
pub trait HttpClient: Sized {
    type Response;
    type Error;

    /// Performs a request. `options` take precedence over the options accumulated through
    /// branching.
    fn request(
        &self,
        method: Method,
        uri: &str,
        options: RequestOptions,
    ) -> Result<Self::Response, Self::Error>;

    /// Returns a client with `options` layered over this client's options. `self` is
    /// left unchanged.
    fn branch(&self, options: RequestOptions) -> Self;

    fn get(&self, uri: &str, options: RequestOptions) -> Result<Self::Response, Self::Error> {
        self.request(Method::GET, uri, options)
    }

    fn post(&self, uri: &str, options: RequestOptions) -> Result<Self::Response, Self::Error> {
        self.request(Method::POST, uri, options)
    }

    fn put(&self, uri: &str, options: RequestOptions) -> Result<Self::Response, Self::Error> {
        self.request(Method::PUT, uri, options)
    }

    fn patch(&self, uri: &str, options: RequestOptions) -> Result<Self::Response, Self::Error> {
        self.request(Method::PATCH, uri, options)
    }

    fn delete(&self, uri: &str, options: RequestOptions) -> Result<Self::Response, Self::Error> {
        self.request(Method::DELETE, uri, options)
    }

    fn headers<I, K, V>(&self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.branch(RequestOptions::new().headers(headers))
    }

    fn header<K, V>(&self, name: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.branch(RequestOptions::new().header(name, value))
    }

    fn basic_auth(&self, username: &str, password: &str) -> Self {
        self.branch(RequestOptions::new().basic_auth(username, password))
    }

    fn bearer_auth(&self, token: &str) -> Self {
        self.branch(RequestOptions::new().bearer_auth(token))
    }

    fn timeout(&self, timeout: Duration) -> Self {
        self.branch(RequestOptions::new().timeout(timeout))
    }

    /// Releases the client. The default does nothing.
    fn close(&self) {}
}
