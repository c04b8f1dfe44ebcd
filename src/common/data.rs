use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::{collections::BTreeMap, fmt, str::FromStr, time::Duration};

/// Represents an HTTP method a fake client can route.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Method {
    GET,
    POST,
    PUT,
    PATCH,
    DELETE,
}

impl Method {
    /// All methods a route can be registered for.
    pub const ALL: [Method; 5] = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::PATCH,
        Method::DELETE,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::GET => "GET",
            Method::POST => "POST",
            Method::PUT => "PUT",
            Method::PATCH => "PATCH",
            Method::DELETE => "DELETE",
        }
    }
}

impl PartialEq<Method> for http::method::Method {
    fn eq(&self, other: &Method) -> bool {
        self.as_str().eq_ignore_ascii_case(other.as_str())
    }
}

impl From<Method> for http::method::Method {
    fn from(value: Method) -> Self {
        match value {
            Method::GET => http::Method::GET,
            Method::POST => http::Method::POST,
            Method::PUT => http::Method::PUT,
            Method::PATCH => http::Method::PATCH,
            Method::DELETE => http::Method::DELETE,
        }
    }
}

impl FromStr for Method {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.to_uppercase().as_str() {
            "GET" => Ok(Method::GET),
            "POST" => Ok(Method::POST),
            "PUT" => Ok(Method::PUT),
            "PATCH" => Ok(Method::PATCH),
            "DELETE" => Ok(Method::DELETE),
            _ => Err(format!("Invalid HTTP method {}", input)),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path parameters bound by a matched [`Pattern`](crate::Pattern), in template order.
///
/// Values are percent-decoded. Use [`Params::to_map`] when a plain mapping is needed.
#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: Vec<(String, String)>,
}

impl Params {
    pub(crate) fn insert(&mut self, name: &str, value: String) {
        self.values.push((name.to_string(), value));
    }

    /// Returns the raw value bound to `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Parses the value bound to `name`. Returns `None` if the parameter is missing or
    /// cannot be parsed into `T`.
    ///
    /// # Example
    /// ```
    /// use httpfake::Pattern;
    ///
    /// let pattern = Pattern::parse("/users/:id").unwrap();
    /// let params = pattern.matches("/users/42").unwrap();
    /// assert_eq!(params.parse::<u64>("id"), Some(42));
    /// ```
    pub fn parse<T: FromStr>(&self, name: &str) -> Option<T> {
        self.get(name).and_then(|value| value.parse().ok())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Converts the parameters into an owned name-to-value mapping.
    pub fn to_map(&self) -> BTreeMap<String, String> {
        self.values.iter().cloned().collect()
    }
}

/// The options passed along with a single request: headers, query parameters, body and
/// timeout. This is what a [`FakeClient`](crate::FakeClient) records in its request log.
///
/// Header names are stored lowercase.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    headers: BTreeMap<String, String>,
    query: Vec<(String, String)>,
    json: Option<Value>,
    body: Option<String>,
    form: Vec<(String, String)>,
    timeout: Option<Duration>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a header. Header names are case-insensitive; a later value for the same name
    /// replaces the earlier one.
    pub fn header<K, V>(mut self, name: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.headers
            .insert(name.into().to_ascii_lowercase(), value.into());
        self
    }

    pub fn headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        headers
            .into_iter()
            .fold(self, |options, (name, value)| options.header(name, value))
    }

    /// Sets the `authorization` header to HTTP basic credentials.
    pub fn basic_auth(self, username: &str, password: &str) -> Self {
        let credentials = STANDARD.encode(format!("{}:{}", username, password));
        self.header("authorization", format!("Basic {}", credentials))
    }

    /// Sets the `authorization` header to a bearer token.
    pub fn bearer_auth(self, token: &str) -> Self {
        self.header("authorization", format!("Bearer {}", token))
    }

    pub fn query<K, V>(mut self, name: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Sets a JSON request body.
    pub fn json<V: Into<Value>>(mut self, body: V) -> Self {
        self.json = Some(body.into());
        self
    }

    /// Sets a raw request body.
    pub fn body<B: Into<String>>(mut self, body: B) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Adds an `application/x-www-form-urlencoded` field.
    pub fn form<K, V>(mut self, name: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.form.push((name.into(), value.into()));
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn header_map(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn query_params(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn json_body(&self) -> Option<&Value> {
        self.json.as_ref()
    }

    pub fn raw_body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn form_fields(&self) -> &[(String, String)] {
        &self.form
    }

    /// Returns the form fields encoded as `application/x-www-form-urlencoded`, or `None`
    /// when no form fields were set.
    pub fn form_encoded(&self) -> Option<String> {
        if self.form.is_empty() {
            return None;
        }

        let mut serializer = form_urlencoded::Serializer::new(String::new());
        serializer.extend_pairs(self.form.iter());
        Some(serializer.finish())
    }

    pub fn timeout_duration(&self) -> Option<Duration> {
        self.timeout
    }

    /// Layers `overrides` on top of `self` and returns the result.
    ///
    /// Headers are merged per name with `overrides` winning. Every other option is
    /// replaced as a whole when `overrides` sets it.
    pub fn merged(&self, overrides: &RequestOptions) -> RequestOptions {
        let mut headers = self.headers.clone();
        headers.extend(
            overrides
                .headers
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );

        RequestOptions {
            headers,
            query: pick_list(&self.query, &overrides.query),
            json: overrides.json.clone().or_else(|| self.json.clone()),
            body: overrides.body.clone().or_else(|| self.body.clone()),
            form: pick_list(&self.form, &overrides.form),
            timeout: overrides.timeout.or(self.timeout),
        }
    }
}

fn pick_list(base: &[(String, String)], overrides: &[(String, String)]) -> Vec<(String, String)> {
    if overrides.is_empty() {
        base.to_vec()
    } else {
        overrides.to_vec()
    }
}
