use crate::{
    common::error::Error,
    router::encoding::{Encoders, JSON_CONTENT_TYPE},
};
use http::{
    header::{HeaderName, HeaderValue, CONTENT_TYPE},
    HeaderMap, StatusCode,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::str::FromStr;

/// The HTTP version every fake response reports.
pub const HTTP_VERSION: &str = "1.1";

/// What a route handler returns.
///
/// Structured values are encoded for the response content type (JSON by default).
/// Text is used as the response body verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Json(Value),
    Text(String),
}

impl Body {
    /// Creates a structured body from any serializable value.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self, Error> {
        Ok(Body::Json(serde_json::to_value(value)?))
    }

    pub fn empty() -> Self {
        Body::Text(String::new())
    }
}

impl From<Value> for Body {
    fn from(value: Value) -> Self {
        Body::Json(value)
    }
}

impl From<String> for Body {
    fn from(value: String) -> Self {
        Body::Text(value)
    }
}

impl From<&str> for Body {
    fn from(value: &str) -> Self {
        Body::Text(value.to_string())
    }
}

/// Lets a route handler shape the response it produces.
///
/// A fresh builder is handed to every handler invocation. Status defaults to `200`
/// and content type defaults to the client's configured default (`application/json`
/// unless configured otherwise).
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    status: u16,
    content_type: String,
    headers: Vec<(String, String)>,
}

impl ResponseBuilder {
    pub(crate) fn new(default_content_type: &str) -> Self {
        Self {
            status: 200,
            content_type: default_content_type.to_string(),
            headers: Vec::new(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn set_status(&mut self, status: u16) -> &mut Self {
        self.status = status;
        self
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn set_content_type<S: Into<String>>(&mut self, content_type: S) -> &mut Self {
        self.content_type = content_type.into();
        self
    }

    /// Adds a response header. Use [`set_content_type`](Self::set_content_type) for the
    /// `Content-Type` header; a value set here is overwritten by it.
    pub fn header<K, V>(&mut self, name: K, value: V) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub(crate) fn build(
        self,
        body: Body,
        uri: &str,
        encoders: &Encoders,
    ) -> Result<FakeResponse, Error> {
        let status = StatusCode::from_u16(self.status)?;

        let body = match body {
            Body::Json(value) => encoders.encode(&self.content_type, &value)?,
            Body::Text(text) => text,
        };

        let mut headers = HeaderMap::with_capacity(self.headers.len() + 1);
        for (name, value) in &self.headers {
            headers.append(to_header_name(name)?, to_header_value(value)?);
        }
        headers.insert(CONTENT_TYPE, to_header_value(&self.content_type)?);

        Ok(FakeResponse {
            status,
            headers,
            body,
            uri: uri.to_string(),
        })
    }
}

impl Default for ResponseBuilder {
    fn default() -> Self {
        Self::new(JSON_CONTENT_TYPE)
    }
}

fn to_header_name(name: &str) -> Result<HeaderName, Error> {
    HeaderName::from_str(name).map_err(|err| Error::InvalidHeader(format!("{}: {}", name, err)))
}

fn to_header_value(value: &str) -> Result<HeaderValue, Error> {
    HeaderValue::from_str(value).map_err(|err| Error::InvalidHeader(format!("{}: {}", value, err)))
}

/// A response synthesized by a fake client.
#[derive(Debug, Clone)]
pub struct FakeResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: String,
    uri: String,
}

impl FakeResponse {
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Always `"1.1"`.
    pub fn version(&self) -> &'static str {
        HTTP_VERSION
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header(CONTENT_TYPE.as_str())
    }

    pub fn text(&self) -> &str {
        &self.body
    }

    /// Deserializes the response body from JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, Error> {
        Ok(serde_json::from_str(&self.body)?)
    }

    /// The request URI, exactly as passed to the client.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn into_http(self) -> http::Response<String> {
        let mut response = http::Response::new(self.body);
        *response.status_mut() = self.status;
        *response.version_mut() = http::Version::HTTP_11;
        *response.headers_mut() = self.headers;
        response
    }
}

impl From<FakeResponse> for http::Response<String> {
    fn from(value: FakeResponse) -> Self {
        value.into_http()
    }
}
