pub use builder::{FakeClientBuilder, DEFAULT_CONTENT_TYPE_ENV};
pub use client::HttpClient;
pub use fake::FakeClient;
pub use response::{Body, FakeResponse, ResponseBuilder, HTTP_VERSION};

pub(crate) mod builder;
pub(crate) mod client;
pub(crate) mod fake;
pub(crate) mod response;
