use crate::{
    api::response::{Body, FakeResponse, ResponseBuilder},
    common::{
        data::{Method, Params, RequestOptions},
        error::{BoxError, Error},
    },
    router::{encoding::Encoders, pattern::Pattern},
};
use std::{fmt, rc::Rc};

/// The result a route handler produces.
pub type HandlerResult = Result<Body, BoxError>;

pub(crate) type HandlerFn =
    Rc<dyn Fn(&Params, &RequestOptions, &mut ResponseBuilder) -> HandlerResult>;

/// One registered route: a method, a path pattern and the handler answering it.
///
/// `seq` is the registration order within the owning registry; on a score tie the
/// responder with the highest `seq` wins.
#[derive(Clone)]
pub struct Responder {
    method: Method,
    pattern: Pattern,
    handler: HandlerFn,
    seq: usize,
}

impl Responder {
    pub(crate) fn new(method: Method, pattern: Pattern, handler: HandlerFn) -> Self {
        Self {
            method,
            pattern,
            handler,
            seq: 0,
        }
    }

    pub(crate) fn with_seq(mut self, seq: usize) -> Self {
        self.seq = seq;
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn seq(&self) -> usize {
        self.seq
    }

    /// Runs the handler for a request to `path` and synthesizes the response.
    ///
    /// Handler errors are returned as [`Error::Handler`] without modification.
    pub(crate) fn call(
        &self,
        uri: &str,
        path: &str,
        options: &RequestOptions,
        default_content_type: &str,
        encoders: &Encoders,
    ) -> Result<FakeResponse, Error> {
        let params = self
            .pattern
            .matches(path)
            .ok_or_else(|| Error::UnmatchedRoute {
                method: self.method,
                uri: uri.to_string(),
                routes: format!("  {}", self),
            })?;

        tracing::trace!(
            "Invoking handler for {} {} with parameters {:?}",
            self.method,
            self.pattern,
            params
        );

        let mut builder = ResponseBuilder::new(default_content_type);
        let body = (self.handler)(&params, options, &mut builder).map_err(Error::Handler)?;

        builder.build(body, uri, encoders)
    }
}

impl fmt::Display for Responder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.pattern)
    }
}

impl fmt::Debug for Responder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Responder")
            .field("method", &self.method)
            .field("pattern", &self.pattern.as_str())
            .field("seq", &self.seq)
            .finish()
    }
}
