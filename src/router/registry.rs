use crate::{
    api::response::ResponseBuilder,
    common::{
        data::{Method, Params, RequestOptions},
        error::Error,
    },
    router::{
        pattern::Pattern,
        responder::{HandlerResult, Responder},
    },
};
use std::{cmp::Reverse, collections::BTreeMap, rc::Rc};

/// The route table of a fake client.
///
/// Registration methods are chainable. An invalid pattern does not abort the chain; the
/// first such error is kept and reported when the owning
/// [`FakeClient`](crate::FakeClient) is built or extended.
///
/// # Resolution
/// Among all responders for a method whose pattern matches the path, the one binding the
/// fewest parameters wins. On a tie, the most recently added responder wins, whether it
/// was registered directly or merged in.
#[derive(Debug, Default)]
pub struct Registry {
    responders: BTreeMap<Method, Vec<Responder>>,
    next_seq: usize,
    deferred_error: Option<Error>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `method` requests whose path matches `pattern`.
    pub fn register<F>(&mut self, method: Method, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&Params, &RequestOptions, &mut ResponseBuilder) -> HandlerResult + 'static,
    {
        if let Err(err) = self.try_register(method, pattern, handler) {
            tracing::debug!("Rejected route {} {}: {}", method, pattern, err);
            if self.deferred_error.is_none() {
                self.deferred_error = Some(err);
            }
        }
        self
    }

    /// Like [`register`](Self::register), but reports an invalid pattern immediately.
    pub fn try_register<F>(
        &mut self,
        method: Method,
        pattern: &str,
        handler: F,
    ) -> Result<&mut Self, Error>
    where
        F: Fn(&Params, &RequestOptions, &mut ResponseBuilder) -> HandlerResult + 'static,
    {
        let pattern = Pattern::parse(pattern)?;
        self.push(Responder::new(method, pattern, Rc::new(handler)));
        Ok(self)
    }

    pub fn get<F>(&mut self, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&Params, &RequestOptions, &mut ResponseBuilder) -> HandlerResult + 'static,
    {
        self.register(Method::GET, pattern, handler)
    }

    pub fn post<F>(&mut self, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&Params, &RequestOptions, &mut ResponseBuilder) -> HandlerResult + 'static,
    {
        self.register(Method::POST, pattern, handler)
    }

    pub fn put<F>(&mut self, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&Params, &RequestOptions, &mut ResponseBuilder) -> HandlerResult + 'static,
    {
        self.register(Method::PUT, pattern, handler)
    }

    pub fn patch<F>(&mut self, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&Params, &RequestOptions, &mut ResponseBuilder) -> HandlerResult + 'static,
    {
        self.register(Method::PATCH, pattern, handler)
    }

    pub fn delete<F>(&mut self, pattern: &str, handler: F) -> &mut Self
    where
        F: Fn(&Params, &RequestOptions, &mut ResponseBuilder) -> HandlerResult + 'static,
    {
        self.register(Method::DELETE, pattern, handler)
    }

    /// Adds every responder of `other` after the ones already present, keeping their
    /// relative order. Merged responders therefore win score ties against existing ones.
    pub fn merge(&mut self, other: &Registry) -> &mut Self {
        for responder in other.by_seq() {
            self.push(responder);
        }
        self
    }

    /// Finds the best responder for `method` and `path`.
    pub fn find(&self, method: Method, path: &str) -> Option<&Responder> {
        let best = self
            .responders
            .get(&method)?
            .iter()
            .filter_map(|responder| {
                responder
                    .pattern()
                    .score(path)
                    .map(|score| (score, responder))
            })
            .min_by_key(|(score, responder)| (*score, Reverse(responder.seq())))
            .map(|(_, responder)| responder);

        if let Some(responder) = best {
            tracing::trace!("Resolved {} {} to route {}", method, path, responder);
        }

        best
    }

    /// Like [`find`](Self::find), but fails with [`Error::UnmatchedRoute`] on a miss.
    pub fn resolve(&self, method: Method, path: &str) -> Result<&Responder, Error> {
        self.find(method, path)
            .ok_or_else(|| self.unmatched(method, path))
    }

    pub(crate) fn unmatched(&self, method: Method, uri: &str) -> Error {
        Error::UnmatchedRoute {
            method,
            uri: uri.to_string(),
            routes: self.describe(),
        }
    }

    /// Registered routes as `(method, template)`, each method's routes listed from
    /// highest to lowest tie-break priority.
    pub fn routes(&self) -> Vec<(Method, String)> {
        self.responders
            .iter()
            .flat_map(|(method, responders)| {
                responders
                    .iter()
                    .rev()
                    .map(move |r| (*method, r.pattern().to_string()))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.responders.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns and clears the first error recorded by [`register`](Self::register).
    pub(crate) fn take_deferred_error(&mut self) -> Result<(), Error> {
        match self.deferred_error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn push(&mut self, responder: Responder) {
        let seq = self.next_seq;
        self.next_seq += 1;

        tracing::debug!("Registering route {} (seq={})", responder, seq);

        self.responders
            .entry(responder.method())
            .or_default()
            .push(responder.with_seq(seq));
    }

    fn by_seq(&self) -> Vec<Responder> {
        let mut all: Vec<Responder> = self.responders.values().flatten().cloned().collect();
        all.sort_by_key(Responder::seq);
        all
    }

    fn describe(&self) -> String {
        let routes = self.routes();
        if routes.is_empty() {
            return "  (none)".to_string();
        }

        routes
            .iter()
            .map(|(method, pattern)| format!("  {} {}", method, pattern))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
