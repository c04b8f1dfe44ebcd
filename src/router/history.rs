use crate::common::{
    data::{Method, RequestOptions},
    util::decode_path,
};
use serde::Serialize;
use std::{collections::BTreeMap, ops::Index};

/// Every request a fake client resolved, grouped by path and method in call order.
///
/// Paths are stored percent-decoded. Lookups decode their argument the same way, so
/// `/search/rust lang` and `/search/rust%20lang` name the same entry.
///
/// Indexing by path panics if no request was made to it, like indexing a `BTreeMap`:
///
/// ```
/// use httpfake::prelude::*;
/// use serde_json::json;
///
/// let client = FakeClient::new(|routes| {
///     routes.post("/orders", |_, _, _| Ok(json!({ "ok": true }).into()));
/// })
/// .unwrap();
///
/// client.post("/orders", RequestOptions::new().json(json!({ "n": 1 }))).unwrap();
///
/// let requests = client.requests();
/// assert_eq!(requests["/orders"][&POST][0].json_body(), Some(&json!({ "n": 1 })));
/// ```
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct RequestLog {
    entries: BTreeMap<String, BTreeMap<Method, Vec<RequestOptions>>>,
}

impl RequestLog {
    pub(crate) fn record(&mut self, path: &str, method: Method, options: RequestOptions) {
        self.entries
            .entry(decode_path(path))
            .or_default()
            .entry(method)
            .or_default()
            .push(options);
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, path: &str) -> Option<&BTreeMap<Method, Vec<RequestOptions>>> {
        self.entries.get(decode_path(path).as_str())
    }

    /// The options of every request made with `method` to `path`, in call order.
    pub fn entries(&self, path: &str, method: Method) -> &[RequestOptions] {
        self.entries
            .get(decode_path(path).as_str())
            .and_then(|by_method| by_method.get(&method))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn count(&self, path: &str, method: Method) -> usize {
        self.entries(path, method).len()
    }

    /// Total number of recorded requests.
    pub fn total(&self) -> usize {
        self.entries
            .values()
            .flat_map(|by_method| by_method.values())
            .map(Vec::len)
            .sum()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_map(&self) -> BTreeMap<String, BTreeMap<Method, Vec<RequestOptions>>> {
        self.entries.clone()
    }
}

impl Index<&str> for RequestLog {
    type Output = BTreeMap<Method, Vec<RequestOptions>>;

    fn index(&self, path: &str) -> &Self::Output {
        &self.entries[decode_path(path).as_str()]
    }
}
