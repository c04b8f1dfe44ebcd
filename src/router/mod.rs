pub(crate) mod encoding;
pub(crate) mod history;
pub(crate) mod pattern;
pub(crate) mod registry;
pub(crate) mod responder;

pub use encoding::{BodyEncoder, FormEncoder, JsonEncoder};
pub use history::RequestLog;
pub use pattern::Pattern;
pub use registry::Registry;
pub use responder::{HandlerResult, Responder};
