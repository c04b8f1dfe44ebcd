use crate::common::{error::Error, util::media_type};
use serde_json::Value;
use std::{collections::HashMap, fmt, rc::Rc};

pub(crate) const JSON_CONTENT_TYPE: &str = "application/json";
pub(crate) const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Turns a structured handler result into a response body for one content type.
pub trait BodyEncoder {
    fn encode(&self, value: &Value) -> Result<String, Error>;
}

impl<F> BodyEncoder for F
where
    F: Fn(&Value) -> Result<String, Error>,
{
    fn encode(&self, value: &Value) -> Result<String, Error> {
        (self)(value)
    }
}

/// Encodes bodies as compact JSON.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonEncoder;

impl BodyEncoder for JsonEncoder {
    fn encode(&self, value: &Value) -> Result<String, Error> {
        Ok(serde_json::to_string(value)?)
    }
}

/// Encodes a flat JSON object as `application/x-www-form-urlencoded`. Nested objects and
/// arrays are rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct FormEncoder;

impl BodyEncoder for FormEncoder {
    fn encode(&self, value: &Value) -> Result<String, Error> {
        let object = value.as_object().ok_or_else(|| {
            Error::BodyEncoding("form bodies must be JSON objects".to_string())
        })?;

        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in object {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Null => String::new(),
                Value::Bool(_) | Value::Number(_) => value.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(Error::BodyEncoding(format!(
                        "form field '{}' must be a scalar value",
                        key
                    )))
                }
            };
            serializer.append_pair(key, &value);
        }

        Ok(serializer.finish())
    }
}

/// Body encoders keyed by media type.
#[derive(Clone)]
pub(crate) struct Encoders {
    by_media_type: HashMap<String, Rc<dyn BodyEncoder>>,
}

impl Encoders {
    pub(crate) fn insert(&mut self, content_type: &str, encoder: Rc<dyn BodyEncoder>) {
        self.by_media_type.insert(media_type(content_type), encoder);
    }

    /// Encodes `value` for `content_type`. Media types with a `+json` suffix fall back to
    /// JSON when no dedicated encoder is registered.
    pub(crate) fn encode(&self, content_type: &str, value: &Value) -> Result<String, Error> {
        let media_type = media_type(content_type);

        if let Some(encoder) = self.by_media_type.get(&media_type) {
            return encoder.encode(value);
        }

        if media_type.ends_with("+json") {
            return JsonEncoder.encode(value);
        }

        Err(Error::UnsupportedContentType(content_type.to_string()))
    }
}

impl Default for Encoders {
    fn default() -> Self {
        let mut encoders = Self {
            by_media_type: HashMap::new(),
        };
        encoders.insert(JSON_CONTENT_TYPE, Rc::new(JsonEncoder));
        encoders.insert(FORM_CONTENT_TYPE, Rc::new(FormEncoder));
        encoders
    }
}

impl fmt::Debug for Encoders {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut media_types: Vec<&String> = self.by_media_type.keys().collect();
        media_types.sort();
        f.debug_struct("Encoders")
            .field("media_types", &media_types)
            .finish()
    }
}
