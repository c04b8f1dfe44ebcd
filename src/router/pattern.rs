use crate::common::{
    data::Params,
    error::Error,
    util::{decode_segment, path_segments},
};
use regex::Regex;
use std::fmt;

const DEFAULT_SPLAT_NAME: &str = "splat";

#[derive(Debug, Clone)]
enum Segment {
    Literal(String),
    Param {
        name: String,
        constraint: Option<Regex>,
    },
    Splat {
        name: String,
    },
}

impl Segment {
    fn name(&self) -> Option<&str> {
        match self {
            Segment::Literal(_) => None,
            Segment::Param { name, .. } | Segment::Splat { name } => Some(name),
        }
    }
}

/// A parsed path template used to match request paths.
///
/// Templates are split at `/`. Each segment is one of:
///
/// * a literal, matched exactly (`users`),
/// * a named parameter matching one non-empty segment (`:id` or `{id}`),
/// * a typed parameter whose value must fully match a regex (`{id:\d+}`),
/// * a trailing splat matching all remaining segments (`*path`, or `*` bound as `splat`).
///
/// # Example
/// ```
/// use httpfake::Pattern;
///
/// let pattern = Pattern::parse("/users/{id:\\d+}/files/*path").unwrap();
///
/// let params = pattern.matches("/users/7/files/a/b.txt").unwrap();
/// assert_eq!(params.get("id"), Some("7"));
/// assert_eq!(params.get("path"), Some("a/b.txt"));
///
/// assert!(pattern.matches("/users/me/files/a.txt").is_none());
/// ```
#[derive(Debug, Clone)]
pub struct Pattern {
    template: String,
    segments: Vec<Segment>,
}

impl Pattern {
    pub fn parse(template: &str) -> Result<Self, Error> {
        let raw_segments = path_segments(template);
        let last_idx = raw_segments.len() - 1;
        let mut segments: Vec<Segment> = Vec::with_capacity(raw_segments.len());

        for (idx, raw) in raw_segments.into_iter().enumerate() {
            let segment = parse_segment(template, raw)?;

            if matches!(segment, Segment::Splat { .. }) && idx != last_idx {
                return Err(invalid(template, "a splat is only allowed as the last segment"));
            }

            if let Some(name) = segment.name() {
                if segments.iter().any(|s| s.name() == Some(name)) {
                    return Err(invalid(
                        template,
                        &format!("parameter '{}' is declared more than once", name),
                    ));
                }
            }

            segments.push(segment);
        }

        Ok(Self {
            template: template.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Number of named segments (parameters and splats) in the template.
    pub fn placeholder_count(&self) -> usize {
        self.segments.iter().filter(|s| s.name().is_some()).count()
    }

    /// Matches `path` against this template and returns the bound parameters.
    pub fn matches(&self, path: &str) -> Option<Params> {
        let parts = path_segments(path);
        let mut params = Params::default();

        for (idx, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Literal(literal) => {
                    if decode_segment(parts.get(idx)?) != *literal {
                        return None;
                    }
                }
                Segment::Param { name, constraint } => {
                    let part = parts.get(idx)?;
                    if part.is_empty() {
                        return None;
                    }

                    let value = decode_segment(part);
                    if let Some(re) = constraint {
                        if !re.is_match(&value) {
                            return None;
                        }
                    }

                    params.insert(name, value);
                }
                Segment::Splat { name } => {
                    let rest = parts.get(idx..)?;
                    if rest.iter().all(|part| part.is_empty()) {
                        return None;
                    }

                    let value = rest
                        .iter()
                        .map(|part| decode_segment(part))
                        .collect::<Vec<_>>()
                        .join("/");
                    params.insert(name, value);
                    return Some(params);
                }
            }
        }

        if parts.len() != self.segments.len() {
            return None;
        }

        Some(params)
    }

    /// Returns the specificity score of this pattern for `path`, or `None` if it does not
    /// match. The score is the number of parameters bound; lower is more specific.
    pub fn score(&self, path: &str) -> Option<usize> {
        self.matches(path).map(|params| params.len())
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.template)
    }
}

fn parse_segment(template: &str, raw: &str) -> Result<Segment, Error> {
    if let Some(name) = raw.strip_prefix(':') {
        validate_name(template, name)?;
        return Ok(Segment::Param {
            name: name.to_string(),
            constraint: None,
        });
    }

    if let Some(inner) = raw.strip_prefix('{') {
        let inner = inner
            .strip_suffix('}')
            .ok_or_else(|| invalid(template, &format!("unterminated '{{' in segment '{}'", raw)))?;

        let (name, constraint) = match inner.split_once(':') {
            Some((name, expr)) => {
                let re = Regex::new(&format!("^(?:{})$", expr)).map_err(|err| {
                    invalid(template, &format!("invalid constraint for '{}': {}", name, err))
                })?;
                (name, Some(re))
            }
            None => (inner, None),
        };

        validate_name(template, name)?;
        return Ok(Segment::Param {
            name: name.to_string(),
            constraint,
        });
    }

    if let Some(name) = raw.strip_prefix('*') {
        let name = if name.is_empty() {
            DEFAULT_SPLAT_NAME
        } else {
            validate_name(template, name)?;
            name
        };
        return Ok(Segment::Splat {
            name: name.to_string(),
        });
    }

    Ok(Segment::Literal(raw.to_string()))
}

fn validate_name(template: &str, name: &str) -> Result<(), Error> {
    if name.is_empty() {
        return Err(invalid(template, "parameter name must not be empty"));
    }

    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid(
            template,
            &format!("parameter name '{}' may only contain [A-Za-z0-9_]", name),
        ));
    }

    Ok(())
}

fn invalid(template: &str, reason: &str) -> Error {
    Error::InvalidPattern {
        pattern: template.to_string(),
        reason: reason.to_string(),
    }
}
