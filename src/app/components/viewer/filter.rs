/*
 * Copyright (c) 2026 Paul Sobolik
 * Created 2026-10-18
 */

//! JSONPath-style filtering of JSON response bodies.
//!
//! Supported selectors: `$`, `.name`, `['name']`, `["name"]`, `[n]` (negative counts from the
//! end), `[*]`, `.*` and recursive descent with `..name` or `..*`.

use std::iter::Peekable;
use std::str::CharIndices;

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("Filter must start with $")]
    MissingRoot,
    #[error("Unexpected '{0}' at position {1}")]
    Unexpected(char, usize),
    #[error("Invalid selector [{0}]")]
    InvalidSelector(String),
    #[error("Unterminated selector")]
    Unterminated,
    #[error("Body is not JSON: {0}")]
    NotJson(String),
}

#[derive(Debug, PartialEq, Eq)]
enum Segment {
    Child(String),
    Index(i64),
    Wildcard,
    Descendant(Option<String>),
}

/// Applies a filter to a JSON body, returning the matches as an array
pub fn apply(body: &str, filter: &str) -> Result<Value, FilterError> {
    let segments = parse(filter)?;
    let root: Value =
        serde_json::from_str(body).map_err(|error| FilterError::NotJson(error.to_string()))?;

    let mut current = vec![&root];
    for segment in &segments {
        let mut next = vec![];
        for value in current {
            match segment {
                Segment::Child(name) => next.extend(value.get(name.as_str())),
                Segment::Index(index) => next.extend(element(value, *index)),
                Segment::Wildcard => next.extend(children(value)),
                Segment::Descendant(name) => descend(value, name.as_deref(), &mut next),
            }
        }
        current = next;
    }
    Ok(Value::Array(current.into_iter().cloned().collect()))
}

fn element(value: &Value, index: i64) -> Option<&Value> {
    let items = value.as_array()?;
    let index = if index < 0 {
        items.len() as i64 + index
    } else {
        index
    };
    usize::try_from(index).ok().and_then(|index| items.get(index))
}

fn children(value: &Value) -> Box<dyn Iterator<Item = &Value> + '_> {
    match value {
        Value::Object(map) => Box::new(map.values()),
        Value::Array(items) => Box::new(items.iter()),
        _ => Box::new(std::iter::empty()),
    }
}

fn descend<'a>(value: &'a Value, name: Option<&str>, out: &mut Vec<&'a Value>) {
    match name {
        Some(name) => out.extend(value.as_object().and_then(|map| map.get(name))),
        None => out.extend(children(value)),
    }
    for child in children(value) {
        descend(child, name, out);
    }
}

fn parse(filter: &str) -> Result<Vec<Segment>, FilterError> {
    let mut chars = filter.trim().char_indices().peekable();
    if chars.next().map(|(_, ch)| ch) != Some('$') {
        return Err(FilterError::MissingRoot);
    }

    let mut segments = vec![];
    while let Some((position, ch)) = chars.next() {
        match ch {
            '.' if chars.next_if(|(_, ch)| *ch == '.').is_some() => {
                if chars.next_if(|(_, ch)| *ch == '*').is_some() {
                    segments.push(Segment::Descendant(None));
                } else {
                    let name = take_name(&mut chars);
                    if name.is_empty() {
                        return Err(FilterError::Unexpected('.', position + 1));
                    }
                    segments.push(Segment::Descendant(Some(name)));
                }
            }
            '.' => {
                if chars.next_if(|(_, ch)| *ch == '*').is_some() {
                    segments.push(Segment::Wildcard);
                } else {
                    let name = take_name(&mut chars);
                    if name.is_empty() {
                        return Err(FilterError::Unexpected('.', position));
                    }
                    segments.push(Segment::Child(name));
                }
            }
            '[' => segments.push(parse_bracket(&mut chars)?),
            other => return Err(FilterError::Unexpected(other, position)),
        }
    }
    Ok(segments)
}

fn take_name(chars: &mut Peekable<CharIndices>) -> String {
    let mut name = String::new();
    while let Some((_, ch)) =
        chars.next_if(|(_, ch)| ch.is_alphanumeric() || *ch == '_' || *ch == '-' || *ch == '$')
    {
        name.push(ch);
    }
    name
}

fn parse_bracket(chars: &mut Peekable<CharIndices>) -> Result<Segment, FilterError> {
    let mut inner = String::new();
    loop {
        match chars.next() {
            Some((_, ']')) if !is_open_quote(&inner) => break,
            Some((_, ch)) => inner.push(ch),
            None => return Err(FilterError::Unterminated),
        }
    }

    let selector = inner.trim();
    if selector == "*" {
        return Ok(Segment::Wildcard);
    }
    if let Some(name) = quoted(selector) {
        return Ok(Segment::Child(name.to_string()));
    }
    selector
        .parse::<i64>()
        .map(Segment::Index)
        .map_err(|_| FilterError::InvalidSelector(selector.to_string()))
}

// True while a quoted name inside brackets hasn't been closed yet
fn is_open_quote(inner: &str) -> bool {
    let inner = inner.trim_start();
    match inner.chars().next() {
        Some(quote @ ('\'' | '"')) => inner.len() == 1 || !inner[1..].contains(quote),
        _ => false,
    }
}

fn quoted(selector: &str) -> Option<&str> {
    ['\'', '"'].into_iter().find_map(|quote| {
        selector
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
    })
}
