//! Normalization of the backend's heterogeneous response envelopes.
//!
//! List endpoints answer with any of these shapes:
//!
//! - a bare array: `[...]`
//! - `{"data": {"data": [...], ...}}`
//! - `{"data": [...]}` or `{"success": true, "data": [...], "total": 42, "page": 1, "limit": 10, "totalPages": 5}`
//! - `{"Data": [...]}`
//! - `{"items": [...]}` / `{"results": [...]}`
//!
//! [`normalize`] tries one matcher per shape in that order and always yields
//! the items in their original order plus a non-negative total.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Pagination metadata the backend reported alongside a list, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageMeta {
    pub total: Option<u64>,
    pub total_pages: Option<u64>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl PageMeta {
    /// Whether the backend reported either a total count or a total page count.
    pub fn is_authoritative(&self) -> bool {
        self.total.is_some() || self.total_pages.is_some()
    }

    fn is_empty(&self) -> bool {
        *self == PageMeta::default()
    }

    fn or(self, other: PageMeta) -> PageMeta {
        PageMeta {
            total: self.total.or(other.total),
            total_pages: self.total_pages.or(other.total_pages),
            page: self.page.or(other.page),
            limit: self.limit.or(other.limit),
        }
    }
}

/// Items of one list response with the resolved total.
#[derive(Clone, Debug, PartialEq)]
pub struct Listing {
    pub items: Vec<Value>,
    /// Backend-reported total, or the number of items when none was reported.
    pub total: u64,
    pub meta: PageMeta,
}

impl Listing {
    fn new(items: Vec<Value>, meta: PageMeta) -> Self {
        let total = meta.total.unwrap_or(items.len() as u64);
        Self { items, total, meta }
    }

    /// Decodes every item into `T`, keeping order.
    pub fn decode<T: DeserializeOwned>(self) -> Result<Vec<T>, serde_json::Error> {
        self.items.into_iter().map(serde_json::from_value).collect()
    }
}

/// Result of normalizing a list response.
#[derive(Clone, Debug, PartialEq)]
pub enum Envelope {
    Items(Listing),
    /// No list could be found in the response.
    Empty,
}

impl Envelope {
    /// Collapses `Empty` into a listing with no items and a zero total.
    pub fn into_listing(self) -> Listing {
        match self {
            Envelope::Items(listing) => listing,
            Envelope::Empty => Listing::new(Vec::new(), PageMeta::default()),
        }
    }
}

type Matcher = fn(&Value) -> Option<Listing>;

const MATCHERS: &[Matcher] = &[
    bare_array,
    nested_data,
    data_array,
    capital_data,
    named_collection,
];

/// Normalizes a decoded list response.
pub fn normalize(value: Value) -> Envelope {
    MATCHERS
        .iter()
        .find_map(|matcher| matcher(&value))
        .map(Envelope::Items)
        .unwrap_or(Envelope::Empty)
}

/// Unwraps a single-record response: `{"data": {...}}` yields the inner object,
/// anything else is returned as is.
pub fn unwrap_record(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.get("data").is_some_and(Value::is_object) => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

fn bare_array(value: &Value) -> Option<Listing> {
    let items = value.as_array()?;
    Some(Listing::new(items.clone(), PageMeta::default()))
}

fn nested_data(value: &Value) -> Option<Listing> {
    let outer = value.as_object()?;
    let inner = outer.get("data")?.as_object()?;
    let items = inner.get("data")?.as_array()?;
    Some(Listing::new(
        items.clone(),
        read_meta(inner).or(read_meta(outer)),
    ))
}

fn data_array(value: &Value) -> Option<Listing> {
    let outer = value.as_object()?;
    let items = outer.get("data")?.as_array()?;
    Some(Listing::new(items.clone(), read_meta(outer)))
}

fn capital_data(value: &Value) -> Option<Listing> {
    let outer = value.as_object()?;
    let items = outer.get("Data")?.as_array()?;
    Some(Listing::new(items.clone(), read_meta(outer)))
}

fn named_collection(value: &Value) -> Option<Listing> {
    let outer = value.as_object()?;
    let items = ["items", "results", "rows"]
        .iter()
        .find_map(|key| outer.get(*key).and_then(Value::as_array))?;
    Some(Listing::new(items.clone(), read_meta(outer)))
}

/// Reads pagination keys from an object, then from a nested `pagination` or `meta` object.
fn read_meta(map: &Map<String, Value>) -> PageMeta {
    let direct = PageMeta {
        total: first_count(map, &["total", "count", "totalCount", "totalItems"]),
        total_pages: first_count(map, &["totalPages", "pages"]),
        page: first_count(map, &["page", "currentPage"]),
        limit: first_count(map, &["limit", "pageSize", "perPage"]),
    };
    if !direct.is_empty() {
        return direct;
    }
    ["pagination", "meta"]
        .iter()
        .filter_map(|key| map.get(*key).and_then(Value::as_object))
        .map(read_meta)
        .find(|meta| !meta.is_empty())
        .unwrap_or_default()
}

fn first_count(map: &Map<String, Value>, keys: &[&str]) -> Option<u64> {
    keys.iter().find_map(|key| map.get(*key).and_then(as_count))
}

/// Non-negative integer from a JSON number or numeric string.
fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0 && f.is_finite()).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}
