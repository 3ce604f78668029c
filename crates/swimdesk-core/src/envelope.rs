//! Response envelope unwrapping.
//!
//! The backend wraps payloads in a fixed but endpoint-dependent nesting:
//!
//! ```text
//! lists    { "data": [[ { "data": [T, ...], "meta_data": {...} } ]], "message": ..., "statusCode": ... }
//! details  { "data": [[ T ]] }
//! users    { "data": [[[ T ]]] }
//! login    { "data": { "user": ..., "accessToken": ... } }
//! ```
//!
//! Each API function picks its [`Shape`] explicitly. The nesting differs
//! between `data[0][0]` and `data[0][0][0]` for detail endpoints with no
//! documented rule, so the two are kept as separate strategies rather than
//! guessed at runtime.
//!
//! None of the functions here fail: a missing or mistyped level yields an
//! empty list or `None`.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::pagination::{Page, PageMeta};

/// Named unwrap strategies for the backend envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// `data[0][0].data`, with page metadata at `data[0][0].meta_data`.
    PagedList,
    /// `data[0][0]`
    Detail,
    /// `data[0][0][0]`
    NestedDetail,
    /// `data`
    Flat,
}

impl Shape {
    /// JSON pointer to the payload for this shape.
    pub const fn pointer(self) -> &'static str {
        match self {
            Shape::PagedList => "/data/0/0/data",
            Shape::Detail => "/data/0/0",
            Shape::NestedDetail => "/data/0/0/0",
            Shape::Flat => "/data",
        }
    }
}

const META_POINTER: &str = "/data/0/0/meta_data";

/// Returns the payload node for `shape`, treating `null` as absent.
pub fn locate(body: &Value, shape: Shape) -> Option<&Value> {
    body.pointer(shape.pointer()).filter(|value| !value.is_null())
}

/// Extracts a list of `T`.
///
/// Items that fail to deserialize are skipped; the rest are kept.
pub fn unwrap_list<T>(body: &Value, shape: Shape) -> Vec<T>
where
    T: DeserializeOwned,
{
    let Some(Value::Array(items)) = locate(body, shape) else {
        debug!(pointer = shape.pointer(), "Envelope has no list at expected path");
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| match T::deserialize(item) {
            Ok(value) => Some(value),
            Err(e) => {
                debug!(pointer = shape.pointer(), index, error = %e, "Skipping malformed list item");
                None
            }
        })
        .collect()
}

/// Extracts a single `T`.
pub fn unwrap_one<T>(body: &Value, shape: Shape) -> Option<T>
where
    T: DeserializeOwned,
{
    let node = locate(body, shape)?;
    match T::deserialize(node) {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(pointer = shape.pointer(), error = %e, "Envelope payload did not match expected type");
            None
        }
    }
}

/// Extracts a paged list together with its `meta_data`.
pub fn unwrap_page<T>(body: &Value) -> Page<T>
where
    T: DeserializeOwned,
{
    let items = unwrap_list(body, Shape::PagedList);
    let meta = body
        .pointer(META_POINTER)
        .and_then(|node| PageMeta::deserialize(node).ok())
        .unwrap_or_default();
    Page { items, meta }
}

/// Best-effort human-readable message from an error body.
///
/// Looks at `message` (string or array of strings), then `error`.
pub fn error_message(body: &Value) -> Option<String> {
    ["message", "error"].iter().find_map(|field| match body.get(field)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Array(items) => {
            let parts: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
            (!parts.is_empty()).then(|| parts.join(", "))
        }
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        #[serde(rename = "_id")]
        id: String,
    }

    fn paged(items: Value) -> Value {
        json!({
            "data": [[{ "data": items, "meta_data": { "total": 2, "page": 1, "limit": 10, "total_pages": 1 } }]],
            "message": "success",
            "statusCode": 200
        })
    }

    #[test]
    fn test_paged_list() {
        let body = paged(json!([{ "_id": "a" }, { "_id": "b" }]));
        let items: Vec<Item> = unwrap_list(&body, Shape::PagedList);
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].id, "b");

        let page: Page<Item> = unwrap_page(&body);
        assert_eq!(page.meta.total, 2);
        assert_eq!(page.items.len(), 2);
    }

    #[test]
    fn test_missing_levels_degrade_to_empty() {
        let bodies = [
            json!(null),
            json!({}),
            json!({ "data": null }),
            json!({ "data": [] }),
            json!({ "data": [[]] }),
            json!({ "data": [[{}]] }),
            json!({ "data": [[{ "data": null }]] }),
            json!({ "data": [[{ "data": "oops" }]] }),
            json!({ "data": "oops" }),
            json!("not even an object"),
        ];

        for body in bodies {
            let items: Vec<Item> = unwrap_list(&body, Shape::PagedList);
            assert!(items.is_empty(), "expected empty list for {body}");
            let one: Option<Item> = unwrap_one(&body, Shape::Detail);
            assert!(one.is_none(), "expected None for {body}");
            let nested: Option<Item> = unwrap_one(&body, Shape::NestedDetail);
            assert!(nested.is_none(), "expected None for {body}");
            let page: Page<Item> = unwrap_page(&body);
            assert!(page.is_empty());
        }
    }

    #[test]
    fn test_malformed_items_are_skipped() {
        let body = paged(json!([{ "_id": "a" }, { "name": "no id" }, 42, { "_id": "c" }]));
        let items: Vec<Item> = unwrap_list(&body, Shape::PagedList);
        assert_eq!(
            items,
            vec![Item { id: "a".into() }, Item { id: "c".into() }]
        );
    }

    #[test]
    fn test_detail_shapes_are_not_interchangeable() {
        // The backend answers some detail endpoints one level deeper than
        // others. Each shape only matches its own nesting.
        let detail = json!({ "data": [[{ "_id": "x" }]] });
        let nested = json!({ "data": [[[{ "_id": "x" }]]] });

        assert_eq!(
            unwrap_one::<Item>(&detail, Shape::Detail),
            Some(Item { id: "x".into() })
        );
        assert_eq!(unwrap_one::<Item>(&detail, Shape::NestedDetail), None);

        assert_eq!(
            unwrap_one::<Item>(&nested, Shape::NestedDetail),
            Some(Item { id: "x".into() })
        );
        assert_eq!(unwrap_one::<Item>(&nested, Shape::Detail), None);
    }

    #[test]
    fn test_flat() {
        let body = json!({ "data": { "_id": "flat" } });
        assert_eq!(
            unwrap_one::<Item>(&body, Shape::Flat),
            Some(Item { id: "flat".into() })
        );
    }

    #[test]
    fn test_error_message() {
        assert_eq!(
            error_message(&json!({ "message": "Email already exists" })),
            Some("Email already exists".to_string())
        );
        assert_eq!(
            error_message(&json!({ "message": ["name is required", "email is invalid"] })),
            Some("name is required, email is invalid".to_string())
        );
        assert_eq!(
            error_message(&json!({ "message": "", "error": "Bad Request" })),
            Some("Bad Request".to_string())
        );
        assert_eq!(error_message(&json!({ "statusCode": 500 })), None);
    }
}
