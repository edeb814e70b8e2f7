//! Response Normalizer
//!
//! Detail endpoints of the board API do not agree on an envelope. Depending on
//! the route, the same post arrives as the bare object, wrapped under a key
//! together with comment/file metadata, or nested once more under `data`.
//!
//! Payloads are first classified into [`RawResponse`] by an explicit matcher,
//! then resolved into a [`NormalizedDetail`]. Classification order matters:
//!
//! 1. a known wrapper key (`post`, `posts`, `notice`) holding a value
//! 2. a non-null `id` on the payload itself
//! 3. an object under `data`, classified again with rules 1 and 2 only
//!
//! Anything else is [`ClientError::UnknownResponseShape`]. The resolved entity
//! must carry an integer id, otherwise [`ClientError::InvalidEntity`].

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::entities::{Comment, FileMeta};
use crate::domain::value_objects::NormalizedDetail;
use crate::shared::error::ClientError;

/// Keys under which an entity may be wrapped, in lookup order.
pub const WRAPPER_KEYS: [&str; 3] = ["post", "posts", "notice"];

/// Largest integer a JSON float carries exactly.
const MAX_EXACT_FLOAT_ID: f64 = 9_007_199_254_740_991.0;

/// Auxiliary fields sent next to a wrapped entity.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailMeta {
    pub comment_count: u32,
    pub file_count: u32,
    pub comments: Vec<Value>,
    pub files: Vec<Value>,
}

impl DetailMeta {
    fn from_envelope(envelope: &Map<String, Value>) -> Self {
        let count = |key: &str| {
            envelope
                .get(key)
                .and_then(Value::as_u64)
                .map(|n| n.min(u32::MAX as u64) as u32)
                .unwrap_or(0)
        };
        let list = |key: &str| {
            envelope
                .get(key)
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default()
        };

        Self {
            comment_count: count("commentCount"),
            file_count: count("fileCount"),
            comments: list("comments"),
            files: list("files"),
        }
    }
}

/// The envelope shapes a detail response can take.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResponse {
    /// The payload is the entity.
    Direct(Map<String, Value>),

    /// The entity sits under `key`, metadata beside it.
    Wrapped {
        key: &'static str,
        entity: Value,
        meta: DetailMeta,
    },

    /// One of the above, nested under `data`.
    DataWrapped(Box<RawResponse>),
}

impl RawResponse {
    /// Classify a raw payload.
    pub fn classify(raw: Value) -> Result<Self, ClientError> {
        match raw {
            Value::Object(map) => Self::classify_object(map, true),
            _ => Err(ClientError::UnknownResponseShape),
        }
    }

    fn classify_object(mut map: Map<String, Value>, allow_data: bool) -> Result<Self, ClientError> {
        let wrapper = WRAPPER_KEYS
            .iter()
            .copied()
            .find(|key| map.get(*key).is_some_and(|v| !v.is_null()));

        if let Some(key) = wrapper {
            let entity = map.remove(key).unwrap_or(Value::Null);
            let meta = DetailMeta::from_envelope(&map);
            return Ok(RawResponse::Wrapped { key, entity, meta });
        }

        if map.get("id").is_some_and(|v| !v.is_null()) {
            return Ok(RawResponse::Direct(map));
        }

        if allow_data {
            if let Some(Value::Object(inner)) = map.remove("data") {
                let inner = Self::classify_object(inner, false)?;
                return Ok(RawResponse::DataWrapped(Box::new(inner)));
            }
        }

        Err(ClientError::UnknownResponseShape)
    }

    /// Short name of the shape, for logging.
    pub fn shape(&self) -> &'static str {
        match self {
            RawResponse::Direct(_) => "direct",
            RawResponse::Wrapped { .. } => "wrapped",
            RawResponse::DataWrapped(_) => "data",
        }
    }

    /// Split into the entity payload and its metadata.
    fn into_parts(self) -> (Value, DetailMeta) {
        match self {
            RawResponse::Direct(map) => (Value::Object(map), DetailMeta::default()),
            RawResponse::Wrapped { entity, meta, .. } => (entity, meta),
            RawResponse::DataWrapped(inner) => inner.into_parts(),
        }
    }

    /// Resolve into a typed detail, enforcing the id invariant.
    pub fn into_detail<T: DeserializeOwned>(self) -> Result<NormalizedDetail<T>, ClientError> {
        let (mut entity, meta) = self.into_parts();
        coerce_id(&mut entity)?;

        let entity: T = serde_json::from_value(entity)
            .map_err(|e| ClientError::InvalidEntity(e.to_string()))?;

        Ok(NormalizedDetail {
            entity,
            comment_count: meta.comment_count,
            file_count: meta.file_count,
            comments: decode_lenient::<Comment>(meta.comments),
            files: decode_lenient::<FileMeta>(meta.files),
        })
    }
}

/// Normalize a detail payload.
pub fn normalize<T: DeserializeOwned>(raw: Value) -> Result<NormalizedDetail<T>, ClientError> {
    let response = RawResponse::classify(raw)?;
    debug!(shape = response.shape(), "Normalizing detail response");
    response.into_detail()
}

/// Extract only the entity from a create/update response.
pub fn unwrap_entity<T: DeserializeOwned>(raw: Value) -> Result<T, ClientError> {
    normalize(raw).map(|detail| detail.entity)
}

/// Ensure `entity.id` is an integer, converting numeric strings in place.
fn coerce_id(entity: &mut Value) -> Result<i64, ClientError> {
    let Value::Object(map) = entity else {
        return Err(ClientError::InvalidEntity("entity is not an object".into()));
    };

    let id = match map.get("id") {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT_ID)
                    .map(|f| f as i64)
            }),
        Some(Value::String(s)) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    let id = id.ok_or_else(|| ClientError::InvalidEntity("missing or invalid id".into()))?;
    map.insert("id".into(), Value::from(id));
    Ok(id)
}

/// Decode list items, skipping entries that do not fit.
fn decode_lenient<T: DeserializeOwned>(values: Vec<Value>) -> Vec<T> {
    values
        .into_iter()
        .filter_map(|v| serde_json::from_value(v).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Post;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    fn entity() -> Value {
        json!({ "id": 7, "title": "Welcome", "content": "Hi", "author": "admin" })
    }

    #[test_case(entity() ; "direct")]
    #[test_case(json!({ "post": entity() }) ; "post wrapper")]
    #[test_case(json!({ "posts": entity() }) ; "posts wrapper")]
    #[test_case(json!({ "notice": entity() }) ; "notice wrapper")]
    #[test_case(json!({ "data": entity() }) ; "data wrapper")]
    #[test_case(json!({ "data": { "post": entity() } }) ; "data then post wrapper")]
    fn test_every_shape_yields_same_detail(raw: Value) {
        let detail: NormalizedDetail<Post> = normalize(raw).unwrap();
        let expected: NormalizedDetail<Post> =
            NormalizedDetail::bare(serde_json::from_value(entity()).unwrap());
        assert_eq!(detail, expected);
    }

    #[test]
    fn test_wrapped_metadata_is_pulled_from_envelope() {
        let raw = json!({
            "post": entity(),
            "commentCount": 2,
            "fileCount": 1,
            "comments": [
                { "id": 1, "content": "first" },
                { "id": 2, "content": "second" }
            ],
            "files": [{ "id": 9, "originalName": "a.png", "storedName": "x.png", "fileSize": 10 }]
        });

        let detail: NormalizedDetail<Post> = normalize(raw).unwrap();
        assert_eq!(detail.comment_count, 2);
        assert_eq!(detail.file_count, 1);
        assert_eq!(detail.comments.len(), 2);
        assert_eq!(detail.files[0].stored_name, "x.png");
    }

    #[test]
    fn test_null_counts_default_to_zero() {
        let raw = json!({ "notice": entity(), "commentCount": null, "comments": null });
        let detail: NormalizedDetail<Post> = normalize(raw).unwrap();
        assert_eq!(detail.comment_count, 0);
        assert!(detail.comments.is_empty());
    }

    #[test]
    fn test_wrapper_key_wins_over_id() {
        let raw = json!({ "id": 99, "post": entity() });
        let detail: NormalizedDetail<Post> = normalize(raw).unwrap();
        assert_eq!(detail.entity.id, 7);
    }

    #[test]
    fn test_string_id_is_coerced() {
        let raw = json!({ "post": { "id": "12", "title": "t" } });
        let post: Post = unwrap_entity(raw).unwrap();
        assert_eq!(post.id, 12);
    }

    #[test]
    fn test_whole_float_id_is_accepted() {
        let post: Post = unwrap_entity(json!({ "id": 3.0, "title": "t" })).unwrap();
        assert_eq!(post.id, 3);
    }

    #[test]
    fn test_null_fields_read_as_defaults() {
        let raw = json!({
            "post": {
                "id": 7,
                "title": "t",
                "content": "c",
                "author": null,
                "isPinned": null,
                "viewCount": null,
                "expiryDate": null
            },
            "comments": [{ "id": 1, "content": null, "author": null }],
            "files": [{ "id": 2, "originalName": null, "fileSize": null }]
        });

        let detail: NormalizedDetail<Post> = normalize(raw).unwrap();

        assert_eq!(detail.entity.id, 7);
        assert_eq!(detail.entity.author, "");
        assert!(!detail.entity.is_pinned);
        assert_eq!(detail.entity.view_count, 0);
        assert_eq!(detail.comments.len(), 1);
        assert_eq!(detail.files[0].file_size, 0);
    }

    #[test_case(json!({ "post": { "title": "no id" } }) ; "missing id")]
    #[test_case(json!({ "post": { "id": "abc" } }) ; "non numeric id")]
    #[test_case(json!({ "post": "just a string" }) ; "entity not an object")]
    #[test_case(json!({ "id": 1.5 }) ; "fractional id")]
    #[test_case(json!({ "id": 1e30 }) ; "float id out of range")]
    #[test_case(json!({ "id": 18446744073709551615u64 }) ; "id above i64")]
    fn test_invalid_entity(raw: Value) {
        let result: Result<NormalizedDetail<Post>, _> = normalize(raw);
        assert!(matches!(result, Err(ClientError::InvalidEntity(_))));
    }

    #[test_case(json!({ "title": "orphan" }) ; "no id no wrapper")]
    #[test_case(json!({ "data": { "data": entity() } }) ; "double data")]
    #[test_case(json!({ "data": [entity()] }) ; "data array")]
    #[test_case(json!([entity()]) ; "top level array")]
    #[test_case(Value::Null ; "null")]
    fn test_unknown_shape(raw: Value) {
        assert_eq!(RawResponse::classify(raw), Err(ClientError::UnknownResponseShape));
    }

    #[test]
    fn test_classify_reports_shape() {
        let raw = RawResponse::classify(json!({ "data": { "notice": entity() } })).unwrap();
        assert_eq!(raw.shape(), "data");
        match raw {
            RawResponse::DataWrapped(inner) => {
                assert!(matches!(*inner, RawResponse::Wrapped { key: "notice", .. }))
            }
            other => panic!("unexpected shape: {:?}", other),
        }
    }
}
