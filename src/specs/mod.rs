//! # Payload “specs” module
//!
//! Each submodule knows the shape of one registry response and turns it into
//! typed data the rest of the pipeline can trust.
//!
//! ## What lives here
//! - **Serde models** of the search envelope and the detail payload, with every
//!   field optional: absent and `null` both decode to `None`.
//! - **Conversion** into domain types (`data::ProjectRecord`, `detail::ProjectDetail`),
//!   including the search-time filter.
//!
//! ## What does **not** live here
//! - **Requests, paging, retries**: `scrape` decides what to fetch.
//! - **Export formatting**: `file`/`csv`.
//!
//! No untyped JSON tree leaves this module.
pub mod detail;
pub mod search;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `[...]`, `null` or absent → Vec.
pub(crate) fn nullable_vec<'de, D, T>(d: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(d)?.unwrap_or_default())
}

/// String or number → trimmed text; `null`, blanks and anything else → None.
pub(crate) fn scalar_text<'de, D>(d: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Value>::deserialize(d)?.as_ref().and_then(value_text))
}

pub(crate) fn value_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => crate::core::sanitize::clean_text(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn value_text_variants() {
        assert_eq!(value_text(&json!(" Leeds ")).as_deref(), Some("Leeds"));
        assert_eq!(value_text(&json!(42)).as_deref(), Some("42"));
        assert_eq!(value_text(&json!("")), None);
        assert_eq!(value_text(&Value::Null), None);
        assert_eq!(value_text(&json!({"a": 1})), None);
    }
}
