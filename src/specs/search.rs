// src/specs/search.rs
//
// Search endpoint envelope (json-v7):
//   { totalPages, totalSize, page, size, project: [ { id, title, status,
//     grantCategory, identifiers: { identifier: [ { value, type } ] } } ] }

use serde::Deserialize;

use super::{nullable_vec, scalar_text};
use crate::config::consts::{CLOSED_STATUS, IDENTIFIER_TYPE};
use crate::config::options::Category;
use crate::data::ProjectRecord;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultPage {
    #[serde(default)]
    pub total_pages: Option<u32>,
    #[serde(default)]
    pub total_size: Option<u64>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub size: Option<u32>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub project: Vec<RawProject>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProject {
    #[serde(default, deserialize_with = "scalar_text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub grant_category: Option<String>,
    #[serde(default)]
    pub identifiers: Option<Identifiers>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Identifiers {
    #[serde(default, deserialize_with = "nullable_vec")]
    pub identifier: Vec<Identifier>,
}

#[derive(Debug, Default, Deserialize)]
pub struct Identifier {
    #[serde(default, deserialize_with = "scalar_text")]
    pub value: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "scalar_text")]
    pub kind: Option<String>,
}

/// Why a search hit was left out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    NoIdentifier,
    GrantCategory(Option<String>),
    Closed,
}

impl RawProject {
    /// Project reference: the identifier tagged `RCUK`.
    pub fn reference(&self) -> Option<&str> {
        self.identifiers
            .as_ref()?
            .identifier
            .iter()
            .find(|i| i.kind.as_deref() == Some(IDENTIFIER_TYPE))
            .and_then(|i| i.value.as_deref())
    }

    pub fn is_closed(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case(CLOSED_STATUS))
    }

    /// Apply the search-time filter and build the basic record.
    pub fn into_record(self, category: &Category) -> Result<ProjectRecord, Rejection> {
        let reference = s!(self.reference().ok_or(Rejection::NoIdentifier)?);
        if self.grant_category.as_deref() != Some(category.grant_category.as_str()) {
            return Err(Rejection::GrantCategory(self.grant_category));
        }
        if self.is_closed() {
            return Err(Rejection::Closed);
        }
        Ok(ProjectRecord {
            reference,
            title: self.title.unwrap_or_default(),
            registry_id: self.id.unwrap_or_default(),
            category: category.label.clone(),
            grant_category: self.grant_category.unwrap_or_default(),
            ..Default::default()
        })
    }
}

pub fn parse_page(body: &str) -> Result<SearchResultPage, serde_json::Error> {
    serde_json::from_str(body)
}
