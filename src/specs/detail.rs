// src/specs/detail.rs
//
// Detail endpoint payload. Only these paths are read:
//   projectOverview.projectComposition
//     .leadResearchOrganisation.{name, department, address.*}
//     .project.fund.{funder.name, start, end, valuePounds}
//     .project.url
//     .personRole[].{firstName, otherNames, surname, role[].name}

use chrono::DateTime;
use serde::Deserialize;
use serde_json::{Map, Value};

use super::{nullable_vec, scalar_text, value_text};
use crate::config::consts::INVESTIGATOR_ROLES;
use crate::data::Investigator;

/// Typed view of one detail payload. Every path may be missing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectDetail {
    pub lead_org: Option<String>,
    pub department: Option<String>,
    pub address: Address,
    pub funder: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub award: Option<String>,
    pub url: Option<String>,
    pub investigator: Option<Investigator>,
}

/// Address sub-fields in the order the payload declares them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Address {
    fields: Vec<(String, String)>,
}

impl Address {
    pub fn from_pairs(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        let fields = map
            .iter()
            .filter_map(|(k, v)| value_text(v).map(|v| (k.clone(), v)))
            .collect();
        Self { fields }
    }

    pub fn is_empty(&self) -> bool { self.fields.is_empty() }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn postcode(&self) -> Option<&str> { self.get("postCode") }
    pub fn region(&self) -> Option<&str> { self.get("region") }

    /// All values, declared order, `", "` separated. Empty address → "".
    pub fn flatten(&self) -> String {
        self.fields
            .iter()
            .map(|(_, v)| v.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/* ---------- wire shape ---------- */

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Payload {
    #[serde(default)]
    project_overview: Option<Overview>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Overview {
    #[serde(default)]
    project_composition: Option<Composition>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Composition {
    #[serde(default)]
    lead_research_organisation: Option<Organisation>,
    #[serde(default)]
    project: Option<ProjectPart>,
    #[serde(default, deserialize_with = "nullable_vec")]
    person_role: Vec<PersonRole>,
}

#[derive(Debug, Default, Deserialize)]
struct Organisation {
    #[serde(default, deserialize_with = "scalar_text")]
    name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    department: Option<String>,
    #[serde(default)]
    address: Option<Map<String, Value>>,
}

#[derive(Debug, Default, Deserialize)]
struct ProjectPart {
    #[serde(default)]
    fund: Option<Fund>,
    #[serde(default, deserialize_with = "scalar_text")]
    url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Fund {
    #[serde(default)]
    funder: Option<Funder>,
    #[serde(default)]
    start: Option<Value>,
    #[serde(default)]
    end: Option<Value>,
    #[serde(default)]
    value_pounds: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
struct Funder {
    #[serde(default, deserialize_with = "scalar_text")]
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersonRole {
    #[serde(default, deserialize_with = "scalar_text")]
    first_name: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    other_names: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    surname: Option<String>,
    #[serde(default, deserialize_with = "nullable_vec")]
    role: Vec<Role>,
}

#[derive(Debug, Default, Deserialize)]
struct Role {
    #[serde(default, deserialize_with = "scalar_text")]
    name: Option<String>,
}

impl PersonRole {
    fn is_investigator(&self) -> bool {
        self.role
            .iter()
            .filter_map(|r| r.name.as_deref())
            .any(|n| INVESTIGATOR_ROLES.contains(&n))
    }
}

/* ---------- parsing ---------- */

pub fn parse_detail(body: &str) -> Result<ProjectDetail, serde_json::Error> {
    let payload: Payload = serde_json::from_str(body)?;
    Ok(payload.into_detail())
}

impl Payload {
    fn into_detail(self) -> ProjectDetail {
        let Some(comp) = self.project_overview.and_then(|o| o.project_composition) else {
            return ProjectDetail::default();
        };

        let org = comp.lead_research_organisation.unwrap_or_default();
        let project = comp.project.unwrap_or_default();
        let fund = project.fund.unwrap_or_default();

        let investigator = comp
            .person_role
            .into_iter()
            .find(PersonRole::is_investigator)
            .map(|p| Investigator {
                first_name: p.first_name,
                other_names: p.other_names,
                surname: p.surname,
            });

        ProjectDetail {
            lead_org: org.name,
            department: org.department,
            address: org.address.as_ref().map(Address::from_map).unwrap_or_default(),
            funder: fund.funder.and_then(|f| f.name),
            start: fund.start.as_ref().and_then(render_date),
            end: fund.end.as_ref().and_then(render_date),
            award: fund.value_pounds.as_ref().and_then(render_amount),
            url: project.url,
            investigator,
        }
    }
}

/// Epoch milliseconds → `YYYY-MM-DD` (UTC). Strings pass through.
fn render_date(v: &Value) -> Option<String> {
    match v {
        Value::Number(n) => {
            let ms = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            DateTime::from_timestamp_millis(ms).map(|d| d.format("%Y-%m-%d").to_string())
        }
        other => value_text(other),
    }
}

/// Whole amounts print without a fraction.
fn render_amount(v: &Value) -> Option<String> {
    match v {
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => Some(i.to_string()),
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e15 => Some(format!("{}", f as i64)),
            _ => Some(n.to_string()),
        },
        other => value_text(other),
    }
}
