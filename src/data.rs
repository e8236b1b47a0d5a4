// src/data.rs
//
// Canonical project data shared by every stage.
//
// - ProjectRecord: one grant. Built from a search hit, then rebuilt (never
//                  mutated) once its detail payload arrives.
// - ProjectCollection: identifier → record for one category, one run.

use std::collections::BTreeMap;

use crate::specs::detail::ProjectDetail;

/// Export column order.
pub const HEADERS: [&str; 16] = [
    "Title",
    "Funder",
    "Type",
    "Start Date",
    "End Date",
    "Award (£)",
    "Lead Organisation",
    "Department",
    "Address",
    "Postcode",
    "Region",
    "Investigator First Name",
    "Investigator Other Names",
    "Investigator Surname",
    "Project Reference",
    "URL",
];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Investigator {
    pub first_name: Option<String>,
    pub other_names: Option<String>,
    pub surname: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectRecord {
    // Basic: known after search
    pub reference: String,
    pub title: String,
    pub registry_id: String,
    pub category: String,
    pub grant_category: String,

    // Enriched: filled from the detail endpoint
    pub lead_org: Option<String>,
    pub department: Option<String>,
    pub address: Option<String>,
    pub postcode: Option<String>,
    pub region: Option<String>,
    pub funder: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub award: Option<String>,
    pub url: Option<String>,
    pub investigator: Option<Investigator>,
}

impl ProjectRecord {
    /// New record with `detail` merged on top. Fields present in the detail
    /// win; absent ones keep whatever the record already had.
    pub fn with_detail(self, detail: &ProjectDetail) -> ProjectRecord {
        let address = detail.address.flatten();
        ProjectRecord {
            lead_org: detail.lead_org.clone().or(self.lead_org),
            department: detail.department.clone().or(self.department),
            address: if address.is_empty() { self.address } else { Some(address) },
            postcode: detail.address.postcode().map(str::to_owned).or(self.postcode),
            region: detail.address.region().map(str::to_owned).or(self.region),
            funder: detail.funder.clone().or(self.funder),
            start: detail.start.clone().or(self.start),
            end: detail.end.clone().or(self.end),
            award: detail.award.clone().or(self.award),
            url: detail.url.clone().or(self.url),
            investigator: detail.investigator.clone().or(self.investigator),
            ..self
        }
    }

    /// Cells in `HEADERS` order; missing values are empty.
    pub fn to_row(&self) -> Vec<String> {
        let inv = self.investigator.clone().unwrap_or_default();
        vec![
            self.title.clone(),
            cell!(self.funder),
            self.category.clone(),
            cell!(self.start),
            cell!(self.end),
            cell!(self.award),
            cell!(self.lead_org),
            cell!(self.department),
            cell!(self.address),
            cell!(self.postcode),
            cell!(self.region),
            cell!(inv.first_name),
            cell!(inv.other_names),
            cell!(inv.surname),
            self.reference.clone(),
            cell!(self.url),
        ]
    }
}

/// Records for one category, keyed by project reference.
/// Re-inserting a reference replaces the earlier record.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProjectCollection {
    records: BTreeMap<String, ProjectRecord>,
}

impl ProjectCollection {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, record: ProjectRecord) -> Option<ProjectRecord> {
        self.records.insert(record.reference.clone(), record)
    }

    pub fn get(&self, reference: &str) -> Option<&ProjectRecord> {
        self.records.get(reference)
    }

    pub fn len(&self) -> usize { self.records.len() }
    pub fn is_empty(&self) -> bool { self.records.is_empty() }

    pub fn references(&self) -> Vec<String> {
        self.records.keys().cloned().collect()
    }

    pub fn records(&self) -> impl Iterator<Item = &ProjectRecord> {
        self.records.values()
    }

    /// Replace the record for `reference` with its detail-merged rebuild.
    /// This is the only mutator used during enrichment.
    pub fn merge_detail(&mut self, reference: &str, detail: &ProjectDetail) -> bool {
        match self.records.remove(reference) {
            Some(record) => {
                self.records.insert(s!(reference), record.with_detail(detail));
                true
            }
            None => false,
        }
    }
}

impl FromIterator<ProjectRecord> for ProjectCollection {
    fn from_iter<I: IntoIterator<Item = ProjectRecord>>(iter: I) -> Self {
        let mut out = ProjectCollection::new();
        for r in iter {
            out.insert(r);
        }
        out
    }
}

impl IntoIterator for ProjectCollection {
    type Item = ProjectRecord;
    type IntoIter = std::collections::btree_map::IntoValues<String, ProjectRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.into_values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::specs::detail::{Address, ProjectDetail};

    fn basic(reference: &str) -> ProjectRecord {
        ProjectRecord {
            reference: s!(reference),
            title: s!("EPSRC CDT in Robotics"),
            registry_id: s!("1"),
            category: s!("CDT"),
            grant_category: s!("Training Grant"),
            ..Default::default()
        }
    }

    fn detail() -> ProjectDetail {
        ProjectDetail {
            lead_org: Some(s!("University of Leeds")),
            address: Address::from_pairs(vec![
                (s!("line1"), s!("Woodhouse Lane")),
                (s!("postCode"), s!("LS2 9JT")),
                (s!("region"), s!("Yorkshire and The Humber")),
            ]),
            funder: Some(s!("EPSRC")),
            award: Some(s!("6500000")),
            investigator: Some(Investigator { surname: Some(s!("Smith")), ..Default::default() }),
            ..Default::default()
        }
    }

    #[test]
    fn later_insert_overwrites() {
        let mut c = ProjectCollection::new();
        c.insert(basic("EP/1"));
        let mut again = basic("EP/1");
        again.title = s!("Renamed");
        assert!(c.insert(again).is_some());
        assert_eq!(c.len(), 1);
        assert_eq!(c.get("EP/1").unwrap().title, "Renamed");
    }

    #[test]
    fn with_detail_is_idempotent() {
        let d = detail();
        let once = basic("EP/1").with_detail(&d);
        let twice = once.clone().with_detail(&d);
        assert_eq!(once, twice);
        assert_eq!(once.postcode.as_deref(), Some("LS2 9JT"));
        assert_eq!(once.address.as_deref(), Some("Woodhouse Lane, LS2 9JT, Yorkshire and The Humber"));
        assert_eq!(once.title, "EPSRC CDT in Robotics");
    }

    #[test]
    fn empty_detail_keeps_basic_fields() {
        let r = basic("EP/1");
        assert_eq!(r.clone().with_detail(&ProjectDetail::default()), r);
    }

    #[test]
    fn row_follows_header_order() {
        let row = basic("EP/1").with_detail(&detail()).to_row();
        assert_eq!(row.len(), HEADERS.len());
        assert_eq!(row[0], "EPSRC CDT in Robotics");
        assert_eq!(row[1], "EPSRC");
        assert_eq!(row[2], "CDT");
        assert_eq!(row[3], "");
        assert_eq!(row[13], "Smith");
        assert_eq!(row[14], "EP/1");
    }

    #[test]
    fn merge_detail_ignores_unknown_reference() {
        let mut c: ProjectCollection = vec![basic("EP/1")].into_iter().collect();
        assert!(!c.merge_detail("EP/2", &detail()));
        assert!(c.merge_detail("EP/1", &detail()));
        assert_eq!(c.get("EP/1").unwrap().funder.as_deref(), Some("EPSRC"));
    }
}
