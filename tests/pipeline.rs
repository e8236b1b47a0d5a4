// tests/pipeline.rs
//
// End to end through runner::run with a canned registry.
//
mod common;

use std::fs;

use chrono::NaiveDate;
use common::*;
use gtr_scrape::csv::parse_rows;
use gtr_scrape::error::Error;
use gtr_scrape::runner;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 11, 5).unwrap()
}

#[test]
fn both_categories_are_searched_enriched_and_exported() {
    let dir = tempfile::tempdir().unwrap();
    let options = run_options(dir.path());
    let (cdt, dtp) = (&options.categories[0], &options.categories[1]);

    let src = FakeSource::new()
        .ok(search_url(cdt, 1), page(1, 1, &[
            hit("EP/C/1", "CDT in Robotics", "Training Grant", "Active"),
            hit("EP/C/2", "Old CDT", "Training Grant", "Closed"),
        ]))
        .ok(search_url(dtp, 1), page(2, 1, &[hit("NE/D/1", "NERC DTP", "Training Grant", "Active")]))
        .fail(search_url(dtp, 2))
        .ok(detail_for("EP/C/1"), detail("University of Edinburgh", "Turing"))
        .fail(detail_for("NE/D/1"));

    let summary = runner::run(&options, &src, today(), None).unwrap();

    assert_eq!(summary.categories.len(), 2);
    assert_eq!(summary.categories[0].label, "CDT");
    assert_eq!(summary.categories[0].records, 1);
    assert!(summary.categories[0].detail_failures.is_empty());
    assert_eq!(summary.categories[1].records, 1);
    assert_eq!(summary.categories[1].detail_failures, vec!["NE/D/1"]);

    let files = summary.files_written();
    assert_eq!(files, vec![
        dir.path().join("CDT_projects_2024-11-05.csv"),
        dir.path().join("DTP_projects_2024-11-05.csv"),
    ]);

    let cdt_rows = parse_rows(&fs::read_to_string(&files[0]).unwrap(), ',');
    assert_eq!(cdt_rows.len(), 2);
    assert_eq!(cdt_rows[1][0], "CDT in Robotics");
    assert_eq!(cdt_rows[1][2], "CDT");
    assert_eq!(cdt_rows[1][6], "University of Edinburgh");
    assert_eq!(cdt_rows[1][13], "Turing");

    let dtp_rows = parse_rows(&fs::read_to_string(&files[1]).unwrap(), ',');
    assert_eq!(dtp_rows.len(), 2);
    assert_eq!(dtp_rows[1][0], "NERC DTP");
    assert_eq!(dtp_rows[1][6], ""); // detail failed: basic fields only
    assert_eq!(dtp_rows[1][14], "NE/D/1");
}

#[test]
fn fatal_search_failure_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let options = run_options(dir.path());
    let (cdt, dtp) = (&options.categories[0], &options.categories[1]);

    let src = FakeSource::new()
        .ok(search_url(cdt, 1), page(1, 1, &[hit("EP/C/1", "CDT", "Training Grant", "Active")]))
        .fail(search_url(dtp, 1));

    let err = runner::run(&options, &src, today(), None).unwrap_err();
    assert!(matches!(err, Error::Search { ref category, .. } if category == "DTP"));

    // searches run before any detail request or export
    assert!(src.requested().iter().all(|u| u.starts_with(SEARCH)));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn export_failure_does_not_stop_other_categories() {
    let dir = tempfile::tempdir().unwrap();
    let mut options = run_options(dir.path());
    let (cdt, dtp) = (options.categories[0].clone(), options.categories[1].clone());

    // a directory squatting on the CDT file name makes that write fail
    fs::create_dir(dir.path().join("CDT_projects_2024-11-05.csv")).unwrap();
    options.detail.workers = 2;

    let src = FakeSource::new()
        .ok(search_url(&cdt, 1), page(1, 1, &[]))
        .ok(search_url(&dtp, 1), page(1, 1, &[hit("NE/D/1", "DTP", "Training Grant", "Active")]))
        .ok(detail_for("NE/D/1"), detail("Exeter", "Franklin"));

    let summary = runner::run(&options, &src, today(), None).unwrap();
    assert_eq!(summary.categories[0].output, None);
    assert_eq!(summary.categories[1].output, Some(dir.path().join("DTP_projects_2024-11-05.csv")));
}
