use assert_cmd::Command;
use predicates::prelude::*;

const FIXTURE: &str = "tests/fixtures/resources.csv";

fn cli() -> Command {
    Command::cargo_bin("care-directory-cli").unwrap()
}

#[test]
fn lists_everything_without_filters() {
    cli()
        .arg(FIXTURE)
        .assert()
        .success()
        .stdout(predicate::str::contains("Alpha Clinic | North | Free | Virtual"))
        .stdout(predicate::str::contains("Number of results found: 3"));
}

#[test]
fn search_then_condition_then_region() {
    cli()
        .args([FIXTURE, "--search", "alpha"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alpha Clinic"))
        .stdout(predicate::str::contains("Beta Center").not());

    cli()
        .args([FIXTURE, "--condition", "Cancer"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Number of results found: 2"));

    cli()
        .args([FIXTURE, "--condition", "Cancer", "--region", "South"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Beta Center"))
        .stdout(predicate::str::contains("Number of results found: 1"));
}

#[test]
fn tag_search_and_names_only() {
    cli()
        .args([FIXTURE, "-s", "screening"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alpha Clinic"));

    cli()
        .args([FIXTURE, "-s", "screening", "--names-only"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No results found."));
}

#[test]
fn letter_index() {
    cli()
        .args([FIXTURE, "--letter", "k"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kids & Teens Care"))
        .stdout(predicate::str::contains("Number of results found: 1"));
}

#[test]
fn detail_lookup_by_location() {
    cli()
        .args([FIXTURE, "--location", "resource?name=Kids+%26+Teens+Care"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Age Restriction: Under 18"));

    cli()
        .args([FIXTURE, "--show", "Nobody"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Resource not found."));
}

#[test]
fn facets_are_sorted_and_blank_free() {
    cli()
        .args([FIXTURE, "--facets", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""regions": [
    "North",
    "South"
  ]"#));
}

#[test]
fn missing_dataset_fails() {
    cli()
        .arg("tests/fixtures/missing.csv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.csv"));
}

#[test]
fn unsupported_extension_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("resources.txt");
    std::fs::write(&path, "Name of Organization\nA\n").unwrap();
    cli()
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file extension: .txt"));
}

#[test]
fn search_location_is_empty_until_queried() {
    cli()
        .args([FIXTURE, "--location", "search"])
        .assert()
        .success()
        .stdout(predicate::str::diff("No results found.\n"));

    cli()
        .args([FIXTURE, "--location", "search", "--search", "teens"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Kids & Teens Care"))
        .stdout(predicate::str::contains("Number of results found: 1"));
}

#[test]
fn spreadsheet_export_with_ragged_rows_and_both_tag_columns() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("export.csv");
    std::fs::write(
        &path,
        "Name of Organization,Health Region,Tag,Tags\n\
         Alpha,North,grief,support\n\
         Beta,South\n",
    )
    .unwrap();

    cli()
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Alpha | North"))
        .stdout(predicate::str::contains("Beta | South"))
        .stdout(predicate::str::contains("Number of results found: 2"));

    cli()
        .args([path.to_str().unwrap(), "--search", "support"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Alpha"))
        .stdout(predicate::str::contains("Number of results found: 1"));
}
