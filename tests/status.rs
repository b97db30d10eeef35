//! `catalog-roadmap status` previews states without touching outputs.

mod common;

use common::CatalogFixture;
use serde_json::Value;

#[test]
fn status_reports_states_without_writing() {
    let fixture = CatalogFixture::new();
    fixture.add_component("foo", false);
    fixture.add_component("bar", false);
    fixture.add_artifact("camel-foo");
    let seed = "[planned]\nbar\n";
    fixture.seed_roadmap("component", seed);

    let output = fixture.run(&["status"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("component: 2 items (1 supported, 1 planned, 0 undecided, 0 rejected)"),
        "stdout: {stdout}"
    );
    assert_eq!(fixture.read(&fixture.roadmap_path("component")), seed);
    assert!(!fixture.properties_path("component").exists());
    assert!(!fixture.copied_descriptor("components", "foo").exists());
}

#[test]
fn status_json_lists_names_per_state() {
    let fixture = CatalogFixture::new();
    fixture.add_component("foo", true);
    fixture.add_component("bar", false);
    fixture.add_artifact("camel-foo");
    fixture.seed_roadmap("component", "[rejected]\nbar\n");

    let output = fixture.run(&["status", "--json"]);

    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).expect("status JSON");
    assert_eq!(report["descriptors"], 2);
    assert_eq!(report["artifacts"], 1);
    let component = &report["kinds"][0];
    assert_eq!(component["kind"], "component");
    assert_eq!(component["items"]["supported"], serde_json::json!(["foo"]));
    assert_eq!(component["items"]["rejected"], serde_json::json!(["bar"]));
    assert_eq!(component["counts"]["undecided"], 0);
    assert_eq!(report["kinds"].as_array().map(Vec::len), Some(4));
}

#[test]
fn status_json_reports_duplicates_and_unmatched_roadmap_names() {
    let fixture = CatalogFixture::new();
    fixture.add_component("foo", false);
    fixture.add_descriptor(
        "legacy",
        "foo",
        &serde_json::json!({"component": {"kind": "component", "name": "foo", "artifactId": "camel-foo"}}),
    );
    fixture.seed_roadmap("component", "[planned]\nfoo\nghost\n");
    fixture.seed_roadmap("dataformat", "[rejected]\nretired\n");

    let output = fixture.run(&["status", "--json"]);

    assert!(output.status.success());
    let report: Value = serde_json::from_slice(&output.stdout).expect("status JSON");
    assert_eq!(report["descriptors"], 2);
    assert_eq!(report["replaced"], 1);
    assert_eq!(report["kinds"][0]["total"], 1);
    assert_eq!(report["kinds"][0]["unknown"], serde_json::json!(["ghost"]));
    assert_eq!(report["kinds"][1]["unknown"], serde_json::json!(["retired"]));
    assert_eq!(report["kinds"][2]["unknown"], serde_json::json!([]));
}
