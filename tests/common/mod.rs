//! Shared test infrastructure for integration tests.
#![allow(dead_code)]

use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

pub const KINDS: [&str; 4] = ["component", "dataformat", "language", "other"];

/// A throwaway catalog module laid out like the default layout.
pub struct CatalogFixture {
    pub dir: TempDir,
}

impl CatalogFixture {
    /// Create a module with empty descriptor and dependency directories and an
    /// empty seed roadmap for every kind.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let fixture = Self { dir };
        fs::create_dir_all(fixture.descriptor_root()).expect("create descriptor dir");
        fs::create_dir_all(fixture.dependency_dir()).expect("create dependency dir");
        for kind in KINDS {
            fixture.seed_roadmap(kind, "");
        }
        fixture
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn descriptor_root(&self) -> PathBuf {
        self.root().join("target/camel-catalog")
    }

    pub fn dependency_dir(&self) -> PathBuf {
        self.root().join("target/dependency")
    }

    pub fn roadmap_path(&self, kind: &str) -> PathBuf {
        self.root()
            .join("src/main/resources")
            .join(format!("{kind}.roadmap"))
    }

    pub fn properties_path(&self, kind: &str) -> PathBuf {
        self.root()
            .join("target/classes/org/wildfly/camel/catalog")
            .join(format!("{kind}s.properties"))
    }

    /// Where a descriptor under `org/apache/camel/catalog/<dir>/` is mirrored.
    pub fn copied_descriptor(&self, dir: &str, name: &str) -> PathBuf {
        self.root()
            .join("target/classes/org/wildfly/camel/catalog")
            .join(dir)
            .join(format!("{name}.json"))
    }

    pub fn seed_roadmap(&self, kind: &str, text: &str) {
        write_file(&self.roadmap_path(kind), text);
    }

    pub fn add_descriptor(&self, dir: &str, name: &str, document: &Value) {
        let path = self
            .descriptor_root()
            .join("org/apache/camel/catalog")
            .join(dir)
            .join(format!("{name}.json"));
        let text = serde_json::to_string_pretty(document).expect("serialize descriptor");
        write_file(&path, &text);
    }

    /// Add a camel-style component descriptor for `camel-<name>`.
    pub fn add_component(&self, name: &str, deprecated: bool) {
        self.add_descriptor(
            "components",
            name,
            &json!({
                "component": {
                    "kind": "component",
                    "name": name,
                    "artifactId": format!("camel-{name}"),
                    "deprecated": deprecated.to_string()
                },
                "componentProperties": {},
                "properties": {}
            }),
        );
    }

    pub fn add_artifact(&self, artifact_id: &str) {
        write_file(
            &self.dependency_dir().join(format!("{artifact_id}.jar")),
            "PK",
        );
    }

    pub fn remove_artifact(&self, artifact_id: &str) {
        fs::remove_file(self.dependency_dir().join(format!("{artifact_id}.jar")))
            .expect("remove artifact");
    }

    pub fn read(&self, path: &Path) -> String {
        fs::read_to_string(path).unwrap_or_else(|err| panic!("read {}: {err}", path.display()))
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_catalog-roadmap"))
            .args(args)
            .arg("--basedir")
            .arg(self.root())
            .env_remove("RUST_LOG")
            .output()
            .expect("run catalog-roadmap")
    }

    /// Run `generate` and assert it succeeded.
    pub fn generate(&self) -> Output {
        let output = self.run(&["generate"]);
        assert!(
            output.status.success(),
            "generate failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        output
    }
}

fn write_file(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directory");
    }
    fs::write(path, contents).expect("write file");
}

/// Names listed under `[section]` in a rendered roadmap.
pub fn section<'a>(roadmap: &'a str, state: &str) -> Vec<&'a str> {
    let header = format!("[{state}]");
    roadmap
        .lines()
        .skip_while(|line| *line != header)
        .skip(1)
        .take_while(|line| !line.is_empty())
        .collect()
}
