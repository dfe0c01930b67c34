#![allow(dead_code)] // Not every test binary uses every helper

use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One element of a fixture page: tag, (width, height), labeled as comic.
pub type FixtureNode = (&'static str, (f64, f64), bool);

pub fn write_sample(base: &Path, name: &str, nodes: &[FixtureNode]) -> PathBuf {
    let dir = base.join(name);
    fs::create_dir_all(&dir).expect("Failed to create sample dir");

    let elements: Vec<_> = nodes
        .iter()
        .map(|(tag, _, label)| {
            if *label {
                json!({ "tag": tag, "attributes": { "data-fathom-comic": "1" } })
            } else {
                json!({ "tag": tag })
            }
        })
        .collect();
    let rects: Vec<_> = nodes
        .iter()
        .map(|(_, (w, h), _)| json!({ "top": 0.0, "left": 0.0, "bottom": h, "right": w }))
        .collect();

    fs::write(dir.join("elements.json"), json!(elements).to_string()).unwrap();
    fs::write(dir.join("nodes.json"), json!(rects).to_string()).unwrap();
    dir
}

/// Five samples. With any positive size coefficient two are classified
/// correctly (40%); with a zero coefficient ties fall back to document
/// order and three are (60%).
pub struct CorpusFixture {
    pub dir: TempDir,
}

impl CorpusFixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let base = dir.path();

        write_sample(
            base,
            "a_comic",
            &[
                ("html", (1024.0, 768.0), false),
                ("img", (400.0, 300.0), true),
                ("img", (728.0, 90.0), false),
            ],
        );
        write_sample(base, "b_banner_only", &[("img", (468.0, 60.0), true)]);
        write_sample(
            base,
            "c_wrong",
            &[("img", (500.0, 500.0), false), ("img", (300.0, 300.0), true)],
        );
        write_sample(base, "d_single", &[("IMG", (100.0, 100.0), true)]);
        write_sample(
            base,
            "e_first",
            &[("img", (50.0, 50.0), true), ("img", (600.0, 600.0), false)],
        );

        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }
}
