use std::{fs, path::PathBuf};

use tempfile::tempdir;

use trigscope_cli::{Args, Command, FilterArgs, execute, run};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn fixture(name: &str) -> String {
    fixtures_dir().join(name).to_string_lossy().to_string()
}

/// Collects all .map files from a directory
fn collect_map_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("map")
            })
            .collect()
    } else {
        Vec::new()
    };

    // Sort for consistent test output
    files.sort();
    files
}

fn args(input: String, command: Command) -> Args {
    Args {
        input,
        config: None,
        definitions: None,
        log_level: "off".to_string(),
        command,
    }
}

/// Run `command` against fixture `name` and capture its output.
fn capture(name: &str, command: Command) -> String {
    let mut out = Vec::new();
    execute(&args(fixture(name), command), &mut out).expect("command failed");
    String::from_utf8(out).expect("output is UTF-8")
}

fn graph_document(name: &str) -> serde_json::Value {
    let output = capture(
        name,
        Command::Graph {
            output: None,
            pretty: false,
            filter: FilterArgs::default(),
        },
    );
    serde_json::from_str(&output).expect("graph output is JSON")
}

#[test]
fn e2e_smoke_test_all_fixtures() {
    let temp_dir = tempdir().expect("Failed to create temp directory");

    let maps = collect_map_files(fixtures_dir());
    assert!(!maps.is_empty(), "No map fixtures found");

    let mut failed = Vec::new();

    for map_path in &maps {
        let output_filename = format!(
            "{}.json",
            map_path.file_stem().unwrap().to_string_lossy()
        );
        let output_path = temp_dir.path().join(output_filename);

        let args = args(
            map_path.to_string_lossy().to_string(),
            Command::Graph {
                output: Some(output_path.to_string_lossy().to_string()),
                pretty: true,
                filter: FilterArgs::default(),
            },
        );

        match run(&args) {
            Ok(()) => {
                let written = fs::read_to_string(&output_path).unwrap();
                let document: serde_json::Value = serde_json::from_str(&written).unwrap();
                assert!(document["nodes"].is_array(), "{}", map_path.display());
                assert!(document["edges"].is_array(), "{}", map_path.display());
            }
            Err(e) => failed.push((map_path.clone(), e)),
        }
    }

    if !failed.is_empty() {
        eprintln!("\nFixtures that failed:");
        for (path, err) in &failed {
            eprintln!("  - {}: {}", path.display(), err);
        }
        panic!("{} fixture(s) failed unexpectedly", failed.len());
    }
}

#[test]
fn e2e_graph_linked_chain() {
    let document = graph_document("linked.map");

    assert_eq!(document["stats"]["triggers"], 4);
    assert_eq!(document["stats"]["local_variables"], 1);
    assert_eq!(document["stats"]["global_variables"], 1);
    assert_eq!(document["stats"]["edges"], 6);
    assert!(document["warnings"].as_array().unwrap().is_empty());
}

#[test]
fn e2e_graph_malformed_map_reports_warnings() {
    let document = graph_document("malformed.map");

    let codes: Vec<&str> = document["warnings"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|warning| warning["code"].as_str())
        .collect();
    for expected in ["W101", "W102", "W105"] {
        assert!(codes.contains(&expected), "missing {expected} in {codes:?}");
    }
}

#[test]
fn e2e_graph_hides_variables() {
    let output = capture(
        "basic.map",
        Command::Graph {
            output: None,
            pretty: false,
            filter: FilterArgs {
                hide_variables: true,
                ..FilterArgs::default()
            },
        },
    );
    let document: serde_json::Value = serde_json::from_str(&output).unwrap();

    let nodes = document["nodes"].as_array().unwrap();
    assert_eq!(nodes.len(), 2);
    assert!(nodes.iter().all(|node| node["kind"] == "trigger"));
    assert_eq!(document["edges"].as_array().unwrap().len(), 1);
    assert_eq!(document["stats"]["local_variables"], 1);
}

#[test]
fn e2e_summary() {
    let output = capture("basic.map", Command::Summary);
    assert!(output.contains("Triggers & Variables: 3"));
    assert!(output.contains("Links: 2"));
    assert!(!output.contains("Warnings"));
}

#[test]
fn e2e_show_with_definitions() {
    let mut args = args(
        fixture("basic.map"),
        Command::Show {
            id: "01000000".to_string(),
        },
    );
    args.definitions = Some(fixture("opcodes.json"));

    let mut out = Vec::new();
    execute(&args, &mut out).unwrap();
    let report = String::from_utf8(out).unwrap();

    assert!(report.starts_with("Name: Base alarm"));
    assert!(report.contains("Set local 0"));
}

#[test]
fn e2e_show_unknown_node() {
    let mut out = Vec::new();
    let err = execute(
        &args(
            fixture("basic.map"),
            Command::Show {
                id: "09999999".to_string(),
            },
        ),
        &mut out,
    )
    .unwrap_err();
    assert!(err.to_string().contains("09999999"));
}

#[test]
fn e2e_search() {
    let output = capture(
        "basic.map",
        Command::Search {
            query: "follow".to_string(),
        },
    );
    assert_eq!(output, "01000002\tAlarm follow-up\n");
}

#[test]
fn e2e_inspect() {
    let output = capture(
        "basic.map",
        Command::Inspect {
            id: "Team1".to_string(),
        },
    );
    assert!(output.contains("Responders"));
    assert!(output.contains("Patrol route"));
    assert!(output.contains("Rhino squad"));
}

#[test]
fn e2e_missing_input() {
    let mut out = Vec::new();
    let result = execute(
        &args(fixture("does-not-exist.map"), Command::Summary),
        &mut out,
    );
    assert!(result.is_err());
}
