use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const EXAMPLE_CSV: &str = "Name,Primary,Secondary\n\"Tool A\",\"Dev\",\"x, y\"\nTool B,,\n";

/// Writes a config that redirects output into `dir` and returns both paths.
fn write_config(dir: &TempDir) -> (PathBuf, PathBuf) {
    let output = dir.path().join("supabase").join("insert-resources.sql");
    let config = dir.path().join("resources-sql.yml");
    fs::write(&config, format!("output: {}\n", output.display())).expect("failed to write config");
    (config, output)
}

fn write_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("failed to write csv");
    path
}

fn run(config: &Path, input: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_resources-sql"))
        .arg(input)
        .env("RESOURCES_SQL_CONFIG", config)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run resources-sql")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn converts_example_csv() {
    let dir = TempDir::new().unwrap();
    let (config, sql_path) = write_config(&dir);
    let csv = write_csv(&dir, "resources.csv", EXAMPLE_CSV);

    let output = run(&config, &csv);
    assert!(output.status.success(), "failed: {}", stderr(&output));

    let sql = fs::read_to_string(&sql_path).expect("output not written");
    assert!(sql.starts_with(
        "-- Insert team resources from CSV\n-- Generated from Team Resources-Grid view.csv\n\nINSERT INTO public.resources ("
    ));
    assert!(sql.contains(
        "  ('Tool A', 'Dev', ARRAY['x', 'y'], NULL, NULL, NULL, NULL, NULL, NULL, NULL),\n"
    ));
    assert!(sql.contains(
        "  ('Tool B', 'Other', ARRAY[]::TEXT[], NULL, NULL, NULL, NULL, NULL, NULL, NULL)\n;\n"
    ));
    assert!(sql.ends_with(";\n"));

    let err = stderr(&output);
    assert!(err.contains("Found 2 resources to process"), "stderr: {err}");
    assert!(err.contains("SQL file generated: "), "stderr: {err}");
    assert!(err.contains("Total records: 2"), "stderr: {err}");
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_input_exits_with_error() {
    let dir = TempDir::new().unwrap();
    let (config, sql_path) = write_config(&dir);
    let missing = dir.path().join("nope.csv");

    let output = run(&config, &missing);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("CSV file not found"));
    assert!(!sql_path.exists());
}

#[test]
fn header_only_csv_succeeds_with_zero_rows() {
    let dir = TempDir::new().unwrap();
    let (config, sql_path) = write_config(&dir);
    let csv = write_csv(&dir, "empty.csv", "Name,Primary,Secondary\n");

    let output = run(&config, &csv);
    assert!(output.status.success(), "failed: {}", stderr(&output));
    assert!(stderr(&output).contains("Total records: 0"));

    let sql = fs::read_to_string(&sql_path).unwrap();
    assert!(sql.starts_with(
        "-- Insert team resources from CSV\n-- Generated from Team Resources-Grid view.csv\n\nINSERT INTO public.resources ("
    ));
    assert!(sql.ends_with(") VALUES\n\n\n;\n"));
}

#[test]
fn malformed_rows_warn_and_continue() {
    let dir = TempDir::new().unwrap();
    let (config, sql_path) = write_config(&dir);
    let csv = write_csv(
        &dir,
        "messy.csv",
        "Name,Primary,Secondary\nshort\n\"\",Dev,\nKept,Ops,\"a, b\"\n",
    );

    let output = run(&config, &csv);
    assert!(output.status.success(), "failed: {}", stderr(&output));

    let err = stderr(&output);
    assert!(err.contains("expected 3 values, found 1"), "stderr: {err}");
    assert!(err.contains("with no name"), "stderr: {err}");
    assert!(err.contains("Found 2 resources to process"), "stderr: {err}");
    assert!(err.contains("Total records: 1"), "stderr: {err}");

    let sql = fs::read_to_string(&sql_path).unwrap();
    assert!(sql.contains("('Kept', 'Ops', ARRAY['a', 'b'], NULL"));
}

#[test]
fn repeated_runs_are_byte_identical() {
    let dir = TempDir::new().unwrap();
    let (config, sql_path) = write_config(&dir);
    let csv = write_csv(
        &dir,
        "resources.csv",
        "Name,Description\n\"O'Brien\",\"multi\nline\"\nZed,\n",
    );

    assert!(run(&config, &csv).status.success());
    let first = fs::read(&sql_path).unwrap();
    assert!(run(&config, &csv).status.success());
    let second = fs::read(&sql_path).unwrap();

    assert_eq!(first, second);
    let sql = String::from_utf8(first).unwrap();
    assert!(sql.contains("('O''Brien', 'Other', ARRAY[]::TEXT[], NULL, NULL, 'multi line', NULL"));
}

#[test]
fn existing_output_is_overwritten() {
    let dir = TempDir::new().unwrap();
    let (config, sql_path) = write_config(&dir);
    fs::create_dir_all(sql_path.parent().unwrap()).unwrap();
    fs::write(&sql_path, "stale content that is longer than nothing").unwrap();
    let csv = write_csv(&dir, "resources.csv", EXAMPLE_CSV);

    assert!(run(&config, &csv).status.success());
    let sql = fs::read_to_string(&sql_path).unwrap();
    assert!(!sql.contains("stale"));
}

#[test]
fn invalid_config_is_fatal() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("bad.yml");
    fs::write(&config, "table: \"x; DROP TABLE y\"\n").unwrap();
    let csv = write_csv(&dir, "resources.csv", EXAMPLE_CSV);

    let output = run(&config, &csv);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("invalid config"));
}

#[test]
fn configured_table_and_category_are_used() {
    let dir = TempDir::new().unwrap();
    let sql_path = dir.path().join("out.sql");
    let config = dir.path().join("resources-sql.yml");
    fs::write(
        &config,
        format!(
            "table: staging.resources\ndefault_category: Misc\noutput: {}\n",
            sql_path.display()
        ),
    )
    .unwrap();
    let csv = write_csv(&dir, "resources.csv", EXAMPLE_CSV);

    assert!(run(&config, &csv).status.success());
    let sql = fs::read_to_string(&sql_path).unwrap();
    assert!(sql.contains("INSERT INTO staging.resources ("));
    assert!(sql.contains("('Tool B', 'Misc', ARRAY[]::TEXT[]"));
}
