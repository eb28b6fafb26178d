// Integration tests for the `brewmap` binary.
// Run with: cargo test -p brewmap-cli --test cli

use std::path::Path;
use std::process::Command;

use httpmock::prelude::*;

fn brewmap(config_home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_brewmap"));
    cmd.current_dir(env!("CARGO_MANIFEST_DIR"));
    // Clear env to avoid leaking a real key or settings file into tests
    cmd.env_remove("BREWMAP_API_KEY");
    cmd.env_remove("BREWMAP_ENDPOINT");
    cmd.env("HOME", config_home);
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd.env("APPDATA", config_home);
    cmd
}

fn write_input(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("breweries.csv");
    std::fs::write(
        &path,
        "id,brewery,city\nH1,Acme Brewing,Reading\nH2,Acme Brewing,Reading\nH3,Best Beer,Easton\n",
    )
    .unwrap();
    path
}

#[test]
fn missing_api_key_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path());

    let output = brewmap(dir.path())
        .args(["--file", input.to_str().unwrap(), "--quiet"])
        .output()
        .expect("failed to run brewmap");

    assert_eq!(
        output.status.code(),
        Some(2),
        "expected exit 2, got {:?}\nstderr: {}",
        output.status.code(),
        String::from_utf8_lossy(&output.stderr),
    );
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("no API key was provided"), "stderr: {}", stderr);
    assert!(!dir.path().join("results.csv").exists());
}

#[test]
fn missing_input_file_exits_2() {
    let dir = tempfile::tempdir().unwrap();

    let output = brewmap(dir.path())
        .args(["--key", "k", "--file", dir.path().join("nope.csv").to_str().unwrap()])
        .output()
        .expect("failed to run brewmap");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("the file nope.csv was not found"), "stderr: {}", stderr);
}

#[test]
fn column_zero_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path());

    let output = brewmap(dir.path())
        .args(["-k", "k", "-f", input.to_str().unwrap(), "-c", "0"])
        .output()
        .expect("failed to run brewmap");

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn bad_endpoint_exits_40() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path());

    let output = brewmap(dir.path())
        .args(["-k", "k", "-f", input.to_str().unwrap(), "--endpoint", "not a url"])
        .output()
        .expect("failed to run brewmap");

    assert_eq!(output.status.code(), Some(40));
    assert!(!dir.path().join("results.csv").exists());
}

#[test]
fn writes_results_next_to_input() {
    let server = MockServer::start();
    let acme_id = server.mock(|when, then| {
        when.method(GET).path("/locquery/k3y/acme+brewing");
        then.status(200).body("<bmp_locations><location><id>12</id></location></bmp_locations>");
    });
    server.mock(|when, then| {
        when.method(GET).path("/locquery/k3y/best+beer");
        then.status(404);
    });
    let acme_coords = server.mock(|when, then| {
        when.method(GET).path("/locmap/k3y/12");
        then.status(200)
            .body("<bmp_locations><location><lat>40.5</lat><lng>-75.25</lng></location></bmp_locations>");
    });

    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path());

    let output = brewmap(dir.path())
        .env("BREWMAP_API_KEY", "k3y")
        .args(["-f", input.to_str().unwrap(), "--endpoint", &server.base_url(), "--json"])
        .output()
        .expect("failed to run brewmap");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr),
    );
    acme_id.assert();
    acme_coords.assert();

    let results = std::fs::read_to_string(dir.path().join("results.csv")).unwrap();
    assert_eq!(
        results,
        "brewery, latitude, longitude\n\
         Acme Brewing, 40.5, -75.25\n\
         Acme Brewing, 40.5, -75.25\n\
         Best Beer, 0, 0\n"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("warning: failed to get id for Best Beer"), "stderr: {}", stderr);

    let summary: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(summary["rows_read"], 3);
    assert_eq!(summary["rows_written"], 3);
    assert_eq!(summary["coordinates_resolved"], 1);
    assert_eq!(summary["unresolved"], serde_json::json!(["Best Beer"]));
}

#[test]
fn stdout_output_with_custom_column() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/locquery/k/reading");
        then.status(200).body("<location><id>0</id></location>");
    });
    server.mock(|when, then| {
        when.method(GET).path("/locquery/k/easton");
        then.status(200).body("<location><id>3</id></location>");
    });
    let zero = server.mock(|when, then| {
        when.method(GET).path("/locmap/k/0");
        then.status(200).body("<location><lat>1</lat><lng>1</lng></location>");
    });
    server.mock(|when, then| {
        when.method(GET).path("/locmap/k/3");
        then.status(200).body("<location><lat>40.69</lat><lng>-75.21</lng></location>");
    });

    let dir = tempfile::tempdir().unwrap();
    let input = write_input(dir.path());

    let output = brewmap(dir.path())
        .args([
            "-k", "k",
            "-f", input.to_str().unwrap(),
            "-c", "3",
            "-o", "-",
            "--endpoint", &server.base_url(),
            "--quiet",
        ])
        .output()
        .expect("failed to run brewmap");

    assert_eq!(output.status.code(), Some(0));
    zero.assert_calls(0);
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "brewery, latitude, longitude\n\
         Reading, 0, 0\n\
         Reading, 0, 0\n\
         Easton, 40.69, -75.21\n"
    );
    assert!(!dir.path().join("results.csv").exists());
}
