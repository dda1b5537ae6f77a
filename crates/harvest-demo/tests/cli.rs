// File: crates/harvest-demo/tests/cli.rs
// Purpose: End-to-end CLI runs: SVG + JSON output, and failures that must not leave output behind.

use assert_cmd::Command;

const EXPORTS: &str = "Commodity_Description,Calendar_Year,Value\nWheat,2020,5000\nCorn,2020,3000\n";
const YIELDS: &str = "Commodity_Description,Calendar_Year,Value\nWheat,2020,12.4\n";

#[test]
fn writes_svg_and_json() {
    let dir = tempfile::tempdir().unwrap();
    let e = dir.path().join("exports_data.csv");
    let y = dir.path().join("yield_data.csv");
    std::fs::write(&e, EXPORTS).unwrap();
    std::fs::write(&y, YIELDS).unwrap();
    let svg = dir.path().join("out/chart.svg");
    let json = dir.path().join("out/chart.json");

    Command::cargo_bin("harvest-demo")
        .unwrap()
        .arg("--exports").arg(&e)
        .arg("--yield").arg(&y)
        .arg("--out").arg(&svg)
        .arg("--json").arg(&json)
        .args(["--unit", "tha", "--select", "Wheat"])
        .assert()
        .success();

    let text = std::fs::read_to_string(&svg).unwrap();
    assert!(text.contains("<svg"));
    assert!(text.contains(r##"data-crop="Wheat" stroke="#333333""##));
    assert_eq!(text.matches("<path ").count(), 12);

    let scene = std::fs::read_to_string(&json).unwrap();
    assert!(scene.contains("\"max_exports\": 10000.0"));
}

#[test]
fn missing_input_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let y = dir.path().join("yield_data.csv");
    std::fs::write(&y, YIELDS).unwrap();
    let svg = dir.path().join("chart.svg");

    Command::cargo_bin("harvest-demo")
        .unwrap()
        .arg("--exports").arg(dir.path().join("missing.csv"))
        .arg("--yield").arg(&y)
        .arg("--out").arg(&svg)
        .assert()
        .failure();
    assert!(!svg.exists());
}

#[test]
fn directory_output_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let run = Command::cargo_bin("harvest-demo")
        .unwrap()
        .arg("--out").arg(dir.path())
        .assert()
        .failure();
    let stderr = String::from_utf8_lossy(&run.get_output().stderr).to_string();
    assert!(stderr.contains("render target"), "stderr: {stderr}");
}

#[test]
fn bundled_data_defaults_to_its_yield_unit() {
    let data = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data");
    let dir = tempfile::tempdir().unwrap();
    let svg = dir.path().join("chart.svg");

    Command::cargo_bin("harvest-demo")
        .unwrap()
        .arg("--exports").arg(data.join("exports_data.csv"))
        .arg("--yield").arg(data.join("yield_data.csv"))
        .arg("--out").arg(&svg)
        .assert()
        .success();

    let text = std::fs::read_to_string(&svg).unwrap();
    assert!(text.contains("Yield: 8.09 (MT/HA)"));
    assert!(!text.contains("Yield: 8.09 (1000 MT)"));
}
