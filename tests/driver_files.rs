//! Driver Integration Tests
//!
//! Command files in, result files out: through the library `Driver` and
//! through the `bplustree` binary.

use std::fs;
use std::io::{BufReader, BufWriter};
use std::process::Command as Process;

use bplustree::driver::{run, Driver};
use bplustree::Error;
use tempfile::tempdir;

const SAMPLE_INPUT: &str = "\
Initialize(3)
Insert(21,0.3534)
Insert(108,31.907)
Insert(56089,3.26)
Insert(234,121.56)
Insert(4325,-109.23)
Delete(108)
Search(234)
Insert(102,39.56)
Insert(65,-3.95)
Delete(102)
Delete(21)
Insert(106,-3.91)
Insert(23,3.55)
Search(23,99)
Insert(32,0.02)
Insert(220,3.55)
Search(33)
Delete(234)
Search(65)
";

const SAMPLE_OUTPUT: &str = "121.56\n3.55,-3.95\nNull\n-3.95\n";

#[test]
fn test_driver_file_round_trip() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("input.txt");
    let output_path = dir.path().join("output_file.txt");
    fs::write(&input_path, SAMPLE_INPUT).unwrap();

    {
        let input = BufReader::new(fs::File::open(&input_path).unwrap());
        let output = BufWriter::new(fs::File::create(&output_path).unwrap());
        let summary = run(input, output).unwrap();
        assert_eq!(summary.searches, 4);
    }

    assert_eq!(fs::read_to_string(&output_path).unwrap(), SAMPLE_OUTPUT);
}

#[test]
fn test_driver_large_workload_stays_consistent() {
    let mut input = String::from("Initialize(4)\n");
    for key in 0..500 {
        input.push_str(&format!("Insert({},{}.5)\n", (key * 37) % 500, key));
    }
    for key in (0..500).step_by(3) {
        input.push_str(&format!("Delete({})\n", key));
    }
    input.push_str("Search(0,20)\n");

    let mut output = Vec::new();
    let mut driver = Driver::new();
    driver.run(input.as_bytes(), &mut output).unwrap();

    let tree = driver.tree().unwrap();
    tree.check_invariants().unwrap();
    assert_eq!(tree.len(), 500 - 167);

    let line = String::from_utf8(output).unwrap();
    let keys_found = line.trim().split(',').count();
    // Keys 0..=20 minus multiples of 3.
    assert_eq!(keys_found, 21 - 7);
}

#[test]
fn test_driver_reports_bad_line() {
    let input = "Initialize(3)\nInsert(1,1.0)\nInsert(oops)\nSearch(1)\n";
    let mut output = Vec::new();

    let err = run(input.as_bytes(), &mut output).unwrap_err();

    assert!(matches!(err, Error::Parse { line: 3, .. }));
    assert!(output.is_empty());
}

#[test]
fn test_binary_writes_output_file() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("commands.txt");
    let output_path = dir.path().join("results.txt");
    fs::write(&input_path, SAMPLE_INPUT).unwrap();

    let status = Process::new(env!("CARGO_BIN_EXE_bplustree"))
        .arg(&input_path)
        .arg("--output")
        .arg(&output_path)
        .env("RUST_LOG", "off")
        .status()
        .unwrap();

    assert!(status.success());
    assert_eq!(fs::read_to_string(&output_path).unwrap(), SAMPLE_OUTPUT);
}

#[test]
fn test_binary_fails_on_missing_input() {
    let dir = tempdir().unwrap();

    let output = Process::new(env!("CARGO_BIN_EXE_bplustree"))
        .arg(dir.path().join("missing.txt"))
        .arg("-o")
        .arg(dir.path().join("out.txt"))
        .env("RUST_LOG", "off")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("error:"));
}
