use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

struct Inputs {
    graph: PathBuf,
    paths: PathBuf,
    fasta: PathBuf,
    output: PathBuf,
}

fn write_inputs(dir: &Path, graph: &str, paths: &str, fasta: &str) -> Inputs {
    let inputs = Inputs {
        graph: dir.join("graph.gbwt.txt"),
        paths: dir.join("paths.txt"),
        fasta: dir.join("nodes.fa"),
        output: dir.join("out.gfa"),
    };
    fs::write(&inputs.graph, graph).unwrap();
    fs::write(&inputs.paths, paths).unwrap();
    fs::write(&inputs.fasta, fasta).unwrap();
    inputs
}

fn run(inputs: &Inputs, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_gbwt2gfa"))
        .arg(&inputs.graph)
        .arg(&inputs.paths)
        .arg(&inputs.fasta)
        .arg(&inputs.output)
        .args(extra)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout_lines(output: &Output) -> Vec<String> {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .map(String::from)
        .collect()
}

#[test]
fn prints_progress_and_writes_gfa() {
    let dir = TempDir::new().unwrap();
    let inputs = write_inputs(
        dir.path(),
        "V\nE 2 1\n",
        "P x x\nz x x 1\no x x 5\n",
        ">1\nACGT\n",
    );

    let output = run(&inputs, &[]);
    assert!(output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec![
            "parsed seq".to_string(),
            "submer_size 4".to_string(),
            "parsed gbwt".to_string(),
            "parsed paths".to_string(),
            format!("GFA file written to {}", inputs.output.display()),
        ]
    );

    let gfa = fs::read_to_string(&inputs.output).unwrap();
    assert_eq!(gfa, "H\tVN:Z:1.0\nS\t1\tACGT\nL\t2\t+\t1\t+\t3M\nP\t1\t1+\t5\n");
}

#[test]
fn missing_sequence_file_fails() {
    let dir = TempDir::new().unwrap();
    let inputs = write_inputs(dir.path(), "V\n", "", ">1\nACGT\n");
    fs::remove_file(&inputs.fasta).unwrap();

    let output = run(&inputs, &[]);
    assert!(!output.status.success());
    assert!(stdout_lines(&output).is_empty());
    assert!(!inputs.output.exists());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed reading sequences from"));
}

#[test]
fn pedantic_rejects_dangling_path() {
    let dir = TempDir::new().unwrap();
    let inputs = write_inputs(dir.path(), "V\n", "P x x\nz x x 1\n", ">1\nACGT\n");

    let output = run(&inputs, &["--tolerance", "pedantic"]);
    assert!(!output.status.success());
    assert_eq!(
        stdout_lines(&output),
        vec!["parsed seq", "submer_size 4", "parsed gbwt"]
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("failed reading paths from"));

    let output = run(&inputs, &[]);
    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(&inputs.output).unwrap(),
        "H\tVN:Z:1.0\nS\t1\tACGT\n"
    );
}

#[test]
fn unknown_tolerance_is_rejected() {
    let dir = TempDir::new().unwrap();
    let inputs = write_inputs(dir.path(), "V\n", "", ">1\nACGT\n");

    let output = run(&inputs, &["-t", "loose"]);
    assert!(!output.status.success());
    assert!(stdout_lines(&output).is_empty());
}
