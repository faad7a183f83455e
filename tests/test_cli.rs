// Runs the binary end to end on inputs that cannot succeed.

use std::process::Command;

use digit_mlp::data::load_mnist_gz;
use digit_mlp::NetError;

#[test]
fn missing_archives_exit_nonzero_without_writing_weights() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("Weights.json");

    let result = Command::new(env!("CARGO_BIN_EXE_digit-mlp"))
        .args(["--images", "/no/such/train-images-idx3-ubyte.gz"])
        .args(["--labels", "/no/such/train-labels-idx1-ubyte.gz"])
        .arg("--output")
        .arg(&output)
        .args(["--epochs", "1"])
        .output()
        .unwrap();

    assert!(!result.status.success());
    assert_eq!(result.status.code(), Some(1));
    assert!(result.stdout.is_empty());
    assert!(!output.exists());
}

#[test]
fn invalid_flags_exit_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("Weights.json");

    let result = Command::new(env!("CARGO_BIN_EXE_digit-mlp"))
        .args(["--batch-size", "0"])
        .arg("--output")
        .arg(&output)
        .output()
        .unwrap();

    assert_eq!(result.status.code(), Some(1));
    assert!(!output.exists());
}

#[test]
fn missing_archive_is_reported_by_path() {
    let err = load_mnist_gz("/no/such/images.gz", "/no/such/labels.gz").unwrap_err();
    match err {
        NetError::MissingDataFile { path } => assert!(path.contains("images.gz")),
        other => panic!("expected MissingDataFile, got {other:?}"),
    }
}
