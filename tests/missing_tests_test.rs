use dartpatch::missing_tests::MissingTestFinder;
use std::fs;
use tempfile::TempDir;

fn write_manifests(tmp: &TempDir, lib_lines: &str, test_lines: &str) -> (std::path::PathBuf, std::path::PathBuf) {
    let lib_manifest = tmp.path().join("lib_files.txt");
    let test_manifest = tmp.path().join("test_files.txt");
    fs::write(&lib_manifest, lib_lines).unwrap();
    fs::write(&test_manifest, test_lines).unwrap();
    (lib_manifest, test_manifest)
}

#[test]
fn test_covered_and_generated_files_produce_no_output() {
    let tmp = TempDir::new().unwrap();
    let (lib_m, test_m) = write_manifests(
        &tmp,
        "lib/a.dart\nlib/b.freezed.dart\n",
        "test/a_test.dart\n",
    );

    let missing = MissingTestFinder::new().run(&lib_m, &test_m).unwrap();
    assert!(missing.is_empty());
}

#[test]
fn test_uncovered_file_is_reported() {
    let tmp = TempDir::new().unwrap();
    let (lib_m, test_m) = write_manifests(&tmp, "lib/c.dart\n", "");

    let missing = MissingTestFinder::new().run(&lib_m, &test_m).unwrap();
    assert_eq!(missing, vec!["lib/c.dart".to_string()]);
}

#[test]
fn test_generated_suffixes_never_reported() {
    let tmp = TempDir::new().unwrap();
    let (lib_m, test_m) = write_manifests(
        &tmp,
        "lib/models/tx.g.dart\nlib/models/tx.freezed.dart\n",
        "",
    );

    let missing = MissingTestFinder::new().run(&lib_m, &test_m).unwrap();
    assert!(missing.is_empty());
}

#[test]
fn test_output_preserves_manifest_order() {
    let tmp = TempDir::new().unwrap();
    let (lib_m, test_m) = write_manifests(
        &tmp,
        "lib/z.dart\nlib/a.dart\nlib/m.dart\n",
        "test/m_test.dart\n",
    );

    let missing = MissingTestFinder::new().run(&lib_m, &test_m).unwrap();
    assert_eq!(
        missing,
        vec!["lib/z.dart".to_string(), "lib/a.dart".to_string()]
    );
}

#[test]
fn test_missing_manifest_aborts_the_run() {
    let tmp = TempDir::new().unwrap();
    let lib_m = tmp.path().join("lib_files.txt");
    let test_m = tmp.path().join("test_files.txt");

    let err = MissingTestFinder::new().run(&lib_m, &test_m).unwrap_err();
    assert!(err.to_string().contains("failed to read manifest"));
}
