use dartpatch::router::RouterCleaner;
use std::fs;
use tempfile::TempDir;

const ROUTER: &str = "\
final router = GoRouter(
  routes: [
    GoRoute(
      path: '/',
      builder: (context, state) => const HomePage(),
      routes: [
        GoRoute(
          path: '/ui-kit',
          builder: (context, state) => const UiKitShowcasePage(),
        ),
      ],
    ),
    GoRoute(
      path: '/ui-kit',
      builder: (context, state) => const UiKitShowcasePage(),
    ),
  ],
);
";

#[test]
fn test_default_pass_never_mutates_the_file() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("router.dart");
    fs::write(&file, ROUTER).unwrap();

    let outcome = RouterCleaner::new().clean_file(&file, false).unwrap();
    assert!(outcome.changed);
    assert_eq!(outcome.removed_lines, 4);

    // Reported only; the file stays byte-identical
    assert_eq!(fs::read_to_string(&file).unwrap(), ROUTER);
}

#[test]
fn test_write_removes_the_nested_duplicate() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("router.dart");
    fs::write(&file, ROUTER).unwrap();

    let outcome = RouterCleaner::new().clean_file(&file, true).unwrap();
    assert!(outcome.changed);

    let cleaned = fs::read_to_string(&file).unwrap();
    assert_eq!(cleaned.matches("path: '/ui-kit',").count(), 1);
    assert!(cleaned.contains("      path: '/ui-kit',"));
    assert!(!cleaned.contains("          path: '/ui-kit',"));
    // The surrounding structure survives
    assert!(cleaned.contains("      path: '/',"));
    assert!(cleaned.ends_with(");\n"));
}

#[test]
fn test_clean_file_without_duplicates_reports_no_change() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("router.dart");
    let content = "final router = GoRouter(\n  routes: [\n    GoRoute(\n      path: '/ui-kit',\n      builder: (context, state) => const UiKitShowcasePage(),\n    ),\n  ],\n);\n";
    fs::write(&file, content).unwrap();

    let outcome = RouterCleaner::new().clean_file(&file, true).unwrap();
    assert!(!outcome.changed);
    assert_eq!(fs::read_to_string(&file).unwrap(), content);
}

#[test]
fn test_missing_router_file_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let file = tmp.path().join("router.dart");
    let err = RouterCleaner::new().clean_file(&file, false).unwrap_err();
    assert!(err.to_string().contains("failed to read"));
}
