//! Edge case and error handling tests for bftree


use harness::{TestTree, relative_lines, run_bftree};
use std::ffi::OsStr;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::{PermissionsExt, symlink};
use std::process::Command;
use std::time::{Duration, Instant};

fn root_arg(tree: &TestTree) -> String {
    tree.path().to_string_lossy().to_string()
}

// ============================================================================
// Symlink Edge Cases
// ============================================================================

#[test]
fn test_symlink_to_directory_not_followed() {
    let tree = TestTree::new();
    tree.add_file("realdir/file.txt", "");
    tree.add_symlink("realdir", "linkdir");

    let (stdout, _stderr, success) = run_bftree(tree.path(), &["-t", &root_arg(&tree)]);
    assert!(success, "bftree should succeed with directory symlink");

    assert!(stdout.lines().any(|l| l.ends_with("/realdir/file.txt")));
    assert!(
        !stdout.contains("linkdir/"),
        "linked directory must not be entered without -L: {}",
        stdout
    );
    let link_line = stdout.lines().find(|l| l.ends_with("/linkdir")).unwrap();
    assert!(link_line.starts_with("l "), "link shown as a link: {}", link_line);
}

#[test]
fn test_symlink_to_directory_followed() {
    let tree = TestTree::new();
    tree.add_file("realdir/file.txt", "");
    tree.add_symlink("realdir", "linkdir");

    let (stdout, _stderr, success) = run_bftree(tree.path(), &["-L", "-t", &root_arg(&tree)]);
    assert!(success);

    let via_link = stdout
        .lines()
        .filter(|l| l.ends_with("/linkdir/file.txt"))
        .count();
    assert_eq!(via_link, 1, "linked directory listed exactly once: {}", stdout);
    let link_line = stdout.lines().find(|l| l.ends_with("/linkdir")).unwrap();
    assert!(link_line.starts_with("d "), "target described with -L: {}", link_line);
}

#[test]
fn test_symlink_root_requires_follow() {
    let tree = TestTree::new();
    tree.add_file("realdir/file.txt", "");
    let link = tree.add_symlink("realdir", "linkdir");
    let link = link.to_string_lossy().to_string();

    let (stdout, _stderr, success) = run_bftree(tree.path(), &[&link]);
    assert!(!success, "a link is not a directory without -L");
    assert!(stdout.is_empty());

    let (stdout, _stderr, success) = run_bftree(tree.path(), &["-L", &link]);
    assert!(success);
    assert!(stdout.contains("linkdir/file.txt"));
}

#[test]
fn test_broken_symlink() {
    let tree = TestTree::new();
    tree.add_file("real.txt", "");
    tree.add_symlink("nonexistent.txt", "broken_link");

    // Without -L the link itself is listed
    let (stdout, stderr, success) = run_bftree(tree.path(), &[&root_arg(&tree)]);
    assert!(success);
    assert!(stdout.contains("broken_link"));
    assert!(stderr.is_empty());

    // With -L it cannot be resolved: reported, skipped, run continues
    let (stdout, stderr, success) = run_bftree(tree.path(), &["-L", &root_arg(&tree)]);
    assert!(success, "a dangling link is not fatal");
    assert!(stdout.contains("real.txt"));
    assert!(!stdout.contains("broken_link"));
    assert!(stderr.contains("broken_link"), "error names the entry: {}", stderr);
}

#[test]
fn test_self_referential_symlink() {
    let tree = TestTree::new();
    tree.add_file("file.txt", "");
    tree.add_symlink("selfref", "selfref");

    let (stdout, stderr, success) = run_bftree(tree.path(), &["-L", &root_arg(&tree)]);
    assert!(success, "bftree should handle self-referential symlinks");
    assert!(stdout.contains("file.txt"));
    assert!(stderr.contains("selfref"));
}

#[test]
fn test_parent_symlink_without_follow_terminates() {
    let tree = TestTree::new();
    tree.add_file("subdir/file.txt", "");
    symlink("..", tree.path().join("subdir").join("parent")).expect("symlink");

    let (stdout, _stderr, success) = run_bftree(tree.path(), &[&root_arg(&tree)]);
    assert!(success);
    let lines = relative_lines(&stdout, tree.path());
    assert_eq!(lines.len(), 4, "root, subdir, file, link: {}", stdout);
}

#[test]
fn test_parent_symlink_with_cycle_guard_terminates() {
    let tree = TestTree::new();
    tree.add_file("subdir/file.txt", "");
    symlink("..", tree.path().join("subdir").join("parent")).expect("symlink");

    let start = Instant::now();
    let (stdout, _stderr, success) =
        run_bftree(tree.path(), &["-L", "--cycle-guard", &root_arg(&tree)]);
    assert!(success);
    assert!(start.elapsed() < Duration::from_secs(10));

    let lines = relative_lines(&stdout, tree.path());
    assert!(lines.iter().any(|l| l == "subdir/parent"));
    assert!(!lines.iter().any(|l| l.starts_with("subdir/parent/")));
}

// ============================================================================
// Permission Error Handling
// ============================================================================

#[test]
fn test_unreadable_directory() {
    let tree = TestTree::new();
    tree.add_file("readable/file.txt", "");
    let unreadable = tree.add_dir("unreadable");
    fs::write(unreadable.join("secret.txt"), "").expect("Failed to write file");

    let mut perms = fs::metadata(&unreadable).unwrap().permissions();
    perms.set_mode(0o000);
    fs::set_permissions(&unreadable, perms).expect("Failed to set permissions");

    let (stdout, stderr, success) = run_bftree(tree.path(), &[&root_arg(&tree)]);

    // Restore permissions for cleanup
    let mut perms = fs::metadata(&unreadable).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&unreadable, perms).expect("Failed to restore permissions");

    assert!(success, "an unreadable directory is not fatal");
    assert!(stdout.contains("unreadable"), "the directory itself is listed");
    assert!(stdout.contains("readable/file.txt"), "siblings are still expanded");
    // root ignores mode bits, so the directory opens fine there
    if !nix::unistd::Uid::effective().is_root() {
        assert!(
            stderr.contains("cannot open directory"),
            "the failure is reported: {}",
            stderr
        );
    }
}

#[test]
fn test_non_utf8_name_printed_verbatim() {
    let tree = TestTree::new();
    let name = OsStr::from_bytes(b"bad\xffname");
    fs::write(tree.path().join(name), "").expect("Failed to write file");

    let output = Command::new(env!("CARGO_BIN_EXE_bftree"))
        .arg(tree.path())
        .env("NO_COLOR", "1")
        .output()
        .expect("Failed to run bftree");

    assert!(output.status.success());
    let mut expected = tree.path().as_os_str().as_bytes().to_vec();
    expected.extend_from_slice(b"/bad\xffname\n");
    assert!(
        output
            .stdout
            .windows(expected.len())
            .any(|w| w == expected.as_slice()),
        "raw name bytes missing from output: {:?}",
        String::from_utf8_lossy(&output.stdout)
    );
}

// ============================================================================
// Hidden entries and names
// ============================================================================

#[test]
fn test_hidden_entries_skipped() {
    let tree = TestTree::new();
    tree.add_file("shown.txt", "");
    tree.add_file(".hidden.txt", "");
    tree.add_file(".git/config", "");

    let (stdout, _stderr, success) = run_bftree(tree.path(), &[&root_arg(&tree)]);
    assert!(success);
    let lines = relative_lines(&stdout, tree.path());
    assert_eq!(lines, vec!["", "shown.txt"]);
}

#[test]
fn test_hidden_root_is_listed() {
    let tree = TestTree::new();
    tree.add_file(".dotdir/inside.txt", "");
    let root = tree.path().join(".dotdir");

    let (stdout, _stderr, success) =
        run_bftree(tree.path(), &[&root.to_string_lossy()]);
    assert!(success);
    assert_eq!(stdout.lines().count(), 2);
    assert!(stdout.contains("inside.txt"));
}

#[test]
fn test_filename_with_spaces_and_unicode() {
    let tree = TestTree::new();
    tree.add_file("my file.txt", "");
    tree.add_file("日本語/ファイル.txt", "");

    let (stdout, _stderr, success) = run_bftree(tree.path(), &[&root_arg(&tree)]);
    assert!(success);
    assert!(stdout.contains("my file.txt"));
    assert!(stdout.contains("日本語/ファイル.txt"));
}

#[test]
fn test_empty_directory() {
    let tree = TestTree::new();

    let (stdout, _stderr, success) = run_bftree(tree.path(), &[&root_arg(&tree)]);
    assert!(success);
    assert_eq!(stdout.lines().count(), 1, "only the root line");
}

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_level_order_deep_tree() {
    let tree = TestTree::new();
    tree.add_file("a/b/c/d/e/leaf.txt", "");
    tree.add_file("x/y/z.txt", "");
    tree.add_file("top.txt", "");

    let (stdout, _stderr, success) = run_bftree(tree.path(), &[&root_arg(&tree)]);
    assert!(success);

    let depths: Vec<usize> = relative_lines(&stdout, tree.path())
        .iter()
        .map(|l| if l.is_empty() { 0 } else { l.split('/').count() })
        .collect();
    assert!(
        depths.windows(2).all(|w| w[0] <= w[1]),
        "entries must come out level by level: {}",
        stdout
    );
}

#[test]
fn test_many_files() {
    let tree = TestTree::new();
    for i in 0..500 {
        tree.add_file(&format!("dir_{:02}/file_{:04}.txt", i / 50, i), "");
    }

    let start = Instant::now();
    let (stdout, _stderr, success) = run_bftree(tree.path(), &[&root_arg(&tree)]);
    assert!(success);
    assert_eq!(stdout.lines().count(), 1 + 10 + 500);
    assert!(
        start.elapsed().as_secs() < 10,
        "listing 500 files took too long: {:?}",
        start.elapsed()
    );
}
