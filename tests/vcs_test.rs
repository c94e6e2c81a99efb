// tests/vcs_test.rs
//
// Git2Vcs against real temporary repositories, including pushes to a local
// bare remote (filesystem remotes need no credentials).

use std::env;
use std::fs;
use std::path::Path;

use serial_test::serial;
use tempfile::TempDir;

use git_release::vcs::{Git2Vcs, VersionControl};
use git_release::ReleaseError;

fn init_repo(path: &Path) -> git2::Repository {
    let repo = git2::Repository::init(path).expect("Could not init git repo");
    {
        let mut config = repo.config().expect("Could not get config");
        config
            .set_str("user.name", "Test User")
            .expect("Could not set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Could not set user.email");
    }
    repo
}

/// Current branch name, whatever init.defaultBranch says on this machine.
fn head_branch(path: &Path) -> String {
    let repo = git2::Repository::open(path).unwrap();
    let head = repo.head().unwrap();
    head.shorthand().unwrap().to_string()
}

fn commit_count(path: &Path) -> usize {
    let repo = git2::Repository::open(path).unwrap();
    let mut revwalk = repo.revwalk().unwrap();
    revwalk.push_head().unwrap();
    revwalk.count()
}

#[test]
fn test_status_not_a_repository() {
    let dir = TempDir::new().unwrap();
    let err = Git2Vcs::discover(dir.path()).unwrap_err();
    assert!(matches!(err, ReleaseError::NotARepository { .. }));
}

#[test]
fn test_stage_all_and_commit() {
    let dir = TempDir::new().unwrap();
    init_repo(dir.path());
    fs::write(dir.path().join("README.md"), "hello\n").unwrap();

    let vcs = Git2Vcs::discover(dir.path()).unwrap();
    assert!(!vcs.has_staged_changes().unwrap());

    vcs.stage_all().unwrap();
    assert!(vcs.has_staged_changes().unwrap());
    assert_eq!(vcs.staged_files().unwrap(), vec!["README.md"]);

    vcs.commit("initial commit\n").unwrap();
    assert!(!vcs.has_staged_changes().unwrap());
    assert_eq!(commit_count(dir.path()), 1);

    let repo = git2::Repository::open(dir.path()).unwrap();
    let head = repo.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.message().unwrap(), "initial commit\n");
}

#[test]
fn test_stage_all_records_deletions() {
    let dir = TempDir::new().unwrap();
    init_repo(dir.path());
    fs::write(dir.path().join("keep.txt"), "keep\n").unwrap();
    fs::write(dir.path().join("gone.txt"), "gone\n").unwrap();

    let vcs = Git2Vcs::discover(dir.path()).unwrap();
    vcs.stage_all().unwrap();
    vcs.commit("initial commit\n").unwrap();

    fs::remove_file(dir.path().join("gone.txt")).unwrap();
    vcs.stage_all().unwrap();
    assert!(vcs.has_staged_changes().unwrap());
    vcs.commit("remove gone.txt\n").unwrap();

    let repo = git2::Repository::open(dir.path()).unwrap();
    let tree = repo.head().unwrap().peel_to_tree().unwrap();
    assert!(tree.get_name("keep.txt").is_some());
    assert!(tree.get_name("gone.txt").is_none());
}

#[test]
fn test_status_summary_reports_untracked_and_clean_tree() {
    let dir = TempDir::new().unwrap();
    init_repo(dir.path());

    let vcs = Git2Vcs::discover(dir.path()).unwrap();
    assert_eq!(vcs.status_summary().unwrap(), "");

    fs::write(dir.path().join("new.txt"), "new\n").unwrap();
    let summary = vcs.status_summary().unwrap();
    assert!(summary.contains("?? new.txt"), "got: {}", summary);

    vcs.stage_all().unwrap();
    let summary = vcs.status_summary().unwrap();
    assert!(summary.contains("A  new.txt"), "got: {}", summary);
}

#[test]
fn test_annotated_tag_lifecycle() {
    let dir = TempDir::new().unwrap();
    init_repo(dir.path());
    fs::write(dir.path().join("README.md"), "hello\n").unwrap();

    let vcs = Git2Vcs::discover(dir.path()).unwrap();
    vcs.stage_all().unwrap();
    vcs.commit("initial commit\n").unwrap();

    assert!(!vcs.tag_exists("v1.0.0").unwrap());
    vcs.create_tag("v1.0.0", "release v1.0.0\n\nnotes\n").unwrap();
    assert!(vcs.tag_exists("v1.0.0").unwrap());

    // Annotated: the reference peels to a tag object carrying the message.
    let repo = git2::Repository::open(dir.path()).unwrap();
    let tag_ref = repo.find_reference("refs/tags/v1.0.0").unwrap();
    let tag = tag_ref.peel(git2::ObjectType::Tag).unwrap();
    let tag = tag.as_tag().unwrap();
    assert_eq!(tag.message().unwrap(), "release v1.0.0\n\nnotes\n");

    // Recreating without deleting first is refused.
    assert!(vcs.create_tag("v1.0.0", "again\n").is_err());

    vcs.delete_tag("v1.0.0").unwrap();
    assert!(!vcs.tag_exists("v1.0.0").unwrap());
}

#[test]
fn test_push_branch_and_tag_to_local_bare_remote() {
    let work = TempDir::new().unwrap();
    let remote_dir = TempDir::new().unwrap();
    init_repo(work.path());
    git2::Repository::init_bare(remote_dir.path()).unwrap();

    {
        let repo = git2::Repository::open(work.path()).unwrap();
        repo.remote("origin", remote_dir.path().to_str().unwrap())
            .unwrap();
    }

    fs::write(work.path().join("README.md"), "hello\n").unwrap();
    let vcs = Git2Vcs::discover(work.path()).unwrap();
    vcs.stage_all().unwrap();
    vcs.commit("initial commit\n").unwrap();
    vcs.create_tag("v1.0.0", "release v1.0.0\n").unwrap();

    let branch = head_branch(work.path());
    vcs.push_branch("origin", &branch).unwrap();
    vcs.push_tag("v1.0.0", "origin").unwrap();

    let bare = git2::Repository::open(remote_dir.path()).unwrap();
    assert!(bare
        .find_reference(&format!("refs/heads/{}", branch))
        .is_ok());
    assert!(bare.find_reference("refs/tags/v1.0.0").is_ok());
}

#[test]
fn test_push_to_missing_remote_fails() {
    let dir = TempDir::new().unwrap();
    init_repo(dir.path());
    fs::write(dir.path().join("README.md"), "hello\n").unwrap();

    let vcs = Git2Vcs::discover(dir.path()).unwrap();
    vcs.stage_all().unwrap();
    vcs.commit("initial commit\n").unwrap();

    assert!(vcs.push_branch("origin", "main").is_err());
}

#[test]
#[serial]
fn test_discover_from_current_directory() {
    let dir = TempDir::new().unwrap();
    init_repo(dir.path());
    let original_dir = env::current_dir().unwrap();

    env::set_current_dir(dir.path()).expect("Could not change to temp dir");
    let result = Git2Vcs::discover(".");
    env::set_current_dir(original_dir).unwrap();

    assert!(result.is_ok());
}
