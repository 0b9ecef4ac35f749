// tests/integration_test.rs
//
// Exercises Git2Repository against real repositories created in temp
// directories, plus a full pipeline run pushing to a local bare remote.

use git2::{Oid, Repository as RawRepository, Signature};
use serial_test::serial;
use std::env;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

use git_bump::config::Config;
use git_bump::git::{ConfigScope, Git2Repository, Identity, Repository};
use git_bump::history;
use git_bump::pipeline::run_bump;
use git_bump::version::{BumpKind, Version};

const BASE_TIME: i64 = 1_700_000_000;

fn setup_test_repo() -> (TempDir, RawRepository) {
    let temp_dir = TempDir::new().expect("Could not create temp dir");
    let repo = RawRepository::init(temp_dir.path()).expect("Could not init git repo");

    {
        let mut config = repo.config().expect("Could not get config");
        config
            .set_str("user.name", "Test User")
            .expect("Could not set user.name");
        config
            .set_str("user.email", "test@example.com")
            .expect("Could not set user.email");
    }

    (temp_dir, repo)
}

fn commit_file(repo: &RawRepository, name: &str, content: &str, message: &str, time: i64) -> Oid {
    let workdir = repo.workdir().expect("Repo has no workdir");
    fs::write(workdir.join(name), content).expect("Could not write file");

    let mut index = repo.index().expect("Could not get index");
    index
        .add_path(Path::new(name))
        .expect("Could not add file to index");
    index.write().expect("Could not write index");

    let tree_id = index.write_tree().expect("Could not write tree");
    let tree = repo.find_tree(tree_id).expect("Could not find tree");

    let sig = Signature::new("Test User", "test@example.com", &git2::Time::new(time, 0))
        .expect("Could not create signature");

    let parent = repo.head().ok().map(|head| head.peel_to_commit().unwrap());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("Could not create commit")
}

#[test]
fn test_list_tags_carries_commit_timestamps() {
    let (_temp_dir, raw) = setup_test_repo();

    let first = commit_file(&raw, "README.md", "one\n", "Initial commit", BASE_TIME);
    raw.tag_lightweight("v0.1.0", &raw.find_object(first, None).unwrap(), false)
        .unwrap();

    let second = commit_file(&raw, "README.md", "two\n", "Second commit", BASE_TIME + 500);
    raw.tag_lightweight("v0.1.2", &raw.find_object(second, None).unwrap(), false)
        .unwrap();

    let repo = Git2Repository::from_git2(raw);
    let tags = repo.list_tags().unwrap();
    assert_eq!(tags.len(), 2);

    let v012 = tags.iter().find(|t| t.name == "v0.1.2").unwrap();
    assert_eq!(v012.target, second);
    assert_eq!(v012.committed_at, BASE_TIME + 500);

    // The baseline is the tag on the newest commit
    let baseline = history::latest_baseline(&tags).unwrap();
    assert_eq!(baseline.version, Version::new(0, 1, 2));
    assert_eq!(baseline.reference, Some(second));
}

#[test]
fn test_head_short_hash_is_eight_chars() {
    let (_temp_dir, raw) = setup_test_repo();
    let oid = commit_file(&raw, "README.md", "one\n", "Initial commit", BASE_TIME);

    let repo = Git2Repository::from_git2(raw);
    let short = repo.head_short_hash().unwrap();
    assert_eq!(short.len(), 8);
    assert!(oid.to_string().starts_with(&short));
}

#[test]
fn test_worktree_changes_reports_untracked_files() {
    let (temp_dir, raw) = setup_test_repo();
    commit_file(&raw, "README.md", "one\n", "Initial commit", BASE_TIME);

    let repo = Git2Repository::from_git2(raw);
    assert!(repo.worktree_changes().unwrap().is_empty());

    fs::write(temp_dir.path().join("scratch.txt"), "wip\n").unwrap();
    let changes = repo.worktree_changes().unwrap();
    assert_eq!(changes.len(), 1);
    assert!(changes[0].contains("untracked"));
    assert!(changes[0].contains("scratch.txt"));
}

#[test]
fn test_local_identity_roundtrip() {
    let (_temp_dir, raw) = setup_test_repo();
    let repo = Git2Repository::from_git2(raw);

    let identity = repo.read_identity(ConfigScope::Local).unwrap().unwrap();
    assert_eq!(identity.name, "Test User");
    assert_eq!(identity.email, "test@example.com");

    repo.write_local_identity(&Identity::new("Other User", "other@example.com"))
        .unwrap();
    let rewritten = repo.read_identity(ConfigScope::Local).unwrap().unwrap();
    assert_eq!(rewritten.name, "Other User");
}

#[test]
fn test_annotated_tag_creation_and_collision() {
    let (temp_dir, raw) = setup_test_repo();
    commit_file(&raw, "README.md", "one\n", "Initial commit", BASE_TIME);

    let repo = Git2Repository::from_git2(raw);
    repo.create_annotated_tag("v9.9.9", "New version created:\n\treference: 0123abcd")
        .unwrap();

    // The tag object exists and carries the message
    {
        let raw = RawRepository::open(temp_dir.path()).unwrap();
        let reference = raw.find_reference("refs/tags/v9.9.9").unwrap();
        let tag_obj = reference.peel(git2::ObjectType::Tag).unwrap();
        let tag = tag_obj.as_tag().unwrap();
        assert!(tag.message().unwrap().contains("reference: 0123abcd"));
    }

    // Creating the same tag again is a collision
    assert!(repo.create_annotated_tag("v9.9.9", "again").is_err());
}

#[test]
fn test_commit_all_stages_new_and_modified_files() {
    let (temp_dir, raw) = setup_test_repo();
    commit_file(&raw, "README.md", "one\n", "Initial commit", BASE_TIME);

    fs::write(temp_dir.path().join("README.md"), "updated\n").unwrap();
    fs::write(temp_dir.path().join("new_file.txt"), "fresh\n").unwrap();

    let repo = Git2Repository::from_git2(raw);
    repo.commit_all("build version: v0.0.1").unwrap();

    assert!(repo.worktree_changes().unwrap().is_empty());

    let raw = RawRepository::open(temp_dir.path()).unwrap();
    let head = raw.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.message().unwrap(), "build version: v0.0.1");
}

#[test]
fn test_run_bump_end_to_end_with_local_remote() {
    let (temp_dir, raw) = setup_test_repo();

    let first = commit_file(
        &raw,
        "settings.py",
        "DEBUG = False\nVERSION = \"v0.1.0\"\n",
        "Initial commit",
        BASE_TIME,
    );
    raw.tag_lightweight("v0.1.0", &raw.find_object(first, None).unwrap(), false)
        .unwrap();

    let second = commit_file(
        &raw,
        "settings.py",
        "DEBUG = False\nVERSION = \"v0.1.2\"\n",
        "Second release",
        BASE_TIME + 500,
    );
    raw.tag_lightweight("v0.1.2", &raw.find_object(second, None).unwrap(), false)
        .unwrap();

    // A bare repository on disk stands in for origin
    let remote_dir = TempDir::new().unwrap();
    RawRepository::init_bare(remote_dir.path()).unwrap();
    raw.remote("origin", remote_dir.path().to_str().unwrap())
        .unwrap();

    let config = Config {
        settings_file: temp_dir.path().join("settings.py"),
        packaging_file: temp_dir.path().join("pyproject.toml"),
        remote: "origin".to_string(),
    };

    let repo = Git2Repository::from_git2(raw);
    let outcome = run_bump(&repo, &config, BumpKind::Minor).unwrap();

    assert_eq!(outcome.tag, "v0.2.0");
    assert_eq!(outcome.previous, Version::new(0, 1, 2));
    assert!(second.to_string().starts_with(&outcome.reference));

    // Settings were rewritten and committed; the tree is clean again
    let settings = fs::read_to_string(&config.settings_file).unwrap();
    assert_eq!(settings.matches("VERSION = \"v0.2.0\"").count(), 1);
    assert!(settings.contains(&format!("VERSION_REFERENCE = \"{}\"", outcome.reference)));
    assert!(repo.worktree_changes().unwrap().is_empty());

    let raw = RawRepository::open(temp_dir.path()).unwrap();
    let head = raw.head().unwrap().peel_to_commit().unwrap();
    assert_eq!(head.message().unwrap(), "build version: v0.2.0");

    // The annotated tag carries the structured message
    let reference = raw.find_reference("refs/tags/v0.2.0").unwrap();
    let tag_obj = reference.peel(git2::ObjectType::Tag).unwrap();
    let message = tag_obj.as_tag().unwrap().message().unwrap().to_string();
    assert!(message.contains("version type: minor"));
    assert!(message.contains("version number: v0.2.0"));
    assert!(message.contains(&format!("reference: {}", outcome.reference)));

    // Both the branch and the tags arrived at the remote
    let bare = RawRepository::open_bare(remote_dir.path()).unwrap();
    assert!(bare.find_reference("refs/tags/v0.2.0").is_ok());
    let branch = raw.head().unwrap().shorthand().unwrap().to_string();
    let remote_branch = bare
        .find_reference(&format!("refs/heads/{}", branch))
        .unwrap();
    assert_eq!(remote_branch.target(), Some(head.id()));
}

#[test]
#[serial]
fn test_open_requires_a_git_repository() {
    let temp_dir = TempDir::new().unwrap();
    let original_dir = env::current_dir().unwrap();

    env::set_current_dir(temp_dir.path()).expect("Could not change to temp dir");
    let result = Git2Repository::open(".");
    env::set_current_dir(original_dir).unwrap();

    assert!(result.is_err());
}

#[test]
#[serial]
fn test_open_succeeds_inside_a_repository() {
    let (temp_dir, _raw) = setup_test_repo();
    let original_dir = env::current_dir().unwrap();

    env::set_current_dir(temp_dir.path()).expect("Could not change to temp dir");
    let result = Git2Repository::open(".");
    env::set_current_dir(original_dir).unwrap();

    assert!(result.is_ok());
}
