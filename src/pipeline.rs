//! The bump pipeline.
//!
//! A strictly ordered, single-shot sequence: guard, compute the next
//! version from tag history, create the annotated tag, rewrite the version
//! fields, commit and push the branch, then push tags. There is no
//! compensating rollback across steps: a failure after tagging leaves the
//! tag in place while the commit is local or absent. Concurrent runs are
//! unsupported.

use crate::config::Config;
use crate::git::Repository;
use crate::version::{BumpKind, Version};
use crate::{guard, history, rewrite, ui};

use crate::error::Result;

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpOutcome {
    /// Baseline the bump was computed from
    pub previous: Version,
    /// The newly published version
    pub version: Version,
    /// Tag name created for the new version
    pub tag: String,
    /// Short hash of the tagged commit
    pub reference: String,
}

/// Structured annotated-tag message: bump kind, version number, creation
/// time, and the short reference hash.
pub fn tag_message(kind: BumpKind, tag: &str, reference: &str, created_at: &str) -> String {
    format!(
        "New version created:\n\tversion type: {}\n\tversion number: {}\n\ttime: {}\n\treference: {}",
        kind, tag, created_at, reference
    )
}

/// Run the whole bump pipeline against `repo`.
pub fn run_bump<R: Repository + ?Sized>(
    repo: &R,
    config: &Config,
    kind: BumpKind,
) -> Result<BumpOutcome> {
    guard::ensure_identity(repo)?;
    guard::ensure_clean_worktree(repo)?;

    let baseline = history::latest_baseline(&repo.list_tags()?)?;
    let version = baseline.version.bump(kind);
    let tag = version.tag_name();
    let reference = repo.head_short_hash()?;

    let created_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let message = tag_message(kind, &tag, &reference, &created_at);
    repo.create_annotated_tag(&tag, &message)?;
    ui::display_info(&message);

    rewrite::update_settings_file(&config.settings_file, &tag, &reference)?;
    rewrite::update_packaging_file(&config.packaging_file, &version.to_string())?;

    repo.commit_all(&format!("build version: {}", tag))?;
    repo.push_branch(&config.remote)?;

    repo.push_tags(&config.remote)?;
    ui::display_info("All tags pushed to the remote repository");

    Ok(BumpOutcome {
        previous: baseline.version,
        version,
        tag,
        reference,
    })
}
