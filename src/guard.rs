//! Repository guard.
//!
//! Checks that run before any mutation: committer identity must be
//! resolvable and the working tree must be clean. Any failure here aborts
//! the whole run; proceeding would create an incorrectly-attributed or
//! inconsistent release.

use crate::error::{BumpError, Result};
use crate::git::{ConfigScope, Identity, Repository};
use crate::ui;

/// Resolve the committer identity, preferring repository-local config.
///
/// When the identity is only found in global config it is copied into the
/// repository-local config so future runs resolve locally. An identity that
/// is absent everywhere is a fatal precondition failure; it is never
/// invented.
pub fn ensure_identity<R: Repository + ?Sized>(repo: &R) -> Result<Identity> {
    ui::display_info("Checking local repository config ...");
    if let Some(identity) = repo.read_identity(ConfigScope::Local)? {
        ui::display_info(&format!(
            "Found name '{}' and email '{}' in local repository",
            identity.name, identity.email
        ));
        return Ok(identity);
    }

    ui::display_warning("Git user or email not found in local repository");
    ui::display_info("Checking global config ...");
    match repo.read_identity(ConfigScope::Global)? {
        Some(identity) => {
            ui::display_info(&format!(
                "Setting name '{}' and email '{}' in local repository",
                identity.name, identity.email
            ));
            repo.write_local_identity(&identity)?;
            Ok(identity)
        }
        None => Err(BumpError::precondition("Git user or email not found")),
    }
}

/// Fail if the working tree has uncommitted or untracked changes.
///
/// The pending changes are surfaced to the operator before the run aborts.
pub fn ensure_clean_worktree<R: Repository + ?Sized>(repo: &R) -> Result<()> {
    let changes = repo.worktree_changes()?;
    if changes.is_empty() {
        return Ok(());
    }

    ui::display_warning(&changes.join("\n"));
    Err(BumpError::precondition(
        "There are changes that need to be committed",
    ))
}
