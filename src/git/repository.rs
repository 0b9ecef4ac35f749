use crate::error::{BumpError, Result};
use crate::git::{ConfigScope, Identity, TagRecord};
use git2::Repository as Git2Repo;
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open the git repository rooted at `path`.
    ///
    /// Unlike discovery, this requires the repository to live at the given
    /// root; a missing repository is a precondition failure.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::open(path)
            .map_err(|e| BumpError::precondition(format!("No git repository found: {}", e)))?;

        Ok(Git2Repository { repo })
    }

    /// Create from an existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    fn lookup_config(config: &git2::Config, key: &str) -> Result<Option<String>> {
        match config.get_string(key) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn push(&self, remote_name: &str, refspecs: &[&str]) -> Result<()> {
        let mut remote = self.repo.find_remote(remote_name).map_err(|_| {
            BumpError::remote(format!("No remote named '{}' found", remote_name))
        })?;

        let mut push_options = git2::PushOptions::new();

        let mut callbacks = git2::RemoteCallbacks::new();
        callbacks.credentials(|_url, username_from_url, allowed_types| {
            // SSH key authentication
            if allowed_types.contains(git2::CredentialType::SSH_KEY) {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                let key_paths = vec![
                    format!("{}/.ssh/id_ed25519", home),
                    format!("{}/.ssh/id_rsa", home),
                    format!("{}/.ssh/id_ecdsa", home),
                ];

                for key_path in key_paths {
                    let path = std::path::Path::new(&key_path);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(
                            username_from_url.unwrap_or("git"),
                            None,
                            path,
                            None,
                        ) {
                            return Ok(cred);
                        }
                    }
                }

                // Try SSH agent as fallback
                if let Ok(cred) =
                    git2::Cred::ssh_key_from_agent(username_from_url.unwrap_or("git"))
                {
                    return Ok(cred);
                }
            }

            git2::Cred::default()
        });

        // Catch per-reference rejections during push
        callbacks.push_update_reference(|refname, status| {
            if let Some(status) = status {
                Err(git2::Error::from_str(&format!(
                    "Push failed for {}: {}",
                    refname, status
                )))
            } else {
                Ok(())
            }
        });

        push_options.remote_callbacks(callbacks);

        match remote.push(refspecs, Some(&mut push_options)) {
            Ok(_) => Ok(()),
            Err(e) if e.class() == git2::ErrorClass::Net => {
                Err(BumpError::remote(format!("Network error during push: {}", e)))
            }
            Err(e) => Err(BumpError::remote(format!(
                "Failed to push to '{}': {}",
                remote_name, e
            ))),
        }
    }
}

impl super::Repository for Git2Repository {
    fn list_tags(&self) -> Result<Vec<TagRecord>> {
        let names = self.repo.tag_names(None)?;
        let mut records = Vec::new();

        for name in names.iter().flatten() {
            let reference = self.repo.find_reference(&format!("refs/tags/{}", name))?;
            // Peels through annotated tag objects to the underlying commit
            let commit = reference.peel_to_commit().map_err(|e| {
                BumpError::tag(format!("Cannot resolve tag '{}' to a commit: {}", name, e))
            })?;

            records.push(TagRecord {
                name: name.to_string(),
                target: commit.id(),
                committed_at: commit.time().seconds(),
            });
        }

        Ok(records)
    }

    fn head_short_hash(&self) -> Result<String> {
        let commit = self.repo.head()?.peel_to_commit()?;
        let full = commit.id().to_string();
        Ok(full[..8].to_string())
    }

    fn read_identity(&self, scope: ConfigScope) -> Result<Option<Identity>> {
        let config = match scope {
            ConfigScope::Local => self.repo.config()?.open_level(git2::ConfigLevel::Local)?,
            ConfigScope::Global => git2::Config::open_default()?,
        };

        let name = Self::lookup_config(&config, "user.name")?;
        let email = Self::lookup_config(&config, "user.email")?;

        match (name, email) {
            (Some(name), Some(email)) => Ok(Some(Identity { name, email })),
            _ => Ok(None),
        }
    }

    fn write_local_identity(&self, identity: &Identity) -> Result<()> {
        let mut config = self.repo.config()?.open_level(git2::ConfigLevel::Local)?;
        config.set_str("user.name", &identity.name)?;
        config.set_str("user.email", &identity.email)?;
        Ok(())
    }

    fn worktree_changes(&self) -> Result<Vec<String>> {
        let mut options = git2::StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true);

        let statuses = self.repo.statuses(Some(&mut options))?;
        let mut changes = Vec::new();

        for entry in statuses.iter() {
            let path = entry.path().unwrap_or("(non-utf8 path)");
            changes.push(format!("{:>10}: {}", status_label(entry.status()), path));
        }

        Ok(changes)
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        let head = self.repo.head()?.peel_to_commit()?;
        let tagger = self.repo.signature()?;

        self.repo
            .tag(name, head.as_object(), &tagger, message, false)
            .map_err(|e| BumpError::tag(format!("Cannot create tag '{}': {}", name, e)))?;

        Ok(())
    }

    fn commit_all(&self, message: &str) -> Result<()> {
        let mut index = self.repo.index()?;
        index.add_all(["*"], git2::IndexAddOption::DEFAULT, None)?;
        // add_all does not drop entries for files deleted from the worktree
        index.update_all(["*"], None)?;
        index.write()?;

        let tree_id = index.write_tree()?;
        let tree = self.repo.find_tree(tree_id)?;
        let signature = self.repo.signature()?;
        let parent = self.repo.head()?.peel_to_commit()?;

        self.repo.commit(
            Some("HEAD"),
            &signature,
            &signature,
            message,
            &tree,
            &[&parent],
        )?;

        Ok(())
    }

    fn push_branch(&self, remote: &str) -> Result<()> {
        let head = self.repo.head()?;
        let branch = head
            .shorthand()
            .ok_or_else(|| BumpError::remote("HEAD is not on a branch"))?;

        let refspec = format!("refs/heads/{0}:refs/heads/{0}", branch);
        self.push(remote, &[refspec.as_str()])
    }

    fn push_tags(&self, remote: &str) -> Result<()> {
        let names = self.repo.tag_names(None)?;
        let refspecs: Vec<String> = names
            .iter()
            .flatten()
            .map(|tag| format!("refs/tags/{0}:refs/tags/{0}", tag))
            .collect();

        if refspecs.is_empty() {
            return Ok(());
        }

        let refspec_strs: Vec<&str> = refspecs.iter().map(|s| s.as_str()).collect();
        self.push(remote, &refspec_strs)
    }
}

fn status_label(status: git2::Status) -> &'static str {
    if status.is_wt_new() {
        "untracked"
    } else if status.is_index_new() {
        "new file"
    } else if status.is_wt_modified() || status.is_index_modified() {
        "modified"
    } else if status.is_wt_deleted() || status.is_index_deleted() {
        "deleted"
    } else if status.is_wt_renamed() || status.is_index_renamed() {
        "renamed"
    } else if status.is_conflicted() {
        "conflicted"
    } else {
        "changed"
    }
}

// SAFETY: Git2Repository wraps git2::Repository which is Send + Sync.
// git2 library is thread-safe for read operations via libgit2's thread-safe design.
unsafe impl Sync for Git2Repository {}
