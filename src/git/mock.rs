use crate::error::{BumpError, Result};
use crate::git::{ConfigScope, Identity, Repository, TagRecord};
use git2::Oid;
use std::sync::Mutex;

/// Mock repository for testing without actual git operations.
///
/// Mutations (tag creation, commits, pushes, identity writes) are recorded
/// so tests can assert what happened - and, just as importantly, that
/// nothing happened when a guard failed.
pub struct MockRepository {
    tags: Vec<TagRecord>,
    head_short: String,
    local_identity: Mutex<Option<Identity>>,
    global_identity: Option<Identity>,
    changes: Vec<String>,
    created_tags: Mutex<Vec<(String, String)>>,
    commit_messages: Mutex<Vec<String>>,
    pushed_branches: Mutex<Vec<String>>,
    pushed_tag_remotes: Mutex<Vec<String>>,
}

impl MockRepository {
    /// Create a new empty mock repository with a clean working tree
    pub fn new() -> Self {
        MockRepository {
            tags: Vec::new(),
            head_short: "0123abcd".to_string(),
            local_identity: Mutex::new(None),
            global_identity: None,
            changes: Vec::new(),
            created_tags: Mutex::new(Vec::new()),
            commit_messages: Mutex::new(Vec::new()),
            pushed_branches: Mutex::new(Vec::new()),
            pushed_tag_remotes: Mutex::new(Vec::new()),
        }
    }

    /// Add an existing tag record
    pub fn add_tag(&mut self, name: impl Into<String>, target: Oid, committed_at: i64) {
        self.tags.push(TagRecord {
            name: name.into(),
            target,
            committed_at,
        });
    }

    /// Set the short hash reported for HEAD
    pub fn set_head_short(&mut self, hash: impl Into<String>) {
        self.head_short = hash.into();
    }

    /// Seed the repository-local identity
    pub fn set_local_identity(&mut self, identity: Identity) {
        *self.local_identity.lock().unwrap() = Some(identity);
    }

    /// Seed the global identity
    pub fn set_global_identity(&mut self, identity: Identity) {
        self.global_identity = Some(identity);
    }

    /// Mark the working tree dirty with the given status line
    pub fn add_worktree_change(&mut self, line: impl Into<String>) {
        self.changes.push(line.into());
    }

    /// Tags created during the run, as (name, message) pairs
    pub fn created_tags(&self) -> Vec<(String, String)> {
        self.created_tags.lock().unwrap().clone()
    }

    /// Commit messages recorded during the run
    pub fn commit_messages(&self) -> Vec<String> {
        self.commit_messages.lock().unwrap().clone()
    }

    /// Remotes the current branch was pushed to
    pub fn pushed_branches(&self) -> Vec<String> {
        self.pushed_branches.lock().unwrap().clone()
    }

    /// Remotes tags were pushed to
    pub fn pushed_tag_remotes(&self) -> Vec<String> {
        self.pushed_tag_remotes.lock().unwrap().clone()
    }

    /// The identity currently stored in local config
    pub fn local_identity(&self) -> Option<Identity> {
        self.local_identity.lock().unwrap().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn list_tags(&self) -> Result<Vec<TagRecord>> {
        Ok(self.tags.clone())
    }

    fn head_short_hash(&self) -> Result<String> {
        Ok(self.head_short.clone())
    }

    fn read_identity(&self, scope: ConfigScope) -> Result<Option<Identity>> {
        match scope {
            ConfigScope::Local => Ok(self.local_identity.lock().unwrap().clone()),
            ConfigScope::Global => Ok(self.global_identity.clone()),
        }
    }

    fn write_local_identity(&self, identity: &Identity) -> Result<()> {
        *self.local_identity.lock().unwrap() = Some(identity.clone());
        Ok(())
    }

    fn worktree_changes(&self) -> Result<Vec<String>> {
        Ok(self.changes.clone())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        let mut created = self.created_tags.lock().unwrap();
        let collision = self.tags.iter().any(|t| t.name == name)
            || created.iter().any(|(existing, _)| existing == name);
        if collision {
            return Err(BumpError::tag(format!("Tag '{}' already exists", name)));
        }
        created.push((name.to_string(), message.to_string()));
        Ok(())
    }

    fn commit_all(&self, message: &str) -> Result<()> {
        self.commit_messages.lock().unwrap().push(message.to_string());
        Ok(())
    }

    fn push_branch(&self, remote: &str) -> Result<()> {
        self.pushed_branches.lock().unwrap().push(remote.to_string());
        Ok(())
    }

    fn push_tags(&self, remote: &str) -> Result<()> {
        self.pushed_tag_remotes
            .lock()
            .unwrap()
            .push(remote.to_string());
        Ok(())
    }
}
