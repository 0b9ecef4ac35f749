//! Tag history selection.
//!
//! The current release baseline is the tag whose underlying commit has the
//! latest commit timestamp - not the lexically greatest name and not the
//! most recently created tag.

use crate::error::Result;
use crate::git::TagRecord;
use crate::version::Version;
use git2::Oid;

/// The release baseline computed from tag history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Baseline {
    pub version: Version,
    /// Commit the baseline tag points at; `None` when no tags exist.
    pub reference: Option<Oid>,
}

impl Baseline {
    /// Baseline for a repository with no tags: 0.0.0, no reference commit.
    pub fn initial() -> Self {
        Baseline {
            version: Version::new(0, 0, 0),
            reference: None,
        }
    }
}

/// Select the current baseline from the repository's tag records.
///
/// A malformed latest tag (wrong arity, non-numeric components) is a fatal
/// error; it is never coerced or skipped in favor of an older tag.
pub fn latest_baseline(tags: &[TagRecord]) -> Result<Baseline> {
    let latest = match tags.iter().max_by_key(|tag| tag.committed_at) {
        Some(tag) => tag,
        None => return Ok(Baseline::initial()),
    };

    Ok(Baseline {
        version: Version::parse(&latest.name)?,
        reference: Some(latest.target),
    })
}
