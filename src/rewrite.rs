//! File rewriting.
//!
//! Stamps the new version into project files with targeted regex
//! substitution. Files are read in full, substituted in memory, and written
//! back as a whole-file overwrite; they are small.

use crate::error::{BumpError, Result};
use regex::Regex;
use std::fs;
use std::path::Path;

fn field_regex(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| BumpError::config(format!("Invalid rewrite pattern '{}': {}", pattern, e)))
}

/// Replace every match of `pattern` with `line`, or append `line` as a new
/// line when the field is absent.
fn replace_or_append(content: &str, pattern: &str, line: &str) -> Result<String> {
    let re = field_regex(pattern)?;

    if re.is_match(content) {
        Ok(re.replace_all(content, line).into_owned())
    } else {
        let mut updated = content.to_string();
        updated.push_str(line);
        updated.push('\n');
        Ok(updated)
    }
}

/// Rewrite the settings-like file with the new version tag and reference.
///
/// Finds or appends `VERSION = "<tag>"` and `VERSION_REFERENCE = "<hash>"`
/// lines. A missing file makes the rewrite a no-op; returns whether the
/// file was written.
pub fn update_settings_file(path: &Path, version_tag: &str, reference: &str) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }

    let content = fs::read_to_string(path)?;

    let content = replace_or_append(
        &content,
        r#"VERSION\s*=\s*"(.*?)""#,
        &format!("VERSION = \"{}\"", version_tag),
    )?;
    let content = replace_or_append(
        &content,
        r#"VERSION_REFERENCE\s*=\s*"(.*?)""#,
        &format!("VERSION_REFERENCE = \"{}\"", reference),
    )?;

    fs::write(path, content)?;
    Ok(true)
}

/// Rewrite the packaging-metadata file's `version` field.
///
/// The value is the version without its leading 'v' (packaging convention).
/// The field is never appended when missing, and a missing file is silently
/// skipped; returns whether the file was written.
pub fn update_packaging_file(path: &Path, version: &str) -> Result<bool> {
    if !path.exists() {
        return Ok(false);
    }

    let content = fs::read_to_string(path)?;
    let re = field_regex(r#"version\s*=\s*".*?""#)?;

    if !re.is_match(&content) {
        return Ok(false);
    }

    let updated = re
        .replace_all(&content, format!("version = \"{}\"", version).as_str())
        .into_owned();
    fs::write(path, updated)?;
    Ok(true)
}
