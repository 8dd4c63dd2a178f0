use anyhow::{Context, Result};
use ignore::WalkBuilder;
use log::{debug, trace};
use std::{collections::HashSet, fs};

use crate::{
    paths::{ProjectPaths, join},
    types::{SkipDirectory, SkipExtension, SkipFile},
};

/// Snapshots the current entries of each configured skip directory
/// (non-recursive) into a set of absolute paths.
///
/// An unreadable directory is a configuration error and fails the build.
pub fn skip_directory_set(
    paths: &ProjectPaths,
    directories: &[SkipDirectory],
) -> Result<HashSet<String>> {
    let mut skipped = HashSet::new();

    for dir in directories {
        let dir_path = join(&[&paths.source_root, &dir.dir]);
        let entries = fs::read_dir(&dir_path)
            .with_context(|| format!("Error reading skip directory {}", dir.dir))?;
        for entry in entries {
            let entry =
                entry.with_context(|| format!("Error reading skip directory {}", dir.dir))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            trace!("Skip directory entry: {}/{}", dir_path, name);
            skipped.insert(join(&[&paths.source_root, &dir.dir, &name]));
        }
    }

    debug!("Skip directory rules expanded to {} paths", skipped.len());
    Ok(skipped)
}

/// Expands explicit-file skip rules into absolute paths. No existence check:
/// a rule naming a nonexistent file simply never matches during the walk.
pub fn skip_file_set(paths: &ProjectPaths, files: &[SkipFile]) -> HashSet<String> {
    let skipped: HashSet<String> = files
        .iter()
        .map(|file| join(&[&paths.source_root, &file.dir, &file.file]))
        .collect();
    debug!("Skip file rules expanded to {} paths", skipped.len());
    skipped
}

/// Scans the whole source root once and collects every file whose name ends
/// with any configured suffix. The scan sees hidden files and disregards
/// ignore files so exclusion is purely suffix-driven.
pub fn skip_extension_set(
    paths: &ProjectPaths,
    extensions: &[SkipExtension],
) -> Result<HashSet<String>> {
    let mut skipped = HashSet::new();
    if extensions.is_empty() {
        return Ok(skipped);
    }

    let walker = WalkBuilder::new(&paths.source_root)
        .hidden(false)
        .ignore(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .build();

    for res in walker {
        let entry = res.with_context(|| {
            format!("Error scanning source root {} for skip extensions", paths.source_root)
        })?;
        if !entry.path().is_file() {
            continue;
        }
        let Some(name) = entry.path().file_name().map(|n| n.to_string_lossy().into_owned()) else {
            continue;
        };
        if extensions.iter().any(|ext| name.ends_with(&ext.extension)) {
            trace!("Skip extension match: {}", entry.path().display());
            skipped.insert(entry.path().to_string_lossy().into_owned());
        }
    }

    debug!("Skip extension rules expanded to {} paths", skipped.len());
    Ok(skipped)
}
