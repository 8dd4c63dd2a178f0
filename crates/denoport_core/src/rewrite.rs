use log::trace;
use path_clean::clean;
use std::path::Path;

use crate::{
    constants::{INDEX_FILE, SOURCE_EXT},
    paths::join,
    probe::file_exists,
    types::ChangePackage,
};

/// Outcome of one specifier-rewrite decision.
///
/// `Line` replaces the whole statement (override rules carry a full
/// replacement line); `Specifier` replaces only the captured specifier span;
/// `Keep` leaves the statement untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rewrite {
    Line(String),
    Specifier(String),
    Keep,
}

/// Scans the change rules in order and returns the first configured
/// replacement line, matching either the bare specifier or the full
/// statement text byte-for-byte. First match wins; no partial matching.
pub fn find_replacement<'a>(
    line: &str,
    target: &str,
    change_package: &'a [ChangePackage],
) -> Option<&'a str> {
    if change_package.is_empty() || line == target {
        return None;
    }

    change_package
        .iter()
        .find(|change| {
            if change.by_package_name { change.package == target } else { change.package == line }
        })
        .map(|change| change.replace.as_str())
}

/// Decides how the specifier `target` inside the statement `line` of the
/// file at `source_path` should be rewritten.
///
/// Change rules win outright. Otherwise the specifier is resolved against
/// the importing file's directory: an existing `<target>.ts` file appends
/// the extension (unless the specifier already carries it), an existing
/// `<target>/index.ts` appends the index file, and anything else is assumed
/// to resolve as-is (external packages, already-explicit paths).
pub fn rewrite_specifier(
    source_path: &str,
    line: &str,
    target: &str,
    change_package: &[ChangePackage],
) -> Rewrite {
    if let Some(replacement) = find_replacement(line, target, change_package) {
        trace!("Change rule matched for '{}' in {}", target, source_path);
        return Rewrite::Line(replacement.to_string());
    }

    let source_dir = Path::new(source_path).parent().map(Path::to_string_lossy).unwrap_or_default();
    let candidate_base = join(&[&*source_dir, target]);
    let candidate_file = clean(format!("{}{}", candidate_base, SOURCE_EXT));
    let candidate_index = clean(join(&[&candidate_base, INDEX_FILE]));

    if file_exists(&candidate_file.to_string_lossy()) && !target.ends_with(SOURCE_EXT) {
        trace!("Resolved '{}' to file form from {}", target, source_path);
        return Rewrite::Specifier(format!("{}{}", target, SOURCE_EXT));
    }

    if file_exists(&candidate_index.to_string_lossy()) {
        trace!("Resolved '{}' to directory index form from {}", target, source_path);
        return Rewrite::Specifier(join(&[target, INDEX_FILE]));
    }

    trace!("No rewrite for '{}' from {}", target, source_path);
    Rewrite::Keep
}
