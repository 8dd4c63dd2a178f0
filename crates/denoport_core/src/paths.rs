use std::path::Path;

/// Joins path segments with `/`, collapsing runs of separators and stripping
/// a single trailing slash. Does not resolve `.` or `..` segments; empty
/// segments are absorbed by the collapse.
pub fn join(parts: &[&str]) -> String {
    let mut out = String::with_capacity(parts.iter().map(|p| p.len() + 1).sum());
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            out.push('/');
        }
        out.push_str(part);
    }

    let mut collapsed = String::with_capacity(out.len());
    let mut prev_sep = false;
    for c in out.chars() {
        if c == '/' {
            if !prev_sep {
                collapsed.push(c);
            }
            prev_sep = true;
        } else {
            collapsed.push(c);
            prev_sep = false;
        }
    }

    if collapsed.ends_with('/') {
        collapsed.pop();
    }
    collapsed
}

/// Absolute roots for one build invocation, as forward-slash strings.
///
/// The project root is passed in explicitly rather than read from the
/// process working directory, so the core stays independently testable.
#[derive(Debug, Clone)]
pub struct ProjectPaths {
    pub project_root: String,
    pub source_root: String,
    pub output_root: String,
}

impl ProjectPaths {
    /// Derives the source and output roots from the project root plus the
    /// configured `rootDir`/`outDir` subpaths.
    pub fn derive(project_root: &Path, source_dir: &str, out_dir: &str) -> Self {
        let project_root = project_root.to_string_lossy().into_owned();
        let source_root = join(&[&project_root, source_dir]);
        let output_root = join(&[&project_root, out_dir]);
        Self { project_root, source_root, output_root }
    }
}
