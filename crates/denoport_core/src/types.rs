use serde::Deserialize;

/// An exact-match substitution that bypasses filesystem resolution for one
/// import/export statement.
///
/// When `by_package_name` is set the rule matches the bare specifier,
/// otherwise it matches the full statement text. `replace` becomes the whole
/// statement verbatim.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePackage {
    #[serde(default)]
    pub by_package_name: bool,
    pub package: String,
    pub replace: String,
}

/// A directory whose current entries (non-recursive) are excluded from the
/// build.
#[derive(Debug, Clone, Deserialize)]
pub struct SkipDirectory {
    pub dir: String,
}

/// One explicit file excluded from the build.
#[derive(Debug, Clone, Deserialize)]
pub struct SkipFile {
    pub dir: String,
    pub file: String,
}

/// A file-name suffix; every matching file under the source root is excluded.
#[derive(Debug, Clone, Deserialize)]
pub struct SkipExtension {
    pub extension: String,
}

/// A file copied into the output tree after the walk. `from` is relative to
/// the project root, `to` to the output root.
#[derive(Debug, Clone, Deserialize)]
pub struct CopyFile {
    pub from: String,
    pub to: String,
}

/// Everything one build invocation needs. Read-only once constructed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOptions {
    /// Subpath under the source root to start walking from.
    #[serde(default)]
    pub root: String,

    /// Source root directory, relative to the project root.
    pub root_dir: String,

    /// Output root directory, relative to the project root.
    pub out_dir: String,

    #[serde(default)]
    pub change_package: Vec<ChangePackage>,

    #[serde(default)]
    pub skip_directory: Vec<SkipDirectory>,

    #[serde(default)]
    pub skip_file: Vec<SkipFile>,

    #[serde(default)]
    pub skip_extension: Vec<SkipExtension>,

    #[serde(default)]
    pub copy_files: Vec<CopyFile>,
}
