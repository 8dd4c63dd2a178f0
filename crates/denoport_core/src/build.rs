use anyhow::{Context, Result};
use log::{debug, info, trace};
use regex::{Captures, Regex};
use std::{collections::HashSet, fs, path::Path};

use crate::{
    constants::{MOD_STUB, MOD_STUB_CONTENTS, SOURCE_EXT, STATEMENT_PATTERN},
    copy::copy_file_list,
    paths::{ProjectPaths, join},
    rewrite::{Rewrite, rewrite_specifier},
    skip::{skip_directory_set, skip_extension_set, skip_file_set},
    types::{BuildOptions, ChangePackage},
};

/// Transforms the source tree under `project_root` according to `options`.
///
/// Walks `rootDir/root` recursively, rewrites every import/export specifier
/// of every non-skipped source file into the output tree, writes the `mod.ts`
/// re-export stub at the output root, then copies the configured auxiliary
/// files. Any read/write/mkdir failure aborts the build; a failed build may
/// leave a partially populated output tree.
pub fn build(project_root: &Path, options: &BuildOptions) -> Result<()> {
    info!("Starting build from {}", project_root.display());

    let paths = ProjectPaths::derive(project_root, &options.root_dir, &options.out_dir);
    debug!("Source root: {}", paths.source_root);
    debug!("Output root: {}", paths.output_root);

    // Skip sets are a snapshot taken before the walk; files written during
    // the build never feed back into them.
    let mut skip = skip_directory_set(&paths, &options.skip_directory)?;
    skip.extend(skip_file_set(&paths, &options.skip_file));
    skip.extend(skip_extension_set(&paths, &options.skip_extension)?);
    debug!("Skip set holds {} paths", skip.len());

    let pattern = Regex::new(STATEMENT_PATTERN)
        .context("Error compiling the import/export statement pattern")?;

    walk_dir(&paths, &options.root, &skip, &options.change_package, &pattern)?;

    fs::create_dir_all(&paths.output_root)
        .with_context(|| format!("Error creating output root {}", paths.output_root))?;
    let stub_path = join(&[&paths.output_root, MOD_STUB]);
    fs::write(&stub_path, MOD_STUB_CONTENTS)
        .with_context(|| format!("Error writing re-export stub {}", stub_path))?;
    debug!("Wrote re-export stub {}", stub_path);

    copy_file_list(&paths.project_root, &paths.output_root, &options.copy_files)?;

    info!("Build complete");
    Ok(())
}

fn walk_dir(
    paths: &ProjectPaths,
    rel: &str,
    skip: &HashSet<String>,
    change_package: &[ChangePackage],
    pattern: &Regex,
) -> Result<()> {
    let dir = join(&[&paths.source_root, rel]);
    trace!("Walking {}", dir);
    let entries =
        fs::read_dir(&dir).with_context(|| format!("Error reading source directory {}", dir))?;

    for entry in entries {
        let entry = entry.with_context(|| format!("Error reading source directory {}", dir))?;
        let file_type = entry
            .file_type()
            .with_context(|| format!("Error reading entry type under {}", dir))?;
        let name = entry.file_name().to_string_lossy().into_owned();

        if file_type.is_dir() {
            walk_dir(paths, &join(&[rel, &name]), skip, change_package, pattern)?;
        } else if file_type.is_file() && name.ends_with(SOURCE_EXT) {
            let source_path = join(&[&paths.source_root, rel, &name]);
            let dest_path = join(&[&paths.output_root, rel, &name]);

            if skip.contains(&source_path) {
                debug!("Skipping {}", source_path);
                continue;
            }

            let source = fs::read_to_string(&source_path)
                .with_context(|| format!("Error reading {}", source_path))?;
            let output = transform_source(&source, &source_path, change_package, pattern);

            if let Some(parent) = Path::new(&dest_path).parent() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Error creating output directory {}", parent.display())
                })?;
            }
            fs::write(&dest_path, output)
                .with_context(|| format!("Error writing {}", dest_path))?;
            trace!("Wrote {}", dest_path);
        }
    }

    Ok(())
}

/// Rewrites every matched import/export statement in `source`. Specifier
/// replacements are spliced at the capture's exact byte span so a specifier
/// that also appears elsewhere in the statement is never touched.
fn transform_source(
    source: &str,
    source_path: &str,
    change_package: &[ChangePackage],
    pattern: &Regex,
) -> String {
    pattern
        .replace_all(source, |caps: &Captures| {
            let statement = &caps[0];
            let Some(spec) = caps.get(1) else {
                return statement.to_string();
            };

            match rewrite_specifier(source_path, statement, spec.as_str(), change_package) {
                Rewrite::Line(line) => line,
                Rewrite::Specifier(new_spec) => {
                    let offset = caps.get(0).map_or(0, |m| m.start());
                    let start = spec.start() - offset;
                    let end = spec.end() - offset;
                    let mut out = String::with_capacity(statement.len() + new_spec.len());
                    out.push_str(&statement[..start]);
                    out.push_str(&new_spec);
                    out.push_str(&statement[end..]);
                    out
                }
                Rewrite::Keep => statement.to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CopyFile, SkipDirectory, SkipExtension, SkipFile};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, path: &str, content: &str) -> PathBuf {
        let file_path = dir.join(path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    fn options() -> BuildOptions {
        BuildOptions {
            root: String::new(),
            root_dir: "src".to_string(),
            out_dir: "deno".to_string(),
            change_package: Vec::new(),
            skip_directory: Vec::new(),
            skip_file: Vec::new(),
            skip_extension: Vec::new(),
            copy_files: Vec::new(),
        }
    }

    #[test]
    fn test_build_rewrites_relative_imports() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/index.ts", "import { b } from './b';\n\nexport const a = b;\n");
        create_test_file(root, "src/b.ts", "export const b = 1;\n");

        build(root, &options()).unwrap();

        let out = fs::read_to_string(root.join("deno/index.ts")).unwrap();
        assert_eq!(out, "import { b } from './b.ts';\n\nexport const a = b;\n");
        let b = fs::read_to_string(root.join("deno/b.ts")).unwrap();
        assert_eq!(b, "export const b = 1;\n");
    }

    #[test]
    fn test_build_rewrites_directory_imports() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/index.ts", "export * from './types';\n");
        create_test_file(root, "src/types/index.ts", "export type T = string;\n");

        build(root, &options()).unwrap();

        let out = fs::read_to_string(root.join("deno/index.ts")).unwrap();
        assert_eq!(out, "export * from './types/index.ts';\n");
    }

    #[test]
    fn test_build_rewrites_multiline_statements() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(
            root,
            "src/index.ts",
            "import {\n  one,\n  two,\n} from './util';\n\nexport const x = one + two;\n",
        );
        create_test_file(root, "src/util.ts", "export const one = 1;\nexport const two = 2;\n");

        build(root, &options()).unwrap();

        let out = fs::read_to_string(root.join("deno/index.ts")).unwrap();
        assert_eq!(
            out,
            "import {\n  one,\n  two,\n} from './util.ts';\n\nexport const x = one + two;\n"
        );
    }

    #[test]
    fn test_build_applies_change_rules() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/index.ts", "import { join } from 'node:path';\n");

        let mut opts = options();
        opts.change_package.push(ChangePackage {
            by_package_name: true,
            package: "node:path".to_string(),
            replace: "import { join } from 'https://deno.land/std/path/mod.ts';".to_string(),
        });
        build(root, &opts).unwrap();

        let out = fs::read_to_string(root.join("deno/index.ts")).unwrap();
        assert_eq!(out, "import { join } from 'https://deno.land/std/path/mod.ts';\n");
    }

    #[test]
    fn test_build_writes_mod_stub() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/index.ts", "export const a = 1;\n");

        build(root, &options()).unwrap();

        let stub = fs::read_to_string(root.join("deno/mod.ts")).unwrap();
        assert_eq!(stub, "export * from \"./index.ts\";\n");
    }

    #[test]
    fn test_build_skips_extension_matches() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/index.ts", "export const a = 1;\n");
        create_test_file(root, "src/a.mock.ts", "export const mocked = 1;\n");

        let mut opts = options();
        opts.skip_extension.push(SkipExtension { extension: ".mock.ts".to_string() });
        build(root, &opts).unwrap();

        assert!(root.join("deno/index.ts").exists());
        assert!(!root.join("deno/a.mock.ts").exists());
    }

    #[test]
    fn test_build_skips_directory_and_file_rules() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/index.ts", "export const a = 1;\n");
        create_test_file(root, "src/__TEST__/a.test.ts", "export const t = 1;\n");
        create_test_file(root, "src/legacy.ts", "export const old = 1;\n");

        let mut opts = options();
        opts.skip_directory.push(SkipDirectory { dir: "__TEST__".to_string() });
        opts.skip_file.push(SkipFile { dir: String::new(), file: "legacy.ts".to_string() });
        build(root, &opts).unwrap();

        assert!(root.join("deno/index.ts").exists());
        assert!(!root.join("deno/__TEST__/a.test.ts").exists());
        assert!(!root.join("deno/legacy.ts").exists());
    }

    #[test]
    fn test_build_ignores_non_source_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/index.ts", "export const a = 1;\n");
        create_test_file(root, "src/notes.md", "# notes\n");

        build(root, &options()).unwrap();

        assert!(root.join("deno/index.ts").exists());
        assert!(!root.join("deno/notes.md").exists());
    }

    #[test]
    fn test_build_copies_auxiliary_files() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/index.ts", "export const a = 1;\n");
        create_test_file(root, "README.md", "# readme\n");

        let mut opts = options();
        opts.copy_files
            .push(CopyFile { from: "README.md".to_string(), to: "README.md".to_string() });
        build(root, &opts).unwrap();

        assert_eq!(fs::read_to_string(root.join("deno/README.md")).unwrap(), "# readme\n");
    }

    #[test]
    fn test_build_fails_on_missing_copy_source() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/index.ts", "export const a = 1;\n");

        let mut opts = options();
        opts.copy_files
            .push(CopyFile { from: "does-not-exist.md".to_string(), to: "copy.md".to_string() });
        let err = build(root, &opts).unwrap_err();
        assert!(err.to_string().contains("does-not-exist.md"));

        // The walk and stub still completed before the copy phase failed.
        assert!(root.join("deno/mod.ts").exists());
    }

    #[test]
    fn test_build_starts_from_configured_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/sub/index.ts", "export const a = 1;\n");
        create_test_file(root, "src/outside.ts", "export const b = 2;\n");

        let mut opts = options();
        opts.root = "sub".to_string();
        build(root, &opts).unwrap();

        assert!(root.join("deno/sub/index.ts").exists());
        assert!(!root.join("deno/outside.ts").exists());
    }

    #[test]
    fn test_build_fails_on_missing_source_root() {
        let temp_dir = TempDir::new().unwrap();
        let err = build(temp_dir.path(), &options()).unwrap_err();
        assert!(err.to_string().contains("Error reading source directory"));
    }

    #[test]
    fn test_transform_source_leaves_externals_alone() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        let source_path = create_test_file(root, "src/index.ts", "");
        let pattern = Regex::new(STATEMENT_PATTERN).unwrap();

        let source = "import { x } from 'some-package';\nconst y = x;\n";
        let out = transform_source(source, &source_path.to_string_lossy(), &[], &pattern);
        assert_eq!(out, source);
    }

    #[test]
    fn test_transform_source_replaces_exact_span() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        create_test_file(root, "src/b.ts", "export const b = 1;\n");
        let source_path = create_test_file(root, "src/index.ts", "");
        let pattern = Regex::new(STATEMENT_PATTERN).unwrap();

        // The specifier text also appears in the imported binding name; only
        // the quoted span may change.
        let source = "import { b } from './b';\n";
        let out = transform_source(source, &source_path.to_string_lossy(), &[], &pattern);
        assert_eq!(out, "import { b } from './b.ts';\n");
    }
}
