//! Core build logic for denoport.
//!
//! This crate transforms a TypeScript source tree written against Node's
//! module resolution into a tree that satisfies Deno's module rules:
//! - Rewriting import/export specifiers to explicit file paths
//! - Expanding user-configured skip rules into exclusion sets
//! - Writing a `mod.ts` re-export stub at the output root
//! - Copying auxiliary files into the output tree

mod build;
mod constants;
mod copy;
mod paths;
mod probe;
mod rewrite;
mod skip;
mod types;

// Re-export public API
pub use build::build;
pub use constants::{INDEX_FILE, MOD_STUB, MOD_STUB_CONTENTS, SOURCE_EXT};
pub use copy::copy_file_list;
pub use paths::{ProjectPaths, join};
pub use probe::file_exists;
pub use rewrite::{Rewrite, find_replacement, rewrite_specifier};
pub use skip::{skip_directory_set, skip_extension_set, skip_file_set};
pub use types::{BuildOptions, ChangePackage, CopyFile, SkipDirectory, SkipExtension, SkipFile};
