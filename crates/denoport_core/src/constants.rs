/// Suffix identifying source files eligible for transformation.
pub const SOURCE_EXT: &str = ".ts";

/// File name probed when a specifier points at a directory.
pub const INDEX_FILE: &str = "index.ts";

/// Name of the generated re-export stub at the output root.
pub const MOD_STUB: &str = "mod.ts";

/// Contents of the generated re-export stub.
pub const MOD_STUB_CONTENTS: &str = "export * from \"./index.ts\";\n";

/// Matches import/export statements terminated by a quoted module specifier.
/// Statements may span multiple lines; the specifier is captured verbatim.
pub const STATEMENT_PATTERN: &str = r#"(?ms)^(?:import|export).*?from\s*['"]([^'"]*)['"];$"#;
