// Instrumentation runtime header lookup
//
// The generated code references wrapper templates declared in
// templates/prelude.hpp. That header is a build-time dependency of the
// OUTPUT program, not of this engine; the engine only needs to locate a
// copy so the emitted file can include it. Lookup order: explicit path,
// ./templates/prelude.hpp, then the embedded copy.

use std::io;
use std::path::{Path, PathBuf};

/// The header shipped with the tool, embedded as a fallback.
pub const DEFAULT_PRELUDE: &str = include_str!("../../../templates/prelude.hpp");

pub const PRELUDE_FILE_NAME: &str = "prelude.hpp";

/// Where the runtime header will come from for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreludeSource {
    /// An existing header file on disk.
    File(PathBuf),
    /// No file found; the embedded copy must be materialized.
    Builtin,
}

/// Resolve the runtime header. An explicit path that does not exist falls
/// through the chain (the caller may want to warn about it).
pub fn locate_prelude(explicit: Option<&Path>) -> PreludeSource {
    if let Some(path) = explicit {
        if path.exists() {
            return PreludeSource::File(path.to_path_buf());
        }
    }

    let local = Path::new("templates").join(PRELUDE_FILE_NAME);
    if local.exists() {
        return PreludeSource::File(local);
    }

    PreludeSource::Builtin
}

/// Write the embedded header into a directory, returning its path.
pub fn materialize_builtin(dir: &Path) -> io::Result<PathBuf> {
    let path = dir.join(PRELUDE_FILE_NAME);
    std::fs::write(&path, DEFAULT_PRELUDE)?;
    Ok(path)
}
