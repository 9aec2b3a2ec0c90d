use std::path::PathBuf;
use thiserror::Error;

/// Failure taxonomy of the resolution pipeline.
///
/// Every variant here returns to the caller as a descriptive message; none of
/// them aborts the process. The only non-terminal member is
/// [`ResolveError::ArchiveUnreadable`], which the jar scan logs and skips.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("build tool is not configured (pass --build-tool or set CLASS_SOURCE_BUILD_TOOL)")]
    BuildToolUndefined,

    #[error("unsupported build tool {0:?} (expected something matching \"mvn\" or \"gradle\")")]
    BuildToolUnsupported(String),

    #[error("workspace path is not configured (pass --workspace or set CLASS_SOURCE_WORKSPACE)")]
    WorkspaceUndefined,

    #[error("{tool} exited with status {code:?}: {stderr}")]
    CommandFailed {
        tool: &'static str,
        code: Option<i32>,
        stderr: String,
    },

    #[error("classpath marker {marker:?} not found in {tool} output")]
    MarkerNotFound {
        tool: &'static str,
        marker: &'static str,
    },

    #[error("expected exactly one classpath line in {tool} output, found {count}")]
    AmbiguousClasspathOutput { tool: &'static str, count: usize },

    #[error("class {0} not found in any jar on the resolved classpath")]
    ClassNotFound(String),

    #[error("no {kind} archive found for {}", jar.display())]
    NoCompanionArchive { kind: &'static str, jar: PathBuf },

    #[error("entry {entry} missing from companion archive {}", archive.display())]
    EntryNotInCompanion { entry: String, archive: PathBuf },

    #[error("no javadoc entry {entry} in {}", archive.display())]
    NoJavadocFound { entry: String, archive: PathBuf },

    #[error("decompilation failed: {0}")]
    DecompileFailed(String),

    #[error("cannot read archive {}: {reason}", path.display())]
    ArchiveUnreadable { path: PathBuf, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ResolveError>;
