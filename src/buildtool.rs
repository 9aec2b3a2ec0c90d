use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::classpath;
use crate::companion;
use crate::error::{ResolveError, Result};
use crate::exec::ExecOutput;

/// The closed set of supported build tools. Selected once from configuration;
/// every vendor-specific rule in the pipeline dispatches through this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildTool {
    Maven,
    Gradle,
}

impl BuildTool {
    /// Recognizes the configured identifier by substring: anything containing
    /// "mvn" or "maven" is Maven, anything containing "gradle" is Gradle.
    pub fn from_config_value(value: &str) -> Result<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        if normalized.contains("mvn") || normalized.contains("maven") {
            Ok(BuildTool::Maven)
        } else if normalized.contains("gradle") {
            Ok(BuildTool::Gradle)
        } else {
            Err(ResolveError::BuildToolUnsupported(value.to_string()))
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BuildTool::Maven => "maven",
            BuildTool::Gradle => "gradle",
        }
    }

    /// The executable to invoke: the workspace-local wrapper script when the
    /// project ships one, otherwise the bare tool from PATH.
    pub fn executable(self, workspace: &Path) -> OsString {
        let (wrapper, bare) = match self {
            BuildTool::Maven => (WRAPPER_NAMES.0, "mvn"),
            BuildTool::Gradle => (WRAPPER_NAMES.1, "gradle"),
        };
        let local = workspace.join(wrapper);
        if local.is_file() {
            return local.into_os_string();
        }
        OsString::from(bare)
    }

    /// Arguments of the dependency-listing command, run with the workspace as
    /// working directory.
    pub fn classpath_args(self) -> &'static [&'static str] {
        match self {
            BuildTool::Maven => &["dependency:build-classpath"],
            BuildTool::Gradle => &["listRuntimeJars"],
        }
    }

    pub fn parse_classpath_output(self, output: &ExecOutput) -> Result<Vec<PathBuf>> {
        match self {
            BuildTool::Maven => classpath::parse_maven_output(&output.stdout),
            BuildTool::Gradle => classpath::parse_gradle_output(&output.combined()),
        }
    }

    /// Expected location of a companion archive for `jar`, or `None` when the
    /// dependency was published without one. Placement rules are
    /// vendor-specific; see the `companion` module.
    pub fn companion_path(self, jar: &Path, kind: CompanionKind) -> Option<PathBuf> {
        match self {
            BuildTool::Maven => companion::maven_sibling(jar, kind),
            BuildTool::Gradle => companion::gradle_sibling(jar, kind),
        }
    }
}

#[cfg(windows)]
const WRAPPER_NAMES: (&str, &str) = ("mvnw.cmd", "gradlew.bat");
#[cfg(not(windows))]
const WRAPPER_NAMES: (&str, &str) = ("mvnw", "gradlew");

/// The two companion archive classifiers a dependency may publish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompanionKind {
    Sources,
    Javadoc,
}

impl CompanionKind {
    pub fn classifier(self) -> &'static str {
        match self {
            CompanionKind::Sources => "sources",
            CompanionKind::Javadoc => "javadoc",
        }
    }

    /// Extension of the per-class entry inside this kind of archive.
    pub fn entry_extension(self) -> &'static str {
        match self {
            CompanionKind::Sources => "java",
            CompanionKind::Javadoc => "html",
        }
    }
}
