use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::buildtool::BuildTool;
use crate::error::{ResolveError, Result};
use crate::exec;

/// Printed by `mvn dependency:build-classpath` immediately before the
/// classpath line.
const MAVEN_MARKER: &str = "Dependencies classpath:";

/// Substring that identifies a classpath line (Maven) or a jar-path line
/// (Gradle) in build tool output. The Gradle listing task must not emit this
/// substring in any other context; that is a precondition on the build
/// script, not something enforced here.
const JAR_MARKER: &str = ".jar";

#[cfg(windows)]
const PATH_LIST_SEPARATOR: char = ';';
#[cfg(not(windows))]
const PATH_LIST_SEPARATOR: char = ':';

/// Runs the build tool's dependency-listing command in `workspace` and parses
/// its output into the ordered jar list.
pub fn resolve_classpath(tool: BuildTool, workspace: &Path) -> Result<Vec<PathBuf>> {
    let program = tool.executable(workspace);
    let args: Vec<OsString> = tool.classpath_args().iter().map(OsString::from).collect();
    tracing::debug!(
        "resolving classpath: {} {:?} in {}",
        program.to_string_lossy(),
        args,
        workspace.display()
    );

    let output = exec::run(&program, &args, Some(workspace))?;
    if !output.success() {
        return Err(ResolveError::CommandFailed {
            tool: tool.name(),
            code: output.code,
            stderr: output.stderr.trim().to_string(),
        });
    }

    let jars = tool.parse_classpath_output(&output)?;
    tracing::debug!("resolved {} classpath jars", jars.len());
    Ok(jars)
}

/// Maven prints the whole classpath as a single path-separator-delimited line
/// after the marker. Exactly one jar-bearing line must follow the marker;
/// anything else means the output shape changed underneath us.
pub(crate) fn parse_maven_output(stdout: &str) -> Result<Vec<PathBuf>> {
    let marker_at = stdout
        .find(MAVEN_MARKER)
        .ok_or(ResolveError::MarkerNotFound {
            tool: "maven",
            marker: MAVEN_MARKER,
        })?;
    let after = &stdout[marker_at + MAVEN_MARKER.len()..];

    let jar_lines: Vec<&str> = after
        .lines()
        .map(str::trim)
        .filter(|line| line.contains(JAR_MARKER))
        .collect();
    if jar_lines.len() != 1 {
        return Err(ResolveError::AmbiguousClasspathOutput {
            tool: "maven",
            count: jar_lines.len(),
        });
    }

    Ok(jar_lines[0]
        .split(PATH_LIST_SEPARATOR)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(PathBuf::from)
        .collect())
}

/// The Gradle listing task prints one jar path per line, interleaved with
/// build-log noise. Every line containing the jar marker is a path; the rest
/// is discarded. Emitted order is preserved.
pub(crate) fn parse_gradle_output(combined: &str) -> Result<Vec<PathBuf>> {
    Ok(combined
        .lines()
        .map(str::trim)
        .filter(|line| line.contains(JAR_MARKER))
        .map(PathBuf::from)
        .collect())
}
