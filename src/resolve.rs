use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::archive;
use crate::buildtool::{BuildTool, CompanionKind};
use crate::classpath;
use crate::decompile::Decompiler;
use crate::error::{ResolveError, Result};
use crate::locate;

/// Where the returned text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Origin {
    SourcesArchive,
    JavadocArchive,
    Decompiled,
}

/// Final output of a resolution: the decoded text plus where it was found.
#[derive(Debug, Serialize)]
pub struct Resolved {
    pub class_name: String,
    pub jar_path: String,
    pub companion_path: Option<String>,
    pub origin: Origin,
    pub content: String,
}

/// Composes the pipeline into the two public operations. Holds configuration
/// only; every call re-resolves the classpath and re-opens archives, the
/// build tool's own cache being the effective caching layer.
#[derive(Debug)]
pub struct Resolver {
    build_tool: Option<String>,
    workspace: Option<PathBuf>,
    decompiler_jar: PathBuf,
    tool_root: PathBuf,
}

impl Resolver {
    pub fn new(
        build_tool: Option<String>,
        workspace: Option<PathBuf>,
        decompiler_jar: PathBuf,
        tool_root: PathBuf,
    ) -> Self {
        Self {
            build_tool,
            workspace,
            decompiler_jar,
            tool_root,
        }
    }

    /// Validates configuration without spawning anything; front ends call
    /// this before doing any per-request setup of their own.
    pub fn check_preconditions(&self) -> Result<()> {
        self.preconditions().map(|_| ())
    }

    /// Precondition checks shared by every operation. Nothing is spawned
    /// before these pass.
    fn preconditions(&self) -> Result<(BuildTool, &Path)> {
        let raw = self
            .build_tool
            .as_deref()
            .ok_or(ResolveError::BuildToolUndefined)?;
        let tool = BuildTool::from_config_value(raw)?;
        let workspace = self
            .workspace
            .as_deref()
            .ok_or(ResolveError::WorkspaceUndefined)?;
        Ok((tool, workspace))
    }

    /// Resolved ordered jar list of the workspace's dependencies.
    pub fn classpath(&self) -> Result<Vec<PathBuf>> {
        let (tool, workspace) = self.preconditions()?;
        classpath::resolve_classpath(tool, workspace)
    }

    /// The first classpath jar containing the compiled class.
    pub fn locate_jar(&self, class_name: &str) -> Result<PathBuf> {
        self.locate(class_name).map(|(_, jar)| jar)
    }

    fn locate(&self, class_name: &str) -> Result<(BuildTool, PathBuf)> {
        let (tool, workspace) = self.preconditions()?;
        let jars = classpath::resolve_classpath(tool, workspace)?;
        let jar = locate::locate_jar(class_name, &jars)
            .ok_or_else(|| ResolveError::ClassNotFound(class_name.to_string()))?;
        Ok((tool, jar))
    }

    /// Source text for a class: the sources companion archive when one was
    /// published, the decompiler otherwise. A sources archive that exists but
    /// lacks the entry is terminal; the decompiler only covers the
    /// no-archive-at-all case.
    pub fn get_source(&self, class_name: &str) -> Result<Resolved> {
        let (tool, jar) = self.locate(class_name)?;

        match tool.companion_path(&jar, CompanionKind::Sources) {
            Some(companion) => {
                let entry = locate::companion_entry_path(class_name, CompanionKind::Sources);
                match archive::extract_entry(&companion, &entry) {
                    Some(content) => Ok(resolved(
                        class_name,
                        &jar,
                        Some(&companion),
                        Origin::SourcesArchive,
                        content,
                    )),
                    None => Err(ResolveError::EntryNotInCompanion {
                        entry,
                        archive: companion,
                    }),
                }
            }
            None => {
                tracing::info!(
                    "no sources archive for {}, falling back to decompiler",
                    jar.display()
                );
                let decompiler =
                    Decompiler::new(self.decompiler_jar.clone(), self.tool_root.clone());
                let content = decompiler.decompile(&jar, class_name)?;
                Ok(resolved(class_name, &jar, None, Origin::Decompiled, content))
            }
        }
    }

    /// Javadoc HTML for a class. No decompile fallback exists for
    /// documentation: a missing companion archive or a missing entry inside
    /// it is terminal.
    pub fn get_javadoc(&self, class_name: &str) -> Result<Resolved> {
        let (tool, jar) = self.locate(class_name)?;

        let companion = tool
            .companion_path(&jar, CompanionKind::Javadoc)
            .ok_or_else(|| ResolveError::NoCompanionArchive {
                kind: CompanionKind::Javadoc.classifier(),
                jar: jar.clone(),
            })?;
        let entry = locate::companion_entry_path(class_name, CompanionKind::Javadoc);
        let content = archive::extract_entry(&companion, &entry).ok_or_else(|| {
            ResolveError::NoJavadocFound {
                entry: entry.clone(),
                archive: companion.clone(),
            }
        })?;
        Ok(resolved(
            class_name,
            &jar,
            Some(&companion),
            Origin::JavadocArchive,
            content,
        ))
    }
}

fn resolved(
    class_name: &str,
    jar: &Path,
    companion: Option<&Path>,
    origin: Origin,
    content: String,
) -> Resolved {
    Resolved {
        class_name: class_name.to_string(),
        jar_path: jar.to_string_lossy().into_owned(),
        companion_path: companion.map(|p| p.to_string_lossy().into_owned()),
        origin,
        content,
    }
}
