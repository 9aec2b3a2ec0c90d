use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use crate::buildtool::CompanionKind;

/// `foo-1.0.jar` -> `foo-1.0-sources.jar` / `foo-1.0-javadoc.jar`.
fn companion_file_name(jar: &Path, kind: CompanionKind) -> Option<String> {
    let name = jar.file_name()?.to_str()?;
    let stem = name.strip_suffix(".jar")?;
    Some(format!("{stem}-{}.jar", kind.classifier()))
}

/// Maven keeps companions next to the jar in the same repository directory.
/// A missing sibling is the normal "not published" case, not an error.
pub(crate) fn maven_sibling(jar: &Path, kind: CompanionKind) -> Option<PathBuf> {
    let candidate = jar.with_file_name(companion_file_name(jar, kind)?);
    if candidate.is_file() {
        tracing::debug!("found {} companion {}", kind.classifier(), candidate.display());
        return Some(candidate);
    }
    None
}

/// Gradle's module cache stores each artifact file under its own
/// content-hash directory, so the companion sits in a *sibling* hash
/// directory under the same artifact/version parent. The hash scheme is not
/// inferred; the version subtree is walked exhaustively and the first file
/// with the expected companion name wins.
pub(crate) fn gradle_sibling(jar: &Path, kind: CompanionKind) -> Option<PathBuf> {
    let wanted = companion_file_name(jar, kind)?;
    let version_dir = jar.parent()?.parent()?;

    let walker = WalkBuilder::new(version_dir)
        .hidden(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                tracing::warn!("walk error under {}: {err}", version_dir.display());
                continue;
            }
        };
        let path = entry.path();
        if path.is_file() && path.file_name().and_then(|n| n.to_str()) == Some(wanted.as_str()) {
            tracing::debug!("found {} companion {}", kind.classifier(), path.display());
            return Some(path.to_path_buf());
        }
    }
    None
}
