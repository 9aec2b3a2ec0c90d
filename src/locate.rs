use std::path::PathBuf;

use crate::archive;
use crate::buildtool::CompanionKind;

/// Dotted class name to entry path: `a.B` becomes `a/B.<extension>`. The same
/// mapping backs the `.class`, `.java`, and `.html` derivations, so the three
/// stay consistent by construction.
fn entry_path(class_name: &str, extension: &str) -> String {
    format!("{}.{extension}", class_name.replace('.', "/"))
}

pub fn class_entry_path(class_name: &str) -> String {
    entry_path(class_name, "class")
}

pub fn companion_entry_path(class_name: &str, kind: CompanionKind) -> String {
    entry_path(class_name, kind.entry_extension())
}

/// Scans the classpath in resolver order and returns the first jar whose
/// listing contains the compiled class. First-found wins; shaded or relocated
/// dependencies can put the same class in several jars and no attempt is made
/// to disambiguate. Unreadable archives are logged and skipped.
pub fn locate_jar(class_name: &str, jar_paths: &[PathBuf]) -> Option<PathBuf> {
    let entry = class_entry_path(class_name);
    for jar in jar_paths {
        match archive::contains_entry(jar, &entry) {
            Ok(true) => {
                tracing::debug!("{class_name} found in {}", jar.display());
                return Some(jar.clone());
            }
            Ok(false) => {}
            Err(err) => {
                tracing::warn!("skipping classpath entry: {err}");
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use std::path::Path;
    use zip::write::{FileOptions, ZipWriter};

    fn temp_dir(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "class_source_locate_{}_{}_{}",
            std::process::id(),
            nanos,
            name
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn write_jar(path: &Path, entries: &[&str]) {
        let file = fs::File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        for name in entries {
            zip.start_file(*name, FileOptions::default()).unwrap();
            zip.write_all(b"dummy").unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn entry_path_derivations_are_consistent() {
        assert_eq!(class_entry_path("a.B"), "a/B.class");
        assert_eq!(
            companion_entry_path("a.B", CompanionKind::Sources),
            "a/B.java"
        );
        assert_eq!(
            companion_entry_path("a.B", CompanionKind::Javadoc),
            "a/B.html"
        );
        assert_eq!(
            class_entry_path("org.apache.commons.lang3.StringUtils"),
            "org/apache/commons/lang3/StringUtils.class"
        );
    }

    #[test]
    fn locate_jar_returns_first_match_in_order() {
        let dir = temp_dir("first_match");
        let first = dir.join("first.jar");
        let second = dir.join("second.jar");
        write_jar(&first, &["org/other/Thing.class"]);
        write_jar(&second, &["org/example/Foo.class"]);

        let jars = vec![first, second.clone()];
        assert_eq!(locate_jar("org.example.Foo", &jars), Some(second));
        assert_eq!(locate_jar("org.example.Absent", &jars), None);

        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn locate_jar_skips_unreadable_archives() {
        let dir = temp_dir("skip_broken");
        let broken = dir.join("broken.jar");
        let good = dir.join("good.jar");
        fs::write(&broken, b"not a zip").unwrap();
        write_jar(&good, &["org/example/Foo.class"]);

        let jars = vec![broken, good.clone()];
        assert_eq!(locate_jar("org.example.Foo", &jars), Some(good));

        let _ = fs::remove_dir_all(dir);
    }
}
