use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::{ResolveError, Result};
use crate::exec;

fn java_binary() -> OsString {
    std::env::var_os("CLASS_SOURCE_JAVA").unwrap_or_else(|| OsString::from("java"))
}

/// Serializes every test that rewires CLASS_SOURCE_JAVA, across modules.
#[cfg(all(test, unix))]
pub(crate) fn java_env_lock() -> &'static std::sync::Mutex<()> {
    use std::sync::{Mutex, OnceLock};
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
}

/// Wrapper around the bundled jd-cli decompiler jar.
#[derive(Debug, Clone)]
pub struct Decompiler {
    jar: PathBuf,
    tool_root: PathBuf,
}

impl Decompiler {
    pub fn new(jar: PathBuf, tool_root: PathBuf) -> Self {
        Self { jar, tool_root }
    }

    /// Decompiles one class out of `jar_path` and returns the recovered
    /// source text, with the decompiler framework's interleaved log lines
    /// stripped from stdout. Runs with the installation root as working
    /// directory, not the target workspace.
    pub fn decompile(&self, jar_path: &Path, class_name: &str) -> Result<String> {
        let args = vec![
            OsString::from("-jar"),
            self.jar.as_os_str().to_os_string(),
            OsString::from("--outputConsole"),
            OsString::from("--pattern"),
            OsString::from(class_name),
            jar_path.as_os_str().to_os_string(),
        ];
        tracing::debug!(
            "decompiling {class_name} from {} via {}",
            jar_path.display(),
            self.jar.display()
        );

        let output = exec::run(&java_binary(), &args, Some(&self.tool_root))?;
        if !output.success() {
            return Err(ResolveError::DecompileFailed(
                output.stderr.trim().to_string(),
            ));
        }

        Ok(strip_log_lines(&output.stdout))
    }
}

/// Drops every line that looks like framework logging: `HH:MM:SS.mmm` plus an
/// uppercase severity token. Remaining lines keep their original order.
///
/// Best-effort text filter: a source line that happens to match the timestamp
/// shape (possible in obfuscated code) is dropped too. Known limitation.
pub fn strip_log_lines(raw: &str) -> String {
    let mut filtered: String = raw
        .lines()
        .filter(|line| !is_log_line(line))
        .collect::<Vec<_>>()
        .join("\n");
    if raw.ends_with('\n') && !filtered.is_empty() {
        filtered.push('\n');
    }
    filtered
}

fn is_log_line(line: &str) -> bool {
    let bytes = line.as_bytes();
    if bytes.len() < 13 {
        return false;
    }

    // HH:MM:SS.mmm
    let digits = [0, 1, 3, 4, 6, 7, 9, 10, 11];
    if !digits.iter().all(|&i| bytes[i].is_ascii_digit()) {
        return false;
    }
    if bytes[2] != b':' || bytes[5] != b':' || bytes[8] != b'.' {
        return false;
    }
    if !bytes[12].is_ascii_whitespace() {
        return false;
    }

    match line[12..].split_whitespace().next() {
        Some(token) => token.chars().all(|c| c.is_ascii_uppercase()),
        None => false,
    }
}
