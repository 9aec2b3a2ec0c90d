use std::ffi::{OsStr, OsString};
use std::path::Path;
use std::process::Command;

/// Captured result of one external process run.
#[derive(Debug)]
pub struct ExecOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ExecOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Stdout followed by stderr; build tools spread their output over both.
    pub fn combined(&self) -> String {
        if self.stderr.is_empty() {
            return self.stdout.clone();
        }
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

/// Runs `program` synchronously and blocks until it exits. No timeout is
/// enforced: a hung child blocks the calling request.
pub fn run(program: &OsStr, args: &[OsString], cwd: Option<&Path>) -> std::io::Result<ExecOutput> {
    let mut command = base_command(program);
    command.args(args);
    if let Some(dir) = cwd {
        command.current_dir(dir);
    }

    let output = command.output()?;
    Ok(ExecOutput {
        code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}

#[cfg(windows)]
fn base_command(program: &OsStr) -> Command {
    // mvnw.cmd / gradlew.cmd need the shell to run them.
    let lower = program.to_string_lossy().to_ascii_lowercase();
    if lower.ends_with(".cmd") || lower.ends_with(".bat") {
        let mut command = Command::new("cmd");
        command.arg("/C").arg(program);
        return command;
    }
    Command::new(program)
}

#[cfg(not(windows))]
fn base_command(program: &OsStr) -> Command {
    Command::new(program)
}
