use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};

use crate::cli::Cli;

/// Workspace root: flag, then environment. No default on purpose — an
/// unconfigured workspace is a terminal precondition failure downstream, not
/// something to guess from the current directory.
pub fn resolve_workspace(cli: &Cli) -> Option<PathBuf> {
    cli.workspace
        .clone()
        .or_else(|| env::var_os("CLASS_SOURCE_WORKSPACE").map(PathBuf::from))
}

/// Build tool identifier: flag, then environment. Also no default.
pub fn resolve_build_tool(cli: &Cli) -> Option<String> {
    cli.build_tool
        .clone()
        .or_else(|| env::var("CLASS_SOURCE_BUILD_TOOL").ok())
}

pub fn resolve_tool_root(cli: &Cli) -> Result<PathBuf> {
    if let Some(p) = cli.tool_root.clone() {
        return Ok(p);
    }
    if let Ok(p) = env::var("CLASS_SOURCE_HOME") {
        return Ok(PathBuf::from(p));
    }
    let home = dirs::home_dir().context("Failed to resolve home directory")?;
    Ok(home.join(".class-source"))
}

/// Decompiler jar location: flag, then environment, then the bundled default
/// under the tool root. Pure path resolution, no filesystem or network work.
pub fn resolve_decompiler_path(cli: &Cli, tool_root: &Path) -> PathBuf {
    if let Some(p) = cli.decompiler.clone() {
        return p;
    }
    if let Ok(p) = env::var("CLASS_SOURCE_DECOMPILER") {
        return PathBuf::from(p);
    }
    tool_root.join("bin").join("jd-cli.jar")
}

/// Downloads the bundled decompiler on first use. Only the default location
/// is bootstrapped; a flag- or env-supplied jar is taken as-is.
pub fn prepare_decompiler(cli: &Cli, tool_root: &Path) -> Result<PathBuf> {
    let path = resolve_decompiler_path(cli, tool_root);
    let is_default = cli.decompiler.is_none() && env::var_os("CLASS_SOURCE_DECOMPILER").is_none();
    if is_default {
        install_decompiler_if_missing(&path)?;
    }
    Ok(path)
}

fn install_decompiler_if_missing(target_path: &Path) -> Result<()> {
    if target_path.exists() {
        return Ok(());
    }

    let url =
        "https://github.com/intoolswetrust/jd-cli/releases/download/jd-cli-1.2.1/jd-cli-1.2.1.jar";
    if let Some(parent) = target_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    eprintln!(
        "[class-source] decompiler not found, downloading to {}",
        target_path.display()
    );
    let status = std::process::Command::new("curl")
        .args([
            "-L",
            "--fail",
            "--silent",
            "--show-error",
            "-o",
            target_path
                .to_str()
                .context("decompiler target path is not valid UTF-8")?,
            url,
        ])
        .status()
        .context(
            "Failed to execute curl (ensure curl is installed, or use --decompiler to specify a jar)",
        )?;

    if !status.success() {
        anyhow::bail!("Failed to download decompiler. You can use --decompiler to specify a local jar");
    }

    Ok(())
}
