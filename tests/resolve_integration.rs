#![cfg(unix)]

use serde_json::Value;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_dir(name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "class_source_it_{}_{}_{}",
        std::process::id(),
        nanos,
        name
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_jar(path: &Path, entries: &[(&str, &[u8])]) -> anyhow::Result<()> {
    use std::io::Write;
    use zip::write::FileOptions;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::File::create(path)?;
    let mut zip = zip::ZipWriter::new(file);
    let options = FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    for (name, content) in entries {
        zip.start_file(*name, options)?;
        zip.write_all(content)?;
    }
    zip.finish()?;
    Ok(())
}

fn write_script(path: &Path, content: &str) -> anyhow::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    let mut perms = std::fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms)?;
    Ok(())
}

fn run(args: &[&str], envs: &[(&str, &str)]) -> anyhow::Result<Output> {
    let bin = env!("CARGO_BIN_EXE_class-source");
    let mut cmd = Command::new(bin);
    cmd.args(args);
    cmd.env_remove("CLASS_SOURCE_WORKSPACE");
    cmd.env_remove("CLASS_SOURCE_BUILD_TOOL");
    cmd.env_remove("CLASS_SOURCE_DECOMPILER");
    cmd.env_remove("CLASS_SOURCE_JAVA");
    for (k, v) in envs {
        cmd.env(k, v);
    }
    Ok(cmd.output()?)
}

fn run_json(args: &[&str], envs: &[(&str, &str)]) -> anyhow::Result<Value> {
    let out = run(args, envs)?;
    if !out.status.success() {
        return Err(anyhow::anyhow!(
            "command failed: status={:?}, stderr={}",
            out.status.code(),
            String::from_utf8_lossy(&out.stderr)
        ));
    }
    Ok(serde_json::from_slice(&out.stdout)?)
}

/// A Maven-shaped fixture: a workspace whose mvnw prints a classpath with the
/// given jars, plus a fake repository directory.
struct Fixture {
    base: PathBuf,
    workspace: PathBuf,
    tool_root: PathBuf,
    decompiler: PathBuf,
}

impl Fixture {
    fn new(name: &str, classpath_jars: &[&Path]) -> anyhow::Result<Self> {
        let base = temp_dir(name);
        let workspace = base.join("workspace");
        let tool_root = base.join("tool-root");
        std::fs::create_dir_all(&workspace)?;
        std::fs::create_dir_all(&tool_root)?;

        let decompiler = tool_root.join("jd-cli.jar");
        std::fs::write(&decompiler, "stub")?;

        let classpath = classpath_jars
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(":");
        write_script(
            &workspace.join("mvnw"),
            &format!(
                "#!/bin/sh\n\
                 echo '[INFO] Dependencies classpath:'\n\
                 echo '{classpath}'\n"
            ),
        )?;

        Ok(Self {
            base,
            workspace,
            tool_root,
            decompiler,
        })
    }

    fn common_args(&self) -> Vec<String> {
        vec![
            "--workspace".to_string(),
            self.workspace.to_string_lossy().into_owned(),
            "--build-tool".to_string(),
            "mvn".to_string(),
            "--tool-root".to_string(),
            self.tool_root.to_string_lossy().into_owned(),
            "--decompiler".to_string(),
            self.decompiler.to_string_lossy().into_owned(),
        ]
    }
}

#[test]
fn source_comes_from_companion_archive_without_decompiling() -> anyhow::Result<()> {
    let staging = temp_dir("companion_staging");
    let jar = staging.join("repo").join("demo-1.0.jar");
    let fx = Fixture::new("companion", &[&jar])?;
    write_jar(&jar, &[("org/example/Foo.class", b"")])?;
    write_jar(
        &staging.join("repo").join("demo-1.0-sources.jar"),
        &[("org/example/Foo.java", b"public class Foo {}\n")],
    )?;

    // Any java invocation fails loudly, proving the companion path won.
    let trap_java = fx.base.join("java-trap");
    write_script(&trap_java, "#!/bin/sh\necho 'unexpected decompile' >&2\nexit 9\n")?;

    let mut args: Vec<String> = fx.common_args();
    args.extend(["source".to_string(), "org.example.Foo".to_string()]);
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    let json = run_json(
        &arg_refs,
        &[("CLASS_SOURCE_JAVA", trap_java.to_string_lossy().as_ref())],
    )?;

    assert_eq!(json["origin"], Value::String("sources-archive".to_string()));
    assert_eq!(
        json["content"],
        Value::String("public class Foo {}\n".to_string())
    );
    assert!(json["companion_path"].as_str().unwrap().ends_with("demo-1.0-sources.jar"));

    let _ = std::fs::remove_dir_all(fx.base);
    let _ = std::fs::remove_dir_all(staging);
    Ok(())
}

#[test]
fn source_falls_back_to_decompiler_when_no_companion_exists() -> anyhow::Result<()> {
    let staging = temp_dir("fallback_staging");
    let jar = staging.join("repo").join("demo-1.0.jar");
    let fx = Fixture::new("fallback", &[&jar])?;
    write_jar(&jar, &[("org/example/Foo.class", b"")])?;

    let fake_java = fx.base.join("java");
    write_script(
        &fake_java,
        "#!/bin/sh\n\
         echo '10:00:00.123 INFO jd.cli.Main - Decompiling'\n\
         echo 'package org.example;'\n\
         echo 'public class Foo {}'\n",
    )?;

    let mut args: Vec<String> = fx.common_args();
    args.extend([
        "source".to_string(),
        "org.example.Foo".to_string(),
        "--format".to_string(),
        "json".to_string(),
    ]);
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    let json = run_json(
        &arg_refs,
        &[("CLASS_SOURCE_JAVA", fake_java.to_string_lossy().as_ref())],
    )?;

    assert_eq!(json["origin"], Value::String("decompiled".to_string()));
    let content = json["content"].as_str().unwrap();
    assert!(content.starts_with("package org.example;"));
    assert!(!content.contains("jd.cli.Main"));

    let _ = std::fs::remove_dir_all(fx.base);
    let _ = std::fs::remove_dir_all(staging);
    Ok(())
}

#[test]
fn javadoc_comes_from_companion_archive() -> anyhow::Result<()> {
    let staging = temp_dir("javadoc_staging");
    let jar = staging.join("repo").join("demo-1.0.jar");
    let fx = Fixture::new("javadoc", &[&jar])?;
    write_jar(&jar, &[("org/example/Foo.class", b"")])?;
    write_jar(
        &staging.join("repo").join("demo-1.0-javadoc.jar"),
        &[("org/example/Foo.html", b"<html>Foo docs</html>")],
    )?;

    let mut args: Vec<String> = fx.common_args();
    args.extend(["javadoc".to_string(), "org.example.Foo".to_string()]);
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    let json = run_json(&arg_refs, &[])?;

    assert_eq!(json["origin"], Value::String("javadoc-archive".to_string()));
    assert!(json["content"].as_str().unwrap().contains("Foo docs"));

    let _ = std::fs::remove_dir_all(fx.base);
    let _ = std::fs::remove_dir_all(staging);
    Ok(())
}

#[test]
fn missing_workspace_is_reported_without_running_anything() -> anyhow::Result<()> {
    let base = temp_dir("no_workspace");
    let tool_root = base.join("tool-root");
    std::fs::create_dir_all(&tool_root)?;
    let decompiler = tool_root.join("jd-cli.jar");
    std::fs::write(&decompiler, "stub")?;

    let out = run(
        &[
            "--build-tool",
            "mvn",
            "--tool-root",
            tool_root.to_string_lossy().as_ref(),
            "--decompiler",
            decompiler.to_string_lossy().as_ref(),
            "source",
            "org.example.Foo",
        ],
        &[],
    )?;

    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("workspace path is not configured"));

    let _ = std::fs::remove_dir_all(base);
    Ok(())
}

#[test]
fn classpath_subcommand_lists_jars_in_order() -> anyhow::Result<()> {
    let staging = temp_dir("classpath_staging");
    let first = staging.join("a-1.0.jar");
    let second = staging.join("b-2.0.jar");
    let fx = Fixture::new("classpath", &[&first, &second])?;

    let mut args: Vec<String> = fx.common_args();
    args.extend(["classpath".to_string()]);
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    let out = run(&arg_refs, &[])?;

    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].ends_with("a-1.0.jar"));
    assert!(lines[1].ends_with("b-2.0.jar"));

    let _ = std::fs::remove_dir_all(fx.base);
    let _ = std::fs::remove_dir_all(staging);
    Ok(())
}

#[test]
fn bare_class_name_is_treated_as_implicit_source() -> anyhow::Result<()> {
    let staging = temp_dir("implicit_staging");
    let jar = staging.join("repo").join("demo-1.0.jar");
    let fx = Fixture::new("implicit", &[&jar])?;
    write_jar(&jar, &[("org/example/Foo.class", b"")])?;
    write_jar(
        &staging.join("repo").join("demo-1.0-sources.jar"),
        &[("org/example/Foo.java", b"public class Foo {}\n")],
    )?;

    let mut args: Vec<String> = fx.common_args();
    args.extend([
        "org.example.Foo".to_string(),
        "--format".to_string(),
        "code".to_string(),
    ]);
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    let out = run(&arg_refs, &[])?;

    assert!(
        out.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&out.stderr)
    );
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "public class Foo {}\n"
    );

    let _ = std::fs::remove_dir_all(fx.base);
    let _ = std::fs::remove_dir_all(staging);
    Ok(())
}
