use anyhow::Result;
use clap::Parser;
use class_source::cli::{Cli, Commands, OutputFormat};
use class_source::config::{
    prepare_decompiler, resolve_build_tool, resolve_decompiler_path, resolve_tool_root,
    resolve_workspace,
};
use class_source::resolve::{Resolved, Resolver};
use serde::Serialize;
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = parse_cli()?;
    let resolver = build_resolver(&cli)?;

    match cli.command.clone() {
        Commands::Source {
            class_name,
            format,
            output,
        } => {
            // Configuration errors must surface before the decompiler
            // bootstrap gets a chance to spawn curl.
            resolver.check_preconditions()?;
            let tool_root = resolve_tool_root(&cli)?;
            prepare_decompiler(&cli, &tool_root)?;
            let class_name = normalize_class_name(&class_name);
            let resolved = resolver.get_source(&class_name)?;
            write_resolved_output(&resolved, format, output.as_deref())?;
        }
        Commands::Javadoc {
            class_name,
            format,
            output,
        } => {
            let class_name = normalize_class_name(&class_name);
            let resolved = resolver.get_javadoc(&class_name)?;
            write_resolved_output(&resolved, format, output.as_deref())?;
        }
        Commands::Classpath { format } => {
            let jars = resolver.classpath()?;
            write_classpath_output(&cli, &jars, format)?;
        }
        Commands::Locate { class_name } => {
            let class_name = normalize_class_name(&class_name);
            let jar = resolver.locate_jar(&class_name)?;
            println!("{}", jar.display());
        }
    }

    Ok(())
}

fn build_resolver(cli: &Cli) -> Result<Resolver> {
    let tool_root = resolve_tool_root(cli)?;
    let decompiler_jar = resolve_decompiler_path(cli, &tool_root);
    std::fs::create_dir_all(&tool_root)?;
    Ok(Resolver::new(
        resolve_build_tool(cli),
        resolve_workspace(cli),
        decompiler_jar,
        tool_root,
    ))
}

fn parse_cli() -> Result<Cli> {
    let args: Vec<String> = std::env::args().collect();
    Ok(Cli::parse_from(rewrite_args_for_implicit_source(args)))
}

/// A bare class name as the first positional argument means `source`.
fn rewrite_args_for_implicit_source(mut args: Vec<String>) -> Vec<String> {
    if args.len() <= 1 {
        return args;
    }

    let subcommands = ["source", "javadoc", "classpath", "locate", "help"];
    let value_options = ["--workspace", "--build-tool", "--decompiler", "--tool-root"];

    let mut idx = 1usize;
    while idx < args.len() {
        let a = args[idx].as_str();
        if a == "--" {
            idx += 1;
            break;
        }

        if value_options.contains(&a) {
            idx += 2;
            continue;
        }

        if value_options
            .iter()
            .any(|opt| a.starts_with(opt) && a.as_bytes().get(opt.len()) == Some(&b'='))
        {
            idx += 1;
            continue;
        }

        if a.starts_with('-') {
            idx += 1;
            continue;
        }

        break;
    }

    if idx < args.len() {
        let token = args[idx].as_str();
        if !subcommands.contains(&token) {
            args.insert(idx, "source".to_string());
        }
    }

    args
}

/// Strips the decoration people paste along with a class name: an `import`
/// prefix, a trailing semicolon, interior whitespace.
fn normalize_class_name(raw: &str) -> String {
    let mut s = raw.trim();
    if let Some(rest) = s.strip_prefix("import") {
        s = rest.trim();
    }
    if s.ends_with(';') {
        s = s.trim_end_matches(';').trim();
    }
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

#[derive(Debug, Serialize)]
struct ClasspathResult {
    workspace: Option<String>,
    build_tool: Option<String>,
    jar_count: usize,
    jars: Vec<String>,
}

fn write_resolved_output(
    resolved: &Resolved,
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let content = match format {
        OutputFormat::Json => serde_json::to_string_pretty(resolved)?,
        OutputFormat::Text => {
            let mut out = String::new();
            out.push_str(&format!("class_name: {}\n", resolved.class_name));
            out.push_str(&format!("jar_path: {}\n", resolved.jar_path));
            if let Some(companion) = &resolved.companion_path {
                out.push_str(&format!("companion_path: {companion}\n"));
            }
            out.push_str(&format!("origin: {:?}\n", resolved.origin));
            out.push('\n');
            out.push_str(&resolved.content);
            out
        }
        OutputFormat::Code => resolved.content.clone(),
    };

    emit(&content, output)
}

fn write_classpath_output(cli: &Cli, jars: &[PathBuf], format: OutputFormat) -> Result<()> {
    let content = match format {
        OutputFormat::Json => {
            let result = ClasspathResult {
                workspace: resolve_workspace(cli).map(|p| p.to_string_lossy().into_owned()),
                build_tool: resolve_build_tool(cli),
                jar_count: jars.len(),
                jars: jars
                    .iter()
                    .map(|p| p.to_string_lossy().into_owned())
                    .collect(),
            };
            serde_json::to_string_pretty(&result)?
        }
        OutputFormat::Text | OutputFormat::Code => jars
            .iter()
            .map(|p| p.to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("\n"),
    };

    emit(&content, None)
}

fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    if let Some(path) = output {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;
    } else {
        print!("{content}");
        if !content.ends_with('\n') {
            println!();
        }
    }

    Ok(())
}
