use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "class-source")]
#[command(about = "Resolve Java class sources and javadoc from a Maven or Gradle project classpath")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Project root the build tool runs in.
    #[arg(long, value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    /// Build tool identifier; anything matching "mvn" or "gradle".
    #[arg(long, value_name = "TOOL")]
    pub build_tool: Option<String>,

    /// Decompiler jar to use instead of the bundled one.
    #[arg(long, value_name = "FILE")]
    pub decompiler: Option<PathBuf>,

    /// Installation root holding the bundled decompiler.
    #[arg(long, value_name = "DIR")]
    pub tool_root: Option<PathBuf>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Source text for a class: sources archive first, decompiler fallback.
    Source {
        class_name: String,

        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Javadoc HTML for a class from its javadoc companion archive.
    Javadoc {
        class_name: String,

        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,

        #[arg(short = 'o', long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Print the resolved dependency classpath, one jar per line.
    Classpath {
        #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the first classpath jar containing a class.
    Locate { class_name: String },
}

#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Text,
    Code,
}
