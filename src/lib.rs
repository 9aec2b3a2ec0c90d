//! # class-source
//!
//! Resolve Java class sources and javadoc from a build-tool-managed project:
//! locate the dependency jar containing a class, extract the matching entry
//! from its sources/javadoc companion archive, or fall back to an external
//! decompiler.
//!
//! ## Architecture
//!
//! - **buildtool**: Maven/Gradle variant dispatch (commands, parsing rules, companion placement)
//! - **classpath**: dependency-listing command invocation and output parsing
//! - **locate**: class-name to entry-path mapping and class-to-jar scan
//! - **companion**: sources/javadoc companion archive placement rules
//! - **archive**: zip entry membership checks and text extraction
//! - **decompile**: external decompiler invocation and log-line stripping
//! - **resolve**: the orchestrator exposing `get_source` / `get_javadoc`
//! - **exec**: synchronous external process runner
//! - **error**: resolution failure taxonomy

pub mod archive;
pub mod buildtool;
pub mod classpath;
pub mod cli;
pub mod companion;
pub mod config;
pub mod decompile;
pub mod error;
pub mod exec;
pub mod locate;
pub mod resolve;
