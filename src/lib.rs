#![warn(missing_docs)]

//! Automated builds of NeoForge client distributions.
//!
//! neobuild resolves a NeoForge version, downloads its installer archive,
//! runs the external installer against a per-version workspace, and
//! assembles the output into a predictable layout: the client jar plus the
//! auxiliary files its manifests reference, with everything else removed.
//! Builds are idempotent; a workspace with an existing client jar is left
//! untouched.

/// The build pipeline orchestrator and artifact assembler
pub mod build;
/// Invocation of the external installer program
pub mod installer;
/// File and data format input / output
pub mod io;
/// Manifest documents and version descriptor patching
pub mod manifest;
/// Parsing of Maven coordinate strings
pub mod maven;
/// API wrappers and networking utilities
pub mod net;
/// Output of build progress and diagnostics
pub mod output;
/// Resolution of version identifiers into build targets
pub mod resolve;
/// The per-build filesystem workspace
pub mod workspace;

/// The version of neobuild
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
