#![warn(missing_docs)]

//! This library assembles Minecraft modpacks. It takes a [Manifest] describing the
//! base archives, mods, coremods and data files for the client and server and
//! produces a clean output tree for each of them, merging archives and copying
//! files along the way.
//!
//! Parsing manifests from files is done by the `mcpack_config` crate. This crate only
//! deals with manifests that have already been structured.

pub use mcpack_shared as shared;

/// Sequencing of the full build for each target
pub mod build;
/// Errors produced while packing
pub mod error;
/// Filesystem and archive operations used by the build
pub mod io;
/// The structured description of a modpack
pub mod manifest;
/// Checking manifests against the filesystem
pub mod validate;

pub use build::{build, BuildStage};
pub use error::{MissingFilesError, PackError};
pub use manifest::{
	ArchiveSpec, BuildTarget, EntryList, Manifest, ManifestEntry, Role, TargetManifest,
	UniversalManifest,
};
pub use validate::{validate, validate_manifest, EffectiveTarget, ValidationOptions};

/// The version of the mcpack library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The default command written to the server launcher scripts
pub const DEFAULT_LAUNCHER_COMMAND: &str = "java -server -Xmx1024M -jar server.jar nogui";
