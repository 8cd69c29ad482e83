#![warn(missing_docs)]

//! This crate contains serde structs for mcpack manifest files and the logic
//! to turn them into a [Manifest] that the build can use.
//!
//! Relative paths for archives, mods and coremods are resolved against the mods
//! directory. Everything else is resolved against the directory of the manifest file

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use mcpack::{
	ArchiveSpec, BuildTarget, EntryList, Manifest, ManifestEntry, TargetManifest,
	UniversalManifest, ValidationOptions, DEFAULT_LAUNCHER_COMMAND,
};
use serde::{Deserialize, Serialize};

/// The default name of the manifest file
pub const DEFAULT_MANIFEST_NAME: &str = "modpack.json";
/// The default output directory
pub const DEFAULT_OUTPUT: &str = "build";
/// Prefix for a string entry that marks it as optional
pub const OPTIONAL_MARKER: char = '?';

/// Deserialization struct for a manifest file
#[derive(Deserialize, Serialize, Default, Debug, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct ManifestDeser {
	/// Where the target directories are written
	#[serde(skip_serializing_if = "Option::is_none")]
	pub output: Option<PathBuf>,
	/// The directory that archives, mods and coremods are looked up in
	#[serde(skip_serializing_if = "Option::is_none")]
	pub mods_dir: Option<PathBuf>,
	/// Whether optional entries are allowed to be missing. Defaults to true
	#[serde(skip_serializing_if = "Option::is_none")]
	pub honor_optional: Option<bool>,
	/// The command for the server launcher scripts
	#[serde(skip_serializing_if = "Option::is_none")]
	pub launcher: Option<String>,
	/// The client target
	pub client: TargetDeser,
	/// The server target
	pub server: TargetDeser,
	/// Entries shared between both targets
	pub universal: UniversalDeser,
}

/// Deserialization struct for a single target
#[derive(Deserialize, Serialize, Default, Debug, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct TargetDeser {
	/// The base archive followed by any archives to merge into it
	pub archive: Vec<EntryDeser>,
	/// Mods
	pub mods: Vec<EntryDeser>,
	/// Coremods
	pub coremods: Vec<EntryDeser>,
	/// Data files that are copied into the target root
	pub data: Vec<EntryDeser>,
}

/// Deserialization struct for the entries shared by both targets
#[derive(Deserialize, Serialize, Default, Debug, Clone)]
#[serde(default, deny_unknown_fields)]
pub struct UniversalDeser {
	/// Mods
	pub mods: Vec<EntryDeser>,
	/// Coremods
	pub coremods: Vec<EntryDeser>,
	/// Data files
	pub data: Vec<EntryDeser>,
}

/// A single path in the manifest. Can either be a plain string, optionally
/// prefixed with `?`, or an object with the path and optional flag
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum EntryDeser {
	/// Just a path
	Simple(String),
	/// A path with explicit settings
	Full {
		/// The path
		path: String,
		/// Whether the entry can be skipped if it is missing
		#[serde(default)]
		optional: bool,
	},
}

impl EntryDeser {
	/// Convert to a manifest entry, resolving relative paths against a directory
	pub fn to_entry(&self, dir: &Path) -> ManifestEntry {
		let (path, optional) = match self {
			Self::Simple(path) => match path.strip_prefix(OPTIONAL_MARKER) {
				Some(path) => (path, true),
				None => (path.as_str(), false),
			},
			Self::Full { path, optional } => (path.as_str(), *optional),
		};

		ManifestEntry {
			path: dir.join(path),
			optional,
		}
	}
}

/// Errors for manifests that deserialized fine but don't make sense
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ManifestError {
	/// A target has no archives at all
	#[error("The {} target has no base archive", .0)]
	NoBaseArchive(BuildTarget),
	/// The base archive of a target was marked optional
	#[error("The base archive of the {} target can't be optional", .0)]
	OptionalBaseArchive(BuildTarget),
}

/// A manifest ready to be built along with the settings it declared
#[derive(Debug, Clone)]
pub struct LoadedManifest {
	/// The manifest
	pub manifest: Manifest,
	/// Validation settings from the manifest
	pub options: ValidationOptions,
}

impl ManifestDeser {
	/// Convert to a usable manifest. `root` is the directory that relative paths
	/// are resolved from, usually the one containing the manifest file
	pub fn into_manifest(self, root: &Path) -> Result<LoadedManifest, ManifestError> {
		let mods_dir = root.join(self.mods_dir.unwrap_or_default());
		let output = root.join(self.output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)));

		let manifest = Manifest {
			output,
			client: self
				.client
				.into_target(BuildTarget::Client, root, &mods_dir)?,
			server: self
				.server
				.into_target(BuildTarget::Server, root, &mods_dir)?,
			universal: UniversalManifest {
				mods: resolve_list(&self.universal.mods, &mods_dir),
				coremods: resolve_list(&self.universal.coremods, &mods_dir),
				data: resolve_list(&self.universal.data, root),
			},
			launcher: self
				.launcher
				.unwrap_or_else(|| DEFAULT_LAUNCHER_COMMAND.into()),
		};

		Ok(LoadedManifest {
			manifest,
			options: ValidationOptions {
				honor_optional: self.honor_optional.unwrap_or(true),
			},
		})
	}
}

impl TargetDeser {
	fn into_target(
		self,
		target: BuildTarget,
		root: &Path,
		mods_dir: &Path,
	) -> Result<TargetManifest, ManifestError> {
		let mut archives = resolve_list(&self.archive, mods_dir).into_iter();
		let base = archives
			.next()
			.ok_or(ManifestError::NoBaseArchive(target))?;
		if base.optional {
			return Err(ManifestError::OptionalBaseArchive(target));
		}

		Ok(TargetManifest {
			archive: ArchiveSpec {
				base: base.path,
				additions: archives.collect(),
			},
			mods: resolve_list(&self.mods, mods_dir),
			coremods: resolve_list(&self.coremods, mods_dir),
			data: resolve_list(&self.data, root),
		})
	}
}

fn resolve_list(entries: &[EntryDeser], dir: &Path) -> EntryList {
	entries.iter().map(|x| x.to_entry(dir)).collect()
}

/// Loads a manifest from a JSON file
pub fn load(path: &Path) -> anyhow::Result<LoadedManifest> {
	let file = File::open(path)
		.with_context(|| format!("Failed to open manifest file {}", path.display()))?;
	let deser: ManifestDeser =
		serde_json::from_reader(BufReader::new(file)).context("Failed to parse manifest")?;

	let root = match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};
	let loaded = deser
		.into_manifest(root)
		.context("Manifest is invalid")?;

	Ok(loaded)
}
