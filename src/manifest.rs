use std::fmt::Display;
use std::path::{Path, PathBuf};

use crate::DEFAULT_LAUNCHER_COMMAND;

/// A single declared path in a manifest
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManifestEntry {
	/// The path to the file or directory
	pub path: PathBuf,
	/// Whether this entry can be skipped when it does not exist
	pub optional: bool,
}

impl ManifestEntry {
	/// Create an entry that must exist
	pub fn required(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			optional: false,
		}
	}

	/// Create an entry that is skipped if it does not exist
	pub fn optional(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			optional: true,
		}
	}
}

/// An ordered list of manifest entries. Entries later in the list
/// overwrite earlier ones when they end up at the same destination
pub type EntryList = Vec<ManifestEntry>;

/// The archive that a target is built around
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveSpec {
	/// The archive that everything is merged on top of. Always required
	pub base: PathBuf,
	/// Archives whose contents are merged over the base, in order
	pub additions: EntryList,
}

impl ArchiveSpec {
	/// Create a new ArchiveSpec with no additions
	pub fn new(base: impl Into<PathBuf>) -> Self {
		Self {
			base: base.into(),
			additions: Vec::new(),
		}
	}
}

/// Everything that goes into a single target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetManifest {
	/// The archive for the target
	pub archive: ArchiveSpec,
	/// Mods for this target only
	pub mods: EntryList,
	/// Coremods for this target only
	pub coremods: EntryList,
	/// Data files for this target only
	pub data: EntryList,
}

impl TargetManifest {
	/// Create a new TargetManifest with just a base archive
	pub fn new(base: impl Into<PathBuf>) -> Self {
		Self {
			archive: ArchiveSpec::new(base),
			mods: Vec::new(),
			coremods: Vec::new(),
			data: Vec::new(),
		}
	}
}

/// Entries that are shared between the client and the server
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UniversalManifest {
	/// Mods for both targets
	pub mods: EntryList,
	/// Coremods for both targets
	pub coremods: EntryList,
	/// Data files for both targets
	pub data: EntryList,
}

/// A complete description of a modpack
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
	/// The directory that the target trees are written to
	pub output: PathBuf,
	/// The client target
	pub client: TargetManifest,
	/// The server target
	pub server: TargetManifest,
	/// Entries shared by both targets
	pub universal: UniversalManifest,
	/// The command written to the server launcher scripts
	pub launcher: String,
}

impl Manifest {
	/// Create a new manifest with empty lists and the default launcher command
	pub fn new(
		output: impl Into<PathBuf>,
		client_base: impl Into<PathBuf>,
		server_base: impl Into<PathBuf>,
	) -> Self {
		Self {
			output: output.into(),
			client: TargetManifest::new(client_base),
			server: TargetManifest::new(server_base),
			universal: UniversalManifest::default(),
			launcher: DEFAULT_LAUNCHER_COMMAND.into(),
		}
	}

	/// Get the manifest for a specific target
	pub fn target(&self, target: BuildTarget) -> &TargetManifest {
		match target {
			BuildTarget::Client => &self.client,
			BuildTarget::Server => &self.server,
		}
	}

	/// Get the manifest for a specific target mutably
	pub fn target_mut(&mut self, target: BuildTarget) -> &mut TargetManifest {
		match target {
			BuildTarget::Client => &mut self.client,
			BuildTarget::Server => &mut self.server,
		}
	}
}

/// Category of content in a target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
	/// The merged base archive
	Archive,
	/// Mods
	Mods,
	/// Coremods
	Coremods,
	/// Extra data files
	Data,
}

impl Display for Role {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"{}",
			match self {
				Self::Archive => "archive",
				Self::Mods => "mods",
				Self::Coremods => "coremods",
				Self::Data => "data",
			}
		)
	}
}

/// A variant of the modpack that gets its own output tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuildTarget {
	/// The client
	Client,
	/// The dedicated server
	Server,
}

impl BuildTarget {
	/// Both targets, in the order they are built
	pub const ALL: [Self; 2] = [Self::Client, Self::Server];

	/// The name of the subdirectory of the output that this target is written to
	pub fn dir_name(&self) -> &'static str {
		match self {
			Self::Client => "client",
			Self::Server => "server",
		}
	}

	/// Get the directory of this target inside an output directory
	pub fn dir(&self, output: &Path) -> PathBuf {
		output.join(self.dir_name())
	}

	/// Get the path that a role is written to, relative to the target directory.
	/// Data is copied into the target directory itself
	pub fn role_path(&self, role: Role) -> PathBuf {
		match (self, role) {
			(Self::Client, Role::Archive) => PathBuf::from("bin").join("modpack.jar"),
			(Self::Server, Role::Archive) => PathBuf::from("server.jar"),
			(_, Role::Mods) => PathBuf::from("mods"),
			(_, Role::Coremods) => PathBuf::from("coremods"),
			(_, Role::Data) => PathBuf::new(),
		}
	}

	/// Whether this target gets launcher scripts
	pub fn has_launcher(&self) -> bool {
		matches!(self, Self::Server)
	}
}

impl Display for BuildTarget {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.dir_name())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_role_paths() {
		let output = Path::new("build");
		assert_eq!(
			BuildTarget::Client
				.dir(output)
				.join(BuildTarget::Client.role_path(Role::Archive)),
			PathBuf::from("build/client/bin/modpack.jar")
		);
		assert_eq!(
			BuildTarget::Server
				.dir(output)
				.join(BuildTarget::Server.role_path(Role::Archive)),
			PathBuf::from("build/server/server.jar")
		);
		assert_eq!(
			BuildTarget::Server
				.dir(output)
				.join(BuildTarget::Server.role_path(Role::Data)),
			PathBuf::from("build/server/")
		);
	}

	#[test]
	fn test_launcher_only_on_server() {
		assert!(BuildTarget::Server.has_launcher());
		assert!(!BuildTarget::Client.has_launcher());
	}

	#[test]
	fn test_target_mut() {
		let mut manifest = Manifest::new("build", "client.jar", "server.jar");
		manifest
			.target_mut(BuildTarget::Server)
			.mods
			.push(ManifestEntry::required("foo.jar"));
		assert_eq!(manifest.server.mods.len(), 1);
		assert!(manifest.target(BuildTarget::Client).mods.is_empty());
		assert_eq!(manifest.launcher, DEFAULT_LAUNCHER_COMMAND);
	}
}
