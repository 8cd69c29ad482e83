use std::path::PathBuf;

use itertools::Itertools;
use mcpack_shared::output::{MessageContents, MessageLevel, PackOutput};
use rayon::prelude::*;

use crate::error::MissingFilesError;
use crate::manifest::{BuildTarget, Manifest, ManifestEntry};

/// Settings for how a manifest is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationOptions {
	/// Whether optional entries are allowed to be missing. When this is false,
	/// every entry is treated as required
	pub honor_optional: bool,
}

impl Default for ValidationOptions {
	fn default() -> Self {
		Self {
			honor_optional: true,
		}
	}
}

/// Checks that every entry exists. Missing optional entries are reported and left out
/// of the returned list. Missing required entries are all collected before failing
pub fn validate(
	entries: &[ManifestEntry],
	options: ValidationOptions,
	o: &mut impl PackOutput,
) -> Result<Vec<PathBuf>, MissingFilesError> {
	let mut scan = Scan::new(options);
	let out = scan.check(entries, o);
	scan.finish()?;

	Ok(out)
}

/// A target that has been validated and had its universal entries merged in.
/// Every path in here existed when it was checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveTarget {
	/// Which target this is
	pub target: BuildTarget,
	/// The base archive
	pub base: PathBuf,
	/// Archives to merge over the base
	pub additions: Vec<PathBuf>,
	/// Mods to copy
	pub mods: Vec<PathBuf>,
	/// Coremods to copy
	pub coremods: Vec<PathBuf>,
	/// Data to copy into the target root
	pub data: Vec<PathBuf>,
}

/// Validates the requested targets of a manifest all at once, so that every
/// missing file across all targets is reported together.
///
/// Universal entries come first in each list and target entries after, so that
/// target entries are copied last and win when they collide
pub fn validate_manifest(
	manifest: &Manifest,
	targets: &[BuildTarget],
	options: ValidationOptions,
	o: &mut impl PackOutput,
) -> Result<Vec<EffectiveTarget>, MissingFilesError> {
	let mut scan = Scan::new(options);

	let universal_mods = scan.check(&manifest.universal.mods, o);
	let universal_coremods = scan.check(&manifest.universal.coremods, o);
	let universal_data = scan.check(&manifest.universal.data, o);

	let mut out = Vec::with_capacity(targets.len());
	for target in targets.iter().unique() {
		let target_manifest = manifest.target(*target);

		// The base archive is never optional
		let base = ManifestEntry::required(&target_manifest.archive.base);
		scan.check(std::slice::from_ref(&base), o);

		let additions = scan.check(&target_manifest.archive.additions, o);
		let mods = concat(&universal_mods, scan.check(&target_manifest.mods, o));
		let coremods = concat(
			&universal_coremods,
			scan.check(&target_manifest.coremods, o),
		);
		let data = concat(&universal_data, scan.check(&target_manifest.data, o));

		out.push(EffectiveTarget {
			target: *target,
			base: base.path,
			additions,
			mods,
			coremods,
			data,
		});
	}

	scan.finish()?;

	Ok(out)
}

/// Accumulates missing files over multiple lists
struct Scan {
	options: ValidationOptions,
	missing: Vec<PathBuf>,
}

impl Scan {
	fn new(options: ValidationOptions) -> Self {
		Self {
			options,
			missing: Vec::new(),
		}
	}

	/// Check a list, returning the entries that exist in order
	fn check(&mut self, entries: &[ManifestEntry], o: &mut impl PackOutput) -> Vec<PathBuf> {
		// Existence checks are pure reads, so they can run in parallel.
		// Collecting an indexed iterator keeps the input order
		let exists: Vec<bool> = entries.par_iter().map(|x| x.path.exists()).collect();

		let mut out = Vec::with_capacity(entries.len());
		for (entry, exists) in entries.iter().zip(exists) {
			if exists {
				out.push(entry.path.clone());
			} else if entry.optional && self.options.honor_optional {
				o.display(
					MessageContents::Warning(format!(
						"Skipping optional entry {} as it does not exist",
						entry.path.display()
					)),
					MessageLevel::Important,
				);
			} else {
				o.display(
					MessageContents::Error(format!(
						"Required entry {} does not exist",
						entry.path.display()
					)),
					MessageLevel::Debug,
				);
				self.missing.push(entry.path.clone());
			}
		}

		out
	}

	fn finish(self) -> Result<(), MissingFilesError> {
		if self.missing.is_empty() {
			Ok(())
		} else {
			Err(MissingFilesError {
				missing: self.missing.into_iter().unique().collect(),
			})
		}
	}
}

fn concat(universal: &[PathBuf], specific: Vec<PathBuf>) -> Vec<PathBuf> {
	universal.iter().cloned().chain(specific).collect()
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;
	use std::fs;

	use mcpack_shared::output::{Collect, NoOp};

	use super::*;

	#[test]
	fn test_all_present() {
		let dir = tempfile::tempdir().unwrap();
		let a = dir.path().join("a.jar");
		let b = dir.path().join("b");
		fs::write(&a, "a").unwrap();
		fs::create_dir(&b).unwrap();

		let entries = vec![ManifestEntry::required(&a), ManifestEntry::optional(&b)];
		let out = validate(&entries, ValidationOptions::default(), &mut NoOp).unwrap();
		assert_eq!(out, vec![a, b]);
	}

	#[test]
	fn test_optional_skipped() {
		let dir = tempfile::tempdir().unwrap();
		let a = dir.path().join("a.jar");
		let c = dir.path().join("c.jar");
		fs::write(&a, "a").unwrap();
		fs::write(&c, "c").unwrap();

		let entries = vec![
			ManifestEntry::required(&a),
			ManifestEntry::optional(dir.path().join("gone.jar")),
			ManifestEntry::required(&c),
		];
		let mut o = Collect::new();
		let out = validate(&entries, ValidationOptions::default(), &mut o).unwrap();
		assert_eq!(out, vec![a, c]);
		assert_eq!(out.len(), entries.len() - 1);
		assert_eq!(o.warnings().count(), 1);
		assert!(o.warnings().next().unwrap().contains("gone.jar"));
	}

	#[test]
	fn test_all_missing_reported() {
		let dir = tempfile::tempdir().unwrap();
		let present = dir.path().join("present.jar");
		fs::write(&present, "").unwrap();
		let missing1 = dir.path().join("missing1.jar");
		let missing2 = dir.path().join("missing2.jar");

		let entries = vec![
			ManifestEntry::required(&missing1),
			ManifestEntry::required(&present),
			ManifestEntry::optional(dir.path().join("skipped.jar")),
			ManifestEntry::required(&missing2),
		];
		let err = validate(&entries, ValidationOptions::default(), &mut NoOp).unwrap_err();
		let got: HashSet<_> = err.missing.into_iter().collect();
		let expected: HashSet<_> = [missing1, missing2].into_iter().collect();
		assert_eq!(got, expected);
	}

	#[test]
	fn test_optional_not_honored() {
		let dir = tempfile::tempdir().unwrap();
		let gone = dir.path().join("gone.jar");
		let entries = vec![ManifestEntry::optional(&gone)];
		let options = ValidationOptions {
			honor_optional: false,
		};
		let err = validate(&entries, options, &mut NoOp).unwrap_err();
		assert_eq!(err.missing, vec![gone]);
	}

	#[test]
	fn test_manifest_universal_order() {
		let dir = tempfile::tempdir().unwrap();
		let path = |name: &str| {
			let path = dir.path().join(name);
			fs::write(&path, name).unwrap();
			path
		};
		let mut manifest = Manifest::new(dir.path().join("out"), path("c.zip"), path("s.zip"));
		manifest.universal.mods = vec![ManifestEntry::required(path("u.jar"))];
		manifest.client.mods = vec![ManifestEntry::required(path("client.jar"))];
		manifest.server.mods = vec![ManifestEntry::required(path("server.jar"))];

		let out = validate_manifest(
			&manifest,
			&BuildTarget::ALL,
			ValidationOptions::default(),
			&mut NoOp,
		)
		.unwrap();
		assert_eq!(out.len(), 2);
		assert_eq!(out[0].target, BuildTarget::Client);
		assert_eq!(
			out[0].mods,
			vec![dir.path().join("u.jar"), dir.path().join("client.jar")]
		);
		assert_eq!(
			out[1].mods,
			vec![dir.path().join("u.jar"), dir.path().join("server.jar")]
		);
	}

	#[test]
	fn test_manifest_base_always_required() {
		let dir = tempfile::tempdir().unwrap();
		let client_base = dir.path().join("client.zip");
		fs::write(&client_base, "").unwrap();
		let server_base = dir.path().join("server.zip");
		let mut manifest = Manifest::new(dir.path().join("out"), &client_base, &server_base);
		let missing_mod = dir.path().join("missing.jar");
		manifest.universal.mods = vec![ManifestEntry::required(&missing_mod)];

		let err = validate_manifest(
			&manifest,
			&BuildTarget::ALL,
			ValidationOptions::default(),
			&mut NoOp,
		)
		.unwrap_err();
		// The universal mod is only reported once even though both targets use it
		assert_eq!(err.missing, vec![missing_mod, server_base]);
	}

	#[test]
	fn test_manifest_single_target() {
		let dir = tempfile::tempdir().unwrap();
		let client_base = dir.path().join("client.zip");
		fs::write(&client_base, "").unwrap();
		let manifest = Manifest::new(
			dir.path().join("out"),
			&client_base,
			dir.path().join("server.zip"),
		);

		let out = validate_manifest(
			&manifest,
			&[BuildTarget::Client],
			ValidationOptions::default(),
			&mut NoOp,
		)
		.unwrap();
		assert_eq!(out.len(), 1);
		assert_eq!(out[0].base, client_base);
	}
}
