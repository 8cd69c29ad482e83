use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

use mcpack_shared::output::{MessageContents, MessageLevel, OutputSection, PackOutput};

use crate::error::PackError;
use crate::io::archive::merge;
use crate::io::files::{remove_existing, replicate_excluding};
use crate::io::launcher::emit_launcher;
use crate::manifest::{BuildTarget, Manifest, Role};
use crate::validate::{validate_manifest, EffectiveTarget, ValidationOptions};

/// A step in the build of a single target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildStage {
	/// Checking that the files in the manifest exist
	Validating,
	/// Removing the previous output of the target
	Cleaning,
	/// Merging the base archive with its additions
	MergingArchive,
	/// Copying mods
	CopyingMods,
	/// Copying coremods
	CopyingCoremods,
	/// Copying data files
	CopyingData,
	/// Writing the launcher scripts. Only done for the server
	EmittingLauncher,
	/// Moving the finished target into its final location
	Publishing,
	/// The target is finished
	Done,
}

impl Display for BuildStage {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"{}",
			match self {
				Self::Validating => "Validating files",
				Self::Cleaning => "Cleaning previous output",
				Self::MergingArchive => "Merging archive",
				Self::CopyingMods => "Copying mods",
				Self::CopyingCoremods => "Copying coremods",
				Self::CopyingData => "Copying data",
				Self::EmittingLauncher => "Writing launcher scripts",
				Self::Publishing => "Publishing output",
				Self::Done => "Done",
			}
		)
	}
}

/// Builds the given targets of a manifest, returning the directory of each built target.
///
/// All targets are validated before anything is written, so a manifest with missing files
/// produces no output at all. Each target is then built from scratch into a staging
/// directory inside the output and only moved to `<output>/<target>` once it is complete
pub fn build(
	manifest: &Manifest,
	targets: &[BuildTarget],
	options: ValidationOptions,
	o: &mut impl PackOutput,
) -> Result<Vec<PathBuf>, PackError> {
	o.display(
		MessageContents::StartProcess(BuildStage::Validating.to_string()),
		MessageLevel::Important,
	);
	let effective = validate_manifest(manifest, targets, options, o)?;

	let mut out = Vec::with_capacity(effective.len());
	for target in &effective {
		out.push(build_target(target, manifest, o)?);
	}

	Ok(out)
}

/// Builds a single validated target
pub fn build_target(
	target: &EffectiveTarget,
	manifest: &Manifest,
	o: &mut impl PackOutput,
) -> Result<PathBuf, PackError> {
	o.display(
		MessageContents::Header(format!("Building {}", target.target)),
		MessageLevel::Important,
	);

	let section = OutputSection::new(o);
	let o = &mut *section.0;

	let mut stage = BuildStage::Cleaning;
	let result = run_stages(target, manifest, &mut stage, o);
	match &result {
		Ok(dir) => o.display(
			MessageContents::Success(format!("Built {} at {}", target.target, dir.display())),
			MessageLevel::Important,
		),
		Err(..) => o.display(
			MessageContents::Error(format!(
				"Build of {} failed at stage '{stage}'",
				target.target
			)),
			MessageLevel::Important,
		),
	}

	result
}

fn run_stages(
	target: &EffectiveTarget,
	manifest: &Manifest,
	stage: &mut BuildStage,
	o: &mut impl PackOutput,
) -> Result<PathBuf, PackError> {
	let kind = target.target;
	let dest = kind.dir(&manifest.output);

	enter(stage, BuildStage::Cleaning, o);
	remove_existing(&dest).map_err(PackError::io(&dest))?;
	fs::create_dir_all(&manifest.output).map_err(PackError::io(&manifest.output))?;
	remove_stale_staging(&manifest.output, kind)?;
	// Removed automatically if anything below fails
	let staging = tempfile::Builder::new()
		.prefix(&staging_prefix(kind))
		.tempdir_in(&manifest.output)
		.map_err(PackError::io(&manifest.output))?;
	let root = staging.path();

	enter(stage, BuildStage::MergingArchive, o);
	merge(
		&target.base,
		&target.additions,
		&root.join(kind.role_path(Role::Archive)),
		o,
	)?;

	// The output holds this staging directory, so it is never copied from
	let output = &manifest.output;

	enter(stage, BuildStage::CopyingMods, o);
	let mods = root.join(kind.role_path(Role::Mods));
	replicate_excluding(&target.mods, &mods, output)?;

	enter(stage, BuildStage::CopyingCoremods, o);
	let coremods = root.join(kind.role_path(Role::Coremods));
	replicate_excluding(&target.coremods, &coremods, output)?;

	enter(stage, BuildStage::CopyingData, o);
	let data = root.join(kind.role_path(Role::Data));
	replicate_excluding(&target.data, &data, output)?;

	if kind.has_launcher() {
		enter(stage, BuildStage::EmittingLauncher, o);
		emit_launcher(&manifest.launcher, root)?;
	}

	enter(stage, BuildStage::Publishing, o);
	fs::rename(root, &dest).map_err(PackError::io(&dest))?;
	// The staging directory was moved, so dropping it has nothing left to remove
	drop(staging);

	*stage = BuildStage::Done;

	Ok(dest)
}

/// Removes staging directories of a target left behind by a build that never finished
fn remove_stale_staging(output: &Path, kind: BuildTarget) -> Result<(), PackError> {
	let prefix = staging_prefix(kind);
	for entry in fs::read_dir(output).map_err(PackError::io(output))? {
		let entry = entry.map_err(PackError::io(output))?;
		if entry.file_name().to_string_lossy().starts_with(&prefix) {
			let path = entry.path();
			remove_existing(&path).map_err(PackError::io(&path))?;
		}
	}

	Ok(())
}

fn staging_prefix(kind: BuildTarget) -> String {
	format!(".{}-", kind.dir_name())
}

fn enter(stage: &mut BuildStage, next: BuildStage, o: &mut impl PackOutput) {
	*stage = next;
	o.display(
		MessageContents::StartProcess(next.to_string()),
		MessageLevel::Extra,
	);
}
