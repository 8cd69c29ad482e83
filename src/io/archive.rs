use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use itertools::Itertools;
use mcpack_shared::output::{MessageContents, MessageLevel, OutputProcess, PackOutput};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

use super::files::{create_leading_dirs, remove_existing};
use crate::error::PackError;

/// Prefix for scratch workspaces in the system temporary directory
pub const SCRATCH_PREFIX: &str = "mcpack-merge-";

/// Merges a base archive and a list of additions into a new archive at the destination.
///
/// Every archive is extracted in order into a scratch workspace that is unique to this call,
/// so when multiple archives contain the same path the last one wins. The union is then
/// compressed into the destination. The destination is written to a temporary file next to
/// it and moved into place once complete, so it is never left half written.
/// The scratch workspace is removed however this function returns
pub fn merge(
	base: &Path,
	additions: &[PathBuf],
	destination: &Path,
	o: &mut impl PackOutput,
) -> Result<(), PackError> {
	let scratch = tempfile::Builder::new()
		.prefix(SCRATCH_PREFIX)
		.tempdir()
		.map_err(PackError::io(std::env::temp_dir()))?;

	let archives = std::iter::once(base).chain(additions.iter().map(PathBuf::as_path));
	let total = additions.len() + 1;
	let process = OutputProcess::new(o);
	for (i, archive) in archives.enumerate() {
		process.0.display(
			MessageContents::Associated(
				Box::new(MessageContents::Progress {
					current: (i + 1) as u32,
					total: total as u32,
				}),
				Box::new(MessageContents::Simple(format!(
					"Extracting {}",
					archive.display()
				))),
			),
			MessageLevel::Debug,
		);
		extract_archive(archive, scratch.path())?;
	}
	drop(process);

	write_archive(scratch.path(), destination)?;

	let scratch_path = scratch.path().to_owned();
	scratch.close().map_err(PackError::io(scratch_path))?;

	Ok(())
}

/// Extracts all of the files in an archive into a directory, replacing
/// anything that is already there
pub fn extract_archive(path: &Path, dir: &Path) -> Result<(), PackError> {
	let read_err = |source| PackError::ArchiveRead {
		path: path.to_owned(),
		source,
	};

	let file = File::open(path).map_err(|e| read_err(e.into()))?;
	let mut arc = ZipArchive::new(BufReader::new(file)).map_err(read_err)?;
	for i in 0..arc.len() {
		let mut file = arc.by_index(i).map_err(read_err)?;
		let Some(rel_path) = file.enclosed_name() else {
			let message = format!("Member '{}' escapes the archive root", file.name());
			return Err(read_err(
				std::io::Error::new(std::io::ErrorKind::InvalidData, message).into(),
			));
		};
		let out_path = dir.join(&rel_path);

		if file.is_dir() {
			clear_blocking_files(dir, &rel_path).map_err(PackError::io(&out_path))?;
			fs::create_dir_all(&out_path).map_err(PackError::io(&out_path))?;
			continue;
		}

		if let Some(parent) = rel_path.parent() {
			clear_blocking_files(dir, parent).map_err(PackError::io(&out_path))?;
		}
		create_leading_dirs(&out_path).map_err(PackError::io(&out_path))?;
		remove_existing(&out_path).map_err(PackError::io(&out_path))?;
		let mut out_file =
			BufWriter::new(File::create(&out_path).map_err(PackError::io(&out_path))?);
		// Read and write failures can't be told apart here, and a truncated
		// or corrupt member is by far the more likely cause
		std::io::copy(&mut file, &mut out_file).map_err(|e| read_err(e.into()))?;
		out_file.flush().map_err(PackError::io(&out_path))?;
	}

	Ok(())
}

/// Removes any file left by an earlier archive where a directory at `rel_dir`
/// or one of its ancestors needs to be
fn clear_blocking_files(root: &Path, rel_dir: &Path) -> std::io::Result<()> {
	let mut current = root.to_owned();
	for component in rel_dir.components() {
		current.push(component);
		match fs::symlink_metadata(&current) {
			Ok(meta) if !meta.is_dir() => fs::remove_file(&current)?,
			Ok(..) => {}
			// Nothing further down can exist either
			Err(..) => break,
		}
	}

	Ok(())
}

/// Compresses every file under a directory into a new archive. Member names are
/// the paths relative to the directory, written in sorted order
pub fn write_archive(dir: &Path, destination: &Path) -> Result<(), PackError> {
	let write_err = |source| PackError::ArchiveWrite {
		path: destination.to_owned(),
		source,
	};

	create_leading_dirs(destination).map_err(PackError::io(destination))?;
	let parent = match destination.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};

	let mut files = Vec::new();
	collect_files(dir, Path::new(""), &mut files)?;
	files.sort();

	let temp = tempfile::Builder::new()
		.prefix(".mcpack-")
		.suffix(".tmp")
		.tempfile_in(parent)
		.map_err(PackError::io(parent))?;

	let mut arc = ZipWriter::new(BufWriter::new(temp.as_file()));
	for rel_path in files {
		arc.start_file(member_name(&rel_path), SimpleFileOptions::default())
			.map_err(write_err)?;
		let src = dir.join(&rel_path);
		let mut src_file = BufReader::new(File::open(&src).map_err(PackError::io(&src))?);
		std::io::copy(&mut src_file, &mut arc).map_err(|e| write_err(e.into()))?;
	}
	let mut writer = arc.finish().map_err(write_err)?;
	writer.flush().map_err(|e| write_err(e.into()))?;
	drop(writer);

	temp.persist(destination)
		.map_err(|e| write_err(e.error.into()))?;

	Ok(())
}

/// Recursively collects the paths of all files under a directory, relative to it
fn collect_files(root: &Path, rel: &Path, out: &mut Vec<PathBuf>) -> Result<(), PackError> {
	let dir = root.join(rel);
	for entry in fs::read_dir(&dir).map_err(PackError::io(&dir))? {
		let entry = entry.map_err(PackError::io(&dir))?;
		let rel_path = rel.join(entry.file_name());
		if entry.path().is_dir() {
			collect_files(root, &rel_path, out)?;
		} else {
			out.push(rel_path);
		}
	}

	Ok(())
}

/// Converts a relative path to a forward-slash separated archive member name
fn member_name(rel_path: &Path) -> String {
	rel_path
		.components()
		.map(|x| x.as_os_str().to_string_lossy())
		.join("/")
}
