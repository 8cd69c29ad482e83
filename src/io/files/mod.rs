use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PackError;

/// Create all the directories leading up to a path
pub fn create_leading_dirs(path: &Path) -> std::io::Result<()> {
	if let Some(parent) = path.parent() {
		fs::create_dir_all(parent)?;
	}

	Ok(())
}

/// Remove whatever is at a path, whether it is a file or a directory.
/// Does nothing if the path does not exist
pub fn remove_existing(path: &Path) -> std::io::Result<()> {
	let Ok(meta) = fs::symlink_metadata(path) else {
		return Ok(());
	};
	if meta.is_dir() {
		fs::remove_dir_all(path)
	} else {
		fs::remove_file(path)
	}
}

/// Copies a list of files and directories into a destination directory, which is
/// created if it does not exist. Directories are copied recursively to
/// `destination/<name of directory>` and files are copied to `destination/<name of file>`.
/// Anything already at a destination leaf is replaced.
///
/// Every path in the list is expected to exist
pub fn replicate(entries: &[PathBuf], destination: &Path) -> Result<(), PackError> {
	replicate_excluding(entries, destination, destination)
}

/// Same as [replicate], but nothing inside `exclude` is ever read from the sources.
/// The destination itself is always excluded, so a source directory that contains
/// the destination is copied without copying the destination into itself
pub fn replicate_excluding(
	entries: &[PathBuf],
	destination: &Path,
	exclude: &Path,
) -> Result<(), PackError> {
	fs::create_dir_all(destination).map_err(PackError::io(destination))?;
	let skip = [destination, exclude]
		.into_iter()
		.filter_map(|x| x.canonicalize().ok())
		.collect::<Vec<_>>();

	for entry in entries {
		let name = entry_name(entry)?;
		let dest = destination.join(name);
		if entry.is_dir() {
			if !is_skipped(entry, &skip) {
				copy_dir_recursive(entry, &dest, &skip)?;
			}
		} else {
			copy_file(entry, &dest)?;
		}
	}

	Ok(())
}

/// Copy the contents of a directory recursively to another directory.
/// Existing files are removed before being replaced. Source directories inside any of
/// the `skip` paths are left out
pub fn copy_dir_recursive(src: &Path, dest: &Path, skip: &[PathBuf]) -> Result<(), PackError> {
	let copy_err = |source| PackError::Copy {
		src: src.to_owned(),
		dest: dest.to_owned(),
		source,
	};

	// A file in the way of the directory has to go first
	if dest.exists() && !dest.is_dir() {
		remove_existing(dest).map_err(copy_err)?;
	}
	fs::create_dir_all(dest).map_err(copy_err)?;

	for file in fs::read_dir(src).map_err(copy_err)? {
		let file = file.map_err(copy_err)?;
		let src_path = file.path();
		let dest_path = dest.join(file.file_name());

		if src_path.is_dir() {
			if !is_skipped(&src_path, skip) {
				copy_dir_recursive(&src_path, &dest_path, skip)?;
			}
		} else {
			copy_file(&src_path, &dest_path)?;
		}
	}

	Ok(())
}

/// Checks if a source directory is inside one of the skipped paths
fn is_skipped(dir: &Path, skip: &[PathBuf]) -> bool {
	dir.canonicalize()
		.is_ok_and(|dir| skip.iter().any(|x| dir.starts_with(x)))
}

/// Copy a single file, replacing anything at the destination
pub fn copy_file(src: &Path, dest: &Path) -> Result<(), PackError> {
	let copy_err = |source| PackError::Copy {
		src: src.to_owned(),
		dest: dest.to_owned(),
		source,
	};

	remove_existing(dest).map_err(copy_err)?;
	fs::copy(src, dest).map_err(copy_err)?;

	Ok(())
}

/// Gets the name an entry will have in the destination. Paths like `.` or `mods/..`
/// have no name of their own, so they are canonicalized first
fn entry_name(entry: &Path) -> Result<PathBuf, PackError> {
	if let Some(name) = entry.file_name() {
		return Ok(PathBuf::from(name));
	}

	let canonical = entry.canonicalize().map_err(PackError::io(entry))?;
	canonical
		.file_name()
		.map(PathBuf::from)
		.ok_or_else(|| PackError::Io {
			path: entry.to_owned(),
			source: std::io::Error::new(
				std::io::ErrorKind::InvalidInput,
				"Path has no file or directory name",
			),
		})
}

#[cfg(test)]
mod tests {
	use super::*;

	/// Collects every file under a directory with its contents, sorted by path
	fn read_tree(root: &Path) -> Vec<(PathBuf, Vec<u8>)> {
		let mut out = Vec::new();
		let mut stack = vec![root.to_owned()];
		while let Some(dir) = stack.pop() {
			for entry in fs::read_dir(dir).unwrap() {
				let path = entry.unwrap().path();
				if path.is_dir() {
					stack.push(path);
				} else {
					let contents = fs::read(&path).unwrap();
					out.push((path.strip_prefix(root).unwrap().to_owned(), contents));
				}
			}
		}
		out.sort();
		out
	}

	#[test]
	fn test_replicate_recursive() {
		let dir = tempfile::tempdir().unwrap();
		let mod_dir = dir.path().join("modA");
		fs::create_dir_all(mod_dir.join("sub")).unwrap();
		fs::write(mod_dir.join("sub/file.txt"), "hello").unwrap();
		let single = dir.path().join("single.jar");
		fs::write(&single, "jar").unwrap();

		let dest = dir.path().join("out/mods");
		replicate(&[mod_dir, single], &dest).unwrap();

		assert_eq!(
			fs::read_to_string(dest.join("modA/sub/file.txt")).unwrap(),
			"hello"
		);
		assert_eq!(fs::read_to_string(dest.join("single.jar")).unwrap(), "jar");
	}

	#[test]
	fn test_replicate_trailing_slash() {
		let dir = tempfile::tempdir().unwrap();
		let mod_dir = dir.path().join("fancymod");
		fs::create_dir(&mod_dir).unwrap();
		fs::write(mod_dir.join("a.txt"), "a").unwrap();

		let dest = dir.path().join("out");
		let entry = PathBuf::from(format!("{}/", mod_dir.display()));
		replicate(&[entry], &dest).unwrap();
		assert!(dest.join("fancymod/a.txt").exists());
	}

	#[test]
	fn test_replicate_overwrites() {
		let dir = tempfile::tempdir().unwrap();
		let first = dir.path().join("first/config.txt");
		let second = dir.path().join("second/config.txt");
		fs::create_dir_all(first.parent().unwrap()).unwrap();
		fs::create_dir_all(second.parent().unwrap()).unwrap();
		fs::write(&first, "first").unwrap();
		fs::write(&second, "second").unwrap();

		let dest = dir.path().join("out");
		replicate(&[first, second], &dest).unwrap();
		assert_eq!(
			fs::read_to_string(dest.join("config.txt")).unwrap(),
			"second"
		);
	}

	#[test]
	fn test_replicate_replaces_file_with_dir() {
		let dir = tempfile::tempdir().unwrap();
		let dest = dir.path().join("out");
		fs::create_dir(&dest).unwrap();
		fs::write(dest.join("modA"), "stale").unwrap();

		let mod_dir = dir.path().join("modA");
		fs::create_dir(&mod_dir).unwrap();
		fs::write(mod_dir.join("x"), "x").unwrap();

		replicate(&[mod_dir], &dest).unwrap();
		assert_eq!(fs::read_to_string(dest.join("modA/x")).unwrap(), "x");
	}

	#[test]
	fn test_replicate_idempotent() {
		let dir = tempfile::tempdir().unwrap();
		let mod_dir = dir.path().join("modA");
		fs::create_dir_all(mod_dir.join("nested/deeper")).unwrap();
		fs::write(mod_dir.join("nested/deeper/a.bin"), [0u8, 1, 2, 3]).unwrap();
		fs::write(mod_dir.join("b.txt"), "b").unwrap();
		let file = dir.path().join("c.jar");
		fs::write(&file, "c").unwrap();
		let entries = vec![mod_dir, file];

		let dest = dir.path().join("out");
		replicate(&entries, &dest).unwrap();
		let first = read_tree(&dest);

		fs::remove_dir_all(&dest).unwrap();
		replicate(&entries, &dest).unwrap();
		let second = read_tree(&dest);

		assert_eq!(first, second);
		assert_eq!(first.len(), 3);
	}

	#[test]
	fn test_replicate_empty_creates_destination() {
		let dir = tempfile::tempdir().unwrap();
		let dest = dir.path().join("a/b/c");
		replicate(&[], &dest).unwrap();
		assert!(dest.is_dir());
	}

	#[test]
	fn test_replicate_source_containing_destination() {
		let dir = tempfile::tempdir().unwrap();
		let config = dir.path().join("pack/config");
		fs::create_dir_all(config.join("nested")).unwrap();
		fs::write(config.join("a.txt"), "a").unwrap();
		fs::write(config.join("nested/b.txt"), "b").unwrap();

		let dest = config.join("build/stage");
		replicate(&[config.clone()], &dest).unwrap();

		assert_eq!(
			read_tree(&dest),
			vec![
				(PathBuf::from("config/a.txt"), b"a".to_vec()),
				(PathBuf::from("config/nested/b.txt"), b"b".to_vec()),
			]
		);
	}

	#[test]
	fn test_replicate_excluding() {
		let dir = tempfile::tempdir().unwrap();
		let data = dir.path().join("data");
		fs::create_dir_all(data.join("build/server")).unwrap();
		fs::write(data.join("build/server/server.jar"), "old").unwrap();
		fs::write(data.join("options.txt"), "options").unwrap();

		let dest = dir.path().join("out");
		replicate_excluding(&[data.clone()], &dest, &data.join("build")).unwrap();

		assert!(dest.join("data/options.txt").exists());
		assert!(!dest.join("data/build").exists());
	}

	#[test]
	fn test_replicate_missing_source_fails() {
		let dir = tempfile::tempdir().unwrap();
		let err = replicate(&[dir.path().join("gone.jar")], &dir.path().join("out"));
		assert!(matches!(err, Err(PackError::Copy { .. })));
	}
}
