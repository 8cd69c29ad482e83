use std::fmt::Display;
use std::path::PathBuf;

use zip::result::ZipError;

/// Error for when required manifest entries do not exist.
/// Contains every missing path, not just the first one found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFilesError {
	/// The missing paths, in the order they were declared
	pub missing: Vec<PathBuf>,
}

impl Display for MissingFilesError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{} required file(s) do not exist:", self.missing.len())?;
		for path in &self.missing {
			write!(f, "\n - {}", path.display())?;
		}
		Ok(())
	}
}

impl std::error::Error for MissingFilesError {}

/// Errors that can stop a build
#[derive(Debug, thiserror::Error)]
pub enum PackError {
	/// Required files in the manifest were missing
	#[error("{}", .0)]
	MissingFiles(#[from] MissingFilesError),
	/// An input archive could not be opened or extracted
	#[error("Failed to read archive {}:\n{}", .path.display(), .source)]
	ArchiveRead {
		/// The archive being read
		path: PathBuf,
		/// The underlying error
		source: ZipError,
	},
	/// An output archive could not be written
	#[error("Failed to write archive {}:\n{}", .path.display(), .source)]
	ArchiveWrite {
		/// The archive being written
		path: PathBuf,
		/// The underlying error
		source: ZipError,
	},
	/// A file or directory could not be copied
	#[error("Failed to copy {} to {}:\n{}", .src.display(), .dest.display(), .source)]
	Copy {
		/// The path being copied
		src: PathBuf,
		/// Where it was being copied to
		dest: PathBuf,
		/// The underlying error
		source: std::io::Error,
	},
	/// Some other filesystem operation failed
	#[error("Filesystem operation on {} failed:\n{}", .path.display(), .source)]
	Io {
		/// The path that was operated on
		path: PathBuf,
		/// The underlying error
		source: std::io::Error,
	},
}

impl PackError {
	/// Shorthand for mapping an I/O error on a path
	pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
		let path = path.into();
		move |source| Self::Io { path, source }
	}
}
