/// Merging zip archives
pub mod archive;
/// Utilities for dealing with the filesystem
pub mod files;
/// Server launcher scripts
pub mod launcher;
