use std::path::Path;

use crate::error::PackError;

/// Name of the Windows launcher script
pub const BATCH_SCRIPT: &str = "start.bat";
/// Name of the Unix launcher script
pub const SHELL_SCRIPT: &str = "start.sh";

/// Writes the launch command as the entire contents of both launcher scripts in a directory,
/// replacing them if they exist
pub fn emit_launcher(command: &str, destination_dir: &Path) -> Result<(), PackError> {
	for name in [BATCH_SCRIPT, SHELL_SCRIPT] {
		let path = destination_dir.join(name);
		std::fs::write(&path, command).map_err(PackError::io(&path))?;
	}

	set_executable(&destination_dir.join(SHELL_SCRIPT))?;

	Ok(())
}

#[cfg(target_family = "unix")]
fn set_executable(path: &Path) -> Result<(), PackError> {
	use std::os::unix::fs::PermissionsExt;

	let permissions = std::fs::Permissions::from_mode(0o755);
	std::fs::set_permissions(path, permissions).map_err(PackError::io(path))
}

#[cfg(not(target_family = "unix"))]
fn set_executable(_path: &Path) -> Result<(), PackError> {
	Ok(())
}
