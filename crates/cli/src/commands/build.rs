use std::path::{Path, PathBuf};

use anyhow::Context;
use mcpack::shared::output::{MessageContents, MessageLevel, PackOutput};
use mcpack::shared::util::cap_first_letter;
use mcpack::{validate_manifest, BuildTarget};

use super::CmdData;

pub fn build(
	data: &mut CmdData,
	config: &Path,
	output: Option<PathBuf>,
	client_only: bool,
	server_only: bool,
) -> anyhow::Result<()> {
	let mut loaded = mcpack_config::load(config)?;
	if let Some(output) = output {
		loaded.manifest.output = output;
	}

	if !loaded.options.honor_optional {
		data.output.display(
			MessageContents::Notice("Optional entries are treated as required".into()),
			MessageLevel::Important,
		);
	}

	let targets = get_targets(client_only, server_only);
	let built = mcpack::build(&loaded.manifest, targets, loaded.options, &mut data.output)
		.context("Failed to build modpack")?;

	data.output.display(
		MessageContents::Success(format!("Built {} target(s)", built.len())),
		MessageLevel::Important,
	);

	Ok(())
}

pub fn check(data: &mut CmdData, config: &Path) -> anyhow::Result<()> {
	let loaded = mcpack_config::load(config)?;
	let effective = validate_manifest(
		&loaded.manifest,
		&BuildTarget::ALL,
		loaded.options,
		&mut data.output,
	)
	.context("Manifest check failed")?;

	for target in effective {
		data.output.display(
			MessageContents::Header(cap_first_letter(target.target.dir_name())),
			MessageLevel::Important,
		);
		let base = target.base.display().to_string();
		let counts = [
			("additions", target.additions.len()),
			("mods", target.mods.len()),
			("coremods", target.coremods.len()),
			("data", target.data.len()),
		];
		let properties = std::iter::once(("base", base))
			.chain(counts.into_iter().map(|(key, len)| (key, len.to_string())));
		for (key, value) in properties {
			data.output.display(
				MessageContents::ListItem(Box::new(MessageContents::Property(
					key.into(),
					Box::new(MessageContents::Simple(value)),
				))),
				MessageLevel::Important,
			);
		}
	}
	data.output.display(
		MessageContents::Success("All required files exist".into()),
		MessageLevel::Important,
	);

	Ok(())
}

/// Get which targets to build from the CLI flags
fn get_targets(client_only: bool, server_only: bool) -> &'static [BuildTarget] {
	if client_only {
		&[BuildTarget::Client]
	} else if server_only {
		&[BuildTarget::Server]
	} else {
		&BuildTarget::ALL
	}
}
