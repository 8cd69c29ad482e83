mod build;

use std::path::PathBuf;

use anyhow::bail;
use clap::{Parser, Subcommand};
use color_print::{cformat, cprintln};
use mcpack::shared::output::{MessageContents, MessageLevel, PackOutput};
use mcpack_config::DEFAULT_MANIFEST_NAME;

use super::output::TerminalOutput;

#[derive(Debug, Subcommand)]
pub enum Command {
	#[command(about = "Build the client and server modpacks")]
	Build {
		/// Path to the manifest file
		#[arg(short, long, default_value = DEFAULT_MANIFEST_NAME)]
		config: PathBuf,
		/// Directory to write the output to, overriding the manifest
		#[arg(short, long)]
		output: Option<PathBuf>,
		/// Only build the client
		#[arg(long, conflicts_with = "server_only")]
		client_only: bool,
		/// Only build the server
		#[arg(long)]
		server_only: bool,
	},
	#[command(about = "Check that every file in the manifest exists without building")]
	Check {
		/// Path to the manifest file
		#[arg(short, long, default_value = DEFAULT_MANIFEST_NAME)]
		config: PathBuf,
	},
	#[command(about = "Print the mcpack version")]
	Version,
}

#[derive(Debug, Parser)]
#[command(name = "mcpack")]
pub struct Cli {
	#[command(subcommand)]
	command: Command,
	#[arg(short, long, global = true)]
	debug: bool,
	#[arg(short = 'D', long, global = true)]
	trace: bool,
}

/// Run the command line interface
pub fn run_cli() -> anyhow::Result<()> {
	// Parse the CLI
	let cli = Cli::try_parse();
	if let Err(e) = &cli {
		if let clap::error::ErrorKind::DisplayHelp
		| clap::error::ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
		| clap::error::ErrorKind::DisplayVersion = e.kind()
		{
			println!("{e}");
			return Ok(());
		} else {
			eprintln!("{}", cformat!("<r>{e}"));
			bail!("");
		}
	}
	let cli = cli?;

	let mut data = CmdData::new();
	let log_level = get_log_level(&cli);
	data.output.set_log_level(log_level);

	let res = match cli.command {
		Command::Build {
			config,
			output,
			client_only,
			server_only,
		} => build::build(&mut data, &config, output, client_only, server_only),
		Command::Check { config } => build::check(&mut data, &config),
		Command::Version => {
			print_version();
			Ok(())
		}
	};

	if let Err(e) = &res {
		data.output.display(
			MessageContents::Error(format!("{e:?}")),
			MessageLevel::Important,
		);
	}

	res
}

/// Get the log level based on the debug options
fn get_log_level(cli: &Cli) -> MessageLevel {
	if cli.trace {
		MessageLevel::Trace
	} else if cli.debug {
		MessageLevel::Debug
	} else {
		MessageLevel::Extra
	}
}

/// Data passed to commands
pub struct CmdData {
	pub output: TerminalOutput,
}

impl CmdData {
	pub fn new() -> Self {
		Self {
			output: TerminalOutput::new(),
		}
	}
}

/// Print the mcpack version
fn print_version() {
	let version = env!("CARGO_PKG_VERSION");
	let mcpack_version = mcpack::VERSION;
	cprintln!("CLI version: <g>{}</g>", version);
	cprintln!("mcpack version: <g>{}</g>", mcpack_version);
}
