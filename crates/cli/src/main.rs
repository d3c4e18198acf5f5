mod output;

use std::path::Path;

use anyhow::{bail, Context};
use clap::Parser;
use color_print::cformat;
use reqwest::Client;

use neobuild::build::{self, ARTIFACTS_FILE, DEFAULT_BUILD_DIR};
use neobuild::net::meta::ApiEndpoints;
use neobuild::output::{MessageContents, MessageLevel, NeobuildOutput};
use neobuild::resolve::{self, VersionSpec};

use output::TerminalOutput;

#[derive(Debug, Parser)]
#[command(version, about = "Builds NeoForge client distributions")]
struct Cli {
	/// Build the most recent compatible Minecraft / NeoForge pairing
	#[arg(long)]
	latest: bool,
	/// The Minecraft version to build for, e.g. 1.21.1
	#[arg(long)]
	mc: Option<String>,
	/// The NeoForge version to build, e.g. 21.1.77
	#[arg(long, requires = "mc")]
	neoforge: Option<String>,
	#[arg(short, long)]
	debug: bool,
	#[arg(short = 'D', long)]
	trace: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	run_cli().await
}

/// Run the command line interface
async fn run_cli() -> anyhow::Result<()> {
	let cli = Cli::parse();
	let mut o = TerminalOutput::new(get_log_level(&cli));
	let client = Client::new();
	let endpoints = ApiEndpoints::default();

	// --latest wins over an explicit pair, which wins over --mc alone
	let spec = if cli.latest {
		resolve::resolve_latest(&endpoints, &client, &mut o)
			.await
			.context("Failed to resolve the latest version")?
	} else if let (Some(mc), Some(neoforge)) = (&cli.mc, &cli.neoforge) {
		VersionSpec::from_pair(mc, neoforge)
	} else if let Some(mc) = &cli.mc {
		resolve::resolve_for_minecraft(mc, &endpoints, &client, &mut o)
			.await
			.with_context(|| format!("Failed to resolve a version for Minecraft {mc}"))?
	} else {
		eprintln!(
			"{}",
			cformat!("<r>Specify a Minecraft version with --mc <<version>>, or --latest for the newest pairing")
		);
		eprintln!("Use --mc <version> --neoforge <version> to build an exact pairing");
		bail!("No version was specified");
	};

	let client_jar = build::build_client(
		&spec,
		Path::new(DEFAULT_BUILD_DIR),
		&endpoints,
		&client,
		&mut o,
	)
	.await
	.context("Failed to build the client")?;

	build::record_artifact(Path::new(ARTIFACTS_FILE), &client_jar, &spec)
		.context("Failed to record the built artifact")?;

	o.display(
		MessageContents::Success(format!(
			"Build finished: {} {}",
			spec.mc_version, spec.loader_version
		)),
		MessageLevel::Important,
	);

	Ok(())
}

/// Get the log level based on the debug options
fn get_log_level(cli: &Cli) -> MessageLevel {
	if cli.trace {
		MessageLevel::Trace
	} else if cli.debug {
		MessageLevel::Debug
	} else {
		MessageLevel::Important
	}
}
