use std::process::Command;

use anyhow::{ensure, Context};

use crate::output::{MessageContents, MessageLevel, NeobuildOutput};
use crate::workspace::Workspace;

/// Run the external installer jar against the workspace, producing the
/// nested library tree. The process inherits our standard streams so its
/// progress is visible live. A launch failure or non-zero exit is fatal
pub fn run_installer(
	workspace: &Workspace,
	installer_file_name: &str,
	o: &mut impl NeobuildOutput,
) -> anyhow::Result<()> {
	o.display(
		MessageContents::StartProcess("Running the NeoForge installer".into()),
		MessageLevel::Important,
	);

	let mut command = Command::new("java");
	command
		.arg("-jar")
		.arg(installer_file_name)
		.arg("--install-client")
		.arg(".")
		.current_dir(workspace.dir());

	let status = command
		.status()
		.context("Failed to launch the installer process")?;
	ensure!(status.success(), "The installer exited with {status}");

	o.display(
		MessageContents::Success("Installer finished".into()),
		MessageLevel::Important,
	);

	Ok(())
}
