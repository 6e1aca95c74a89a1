//! Hand-off to the build tool by process-image replacement.

use std::os::unix::process::CommandExt;
use std::process::Command;

use devcask_common::DevcaskError;

use crate::command::BuildCommand;

/// Replace the current process with the assembled command.
///
/// On success control never returns: the build tool inherits stdin,
/// stdout, stderr and the exit status becomes the caller's own, so
/// interactive output (progress bars, prompts) passes through untouched.
/// Returns the error only when `exec` itself fails, e.g. the tool is not
/// on `PATH`.
pub fn exec(command: &BuildCommand) -> DevcaskError {
    tracing::info!(command = %command, "handing off to the build tool");

    let (program, args) = command.split();
    let err = Command::new(program).args(args).exec();
    DevcaskError::Io(err)
}
