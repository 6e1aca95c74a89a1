//! CLI definition and execution.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;
use devcask_common::SystemHost;

use crate::command::{BuildCommand, BuildConfig};
use crate::exec;
use crate::identity::{self, IdentitySpec};
use crate::privilege::PrivilegeContext;

/// Devcask - build a developer image mirroring the host user
///
/// Adds a developer account to an existing docker image. The inner
/// user/group default to the invoking host user so files written to
/// bind-mounted volumes keep host ownership. Missing halves of the
/// user/group specification are resolved from the host account database.
#[derive(Parser, Debug)]
#[command(name = "devcask")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The inner developer user's numeric id
    #[arg(short = 'u', long = "userid", value_name = "UserId")]
    pub user_id: Option<u32>,

    /// The inner developer user's login name
    #[arg(short = 'l', long = "login", value_name = "LoginName")]
    pub user_name: Option<String>,

    /// The inner developer's group id
    #[arg(short = 'g', long = "group", value_name = "GroupId")]
    pub group_id: Option<u32>,

    /// The inner developer's group name
    #[arg(short = 'n', long = "group-name", value_name = "GroupName")]
    pub group_name: Option<String>,

    /// Parent docker image specification
    #[arg(
        short = 'f',
        long = "from",
        value_name = "ParentImage",
        default_value = "ubuntu:16.04"
    )]
    pub parent_image: String,

    /// Tag of the created image (defaults to 'dev-<ParentImage>')
    #[arg(short = 't', long = "tag", value_name = "ImageTag")]
    pub image_tag: Option<String>,

    /// Login shell of the inner user
    #[arg(
        short = 's',
        long = "shell",
        value_name = "Shell",
        default_value = "/bin/bash"
    )]
    pub shell: String,

    /// Extra build args forwarded to docker build (KEY=VALUE, repeatable)
    #[arg(short = 'b', long = "build-arg", value_name = "BuildArg")]
    pub build_args: Vec<String>,

    /// Build context directory
    #[arg(long, value_name = "Dir", default_value = ".")]
    pub context: PathBuf,

    /// Build file path (defaults to '<Dir>/Dockerfile')
    #[arg(long, value_name = "Path")]
    pub file: Option<PathBuf>,

    /// Print the assembled docker command instead of executing it
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Resolve identity and privilege, assemble the command, and run it.
    ///
    /// Unless `--dry-run` was given, a successful run never returns: the
    /// process image is replaced by the build tool.
    ///
    /// # Errors
    ///
    /// Identity resolution and the elevation decision propagate their
    /// errors; a failed `exec` surfaces as an I/O error.
    pub fn execute(self) -> Result<()> {
        let host = SystemHost;

        let spec = IdentitySpec {
            user_id: self.user_id,
            user_name: self.user_name,
            group_id: self.group_id,
            group_name: self.group_name,
        };
        let identity = identity::resolve(&spec, &host)?;

        let privilege = PrivilegeContext::from_host(&host)?;
        tracing::debug!(
            ?identity,
            elevation = privilege.elevation_required(),
            "resolved build inputs"
        );

        let build_file = self
            .file
            .unwrap_or_else(|| self.context.join("Dockerfile"));
        let config = BuildConfig {
            parent_image: self.parent_image,
            image_tag: self.image_tag,
            shell_path: self.shell,
            extra_build_args: self.build_args,
            context_dir: self.context,
            build_file,
        };

        let command = BuildCommand::assemble(&identity, privilege.elevation_required(), &config);

        if self.dry_run {
            println!("{command}");
            return Ok(());
        }

        Err(exec::exec(&command).into())
    }
}
