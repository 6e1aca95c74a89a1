//! Assembly of the `docker build` command line.
//!
//! The token order is part of the tool's external contract and is fixed
//! regardless of how the identity or the elevation decision came about.

use std::fmt;
use std::path::PathBuf;

use crate::identity::ResolvedIdentity;

/// Build tool invoked for the image build.
pub const BUILD_TOOL: &str = "docker";

/// Elevation wrapper prepended when the caller cannot reach the daemon.
pub const ELEVATION_COMMAND: &str = "sudo";

/// Everything about the build that is not identity or privilege.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
    /// Image the developer image derives from.
    pub parent_image: String,
    /// Tag for the created image; `dev-<parent_image>` when absent.
    pub image_tag: Option<String>,
    /// Login shell baked into the inner account.
    pub shell_path: String,
    /// Extra `key=value` build args, forwarded in caller order.
    pub extra_build_args: Vec<String>,
    /// Build context directory.
    pub context_dir: PathBuf,
    /// Build file (Dockerfile) path.
    pub build_file: PathBuf,
}

impl BuildConfig {
    /// Effective image tag, applying the `dev-<parent_image>` default.
    #[must_use]
    pub fn image_tag(&self) -> String {
        self.image_tag
            .clone()
            .unwrap_or_else(|| format!("dev-{}", self.parent_image))
    }
}

/// An assembled command line: built once, consumed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCommand {
    tokens: Vec<String>,
}

impl BuildCommand {
    /// Assemble the full token sequence.
    ///
    /// Order: optional elevation prefix, the build tool and `build`, the
    /// six identity/config build args, the caller's extra build args in
    /// their original order, `--tag`, `--file=`, and finally the context
    /// directory.
    #[must_use]
    pub fn assemble(identity: &ResolvedIdentity, elevate: bool, config: &BuildConfig) -> Self {
        let mut tokens = Vec::new();

        if elevate {
            tokens.push(ELEVATION_COMMAND.to_string());
        }
        tokens.push(BUILD_TOOL.to_string());
        tokens.push("build".to_string());

        let build_args = [
            format!("user_id={}", identity.user_id),
            format!("group_id={}", identity.group_id),
            format!("user_name={}", identity.user_name),
            format!("group_name={}", identity.group_name),
            format!("parent_image={}", config.parent_image),
            format!("shell_program={}", config.shell_path),
        ];
        for arg in build_args {
            tokens.push("--build-arg".to_string());
            tokens.push(arg);
        }
        for arg in &config.extra_build_args {
            tokens.push("--build-arg".to_string());
            tokens.push(arg.clone());
        }

        tokens.push("--tag".to_string());
        tokens.push(config.image_tag());
        tokens.push(format!("--file={}", config.build_file.display()));
        tokens.push(config.context_dir.display().to_string());

        Self { tokens }
    }

    /// The full token sequence.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Split into the program to execute and its arguments.
    #[must_use]
    pub fn split(&self) -> (&str, &[String]) {
        (&self.tokens[0], &self.tokens[1..])
    }

    #[cfg(test)]
    pub(crate) fn from_tokens(tokens: Vec<String>) -> Self {
        Self { tokens }
    }
}

impl fmt::Display for BuildCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}
