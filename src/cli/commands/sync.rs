//! Sync command implementation.
//!
//! The `depsync sync` command runs the full reconciliation and prints the
//! run summary.

use std::path::{Path, PathBuf};

use crate::cli::args::SyncArgs;
use crate::config::{validate, SyncConfig};
use crate::error::Result;
use crate::install::PipInstaller;
use crate::installed;
use crate::manifest::{ManifestGenerator, PipreqsGenerator};
use crate::orchestrator::{Orchestrator, RunOptions};
use crate::ui::{render_summary, Output};

use super::dispatcher::{Command, CommandResult, ConfigSource};

/// The sync command implementation.
pub struct SyncCommand {
    project_root: PathBuf,
    source: ConfigSource,
    args: SyncArgs,
}

impl SyncCommand {
    /// Create a new sync command.
    pub fn new(project_root: &Path, source: ConfigSource, args: SyncArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            source,
            args,
        }
    }

    /// Load config and apply the command-line overrides.
    fn config(&self) -> Result<SyncConfig> {
        let mut config = self.source.load(&self.project_root)?;
        apply_overrides(&mut config, &self.args);
        validate(&config)?;
        Ok(config)
    }

    fn options(&self) -> RunOptions {
        RunOptions {
            skip_bootstrap: self.args.no_bootstrap,
            skip_submodule: self.args.no_submodule,
        }
    }
}

/// Apply `args` on top of `config`.
pub fn apply_overrides(config: &mut SyncConfig, args: &SyncArgs) {
    if let Some(manifest) = &args.manifest {
        config.manifest = manifest.clone();
    }
    if let Some(batch_size) = args.batch_size {
        config.batch_size = batch_size;
    }
    if let Some(timeout) = args.timeout {
        config.install_timeout = timeout;
    }
    if args.no_generate {
        config.generator.enabled = false;
    }
}

impl Command for SyncCommand {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        let config = self.config()?;
        let root = &self.project_root;

        let installer =
            PipInstaller::new(&config.python, config.install_args.clone()).with_cwd(root);
        let bootstrap_installer = installer.plain();
        let registry = installed::from_config(&config, root);
        let pipreqs = PipreqsGenerator::new(&config.python, root, config.generator.ignore.clone())
            .timeout(config.command_timeout());
        let generator: Option<&dyn ManifestGenerator> = if config.generator.enabled {
            Some(&pipreqs)
        } else {
            None
        };

        let summary = Orchestrator::new(&config, root, &installer, registry.as_ref())
            .generator(generator)
            .bootstrap_installer(&bootstrap_installer)
            .options(self.options())
            .run();

        for line in render_summary(&summary, output.theme(), output.mode()) {
            output.always(&line);
        }

        if self.args.strict && summary.has_failures() {
            Ok(CommandResult::failure(1))
        } else {
            Ok(CommandResult::success())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SyncError;
    use crate::ui::{OutputMode, SyncTheme};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn overrides_replace_config_values() {
        let mut config = SyncConfig::default();
        let args = SyncArgs {
            manifest: Some(PathBuf::from("deps/requirements.txt")),
            batch_size: Some(8),
            timeout: Some(0),
            no_generate: true,
            ..Default::default()
        };

        apply_overrides(&mut config, &args);

        assert_eq!(config.manifest, PathBuf::from("deps/requirements.txt"));
        assert_eq!(config.batch_size, 8);
        assert_eq!(config.install_timeout(), None);
        assert!(!config.generator.enabled);
    }

    #[test]
    fn absent_overrides_keep_config() {
        let mut config = SyncConfig::default();
        apply_overrides(&mut config, &SyncArgs::default());
        assert_eq!(config, SyncConfig::default());
    }

    #[test]
    fn zero_batch_size_override_is_rejected() {
        let temp = TempDir::new().unwrap();
        let args = SyncArgs {
            batch_size: Some(0),
            ..Default::default()
        };
        let cmd = SyncCommand::new(temp.path(), ConfigSource::default(), args);
        let output = Output::new(OutputMode::Quiet, SyncTheme::plain());

        let err = cmd.execute(&output).unwrap_err();
        assert!(matches!(err, SyncError::ConfigValidationError { .. }));
    }

    #[test]
    fn options_follow_flags() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path()).unwrap();
        let args = SyncArgs {
            no_bootstrap: true,
            ..Default::default()
        };
        let cmd = SyncCommand::new(temp.path(), ConfigSource::default(), args);
        let options = cmd.options();
        assert!(options.skip_bootstrap);
        assert!(!options.skip_submodule);
    }
}
