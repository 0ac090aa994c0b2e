//! Check command implementation.
//!
//! The `depsync check` command reads the manifest without modifying it and
//! lists the requirements the host does not satisfy.

use std::path::{Path, PathBuf};

use crate::cli::args::CheckArgs;
use crate::config::{validate, SyncConfig};
use crate::error::Result;
use crate::install::InstallChecker;
use crate::installed;
use crate::manifest::ManifestStore;
use crate::ui::Output;

use super::dispatcher::{Command, CommandResult, ConfigSource};

/// The check command implementation.
pub struct CheckCommand {
    project_root: PathBuf,
    source: ConfigSource,
    args: CheckArgs,
}

impl CheckCommand {
    /// Create a new check command.
    pub fn new(project_root: &Path, source: ConfigSource, args: CheckArgs) -> Self {
        Self {
            project_root: project_root.to_path_buf(),
            source,
            args,
        }
    }

    fn config(&self) -> Result<SyncConfig> {
        let mut config = self.source.load(&self.project_root)?;
        if let Some(manifest) = &self.args.manifest {
            config.manifest = manifest.clone();
        }
        validate(&config)?;
        Ok(config)
    }
}

impl Command for CheckCommand {
    fn execute(&self, output: &Output) -> Result<CommandResult> {
        let config = self.config()?;
        let store = ManifestStore::new(self.project_root.join(&config.manifest));

        if !store.exists() {
            output.error(&format!(
                "No manifest at {}. Run 'depsync sync' to generate one.",
                store.path().display()
            ));
            return Ok(CommandResult::failure(2));
        }

        let manifest = store.read()?;
        let snapshot = installed::from_config(&config, &self.project_root).snapshot()?;
        let missing = InstallChecker::new(&snapshot).filter_unsatisfied(&manifest.requirements());

        if missing.is_empty() {
            output.success(&format!(
                "All {} requirement(s) satisfied",
                manifest.len()
            ));
            return Ok(CommandResult::success());
        }

        let theme = output.theme();
        output.always(&theme.format_warning(&format!(
            "{} of {} requirement(s) not installed",
            missing.len(),
            manifest.len()
        )));
        for requirement in &missing {
            output.always(&format!("  {}", requirement));
        }
        Ok(CommandResult::failure(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CONFIG_DIR;
    use crate::ui::{OutputMode, SyncTheme};
    use std::fs;
    use tempfile::TempDir;

    fn project(manifest: Option<&str>, installed: &[&str]) -> TempDir {
        let temp = TempDir::new().unwrap();
        let site = temp.path().join("site");
        fs::create_dir_all(&site).unwrap();
        for dir in installed {
            fs::create_dir_all(site.join(dir)).unwrap();
        }
        let config_dir = temp.path().join(CONFIG_DIR);
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join("config.yml"),
            "registry: dist-info\nsite_packages: [site]\n",
        )
        .unwrap();
        if let Some(content) = manifest {
            fs::write(temp.path().join("requirements.txt"), content).unwrap();
        }
        temp
    }

    fn run(temp: &TempDir) -> CommandResult {
        let cmd = CheckCommand::new(temp.path(), ConfigSource::default(), CheckArgs::default());
        let output = Output::new(OutputMode::Quiet, SyncTheme::plain());
        cmd.execute(&output).unwrap()
    }

    #[test]
    fn all_satisfied_succeeds() {
        let temp = project(Some("Requests==2.0.0\n"), &["requests-2.31.0.dist-info"]);
        assert_eq!(run(&temp).exit_code, 0);
    }

    #[test]
    fn missing_requirement_exits_one() {
        let temp = project(Some("requests\nnumpy\n"), &["requests-2.31.0.dist-info"]);
        assert_eq!(run(&temp).exit_code, 1);
    }

    #[test]
    fn check_leaves_manifest_untouched() {
        let content = "numpy\nnumpy\n# comment\n";
        let temp = project(Some(content), &[]);
        run(&temp);
        let after = fs::read_to_string(temp.path().join("requirements.txt")).unwrap();
        assert_eq!(after, content);
    }

    #[test]
    fn missing_manifest_exits_two() {
        let temp = project(None, &[]);
        assert_eq!(run(&temp).exit_code, 2);
    }
}
