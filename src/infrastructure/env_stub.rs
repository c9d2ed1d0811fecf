use crate::utils::{Logger, Result, RiggerError};
use std::path::{Path, PathBuf};

/// Manages the production-only environment stub lifecycle.
///
/// The build requires an `env.js` next to the sources, but the file is
/// deployment-provided and not checked in. Before a production build,
/// a stub is copied from the template if the real file is absent; after
/// the build, the stub is removed again — only if this manager created
/// it. A pre-existing `env.js` is never touched.
pub struct EnvStubManager {
    env_file: PathBuf,
    template: PathBuf,
    created: bool,
}

impl EnvStubManager {
    pub fn new(root: &Path) -> Self {
        let env_file = root.join("env.js");
        let template = root.join("env.js.example");
        Self {
            env_file,
            template,
            created: false,
        }
    }

    /// Pre-build hook: ensure the env stub exists.
    ///
    /// Returns whether a stub was created. I/O failures are fatal — the
    /// build must not continue with the file missing.
    pub fn before_run(&mut self) -> Result<bool> {
        if self.env_file.exists() {
            Logger::debug(&format!(
                "env stub present, leaving untouched: {}",
                self.env_file.display()
            ));
            return Ok(false);
        }

        if !self.template.exists() {
            return Err(RiggerError::config(format!(
                "env stub template missing: {}",
                self.template.display()
            )));
        }

        std::fs::copy(&self.template, &self.env_file)?;
        self.created = true;
        Logger::env_stub_created(&self.env_file.display().to_string());
        Ok(true)
    }

    /// Post-build hook: remove the stub, but only if `before_run`
    /// created it in this invocation.
    pub fn after_run(&mut self) -> Result<()> {
        if !self.created {
            return Ok(());
        }

        std::fs::remove_file(&self.env_file)?;
        self.created = false;
        Logger::env_stub_removed(&self.env_file.display().to_string());
        Ok(())
    }

    pub fn env_file(&self) -> &Path {
        &self.env_file
    }
}
