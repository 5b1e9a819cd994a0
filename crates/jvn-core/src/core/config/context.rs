use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::config::{Config, EnvSnapshot, GlobalOptions};
use crate::effects::{CommandRunner, SharedEffects, SystemEffects, Transport};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CommandGroup {
    Env,
    Commit,
}

impl fmt::Display for CommandGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandGroup::Env => "env",
            CommandGroup::Commit => "commit",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct CommandInfo {
    pub group: CommandGroup,
    pub name: &'static str,
}

impl CommandInfo {
    #[must_use]
    pub const fn new(group: CommandGroup, name: &'static str) -> Self {
        Self { group, name }
    }
}

pub struct CommandContext {
    config: Config,
    working_dir: PathBuf,
    effects: SharedEffects,
}

impl CommandContext {
    /// Creates a command context backed by the real process runner and HTTP
    /// transport.
    ///
    /// # Errors
    /// Returns an error if the working directory cannot be read or the HTTP
    /// client cannot be built.
    pub fn new(global: &GlobalOptions) -> Result<Self> {
        let env = EnvSnapshot::capture();
        let config = Config::from_snapshot(&env, global);
        let effects: SharedEffects = Arc::new(SystemEffects::new(config.api())?);
        let working_dir = std::env::current_dir().context("failed to read working directory")?;
        Ok(Self {
            config,
            working_dir,
            effects,
        })
    }

    /// Assembles a context from explicit parts; used when the effects are
    /// substituted.
    pub fn with_parts(
        global: &GlobalOptions,
        env: &EnvSnapshot,
        effects: SharedEffects,
        working_dir: PathBuf,
    ) -> Self {
        Self {
            config: Config::from_snapshot(env, global),
            working_dir,
            effects,
        }
    }

    pub fn runner(&self) -> &dyn CommandRunner {
        self.effects.runner()
    }

    pub fn transport(&self) -> &dyn Transport {
        self.effects.transport()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }
}
