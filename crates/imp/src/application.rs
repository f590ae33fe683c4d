use std::path::Path;

use imp_router::{MatchedRoute, Router};
use indexmap::IndexMap;

use crate::command::{Action, Command};
use crate::config::{self, Config};
use crate::error::{ExitCode, ImpError, ImpResult};
use crate::help;
use crate::manifest::{BootError, LoadedManifest, load_manifest};

/// An imp application: its commands, the routes leading to them and its
/// config.
///
/// Applications hold no global state, so several can live in one process.
#[derive(Debug, Clone)]
pub struct Application {
    name: String,
    router: Router<String>,
    commands: IndexMap<String, Command>,
    config: Config,
}

impl Application {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            router: Router::new(),
            commands: IndexMap::new(),
            config: Config::new(),
        }
    }

    /// Load the manifest at `path` and boot an application from it.
    pub fn load<F>(path: &Path, bind: F) -> ImpResult<Self>
    where
        F: FnMut(&str, &str) -> Action,
    {
        let loaded = load_manifest(path)?;
        let name = loaded.manifest.name.clone().unwrap_or_else(|| {
            loaded
                .root_path
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "imp".to_string())
        });
        let mut app = Self::new(name);
        app.boot(&loaded, bind)?;
        Ok(app)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register `command` under its own name, replacing any command that
    /// already has that name.
    pub fn command(&mut self, command: Command) -> &mut Self {
        let name = command.name().to_string();
        self.router.register(name.clone(), name.clone());
        self.commands.insert(name, command);
        self
    }

    /// Route an extra `path` to a registered command, optionally with a fixed
    /// action.
    pub fn route(&mut self, path: &str, command: &str, action: Option<&str>) -> ImpResult<&mut Self> {
        if !self.commands.contains_key(command) {
            return Err(ImpError::UnknownCommand(command.to_string()));
        }
        match action {
            Some(action) => {
                self.router
                    .register_with_action(path, command.to_string(), action)
            }
            None => self.router.register(path, command.to_string()),
        }
        Ok(self)
    }

    /// Give a command a new name. Its default route moves with it and extra
    /// routes keep pointing at it.
    pub fn rename_command(&mut self, old: &str, new: &str) -> ImpResult<()> {
        let Some(mut command) = self.commands.shift_remove(old) else {
            return Err(ImpError::UnknownCommand(old.to_string()));
        };
        self.router.remove(old);

        for (path, route) in self.router.routes() {
            if route.command == old {
                match route.action {
                    Some(action) => {
                        self.router
                            .register_with_action(path, new.to_string(), action)
                    }
                    None => self.router.register(path, new.to_string()),
                }
            }
        }

        tracing::debug!(old, new, "renamed command");
        command.rename(new);
        self.command(command);
        Ok(())
    }

    pub fn resolve<I, S>(&self, args: I) -> Option<MatchedRoute<String>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.router.recognize(args)
    }

    /// Resolve `args` and dispatch to the matched command and action.
    pub fn run<I, S>(&self, args: I) -> ImpResult<ExitCode>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let Some(matched) = self.router.recognize(args.iter().cloned()) else {
            return Err(ImpError::UnknownCommand(args.join(" ")));
        };
        let Some(command) = self.commands.get(&matched.command) else {
            return Err(ImpError::UnknownCommand(matched.command.clone()));
        };
        command.dispatch(&matched.action, matched.args, &self.config)
    }

    /// Drop every route and command and reset the config to its defaults.
    pub fn reset(&mut self) {
        self.router.reset();
        self.commands.clear();
        self.config.setup(Vec::<(String, serde_json::Value)>::new());
    }

    /// Reset, then rebuild the application from a loaded manifest.
    ///
    /// `bind` is called once per declared action with the command and action
    /// names, and returns the handler to run.
    pub fn boot<F>(&mut self, loaded: &LoadedManifest, mut bind: F) -> ImpResult<()>
    where
        F: FnMut(&str, &str) -> Action,
    {
        self.reset();

        let manifest = &loaded.manifest;
        self.config.setup(manifest.config.clone());
        self.config.set(
            config::ROOT_PATH,
            loaded.root_path.to_string_lossy().into_owned(),
        );
        self.config.set(
            config::MANIFEST,
            loaded.manifest_path.to_string_lossy().into_owned(),
        );

        for decl in &manifest.commands {
            let mut command = Command::new(decl.name.clone());
            if let Some(summary) = &decl.summary {
                command = command.summary(summary.clone());
            }
            if let Some(description) = &decl.description {
                command = command.description(description.clone());
            }
            for option in &decl.options {
                command = command.arg(option.to_builder());
            }
            for action in &decl.actions {
                command = command.bind(action, bind(&decl.name, action));
            }
            if let Some(parent) = &decl.inherits {
                let Some(parent) = self.commands.get(parent) else {
                    return Err(BootError::UnknownParent {
                        command: decl.name.clone(),
                        parent: parent.clone(),
                    }
                    .into());
                };
                command = command.inherit(parent);
            }
            self.command(command);

            for route in &decl.routes {
                self.route(&route.path, &decl.name, route.action.as_deref())?;
            }
        }

        tracing::info!(
            app = %self.name,
            commands = self.commands.len(),
            routes = self.router.len(),
            "booted application"
        );
        Ok(())
    }

    /// Listing of every command.
    pub fn help(&self) -> String {
        help::application_help(self.commands.values())
    }

    /// Help for the command called `name`.
    pub fn command_help(&self, name: &str) -> Option<String> {
        self.commands
            .get(name)
            .map(|cmd| help::command_help(&self.name, cmd))
    }

    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    pub fn get_command(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub fn router(&self) -> &Router<String> {
        &self.router
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }
}
