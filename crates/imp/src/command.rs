use std::fmt;
use std::sync::Arc;

use imp_options::{OptionBuilder, OptionDef, OptionParser, ParsedArguments};
use imp_router::action_name;
use indexmap::IndexMap;

use crate::config::Config;
use crate::error::{CommandResult, ExitCode, ImpError, ImpResult};

/// Handler bound to a command action.
pub type Action = Arc<dyn Fn(&Invocation<'_>) -> CommandResult + Send + Sync>;

/// Everything an action sees when it runs.
#[derive(Debug)]
pub struct Invocation<'a> {
    pub command: &'a str,
    pub action: &'a str,
    pub arguments: ParsedArguments,
    pub config: &'a Config,
}

/// A named command with an option schema and a set of actions.
///
/// ```
/// use imp::{Command, Config};
/// use imp_options::OptionDef;
///
/// let find = Command::new("find")
///     .arg(OptionDef::define("verbose").default(false))
///     .action("default", |inv| Ok(u32::from(inv.arguments.is_set("verbose"))));
///
/// let status = find.dispatch("default", ["--verbose"], &Config::new()).unwrap();
/// assert_eq!(status, 1);
/// ```
#[derive(Clone)]
pub struct Command {
    name: String,
    summary: String,
    description: String,
    options: Vec<OptionDef>,
    actions: IndexMap<String, Action>,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("summary", &self.summary)
            .field("options", &self.options)
            .field("actions", &self.actions.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: String::new(),
            description: String::new(),
            options: Vec::new(),
            actions: IndexMap::new(),
        }
    }

    /// A command named after the type `T` (`FindAll` => `"find all"`).
    pub fn of<T: ?Sized>() -> Self {
        Self::new(default_name(std::any::type_name::<T>()))
    }

    pub fn summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Declare an option from a builder.
    pub fn arg(self, builder: OptionBuilder) -> Self {
        self.option(builder.build())
    }

    pub fn option(mut self, option: OptionDef) -> Self {
        self.options.push(option);
        self
    }

    /// Bind `handler` to `name`. Dashes in the name are folded to `_`, the
    /// same way the router names inferred actions.
    pub fn action<F>(mut self, name: &str, handler: F) -> Self
    where
        F: Fn(&Invocation<'_>) -> CommandResult + Send + Sync + 'static,
    {
        self.actions.insert(action_name(name), Arc::new(handler));
        self
    }

    pub fn bind(mut self, name: &str, handler: Action) -> Self {
        self.actions.insert(action_name(name), handler);
        self
    }

    /// Take over `parent`'s options and any actions not defined here.
    ///
    /// Parent options come first so they keep their place in help output.
    pub fn inherit(mut self, parent: &Command) -> Self {
        let mut options = parent.options.clone();
        options.append(&mut self.options);
        self.options = options;

        for (name, handler) in &parent.actions {
            if !self.actions.contains_key(name) {
                self.actions.insert(name.clone(), Arc::clone(handler));
            }
        }
        self
    }

    pub(crate) fn rename(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn summary_text(&self) -> &str {
        &self.summary
    }

    pub fn description_text(&self) -> &str {
        &self.description
    }

    pub fn options(&self) -> &[OptionDef] {
        &self.options
    }

    pub fn action_names(&self) -> impl Iterator<Item = &str> {
        self.actions.keys().map(String::as_str)
    }

    pub fn has_action(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// A parser over this command's option schema.
    pub fn parser(&self) -> OptionParser {
        OptionParser::new(self.options.iter().cloned())
    }

    /// Parse `args` against the schema and run `action`.
    ///
    /// The action is looked up before any parsing happens.
    pub fn dispatch<I, S>(&self, action: &str, args: I, config: &Config) -> ImpResult<ExitCode>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let Some(handler) = self.actions.get(action) else {
            return Err(ImpError::ActionNotFound {
                action: action.to_string(),
                command: self.name.clone(),
            });
        };

        let arguments = self.parser().parse(args)?;
        tracing::debug!(command = %self.name, action, "dispatching");

        let invocation = Invocation {
            command: &self.name,
            action,
            arguments,
            config,
        };
        Ok(handler(&invocation)?)
    }
}

/// Command name derived from a Rust type path: the last segment with generics
/// stripped, split into lowercase words at case boundaries.
fn default_name(type_name: &str) -> String {
    let base = type_name.split('<').next().unwrap_or(type_name);
    let base = base.rsplit("::").next().unwrap_or(base);

    let chars: Vec<char> = base.chars().collect();
    let mut out = String::with_capacity(base.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }
    out.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use imp_options::{ParseError, Value};
    use std::sync::Mutex;

    struct Verysilly;
    struct UsesCamelCase;
    struct HTTPServer;

    fn simple() -> Command {
        Command::new("dispatch simple").action("go", |_| Ok(0))
    }

    #[test]
    fn default_names_come_from_type_names() {
        assert_eq!(Command::of::<Verysilly>().name(), "verysilly");
        assert_eq!(Command::of::<UsesCamelCase>().name(), "uses camel case");
        assert_eq!(Command::of::<HTTPServer>().name(), "http server");
        assert_eq!(default_name("app::commands::FindAll"), "find all");
        assert_eq!(default_name("app::Wrapper<app::Inner>"), "wrapper");
        assert_eq!(default_name("snake_case"), "snake case");
    }

    #[test]
    fn dispatch_runs_action() {
        assert_eq!(simple().dispatch("go", Vec::<String>::new(), &Config::new()).unwrap(), 0);
    }

    #[test]
    fn dispatch_rejects_unknown_switches() {
        let err = simple().dispatch("go", ["-a"], &Config::new()).unwrap_err();
        assert!(matches!(err, ImpError::Parse(ParseError::InvalidSwitch(_))));
    }

    #[test]
    fn dispatch_reports_missing_action() {
        let err = simple()
            .dispatch("invalid", Vec::<String>::new(), &Config::new())
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Action 'invalid' was not found in dispatch simple"
        );
    }

    #[test]
    fn missing_action_wins_over_bad_arguments() {
        let err = simple().dispatch("invalid", ["-a"], &Config::new()).unwrap_err();
        assert!(matches!(err, ImpError::ActionNotFound { .. }));
    }

    #[test]
    fn optional_arguments_are_parsed() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let cmd = Command::new("with args")
            .arg(OptionDef::define("verbose"))
            .action("go", move |inv| {
                sink.lock().unwrap().push(inv.arguments.is_set("verbose"));
                Ok(0)
            });

        cmd.dispatch("go", Vec::<String>::new(), &Config::new()).unwrap();
        cmd.dispatch("go", ["--verbose"], &Config::new()).unwrap();
        assert_eq!(*seen.lock().unwrap(), [false, true]);
    }

    #[test]
    fn required_arguments_are_enforced() {
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let cmd = Command::new("with required args")
            .arg(OptionDef::define("path").required(true))
            .action("go", move |inv| {
                *sink.lock().unwrap() = inv.arguments.get("path").cloned();
                Ok(0)
            });

        let err = cmd
            .dispatch("go", Vec::<String>::new(), &Config::new())
            .unwrap_err();
        assert!(matches!(
            err,
            ImpError::Parse(ParseError::MissingRequiredOption(_))
        ));

        cmd.dispatch("go", ["--path", "yes"], &Config::new()).unwrap();
        assert_eq!(*seen.lock().unwrap(), Some(Value::from("yes")));
    }

    #[test]
    fn handler_errors_propagate() {
        let cmd = Command::new("broken").action("go", |_| Err("boom".into()));
        let err = cmd.dispatch("go", Vec::<String>::new(), &Config::new()).unwrap_err();
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn handlers_see_config_and_names() {
        let mut config = Config::new();
        config.set("greeting", "hi");
        let cmd = Command::new("greet").action("say-hello", |inv| {
            assert_eq!(inv.command, "greet");
            assert_eq!(inv.action, "say_hello");
            assert_eq!(inv.config.get("greeting"), Some(&serde_json::json!("hi")));
            Ok(3)
        });
        assert!(cmd.has_action("say_hello"));
        assert_eq!(cmd.dispatch("say_hello", Vec::<String>::new(), &config).unwrap(), 3);
    }

    #[test]
    fn inherit_copies_parent_schema_and_actions() {
        let parent = Command::new("application")
            .arg(OptionDef::define("verbose").default(false))
            .action("default", |_| Ok(1))
            .action("go", |_| Ok(2));
        let child = Command::new("child")
            .arg(OptionDef::define("path"))
            .action("go", |_| Ok(20))
            .inherit(&parent);

        let names: Vec<&str> = child.options().iter().map(OptionDef::name).collect();
        assert_eq!(names, ["verbose", "path"]);

        let config = Config::new();
        assert_eq!(child.dispatch("default", ["-v"], &config).unwrap(), 1);
        assert_eq!(child.dispatch("go", Vec::<String>::new(), &config).unwrap(), 20);
        assert_eq!(child.name(), "child");
    }
}
