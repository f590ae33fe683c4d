//! Command model, dispatch and bootstrapping for imp applications.
//!
//! An [`Application`] ties together a [`Router`](imp_router::Router) keyed by
//! command name, the [`Command`]s it routes to, and a per-application
//! [`Config`]. Commands declare an option schema and a set of named actions;
//! running an argument vector resolves the command path, parses the rest
//! against that schema and calls the action.
//!
//! ```
//! use imp::{Application, Command};
//! use imp_options::OptionDef;
//!
//! let mut app = Application::new("myapp");
//! app.command(
//!     Command::new("find")
//!         .arg(OptionDef::define("limit").default(10))
//!         .action("default", |inv| Ok(inv.arguments["limit"].as_int().unwrap_or(0) as u32))
//!         .action("all", |_| Ok(0)),
//! );
//!
//! assert_eq!(app.run(["find", "--limit", "3"]).unwrap(), 3);
//! assert_eq!(app.run(["find", "all"]).unwrap(), 0);
//! assert!(app.run(["lose"]).is_err());
//! ```
//!
//! Applications can also be booted from an `imp.json` manifest with
//! [`Application::load`], binding each declared action to a handler.

mod application;
mod command;
pub mod config;
mod error;
pub mod help;
pub mod manifest;

pub use application::Application;
pub use command::{Action, Command, Invocation};
pub use config::{Config, ConfigError};
pub use error::{CommandError, CommandResult, ExitCode, ImpError, ImpResult};
pub use manifest::{BootError, LoadedManifest, Manifest, load_manifest, locate_manifest};

pub use imp_options;
pub use imp_router;
