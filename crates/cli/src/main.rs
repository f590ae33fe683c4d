mod scaffold;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use imp::{Action, Application, CommandError, CommandResult, Invocation};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(name = "imp")]
#[command(version, about = "Inspect and drive imp applications", long_about = None)]
#[command(disable_help_subcommand = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter imp.json manifest
    Init(InitArgs),

    /// List the routes an application registers
    Routes(RoutesArgs),

    /// Show which command and action an argument vector resolves to
    Match(ArgvArgs),

    /// Resolve and dispatch an argument vector, echoing the invocation
    Run(ArgvArgs),

    /// Show application or command help
    Help(HelpArgs),
}

#[derive(Parser)]
struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,

    /// Application name (default: directory name)
    #[arg(short, long)]
    name: Option<String>,
}

#[derive(Args)]
struct ManifestArg {
    /// Path to imp.json, the same path without .json, or its directory
    #[arg(short, long, default_value = ".", value_name = "PATH")]
    manifest: PathBuf,
}

#[derive(Parser)]
struct RoutesArgs {
    #[command(flatten)]
    manifest: ManifestArg,

    /// Print routes as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct ArgvArgs {
    #[command(flatten)]
    manifest: ManifestArg,

    /// Arguments as the application would receive them
    #[arg(last = true, value_name = "ARGS")]
    args: Vec<String>,
}

#[derive(Parser)]
struct HelpArgs {
    #[command(flatten)]
    manifest: ManifestArg,

    /// Command name, one word per argument
    #[arg(value_name = "COMMAND")]
    command: Vec<String>,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => init(args),
        Commands::Routes(args) => routes(args),
        Commands::Match(args) => match_command(args),
        Commands::Run(args) => run(args),
        Commands::Help(args) => help(args),
    }
}

fn init(args: InitArgs) -> Result<()> {
    let dir = args.dir.unwrap_or_else(|| PathBuf::from("."));
    let path = scaffold::write_starter_manifest(&dir, args.name)?;

    eprintln!("Created: {}", path.display());
    eprintln!("\nNext steps:");
    eprintln!("  1. Declare your commands, options and actions in imp.json");
    eprintln!("  2. Run: imp routes");
    Ok(())
}

/// Invocation as printed by `imp run`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InvocationReport<'a> {
    command: &'a str,
    action: &'a str,
    arguments: &'a imp::imp_options::ParsedArguments,
}

fn echo_action() -> Action {
    Arc::new(|inv: &Invocation<'_>| -> CommandResult {
        let report = InvocationReport {
            command: inv.command,
            action: inv.action,
            arguments: &inv.arguments,
        };
        let json =
            serde_json::to_string_pretty(&report).map_err(|e| CommandError::Failed(e.to_string()))?;
        println!("{json}");
        Ok(0)
    })
}

fn load_app(manifest: &ManifestArg) -> Result<Application> {
    let app = Application::load(&manifest.manifest, |command, action| {
        tracing::debug!(command, action, "binding echo action");
        echo_action()
    })?;
    Ok(app)
}

#[derive(Serialize)]
struct RouteRow {
    path: String,
    command: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<String>,
}

fn routes(args: RoutesArgs) -> Result<()> {
    let app = load_app(&args.manifest)?;
    let rows: Vec<RouteRow> = app
        .router()
        .routes()
        .into_iter()
        .map(|(path, route)| RouteRow {
            path,
            command: route.command,
            action: route.action,
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    let width = rows.iter().map(|r| r.path.len()).max().unwrap_or(0);
    for row in rows {
        match row.action {
            Some(action) => println!("{:width$}  {}#{}", row.path, row.command, action),
            None => println!("{:width$}  {}", row.path, row.command),
        }
    }
    Ok(())
}

fn match_command(args: ArgvArgs) -> Result<()> {
    let app = load_app(&args.manifest)?;
    let Some(matched) = app.resolve(args.args.iter().cloned()) else {
        eprintln!("No route matches: {}", args.args.join(" "));
        std::process::exit(1);
    };

    let json = serde_json::json!({
        "command": matched.command,
        "action": matched.action,
        "args": matched.args,
    });
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn run(args: ArgvArgs) -> Result<()> {
    let app = load_app(&args.manifest)?;
    let code = app
        .run(args.args.iter().cloned())
        .with_context(|| format!("failed to run: {}", args.args.join(" ")))?;
    if code != 0 {
        std::process::exit(i32::try_from(code).unwrap_or(1));
    }
    Ok(())
}

fn help(args: HelpArgs) -> Result<()> {
    let app = load_app(&args.manifest)?;
    if args.command.is_empty() {
        print!("{}", app.help());
        return Ok(());
    }

    let name = args.command.join(" ");
    match app.command_help(&name) {
        Some(text) => print!("{text}"),
        None => bail!("Unknown command: {name}"),
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
