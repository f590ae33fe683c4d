//! Plain-text help rendering for applications and commands.

use imp_options::OptionDef;

use crate::command::Command;

/// List every command with its summary, sorted by name.
pub fn application_help<'a>(commands: impl IntoIterator<Item = &'a Command>) -> String {
    let mut out = String::new();
    out.push_str("Available commands:\n");

    let mut cmds: Vec<&Command> = commands.into_iter().collect();
    cmds.sort_by(|a, b| a.name().cmp(b.name()));

    for cmd in cmds {
        if cmd.name().is_empty() {
            continue;
        }
        if cmd.summary_text().is_empty() {
            out.push_str(&format!("  {}\n", cmd.name()));
        } else {
            out.push_str(&format!("  {:<16} {}\n", cmd.name(), cmd.summary_text()));
        }
    }
    out
}

fn format_option_left(def: &OptionDef) -> String {
    let mut names: Vec<&str> = Vec::new();
    if let Some(short) = def.short() {
        names.push(short);
    }
    names.push(def.long());

    let mut out = names.join(", ");
    if !def.is_boolean() {
        out.push_str(&format!(" <{}>", def.name().to_ascii_uppercase()));
    }
    out
}

fn format_option_help(def: &OptionDef) -> String {
    let mut parts: Vec<String> = Vec::new();
    if let Some(description) = def.description() {
        let description = description.trim();
        if !description.is_empty() {
            parts.push(description.to_string());
        }
    }
    if def.is_required() {
        parts.push("(required)".to_string());
    }
    if let Some(default) = def.default_value() {
        parts.push(format!("[default: {default}]"));
    }
    parts.join(" ")
}

/// Usage, description, actions and options of one command.
pub fn command_help(program: &str, cmd: &Command) -> String {
    let mut out = String::new();
    if cmd.summary_text().trim().is_empty() {
        out.push_str(cmd.name());
        out.push('\n');
    } else {
        out.push_str(&format!("{} - {}\n", cmd.name(), cmd.summary_text().trim()));
    }

    let mut usage = format!("{program} {}", cmd.name());
    if cmd.action_names().any(|a| a != imp_router::DEFAULT_ACTION) {
        usage.push_str(" [ACTION]");
    }
    if !cmd.options().is_empty() {
        usage.push_str(" [OPTIONS]");
    }
    out.push_str(&format!("\nUsage: {}\n", usage.trim()));

    if !cmd.description_text().trim().is_empty() {
        out.push('\n');
        out.push_str(cmd.description_text().trim_end());
        out.push('\n');
    }

    let actions: Vec<&str> = cmd.action_names().collect();
    if !actions.is_empty() {
        out.push_str("\nActions:\n");
        for action in actions {
            out.push_str(&format!("  {}\n", action.replace('_', "-")));
        }
    }

    if !cmd.options().is_empty() {
        out.push_str("\nOptions:\n");
        let rows: Vec<(String, String)> = cmd
            .options()
            .iter()
            .map(|d| (format_option_left(d), format_option_help(d)))
            .collect();
        let width = rows.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        for (left, help) in rows {
            if help.is_empty() {
                out.push_str(&format!("  {}\n", left));
            } else {
                out.push_str(&format!("  {:width$}  {}\n", left, help, width = width));
            }
        }
    }

    out
}
