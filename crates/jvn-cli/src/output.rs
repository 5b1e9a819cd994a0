use std::io::{self, IsTerminal};

use color_eyre::Result;
use jvn_core::{CommandGroup, CommandInfo, CommandStatus, ExecutionOutcome};
use serde_json::Value;

use crate::style::Style;

#[derive(Clone, Copy, Debug)]
pub struct OutputOptions {
    pub quiet: bool,
    pub json: bool,
    pub no_color: bool,
}

/// Renders an outcome and returns the process exit code.
///
/// `env export` writes the manifest itself to stdout so it can be redirected
/// into a file; every status line of that command goes to stderr.
pub fn emit_output(
    opts: &OutputOptions,
    info: CommandInfo,
    outcome: &ExecutionOutcome,
) -> Result<i32> {
    let code = outcome.status.exit_code();

    if opts.json {
        let payload = jvn_core::to_json_response(info, outcome);
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(code);
    }

    let style = Style::new(opts.no_color, io::stderr().is_terminal());
    let message = jvn_core::format_status_message(info, &outcome.message);

    if outcome.status != CommandStatus::Ok {
        eprintln!("{}", style.status(outcome.status, &message));
        if let Some(hint) = str_field(&outcome.details, "hint") {
            eprintln!("{}", style.info(&format!("Hint: {hint}")));
        }
        return Ok(code);
    }

    if is_export(info) {
        if let Some(manifest) = str_field(&outcome.details, "manifest") {
            print!("{manifest}");
        }
        if !opts.quiet {
            eprintln!("{}", style.status(outcome.status, &message));
            if let Some(activation) = str_field(&outcome.details, "activation") {
                eprint!("{}", style.dimmed(activation));
            }
        }
        return Ok(code);
    }

    if opts.quiet {
        return Ok(code);
    }
    let style = Style::new(opts.no_color, io::stdout().is_terminal());
    println!("{}", style.status(outcome.status, &message));
    for line in upload_lines(&outcome.details) {
        println!("  {line}");
    }
    if let Some(data) = outcome.details.get("data").filter(|data| !data.is_null()) {
        println!("{}", serde_json::to_string_pretty(data)?);
    }
    if let Some(activation) = str_field(&outcome.details, "activation") {
        print!("{}", style.dimmed(activation));
    }
    Ok(code)
}

fn is_export(info: CommandInfo) -> bool {
    info.group == CommandGroup::Env && info.name == "export"
}

fn str_field<'a>(details: &'a Value, key: &str) -> Option<&'a str> {
    details
        .as_object()
        .and_then(|map| map.get(key))
        .and_then(Value::as_str)
}

fn upload_lines(details: &Value) -> Vec<String> {
    let Some(uploads) = details.get("uploads").and_then(Value::as_array) else {
        return Vec::new();
    };
    uploads
        .iter()
        .filter_map(|entry| {
            let filename = entry.get("filename")?.as_str()?;
            let source = entry.get("source").and_then(Value::as_str).unwrap_or("fresh");
            Some(format!("{filename} ({source})"))
        })
        .collect()
}
