//! Static documentation for template scripts.
//! Reads a script's source and synthesizes a usage manual without ever
//! resolving a single question: only literal values are read, anything
//! else is simply left undocumented.

use crate::error::{Error, Result};
use crate::script::prompt_or_title;
use serde_json::Value;

/// Command prefix used in synthesized usage lines.
pub const DEFAULT_COMMAND_PREFIX: &str = "protor";

/// One documented script argument.
#[derive(Debug)]
struct ArgDoc {
    name: String,
    prompt: String,
    choices: Option<Vec<String>>,
    default: Option<String>,
    position: Option<usize>,
}

impl ArgDoc {
    fn render(&self, width: usize) -> String {
        let mut line = format!("{:<width$} - {}", self.name, self.prompt);
        if let Some(choices) = &self.choices {
            let listed: Vec<String> =
                choices.iter().map(|choice| format!("'{choice}'")).collect();
            line.push_str(&format!(", can be any of: [{}]", listed.join(", ")));
        }
        if let Some(default) = &self.default {
            line.push_str(&format!(", defaults to '{default}'"));
        }
        line.push('.');
        line
    }
}

/// Generates the manual for a template script.
///
/// The output has three sections: the script's description, a usage line
/// (command prefix, template name, nested positional placeholders, then a
/// generic `name=value` trailer), and one line per distinct argument.
pub fn generate(source: &str, display_name: &str, command_prefix: &str) -> Result<String> {
    let tree: Value = parse_lenient(source)?;

    let description = tree
        .get("description")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .unwrap_or("Not Given.");

    let mut doc = String::from("Description:\n  ");
    doc.push_str(&description.lines().collect::<Vec<_>>().join("  "));

    let args = collect_args(&tree);

    doc.push_str(&format!("\n\nUsage:\n  {}", usage_line(&args, display_name, command_prefix)));

    doc.push_str("\n\nArguments:");
    if args.is_empty() {
        doc.push_str("\n  no arguments.");
    } else {
        let width = args.iter().map(|arg| arg.name.len()).max().unwrap_or(0);
        for arg in &args {
            doc.push_str(&format!("\n  {}", arg.render(width)));
        }
    }

    Ok(doc)
}

fn parse_lenient(source: &str) -> Result<Value> {
    match serde_json::from_str(source) {
        Ok(tree) => Ok(tree),
        Err(_) => {
            serde_yaml::from_str(source).map_err(|e| Error::ScriptFormatError(e.to_string()))
        }
    }
}

/// Walks the step list and extracts a descriptor per `ask`, `confirm`
/// and `arg` call site; duplicates deduplicate by name, first wins.
fn collect_args(tree: &Value) -> Vec<ArgDoc> {
    let mut args: Vec<ArgDoc> = Vec::new();

    let steps = match tree.get("steps").and_then(Value::as_array) {
        Some(steps) => steps,
        None => return args,
    };

    for step in steps {
        let step = match step.as_object() {
            Some(mapping) => mapping,
            None => continue,
        };
        let (kind, call) = match step.iter().next() {
            Some((kind, call)) if matches!(kind.as_str(), "ask" | "confirm" | "arg") => {
                (kind.as_str(), call)
            }
            _ => continue,
        };

        let name = match literal_str(call.get("name")) {
            Some(name) => name,
            None => continue,
        };
        if args.iter().any(|existing| existing.name == name) {
            continue;
        }

        let prompt = prompt_or_title(
            literal_str(call.get("doc")).as_deref(),
            literal_str(call.get("prompt")).as_deref(),
            &name,
        );

        let choices = if kind == "confirm" {
            Some(vec!["true".to_string(), "false".to_string()])
        } else {
            literal_list(call.get("choices"))
        };

        // Booleans are not literal scalars here: a confirm's explicit
        // `default: false` still documents as the built-in 'true'.
        let mut default = literal_scalar(call.get("default"));
        if kind == "confirm" && !is_truthy(default.as_ref()) {
            default = Some(Value::String("true".to_string()));
        }
        let indexed_choice = match (&choices, &default) {
            (Some(choices), Some(Value::Number(index))) => {
                index.as_u64().and_then(|i| choices.get(i as usize)).cloned()
            }
            _ => None,
        };
        if let Some(choice) = indexed_choice {
            default = Some(Value::String(choice));
        }
        let default = default.filter(|value| is_truthy(Some(value))).map(display_scalar);

        let position = call
            .get("positional_arg")
            .and_then(Value::as_u64)
            .map(|index| index as usize);

        args.push(ArgDoc { name, prompt, choices, default, position });
    }

    args
}

fn usage_line(args: &[ArgDoc], display_name: &str, command_prefix: &str) -> String {
    let mut positional: Vec<&ArgDoc> =
        args.iter().filter(|arg| arg.position.is_some()).collect();
    positional.sort_by_key(|arg| arg.position);

    let mut usage = format!("{command_prefix} {display_name} ");
    let mut depth = 0;
    for (i, arg) in positional.iter().enumerate() {
        // The placeholder chain breaks at the first gap or out-of-order
        // index; the trailing gapped arguments stay name=value only.
        if Some(i) != arg.position {
            break;
        }
        if depth > 0 {
            usage.push(' ');
        }
        usage.push_str(&format!("[<{}>", arg.name));
        depth += 1;
    }
    if depth > 0 {
        usage.push_str(&"]".repeat(depth));
        usage.push(' ');
    }
    usage.push_str("[<argument=value>...]");
    usage
}

// Literal values are strings and numbers; everything else reads as absent.
fn literal_scalar(value: Option<&Value>) -> Option<Value> {
    match value {
        Some(Value::String(s)) => Some(Value::String(s.clone())),
        Some(Value::Number(n)) => Some(Value::Number(n.clone())),
        _ => None,
    }
}

fn literal_str(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => Some(s.clone()),
        _ => None,
    }
}

/// A literal list materializes only when every element is a truthy
/// literal scalar.
fn literal_list(value: Option<&Value>) -> Option<Vec<String>> {
    let items = match value {
        Some(Value::Array(items)) if !items.is_empty() => items,
        _ => return None,
    };

    let mut result = Vec::with_capacity(items.len());
    for item in items {
        let scalar = literal_scalar(Some(item))?;
        if !is_truthy(Some(&scalar)) {
            return None;
        }
        result.push(display_scalar(scalar));
    }
    Some(result)
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        _ => false,
    }
}

fn display_scalar(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}
