//! Script execution for protor.
//! Runs a template script's steps in order inside an isolated namespace,
//! resolving each question through the [`Interactor`] and collecting the
//! public bindings left behind as the render context.

use crate::args::ArgumentBag;
use crate::error::Result;
use crate::prompt::Interactor;
use crate::renderer::TemplateRenderer;
use crate::script::{AskStep, Script, Step, PRIVATE_PREFIX};
use log::debug;

/// Executes the script and returns the render context.
///
/// The namespace starts from the caller's extra context plus `args` and
/// `kwargs`; each step binds its resolved value under its name, so later
/// steps can interpolate earlier answers. Execution is sequential and
/// single-pass; the first failing step aborts the run with nothing
/// written. Bindings whose names start with `_` are dropped from the
/// returned context.
pub fn execute(
    script: &Script,
    interactor: &Interactor,
    engine: &dyn TemplateRenderer,
    extra_context: &serde_json::Map<String, serde_json::Value>,
    bag: &ArgumentBag,
) -> Result<serde_json::Map<String, serde_json::Value>> {
    let mut namespace = extra_context.clone();
    namespace.insert("args".to_string(), serde_json::json!(bag.positional()));
    namespace.insert("kwargs".to_string(), serde_json::json!(bag.named()));

    for step in &script.steps {
        let current = serde_json::Value::Object(namespace.clone());
        match step {
            Step::Say(message) => {
                let rendered = engine.render(message, &current)?;
                interactor.say(&rendered);
            }
            Step::Ask(ask) => {
                let prompt = engine.render(&ask.prompt_text(), &current)?;
                let default = ask_default(ask, &current, engine)?;
                let value = interactor.ask(ask, &prompt, &default)?;
                debug!("Resolved '{}'", ask.name);
                namespace.insert(ask.name.clone(), serde_json::Value::String(value));
            }
            Step::Confirm(confirm) => {
                let prompt = engine.render(&confirm.prompt_text(), &current)?;
                let value = interactor.confirm(confirm, &prompt)?;
                debug!("Resolved '{}'", confirm.name);
                namespace.insert(confirm.name.clone(), serde_json::Value::Bool(value));
            }
            Step::Arg(arg) => {
                let value = interactor.arg(arg);
                namespace.insert(arg.name.clone(), serde_json::Value::String(value));
            }
            Step::Set(bindings) => {
                for (name, value) in bindings {
                    let resolved = match value {
                        serde_json::Value::String(template) => {
                            serde_json::Value::String(engine.render(template, &current)?)
                        }
                        other => other.clone(),
                    };
                    namespace.insert(name.clone(), resolved);
                }
            }
        }
    }

    namespace.retain(|name, _| !name.starts_with(PRIVATE_PREFIX));
    Ok(namespace)
}

/// Resolves an `ask` step's default to the string offered to the user.
///
/// String defaults are rendered against the current namespace, and a
/// broken template aborts the run like any other step failure. A numeric
/// default with choices present selects the choice at that index; an
/// out-of-range index leaves the default empty.
fn ask_default(
    ask: &AskStep,
    current: &serde_json::Value,
    engine: &dyn TemplateRenderer,
) -> Result<String> {
    let default = match &ask.default {
        Some(serde_json::Value::String(template)) => engine.render(template, current)?,
        Some(serde_json::Value::Number(index)) if !ask.choices.is_empty() => index
            .as_u64()
            .and_then(|i| ask.choices.get(i as usize))
            .cloned()
            .unwrap_or_default(),
        Some(serde_json::Value::Number(number)) => number.to_string(),
        Some(serde_json::Value::Bool(flag)) => flag.to_string(),
        _ => String::new(),
    };
    Ok(default)
}
