//! User interaction for protor.
//! [`Prompter`] is the interactive collaborator (text input, single
//! choice, yes/no, plain output); [`Interactor`] layers the pre-answer
//! precedence rule on top of it: supplied arguments always win, the
//! terminal is only reached when no pre-answer exists.

use crate::args::ArgumentBag;
use crate::error::Result;
use crate::script::{ArgStep, AskStep, ConfirmStep};
use dialoguer::{Completion, Confirm, FuzzySelect, Input, Password};
use std::cell::RefCell;
use std::collections::VecDeque;

/// Trait for interactive prompt widgets.
pub trait Prompter {
    /// Free-text input; an empty submission yields `default`.
    fn input(
        &self,
        prompt: &str,
        default: &str,
        autocomplete: &[String],
        secret: bool,
    ) -> Result<String>;

    /// Single selection out of `choices`, returning the chosen item.
    fn select(&self, prompt: &str, choices: &[String], default: usize) -> Result<String>;

    /// Yes/no confirmation.
    fn confirm(&self, prompt: &str, default: bool) -> Result<bool>;

    /// Displays a message to the user.
    fn say(&self, message: &str);
}

/// Terminal prompter built on dialoguer widgets.
pub struct DialoguerPrompter;

impl DialoguerPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DialoguerPrompter {
    fn default() -> Self {
        DialoguerPrompter::new()
    }
}

struct PrefixCompletion<'a> {
    values: &'a [String],
}

impl Completion for PrefixCompletion<'_> {
    fn get(&self, input: &str) -> Option<String> {
        self.values.iter().find(|value| value.starts_with(input)).cloned()
    }
}

impl Prompter for DialoguerPrompter {
    fn input(
        &self,
        prompt: &str,
        default: &str,
        autocomplete: &[String],
        secret: bool,
    ) -> Result<String> {
        if secret {
            let answer = Password::new()
                .with_prompt(prompt)
                .allow_empty_password(true)
                .interact()?;
            return Ok(if answer.is_empty() { default.to_string() } else { answer });
        }

        let completion = PrefixCompletion { values: autocomplete };
        let mut input = Input::new().with_prompt(prompt).default(default.to_string());
        if !autocomplete.is_empty() {
            input = input.completion_with(&completion);
        }
        Ok(input.interact_text()?)
    }

    fn select(&self, prompt: &str, choices: &[String], default: usize) -> Result<String> {
        let selection = FuzzySelect::new()
            .with_prompt(prompt)
            .default(default)
            .items(choices)
            .interact()?;
        Ok(choices[selection].clone())
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Ok(Confirm::new().with_prompt(prompt).default(default).interact()?)
    }

    fn say(&self, message: &str) {
        println!("{message}");
    }
}

/// Non-interactive prompter fed from a queue of canned answers.
///
/// Each prompt consumes the next queued answer; an exhausted queue or an
/// empty answer falls back to the prompt's default, which is also how an
/// empty interactive submission behaves.
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
    messages: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
            messages: RefCell::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::<String>::new())
    }

    /// Everything `say` forwarded so far.
    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    fn next_answer(&self) -> Option<String> {
        self.answers.borrow_mut().pop_front().filter(|answer| !answer.is_empty())
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, _: &str, default: &str, _: &[String], _: bool) -> Result<String> {
        Ok(self.next_answer().unwrap_or_else(|| default.to_string()))
    }

    fn select(&self, _: &str, choices: &[String], default: usize) -> Result<String> {
        match self.next_answer() {
            Some(answer) if choices.contains(&answer) => Ok(answer),
            _ => Ok(choices[default].clone()),
        }
    }

    fn confirm(&self, _: &str, default: bool) -> Result<bool> {
        match self.next_answer() {
            Some(answer) => Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes")),
            None => Ok(default),
        }
    }

    fn say(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}

/// The prompt provider installed into the script sandbox.
///
/// Wraps the argument bag and a prompter; every operation first consults
/// the bag (named key, then positional index) and only prompts when no
/// pre-answer exists. The bag is never mutated, so lookups are idempotent.
pub struct Interactor<'a> {
    bag: &'a ArgumentBag,
    prompter: &'a dyn Prompter,
}

impl<'a> Interactor<'a> {
    pub fn new(bag: &'a ArgumentBag, prompter: &'a dyn Prompter) -> Self {
        Self { bag, prompter }
    }

    /// Resolves an `ask` step to a string.
    ///
    /// A non-empty pre-answer is returned verbatim, deliberately bypassing
    /// `choices` and `secret` handling. `prompt` and `default` arrive
    /// already rendered against the current namespace.
    pub fn ask(&self, step: &AskStep, prompt: &str, default: &str) -> Result<String> {
        if let Some(answer) = self.pre_answer(&step.name, step.positional_arg) {
            return Ok(answer);
        }

        if step.choices.is_empty() {
            self.prompter.input(prompt, default, &step.autocomplete, step.secret)
        } else {
            let default_index =
                step.choices.iter().position(|choice| choice == default).unwrap_or(0);
            self.prompter.select(prompt, &step.choices, default_index)
        }
    }

    /// Resolves a `confirm` step to a boolean.
    ///
    /// A pre-answer is parsed case-insensitively: `y`, `yes` and `true`
    /// confirm, anything else declines.
    pub fn confirm(&self, step: &ConfirmStep, prompt: &str) -> Result<bool> {
        if let Some(answer) = self.pre_answer(&step.name, step.positional_arg) {
            return Ok(matches!(answer.to_lowercase().as_str(), "y" | "yes" | "true"));
        }

        self.prompter.confirm(prompt, step.default.unwrap_or(true))
    }

    /// Resolves an `arg` step: pre-answer verbatim (empty included), else
    /// the step's default. Never prompts.
    pub fn arg(&self, step: &ArgStep) -> String {
        self.bag
            .pre_answer(&step.name, step.positional_arg)
            .map(str::to_string)
            .unwrap_or_else(|| step.default.clone().unwrap_or_default())
    }

    /// Forwards a message to the user, pre-answered or not.
    pub fn say(&self, message: &str) {
        self.prompter.say(message);
    }

    // Empty pre-answers fall through to prompting; only `arg` takes them
    // verbatim.
    fn pre_answer(&self, named_arg: &str, positional_arg: Option<usize>) -> Option<String> {
        self.bag
            .pre_answer(named_arg, positional_arg)
            .filter(|answer| !answer.is_empty())
            .map(str::to_string)
    }
}
