//! The argument bag: pre-supplied answers for a template's script.
//! Holds the positional sequence and named map passed on the command line;
//! the prompt provider consults it before ever asking the user anything.

use indexmap::IndexMap;

/// Read-only positional and named template arguments.
///
/// Built once per render and never mutated, so repeated lookups with the
/// same key always return the same pre-answer.
#[derive(Debug, Default, Clone)]
pub struct ArgumentBag {
    positional: Vec<String>,
    named: IndexMap<String, String>,
}

impl ArgumentBag {
    pub fn new(positional: Vec<String>, named: IndexMap<String, String>) -> Self {
        Self { positional, named }
    }

    /// Splits raw command-line trailer arguments into the bag.
    ///
    /// Each `key=value` argument becomes a named entry (first `=` splits);
    /// everything else is appended to the positional sequence in order.
    pub fn from_raw_args<I, S>(raw: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut positional = Vec::new();
        let mut named = IndexMap::new();
        for arg in raw {
            let arg = arg.as_ref();
            match arg.split_once('=') {
                Some((key, value)) if !key.is_empty() => {
                    named.insert(key.to_string(), value.to_string());
                }
                _ => positional.push(arg.to_string()),
            }
        }
        Self { positional, named }
    }

    /// Resolves a pre-answer: the named map first, then an in-bounds
    /// positional index, otherwise `None`.
    pub fn pre_answer(&self, named_arg: &str, positional_arg: Option<usize>) -> Option<&str> {
        if let Some(value) = self.named.get(named_arg) {
            return Some(value.as_str());
        }

        positional_arg
            .and_then(|index| self.positional.get(index))
            .map(String::as_str)
    }

    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    pub fn named(&self) -> &IndexMap<String, String> {
        &self.named
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_args_splits_once() {
        let bag = ArgumentBag::from_raw_args(["demo", "author=Jane", "motto=a=b"]);
        assert_eq!(bag.positional(), ["demo".to_string()]);
        assert_eq!(bag.named().get("author").map(String::as_str), Some("Jane"));
        assert_eq!(bag.named().get("motto").map(String::as_str), Some("a=b"));
    }

    #[test]
    fn test_named_wins_over_positional() {
        let bag = ArgumentBag::from_raw_args(["positional", "name=named"]);
        assert_eq!(bag.pre_answer("name", Some(0)), Some("named"));
        assert_eq!(bag.pre_answer("other", Some(0)), Some("positional"));
        assert_eq!(bag.pre_answer("other", Some(5)), None);
        assert_eq!(bag.pre_answer("other", None), None);
    }
}
