use protor::doc::generate;

#[test]
fn test_arguments_section_formatting() {
    let source = r#"
steps:
  - ask:
      name: author
      doc: Your Name
      default: Anon
  - confirm:
      name: use_ci
"#;

    let doc = generate(source, "demo", "protor").unwrap();

    assert_eq!(
        doc,
        "Description:\n  Not Given.\n\n\
         Usage:\n  protor demo [<argument=value>...]\n\n\
         Arguments:\n\
         \x20 author - Your Name, defaults to 'Anon'.\n\
         \x20 use_ci - Use Ci, can be any of: ['true', 'false'], defaults to 'true'."
    );
}

#[test]
fn test_description_lines_are_joined() {
    let source = "description: |\n  line one\n  line two\nsteps: []\n";
    let doc = generate(source, "demo", "protor").unwrap();
    assert!(doc.starts_with("Description:\n  line one  line two\n"));
}

#[test]
fn test_usage_positional_chain() {
    let source = r#"
steps:
  - ask:
      name: project_name
      positional_arg: 0
  - ask:
      name: author
      positional_arg: 1
  - arg:
      name: license
"#;

    let doc = generate(source, "my/template", "protor").unwrap();
    assert!(doc.contains(
        "Usage:\n  protor my/template [<project_name> [<author>]] [<argument=value>...]"
    ));
}

#[test]
fn test_usage_chain_breaks_at_gap() {
    let source = r#"
steps:
  - ask:
      name: first
      positional_arg: 0
  - ask:
      name: third
      positional_arg: 2
"#;

    let doc = generate(source, "demo", "protor").unwrap();
    assert!(doc.contains("Usage:\n  protor demo [<first>] [<argument=value>...]"));

    let no_positional = "steps:\n  - ask:\n      name: author\n";
    let doc = generate(no_positional, "demo", "protor").unwrap();
    assert!(doc.contains("Usage:\n  protor demo [<argument=value>...]"));
}

#[test]
fn test_duplicate_names_first_occurrence_wins() {
    let source = r#"
steps:
  - ask:
      name: author
      doc: First
  - ask:
      name: author
      doc: Second
"#;

    let doc = generate(source, "demo", "protor").unwrap();
    assert!(doc.contains("author - First."));
    assert!(!doc.contains("Second"));
}

#[test]
fn test_no_arguments_special_case() {
    let source = "description: Just static files.\nsteps:\n  - say: hello\n";
    let doc = generate(source, "demo", "protor").unwrap();
    assert!(doc.ends_with("Arguments:\n  no arguments."));
}

#[test]
fn test_integer_default_resolves_to_choice() {
    let source = r#"
steps:
  - ask:
      name: license
      choices: [MIT, Apache-2.0]
      default: 1
"#;

    let doc = generate(source, "demo", "protor").unwrap();
    assert!(doc.contains(
        "license - License, can be any of: ['MIT', 'Apache-2.0'], defaults to 'Apache-2.0'."
    ));
}

#[test]
fn test_names_padded_to_widest() {
    let source = r#"
steps:
  - ask:
      name: a
  - ask:
      name: long_name
"#;

    let doc = generate(source, "demo", "protor").unwrap();
    assert!(doc.contains("\n  a         - A."));
    assert!(doc.contains("\n  long_name - Long Name."));
}

#[test]
fn test_non_literal_values_are_absent_not_errors() {
    // A mapping where a list belongs, a list where a string belongs: the
    // analyzer documents what it can and skips the rest.
    let source = r#"
steps:
  - ask:
      name: author
      doc: { nested: mapping }
      choices: this-is-not-a-list
  - ask:
      choices: [a, b]
"#;

    let doc = generate(source, "demo", "protor").unwrap();
    // Prompt falls back to the title-cased name; the nameless call is
    // dropped entirely.
    assert!(doc.contains("author - Author."));
}

#[test]
fn test_confirm_explicit_false_documents_builtin_default() {
    let source = r#"
steps:
  - confirm:
      name: use_git
      default: false
"#;

    // Booleans are not literal scalars to the analyzer, so an explicit
    // false still documents as the built-in 'true'.
    let doc = generate(source, "demo", "protor").unwrap();
    assert!(doc.contains("use_git - Use Git, can be any of: ['true', 'false'], defaults to 'true'."));
}
