use protor::args::ArgumentBag;
use protor::engine::Engine;
use protor::prompt::ScriptedPrompter;
use protor::renderer::MiniJinjaRenderer;
use protor::starter::create_template;
use std::fs;
use std::path::Path;

fn generate(template: &Path, output: &Path, raw_args: &[&str]) {
    let renderer = MiniJinjaRenderer::new();
    let prompter = ScriptedPrompter::empty();
    let engine = Engine::new(&renderer, &prompter);
    let bag = ArgumentBag::from_raw_args(raw_args);

    engine.render(template, output, &bag, &serde_json::Map::new(), false).unwrap();
}

#[test]
fn test_create_template_writes_example_tree() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("template");

    create_template(&out).unwrap();

    assert!(out.join("proto.yaml").is_file());
    assert!(out.join(".protoignore").is_file());
    assert!(out.join("README.md.tmpl").is_file());
    assert!(out.join("{% if use_docs %}docs{% endif %}/guide.md.tmpl").is_file());
}

#[test]
fn test_create_template_into_existing_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("notes.txt"), "keep me").unwrap();

    create_template(dir.path()).unwrap();

    assert!(dir.path().join("proto.yaml").is_file());
    assert_eq!(fs::read_to_string(dir.path().join("notes.txt")).unwrap(), "keep me");
}

#[test]
fn test_create_template_rejects_file_target() {
    let dir = tempfile::tempdir().unwrap();
    let occupied = dir.path().join("occupied");
    fs::write(&occupied, "x").unwrap();

    assert!(create_template(&occupied).is_err());
}

#[test]
fn test_starter_template_generates_a_project() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("template");
    let output = dir.path().join("output");
    create_template(&template).unwrap();

    generate(&template, &output, &["My App", "use_docs=yes"]);

    let readme = fs::read_to_string(output.join("README.md")).unwrap();
    assert!(readme.contains("# My App"));
    assert!(readme.contains("docs/guide.md"));
    let guide = fs::read_to_string(output.join("docs/guide.md")).unwrap();
    assert!(guide.contains("# My App guide"));

    // Script and ignore files stay out of the generated tree.
    assert!(!output.join("proto.yaml").exists());
    assert!(!output.join(".protoignore").exists());
}

#[test]
fn test_starter_template_skips_docs_when_declined() {
    let dir = tempfile::tempdir().unwrap();
    let template = dir.path().join("template");
    let output = dir.path().join("output");
    create_template(&template).unwrap();

    generate(&template, &output, &["My App", "use_docs=no"]);

    assert!(!output.join("docs").exists());
    let readme = fs::read_to_string(output.join("README.md")).unwrap();
    assert!(!readme.contains("docs/guide.md"));
}
