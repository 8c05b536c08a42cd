//! Integration tests for template loading and introspection.

use slidesmith_interface::TemplateSource;
use slidesmith_template::{SlideTemplate, TemplateRepository, UnitRegistry, inspect};
use std::path::Path;

fn write_template(root: &Path, id: &str, content: Option<&str>, css: Option<&str>) {
    let dir = root.join(id);
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(
        dir.join("template.toml"),
        format!(
            "name = \"{}\"\ndescription = \"test template\"\nduration_minutes = 8\n",
            id
        ),
    )
    .unwrap();
    if let Some(text) = content {
        std::fs::write(dir.join("content.md"), text).unwrap();
    }
    if let Some(text) = css {
        std::fs::write(dir.join("theme.css"), text).unwrap();
    }
}

#[test]
fn whole_document_template_yields_placeholders_only() {
    let root = tempfile::tempdir().unwrap();
    write_template(
        root.path(),
        "notes_doc",
        Some("# ${title}\n\n${body}\n\nBy ${author}, ${title} again."),
        Some("section { color: black; }"),
    );

    let template = SlideTemplate::from_dir(root.path().join("notes_doc")).unwrap();
    let registry = UnitRegistry::with_builtins();
    let requirements = inspect(&template, &registry).unwrap();

    assert!(!requirements.is_unit_based());
    assert!(requirements.units().is_empty());
    let names: Vec<&str> = requirements
        .placeholders()
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(names, vec!["author", "body", "title"]);
    assert!(template.read_stylesheet_text().is_some());
}

#[test]
fn unit_based_template_yields_units_only() {
    let root = tempfile::tempdir().unwrap();
    // No content.md: unit-based templates carry no document.
    write_template(root.path(), "basic_deck", None, None);

    let template = SlideTemplate::from_dir(root.path().join("basic_deck")).unwrap();
    let registry = UnitRegistry::with_builtins();
    let requirements = inspect(&template, &registry).unwrap();

    assert!(requirements.is_unit_based());
    assert!(requirements.placeholders().is_empty());
    assert!(requirements.units().contains_key("title_slide"));
    assert!(requirements.units().contains_key("math_slide"));

    let catalog = requirements.unit_catalog();
    assert!(catalog.contains("Unit: content_slide"));
    assert!(catalog.contains("Signature: content_slide(topic, body)"));
}

#[test]
fn inspection_is_not_cached_across_edits() {
    let root = tempfile::tempdir().unwrap();
    write_template(root.path(), "editable_doc", Some("# ${title}"), None);

    let template = SlideTemplate::from_dir(root.path().join("editable_doc")).unwrap();
    let registry = UnitRegistry::new();

    let before = inspect(&template, &registry).unwrap();
    assert_eq!(before.placeholders().len(), 1);

    // Edit the document between runs; the next inspection sees it.
    std::fs::write(
        root.path().join("editable_doc/content.md"),
        "# ${title}\n\n${subtitle}",
    )
    .unwrap();

    let after = inspect(&template, &registry).unwrap();
    assert_eq!(after.placeholders().len(), 2);
}

#[test]
fn repository_round_trip() {
    let root = tempfile::tempdir().unwrap();
    write_template(root.path(), "deck_one", Some("# ${a}"), None);
    write_template(root.path(), "deck_two", None, None);

    let repo = TemplateRepository::new(root.path());
    let all = repo.list().unwrap();
    assert_eq!(all.len(), 2);

    let one = repo.get("deck_one").unwrap();
    assert_eq!(one.name(), "deck_one");
    assert_eq!(*one.duration_minutes(), 8);
    assert!(repo.get("deck_three").is_err());
}
