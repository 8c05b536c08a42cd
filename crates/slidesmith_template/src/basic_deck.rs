//! Built-in unit set for the `basic_deck` template.
//!
//! Each unit produces one Marp-flavored Markdown slide terminated by a `---`
//! separator; the assembler trims the trailing separators when joining.

use crate::unit::{StaticUnit, optional_str, require_str, require_str_list};
use serde_json::{Map, Value as JsonValue};
use slidesmith_core::ParamSpec;
use slidesmith_error::SlidesmithResult;
use slidesmith_interface::SlideUnit;
use std::sync::Arc;

const TITLE_SLIDE_DOC: &str = "\
Generate the opening title slide with presentation metadata.

Args:
    title: Main presentation title
    author: Presenter's name
    date: Presentation date
    company: Company or organization name (optional)

Returns:
    Markdown formatted title slide with Marp frontmatter
";

fn render_title_slide(params: &Map<String, JsonValue>) -> SlidesmithResult<String> {
    let title = require_str(params, "title_slide", "title")?;
    let author = require_str(params, "title_slide", "author")?;
    let date = require_str(params, "title_slide", "date")?;
    let company = optional_str(params, "company", "");

    let company_line = if company.is_empty() {
        String::new()
    } else {
        format!("- Company: {}\n", company)
    };
    let footer_text = if company.is_empty() { author } else { company };

    Ok(format!(
        "---\nmarp: true\ntheme: custom-theme\npaginate: true\nheader: '{title}'\nfooter: '© {footer_text}'\n---\n\n# {title}\n\n- Author: {author}\n- Date: {date}\n{company_line}\n---",
    ))
}

const LEAD_SLIDE_DOC: &str = "\
Generate a large emphasis slide for main topic presentation.

Args:
    main_topic: Main topic or theme to display prominently

Returns:
    Markdown formatted lead slide with special styling
";

fn render_lead_slide(params: &Map<String, JsonValue>) -> SlidesmithResult<String> {
    let main_topic = require_str(params, "lead_slide", "main_topic")?;

    Ok(format!(
        "<!-- _class: lead -->\n<!-- _paginate: false -->\n<!-- _header: '' -->\n<!-- _footer: '' -->\n\n# {main_topic}\n\n---",
    ))
}

const TOC_SLIDE_DOC: &str = "\
Generate table of contents slide listing main sections.

Args:
    topics: List of main topics to be covered

Returns:
    Markdown formatted table of contents slide
";

fn render_toc_slide(params: &Map<String, JsonValue>) -> SlidesmithResult<String> {
    let topics = require_str_list(params, "table_of_contents_slide", "topics")?;
    let numbered: Vec<String> = topics
        .iter()
        .enumerate()
        .map(|(i, topic)| format!("{}. {}", i + 1, topic))
        .collect();

    Ok(format!(
        "## Table of Contents\n\n{}\n\n---",
        numbered.join("\n")
    ))
}

const CONTENT_SLIDE_DOC: &str = "\
Generate standard content slide with topic and description.

Args:
    topic: Section title or topic name
    body: Main content text for the slide

Returns:
    Markdown formatted content slide
";

fn render_content_slide(params: &Map<String, JsonValue>) -> SlidesmithResult<String> {
    let topic = require_str(params, "content_slide", "topic")?;
    let body = require_str(params, "content_slide", "body")?;

    Ok(format!("## {topic}\n\n{body}\n\n---"))
}

const CODE_SLIDE_DOC: &str = "\
Generate content slide with code example block.

Args:
    topic: Slide title describing the code topic
    body: Explanatory text about the code
    code_example: Source code to display
    language: Programming language for syntax highlighting

Returns:
    Markdown formatted slide with code block
";

fn render_code_slide(params: &Map<String, JsonValue>) -> SlidesmithResult<String> {
    let topic = require_str(params, "code_slide", "topic")?;
    let body = require_str(params, "code_slide", "body")?;
    let code_example = require_str(params, "code_slide", "code_example")?;
    let language = optional_str(params, "language", "rust");

    Ok(format!(
        "## {topic}\n\n{body}\n\n```{language}\n{code_example}\n```\n\n---",
    ))
}

const MATH_SLIDE_DOC: &str = "\
Generate slide with mathematical formulas using LaTeX notation.

Args:
    topic: Slide title for the mathematical concept
    math_description: Description of the mathematical concept
    inline_math: LaTeX formula for inline display
    block_math: LaTeX formula for block display

Returns:
    Markdown formatted slide with LaTeX mathematics
";

fn render_math_slide(params: &Map<String, JsonValue>) -> SlidesmithResult<String> {
    let topic = require_str(params, "math_slide", "topic")?;
    let math_description = require_str(params, "math_slide", "math_description")?;
    let inline_math = require_str(params, "math_slide", "inline_math")?;
    let block_math = require_str(params, "math_slide", "block_math")?;

    Ok(format!(
        "## {topic}\n\n{math_description}\n\nInline: {inline_math}\n\nBlock:\n\n$$\n{block_math}\n$$\n\n---",
    ))
}

const CONCLUSION_SLIDE_DOC: &str = "\
Generate conclusion slide for presentation summary.

Args:
    body: Concluding remarks or summary content

Returns:
    Markdown formatted conclusion slide
";

fn render_conclusion_slide(params: &Map<String, JsonValue>) -> SlidesmithResult<String> {
    let body = require_str(params, "conclusion_slide", "body")?;

    Ok(format!("## Conclusion\n\n{body}\n\n---"))
}

/// The unit set registered for the `basic_deck` template.
pub fn basic_deck_units() -> Vec<Arc<dyn SlideUnit>> {
    vec![
        Arc::new(StaticUnit::new(
            "title_slide",
            TITLE_SLIDE_DOC,
            vec![
                ParamSpec::required("title"),
                ParamSpec::required("author"),
                ParamSpec::required("date"),
                ParamSpec::optional("company"),
            ],
            render_title_slide,
        )),
        Arc::new(StaticUnit::new(
            "lead_slide",
            LEAD_SLIDE_DOC,
            vec![ParamSpec::required("main_topic")],
            render_lead_slide,
        )),
        Arc::new(StaticUnit::new(
            "table_of_contents_slide",
            TOC_SLIDE_DOC,
            vec![ParamSpec::required("topics")],
            render_toc_slide,
        )),
        Arc::new(StaticUnit::new(
            "content_slide",
            CONTENT_SLIDE_DOC,
            vec![ParamSpec::required("topic"), ParamSpec::required("body")],
            render_content_slide,
        )),
        Arc::new(StaticUnit::new(
            "code_slide",
            CODE_SLIDE_DOC,
            vec![
                ParamSpec::required("topic"),
                ParamSpec::required("body"),
                ParamSpec::required("code_example"),
                ParamSpec::optional("language"),
            ],
            render_code_slide,
        )),
        Arc::new(StaticUnit::new(
            "math_slide",
            MATH_SLIDE_DOC,
            vec![
                ParamSpec::required("topic"),
                ParamSpec::required("math_description"),
                ParamSpec::required("inline_math"),
                ParamSpec::required("block_math"),
            ],
            render_math_slide,
        )),
        Arc::new(StaticUnit::new(
            "conclusion_slide",
            CONCLUSION_SLIDE_DOC,
            vec![ParamSpec::required("body")],
            render_conclusion_slide,
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, JsonValue)]) -> Map<String, JsonValue> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn title_slide_renders_frontmatter() {
        let units = basic_deck_units();
        let title = units.iter().find(|u| u.spec().name() == "title_slide").unwrap();

        let rendered = title
            .render(&params(&[
                ("title", serde_json::json!("Intro to X")),
                ("author", serde_json::json!("Alice")),
                ("date", serde_json::json!("2026-08-07")),
            ]))
            .unwrap();

        assert!(rendered.starts_with("---\nmarp: true"));
        assert!(rendered.contains("# Intro to X"));
        assert!(rendered.contains("- Author: Alice"));
        assert!(!rendered.contains("- Company:"));
    }

    #[test]
    fn title_slide_missing_required_parameter_fails() {
        let units = basic_deck_units();
        let title = units.iter().find(|u| u.spec().name() == "title_slide").unwrap();

        let result = title.render(&params(&[("title", serde_json::json!("Intro"))]));
        assert!(result.is_err());
    }

    #[test]
    fn toc_slide_numbers_topics() {
        let units = basic_deck_units();
        let toc = units
            .iter()
            .find(|u| u.spec().name() == "table_of_contents_slide")
            .unwrap();

        let rendered = toc
            .render(&params(&[(
                "topics",
                serde_json::json!(["Basics", "Applications"]),
            )]))
            .unwrap();

        assert!(rendered.contains("1. Basics"));
        assert!(rendered.contains("2. Applications"));
    }

    #[test]
    fn code_slide_defaults_language() {
        let units = basic_deck_units();
        let code = units.iter().find(|u| u.spec().name() == "code_slide").unwrap();

        let rendered = code
            .render(&params(&[
                ("topic", serde_json::json!("Ownership")),
                ("body", serde_json::json!("Moves transfer ownership.")),
                ("code_example", serde_json::json!("let a = b;")),
            ]))
            .unwrap();

        assert!(rendered.contains("```rust"));
    }

    #[test]
    fn specs_parse_doc_purposes() {
        for unit in basic_deck_units() {
            assert!(
                !unit.spec().purpose().is_empty(),
                "unit {} has empty purpose",
                unit.spec().name()
            );
        }
    }
}
