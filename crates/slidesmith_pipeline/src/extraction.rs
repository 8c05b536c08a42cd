//! Utilities for extracting structured data from LLM responses.
//!
//! LLM responses often contain JSON wrapped in markdown code blocks, preceded
//! by reasoning asides, or mixed with explanatory text. This module provides
//! robust extraction utilities that handle common response patterns, plus a
//! keyed-section parser for structured natural-language responses.

use regex::Regex;
use serde_json::{Map, Value as JsonValue};
use slidesmith_core::StageResult;
use slidesmith_error::{ExtractionError, ExtractionErrorKind, SlidesmithResult};
use std::sync::OnceLock;

/// Characters of the original text retained in extraction errors.
const ERROR_PREFIX_CHARS: usize = 200;

fn reasoning_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?s)<think>.*?</think>\s*").expect("valid reasoning regex"))
}

/// Remove `<think>…</think>` reasoning blocks from a response.
///
/// Runs before either parse mode so reasoning asides never pollute payloads.
pub fn strip_reasoning(response: &str) -> String {
    reasoning_pattern().replace_all(response, "").trim().to_string()
}

/// Extract a JSON object from a response that may contain markdown or extra text.
///
/// This function tries multiple extraction strategies:
/// 1. Direct parse of the full text
/// 2. Markdown code blocks: ```json ... ```
/// 3. Balanced-brace scan (string- and escape-aware)
/// 4. Shallow-nesting regex fallback
///
/// # Errors
///
/// Returns an error carrying a truncated prefix of the response if no valid
/// JSON object is found.
///
/// # Examples
///
/// ```
/// use slidesmith_pipeline::extract_json;
///
/// let response = "Here's the data you requested:\n\
///     \n\
///     ```json\n\
///     {\"id\": 123, \"name\": \"Test\"}\n\
///     ```\n";
///
/// let payload = extract_json(response).unwrap();
/// assert_eq!(payload.get("id").unwrap(), 123);
/// ```
pub fn extract_json(response: &str) -> SlidesmithResult<Map<String, JsonValue>> {
    let cleaned = strip_reasoning(response);

    // Strategy 1: the whole response is the payload
    if let Ok(JsonValue::Object(map)) = serde_json::from_str::<JsonValue>(&cleaned) {
        return Ok(map);
    }

    // Strategy 2: markdown code blocks
    if let Some(block) = extract_from_code_block(&cleaned, "json")
        && let Ok(JsonValue::Object(map)) = serde_json::from_str::<JsonValue>(&block)
    {
        return Ok(map);
    }

    // Strategy 3: balanced-brace spans
    if let Some(map) = extract_balanced_object(&cleaned) {
        return Ok(map);
    }

    // Strategy 4: regex fallback for {...}-shaped spans
    if let Some(map) = extract_regex_object(&cleaned) {
        return Ok(map);
    }

    let prefix: String = cleaned.chars().take(ERROR_PREFIX_CHARS).collect();
    tracing::error!(
        response_length = response.len(),
        "No JSON object found in LLM response"
    );
    Err(ExtractionError::new(ExtractionErrorKind::NoPayload(prefix)))?
}

/// Recover a stage payload from a raw response.
///
/// Total over valid string input: returns `Structured` when any extraction
/// strategy succeeds and `Raw` with the verbatim text otherwise. Whether a
/// `Raw` result is fatal is the orchestrator's decision, not this function's.
pub fn extract(response: &str) -> StageResult {
    match extract_json(response) {
        Ok(map) => StageResult::Structured(map),
        Err(e) => {
            tracing::debug!(error = %e, "Falling back to raw stage result");
            StageResult::Raw(response.to_string())
        }
    }
}

/// Parse a structured natural-language response of `LABEL:` lines.
///
/// Recognizes uppercase labels (e.g. `TITLE:`, `POINT1:`, `CONCLUSION:`) at
/// line starts and maps each label (lowercased) to its trimmed line content.
/// Every caller-declared required key absent from the response is filled with
/// an empty value, guaranteeing the result's key set is a superset of
/// `required`.
///
/// # Examples
///
/// ```
/// use slidesmith_pipeline::parse_keyed_sections;
///
/// let response = "TITLE: Async Rust\nPOINT1: Futures are lazy\n";
/// let payload = parse_keyed_sections(response, &["title", "author"]);
/// assert_eq!(payload.get("title").unwrap(), "Async Rust");
/// assert_eq!(payload.get("author").unwrap(), "");
/// ```
pub fn parse_keyed_sections(response: &str, required: &[&str]) -> Map<String, JsonValue> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let label_pattern = PATTERN
        .get_or_init(|| Regex::new(r"^([A-Z][A-Z0-9_]*):\s*(.*)$").expect("valid label regex"));

    let cleaned = strip_reasoning(response);
    let mut payload = Map::new();

    for line in cleaned.lines() {
        if let Some(cap) = label_pattern.captures(line.trim()) {
            let label = cap[1].to_lowercase();
            let content = cap[2].trim().to_string();
            payload.insert(label, JsonValue::String(content));
        }
    }

    for key in required {
        payload
            .entry(key.to_string())
            .or_insert_with(|| JsonValue::String(String::new()));
    }

    payload
}

/// Extract content from markdown code blocks.
///
/// Looks for patterns like:
/// - ```language\n...\n```
/// - ``` ... ``` (no language specified)
fn extract_from_code_block(response: &str, language: &str) -> Option<String> {
    let pattern = format!("```{}", language);

    if let Some(start) = response.find(&pattern) {
        let content_start = start + pattern.len();
        if let Some(end) = response[content_start..].find("```") {
            let content = &response[content_start..content_start + end];
            return Some(content.trim().to_string());
        }
        // No closing fence found - likely truncated response
        return Some(response[content_start..].trim().to_string());
    }

    if let Some(start) = response.find("```") {
        let content_start = start + 3;
        // Skip to next newline (in case there's a language specifier)
        let skip_to = response[content_start..]
            .find('\n')
            .map(|n| content_start + n + 1)
            .unwrap_or(content_start);

        if let Some(end) = response[skip_to..].find("```") {
            let content = &response[skip_to..skip_to + end];
            return Some(content.trim().to_string());
        }
        return Some(response[skip_to..].trim().to_string());
    }

    None
}

/// Scan for balanced-brace spans and parse the first that succeeds.
///
/// Walks from each `{`, tracking depth with string and escape awareness, and
/// attempts a parse at every point depth returns to zero.
fn extract_balanced_object(response: &str) -> Option<Map<String, JsonValue>> {
    let starts: Vec<usize> = response
        .char_indices()
        .filter(|(_, c)| *c == '{')
        .map(|(i, _)| i)
        .collect();

    for start in starts {
        let mut depth = 0;
        let mut in_string = false;
        let mut escape_next = false;

        for (i, ch) in response[start..].char_indices() {
            if escape_next {
                escape_next = false;
                continue;
            }

            match ch {
                '\\' => escape_next = true,
                '"' => in_string = !in_string,
                '{' if !in_string => depth += 1,
                '}' if !in_string => {
                    depth -= 1;
                    if depth == 0 {
                        let candidate = &response[start..start + i + 1];
                        if let Ok(JsonValue::Object(map)) = serde_json::from_str(candidate) {
                            return Some(map);
                        }
                        break;
                    }
                }
                _ => {}
            }
        }
    }

    None
}

/// Last-resort regex extraction of `{...}`-shaped spans.
fn extract_regex_object(response: &str) -> Option<Map<String, JsonValue>> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    let patterns = PATTERNS.get_or_init(|| {
        vec![
            // Shallow nested objects
            Regex::new(r"\{[^{}]*(?:\{[^{}]*\}[^{}]*)*\}").expect("valid shallow-nesting regex"),
            // Non-greedy object pattern
            Regex::new(r"(?s)\{.*?\}").expect("valid non-greedy regex"),
        ]
    });

    for pattern in patterns {
        for m in pattern.find_iter(response) {
            if let Ok(JsonValue::Object(map)) = serde_json::from_str(m.as_str().trim()) {
                return Some(map);
            }
        }
    }

    None
}
