// src/types/response.rs
//! Normalization of the backend's response shapes into `AnalysisResult`

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{MatchError, Result};
use crate::score::ScoreTier;

const STRUCTURED_KEYS: [&str; 4] = ["match_score", "strengths", "missing_skills", "summary"];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredAnalysis {
    pub match_score: Option<u8>,
    pub strengths: Vec<String>,
    pub missing_skills: Vec<String>,
    pub summary: Option<String>,
}

/// Exactly one representation is populated: discrete fields or free text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisResult {
    Structured(StructuredAnalysis),
    Raw { text: String },
}

impl AnalysisResult {
    pub fn raw(text: impl Into<String>) -> Self {
        AnalysisResult::Raw { text: text.into() }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, AnalysisResult::Structured(_))
    }

    pub fn match_score(&self) -> Option<u8> {
        match self {
            AnalysisResult::Structured(s) => s.match_score,
            AnalysisResult::Raw { .. } => None,
        }
    }

    pub fn tier(&self) -> Option<ScoreTier> {
        self.match_score().map(ScoreTier::from_score)
    }

    pub fn strengths(&self) -> &[String] {
        match self {
            AnalysisResult::Structured(s) => &s.strengths,
            AnalysisResult::Raw { .. } => &[],
        }
    }

    pub fn missing_skills(&self) -> &[String] {
        match self {
            AnalysisResult::Structured(s) => &s.missing_skills,
            AnalysisResult::Raw { .. } => &[],
        }
    }

    pub fn summary(&self) -> Option<&str> {
        match self {
            AnalysisResult::Structured(s) => s.summary.as_deref(),
            AnalysisResult::Raw { .. } => None,
        }
    }

    pub fn raw_text(&self) -> Option<&str> {
        match self {
            AnalysisResult::Structured(_) => None,
            AnalysisResult::Raw { text } => Some(text),
        }
    }
}

/// Decodes a 2xx body from `/analyze` or the PDF analysis endpoint.
///
/// Precedence: in-band `error`, structured keys, `analysis` string (itself
/// parsed when it holds a structured JSON object), then the whole body as
/// pretty-printed text.
pub fn decode_analysis_body(body: &str) -> Result<AnalysisResult> {
    let value = parse_json(body)?;
    decode_analysis_value(value)
}

pub fn decode_analysis_value(value: Value) -> Result<AnalysisResult> {
    if let Some(message) = application_error(&value) {
        return Err(MatchError::AnalysisFailed(message));
    }

    if let Some(structured) = value.as_object().and_then(structured_from) {
        return Ok(AnalysisResult::Structured(structured));
    }

    if let Some(analysis) = value.get("analysis").and_then(Value::as_str) {
        if let Some(structured) = parse_embedded(analysis) {
            debug!("Parsed structured analysis from embedded JSON text");
            return Ok(AnalysisResult::Structured(structured));
        }
        return Ok(AnalysisResult::raw(analysis));
    }

    let text = serde_json::to_string_pretty(&value).map_err(|e| MatchError::Decode {
        message: e.to_string(),
        body: None,
    })?;
    Ok(AnalysisResult::raw(text))
}

/// Decodes a 2xx body from `/extract_pdf`; a missing `text` yields "".
///
/// Extracted text wins over an `error` field; a non-string `text` is a
/// decode failure.
pub fn decode_extraction_body(body: &str) -> Result<String> {
    let value = parse_json(body)?;

    match value.get("text") {
        Some(Value::String(text)) => Ok(text.clone()),
        Some(Value::Null) | None => match application_error(&value) {
            Some(message) => Err(MatchError::AnalysisFailed(message)),
            None => Ok(String::new()),
        },
        Some(other) => Err(MatchError::Decode {
            message: format!("`text` must be a string, got {other}"),
            body: Some(body.to_string()),
        }),
    }
}

fn parse_json(body: &str) -> Result<Value> {
    serde_json::from_str(body).map_err(|e| MatchError::Decode {
        message: format!("response is not valid JSON: {e}"),
        body: Some(body.to_string()),
    })
}

fn application_error(value: &Value) -> Option<String> {
    match value.get("error")? {
        Value::Null | Value::Bool(false) => None,
        Value::String(message) => Some(message.clone()),
        Value::Object(details) => Some(
            details
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| Value::Object(details.clone()).to_string()),
        ),
        other => Some(other.to_string()),
    }
}

fn structured_from(object: &Map<String, Value>) -> Option<StructuredAnalysis> {
    if !STRUCTURED_KEYS.iter().any(|key| object.contains_key(*key)) {
        return None;
    }

    Some(StructuredAnalysis {
        match_score: object.get("match_score").and_then(coerce_score),
        strengths: object.get("strengths").map(string_list).unwrap_or_default(),
        missing_skills: object
            .get("missing_skills")
            .map(string_list)
            .unwrap_or_default(),
        summary: object
            .get("summary")
            .and_then(Value::as_str)
            .map(str::to_string),
    })
}

fn parse_embedded(text: &str) -> Option<StructuredAnalysis> {
    let candidate = strip_json_fences(text);
    if !candidate.starts_with('{') {
        return None;
    }
    match serde_json::from_str::<Value>(candidate).ok()? {
        Value::Object(object) => structured_from(&object),
        _ => None,
    }
}

/// Integers, floats (rounded) and numeric strings, clamped to 0..=100.
fn coerce_score(value: &Value) -> Option<u8> {
    let raw = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().trim_end_matches('%').trim().parse::<f64>().ok()?,
        _ => return None,
    };

    if !raw.is_finite() {
        return None;
    }

    let rounded = raw.round();
    if !(0.0..=100.0).contains(&rounded) {
        warn!("match_score {} out of range, clamping", raw);
    }
    Some(rounded.clamp(0.0, 100.0) as u8)
}

fn string_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                other => Some(other.to_string()),
            })
            .collect(),
        Value::String(s) if s.trim().is_empty() => Vec::new(),
        Value::String(s) => vec![s.clone()],
        Value::Null => Vec::new(),
        other => vec![other.to_string()],
    }
}

/// Strips ```json ... ``` or ``` ... ``` fences that models wrap around JSON.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text.strip_prefix("```").map(|rest| match rest.get(..4) {
        Some(tag) if tag.eq_ignore_ascii_case("json") => &rest[4..],
        _ => rest,
    });

    match inner {
        Some(stripped) => stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim()),
        None => text,
    }
}
