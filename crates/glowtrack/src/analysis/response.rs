use super::{AnalysisDocument, DocumentError};

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Locate the JSON payload inside free-form provider text.
///
/// Tries, in order: a ```` ```json ```` fenced block, any fenced block, and
/// the span from the first `{` to the last `}`. Falls back to the whole text.
pub fn extract_json_block(text: &str) -> &str {
    if let Some(body) = fenced(text, JSON_FENCE).or_else(|| fenced(text, FENCE)) {
        return body.trim();
    }
    match (text.find('{'), text.rfind('}')) {
        (Some(start), Some(end)) if start < end => &text[start..=end],
        _ => text,
    }
}

/// Body after `opener` up to the next closing fence (or end of text).
fn fenced<'a>(text: &'a str, opener: &str) -> Option<&'a str> {
    let start = text.find(opener)? + opener.len();
    let rest = &text[start..];
    Some(match rest.find(FENCE) {
        Some(end) => &rest[..end],
        None => rest,
    })
}

impl AnalysisDocument {
    /// Build a document from a structured-analysis provider reply.
    ///
    /// Never fails: an unparseable reply becomes a failed document carrying
    /// the error and the raw text, which governance then routes to manual
    /// review.
    pub fn from_provider_response(text: &str) -> Self {
        let parsed = AnalysisDocument::from_json_str(extract_json_block(text));
        let mut doc = match parsed {
            Ok(mut doc) => {
                doc.success = true;
                doc.error = None;
                tracing::debug!(metrics = doc.n_metrics(), "provider response parsed");
                doc
            }
            Err(err) => {
                tracing::warn!(error = %err, "provider response could not be parsed");
                let reason = match err {
                    DocumentError::InvalidJson(_) => "JSON parsing failed".to_string(),
                    shape => shape.to_string(),
                };
                AnalysisDocument::failed(reason)
            }
        };
        doc.raw_response = Some(text.to_string());
        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::Category;

    #[test]
    fn extracts_json_fence_first() {
        let text = "Here you go:\n```json\n{\"a\": 1}\n```\nthanks";
        assert_eq!(extract_json_block(text), "{\"a\": 1}");
    }

    #[test]
    fn extracts_bare_fence() {
        let text = "```\n{\"b\": 2}\n```";
        assert_eq!(extract_json_block(text), "{\"b\": 2}");
    }

    #[test]
    fn extracts_brace_span_without_fences() {
        let text = "result: {\"c\": {\"d\": 3}} done";
        assert_eq!(extract_json_block(text), "{\"c\": {\"d\": 3}}");
        assert_eq!(extract_json_block("no json here"), "no json here");
    }

    #[test]
    fn provider_reply_becomes_successful_document() {
        let text = r#"```json
{
  "skin_quality": { "radiance": { "before_score": 60, "after_score": 82, "improvement_pct": 37, "description": "glow" } },
  "overall_assessment": { "overall_improvement": 41, "naturalness": 90, "summary": "good" }
}
```"#;
        let doc = AnalysisDocument::from_provider_response(text);
        assert!(doc.success);
        assert_eq!(doc.error, None);
        assert_eq!(
            doc.metric(Category::SkinQuality, "radiance").and_then(|m| m.improvement_pct),
            Some(37.0)
        );
        assert_eq!(doc.raw_response.as_deref(), Some(text));
    }

    #[test]
    fn unparseable_reply_becomes_failed_document() {
        let doc = AnalysisDocument::from_provider_response("I cannot analyze these photos.");
        assert!(!doc.success);
        assert_eq!(doc.error.as_deref(), Some("JSON parsing failed"));
        assert_eq!(doc.raw_response.as_deref(), Some("I cannot analyze these photos."));
    }

    #[test]
    fn wrong_shape_reply_names_the_path() {
        let doc = AnalysisDocument::from_provider_response(r#"{"skin_quality": 5}"#);
        assert!(!doc.success);
        assert_eq!(doc.error.as_deref(), Some("$.skin_quality: expected object"));
    }
}
