//! Payloads exchanged with the answering service and the HTTP client that
//! sends them.

pub mod client;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Serialize)]
pub struct AskRequest<'a> {
    pub question: &'a str,
}

/// One labelled piece of an answer, as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerFragment {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub section: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub content: String,
}

/// A `null` fragment field reads the same as a missing one.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl AnswerFragment {
    pub fn new(section: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            content: content.into(),
        }
    }
}

/// Body of a successful `/ask` response. `answers` may be missing or `null`;
/// any other fields the service includes are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub answers: Option<Vec<AnswerFragment>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ask_request_serializes_question_only() {
        let body = serde_json::to_string(&AskRequest {
            question: "Can I cross borders?",
        })
        .expect("serialize");
        assert_eq!(body, r#"{"question":"Can I cross borders?"}"#);
    }

    #[test]
    fn ask_response_accepts_missing_and_null_answers() {
        let missing: AskResponse = serde_json::from_str("{}").expect("parse");
        assert!(missing.answers.is_none());

        let null: AskResponse = serde_json::from_str(r#"{"answers":null}"#).expect("parse");
        assert!(null.answers.is_none());
    }

    #[test]
    fn ask_response_ignores_unknown_fields() {
        let response: AskResponse = serde_json::from_str(
            r#"{"success":true,"answers":[{"section":"Fuel","content":"Return full.","score":0.9}]}"#,
        )
        .expect("parse");
        assert_eq!(
            response.answers,
            Some(vec![AnswerFragment::new("Fuel", "Return full.")])
        );
    }

    #[test]
    fn fragment_fields_default_to_empty_strings() {
        let response: AskResponse =
            serde_json::from_str(r#"{"answers":[{"content":"Only content"}]}"#).expect("parse");
        let fragments = response.answers.expect("answers present");
        assert_eq!(fragments[0].section, "");
        assert_eq!(fragments[0].content, "Only content");
    }

    #[test]
    fn null_fragment_fields_read_as_empty_strings() {
        let response: AskResponse = serde_json::from_str(
            r#"{"answers":[{"section":null,"content":"x"},{"section":"Fuel","content":null}]}"#,
        )
        .expect("parse");
        assert_eq!(
            response.answers,
            Some(vec![AnswerFragment::new("", "x"), AnswerFragment::new("Fuel", "")])
        );
    }
}
