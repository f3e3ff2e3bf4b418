//! The model's answer, treated as untrusted upstream text.
//!
//! The model is instructed to reply with `{"answer": "<SBGN-ML>"}` but nothing
//! enforces it. The answer is relayed exactly as received; [`AnswerShape`] only
//! reports how it deviates so that deviations show up in the logs.
use serde_json::Value;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerShape {
    /// A JSON object with exactly one string field `answer`
    Conforming,
    NotJson,
    NotObject,
    MissingAnswerField,
    AnswerNotString,
    ExtraFields,
}

impl AnswerShape {
    pub fn is_conforming(&self) -> bool {
        matches!(self, AnswerShape::Conforming)
    }
}

impl fmt::Display for AnswerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            AnswerShape::Conforming => "conforming",
            AnswerShape::NotJson => "not valid JSON",
            AnswerShape::NotObject => "not a JSON object",
            AnswerShape::MissingAnswerField => "missing the answer field",
            AnswerShape::AnswerNotString => "answer field is not a string",
            AnswerShape::ExtraFields => "has fields other than answer",
        };
        f.write_str(text)
    }
}

/// Raw text produced by the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UntrustedAnswer(String);

impl UntrustedAnswer {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn shape(&self) -> AnswerShape {
        let Ok(value) = serde_json::from_str::<Value>(&self.0) else {
            return AnswerShape::NotJson;
        };
        let Some(object) = value.as_object() else {
            return AnswerShape::NotObject;
        };
        match object.get("answer") {
            None => AnswerShape::MissingAnswerField,
            Some(answer) if !answer.is_string() => AnswerShape::AnswerNotString,
            Some(_) if object.len() > 1 => AnswerShape::ExtraFields,
            Some(_) => AnswerShape::Conforming,
        }
    }
}
