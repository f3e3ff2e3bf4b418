//! Few-shot conversation assembly.
//!
//! The conversation is the only thing that steers the model toward valid
//! SBGN-ML: a system instruction, the stylesheet, two worked examples and the
//! caller's drawing. There is no grammar or schema given to the model, so the
//! output format is probabilistic. Turn order matters and must not change.
use crate::assets::ReferenceSet;
use crate::models::message::Message;

pub const SYSTEM_PROMPT: &str = "You are a helpful and professional assistant for converting hand drawn biological networks drawn in Systems Biology Graphical Notation (SBGN) and producing the corresponding SBGNML files. You will be first given an image of a stylesheet that is used to draw biological networks in SBGN. Then for an input hand drawn biological network, you will analyze it and generate the corresponding SBGNML content. Please provide your final answer in JSON format. Do not return any answer outside of this format. A template looks like this: {\"answer\": \"SBGNML content as a string\"}. Do NOT enclose the JSON output in markdown code blocks like ```json and make sure that you are returning a valid JSON.";

pub const STYLESHEET_PROMPT: &str = "Here is a stylesheet of SBGN shapes (nodes and edges) and their corresponding classes written in the right columns.";

pub const USER_PROMPT: &str = "Now, based on what you have learned, generate the SBGNML for this hand-drawn SBGN diagram. Please note that macromolecule, simple cehmical, complex, nucleic acid feature, perturbing agent, unspecified entity, compartment, submap, empty set, phenotype, process, omitted process, uncertain process, association, dissociation, and, or, not nodes are represented with 'glyph' tag in SBGNML and consumption, production, modulation, simulation, catalysis, inhibition, necessary stimulation edges are represented with 'arc' tag in SBGNML. Make sure that each element in the graph has the correct tag, this is very inportant. Please also make sure that each glyph has a label and bbox subtags and each arc has source and target defined as attribute inside arc tag (not as subtags). Take your time and act with careful consideration. Do NOT enclose the JSON output in markdown code blocks like ```json and make sure that you are returning a valid JSON.";

/// Joins the caller's comment onto the final instruction
pub const COMMENT_CONNECTIVE: &str =
    " Additionally, please also consider the following comment during your process: ";

/// Number of turns in every composed conversation
pub const TURN_COUNT: usize = 7;

/// What the caller supplies for one conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    pub image: String,
    pub comment: Option<String>,
}

impl ConversionRequest {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: image.into(),
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// The instruction text of the final turn; an empty comment counts as absent
pub fn final_instruction(comment: Option<&str>) -> String {
    match comment {
        Some(comment) if !comment.is_empty() => {
            format!("{}{}{}", USER_PROMPT, COMMENT_CONNECTIVE, comment)
        }
        _ => USER_PROMPT.to_string(),
    }
}

/// Wrap a reference document as the assistant's answer.
///
/// The document is concatenated as raw text and not JSON-escaped. This is the
/// exact ground truth the model has been shown in production, so it is kept.
pub fn example_answer(document: &str) -> String {
    format!("{{\"answer\": {}}}", document)
}

/// Build the full conversation for one request
pub fn compose(references: &ReferenceSet, request: &ConversionRequest) -> Vec<Message> {
    vec![
        Message::system().with_text(SYSTEM_PROMPT),
        Message::user()
            .with_text(STYLESHEET_PROMPT)
            .with_image(&references.stylesheet),
        Message::user()
            .with_text(USER_PROMPT)
            .with_image(&references.example_one.image),
        Message::assistant().with_text(example_answer(&references.example_one.document)),
        Message::user()
            .with_text(USER_PROMPT)
            .with_image(&references.example_two.image),
        Message::assistant().with_text(example_answer(&references.example_two.document)),
        Message::user()
            .with_text(final_instruction(request.comment.as_deref()))
            .with_image(&request.image),
    ]
}
