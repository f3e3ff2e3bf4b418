use super::content::Content;
use super::role::Role;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// A single turn of the conversation sent to or received from a model
pub struct Message {
    pub role: Role,
    pub content: Vec<Content>,
}

impl Message {
    pub fn new(role: Role) -> Self {
        Message {
            role,
            content: Vec::new(),
        }
    }

    /// Create a new system message
    pub fn system() -> Self {
        Self::new(Role::System)
    }

    /// Create a new user message
    pub fn user() -> Self {
        Self::new(Role::User)
    }

    /// Create a new assistant message
    pub fn assistant() -> Self {
        Self::new(Role::Assistant)
    }

    /// Add any Content to the message
    pub fn with_content(mut self, content: Content) -> Self {
        self.content.push(content);
        self
    }

    /// Add text content to the message
    pub fn with_text<S: Into<String>>(self, text: S) -> Self {
        self.with_content(Content::text(text))
    }

    /// Add image content to the message
    pub fn with_image<S: Into<String>>(self, url: S) -> Self {
        self.with_content(Content::image(url))
    }

    /// Concatenate every text part of the message
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(Content::as_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// The image urls carried by this message, in order
    pub fn images(&self) -> Vec<&str> {
        self.content.iter().filter_map(Content::as_image).collect()
    }
}
