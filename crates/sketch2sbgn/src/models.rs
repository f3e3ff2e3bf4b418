//! These models represent the conversation sent to the multimodal model.
//!
//! Turns are built by the prompt composer and only converted to a provider's
//! wire format at the edge (see `providers::utils`), so the conversation shape
//! can be inspected and tested without touching the network.
pub mod content;
pub mod message;
pub mod role;
