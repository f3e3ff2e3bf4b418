pub mod answer;
pub mod assets;
pub mod converter;
pub mod errors;
pub mod grounding;
pub mod models;
pub mod prompt;
pub mod providers;
