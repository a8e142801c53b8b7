//! Prompt construction for council members.

pub mod template;

pub use template::PromptTemplate;
