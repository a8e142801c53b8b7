//! Per-provider prompt templates
//!
//! When prompt optimization is requested, the raw question is wrapped with
//! a fixed prefix and suffix tuned for each provider. Providers without a
//! template (custom ids) always receive the raw question.

use crate::core::provider::ProviderId;

/// Fixed prefix/suffix wrapped around the question for one provider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PromptTemplate {
    pub prefix: &'static str,
    pub suffix: &'static str,
}

impl PromptTemplate {
    /// Look up the template table.
    pub fn for_provider(provider: &ProviderId) -> Option<Self> {
        let (prefix, suffix) = match provider {
            ProviderId::Claude => (
                "You are a rigorous and nuanced expert. \
                 Structure your answer with clear sections. \
                 Explain the reasoning behind your claims.",
                "Be concise but complete.",
            ),
            ProviderId::Gpt4 => (
                "You are a knowledgeable expert. \
                 Provide a well-structured, thorough answer. \
                 Use examples where helpful.",
                "Be precise and actionable.",
            ),
            ProviderId::Gemini => (
                "Provide a comprehensive and accurate response. \
                 Include relevant context and practical insights. \
                 Structure your answer clearly.",
                "Focus on accuracy and clarity.",
            ),
            ProviderId::Mistral => (
                "You are an expert assistant. \
                 Provide a structured, precise and well-argued answer.",
                "Be rigorous in your analysis.",
            ),
            ProviderId::Cohere => (
                "You are an expert assistant. \
                 Provide a clear, well-organized answer with relevant details.",
                "Be thorough yet concise.",
            ),
            ProviderId::DeepSeek => (
                "You are a highly capable reasoning assistant. \
                 Think step by step and provide a well-structured answer.",
                "Show your reasoning clearly.",
            ),
            ProviderId::Ollama => (
                "You are a helpful assistant. \
                 Provide a clear and structured response.",
                "Be concise and accurate.",
            ),
            ProviderId::Custom(_) => return None,
        };
        Some(Self { prefix, suffix })
    }

    /// Wrap `question` with this template.
    pub fn apply(&self, question: &str) -> String {
        format!("{}\n\nQuestion: {}\n\n{}", self.prefix, question, self.suffix)
    }

    /// Prompt sent to `provider`: templated when `optimize` is set and a
    /// template exists, the raw question otherwise.
    pub fn build(provider: &ProviderId, question: &str, optimize: bool) -> String {
        match Self::for_provider(provider) {
            Some(template) if optimize => template.apply(question),
            _ => question.to_string(),
        }
    }
}
