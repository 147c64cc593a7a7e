//! Outreach LLM Integration
//!
//! Prompt templates, placeholder rendering and the completion service client

mod client;
mod llm_trait;
pub mod prompts;
mod template;
mod types;

pub use client::OpenAiClient;
pub use llm_trait::TextGenerator;
pub use prompts::{
    compose_email_prompt, compose_shorten_prompt, full_template, shorten_template, style_sample,
    Category, EmailFields,
};
pub use template::{render, values, PromptTemplate, TemplateError};
pub use types::{ApiErrorBody, ApiErrorDetail, CompletionChoice, CompletionRequest, CompletionResponse};
