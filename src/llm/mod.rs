pub mod provider;
pub mod gemini;
pub mod openai;
pub mod demo;
pub mod scripted;
pub mod router;
pub mod types;

pub use provider::{generate_text, LLMProvider};
pub use router::{create_provider, resolve_provider};
pub use types::LLMResponse;
