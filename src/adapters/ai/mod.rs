//! AI adapters - implementations of the CompletionProvider port.

mod mock_provider;
mod openai_provider;

pub use mock_provider::{MockCompletionProvider, MockError};
pub use openai_provider::{OpenAIConfig, OpenAIProvider};
