//! Generator adapters - implementations of the `ReportGenerator` port.
//!
//! - `MockReportGenerator` - scripted responses for tests and local runs
//! - `OpenAIGenerator` - chat completions with forced JSON output
//! - `GeminiGenerator` - generateContent with forced JSON output

pub mod gemini;
pub mod mock;
pub mod openai;
mod prompt;

pub use gemini::{GeminiConfig, GeminiGenerator};
pub use mock::{MockError, MockReportGenerator};
pub use openai::{OpenAIConfig, OpenAIGenerator};
