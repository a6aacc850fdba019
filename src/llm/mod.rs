#[cfg(feature = "gemini")]
pub mod client;
pub mod prompts;
pub mod provider;
#[cfg(feature = "gemini")]
pub mod types;

#[cfg(feature = "gemini")]
pub use client::*;
pub use prompts::*;
pub use provider::*;
