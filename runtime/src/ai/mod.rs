pub mod completions;
pub mod qa;

pub use completions::CompletionsClient;
pub use qa::GraphQaChain;
