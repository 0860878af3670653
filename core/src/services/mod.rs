//! Business services containing the registry's use cases.

pub mod registry;
pub mod token_generator;

// Re-export commonly used types
pub use registry::TokenRegistry;
pub use token_generator::generate_token;
