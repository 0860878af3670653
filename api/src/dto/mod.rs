pub mod developer;

pub use developer::*;
pub use dt_shared::errors::ErrorResponse;
