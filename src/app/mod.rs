pub mod bootstrap;
pub mod responder;

pub use bootstrap::bootstrap;
pub use responder::{respond_catalog, respond_dose, ApiResponse};
