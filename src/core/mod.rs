pub mod calculator;
pub mod loader;

pub use crate::domain::model::{Catalog, DoseRequest, DoseResult, DrugReference};
pub use crate::domain::ports::ReferenceSource;
pub use crate::utils::error::Result;
