pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, Command};

pub use adapters::{HttpSource, LocalFileSource};
pub use app::{bootstrap, respond_catalog, respond_dose, ApiResponse};
pub use config::Settings;
pub use core::{
    calculator::DoseCalculator,
    loader::{DuplicatePolicy, ReferenceTable},
};
pub use domain::model::{Catalog, DoseRequest, DoseResult, DrugReference};
pub use utils::error::{DoseError, Result};
