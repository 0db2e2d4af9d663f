// Adapters layer: concrete reference table sources (local disk, http).

pub mod http;
pub mod local;

use crate::domain::ports::ReferenceSource;
use crate::utils::error::Result;
use crate::utils::validation::is_remote_source;

pub use http::HttpSource;
pub use local::LocalFileSource;

/// Picks an http source for `http://`/`https://` locations, otherwise a local file.
pub fn source_for(location: &str) -> Result<Box<dyn ReferenceSource>> {
    if is_remote_source(location) {
        Ok(Box::new(HttpSource::new(location)?))
    } else {
        Ok(Box::new(LocalFileSource::new(location)))
    }
}
