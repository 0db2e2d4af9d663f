use crate::adapters::source_for;
use crate::config::Settings;
use crate::core::calculator::DoseCalculator;
use crate::core::loader::load;
use crate::utils::error::Result;
use std::sync::Arc;

/// Loads the reference table once and hands it to a calculator.
///
/// The calculator only exists if the load completed, so there is no
/// "not loaded yet" state for a request to observe.
pub async fn bootstrap(settings: &Settings) -> Result<DoseCalculator> {
    let source = source_for(&settings.data_source)?;
    let table = load(source.as_ref(), settings.duplicates).await?;
    Ok(DoseCalculator::new(Arc::new(table)))
}
