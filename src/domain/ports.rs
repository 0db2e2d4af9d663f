use crate::utils::error::Result;
use async_trait::async_trait;

/// Where the raw reference table bytes come from.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    /// Human-readable location, used in logs and load errors.
    fn describe(&self) -> String;

    async fn read_table(&self) -> Result<Vec<u8>>;
}
