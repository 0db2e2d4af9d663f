use crate::domain::ports::ReferenceSource;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LocalFileSource {
    path: PathBuf,
}

impl LocalFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl ReferenceSource for LocalFileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn read_table(&self) -> Result<Vec<u8>> {
        let data = tokio::fs::read(&self.path).await?;
        tracing::debug!("Read {} bytes from {}", data.len(), self.path.display());
        Ok(data)
    }
}
