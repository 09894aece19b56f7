use std::io;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs::File;
use tracing::trace;

use super::Sink;
use super::Source;

/// Streams a file's contents verbatim.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Source for FileSource {
    async fn write_to(&self, sink: &mut Sink) -> io::Result<()> {
        let mut file = File::open(&self.path).await?;
        let bytes = tokio::io::copy(&mut file, sink).await?;
        trace!(bytes, path = %self.path.display(), "FileSource: copied file");
        Ok(())
    }
}
