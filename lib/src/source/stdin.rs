use std::io;

use async_trait::async_trait;
use tracing::trace;

use super::Sink;
use super::Source;

/// Passes this process's own stdin through to the finder.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinSource;

#[async_trait]
impl Source for StdinSource {
    async fn write_to(&self, sink: &mut Sink) -> io::Result<()> {
        let mut stdin = tokio::io::stdin();
        let bytes = tokio::io::copy(&mut stdin, sink).await?;
        trace!(bytes, "StdinSource: copied stdin");
        Ok(())
    }
}
