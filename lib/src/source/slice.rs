use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::io::BufWriter;

use super::Sink;
use super::Source;

/// Serializes an in-memory list, one line per element.
#[derive(Debug, Clone)]
pub struct SliceSource {
    lines: Arc<[String]>,
}

impl SliceSource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }
}

#[async_trait]
impl Source for SliceSource {
    async fn write_to(&self, sink: &mut Sink) -> io::Result<()> {
        let mut writer = BufWriter::new(sink);
        for line in self.lines.iter() {
            writer.write_all(line.as_bytes()).await?;
            writer.write_all(b"\n").await?;
        }
        writer.flush().await
    }
}
