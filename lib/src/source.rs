//! Line sources feed candidate text into a finder's stdin.

mod file;
mod slice;
mod stdin;

use std::io;

use async_trait::async_trait;
use enum_dispatch::enum_dispatch;
use tokio::io::AsyncWrite;

pub use self::file::FileSource;
pub use self::slice::SliceSource;
pub use self::stdin::StdinSource;

/// Writer handed to a [`Source`]; in practice the finder's stdin pipe.
pub type Sink = dyn AsyncWrite + Send + Unpin;

/// Produces newline-delimited candidate text.
#[async_trait]
#[enum_dispatch]
pub trait Source {
    /// Writes every line into `sink`. Closing the sink is the caller's job.
    async fn write_to(&self, sink: &mut Sink) -> io::Result<()>;
}

#[enum_dispatch(Source)]
#[derive(Debug, Clone)]
pub enum SourceImpl {
    Stdin(StdinSource),
    Slice(SliceSource),
    File(FileSource),
}

impl Default for SourceImpl {
    fn default() -> Self {
        StdinSource.into()
    }
}
