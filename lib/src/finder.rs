use std::io;
use std::process::Stdio;

use bon::Builder;
use camino::Utf8Path;
use camino::Utf8PathBuf;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio::process::ChildStdin;
use tracing::debug;
use tracing::trace;

use crate::preset::Preset;
use crate::source::Source;
use crate::source::SourceImpl;
use crate::Error;
use crate::Registry;
use crate::Resolver;
use crate::Result;
use crate::Shell;

/// A launchable finder: executable, arguments and the attached line source.
///
/// Usually obtained through [`Finder::new`] or a [`Resolver`], which make sure
/// the executable exists. The builder skips that check.
#[derive(Debug, Clone, Builder)]
pub struct Finder {
    #[builder(into)]
    name: String,
    #[builder(default)]
    args: Vec<String>,
    #[builder(into)]
    path: Utf8PathBuf,
    #[builder(default)]
    source: SourceImpl,
    #[builder(default)]
    shell: Shell,
}

/// Accessors
impl Finder {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    #[must_use]
    pub fn source(&self) -> &SourceImpl {
        &self.source
    }

    #[must_use]
    pub fn shell(&self) -> &Shell {
        &self.shell
    }

    /// The line handed to the shell: path and arguments joined by spaces.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.path.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl Finder {
    /// Resolves a finder from the environment.
    ///
    /// With no arguments, the first registry preset found on `PATH` is used
    /// with its default arguments. Otherwise the first argument names the
    /// executable and the rest are passed to it.
    ///
    /// # Errors
    ///
    /// If the named executable, or every preset, is missing from `PATH`.
    pub fn new<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Resolver::from_env().resolve(args)
    }

    #[must_use]
    pub fn with_shell(mut self, shell: Shell) -> Self {
        self.shell = shell;
        self
    }

    /// Replaces the attached line source.
    pub fn read(&mut self, source: impl Into<SourceImpl>) {
        self.source = source.into();
    }

    /// Launches the finder, feeds it the attached source and returns the lines
    /// it printed.
    ///
    /// A single trailing newline does not produce an empty last line, so no
    /// output at all yields an empty list.
    ///
    /// # Errors
    ///
    /// - If the process cannot be started or waited on
    /// - If the source fails while feeding
    /// - If the finder exits unsuccessfully, which is how most finders report
    ///   an aborted selection
    /// - If the output is not UTF-8
    ///
    /// A finder that exits before reading all of its input is not a feed
    /// error; only its exit status counts.
    pub async fn run(&self) -> Result<Vec<String>> {
        if self.path.as_str().is_empty() {
            return Err(Error::MissingPath);
        }

        let line = self.command_line();
        debug!(name = %self.name, shell = %self.shell.path(), %line, "Running finder");

        // Stdout is piped so the selection can be captured, while stderr stays
        // inherited so the finder can draw its interface on the terminal. Stdin
        // is piped so the source can be written into it.
        let mut child = self
            .shell
            .command(&line)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn()
            .map_err(Error::Launch)?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::Launch(io::Error::other("finder stdin is not piped")))?;
        let mut stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::Launch(io::Error::other("finder stdout is not piped")))?;

        // Feeding must happen on its own task while this one drains stdout.
        // Writing the whole source up front blocks as soon as the pipe buffer
        // fills, and the finder may itself be blocked writing to a stdout
        // nobody reads yet. Do not collapse this into feed-then-wait.
        let feeder = tokio::spawn(feed(self.source.clone(), stdin));
        let drain = async {
            let mut buf = Vec::new();
            stdout.read_to_end(&mut buf).await.map(|_| buf)
        };
        let (fed, drained) = tokio::join!(feeder, drain);

        // The feeder has finished and stdin is closed, so waiting cannot hang
        // on input the finder is still expecting.
        let status = child.wait().await;

        fed.map_err(|error| Error::Feed(io::Error::other(error)))??;
        let output = drained.map_err(Error::Drain)?;
        let status = status.map_err(Error::Wait)?;
        debug!(%status, bytes = output.len(), "Finder exited");
        if !status.success() {
            return Err(Error::Exit { status });
        }

        let output = String::from_utf8(output)?;
        Ok(split_lines(&output))
    }

    /// Installs this finder into `dir` if its preset knows how.
    ///
    /// Finders without a preset are assumed to be installed already.
    ///
    /// # Errors
    ///
    /// If the install script cannot be started or fails.
    pub async fn install(&self, dir: &Utf8Path) -> Result<()> {
        let name = Utf8Path::new(&self.name).file_name().unwrap_or(self.name.as_str());
        match Registry::default().get(name) {
            Some(preset) => preset.install(&self.shell, dir).await,
            None => {
                debug!(%name, "No install hook for finder");
                Ok(())
            }
        }
    }
}

/// Writes `source` into the finder's stdin, then closes it.
async fn feed(source: SourceImpl, mut stdin: ChildStdin) -> Result<()> {
    let written = source.write_to(&mut stdin).await;
    let flushed = stdin.shutdown().await;
    // Dropping closes the pipe, which is the finder's end-of-input signal
    drop(stdin);

    match written.and(flushed) {
        Ok(()) => {
            trace!("Finder input complete");
            Ok(())
        }
        // The finder stopped reading, e.g. the human accepted before all
        // candidates arrived. Its exit status decides the outcome.
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => {
            trace!("Finder closed its input early");
            Ok(())
        }
        Err(error) => Err(Error::Feed(error)),
    }
}

/// Splits finder output into lines, dropping the one empty element a trailing
/// newline leaves behind.
fn split_lines(output: &str) -> Vec<String> {
    let mut lines: Vec<String> = output.split('\n').map(str::to_owned).collect();
    if lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::shell::quote;
    use crate::source::FileSource;
    use crate::source::SliceSource;

    fn finder(line: &str) -> Finder {
        let (path, args) = line.split_once(' ').unwrap_or((line, ""));
        let args = args.split(' ').filter(|a| !a.is_empty()).map(String::from);
        Finder::builder()
            .name(path)
            .path(path)
            .args(args.collect())
            .source(SliceSource::new(Vec::<String>::new()).into())
            .shell(Shell::default())
            .build()
    }

    #[rstest]
    #[case("a\nb\nc\n", &["a", "b", "c"])]
    #[case("a\nb\nc", &["a", "b", "c"])]
    #[case("", &[])]
    #[case("\n", &[""])]
    #[case("a\n\n", &["a", ""])]
    #[case("\n\n", &["", ""])]
    fn split_lines_works(#[case] output: &str, #[case] expected: &[&str]) {
        assert_eq!(split_lines(output), expected);
    }

    #[test]
    fn command_line_works() {
        let finder = Finder::builder()
            .name("fzf")
            .path("/usr/bin/fzf")
            .args(vec!["--multi".to_owned(), "--height=50%".to_owned()])
            .build();
        assert_eq!(finder.command_line(), "/usr/bin/fzf --multi --height=50%");
        assert!(matches!(finder.source(), SourceImpl::Stdin(_)));
    }

    #[rstest]
    #[case(r"a\nb\nc\n", &["a", "b", "c"])]
    #[case(r"a\nb\nc", &["a", "b", "c"])]
    #[case("", &[])]
    #[tokio::test]
    async fn run_trims_trailing_newline(#[case] printed: &str, #[case] expected: &[&str]) {
        let finder = finder(&format!("printf {}", quote(printed)));
        assert_eq!(finder.run().await.unwrap(), expected);
    }

    #[tokio::test]
    async fn run_feeds_source() {
        let mut finder = finder("cat");
        finder.read(SliceSource::new(["a", "b", "c"]));
        assert_eq!(finder.run().await.unwrap(), ["a", "b", "c"]);
    }

    #[tokio::test]
    async fn run_without_output_is_empty() {
        let mut finder = finder("true");
        finder.read(SliceSource::new(["a"]));
        assert!(finder.run().await.unwrap().is_empty());
    }

    // Input and output both far exceed a pipe buffer, so this only finishes
    // when feeding and draining run concurrently.
    #[tokio::test]
    async fn run_streams_large_input() {
        let lines: Vec<String> = (0..200_000).map(|i| format!("candidate {i}")).collect();
        let mut finder = finder("cat");
        finder.read(SliceSource::new(lines.clone()));
        assert_eq!(finder.run().await.unwrap(), lines);
    }

    #[tokio::test]
    async fn run_tolerates_early_close() {
        let lines = (0..200_000).map(|i| format!("candidate {i}"));
        let mut finder = finder("head -n 1");
        finder.read(SliceSource::new(lines));
        assert_eq!(finder.run().await.unwrap(), ["candidate 0"]);
    }

    #[rstest]
    #[case("false", 1)]
    #[case("exit 2", 2)]
    #[tokio::test]
    async fn run_reports_exit(#[case] line: &str, #[case] code: i32) {
        let error = finder(line).run().await.unwrap_err();
        assert!(
            matches!(&error, Error::Exit { status } if status.code() == Some(code)),
            "{error:?}"
        );
        assert!(!error.aborted());
    }

    #[tokio::test]
    async fn run_reports_abort() {
        let error = finder("exit 130").run().await.unwrap_err();
        assert!(error.aborted(), "{error:?}");
    }

    #[tokio::test]
    async fn run_reports_launch_failure() {
        let finder = finder("cat").with_shell(Shell::new("/nonexistent/shell"));
        let error = finder.run().await.unwrap_err();
        assert!(matches!(error, Error::Launch(_)), "{error:?}");
    }

    // The finder would wait forever if a failing source left its stdin open.
    #[tokio::test]
    async fn run_reports_feed_failure() {
        let dir = tempfile::tempdir().unwrap();
        let mut finder = finder("cat");
        finder.read(FileSource::new(dir.path().join("missing")));
        let error = finder.run().await.unwrap_err();
        assert!(
            matches!(&error, Error::Feed(e) if e.kind() == io::ErrorKind::NotFound),
            "{error:?}"
        );
    }

    #[tokio::test]
    async fn run_requires_path() {
        let finder = Finder::builder().name("empty").path("").build();
        let error = finder.run().await.unwrap_err();
        assert!(matches!(error, Error::MissingPath), "{error:?}");
    }

    #[tokio::test]
    async fn install_without_preset_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let target = Utf8Path::from_path(dir.path()).unwrap().join("bin");
        finder("cat").install(&target).await.unwrap();
        assert!(!target.exists());
    }

    // The shell cannot start, so reaching a recipe shows up as a launch error
    #[rstest]
    #[case("/opt/bin/fzf", true)]
    #[case("sk", true)]
    #[case("/opt/bin/percol", false)]
    #[case("/opt/bin/dmenu", false)]
    #[tokio::test]
    async fn install_finds_preset_by_file_name(#[case] name: &str, #[case] has_recipe: bool) {
        let dir = tempfile::tempdir().unwrap();
        let target = Utf8Path::from_path(dir.path()).unwrap().join("bin");
        let finder = Finder::builder()
            .name(name)
            .path(name)
            .shell(Shell::new("/nonexistent/shell"))
            .build();
        let result = finder.install(&target).await;
        if has_recipe {
            assert!(matches!(result, Err(Error::Launch(_))), "{result:?}");
        } else {
            assert!(result.is_ok(), "{result:?}");
        }
    }
}
