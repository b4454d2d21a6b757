use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

use typepipe_types::{Config, StripMode};

use crate::error::{PipeError, Result};
use crate::normalize::normalize;
use crate::predicate::LineMatcher;
use crate::transform::Transformer;

/// Per-run line counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineStats {
    pub read: u64,
    pub matched: u64,
    pub transformed: u64,
    pub passed: u64,
    pub dropped: u64,
}

impl LineStats {
    fn record(&mut self, disposition: Disposition) {
        match disposition {
            Disposition::Transformed => {
                self.matched += 1;
                self.transformed += 1;
            }
            Disposition::Emitted => self.matched += 1,
            Disposition::Passed => self.passed += 1,
            Disposition::Dropped => self.dropped += 1,
        }
    }
}

/// How the loop stopped
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// End of input reached
    Finished(LineStats),
    /// Cancelled by an interrupt
    Interrupted(LineStats),
}

impl Outcome {
    pub fn stats(&self) -> LineStats {
        match self {
            Outcome::Finished(stats) | Outcome::Interrupted(stats) => *stats,
        }
    }
}

/// What happened to a single line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Disposition {
    /// Matched and piped through the command
    Transformed,
    /// Matched and written without a command
    Emitted,
    /// Unmatched and written unchanged
    Passed,
    /// Unmatched and filtered out
    Dropped,
}

/// The read, evaluate, dispatch loop.
///
/// Lines are handled strictly one at a time: a line's output, including any
/// child process it spawns, is complete before the next line is read.
pub struct LinePipeline {
    matcher: LineMatcher,
    strip: StripMode,
    filter_unmatched: bool,
    transformer: Option<Transformer>,
    cancel: CancellationToken,
}

impl LinePipeline {
    pub fn new(config: &Config) -> Self {
        Self {
            matcher: LineMatcher::new(config.types.clone()).complemented(config.complement),
            strip: config.strip,
            filter_unmatched: config.filter_unmatched,
            transformer: config.command.clone().map(Transformer::new),
            cancel: CancellationToken::new(),
        }
    }

    /// Stop the loop when `cancel` fires
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Process `input` until end of input or cancellation
    pub async fn run<R, W>(&self, mut input: R, mut output: W) -> Result<Outcome>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut stats = LineStats::default();
        let mut line = Vec::new();

        loop {
            line.clear();

            let n = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Ok(Outcome::Interrupted(stats)),
                result = input.read_until(b'\n', &mut line) => {
                    result.map_err(|source| PipeError::Read { source })?
                }
            };
            if n == 0 {
                break;
            }
            stats.read += 1;

            let disposition = tokio::select! {
                biased;
                _ = self.cancel.cancelled() => return Ok(Outcome::Interrupted(stats)),
                result = self.dispatch(&line, &mut output) => result?,
            };
            tracing::trace!(line = stats.read, ?disposition, "line handled");
            stats.record(disposition);
        }

        tracing::debug!(?stats, "end of input");
        Ok(Outcome::Finished(stats))
    }

    async fn dispatch<W>(&self, line: &[u8], output: &mut W) -> Result<Disposition>
    where
        W: AsyncWrite + Unpin,
    {
        if !self.matcher.matches(line) {
            if self.filter_unmatched {
                return Ok(Disposition::Dropped);
            }
            write_flushed(output, line).await?;
            return Ok(Disposition::Passed);
        }

        let normalized = normalize(line, self.strip);
        match &self.transformer {
            Some(transformer) => {
                transformer.run(normalized).await?;
                Ok(Disposition::Transformed)
            }
            None => {
                write_flushed(output, normalized).await?;
                Ok(Disposition::Emitted)
            }
        }
    }
}

/// Write and flush, so every line is visible downstream before the next step
async fn write_flushed<W>(output: &mut W, bytes: &[u8]) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    output
        .write_all(bytes)
        .await
        .map_err(|source| PipeError::Write { source })?;
    output
        .flush()
        .await
        .map_err(|source| PipeError::Write { source })
}
