//! Two-thread ingestion pipeline.
//!
//! ```text
//! FragmentSource ──> [reader thread] ──bounded──> [detector thread] ──> blocks
//! ```
//!
//! The reader blocks on the source and on a full queue; fragments are never
//! dropped. The detector is the only owner of the [`ItemDetector`] buffer,
//! which keeps block boundaries in arrival order.

use super::ItemDetector;
use crate::config::IngestConfig;
use crate::error::IngestError;
use crossbeam_channel::{bounded, unbounded, Receiver, Sender};
use std::io::BufRead;
use std::thread::{self, JoinHandle};

/// Fragment that ends a reader session.
const DISCONNECTED: &str = "DISCONNECTED";

const READER_THREAD: &str = "fragment-reader";
const DETECTOR_THREAD: &str = "item-detector";

/// Producer of raw screen-reader fragments, one rendered line each.
pub trait FragmentSource: Send + 'static {
    /// Block until the next fragment arrives. `Ok(None)` means the source
    /// is closed.
    fn next_fragment(&mut self) -> anyhow::Result<Option<String>>;
}

/// Fragments from any iterator. Handy for replaying captured sessions.
#[derive(Debug)]
pub struct IterSource<I> {
    fragments: I,
}

impl<I> IterSource<I> {
    pub fn new(fragments: I) -> Self {
        Self { fragments }
    }
}

impl<I> FragmentSource for IterSource<I>
where
    I: Iterator<Item = String> + Send + 'static,
{
    fn next_fragment(&mut self) -> anyhow::Result<Option<String>> {
        Ok(self.fragments.next())
    }
}

/// Newline-delimited fragments from a reader, such as a named pipe.
/// Invalid UTF-8 is replaced, not reported as a read error.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    line: Vec<u8>,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
        }
    }
}

impl<R> FragmentSource for ReaderSource<R>
where
    R: BufRead + Send + 'static,
{
    fn next_fragment(&mut self) -> anyhow::Result<Option<String>> {
        self.line.clear();
        if self.reader.read_until(b'\n', &mut self.line)? == 0 {
            return Ok(None);
        }
        let text = String::from_utf8_lossy(&self.line);
        Ok(Some(text.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Running reader and detector threads.
#[derive(Debug)]
pub struct IngestPipeline {
    blocks: Receiver<Vec<String>>,
    reader: JoinHandle<()>,
    detector: JoinHandle<()>,
}

impl IngestPipeline {
    /// Start both threads. The pipeline closes once the source is exhausted,
    /// disconnects, or keeps failing.
    pub fn spawn<S: FragmentSource>(source: S, config: &IngestConfig) -> Result<Self, IngestError> {
        let (fragment_tx, fragment_rx) = bounded(config.queue_capacity.max(1));
        let (block_tx, block_rx) = unbounded();
        let max_errors = config.max_consecutive_read_errors;

        let detector = thread::Builder::new()
            .name(DETECTOR_THREAD.to_string())
            .spawn(move || detect_loop(fragment_rx, block_tx))
            .map_err(|e| IngestError::Spawn(DETECTOR_THREAD, e))?;

        let reader = thread::Builder::new()
            .name(READER_THREAD.to_string())
            .spawn(move || read_loop(source, fragment_tx, max_errors))
            .map_err(|e| IngestError::Spawn(READER_THREAD, e))?;

        tracing::info!(queue_capacity = config.queue_capacity, "Started ingestion pipeline");
        Ok(Self {
            blocks: block_rx,
            reader,
            detector,
        })
    }

    /// Detected blocks, in order.
    pub fn blocks(&self) -> &Receiver<Vec<String>> {
        &self.blocks
    }

    /// Next block, or `None` once the pipeline has closed.
    pub fn recv(&self) -> Option<Vec<String>> {
        self.blocks.recv().ok()
    }

    /// Wait for both threads to finish.
    pub fn join(self) -> Result<(), IngestError> {
        let Self {
            blocks,
            reader,
            detector,
        } = self;
        drop(blocks);
        reader
            .join()
            .map_err(|_| IngestError::Panicked(READER_THREAD))?;
        detector
            .join()
            .map_err(|_| IngestError::Panicked(DETECTOR_THREAD))
    }
}

fn read_loop<S: FragmentSource>(mut source: S, fragments: Sender<String>, max_errors: usize) {
    let mut consecutive_errors = 0;
    loop {
        match source.next_fragment() {
            Ok(Some(raw)) => {
                consecutive_errors = 0;
                let fragment = raw.replace('\0', "");
                if fragment.is_empty() {
                    continue;
                }
                if fragment.contains(DISCONNECTED) {
                    tracing::debug!("Fragment source disconnected");
                    break;
                }
                if fragments.send(fragment).is_err() {
                    break;
                }
            }
            Ok(None) => {
                tracing::debug!("Fragment source closed");
                break;
            }
            Err(e) => {
                consecutive_errors += 1;
                tracing::error!(error = %e, consecutive_errors, "Failed to read fragment");
                if consecutive_errors >= max_errors.max(1) {
                    tracing::warn!(consecutive_errors, "Giving up on fragment source");
                    break;
                }
            }
        }
    }
}

fn detect_loop(fragments: Receiver<String>, blocks: Sender<Vec<String>>) {
    let mut detector = ItemDetector::new();
    for fragment in fragments.iter() {
        if let Some(block) = detector.ingest(&fragment) {
            if blocks.send(block).is_err() {
                break;
            }
        }
    }
    if detector.pending() > 0 {
        tracing::debug!(pending = detector.pending(), "Discarding unterminated fragments");
    }
}
