use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::info;

use crate::code::CodeTable;
use crate::codec::{Codec, CodecOptions};
use crate::error::{Error, Result};
use crate::store;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Encode,
    Decode,
}

/// One compression or decompression run between two files.
#[derive(Debug, Clone)]
pub struct Job {
    pub mode: Mode,
    pub source: PathBuf,
    pub destination: PathBuf,
    /// Where the frequency table is written on encode and read on decode.
    pub frequency_store: PathBuf,
    pub options: CodecOptions,
}

/// Outcome of a finished [`Job`].
#[derive(Debug, Clone)]
pub struct Report {
    pub mode: Mode,
    pub source_len: u64,
    pub destination_len: u64,
    pub elapsed: Duration,
    /// Present for encode runs.
    pub codes: Option<CodeTable>,
}

impl Report {
    /// Destination size as a percentage of source size, rounded to two
    /// decimals (half away from zero). `None` for an empty source.
    pub fn ratio_percent(&self) -> Option<f64> {
        if self.source_len == 0 {
            return None;
        }
        let ratio = self.destination_len as f64 / self.source_len as f64 * 100.0;
        Some((ratio * 100.0).round() / 100.0)
    }
}

impl Job {
    pub fn new(mode: Mode, source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            mode,
            source: source.into(),
            destination: destination.into(),
            frequency_store: PathBuf::from(store::DEFAULT_STORE_PATH),
            options: CodecOptions::default(),
        }
    }

    pub fn with_frequency_store(mut self, path: impl Into<PathBuf>) -> Self {
        self.frequency_store = path.into();
        self
    }

    pub fn with_options(mut self, options: CodecOptions) -> Self {
        self.options = options;
        self
    }

    pub fn run(&self) -> Result<Report> {
        if !self.source.is_file() {
            return Err(Error::MissingSourceFile {
                path: self.source.display().to_string(),
            });
        }

        let started = Instant::now();
        let codec = Codec::new(self.options);
        let input = fs::read(&self.source)?;

        let codes = match self.mode {
            Mode::Encode => {
                let encoded = codec.encode(&input)?;
                store::save(&encoded.frequencies, &self.frequency_store)?;
                fs::write(&self.destination, &encoded.payload)?;
                Some(encoded.codes)
            }
            Mode::Decode => {
                let frequencies = store::load(&self.frequency_store)?;
                let output = codec.decode(&input, &frequencies)?;
                fs::write(&self.destination, output)?;
                None
            }
        };
        let elapsed = started.elapsed();

        let report = Report {
            mode: self.mode,
            source_len: input.len() as u64,
            destination_len: fs::metadata(&self.destination)?.len(),
            elapsed,
            codes,
        };
        info!(
            mode = ?self.mode,
            source = %self.source.display(),
            destination = %self.destination.display(),
            source_len = report.source_len,
            destination_len = report.destination_len,
            elapsed_ms = elapsed.as_millis() as u64,
            "job finished"
        );

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(source_len: u64, destination_len: u64) -> Report {
        Report {
            mode: Mode::Encode,
            source_len,
            destination_len,
            elapsed: Duration::ZERO,
            codes: None,
        }
    }

    #[test]
    fn ratio_rounds_to_two_decimals() {
        assert_eq!(report(3, 1).ratio_percent(), Some(33.33));
        assert_eq!(report(3, 2).ratio_percent(), Some(66.67));
        assert_eq!(report(8, 5).ratio_percent(), Some(62.5));
        assert_eq!(report(0, 0).ratio_percent(), None);
    }

    #[test]
    fn missing_source_is_reported_first() {
        let job = Job::new(Mode::Decode, "/nonexistent/input.huff", "/nonexistent/out")
            .with_frequency_store("/nonexistent/char_freq");
        let err = job.run().unwrap_err();
        assert!(matches!(err, Error::MissingSourceFile { .. }));
    }
}
