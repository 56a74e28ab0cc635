use std::io::{self, BufRead, Write};

#[cfg(feature = "tokio")]
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::{
    error::{Error, Result},
    model::{CardRecord, RECORD_LEN, TAIL_LEN},
    parser::{hex_array, hex_tokens, to_hex},
    variant::{VariantReport, VARIANT_INPUT_LEN},
};

const DEFAULT_LINE_CAPACITY: usize = 128;

pub const RECORD_PROMPT: &str =
    "Enter the 16-byte card number (e.g. 66 C3 30 00 10 00 00 00 00 00 00 00 00 59 04 05)";
pub const TAIL_PROMPT: &str = "Enter the new 3-byte tail (e.g. 59 04 06)";
pub const VARIANT_PROMPT: &str =
    "Enter 14 bytes of hex data separated by spaces (e.g. 01 02 03 ... 0E)";

fn parse_record(line: &str) -> Result<CardRecord> {
    hex_array::<RECORD_LEN>(line).map(CardRecord::new)
}

fn parse_tail(line: &str) -> Result<[u8; TAIL_LEN]> {
    hex_array::<TAIL_LEN>(line)
}

fn parse_variant_input(line: &str) -> Result<[u8; VARIANT_INPUT_LEN]> {
    let bytes = hex_tokens(line)?;
    bytes
        .as_slice()
        .try_into()
        .map_err(|_| Error::LengthMismatch {
            expected: VARIANT_INPUT_LEN,
            actual: bytes.len(),
        })
}

/// A wrapper around a line oriented text stream (usually stdin/stdout) that prompts for
/// card data and renders the results.
///
/// Invalid input is reported on the stream and prompted for again, up to `max_attempts` times.
pub struct CardStream<S> {
    inner: S,
    line_capacity: usize,
    max_attempts: Option<usize>,
}

impl<S> CardStream<S> {
    /// Creates a new [`CardStream`] that re-prompts until the input is valid.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            line_capacity: DEFAULT_LINE_CAPACITY,
            max_attempts: None,
        }
    }

    /// Creates a new [`CardStream`] with a custom line buffer capacity and attempt limit.
    pub fn with_capacity(inner: S, line_capacity: usize, max_attempts: Option<usize>) -> Self {
        let mut stream = Self::new(inner);
        stream.line_capacity = line_capacity;
        stream.max_attempts = max_attempts;
        stream
    }

    pub fn into_inner(self) -> S {
        self.inner
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    fn attempts_left(&self, attempt: usize) -> bool {
        self.max_attempts.map_or(true, |max| attempt < max)
    }
}

impl<S: BufRead + Write> CardStream<S> {
    /// Reads one line.
    ///
    /// # Errors
    ///
    /// If no bytes are read from the stream, an error kind of [`std::io::ErrorKind::UnexpectedEof`] is returned.
    pub fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::with_capacity(self.line_capacity);
        if self.inner.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "Input closed",
            ));
        }
        Ok(line)
    }

    /// Writes `prompt` and parses the answer, prompting again after every invalid line.
    ///
    /// # Errors
    ///
    /// I/O errors are returned as in [`BufRead::read_line`].
    /// Once the attempts are exhausted, the last parse error is returned with kind [`std::io::ErrorKind::InvalidData`].
    pub fn prompt<T>(&mut self, prompt: &str, parse: impl Fn(&str) -> Result<T>) -> io::Result<T> {
        let mut attempt = 0;
        loop {
            writeln!(self.inner, "{prompt}")?;
            self.inner.flush()?;

            let line = self.read_line()?;
            attempt += 1;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(e) if self.attempts_left(attempt) => {
                    log::debug!("rejected input {:?}: {e}", line.trim_end());
                    writeln!(self.inner, "Error: {e}")?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    pub fn read_record(&mut self) -> io::Result<CardRecord> {
        self.prompt(RECORD_PROMPT, parse_record)
    }

    pub fn read_tail(&mut self) -> io::Result<[u8; TAIL_LEN]> {
        self.prompt(TAIL_PROMPT, parse_tail)
    }

    /// Reads the 14 bytes compared across presets, strict hex tokens only.
    pub fn read_variant_input(&mut self) -> io::Result<[u8; VARIANT_INPUT_LEN]> {
        self.prompt(VARIANT_PROMPT, parse_variant_input)
    }

    /// Writes the patched record and its checksum.
    pub fn write_patched(&mut self, record: &CardRecord, crc: u16) -> io::Result<()> {
        self.inner.write_all(render_patched(record, crc).as_bytes())?;
        self.inner.flush()
    }

    /// Writes the input and one line per preset, unverified presets last under their own heading.
    pub fn write_reports(&mut self, data: &[u8], reports: &[VariantReport]) -> io::Result<()> {
        self.inner.write_all(render_reports(data, reports).as_bytes())?;
        self.inner.flush()
    }
}

#[cfg(feature = "tokio")]
impl<S: AsyncBufRead + AsyncWrite + Unpin> CardStream<S> {
    /// Reads one line asynchronously.
    ///
    /// # Errors
    ///
    /// If no bytes are read from the stream, an error kind of [`std::io::ErrorKind::UnexpectedEof`] is returned.
    pub async fn read_line_async(&mut self) -> io::Result<String> {
        let mut line = String::with_capacity(self.line_capacity);
        if self.inner.read_line(&mut line).await? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "Input closed",
            ));
        }
        Ok(line)
    }

    /// Asynchronous version of [`CardStream::prompt`].
    pub async fn prompt_async<T>(
        &mut self,
        prompt: &str,
        parse: impl Fn(&str) -> Result<T>,
    ) -> io::Result<T> {
        let mut attempt = 0;
        loop {
            self.inner.write_all(format!("{prompt}\n").as_bytes()).await?;
            self.inner.flush().await?;

            let line = self.read_line_async().await?;
            attempt += 1;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(e) if self.attempts_left(attempt) => {
                    log::debug!("rejected input {:?}: {e}", line.trim_end());
                    self.inner
                        .write_all(format!("Error: {e}\n").as_bytes())
                        .await?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    pub async fn read_record_async(&mut self) -> io::Result<CardRecord> {
        self.prompt_async(RECORD_PROMPT, parse_record).await
    }

    pub async fn read_tail_async(&mut self) -> io::Result<[u8; TAIL_LEN]> {
        self.prompt_async(TAIL_PROMPT, parse_tail).await
    }

    pub async fn read_variant_input_async(&mut self) -> io::Result<[u8; VARIANT_INPUT_LEN]> {
        self.prompt_async(VARIANT_PROMPT, parse_variant_input).await
    }

    pub async fn write_patched_async(&mut self, record: &CardRecord, crc: u16) -> io::Result<()> {
        self.inner
            .write_all(render_patched(record, crc).as_bytes())
            .await?;
        self.inner.flush().await
    }

    pub async fn write_reports_async(
        &mut self,
        data: &[u8],
        reports: &[VariantReport],
    ) -> io::Result<()> {
        self.inner
            .write_all(render_reports(data, reports).as_bytes())
            .await?;
        self.inner.flush().await
    }
}

/// Text shown after a patch: the full record, then the checksum
pub fn render_patched(record: &CardRecord, crc: u16) -> String {
    format!(
        "\nNew card number:\n{}\nComputed CRC = 0x{crc:04X}\n",
        to_hex(record.as_bytes())
    )
}

/// Text shown for a variant comparison
pub fn render_reports(data: &[u8], reports: &[VariantReport]) -> String {
    let mut out = format!("\nInput data:\n{}\n\nResults:\n", to_hex(data));
    let (verified, unverified): (Vec<&VariantReport>, Vec<&VariantReport>) =
        reports.iter().partition(|r| r.preset.is_verified());
    for report in verified {
        out.push_str(&format!("{report}\n"));
    }
    if !unverified.is_empty() {
        out.push_str("\nReader-specific variants (unverified):\n");
        for report in unverified {
            out.push_str(&format!("{report}\n"));
        }
    }
    out
}
