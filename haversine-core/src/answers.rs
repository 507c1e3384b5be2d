//! Answer files: raw little-endian f64 values, 8 bytes each, no header.

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::error::{Error, Result};

const F64_SIZE: usize = std::mem::size_of::<f64>();

/// Decode a whole answer buffer.
pub fn decode_answers(bytes: &[u8]) -> Result<Vec<f64>> {
    if bytes.len() % F64_SIZE != 0 {
        return Err(Error::TruncatedAnswers { len: bytes.len() });
    }
    Ok(bytes
        .chunks_exact(F64_SIZE)
        .map(|chunk| {
            let mut raw = [0u8; F64_SIZE];
            raw.copy_from_slice(chunk);
            f64::from_le_bytes(raw)
        })
        .collect())
}

/// Append `values` to `out` in answer-file encoding.
pub fn encode_answers(values: &[f64], out: &mut Vec<u8>) {
    out.reserve(values.len() * F64_SIZE);
    for value in values {
        out.extend_from_slice(&value.to_le_bytes());
    }
}

/// Read and decode an answer file.
pub fn read_answers(path: impl AsRef<Path>) -> Result<Vec<f64>> {
    let path = path.as_ref();
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read answer file");
    decode_answers(&bytes)
}

/// Streaming writer for answer files.
pub struct AnswerWriter<W: Write> {
    out: BufWriter<W>,
    buf: Vec<u8>,
    written: usize,
}

impl<W: Write> AnswerWriter<W> {
    pub fn new(out: W) -> Self {
        AnswerWriter {
            out: BufWriter::new(out),
            buf: Vec::new(),
            written: 0,
        }
    }

    pub fn write_batch(&mut self, values: &[f64]) -> Result<()> {
        self.buf.clear();
        encode_answers(values, &mut self.buf);
        self.out.write_all(&self.buf)?;
        self.written += values.len();
        Ok(())
    }

    /// Number of values written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        self.out
            .into_inner()
            .map_err(|err| Error::Io(err.into_error()))
    }
}
