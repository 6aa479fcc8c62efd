use std::collections::BTreeSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use crate::errors::TranscriptError;
use crate::normalizer::parse_record_lenient;

/// Reserved entries emitted ahead of the real symbols: silence, noise,
/// unknown, and speaker tags mapped onto the reserved phones.
pub const LEXICON_HEADER: [(&str, &str); 4] = [
    ("SIL", "SIL"),
    ("<NON/>", "NSN"),
    ("<UNK>", "SPN"),
    ("<SPK/>", "SPN"),
];

/// Collects a distinct, upper-cased symbol set and writes it out as a
/// character lexicon for a speech-recognition dictionary.
///
/// Symbols can come from a prepared list (one per line) or be derived
/// from the characters of a transcript. Output order is always ascending
/// by code point.
#[derive(Debug, Default)]
pub struct LexiconBuilder {
    symbols: BTreeSet<String>,
}

impl LexiconBuilder {
    /// Create a builder with an empty symbol set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one symbol. Input is trimmed and upper-cased; blank input is
    /// ignored.
    pub fn add_symbol(&mut self, symbol: &str) -> &mut Self {
        let symbol = symbol.trim();
        if !symbol.is_empty() {
            self.symbols.insert(symbol.to_uppercase());
        }

        self
    }

    /// Add symbols from a file holding one symbol per line.
    pub fn add_symbols_from_file<P: AsRef<Path>>(&mut self, path: P) -> io::Result<&mut Self> {
        let reader = BufReader::new(File::open(path)?);
        for line in reader.lines() {
            self.add_symbol(&line?);
        }

        Ok(self)
    }

    /// Derive symbols from a transcript file: every distinct character of
    /// the records' text becomes one symbol. Records may be id-only; a
    /// blank line is malformed.
    pub fn add_transcript_from_file<P: AsRef<Path>>(
        &mut self,
        path: P,
    ) -> Result<&mut Self, TranscriptError> {
        let reader = BufReader::new(File::open(path)?);
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let (_id, text) = parse_record_lenient(&line)
                .map_err(|source| TranscriptError::at_line(source, index + 1))?;
            for ch in text.chars() {
                let mut symbol = [0u8; 4];
                self.add_symbol(ch.encode_utf8(&mut symbol));
            }
        }

        Ok(self)
    }

    /// The collected symbols in ascending order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    /// Write the reserved header followed by one `<symbol> <symbol>` line
    /// per symbol, ascending.
    pub fn write_lexicon<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for &(word, phone) in LEXICON_HEADER.iter() {
            writeln!(writer, "{} {}", word, phone)?;
        }
        for symbol in &self.symbols {
            writeln!(writer, "{} {}", symbol, symbol)?;
        }

        Ok(())
    }

    /// Write the bare symbol list, one per line, ascending.
    pub fn write_symbols<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for symbol in &self.symbols {
            writeln!(writer, "{}", symbol)?;
        }

        Ok(())
    }
}
