use std::cmp::Reverse;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use indexmap::IndexMap;

use crate::errors::{MalformedRecord, TranscriptError};
use crate::normalizer::normalize_line;
use crate::utils::group_thousands;

/// Characters occurring this many times or fewer count as low-occurrence.
pub const LOW_OCCURRENCE_THRESHOLD: u64 = 5;

const REPORT_HEAD_LEN: usize = 10;

/// Accumulates per-character occurrence counts over a corpus.
///
/// Feed it raw transcript records (or whole files) and turn it into a
/// [`Spectrum`] once the corpus has been consumed. See
/// [crate documentation](index.html) for an example.
#[derive(Debug, Default)]
pub struct FrequencyCounter {
    counts: IndexMap<char, u64>,
}

impl FrequencyCounter {
    /// Create an empty counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count every record of a transcript file.
    ///
    /// The file is assumed to hold one `<id> <text>` record per line.
    /// A record with no id/text separator aborts with the 1-based line
    /// number attached.
    pub fn add_transcript_from_file<P: AsRef<Path>>(
        &mut self,
        path: P,
    ) -> Result<&mut Self, TranscriptError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        for (index, line) in reader.lines().enumerate() {
            self.add_record(&line?)
                .map_err(|source| TranscriptError::at_line(source, index + 1))?;
        }

        Ok(self)
    }

    /// Normalize one raw `<id> <text>` record and count its characters.
    pub fn add_record(&mut self, line: &str) -> Result<&mut Self, MalformedRecord> {
        let normalized = normalize_line(line)?;
        Ok(self.add_text(&normalized))
    }

    /// Count the characters of an already-normalized string.
    pub fn add_text(&mut self, text: &str) -> &mut Self {
        for ch in text.chars() {
            *self.counts.entry(ch).or_insert(0) += 1;
        }

        self
    }

    /// Rank the accumulated table into a spectrum.
    pub fn into_spectrum(self) -> Spectrum {
        let mut entries: Vec<(char, u64)> = self.counts.into_iter().collect();
        entries.sort_unstable_by_key(|&(ch, count)| (Reverse(count), Reverse(ch)));

        Spectrum { entries }
    }
}

/// Character counts ranked by descending frequency.
///
/// Characters with equal counts are ordered by descending character value,
/// so the ranking is a total order independent of insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spectrum {
    entries: Vec<(char, u64)>,
}

impl Spectrum {
    /// All `(character, count)` pairs in ranked order.
    pub fn entries(&self) -> &[(char, u64)] {
        &self.entries
    }

    /// Number of unique characters.
    pub fn char_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first `k` entries; the whole spectrum when `k` exceeds its length.
    pub fn top(&self, k: usize) -> &[(char, u64)] {
        &self.entries[..k.min(self.entries.len())]
    }

    /// Sum of all counts. Equals the number of normalized characters counted.
    pub fn total_frequency(&self) -> u64 {
        self.entries.iter().map(|&(_, count)| count).sum()
    }

    /// Sum of the counts of the top `k` entries.
    pub fn top_frequency(&self, k: usize) -> u64 {
        self.top(k).iter().map(|&(_, count)| count).sum()
    }

    /// Share of all occurrences covered by the top `k` characters, as a
    /// percentage. `None` when the spectrum holds no occurrences at all.
    pub fn coverage(&self, k: usize) -> Option<f64> {
        let total = self.total_frequency();
        if total == 0 {
            None
        } else {
            Some(self.top_frequency(k) as f64 / total as f64 * 100.0)
        }
    }

    /// Number of entries at or below [`LOW_OCCURRENCE_THRESHOLD`].
    pub fn low_occurrence_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|&&(_, count)| count <= LOW_OCCURRENCE_THRESHOLD)
            .count()
    }

    /// Low-occurrence entries as a whole percentage of all unique
    /// characters, rounded to the nearest integer. `None` when the
    /// spectrum is empty.
    pub fn low_occurrence_ratio(&self) -> Option<u32> {
        if self.entries.is_empty() {
            return None;
        }

        let ratio = self.low_occurrence_count() as f64 / self.entries.len() as f64 * 100.0;
        Some(ratio.round() as u32)
    }

    /// Write the top `k` characters, one per line, in ranked order.
    pub fn write_top_chars<W: Write>(&self, k: usize, mut writer: W) -> io::Result<()> {
        for &(ch, _) in self.top(k) {
            writeln!(writer, "{}", ch)?;
        }

        Ok(())
    }

    /// Corpus statistics for a top-`k` cut, ready for printing.
    pub fn report(&self, k: usize) -> CoverageReport {
        CoverageReport::new(self, k)
    }
}

/// Printable corpus-wide statistics for one top-K cut of a [`Spectrum`].
#[derive(Debug, Clone)]
pub struct CoverageReport {
    top_k: usize,
    total_frequency: u64,
    top_frequency: u64,
    coverage: Option<f64>,
    char_count: usize,
    head: Vec<(char, u64)>,
    low_occurrence_count: usize,
    low_occurrence_ratio: Option<u32>,
}

impl CoverageReport {
    fn new(spectrum: &Spectrum, top_k: usize) -> Self {
        // the head listing is all-or-nothing: fewer than 10 unique
        // characters and it is skipped, the rest of the report still runs
        let head = if spectrum.char_count() >= REPORT_HEAD_LEN {
            spectrum.entries()[..REPORT_HEAD_LEN].to_vec()
        } else {
            Vec::new()
        };

        Self {
            top_k,
            total_frequency: spectrum.total_frequency(),
            top_frequency: spectrum.top_frequency(top_k),
            coverage: spectrum.coverage(top_k),
            char_count: spectrum.char_count(),
            head,
            low_occurrence_count: spectrum.low_occurrence_count(),
            low_occurrence_ratio: spectrum.low_occurrence_ratio(),
        }
    }
}

impl fmt::Display for CoverageReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "total frequency: {}",
            group_thousands(self.total_frequency)
        )?;
        writeln!(
            f,
            "top-K frequency (K = {}): {}",
            group_thousands(self.top_k as u64),
            group_thousands(self.top_frequency)
        )?;
        match self.coverage {
            Some(coverage) => writeln!(f, "coverage: {:.2}%", coverage)?,
            None => writeln!(f, "coverage: cannot be calculated, total frequency is 0")?,
        }
        writeln!(
            f,
            "unique characters: {}",
            group_thousands(self.char_count as u64)
        )?;

        if !self.head.is_empty() {
            writeln!(f)?;
            writeln!(f, "top {} characters:", REPORT_HEAD_LEN)?;
            for &(ch, count) in &self.head {
                writeln!(f, "  {} {}", ch, group_thousands(count))?;
            }
        }

        writeln!(f)?;
        write!(
            f,
            "low-occurrence characters (count <= {}): {}",
            LOW_OCCURRENCE_THRESHOLD,
            group_thousands(self.low_occurrence_count as u64)
        )?;
        if let Some(ratio) = self.low_occurrence_ratio {
            write!(f, " ({}%)", ratio)?;
        }
        writeln!(f)
    }
}
