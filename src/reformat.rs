use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::errors::{MalformedRecord, TranscriptError};
use crate::normalizer::parse_record_lenient;

/// Rewrite one record as `<id> <c> <c> ...`, a single space between every
/// character of the text. The original inter-token spacing is discarded
/// first, so each character of the joined text becomes its own token.
pub fn reformat_line(line: &str) -> Result<String, MalformedRecord> {
    let (id, text) = parse_record_lenient(line)?;

    let mut output = String::with_capacity(id.len() + 1 + text.len() * 2);
    output.push_str(id);
    output.push(' ');
    for (index, ch) in text.chars().enumerate() {
        if index > 0 {
            output.push(' ');
        }
        output.push(ch);
    }

    Ok(output)
}

/// Reformat a whole transcript file, one record per line.
pub fn reformat_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
) -> Result<(), TranscriptError> {
    let reader = BufReader::new(File::open(input)?);
    let mut writer = BufWriter::new(File::create(output)?);

    for (index, line) in reader.lines().enumerate() {
        let reformatted =
            reformat_line(&line?).map_err(|source| TranscriptError::at_line(source, index + 1))?;
        writeln!(writer, "{}", reformatted)?;
    }
    writer.flush()?;

    Ok(())
}
