use thiserror::Error;

/// A transcript record with no whitespace separator after the utterance id.
///
/// Such a line cannot be split into `<id> <text>` and aborts the whole run.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("record has no whitespace separator after the utterance id")]
pub struct MalformedRecord;

#[derive(Error, Debug)]
pub enum TranscriptError {
    #[error("cannot read transcript: {0}")]
    Read(#[from] std::io::Error),
    #[error("line {line}: {source}")]
    MalformedLine { line: usize, source: MalformedRecord },
}

impl TranscriptError {
    pub(crate) fn at_line(source: MalformedRecord, line: usize) -> Self {
        TranscriptError::MalformedLine { line, source }
    }
}
