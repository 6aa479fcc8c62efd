//! File-level tests for the transcript pipeline.

use std::fs;
use std::path::PathBuf;

use charcov::{reformat_file, FrequencyCounter, LexiconBuilder, TranscriptError};

fn temp_path(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("charcov-test");
    fs::create_dir_all(&dir).expect("failed to create temp dir");
    dir.join(name)
}

#[test]
fn coverage_pipeline_over_a_transcript_file() {
    let path = temp_path("transcript.txt");
    fs::write(&path, "utt1 你好,世界！\nutt2 你好 <noise> 123\n").unwrap();

    let mut counter = FrequencyCounter::new();
    counter.add_transcript_from_file(&path).unwrap();
    let spectrum = counter.into_spectrum();

    assert_eq!(spectrum.total_frequency(), 6);
    assert_eq!(spectrum.char_count(), 4);
    assert_eq!(spectrum.entries()[0], ('好', 2));
}

#[test]
fn malformed_record_error_carries_the_line_number() {
    let path = temp_path("malformed.txt");
    fs::write(&path, "utt1 你好\nbroken\n").unwrap();

    let mut counter = FrequencyCounter::new();
    let error = counter.add_transcript_from_file(&path).unwrap_err();
    match error {
        TranscriptError::MalformedLine { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn dict_files_derive_from_transcript_characters() {
    let path = temp_path("dict-input.txt");
    fs::write(&path, "utt1 你好\nutt2 好 ab\n").unwrap();

    let mut builder = LexiconBuilder::new();
    builder.add_transcript_from_file(&path).unwrap();

    let mut lexicon = Vec::new();
    builder.write_lexicon(&mut lexicon).unwrap();
    let lexicon = String::from_utf8(lexicon).unwrap();

    assert!(lexicon.starts_with("SIL SIL\n<NON/> NSN\n<UNK> SPN\n<SPK/> SPN\n"));
    assert!(lexicon.ends_with("A A\nB B\n你 你\n好 好\n"));
}

#[test]
fn reformat_writes_spaced_records() {
    let input = temp_path("reformat-input.txt");
    let output = temp_path("reformat-output.txt");
    fs::write(&input, "utt1 你好 世界\nutt2 ab\n").unwrap();

    reformat_file(&input, &output).unwrap();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "utt1 你 好 世 界\nutt2 a b\n"
    );
}
