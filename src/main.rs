use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Error};
use clap::{App, AppSettings, Arg, SubCommand};

use charcov::{reformat_file, FrequencyCounter, LexiconBuilder};

fn main() -> Result<(), Error> {
    let matches = App::new("charcov")
        .version("0.1")
        .about("Prepare character-level text corpora for speech-recognition training.")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("coverage")
                .about("Count character frequencies in a transcript and report top-K coverage")
                .arg(
                    Arg::with_name("input")
                        .help("Transcript file, one `<utterance-id> <text>` record per line.")
                        .required(true),
                )
                .arg(
                    Arg::with_name("top_k")
                        .help("Number of most frequent characters to keep.")
                        .required(true),
                )
                .arg(
                    Arg::with_name("output")
                        .help("File the top-K characters are written to, one per line.")
                        .default_value("top_k_chars.txt"),
                ),
        )
        .subcommand(
            SubCommand::with_name("lexicon")
                .about("Build a character lexicon from a symbol list")
                .arg(
                    Arg::with_name("symbols")
                        .help("Symbol file, one symbol per line.")
                        .required(true),
                )
                .arg(
                    Arg::with_name("lexicon")
                        .help("Lexicon file that will be written.")
                        .required(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("dict")
                .about("Derive lexicon.txt and nonsilence_phones.txt from a transcript")
                .arg(
                    Arg::with_name("transcript")
                        .help("Transcript file, one `<utterance-id> <text>` record per line.")
                        .required(true),
                )
                .arg(
                    Arg::with_name("dict_dir")
                        .help("Directory the dictionary files are written into.")
                        .required(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("reformat")
                .about("Rewrite a transcript with one space between every character")
                .arg(
                    Arg::with_name("input")
                        .help("Transcript file, one `<utterance-id> <text>` record per line.")
                        .required(true),
                )
                .arg(
                    Arg::with_name("output")
                        .help("Reformatted transcript file that will be written.")
                        .required(true),
                ),
        )
        .get_matches();

    // the .unwraps below are safe because the arguments are required or defaulted

    if let Some(matches) = matches.subcommand_matches("coverage") {
        let input = matches.value_of("input").unwrap();
        let top_k = matches
            .value_of("top_k")
            .unwrap()
            .parse()
            .context("top_k must be a non-negative integer")?;
        let output = matches.value_of("output").unwrap();
        do_coverage(input, top_k, output)?;
    }

    if let Some(matches) = matches.subcommand_matches("lexicon") {
        let symbols = matches.value_of("symbols").unwrap();
        let lexicon = matches.value_of("lexicon").unwrap();
        do_lexicon(symbols, lexicon)?;
    }

    if let Some(matches) = matches.subcommand_matches("dict") {
        let transcript = matches.value_of("transcript").unwrap();
        let dict_dir = matches.value_of("dict_dir").unwrap();
        do_dict(transcript, dict_dir)?;
    }

    if let Some(matches) = matches.subcommand_matches("reformat") {
        let input = matches.value_of("input").unwrap();
        let output = matches.value_of("output").unwrap();
        reformat_file(input, output)?;
    }

    Ok(())
}

fn do_coverage(input: &str, top_k: usize, output: &str) -> Result<(), Error> {
    let mut counter = FrequencyCounter::new();
    counter.add_transcript_from_file(input)?;
    let spectrum = counter.into_spectrum();

    let file = File::create(output).with_context(|| format!("cannot create {}", output))?;
    let mut writer = BufWriter::new(file);
    spectrum.write_top_chars(top_k, &mut writer)?;
    writer.flush()?;

    print!("{}", spectrum.report(top_k));

    Ok(())
}

fn do_lexicon(symbols: &str, lexicon: &str) -> Result<(), Error> {
    let mut builder = LexiconBuilder::new();
    builder.add_symbols_from_file(symbols)?;

    let file = File::create(lexicon).with_context(|| format!("cannot create {}", lexicon))?;
    let mut writer = BufWriter::new(file);
    builder.write_lexicon(&mut writer)?;
    writer.flush()?;

    Ok(())
}

fn do_dict(transcript: &str, dict_dir: &str) -> Result<(), Error> {
    let mut builder = LexiconBuilder::new();
    builder.add_transcript_from_file(transcript)?;

    let dir = Path::new(dict_dir);

    let lexicon_path = dir.join("lexicon.txt");
    let file = File::create(&lexicon_path)
        .with_context(|| format!("cannot create {}", lexicon_path.display()))?;
    let mut writer = BufWriter::new(file);
    builder.write_lexicon(&mut writer)?;
    writer.flush()?;

    let phones_path = dir.join("nonsilence_phones.txt");
    let file = File::create(&phones_path)
        .with_context(|| format!("cannot create {}", phones_path.display()))?;
    let mut writer = BufWriter::new(file);
    builder.write_symbols(&mut writer)?;
    writer.flush()?;

    Ok(())
}
