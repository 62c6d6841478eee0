use std::error::Error;
use std::fmt::Debug;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;

#[macro_use]
extern crate text_io;

use bigwords::utils::serialization;
use bigwords::{largest_words_many, Dictionary, LetterBag, LetterSource, PresenceTrie, Word};

#[derive(Parser, Debug)]
#[command(name = "bigwords", version)]
#[command(about = "Find the longest words that can be spelled from a rack of letters")]
struct Args {
    /// Word list, one word per line
    #[arg(short, long, default_value = "wordlist.txt")]
    words: PathBuf,

    /// Where the built index is cached between runs
    #[arg(short, long, default_value = "words.idx")]
    index: PathBuf,

    /// Rebuild the index even if a cached one exists
    #[arg(long)]
    rebuild: bool,

    /// Number of random racks to try
    #[arg(short, long, default_value = "10")]
    rounds: usize,

    /// Letters per random rack
    #[arg(short, long, default_value = "10")]
    length: usize,

    /// Seed for the random racks
    #[arg(long)]
    seed: Option<u64>,

    /// Racks to look up instead of random ones
    #[arg(long, num_args = 1..)]
    letters: Vec<String>,

    /// Read racks from stdin, one per line, until an empty line
    #[arg(long)]
    interactive: bool,

    /// Check every dictionary word instead of using the index
    #[arg(long)]
    linear: bool,

    /// Print one JSON object per rack
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    letters: &'a str,
    words: Vec<&'a str>,
}

enum Lookup {
    Indexed(PresenceTrie),
    Linear(Dictionary),
}

impl Lookup {
    fn open(args: &Args) -> bigwords::Result<Self> {
        if args.linear {
            return Ok(Self::Linear(Dictionary::from_file(&args.words)?));
        }
        let trie = serialization::load_or_build(&args.index, args.rebuild, || {
            Ok(Dictionary::from_file(&args.words)?.into_index())
        })?;
        Ok(Self::Indexed(trie))
    }

    fn query_many(&self, bags: &[LetterBag]) -> Vec<Vec<&Word>> {
        match self {
            Self::Indexed(trie) => largest_words_many(trie, bags),
            Self::Linear(dict) => bags.iter().map(|b| dict.largest_words_linear(b)).collect(),
        }
    }
}

fn random_racks(args: &Args) -> Vec<String> {
    let source = LetterSource::default();
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    (0..args.rounds).map(|_| source.draw(args.length, &mut rng)).collect()
}

/// Racks are case-insensitive. Bad racks are reported and skipped.
fn parse_rack(rack: String) -> Option<(String, LetterBag)> {
    match LetterBag::parse(&rack.to_ascii_lowercase()) {
        Ok(bag) => Some((rack, bag)),
        Err(e) => {
            warn!("Skipping rack: {}", e);
            None
        }
    }
}

fn parse_racks(racks: Vec<String>) -> Vec<(String, LetterBag)> {
    racks.into_iter().filter_map(parse_rack).collect()
}

/// What to do with one line typed in interactive mode
#[derive(Debug)]
enum RackInput {
    Quit,
    Skip,
    Rack(String, LetterBag),
}

/// Unreadable lines (e.g. not UTF-8) are skipped like any other bad rack
fn rack_input<E: Debug>(line: Result<String, E>) -> RackInput {
    let line = match line {
        Ok(line) => line,
        Err(e) => {
            warn!("Skipping rack: {:?}", e);
            return RackInput::Skip;
        }
    };
    let line = line.trim();
    if line.is_empty() {
        return RackInput::Quit;
    }
    match parse_rack(line.to_owned()) {
        Some((rack, bag)) => RackInput::Rack(rack, bag),
        None => RackInput::Skip,
    }
}

fn print_results(
    lookup: &Lookup,
    racks: &[(String, LetterBag)],
    json: bool,
) -> Result<(), Box<dyn Error>> {
    let bags: Vec<LetterBag> = racks.iter().map(|(_, bag)| bag.clone()).collect();
    for ((letters, _), found) in racks.iter().zip(lookup.query_many(&bags)) {
        let mut words: Vec<&str> = found.iter().map(|w| w.as_str()).collect();
        words.sort_unstable();
        if json {
            println!("{}", serde_json::to_string(&Report { letters, words })?);
        } else {
            println!("{}: {}", letters, words.join(", "));
        }
    }
    Ok(())
}

fn interactive(lookup: &Lookup, json: bool) -> Result<(), Box<dyn Error>> {
    loop {
        print!("Enter letters: ");
        std::io::stdout().flush()?;
        let line: Result<String, _> = try_read!("{}\n");
        match rack_input(line) {
            RackInput::Quit => return Ok(()),
            RackInput::Skip => continue,
            RackInput::Rack(rack, bag) => print_results(lookup, &[(rack, bag)], json)?,
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let lookup = Lookup::open(&args)?;
    if args.interactive {
        return interactive(&lookup, args.json);
    }
    let racks = if args.letters.is_empty() {
        random_racks(&args)
    } else {
        args.letters.clone()
    };
    print_results(&lookup, &parse_racks(racks), args.json)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rack_input() {
        match rack_input::<String>(Ok(" TarT \r".to_owned())) {
            RackInput::Rack(rack, bag) => {
                assert_eq!(rack, "TarT");
                assert_eq!(bag, LetterBag::parse("artt").unwrap());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_rack_input_empty_line_quits() {
        assert!(matches!(rack_input::<String>(Ok("  ".to_owned())), RackInput::Quit));
        assert!(matches!(rack_input::<String>(Ok(String::new())), RackInput::Quit));
    }

    #[test]
    fn test_rack_input_skips_bad_racks() {
        assert!(matches!(rack_input::<String>(Ok("ab-c".to_owned())), RackInput::Skip));
        let unreadable: Result<String, _> = Err(text_io::Error::InvalidUtf8(vec![0xff, 0xfe]));
        assert!(matches!(rack_input(unreadable), RackInput::Skip));
    }

    #[test]
    fn test_parse_racks_drops_invalid() {
        let racks = parse_racks(vec!["cat".into(), "c4t".into(), "Dog".into()]);
        let names: Vec<&str> = racks.iter().map(|(r, _)| r.as_str()).collect();
        assert_eq!(names, vec!["cat", "Dog"]);
    }
}
