// src/bin/paradigm_dump.rs
// Prints every case/number form of one lemma.
// Run with: cargo run --bin paradigm_dump -- lat --gender f
use clap::Parser;
use latin_core::abbr::anatomical::canonical_key;
use latin_core::lexicon::load_lexicon;
use latin_core::{paradigm_forms, AbbreviationRegistry, FormTable, Gender, LemmaEntry};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "paradigm_dump", version, about = "Print a lemma's full paradigm")]
struct Args {
    /// Registry abbreviation ("a", "lat", "dex").
    abbr: Option<String>,

    /// JSON lexicon file to look the lemma up in instead of the registry.
    #[arg(long, requires = "lemma")]
    lexicon: Option<PathBuf>,

    /// Headword to find in the lexicon.
    #[arg(long)]
    lemma: Option<String>,

    /// Gender to decline an adjective for (m, f, n).
    #[arg(long)]
    gender: Option<Gender>,

    /// Keep long-vowel marks in the output.
    #[arg(long)]
    keep_macrons: bool,

    /// Emit the table as JSON.
    #[arg(long)]
    json: bool,

    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    log_level: String,
}

fn lookup(args: &Args) -> Result<LemmaEntry, String> {
    if let Some(path) = &args.lexicon {
        let wanted = args.lemma.as_deref().unwrap_or_default();
        let entries = load_lexicon(path).map_err(|e| e.to_string())?;
        return entries
            .into_iter()
            .find(|entry| entry.lemma() == wanted)
            .ok_or_else(|| format!("'{wanted}' not found in {}", path.display()));
    }
    let abbr = args
        .abbr
        .as_deref()
        .ok_or_else(|| "give an abbreviation or --lexicon FILE --lemma L".to_string())?;
    let registry = AbbreviationRegistry::global();
    canonical_key(abbr)
        .and_then(|key| registry.noun(key).or_else(|| registry.adjective(key)))
        .cloned()
        .ok_or_else(|| format!("unknown abbreviation '{abbr}'"))
}

fn print_table(table: &FormTable) {
    let gender = table.gender.map(|g| g.to_string()).unwrap_or_else(|| "-".to_string());
    println!("{} ({gender})", table.lemma);
    for (number, case, form) in table.iter() {
        println!("  {number}.{case:<4} {form}");
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let table = lookup(&args)
        .and_then(|entry| paradigm_forms(&entry, args.gender, !args.keep_macrons).map_err(|e| e.to_string()));
    let table = match table {
        Ok(table) => table,
        Err(message) => {
            eprintln!("error: {message}");
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&table) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: {err}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_table(&table);
    }
    ExitCode::SUCCESS
}
