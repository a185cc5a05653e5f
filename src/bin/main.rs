// src/bin/main.rs
use clap::Parser;
use crossterm::style::Stylize;
use crossterm::{cursor, execute, terminal};
use latin_core::abbr::anatomical::canonical_key;
use latin_core::{
    decline, AbbreviationRegistry, Case, ExpansionStages, Gender, GrammaticalNumber, LatinExpander,
    SolveFeatures,
};
use std::io::{self, stdin, stdout, BufRead, Write};
use tracing_subscriber::EnvFilter;

/// Interactive shell for the Latin label expander.
#[derive(Debug, Parser)]
#[command(name = "latin_repl", version, about)]
struct Args {
    /// Print the text after every pipeline stage.
    #[arg(long)]
    stages: bool,

    /// Log filter (tracing-subscriber EnvFilter syntax).
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    log_level: String,

    /// Expand these labels and exit instead of starting the shell.
    labels: Vec<String>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let filter = EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let expander = LatinExpander::new();
    if !args.labels.is_empty() {
        for label in &args.labels {
            println!("{}", expander.expand(label));
        }
        return Ok(());
    }

    let mut show_stages = args.stages;
    print_banner()?;

    for line in stdin().lock().lines() {
        let input = line?;
        let cmd = input.trim();
        match cmd {
            "exit" | ":q" => break,
            "" => {}
            ":clear" => print_banner()?,
            ":stages" => {
                show_stages = !show_stages;
                println!("stage output {}", if show_stages { "on" } else { "off" });
            }
            s if s.starts_with(":decline") => decline_command(s.trim_start_matches(":decline")),
            label => {
                let stages = expander.expand_with_stages(label);
                if show_stages {
                    print_stages(&stages);
                }
                println!("{} {}", "=>".green().bold(), stages.output);
            }
        }
        print!("> ");
        stdout().flush()?;
    }
    Ok(())
}

fn print_banner() -> io::Result<()> {
    let mut out = stdout();
    execute!(out, terminal::Clear(terminal::ClearType::All), cursor::MoveTo(0, 0))?;
    println!("{}", "Latin label expander".bold());
    println!("---------------------------------------------------------------");
    println!("Type a label (e.g. 'a. lat. dex.' or 'D.S. b.d.') and press [Enter].");
    println!("':decline <abbr> <case> <number> [gender]' inflects one registry entry.");
    println!("':stages' toggles stage output, 'exit' quits.\n");
    print!("> ");
    out.flush()
}

fn print_stages(stages: &ExpansionStages) {
    let rows = [
        ("protected", &stages.protected),
        ("normalized", &stages.normalized),
        ("anatomical", &stages.anatomical),
        ("restored", &stages.restored),
        ("rx", &stages.rx),
    ];
    for (name, text) in rows {
        // Placeholder delimiters are private-use characters; show them as brackets.
        let visible = text.replace('\u{E000}', "⟦").replace('\u{E001}', "⟧");
        println!("  {} {}", format!("{name:<11}").dark_grey(), visible);
    }
}

fn decline_command(rest: &str) {
    let parts: Vec<&str> = rest.split_whitespace().collect();
    let [abbr, case, number, tail @ ..] = parts.as_slice() else {
        println!("{}", "usage: :decline <abbr> <case> <number> [gender]".yellow());
        return;
    };
    let parsed = (|| -> Result<(Case, GrammaticalNumber, Option<Gender>), String> {
        let case: Case = case.parse().map_err(|e| format!("{e}"))?;
        let number: GrammaticalNumber = number.parse().map_err(|e| format!("{e}"))?;
        let gender = tail
            .first()
            .map(|g| g.parse::<Gender>())
            .transpose()
            .map_err(|e| format!("{e}"))?;
        Ok((case, number, gender))
    })();
    let (case, number, gender) = match parsed {
        Ok(features) => features,
        Err(message) => {
            println!("{}", message.red());
            return;
        }
    };

    let registry = AbbreviationRegistry::global();
    let Some(key) = canonical_key(abbr) else {
        println!("{}", format!("unknown abbreviation '{abbr}'").red());
        return;
    };
    let Some(entry) = registry.noun(key).or_else(|| registry.adjective(key)) else {
        return;
    };
    let features = SolveFeatures {
        pos: entry.pos(),
        case,
        number,
        gender,
        strip_macrons: false,
    };
    match decline(entry, &features) {
        Ok(result) => {
            println!("{} {}", "=>".green().bold(), result.form);
            match serde_json::to_string_pretty(&result.trace) {
                Ok(trace) => println!("{}", trace.dark_grey()),
                Err(err) => println!("{}", err.to_string().red()),
            }
        }
        Err(err) => println!("{}", err.to_string().red()),
    }
}
