mod cli;
mod config;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use config::Config;
use log::{debug, info};
use nordic_collate::{Alphabet, Collator};
use nordic_processor::source::sqlite::open_read_only;
use nordic_processor::{export_documents, render, Assembler, SqliteRowSource};
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::resolve(cli.config.as_deref())?;
    debug!("configuration: {config:?}");

    match cli.command {
        Command::Extract {
            filename,
            mode,
            alphabet,
        } => {
            if let Some(filename) = filename {
                config.database = filename;
            }
            if let Some(mode) = mode {
                config.mode = mode;
            }
            if alphabet.is_some() {
                config.alphabet = alphabet;
            }
            extract(&config)?;
        }
        Command::Docs {
            filename,
            output_prefix,
        } => {
            if let Some(filename) = filename {
                config.database = filename;
            }
            if let Some(prefix) = output_prefix {
                config.output_prefix = prefix;
            }
            let conn = open_read_only(&config.database)
                .with_context(|| format!("cannot open {}", config.database.display()))?;
            let exported = export_documents(&conn, &config.output_prefix)?;
            info!("exported {} documents", exported.len());
        }
        Command::Collate { alphabet } => {
            let collator = load_collator(alphabet.as_deref().or(config.alphabet.as_deref()))?;
            collate_lines(&collator, io::stdin().lock(), io::stdout().lock())?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_collator(alphabet: Option<&Path>) -> Result<Collator> {
    let alphabet = match alphabet {
        Some(path) => Alphabet::load(path)?,
        None => Alphabet::nordic(),
    };
    debug!("alphabet has {} letters", alphabet.len());
    Ok(Collator::new(alphabet))
}

/// Build the whole document, then write it, so a failed run prints nothing.
fn extract(config: &Config) -> Result<()> {
    let collator = Arc::new(load_collator(config.alphabet.as_deref())?);
    let source = SqliteRowSource::open_snapshot(&config.database, collator)
        .with_context(|| format!("cannot open {}", config.database.display()))?;

    let document = Assembler::new(config.sanitize_options())
        .assemble_document(config.mode, &source)
        .with_context(|| format!("{} extraction failed", config.mode))?;

    let mut out = BufWriter::new(io::stdout().lock());
    render::write_xml(&document, &mut out)?;
    out.flush()?;
    Ok(())
}

fn collate_lines<R: BufRead, W: Write>(collator: &Collator, input: R, mut output: W) -> Result<()> {
    let mut lines = input.lines().collect::<io::Result<Vec<_>>>()?;
    collator.sort(&mut lines);
    for line in &lines {
        writeln!(output, "{line}")?;
    }
    output.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collate_lines() {
        let input = "øl\nhus\nÆble\nand\n".as_bytes();
        let mut output = Vec::new();
        collate_lines(&Collator::default(), input, &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "and\nhus\nÆble\nøl\n");
    }

    #[test]
    fn test_custom_alphabet_changes_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("letters");
        std::fs::write(&path, "b\na\n").unwrap();
        let collator = load_collator(Some(&path)).unwrap();

        let mut output = Vec::new();
        collate_lines(&collator, "a\nb\n".as_bytes(), &mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "b\na\n");
    }

    #[test]
    fn test_duplicate_alphabet_letter_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("letters");
        std::fs::write(&path, "a\nb\na\n").unwrap();
        assert!(load_collator(Some(&path)).is_err());
    }
}
