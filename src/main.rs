// simplec: parse a source file and report diagnostics

use std::fs;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ClapParser;
use crossterm::style::Stylize;

use simplec::parser::errors::{ErrorList, MAX_REPORTED};
use simplec::parser::parse;

/// Scan and parse a simplec source file, reporting any diagnostics.
#[derive(ClapParser, Debug)]
#[command(name = "simplec", version, about)]
struct Args {
    /// Source file to parse
    file: PathBuf,

    /// Maximum number of diagnostics to list
    #[arg(long, default_value_t = MAX_REPORTED)]
    max_errors: usize,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,

    /// Print the parsed AST
    #[arg(long)]
    dump_ast: bool,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    if !args.file.exists() {
        eprintln!("Error: File '{}' not found", args.file.display());
        return Ok(ExitCode::FAILURE);
    }

    let source = fs::read_to_string(&args.file)?;
    let filename = args.file.display().to_string();

    eprintln!("Parsing {}...", filename);
    let (program, errors) = parse(&filename, &source);

    if args.dump_ast {
        println!("{:#?}", program.decls);
    }

    if errors.is_empty() {
        eprintln!(
            "Parsed successfully. Found {} top-level declarations.",
            program.decls.len()
        );
        return Ok(ExitCode::SUCCESS);
    }

    let color = !args.no_color && io::stderr().is_terminal();
    report(&errors, args.max_errors, color)?;
    Ok(ExitCode::FAILURE)
}

/// Write the rendered error list to stderr, highlighting positions.
fn report(errors: &ErrorList, limit: usize, color: bool) -> io::Result<()> {
    let mut stderr = io::stderr().lock();

    for line in errors.render(limit).lines() {
        match line.split_once(' ') {
            Some((position, message)) if color && !line.starts_with("More than") => {
                writeln!(stderr, "{} {}", position.bold().red(), message)?;
            }
            _ => writeln!(stderr, "{}", line)?,
        }
    }
    Ok(())
}
