//! mensura - unit-aware expression calculator.
//!
//! Evaluates the expression given on the command line, or runs an
//! interactive loop when none is given. Unset variables are prompted for
//! on stdin either way.

use std::io::{self, BufRead, Write};

use anyhow::bail;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mensura_calc::{Angle, Prompt, Session, Settings, Severity, VariableStore};

#[derive(Parser, Debug)]
#[command(name = "mensura", version, about = "Unit-aware expression calculator")]
struct Cli {
    /// Treat bare angle values as radians instead of degrees.
    #[arg(long)]
    rad: bool,

    /// Fractional digits for floating point results.
    #[arg(long, default_value_t = 9)]
    precision: usize,

    /// Show the parse trail and the full stack after evaluation.
    #[arg(short, long)]
    verbose: bool,

    /// Expression to evaluate. Reads lines from stdin when omitted.
    expression: Vec<String>,
}

/// Asks on stdout, reads one line from stdin.
struct StdinPrompt;

impl Prompt for StdinPrompt {
    fn read_value(&mut self, name: &str) -> Option<String> {
        print!("{name} = ");
        io::stdout().flush().ok()?;
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line).ok()?;
        Some(line.trim().to_string())
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(io::stderr)
        .init();

    tracing::debug!(rad = cli.rad, precision = cli.precision, "starting");

    let settings = Settings {
        angle: if cli.rad {
            Angle::Radians
        } else {
            Angle::Degrees
        },
        precision: cli.precision,
    };
    let mut vars = VariableStore::new();
    let mut prompt = StdinPrompt;
    let mut session = Session::new(&mut vars, &mut prompt, settings);

    if cli.expression.is_empty() {
        repl(&mut session, cli.verbose)
    } else {
        let input = cli.expression.join(" ");
        evaluate_line(&mut session, &input, cli.verbose);
        if session.messages().has_errors() {
            bail!("evaluation failed");
        }
        Ok(())
    }
}

fn evaluate_line(session: &mut Session<'_>, input: &str, verbose: bool) {
    session.clear_messages();
    let result = session.execute(input);
    for msg in session.messages().iter() {
        match msg.severity() {
            Severity::Error | Severity::Warning => eprintln!("!!! {}", msg.text),
            Severity::Info if verbose => eprintln!("    {}", msg.text),
            Severity::Info => {}
        }
    }
    if verbose || session.stack().len() > 1 {
        for line in session.list_stack() {
            println!("{line}");
        }
    } else if let Some(result) = result {
        println!("{}", session.render(&result));
    }
}

fn repl(session: &mut Session<'_>, verbose: bool) -> anyhow::Result<()> {
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        match line {
            "" => continue,
            "exit" | "quit" => break,
            "vars" => {
                for entry in session.variables().iter() {
                    let name = entry.name().unwrap_or("?");
                    println!("{name} = {}", session.render(entry));
                }
            }
            "clear" => session.reset(),
            "help" => {
                println!("enter an expression, or: vars, clear, exit");
            }
            _ => evaluate_line(session, line, verbose),
        }
    }
    Ok(())
}
