use kplc::KplError;

use clap::Parser;
use tracing::Level;
use yansi::Paint;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Checks a KPL program: parses it and resolves every name and type.
#[derive(Debug, Parser)]
#[command(name = "kplc", version)]
struct Args {
    /// KPL source file
    source: PathBuf,

    /// Print the resolved symbol table
    #[arg(long)]
    dump: bool,

    /// Log scope and declaration events
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    let filepath = args.source.display().to_string();

    let contents = match fs::read_to_string(&args.source) {
        Ok(contents) => contents,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), KplError::Io(err));
            return ExitCode::from(2);
        }
    };

    match kplc::compile_str(&contents) {
        Ok(symtab) => {
            if args.dump {
                print!("{}", symtab);
            }
            println!("{} {}", "ok:".green().bold(), filepath);
            ExitCode::SUCCESS
        }
        Err(err) => {
            if err.eprint(&filepath, &contents).is_err() {
                eprintln!("{} {}", "error:".red().bold(), err);
            }
            ExitCode::from(1)
        }
    }
}
