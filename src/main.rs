use std::fs;
use std::process;
use clap::Parser;
use monkey_interpreter::interpreter;
use monkey_interpreter::repl;

/// Tree-walking interpreter for the Monkey programming language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script file to run; starts the interactive session when omitted.
    script: Option<String>,
}

fn main() {
    let args = Args::parse();

    match args.script {
        Some(path) => {
            let source = fs::read_to_string(&path).unwrap_or_else(|err| {
                eprintln!("could not read {}: {}", path, err);
                process::exit(1);
            });
            if let Err(err) = interpreter::run(&source) {
                eprintln!("{}", err);
                process::exit(1);
            }
        }
        None => {
            if let Err(err) = repl::start() {
                eprintln!("{}", err);
                process::exit(1);
            }
        }
    }
}
