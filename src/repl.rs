use std::cell::RefCell;
use std::rc::Rc;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use crate::environment::Environment;
use crate::evaluator::Evaluator;
use crate::interpreter::{run_program, InterpreterError};

const PROMPT: &str = ">> ";
const HISTORY_FILE: &str = ".monkey_history";

const MONKEY_FACE: &str =
r#"
            __,__
   .--.  .-"     "-.  .--.
  / .. \/  .-. .-.  \/ .. \
 | |  '|  /   Y   \  |'  | |
 | \   \  \ 0 | 0 /  /   / |
  \ '- ,\.-"""""""-./, -' /
   ''-' /_   ^ ^   _\ '-''
       |  \._   _./  |
       \   \ '~' /   /
        '._ '-=-' _.'
           '-----'
"#;

pub fn start() -> rustyline::Result<()> {
    let mut rl = DefaultEditor::new()?;
    let _ = rl.load_history(HISTORY_FILE);

    let mut evaluator = Evaluator::new();
    let macro_env = Rc::new(RefCell::new(Environment::new()));

    loop {
        match rl.readline(PROMPT) {
            Ok(line) => {
                if line.trim().is_empty() {
                    continue;
                }
                rl.add_history_entry(line.as_str())?;

                match run_program(&line, &mut evaluator, &macro_env) {
                    Ok(Some(obj)) => println!("{}", obj),
                    Ok(None) => {},
                    Err(InterpreterError::Parse(errors)) => print_parser_errors(errors),
                    Err(err @ InterpreterError::Runtime(_)) => println!("{}", err),
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err),
        }
    }

    let _ = rl.save_history(HISTORY_FILE);
    Ok(())
}

fn print_parser_errors(errors: Vec<String>) {
    print!("{}", MONKEY_FACE);
    println!("Woops! We ran into some monkey business here!");
    println!(" parser errors:");
    for msg in errors {
        println!("    {}", msg);
    }
}
