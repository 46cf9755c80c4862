use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;
use crate::ast::{Node, Program};
use crate::environment::Environment;
use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::macro_expansion::{define_macros, expand_macros};
use crate::object::Object;
use crate::parser::Parser;
use crate::token::{Token, TokenType};

#[derive(Debug, Error)]
pub enum InterpreterError {
    #[error("parser errors:\n    {}", .0.join("\n    "))]
    Parse(Vec<String>),
    #[error("ERROR: {0}")]
    Runtime(String),
}

/// Tokenizes the whole input, trailing EOF token included.
pub fn lex(source: &str) -> Vec<Token> {
    let mut l = Lexer::new(source);
    let mut tokens = Vec::new();
    loop {
        let tok = l.next_token();
        let done = tok.token_type == TokenType::EOF;
        tokens.push(tok);
        if done {
            break;
        }
    }
    tokens
}

pub fn parse(source: &str) -> (Program, Vec<String>) {
    let l = Lexer::new(source);
    let mut p = Parser::new(l);
    let program = p.parse_program();
    (program, p.errors())
}

/// Full pipeline against caller-owned state, so bindings and macro
/// definitions survive across calls: parse, collect and expand macros,
/// evaluate.
pub fn run_program(
    source: &str,
    evaluator: &mut Evaluator,
    macro_env: &Rc<RefCell<Environment>>,
) -> Result<Option<Object>, InterpreterError> {
    let (mut program, errors) = parse(source);
    if !errors.is_empty() {
        return Err(InterpreterError::Parse(errors));
    }

    define_macros(&mut program, macro_env);
    let expanded = expand_macros(program, macro_env);

    match evaluator.eval(Node::Program(expanded)) {
        Some(Object::Error(msg)) => Err(InterpreterError::Runtime(msg)),
        result => Ok(result),
    }
}

/// One-shot run with fresh environments.
pub fn run(source: &str) -> Result<Option<Object>, InterpreterError> {
    let mut evaluator = Evaluator::new();
    let macro_env = Rc::new(RefCell::new(Environment::new()));
    run_program(source, &mut evaluator, &macro_env)
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;
    use std::rc::Rc;
    use crate::environment::Environment;
    use crate::evaluator::Evaluator;
    use crate::interpreter::{lex, parse, run, run_program, InterpreterError};
    use crate::object::Object;
    use crate::token::TokenType;

    #[test]
    fn test_lex() {
        let tokens = lex("let x = 5;");
        let types: Vec<TokenType> = tokens.iter().map(|t| t.token_type).collect();
        assert_eq!(types, vec![
            TokenType::LET,
            TokenType::IDENT,
            TokenType::ASSIGN,
            TokenType::INT,
            TokenType::SEMICOLON,
            TokenType::EOF,
        ]);
    }

    #[test]
    fn test_parse_collects_errors() {
        let (_, errors) = parse("let x 5;");
        assert!(!errors.is_empty());
    }

    #[test]
    fn test_run() {
        match run("let add = fn(a, b) { a + b }; add(2, add(3, 4))") {
            Ok(Some(Object::Integer(9))) => {},
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_run_surfaces_runtime_errors() {
        match run("5 + true") {
            Err(InterpreterError::Runtime(msg)) => {
                assert_eq!(msg, "type mismatch: INTEGER + BOOLEAN");
            },
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_state_survives_across_runs() {
        let mut evaluator = Evaluator::new();
        let macro_env = Rc::new(RefCell::new(Environment::new()));

        run_program("let a = 2;", &mut evaluator, &macro_env).unwrap();
        run_program("let twice = macro(x) { quote(unquote(x) + unquote(x)); };",
                    &mut evaluator, &macro_env).unwrap();

        match run_program("twice(a + 3)", &mut evaluator, &macro_env) {
            Ok(Some(Object::Integer(10))) => {},
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
