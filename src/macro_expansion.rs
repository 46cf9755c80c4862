use std::cell::RefCell;
use std::rc::Rc;
use crate::ast::{modify, Expression, Node, Program, Statement};
use crate::environment::Environment;
use crate::evaluator::Evaluator;
use crate::object::Object;

/// Collects every top-level `let name = macro(...) {...};` into `env` and
/// removes the definitions from the program.
pub fn define_macros(program: &mut Program, env: &Rc<RefCell<Environment>>) {
    let mut definitions = Vec::new();

    for (i, statement) in program.statements.iter().enumerate() {
        if is_macro_definition(statement) {
            add_macro(statement, env);
            definitions.push(i);
        }
    }

    // walk back so the collected indices stay valid while removing
    for index in definitions.into_iter().rev() {
        program.statements.remove(index);
    }
}

fn is_macro_definition(stmt: &Statement) -> bool {
    matches!(stmt, Statement::LetStatement { value: Expression::Macro {..}, .. })
}

fn add_macro(stmt: &Statement, env: &Rc<RefCell<Environment>>) {
    if let Statement::LetStatement {
        identifier: Expression::Identifier(name),
        value: Expression::Macro { parameters, body },
    } = stmt {
        let macro_object = Object::Macro {
            parameters: parameters.clone(),
            body: (**body).clone(),
            env: Rc::clone(env),
        };
        env.borrow_mut().set(name.clone(), macro_object);
    }
}

/// Rewrites every call to a macro bound in `env` with the AST its body
/// returns. Arguments reach the macro body quoted, not evaluated.
pub fn expand_macros(program: Program, env: &Rc<RefCell<Environment>>) -> Program {
    let expanded = modify(Node::Program(program), &mut |node| {
        let exp = match node {
            Node::Expression(exp) => exp,
            other => return other,
        };

        let (parameters, body, macro_env) = match macro_call(&exp, env) {
            Some(found) => found,
            None => return Node::Expression(exp),
        };

        let arguments = match &exp {
            Expression::CallExpression { arguments, .. } => quote_args(arguments),
            _ => return Node::Expression(exp),
        };

        let extended = extend_macro_env(&parameters, arguments, macro_env);

        let mut evaluator = Evaluator::from_env(extended);
        match evaluator.eval(Node::Statement(body)) {
            Some(Object::Quote(quoted)) => Node::Expression(*quoted),
            _ => panic!("we only support returning AST-nodes from macros"),
        }
    });

    match expanded {
        Node::Program(program) => program,
        _ => unreachable!("modify swapped the program for another node kind"),
    }
}

fn macro_call(
    exp: &Expression,
    env: &Rc<RefCell<Environment>>,
) -> Option<(Vec<Expression>, Statement, Rc<RefCell<Environment>>)> {
    let function = match exp {
        Expression::CallExpression { function, .. } => function,
        _ => return None,
    };

    let name = match function.as_ref() {
        Expression::Identifier(name) => name,
        _ => return None,
    };

    match env.borrow().get(name) {
        Some(Object::Macro { parameters, body, env }) => Some((parameters, body, env)),
        _ => None,
    }
}

fn quote_args(arguments: &[Expression]) -> Vec<Object> {
    arguments.iter()
        .map(|arg| Object::Quote(Box::new(arg.clone())))
        .collect()
}

fn extend_macro_env(
    parameters: &[Expression],
    arguments: Vec<Object>,
    macro_env: Rc<RefCell<Environment>>,
) -> Rc<RefCell<Environment>> {
    let mut extended = Environment::new_enclosed(macro_env);

    for (param, arg) in parameters.iter().zip(arguments) {
        if let Expression::Identifier(name) = param {
            extended.set(name.clone(), arg);
        }
    }

    Rc::new(RefCell::new(extended))
}
