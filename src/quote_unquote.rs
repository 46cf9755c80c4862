use crate::ast::{modify_expression, Expression, Node};
use crate::evaluator::Evaluator;
use crate::object::Object;

/// Boxes the unevaluated argument of a `quote(...)` call as an AST value,
/// after splicing in the results of any `unquote(...)` calls inside it.
pub fn quote(expression: Expression, evaluator: &mut Evaluator) -> Option<Object> {
    let node = eval_unquote_calls(expression, evaluator);
    Some(Object::Quote(Box::new(node)))
}

fn eval_unquote_calls(quoted: Expression, evaluator: &mut Evaluator) -> Expression {
    modify_expression(quoted, &mut |node| {
        let exp = match node {
            Node::Expression(exp) => exp,
            other => return other,
        };

        if !is_unquote_call(&exp) {
            return Node::Expression(exp);
        }

        let argument = match &exp {
            Expression::CallExpression { arguments, .. } => arguments[0].clone(),
            _ => return Node::Expression(exp),
        };

        let unquoted = evaluator.eval(Node::Expression(argument));
        match unquoted.and_then(from_object_to_ast) {
            Some(replacement) => Node::Expression(replacement),
            // values without an AST form stay as they were written
            None => Node::Expression(exp),
        }
    })
}

fn is_unquote_call(exp: &Expression) -> bool {
    match exp {
        Expression::CallExpression { function, arguments } => {
            function.token_literal() == "unquote" && arguments.len() == 1
        },
        _ => false,
    }
}

fn from_object_to_ast(obj: Object) -> Option<Expression> {
    match obj {
        Object::Integer(i) => Some(Expression::Integer(i)),
        Object::Boolean(b) => Some(Expression::Boolean(b)),
        Object::Quote(node) => Some(*node),
        _ => None,
    }
}
