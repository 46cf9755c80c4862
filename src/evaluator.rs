use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use crate::ast::{Expression, Node, Program, Statement};
use crate::builtin::BuiltinFunction;
use crate::object::{HashKey, KeyValue, Object};
use crate::environment::Environment;
use crate::quote_unquote::quote;

pub struct Evaluator {
    env: Rc<RefCell<Environment>>
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            env: Rc::new(RefCell::new(Environment::new()))
        }
    }

    pub fn from_env(env: Rc<RefCell<Environment>>) -> Self {
        Self { env }
    }

    pub fn get(&self, key: &str) -> Option<Object> {
        self.env.borrow().get(key)
    }

    fn set(&mut self, key: String, value: Object) {
        self.env.borrow_mut().set(key, value)
    }

    pub fn eval(&mut self, node: Node) -> Option<Object> {
        match node {
            Node::Program(program) => self.eval_program(program),
            Node::Statement(stmt) => match stmt {
                Statement::BlockStatement(b) => self.eval_block_statement(b),
                Statement::ExpressionStatement(exp) => self.eval(Node::Expression(exp)),
                Statement::ReturnStatement(r) => {
                    let val = self.eval(Node::Expression(r))?;
                    if is_error(&val) {
                        return Some(val);
                    }
                    Some(Object::ReturnValue(Box::new(val)))
                }
                Statement::LetStatement {identifier, value} => {
                    let val = self.eval(Node::Expression(value))?;
                    if is_error(&val) {
                        return Some(val);
                    }
                    if let Expression::Identifier(name) = identifier {
                        self.set(name, val);
                    }
                    // a binding leaves no value behind
                    None
                }
            },
            Node::Expression(exp) => match exp {
                Expression::Integer(i) => Some(Object::Integer(i)),
                Expression::String(s) => Some(Object::String(s)),
                Expression::Boolean(b) => Some(Object::Boolean(b)),
                Expression::PrefixExpression {operation, right} => {
                    let right = self.eval(Node::Expression(*right))?;
                    if is_error(&right) {
                        return Some(right);
                    }
                    Some(eval_prefix_expression(operation, right))
                },
                Expression::InfixExpression {operation, left, right} => {
                    let left = self.eval(Node::Expression(*left))?;
                    if is_error(&left) {
                        return Some(left)
                    }
                    let right = self.eval(Node::Expression(*right))?;
                    if is_error(&right) {
                        return Some(right)
                    }
                    Some(eval_infix_expression(operation, left, right))
                },
                Expression::IfExpression{..} => self.eval_if_expression(exp),
                Expression::Identifier(s) => self.eval_identifier(s),
                Expression::Function {parameters, body} => {
                    Some(Object::Function {
                        parameters,
                        body: *body,
                        env: Rc::clone(&self.env),
                    })
                },
                // a surviving macro literal was never collected, nothing to evaluate
                Expression::Macro {..} => None,
                Expression::CallExpression {function, arguments} => {
                    if function.token_literal() == "quote" {
                        let argument = arguments.into_iter().next()?;
                        return quote(argument, self);
                    }

                    let function = self.eval(Node::Expression(*function))?;
                    if is_error(&function) {
                        return Some(function);
                    }
                    let args = self.eval_expressions(arguments)?;
                    if args.len() == 1 && is_error(&args[0]) {
                        return Some(args[0].clone());
                    }
                    apply_function(function, args)
                },
                Expression::Array(exps) => {
                    let elements = self.eval_expressions(exps)?;
                    if elements.len() == 1 && is_error(&elements[0]) {
                        return Some(elements[0].clone());
                    }
                    Some(Object::Array(elements))
                },
                Expression::IndexExpression {left, index} => {
                    let left = self.eval(Node::Expression(*left))?;
                    if is_error(&left) {
                        return Some(left);
                    }
                    let index = self.eval(Node::Expression(*index))?;
                    if is_error(&index) {
                        return Some(index);
                    }
                    Some(eval_index_expression(left, index))
                },
                Expression::Hash(pairs) => {
                    self.eval_hash_literal(pairs)
                }
            },
        }
    }

    fn eval_program(&mut self, program: Program) -> Option<Object> {
        let mut result = None;

        for stmt in program.statements {
            result = self.eval(Node::Statement(stmt));

            match result {
                Some(Object::ReturnValue(ret)) => {
                    return Some(*ret);
                },
                Some(Object::Error(err)) => {
                    return Some(Object::Error(err));
                }
                _ => {}
            }
        }
        result
    }

    fn eval_block_statement(&mut self, block: Vec<Statement>) -> Option<Object> {
        let mut result = None;

        for stmt in block {
            result = self.eval(Node::Statement(stmt));

            match &result {
                // returns and errors bubble up unopened
                Some(Object::ReturnValue(_)) | Some(Object::Error(_)) => {
                    return result;
                },
                _ => {},
            }
        }

        result
    }

    fn eval_if_expression(&mut self, expression: Expression) -> Option<Object> {
        if let Expression::IfExpression {condition, consequence, alternative} = expression {
            let condition = self.eval(Node::Expression(*condition))?;
            if is_error(&condition) {
                return Some(condition);
            }

            if is_truthy(&condition) {
                self.eval(Node::Statement(*consequence))
            } else {
                match alternative {
                    None => Some(Object::Null),
                    Some(st) => self.eval(Node::Statement(*st))
                }
            }
        } else {
            None
        }
    }

    fn eval_identifier(&mut self, identifier: String) -> Option<Object> {
        match self.get(&identifier) {
            Some(obj) => Some(obj),
            None => match BuiltinFunction::look_up(&identifier) {
                Some(builtin) => Some(Object::Builtin(builtin)),
                None => Some(new_error(format!("identifier not found: {}", identifier)))
            }
        }
    }

    fn eval_expressions(&mut self, args: Vec<Expression>) -> Option<Vec<Object>> {
        let mut result = Vec::new();

        for arg in args {
            let evaluated = self.eval(Node::Expression(arg))?;
            if is_error(&evaluated) {
                return Some(vec![evaluated]);
            }
            result.push(evaluated);
        }
        Some(result)
    }

    fn eval_hash_literal(&mut self, kv: Vec<(Expression, Expression)>) -> Option<Object> {
        let mut pairs = BTreeMap::<HashKey, KeyValue>::new();
        for (key, value) in kv {
            let key = self.eval(Node::Expression(key))?;
            if is_error(&key) {
                return Some(key);
            }

            let hashed_key = match HashKey::from_object(&key) {
                Some(hashed_key) => hashed_key,
                None => return Some(new_error(format!("unusable as hash key: {}", key.type_name()))),
            };

            let value = self.eval(Node::Expression(value))?;
            if is_error(&value) {
                return Some(value);
            }

            pairs.insert(hashed_key, KeyValue{ key, value });
        }
        Some(Object::Hash(pairs))
    }

}

fn is_error(val: &Object) -> bool {
    matches!(val, Object::Error(_))
}

pub fn new_error(msg: String) -> Object {
    Object::Error(msg)
}

fn native_bool_to_object(input: bool) -> Object {
    if input {
        Object::Boolean(true)
    } else {
        Object::Boolean(false)
    }
}

fn is_truthy(obj: &Object) -> bool {
    match obj {
        Object::Null => false,
        Object::Boolean(b) => *b,
        _ => true,
    }
}

fn eval_prefix_expression(operation: String, right: Object) -> Object {
    match operation.as_str() {
        "!" => eval_bang_expression(right),
        "-" => eval_minus_prefix_expression(right),
        _ => new_error(format!("unknown operator: {}{}", operation, right.type_name())),
    }
}

fn eval_infix_expression(operation: String, left: Object, right: Object) -> Object {
    if let (Object::Integer(left), Object::Integer(right)) = (&left, &right) {
        eval_integer_infix_expression(operation, *left, *right)
    } else if let (Object::String(_), Object::String(_)) = (&left, &right) {
        eval_string_infix_expression(operation, left, right)
    } else {
        match operation.as_str() {
            // comparing the canonical instances, tried before the type check
            "==" => native_bool_to_object(left == right),
            "!=" => native_bool_to_object(left != right),
            _ => if left.type_name() != right.type_name() {
                new_error(format!("type mismatch: {} {} {}",
                                  left.type_name(), operation, right.type_name()))
            } else {
                new_error(format!("unknown operator: {} {} {}",
                                  left.type_name(), operation, right.type_name()))
            }
        }
    }
}

fn eval_bang_expression(right: Object) -> Object {
    match right {
        Object::Boolean(b) => Object::Boolean(!b),
        Object::Null => Object::Boolean(true),
        _ => Object::Boolean(false)
    }
}

fn eval_minus_prefix_expression(right: Object) -> Object {
    match right {
        Object::Integer(i) => Object::Integer(-i),
        _ => new_error(format!("unknown operator: -{}", right.type_name())),
    }
}

fn eval_integer_infix_expression(operation: String, left: i64, right: i64) -> Object {
    match operation.as_str() {
        "+" => Object::Integer(left + right),
        "-" => Object::Integer(left - right),
        "*" => Object::Integer(left * right),
        "/" => Object::Integer(left / right),
        "<" => Object::Boolean(left < right),
        ">" => Object::Boolean(left > right),
        "==" => Object::Boolean(left == right),
        "!=" => Object::Boolean(left != right),
        _ => new_error(format!("unknown operator: INTEGER {} INTEGER", operation))
    }
}

fn eval_string_infix_expression(operation: String, left: Object, right: Object) -> Object {
    if let (Object::String(left), Object::String(right)) = (&left, &right) {
        match operation.as_str() {
            "+" => Object::String(left.to_string() + right.as_str()),
            _ => new_error(format!("unknown operator: STRING {} STRING", operation))
        }
    } else {
        new_error(format!("unknown operator: {} {} {}",
                          left.type_name(), operation, right.type_name()))
    }
}

fn apply_function(function: Object, args: Vec<Object>) -> Option<Object> {
    match function {
        Object::Function {parameters, body, env} => {
            let extended = Rc::new(RefCell::new(Environment::new_enclosed(env)));
            let mut evaluator = Evaluator::from_env(extended);
            for (param, arg) in parameters.iter().zip(args) {
                if let Expression::Identifier(param) = param {
                    evaluator.set(param.to_string(), arg);
                }
            }

            match evaluator.eval(Node::Statement(body))? {
                Object::ReturnValue(value) => Some(*value),
                other => Some(other),
            }
        }
        Object::Builtin(bf) => {
            Some(bf.call(args))
        },
        other => Some(new_error(format!("not a function: {}", other.type_name()))),
    }
}

fn eval_index_expression(left: Object, index: Object) -> Object {
    match (&left, &index) {
        (Object::Array(arr), Object::Integer(i)) => eval_array_index(arr, *i),
        (Object::Hash(hash), _) => eval_hash_index(hash, &index),
        _ => new_error(format!("index operator not supported: {}", left.type_name())),
    }
}

fn eval_array_index(arr: &[Object], index: i64) -> Object {
    if index < 0 || index >= arr.len() as i64 {
        Object::Null
    } else {
        arr[index as usize].clone()
    }
}

fn eval_hash_index(hash: &BTreeMap<HashKey, KeyValue>, index: &Object) -> Object {
    match HashKey::from_object(index) {
        Some(key) => match hash.get(&key) {
            Some(pair) => pair.value.clone(),
            None => Object::Null,
        },
        None => new_error(format!("unusable as hash key: {}", index.type_name())),
    }
}
