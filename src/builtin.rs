use std::fmt;
use std::fmt::Formatter;
use crate::evaluator::new_error;
use crate::object::Object;

pub type BuiltinFn = fn(args: Vec<Object>) -> Object;

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuiltinFunction {
    name: String,
    func: BuiltinFn
}

impl fmt::Display for BuiltinFunction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl BuiltinFunction {
    pub fn look_up(name: &str) -> Option<Self> {
        match name {
            "len" => Some(Self {
                name: "len".to_string(),
                func: |args: Vec<Object>| -> Object {
                    if args.len() != 1 {
                        return new_error(format!("wrong number of arguments, got={}, want=1", args.len()))
                    }

                    match &args[0] {
                        Object::String(st) => Object::Integer(st.len() as i64),
                        Object::Array(v) => Object::Integer(v.len() as i64),
                        other => new_error(format!("argument to len not supported, got {}", other.type_name()))
                    }
                }
            }),
            "first" => Some(Self {
                name: "first".to_string(),
                func: |args: Vec<Object>| -> Object {
                    if args.len() != 1 {
                        return new_error(format!("wrong number of arguments, got={}, want=1", args.len()))
                    }

                    match &args[0] {
                        Object::Array(v) => match v.first() {
                            Some(element) => element.clone(),
                            None => Object::Null,
                        },
                        other => new_error(format!("builtin first argument must be ARRAY, got {}", other.type_name()))
                    }
                }
            }),
            "last" => Some(Self {
                name: "last".to_string(),
                func: |args: Vec<Object>| -> Object {
                    if args.len() != 1 {
                        return new_error(format!("wrong number of arguments, got={}, want=1", args.len()))
                    }

                    match &args[0] {
                        Object::Array(v) => match v.last() {
                            Some(element) => element.clone(),
                            None => Object::Null,
                        },
                        other => new_error(format!("builtin last argument must be ARRAY, got {}", other.type_name()))
                    }
                }
            }),
            "rest" => Some(Self {
                name: "rest".to_string(),
                func: |args: Vec<Object>| -> Object {
                    if args.len() != 1 {
                        return new_error(format!("wrong number of arguments, got={}, want=1", args.len()))
                    }

                    match &args[0] {
                        Object::Array(v) => if v.is_empty() {
                            Object::Null
                        } else {
                            Object::Array(v[1..].to_vec())
                        },
                        other => new_error(format!("builtin rest argument must be ARRAY, got {}", other.type_name()))
                    }
                }
            }),
            "push" => Some(Self {
                name: "push".to_string(),
                func: |args: Vec<Object>| -> Object {
                    if args.len() != 2 {
                        return new_error(format!("wrong number of arguments, got={}, want=2", args.len()))
                    }

                    match &args[0] {
                        Object::Array(v) => {
                            // the source array stays untouched
                            let mut elements = v.clone();
                            elements.push(args[1].clone());
                            Object::Array(elements)
                        },
                        other => new_error(format!("builtin push first argument must be ARRAY, got {}", other.type_name()))
                    }
                }
            }),
            "puts" => Some(Self{
                name: "puts".to_string(),
                func: |args: Vec<Object>| -> Object {
                    for arg in args {
                        println!("{}", arg)
                    }
                    Object::Null
                }
            }),
            _ => None,
        }
    }

    pub fn call(&self, args: Vec<Object>) -> Object {
        (self.func)(args)
    }
}
