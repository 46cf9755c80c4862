use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::fmt::Formatter;
use std::rc::Rc;
use crate::ast::{Expression, Statement};
use crate::builtin::BuiltinFunction;
use crate::environment::Environment;

#[derive(Debug, Clone, PartialEq)]
pub struct KeyValue {
    pub key: Object,
    pub value: Object,
}

/// Map key derived from a runtime value. Only integers, booleans and
/// strings are hashable; the enum discriminant keeps keys of different
/// types apart, so 1 and true can never collide.
#[derive(Debug, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub enum HashKey {
    Integer(i64),
    Boolean(bool),
    String(String),
}

impl HashKey {
    pub fn from_object(obj: &Object) -> Option<Self> {
        match obj {
            Object::Integer(i) => Some(HashKey::Integer(*i)),
            Object::Boolean(b) => Some(HashKey::Boolean(*b)),
            Object::String(st) => Some(HashKey::String(st.to_string())),
            _ => None,
        }
    }
}

#[derive(Clone)]
pub enum Object {
    Integer(i64),
    String(String),
    Boolean(bool),
    Null,
    ReturnValue(Box<Object>),
    Error(String),
    Function{
        parameters: Vec<Expression>,
        body: Statement,
        env: Rc<RefCell<Environment>>,
    },
    Builtin(BuiltinFunction),
    Array(Vec<Object>),
    Hash(BTreeMap<HashKey, KeyValue>),
    Quote(Box<Expression>),
    Macro{
        parameters: Vec<Expression>,
        body: Statement,
        env: Rc<RefCell<Environment>>,
    },
}

impl Object {
    /// Type tag as it appears in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Integer(_) => "INTEGER",
            Object::String(_) => "STRING",
            Object::Boolean(_) => "BOOLEAN",
            Object::Null => "NULL",
            Object::ReturnValue(_) => "RETURN_VALUE",
            Object::Error(_) => "ERROR",
            Object::Function {..} => "FUNCTION",
            Object::Builtin(_) => "BUILTIN",
            Object::Array(_) => "ARRAY",
            Object::Hash(_) => "HASH",
            Object::Quote(_) => "QUOTE",
            Object::Macro {..} => "MACRO",
        }
    }
}

// Scalars compare by value, composites structurally. Closures carry their
// environment and compare by the identity of that environment, which also
// keeps equality from chasing the env -> closure -> env cycle.
impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Object::Integer(a), Object::Integer(b)) => a == b,
            (Object::String(a), Object::String(b)) => a == b,
            (Object::Boolean(a), Object::Boolean(b)) => a == b,
            (Object::Null, Object::Null) => true,
            (Object::ReturnValue(a), Object::ReturnValue(b)) => a == b,
            (Object::Error(a), Object::Error(b)) => a == b,
            (Object::Array(a), Object::Array(b)) => a == b,
            (Object::Hash(a), Object::Hash(b)) => a == b,
            (Object::Quote(a), Object::Quote(b)) => a == b,
            (Object::Builtin(a), Object::Builtin(b)) => a == b,
            (
                Object::Function { parameters: pa, body: ba, env: ea },
                Object::Function { parameters: pb, body: bb, env: eb },
            ) => Rc::ptr_eq(ea, eb) && pa == pb && ba == bb,
            (
                Object::Macro { parameters: pa, body: ba, env: ea },
                Object::Macro { parameters: pb, body: bb, env: eb },
            ) => Rc::ptr_eq(ea, eb) && pa == pb && ba == bb,
            _ => false,
        }
    }
}

// The captured environment is elided: it can contain the closure itself.
impl fmt::Debug for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Object::Integer(i) => f.debug_tuple("Integer").field(i).finish(),
            Object::String(st) => f.debug_tuple("String").field(st).finish(),
            Object::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            Object::Null => write!(f, "Null"),
            Object::ReturnValue(obj) => f.debug_tuple("ReturnValue").field(obj).finish(),
            Object::Error(msg) => f.debug_tuple("Error").field(msg).finish(),
            Object::Function { parameters, body, .. } => f.debug_struct("Function")
                .field("parameters", parameters)
                .field("body", body)
                .finish_non_exhaustive(),
            Object::Builtin(bf) => f.debug_tuple("Builtin").field(bf).finish(),
            Object::Array(arr) => f.debug_tuple("Array").field(arr).finish(),
            Object::Hash(hash) => f.debug_tuple("Hash").field(hash).finish(),
            Object::Quote(node) => f.debug_tuple("Quote").field(node).finish(),
            Object::Macro { parameters, body, .. } => f.debug_struct("Macro")
                .field("parameters", parameters)
                .field("body", body)
                .finish_non_exhaustive(),
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Object::Integer(i) => format!("{}", i),
            Object::String(s) => s.to_string(),
            Object::Boolean(b) => format!("{}", b),
            Object::Null => "null".to_string(),
            Object::ReturnValue(obj) => format!("{}", obj),
            Object::Error(msg) => format!("ERROR: {}", msg),
            Object::Function { parameters, body, .. } => format!("fn({}) {{\n{}\n}}",
                parameters.iter().map(|p| format!("{}", p)).collect::<Vec<_>>().join(", "), body),
            Object::Builtin(bf) => format!("builtin function {}", bf),
            Object::Array(arr) => format!("[{}]",
                    arr.iter().map(|p| format!("{}", p)).collect::<Vec<_>>().join(", ")),
            Object::Hash(hash) => format!("{{{}}}",
                    hash.values().map(|kv| format!("{}: {}", kv.key, kv.value)).collect::<Vec<_>>().join(", ")),
            Object::Quote(node) => format!("QUOTE({})", node),
            Object::Macro { parameters, body, .. } => format!("macro({}) {{\n{}\n}}",
                parameters.iter().map(|p| format!("{}", p)).collect::<Vec<_>>().join(", "), body),
        };
        write!(f, "{}", msg)
    }
}
