use std::string::String;
use std::fmt;
use std::fmt::Formatter;

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Node {
    Program(Program),
    Statement(Statement),
    Expression(Expression),
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Node::Program(program) => write!(f, "{}", program),
            Node::Statement(stmt) => write!(f, "{}", stmt),
            Node::Expression(exp) => write!(f, "{}", exp),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>
}

impl Program {
    pub fn token_literal(&self) -> String {
        match self.statements.first() {
            Some(stmt) => stmt.token_literal(),
            None => String::new(),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for stmt in self.statements.iter() {
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Statement {
    LetStatement{identifier: Expression, value: Expression},
    ReturnStatement(Expression),
    ExpressionStatement(Expression),
    BlockStatement(Vec<Statement>)
}

impl Statement {
    pub fn token_literal(&self) -> String {
        match self {
            Statement::LetStatement {..} => "let".to_string(),
            Statement::ReturnStatement(_) => "return".to_string(),
            Statement::ExpressionStatement(exp) => exp.token_literal(),
            Statement::BlockStatement(_) => "{".to_string(),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Statement::LetStatement { identifier, value } => {
                write!(f, "let {} = {};", identifier, value)?
            },
            Statement::ReturnStatement(ret) => {
                write!(f, "return {};", ret)?
            },
            Statement::ExpressionStatement(exp) => {
                write!(f, "{}", exp)?
            },
            Statement::BlockStatement(block) => {
                for stmt in block.iter() {
                    write!(f, "{}", stmt)?
                }
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Expression {
    Identifier(String),
    Boolean(bool),
    Integer(i64),
    String(String),
    Array(Vec<Expression>),
    // pairs keep their source order, keys are not required to be hashable here
    Hash(Vec<(Expression, Expression)>),
    PrefixExpression{
        operation: String,
        right: Box<Expression>
    },
    InfixExpression {
        operation: String,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    IfExpression{
        condition: Box<Expression>,
        consequence: Box<Statement>,
        alternative: Option<Box<Statement>>,
    },
    Function{
        parameters: Vec<Expression>,
        body: Box<Statement>,
    },
    Macro{
        parameters: Vec<Expression>,
        body: Box<Statement>,
    },
    CallExpression{
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
    IndexExpression{
        left: Box<Expression>,
        index: Box<Expression>,
    }
}

impl Expression {
    /// Literal of the node's first token, reconstructed from the variant.
    pub fn token_literal(&self) -> String {
        match self {
            Expression::Identifier(ident) => ident.clone(),
            Expression::Boolean(b) => b.to_string(),
            Expression::Integer(int) => int.to_string(),
            Expression::String(st) => st.clone(),
            Expression::Array(_) => "[".to_string(),
            Expression::Hash(_) => "{".to_string(),
            Expression::PrefixExpression { operation, .. } => operation.clone(),
            Expression::InfixExpression { operation, .. } => operation.clone(),
            Expression::IfExpression {..} => "if".to_string(),
            Expression::Function {..} => "fn".to_string(),
            Expression::Macro {..} => "macro".to_string(),
            Expression::CallExpression {..} => "(".to_string(),
            Expression::IndexExpression {..} => "[".to_string(),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Identifier(ident) => {write!(f, "{}", ident)},
            Expression::Boolean(b) => {write!(f, "{}", b)},
            Expression::Integer(int) => {write!(f, "{}", int)},
            Expression::String(st) => {write!(f, "{}", st)},
            Expression::Array(exps) => {
                write!(f, "[{}]", exps.iter().
                    map(|exp| format!("{}", exp)).
                    collect::<Vec<_>>().join(", "))
            },
            Expression::Hash(pairs) => {
                write!(f, "{{{}}}", pairs.iter().
                    map(|(k, v)| format!("{}: {}", k, v)).
                    collect::<Vec<_>>().join(", "))
            },
            Expression::PrefixExpression { operation, right } => {
                write!(f, "({}{})", operation, right)
            },
            Expression::InfixExpression { operation, left, right } => {
                write!(f, "({} {} {})", left, operation, right)
            }
            Expression::IfExpression { condition, consequence, alternative } => {
                write!(f, "if {} {}", condition, consequence)?;
                if let Some(alt) = alternative {
                    write!(f, " else {}", alt)?;
                }
                Ok(())
            },
            Expression::Function { parameters, body } => {
                write!(f, "fn({}) {}",
                    parameters.iter().map(|exp| format!("{}", exp)).
                        collect::<Vec<_>>().join(", "),
                    body
                )
            },
            Expression::Macro { parameters, body } => {
                write!(f, "macro({}) {}",
                    parameters.iter().map(|exp| format!("{}", exp)).
                        collect::<Vec<_>>().join(", "),
                    body
                )
            },
            Expression::CallExpression { function, arguments } => {
                write!(f, "{}({})", function.token_literal(),
                    arguments.iter().map(|arg| format!("{}", arg)).
                        collect::<Vec::<_>>().join(", ")
                )
            }
            Expression::IndexExpression { left, index } => {
                write!(f, "({}[{}])", left, index)
            }
        }
    }
}

/// Bottom-up rewriting pass shared by quote/unquote and macro expansion.
/// Children are rebuilt first, then the modifier runs on the node itself,
/// so the modifier sees every node of the subtree exactly once, leaves
/// before parents. Call-expression children are left alone; a call is
/// handed to the modifier as a whole.
///
/// The modifier must map each node back to its own category.
pub fn modify(node: Node, modifier: &mut dyn FnMut(Node) -> Node) -> Node {
    let node = match node {
        Node::Program(mut program) => {
            program.statements = program.statements.into_iter()
                .map(|stmt| modify_statement(stmt, modifier))
                .collect();
            Node::Program(program)
        },
        Node::Statement(stmt) => Node::Statement(match stmt {
            Statement::ExpressionStatement(exp) => {
                Statement::ExpressionStatement(modify_expression(exp, modifier))
            },
            Statement::ReturnStatement(ret) => {
                Statement::ReturnStatement(modify_expression(ret, modifier))
            },
            Statement::LetStatement { identifier, value } => Statement::LetStatement {
                identifier,
                value: modify_expression(value, modifier),
            },
            Statement::BlockStatement(stmts) => Statement::BlockStatement(
                stmts.into_iter()
                    .map(|stmt| modify_statement(stmt, modifier))
                    .collect()
            ),
        }),
        Node::Expression(exp) => Node::Expression(match exp {
            Expression::PrefixExpression { operation, right } => Expression::PrefixExpression {
                operation,
                right: Box::new(modify_expression(*right, modifier)),
            },
            Expression::InfixExpression { operation, left, right } => Expression::InfixExpression {
                operation,
                left: Box::new(modify_expression(*left, modifier)),
                right: Box::new(modify_expression(*right, modifier)),
            },
            Expression::IndexExpression { left, index } => Expression::IndexExpression {
                left: Box::new(modify_expression(*left, modifier)),
                index: Box::new(modify_expression(*index, modifier)),
            },
            Expression::IfExpression { condition, consequence, alternative } => Expression::IfExpression {
                condition: Box::new(modify_expression(*condition, modifier)),
                consequence: Box::new(modify_statement(*consequence, modifier)),
                alternative: alternative.map(|alt| Box::new(modify_statement(*alt, modifier))),
            },
            Expression::Function { parameters, body } => Expression::Function {
                parameters: parameters.into_iter()
                    .map(|param| modify_expression(param, modifier))
                    .collect(),
                body: Box::new(modify_statement(*body, modifier)),
            },
            Expression::Array(elements) => Expression::Array(
                elements.into_iter()
                    .map(|element| modify_expression(element, modifier))
                    .collect()
            ),
            Expression::Hash(pairs) => Expression::Hash(
                pairs.into_iter()
                    .map(|(key, value)| (
                        modify_expression(key, modifier),
                        modify_expression(value, modifier),
                    ))
                    .collect()
            ),
            other => other,
        }),
    };
    modifier(node)
}

pub fn modify_statement(stmt: Statement, modifier: &mut dyn FnMut(Node) -> Node) -> Statement {
    match modify(Node::Statement(stmt), modifier) {
        Node::Statement(stmt) => stmt,
        _ => unreachable!("modifier turned a statement into another node kind"),
    }
}

pub fn modify_expression(exp: Expression, modifier: &mut dyn FnMut(Node) -> Node) -> Expression {
    match modify(Node::Expression(exp), modifier) {
        Node::Expression(exp) => exp,
        _ => unreachable!("modifier turned an expression into another node kind"),
    }
}
