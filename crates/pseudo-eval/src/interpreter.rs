//! Function table, call execution and expression evaluation.

use crate::env::Environment;
use crate::error::{EvalError, EvalResult};
use pseudo_types::ast::{BinaryOp, Expr, Function, Statement};
use pseudo_types::Value;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// The interpreter context: loaded functions plus the variable scopes.
///
/// Each instance is independent; two test runs that must not see each
/// other's functions simply use two interpreters.
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    env: Environment,
    functions: BTreeMap<String, Function>,
}

impl Interpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse source without registering anything.
    pub fn parse(&self, source: &str) -> Vec<Function> {
        pseudo_parser::parse_program(source)
    }

    /// Parse source and register its functions, replacing any with the same
    /// name. Previously loaded functions are kept. Returns how many
    /// functions the source defined.
    pub fn load_code(&mut self, source: &str) -> usize {
        let functions = self.parse(source);
        let count = functions.len();
        for function in functions {
            self.functions.insert(function.name.clone(), function);
        }
        debug!(count, total = self.functions.len(), "loaded functions");
        count
    }

    /// Forget every function and variable.
    pub fn reset(&mut self) {
        self.env.clear();
        self.functions.clear();
    }

    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }

    /// Registered function names, sorted.
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.functions.keys().map(String::as_str)
    }

    /// Bind a variable in the current scope.
    pub fn set_variable(&mut self, name: &str, value: Value) {
        self.env.define(name, value);
    }

    pub fn variable(&self, name: &str) -> Option<&Value> {
        self.env.get(name)
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Call a loaded function.
    ///
    /// Parameters bind positionally; missing arguments bind to null and
    /// extra ones are ignored. The first `RETURN` reached yields the result,
    /// falling off the end yields null. The call runs in its own frame, so
    /// the variable scope after the call is the one before it.
    pub fn execute(&mut self, name: &str, args: &[Value]) -> EvalResult<Value> {
        let function = self
            .functions
            .get(name)
            .ok_or_else(|| EvalError::FunctionNotFound(name.to_string()))?;

        let env = &mut self.env;
        env.push_scope();
        for (i, param) in function.parameters.iter().enumerate() {
            env.define(param, args.get(i).cloned().unwrap_or_default());
        }
        let result = run_body(env, &function.body);
        env.pop_scope();

        trace!(function = name, %result, "call finished");
        Ok(result)
    }

    /// Compile and evaluate expression text against the current scope.
    pub fn evaluate_expression(&self, text: &str) -> Value {
        self.eval(&pseudo_parser::compile_expression(text))
    }

    /// Evaluate a compiled expression against the current scope.
    pub fn eval(&self, expr: &Expr) -> Value {
        evaluate(expr, &self.env)
    }
}

fn run_body(env: &mut Environment, body: &[Statement]) -> Value {
    for stmt in body {
        match stmt {
            Statement::Assignment { variable, value } => {
                let v = evaluate(&value.expr, env);
                env.define(variable, v);
            }
            Statement::Return { value } => return evaluate(&value.expr, env),
            Statement::If { condition, .. } => {
                trace!(condition = %condition.source, "skipping IF statement");
            }
        }
    }
    Value::Null
}

fn evaluate(expr: &Expr, env: &Environment) -> Value {
    match expr {
        Expr::Literal(value) => value.clone(),
        Expr::Variable(name) => env.get(name).cloned().unwrap_or_default(),
        Expr::Binary { op, left, right } => {
            let left = evaluate(left, env);
            let right = evaluate(right, env);
            eval_binary(*op, &left, &right)
        }
        Expr::Invalid(_) => Value::Null,
    }
}

/// Arithmetic needs two numbers and yields null otherwise; `==` compares
/// structurally.
fn eval_binary(op: BinaryOp, left: &Value, right: &Value) -> Value {
    let apply: fn(f64, f64) -> f64 = match op {
        BinaryOp::Eq => return Value::Bool(left == right),
        BinaryOp::Add => |a, b| a + b,
        BinaryOp::Sub => |a, b| a - b,
        BinaryOp::Mul => |a, b| a * b,
        BinaryOp::Div => |a, b| a / b,
        BinaryOp::Rem => |a, b| a % b,
    };
    match (left.as_number(), right.as_number()) {
        (Some(a), Some(b)) => Value::Number(apply(a, b)),
        _ => Value::Null,
    }
}
