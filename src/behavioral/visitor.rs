//! # Visitor: code analyzer
//!
//! A small AST of functions and statements. Analyses (complexity, pretty
//! printing, declaration checks) are separate [`Visitor`]s, so adding an
//! analysis never touches the node types.

use std::collections::HashSet;

use tracing::debug;

// =============================================================================
// AST nodes
// =============================================================================

/// Opaque expression, kept as source text.
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    pub representation: String,
}

impl Expression {
    pub fn new(representation: impl Into<String>) -> Self {
        Self {
            representation: representation.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub name: String,
    pub type_hint: Option<String>,
    pub initializer: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub target: String,
    pub value: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfStatement {
    pub condition: Expression,
    pub then_branch: Vec<Statement>,
    pub else_branch: Option<Vec<Statement>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStatement {
    pub expression: Expression,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    VariableDeclaration(VariableDeclaration),
    Assignment(Assignment),
    If(IfStatement),
    Expression(ExpressionStatement),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDefinition {
    pub name: String,
    pub parameters: Vec<String>,
    pub body: Vec<Statement>,
}

impl Statement {
    pub fn declare(name: &str, type_hint: Option<&str>, initializer: Option<&str>) -> Self {
        Statement::VariableDeclaration(VariableDeclaration {
            name: name.to_string(),
            type_hint: type_hint.map(str::to_string),
            initializer: initializer.map(Expression::new),
        })
    }

    pub fn assign(target: &str, value: &str) -> Self {
        Statement::Assignment(Assignment {
            target: target.to_string(),
            value: Expression::new(value),
        })
    }

    pub fn if_else(condition: &str, then_branch: Vec<Statement>, else_branch: Option<Vec<Statement>>) -> Self {
        Statement::If(IfStatement {
            condition: Expression::new(condition),
            then_branch,
            else_branch,
        })
    }

    pub fn expr(expression: &str) -> Self {
        Statement::Expression(ExpressionStatement {
            expression: Expression::new(expression),
        })
    }

    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Statement::VariableDeclaration(node) => visitor.visit_variable_declaration(node),
            Statement::Assignment(node) => visitor.visit_assignment(node),
            Statement::If(node) => visitor.visit_if_statement(node),
            Statement::Expression(node) => visitor.visit_expression_statement(node),
        }
    }
}

impl FunctionDefinition {
    pub fn new(name: &str, parameters: &[&str], body: Vec<Statement>) -> Self {
        Self {
            name: name.to_string(),
            parameters: parameters.iter().map(|p| p.to_string()).collect(),
            body,
        }
    }

    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_function_definition(self);
    }
}

fn accept_all<V: Visitor + ?Sized>(statements: &[Statement], visitor: &mut V) {
    for statement in statements {
        statement.accept(visitor);
    }
}

// =============================================================================
// Visitor trait
// =============================================================================

/// One method per node kind. Visitors drive traversal into child nodes
/// themselves.
pub trait Visitor {
    fn visit_function_definition(&mut self, node: &FunctionDefinition);
    fn visit_variable_declaration(&mut self, node: &VariableDeclaration);
    fn visit_assignment(&mut self, node: &Assignment);
    fn visit_if_statement(&mut self, node: &IfStatement);
    fn visit_expression_statement(&mut self, node: &ExpressionStatement);
}

// =============================================================================
// Complexity
// =============================================================================

/// Counts decision points: one per function plus one per `if`.
#[derive(Debug, Default)]
pub struct ComplexityVisitor {
    score: usize,
}

impl ComplexityVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn complexity(&self) -> usize {
        self.score
    }

    pub fn reset(&mut self) {
        self.score = 0;
    }
}

impl Visitor for ComplexityVisitor {
    fn visit_function_definition(&mut self, node: &FunctionDefinition) {
        self.score += 1;
        accept_all(&node.body, self);
    }

    fn visit_variable_declaration(&mut self, _node: &VariableDeclaration) {}

    fn visit_assignment(&mut self, _node: &Assignment) {}

    fn visit_if_statement(&mut self, node: &IfStatement) {
        self.score += 1;
        accept_all(&node.then_branch, self);
        if let Some(else_branch) = &node.else_branch {
            accept_all(else_branch, self);
        }
    }

    fn visit_expression_statement(&mut self, _node: &ExpressionStatement) {}
}

// =============================================================================
// Pretty printer
// =============================================================================

pub struct PrettyPrintVisitor {
    output: String,
    indent_unit: String,
    level: usize,
}

impl Default for PrettyPrintVisitor {
    fn default() -> Self {
        Self::new("  ")
    }
}

impl PrettyPrintVisitor {
    pub fn new(indent_unit: &str) -> Self {
        Self {
            output: String::new(),
            indent_unit: indent_unit.to_string(),
            level: 0,
        }
    }

    pub fn output(&self) -> &str {
        self.output.trim_end()
    }

    pub fn reset(&mut self) {
        self.output.clear();
        self.level = 0;
    }

    fn line(&mut self, text: &str) {
        self.output.push_str(&self.indent_unit.repeat(self.level));
        self.output.push_str(text);
        self.output.push('\n');
    }

    fn block(&mut self, statements: &[Statement]) {
        self.level += 1;
        accept_all(statements, self);
        self.level -= 1;
    }
}

impl Visitor for PrettyPrintVisitor {
    fn visit_function_definition(&mut self, node: &FunctionDefinition) {
        self.line(&format!("Function: {}({})", node.name, node.parameters.join(", ")));
        self.block(&node.body);
    }

    fn visit_variable_declaration(&mut self, node: &VariableDeclaration) {
        let type_hint = node
            .type_hint
            .as_ref()
            .map(|hint| format!(": {hint}"))
            .unwrap_or_default();
        let init = node
            .initializer
            .as_ref()
            .map(|expr| format!(" = {}", expr.representation))
            .unwrap_or_default();
        self.line(&format!("Declare: {}{type_hint}{init}", node.name));
    }

    fn visit_assignment(&mut self, node: &Assignment) {
        self.line(&format!("Assign: {} = {}", node.target, node.value.representation));
    }

    fn visit_if_statement(&mut self, node: &IfStatement) {
        self.line(&format!("If ({}):", node.condition.representation));
        self.block(&node.then_branch);
        if let Some(else_branch) = &node.else_branch {
            self.line("Else:");
            self.block(else_branch);
        }
    }

    fn visit_expression_statement(&mut self, node: &ExpressionStatement) {
        self.line(&format!("ExprStmt: {}", node.expression.representation));
    }
}

// =============================================================================
// Declaration checks
// =============================================================================

/// Tracks declared names per scope and reports redeclarations and
/// assignments to undeclared names.
#[derive(Debug)]
pub struct SyntaxCheckVisitor {
    errors: Vec<String>,
    scopes: Vec<HashSet<String>>,
}

impl Default for SyntaxCheckVisitor {
    fn default() -> Self {
        Self {
            errors: Vec::new(),
            scopes: vec![HashSet::new()],
        }
    }
}

impl SyntaxCheckVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn declare(&mut self, name: &str, kind: &str) {
        let Some(scope) = self.scopes.last_mut() else {
            return;
        };
        if !scope.insert(name.to_string()) {
            self.errors.push(format!(
                "Syntax Error: Identifier '{name}' already declared as a {kind} in this scope."
            ));
        }
    }

    fn is_declared(&self, name: &str) -> bool {
        self.scopes.iter().rev().any(|scope| scope.contains(name))
    }

    fn push_scope(&mut self) {
        self.scopes.push(HashSet::new());
    }

    /// The global scope is never popped.
    fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Declares the function in the current scope and opens a scope holding
    /// its parameters.
    pub fn enter_function_scope(&mut self, name: &str, parameters: &[String]) {
        self.declare(name, "function");
        self.push_scope();
        for parameter in parameters {
            self.declare(parameter, "parameter");
        }
    }

    pub fn exit_function_scope(&mut self) {
        self.pop_scope();
    }

    /// Checks one function with its scope handled around the visit.
    pub fn check_function(&mut self, function: &FunctionDefinition) {
        debug!(function = %function.name, "checking declarations");
        self.enter_function_scope(&function.name, &function.parameters);
        function.accept(self);
        self.exit_function_scope();
    }

    fn check_block(&mut self, statements: &[Statement]) {
        self.push_scope();
        accept_all(statements, self);
        self.pop_scope();
    }
}

impl Visitor for SyntaxCheckVisitor {
    fn visit_function_definition(&mut self, node: &FunctionDefinition) {
        accept_all(&node.body, self);
    }

    fn visit_variable_declaration(&mut self, node: &VariableDeclaration) {
        self.declare(&node.name, "variable");
    }

    fn visit_assignment(&mut self, node: &Assignment) {
        if !self.is_declared(&node.target) {
            self.errors.push(format!(
                "Syntax Error: Variable '{}' used before declaration.",
                node.target
            ));
        }
    }

    fn visit_if_statement(&mut self, node: &IfStatement) {
        self.check_block(&node.then_branch);
        if let Some(else_branch) = &node.else_branch {
            self.check_block(else_branch);
        }
    }

    fn visit_expression_statement(&mut self, _node: &ExpressionStatement) {}
}
