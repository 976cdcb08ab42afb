//! A read-only, kind-tagged view over the swc AST.
//!
//! Only the handful of constructs that matter for locating decorator helper
//! calls get their own [`Node`] variant. Everything else is folded into one of
//! the catch-all variants ([`Node::Stmt`], [`Node::Expr`], ...) and is a leaf
//! for traversal purposes.
//!
//! Nodes borrow from the [`Program`] they were created from and are compared
//! by identity (see [`Node::is`]), never structurally.

pub mod search;
pub mod walk;

use std::ptr;

use swc_core::{
    common::{Span, Spanned},
    ecma::ast::*,
};

/// Discriminant of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Program,
    ImportDeclaration,
    ImportSpecifier,
    ExportDeclaration,
    ModuleDeclaration,
    VariableDeclaration,
    Declaration,
    ExpressionStatement,
    Statement,
    CallExpression,
    ArrayExpression,
    AssignmentExpression,
    SpreadElement,
    Expression,
}

#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Program(&'a Program),
    Import(&'a ImportDecl),
    ImportSpecifier(&'a ImportSpecifier),
    ExportDecl(&'a ExportDecl),
    /// Any other module declaration (`export { a }`, `export default ...`).
    ModuleDecl(&'a ModuleDecl),
    VarDecl(&'a VarDecl),
    /// Class, function and TypeScript declarations.
    Decl(&'a Decl),
    ExprStmt(&'a ExprStmt),
    Stmt(&'a Stmt),
    Call(&'a CallExpr),
    Array(&'a ArrayLit),
    Assign(&'a AssignExpr),
    /// A `...expr` argument or array element.
    Spread(&'a ExprOrSpread),
    Expr(&'a Expr),
}

impl<'a> Node<'a> {
    pub fn from_module_item(item: &'a ModuleItem) -> Self {
        match item {
            ModuleItem::ModuleDecl(decl) => Self::from_module_decl(decl),
            ModuleItem::Stmt(stmt) => Self::from_stmt(stmt),
        }
    }

    pub fn from_module_decl(decl: &'a ModuleDecl) -> Self {
        match decl {
            ModuleDecl::Import(import) => Node::Import(import),
            ModuleDecl::ExportDecl(export) => Node::ExportDecl(export),
            _ => Node::ModuleDecl(decl),
        }
    }

    pub fn from_stmt(stmt: &'a Stmt) -> Self {
        match stmt {
            Stmt::Expr(expr_stmt) => Node::ExprStmt(expr_stmt),
            Stmt::Decl(decl) => Self::from_decl(decl),
            _ => Node::Stmt(stmt),
        }
    }

    pub fn from_decl(decl: &'a Decl) -> Self {
        match decl {
            Decl::Var(var_decl) => Node::VarDecl(var_decl),
            _ => Node::Decl(decl),
        }
    }

    /// Parentheses are transparent: `(a = f())` yields the assignment node.
    pub fn from_expr(expr: &'a Expr) -> Self {
        match unparen(expr) {
            Expr::Call(call) => Node::Call(call),
            Expr::Array(array) => Node::Array(array),
            Expr::Assign(assign) => Node::Assign(assign),
            expr => Node::Expr(expr),
        }
    }

    pub fn from_arg(arg: &'a ExprOrSpread) -> Self {
        if arg.spread.is_some() {
            Node::Spread(arg)
        } else {
            Self::from_expr(&arg.expr)
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Program(_) => NodeKind::Program,
            Node::Import(_) => NodeKind::ImportDeclaration,
            Node::ImportSpecifier(_) => NodeKind::ImportSpecifier,
            Node::ExportDecl(_) => NodeKind::ExportDeclaration,
            Node::ModuleDecl(_) => NodeKind::ModuleDeclaration,
            Node::VarDecl(_) => NodeKind::VariableDeclaration,
            Node::Decl(_) => NodeKind::Declaration,
            Node::ExprStmt(_) => NodeKind::ExpressionStatement,
            Node::Stmt(_) => NodeKind::Statement,
            Node::Call(_) => NodeKind::CallExpression,
            Node::Array(_) => NodeKind::ArrayExpression,
            Node::Assign(_) => NodeKind::AssignmentExpression,
            Node::Spread(_) => NodeKind::SpreadElement,
            Node::Expr(_) => NodeKind::Expression,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Node::Program(n) => n.span(),
            Node::Import(n) => n.span(),
            Node::ImportSpecifier(n) => n.span(),
            Node::ExportDecl(n) => n.span(),
            Node::ModuleDecl(n) => n.span(),
            Node::VarDecl(n) => n.span(),
            Node::Decl(n) => n.span(),
            Node::ExprStmt(n) => n.span(),
            Node::Stmt(n) => n.span(),
            Node::Call(n) => n.span(),
            Node::Array(n) => n.span(),
            Node::Assign(n) => n.span(),
            Node::Spread(n) => n.span(),
            Node::Expr(n) => n.span(),
        }
    }

    fn addr(&self) -> *const () {
        match *self {
            Node::Program(n) => ptr::from_ref(n).cast(),
            Node::Import(n) => ptr::from_ref(n).cast(),
            Node::ImportSpecifier(n) => ptr::from_ref(n).cast(),
            Node::ExportDecl(n) => ptr::from_ref(n).cast(),
            Node::ModuleDecl(n) => ptr::from_ref(n).cast(),
            Node::VarDecl(n) => ptr::from_ref(n).cast(),
            Node::Decl(n) => ptr::from_ref(n).cast(),
            Node::ExprStmt(n) => ptr::from_ref(n).cast(),
            Node::Stmt(n) => ptr::from_ref(n).cast(),
            Node::Call(n) => ptr::from_ref(n).cast(),
            Node::Array(n) => ptr::from_ref(n).cast(),
            Node::Assign(n) => ptr::from_ref(n).cast(),
            Node::Spread(n) => ptr::from_ref(n).cast(),
            Node::Expr(n) => ptr::from_ref(n).cast(),
        }
    }

    /// Identity comparison. Two structurally identical subtrees at different
    /// positions are different nodes.
    pub fn is(&self, other: &Node<'_>) -> bool {
        self.kind() == other.kind() && ptr::eq(self.addr(), other.addr())
    }

    /// Name of the callee when this is a call to a plain identifier.
    pub fn callee_name(&self) -> Option<&'a str> {
        let Node::Call(call) = *self else {
            return None;
        };
        match &call.callee {
            Callee::Expr(callee) => match unparen(callee) {
                Expr::Ident(ident) => Some(&*ident.sym),
                _ => None,
            },
            _ => None,
        }
    }

    /// Name of the assigned identifier when this is a plain `=` assignment to
    /// a simple identifier.
    pub fn assign_target_name(&self) -> Option<&'a str> {
        match *self {
            Node::Assign(assign) if assign.op == op!("=") => assign_target_ident(assign),
            _ => None,
        }
    }
}

pub(crate) fn unparen(expr: &Expr) -> &Expr {
    match expr {
        Expr::Paren(paren) => unparen(&paren.expr),
        _ => expr,
    }
}

pub(crate) fn assign_target_ident(assign: &AssignExpr) -> Option<&str> {
    match &assign.left {
        AssignTarget::Simple(SimpleAssignTarget::Ident(binding)) => Some(&*binding.id.sym),
        _ => None,
    }
}
