//! Traversal helpers shared by the analyzers.

use super::{Expr, LambdaBody, Stmt};

/// Visit every statement in `stmts`, recursing into nested blocks,
/// branches and loop bodies. The callback sees each statement exactly
/// once, in source order.
pub fn walk_stmts<'a>(stmts: &'a [Stmt], f: &mut impl FnMut(&'a Stmt)) {
    for stmt in stmts {
        f(stmt);
        match stmt {
            Stmt::If {
                then_branch,
                else_branch,
                ..
            } => {
                walk_stmts(then_branch, f);
                if let Some(e) = else_branch {
                    walk_stmts(e, f);
                }
            }
            Stmt::For { body, .. }
            | Stmt::ForEach { body, .. }
            | Stmt::While { body, .. }
            | Stmt::DoWhile { body, .. }
            | Stmt::Block(body) => walk_stmts(body, f),
            Stmt::Switch { arms, .. } => {
                for arm in arms {
                    walk_stmts(arm, f);
                }
            }
            Stmt::Try {
                body,
                catches,
                finally_block,
            } => {
                walk_stmts(body, f);
                for c in catches {
                    walk_stmts(&c.body, f);
                }
                if let Some(fin) = finally_block {
                    walk_stmts(fin, f);
                }
            }
            _ => {}
        }
    }
}

/// Visit every expression reachable from `stmts`, including those inside
/// nested statements, in source order.
pub fn walk_exprs_in_stmts<'a>(stmts: &'a [Stmt], f: &mut impl FnMut(&'a Expr)) {
    walk_stmts(stmts, &mut |stmt| {
        for e in top_exprs(stmt) {
            walk_expr(e, f);
        }
    });
}

/// The expressions appearing directly on a statement, without recursing
/// into sub-statements (those are handled by `walk_stmts`).
pub fn top_exprs(stmt: &Stmt) -> Vec<&Expr> {
    match stmt {
        Stmt::Expr(e) | Stmt::Throw(e) => vec![e],
        Stmt::LocalVar(decls) => decls.iter().filter_map(|d| d.init.as_ref()).collect(),
        Stmt::If { cond, .. } | Stmt::While { cond, .. } | Stmt::DoWhile { cond, .. } => {
            vec![cond]
        }
        Stmt::For { header, .. } => header.iter().collect(),
        Stmt::ForEach { var, iterable, .. } => {
            let mut out: Vec<&Expr> = var.init.iter().collect();
            out.push(iterable);
            out
        }
        Stmt::Switch { selector, .. } => vec![selector],
        Stmt::Return(Some(e)) => vec![e],
        _ => Vec::new(),
    }
}

/// Visit `expr` and every sub-expression, pre-order.
pub fn walk_expr<'a>(expr: &'a Expr, f: &mut impl FnMut(&'a Expr)) {
    f(expr);
    match expr {
        Expr::FieldAccess { scope, .. } => walk_expr(scope, f),
        Expr::MethodCall { scope, args, .. } => {
            if let Some(s) = scope {
                walk_expr(s, f);
            }
            for a in args {
                walk_expr(a, f);
            }
        }
        Expr::New { args, .. } => {
            for a in args {
                walk_expr(a, f);
            }
        }
        Expr::Assign { target, value } => {
            walk_expr(target, f);
            walk_expr(value, f);
        }
        Expr::Binary { left, right, .. } => {
            walk_expr(left, f);
            walk_expr(right, f);
        }
        Expr::Unary { operand, .. } => walk_expr(operand, f),
        Expr::Conditional {
            cond,
            then_branch,
            else_branch,
        } => {
            walk_expr(cond, f);
            walk_expr(then_branch, f);
            walk_expr(else_branch, f);
        }
        Expr::Cast { inner, .. } | Expr::Paren(inner) => walk_expr(inner, f),
        Expr::ArrayInit(items) | Expr::ArrayNew { init: items, .. } => {
            for i in items {
                walk_expr(i, f);
            }
        }
        Expr::ArrayAccess { array, index } => {
            walk_expr(array, f);
            walk_expr(index, f);
        }
        Expr::Lambda(body) => match body {
            LambdaBody::Expr(e) => walk_expr(e, f),
            LambdaBody::Block(stmts) => walk_exprs_in_stmts(stmts, f),
        },
        _ => {}
    }
}

/// Trace a call's scope back through field accesses, parentheses and
/// casts to the ultimate receiver variable or field name. `this.bank`
/// yields `bank`; `((Helper) this.helper).owner` yields `helper`.
pub fn receiver_name(expr: &Expr) -> Option<&str> {
    match expr.unwrapped() {
        Expr::Name(n) => Some(n),
        Expr::FieldAccess { scope, name } => match scope.unwrapped() {
            Expr::This => Some(name),
            other => receiver_name(other),
        },
        Expr::MethodCall {
            scope: Some(scope), ..
        } => receiver_name(scope),
        Expr::ArrayAccess { array, .. } => receiver_name(array),
        _ => None,
    }
}

/// The root name of an expression: the variable a dotted chain starts
/// from, or the bare name itself.
pub fn root_name(expr: &Expr) -> Option<&str> {
    match expr.unwrapped() {
        Expr::Name(n) => Some(n),
        Expr::FieldAccess { scope, name } => match scope.unwrapped() {
            Expr::This => Some(name),
            other => root_name(other),
        },
        Expr::MethodCall { scope, .. } => scope.as_deref().and_then(root_name),
        Expr::ArrayAccess { array, .. } => root_name(array),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{Literal, VarDeclarator};

    fn name(n: &str) -> Expr {
        Expr::Name(n.to_string())
    }

    fn call(scope: Option<Expr>, n: &str, args: Vec<Expr>) -> Expr {
        Expr::MethodCall {
            scope: scope.map(Box::new),
            name: n.to_string(),
            args,
        }
    }

    #[test]
    fn walks_nested_statements() {
        let stmts = vec![
            Stmt::If {
                cond: name("flag"),
                then_branch: vec![Stmt::Expr(call(None, "doIt", vec![]))],
                else_branch: Some(vec![Stmt::Block(vec![Stmt::Expr(name("x"))])]),
            },
            Stmt::Return(None),
        ];
        let mut count = 0;
        walk_stmts(&stmts, &mut |_| count += 1);
        assert_eq!(count, 5);
    }

    #[test]
    fn walks_expressions_inside_initializers() {
        let stmts = vec![Stmt::LocalVar(vec![VarDeclarator {
            name: "n".to_string(),
            type_name: "int".to_string(),
            init: Some(Expr::Binary {
                op: "+".to_string(),
                left: Box::new(Expr::Literal(Literal::Int("1".to_string()))),
                right: Box::new(call(Some(name("obj")), "size", vec![])),
            }),
        }])];
        let mut calls = Vec::new();
        walk_exprs_in_stmts(&stmts, &mut |e| {
            if let Expr::MethodCall { name, .. } = e {
                calls.push(name.clone());
            }
        });
        assert_eq!(calls, vec!["size".to_string()]);
    }

    #[test]
    fn receiver_traces_through_wrappers() {
        let e = Expr::Paren(Box::new(Expr::Cast {
            type_name: "Helper".to_string(),
            inner: Box::new(Expr::FieldAccess {
                scope: Box::new(Expr::This),
                name: "helper".to_string(),
            }),
        }));
        assert_eq!(receiver_name(&e), Some("helper"));
    }

    #[test]
    fn root_of_chained_call() {
        let e = call(Some(call(Some(name("acct")), "owner", vec![])), "name", vec![]);
        assert_eq!(root_name(&e), Some("acct"));
    }
}
