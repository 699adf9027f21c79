//! Lowering from the raw tree-sitter tree into the analyzer-facing
//! syntax model.
//!
//! The grammar distinguishes far more node kinds than the analyzers
//! care about; anything without a dedicated model variant lowers to
//! `Stmt::Other` / `Expr::Other` so traversals stay total.

use tree_sitter::{Node, Tree};

use crate::syntax::{
    CatchClause, CompilationUnit, ConstructorDecl, Expr, FieldDecl, LambdaBody, Literal, Marker,
    MethodDecl, Param, Stmt, TypeDecl, TypeKind, VarDeclarator, Visibility,
};

/// Lower a parsed tree into a `CompilationUnit`.
pub fn lower_unit(tree: &Tree, source: &str) -> CompilationUnit {
    let src = source.as_bytes();
    let mut types = Vec::new();
    let root = tree.root_node();
    let mut cursor = root.walk();
    for child in root.named_children(&mut cursor) {
        if let Some(ty) = lower_type(child, src) {
            types.push(ty);
        }
    }
    CompilationUnit { types }
}

fn text(node: Node, src: &[u8]) -> String {
    node.utf8_text(src).unwrap_or_default().to_string()
}

fn lower_type(node: Node, src: &[u8]) -> Option<TypeDecl> {
    let kind = match node.kind() {
        "class_declaration" => TypeKind::Class,
        "interface_declaration" => TypeKind::Interface,
        "enum_declaration" => TypeKind::Enum,
        _ => return None,
    };
    let name = node.child_by_field_name("name").map(|n| text(n, src))?;
    let markers = annotation_names(node, src);

    let mut fields = Vec::new();
    let mut methods = Vec::new();
    let mut constructors = Vec::new();
    if let Some(body) = node.child_by_field_name("body") {
        let mut cursor = body.walk();
        for member in body.named_children(&mut cursor) {
            match member.kind() {
                "field_declaration" => {
                    if let Some(field) = lower_field(member, src) {
                        fields.push(field);
                    }
                }
                "method_declaration" => {
                    if let Some(method) = lower_method(member, src) {
                        methods.push(method);
                    }
                }
                "constructor_declaration" => {
                    if let Some(ctor) = lower_constructor(member, src) {
                        constructors.push(ctor);
                    }
                }
                _ => {}
            }
        }
    }
    Some(TypeDecl {
        name,
        kind,
        markers,
        fields,
        methods,
        constructors,
    })
}

/// Annotations declared on a member, `@` stripped, raw argument text
/// kept for the parameterized form.
fn annotation_names(node: Node, src: &[u8]) -> Vec<Marker> {
    let mut markers = Vec::new();
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() != "modifiers" {
            continue;
        }
        let mut inner = child.walk();
        for modifier in child.children(&mut inner) {
            if matches!(modifier.kind(), "marker_annotation" | "annotation") {
                if let Some(name) = modifier.child_by_field_name("name") {
                    markers.push(Marker {
                        name: text(name, src),
                        args: modifier
                            .child_by_field_name("arguments")
                            .map(|a| text(a, src)),
                    });
                }
            }
        }
    }
    markers
}

fn visibility(node: Node) -> Visibility {
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.kind() != "modifiers" {
            continue;
        }
        let mut inner = child.walk();
        for modifier in child.children(&mut inner) {
            match modifier.kind() {
                "public" => return Visibility::Public,
                "protected" => return Visibility::Protected,
                "private" => return Visibility::Private,
                _ => {}
            }
        }
    }
    Visibility::PackagePrivate
}

fn lower_field(node: Node, src: &[u8]) -> Option<FieldDecl> {
    let type_name = node.child_by_field_name("type").map(|n| text(n, src))?;
    let mut declarators = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if child.kind() == "variable_declarator" {
            declarators.push(lower_declarator(child, &type_name, src));
        }
    }
    Some(FieldDecl {
        type_name,
        declarators,
    })
}

fn lower_declarator(node: Node, type_name: &str, src: &[u8]) -> VarDeclarator {
    let name = node
        .child_by_field_name("name")
        .map(|n| text(n, src))
        .unwrap_or_default();
    let init = node
        .child_by_field_name("value")
        .map(|v| lower_expr(v, src));
    VarDeclarator {
        name,
        type_name: type_name.to_string(),
        init,
    }
}

fn lower_params(node: Node, src: &[u8]) -> Vec<Param> {
    let mut params = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if matches!(child.kind(), "formal_parameter" | "spread_parameter") {
            let type_name = child
                .child_by_field_name("type")
                .map(|n| text(n, src))
                .unwrap_or_default();
            let name = child
                .child_by_field_name("name")
                .map(|n| text(n, src))
                .unwrap_or_default();
            params.push(Param { name, type_name });
        }
    }
    params
}

fn lower_method(node: Node, src: &[u8]) -> Option<MethodDecl> {
    let name = node.child_by_field_name("name").map(|n| text(n, src))?;
    let return_type = node
        .child_by_field_name("type")
        .map(|n| text(n, src))
        .unwrap_or_default();
    let params = node
        .child_by_field_name("parameters")
        .map(|p| lower_params(p, src))
        .unwrap_or_default();
    let body = node
        .child_by_field_name("body")
        .map(|b| lower_block(b, src));
    Some(MethodDecl {
        name,
        markers: annotation_names(node, src),
        visibility: visibility(node),
        params,
        return_type,
        body,
        line: node.start_position().row + 1,
        end_line: node.end_position().row + 1,
    })
}

fn lower_constructor(node: Node, src: &[u8]) -> Option<ConstructorDecl> {
    let params = node
        .child_by_field_name("parameters")
        .map(|p| lower_params(p, src))
        .unwrap_or_default();
    let body = node
        .child_by_field_name("body")
        .map(|b| lower_block(b, src))
        .unwrap_or_default();
    Some(ConstructorDecl { params, body })
}

fn lower_block(node: Node, src: &[u8]) -> Vec<Stmt> {
    let mut stmts = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        stmts.push(lower_stmt(child, src));
    }
    stmts
}

/// Lower a node used in statement position. A bare block child that is
/// itself a statement list becomes `Stmt::Block`.
fn lower_stmt(node: Node, src: &[u8]) -> Stmt {
    match node.kind() {
        "expression_statement" => match node.named_child(0) {
            Some(inner) => Stmt::Expr(lower_expr(inner, src)),
            None => Stmt::Other,
        },
        "local_variable_declaration" => {
            let type_name = node
                .child_by_field_name("type")
                .map(|n| text(n, src))
                .unwrap_or_default();
            let mut decls = Vec::new();
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                if child.kind() == "variable_declarator" {
                    decls.push(lower_declarator(child, &type_name, src));
                }
            }
            Stmt::LocalVar(decls)
        }
        "if_statement" => {
            let cond = node
                .child_by_field_name("condition")
                .map(|c| lower_expr(c, src))
                .unwrap_or(Expr::Other);
            let then_branch = node
                .child_by_field_name("consequence")
                .map(|b| lower_branch(b, src))
                .unwrap_or_default();
            let else_branch = node
                .child_by_field_name("alternative")
                .map(|b| lower_branch(b, src));
            Stmt::If {
                cond,
                then_branch,
                else_branch,
            }
        }
        "for_statement" => {
            let mut header = Vec::new();
            for field in ["init", "condition", "update"] {
                if let Some(part) = node.child_by_field_name(field) {
                    match lower_stmt_or_expr(part, src) {
                        Either::Stmt(Stmt::Expr(e)) => header.push(e),
                        Either::Stmt(Stmt::LocalVar(decls)) => {
                            header.extend(decls.into_iter().filter_map(|d| d.init));
                        }
                        Either::Stmt(_) => {}
                        Either::Expr(e) => header.push(e),
                    }
                }
            }
            let body = node
                .child_by_field_name("body")
                .map(|b| lower_branch(b, src))
                .unwrap_or_default();
            Stmt::For { header, body }
        }
        "enhanced_for_statement" => {
            let type_name = node
                .child_by_field_name("type")
                .map(|n| text(n, src))
                .unwrap_or_default();
            let var_name = node
                .child_by_field_name("name")
                .map(|n| text(n, src))
                .unwrap_or_default();
            let iterable = node
                .child_by_field_name("value")
                .map(|v| lower_expr(v, src))
                .unwrap_or(Expr::Other);
            let body = node
                .child_by_field_name("body")
                .map(|b| lower_branch(b, src))
                .unwrap_or_default();
            Stmt::ForEach {
                var: VarDeclarator {
                    name: var_name,
                    type_name,
                    init: None,
                },
                iterable,
                body,
            }
        }
        "while_statement" => {
            let cond = node
                .child_by_field_name("condition")
                .map(|c| lower_expr(c, src))
                .unwrap_or(Expr::Other);
            let body = node
                .child_by_field_name("body")
                .map(|b| lower_branch(b, src))
                .unwrap_or_default();
            Stmt::While { cond, body }
        }
        "do_statement" => {
            let cond = node
                .child_by_field_name("condition")
                .map(|c| lower_expr(c, src))
                .unwrap_or(Expr::Other);
            let body = node
                .child_by_field_name("body")
                .map(|b| lower_branch(b, src))
                .unwrap_or_default();
            Stmt::DoWhile { cond, body }
        }
        "switch_expression" => {
            let selector = node
                .child_by_field_name("condition")
                .map(|c| lower_expr(c, src))
                .unwrap_or(Expr::Other);
            let mut arms = Vec::new();
            if let Some(body) = node.child_by_field_name("body") {
                let mut cursor = body.walk();
                for group in body.named_children(&mut cursor) {
                    if matches!(
                        group.kind(),
                        "switch_block_statement_group" | "switch_rule"
                    ) {
                        let mut arm = Vec::new();
                        let mut inner = group.walk();
                        for item in group.named_children(&mut inner) {
                            if item.kind() != "switch_label" {
                                arm.push(lower_stmt(item, src));
                            }
                        }
                        arms.push(arm);
                    }
                }
            }
            Stmt::Switch { selector, arms }
        }
        "try_statement" | "try_with_resources_statement" => {
            let body = node
                .child_by_field_name("body")
                .map(|b| lower_block(b, src))
                .unwrap_or_default();
            let mut catches = Vec::new();
            let mut finally_block = None;
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                match child.kind() {
                    "catch_clause" => {
                        let param_type = child
                            .named_child(0)
                            .and_then(|p| p.named_child(0))
                            .map(|t| text(t, src))
                            .unwrap_or_default();
                        let catch_body = child
                            .child_by_field_name("body")
                            .map(|b| lower_block(b, src))
                            .unwrap_or_default();
                        catches.push(CatchClause {
                            param_type,
                            body: catch_body,
                        });
                    }
                    "finally_clause" => {
                        finally_block = child.named_child(0).map(|b| lower_block(b, src));
                    }
                    _ => {}
                }
            }
            Stmt::Try {
                body,
                catches,
                finally_block,
            }
        }
        "throw_statement" => {
            let value = node
                .named_child(0)
                .map(|v| lower_expr(v, src))
                .unwrap_or(Expr::Other);
            Stmt::Throw(value)
        }
        "return_statement" => Stmt::Return(node.named_child(0).map(|v| lower_expr(v, src))),
        "block" => Stmt::Block(lower_block(node, src)),
        _ => Stmt::Other,
    }
}

/// Statement bodies in the grammar may be a block or a single
/// statement; either way the model gets a statement list.
fn lower_branch(node: Node, src: &[u8]) -> Vec<Stmt> {
    if node.kind() == "block" {
        lower_block(node, src)
    } else {
        vec![lower_stmt(node, src)]
    }
}

enum Either {
    Stmt(Stmt),
    Expr(Expr),
}

fn lower_stmt_or_expr(node: Node, src: &[u8]) -> Either {
    match node.kind() {
        "local_variable_declaration" | "expression_statement" => {
            Either::Stmt(lower_stmt(node, src))
        }
        _ => Either::Expr(lower_expr(node, src)),
    }
}

fn lower_expr(node: Node, src: &[u8]) -> Expr {
    match node.kind() {
        "identifier" => Expr::Name(text(node, src)),
        "this" => Expr::This,
        "decimal_integer_literal" | "hex_integer_literal" | "octal_integer_literal"
        | "binary_integer_literal" => {
            let raw = text(node, src);
            if raw.ends_with('l') || raw.ends_with('L') {
                Expr::Literal(Literal::Long(raw))
            } else {
                Expr::Literal(Literal::Int(raw))
            }
        }
        "decimal_floating_point_literal" | "hex_floating_point_literal" => {
            Expr::Literal(Literal::Float(text(node, src)))
        }
        "string_literal" => Expr::Literal(Literal::Str(string_contents(node, src))),
        "character_literal" => Expr::Literal(Literal::Char(text(node, src))),
        "true" => Expr::Literal(Literal::Bool(true)),
        "false" => Expr::Literal(Literal::Bool(false)),
        "null_literal" => Expr::Literal(Literal::Null),
        "field_access" => {
            let scope = node
                .child_by_field_name("object")
                .map(|o| lower_expr(o, src))
                .unwrap_or(Expr::Other);
            let name = node
                .child_by_field_name("field")
                .map(|f| text(f, src))
                .unwrap_or_default();
            Expr::FieldAccess {
                scope: Box::new(scope),
                name,
            }
        }
        "method_invocation" => {
            let scope = node
                .child_by_field_name("object")
                .map(|o| Box::new(lower_expr(o, src)));
            let name = node
                .child_by_field_name("name")
                .map(|n| text(n, src))
                .unwrap_or_default();
            let args = node
                .child_by_field_name("arguments")
                .map(|a| lower_args(a, src))
                .unwrap_or_default();
            Expr::MethodCall { scope, name, args }
        }
        "object_creation_expression" => {
            let type_name = node
                .child_by_field_name("type")
                .map(|t| text(t, src))
                .unwrap_or_default();
            let args = node
                .child_by_field_name("arguments")
                .map(|a| lower_args(a, src))
                .unwrap_or_default();
            Expr::New { type_name, args }
        }
        "assignment_expression" => {
            let target = node
                .child_by_field_name("left")
                .map(|l| lower_expr(l, src))
                .unwrap_or(Expr::Other);
            let value = node
                .child_by_field_name("right")
                .map(|r| lower_expr(r, src))
                .unwrap_or(Expr::Other);
            Expr::Assign {
                target: Box::new(target),
                value: Box::new(value),
            }
        }
        "binary_expression" => {
            let left = node
                .child_by_field_name("left")
                .map(|l| lower_expr(l, src))
                .unwrap_or(Expr::Other);
            let op = node
                .child_by_field_name("operator")
                .map(|o| text(o, src))
                .unwrap_or_default();
            let right = node
                .child_by_field_name("right")
                .map(|r| lower_expr(r, src))
                .unwrap_or(Expr::Other);
            Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
            }
        }
        "unary_expression" | "update_expression" => {
            let op = node
                .child_by_field_name("operator")
                .map(|o| text(o, src))
                .unwrap_or_default();
            let operand = node
                .child_by_field_name("operand")
                .or_else(|| node.named_child(0))
                .map(|o| lower_expr(o, src))
                .unwrap_or(Expr::Other);
            Expr::Unary {
                op,
                operand: Box::new(operand),
            }
        }
        "ternary_expression" => {
            let cond = node
                .child_by_field_name("condition")
                .map(|c| lower_expr(c, src))
                .unwrap_or(Expr::Other);
            let then_branch = node
                .child_by_field_name("consequence")
                .map(|c| lower_expr(c, src))
                .unwrap_or(Expr::Other);
            let else_branch = node
                .child_by_field_name("alternative")
                .map(|a| lower_expr(a, src))
                .unwrap_or(Expr::Other);
            Expr::Conditional {
                cond: Box::new(cond),
                then_branch: Box::new(then_branch),
                else_branch: Box::new(else_branch),
            }
        }
        "cast_expression" => {
            let type_name = node
                .child_by_field_name("type")
                .map(|t| text(t, src))
                .unwrap_or_default();
            let inner = node
                .child_by_field_name("value")
                .map(|v| lower_expr(v, src))
                .unwrap_or(Expr::Other);
            Expr::Cast {
                type_name,
                inner: Box::new(inner),
            }
        }
        "parenthesized_expression" => {
            let inner = node
                .named_child(0)
                .map(|i| lower_expr(i, src))
                .unwrap_or(Expr::Other);
            Expr::Paren(Box::new(inner))
        }
        "array_initializer" => {
            let mut items = Vec::new();
            let mut cursor = node.walk();
            for child in node.named_children(&mut cursor) {
                items.push(lower_expr(child, src));
            }
            Expr::ArrayInit(items)
        }
        "array_creation_expression" => {
            let type_name = node
                .child_by_field_name("type")
                .map(|t| text(t, src))
                .unwrap_or_default();
            let init = node
                .child_by_field_name("value")
                .map(|v| match lower_expr(v, src) {
                    Expr::ArrayInit(items) => items,
                    other => vec![other],
                })
                .unwrap_or_default();
            Expr::ArrayNew { type_name, init }
        }
        "array_access" => {
            let array = node
                .child_by_field_name("array")
                .map(|a| lower_expr(a, src))
                .unwrap_or(Expr::Other);
            let index = node
                .child_by_field_name("index")
                .map(|i| lower_expr(i, src))
                .unwrap_or(Expr::Other);
            Expr::ArrayAccess {
                array: Box::new(array),
                index: Box::new(index),
            }
        }
        "lambda_expression" => {
            let body = match node.child_by_field_name("body") {
                Some(b) if b.kind() == "block" => LambdaBody::Block(lower_block(b, src)),
                Some(b) => LambdaBody::Expr(Box::new(lower_expr(b, src))),
                None => LambdaBody::Block(Vec::new()),
            };
            Expr::Lambda(body)
        }
        _ => Expr::Other,
    }
}

fn lower_args(node: Node, src: &[u8]) -> Vec<Expr> {
    let mut args = Vec::new();
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        args.push(lower_expr(child, src));
    }
    args
}

/// The contents of a string literal with the surrounding quotes removed.
fn string_contents(node: Node, src: &[u8]) -> String {
    let raw = text(node, src);
    raw.strip_prefix('"')
        .and_then(|r| r.strip_suffix('"'))
        .map(str::to_string)
        .unwrap_or(raw)
}
