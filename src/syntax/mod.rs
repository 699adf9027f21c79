//! Syntax model consumed by the smell analyzers.
//!
//! This is the data contract between the parsing front end and the
//! detection engine: a compilation unit exposing type declarations with
//! their members, and statement/expression nodes as plain enums matched
//! explicitly by each analyzer. The model is deliberately smaller than
//! the full Java grammar; constructs no analyzer inspects lower to
//! `Stmt::Other` / `Expr::Other`.

pub mod visit;

/// A parsed source file.
#[derive(Debug, Clone, PartialEq)]
pub struct CompilationUnit {
    pub types: Vec<TypeDecl>,
}

impl CompilationUnit {
    /// The first type declared in the file, by convention the one the
    /// file is named after.
    pub fn primary_type(&self) -> Option<&TypeDecl> {
        self.types.first()
    }

    /// All method declarations across every type in the file.
    pub fn methods(&self) -> impl Iterator<Item = &MethodDecl> {
        self.types.iter().flat_map(|t| t.methods.iter())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
}

/// A declared annotation: its name without the `@`, and the raw
/// argument text when it carries arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    pub name: String,
    pub args: Option<String>,
}

impl Marker {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: None,
        }
    }
}

/// A class, interface or enum declaration with its members.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub name: String,
    pub kind: TypeKind,
    pub markers: Vec<Marker>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
    pub constructors: Vec<ConstructorDecl>,
}

impl TypeDecl {
    pub fn has_marker(&self, marker: &str) -> bool {
        self.markers.iter().any(|m| m.name == marker)
    }

    /// Names of every field declared on this type.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .flat_map(|f| f.declarators.iter())
            .map(|d| d.name.as_str())
    }
}

/// A field declaration; one statement may declare several variables.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub type_name: String,
    pub declarators: Vec<VarDeclarator>,
}

/// A single declared variable with its optional initializer.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclarator {
    pub name: String,
    pub type_name: String,
    pub init: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub type_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    PackagePrivate,
    Private,
}

/// A method declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub name: String,
    pub markers: Vec<Marker>,
    pub visibility: Visibility,
    pub params: Vec<Param>,
    pub return_type: String,
    /// `None` for abstract/interface methods
    pub body: Option<Vec<Stmt>>,
    /// 1-indexed source lines of the declaration
    pub line: usize,
    pub end_line: usize,
}

impl MethodDecl {
    pub fn has_marker(&self, marker: &str) -> bool {
        self.markers.iter().any(|m| m.name == marker)
    }

    /// True when the annotation is present and its argument text
    /// mentions `key` (e.g. `@Test(expected = ...)`).
    pub fn marker_arg_contains(&self, marker: &str, key: &str) -> bool {
        self.markers.iter().any(|m| {
            m.name == marker && m.args.as_deref().is_some_and(|a| a.contains(key))
        })
    }

    pub fn is_public(&self) -> bool {
        self.visibility == Visibility::Public
    }

    /// Number of source lines the declaration spans.
    pub fn line_span(&self) -> usize {
        self.end_line.saturating_sub(self.line) + 1
    }

    pub fn body_stmts(&self) -> &[Stmt] {
        self.body.as_deref().unwrap_or(&[])
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstructorDecl {
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub param_type: String,
    pub body: Vec<Stmt>,
}

/// Statement kinds the analyzers distinguish.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr(Expr),
    LocalVar(Vec<VarDeclarator>),
    If {
        cond: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Option<Vec<Stmt>>,
    },
    For {
        /// init/condition/update expressions, in source order
        header: Vec<Expr>,
        body: Vec<Stmt>,
    },
    ForEach {
        var: VarDeclarator,
        iterable: Expr,
        body: Vec<Stmt>,
    },
    While {
        cond: Expr,
        body: Vec<Stmt>,
    },
    DoWhile {
        cond: Expr,
        body: Vec<Stmt>,
    },
    Switch {
        selector: Expr,
        arms: Vec<Vec<Stmt>>,
    },
    Try {
        body: Vec<Stmt>,
        catches: Vec<CatchClause>,
        finally_block: Option<Vec<Stmt>>,
    },
    Throw(Expr),
    Return(Option<Expr>),
    Block(Vec<Stmt>),
    Other,
}

/// Literal kinds, carrying the raw source text where the exact spelling
/// matters (numeric suffixes, escape sequences).
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(String),
    Long(String),
    Float(String),
    Bool(bool),
    Char(String),
    Str(String),
    Null,
}

impl Literal {
    pub fn is_numeric(&self) -> bool {
        matches!(self, Literal::Int(_) | Literal::Long(_) | Literal::Float(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Literal::Str(_))
    }
}

/// Expression kinds the analyzers distinguish.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Literal),
    Name(String),
    This,
    FieldAccess {
        scope: Box<Expr>,
        name: String,
    },
    MethodCall {
        scope: Option<Box<Expr>>,
        name: String,
        args: Vec<Expr>,
    },
    New {
        type_name: String,
        args: Vec<Expr>,
    },
    Assign {
        target: Box<Expr>,
        value: Box<Expr>,
    },
    Binary {
        op: String,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: String,
        operand: Box<Expr>,
    },
    Conditional {
        cond: Box<Expr>,
        then_branch: Box<Expr>,
        else_branch: Box<Expr>,
    },
    Cast {
        type_name: String,
        inner: Box<Expr>,
    },
    Paren(Box<Expr>),
    ArrayInit(Vec<Expr>),
    ArrayNew {
        type_name: String,
        init: Vec<Expr>,
    },
    ArrayAccess {
        array: Box<Expr>,
        index: Box<Expr>,
    },
    Lambda(LambdaBody),
    Other,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LambdaBody {
    Expr(Box<Expr>),
    Block(Vec<Stmt>),
}

impl Expr {
    /// Strip parentheses and casts.
    pub fn unwrapped(&self) -> &Expr {
        let mut e = self;
        loop {
            match e {
                Expr::Paren(inner) => e = inner,
                Expr::Cast { inner, .. } => e = inner,
                _ => return e,
            }
        }
    }

    /// The simple name this expression refers to, treating `this.x` as
    /// `x`. Parentheses and casts are stripped first.
    pub fn as_simple_name(&self) -> Option<&str> {
        match self.unwrapped() {
            Expr::Name(n) => Some(n),
            Expr::FieldAccess { scope, name } if matches!(scope.unwrapped(), Expr::This) => {
                Some(name)
            }
            _ => None,
        }
    }
}
