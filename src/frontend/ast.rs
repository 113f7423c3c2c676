//! Declaration trees, statements, and expressions produced by the front-end.
//!
//! The shapes here are the complete input contract: plain serde-friendly data
//! with optional bindings. Statement and expression kinds are closed sum
//! types, so downstream passes dispatch with pattern matches instead of
//! runtime kind checks.

use serde::{Deserialize, Serialize};

use super::span::SourceSpan;

/// Declaration modifier bits, in the source language's encoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers(pub u32);

impl Modifiers {
    /// No modifiers.
    pub const NONE: Modifiers = Modifiers(0);
    /// `public`
    pub const PUBLIC: Modifiers = Modifiers(0x0001);
    /// `private`
    pub const PRIVATE: Modifiers = Modifiers(0x0002);
    /// `protected`
    pub const PROTECTED: Modifiers = Modifiers(0x0004);
    /// `static`
    pub const STATIC: Modifiers = Modifiers(0x0008);
    /// `final`
    pub const FINAL: Modifiers = Modifiers(0x0010);
    /// `abstract`
    pub const ABSTRACT: Modifiers = Modifiers(0x0400);

    /// True if every bit of `other` is set in `self`.
    pub fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether the `public` bit is set.
    pub fn is_public(self) -> bool {
        self.contains(Self::PUBLIC)
    }

    /// Whether the `private` bit is set.
    pub fn is_private(self) -> bool {
        self.contains(Self::PRIVATE)
    }

    /// Whether the `static` bit is set.
    pub fn is_static(self) -> bool {
        self.contains(Self::STATIC)
    }

    /// Whether the `abstract` bit is set.
    pub fn is_abstract(self) -> bool {
        self.contains(Self::ABSTRACT)
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

/// One parsed source file, with its declarations and raw text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompilationUnit {
    /// Path of the source file, relative to the project root
    pub path: String,
    /// Raw source text, retained for display collaborators
    pub source: String,
    /// Package declaration; `None` maps to the synthetic default package
    pub package: Option<PackageDecl>,
    /// Top-level type declarations
    pub types: Vec<TypeDecl>,
    /// Set by the front-end when the file failed to parse; such units are
    /// excluded from the model
    pub parse_failed: bool,
}

impl CompilationUnit {
    /// Create an empty unit for the given path.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    /// Set the raw source text.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Set the package declaration.
    pub fn with_package(mut self, name: impl Into<String>) -> Self {
        self.package = Some(PackageDecl {
            name: name.into(),
            span: None,
        });
        self
    }

    /// Append a top-level type declaration.
    pub fn with_type(mut self, decl: TypeDecl) -> Self {
        self.types.push(decl);
        self
    }

    /// Mark the unit as failed to parse.
    pub fn failed(mut self) -> Self {
        self.parse_failed = true;
        self
    }
}

/// A package declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageDecl {
    /// Dotted package name
    pub name: String,
    /// Span of the declaration
    pub span: Option<SourceSpan>,
}

/// Kind of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    /// A concrete or abstract class
    Class,
    /// An interface
    Interface,
    /// An enumeration
    Enum,
}

/// Resolved binding of a type declaration or reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeBinding {
    /// Fully-qualified name of the type
    pub qualified_name: String,
}

/// A syntactic reference to a type, optionally resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeRef {
    /// Name as written in source
    pub name: String,
    /// Resolved binding, when the front-end could produce one
    pub binding: Option<TypeBinding>,
}

impl TypeRef {
    /// An unresolved reference.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            binding: None,
        }
    }

    /// A resolved reference carrying the target's fully-qualified name.
    pub fn resolved(name: impl Into<String>, qualified_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            binding: Some(TypeBinding {
                qualified_name: qualified_name.into(),
            }),
        }
    }
}

/// A class, interface, or enum declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDecl {
    /// Simple name; empty for anonymous classes
    pub name: String,
    /// Declaration kind
    pub kind: TypeKind,
    /// Resolved binding of the declaration itself
    pub binding: Option<TypeBinding>,
    /// Modifier bits
    pub modifiers: Modifiers,
    /// Source span of the declaration
    pub span: Option<SourceSpan>,
    /// Extends clause
    pub super_class: Option<TypeRef>,
    /// Implements (or interface extends) clause
    pub interfaces: Vec<TypeRef>,
    /// Member declarations in source order
    pub members: Vec<MemberDecl>,
}

impl TypeDecl {
    /// Create a declaration with the given simple name and kind.
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            binding: None,
            modifiers: Modifiers::NONE,
            span: None,
            super_class: None,
            interfaces: Vec::new(),
            members: Vec::new(),
        }
    }

    /// Set the resolved fully-qualified name.
    pub fn with_binding(mut self, qualified_name: impl Into<String>) -> Self {
        self.binding = Some(TypeBinding {
            qualified_name: qualified_name.into(),
        });
        self
    }

    /// Set the modifier bits.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the source span.
    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = Some(span);
        self
    }

    /// Set the extends clause.
    pub fn with_super_class(mut self, super_class: TypeRef) -> Self {
        self.super_class = Some(super_class);
        self
    }

    /// Append to the implements clause.
    pub fn with_interface(mut self, interface: TypeRef) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Append a member declaration.
    pub fn with_member(mut self, member: MemberDecl) -> Self {
        self.members.push(member);
        self
    }

    /// Append a field member.
    pub fn with_field(self, field: FieldDecl) -> Self {
        self.with_member(MemberDecl::Field(field))
    }

    /// Append a method member.
    pub fn with_method(self, method: MethodDecl) -> Self {
        self.with_member(MemberDecl::Method(method))
    }
}

/// A member of a type declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MemberDecl {
    /// A field or enum constant
    Field(FieldDecl),
    /// A method or constructor
    Method(MethodDecl),
    /// An instance or static initializer block
    Initializer(InitializerDecl),
    /// A nested type
    Type(TypeDecl),
}

/// Resolved binding of a field declaration or access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBinding {
    /// Fully-qualified name of the declaring class
    pub declaring_class: String,
    /// Field name
    pub name: String,
}

/// A field or enum-constant declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldDecl {
    /// Field name
    pub name: String,
    /// Declared type
    pub type_ref: Option<TypeRef>,
    /// Resolved binding of the declaration
    pub binding: Option<FieldBinding>,
    /// Modifier bits
    pub modifiers: Modifiers,
    /// True for enum constants
    pub is_enum_constant: bool,
    /// Initializer expression
    pub initializer: Option<Expr>,
    /// Source span
    pub span: Option<SourceSpan>,
}

impl FieldDecl {
    /// Create a field declaration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_ref: None,
            binding: None,
            modifiers: Modifiers::NONE,
            is_enum_constant: false,
            initializer: None,
            span: None,
        }
    }

    /// Create an enum-constant declaration.
    pub fn enum_constant(name: impl Into<String>) -> Self {
        let mut field = Self::new(name);
        field.is_enum_constant = true;
        field
    }

    /// Set the declared type.
    pub fn with_type(mut self, type_ref: TypeRef) -> Self {
        self.type_ref = Some(type_ref);
        self
    }

    /// Set the resolved binding.
    pub fn with_binding(mut self, declaring_class: impl Into<String>) -> Self {
        self.binding = Some(FieldBinding {
            declaring_class: declaring_class.into(),
            name: self.name.clone(),
        });
        self
    }

    /// Set the modifier bits.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Set the initializer expression.
    pub fn with_initializer(mut self, initializer: Expr) -> Self {
        self.initializer = Some(initializer);
        self
    }

    /// Set the source span.
    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = Some(span);
        self
    }
}

/// Kind of a method-like member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    /// An ordinary method
    Method,
    /// A constructor
    Constructor,
    /// An initializer block
    Initializer,
}

/// Resolved binding of a method declaration or invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodBinding {
    /// Fully-qualified name of the declaring class
    pub declaring_class: String,
    /// Method name
    pub name: String,
    /// Fully-qualified parameter type names, in order
    pub parameter_types: Vec<String>,
    /// Fully-qualified return type name
    pub return_type: Option<String>,
    /// True when the target is a constructor
    #[serde(default)]
    pub constructor: bool,
}

/// A method or constructor declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodDecl {
    /// Method name; for constructors, the type's simple name
    pub name: String,
    /// Declaration kind
    pub kind: MethodKind,
    /// Resolved binding of the declaration
    pub binding: Option<MethodBinding>,
    /// Modifier bits
    pub modifiers: Modifiers,
    /// Parameter declarations in order
    pub parameters: Vec<ParameterDecl>,
    /// Declared return type; `None` for constructors and `void`
    pub return_type: Option<TypeRef>,
    /// Declared thrown types
    pub thrown: Vec<TypeRef>,
    /// Body; `None` for abstract and interface methods
    pub body: Option<Block>,
    /// Source span
    pub span: Option<SourceSpan>,
}

impl MethodDecl {
    /// Create a method declaration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: MethodKind::Method,
            binding: None,
            modifiers: Modifiers::NONE,
            parameters: Vec::new(),
            return_type: None,
            thrown: Vec::new(),
            body: None,
            span: None,
        }
    }

    /// Create a constructor declaration.
    pub fn constructor(name: impl Into<String>) -> Self {
        let mut method = Self::new(name);
        method.kind = MethodKind::Constructor;
        method
    }

    /// Set the resolved binding from declaring class and parameter types.
    pub fn with_binding(
        mut self,
        declaring_class: impl Into<String>,
        parameter_types: Vec<String>,
    ) -> Self {
        self.binding = Some(MethodBinding {
            declaring_class: declaring_class.into(),
            name: self.name.clone(),
            parameter_types,
            return_type: None,
            constructor: self.kind == MethodKind::Constructor,
        });
        self
    }

    /// Set the modifier bits.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Append a parameter.
    pub fn with_parameter(mut self, parameter: ParameterDecl) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Set the declared return type.
    pub fn with_return_type(mut self, type_ref: TypeRef) -> Self {
        self.return_type = Some(type_ref);
        self
    }

    /// Append a thrown type.
    pub fn with_thrown(mut self, type_ref: TypeRef) -> Self {
        self.thrown.push(type_ref);
        self
    }

    /// Set the body.
    pub fn with_body(mut self, body: Block) -> Self {
        self.body = Some(body);
        self
    }

    /// Set the source span.
    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = Some(span);
        self
    }
}

/// A formal parameter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParameterDecl {
    /// Parameter name
    pub name: String,
    /// Declared type
    pub type_ref: Option<TypeRef>,
    /// Modifier bits
    pub modifiers: Modifiers,
}

impl ParameterDecl {
    /// Create a parameter with a resolved type.
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref: Some(type_ref),
            modifiers: Modifiers::NONE,
        }
    }
}

/// An instance or static initializer block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitializerDecl {
    /// Modifier bits (`static` for static initializers)
    pub modifiers: Modifiers,
    /// The block body
    pub body: Block,
    /// Source span
    pub span: Option<SourceSpan>,
}

/// A braced statement sequence.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Block {
    /// Statements in source order
    pub statements: Vec<Statement>,
}

impl Block {
    /// Create a block from statements.
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

/// Resolved binding of a local-variable access.
///
/// Locals are identified inside their declaring method by name plus a numeric
/// disambiguator the front-end assigns to shadowing re-declarations.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LocalBinding {
    /// Variable name
    pub name: String,
    /// Disambiguator among same-named locals of the method
    pub occurrence: u32,
}

/// A single declared local variable (one fragment of a declaration).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalVariable {
    /// Variable name
    pub name: String,
    /// Declared type
    pub type_ref: Option<TypeRef>,
    /// Modifier bits
    pub modifiers: Modifiers,
    /// Resolved binding of the declaration
    pub binding: Option<LocalBinding>,
    /// Initializer expression
    pub initializer: Option<Expr>,
}

impl LocalVariable {
    /// Create a local variable with a binding at the given occurrence.
    pub fn new(name: impl Into<String>, occurrence: u32) -> Self {
        let name = name.into();
        Self {
            binding: Some(LocalBinding {
                name: name.clone(),
                occurrence,
            }),
            name,
            type_ref: None,
            modifiers: Modifiers::NONE,
            initializer: None,
        }
    }

    /// Set the declared type.
    pub fn with_type(mut self, type_ref: TypeRef) -> Self {
        self.type_ref = Some(type_ref);
        self
    }

    /// Set the initializer expression.
    pub fn with_initializer(mut self, initializer: Expr) -> Self {
        self.initializer = Some(initializer);
        self
    }
}

/// One `case` (or `default`) group of a switch statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwitchCase {
    /// Case label expression; `None` for `default`
    pub label: Option<Expr>,
    /// Statements of the group
    pub statements: Vec<Statement>,
}

/// A catch clause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatchClause {
    /// The caught-exception parameter
    pub parameter: LocalVariable,
    /// Handler body
    pub body: Block,
}

/// An executable statement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Statement {
    /// A nested block
    Block(Block),
    /// `if` / `else`
    If {
        /// Condition expression
        condition: Expr,
        /// Then branch
        then_branch: Box<Statement>,
        /// Else branch
        else_branch: Option<Box<Statement>>,
    },
    /// `while` loop
    While {
        /// Condition expression
        condition: Expr,
        /// Loop body
        body: Box<Statement>,
    },
    /// `do` / `while` loop
    DoWhile {
        /// Loop body
        body: Box<Statement>,
        /// Condition expression
        condition: Expr,
    },
    /// Classic `for` loop
    For {
        /// Initializer statements
        init: Vec<Statement>,
        /// Condition expression
        condition: Option<Expr>,
        /// Update expressions
        update: Vec<Expr>,
        /// Loop body
        body: Box<Statement>,
    },
    /// Enhanced `for` loop
    ForEach {
        /// Loop variable
        variable: LocalVariable,
        /// Iterated expression
        iterable: Expr,
        /// Loop body
        body: Box<Statement>,
    },
    /// `switch` statement
    Switch {
        /// Selector expression
        selector: Expr,
        /// Case groups
        cases: Vec<SwitchCase>,
    },
    /// `try` / `catch` / `finally`
    Try {
        /// Protected block
        body: Block,
        /// Catch clauses
        catches: Vec<CatchClause>,
        /// Finally block
        finally_block: Option<Block>,
    },
    /// `return`
    Return(Option<Expr>),
    /// `throw`
    Throw(Expr),
    /// `break`
    Break,
    /// `continue`
    Continue,
    /// `synchronized` block
    Synchronized {
        /// Lock expression
        lock: Expr,
        /// Protected block
        body: Block,
    },
    /// Local variable declaration (possibly multiple fragments)
    LocalDecl {
        /// Declared fragments
        variables: Vec<LocalVariable>,
    },
    /// A local (method-scoped) type declaration
    LocalType(TypeDecl),
    /// An expression statement
    Expression(Expr),
    /// The empty statement
    Empty,
}

impl Statement {
    /// Statements nested directly inside this one, looking through the block
    /// structure of branches and clauses. Bodies of local type declarations
    /// are *not* descended into; they belong to their own entity.
    pub fn child_statements(&self) -> Vec<&Statement> {
        match self {
            Statement::Block(block) => block.statements.iter().collect(),
            Statement::If {
                then_branch,
                else_branch,
                ..
            } => {
                let mut children = vec![then_branch.as_ref()];
                if let Some(else_branch) = else_branch {
                    children.push(else_branch.as_ref());
                }
                children
            }
            Statement::While { body, .. } | Statement::DoWhile { body, .. } => {
                vec![body.as_ref()]
            }
            Statement::For { init, body, .. } => {
                let mut children: Vec<&Statement> = init.iter().collect();
                children.push(body.as_ref());
                children
            }
            Statement::ForEach { body, .. } => vec![body.as_ref()],
            Statement::Switch { cases, .. } => cases
                .iter()
                .flat_map(|case| case.statements.iter())
                .collect(),
            Statement::Try {
                body,
                catches,
                finally_block,
            } => {
                let mut children: Vec<&Statement> = body.statements.iter().collect();
                for catch in catches {
                    children.extend(catch.body.statements.iter());
                }
                if let Some(finally_block) = finally_block {
                    children.extend(finally_block.statements.iter());
                }
                children
            }
            Statement::Synchronized { body, .. } => body.statements.iter().collect(),
            _ => Vec::new(),
        }
    }

    /// Expressions appearing directly in this statement (conditions, labels,
    /// initializers), excluding those nested in child statements.
    pub fn expressions(&self) -> Vec<&Expr> {
        match self {
            Statement::If { condition, .. }
            | Statement::While { condition, .. }
            | Statement::DoWhile { condition, .. } => vec![condition],
            Statement::For {
                condition, update, ..
            } => {
                let mut exprs: Vec<&Expr> = condition.iter().collect();
                exprs.extend(update.iter());
                exprs
            }
            Statement::ForEach {
                variable, iterable, ..
            } => {
                let mut exprs = vec![iterable];
                exprs.extend(variable.initializer.iter());
                exprs
            }
            Statement::Switch { selector, cases } => {
                let mut exprs = vec![selector];
                exprs.extend(cases.iter().filter_map(|case| case.label.as_ref()));
                exprs
            }
            Statement::Return(Some(expr))
            | Statement::Throw(expr)
            | Statement::Expression(expr)
            | Statement::Synchronized { lock: expr, .. } => vec![expr],
            Statement::LocalDecl { variables } => variables
                .iter()
                .filter_map(|variable| variable.initializer.as_ref())
                .collect(),
            _ => Vec::new(),
        }
    }
}

/// A method or constructor invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MethodCall {
    /// Invoked name as written
    pub name: String,
    /// Resolved binding of the target
    pub binding: Option<MethodBinding>,
    /// Receiver expression, when explicit
    pub receiver: Option<Box<Expr>>,
    /// Argument expressions
    pub arguments: Vec<Expr>,
}

impl MethodCall {
    /// An unresolved invocation.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            binding: None,
            receiver: None,
            arguments: Vec::new(),
        }
    }

    /// A resolved invocation of `declaring_class.name(parameter_types)`.
    pub fn resolved(
        name: impl Into<String>,
        declaring_class: impl Into<String>,
        parameter_types: Vec<String>,
    ) -> Self {
        let name = name.into();
        Self {
            binding: Some(MethodBinding {
                declaring_class: declaring_class.into(),
                name: name.clone(),
                parameter_types,
                return_type: None,
                constructor: false,
            }),
            name,
            receiver: None,
            arguments: Vec::new(),
        }
    }

    /// Set the receiver expression.
    pub fn with_receiver(mut self, receiver: Expr) -> Self {
        self.receiver = Some(Box::new(receiver));
        self
    }

    /// Append an argument expression.
    pub fn with_argument(mut self, argument: Expr) -> Self {
        self.arguments.push(argument);
        self
    }
}

/// Resolved binding of a variable access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariableBinding {
    /// The access targets a field
    Field(FieldBinding),
    /// The access targets a local or parameter of the enclosing method
    Local(LocalBinding),
}

/// A read or write of a named variable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariableAccess {
    /// Name as written
    pub name: String,
    /// Resolved binding
    pub binding: Option<VariableBinding>,
    /// Qualifying expression, when explicit (`receiver.name`)
    pub receiver: Option<Box<Expr>>,
}

impl VariableAccess {
    /// An unresolved access.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            binding: None,
            receiver: None,
        }
    }

    /// A resolved access of a field declared by `declaring_class`.
    pub fn field(name: impl Into<String>, declaring_class: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            binding: Some(VariableBinding::Field(FieldBinding {
                declaring_class: declaring_class.into(),
                name: name.clone(),
            })),
            name,
            receiver: None,
        }
    }

    /// A resolved access of a local at the given occurrence.
    pub fn local(name: impl Into<String>, occurrence: u32) -> Self {
        let name = name.into();
        Self {
            binding: Some(VariableBinding::Local(LocalBinding {
                name: name.clone(),
                occurrence,
            })),
            name,
            receiver: None,
        }
    }
}

/// An object creation (`new`), possibly with an anonymous class body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectCreation {
    /// Created type
    pub type_ref: Option<TypeRef>,
    /// Resolved constructor binding
    pub binding: Option<MethodBinding>,
    /// Argument expressions
    pub arguments: Vec<Expr>,
    /// Anonymous class body, when present
    pub anonymous_body: Option<Box<TypeDecl>>,
}

impl ObjectCreation {
    /// Create an instantiation of the given type.
    pub fn of(type_ref: TypeRef) -> Self {
        Self {
            type_ref: Some(type_ref),
            binding: None,
            arguments: Vec::new(),
            anonymous_body: None,
        }
    }

    /// Set the resolved constructor binding.
    pub fn with_binding(mut self, binding: MethodBinding) -> Self {
        self.binding = Some(binding);
        self
    }

    /// Attach an anonymous class body.
    pub fn with_anonymous_body(mut self, body: TypeDecl) -> Self {
        self.anonymous_body = Some(Box::new(body));
        self
    }
}

/// An expression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Expr {
    /// Method or constructor invocation
    Call(MethodCall),
    /// Object creation
    New(ObjectCreation),
    /// Variable read or write target
    VarAccess(VariableAccess),
    /// Assignment
    Assignment {
        /// Assigned-to expression
        target: Box<Expr>,
        /// Assigned value
        value: Box<Expr>,
    },
    /// Binary operation
    Binary {
        /// Left operand
        left: Box<Expr>,
        /// Operator token
        operator: String,
        /// Right operand
        right: Box<Expr>,
    },
    /// Unary operation
    Unary {
        /// Operator token
        operator: String,
        /// Operand
        operand: Box<Expr>,
    },
    /// Ternary conditional
    Conditional {
        /// Condition
        condition: Box<Expr>,
        /// Value when true
        then_value: Box<Expr>,
        /// Value when false
        else_value: Box<Expr>,
    },
    /// Type cast
    Cast {
        /// Target type
        type_ref: Option<TypeRef>,
        /// Operand
        operand: Box<Expr>,
    },
    /// Array element access
    ArrayAccess {
        /// Array expression
        array: Box<Expr>,
        /// Index expression
        index: Box<Expr>,
    },
    /// Literal token, kept as raw text
    Literal(String),
    /// The receiver reference (`this`)
    This,
}

impl Expr {
    /// Direct child expressions. Anonymous class bodies under [`Expr::New`]
    /// are not descended into; they belong to their own entity.
    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Expr::Call(call) => {
                let mut children: Vec<&Expr> =
                    call.receiver.iter().map(|expr| expr.as_ref()).collect();
                children.extend(call.arguments.iter());
                children
            }
            Expr::New(creation) => creation.arguments.iter().collect(),
            Expr::VarAccess(access) => {
                access.receiver.iter().map(|expr| expr.as_ref()).collect()
            }
            Expr::Assignment { target, value } => vec![target.as_ref(), value.as_ref()],
            Expr::Binary { left, right, .. } => vec![left.as_ref(), right.as_ref()],
            Expr::Unary { operand, .. } => vec![operand.as_ref()],
            Expr::Conditional {
                condition,
                then_value,
                else_value,
            } => vec![condition.as_ref(), then_value.as_ref(), else_value.as_ref()],
            Expr::Cast { operand, .. } => vec![operand.as_ref()],
            Expr::ArrayAccess { array, index } => vec![array.as_ref(), index.as_ref()],
            Expr::Literal(_) | Expr::This => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifier_bits() {
        let mods = Modifiers::PUBLIC | Modifiers::STATIC;
        assert!(mods.is_public());
        assert!(mods.is_static());
        assert!(!mods.is_private());
        assert!(mods.contains(Modifiers::PUBLIC));
        assert!(!mods.contains(Modifiers::ABSTRACT));
    }

    #[test]
    fn test_child_statements_look_through_blocks() {
        let stmt = Statement::Try {
            body: Block::new(vec![Statement::Empty, Statement::Break]),
            catches: vec![CatchClause {
                parameter: LocalVariable::new("e", 0),
                body: Block::new(vec![Statement::Continue]),
            }],
            finally_block: Some(Block::new(vec![Statement::Return(None)])),
        };
        assert_eq!(stmt.child_statements().len(), 4);
    }

    #[test]
    fn test_statement_expressions() {
        let stmt = Statement::For {
            init: vec![Statement::LocalDecl {
                variables: vec![
                    LocalVariable::new("i", 0).with_initializer(Expr::Literal("0".into()))
                ],
            }],
            condition: Some(Expr::Literal("true".into())),
            update: vec![Expr::Literal("i++".into())],
            body: Box::new(Statement::Empty),
        };
        // condition + update; the init's initializer belongs to the init statement
        assert_eq!(stmt.expressions().len(), 2);
        let init = &stmt.child_statements()[0];
        assert_eq!(init.expressions().len(), 1);
    }

    #[test]
    fn test_expr_children_skip_anonymous_bodies() {
        let creation = ObjectCreation::of(TypeRef::named("Runnable"))
            .with_anonymous_body(TypeDecl::new("", TypeKind::Class));
        let expr = Expr::New(creation);
        assert!(expr.children().is_empty());
    }

    #[test]
    fn test_unit_builder() {
        let unit = CompilationUnit::new("p/A.x")
            .with_package("p")
            .with_type(TypeDecl::new("A", TypeKind::Class).with_binding("p.A"));
        assert_eq!(unit.package.as_ref().unwrap().name, "p");
        assert_eq!(unit.types.len(), 1);
        assert!(!unit.parse_failed);
    }
}
