// vim: tw=80
//! The generated declaration tree.
//!
//! This is what generation hands to the back-end.  Every list is in a fixed,
//! source-derived order.

use syn::{
    Attribute,
    Block,
    Expr,
    Generics,
    Ident,
    Path,
    Signature,
    Type,
    Visibility
};

use crate::{builder_kind::BuilderKind, modifiers::Modifiers};

/// `type Mocker = ::mockable::Mocker<MockFoo>;`
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TypeAlias {
    pub ident: Ident,
    pub ty: Type,
}

/// A stored field
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Field {
    pub modifiers: Modifiers,
    pub ident: Ident,
    pub ty: Type,
    /// Expression the field is constructed with, if it has a default
    pub init: Option<Expr>,
}

/// A computed property
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Property {
    pub attrs: Vec<Attribute>,
    pub modifiers: Modifiers,
    pub ident: Ident,
    pub ty: Type,
    pub getter: Block,
    /// Body of the setter.  The new value is bound to `value`.
    pub setter: Option<Block>,
    /// If set, only the engine may use this property
    pub unavailable: Option<Unavailable>,
}

/// Keeps a property out of reach of everything but the engine
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Unavailable {
    /// Shown to anyone who reaches for the property directly
    pub message: String,
    /// A type that only the engine can construct.  The lowered accessors
    /// demand a value of it, so any other caller fails to compile.
    pub token: Type,
}

/// A function or initializer with a body
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FnDecl {
    pub attrs: Vec<Attribute>,
    pub modifiers: Modifiers,
    pub sig: Signature,
    /// Default values for some of the parameters, by parameter name
    pub defaults: Vec<(Ident, Expr)>,
    pub body: Block,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Decl {
    TypeAlias(TypeAlias),
    Field(Field),
    Property(Property),
    Function(FnDecl),
    Initializer(FnDecl),
}

impl Decl {
    pub fn ident(&self) -> &Ident {
        match self {
            Decl::TypeAlias(alias) => &alias.ident,
            Decl::Field(field) => &field.ident,
            Decl::Property(prop) => &prop.ident,
            Decl::Function(f) | Decl::Initializer(f) => &f.sig.ident,
        }
    }

    /// The declaration's qualifiers.  A type alias has none.
    pub fn modifiers(&self) -> Option<&Modifiers> {
        match self {
            Decl::TypeAlias(_) => None,
            Decl::Field(field) => Some(&field.modifiers),
            Decl::Property(prop) => Some(&prop.modifiers),
            Decl::Function(f) | Decl::Initializer(f) => Some(&f.modifiers),
        }
    }
}

/// One generated builder type
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuilderDecl {
    pub kind: BuilderKind,
    pub vis: Visibility,
    pub ident: Ident,
    /// The engine's `Builder` capability marker
    pub marker: Path,
    /// Carries the lifetime of the borrowed engine
    pub generics: Generics,
    /// The engine reference field, the initializer, then one accessor per
    /// variable and function
    pub members: Vec<Decl>,
}

impl BuilderDecl {
    /// Per-member accessors, in source order.  Empty if `members` lacks the
    /// engine reference and initializer.
    pub fn accessors(&self) -> &[Decl] {
        self.members.get(2..).unwrap_or(&[])
    }
}

/// One case of the member identity enum
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MemberVariant {
    pub ident: Ident,
    /// Types of the recorded parameters, already wrapped in `Parameter`
    pub fields: Vec<Type>,
}

/// Identifies each member to the engine, along with its recorded arguments
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MemberEnum {
    pub vis: Visibility,
    pub ident: Ident,
    /// The engine trait that compares recorded calls against expectations
    pub matchable: Path,
    pub variants: Vec<MemberVariant>,
}

/// Everything generated for one interface
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedModule {
    /// Name of the mocked interface
    pub interface: Ident,
    /// The mock type itself
    pub mock_type: Type,
    /// The mock type's name, for declaring it
    pub mock_ident: Ident,
    /// The engine trait that ties the mock to its member enum and builders
    pub service: Path,
    pub vis: Visibility,
    /// Members of the mock type: the engine plumbing first, then the
    /// interface conformances
    pub mock_members: Vec<Decl>,
    /// Exactly one builder per [`BuilderKind`]
    pub builders: Vec<BuilderDecl>,
    pub member_enum: MemberEnum,
    /// How many of `mock_members` are engine plumbing rather than
    /// conformances
    pub(crate) plumbing_len: usize,
}

impl GeneratedModule {
    /// Members that exist only to serve the engine and the builders
    pub fn plumbing(&self) -> &[Decl] {
        let len = self.plumbing_len.min(self.mock_members.len());
        &self.mock_members[..len]
    }

    /// Members that implement the interface
    pub fn conformances(&self) -> &[Decl] {
        self.mock_members.get(self.plumbing_len..).unwrap_or(&[])
    }

    pub fn builder(&self, kind: BuilderKind) -> Option<&BuilderDecl> {
        self.builders.iter().find(|b| b.kind == kind)
    }
}
