// vim: tw=80
//! The normalized description of one interface to be mocked.
//!
//! A front-end builds one [`Requirements`] per interface.  Generation only
//! ever reads it.

use syn::{
    Attribute,
    Ident,
    Signature,
    TraitItemFn,
    Type,
    parse::{Parse, ParseStream}
};

use crate::{
    attributes::{self, Markers},
    gen_mock_ident,
    modifiers::Modifiers
};

/// A method requirement
#[derive(Clone, Debug)]
pub struct Function {
    pub attrs: Vec<Attribute>,
    pub sig: Signature,
    pub(crate) markers: Markers,
}

impl Function {
    pub fn new(attrs: Vec<Attribute>, sig: Signature) -> Self {
        let markers = Markers::from_attrs(&attrs);
        Function{attrs, sig, markers}
    }

    pub fn markers(&self) -> Markers {
        self.markers
    }
}

impl From<TraitItemFn> for Function {
    fn from(item: TraitItemFn) -> Self {
        Function::new(item.attrs, item.sig)
    }
}

/// Parses a trait method declaration, eg `fn len(&self) -> usize;`
impl Parse for Function {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        input.parse::<TraitItemFn>().map(Function::from)
    }
}

/// A property requirement, either get-only or get/set
#[derive(Clone, Debug)]
pub struct Variable {
    pub attrs: Vec<Attribute>,
    pub ident: Ident,
    pub ty: Type,
    pub mutable: bool,
    pub(crate) markers: Markers,
}

impl Variable {
    pub fn new(attrs: Vec<Attribute>, ident: Ident, ty: Type, mutable: bool)
        -> Self
    {
        let markers = Markers::from_attrs(&attrs);
        Variable{attrs, ident, ty, mutable, markers}
    }

    pub fn markers(&self) -> Markers {
        self.markers
    }
}

/// A constructor requirement.
///
/// Its signature takes no receiver and returns `Self`, `Option<Self>` or
/// `Result<Self, E>`.
#[derive(Clone, Debug)]
pub struct Initializer {
    pub attrs: Vec<Attribute>,
    pub sig: Signature,
    pub(crate) markers: Markers,
}

impl Initializer {
    pub fn new(attrs: Vec<Attribute>, sig: Signature) -> Self {
        let markers = Markers::from_attrs(&attrs);
        Initializer{attrs, sig, markers}
    }

    pub fn markers(&self) -> Markers {
        self.markers
    }
}

impl From<TraitItemFn> for Initializer {
    fn from(item: TraitItemFn) -> Self {
        Initializer::new(item.attrs, item.sig)
    }
}

impl Parse for Initializer {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        input.parse::<TraitItemFn>().map(Initializer::from)
    }
}

#[derive(Clone, Debug)]
pub struct Requirements {
    /// Name of the interface being mocked
    pub name: Ident,
    /// The concrete mock type, as it appears in the engine's generic
    /// instantiation
    pub mock_type: Type,
    /// Qualifiers copied onto generated declarations by default
    pub modifiers: Modifiers,
    /// The interface demands single-threaded confinement
    pub is_actor: bool,
    /// Some member is individually exempt from the interface's confinement
    pub has_isolation_exempt_members: bool,
    /// The interface is confined to a named global execution domain
    pub has_global_isolation_attribute: bool,
    pub functions: Vec<Function>,
    pub variables: Vec<Variable>,
    pub initializers: Vec<Initializer>,
}

impl Requirements {
    /// Requirements for an empty interface, mocked by `Mock<name>`
    pub fn new(name: Ident) -> Self {
        let mock_ident = gen_mock_ident(&name);
        Requirements {
            mock_type: Type::Path(syn::TypePath {
                qself: None,
                path: mock_ident.into()
            }),
            name,
            modifiers: Modifiers::new(),
            is_actor: false,
            has_isolation_exempt_members: false,
            has_global_isolation_attribute: false,
            functions: Vec::new(),
            variables: Vec::new(),
            initializers: Vec::new(),
        }
    }

    pub fn mock_type(mut self, ty: Type) -> Self {
        self.mock_type = ty;
        self
    }

    pub fn modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn actor(mut self, is_actor: bool) -> Self {
        self.is_actor = is_actor;
        self
    }

    /// Record the interface's own attributes.  Only global-domain attributes
    /// matter.
    pub fn attrs(mut self, attrs: &[Attribute]) -> Self {
        self.has_global_isolation_attribute |= attrs.iter()
            .any(attributes::is_global_domain);
        self
    }

    pub fn function(mut self, function: Function) -> Self {
        self.has_isolation_exempt_members |= function.markers.exempt;
        self.functions.push(function);
        self
    }

    pub fn variable(mut self, variable: Variable) -> Self {
        self.has_isolation_exempt_members |= variable.markers.exempt;
        self.variables.push(variable);
        self
    }

    pub fn initializer(mut self, initializer: Initializer) -> Self {
        self.has_isolation_exempt_members |= initializer.markers.exempt;
        self.initializers.push(initializer);
        self
    }
}
