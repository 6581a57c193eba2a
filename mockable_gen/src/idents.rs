// vim: tw=80
//! Names that generated code shares with the `Mocker` engine.
//!
//! These must match the engine crate exactly.

use proc_macro2::Span;
use quote::format_ident;
use syn::{Ident, Path, parse_quote};

use crate::options::Options;

pub(crate) struct EngineIdents {
    /// Path of the engine crate, eg `::mockable`
    pub engine: Path,

    /// "Mocker": both the engine type and the alias the mock declares for it
    pub mocker: Ident,

    /// "mocker": the engine field on the mock and on every builder
    pub mocker_field: Ident,

    /// "Member": the member identity enum
    pub member: Ident,

    /// "reset"
    pub reset: Ident,

    /// "scopes": the label of reset's only parameter
    pub scopes: Ident,

    /// "policy": the default initializer's parameter and the engine's field
    pub policy: Ident,

    /// "new": the default initializer
    pub new: Ident,
}

impl EngineIdents {
    pub fn new(options: &Options) -> Self {
        let span = Span::call_site();
        Self {
            engine: options.engine.clone(),
            mocker: Ident::new("Mocker", span),
            mocker_field: Ident::new("mocker", span),
            member: Ident::new("Member", span),
            reset: Ident::new("reset", span),
            scopes: Ident::new("scopes", span),
            policy: Ident::new("policy", span),
            new: Ident::new("new", span),
        }
    }

    /// Path to an item exported by the engine crate
    pub fn engine_item(&self, name: &str) -> Path {
        let engine = &self.engine;
        let ident = format_ident!("{}", name);
        parse_quote!(#engine::#ident)
    }
}
