// vim: tw=80
//! Declaration qualifiers.
//!
//! A [`Modifiers`] value is an ordered set: insertion order is preserved, and
//! inserting a qualifier that is already present is a no-op.

use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{
    Attribute,
    Meta,
    Path,
    Visibility,
    parse::{Parse, ParseStream}
};

use crate::attributes::NONISOLATED;

/// A single qualifier on a generated declaration
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Modifier {
    /// `pub`, `pub(crate)`, etc.
    Visibility(Visibility),
    /// Permits invocation outside of the interface's isolation domain
    Nonisolated,
    /// Any other qualifier, carried through unchanged as an attribute
    Other(Path)
}

impl ToTokens for Modifier {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            Modifier::Visibility(vis) => vis.to_tokens(tokens),
            Modifier::Nonisolated => {
                let ident = quote::format_ident!("{}", NONISOLATED);
                quote!(#[#ident]).to_tokens(tokens)
            },
            Modifier::Other(path) => quote!(#[#path]).to_tokens(tokens)
        }
    }
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Modifiers(Vec<Modifier>);

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `modifier` unless it is already present.
    pub fn push(&mut self, modifier: Modifier) {
        if !self.0.contains(&modifier) {
            self.0.push(modifier);
        }
    }

    pub fn contains(&self, modifier: &Modifier) -> bool {
        self.0.contains(modifier)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Modifier> {
        self.0.iter()
    }

    /// Does this set carry the isolation-exempt qualifier?
    pub fn is_nonisolated(&self) -> bool {
        self.contains(&Modifier::Nonisolated)
    }

    pub fn with_nonisolated(mut self) -> Self {
        self.push(Modifier::Nonisolated);
        self
    }

    pub fn without_nonisolated(mut self) -> Self {
        self.0.retain(|m| *m != Modifier::Nonisolated);
        self
    }

    /// The visibility component, or `Visibility::Inherited` if there is none
    pub fn visibility(&self) -> Visibility {
        self.0.iter()
            .find_map(|m| match m {
                Modifier::Visibility(vis) => Some(vis.clone()),
                _ => None
            }).unwrap_or(Visibility::Inherited)
    }

    /// Replace the visibility component, keeping every other qualifier.
    ///
    /// The new visibility goes first.  An inherited visibility is represented
    /// by its absence.
    pub fn with_visibility(mut self, vis: Visibility) -> Self {
        self.0.retain(|m| !matches!(m, Modifier::Visibility(_)));
        if !matches!(vis, Visibility::Inherited) {
            self.0.insert(0, Modifier::Visibility(vis));
        }
        self
    }

    pub fn without_visibility(self) -> Self {
        self.with_visibility(Visibility::Inherited)
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I>(iter: I) -> Self
        where I: IntoIterator<Item = Modifier>
    {
        let mut modifiers = Modifiers::new();
        for m in iter {
            modifiers.push(m);
        }
        modifiers
    }
}

/// Parses zero or more bare outer attributes followed by a visibility, eg
/// `#[nonisolated] pub(crate)`.
impl Parse for Modifiers {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let mut modifiers = Modifiers::new();
        for attr in attrs {
            match attr.meta {
                Meta::Path(path) if path.is_ident(NONISOLATED) =>
                    modifiers.push(Modifier::Nonisolated),
                Meta::Path(path) => modifiers.push(Modifier::Other(path)),
                meta => return Err(syn::Error::new_spanned(meta,
                    "Modifiers may not take arguments"))
            }
        }
        let vis: Visibility = input.parse()?;
        Ok(modifiers.with_visibility(vis))
    }
}

/// Lowers attribute qualifiers first, then the visibility, which is the order
/// Rust requires.
impl ToTokens for Modifiers {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        for m in self.0.iter() {
            if !matches!(m, Modifier::Visibility(_)) {
                m.to_tokens(tokens);
            }
        }
        self.visibility().to_tokens(tokens);
    }
}

#[cfg(test)]
mod t {
    use super::*;
    use pretty_assertions::assert_eq;
    use syn::parse_quote;

    #[test]
    fn parse_attrs_and_visibility() {
        let m: Modifiers = parse_quote!(#[nonisolated] #[inline] pub(crate));
        let expected = vec![
            Modifier::Visibility(parse_quote!(pub(crate))),
            Modifier::Nonisolated,
            Modifier::Other(parse_quote!(inline)),
        ];
        assert_eq!(m.iter().cloned().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn parse_rejects_arguments() {
        let r = syn::parse2::<Modifiers>(quote!(#[cfg(test)] pub));
        assert!(r.is_err());
    }

    #[test]
    fn push_is_idempotent() {
        let m: Modifiers = parse_quote!(pub);
        let m = m.with_nonisolated().with_nonisolated();
        assert_eq!(m.iter().count(), 2);
        assert!(m.is_nonisolated());
        assert!(!m.without_nonisolated().is_nonisolated());
    }

    #[test]
    fn replace_visibility() {
        let m: Modifiers = parse_quote!(#[nonisolated] pub);
        let private = m.clone().without_visibility();
        assert_eq!(private.visibility(), Visibility::Inherited);
        assert!(private.is_nonisolated());
        let crate_vis = m.with_visibility(parse_quote!(pub(crate)));
        assert_eq!(crate_vis.visibility(), parse_quote!(pub(crate)));
    }

    #[test]
    fn lower() {
        let m: Modifiers = parse_quote!(#[nonisolated] pub);
        assert_eq!(m.to_token_stream().to_string(),
                   quote!(#[nonisolated] pub).to_string());
    }
}
