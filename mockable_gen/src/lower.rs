// vim: tw=80
//! Lowering of the declaration tree to tokens.
//!
//! Rust has neither properties nor default arguments, so:
//! * a property becomes a getter method, plus a `set_` method if it has a
//!   setter,
//! * a parameter with a default becomes an `Option`, unwrapped at the top of
//!   the body,
//! * an unavailable property is deprecated with its message, hidden from
//!   documentation, and demands the engine's private token.

use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};
use syn::{FnArg, Pat, Stmt, parse_quote};

use crate::decl::{
    BuilderDecl,
    Decl,
    Field,
    FnDecl,
    GeneratedModule,
    MemberEnum,
    MemberVariant,
    Property,
    TypeAlias
};

impl ToTokens for TypeAlias {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let ident = &self.ident;
        let ty = &self.ty;
        quote!(type #ident = #ty;).to_tokens(tokens)
    }
}

/// A struct field, without its trailing comma
impl ToTokens for Field {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let modifiers = &self.modifiers;
        let ident = &self.ident;
        let ty = &self.ty;
        quote!(#modifiers #ident: #ty).to_tokens(tokens)
    }
}

impl ToTokens for Property {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let attrs = &self.attrs;
        let modifiers = &self.modifiers;
        let ident = &self.ident;
        let ty = &self.ty;
        let getter = &self.getter;
        let unavailable = self.unavailable.as_ref().map(|u| {
            let msg = &u.message;
            quote!(
                #[deprecated(note = #msg)]
                #[doc(hidden)]
            )
        });
        let token = self.unavailable.as_ref().map(|u| {
            let token = &u.token;
            quote!(, _: #token)
        });
        quote!(
            #(#attrs)*
            #unavailable
            #modifiers fn #ident(&self #token) -> #ty #getter
        ).to_tokens(tokens);
        if let Some(setter) = &self.setter {
            let set_ident = format_ident!("set_{}", ident);
            quote!(
                #(#attrs)*
                #unavailable
                #modifiers fn #set_ident(&mut self #token, value: #ty) #setter
            ).to_tokens(tokens);
        }
    }
}

impl ToTokens for FnDecl {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let attrs = &self.attrs;
        let modifiers = &self.modifiers;
        let mut sig = self.sig.clone();
        let mut prologue: Vec<Stmt> = Vec::new();
        for (ident, default) in self.defaults.iter() {
            for fa in sig.inputs.iter_mut() {
                if let FnArg::Typed(pt) = fa {
                    let is_param = matches!(pt.pat.as_ref(),
                        Pat::Ident(pi) if pi.ident == *ident);
                    if is_param {
                        let ty = &pt.ty;
                        *pt.ty = parse_quote!(::std::option::Option<#ty>);
                        prologue.push(parse_quote!(
                            let #ident = #ident.unwrap_or_else(|| #default);
                        ));
                    }
                }
            }
        }
        let stmts = &self.body.stmts;
        quote!(
            #(#attrs)*
            #modifiers #sig {
                #(#prologue)*
                #(#stmts)*
            }
        ).to_tokens(tokens)
    }
}

impl ToTokens for Decl {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        match self {
            Decl::TypeAlias(alias) => alias.to_tokens(tokens),
            Decl::Field(field) => field.to_tokens(tokens),
            Decl::Property(prop) => prop.to_tokens(tokens),
            Decl::Function(f) | Decl::Initializer(f) => f.to_tokens(tokens),
        }
    }
}

/// Trait impl items may not carry a visibility
fn without_visibility(decl: &Decl) -> Decl {
    let mut decl = decl.clone();
    match &mut decl {
        Decl::TypeAlias(_) => (),
        Decl::Field(field) => {
            field.modifiers = field.modifiers.clone().without_visibility()
        },
        Decl::Property(prop) => {
            prop.modifiers = prop.modifiers.clone().without_visibility()
        },
        Decl::Function(f) | Decl::Initializer(f) => {
            f.modifiers = f.modifiers.clone().without_visibility()
        }
    }
    decl
}

/// Split members into struct fields and impl items
fn fields_and_items(members: &[Decl]) -> (Vec<&Decl>, Vec<&Decl>) {
    members.iter()
        .filter(|d| !matches!(d, Decl::TypeAlias(_)))
        .partition(|d| matches!(d, Decl::Field(_)))
}

impl ToTokens for BuilderDecl {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let vis = &self.vis;
        let ident = &self.ident;
        let marker = &self.marker;
        let (ig, tg, wc) = self.generics.split_for_impl();
        let (fields, items) = fields_and_items(&self.members);
        quote!(
            #vis struct #ident #ig #wc {
                #(#fields),*
            }
            impl #ig #marker for #ident #tg #wc {}
            impl #ig #ident #tg #wc {
                #(#items)*
            }
        ).to_tokens(tokens)
    }
}

impl ToTokens for MemberVariant {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let ident = &self.ident;
        if self.fields.is_empty() {
            ident.to_tokens(tokens)
        } else {
            let fields = &self.fields;
            quote!(#ident(#(#fields),*)).to_tokens(tokens)
        }
    }
}

impl MemberEnum {
    /// One arm of `matches`, comparing two instances of the same case
    fn match_arm(&self, variant: &MemberVariant) -> TokenStream {
        let member = &self.ident;
        let v = &variant.ident;
        if variant.fields.is_empty() {
            return quote!((#member::#v, #member::#v) => true);
        }
        let lhs = (0..variant.fields.len())
            .map(|i| format_ident!("l{}", i))
            .collect::<Vec<_>>();
        let rhs = (0..variant.fields.len())
            .map(|i| format_ident!("r{}", i))
            .collect::<Vec<_>>();
        quote!(
            (#member::#v(#(#lhs),*), #member::#v(#(#rhs),*)) =>
                #(#lhs.matches(#rhs))&&*
        )
    }
}

impl ToTokens for MemberEnum {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let vis = &self.vis;
        let ident = &self.ident;
        let matchable = &self.matchable;
        let variants = &self.variants;
        let body = if self.variants.is_empty() {
            quote!(match *self {})
        } else {
            let arms = self.variants.iter().map(|v| self.match_arm(v));
            quote!(
                match (self, other) {
                    #(#arms,)*
                    _ => false
                }
            )
        };
        quote!(
            #[allow(non_camel_case_types)]
            #vis enum #ident {
                #(#variants),*
            }
            impl #matchable for #ident {
                #[allow(unreachable_patterns)]
                fn matches(&self, other: &Self) -> bool {
                    #body
                }
            }
        ).to_tokens(tokens)
    }
}

impl ToTokens for GeneratedModule {
    fn to_tokens(&self, tokens: &mut TokenStream) {
        let vis = &self.vis;
        let interface = &self.interface;
        let mock = &self.mock_ident;
        let service = &self.service;
        let aliases = self.plumbing().iter()
            .filter(|d| matches!(d, Decl::TypeAlias(_)));
        let (fields, items) = fields_and_items(self.plumbing());
        let conformances = self.conformances().iter()
            .map(without_visibility);
        let member_enum = &self.member_enum;
        let member = &self.member_enum.ident;
        let builder_types = self.builders.iter().map(|b| {
            let ident = &b.ident;
            quote!(type #ident<'m> = #ident<'m>;)
        });
        let builders = &self.builders;
        quote!(
            #(#aliases)*
            #member_enum
            #vis struct #mock {
                #(#fields),*
            }
            impl #mock {
                #(#items)*
            }
            impl #interface for #mock {
                #(#conformances)*
            }
            impl #service for #mock {
                type #member = #member;
                #(#builder_types)*
            }
            #(#builders)*
        ).to_tokens(tokens)
    }
}
