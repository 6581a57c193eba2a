// vim: tw=80
//! The three builder types.
//!
//! Each builder borrows the mock's engine and exposes one accessor per
//! interface variable and function.  Their modifiers are resolved once per
//! builder and passed down to the members as the base.

use syn::parse_quote;

use crate::{
    builder_kind::BuilderKind,
    decl::{BuilderDecl, Decl, Field, FnDecl},
    emit::{Context, numbered}
};

fn builder(cx: &Context, kind: BuilderKind) -> syn::Result<BuilderDecl> {
    let base = cx.isolation.resolve(None);
    let mocker = &cx.idents.mocker;
    let mocker_field = &cx.idents.mocker_field;
    let new = &cx.idents.new;
    let field = Field {
        modifiers: base.clone().without_visibility(),
        ident: mocker_field.clone(),
        ty: parse_quote!(&'m #mocker),
        init: None
    };
    let init = FnDecl {
        attrs: Vec::new(),
        modifiers: base.clone(),
        sig: parse_quote!(fn #new(#mocker_field: &'m #mocker) -> Self),
        defaults: Vec::new(),
        body: parse_quote!({ Self { #mocker_field } })
    };
    let mut members = vec![Decl::Field(field), Decl::Initializer(init)];
    for (index, member) in numbered(cx.requirements) {
        if let Some(accessor) = member.accessor(cx, kind, &base, index)? {
            members.push(accessor);
        }
    }
    Ok(BuilderDecl {
        kind,
        vis: cx.requirements.modifiers.visibility(),
        ident: kind.ident(),
        marker: cx.idents.engine_item("Builder"),
        generics: parse_quote!(<'m>),
        members
    })
}

/// One builder per kind, in [`BuilderKind::ALL`] order
pub(crate) fn assemble(cx: &Context) -> syn::Result<Vec<BuilderDecl>> {
    BuilderKind::ALL.iter()
        .map(|kind| builder(cx, *kind))
        .collect()
}
