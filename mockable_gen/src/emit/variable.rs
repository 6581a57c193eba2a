// vim: tw=80
use proc_macro2::Span;
use quote::quote;
use syn::{Ident, ReturnType, Type, parse_quote, spanned::Spanned};

use super::{Arg, Context, delegate, handle_type, member_expr, variant_ident};
use crate::{
    attributes::AttrFormatter,
    builder_kind::BuilderKind,
    decl::{Decl, FnDecl, MemberVariant, Property},
    modifiers::Modifiers,
    requirements::Variable
};

fn validate(v: &Variable) -> syn::Result<()> {
    if let Type::ImplTrait(_) = v.ty {
        return Err(syn::Error::new(v.ty.span(),
            "impl Trait variable types are not supported"));
    }
    Ok(())
}

/// The setter's argument
fn new_value(v: &Variable) -> Arg {
    Arg {
        ident: Ident::new("value", Span::call_site()),
        ty: v.ty.clone()
    }
}

pub(super) fn conformance(cx: &Context, v: &Variable, index: usize)
    -> syn::Result<Decl>
{
    validate(v)?;
    let ty = &v.ty;
    let get = member_expr(cx, &variant_ident(index, "get", &v.ident), &[]);
    let getter = delegate(cx, &get, &[], &parse_quote!(-> #ty));
    let setter = if v.mutable {
        let value = new_value(v);
        let set = member_expr(cx, &variant_ident(index, "set", &v.ident),
            &[value.record(cx)]);
        Some(delegate(cx, &set, &[value], &ReturnType::Default))
    } else {
        None
    };
    Ok(Decl::Property(Property {
        attrs: AttrFormatter::new(&v.attrs).format(),
        modifiers: cx.isolation.resolve(Some(&v.markers)),
        ident: v.ident.clone(),
        ty: ty.clone(),
        getter,
        setter,
        unavailable: None
    }))
}

/// Unlike a function's, a variable's accessors always carry the builder's
/// base modifiers: the variable's own markers are not reapplied.
pub(super) fn accessor(cx: &Context, v: &Variable, kind: BuilderKind,
                       base: &Modifiers, index: usize) -> syn::Result<Decl>
{
    validate(v)?;
    let ident = &v.ident;
    let handle_name = kind.property_handle();
    let values = if kind.is_typed() {
        vec![cx.deselfify(&v.ty)]
    } else {
        Vec::new()
    };
    let ret = handle_type(cx, kind, &handle_name, &values);
    let handle = cx.idents.engine_item(&handle_name);
    let mocker = &cx.idents.mocker_field;
    let get = member_expr(cx, &variant_ident(index, "get", ident), &[]);
    let set = if v.mutable {
        let parameter = cx.idents.engine_item("Parameter");
        let set = member_expr(cx, &variant_ident(index, "set", ident),
            &[parse_quote!(#parameter::any())]);
        quote!(::std::option::Option::Some(#set))
    } else {
        quote!(::std::option::Option::None)
    };
    Ok(Decl::Function(FnDecl {
        attrs: AttrFormatter::new(&v.attrs).doc(false).format(),
        modifiers: base.clone(),
        sig: parse_quote!(fn #ident(&self) -> #ret),
        defaults: Vec::new(),
        body: parse_quote!({ #handle::new(self.#mocker, #get, #set) })
    }))
}

pub(super) fn variants(cx: &Context, v: &Variable, index: usize)
    -> Vec<MemberVariant>
{
    let mut variants = vec![MemberVariant {
        ident: variant_ident(index, "get", &v.ident),
        fields: Vec::new()
    }];
    if v.mutable {
        variants.push(MemberVariant {
            ident: variant_ident(index, "set", &v.ident),
            fields: vec![new_value(v).recorded_ty(cx)]
        });
    }
    variants
}
