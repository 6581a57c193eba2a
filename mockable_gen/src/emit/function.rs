// vim: tw=80
use quote::quote;
use syn::{Expr, ReturnType, Signature, Type, parse_quote};

use super::{
    Arg,
    Context,
    args,
    check_signature,
    delegate,
    demutify,
    handle_type,
    is_result,
    member_expr,
    output_type,
    variant_ident
};
use crate::{
    attributes::AttrFormatter,
    builder_kind::BuilderKind,
    decl::{Decl, FnDecl, MemberVariant},
    modifiers::Modifiers,
    requirements::Function
};

fn validate(f: &Function) -> syn::Result<Vec<Arg>> {
    check_signature(&f.sig)?;
    if f.sig.receiver().is_none() {
        return Err(syn::Error::new(f.sig.ident.span(),
            "Mocked functions must take self"));
    }
    args(&f.sig)
}

fn is_throwing(f: &Function) -> bool {
    match &f.sig.output {
        ReturnType::Type(_, ty) => is_result(ty),
        ReturnType::Default => false
    }
}

pub(super) fn conformance(cx: &Context, f: &Function, index: usize)
    -> syn::Result<Decl>
{
    let args = validate(f)?;
    let variant = variant_ident(index, "", &f.sig.ident);
    let fields = args.iter()
        .map(|a| a.record(cx))
        .collect::<Vec<_>>();
    let member = member_expr(cx, &variant, &fields);
    Ok(Decl::Function(FnDecl {
        attrs: AttrFormatter::new(&f.attrs).format(),
        modifiers: cx.isolation.resolve(Some(&f.markers)),
        sig: demutify(&f.sig),
        defaults: Vec::new(),
        body: delegate(cx, &member, &args, &f.sig.output)
    }))
}

pub(super) fn accessor(cx: &Context, f: &Function, kind: BuilderKind,
                       base: &Modifiers, index: usize) -> syn::Result<Decl>
{
    let args = validate(f)?;
    let ident = &f.sig.ident;
    let variant = variant_ident(index, "", ident);
    let handle_name = kind.function_handle(is_throwing(f));
    let values = if kind.is_typed() {
        let output = cx.deselfify(&output_type(&f.sig.output));
        let argty = args.iter().map(|a| cx.deselfify(&a.ty));
        let producer: Type = parse_quote!(fn(#(#argty),*) -> #output);
        vec![output, producer]
    } else {
        Vec::new()
    };
    let ret = handle_type(cx, kind, &handle_name, &values);
    let params = args.iter()
        .map(|a| {
            let ident = &a.ident;
            let ty = a.recorded_ty(cx);
            quote!(#ident: #ty)
        });
    let sig: Signature = parse_quote!(fn #ident(&self #(, #params)*) -> #ret);
    let fields = args.iter()
        .map(|a| {
            let ident = &a.ident;
            parse_quote!(#ident)
        }).collect::<Vec<Expr>>();
    let member = member_expr(cx, &variant, &fields);
    let handle = cx.idents.engine_item(&handle_name);
    let mocker = &cx.idents.mocker_field;
    Ok(Decl::Function(FnDecl {
        attrs: AttrFormatter::new(&f.attrs).doc(false).format(),
        modifiers: cx.isolation.resolve_from(base, Some(&f.markers)),
        sig,
        defaults: Vec::new(),
        body: parse_quote!({ #handle::new(self.#mocker, #member) })
    }))
}

pub(super) fn variants(cx: &Context, f: &Function, index: usize)
    -> syn::Result<Vec<MemberVariant>>
{
    let args = validate(f)?;
    Ok(vec![MemberVariant {
        ident: variant_ident(index, "", &f.sig.ident),
        fields: args.iter().map(|a| a.recorded_ty(cx)).collect()
    }])
}
