// vim: tw=80
//! Per-member code generation.
//!
//! Every interface member produces a conformance implementation on the mock
//! type.  Functions and variables additionally produce one accessor on each
//! builder type, and one or two cases of the member identity enum.

use proc_macro2::Span;
use quote::format_ident;
use syn::{
    Expr,
    FnArg,
    Ident,
    Pat,
    ReturnType,
    Signature,
    Type,
    parse_quote,
    spanned::Spanned,
    visit_mut::{self, VisitMut}
};

use crate::{
    builder_kind::BuilderKind,
    collections::UnorderedSet,
    decl::{Decl, MemberVariant},
    idents::EngineIdents,
    isolation::Isolation,
    modifiers::Modifiers,
    requirements::{Function, Initializer, Requirements, Variable}
};

mod function;
mod initializer;
mod variable;

/// Everything a member needs to know about its surroundings
pub(crate) struct Context<'a> {
    pub requirements: &'a Requirements,
    pub idents: &'a EngineIdents,
    pub isolation: &'a Isolation,
}

impl<'a> Context<'a> {
    pub fn mock_type(&self) -> &Type {
        &self.requirements.mock_type
    }

    /// Wrap a recorded type in the engine's `Parameter`
    pub fn parameter(&self, ty: &Type) -> Type {
        let parameter = self.idents.engine_item("Parameter");
        parse_quote!(#parameter<#ty>)
    }

    /// Replace `Self` with the mock type, for use outside of the mock's own
    /// impl blocks.  `Self::Assoc` becomes `<MockFoo as Foo>::Assoc`.
    pub fn deselfify(&self, ty: &Type) -> Type {
        let mut ty = ty.clone();
        Deselfify {
            mock: self.mock_type(),
            interface: &self.requirements.name
        }.visit_type_mut(&mut ty);
        ty
    }
}

struct Deselfify<'a> {
    mock: &'a Type,
    interface: &'a Ident,
}

impl VisitMut for Deselfify<'_> {
    fn visit_type_mut(&mut self, ty: &mut Type) {
        if let Type::Path(tp) = ty {
            let leading_self = tp.qself.is_none() &&
                tp.path.leading_colon.is_none() &&
                tp.path.segments.first()
                    .map(|seg| seg.ident == "Self")
                    .unwrap_or(false);
            if leading_self {
                let mock = self.mock;
                let interface = self.interface;
                let rest = tp.path.segments.iter().skip(1);
                *ty = if tp.path.segments.len() == 1 {
                    mock.clone()
                } else {
                    parse_quote!(<#mock as #interface>#(::#rest)*)
                };
                return;
            }
        }
        visit_mut::visit_type_mut(self, ty);
    }
}

/// A named, typed argument of a mocked signature
pub(crate) struct Arg {
    pub ident: Ident,
    pub ty: Type,
}

impl Arg {
    /// The type under which the engine records this argument.  References
    /// are recorded by their owned form.
    pub fn recorded_ty(&self, cx: &Context) -> Type {
        let ty = cx.deselfify(&self.ty);
        let recorded = if let Type::Reference(tr) = &ty {
            let elem = &tr.elem;
            parse_quote!(<#elem as ::std::borrow::ToOwned>::Owned)
        } else {
            ty
        };
        cx.parameter(&recorded)
    }

    /// Expression that records this argument's value
    pub fn record(&self, cx: &Context) -> Expr {
        let ident = &self.ident;
        let parameter = cx.idents.engine_item("Parameter");
        if let Type::Reference(_) = self.ty {
            parse_quote!(#parameter::value(::std::borrow::ToOwned::to_owned(#ident)))
        } else {
            parse_quote!(#parameter::value(::std::clone::Clone::clone(&#ident)))
        }
    }
}

/// Validate and collect a signature's named arguments, skipping the receiver
pub(crate) fn args(sig: &Signature) -> syn::Result<Vec<Arg>> {
    let mut args = Vec::new();
    for fa in sig.inputs.iter() {
        let pt = match fa {
            FnArg::Receiver(_) => continue,
            FnArg::Typed(pt) => pt
        };
        let ident = match pt.pat.as_ref() {
            Pat::Ident(pi) => {
                if let Some(r) = &pi.by_ref {
                    return Err(syn::Error::new(r.span(),
                        "By-reference argument bindings are not supported"));
                }
                if let Some((_at, subpat)) = &pi.subpat {
                    return Err(syn::Error::new(subpat.span(),
                        "Subpattern bindings are not supported"));
                }
                pi.ident.clone()
            },
            Pat::Wild(_) => {
                return Err(syn::Error::new(pt.span(),
                    "Mocked functions must have named arguments"));
            },
            pat => {
                return Err(syn::Error::new(pat.span(),
                    "Unsupported argument pattern"));
            }
        };
        if let Type::ImplTrait(_) = pt.ty.as_ref() {
            return Err(syn::Error::new(pt.ty.span(),
                "impl Trait arguments are not supported"));
        }
        args.push(Arg{ident, ty: (*pt.ty).clone()});
    }
    Ok(args)
}

/// Reject signature features that can't be forwarded to the engine
pub(crate) fn check_signature(sig: &Signature) -> syn::Result<()> {
    if let Some(variadic) = &sig.variadic {
        return Err(syn::Error::new(variadic.span(),
            "Variadic functions are not supported"));
    }
    if !sig.generics.params.is_empty() {
        return Err(syn::Error::new(sig.generics.span(),
            "Generic functions are not supported"));
    }
    if let ReturnType::Type(_, ty) = &sig.output {
        if let Type::ImplTrait(_) = ty.as_ref() {
            return Err(syn::Error::new(ty.span(),
                "impl Trait return types are not supported"));
        }
    }
    Ok(())
}

/// Remove any "mut" from a signature's argument bindings
pub(crate) fn demutify(sig: &Signature) -> Signature {
    let mut sig = sig.clone();
    for fa in sig.inputs.iter_mut() {
        if let FnArg::Typed(pt) = fa {
            if let Pat::Ident(pi) = pt.pat.as_mut() {
                pi.mutability = None;
            }
        }
    }
    sig
}

/// The return type, with `()` for functions that don't declare one
pub(crate) fn output_type(output: &ReturnType) -> Type {
    match output {
        ReturnType::Default => parse_quote!(()),
        ReturnType::Type(_, ty) => (**ty).clone()
    }
}

/// Does this type look like a `Result`?
pub(crate) fn is_result(ty: &Type) -> bool {
    if let Type::Path(tp) = ty {
        tp.path.segments.last()
            .map(|seg| seg.ident == "Result")
            .unwrap_or(false)
    } else {
        false
    }
}

/// The engine entry point for producing a value of this type
pub(crate) fn mock_call(output: &ReturnType) -> Ident {
    let span = Span::call_site();
    match output {
        ReturnType::Type(_, ty) if is_result(ty) =>
            Ident::new("mock_throwing", span),
        _ => Ident::new("mock", span)
    }
}

/// A body that asks the engine to produce a value for `member`
pub(crate) fn delegate(cx: &Context, member: &Expr, args: &[Arg],
                       output: &ReturnType) -> syn::Block
{
    let mocker = &cx.idents.mocker_field;
    let call = mock_call(output);
    let argnames = args.iter().map(|a| &a.ident);
    let argty = args.iter().map(|a| &a.ty);
    parse_quote!({
        let member = #member;
        self.#mocker.#call(member, |producer: &dyn Fn(#(#argty),*) #output|
            producer(#(#argnames),*))
    })
}

/// Identifier of a member enum case, eg "m1_fetch"
pub(crate) fn variant_ident(index: usize, tag: &str, name: &Ident) -> Ident {
    if tag.is_empty() {
        format_ident!("m{}_{}", index, name)
    } else {
        format_ident!("m{}_{}_{}", index, tag, name)
    }
}

/// Engine handle type for a builder accessor.  `values` are the extra type
/// arguments that only the return builder's handles take.
pub(crate) fn handle_type(cx: &Context, kind: BuilderKind, handle: &str,
                          values: &[Type]) -> Type
{
    let handle = cx.idents.engine_item(handle);
    let mock = cx.mock_type();
    let builder = kind.ident();
    parse_quote!(#handle<'m, #mock, #builder<'m> #(, #values)*>)
}

/// One member of the interface being mocked
#[derive(Clone, Copy, Debug)]
pub(crate) enum Member<'a> {
    Function(&'a Function),
    Variable(&'a Variable),
    Initializer(&'a Initializer),
}

impl<'a> Member<'a> {
    /// The implementation of this member on the mock type.
    ///
    /// `index` is the member's number in the member identity enum.
    /// Initializers aren't numbered and ignore it.
    pub fn conformance(&self, cx: &Context, index: usize)
        -> syn::Result<Decl>
    {
        match self {
            Member::Function(f) => function::conformance(cx, f, index),
            Member::Variable(v) => variable::conformance(cx, v, index),
            Member::Initializer(i) => initializer::conformance(cx, i),
        }
    }

    /// This member's accessor on the `kind` builder, if it has one.
    ///
    /// `base` is the builder's own resolved modifiers.
    pub fn accessor(&self, cx: &Context, kind: BuilderKind, base: &Modifiers,
                    index: usize) -> syn::Result<Option<Decl>>
    {
        match self {
            Member::Function(f) =>
                function::accessor(cx, f, kind, base, index).map(Some),
            Member::Variable(v) =>
                variable::accessor(cx, v, kind, base, index).map(Some),
            Member::Initializer(_) => Ok(None)
        }
    }

    /// This member's cases of the member identity enum
    pub fn variants(&self, cx: &Context, index: usize)
        -> syn::Result<Vec<MemberVariant>>
    {
        match self {
            Member::Function(f) => function::variants(cx, f, index),
            Member::Variable(v) => Ok(variable::variants(cx, v, index)),
            Member::Initializer(_) => Ok(Vec::new())
        }
    }

    /// Name of the accessor this member contributes to every builder
    pub fn accessor_ident(&self) -> Option<&'a Ident> {
        match self {
            Member::Function(f) => Some(&f.sig.ident),
            Member::Variable(v) => Some(&v.ident),
            Member::Initializer(_) => None
        }
    }
}

/// Members that contribute builder accessors and member enum cases, in
/// source order and numbered from 1: variables, then functions.
pub(crate) fn numbered(requirements: &Requirements)
    -> impl Iterator<Item = (usize, Member<'_>)>
{
    requirements.variables.iter().map(Member::Variable)
        .chain(requirements.functions.iter().map(Member::Function))
        .enumerate()
        .map(|(i, m)| (i + 1, m))
}

/// Make sure no two members would produce builder accessors or mock methods of
/// the same name, and that none would shadow the builders' own members.
pub(crate) fn check_unique_names(cx: &Context) -> syn::Result<()> {
    let mut names = UnorderedSet::new();
    names.insert(cx.idents.new.to_string());
    names.insert(cx.idents.mocker_field.to_string());
    for (_, member) in numbered(cx.requirements) {
        let Some(ident) = member.accessor_ident() else {
            continue;
        };
        let mut generated = vec![ident.to_string()];
        // A mutable variable's setter lowers to its own method
        if let Member::Variable(v) = member {
            if v.mutable {
                generated.push(format!("set_{}", ident));
            }
        }
        for name in generated {
            if !names.insert(name.clone()) {
                return Err(syn::Error::new(ident.span(),
                    format!("Member `{}` conflicts with another generated name",
                        name)));
            }
        }
    }
    Ok(())
}

/// Render a member enum case constructor, eg `Member::m1_fetch(a, b)`
pub(crate) fn member_expr(cx: &Context, variant: &Ident, fields: &[Expr])
    -> Expr
{
    let member = &cx.idents.member;
    if fields.is_empty() {
        parse_quote!(#member::#variant)
    } else {
        parse_quote!(#member::#variant(#(#fields),*))
    }
}


#[cfg(test)]
pub(crate) fn with_context<R>(requirements: &Requirements,
                              f: impl FnOnce(&Context) -> R) -> R
{
    let idents = EngineIdents::new(&crate::options::Options::default());
    let isolation = Isolation::new(requirements);
    f(&Context{requirements, idents: &idents, isolation: &isolation})
}
