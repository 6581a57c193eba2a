// vim: tw=80
use syn::{Expr, GenericArgument, PathArguments, ReturnType, Type, parse_quote};

use super::{Context, args, check_signature, demutify};
use crate::{
    attributes::AttrFormatter,
    decl::{Decl, FnDecl},
    requirements::Initializer
};

/// How an initializer reports its result
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Shape {
    /// Returns `Self`
    Plain,
    /// Returns `Option<Self>`
    Failable,
    /// Returns `Result<Self, E>`
    Throwing,
}

fn is_self(ty: &Type) -> bool {
    matches!(ty, Type::Path(tp) if tp.qself.is_none() && tp.path.is_ident("Self"))
}

/// Does `ty` look like `Wrapper<Self, ..>`?
fn wraps_self(ty: &Type, wrapper: &str) -> bool {
    let Type::Path(tp) = ty else {
        return false;
    };
    let Some(seg) = tp.path.segments.last() else {
        return false;
    };
    if seg.ident != wrapper {
        return false;
    }
    match &seg.arguments {
        PathArguments::AngleBracketed(abga) => {
            matches!(abga.args.first(), Some(GenericArgument::Type(t)) if is_self(t))
        },
        _ => false
    }
}

fn shape(init: &Initializer) -> syn::Result<Shape> {
    let ty = match &init.sig.output {
        ReturnType::Type(_, ty) => ty.as_ref(),
        ReturnType::Default => {
            return Err(syn::Error::new(init.sig.ident.span(),
                "Initializers must return Self"));
        }
    };
    if is_self(ty) {
        Ok(Shape::Plain)
    } else if wraps_self(ty, "Option") {
        Ok(Shape::Failable)
    } else if wraps_self(ty, "Result") {
        Ok(Shape::Throwing)
    } else {
        Err(syn::Error::new_spanned(ty,
            "Initializers must return Self, Option<Self> or Result<Self, E>"))
    }
}

/// An interface initializer, implemented by ignoring its arguments and
/// building a mock with the engine's default policy
pub(super) fn conformance(cx: &Context, init: &Initializer)
    -> syn::Result<Decl>
{
    check_signature(&init.sig)?;
    if let Some(receiver) = init.sig.receiver() {
        return Err(syn::Error::new_spanned(receiver,
            "Initializers must not take self"));
    }
    let shape = shape(init)?;
    let args = args(&init.sig)?;
    let new = &cx.idents.new;
    let mock: Expr = parse_quote!(Self::#new(::std::option::Option::None));
    let value: Expr = match shape {
        Shape::Plain => mock,
        Shape::Failable => parse_quote!(::std::option::Option::Some(#mock)),
        Shape::Throwing => parse_quote!(::std::result::Result::Ok(#mock)),
    };
    let body = if args.is_empty() {
        parse_quote!({ #value })
    } else {
        let argnames = args.iter().map(|a| &a.ident);
        parse_quote!({
            let _ = (#(#argnames,)*);
            #value
        })
    };
    Ok(Decl::Initializer(FnDecl {
        attrs: AttrFormatter::new(&init.attrs).format(),
        modifiers: cx.isolation.resolve(Some(&init.markers)),
        sig: demutify(&init.sig),
        defaults: Vec::new(),
        body
    }))
}

#[cfg(test)]
mod t {
    use super::*;
    use super::super::with_context;
    use crate::requirements::Requirements;
    use pretty_assertions::assert_eq;
    use quote::{ToTokens, quote};

    fn check(init: Initializer, expected: proc_macro2::TokenStream) {
        let r = Requirements::new(parse_quote!(Conn))
            .initializer(init.clone());
        let decl = with_context(&r, |cx| conformance(cx, &init)).unwrap();
        let Decl::Initializer(f) = decl else {
            panic!("Expected an initializer");
        };
        assert_eq!(f.body.to_token_stream().to_string(), expected.to_string());
    }

    fn error(init: Initializer) -> String {
        let r = Requirements::new(parse_quote!(Conn));
        with_context(&r, |cx| conformance(cx, &init))
            .unwrap_err()
            .to_string()
    }

    #[test]
    fn plain() {
        check(parse_quote!(fn open() -> Self;),
              quote!({ Self::new(::std::option::Option::None) }));
    }

    #[test]
    fn failable_with_args() {
        check(parse_quote!(
                fn open(mut url: String, retries: u8) -> Option<Self>;
              ),
              quote!({
                  let _ = (url, retries,);
                  ::std::option::Option::Some(
                      Self::new(::std::option::Option::None))
              }));
    }

    #[test]
    fn throwing() {
        check(parse_quote!(
                async fn connect(url: &str) -> Result<Self, Error>;
              ),
              quote!({
                  let _ = (url,);
                  ::std::result::Result::Ok(
                      Self::new(::std::option::Option::None))
              }));
    }

    #[test]
    fn takes_self() {
        assert_eq!(error(parse_quote!(
                        fn reopen(&self) -> Self;
                   )),
                   "Initializers must not take self");
    }

    #[test]
    fn wrong_return() {
        assert_eq!(error(parse_quote!(
                        fn open() -> Box<Self>;
                   )),
                   "Initializers must return Self, Option<Self> or Result<Self, E>");
        assert_eq!(error(parse_quote!(fn open();)),
                   "Initializers must return Self");
    }
}
