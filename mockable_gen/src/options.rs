// vim: tw=80
//! Generation options, written in attribute-argument syntax.
//!
//! ```text
//! engine = ::my_engine
//! ```

use syn::{
    Ident,
    Path,
    Token,
    parse::{Parse, ParseStream},
    parse_quote,
    punctuated::Punctuated
};

/// A single `key = value` option
enum Opt {
    Engine(Path),
}

impl Parse for Opt {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let ident: Ident = input.parse()?;
        match ident.to_string().as_str() {
            "engine" => {
                let _: Token![=] = input.parse()?;
                Ok(Opt::Engine(input.parse()?))
            },
            _ => Err(syn::Error::new(ident.span(),
                format!("Unknown option `{}`", ident)))
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Options {
    /// Path of the crate that provides the `Mocker` engine and its builder
    /// handle types
    pub engine: Path,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            engine: parse_quote!(::mockable),
        }
    }
}

impl Parse for Options {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut options = Options::default();
        let mut seen_engine = false;
        let opts = Punctuated::<Opt, Token![,]>::parse_terminated(input)?;
        for opt in opts {
            match opt {
                Opt::Engine(path) => {
                    if seen_engine {
                        return Err(syn::Error::new_spanned(path,
                            "Option `engine` given more than once"));
                    }
                    seen_engine = true;
                    options.engine = path;
                }
            }
        }
        Ok(options)
    }
}

#[cfg(test)]
mod t {
    use super::*;
    use pretty_assertions::assert_eq;
    use quote::quote;

    #[test]
    fn default_engine() {
        let options: Options = syn::parse2(quote!()).unwrap();
        assert_eq!(options, Options::default());
        let expected: Path = parse_quote!(::mockable);
        assert_eq!(options.engine, expected);
    }

    #[test]
    fn engine() {
        let options: Options = syn::parse2(quote!(engine = crate::engine,))
            .unwrap();
        let expected: Path = parse_quote!(crate::engine);
        assert_eq!(options.engine, expected);
    }

    #[test]
    fn unknown_option() {
        let e = syn::parse2::<Options>(quote!(prefix = Fake)).unwrap_err();
        assert_eq!(e.to_string(), "Unknown option `prefix`");
    }

    #[test]
    fn repeated_option() {
        let e = syn::parse2::<Options>(quote!(engine = a, engine = b))
            .unwrap_err();
        assert_eq!(e.to_string(), "Option `engine` given more than once");
    }
}
