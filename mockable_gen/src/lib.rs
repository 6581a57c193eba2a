// vim: tw=80
//! Mock synthesis for the `mockable` engine
//!
//! Given a description of an interface, this crate generates a mock type
//! that implements it by delegating every call to a `Mocker` engine, plus
//! three builder types through which tests stub return values, attach side
//! effects, and verify calls:
//!
//! * `ReturnBuilder`, reached through `given(&mock)`,
//! * `ActionBuilder`, reached through `when(&mock)`,
//! * `VerifyBuilder`, reached through `verify(&mock)`.
//!
//! Every generated declaration also carries the isolation qualifiers it needs
//! to satisfy the interface's concurrency contract.  See the
//! [`isolation`](Isolation) rules.
//!
//! # Examples
//!
//! ```
//! # use mockable_gen::*;
//! # use quote::ToTokens;
//! # use syn::parse_quote;
//! let requirements = Requirements::new(parse_quote!(Clock))
//!     .modifiers(parse_quote!(pub))
//!     .function(parse_quote!(fn now(&self) -> u64;));
//! let module = generate(&requirements, &Options::default()).unwrap();
//! let tokens = module.to_token_stream().to_string();
//! assert!(tokens.contains("pub struct MockClock"));
//! ```

use proc_macro2::Ident;
use quote::format_ident;
use syn::{Type, spanned::Spanned};

mod attributes;
mod builder_kind;
mod builders;
mod collections;
mod decl;
mod emit;
mod idents;
mod isolation;
mod lower;
mod member_enum;
mod mock_type;
mod modifiers;
mod options;
mod requirements;

pub use crate::attributes::{
    GLOBAL_ACTOR_SUFFIX,
    MAIN_ACTOR,
    Markers,
    NONISOLATED
};
pub use crate::builder_kind::BuilderKind;
pub use crate::decl::{
    BuilderDecl,
    Decl,
    Field,
    FnDecl,
    GeneratedModule,
    MemberEnum,
    MemberVariant,
    Property,
    TypeAlias,
    Unavailable
};
pub use crate::isolation::Isolation;
pub use crate::modifiers::{Modifier, Modifiers};
pub use crate::options::Options;
pub use crate::requirements::{Function, Initializer, Requirements, Variable};

use crate::{emit::Context, idents::EngineIdents};

/// "Foo" => "MockFoo"
pub(crate) fn gen_mock_ident(ident: &Ident) -> Ident {
    format_ident!("Mock{}", ident)
}

/// The name to declare the mock type with
fn mock_ident(ty: &Type) -> syn::Result<Ident> {
    match ty {
        Type::Path(tp) if tp.qself.is_none() => {
            tp.path.get_ident()
                .cloned()
                .ok_or_else(|| syn::Error::new(ty.span(),
                    "The mock type must be a plain identifier"))
        },
        _ => Err(syn::Error::new(ty.span(),
            "The mock type must be a plain identifier"))
    }
}

/// Generate the mock type, its builders and its member identity enum.
///
/// Generation is deterministic: the same `Requirements` always produce the
/// same module.  If any member is malformed, the whole interface fails and no
/// output is produced.
pub fn generate(requirements: &Requirements, options: &Options)
    -> syn::Result<GeneratedModule>
{
    let mock_ident = mock_ident(&requirements.mock_type)?;
    let idents = EngineIdents::new(options);
    let isolation = Isolation::new(requirements);
    let cx = Context {
        requirements,
        idents: &idents,
        isolation: &isolation
    };
    emit::check_unique_names(&cx)?;
    let (mock_members, plumbing_len) = mock_type::assemble(&cx)?;
    let builders = builders::assemble(&cx)?;
    let member_enum = member_enum::assemble(&cx)?;
    Ok(GeneratedModule {
        interface: requirements.name.clone(),
        mock_type: requirements.mock_type.clone(),
        mock_ident,
        service: idents.engine_item("MockableService"),
        vis: requirements.modifiers.visibility(),
        mock_members,
        builders,
        member_enum,
        plumbing_len
    })
}

#[cfg(test)]
mod t {
    use super::*;
    use pretty_assertions::assert_eq;
    use syn::parse_quote;

    #[test]
    fn gen_mock_ident_prefixes() {
        let ident: Ident = parse_quote!(Foo);
        assert_eq!(gen_mock_ident(&ident), "MockFoo");
    }

    #[test]
    fn custom_mock_type() {
        let r = Requirements::new(parse_quote!(Store))
            .mock_type(parse_quote!(FakeStore));
        let m = generate(&r, &Options::default()).unwrap();
        assert_eq!(m.mock_ident, "FakeStore");
        assert_eq!(m.interface, "Store");
    }

    #[test]
    fn qualified_mock_type() {
        let r = Requirements::new(parse_quote!(Store))
            .mock_type(parse_quote!(fakes::FakeStore));
        let e = generate(&r, &Options::default()).unwrap_err();
        assert_eq!(e.to_string(), "The mock type must be a plain identifier");
    }

    #[test]
    fn custom_engine() {
        let r = Requirements::new(parse_quote!(Store));
        let options: Options = parse_quote!(engine = crate::engine);
        let m = generate(&r, &options).unwrap();
        let expected: syn::Path = parse_quote!(crate::engine::MockableService);
        assert_eq!(m.service, expected);
        let expected: syn::Path = parse_quote!(crate::engine::Builder);
        assert_eq!(m.builder(BuilderKind::Verify).unwrap().marker, expected);
    }

    #[test]
    fn visibility_follows_interface() {
        let r = Requirements::new(parse_quote!(Store))
            .modifiers(parse_quote!(#[nonisolated] pub(crate)));
        let m = generate(&r, &Options::default()).unwrap();
        let expected: syn::Visibility = parse_quote!(pub(crate));
        assert_eq!(m.vis, expected);
        assert_eq!(m.member_enum.vis, expected);
        for b in m.builders.iter() {
            assert_eq!(b.vis, expected);
        }
    }
}
