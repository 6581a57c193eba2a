// vim: tw=80
//! Shape of the generated module, independent of isolation.
#![deny(warnings)]

use mockable_gen::*;
use pretty_assertions::assert_eq;
use quote::ToTokens;
use syn::parse_quote;

fn store() -> Requirements {
    Requirements::new(parse_quote!(Store))
        .modifiers(parse_quote!(pub))
        .variable(Variable::new(Vec::new(), parse_quote!(capacity),
            parse_quote!(usize), false))
        .function(parse_quote!(fn get(&self, key: &str) -> Option<Vec<u8>>;))
        .variable(Variable::new(Vec::new(), parse_quote!(name),
            parse_quote!(String), true))
        .function(parse_quote!(
            fn put(&self, key: &str, value: Vec<u8>) -> Result<(), Error>;
        ))
        .initializer(parse_quote!(fn open(path: String) -> Result<Self, Error>;))
}

fn names(decls: &[Decl]) -> Vec<String> {
    decls.iter().map(|d| d.ident().to_string()).collect()
}

#[test]
fn deterministic() {
    let r = store();
    let first = generate(&r, &Options::default()).unwrap();
    let second = generate(&r, &Options::default()).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.to_token_stream().to_string(),
               second.to_token_stream().to_string());
}

#[test]
fn builder_completeness() {
    let m = generate(&store(), &Options::default()).unwrap();
    assert_eq!(m.builders.len(), 3);
    for (b, kind) in m.builders.iter().zip(BuilderKind::ALL) {
        assert_eq!(b.kind, kind);
        assert_eq!(b.ident, kind.type_name());
        assert_eq!(names(b.accessors()), ["capacity", "name", "get", "put"]);
    }
}

#[test]
fn mock_members() {
    let m = generate(&store(), &Options::default()).unwrap();
    assert_eq!(names(m.plumbing()),
        ["Mocker", "mocker", "_given", "_when", "_verify", "reset", "new"]);
    assert_eq!(names(m.conformances()),
        ["open", "get", "put", "capacity", "name"]);
}

#[test]
fn member_enum() {
    let m = generate(&store(), &Options::default()).unwrap();
    let cases = m.member_enum.variants.iter()
        .map(|v| v.ident.to_string())
        .collect::<Vec<_>>();
    assert_eq!(cases, [
        "m1_get_capacity",
        "m2_get_name",
        "m2_set_name",
        "m3_get",
        "m4_put"
    ]);
    let put = &m.member_enum.variants[4];
    let fields = put.fields.iter()
        .map(|ty| ty.to_token_stream().to_string())
        .collect::<Vec<_>>();
    let key: syn::Type = parse_quote!(
        ::mockable::Parameter<<str as ::std::borrow::ToOwned>::Owned>
    );
    let value: syn::Type = parse_quote!(::mockable::Parameter<Vec<u8> >);
    assert_eq!(fields, [
        key.to_token_stream().to_string(),
        value.to_token_stream().to_string()
    ]);
}

/// Scenario D: an empty interface still gets all the engine plumbing
#[test]
fn empty_interface() {
    let r = Requirements::new(parse_quote!(Empty));
    let m = generate(&r, &Options::default()).unwrap();
    assert_eq!(names(&m.mock_members),
        ["Mocker", "mocker", "_given", "_when", "_verify", "reset", "new"]);
    assert!(m.conformances().is_empty());
    assert_eq!(m.builders.len(), 3);
    for b in m.builders.iter() {
        assert_eq!(names(&b.members), ["mocker", "new"]);
    }
    assert!(m.member_enum.variants.is_empty());
}

#[test]
fn builder_accessors_return_engine_handles() {
    let m = generate(&store(), &Options::default()).unwrap();
    let handle = |kind: BuilderKind, name: &str| {
        let b = m.builder(kind).unwrap();
        let Some(Decl::Function(f)) = b.accessors().iter()
            .find(|d| d.ident() == name) else
        {
            panic!("No accessor for {}", name);
        };
        f.sig.output.to_token_stream().to_string()
    };
    let expected = quote::quote!(-> ::mockable::PropertyVerifyBuilder<
        'm, MockStore, VerifyBuilder<'m> >);
    assert_eq!(handle(BuilderKind::Verify, "name"), expected.to_string());
    let expected = quote::quote!(-> ::mockable::ThrowingFunctionActionBuilder<
        'm, MockStore, ActionBuilder<'m> >);
    assert_eq!(handle(BuilderKind::Action, "put"), expected.to_string());
    let expected = quote::quote!(-> ::mockable::FunctionReturnBuilder<
        'm, MockStore, ReturnBuilder<'m>, Option<Vec<u8> >,
        fn(&str) -> Option<Vec<u8> > >);
    assert_eq!(handle(BuilderKind::Return, "get"), expected.to_string());
}

#[test]
fn malformed_member() {
    let r = store().function(parse_quote!(fn build() -> u32;));
    let e = generate(&r, &Options::default()).unwrap_err();
    assert_eq!(e.to_string(), "Mocked functions must take self");
}

#[test]
fn malformed_initializer() {
    let r = store().initializer(parse_quote!(fn open(&self) -> Self;));
    let e = generate(&r, &Options::default()).unwrap_err();
    assert_eq!(e.to_string(), "Initializers must not take self");
}

#[test]
fn duplicate_names() {
    let r = store().function(parse_quote!(fn name(&self) -> String;));
    let e = generate(&r, &Options::default()).unwrap_err();
    assert_eq!(e.to_string(),
        "Member `name` conflicts with another generated name");
}

#[test]
fn setter_name_clash() {
    let r = Requirements::new(parse_quote!(Store))
        .variable(Variable::new(Vec::new(), parse_quote!(zone),
            parse_quote!(String), true))
        .function(parse_quote!(fn set_zone(&mut self, value: String);));
    let e = generate(&r, &Options::default()).unwrap_err();
    assert_eq!(e.to_string(),
        "Member `set_zone` conflicts with another generated name");
}

/// A read-only variable has no setter, so `set_` is free for a function
#[test]
fn no_setter_no_clash() {
    let r = Requirements::new(parse_quote!(Store))
        .variable(Variable::new(Vec::new(), parse_quote!(zone),
            parse_quote!(String), false))
        .function(parse_quote!(fn set_zone(&mut self, value: String);));
    assert!(generate(&r, &Options::default()).is_ok());
}

/// The module's fields are public, so its views must cope with any edits
#[test]
fn edited_module_views() {
    let mut m = generate(&store(), &Options::default()).unwrap();
    m.mock_members.truncate(3);
    assert_eq!(names(m.plumbing()), ["Mocker", "mocker", "_given"]);
    assert!(m.conformances().is_empty());

    m.builders.retain(|b| b.kind != BuilderKind::Action);
    assert!(m.builder(BuilderKind::Action).is_none());
    let verify = m.builder(BuilderKind::Verify).unwrap();
    assert_eq!(verify.kind, BuilderKind::Verify);

    m.builders[0].members.clear();
    assert!(m.builders[0].accessors().is_empty());
}

#[test]
fn reserved_names() {
    let r = Requirements::new(parse_quote!(Factory))
        .function(parse_quote!(fn new(&self) -> u32;));
    let e = generate(&r, &Options::default()).unwrap_err();
    assert_eq!(e.to_string(),
        "Member `new` conflicts with another generated name");
}
