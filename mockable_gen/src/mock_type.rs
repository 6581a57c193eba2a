// vim: tw=80
//! Members of the mock type itself.

use syn::{Expr, parse_quote};

use crate::{
    builder_kind::BuilderKind,
    decl::{Decl, Field, FnDecl, Property, TypeAlias, Unavailable},
    emit::{Context, Member, numbered}
};

/// `type Mocker = ::mockable::Mocker<MockFoo>;`
fn alias(cx: &Context) -> TypeAlias {
    let engine_mocker = cx.idents.engine_item("Mocker");
    let mock = cx.mock_type();
    TypeAlias {
        ident: cx.idents.mocker.clone(),
        ty: parse_quote!(#engine_mocker<#mock>)
    }
}

/// The engine instance, owned by the mock and never exposed
fn engine_field(cx: &Context) -> Field {
    let mocker = &cx.idents.mocker;
    Field {
        modifiers: cx.isolation.resolve(None).without_visibility(),
        ident: cx.idents.mocker_field.clone(),
        ty: parse_quote!(#mocker),
        init: Some(parse_quote!(#mocker::new()))
    }
}

/// A builder-typed property that tests must not use directly.  The engine's
/// `given`, `when` and `verify` functions read it on their behalf, passing
/// the engine's private token.
fn interceptor(cx: &Context, kind: BuilderKind) -> Property {
    let builder = kind.ident();
    let mocker = &cx.idents.mocker_field;
    let engine = &cx.idents.engine;
    Property {
        attrs: Vec::new(),
        modifiers: cx.isolation.resolve(None),
        ident: kind.interceptor(),
        ty: parse_quote!(#builder<'_>),
        getter: parse_quote!({ #builder::new(&self.#mocker) }),
        setter: None,
        unavailable: Some(Unavailable {
            message: kind.interceptor_message(),
            token: parse_quote!(#engine::__private::Token)
        })
    }
}

/// `reset(scopes = MockerScope::all())`
fn reset(cx: &Context) -> FnDecl {
    let reset = &cx.idents.reset;
    let scopes = &cx.idents.scopes;
    let mocker = &cx.idents.mocker_field;
    let scope = cx.idents.engine_item("MockerScope");
    let all: Expr = parse_quote!(#scope::all());
    FnDecl {
        attrs: Vec::new(),
        modifiers: cx.isolation.resolve(None),
        sig: parse_quote!(
            fn #reset(&self, #scopes: ::std::collections::HashSet<#scope>)
        ),
        defaults: vec![(scopes.clone(), all)],
        body: parse_quote!({ self.#mocker.#reset(#scopes) })
    }
}

/// `new(policy)`: builds the mock around a default engine, overriding the
/// engine's policy if one is given
fn default_initializer(cx: &Context, field: &Field) -> FnDecl {
    let new = &cx.idents.new;
    let policy = &cx.idents.policy;
    let policy_ty = cx.idents.engine_item("MockerPolicy");
    let mocker = &field.ident;
    let init = &field.init;
    FnDecl {
        attrs: Vec::new(),
        modifiers: cx.isolation.default_initializer(),
        sig: parse_quote!(
            fn #new(#policy: ::std::option::Option<#policy_ty>) -> Self
        ),
        defaults: Vec::new(),
        body: parse_quote!({
            let mut this = Self { #mocker: #init };
            if let ::std::option::Option::Some(#policy) = #policy {
                this.#mocker.#policy = #policy;
            }
            this
        })
    }
}

/// Every member of the mock type, in order: the engine alias and field, the
/// three interceptors, `reset`, the default initializer, then the interface's
/// initializers, functions and variables.
///
/// Returns the members and how many of them come before the conformances.
pub(crate) fn assemble(cx: &Context) -> syn::Result<(Vec<Decl>, usize)> {
    let field = engine_field(cx);
    let init = default_initializer(cx, &field);
    let mut members = vec![
        Decl::TypeAlias(alias(cx)),
        Decl::Field(field),
    ];
    members.extend(BuilderKind::ALL.iter()
        .map(|kind| Decl::Property(interceptor(cx, *kind))));
    members.push(Decl::Function(reset(cx)));
    members.push(Decl::Initializer(init));
    let plumbing_len = members.len();

    let requirements = cx.requirements;
    for init in requirements.initializers.iter() {
        members.push(Member::Initializer(init).conformance(cx, 0)?);
    }
    // Conformances are listed functions first, but numbered variables first
    let mut functions = Vec::new();
    let mut variables = Vec::new();
    for (index, member) in numbered(requirements) {
        let decl = member.conformance(cx, index)?;
        match member {
            Member::Function(_) => functions.push(decl),
            _ => variables.push(decl)
        }
    }
    members.extend(functions);
    members.extend(variables);
    Ok((members, plumbing_len))
}

#[cfg(test)]
mod t {
    use super::*;
    use crate::{
        emit::with_context,
        modifiers::Modifiers,
        requirements::{Requirements, Variable}
    };
    use pretty_assertions::assert_eq;
    use quote::{ToTokens, quote};

    fn names(decls: &[Decl]) -> Vec<String> {
        decls.iter().map(|d| d.ident().to_string()).collect()
    }

    #[test]
    fn empty() {
        let r = Requirements::new(parse_quote!(Clock));
        let (members, plumbing) = with_context(&r, assemble).unwrap();
        assert_eq!(plumbing, 7);
        assert_eq!(names(&members),
            ["Mocker", "mocker", "_given", "_when", "_verify", "reset", "new"]);
    }

    #[test]
    fn conformance_order() {
        let r = Requirements::new(parse_quote!(Clock))
            .variable(Variable::new(Vec::new(), parse_quote!(zone),
                parse_quote!(String), false))
            .function(parse_quote!(fn now(&self) -> u64;))
            .function(parse_quote!(fn sleep(&self, ms: u64);))
            .initializer(parse_quote!(fn utc() -> Self;));
        let (members, plumbing) = with_context(&r, assemble).unwrap();
        assert_eq!(names(&members[plumbing..]), ["utc", "now", "sleep", "zone"]);
        // Numbering follows builder order, not conformance order
        let Decl::Function(now) = &members[plumbing + 1] else {
            panic!("Expected a function");
        };
        let stmt = now.body.stmts[0].to_token_stream().to_string();
        assert_eq!(stmt, quote!(let member = Member::m2_now;).to_string());
    }

    #[test]
    fn alias_and_field() {
        let r = Requirements::new(parse_quote!(Clock));
        let (members, _) = with_context(&r, assemble).unwrap();
        let Decl::TypeAlias(alias) = &members[0] else {
            panic!("Expected a type alias");
        };
        assert_eq!(alias.ty.to_token_stream().to_string(),
                   quote!(::mockable::Mocker<MockClock>).to_string());
        let Decl::Field(field) = &members[1] else {
            panic!("Expected a field");
        };
        assert_eq!(field.modifiers, Modifiers::new());
        assert_eq!(field.init.to_token_stream().to_string(),
                   quote!(Mocker::new()).to_string());
    }

    #[test]
    fn interceptors_are_unavailable() {
        let r = Requirements::new(parse_quote!(Clock));
        let (members, _) = with_context(&r, assemble).unwrap();
        let gates = members[2..5].iter().map(|d| match d {
            Decl::Property(p) => p.unavailable.clone().unwrap(),
            other => panic!("Expected a property, got {:?}", other)
        }).collect::<Vec<_>>();
        let messages = gates.iter()
            .map(|u| u.message.as_str())
            .collect::<Vec<_>>();
        assert_eq!(messages, [
            "Use given(&mock) instead.",
            "Use when(&mock) instead.",
            "Use verify(&mock) instead."
        ]);
        let token: syn::Type = parse_quote!(::mockable::__private::Token);
        for gate in gates.iter() {
            assert_eq!(gate.token, token);
        }
    }

    #[test]
    fn reset_defaults_to_all_scopes() {
        let r = Requirements::new(parse_quote!(Clock));
        let (members, _) = with_context(&r, assemble).unwrap();
        let Decl::Function(reset) = &members[5] else {
            panic!("Expected a function");
        };
        assert_eq!(reset.defaults.len(), 1);
        assert_eq!(reset.defaults[0].0, "scopes");
        assert_eq!(reset.defaults[0].1.to_token_stream().to_string(),
                   quote!(::mockable::MockerScope::all()).to_string());
        assert_eq!(reset.body.to_token_stream().to_string(),
                   quote!({ self.mocker.reset(scopes) }).to_string());
    }

    #[test]
    fn default_initializer_applies_policy() {
        let r = Requirements::new(parse_quote!(Clock));
        let (members, _) = with_context(&r, assemble).unwrap();
        let Decl::Initializer(init) = &members[6] else {
            panic!("Expected an initializer");
        };
        let expected = quote!({
            let mut this = Self { mocker: Mocker::new() };
            if let ::std::option::Option::Some(policy) = policy {
                this.mocker.policy = policy;
            }
            this
        });
        assert_eq!(init.body.to_token_stream().to_string(),
                   expected.to_string());
    }

    #[test]
    fn malformed_member_aborts() {
        let r = Requirements::new(parse_quote!(Clock))
            .function(parse_quote!(fn now(&self) -> u64;))
            .function(parse_quote!(fn tick();));
        assert!(with_context(&r, assemble).is_err());
    }
}
