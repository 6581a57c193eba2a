// vim: tw=80
//! The member identity enum.
//!
//! The engine keys its stubs, actions and call records by these cases.  Each
//! variable has a getter case, plus a setter case if it's mutable, and each
//! function has one case carrying its recorded arguments.

use crate::{
    decl::MemberEnum,
    emit::{Context, numbered}
};

pub(crate) fn assemble(cx: &Context) -> syn::Result<MemberEnum> {
    let mut variants = Vec::new();
    for (index, member) in numbered(cx.requirements) {
        variants.extend(member.variants(cx, index)?);
    }
    Ok(MemberEnum {
        vis: cx.requirements.modifiers.visibility(),
        ident: cx.idents.member.clone(),
        matchable: cx.idents.engine_item("Matchable"),
        variants
    })
}
