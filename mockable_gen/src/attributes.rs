// vim: tw=80
//! Attribute inspection and filtering.
//!
//! Raw attribute lists are scanned once, when a member is constructed, and
//! boiled down to [`Markers`].  Nothing downstream looks at attribute names
//! again.

use syn::{Attribute, Path};

/// Marks a member, or a generated declaration, as callable from outside the
/// interface's isolation domain
pub const NONISOLATED: &str = "nonisolated";

/// Confines a member, or a whole interface, to the main execution domain
pub const MAIN_ACTOR: &str = "main_actor";

/// Any interface attribute whose name ends with this names a global
/// execution domain
pub const GLOBAL_ACTOR_SUFFIX: &str = "_actor";

fn last_segment_is(path: &Path, name: &str) -> bool {
    path.segments.last()
        .map(|seg| seg.ident == name)
        .unwrap_or(false)
}

/// Is any of these attributes named `name`?
pub fn has_attr(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| last_segment_is(attr.path(), name))
}

/// Does this attribute confine its item to a named global execution domain?
pub fn is_global_domain(attr: &Attribute) -> bool {
    attr.path().segments.last()
        .map(|seg| {
            let name = seg.ident.to_string();
            name == MAIN_ACTOR || name.ends_with(GLOBAL_ACTOR_SUFFIX)
        }).unwrap_or(false)
}

/// Isolation-related facts about a single member
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Markers {
    /// The member is individually exempt from the interface's isolation
    pub exempt: bool,
    /// The member opts back into the main execution domain
    pub main_confined: bool,
}

impl Markers {
    pub fn from_attrs(attrs: &[Attribute]) -> Self {
        Markers {
            exempt: has_attr(attrs, NONISOLATED),
            main_confined: has_attr(attrs, MAIN_ACTOR),
        }
    }
}

fn is_marker(attr: &Attribute) -> bool {
    let path = attr.path();
    last_segment_is(path, NONISOLATED) || last_segment_is(path, MAIN_ACTOR)
}

/// Select which of a member's attributes get copied onto generated
/// declarations.
///
/// Isolation markers are always dropped, since the isolation resolver
/// re-derives them as modifiers.
#[derive(Clone, Copy, Debug)]
pub(crate) struct AttrFormatter<'a> {
    attrs: &'a [Attribute],
    doc: bool,
}

impl<'a> AttrFormatter<'a> {
    pub(crate) fn new(attrs: &'a [Attribute]) -> AttrFormatter<'a> {
        Self {
            attrs,
            doc: true,
        }
    }

    /// Should doc comments be kept?
    pub(crate) fn doc(&mut self, allowed: bool) -> &mut Self {
        self.doc = allowed;
        self
    }

    pub(crate) fn format(&mut self) -> Vec<Attribute> {
        self.attrs.iter()
            .filter(|attr| !is_marker(attr))
            .filter(|attr| self.doc || !attr.path().is_ident("doc"))
            .cloned()
            .collect()
    }
}
