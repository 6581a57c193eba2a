// vim: tw=80
//! Decides which qualifiers every generated declaration carries.
//!
//! All isolation rules live here.  The mock type, the builder types and the
//! default initializer all ask the same [`Isolation`] value, so the rules
//! can't drift apart between them.
//!
//! Interface-wide rules, first match wins:
//! 1. An actor interface, or one with any individually exempt member: the base
//!    modifiers plus `nonisolated`.
//! 2. An interface confined to a global execution domain: the base modifiers
//!    plus `nonisolated`.
//! 3. Otherwise the base modifiers unchanged.
//!
//! A member marked `#[main_actor]` then drops `nonisolated` again, and a
//! member marked `#[nonisolated]` always keeps it.  The default initializer
//! of an actor is the one exception: it gets the interface's modifiers
//! verbatim, because an actor's synchronous initializer can't be exempted.

use crate::{
    attributes::Markers,
    modifiers::Modifiers,
    requirements::Requirements
};

#[derive(Clone, Debug)]
pub struct Isolation {
    modifiers: Modifiers,
    is_actor: bool,
    has_exempt_members: bool,
    is_globally_isolated: bool,
}

impl Isolation {
    pub fn new(requirements: &Requirements) -> Self {
        Isolation {
            modifiers: requirements.modifiers.clone(),
            is_actor: requirements.is_actor,
            has_exempt_members: requirements.has_isolation_exempt_members,
            is_globally_isolated: requirements.has_global_isolation_attribute,
        }
    }

    /// Does the interface as a whole force generated declarations to be
    /// exempt?
    fn exempt_by_default(&self) -> bool {
        self.is_actor || self.has_exempt_members || self.is_globally_isolated
    }

    /// Modifiers for a declaration, starting from the interface's own.
    pub fn resolve(&self, member: Option<&Markers>) -> Modifiers {
        self.resolve_from(&self.modifiers, member)
    }

    /// Modifiers for a declaration, starting from `base`.
    ///
    /// Used by callers that have already resolved a default once and now
    /// apply a member's own markers on top of it.
    pub fn resolve_from(&self, base: &Modifiers, member: Option<&Markers>)
        -> Modifiers
    {
        let mut modifiers = if self.exempt_by_default() {
            base.clone().with_nonisolated()
        } else {
            base.clone()
        };
        if let Some(markers) = member {
            if markers.main_confined {
                modifiers = modifiers.without_nonisolated();
            } else if markers.exempt {
                modifiers = modifiers.with_nonisolated();
            }
        }
        modifiers
    }

    /// Modifiers for the mock's own default initializer
    pub fn default_initializer(&self) -> Modifiers {
        if self.is_actor {
            self.modifiers.clone()
        } else {
            self.resolve(None)
        }
    }
}
