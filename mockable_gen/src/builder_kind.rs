// vim: tw=80
use proc_macro2::Span;
use syn::Ident;

/// One of the three companion builder types generated for every mock
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BuilderKind {
    /// Registers stubbed return values
    Return,
    /// Registers side-effecting actions to run when a member is invoked
    Action,
    /// Inspects the recorded invocation history
    Verify,
}

impl BuilderKind {
    pub const ALL: [BuilderKind; 3] = [
        BuilderKind::Return,
        BuilderKind::Action,
        BuilderKind::Verify
    ];

    /// Name of the generated builder type
    pub fn type_name(self) -> &'static str {
        match self {
            BuilderKind::Return => "ReturnBuilder",
            BuilderKind::Action => "ActionBuilder",
            BuilderKind::Verify => "VerifyBuilder",
        }
    }

    pub fn ident(self) -> Ident {
        Ident::new(self.type_name(), Span::call_site())
    }

    /// Name of the engine function that tests use to reach this builder
    pub fn entry_point(self) -> &'static str {
        match self {
            BuilderKind::Return => "given",
            BuilderKind::Action => "when",
            BuilderKind::Verify => "verify",
        }
    }

    /// The mock type's interceptor property for this builder, eg "_given"
    pub fn interceptor(self) -> Ident {
        Ident::new(&format!("_{}", self.entry_point()), Span::call_site())
    }

    /// Diagnostic attached to the interceptor property
    pub fn interceptor_message(self) -> String {
        format!("Use {}(&mock) instead.", self.entry_point())
    }

    /// Engine handle type returned by a function's accessor
    pub fn function_handle(self, throwing: bool) -> String {
        if throwing {
            format!("ThrowingFunction{}", self.type_name())
        } else {
            format!("Function{}", self.type_name())
        }
    }

    /// Engine handle type returned by a variable's accessor
    pub fn property_handle(self) -> String {
        format!("Property{}", self.type_name())
    }

    /// Does this kind's handle need to know the member's return type?
    pub fn is_typed(self) -> bool {
        self == BuilderKind::Return
    }
}

#[cfg(test)]
mod t {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn names() {
        let names = BuilderKind::ALL.iter()
            .map(|k| k.type_name())
            .collect::<Vec<_>>();
        assert_eq!(names, ["ReturnBuilder", "ActionBuilder", "VerifyBuilder"]);
        assert_eq!(BuilderKind::Action.interceptor(), "_when");
        assert_eq!(BuilderKind::Verify.interceptor_message(),
                   "Use verify(&mock) instead.");
    }

    #[test]
    fn handles() {
        assert_eq!(BuilderKind::Return.function_handle(false),
                   "FunctionReturnBuilder");
        assert_eq!(BuilderKind::Action.function_handle(true),
                   "ThrowingFunctionActionBuilder");
        assert_eq!(BuilderKind::Verify.property_handle(),
                   "PropertyVerifyBuilder");
    }
}
