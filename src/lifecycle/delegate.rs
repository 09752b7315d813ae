/// Actions that can carry an upstream delegate event.
///
/// Features without delegate-style communication simply do not implement it.
pub trait DelegateActionExtractable {
    type Delegate;

    fn delegate_event(&self) -> Option<Self::Delegate>;
}

/// Extractor closure for one tuple variant of an action enum.
///
/// `extract_case!(Action::Delegate)` expands to a closure returning a clone of
/// the variant's payload, or `None` for every other variant.
#[macro_export]
macro_rules! extract_case {
    ($variant:path) => {
        |action| match action {
            $variant(value) => ::core::option::Option::Some(::core::clone::Clone::clone(value)),
            #[allow(unreachable_patterns)]
            _ => ::core::option::Option::None,
        }
    };
}
