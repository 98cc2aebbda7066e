/// Implements [`Contract`](crate::tools::Contract) with no extra checks for
/// argument types whose declared schema already covers every constraint.
///
/// # Example
/// ```rust
/// unchecked_contract!(GetTaskArgs, DeleteTaskArgs);
/// ```
/// expands to
/// ```rust
/// impl crate::tools::Contract for GetTaskArgs {}
/// impl crate::tools::Contract for DeleteTaskArgs {}
/// ```
///
/// Types with numeric ranges or other rules the schema cannot enforce on the
/// wire need a hand-written `impl Contract` instead.
#[macro_export]
macro_rules! unchecked_contract {
    ($($args:ty),* $(,)?) => {
        $(
            impl $crate::tools::Contract for $args {}
        )*
    };
}
