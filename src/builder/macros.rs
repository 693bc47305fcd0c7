//! Macros for ergonomic state declarations.

/// Declare a state enum and implement [`State`](crate::core::State) for it.
///
/// Variant names become state names, and the first variant is the state a
/// new machine moves to out of `INIT`.
///
/// # Example
///
/// ```
/// use tabular_fsm::core::State;
/// use tabular_fsm::state_enum;
///
/// state_enum! {
///     pub enum Light {
///         Red,
///         Green,
///         Yellow,
///     }
/// }
///
/// assert_eq!(Light::user_start(), Light::Red);
/// assert_eq!(Light::Yellow.name(), "Yellow");
/// ```
#[macro_export]
macro_rules! state_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(#[$first_meta:meta])*
            $first:ident
            $(,
                $(#[$variant_meta:meta])*
                $variant:ident
            )* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(#[$first_meta])*
            $first,
            $(
                $(#[$variant_meta])*
                $variant,
            )*
        }

        impl $crate::core::State for $name {
            fn name(&self) -> &str {
                match self {
                    Self::$first => stringify!($first),
                    $(Self::$variant => stringify!($variant),)*
                }
            }

            fn user_start() -> Self {
                Self::$first
            }
        }
    };
}
