/// Defines a newtype ID wrapper around an integer-like scalar (typically `i64`)
/// and generates:
/// - derives (Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)
/// - `Display`
/// - `From<$inner> for $name` and `From<$name> for $inner`
///
/// The wrapper is `#[serde(transparent)]`, so `AnimalId(3)` travels as `3`.
///
/// Usage:
///   define_id_type!(i64, AnimalId);
#[macro_export]
macro_rules! define_id_type {
    ($inner:ty, $name:ident) => {
        #[derive(
            Debug,
            Copy,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::write!(f, "{}", self.0)
            }
        }

        impl ::std::convert::From<$inner> for $name {
            fn from(v: $inner) -> Self {
                $name(v)
            }
        }

        impl ::std::convert::From<$name> for $inner {
            fn from(v: $name) -> Self {
                v.0
            }
        }

        impl $name {
            pub fn new(value: $inner) -> Self {
                $name(value)
            }

            pub fn value(&self) -> $inner {
                self.0
            }
        }
    };
}

/// Defines a field-less enum persisted as an `i16` discriminant and generates
/// a compile-time option table for select lists:
/// - derives (Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)
/// - `ALL`, `value()`, `from_value()`, `name()`, `label()`, `options()`
/// - `TryFrom<i16>`
///
/// Ordering follows the discriminants, which is what makes `SecurityLevel`
/// comparable as an ordinal.
///
/// Usage:
///   define_option_enum!(
///       /// Docs
///       ActivityPattern {
///           #[default]
///           Diurnal = 0 => "Dagactief",
///           Nocturnal = 1 => "Nachtactief",
///       }
///   );
#[macro_export]
macro_rules! define_option_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident = $value:literal => $label:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(
            Debug,
            Copy,
            Clone,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Default,
            serde::Serialize,
            serde::Deserialize,
        )]
        #[repr(i16)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                $variant = $value,
            )+
        }

        impl $name {
            /// Every variant, in discriminant order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn value(self) -> i16 {
                self as i16
            }

            pub fn from_value(value: i16) -> Option<Self> {
                match value {
                    $($value => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Serialized (wire) name of the variant.
            pub fn name(self) -> &'static str {
                match self {
                    $($name::$variant => stringify!($variant),)+
                }
            }

            /// Display label used by select lists.
            pub fn label(self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn options() -> Vec<$crate::models::EnumOption> {
                Self::ALL
                    .iter()
                    .map(|v| $crate::models::EnumOption {
                        value: i32::from(v.value()),
                        name: v.name(),
                        label: v.label(),
                    })
                    .collect()
            }
        }

        impl ::std::convert::TryFrom<i16> for $name {
            type Error = String;

            fn try_from(value: i16) -> Result<Self, Self::Error> {
                $name::from_value(value).ok_or_else(|| {
                    format!("invalid {} value: {}", stringify!($name), value)
                })
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }
    };
}
