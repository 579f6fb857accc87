//! Macro support for port error enums.

/// Define a port error enum with `thiserror` display strings and
/// snake-case constructor functions.
///
/// Each variant uses struct-style fields (possibly empty) and a display
/// literal. Constructors take `impl Into<FieldType>` so call sites can pass
/// `&str` for `String` fields.
macro_rules! define_port_error {
    (
        $(#[$meta:meta])*
        $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $display:literal
            ),* $(,)?
        }
    ) => {
        paste::paste! {
            $(#[$meta])*
            #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
            pub enum $name {
                $(
                    $(#[$variant_meta])*
                    #[error($display)]
                    $variant { $($field: $ty),* },
                )*
            }

            impl $name {
                $(
                    #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                        Self::$variant { $($field: $field.into()),* }
                    }
                )*
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        /// Exercise error for the macro itself.
        ProbeError {
            Unreachable { message: String } => "service unreachable: {message}",
            Exhausted {} => "service exhausted",
        }
    }

    #[test]
    fn constructors_build_the_matching_variant() {
        let err = ProbeError::unreachable("socket closed");
        assert_eq!(
            err,
            ProbeError::Unreachable {
                message: "socket closed".into()
            }
        );
        assert_eq!(err.to_string(), "service unreachable: socket closed");
        assert_eq!(ProbeError::exhausted().to_string(), "service exhausted");
    }
}
