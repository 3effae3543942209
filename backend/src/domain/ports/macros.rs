//! Helper macro for declaring port error enums.
//!
//! Every variant carries named fields and gets a snake_case constructor whose
//! parameters accept `impl Into<FieldType>`.

macro_rules! define_port_error {
    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
            #[must_use]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                Self::$variant { $($field: $field.into()),* }
            }
        }
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant {
                    $(
                        #[doc = concat!("`", stringify!($field), "` reported by the adapter.")]
                        $field : $ty
                    ),*
                },
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant { $($field : $ty),* });
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        /// Errors from a store health check.
        pub enum StoreProbeError {
            /// Host did not answer.
            Unreachable { host: String } => "store at {host} is unreachable",
            /// Host answered too late.
            Slow { host: String, millis: u64 } => "store at {host} answered after {millis}ms",
        }
    }

    #[test]
    fn constructor_accepts_borrowed_strings() {
        let err = StoreProbeError::unreachable("db-1");
        assert_eq!(err.to_string(), "store at db-1 is unreachable");
    }

    #[test]
    fn constructor_keeps_field_order() {
        let err = StoreProbeError::slow("db-2", 1500_u64);
        assert_eq!(
            err,
            StoreProbeError::Slow {
                host: "db-2".to_owned(),
                millis: 1500,
            }
        );
        assert_eq!(err.to_string(), "store at db-2 answered after 1500ms");
    }
}
