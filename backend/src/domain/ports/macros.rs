//! Generates the error enums returned by outbound ports.

/// Declare a `thiserror` enum whose variants all carry named fields, plus a
/// snake_case constructor per variant accepting `impl Into<T>` arguments.
macro_rules! define_port_error {
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
                $variant { $($field: $ty),* },
            )*
        }

        impl $name {
            $(
                ::paste::paste! {
                    #[doc = concat!("Build [`", stringify!($name), "::", stringify!($variant), "`].")]
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                        Self::$variant { $($field: $field.into()),* }
                    }
                }
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SamplePortError {
            Connection { message: String } => "connection lost: {message}",
            Conflict { key: String, attempts: u32 } => "conflict on {key} after {attempts} attempts",
        }
    }

    #[test]
    fn constructors_convert_into_field_types() {
        let err = SamplePortError::connection("socket closed");
        assert_eq!(err, SamplePortError::Connection { message: "socket closed".to_owned() });
        assert_eq!(err.to_string(), "connection lost: socket closed");
    }

    #[test]
    fn constructors_keep_field_order() {
        let err = SamplePortError::conflict("email", 2_u32);
        assert_eq!(err.to_string(), "conflict on email after 2 attempts");
    }
}
