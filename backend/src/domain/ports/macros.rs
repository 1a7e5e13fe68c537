//! Helper macro for declaring port error enums.
//!
//! Each variant gets a `thiserror` message and a snake_case constructor whose
//! parameters accept anything convertible into the field types.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Construct the `", stringify!($variant), "` variant.")]
            #[must_use]
            pub const fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = concat!("Construct the `", stringify!($variant), "` variant.")]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    define_port_error! {
        pub enum ExamplePortError {
            Unavailable => "store unavailable",
            Query { message: String } => "query failed: {message}",
            Missing { post_id: i64 } => "post {post_id} missing",
            Both { message: String, post_id: i64 } => "{message} on post {post_id}",
        }
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(ExamplePortError::unavailable(), ExamplePortError::Unavailable);
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = ExamplePortError::query("timeout");
        assert_eq!(err.to_string(), "query failed: timeout");
    }

    #[test]
    fn constructors_preserve_non_string_types() {
        let err = ExamplePortError::missing(42_i64);
        assert_eq!(err.to_string(), "post 42 missing");
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = ExamplePortError::both("locked", 7_i64);
        assert_eq!(err.to_string(), "locked on post 7");
    }
}
