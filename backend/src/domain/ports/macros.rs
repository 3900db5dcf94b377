//! `define_port_error!`: error enums for driven ports.
//!
//! Every variant gets a snake_case constructor taking `impl Into<T>` per
//! field, so adapters can write `RecipeRepositoryError::query(err.to_string())`
//! as readily as `RecipeRepositoryError::query("pool closed")`.

macro_rules! define_port_error {
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
            $( define_port_error!(@constructor $variant $( $($field : $ty),* )?); )*
        }
    };

    (@constructor $variant:ident $($field:ident : $ty:ty),*) => {
        ::paste::paste! {
            #[doc = concat!("Build [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                define_port_error!(@value $variant $($field),*)
            }
        }
    };

    (@value $variant:ident) => {
        Self::$variant
    };

    (@value $variant:ident $($field:ident),+) => {
        Self::$variant { $($field: $field.into()),+ }
    };
}

pub(crate) use define_port_error;
