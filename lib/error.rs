//! Provides `ErrMsg`, a simple trait to associate a constant string with an
//! error type, `mkerr`, a macro to easily implement it and error traits, and
//! [`StyleError`], the error type shared by all styling operations.

use itertools::Itertools;
use thiserror::Error;

/// Simple trait to associate a constant string with an error type.
pub trait ErrMsg {
    fn msg(&self) -> &'static str;
}

/// Simple macro to implement `ErrMsg`, `Display`, and `Error` for an error
/// type.
#[macro_export]
macro_rules! mkerr {
    ( $name:ident : { $( $var:ident => $msg:literal ),+ $(,)? } ) => {
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub enum $name {
            $( $var, )+
        }

        impl $crate::error::ErrMsg for $name {
            fn msg(&self) -> &'static str {
                return match *self {
                    $( $name::$var => $msg, )+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                return f.write_str($crate::error::ErrMsg::msg(self));
            }
        }

        impl std::error::Error for $name { }
    }
}

fn listing(names: &[String]) -> String {
    names.iter().map(|s| format!("'{}'", s)).join(", ")
}

#[derive(Error, Debug)]
pub enum StyleError {
    #[error("'{name}' is not a valid style; pick one of [{}]", listing(.available))]
    UnknownStyle { name: String, available: Vec<String> },

    #[error("no active axes to style; pass one explicitly")]
    NoActiveAxes,

    #[error("no axes registered under '{0}'")]
    UnknownAxes(String),

    #[error("color cycle did not repeat within {cap} draws; the palette probably contains duplicate colors")]
    DegenerateCycle { cap: usize },

    #[error("color cycle is empty")]
    EmptyCycle,

    #[error("unknown style option '{key}'; recognized options are [{}]", listing(.known))]
    UnknownOption { key: String, known: Vec<String> },

    #[error("invalid value for style option '{key}': expected {expected} but got {got}")]
    InvalidOption { key: String, expected: &'static str, got: String },

    #[error("malformed rc parameter key '{0}'")]
    InvalidRcKey(String),

    #[cfg(feature = "config")]
    #[error(transparent)]
    Config(#[from] crate::config::ConfigError),
}
pub type StyleResult<T> = Result<T, StyleError>;
