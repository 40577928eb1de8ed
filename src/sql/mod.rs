//! SQL text emission.
//!
//! SQL is assembled as a stream of typed tokens and serialized once, so
//! quoting and escaping live in exactly one place.

pub mod token;

pub use token::{Token, TokenStream};
