//! Domain layer: the quote value and the provider response shape.

pub mod quote;

pub use quote::{Quote, USD_BRL_PAIR};
