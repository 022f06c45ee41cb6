//! Span-aware errors for the derive.
//!
//! Every fallible step returns [`MacroResult`] so the compiler can point at
//! the offending item instead of the derive panicking.

use proc_macro2::Span;
use quote::ToTokens;
use syn::Error;

/// Result type for all macro operations.
pub type MacroResult<T> = Result<T, Error>;

/// Create an error at the call site.
#[inline]
pub fn err_call_site<M: std::fmt::Display>(message: M) -> Error {
    Error::new(Span::call_site(), message)
}

/// Create an error pointing at `tokens`.
#[inline]
pub fn err_spanned<T: ToTokens, M: std::fmt::Display>(tokens: T, message: M) -> Error {
    Error::new_spanned(tokens, message)
}
