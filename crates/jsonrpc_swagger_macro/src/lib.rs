//! Derive macro for `jsonrpc_swagger` type descriptors.
//!
//! `#[derive(Describe)]` implements `jsonrpc_swagger::descriptor::Describe`
//! for named structs, newtype structs and unit-only enums. The serde
//! attributes `rename`, `rename_all`, `skip` and `transparent` are honoured
//! so that the documented shape matches the serialized one.

mod describe_impl;
mod error;
mod serde_attrs;

use proc_macro::TokenStream;

use crate::describe_impl::process_derive_describe;

#[cfg(not(tarpaulin_include))]
#[proc_macro_derive(Describe, attributes(serde))]
pub fn derive_describe(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    process_derive_describe(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
