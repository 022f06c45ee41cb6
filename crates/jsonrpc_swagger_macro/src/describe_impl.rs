//! `#[derive(Describe)]` expansion.
//!
//! Supported shapes:
//!
//! - named structs (and unit structs) become `TypeDescriptor::Object`
//! - newtype structs and `#[serde(transparent)]` structs describe their inner type
//! - unit-only enums become `TypeDescriptor::Enum`
//!
//! Generic parameters receive a `Describe` bound and prefix the schema id,
//! so `Wrapper<String>` is registered as `StringWrapper`.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, GenericParam};

use crate::error::{MacroResult, err_call_site, err_spanned};
use crate::serde_attrs::{RenameRule, SerdeAttrs, parse_serde_attrs, strip_raw_prefix};

/// Expand the derive for `input`.
pub(crate) fn process_derive_describe(input: &DeriveInput) -> MacroResult<TokenStream> {
    let container = parse_serde_attrs(&input.attrs)?;
    let body = match &input.data {
        Data::Struct(data) => struct_body(input, &container, &data.fields)?,
        Data::Enum(data) => Body::Named(enum_body(input, &container, data)?),
        Data::Union(_) => return Err(err_call_site("unions cannot derive `Describe`")),
    };

    let name = &input.ident;
    let mut generics = input.generics.clone();
    let type_params: Vec<_> = generics.type_params().map(|param| param.ident.clone()).collect();
    for param in &mut generics.params {
        if let GenericParam::Type(param) = param {
            param
                .bounds
                .push(syn::parse_quote!(::jsonrpc_swagger::descriptor::Describe));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let schema_name = container
        .rename
        .clone()
        .unwrap_or_else(|| strip_raw_prefix(&name.to_string()).to_string());
    let full_name = strip_raw_prefix(&name.to_string()).to_string();

    let describe = match body {
        Body::Delegate(body) => body,
        Body::Named(body) => quote! {
            let mut name = ::std::string::String::new();
            #(
                name.push_str(
                    &<#type_params as ::jsonrpc_swagger::descriptor::Describe>::describe().schema_name(),
                );
            )*
            name.push_str(#schema_name);
            let full_name = ::std::concat!(::std::module_path!(), "::", #full_name);
            #body
        },
    };

    Ok(quote! {
        impl #impl_generics ::jsonrpc_swagger::descriptor::Describe for #name #ty_generics #where_clause {
            fn describe() -> ::jsonrpc_swagger::descriptor::TypeDescriptor {
                #describe
            }
        }
    })
}

/// Expansion of `describe()`; named bodies refer to the `name` and
/// `full_name` locals.
enum Body {
    Delegate(TokenStream),
    Named(TokenStream),
}

fn struct_body(
    input: &DeriveInput,
    container: &SerdeAttrs,
    fields: &Fields,
) -> MacroResult<Body> {
    match fields {
        Fields::Named(named) if container.transparent => {
            let mut serialized = Vec::new();
            for field in &named.named {
                if !parse_serde_attrs(&field.attrs)?.skip {
                    serialized.push(field);
                }
            }
            match serialized.as_slice() {
                [field] => Ok(delegate(&field.ty)),
                _ => Err(err_spanned(
                    &input.ident,
                    "transparent structs need exactly one serialized field",
                )),
            }
        }
        Fields::Named(named) => {
            let mut described = Vec::new();
            for field in &named.named {
                let attrs = parse_serde_attrs(&field.attrs)?;
                if attrs.skip {
                    continue;
                }
                let Some(ident) = &field.ident else {
                    continue;
                };
                let field_name = strip_raw_prefix(&ident.to_string()).to_string();
                let ty = &field.ty;
                let rename = serialized_name(&field_name, &attrs, container.rename_all)
                    .map(|rename| quote!(.renamed(#rename)));
                described.push(quote! {
                    .field(
                        ::jsonrpc_swagger::descriptor::FieldDescriptor::new(
                            #field_name,
                            <#ty as ::jsonrpc_swagger::descriptor::Describe>::describe,
                        )
                        #rename
                    )
                });
            }
            Ok(Body::Named(quote! {
                ::jsonrpc_swagger::descriptor::TypeDescriptor::Object(
                    ::jsonrpc_swagger::descriptor::ObjectDescriptor::new(name, full_name)
                    #(#described)*
                )
            }))
        }
        Fields::Unnamed(unnamed) if unnamed.unnamed.len() == 1 => {
            Ok(delegate(&unnamed.unnamed[0].ty))
        }
        Fields::Unnamed(_) => Err(err_spanned(
            &input.ident,
            "tuple structs with more than one field cannot derive `Describe`",
        )),
        Fields::Unit => Ok(Body::Named(quote! {
            ::jsonrpc_swagger::descriptor::TypeDescriptor::Object(
                ::jsonrpc_swagger::descriptor::ObjectDescriptor::new(name, full_name)
            )
        })),
    }
}

fn enum_body(
    input: &DeriveInput,
    container: &SerdeAttrs,
    data: &syn::DataEnum,
) -> MacroResult<TokenStream> {
    let mut variants = Vec::new();
    for variant in &data.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(err_spanned(
                &variant.ident,
                format!(
                    "`{}` carries data; only unit-only enums can derive `Describe`",
                    variant.ident
                ),
            ));
        }
        let attrs = parse_serde_attrs(&variant.attrs)?;
        if attrs.skip {
            continue;
        }
        let variant_name = strip_raw_prefix(&variant.ident.to_string()).to_string();
        variants.push(
            serialized_name(&variant_name, &attrs, container.rename_all).unwrap_or(variant_name),
        );
    }
    if variants.is_empty() {
        return Err(err_spanned(
            &input.ident,
            "enums without serialized variants cannot derive `Describe`",
        ));
    }
    Ok(quote! {
        ::jsonrpc_swagger::descriptor::TypeDescriptor::Enum(
            ::jsonrpc_swagger::descriptor::EnumDescriptor {
                name,
                full_name: full_name.to_string(),
                variants: ::std::vec![#(::std::string::String::from(#variants)),*],
            }
        )
    })
}

/// Explicit name of a field or variant, `None` when the declared name is kept.
fn serialized_name(
    declared: &str,
    attrs: &SerdeAttrs,
    rename_all: Option<RenameRule>,
) -> Option<String> {
    attrs
        .rename
        .clone()
        .or_else(|| rename_all.map(|rule| rule.apply(declared)))
}

fn delegate(ty: &syn::Type) -> Body {
    Body::Delegate(quote! {
        <#ty as ::jsonrpc_swagger::descriptor::Describe>::describe()
    })
}
