//! Serde attribute extraction.
//!
//! Only the attributes that change the serialized shape are read; everything
//! else inside `#[serde(...)]` is consumed and ignored.

use heck::{
    ToKebabCase, ToLowerCamelCase, ToShoutyKebabCase, ToShoutySnakeCase, ToSnakeCase,
    ToUpperCamelCase,
};
use syn::meta::ParseNestedMeta;

use crate::error::{MacroResult, err_spanned};

/// Serde attributes of a container, field or variant.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SerdeAttrs {
    /// `rename = "..."` or `rename(serialize = "...")`
    pub rename: Option<String>,
    pub rename_all: Option<RenameRule>,
    /// `skip` or `skip_serializing`
    pub skip: bool,
    pub transparent: bool,
}

/// Case conversion named by `rename_all`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl RenameRule {
    fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "lowercase" => Self::Lower,
            "UPPERCASE" => Self::Upper,
            "PascalCase" => Self::Pascal,
            "camelCase" => Self::Camel,
            "snake_case" => Self::Snake,
            "SCREAMING_SNAKE_CASE" => Self::ScreamingSnake,
            "kebab-case" => Self::Kebab,
            "SCREAMING-KEBAB-CASE" => Self::ScreamingKebab,
            _ => return None,
        })
    }

    pub fn apply(self, name: &str) -> String {
        match self {
            Self::Lower => name.to_lowercase(),
            Self::Upper => name.to_uppercase(),
            Self::Pascal => name.to_upper_camel_case(),
            Self::Camel => name.to_lower_camel_case(),
            Self::Snake => name.to_snake_case(),
            Self::ScreamingSnake => name.to_shouty_snake_case(),
            Self::Kebab => name.to_kebab_case(),
            Self::ScreamingKebab => name.to_shouty_kebab_case(),
        }
    }
}

/// Strips the `r#` prefix from raw identifiers.
pub fn strip_raw_prefix(ident: &str) -> &str {
    ident.strip_prefix("r#").unwrap_or(ident)
}

/// Collect the `#[serde(...)]` attributes in `attrs`.
pub fn parse_serde_attrs(attrs: &[syn::Attribute]) -> MacroResult<SerdeAttrs> {
    let mut parsed = SerdeAttrs::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("rename") {
                if let Some(value) = serialize_name(&meta)? {
                    parsed.rename = Some(value);
                }
            } else if meta.path.is_ident("rename_all") {
                if let Some(value) = serialize_name(&meta)? {
                    let rule = RenameRule::from_name(&value).ok_or_else(|| {
                        err_spanned(&meta.path, format!("unknown rename rule `{value}`"))
                    })?;
                    parsed.rename_all = Some(rule);
                }
            } else if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                parsed.skip = true;
            } else if meta.path.is_ident("transparent") {
                parsed.transparent = true;
            } else {
                ignore_value(&meta)?;
            }
            Ok(())
        })?;
    }
    Ok(parsed)
}

/// `= "name"` or `(serialize = "name", deserialize = "...")`.
fn serialize_name(meta: &ParseNestedMeta) -> syn::Result<Option<String>> {
    if meta.input.peek(syn::Token![=]) {
        let value: syn::LitStr = meta.value()?.parse()?;
        return Ok(Some(value.value()));
    }
    let mut name = None;
    meta.parse_nested_meta(|nested| {
        if nested.path.is_ident("serialize") {
            let value: syn::LitStr = nested.value()?.parse()?;
            name = Some(value.value());
        } else {
            ignore_value(&nested)?;
        }
        Ok(())
    })?;
    Ok(name)
}

fn ignore_value(meta: &ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(syn::Token![=]) {
        let _: syn::Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        let _content;
        syn::parenthesized!(_content in meta.input);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use syn::parse_quote;

    #[test]
    fn test_no_serde_attributes() {
        let attrs: Vec<syn::Attribute> = vec![parse_quote!(#[derive(Debug)]), parse_quote!(#[doc = " hi"])];
        assert_eq!(parse_serde_attrs(&attrs).unwrap(), SerdeAttrs::default());
    }

    #[test]
    fn test_container_attributes() {
        let attrs: Vec<syn::Attribute> = vec![
            parse_quote!(#[serde(rename_all = "camelCase", deny_unknown_fields)]),
            parse_quote!(#[serde(rename = "Forecast")]),
        ];
        let parsed = parse_serde_attrs(&attrs).unwrap();
        assert_eq!(parsed.rename.as_deref(), Some("Forecast"));
        assert_eq!(parsed.rename_all, Some(RenameRule::Camel));
        assert!(!parsed.skip);
    }

    #[test]
    fn test_field_attributes_ignore_unrelated_values() {
        let attrs: Vec<syn::Attribute> = vec![parse_quote!(
            #[serde(default, skip_serializing_if = "Option::is_none", with = "chrono::serde")]
        )];
        assert_eq!(parse_serde_attrs(&attrs).unwrap(), SerdeAttrs::default());
    }

    #[rstest]
    #[case(parse_quote!(#[serde(skip)]))]
    #[case(parse_quote!(#[serde(skip_serializing)]))]
    #[case(parse_quote!(#[serde(default, skip)]))]
    fn test_skip(#[case] attr: syn::Attribute) {
        assert!(parse_serde_attrs(&[attr]).unwrap().skip);
    }

    #[test]
    fn test_skip_deserializing_is_still_serialized() {
        let attr: syn::Attribute = parse_quote!(#[serde(skip_deserializing)]);
        assert!(!parse_serde_attrs(&[attr]).unwrap().skip);
    }

    #[test]
    fn test_rename_serialize_form() {
        let attr: syn::Attribute =
            parse_quote!(#[serde(rename(serialize = "tempC", deserialize = "temp_c"))]);
        assert_eq!(parse_serde_attrs(&[attr]).unwrap().rename.as_deref(), Some("tempC"));
    }

    #[test]
    fn test_transparent() {
        let attr: syn::Attribute = parse_quote!(#[serde(transparent)]);
        assert!(parse_serde_attrs(&[attr]).unwrap().transparent);
    }

    #[test]
    fn test_unknown_rename_rule() {
        let attr: syn::Attribute = parse_quote!(#[serde(rename_all = "Title Case")]);
        let error = parse_serde_attrs(&[attr]).unwrap_err();
        assert_eq!(error.to_string(), "unknown rename rule `Title Case`");
    }

    #[rstest]
    #[case(RenameRule::Camel, "city_name", "cityName")]
    #[case(RenameRule::Pascal, "city_name", "CityName")]
    #[case(RenameRule::Snake, "CityName", "city_name")]
    #[case(RenameRule::ScreamingSnake, "city_name", "CITY_NAME")]
    #[case(RenameRule::Kebab, "city_name", "city-name")]
    #[case(RenameRule::ScreamingKebab, "CityName", "CITY-NAME")]
    #[case(RenameRule::Lower, "Metric", "metric")]
    #[case(RenameRule::Upper, "Metric", "METRIC")]
    #[case(RenameRule::Camel, "Metric", "metric")]
    fn test_rename_rule(#[case] rule: RenameRule, #[case] name: &str, #[case] expected: &str) {
        assert_eq!(rule.apply(name), expected);
    }

    #[rstest]
    #[case("r#type", "type")]
    #[case("name", "name")]
    fn test_strip_raw_prefix(#[case] ident: &str, #[case] expected: &str) {
        assert_eq!(strip_raw_prefix(ident), expected);
    }
}
