//! Documentation member ids.
//!
//! Doc-comment files key every entry by a member id such as
//! `T:Weather.Models.Service` or
//! `M:Weather.Math.Add(System.Int32,System.Int32)`. The functions here rewrite
//! reflected type and signature text into that form:
//!
//! - whitespace is dropped
//! - `::` and `+` (nested types) become `.`
//! - generic arity markers (`` `1 ``, ``` ``2 ```) are dropped
//! - generic argument lists `<..>` and `[..]` become `{..}`
//! - `[]` array suffixes and Rust slices/arrays render as `T[]`
//! - references, `mut` and lifetimes are dropped
//! - bare integer aliases are qualified with `System.`, `alloc`/`core` paths with `std`

/// Integer aliases that reflected signatures print without their namespace.
const SYSTEM_ALIASES: &[&str] = &["Int16", "Int32", "Int64", "UInt16", "UInt32", "UInt64"];

/// `T:` id of a type.
pub fn for_type(full_name: &str) -> String {
    format!("T:{}", normalize_type(full_name))
}

/// `P:` id of a property declared on `declaring_type`.
pub fn for_property(declaring_type: &str, property: &str) -> String {
    format!("P:{}.{}", normalize_type(declaring_type), property.trim())
}

/// `M:` id of a method.
///
/// `signature` is reflected text such as `Task`1[Int32] Add(Int32, Int32)`;
/// only the parameter list following `method_name` is used. Methods without
/// parameters have no parentheses.
pub fn for_method(controller: &str, method_name: &str, signature: &str) -> String {
    let declaring = normalize_type(controller);
    let parameters: Vec<String> = parameter_list(signature, method_name)
        .map(|list| {
            split_top_level(list)
                .into_iter()
                .filter(|p| !p.trim().is_empty())
                .map(normalize_type)
                .collect()
        })
        .unwrap_or_default();

    if parameters.is_empty() {
        format!("M:{declaring}.{method_name}")
    } else {
        format!("M:{declaring}.{method_name}({})", parameters.join(","))
    }
}

/// Rewrite one reflected type into member-id form.
pub fn normalize_type(text: &str) -> String {
    let mut parser = TypeParser::new(text);
    let rendered = parser.parse_type();
    if rendered.is_empty() {
        text.chars().filter(|c| !c.is_whitespace()).collect()
    } else {
        rendered
    }
}

/// Text between the parentheses that follow `method_name` in `signature`.
fn parameter_list<'a>(signature: &'a str, method_name: &str) -> Option<&'a str> {
    let pattern = format!("{method_name}(");
    let start = signature
        .match_indices(&pattern)
        .find(|(index, _)| {
            signature[..*index]
                .chars()
                .next_back()
                .is_none_or(|c| !c.is_alphanumeric() && c != '_')
        })
        .map(|(index, _)| index + pattern.len())
        .or_else(|| signature.find('(').map(|index| index + 1))?;
    let end = signature.rfind(')')?;
    (end >= start).then(|| &signature[start..end])
}

/// Split on commas that are not nested inside brackets.
fn split_top_level(list: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (index, c) in list.char_indices() {
        match c {
            '<' | '[' | '(' => depth += 1,
            '>' | ']' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&list[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    parts.push(&list[start..]);
    parts
}

fn qualify(segments: &[String]) -> String {
    match segments {
        [single] if SYSTEM_ALIASES.contains(&single.as_str()) => format!("System.{single}"),
        [root, rest @ ..] if !rest.is_empty() && (root == "alloc" || root == "core") => {
            std::iter::once("std")
                .chain(rest.iter().map(String::as_str))
                .collect::<Vec<_>>()
                .join(".")
        }
        _ => segments.join("."),
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Ident(String),
    Punct(char),
}

fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if c.is_whitespace() {
            continue;
        }
        if c == '`' {
            while chars.next_if(char::is_ascii_digit).is_some() {}
            continue;
        }
        if c.is_alphanumeric() || c == '_' {
            let mut ident = String::from(c);
            while let Some(next) = chars.next_if(|n| n.is_alphanumeric() || *n == '_') {
                ident.push(next);
            }
            tokens.push(Token::Ident(ident));
        } else {
            tokens.push(Token::Punct(c));
        }
    }
    tokens
}

struct TypeParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl TypeParser {
    fn new(text: &str) -> Self {
        Self {
            tokens: tokenize(text),
            pos: 0,
        }
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn is_punct_at(&self, offset: usize, c: char) -> bool {
        self.peek_at(offset) == Some(&Token::Punct(c))
    }

    fn eat(&mut self, c: char) -> bool {
        let matched = self.is_punct_at(0, c);
        if matched {
            self.pos += 1;
        }
        matched
    }

    fn eat_keyword(&mut self) -> bool {
        let matched = matches!(
            self.peek_at(0),
            Some(Token::Ident(word)) if matches!(word.as_str(), "mut" | "dyn" | "impl" | "const")
        );
        if matched {
            self.pos += 1;
        }
        matched
    }

    fn skip_reference_prefix(&mut self) {
        loop {
            if self.eat('&') || self.eat('*') || self.eat_keyword() {
                continue;
            }
            if self.eat('\'') {
                if matches!(self.peek_at(0), Some(Token::Ident(_))) {
                    self.pos += 1;
                }
                continue;
            }
            break;
        }
    }

    fn parse_type(&mut self) -> String {
        self.skip_reference_prefix();

        if self.eat('[') {
            let element = self.parse_type();
            self.skip_past(']');
            return format!("{element}[]");
        }
        if self.eat('(') {
            let items = self.parse_list(')');
            return format!("({})", items.join(","));
        }

        let segments = self.parse_path();
        if segments.is_empty() {
            return String::new();
        }
        let mut rendered = qualify(&segments);

        if self.eat('<') {
            let arguments = self.parse_list('>');
            rendered = format!("{rendered}{{{}}}", arguments.join(","));
        } else if self.is_punct_at(0, '[') && !self.is_punct_at(1, ']') {
            self.pos += 1;
            let arguments = self.parse_list(']');
            rendered = format!("{rendered}{{{}}}", arguments.join(","));
        }

        while self.is_punct_at(0, '[') && self.is_punct_at(1, ']') {
            self.pos += 2;
            rendered.push_str("[]");
        }
        rendered
    }

    fn parse_path(&mut self) -> Vec<String> {
        let mut segments = Vec::new();
        // leading `::`
        while self.is_punct_at(0, ':') {
            self.pos += 1;
        }
        while let Some(Token::Ident(ident)) = self.peek_at(0) {
            segments.push(ident.clone());
            self.pos += 1;

            if self.is_punct_at(0, ':') && self.is_punct_at(1, ':') {
                self.pos += 2;
            } else if self.is_punct_at(0, '.') || self.is_punct_at(0, '+') {
                self.pos += 1;
            } else {
                break;
            }
        }
        segments
    }

    fn parse_list(&mut self, close: char) -> Vec<String> {
        let mut items = Vec::new();
        loop {
            if self.peek_at(0).is_none() || self.eat(close) {
                break;
            }
            let start = self.pos;
            let item = self.parse_type();
            if !item.is_empty() {
                items.push(item);
            }
            if self.eat(',') {
                continue;
            }
            if self.pos == start {
                self.pos += 1;
            }
        }
        items
    }

    fn skip_past(&mut self, close: char) {
        while self.pos < self.tokens.len() {
            let closed = self.is_punct_at(0, close);
            self.pos += 1;
            if closed {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("weather_api::models::Service", "T:weather_api.models.Service")]
    #[case("App.Models.Service", "T:App.Models.Service")]
    #[case("App.Outer+Inner", "T:App.Outer.Inner")]
    #[case("App.Outer+Middle+Inner", "T:App.Outer.Middle.Inner")]
    #[case(
        "weather_api::models::Wrapper<alloc::string::String>",
        "T:weather_api.models.Wrapper{std.string.String}"
    )]
    #[case("App.Wrapper`1[System.String]", "T:App.Wrapper{System.String}")]
    fn test_for_type(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(for_type(input), expected);
    }

    #[rstest]
    #[case("App.Models.Service", "Name", "P:App.Models.Service.Name")]
    #[case("app::models::Service", "created_at", "P:app.models.Service.created_at")]
    fn test_for_property(#[case] declaring: &str, #[case] property: &str, #[case] expected: &str) {
        assert_eq!(for_property(declaring, property), expected);
    }

    #[rstest]
    // no parameters
    #[case("App.Math", "Ping", "Ping()", "M:App.Math.Ping")]
    #[case("App.Math", "Ping", "Ping", "M:App.Math.Ping")]
    // bare integer aliases
    #[case("App.Math", "Add", "Add(Int32, Int32)", "M:App.Math.Add(System.Int32,System.Int32)")]
    #[case("App.Math", "Scale", "Scale(UInt64, Int16)", "M:App.Math.Scale(System.UInt64,System.Int16)")]
    // return type before the name is ignored
    #[case("App.Math", "Ping", "Task`1[Int32] Ping(String)", "M:App.Math.Ping(String)")]
    #[case("App.Math", "Ping", "Int32 GetPing() Ping(Int64)", "M:App.Math.Ping(System.Int64)")]
    // generic arity 1 and 2
    #[case(
        "App.Math",
        "Sum",
        "Int64 Sum(System.Collections.Generic.List`1[System.Int32])",
        "M:App.Math.Sum(System.Collections.Generic.List{System.Int32})"
    )]
    #[case(
        "App.Math",
        "Lookup",
        "Lookup(System.Collections.Generic.Dictionary`2[System.String,UInt64], Int32)",
        "M:App.Math.Lookup(System.Collections.Generic.Dictionary{System.String,System.UInt64},System.Int32)"
    )]
    // nested generics
    #[case(
        "App.Math",
        "Deep",
        "Deep(List`1[Dictionary`2[String,List`1[Int32]]])",
        "M:App.Math.Deep(List{Dictionary{String,List{System.Int32}}})"
    )]
    // nested types and arrays
    #[case(
        "App.Math",
        "Nested",
        "Nested(App.Outer+Inner, Int16[])",
        "M:App.Math.Nested(App.Outer.Inner,System.Int16[])"
    )]
    #[case("App.Math", "Grid", "Grid(Int32[][])", "M:App.Math.Grid(System.Int32[][])")]
    // rust signatures
    #[case(
        "app::math",
        "add",
        "add(&'a mut alloc::vec::Vec<i32>, &str)",
        "M:app.math.add(std.vec.Vec{i32},str)"
    )]
    #[case("app::math", "sum", "sum([u8; 4])", "M:app.math.sum(u8[])")]
    #[case(
        "app::math",
        "index",
        "index(std::collections::HashMap<alloc::string::String, core::option::Option<u64>>)",
        "M:app.math.index(std.collections.HashMap{std.string.String,std.option.Option{u64}})"
    )]
    fn test_for_method(
        #[case] controller: &str,
        #[case] name: &str,
        #[case] signature: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(for_method(controller, name, signature), expected);
    }

    #[rstest]
    #[case("a<b, c>, d", vec!["a<b, c>", " d"])]
    #[case("List`1[A,B]", vec!["List`1[A,B]"])]
    #[case("", vec![""])]
    fn test_split_top_level(#[case] input: &str, #[case] expected: Vec<&str>) {
        assert_eq!(split_top_level(input), expected);
    }

    #[test]
    fn test_normalize_type_falls_back_to_compact_text() {
        assert_eq!(normalize_type(" ( ) "), "()");
        assert_eq!(normalize_type("?!"), "?!");
    }
}
