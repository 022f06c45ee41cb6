//! Type descriptors.
//!
//! A [`TypeDescriptor`] is the value-level description of a Rust type that the
//! schema generator turns into an OpenAPI schema. Types describe themselves
//! through the [`Describe`] trait, which is implemented here for the standard
//! library types and derived for user types with `#[derive(Describe)]`.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::Arc;

/// Integer width as emitted in the schema `format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntegerFormat {
    Int32,
    Int64,
}

impl IntegerFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Int32 => "int32",
            Self::Int64 => "int64",
        }
    }
}

/// Floating point width as emitted in the schema `format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumberFormat {
    Float,
    Double,
}

impl NumberFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Double => "double",
        }
    }
}

/// Well-known string formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringFormat {
    Uuid,
    DateTime,
    Date,
    Char,
}

impl StringFormat {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Uuid => "uuid",
            Self::DateTime => "date-time",
            Self::Date => "date",
            Self::Char => "char",
        }
    }
}

/// Value-level description of a type.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    /// `()`: no value
    Unit,
    Bool,
    Integer(IntegerFormat),
    Number(NumberFormat),
    String(Option<StringFormat>),
    /// Arbitrary JSON
    Any,
    Option(Box<TypeDescriptor>),
    Array(Box<TypeDescriptor>),
    Map {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },
    Object(ObjectDescriptor),
    Enum(EnumDescriptor),
}

impl TypeDescriptor {
    pub fn of<T: Describe + ?Sized>() -> Self {
        T::describe()
    }

    /// Name fragment used when a generic type's schema id is derived from its arguments.
    pub fn schema_name(&self) -> String {
        match self {
            Self::Unit => "Unit".to_string(),
            Self::Bool => "Boolean".to_string(),
            Self::Integer(IntegerFormat::Int32) => "Int32".to_string(),
            Self::Integer(IntegerFormat::Int64) => "Int64".to_string(),
            Self::Number(NumberFormat::Float) => "Single".to_string(),
            Self::Number(NumberFormat::Double) => "Double".to_string(),
            Self::String(Some(StringFormat::Uuid)) => "Uuid".to_string(),
            Self::String(_) => "String".to_string(),
            Self::Any => "Object".to_string(),
            Self::Option(inner) => inner.schema_name(),
            Self::Array(inner) => format!("{}Array", inner.schema_name()),
            Self::Map { value, .. } => format!("{}Map", value.schema_name()),
            Self::Object(object) => object.name.clone(),
            Self::Enum(enumeration) => enumeration.name.clone(),
        }
    }

    /// Whether the type is serialized as a JSON string, which is required of map keys.
    pub const fn is_string_like(&self) -> bool {
        matches!(self, Self::String(_) | Self::Enum(_))
    }
}

/// A named struct with named fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectDescriptor {
    /// Schema id, e.g. `Service` or `StringWrapper`
    pub name: String,
    /// Path of the declaring type, e.g. `weather_api::models::Service`
    pub full_name: String,
    pub fields: Vec<FieldDescriptor>,
}

impl ObjectDescriptor {
    pub fn new(name: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            full_name: full_name.into(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }
}

/// One field of an [`ObjectDescriptor`].
///
/// The field type is a thunk so that recursive types only expand one level
/// at a time.
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// Declared field name
    pub name: String,
    /// Serialized name when the container or field is renamed
    pub rename: Option<String>,
    pub ty: fn() -> TypeDescriptor,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: fn() -> TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            rename: None,
            ty,
        }
    }

    #[must_use]
    pub fn renamed(mut self, rename: impl Into<String>) -> Self {
        self.rename = Some(rename.into());
        self
    }

    pub fn descriptor(&self) -> TypeDescriptor {
        (self.ty)()
    }
}

impl PartialEq for FieldDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.rename == other.rename
    }
}

/// A unit-only enum serialized as strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    pub name: String,
    pub full_name: String,
    pub variants: Vec<String>,
}

/// Types that can describe their own shape.
pub trait Describe {
    fn describe() -> TypeDescriptor;

    /// Reflected type text used when rendering method signatures.
    fn type_name() -> String {
        std::any::type_name::<Self>().to_string()
    }
}

macro_rules! describe_as {
    ($($ty:ty => $desc:expr),* $(,)?) => {
        $(
            impl Describe for $ty {
                fn describe() -> TypeDescriptor {
                    $desc
                }
            }
        )*
    };
}

describe_as! {
    () => TypeDescriptor::Unit,
    bool => TypeDescriptor::Bool,
    i8 => TypeDescriptor::Integer(IntegerFormat::Int32),
    i16 => TypeDescriptor::Integer(IntegerFormat::Int32),
    i32 => TypeDescriptor::Integer(IntegerFormat::Int32),
    u8 => TypeDescriptor::Integer(IntegerFormat::Int32),
    u16 => TypeDescriptor::Integer(IntegerFormat::Int32),
    u32 => TypeDescriptor::Integer(IntegerFormat::Int64),
    i64 => TypeDescriptor::Integer(IntegerFormat::Int64),
    u64 => TypeDescriptor::Integer(IntegerFormat::Int64),
    i128 => TypeDescriptor::Integer(IntegerFormat::Int64),
    u128 => TypeDescriptor::Integer(IntegerFormat::Int64),
    isize => TypeDescriptor::Integer(IntegerFormat::Int64),
    usize => TypeDescriptor::Integer(IntegerFormat::Int64),
    f32 => TypeDescriptor::Number(NumberFormat::Float),
    f64 => TypeDescriptor::Number(NumberFormat::Double),
    char => TypeDescriptor::String(Some(StringFormat::Char)),
    str => TypeDescriptor::String(None),
    String => TypeDescriptor::String(None),
    serde_json::Value => TypeDescriptor::Any,
    uuid::Uuid => TypeDescriptor::String(Some(StringFormat::Uuid)),
}

impl<T: Describe + ?Sized> Describe for &T {
    fn describe() -> TypeDescriptor {
        T::describe()
    }

    fn type_name() -> String {
        T::type_name()
    }
}

impl<T: Describe + ?Sized> Describe for Box<T> {
    fn describe() -> TypeDescriptor {
        T::describe()
    }

    fn type_name() -> String {
        T::type_name()
    }
}

impl<T: Describe + ?Sized> Describe for Arc<T> {
    fn describe() -> TypeDescriptor {
        T::describe()
    }

    fn type_name() -> String {
        T::type_name()
    }
}

impl<T: Describe> Describe for Option<T> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Option(Box::new(T::describe()))
    }
}

macro_rules! describe_sequence {
    ($($ty:ident),*) => {
        $(
            impl<T: Describe> Describe for $ty<T> {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::Array(Box::new(T::describe()))
                }
            }
        )*
    };
}

describe_sequence!(Vec, BTreeSet, HashSet);

impl<T: Describe> Describe for [T] {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Array(Box::new(T::describe()))
    }
}

impl<T: Describe, const N: usize> Describe for [T; N] {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Array(Box::new(T::describe()))
    }
}

macro_rules! describe_map {
    ($($ty:ident),*) => {
        $(
            impl<K: Describe, V: Describe, S> Describe for $ty<K, V, S> {
                fn describe() -> TypeDescriptor {
                    TypeDescriptor::Map {
                        key: Box::new(K::describe()),
                        value: Box::new(V::describe()),
                    }
                }
            }
        )*
    };
}

describe_map!(HashMap);

impl<K: Describe, V: Describe> Describe for BTreeMap<K, V> {
    fn describe() -> TypeDescriptor {
        TypeDescriptor::Map {
            key: Box::new(K::describe()),
            value: Box::new(V::describe()),
        }
    }
}
