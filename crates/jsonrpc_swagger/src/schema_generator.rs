//! Type descriptor to OpenAPI schema conversion.

use std::fmt;
use std::sync::Arc;

use jsonrpc_swagger_core::schema::{Schema, SchemaRef, SchemaType};
use serde_json::Value;

use crate::descriptor::{EnumDescriptor, FieldDescriptor, ObjectDescriptor, TypeDescriptor};
use crate::error::{SwaggerError, SwaggerResult};
use crate::naming::NamingPolicy;
use crate::schema_repository::SchemaRepository;
use crate::xml_docs::XmlDocumentation;

/// Turns a type descriptor into a schema, registering named types in `repository`.
pub trait SchemaGenerator: Send + Sync {
    fn generate_schema(
        &self,
        ty: &TypeDescriptor,
        repository: &mut SchemaRepository,
    ) -> SwaggerResult<SchemaRef>;
}

impl<T: SchemaGenerator + ?Sized> SchemaGenerator for Arc<T> {
    fn generate_schema(
        &self,
        ty: &TypeDescriptor,
        repository: &mut SchemaRepository,
    ) -> SwaggerResult<SchemaRef> {
        (**self).generate_schema(ty, repository)
    }
}

/// Default generator.
///
/// Objects and enums become named component schemas referenced by `$ref`;
/// everything else is inlined. Property names follow the naming policy unless
/// the field carries an explicit rename.
#[derive(Clone, Default)]
pub struct DefaultSchemaGenerator {
    naming_policy: NamingPolicy,
    documentation: Option<Arc<dyn XmlDocumentation>>,
}

impl fmt::Debug for DefaultSchemaGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultSchemaGenerator")
            .field("naming_policy", &self.naming_policy)
            .field("documentation", &self.documentation.is_some())
            .finish()
    }
}

impl DefaultSchemaGenerator {
    pub fn new(naming_policy: NamingPolicy) -> Self {
        Self {
            naming_policy,
            documentation: None,
        }
    }

    /// Fill type descriptions and property examples from doc-comments.
    #[must_use]
    pub fn with_documentation(mut self, documentation: Arc<dyn XmlDocumentation>) -> Self {
        self.documentation = Some(documentation);
        self
    }

    fn property_name(&self, field: &FieldDescriptor) -> String {
        field
            .rename
            .clone()
            .unwrap_or_else(|| self.naming_policy.convert_name(&field.name))
    }

    fn type_summary(&self, ty: &TypeDescriptor) -> Option<String> {
        let summary = self.documentation.as_ref()?.summary_for_type(ty);
        (!summary.is_empty()).then_some(summary)
    }

    fn property_example(&self, object: &ObjectDescriptor, field: &FieldDescriptor) -> Option<Value> {
        let example = self
            .documentation
            .as_ref()?
            .property_example(object, field);
        (!example.is_empty()).then(|| parse_example(example))
    }

    fn object_schema(
        &self,
        object: &ObjectDescriptor,
        repository: &mut SchemaRepository,
    ) -> SwaggerResult<SchemaRef> {
        // reserved before the fields expand so self-references resolve to `$ref`
        if !repository.reserve(&object.name, &object.full_name)? {
            return Ok(SchemaRef::reference(&object.name));
        }

        let mut schema = Schema::object();
        let mut required = Vec::new();
        for field in &object.fields {
            let name = self.property_name(field);
            let field_type = field.descriptor();
            let mut property = self.generate_schema(&field_type, repository)?;

            if let (Some(example), SchemaRef::Inline(inline)) =
                (self.property_example(object, field), &mut property)
            {
                inline.example = Some(example);
            }
            if !matches!(field_type, TypeDescriptor::Option(_)) {
                required.push(name.clone());
            }
            schema.insert_property(name, property);
        }
        schema.required = Some(required);
        schema.description = self.type_summary(&TypeDescriptor::Object(object.clone()));

        repository.add_definition(&object.name, schema)
    }

    fn enum_schema(
        &self,
        enumeration: &EnumDescriptor,
        repository: &mut SchemaRepository,
    ) -> SwaggerResult<SchemaRef> {
        if !repository.reserve(&enumeration.name, &enumeration.full_name)? {
            return Ok(SchemaRef::reference(&enumeration.name));
        }

        let schema = Schema {
            r#enum: Some(
                enumeration
                    .variants
                    .iter()
                    .map(|v| Value::String(v.clone()))
                    .collect(),
            ),
            description: self.type_summary(&TypeDescriptor::Enum(enumeration.clone())),
            ..Schema::string()
        };
        repository.add_definition(&enumeration.name, schema)
    }
}

impl SchemaGenerator for DefaultSchemaGenerator {
    fn generate_schema(
        &self,
        ty: &TypeDescriptor,
        repository: &mut SchemaRepository,
    ) -> SwaggerResult<SchemaRef> {
        let schema = match ty {
            TypeDescriptor::Unit => Schema::no_content(),
            TypeDescriptor::Bool => Schema::boolean(),
            TypeDescriptor::Integer(format) => Schema {
                format: Some(format.as_str().to_string()),
                ..Schema::integer()
            },
            TypeDescriptor::Number(format) => Schema {
                format: Some(format.as_str().to_string()),
                ..Schema::number()
            },
            TypeDescriptor::String(format) => Schema {
                format: format.map(|f| f.as_str().to_string()),
                ..Schema::string()
            },
            TypeDescriptor::Any => Schema::default(),
            TypeDescriptor::Option(inner) => {
                return match self.generate_schema(inner, repository)? {
                    SchemaRef::Inline(mut schema) => {
                        schema.make_nullable();
                        Ok(SchemaRef::Inline(schema))
                    }
                    // a `$ref` cannot carry siblings
                    reference @ SchemaRef::Ref(_) => Ok(reference),
                };
            }
            TypeDescriptor::Array(inner) => Schema::array(self.generate_schema(inner, repository)?),
            TypeDescriptor::Map { key, value } => {
                if !key.is_string_like() {
                    return Err(SwaggerError::UnsupportedMapKey(key.schema_name()));
                }
                let value = self.generate_schema(value, repository)?;
                Schema {
                    additional_properties: Some(serde_json::to_value(&value)?),
                    ..Schema::new(SchemaType::Object)
                }
            }
            TypeDescriptor::Object(object) => return self.object_schema(object, repository),
            TypeDescriptor::Enum(enumeration) => return self.enum_schema(enumeration, repository),
        };
        Ok(SchemaRef::inline(schema))
    }
}

/// Doc-comment examples are JSON when they parse as JSON, plain strings otherwise.
pub(crate) fn parse_example(text: String) -> Value {
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{Describe, IntegerFormat, NumberFormat, StringFormat};
    use crate::xml_docs::XmlDocumentationService;
    use rstest::rstest;
    use std::collections::HashMap;

    struct Forecast;

    impl Describe for Forecast {
        fn describe() -> TypeDescriptor {
            TypeDescriptor::Object(
                ObjectDescriptor::new("Forecast", "weather_api::models::Forecast")
                    .field(FieldDescriptor::new("city_name", <String as Describe>::describe))
                    .field(FieldDescriptor::new("temperature_c", <f64 as Describe>::describe).renamed("tempC"))
                    .field(FieldDescriptor::new("summary", <Option<String> as Describe>::describe)),
            )
        }
    }

    struct TreeNode;

    impl Describe for TreeNode {
        fn describe() -> TypeDescriptor {
            TypeDescriptor::Object(
                ObjectDescriptor::new("TreeNode", "weather_api::models::TreeNode")
                    .field(FieldDescriptor::new("children", <Vec<TreeNode> as Describe>::describe))
                    .field(FieldDescriptor::new("parent", <Option<TreeNode> as Describe>::describe)),
            )
        }
    }

    fn units() -> TypeDescriptor {
        TypeDescriptor::Enum(EnumDescriptor {
            name: "Units".to_string(),
            full_name: "weather_api::models::Units".to_string(),
            variants: vec!["metric".to_string(), "imperial".to_string()],
        })
    }

    fn generate(ty: &TypeDescriptor) -> (SchemaRef, SchemaRepository) {
        let mut repository = SchemaRepository::new();
        let schema = DefaultSchemaGenerator::default()
            .generate_schema(ty, &mut repository)
            .unwrap();
        (schema, repository)
    }

    fn inline(schema: SchemaRef) -> Schema {
        match schema {
            SchemaRef::Inline(schema) => *schema,
            SchemaRef::Ref(reference) => panic!("expected inline schema, got {reference:?}"),
        }
    }

    #[rstest]
    #[case(TypeDescriptor::Bool, SchemaType::Boolean, None)]
    #[case(TypeDescriptor::Integer(IntegerFormat::Int32), SchemaType::Integer, Some("int32"))]
    #[case(TypeDescriptor::Integer(IntegerFormat::Int64), SchemaType::Integer, Some("int64"))]
    #[case(TypeDescriptor::Number(NumberFormat::Double), SchemaType::Number, Some("double"))]
    #[case(TypeDescriptor::String(None), SchemaType::String, None)]
    #[case(TypeDescriptor::String(Some(StringFormat::Uuid)), SchemaType::String, Some("uuid"))]
    #[case(TypeDescriptor::Unit, SchemaType::Null, None)]
    fn test_primitive_schemas(
        #[case] ty: TypeDescriptor,
        #[case] expected_type: SchemaType,
        #[case] expected_format: Option<&str>,
    ) {
        let (schema, repository) = generate(&ty);
        let schema = inline(schema);
        assert_eq!(schema.primary_type(), Some(expected_type));
        assert_eq!(schema.format.as_deref(), expected_format);
        assert!(repository.is_empty());
    }

    #[test]
    fn test_unit_is_no_content() {
        let (schema, _) = generate(&TypeDescriptor::Unit);
        assert_eq!(inline(schema), Schema::no_content());
    }

    #[test]
    fn test_any_is_unconstrained() {
        let (schema, _) = generate(&TypeDescriptor::Any);
        assert_eq!(serde_json::to_value(schema).unwrap(), serde_json::json!({}));
    }

    #[test]
    fn test_option_marks_inline_schema_nullable() {
        let (schema, _) = generate(&Option::<i32>::describe());
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            serde_json::json!({ "type": ["integer", "null"], "format": "int32" })
        );
        assert!(inline(schema).is_nullable());
    }

    #[test]
    fn test_object_registered_once_and_referenced() {
        let mut repository = SchemaRepository::new();
        let generator = DefaultSchemaGenerator::default();
        let first = generator
            .generate_schema(&Forecast::describe(), &mut repository)
            .unwrap();
        let second = generator
            .generate_schema(&Vec::<Forecast>::describe(), &mut repository)
            .unwrap();

        assert_eq!(first.component_name(), Some("Forecast"));
        assert_eq!(repository.len(), 1);
        let items = inline(second).items.unwrap();
        assert_eq!(items.component_name(), Some("Forecast"));

        let forecast = repository.get("Forecast").unwrap();
        assert_eq!(forecast.property_names(), vec!["cityName", "summary", "tempC"]);
        assert_eq!(
            forecast.required,
            Some(vec!["cityName".to_string(), "tempC".to_string()])
        );
    }

    #[rstest]
    #[case(NamingPolicy::Identity, vec!["city_name", "summary", "tempC"])]
    #[case(NamingPolicy::PascalCase, vec!["CityName", "Summary", "tempC"])]
    fn test_property_names_follow_policy(
        #[case] policy: NamingPolicy,
        #[case] expected: Vec<&str>,
    ) {
        let mut repository = SchemaRepository::new();
        DefaultSchemaGenerator::new(policy)
            .generate_schema(&Forecast::describe(), &mut repository)
            .unwrap();
        assert_eq!(repository.get("Forecast").unwrap().property_names(), expected);
    }

    #[test]
    fn test_recursive_type_terminates() {
        let (schema, repository) = generate(&TreeNode::describe());
        assert_eq!(schema.component_name(), Some("TreeNode"));
        assert_eq!(repository.len(), 1);

        let node = repository.get("TreeNode").unwrap();
        let properties = node.properties.as_ref().unwrap();
        assert_eq!(properties["parent"].component_name(), Some("TreeNode"));
        match &properties["children"] {
            SchemaRef::Inline(children) => assert_eq!(
                children.items.as_ref().unwrap().component_name(),
                Some("TreeNode")
            ),
            SchemaRef::Ref(_) => panic!("array should be inline"),
        }
    }

    #[test]
    fn test_enum_schema() {
        let (schema, repository) = generate(&units());
        assert_eq!(schema.component_name(), Some("Units"));
        let units = repository.get("Units").unwrap();
        assert_eq!(units.primary_type(), Some(SchemaType::String));
        assert_eq!(
            units.r#enum,
            Some(vec![Value::from("metric"), Value::from("imperial")])
        );
    }

    #[test]
    fn test_string_keyed_map() {
        let (schema, _) = generate(&HashMap::<String, i64>::describe());
        let json = serde_json::to_value(schema).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "type": "object",
                "additionalProperties": {"type": "integer", "format": "int64"}
            })
        );
    }

    #[test]
    fn test_non_string_map_key_is_rejected() {
        let mut repository = SchemaRepository::new();
        let result = DefaultSchemaGenerator::default()
            .generate_schema(&HashMap::<i32, String>::describe(), &mut repository);
        assert!(matches!(result, Err(SwaggerError::UnsupportedMapKey(key)) if key == "Int32"));
    }

    #[test]
    fn test_conflicting_type_names() {
        let mut repository = SchemaRepository::new();
        let generator = DefaultSchemaGenerator::default();
        generator
            .generate_schema(&Forecast::describe(), &mut repository)
            .unwrap();
        let other = TypeDescriptor::Object(ObjectDescriptor::new("Forecast", "other::Forecast"));
        assert!(matches!(
            generator.generate_schema(&other, &mut repository),
            Err(SwaggerError::ConflictingSchemaIds { .. })
        ));
    }

    #[test]
    fn test_documentation_fills_description_and_examples() {
        let docs = XmlDocumentationService::from_xml(
            r#"<doc><members>
                <member name="T:weather_api.models.Forecast"><summary>Daily forecast.</summary></member>
                <member name="P:weather_api.models.Forecast.city_name"><example>Berlin</example></member>
                <member name="P:weather_api.models.Forecast.temperature_c"><example>21.5</example></member>
            </members></doc>"#,
        )
        .unwrap();
        let generator = DefaultSchemaGenerator::default().with_documentation(Arc::new(docs));
        let mut repository = SchemaRepository::new();
        generator
            .generate_schema(&Forecast::describe(), &mut repository)
            .unwrap();

        let forecast = repository.get("Forecast").unwrap();
        assert_eq!(forecast.description.as_deref(), Some("Daily forecast."));
        let properties = forecast.properties.as_ref().unwrap();
        let example = |name: &str| match &properties[name] {
            SchemaRef::Inline(schema) => schema.example.clone(),
            SchemaRef::Ref(_) => None,
        };
        assert_eq!(example("cityName"), Some(Value::from("Berlin")));
        assert_eq!(example("tempC"), Some(serde_json::json!(21.5)));
        assert_eq!(example("summary"), None);
    }

    #[rstest]
    #[case("42", serde_json::json!(42))]
    #[case("{\"a\": true}", serde_json::json!({"a": true}))]
    #[case("Berlin", serde_json::json!("Berlin"))]
    fn test_parse_example(#[case] text: &str, #[case] expected: Value) {
        assert_eq!(parse_example(text.to_string()), expected);
    }
}
