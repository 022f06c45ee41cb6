use jsonrpc_swagger::descriptor::{EnumDescriptor, IntegerFormat, NumberFormat};
use jsonrpc_swagger::schema::{SchemaRef, SchemaType};
use jsonrpc_swagger::{
    DefaultSchemaGenerator, Describe, NamingPolicy, SchemaGenerator, SchemaRepository,
    TypeDescriptor,
};
use rstest::rstest;

#[derive(Describe)]
#[serde(rename_all = "camelCase")]
#[allow(dead_code)]
struct WeatherForecast {
    date: String,
    temperature_c: i32,
    #[serde(rename = "summaryText")]
    summary: Option<String>,
    units: Units,
    #[serde(skip)]
    fetched_at: u64,
}

#[derive(Describe)]
#[serde(rename_all = "lowercase")]
#[allow(dead_code)]
enum Units {
    Metric,
    Imperial,
}

#[derive(Describe)]
#[allow(dead_code)]
struct Wrapper<T> {
    value: T,
}

#[derive(Describe)]
#[allow(dead_code)]
struct Celsius(f64);

#[derive(Describe)]
#[allow(dead_code)]
struct Station {
    station_id: String,
    r#type: String,
    readings: Vec<Celsius>,
    parent: Option<Box<Station>>,
}

fn object(ty: TypeDescriptor) -> jsonrpc_swagger::descriptor::ObjectDescriptor {
    match ty {
        TypeDescriptor::Object(object) => object,
        other => panic!("expected an object descriptor, got {other:?}"),
    }
}

#[test]
fn test_named_struct_descriptor() {
    let forecast = object(WeatherForecast::describe());
    assert_eq!(forecast.name, "WeatherForecast");
    assert_eq!(forecast.full_name, "derive::WeatherForecast");

    let fields: Vec<_> = forecast
        .fields
        .iter()
        .map(|field| (field.name.as_str(), field.rename.as_deref()))
        .collect();
    assert_eq!(
        fields,
        vec![
            ("date", Some("date")),
            ("temperature_c", Some("temperatureC")),
            ("summary", Some("summaryText")),
            ("units", Some("units")),
        ]
    );
    assert_eq!(
        forecast.fields[1].descriptor(),
        TypeDescriptor::Integer(IntegerFormat::Int32)
    );
}

#[test]
fn test_unit_enum_descriptor() {
    assert_eq!(
        Units::describe(),
        TypeDescriptor::Enum(EnumDescriptor {
            name: "Units".to_string(),
            full_name: "derive::Units".to_string(),
            variants: vec!["metric".to_string(), "imperial".to_string()],
        })
    );
}

#[rstest]
#[case(Wrapper::<String>::describe(), "StringWrapper")]
#[case(Wrapper::<i32>::describe(), "Int32Wrapper")]
#[case(Wrapper::<Vec<Units>>::describe(), "UnitsArrayWrapper")]
#[case(Wrapper::<Wrapper<bool>>::describe(), "BooleanWrapperWrapper")]
fn test_generic_names(#[case] ty: TypeDescriptor, #[case] expected: &str) {
    assert_eq!(object(ty).name, expected);
}

#[test]
fn test_newtype_is_transparent() {
    assert_eq!(
        Celsius::describe(),
        TypeDescriptor::Number(NumberFormat::Double)
    );
}

#[test]
fn test_policy_applies_without_serde_renames() {
    let generator = DefaultSchemaGenerator::new(NamingPolicy::PascalCase);
    let mut repository = SchemaRepository::new();
    let schema = generator
        .generate_schema(&Station::describe(), &mut repository)
        .unwrap();
    assert_eq!(schema.component_name(), Some("Station"));

    let station = repository.get("Station").unwrap();
    assert_eq!(
        station.property_names(),
        vec!["Parent", "Readings", "StationId", "Type"]
    );
    assert_eq!(
        station.required,
        Some(vec![
            "StationId".to_string(),
            "Type".to_string(),
            "Readings".to_string()
        ])
    );
    let Some(SchemaRef::Ref(parent)) = station.properties.as_ref().unwrap().get("Parent") else {
        panic!("recursive field must be a reference");
    };
    assert_eq!(parent.component_name(), Some("Station"));
}

#[test]
fn test_derived_schemas_are_registered_once() {
    let generator = DefaultSchemaGenerator::default();
    let mut repository = SchemaRepository::new();
    generator
        .generate_schema(&WeatherForecast::describe(), &mut repository)
        .unwrap();
    generator
        .generate_schema(&Wrapper::<Units>::describe(), &mut repository)
        .unwrap();

    assert_eq!(repository.len(), 3);
    let forecast = repository.get("WeatherForecast").unwrap();
    assert_eq!(
        forecast.property_names(),
        vec!["date", "summaryText", "temperatureC", "units"]
    );
    assert_eq!(
        forecast.required,
        Some(vec![
            "date".to_string(),
            "temperatureC".to_string(),
            "units".to_string()
        ])
    );
    let units = repository.get("Units").unwrap();
    assert_eq!(units.primary_type(), Some(SchemaType::String));
    assert_eq!(
        units.r#enum,
        Some(vec![
            serde_json::Value::from("metric"),
            serde_json::Value::from("imperial")
        ])
    );
}
