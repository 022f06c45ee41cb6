//! The `WeatherForecast` controller.
//!
//! `get` is a plain REST action, `put_there` is reachable both as a REST
//! action and as the JSON-RPC method `PutThere`, and `put_something` is REST
//! only.

use axum::Json;
use axum::extract::Query;
use axum::http::StatusCode;
use jsonrpc_swagger::route::HttpMethod;
use jsonrpc_swagger::{
    ApiDescription, ApiDescriptionCollection, ApiParameterDescription, BindingSource,
    MethodDescriptor, MethodRegistry,
};
use tracing::debug;

use crate::models::{Credentials, SUMMARIES, Service, WeatherForecast};

const CONTROLLER: &str = "WeatherForecast";
const CONTROLLER_PATH: &str = concat!(module_path!(), "::WeatherForecast");
pub const REST_ROUTE: &str = "api/WeatherForecast";
pub const RPC_ROUTE: &str = "api/jsonrpc/WeatherForecast";

pub async fn get() -> Json<Vec<WeatherForecast>> {
    let forecasts = (1..=5)
        .map(|day| {
            let temperature = -20 + i32::try_from(day * 13 % 75).unwrap_or_default();
            let summary = SUMMARIES[day as usize % SUMMARIES.len()];
            WeatherForecast::new(day, temperature, Some(summary))
        })
        .collect();
    Json(forecasts)
}

pub async fn put_there(Query(credentials): Query<Credentials>) -> (StatusCode, Json<Vec<Service>>) {
    debug!(login = %credentials.login, time = credentials.time, "PutThere");
    (StatusCode::NOT_IMPLEMENTED, Json(Vec::new()))
}

pub async fn put_something(Query(credentials): Query<Credentials>) -> (StatusCode, Json<Vec<Service>>) {
    debug!(login = %credentials.login, time = credentials.time, "PutSomething");
    (StatusCode::NOT_IMPLEMENTED, Json(Vec::new()))
}

fn credential_parameters(description: ApiDescription) -> ApiDescription {
    ["login", "password", "crc"]
        .into_iter()
        .fold(description, |description, name| {
            description.parameter(
                ApiParameterDescription::typed::<String>(name, BindingSource::Query).required(),
            )
        })
        .parameter(ApiParameterDescription::typed::<i64>("time", BindingSource::Query).required())
}

/// RPC methods of the controller.
pub fn rpc_methods() -> MethodRegistry {
    let mut registry = MethodRegistry::new();
    registry.route_method(
        RPC_ROUTE,
        MethodDescriptor::new("PutThere", CONTROLLER_PATH)
            .handler(&put_there)
            .param::<String>("login")
            .param::<String>("password")
            .param::<String>("crc")
            .param::<i64>("time")
            .returns_async::<Vec<Service>>(),
    );
    registry
}

/// REST actions of the controller. Only the storing actions are grouped into
/// the `json` document.
pub fn api_descriptions() -> ApiDescriptionCollection {
    ApiDescriptionCollection::from_descriptions([
        ApiDescription::new(HttpMethod::Get, REST_ROUTE, CONTROLLER, "Get")
            .declared_in(CONTROLLER_PATH)
            .route_name("GetWeatherForecast")
            .handler(&get)
            .responds_with::<Vec<WeatherForecast>>(),
        credential_parameters(
            ApiDescription::new(
                HttpMethod::Post,
                format!("{REST_ROUTE}/PutThere"),
                CONTROLLER,
                "PutThere",
            )
            .declared_in(CONTROLLER_PATH)
            .group("json")
            .handler(&put_there)
            .responds_with::<Vec<Service>>(),
        ),
        credential_parameters(
            ApiDescription::new(
                HttpMethod::Post,
                format!("{REST_ROUTE}/PutSomething"),
                CONTROLLER,
                "PutSomething",
            )
            .declared_in(CONTROLLER_PATH)
            .group("json")
            .handler(&put_something)
            .responds_with::<Vec<Service>>(),
        ),
    ])
}
