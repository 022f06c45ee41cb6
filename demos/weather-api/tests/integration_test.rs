use axum_test::TestServer;
use jsonrpc_swagger::{SwaggerConfiguration, XmlDocumentationService};
use serde_json::json;
use weather_api::{create_app, create_default_app};

#[tokio::test]
async fn test_get_forecasts() {
    let server = TestServer::new(create_default_app());

    let response = server.get("/api/WeatherForecast").await;

    response.assert_status_ok();
    let forecasts: serde_json::Value = response.json();
    assert_eq!(forecasts.as_array().unwrap().len(), 5);
    assert!(forecasts[0]["temperatureC"].is_i64());
}

#[tokio::test]
async fn test_put_there_is_not_implemented() {
    let server = TestServer::new(create_default_app());

    let response = server
        .post("/api/WeatherForecast/PutThere?login=a&password=b&crc=c&time=1")
        .await;

    response.assert_status(axum::http::StatusCode::NOT_IMPLEMENTED);
}

#[tokio::test]
async fn test_jsonrpc_document() {
    let server = TestServer::new(create_default_app());

    let response = server.get("/swagger/jsonrpc/swagger.json").await;

    response.assert_status_ok();
    let document: serde_json::Value = response.json();
    assert_eq!(document["info"]["title"], "JSON-RPC Core API");

    let paths: Vec<_> = document["paths"].as_object().unwrap().keys().collect();
    assert_eq!(paths, vec!["/api/jsonrpc/WeatherForecast#putThere"]);

    let operation = &document["paths"]["/api/jsonrpc/WeatherForecast#putThere"]["post"];
    assert_eq!(operation["tags"], json!(["WeatherForecast"]));
    assert_eq!(
        operation["summary"],
        "Stores the forecast for login.\n\nThe request is signed with `crc`."
    );
    assert_eq!(
        operation["requestBody"]["content"]["application/json"]["schema"]["$ref"],
        "#/components/schemas/request__api_jsonrpc_WeatherForecast|putThere"
    );

    let schemas = &document["components"]["schemas"];
    let params = &schemas["_api_jsonrpc_WeatherForecast|putThere"]["properties"];
    assert_eq!(params["login"]["example"], "svc-billing");
    assert_eq!(params["time"]["example"], 1_700_000_000);
    assert_eq!(
        schemas["request__api_jsonrpc_WeatherForecast|putThere"]["properties"]["method"]["example"],
        "putThere"
    );
    assert_eq!(schemas["Service"]["properties"]["name"]["example"], "billing");
}

#[tokio::test]
async fn test_rest_document() {
    let server = TestServer::new(create_default_app());

    let response = server.get("/swagger/json/swagger.json").await;

    response.assert_status_ok();
    let document: serde_json::Value = response.json();
    let paths: Vec<_> = document["paths"].as_object().unwrap().keys().collect();
    assert_eq!(
        paths,
        vec![
            "/api/WeatherForecast/PutSomething",
            "/api/WeatherForecast/PutThere"
        ]
    );
    let operation = &document["paths"]["/api/WeatherForecast/PutThere"]["post"];
    assert_eq!(operation["parameters"].as_array().unwrap().len(), 4);
    assert_eq!(operation["parameters"][0]["in"], "query");
    assert_eq!(
        operation["summary"],
        "Stores the forecast for login.\n\nThe request is signed with `crc`."
    );
    assert!(document["paths"]["/api/WeatherForecast/PutSomething"]["post"]
        .get("summary")
        .is_none());
    assert_eq!(
        document["components"]["schemas"]["Service"]["properties"]["name"]["example"],
        "billing"
    );
}

#[tokio::test]
async fn test_servers_follow_configuration() {
    let configuration = SwaggerConfiguration::default().endpoint("https://weather.example.com/rpc");
    let server = TestServer::new(create_app(configuration, XmlDocumentationService::empty()));

    let document: serde_json::Value = server.get("/swagger/jsonrpc/swagger.json").await.json();

    assert_eq!(
        document["servers"],
        json!([{ "url": "https://weather.example.com/rpc" }])
    );
    assert!(document["paths"]["/api/jsonrpc/WeatherForecast#putThere"]["post"]
        .get("summary")
        .is_none());
}

#[tokio::test]
async fn test_unknown_document_is_not_found() {
    let server = TestServer::new(create_default_app());

    let response = server.get("/swagger/v2/swagger.json").await;

    response.assert_status_not_found();
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("v2"));
}
