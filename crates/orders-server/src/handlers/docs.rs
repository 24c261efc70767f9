//! API document handlers: the Swagger UI page and the JSON it renders.

use axum::response::Html;
use axum::Json;
use utoipa::openapi::OpenApi;

/// Swagger UI shell; the bundle comes from the public `swagger-ui-dist`
/// package and reads the document from `/docs/openapi.json`.
const SWAGGER_UI: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Orders API</title>
  <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css" />
</head>
<body>
  <div id="swagger-ui"></div>
  <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js" crossorigin></script>
  <script>
    window.onload = () => {
      window.ui = SwaggerUIBundle({ url: "/docs/openapi.json", dom_id: "#swagger-ui" });
    };
  </script>
</body>
</html>
"##;

/// `GET /docs`
pub async fn ui() -> Html<&'static str> {
    Html(SWAGGER_UI)
}

/// `GET /docs/openapi.json`
pub async fn openapi_json() -> Json<OpenApi> {
    Json(crate::openapi::document())
}
