//! OpenAPI document served at `GET /docs/openapi.json` and rendered by the
//! Swagger UI page at `GET /docs`.
//!
//! Built from the [`Resource`] descriptors so the document cannot drift from
//! the routes and columns it describes.

use orders_storage::{Agent, Customer, Entity, FieldKind, Order};
use utoipa::openapi::content::ContentBuilder;
use utoipa::openapi::info::InfoBuilder;
use utoipa::openapi::path::{
    HttpMethod, Operation, OperationBuilder, ParameterBuilder, ParameterIn, PathItemBuilder,
    PathsBuilder,
};
use utoipa::openapi::request_body::{RequestBody, RequestBodyBuilder};
use utoipa::openapi::response::{Response, ResponseBuilder};
use utoipa::openapi::schema::{
    Array, ComponentsBuilder, KnownFormat, ObjectBuilder, Ref, Schema, SchemaFormat, Type,
};
use utoipa::openapi::{OpenApi, OpenApiBuilder, RefOr, Required};

use crate::resource::Resource;

/// Where the JSON document is served; the UI page loads it from here.
pub const DOCUMENT_PATH: &str = "/docs/openapi.json";

pub fn document() -> OpenApi {
    let mut components = ComponentsBuilder::new();
    let mut paths = PathsBuilder::new();

    for (name, schema) in [
        (Agent::NAME, entity_schema::<Agent>()),
        (Customer::NAME, entity_schema::<Customer>()),
        (Order::NAME, entity_schema::<Order>()),
    ] {
        components = components.schema(name, schema);
    }

    paths = add_resource::<Agent>(paths);
    paths = add_resource::<Customer>(paths);
    paths = add_resource::<Order>(paths);

    let say = OperationBuilder::new()
        .summary(Some("Relay a keyword to the keyword service"))
        .parameter(
            ParameterBuilder::new()
                .name("keyword")
                .parameter_in(ParameterIn::Query)
                .required(Required::False)
                .schema(Some(field_schema(FieldKind::Text)))
                .build(),
        )
        .response("200", response("Keyword service reply, relayed verbatim"))
        .response("502", response("Keyword service failed or unreachable"))
        .build();
    paths = paths.path(
        "/say",
        PathItemBuilder::new().operation(HttpMethod::Get, say).build(),
    );

    OpenApiBuilder::new()
        .info(
            InfoBuilder::new()
                .title("Orders API")
                .version("1.0.0")
                .description(Some("API for the orders database"))
                .build(),
        )
        .paths(paths)
        .components(Some(components.build()))
        .build()
}

fn field_schema(kind: FieldKind) -> RefOr<Schema> {
    let object = match kind {
        FieldKind::Text => ObjectBuilder::new().schema_type(Type::String),
        FieldKind::Decimal => ObjectBuilder::new()
            .schema_type(Type::Number)
            .format(Some(SchemaFormat::KnownFormat(KnownFormat::Float))),
        FieldKind::Integer => ObjectBuilder::new().schema_type(Type::Integer),
        FieldKind::Date => ObjectBuilder::new()
            .schema_type(Type::String)
            .format(Some(SchemaFormat::Custom("date".to_string()))),
    };
    RefOr::T(Schema::Object(object.build()))
}

fn entity_schema<R: Resource>() -> RefOr<Schema> {
    let object = R::FIELDS
        .iter()
        .fold(ObjectBuilder::new().schema_type(Type::Object), |object, f| {
            object.property(f.name, field_schema(f.kind))
        })
        .required(R::KEY.name);
    RefOr::T(Schema::Object(object.build()))
}

fn schema_ref<R: Resource>() -> RefOr<Schema> {
    RefOr::Ref(Ref::from_schema_name(R::NAME))
}

fn response(description: impl Into<String>) -> RefOr<Response> {
    RefOr::T(ResponseBuilder::new().description(description).build())
}

fn request_body<R: Resource>() -> RequestBody {
    RequestBodyBuilder::new()
        .required(Some(Required::True))
        .content(
            "application/json",
            ContentBuilder::new().schema(Some(schema_ref::<R>())).build(),
        )
        .build()
}

/// Path-keyed operation with the shared key parameter and store-failure reply.
fn item_operation<R: Resource>(summary: String) -> OperationBuilder {
    OperationBuilder::new()
        .summary(Some(summary))
        .parameter(
            ParameterBuilder::new()
                .name(R::KEY_PARAM)
                .parameter_in(ParameterIn::Path)
                .required(Required::True)
                .description(Some(format!("{} required", R::KEY.name)))
                .schema(Some(field_schema(R::KEY.kind)))
                .build(),
        )
        .response("500", response("Store failure"))
}

fn add_resource<R: Resource>(paths: PathsBuilder) -> PathsBuilder {
    let name = R::NAME.to_lowercase();

    let list: Operation = OperationBuilder::new()
        .summary(Some(format!("Return all {}s", name)))
        .response(
            "200",
            RefOr::T(
                ResponseBuilder::new()
                    .description(format!("Array of {} objects", name))
                    .content(
                        "application/json",
                        ContentBuilder::new()
                            .schema(Some(RefOr::T(Schema::Array(Array::new(schema_ref::<R>())))))
                            .build(),
                    )
                    .build(),
            ),
        )
        .response("500", response("Store failure"))
        .build();

    let create = OperationBuilder::new()
        .summary(Some(format!("Create {}", name)))
        .request_body(Some(request_body::<R>()))
        .response("201", response(format!("{} created", R::NAME)))
        .response(
            "400",
            response(format!("{} not created, or validation failed", R::NAME)),
        )
        .response("500", response("Store failure"))
        .build();

    let update = item_operation::<R>(format!("Update {}", name))
        .request_body(Some(request_body::<R>()))
        .response("200", response(format!("{} updated", R::NAME)))
        .response(
            "400",
            response(format!("{} not updated, or validation failed", R::NAME)),
        )
        .build();

    let upsert = item_operation::<R>(format!("Update {} or create {} if not found", name, name))
        .request_body(Some(request_body::<R>()))
        .response("200", response(format!("{} updated", R::NAME)))
        .response("201", response(format!("{} created", R::NAME)))
        .response(
            "400",
            response("Validation failed; body lists the rejected fields"),
        )
        .build();

    let delete = item_operation::<R>(format!("Delete {}", name))
        .response("200", response(format!("{} deleted", R::NAME)))
        .response("400", response(format!("{} not deleted", R::NAME)))
        .build();

    paths
        .path(
            R::COLLECTION,
            PathItemBuilder::new()
                .operation(HttpMethod::Get, list)
                .operation(HttpMethod::Post, create)
                .build(),
        )
        .path(
            R::ITEM,
            PathItemBuilder::new()
                .operation(HttpMethod::Patch, update)
                .operation(HttpMethod::Put, upsert)
                .operation(HttpMethod::Delete, delete)
                .build(),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn document_json() -> Value {
        serde_json::to_value(document()).unwrap()
    }

    #[test]
    fn every_route_is_documented() {
        let doc = document_json();
        for path in [
            "/agents",
            "/agents/{agentCode}",
            "/customers",
            "/customers/{custCode}",
            "/orders",
            "/orders/{ordNum}",
            "/say",
        ] {
            assert!(doc["paths"][path].is_object(), "{path} missing");
        }
        let item = &doc["paths"]["/agents/{agentCode}"];
        assert!(item["put"]["responses"]["201"].is_object());
        assert_eq!(item["patch"]["parameters"][0]["name"], "agentCode");
        assert_eq!(item["patch"]["parameters"][0]["in"], "path");
        assert!(doc["paths"]["/agents"]["post"]["requestBody"].is_object());
    }

    #[test]
    fn schemas_follow_field_kinds() {
        let doc = document_json();
        let agent = &doc["components"]["schemas"]["Agent"]["properties"];
        assert_eq!(agent["COMMISSION"]["type"], "number");
        assert_eq!(agent["AGENT_CODE"]["type"], "string");

        let order = &doc["components"]["schemas"]["Order"];
        assert_eq!(order["properties"]["ORD_DATE"]["format"], "date");
        assert_eq!(order["properties"]["ORD_NUM"]["type"], "integer");
        assert_eq!(order["required"][0], "ORD_NUM");
    }

    #[test]
    fn list_replies_reference_the_entity_schema() {
        let doc = document_json();
        let schema = &doc["paths"]["/customers"]["get"]["responses"]["200"]["content"]
            ["application/json"]["schema"];
        assert_eq!(schema["type"], "array");
        assert_eq!(schema["items"]["$ref"], "#/components/schemas/Customer");
    }
}
