use pretty_assertions::assert_eq;
use rest_schema_core::schema::rest::CONTENT_TYPE_MULTIPART;
use rest_schema_core::schema::{
    ApiKeyLocation, HttpMethod, ObjectField, ParameterLocation, SecurityScheme,
    TypeRepresentation,
};
use rest_schema_core::{convert_openapi_v2, ConvertError, ConvertOptions, RestSchema, TypeExpr};
use serde_json::json;

const PETSTORE: &str = r##"
swagger: "2.0"
info:
  title: Swagger Petstore
  version: 1.0.6
host: petstore.swagger.io
basePath: /v2
schemes: [https, http]
consumes: [application/json]
security:
  - api_key: []
paths:
  /pet:
    post:
      operationId: addPet
      summary: Add a new pet to the store
      parameters:
        - in: body
          name: body
          required: true
          schema:
            $ref: "#/definitions/Pet"
      responses:
        "200":
          description: ok
          schema:
            $ref: "#/definitions/Pet"
      security:
        - petstore_auth: ["write:pets", "read:pets"]
  /pet/findByStatus:
    get:
      operationId: findPetsByStatus
      parameters:
        - name: status
          in: query
          required: true
          type: array
          items:
            type: string
            enum: [available, pending, sold]
          collectionFormat: multi
      responses:
        "200":
          description: ok
          schema:
            type: array
            items:
              $ref: "#/definitions/Pet"
  /pet/{petId}/uploadImage:
    post:
      operationId: uploadFile
      consumes: [multipart/form-data]
      parameters:
        - {name: petId, in: path, required: true, type: integer, format: int64}
        - {name: additionalMetadata, in: formData, type: string}
        - {name: file, in: formData, type: file}
      responses:
        "200":
          description: ok
          schema:
            $ref: "#/definitions/ApiResponse"
  /store/inventory:
    get:
      operationId: getInventory
      responses:
        "200":
          description: ok
          schema:
            type: object
            additionalProperties:
              type: integer
              format: int32
  /store/order/{orderId}:
    get:
      parameters:
        - {name: orderId, in: path, required: true, type: integer}
    delete:
      parameters:
        - {name: orderId, in: path, required: true, type: integer}
      responses:
        "400": {description: Invalid ID supplied}
        "404": {description: Order not found}
securityDefinitions:
  api_key:
    type: apiKey
    name: api_key
    in: header
  petstore_auth:
    type: oauth2
    authorizationUrl: https://petstore.swagger.io/oauth/authorize
    flow: implicit
    scopes:
      write:pets: modify pets in your account
      read:pets: read your pets
definitions:
  Category:
    type: object
    properties:
      id: {type: integer, format: int64}
      name: {type: string}
  Pet:
    type: object
    required: [name, photoUrls]
    properties:
      id: {type: integer, format: int64}
      category:
        $ref: "#/definitions/Category"
      name: {type: string, example: doggie}
      photoUrls:
        type: array
        items: {type: string}
      status:
        type: string
        description: pet status in the store
        enum: [available, pending, sold]
  ApiResponse:
    type: object
    properties:
      code: {type: integer, format: int32}
      type: {type: string}
      message: {type: string}
"##;

fn petstore(options: &ConvertOptions) -> RestSchema {
    convert_openapi_v2(PETSTORE.as_bytes(), options).unwrap()
}

fn field(schema: &RestSchema, object: &str, name: &str) -> ObjectField {
    schema.object_types[object].fields[name].clone()
}

#[test]
fn test_settings() {
    let options = ConvertOptions {
        env_prefix: "PET_STORE".to_string(),
        ..Default::default()
    };
    let schema = petstore(&options);

    assert_eq!(schema.settings.version.as_deref(), Some("1.0.6"));
    assert_eq!(
        schema.settings.servers[0].url,
        "{{PET_STORE_SERVER_URL:-https://petstore.swagger.io/v2}}"
    );
    assert_eq!(
        schema.settings.security_schemes["api_key"],
        SecurityScheme::ApiKey {
            location: ApiKeyLocation::Header,
            name: "api_key".to_string(),
            value: "{{PET_STORE_API_KEY}}".to_string(),
        }
    );
    assert!(matches!(
        schema.settings.security_schemes["petstore_auth"],
        SecurityScheme::OAuth2 { .. }
    ));
    assert_eq!(schema.settings.security.len(), 1);
    assert!(schema.settings.security[0].contains_key("api_key"));
}

#[test]
fn test_functions_and_procedures() {
    let schema = petstore(&ConvertOptions::default());

    let functions: Vec<_> = schema.functions.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(functions, vec!["findPetsByStatus", "getInventory"]);

    let procedures: Vec<_> = schema
        .procedures
        .iter()
        .map(|p| (p.name.as_str(), p.request.method))
        .collect();
    assert_eq!(
        procedures,
        vec![
            ("addPet", HttpMethod::Post),
            ("uploadFile", HttpMethod::Post),
            ("deleteStoreOrderOrderId", HttpMethod::Delete),
        ]
    );
}

#[test]
fn test_body_procedure() {
    let schema = petstore(&ConvertOptions::default());
    let add = schema.procedure("addPet").unwrap();

    assert_eq!(add.description.as_deref(), Some("Add a new pet to the store"));
    assert_eq!(add.result_type, TypeExpr::named("Pet").encode());
    assert_eq!(add.arguments["body"].argument_type, TypeExpr::named("Pet").encode());

    let body = add.request.request_body.as_ref().unwrap();
    assert_eq!(body.content_type, "application/json");
    assert_eq!(body.schema.type_name, "Pet");
    assert_eq!(add.request.security[0]["petstore_auth"].len(), 2);
}

#[test]
fn test_array_query_parameter_and_result() {
    let schema = petstore(&ConvertOptions::default());
    let find = schema.function("findPetsByStatus").unwrap();

    assert_eq!(
        find.result_type,
        TypeExpr::array(TypeExpr::named("Pet")).encode()
    );
    assert_eq!(
        find.arguments["status"].argument_type,
        TypeExpr::array(TypeExpr::named("FindPetsByStatusStatusEnum")).encode()
    );
    let param = &find.request.parameters[0];
    assert_eq!(param.location, ParameterLocation::Query);
    assert_eq!(param.schema.type_name, "array");

    assert_eq!(
        schema.scalar_types["FindPetsByStatusStatusEnum"].representation,
        Some(TypeRepresentation::Enum {
            one_of: vec!["available".into(), "pending".into(), "sold".into()],
        })
    );
}

#[test]
fn test_form_data_upload() {
    let schema = petstore(&ConvertOptions::default());
    let upload = schema.procedure("uploadFile").unwrap();

    let body = upload.request.request_body.as_ref().unwrap();
    assert_eq!(body.content_type, CONTENT_TYPE_MULTIPART);
    assert_eq!(body.schema.type_name, "object");
    assert_eq!(body.schema.properties["file"].type_name, "Binary");
    assert!(body.schema.properties["file"].nullable);

    assert_eq!(upload.request.parameters.len(), 1);
    assert_eq!(upload.request.parameters[0].name, "petId");
    assert_eq!(
        upload.arguments["file"].argument_type,
        TypeExpr::named("Binary").into_nullable().encode()
    );
}

#[test]
fn test_map_result_falls_back_to_json() {
    let schema = petstore(&ConvertOptions::default());
    let inventory = schema.function("getInventory").unwrap();

    assert_eq!(inventory.result_type, TypeExpr::named("JSON").encode());
    assert_eq!(
        schema.scalar_types["JSON"].representation,
        Some(TypeRepresentation::Json)
    );
}

#[test]
fn test_error_only_responses_yield_nullable_boolean() {
    let schema = petstore(&ConvertOptions::default());
    let delete = schema.procedure("deleteStoreOrderOrderId").unwrap();

    assert_eq!(
        delete.result_type,
        TypeExpr::named("Boolean").into_nullable().encode()
    );
    assert!(delete.request.request_body.is_none());
}

#[test]
fn test_definitions_registered() {
    let schema = petstore(&ConvertOptions::default());

    let names: Vec<_> = schema.object_types.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["ApiResponse", "Category", "Pet"]);

    assert_eq!(field(&schema, "Pet", "name").field_type, TypeExpr::named("String").encode());
    assert_eq!(
        field(&schema, "Pet", "category").field_type,
        TypeExpr::named("Category").into_nullable().encode()
    );
    assert_eq!(
        field(&schema, "Pet", "photoUrls").field_type,
        TypeExpr::array(TypeExpr::named("String")).encode()
    );
    let status = field(&schema, "Pet", "status");
    assert_eq!(status.field_type, TypeExpr::named("PetStatusEnum").into_nullable().encode());
    assert_eq!(status.description.as_deref(), Some("pet status in the store"));
}

#[test]
fn test_scalar_registry_has_one_entry_per_name() {
    let schema = petstore(&ConvertOptions::default());

    let names: Vec<_> = schema.scalar_types.keys().map(String::as_str).collect();
    assert_eq!(
        names,
        vec![
            "Binary",
            "Boolean",
            "FindPetsByStatusStatusEnum",
            "Int32",
            "Int64",
            "JSON",
            "PetStatusEnum",
            "String",
        ]
    );
}

#[test]
fn test_serialized_shape() {
    let schema = petstore(&ConvertOptions::default());
    let value = serde_json::to_value(schema.function("findPetsByStatus").unwrap()).unwrap();

    assert_eq!(
        value["result_type"],
        json!({
            "type": "array",
            "element_type": {"type": "named", "name": "Pet"}
        })
    );
    assert_eq!(value["request"]["method"], json!("get"));
    assert_eq!(value["request"]["parameters"][0]["in"], json!("query"));
    assert_eq!(value["request"]["security"], json!([]));

    let value = serde_json::to_value(&schema.settings).unwrap();
    assert_eq!(
        value["securitySchemes"]["api_key"],
        json!({"type": "apiKey", "in": "header", "name": "api_key", "value": "{{API_KEY}}"})
    );
}

#[test]
fn test_cyclic_definitions() {
    let input = r##"
swagger: "2.0"
paths:
  /nodes:
    get:
      responses:
        "200":
          description: ok
          schema: {$ref: "#/definitions/Parent"}
definitions:
  Parent:
    type: object
    properties:
      child: {$ref: "#/definitions/Child"}
  Child:
    type: object
    properties:
      parent: {$ref: "#/definitions/Parent"}
"##;
    let schema = convert_openapi_v2(input.as_bytes(), &ConvertOptions::default()).unwrap();

    assert_eq!(schema.functions[0].name, "nodes");
    assert_eq!(
        field(&schema, "Parent", "child").field_type,
        TypeExpr::named("Child").into_nullable().encode()
    );
    assert_eq!(
        field(&schema, "Child", "parent").field_type,
        TypeExpr::named("Parent").into_nullable().encode()
    );
}

#[test]
fn test_recursive_array_definition_is_registered() {
    let input = r##"
swagger: "2.0"
paths:
  /tree:
    get:
      responses:
        "200":
          description: ok
          schema: {$ref: "#/definitions/Tree"}
definitions:
  Tree:
    type: array
    items: {$ref: "#/definitions/Tree"}
"##;
    let schema = convert_openapi_v2(input.as_bytes(), &ConvertOptions::default()).unwrap();

    assert_eq!(
        schema.functions[0].result_type,
        TypeExpr::array(TypeExpr::named("Tree")).encode()
    );
    assert!(schema.object_types.is_empty());
    assert_eq!(
        schema.scalar_types["Tree"].representation,
        Some(TypeRepresentation::Json)
    );
}

#[test]
fn test_definition_overwrites_inline_type_of_same_name() {
    let input = r#"
swagger: "2.0"
paths:
  /owner:
    get:
      operationId: pet
      responses:
        "200":
          description: ok
          schema:
            type: object
            properties:
              inline: {type: string}
definitions:
  PetResult:
    type: object
    properties:
      declared: {type: integer}
"#;
    let schema = convert_openapi_v2(input.as_bytes(), &ConvertOptions::default()).unwrap();

    let fields: Vec<_> = schema.object_types["PetResult"].fields.keys().collect();
    assert_eq!(fields, vec!["declared"]);
}

#[test]
fn test_failing_operation_aborts_conversion() {
    let input = r#"
swagger: "2.0"
paths:
  /ok:
    get:
      responses:
        "200": {description: ok, schema: {type: string}}
  /broken:
    get:
      operationId: broken
      responses:
        "200":
          description: ok
          schema:
            type: object
            properties:
              tags: {type: array}
"#;
    let errors = convert_openapi_v2(input.as_bytes(), &ConvertOptions::default()).unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0].root(), ConvertError::MissingArrayItem));
    assert_eq!(errors[0].api_path(), Some("/broken"));
    assert_eq!(errors[0].field_path(), Some("broken.Result.tags"));
    assert_eq!(
        errors[0].to_string(),
        "/broken: broken.Result.tags: array item is empty"
    );
}

#[test]
fn test_json_input() {
    let input = json!({
        "swagger": "2.0",
        "paths": {
            "/ping": {
                "get": {"responses": {"204": {"description": "pong"}}}
            }
        }
    });
    let schema =
        convert_openapi_v2(input.to_string().as_bytes(), &ConvertOptions::default()).unwrap();

    assert_eq!(schema.functions[0].name, "ping");
    assert_eq!(
        schema.functions[0].result_type,
        TypeExpr::named("Boolean").into_nullable().encode()
    );
    assert!(schema.settings.servers.is_empty());
}

#[test]
fn test_no_paths() {
    let errors =
        convert_openapi_v2(b"swagger: '2.0'\ninfo: {title: x}", &ConvertOptions::default())
            .unwrap_err();
    assert!(matches!(errors[0], ConvertError::NoConvertibleApi));
}
