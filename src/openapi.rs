use serde_json::{json, Value};

/// OpenAPI 3 document for the trip endpoints, with paths under `/{prefix}`.
#[must_use]
pub fn openapi_spec(prefix: &str) -> Value {
    let base = if prefix.is_empty() {
        String::new()
    } else {
        format!("/{prefix}")
    };
    let error = |description: &str, schema: &str| {
        json!({
          "description": description,
          "content": {"application/json": {"schema": {"$ref": format!("#/components/schemas/{schema}")}}}
        })
    };

    let mut paths = serde_json::Map::new();
    paths.insert(
        format!("{base}/trips"),
        json!({
          "get": {
            "summary": "List trips, newest first",
            "responses": {
              "200": {
                "description": "all trips",
                "content": {"application/json": {"schema": {"type": "array", "items": {"$ref": "#/components/schemas/Trip"}}}}
              },
              "500": error("storage failure", "ApiError")
            }
          },
          "post": {
            "summary": "Record a trip and compute its emissions",
            "requestBody": {
              "required": true,
              "content": {"application/json": {"schema": {"$ref": "#/components/schemas/CreateTrip"}}}
            },
            "responses": {
              "201": {
                "description": "stored trip",
                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/Trip"}}}
              },
              "400": error("invalid or malformed trip", "ValidationError"),
              "500": error("storage failure", "ApiError")
            }
          }
        }),
    );
    paths.insert(
        format!("{base}/trips/stats"),
        json!({
          "get": {
            "summary": "Total and per-mode emissions",
            "responses": {
              "200": {
                "description": "emission totals; modes without trips are omitted from byMode",
                "content": {"application/json": {"schema": {"$ref": "#/components/schemas/TripStats"}}}
              },
              "500": error("storage failure", "ApiError")
            }
          }
        }),
    );
    paths.insert(
        format!("{base}/openapi.json"),
        json!({"get": {"responses": {"200": {"description": "this document"}}}}),
    );

    json!({
      "openapi": "3.0.3",
      "info": {
        "title": "Trip Emissions API",
        "description": "Record trips and compute CO2e emission statistics",
        "version": env!("CARGO_PKG_VERSION")
      },
      "paths": paths,
      "components": {
        "securitySchemes": {
          "access-token": {"type": "http", "scheme": "bearer", "bearerFormat": "JWT"}
        },
        "schemas": {
          "TransportMode": {"type": "string", "enum": ["CAR", "FLIGHT", "TRAIN"]},
          "CreateTrip": {
            "type": "object",
            "required": ["origin", "destination", "distanceKm", "mode"],
            "properties": {
              "origin": {"type": "string", "minLength": 1},
              "destination": {"type": "string", "minLength": 1},
              "distanceKm": {"type": "number", "exclusiveMinimum": true, "minimum": 0},
              "mode": {"$ref": "#/components/schemas/TransportMode"}
            }
          },
          "Trip": {
            "type": "object",
            "required": ["id", "createdAt", "origin", "destination", "distanceKm", "mode", "emissionsKg"],
            "properties": {
              "id": {"type": "string", "format": "uuid"},
              "createdAt": {"type": "string", "format": "date-time"},
              "origin": {"type": "string"},
              "destination": {"type": "string"},
              "distanceKm": {"type": "number"},
              "mode": {"$ref": "#/components/schemas/TransportMode"},
              "emissionsKg": {"type": "number", "description": "kg CO2e, 3 decimals"}
            }
          },
          "TripStats": {
            "type": "object",
            "required": ["totalKg", "byMode"],
            "properties": {
              "totalKg": {"type": "number"},
              "byMode": {
                "type": "array",
                "items": {
                  "type": "object",
                  "required": ["mode", "sum"],
                  "properties": {
                    "mode": {"$ref": "#/components/schemas/TransportMode"},
                    "sum": {"type": "number"}
                  }
                }
              }
            }
          },
          "ValidationError": {
            "type": "object",
            "required": ["error"],
            "properties": {
              "error": {"type": "string"},
              "fields": {
                "type": "array",
                "items": {
                  "type": "object",
                  "required": ["field", "message"],
                  "properties": {
                    "field": {"type": "string"},
                    "message": {"type": "string"}
                  }
                }
              }
            }
          },
          "ApiError": {
            "type": "object",
            "required": ["error"],
            "properties": {"error": {"type": "string"}}
          }
        }
      }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_trip_endpoint() {
        let spec = openapi_spec("v1");
        let paths = spec["paths"].as_object().unwrap();

        assert!(paths["/v1/trips"]["get"].is_object());
        assert!(paths["/v1/trips"]["post"].is_object());
        assert!(paths["/v1/trips/stats"]["get"].is_object());
        assert_eq!(
            paths["/v1/trips"]["post"]["responses"]["400"]["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/ValidationError"
        );
    }

    #[test]
    fn every_schema_reference_resolves() {
        let spec = openapi_spec("v1");
        let schemas = spec["components"]["schemas"].as_object().unwrap();

        fn refs(value: &Value, out: &mut Vec<String>) {
            match value {
                Value::Object(map) => {
                    if let Some(Value::String(r)) = map.get("$ref") {
                        out.push(r.clone());
                    }
                    map.values().for_each(|v| refs(v, out));
                }
                Value::Array(items) => items.iter().for_each(|v| refs(v, out)),
                _ => {}
            }
        }

        let mut found = Vec::new();
        refs(&spec, &mut found);
        assert!(!found.is_empty());
        for r in found {
            let name = r.trim_start_matches("#/components/schemas/");
            assert!(schemas.contains_key(name), "dangling $ref {r}");
        }
    }

    #[test]
    fn empty_prefix_documents_root_paths() {
        let spec = openapi_spec("");
        let paths = spec["paths"].as_object().unwrap();

        assert!(paths.contains_key("/trips"));
        assert!(paths.contains_key("/trips/stats"));
    }
}
