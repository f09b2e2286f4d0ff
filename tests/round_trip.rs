//! Round-Trip Invariant Tests
//!
//! Hydrating a wire value and dehydrating the result reproduces the
//! original shape, modulo the intentional differences:
//! - undeclared keys are removed (strict) or preserved (loose)
//! - null fields without an explicitly nullable schema are omitted
//! - numeric representations normalize to what the schema declares

use std::collections::BTreeMap;

use hydrus::engine::{Engine, EngineOptions};
use hydrus::registry::{TypeBinding, TypeSpace};
use hydrus::schema::{Format, ScalarSchema, ScalarType, Schema, SchemaRef};
use hydrus::value::Typed;
use serde_json::{json, Value};
use std::sync::Arc;

// =============================================================================
// Helper Functions
// =============================================================================

fn props(entries: Vec<(&str, SchemaRef)>) -> BTreeMap<String, SchemaRef> {
    entries
        .into_iter()
        .map(|(name, schema)| (name.to_string(), schema))
        .collect()
}

fn petstore_engine() -> Engine {
    let space = TypeSpace::new("petstore")
        .register(TypeBinding::new(
            "Pet",
            ["id", "name", "price", "category", "tags", "rating"],
        ))
        .register(TypeBinding::new("Tag", ["name"]))
        .register(TypeBinding::new("Category", ["id", "name"]));
    Engine::new(EngineOptions::default().with_space(space))
}

/// The minimal pet schema: id, name, and typed tags.
fn simple_pet_schema() -> SchemaRef {
    let tag = Schema::typed_object("Tag", props(vec![("name", Schema::string())]));
    Schema::typed_object(
        "Pet",
        props(vec![
            ("id", Schema::integer()),
            ("name", Schema::string()),
            ("tags", Schema::array(tag)),
        ]),
    )
}

/// The full pet schema: defaults, a nested typed category, and an untyped
/// rating object carrying a date.
fn full_pet_schema() -> SchemaRef {
    let mut price = ScalarSchema::new(ScalarType::Number);
    price.default = Some(json!(100.0));

    let category = Schema::typed_object(
        "Category",
        props(vec![("id", Schema::integer()), ("name", Schema::string())]),
    );
    let tag = Schema::typed_object("Tag", props(vec![("name", Schema::string())]));
    let rating = Schema::strict_object(props(vec![
        ("value", Schema::number()),
        ("created", Schema::temporal(Format::Date)),
    ]));

    Schema::typed_object(
        "Pet",
        props(vec![
            ("id", Schema::integer()),
            ("name", Schema::string()),
            ("price", Arc::new(Schema::Scalar(price))),
            ("category", category),
            ("tags", Schema::array(tag)),
            ("rating", rating),
        ]),
    )
}

// =============================================================================
// End-To-End Scenario
// =============================================================================

/// Numeric types normalize per schema on the way through: string ids come
/// back as integers, numeric tag names come back as strings.
#[test]
fn test_pet_round_trip_normalizes_per_schema() {
    let engine = petstore_engine();
    let schema = simple_pet_schema();

    let input = json!({
        "id": "1",
        "name": "Fido",
        "tags": [{"name": 1}, {"name": 2}]
    });

    let pet = engine.hydrate(&input, &schema).unwrap();
    let Typed::Object(ref object) = pet else {
        panic!("expected a domain object");
    };
    assert_eq!(object.type_name(), "Pet");
    assert_eq!(object.get("id"), Some(&Typed::Int(1)));
    assert_eq!(object.get("name"), Some(&Typed::String("Fido".to_string())));
    match object.get("tags") {
        Some(Typed::Array(tags)) => {
            assert_eq!(tags.len(), 2);
            for (tag, expected) in tags.iter().zip(["1", "2"]) {
                let Typed::Object(tag) = tag else {
                    panic!("expected tag object");
                };
                assert_eq!(tag.type_name(), "Tag");
                assert_eq!(tag.get("name"), Some(&Typed::String(expected.to_string())));
            }
        }
        other => panic!("expected tags array, got {:?}", other),
    }

    let wire = engine.dehydrate(&pet, &schema).unwrap();
    assert_eq!(
        wire,
        json!({
            "id": 1,
            "name": "Fido",
            "tags": [{"name": "1"}, {"name": "2"}]
        })
    );
}

#[test]
fn test_full_pet_round_trip_with_defaults_and_dates() {
    let engine = petstore_engine();
    let schema = full_pet_schema();

    let input = json!({
        "id": 7,
        "name": "Rex",
        "category": {"name": "dogs"},
        "tags": [],
        "rating": {"value": "9.5", "created": "2016-01-01"}
    });

    let pet = engine.hydrate(&input, &schema).unwrap();
    let Typed::Object(ref object) = pet else {
        panic!("expected a domain object");
    };

    // The missing price fills from its declared default.
    assert_eq!(object.get("price"), Some(&Typed::Float(100.0)));

    match object.get("category") {
        Some(Typed::Object(category)) => {
            assert_eq!(category.type_name(), "Category");
            assert_eq!(category.get("id"), None);
        }
        other => panic!("expected category object, got {:?}", other),
    }

    match object.get("rating") {
        Some(Typed::Map(rating)) => {
            assert_eq!(rating.get("value"), Some(&Typed::Float(9.5)));
            assert!(matches!(rating.get("created"), Some(Typed::DateTime(_))));
        }
        other => panic!("expected rating map, got {:?}", other),
    }

    let wire = engine.dehydrate(&pet, &schema).unwrap();
    assert_eq!(
        wire,
        json!({
            "id": 7,
            "name": "Rex",
            "price": 100.0,
            "category": {"name": "dogs"},
            "tags": [],
            "rating": {"value": 9.5, "created": "2016-01-01"}
        })
    );
}

// =============================================================================
// Strict Mode And Null Omission
// =============================================================================

/// Undeclared input keys do not survive a round trip through a typed
/// schema.
#[test]
fn test_extraneous_keys_removed() {
    let engine = petstore_engine();
    let schema = simple_pet_schema();

    let input = json!({
        "id": 1,
        "name": "Fido",
        "tags": [],
        "undeclared": "goes away"
    });

    let pet = engine.hydrate(&input, &schema).unwrap();
    let wire = engine.dehydrate(&pet, &schema).unwrap();
    assert_eq!(wire, json!({"id": 1, "name": "Fido", "tags": []}));
}

#[test]
fn test_null_field_omitted_unless_nullable() {
    let engine = petstore_engine();

    let mut nullable = ScalarSchema::new(ScalarType::String);
    nullable.nullable = true;
    let schema = Schema::typed_object(
        "Pet",
        props(vec![
            ("id", Schema::integer()),
            ("name", Arc::new(Schema::Scalar(nullable))),
        ]),
    );

    let pet = engine
        .hydrate(&json!({"id": 1, "name": null}), &schema)
        .unwrap();
    let wire = engine.dehydrate(&pet, &schema).unwrap();
    // The nullable name keeps its null.
    assert_eq!(wire, json!({"id": 1, "name": null}));

    let schema = simple_pet_schema();
    let pet = engine
        .hydrate(&json!({"id": 1, "name": null, "tags": []}), &schema)
        .unwrap();
    let wire = engine.dehydrate(&pet, &schema).unwrap();
    // The non-nullable name is omitted.
    assert_eq!(wire, json!({"id": 1, "tags": []}));
}

// =============================================================================
// Determinism And Non-Mutation
// =============================================================================

/// Hydrating the same input twice yields field-for-field equal results.
#[test]
fn test_hydration_is_idempotent() {
    let engine = petstore_engine();
    let schema = full_pet_schema();

    let input = json!({
        "id": "3",
        "name": "Odie",
        "category": {"id": "2", "name": "dogs"},
        "tags": [{"name": "loud"}],
        "rating": {"value": 5, "created": "2020-06-15"}
    });

    let first = engine.hydrate(&input, &schema).unwrap();
    let second = engine.hydrate(&input, &schema).unwrap();
    assert_eq!(first, second);
}

/// The caller's input value is never converted in place.
#[test]
fn test_input_is_not_mutated() {
    let engine = petstore_engine();
    let schema = simple_pet_schema();

    let input = json!({"id": "1", "name": "Fido", "tags": [{"name": 1}]});
    let snapshot = input.clone();

    engine.hydrate(&input, &schema).unwrap();

    assert_eq!(input, snapshot);
    // The numeric-string id is still a string in the original input.
    assert_eq!(input["id"], Value::String("1".to_string()));
    assert_eq!(input["tags"][0]["name"], json!(1));
}

// =============================================================================
// Top-Level Defaults
// =============================================================================

#[test]
fn test_null_top_level_object_uses_schema_default() {
    let engine = petstore_engine();

    let mut object = match Schema::strict_object(props(vec![("id", Schema::integer())])).as_ref() {
        Schema::Object(object) => object.clone(),
        _ => unreachable!(),
    };
    object.default = Some(json!({"id": 42}));
    let schema = Arc::new(Schema::Object(object));

    let typed = engine.hydrate(&Value::Null, &schema).unwrap();
    let wire = engine.dehydrate(&typed, &schema).unwrap();
    assert_eq!(wire, json!({"id": 42}));
}
