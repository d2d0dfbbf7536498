//! Shared fixtures: a bakery that sells cupcakes, which point back at their
//! bakery (a cyclic type graph).

#![allow(dead_code)]

use hateoas_links::{record_links, LinkOption, LinkRegistry, LinkTemplate, Method};
use serde::Serialize;
use serde_json::{json, Value};

#[derive(Debug, Clone, Default, Serialize)]
pub struct Cupcake {
    pub id: u64,
    pub name: String,
    pub bakery: Option<Box<Bakery>>,
}

record_links!(Cupcake { id, name, bakery });

#[derive(Debug, Clone, Default, Serialize)]
pub struct Bakery {
    pub id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cupcake: Option<Box<Cupcake>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cupcakes: Vec<Box<Cupcake>>,
}

record_links!(Bakery {
    id,
    cupcake => "cupcake,omitempty",
    cupcakes => "cupcakes,omitempty",
});

pub fn cupcake(id: u64, name: &str) -> Cupcake {
    Cupcake {
        id,
        name: name.to_string(),
        bakery: None,
    }
}

pub fn bakery(id: u64) -> Bakery {
    Bakery {
        id,
        ..Bakery::default()
    }
}

/// Registry with every link kind on both types.
pub fn full_registry() -> LinkRegistry {
    let registry = LinkRegistry::new();

    registry.register(
        &Cupcake::default(),
        [
            LinkOption::index("/api/v1/cupcakes", "test"),
            LinkOption::self_link("/api/v1/cupcakes/{id}", "get itself"),
            LinkOption::custom(
                "other",
                LinkTemplate::new(Method::Get, "/api/v1/cupcakes/{name}", "get one by name"),
            ),
            LinkOption::post("/api/v1/cupcakes", "create a new one"),
        ],
    );

    registry.register(
        &Bakery::default(),
        [
            LinkOption::index("/api/v1/bakeries", "get all bakeries"),
            LinkOption::self_link("/api/v1/bakeries/{id}", "get a bakery by id"),
            LinkOption::post("/api/v1/bakeries", "create a new bakery"),
        ],
    );

    registry
}

/// Registry with only `self` links.
pub fn self_registry() -> LinkRegistry {
    let registry = LinkRegistry::new();
    registry.register(
        &Cupcake::default(),
        [LinkOption::self_link("/api/v1/cupcakes/{id}", "get itself")],
    );
    registry.register(
        &Bakery::default(),
        [LinkOption::self_link("/api/v1/bakeries/{id}", "get a bakery by id")],
    );
    registry
}

pub fn full_bakery_links(id: u64) -> Value {
    json!({
        "index": {"method": "GET", "href": "/api/v1/bakeries", "comment": "get all bakeries"},
        "self": {"method": "GET", "href": format!("/api/v1/bakeries/{id}"), "comment": "get a bakery by id"},
        "post": {"method": "POST", "href": "/api/v1/bakeries", "comment": "create a new bakery"},
    })
}

pub fn full_cupcake_links(id: u64, name: &str) -> Value {
    json!({
        "index": {"method": "GET", "href": "/api/v1/cupcakes", "comment": "test"},
        "other": {"method": "GET", "href": format!("/api/v1/cupcakes/{name}"), "comment": "get one by name"},
        "post": {"method": "POST", "href": "/api/v1/cupcakes", "comment": "create a new one"},
        "self": {"method": "GET", "href": format!("/api/v1/cupcakes/{id}"), "comment": "get itself"},
    })
}

pub fn self_bakery_links(id: u64) -> Value {
    json!({
        "self": {"method": "GET", "href": format!("/api/v1/bakeries/{id}"), "comment": "get a bakery by id"},
    })
}

pub fn self_cupcake_links(id: u64) -> Value {
    json!({
        "self": {"method": "GET", "href": format!("/api/v1/cupcakes/{id}"), "comment": "get itself"},
    })
}

/// Strip every `_links` key, recursively.
pub fn strip_links(value: &mut Value) {
    match value {
        Value::Object(obj) => {
            obj.remove("_links");
            for child in obj.values_mut() {
                strip_links(child);
            }
        }
        Value::Array(items) => {
            for item in items {
                strip_links(item);
            }
        }
        _ => {}
    }
}
