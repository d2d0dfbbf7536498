#![no_main]

use hateoas_links::{inject_value, record_links, InjectOptions, LinkOption, LinkRegistry};
use libfuzzer_sys::fuzz_target;
use serde::Serialize;
use std::sync::LazyLock;

#[derive(Serialize, Default)]
struct Item {
    id: u64,
    children: Vec<Item>,
    parent: Option<Box<Item>>,
}

record_links!(Item { id, children, parent });

static REGISTRY: LazyLock<LinkRegistry> = LazyLock::new(|| {
    let registry = LinkRegistry::new();
    registry.register(
        &Item::default(),
        [LinkOption::self_link("/items/{id}/{children}", "self")],
    );
    registry
});

// Accepts arbitrary bytes, parses them as JSON and pairs the tree with values
// that almost never match its shape. Goal: no panics.
fuzz_target!(|data: &[u8]| {
    if let Ok(tree) = serde_json::from_slice::<serde_json::Value>(data) {
        let item = Item {
            id: 1,
            children: vec![Item::default()],
            parent: Some(Box::new(Item::default())),
        };
        let options = InjectOptions::default();

        let mut against_record = tree.clone();
        inject_value(&REGISTRY, &item, &mut against_record, &options);

        let mut against_list = tree;
        inject_value(&REGISTRY, &vec![vec![item]], &mut against_list, &options);
    }
});
