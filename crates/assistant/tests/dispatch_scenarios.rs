use std::sync::Arc;
use std::thread;

use mustock_assistant::{
    AssistantConfig, AssistantError, Intent, IntentModel, MatchMethod, QueryDispatcher,
    TrainingCorpus,
};
use mustock_inventory::{CatalogItem, CatalogSnapshot};
use proptest::prelude::*;
use rust_decimal::Decimal;

fn dispatcher() -> QueryDispatcher {
    mustock_observability::init_for_tests();
    let model = IntentModel::train(&TrainingCorpus::builtin()).unwrap();
    QueryDispatcher::new(Arc::new(model), AssistantConfig::default())
}

fn item(name: &str, category: &str, quantity: u32) -> CatalogItem {
    CatalogItem::new(name, category, quantity, Decimal::new(29999, 2))
}

fn music_store() -> CatalogSnapshot {
    CatalogSnapshot::new(vec![
        CatalogItem::new("Fender Stratocaster", "Electric Guitars", 15, Decimal::new(199999, 2))
            .with_location("Shelf A1")
            .with_sku("FEN-STRAT"),
        item("Gibson Les Paul", "Electric Guitars", 4).with_location("Shelf A2"),
        item("Yamaha Keyboard", "Keyboards", 9).with_location("Shelf B1"),
        item("Black Guitar Cable", "Accessories", 40).with_location("Bin D4"),
        item("Marshall Amplifier", "Amplifiers", 2).with_location("Floor 2"),
    ])
    .unwrap()
    .with_version(3)
}

#[test]
fn location_of_a_single_item() {
    let catalog = CatalogSnapshot::new(vec![
        CatalogItem::new("Fender Stratocaster", "Electric Guitars", 15, Decimal::new(199999, 2))
            .with_location("Shelf A1"),
    ])
    .unwrap();

    let result = dispatcher()
        .handle("where is the fender stratocaster", &catalog)
        .unwrap();

    assert_eq!(result.intent, Intent::Location);
    assert!(result.response_text.contains("Shelf A1"));
    assert!(result.response_text.contains("15"));
}

#[test]
fn list_categories_without_a_category_entity() {
    let catalog = CatalogSnapshot::new(vec![
        item("Fender Stratocaster", "Electric Guitars", 15),
        item("Yamaha Keyboard", "Keyboards", 9),
        item("Gibson Les Paul", "Electric Guitars", 4),
    ])
    .unwrap();

    let result = dispatcher().handle("list categories", &catalog).unwrap();

    assert_eq!(result.intent, Intent::ListCategory);
    assert_eq!(result.response_text, "Available categories: Electric Guitars, Keyboards");
}

#[test]
fn low_stock_uses_the_query_time_threshold() {
    let catalog = CatalogSnapshot::new(vec![
        item("Item Three", "Accessories", 3),
        item("Item Twelve", "Accessories", 12),
        item("Item Nine", "Accessories", 9),
        item("Item TwentyFive", "Accessories", 25),
    ])
    .unwrap();
    let dispatcher = dispatcher();

    let result = dispatcher
        .handle_with_threshold("what are our low stock items", &catalog, 10)
        .unwrap();
    assert_eq!(result.intent, Intent::LowStock);
    let listed: Vec<&str> = result.response_data["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(listed, vec!["Item Three", "Item Nine"]);
    assert!(result.response_text.contains("Total low stock items: 2"));

    let result = dispatcher
        .handle_with_threshold("what are our low stock items", &catalog, 0)
        .unwrap();
    assert_eq!(result.response_text, "Great news! There are no low stock items.");
}

#[test]
fn gibberish_falls_back_to_unknown() {
    let result = dispatcher().handle("asdlkjasdlkj", &music_store()).unwrap();

    assert_eq!(result.intent, Intent::Unknown);
    assert!(result.response_text.contains("Try these example queries"));
    assert!(result.response_text.contains("Where is Les Paul located?"));
    assert_eq!(
        result.response_data["suggested_actions"][1],
        "Check low stock items"
    );
}

#[test]
fn every_intent_is_safe_on_an_empty_catalog() {
    let dispatcher = dispatcher();
    let empty = CatalogSnapshot::empty();
    for query in [
        "find fender guitar",
        "how many gibson les pauls do we have",
        "where is the fender stratocaster",
        "list electric guitars",
        "what are our low stock items",
        "price of yamaha keyboard",
        "hello",
    ] {
        let result = dispatcher.handle(query, &empty).unwrap();
        if result.intent == Intent::Unknown {
            assert!(result.response_text.contains("couldn't fully understand"));
        } else {
            assert_eq!(result.response_text, "No items found in the catalog.", "query: {query}");
        }
        assert!(result.entities.is_empty());
    }
}

#[test]
fn misspelled_item_is_resolved_by_similarity() {
    let result = dispatcher()
        .handle("where is the fendr stratocastr", &music_store())
        .unwrap();

    assert_eq!(result.intent, Intent::Location);
    assert_eq!(result.entities[0].method, MatchMethod::Fuzzy);
    assert!(result.response_text.starts_with("Fender Stratocaster is located in Shelf A1"));
}

#[test]
fn price_and_quantity_answers() {
    let dispatcher = dispatcher();
    let catalog = music_store();

    let result = dispatcher
        .handle("how much does the fender stratocaster cost", &catalog)
        .unwrap();
    assert_eq!(result.intent, Intent::Price);
    assert_eq!(
        result.response_text,
        "Fender Stratocaster is priced at $1999.99. Category: Electric Guitars, Current Stock: 15"
    );

    let result = dispatcher
        .handle("how many gibson les pauls do we have", &catalog)
        .unwrap();
    assert_eq!(result.intent, Intent::Quantity);
    assert_eq!(result.response_text, "We currently have 4 Gibson Les Paul in stock.");
}

#[test]
fn blank_query_is_a_client_error() {
    let err = dispatcher().handle("   ", &music_store()).unwrap_err();
    assert_eq!(err, AssistantError::InvalidInput("query text is empty".to_string()));
    assert!(err.is_client_error());
}

#[test]
fn query_result_serializes_for_hosts() {
    let result = dispatcher()
        .handle("where are the black guitar cables", &music_store())
        .unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["intent"], "location");
    assert_eq!(json["entities"][0]["kind"], "item_reference");
    assert_eq!(json["entities"][0]["method"], "exact");
    assert_eq!(json["response_data"]["items"][0]["location"], "Bin D4");
}

#[test]
fn shared_model_serves_concurrent_queries() {
    let dispatcher = Arc::new(dispatcher());
    let catalog = Arc::new(music_store());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let dispatcher = Arc::clone(&dispatcher);
            let catalog = Arc::clone(&catalog);
            thread::spawn(move || {
                dispatcher
                    .handle("where is the fender stratocaster", &catalog)
                    .unwrap()
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(results.windows(2).all(|w| w[0] == w[1]));
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        ..ProptestConfig::default()
    })]

    /// Property: identical arguments give identical results.
    #[test]
    fn handle_is_deterministic(query in "[a-zA-Z0-9 ?.,]{1,40}") {
        let dispatcher = dispatcher();
        let catalog = music_store();
        let first = dispatcher.handle(&query, &catalog);
        let second = dispatcher.handle(&query, &catalog);
        prop_assert_eq!(first, second);
    }

    /// Property: letter case never changes the intent or the matched entities.
    #[test]
    fn handle_ignores_case(query in "[a-z ]{1,40}") {
        prop_assume!(!query.trim().is_empty());
        let dispatcher = dispatcher();
        let catalog = music_store();
        let lower = dispatcher.handle(&query, &catalog).unwrap();
        let upper = dispatcher.handle(&query.to_uppercase(), &catalog).unwrap();
        prop_assert_eq!(lower.intent, upper.intent);
        prop_assert_eq!(lower.entities, upper.entities);
    }

    /// Property: the pipeline answers every non-blank query.
    #[test]
    fn handle_never_fails_on_non_blank_input(query in "\\PC{1,60}") {
        prop_assume!(!query.trim().is_empty());
        let result = dispatcher().handle(&query, &music_store());
        prop_assert!(result.is_ok());
        prop_assert!(!result.unwrap().response_text.is_empty());
    }
}
