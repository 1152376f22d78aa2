//! One response handler per intent.
//!
//! Handlers are pure: the same [`ResponseContext`] always yields the same
//! [`Response`]. Matched items are reported in [`MatchResult`] order; handlers
//! that scan the catalog themselves (`low_stock`, category listings) report in
//! catalog order.

use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::{Value, json};

use mustock_inventory::{CatalogItem, CatalogSnapshot, Category};

use crate::extractor::MatchResult;
use crate::intent::Intent;

pub const EMPTY_CATALOG: &str = "No items found in the catalog.";

pub const EXAMPLE_QUERIES: [&str; 6] = [
    "Find Fender guitar",
    "How many Stratocasters in stock?",
    "Where is Les Paul located?",
    "List electric guitars",
    "What instruments are low in stock?",
    "Price of Yamaha keyboard",
];

pub const SUGGESTED_ACTIONS: [&str; 4] = [
    "Ask about inventory",
    "Check low stock items",
    "Find product location",
    "Get product details",
];

/// Answer text plus the structured data behind it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response {
    pub text: String,
    /// `Null` when there is nothing structured to return.
    pub data: Value,
}

impl Response {
    fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            data: Value::Null,
        }
    }
}

/// Everything a handler may read.
#[derive(Debug, Clone, Copy)]
pub struct ResponseContext<'a> {
    pub query: &'a str,
    pub matches: &'a MatchResult,
    pub catalog: &'a CatalogSnapshot,
    pub low_stock_threshold: u32,
}

impl<'a> ResponseContext<'a> {
    /// Matched items in rank order.
    fn matched_items(&self) -> Vec<&'a CatalogItem> {
        let catalog = self.catalog;
        self.matches
            .items()
            .filter_map(|r| catalog.get(r))
            .collect()
    }
}

/// Route to the handler for `intent`.
pub fn respond(intent: Intent, ctx: &ResponseContext<'_>) -> Response {
    if ctx.catalog.is_empty() && intent != Intent::Unknown {
        return Response::text_only(EMPTY_CATALOG);
    }

    match intent {
        Intent::Search => search(ctx),
        Intent::Quantity => quantity(ctx),
        Intent::Location => location(ctx),
        Intent::ListCategory => list_category(ctx),
        Intent::LowStock => low_stock(ctx),
        Intent::Price => price(ctx),
        Intent::Unknown => unknown(ctx),
    }
}

fn shelf(item: &CatalogItem) -> &str {
    if item.location.trim().is_empty() {
        "Unassigned"
    } else {
        &item.location
    }
}

fn summary(item: &CatalogItem) -> Value {
    json!({
        "id": item.id,
        "name": item.name,
        "category": item.category.label(),
        "quantity": item.quantity,
        "location": shelf(item),
        "price": item.price,
    })
}

fn in_range(price: Decimal, min: Option<Decimal>, max: Option<Decimal>) -> bool {
    min.is_none_or(|m| price >= m) && max.is_none_or(|m| price <= m)
}

pub fn search(ctx: &ResponseContext<'_>) -> Response {
    let (min, max) = ctx.matches.bounds();
    let matched = ctx.matched_items();

    let candidates: Vec<&CatalogItem> = if !matched.is_empty() {
        matched
    } else if min.is_some() || max.is_some() {
        ctx.catalog.items().iter().collect()
    } else {
        Vec::new()
    };
    let found: Vec<&CatalogItem> = candidates
        .into_iter()
        .filter(|item| in_range(item.price, min, max))
        .collect();

    if found.is_empty() {
        return Response::text_only("No items found. Try a different search term.");
    }

    let lines: Vec<String> = found
        .iter()
        .map(|item| {
            format!(
                "Found: {} ({}) - Quantity: {}, Location: {}",
                item.name,
                item.category,
                item.quantity,
                shelf(item)
            )
        })
        .collect();

    let fuzzy = ctx.matches.is_fuzzy();
    let text = if fuzzy {
        format!("Possible matches:\n{}", lines.join("\n"))
    } else {
        lines.join("\n")
    };

    Response {
        text,
        data: json!({
            "items": found.iter().map(|i| summary(i)).collect::<Vec<_>>(),
            "fuzzy": fuzzy,
            "price_range": { "min": min, "max": max },
        }),
    }
}

/// Items sharing a name, in first-match order.
struct NameGroup<'a> {
    name: &'a str,
    total: u32,
    items: Vec<&'a CatalogItem>,
}

pub fn quantity(ctx: &ResponseContext<'_>) -> Response {
    let mut groups: Vec<NameGroup<'_>> = Vec::new();
    for item in ctx.matched_items() {
        match groups.iter_mut().find(|g| g.name == item.name) {
            Some(group) => {
                group.total = group.total.saturating_add(item.quantity);
                group.items.push(item);
            }
            None => groups.push(NameGroup {
                name: &item.name,
                total: item.quantity,
                items: vec![item],
            }),
        }
    }

    if groups.is_empty() {
        return Response::text_only("Could not identify specific items. Please be more specific.");
    }

    let lines: Vec<String> = groups
        .iter()
        .map(|g| {
            if g.items.len() == 1 {
                format!("We currently have {} {} in stock.", g.total, g.name)
            } else {
                let spread: Vec<String> = g
                    .items
                    .iter()
                    .map(|i| format!("{}: {}", shelf(i), i.quantity))
                    .collect();
                format!(
                    "We currently have {} {} in stock across {} locations ({}).",
                    g.total,
                    g.name,
                    g.items.len(),
                    spread.join(", ")
                )
            }
        })
        .collect();

    let items: Vec<Value> = groups
        .iter()
        .map(|g| {
            json!({
                "name": g.name,
                "total": g.total,
                "locations": g.items.iter().map(|i| json!({
                    "location": shelf(i),
                    "quantity": i.quantity,
                })).collect::<Vec<_>>(),
            })
        })
        .collect();

    Response {
        text: lines.join("\n"),
        data: json!({ "items": items }),
    }
}

pub fn location(ctx: &ResponseContext<'_>) -> Response {
    let matched = ctx.matched_items();
    if matched.is_empty() {
        return Response::text_only(
            "Could not determine item location. Please provide a more specific item name.",
        );
    }

    let lines: Vec<String> = matched
        .iter()
        .map(|item| {
            format!(
                "{} is located in {}. Additional details: {}, Quantity: {}",
                item.name,
                shelf(item),
                item.category,
                item.quantity
            )
        })
        .collect();

    Response {
        text: lines.join("\n"),
        data: json!({ "items": matched.iter().map(|i| summary(i)).collect::<Vec<_>>() }),
    }
}

pub fn list_category(ctx: &ResponseContext<'_>) -> Response {
    let mut categories: Vec<&Category> = ctx.matches.categories().filter(|c| c.is_known()).collect();
    if categories.is_empty() {
        for item in ctx.matched_items() {
            if item.category.is_known() && !categories.contains(&&item.category) {
                categories.push(&item.category);
            }
        }
    }

    if categories.is_empty() {
        let available = ctx.catalog.categories();
        if available.is_empty() {
            return Response::text_only("No categories found in the catalog.");
        }
        let labels: Vec<&str> = available.iter().map(|c| c.label()).collect();
        return Response {
            text: format!("Available categories: {}", labels.join(", ")),
            data: json!({ "categories": labels }),
        };
    }

    let mut sections = Vec::with_capacity(categories.len());
    let mut data = Vec::with_capacity(categories.len());
    for category in categories {
        let members: Vec<&CatalogItem> = ctx
            .catalog
            .items()
            .iter()
            .filter(|item| &item.category == category)
            .collect();
        let mut section = format!("Items in {category} category:");
        for item in &members {
            section.push_str(&format!(
                "\n- {} (Quantity: {}, Location: {})",
                item.name,
                item.quantity,
                shelf(item)
            ));
        }
        sections.push(section);
        data.push(json!({
            "category": category.label(),
            "items": members.iter().map(|i| summary(i)).collect::<Vec<_>>(),
        }));
    }

    Response {
        text: sections.join("\n\n"),
        data: json!({ "categories": data }),
    }
}

/// Scans the whole catalog; matched entities are ignored.
pub fn low_stock(ctx: &ResponseContext<'_>) -> Response {
    let threshold = ctx.low_stock_threshold;
    let low: Vec<&CatalogItem> = ctx
        .catalog
        .items()
        .iter()
        .filter(|item| item.quantity <= threshold)
        .collect();

    if low.is_empty() {
        return Response {
            text: "Great news! There are no low stock items.".to_string(),
            data: json!({ "threshold": threshold, "items": [], "total": 0 }),
        };
    }

    let mut text = String::from("Low Stock Alert:");
    for item in &low {
        text.push_str(&format!(
            "\n- {} ({} remaining, Location: {})",
            item.name,
            item.quantity,
            shelf(item)
        ));
        if item.is_below_minimum() {
            text.push_str(&format!(" [at or below minimum of {}]", item.minimum_stock_level));
        }
    }
    text.push_str(&format!("\n\nTotal low stock items: {}", low.len()));

    let items: Vec<Value> = low
        .iter()
        .map(|item| {
            let mut value = summary(item);
            value["minimum_stock_level"] = json!(item.minimum_stock_level);
            value["below_minimum"] = json!(item.is_below_minimum());
            value
        })
        .collect();

    Response {
        text,
        data: json!({ "threshold": threshold, "items": items, "total": low.len() }),
    }
}

pub fn price(ctx: &ResponseContext<'_>) -> Response {
    let matched = ctx.matched_items();
    if matched.is_empty() {
        return Response::text_only(
            "Could not identify specific items. Please provide a clear item name.",
        );
    }

    let lines: Vec<String> = matched
        .iter()
        .map(|item| {
            format!(
                "{} is priced at ${}. Category: {}, Current Stock: {}",
                item.name, item.price, item.category, item.quantity
            )
        })
        .collect();

    Response {
        text: lines.join("\n"),
        data: json!({ "items": matched.iter().map(|i| summary(i)).collect::<Vec<_>>() }),
    }
}

/// Terminal fallback. Never depends on the catalog.
pub fn unknown(ctx: &ResponseContext<'_>) -> Response {
    let mut text = format!("I'm sorry, I couldn't fully understand: \"{}\"", ctx.query.trim());
    text.push_str("\n\nTry these example queries:");
    for example in EXAMPLE_QUERIES {
        text.push_str("\n- ");
        text.push_str(example);
    }
    text.push_str("\n\nSuggested actions: ");
    text.push_str(&SUGGESTED_ACTIONS.join(", "));

    Response {
        text,
        data: json!({
            "examples": EXAMPLE_QUERIES,
            "suggested_actions": SUGGESTED_ACTIONS,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::EntityExtractor;

    fn item(name: &str, category: &str, quantity: u32, location: &str) -> CatalogItem {
        CatalogItem::new(name, category, quantity, Decimal::new(49999, 2)).with_location(location)
    }

    fn catalog() -> CatalogSnapshot {
        CatalogSnapshot::new(vec![
            item("Fender Stratocaster", "Electric Guitars", 15, "Shelf A1")
                .with_minimum_stock_level(3),
            item("Gibson Les Paul", "Electric Guitars", 4, "Shelf A2"),
            item("Yamaha Keyboard", "Keyboards", 9, "Shelf B1"),
            item("Boss DS-1", "Effects Pedals", 3, "Shelf C1"),
            item("Boss DS-1", "Effects Pedals", 5, "Backroom"),
        ])
        .unwrap()
    }

    fn answer(intent: Intent, query: &str, catalog: &CatalogSnapshot) -> Response {
        let matches = EntityExtractor::default().extract(query, catalog);
        respond(
            intent,
            &ResponseContext {
                query,
                matches: &matches,
                catalog,
                low_stock_threshold: 10,
            },
        )
    }

    #[test]
    fn location_reports_shelf_and_context() {
        let catalog = catalog();
        let response = answer(Intent::Location, "where is the fender stratocaster", &catalog);
        assert_eq!(
            response.text,
            "Fender Stratocaster is located in Shelf A1. Additional details: Electric Guitars, Quantity: 15"
        );
        assert_eq!(response.data["items"][0]["location"], "Shelf A1");
    }

    #[test]
    fn quantity_aggregates_items_sharing_a_name() {
        let catalog = catalog();
        let response = answer(Intent::Quantity, "how many boss ds-1", &catalog);
        assert_eq!(
            response.text,
            "We currently have 8 Boss DS-1 in stock across 2 locations (Shelf C1: 3, Backroom: 5)."
        );
        assert_eq!(response.data["items"][0]["total"], 8);
    }

    #[test]
    fn price_uses_dollar_prefix() {
        let catalog = catalog();
        let response = answer(Intent::Price, "price of yamaha keyboard", &catalog);
        assert_eq!(
            response.text,
            "Yamaha Keyboard is priced at $499.99. Category: Keyboards, Current Stock: 9"
        );
        assert_eq!(response.data["items"][0]["price"], "499.99");
    }

    #[test]
    fn empty_matches_ask_for_clarification() {
        let catalog = catalog();
        let cases = [
            (Intent::Search, "No items found. Try a different search term."),
            (Intent::Quantity, "Could not identify specific items. Please be more specific."),
            (
                Intent::Location,
                "Could not determine item location. Please provide a more specific item name.",
            ),
            (
                Intent::Price,
                "Could not identify specific items. Please provide a clear item name.",
            ),
        ];
        for (intent, expected) in cases {
            let response = answer(intent, "qwzx", &catalog);
            assert_eq!(response.text, expected, "intent: {intent}");
            assert_eq!(response.data, Value::Null);
        }
    }

    #[test]
    fn search_applies_price_bounds() {
        let catalog = CatalogSnapshot::new(vec![
            CatalogItem::new("Fender Stratocaster", "Electric Guitars", 15, Decimal::new(199999, 2)),
            CatalogItem::new("Squier Stratocaster", "Electric Guitars", 20, Decimal::new(29999, 2)),
            CatalogItem::new("Yamaha Keyboard", "Keyboards", 9, Decimal::new(49999, 2)),
        ])
        .unwrap();

        let response = answer(Intent::Search, "find stratocaster under 500", &catalog);
        assert_eq!(
            response.text,
            "Found: Squier Stratocaster (Electric Guitars) - Quantity: 20, Location: Unassigned"
        );

        let response = answer(Intent::Search, "show me items over 400", &catalog);
        let names: Vec<&str> = response.data["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Fender Stratocaster", "Yamaha Keyboard"]);
    }

    #[test]
    fn fuzzy_search_is_labelled_possible_matches() {
        let catalog = catalog();
        let response = answer(Intent::Search, "find keybord", &catalog);
        assert!(response.text.starts_with("Possible matches:\n"));
        assert_eq!(response.data["fuzzy"], true);
    }

    #[test]
    fn list_category_with_entity_lists_members() {
        let catalog = catalog();
        let response = answer(Intent::ListCategory, "list electric guitars", &catalog);
        assert_eq!(
            response.text,
            "Items in Electric Guitars category:\n\
             - Fender Stratocaster (Quantity: 15, Location: Shelf A1)\n\
             - Gibson Les Paul (Quantity: 4, Location: Shelf A2)"
        );
    }

    #[test]
    fn list_category_without_entity_lists_categories() {
        let catalog = catalog();
        let response = answer(Intent::ListCategory, "list categories", &catalog);
        assert_eq!(
            response.text,
            "Available categories: Electric Guitars, Keyboards, Effects Pedals"
        );
    }

    #[test]
    fn low_stock_scans_catalog_and_flags_minimums() {
        let catalog = catalog();
        let response = answer(Intent::LowStock, "what are our low stock items", &catalog);
        assert_eq!(
            response.text,
            "Low Stock Alert:\n\
             - Gibson Les Paul (4 remaining, Location: Shelf A2) [at or below minimum of 5]\n\
             - Yamaha Keyboard (9 remaining, Location: Shelf B1)\n\
             - Boss DS-1 (3 remaining, Location: Shelf C1) [at or below minimum of 5]\n\
             - Boss DS-1 (5 remaining, Location: Backroom) [at or below minimum of 5]\n\n\
             Total low stock items: 4"
        );
        assert_eq!(response.data["total"], 4);
        assert_eq!(response.data["items"][1]["below_minimum"], false);
    }

    #[test]
    fn unknown_lists_examples_and_actions() {
        let catalog = catalog();
        let response = answer(Intent::Unknown, "asdlkjasdlkj", &catalog);
        assert!(response.text.starts_with("I'm sorry, I couldn't fully understand: \"asdlkjasdlkj\""));
        for example in EXAMPLE_QUERIES {
            assert!(response.text.contains(example));
        }
        assert!(response.text.contains("Check low stock items"));
    }

    #[test]
    fn empty_catalog_never_fails() {
        let catalog = CatalogSnapshot::empty();
        for intent in Intent::PRECEDENCE {
            let response = answer(intent, "where is the fender stratocaster", &catalog);
            if intent == Intent::Unknown {
                assert!(response.text.contains("couldn't fully understand"));
            } else {
                assert_eq!(response.text, EMPTY_CATALOG);
            }
        }
    }
}
