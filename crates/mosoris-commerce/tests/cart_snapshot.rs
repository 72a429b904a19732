//! End-to-end checks over a cart snapshot shaped like the backend's reply.

use mosoris_commerce::prelude::*;
use serde_json::json;

fn money(amount: &str) -> serde_json::Value {
    json!({"amount": amount, "currencyCode": "HUF"})
}

fn snapshot() -> serde_json::Value {
    json!({
        "id": "gid://shopify/Cart/c1",
        "checkoutUrl": "https://shop.example/cart/c/c1",
        "totalQuantity": 6,
        "isOptimistic": false,
        "cost": {
            "subtotalAmount": money("31470.00"),
            "totalAmount": money("31470.00")
        },
        "discountCodes": [
            {"code": "MUVESZ10", "applicable": true},
            {"code": "TAVALY", "applicable": false}
        ],
        "appliedGiftCards": [],
        "lines": {
            "nodes": [
                {
                    "id": "gid://shopify/CartLine/tee",
                    "quantity": 2,
                    "merchandise": {
                        "id": "gid://shopify/ProductVariant/tee-m-black",
                        "title": "M / Fekete",
                        "selectedOptions": [
                            {"name": "M\u{e9}ret", "value": "M"},
                            {"name": "Color", "value": "Fekete"}
                        ],
                        "product": {
                            "handle": "forma-polo",
                            "title": "Forma p\u{f3}l\u{f3}",
                            "vendor": "Kov\u{e1}cs Anna",
                            "variants": {
                                "nodes": [
                                    {
                                        "id": "gid://shopify/ProductVariant/tee-s-black",
                                        "availableForSale": true,
                                        "selectedOptions": [
                                            {"name": "M\u{e9}ret", "value": "S"},
                                            {"name": "Color", "value": "Fekete"}
                                        ]
                                    },
                                    {
                                        "id": "gid://shopify/ProductVariant/tee-m-black",
                                        "availableForSale": true,
                                        "selectedOptions": [
                                            {"name": "M\u{e9}ret", "value": "M"},
                                            {"name": "Color", "value": "Fekete"}
                                        ]
                                    },
                                    {
                                        "id": "gid://shopify/ProductVariant/tee-l-white",
                                        "availableForSale": true,
                                        "selectedOptions": [
                                            {"name": "M\u{e9}ret", "value": "L"},
                                            {"name": "Color", "value": "Feh\u{e9}r"}
                                        ]
                                    },
                                    {
                                        "id": "gid://shopify/ProductVariant/tee-xl-black",
                                        "availableForSale": false,
                                        "selectedOptions": [
                                            {"name": "M\u{e9}ret", "value": "XL"},
                                            {"name": "Color", "value": "Fekete"}
                                        ]
                                    }
                                ]
                            }
                        }
                    },
                    "cost": {"totalAmount": money("15980.00")},
                    "discountAllocations": [
                        {"discountedAmount": money("1776.00")},
                        {"discountedAmount": money("0.10")}
                    ]
                },
                {
                    "id": "gid://shopify/CartLine/box",
                    "quantity": 1,
                    "merchandise": {
                        "id": "gid://shopify/ProductVariant/gift-box",
                        "product": {"handle": "ajandekdoboz", "title": "Aj\u{e1}nd\u{e9}kdoboz"}
                    },
                    "cost": {"totalAmount": money("9990.00")},
                    "discountAllocations": [{"discountedAmount": money("1110.00")}],
                    "lineComponents": [
                        {
                            "id": "gid://shopify/CartLine/box-pin",
                            "quantity": 1,
                            "merchandise": {
                                "id": "gid://shopify/ProductVariant/pin",
                                "product": {"handle": "kituzo"}
                            }
                        },
                        {
                            "id": "gid://shopify/CartLine/box-print",
                            "quantity": 1,
                            "merchandise": {
                                "id": "gid://shopify/ProductVariant/print",
                                "product": {"handle": "nyomat"}
                            }
                        }
                    ]
                },
                {
                    "id": "gid://shopify/CartLine/tote",
                    "quantity": 1,
                    "merchandise": {
                        "id": "gid://shopify/ProductVariant/tote",
                        "product": {"handle": "vaszontaska"}
                    },
                    "cost": {"totalAmount": money("5500.00")}
                },
                {
                    "id": "gid://shopify/CartLine/tote-patch",
                    "quantity": 2,
                    "isOptimistic": true,
                    "merchandise": {
                        "id": "gid://shopify/ProductVariant/patch",
                        "product": {"handle": "felvarro"}
                    },
                    "parentRelationship": {"parent": {"id": "gid://shopify/CartLine/tote"}}
                }
            ]
        }
    })
}

fn cart() -> Cart {
    Cart::from_json(&snapshot().to_string()).expect("snapshot decodes")
}

fn id(s: &str) -> CartLineId {
    CartLineId::new(format!("gid://shopify/CartLine/{s}"))
}

#[test]
fn test_roots_exclude_referenced_children() {
    let cart = cart();
    let tree = cart.line_tree();
    let roots: Vec<&str> = tree.roots().iter().map(|l| l.id.as_str()).collect();
    assert_eq!(
        roots,
        vec![
            "gid://shopify/CartLine/tee",
            "gid://shopify/CartLine/box",
            "gid://shopify/CartLine/tote",
        ]
    );
}

#[test]
fn test_both_bundle_shapes_produce_children() {
    let cart = cart();
    let tree = cart.line_tree();

    let box_children: Vec<&str> = tree.children_of(&id("box")).iter().map(|l| l.id.as_str()).collect();
    assert_eq!(
        box_children,
        vec!["gid://shopify/CartLine/box-pin", "gid://shopify/CartLine/box-print"]
    );

    let tote_children = tree.children_of(&id("tote"));
    assert_eq!(tote_children.len(), 1);
    assert!(tote_children[0].is_optimistic);

    assert!(tree.orphaned_parent_ids().is_empty());
    assert_eq!(tree.walk().len(), 6);
}

#[test]
fn test_line_prices() {
    let cart = cart();
    let reconciler = PriceReconciler::default();

    let tee = cart.line(&id("tee")).unwrap().price(&reconciler);
    assert_eq!(tee.current().unwrap().amount_string(), "15980.00");
    assert_eq!(tee.original().unwrap().amount_string(), "17756.10");

    let tote = cart.line(&id("tote")).unwrap().price(&reconciler);
    assert!(!tote.has_comparison());

    let patch = cart.line(&id("tote-patch")).unwrap().price(&reconciler);
    assert_eq!(patch, PriceDisplay::Unavailable);
}

#[test]
fn test_subtotal_comparison() {
    let cart = cart();
    let subtotal = cart.subtotal_price(&PriceReconciler::default());

    // 1776.00 + 0.10 + 1110.00 added back onto 31470.00
    assert_eq!(subtotal.original().unwrap().amount_string(), "34356.10");

    let formatted = MoneyFormatter::default().format_price(&subtotal);
    assert_eq!(formatted.current.as_deref(), Some("31\u{a0}470\u{a0}Ft"));
    assert_eq!(formatted.original.as_deref(), Some("34\u{a0}356\u{a0}Ft"));
}

#[test]
fn test_cart_flags() {
    let cart = cart();
    assert!(cart.has_items());
    assert!(cart.has_pending_changes());
    assert_eq!(cart.applicable_discount_codes(), vec!["MUVESZ10"]);
}

#[test]
fn test_controls_follow_optimistic_state() {
    let cart = cart();
    let tee = QuantityControls::for_line(cart.line(&id("tee")).unwrap());
    assert!(tee.can_decrease);
    assert_eq!(tee.decrease().quantity, 1);

    let patch = QuantityControls::for_line(cart.line(&id("tote-patch")).unwrap());
    assert!(!patch.can_increase);
    assert!(!patch.can_remove);
}

#[test]
fn test_size_swap_from_snapshot() {
    let cart = cart();
    let tee = cart.line(&id("tee")).unwrap();
    let config = CatalogConfig::default();

    let choices = config.size_swap_choices(
        &tee.merchandise.id,
        &tee.merchandise.selected_options,
        &tee.merchandise.product.variants.nodes,
    );
    let sizes: Vec<(&str, bool, bool)> = choices
        .iter()
        .map(|c| (c.size.as_str(), c.available, c.selected))
        .collect();
    assert_eq!(
        sizes,
        vec![("S", true, false), ("M", true, true), ("XL", false, false)]
    );

    assert_eq!(
        tee.variant_url(),
        "/products/forma-polo?M%C3%A9ret=M&Color=Fekete"
    );
}

#[test]
fn test_snapshot_survives_reserialization() {
    let cart = cart();
    let again = Cart::from_json(&serde_json::to_string(&cart).unwrap()).unwrap();
    assert_eq!(again, cart);
}

#[test]
fn test_cart_in_unlisted_currency() {
    let nok = |amount: &str| json!({"amount": amount, "currencyCode": "NOK"});
    let snapshot = json!({
        "id": "gid://shopify/Cart/oslo",
        "totalQuantity": 1,
        "cost": {"subtotalAmount": nok("129.00"), "totalAmount": nok("129.00")},
        "lines": {"nodes": [{
            "id": "gid://shopify/CartLine/tee",
            "quantity": 1,
            "merchandise": {"id": "gid://shopify/ProductVariant/tee", "product": {"handle": "tee"}},
            "cost": {"totalAmount": nok("129.00")},
            "discountAllocations": [{"discountedAmount": nok("20.00")}]
        }]}
    });
    let cart = Cart::from_json(&snapshot.to_string()).unwrap();
    let reconciler = PriceReconciler::default();

    let line = cart.line(&id("tee")).unwrap().price(&reconciler);
    let original = line.original().unwrap();
    assert_eq!(original.amount_string(), "149.00");
    assert_eq!(original.currency_code.code(), "NOK");

    let subtotal = cart.subtotal_price(&reconciler);
    assert_eq!(subtotal.original().unwrap().amount_string(), "149.00");

    let formatted = MoneyFormatter::default().format_price(&subtotal);
    assert_eq!(formatted.current.as_deref(), Some("129,00\u{a0}NOK"));
    assert_eq!(formatted.original.as_deref(), Some("149,00\u{a0}NOK"));
}
