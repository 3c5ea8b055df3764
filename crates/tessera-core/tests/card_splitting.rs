//! End-to-end order processing: monetary folds plus card splitting, the
//! way the surrounding service uses them together.

use tessera_core::{
    split_order_lines, MonetaryDataService, OrderLine, CURRENCY_DISPLAY_DIGITS,
    QUANTITY_DISPLAY_DIGITS,
};

fn order_line(product_id: &str, price: &str, quantity: &str) -> OrderLine {
    OrderLine {
        product_id: product_id.to_string(),
        order_id: "order-77".to_string(),
        name: format!("product {product_id}"),
        price: price.to_string(),
        quantity: quantity.to_string(),
    }
}

#[test]
fn splitting_a_weighed_line_conserves_money() {
    let money = MonetaryDataService::new();
    let lines = [order_line("rice", "1.65", "2.300")];
    let cards = split_order_lines(&money, &lines).unwrap();

    assert_eq!(cards.len(), 3);

    let card_prices: Vec<&str> = cards.iter().map(|c| c.price.as_str()).collect();
    let split_total = money.add(&card_prices).unwrap();
    let line_total = money.multiply(&["1.65", "2.300"]).unwrap();
    assert_eq!(split_total, line_total);
    assert_eq!(
        money
            .to_fixed_digits(&split_total, CURRENCY_DISPLAY_DIGITS)
            .unwrap(),
        "3.80"
    );
}

#[test]
fn multi_line_order_total_matches_per_card_total() {
    let money = MonetaryDataService::new();
    let lines = [
        order_line("rice", "1.65", "2.300"),
        order_line("oil", "12.49", "1"),
        order_line("spice", "0.80", "0.125"),
    ];
    let cards = split_order_lines(&money, &lines).unwrap();
    assert_eq!(cards.len(), 3 + 1 + 1);

    let card_prices: Vec<&str> = cards.iter().map(|c| c.price.as_str()).collect();
    let from_cards = money.add(&card_prices).unwrap();

    let line_totals: Vec<String> = lines
        .iter()
        .map(|l| money.multiply(&[l.price.as_str(), l.quantity.as_str()]).unwrap())
        .collect();
    let line_total_refs: Vec<&str> = line_totals.iter().map(String::as_str).collect();
    let from_lines = money.add(&line_total_refs).unwrap();

    assert_eq!(from_cards, from_lines);
}

#[test]
fn display_digits_are_applied_only_at_the_boundary() {
    let money = MonetaryDataService::new();
    let lines = [order_line("rice", "1.65", "2.300")];
    let cards = split_order_lines(&money, &lines).unwrap();

    // Internal card values carry working precision, not display digits.
    assert!(cards[0].quantity.len() > QUANTITY_DISPLAY_DIGITS as usize + 2);

    // The boundary rendering is where 2/3 digits appear.
    assert_eq!(
        money
            .to_fixed_digits(&cards[2].quantity, QUANTITY_DISPLAY_DIGITS)
            .unwrap(),
        "0.300"
    );
    assert_eq!(
        money
            .to_fixed_digits(&cards[2].price, CURRENCY_DISPLAY_DIGITS)
            .unwrap(),
        "0.50"
    );
}

#[test]
fn cards_are_emitted_in_product_order() {
    let money = MonetaryDataService::new();
    let lines = [
        order_line("first", "1.00", "1.500"),
        order_line("second", "1.00", "2"),
    ];
    let cards = split_order_lines(&money, &lines).unwrap();
    let products: Vec<&str> = cards.iter().map(|c| c.product_id.as_str()).collect();
    assert_eq!(products, ["first", "first", "second", "second"]);
}

#[test]
fn repeated_small_additions_do_not_drift() {
    let money = MonetaryDataService::new();
    let values = vec!["0.01"; 100];
    let total = money.add(&values).unwrap();
    assert_eq!(
        money.to_fixed_digits(&total, CURRENCY_DISPLAY_DIGITS).unwrap(),
        "1.00"
    );
}
