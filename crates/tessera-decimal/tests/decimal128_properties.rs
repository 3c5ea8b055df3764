//! End-to-end properties of the Decimal128 engine, exercised through the
//! public API only. These are the guarantees the monetary layer builds
//! on: exactness of text round trips, algebraic identities, signed-zero
//! semantics, envelope clamping, and deterministic truncation of
//! repeating expansions.

use tessera_decimal::{Decimal128, RoundingMode};

fn dec(s: &str) -> Decimal128 {
    s.parse().expect("valid literal")
}

#[test]
fn exact_representation_of_decimal_strings() {
    // Every valid literal within 34 digits reproduces its exact value.
    for s in ["0.1", "0.2", "1.50", "123456.789012", "-0.003", "99.99"] {
        assert_eq!(dec(s).to_fixed_exact(), s, "lost precision for {s}");
    }
}

#[test]
fn addition_has_no_binary_float_drift() {
    let sum = dec("0.1").add(&dec("0.2"));
    assert_eq!(sum.to_string(), "0.3");
    assert_eq!(sum, dec("0.3"));

    // The classic accumulation test: 0.1 added ten times is exactly 1.
    let tenth = dec("0.1");
    let mut total = dec("0");
    for _ in 0..10 {
        total = total.add(&tenth);
    }
    assert_eq!(total, dec("1"));
}

#[test]
fn addition_is_commutative() {
    let pairs = [("0.1", "0.2"), ("-5.5", "3.25"), ("1e10", "0.0001")];
    for (a, b) in pairs {
        let left = dec(a).add(&dec(b));
        let right = dec(b).add(&dec(a));
        assert_eq!(left, right, "{a} + {b}");
        assert_eq!(left.to_fixed_exact(), right.to_fixed_exact());
    }
}

#[test]
fn multiplication_is_commutative() {
    let pairs = [("1.20", "2"), ("-0.5", "0.5"), ("3.14", "100")];
    for (a, b) in pairs {
        assert_eq!(dec(a).multiply(&dec(b)), dec(b).multiply(&dec(a)));
    }
}

#[test]
fn additive_and_multiplicative_identities() {
    for s in ["1.5", "-2.75", "0.001", "12345"] {
        let v = dec(s);
        assert_eq!(v.add(&dec("0")), v);
        assert_eq!(v.multiply(&dec("1")), v);
    }
}

#[test]
fn negative_zero_semantics() {
    let neg_zero = dec("-0");
    assert!(neg_zero.is_negative());
    assert!(neg_zero.is_zero());
    // Equal to positive zero under comparison.
    assert_eq!(neg_zero, dec("0"));
    assert_eq!(
        neg_zero.partial_cmp(&dec("0")),
        Some(std::cmp::Ordering::Equal)
    );
    // But distinguishable in rendering.
    assert_eq!(neg_zero.to_string(), "-0");
}

#[test]
fn clamping_rounds_the_35th_digit_half_even() {
    // 1.000…0005 (33 zeros then 5): an exact tie whose kept prefix ends
    // in an even digit, so the 5 drops and the value collapses to 1.
    let tie_down = format!("1.{}5", "0".repeat(33));
    assert_eq!(dec(&tie_down), dec("1"));

    // 1.000…015 (32 zeros, then 15): kept prefix ends in the odd digit
    // 1, so the tie rounds up.
    let tie_up = format!("1.{}15", "0".repeat(32));
    let expected = format!("1.{}2", "0".repeat(32));
    assert_eq!(dec(&tie_up), dec(&expected));
}

#[test]
fn division_truncates_repeating_expansions_deterministically() {
    let third = dec("1").divide(&dec("3"));
    assert_eq!(third.to_fixed(5), "0.33333");
    assert_eq!(third.to_fixed_exact(), format!("0.{}", "3".repeat(34)));

    let seventh = dec("1").divide(&dec("7"));
    // 1/7 = 0.142857 142857 … truncated at 34 digits.
    assert_eq!(seventh.to_fixed(12), "0.142857142857");

    // Terminating divisions stop at the exact result.
    assert_eq!(dec("1").divide(&dec("8")).to_string(), "0.125");
}

#[test]
fn round_trip_through_to_string() {
    for s in [
        "0",
        "-0",
        "1.5",
        "-987.654",
        "1e-20",
        "4.503599627370496e15",
        "0.0000000001",
    ] {
        let v = dec(s);
        let back = dec(&v.to_string());
        assert_eq!(
            back.partial_cmp(&v),
            Some(std::cmp::Ordering::Equal),
            "round trip changed value of {s}"
        );
    }
}

#[test]
fn quantum_flows_through_arithmetic() {
    // Addition takes the finer operand quantum.
    assert_eq!(dec("1.50").add(&dec("1")).to_fixed_exact(), "2.50");
    // Multiplication sums quanta: 2 fractional digits + 0.
    assert_eq!(dec("1.20").multiply(&dec("2")).to_fixed_exact(), "2.40");
    // Rounding never manufactures digits the value does not carry.
    assert_eq!(dec("7").round(3, RoundingMode::HalfEven).to_fixed_exact(), "7");
}

#[test]
fn comparison_ignores_quantum() {
    assert_eq!(dec("1.5"), dec("1.50"));
    assert_eq!(dec("100"), dec("1e2"));
    assert!(dec("1.49") < dec("1.5"));
}
