//! Walkthrough of the fluent assertion API.
//!
//! Run with `cargo run --example api-demo`.

use attest::{capture, that, that_any, Attest, Failure};

fn main() {
    // Example 1: chains that pass hand the value back unchanged
    println!("=== Passing chains ===");
    let roles = that(vec!["admin", "editor"])
        .is_not_empty()
        .contains("admin")
        .has_count(2)
        .into_value();
    println!("roles survived the chain: {:?}", roles);

    42.should().is_in_range(1, 100).is_not_equal_to(13);
    println!("42 is in range and is not 13");

    // Example 2: a violation raises a structured failure
    println!("\n=== Inspecting a failure ===");
    let failure = capture(|| that(5).with_context("retries").is_equal_to(3)).unwrap_err();
    if let Failure::Assertion(error) = &failure {
        println!("message:  {}", error.message);
        println!("expected: {:?}", error.expected);
        println!("actual:   {:?}", error.actual);
    }

    // Example 3: the chain stops at the first violation
    println!("\n=== Short-circuiting ===");
    let failure = capture(|| {
        that("Test")
            .is_not_null()
            .is_equal_to("Different")
            .is_of_type::<&str>();
    })
    .unwrap_err();
    println!("first violation wins: {}", failure);

    // Example 4: misuse is a different kind of signal
    println!("\n=== Misuse vs. violation ===");
    let misuse = capture(|| that(5).satisfies_opt(None::<fn(&i32) -> bool>)).unwrap_err();
    match misuse {
        Failure::InvalidArgument(error) => println!("caller bug: {}", error),
        other => println!("unexpected: {}", other),
    }

    // Example 5: dynamic subjects probe capabilities at runtime
    println!("\n=== Dynamic subjects ===");
    that_any(5i32).is_of_type::<i32>().is_in_range(1, 10);
    println!("boxed i32 passed type and range probes");

    let failure = capture(|| that_any(42).contains(42)).unwrap_err();
    println!("wrapped integer is no collection: {}", failure);
}
