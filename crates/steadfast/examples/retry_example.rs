//! Example: Wrapping a flaky operation with each retry strategy
//!
//! This example demonstrates:
//! 1. Simple retry without delays
//! 2. Fixed delay between attempts, configured from TOML
//! 3. Variable delays drawn from a lazy sequence
//! 4. A custom strategy plugged into the same attempt loop
//!
//! Run with:
//! ```bash
//! cargo run -p steadfast --example retry_example
//! ```

use std::cell::Cell;
use std::error::Error;
use std::time::{Duration, Instant};
use steadfast::options::{MAX_RETRIES, OptionValue};
use steadfast::prelude::*;

/// A simulated service that fails the first few times
struct UnreliableService {
    attempts: Cell<u32>,
    fail_count: u32,
}

impl UnreliableService {
    fn new(fail_count: u32) -> Self {
        Self {
            attempts: Cell::new(0),
            fail_count,
        }
    }

    fn call(&self) -> Result<String, std::io::Error> {
        let attempt = self.attempts.get() + 1;
        self.attempts.set(attempt);

        if attempt <= self.fail_count {
            println!("  Attempt {}: FAILED (simulating transient error)", attempt);
            Err(std::io::Error::other(format!(
                "Transient error on attempt {}",
                attempt
            )))
        } else {
            println!("  Attempt {}: SUCCESS", attempt);
            Ok("service response".to_string())
        }
    }

    fn total_attempts(&self) -> u32 {
        self.attempts.get()
    }
}

/// Example 1: Simple retry, no delay
fn example_simple_retry() -> Result<(), Box<dyn Error>> {
    println!("\n=== Example 1: Simple Retry ===\n");

    let retrier = SimpleRetry::new().configure(RetryOptions::new().max_retries(5))?;
    let service = UnreliableService::new(2);

    let result = retrier.execute(|| service.call())?;

    println!("\nResult: {}", result);
    println!("Total attempts: {}", service.total_attempts());

    Ok(())
}

/// Example 2: Fixed delay loaded from a TOML document
fn example_fixed_delay() -> Result<(), Box<dyn Error>> {
    println!("\n=== Example 2: Fixed Delay (from TOML) ===\n");

    let options = RetryOptions::from_toml(
        r#"
        max_retries = 3
        delay_seconds = 1
        "#,
    )?;
    let retrier = FixedDelayRetry::new().configure(options)?;
    let service = UnreliableService::new(2);

    let start = Instant::now();
    let mut wrapped = retrier.wrap(|| service.call());
    let result = wrapped.call()?;

    println!("\nResult: {}", result);
    println!("Total time: {:?}", start.elapsed());
    println!("Expected delays: 1s + 1s = ~2s");

    Ok(())
}

/// Example 3: Variable delay from a lazy sequence
fn example_variable_delay() -> Result<(), Box<dyn Error>> {
    println!("\n=== Example 3: Variable Delay ===\n");

    let retrier = VariableDelayRetry::new().configure(
        RetryOptions::new()
            .max_retries(4)
            .delay_sequence(DelaySequence::exponential(
                Duration::from_millis(100),
                2.0,
                Duration::from_secs(1),
            )),
    )?;
    let service = UnreliableService::new(3);

    let start = Instant::now();
    let result = retrier.execute(|| service.call())?;

    println!("\nResult: {}", result);
    println!("Total time: {:?}", start.elapsed());
    println!("Expected delays: 100ms + 200ms + 400ms = ~700ms");

    // Lists are data, not lazy sequences, and are rejected up front.
    let rejected = VariableDelayRetry::new().configure(
        RetryOptions::new()
            .max_retries(4)
            .set("delay_sequence", vec![1, 2, 3]),
    );
    if let Err(err) = rejected {
        println!("Rejected list of delays: {}", err);
    }

    Ok(())
}

/// Example 4: A custom strategy sharing the attempt loop
fn example_custom_strategy() -> Result<(), Box<dyn Error>> {
    println!("\n=== Example 4: Custom Strategy ===\n");

    /// Announces every failure instead of sleeping.
    struct AnnouncingRetry {
        span: tracing::Span,
    }

    #[derive(Debug, Clone)]
    struct AnnouncingPolicy {
        max_retries: u32,
        label: String,
    }

    impl RetryStrategy for AnnouncingRetry {
        type Policy = AnnouncingPolicy;

        fn name(&self) -> &'static str {
            "announcing"
        }

        fn span(&self) -> &tracing::Span {
            &self.span
        }

        fn validate(&self, options: &RetryOptions) -> steadfast::Result<AnnouncingPolicy> {
            let label = match options.get("label").and_then(OptionValue::as_value) {
                Some(value) => steadfast::guards::assert_type::<String>("label", Some(value))?,
                None => "operation".to_string(),
            };
            let max_retries = steadfast::retry::validate_max_retries(options)?;
            Ok(AnnouncingPolicy { max_retries, label })
        }
    }

    impl RetryPolicy for AnnouncingPolicy {
        type State = ();

        fn max_retries(&self) -> u32 {
            self.max_retries
        }

        fn start(&self) {}

        fn on_retry(&self, _state: &mut (), attempt: u32) {
            println!(
                "  {} failed (attempt {}/{})",
                self.label, attempt, self.max_retries
            );
        }
    }

    let strategy = AnnouncingRetry {
        span: tracing::Span::none(),
    };
    let retrier = strategy.configure(
        RetryOptions::new()
            .set(MAX_RETRIES, 3)
            .set("label", "inventory lookup"),
    )?;

    let service = UnreliableService::new(5);
    match retrier.execute(|| service.call()) {
        Ok(result) => println!("Unexpected success: {}", result),
        Err(err) => println!("\nGave up with the original error: {}", err),
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("==============================================");
    println!("   Steadfast: Retry Strategy Examples");
    println!("==============================================");

    example_simple_retry()?;
    example_fixed_delay()?;
    example_variable_delay()?;
    example_custom_strategy()?;

    println!("\n==============================================");
    println!("   All examples completed successfully!");
    println!("==============================================\n");

    Ok(())
}
