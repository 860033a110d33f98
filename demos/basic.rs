//! Launching tasks with the free functions

use std::thread;
use std::time::Duration;
use taskguard::prelude::*;

fn main() {
    println!("=== Free Function Example ===\n");

    // Task 1: no result, no error
    run(|| -> Outcome {
        println!("Running task 1...");
        thread::sleep(Duration::from_millis(100));
        Ok(None)
    });

    // Task 2: returns an error, reported by the default handler on stderr
    run(|| -> Outcome {
        println!("Running task 2...");
        thread::sleep(Duration::from_millis(200));
        Err("task 2 failed".into())
    });

    // Task 3: panics, recovered and reported by the default handler
    run(|| -> Outcome {
        println!("Running task 3...");
        thread::sleep(Duration::from_millis(300));
        panic!("something went wrong in task 3");
    });

    let error_handler = |err: Error| match err.panic_report() {
        Some(report) => println!("Custom error handler received panic: {}", report.message()),
        None => println!("Custom error handler received: {}", err),
    };

    // Task 4: custom error handler
    run_with_error_handler(
        || -> Outcome {
            println!("Running task 4...");
            thread::sleep(Duration::from_millis(400));
            Err("task 4 failed".into())
        },
        error_handler,
    );

    // Task 5: custom error handler with a panic
    run_with_error_handler(
        || -> Outcome {
            println!("Running task 5...");
            thread::sleep(Duration::from_millis(500));
            panic!("something went wrong in task 5");
        },
        error_handler,
    );

    let result_handler = |result: String| println!("Result handler received: {}", result);

    // Task 6: successful result
    run_with_result_handler(
        || {
            println!("Running task 6...");
            thread::sleep(Duration::from_millis(600));
            Ok(Some("task 6 completed successfully".to_string()))
        },
        result_handler,
        error_handler,
    );

    // Task 7: error wins, result handler is not called
    run_with_result_handler(
        || {
            println!("Running task 7...");
            thread::sleep(Duration::from_millis(700));
            Err("task 7 failed".into())
        },
        result_handler,
        error_handler,
    );

    // Nothing waits for the tasks, so give them time to finish
    thread::sleep(Duration::from_secs(1));
    println!("\nAll tasks have been started. Some may still be running.");
}
