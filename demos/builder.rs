//! Configuring a TaskRunner before starting it, and waiting for completion

use crossbeam_channel::unbounded;
use std::time::Duration;
use taskguard::prelude::*;

#[derive(Debug)]
enum Report {
    Value(u64),
    Failed(String),
}

fn main() -> taskguard::Result<()> {
    println!("=== TaskRunner Builder Example ===\n");

    let config = Config::builder()
        .thread_name_prefix("demo")
        .stack_size(256 * 1024)
        .build()?;

    let (tx, rx) = unbounded();
    let inputs = ["12", "7", "not a number", "boom"];

    for input in inputs {
        let ok_tx = tx.clone();
        let err_tx = tx.clone();

        TaskRunner::new(move || -> Outcome<u64> {
            if input == "boom" {
                panic!("refusing to parse {:?}", input);
            }
            let n: u64 = input.parse()?;
            Ok(Some(n * n))
        })
        .with_config(config.clone())
        .with_result_handler(move |v| {
            let _ = ok_tx.send(Report::Value(v));
        })
        .with_error_handler(move |err| {
            let text = match err.panic_report() {
                Some(report) => format!("panic: {}", report.message()),
                None => err.to_string(),
            };
            let _ = err_tx.send(Report::Failed(text));
        })
        .start();
    }
    drop(tx);

    // each task sends exactly one report
    for _ in 0..inputs.len() {
        match rx.recv_timeout(Duration::from_secs(5)) {
            Ok(report) => println!("{:?}", report),
            Err(e) => println!("gave up waiting: {}", e),
        }
    }

    Ok(())
}
