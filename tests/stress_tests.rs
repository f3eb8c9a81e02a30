//! Stress tests for concurrent fan-out
//!
//! These tests verify:
//! - Every message reaches every output exactly once under batch dispatch
//! - Per-output copies never leak processor side effects
//! - Concurrent printing from many threads keeps lines intact
//! - Output mutation while printing is safe
//! - Large batches against slow sinks run on a bounded number of threads

use rust_logger_pipeline::core::{LogLevel, Logger, Message, Processor, Status};
use rust_logger_pipeline::processors::{prefixer, tagger};
use rust_logger_pipeline::sinks::{self, SharedBuffer};
use std::collections::HashSet;
use std::io::{self, Write};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

const OUTPUTS: usize = 5;
const MESSAGES: usize = 100;

fn fan_out_logger() -> (Logger, Vec<SharedBuffer>) {
    let logger = Logger::new("stress");
    let mut buffers = Vec::new();

    for i in 0..OUTPUTS {
        let buffer = SharedBuffer::new();
        let output = sinks::file_based(
            format!("Out{}", i),
            LogLevel::Trace,
            buffer.clone(),
            [prefixer(format!("{}:", i)), tagger([format!("out{}", i)])],
        );
        logger.add_outputs([output]).expect("Failed to add output");
        buffers.push(buffer);
    }

    (logger, buffers)
}

/// 100 messages across 5 outputs produce exactly 500 writes
#[test]
fn test_batch_fan_out_counts() {
    let (logger, buffers) = fan_out_logger();

    let messages: Vec<Message> = (0..MESSAGES)
        .map(|i| Message::new(LogLevel::Info, format!("message {}", i)))
        .collect();
    let report = logger.print_messages(messages);

    assert_eq!(report.attempted, MESSAGES * OUTPUTS);
    assert_eq!(report.written, MESSAGES * OUTPUTS);
    assert!(report.is_success());
    assert_eq!(logger.metrics().written_count(), (MESSAGES * OUTPUTS) as u64);

    for (i, buffer) in buffers.iter().enumerate() {
        let lines = buffer.lines();
        assert_eq!(lines.len(), MESSAGES, "Out{} missed writes", i);

        let prefix = format!("{}:", i);
        assert!(
            lines.iter().all(|line| line.starts_with(&prefix) && !line[prefix.len()..].contains(':')),
            "Out{} saw another output's processors",
            i
        );

        let unique: HashSet<&String> = lines.iter().collect();
        assert_eq!(unique.len(), MESSAGES, "Out{} received duplicates", i);
    }
}

/// Filtering still applies under load
#[test]
fn test_batch_fan_out_with_filtering() {
    let (logger, buffers) = fan_out_logger();
    logger.output("Out0").unwrap().set_max_level(LogLevel::Warn);
    logger.output("Out1").unwrap().set_status(Status::Disabled);

    let messages: Vec<Message> = (0..MESSAGES)
        .map(|i| {
            let level = if i % 2 == 0 { LogLevel::Error } else { LogLevel::Debug };
            Message::new(level, format!("message {}", i))
        })
        .collect();
    let report = logger.print_messages(messages);

    assert_eq!(buffers[0].lines().len(), MESSAGES / 2);
    assert!(buffers[1].is_empty());
    assert_eq!(report.filtered, MESSAGES / 2);
    assert_eq!(report.written, MESSAGES / 2 + MESSAGES * (OUTPUTS - 2));
}

/// Many threads printing concurrently never interleave lines
#[test]
fn test_concurrent_printing_from_threads() {
    let (logger, buffers) = fan_out_logger();
    let logger = Arc::new(logger);

    let handles: Vec<_> = (0..10)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..20 {
                    logger.info(format!("thread {} message {}", t, i));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    for buffer in &buffers {
        let lines = buffer.lines();
        assert_eq!(lines.len(), 200);
        assert!(lines.iter().all(|line| line.contains("thread ") && line.contains(" message ")));
    }
}

/// Adding and toggling outputs while other threads print is safe
#[test]
fn test_output_mutation_during_printing() {
    let (logger, _buffers) = fan_out_logger();
    let logger = Arc::new(logger);

    let printer = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            for i in 0..200 {
                logger.debug(format!("message {}", i));
            }
        })
    };

    let mutator = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            for i in 0..20 {
                let extra = sinks::file_based(
                    format!("Extra{}", i),
                    LogLevel::Trace,
                    SharedBuffer::new(),
                    Vec::<Processor>::new(),
                );
                logger.add_outputs([extra]).expect("Failed to add output");
                if let Some(output) = logger.output("Out2") {
                    let status = if i % 2 == 0 { Status::Disabled } else { Status::Enabled };
                    output.set_status(status);
                }
            }
        })
    };

    printer.join().expect("Printer panicked");
    mutator.join().expect("Mutator panicked");

    assert_eq!(logger.outputs().len(), OUTPUTS + 20);
    assert_eq!(logger.metrics().failed_count(), 0);
}

/// Sink that takes a little time per write
#[derive(Clone)]
struct SlowSink {
    delay: Duration,
    lines: Arc<AtomicUsize>,
}

impl Write for SlowSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        thread::sleep(self.delay);
        self.lines.fetch_add(1, Ordering::SeqCst);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Processor recording how many chains run at the same time
fn concurrency_tracker(active: Arc<AtomicUsize>, peak: Arc<AtomicUsize>) -> Processor {
    Processor::new("Concurrency", move |_: &mut Message| {
        let now = active.fetch_add(1, Ordering::SeqCst) + 1;
        peak.fetch_max(now, Ordering::SeqCst);
        thread::sleep(Duration::from_micros(50));
        active.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    })
}

/// Thousands of messages over slow outputs complete without exhausting threads
#[test]
fn test_large_batch_with_slow_sinks_is_bounded() {
    const BATCH: usize = 5_000;
    const SLOW_OUTPUTS: usize = 3;

    let active = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicUsize::new(0));
    let logger = Logger::new("bulk");
    let mut counters = Vec::new();

    for i in 0..SLOW_OUTPUTS {
        let lines = Arc::new(AtomicUsize::new(0));
        let sink = SlowSink {
            delay: Duration::from_micros(200),
            lines: Arc::clone(&lines),
        };
        let output = sinks::file_based(
            format!("Slow{}", i),
            LogLevel::Trace,
            sink,
            [concurrency_tracker(Arc::clone(&active), Arc::clone(&peak))],
        );
        logger.add_outputs([output]).expect("Failed to add output");
        counters.push(lines);
    }

    let messages: Vec<Message> = (0..BATCH)
        .map(|i| Message::new(LogLevel::Info, format!("bulk {}", i)))
        .collect();
    let report = logger.print_messages(messages);

    assert_eq!(report.written, BATCH * SLOW_OUTPUTS);
    assert!(report.is_success());
    for lines in &counters {
        assert_eq!(lines.load(Ordering::SeqCst), BATCH);
    }

    let width = thread::available_parallelism().map_or(1, |n| n.get());
    assert!(
        peak.load(Ordering::SeqCst) <= width,
        "{} chains ran at once with {} workers available",
        peak.load(Ordering::SeqCst),
        width
    );
}

/// A huge single-output batch still completes
#[test]
fn test_huge_single_output_batch() {
    const BATCH: usize = 30_000;

    let (buffer, output) = sinks::buffer(LogLevel::Trace, Vec::<Processor>::new());
    let logger = Logger::new("bulk");
    logger.add_outputs([output]).expect("Failed to add output");

    let messages: Vec<Message> = (0..BATCH)
        .map(|i| Message::new(LogLevel::Debug, format!("m{}", i)))
        .collect();
    let report = logger.print_messages(messages);

    assert_eq!(report.written, BATCH);
    assert_eq!(buffer.lines().len(), BATCH);
}
