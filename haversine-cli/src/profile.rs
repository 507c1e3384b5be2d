//! Wall-clock timing of the benchmark stages.
//!
//! Each named block accumulates elapsed time and hit count; blocks that move
//! data also record bytes so the report can show throughput.
//!
//! Blocks are flat. The timed closure runs while the profiler is mutably
//! borrowed, so a block cannot open another one and no time is counted twice.

use std::fmt;
use std::time::{Duration, Instant};

const MEGABYTE: f64 = 1024.0 * 1024.0;
const GIGABYTE: f64 = MEGABYTE * 1024.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub label: &'static str,
    pub hits: u64,
    pub elapsed: Duration,
    pub bytes: u64,
}

impl Block {
    /// Bytes per second, if the block moved any data.
    pub fn throughput(&self) -> Option<f64> {
        let secs = self.elapsed.as_secs_f64();
        (self.bytes > 0 && secs > 0.0).then(|| self.bytes as f64 / secs)
    }
}

/// Collects timed blocks from the moment it is created.
#[derive(Debug)]
pub struct Profiler {
    start: Instant,
    blocks: Vec<Block>,
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

impl Profiler {
    pub fn new() -> Self {
        Profiler {
            start: Instant::now(),
            blocks: Vec::new(),
        }
    }

    /// Time `f` under `label`.
    pub fn time<T>(&mut self, label: &'static str, f: impl FnOnce() -> T) -> T {
        self.time_bandwidth(label, 0, f)
    }

    /// Time `f` under `label`, crediting it with `bytes` processed.
    pub fn time_bandwidth<T>(&mut self, label: &'static str, bytes: u64, f: impl FnOnce() -> T) -> T {
        let began = Instant::now();
        let out = f();
        self.record(label, began.elapsed(), bytes);
        out
    }

    fn record(&mut self, label: &'static str, elapsed: Duration, bytes: u64) {
        tracing::trace!(label, ?elapsed, bytes, "profile block");
        match self.blocks.iter_mut().find(|b| b.label == label) {
            Some(block) => {
                block.hits += 1;
                block.elapsed += elapsed;
                block.bytes += bytes;
            }
            None => self.blocks.push(Block {
                label,
                hits: 1,
                elapsed,
                bytes,
            }),
        }
    }

    pub fn finish(self) -> Profile {
        Profile {
            total: self.start.elapsed(),
            blocks: self.blocks,
        }
    }
}

/// Finished timings, in first-seen block order.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub total: Duration,
    pub blocks: Vec<Block>,
}

impl Profile {
    pub fn percent(&self, block: &Block) -> f64 {
        let total = self.total.as_secs_f64();
        if total > 0.0 {
            100.0 * block.elapsed.as_secs_f64() / total
        } else {
            0.0
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total time: {:.4}ms", self.total.as_secs_f64() * 1000.0)?;
        for block in &self.blocks {
            write!(
                f,
                "  {}[{}]: {:.4}ms ({:.2}%)",
                block.label,
                block.hits,
                block.elapsed.as_secs_f64() * 1000.0,
                self.percent(block)
            )?;
            if let Some(rate) = block.throughput() {
                write!(
                    f,
                    "  {:.3}mb at {:.2}gb/s",
                    block.bytes as f64 / MEGABYTE,
                    rate / GIGABYTE
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn block(label: &'static str, millis: u64, bytes: u64) -> Block {
        Block {
            label,
            hits: 1,
            elapsed: Duration::from_millis(millis),
            bytes,
        }
    }

    #[test]
    fn test_repeated_labels_accumulate() {
        let mut profiler = Profiler::new();
        let a = profiler.time("work", || 1);
        let b = profiler.time_bandwidth("work", 64, || 2);
        profiler.time("other", || ());
        let profile = profiler.finish();

        assert_eq!(a + b, 3);
        assert_eq!(profile.blocks.len(), 2);
        assert_eq!(profile.blocks[0].label, "work");
        assert_eq!(profile.blocks[0].hits, 2);
        assert_eq!(profile.blocks[0].bytes, 64);
        assert_eq!(profile.blocks[1].label, "other");
        assert!(profile.total >= profile.blocks[0].elapsed);
    }

    #[test]
    fn test_report_format() {
        let profile = Profile {
            total: Duration::from_millis(200),
            blocks: vec![block("parse", 50, 0), block("read", 100, 1024 * 1024 * 1024)],
        };
        let expected = "Total time: 200.0000ms\n  \
                        parse[1]: 50.0000ms (25.00%)\n  \
                        read[1]: 100.0000ms (50.00%)  1024.000mb at 10.00gb/s\n";
        assert_eq!(profile.to_string(), expected);
    }

    #[test]
    fn test_empty_total() {
        let profile = Profile {
            total: Duration::ZERO,
            blocks: vec![block("noop", 0, 10)],
        };
        assert_eq!(profile.percent(&profile.blocks[0]), 0.0);
        assert_eq!(profile.blocks[0].throughput(), None);
    }
}
