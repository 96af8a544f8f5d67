/// Performance benchmarks for codec and string operations.
/// Run with: cargo test --release bench_ -- --nocapture

use crate::core::{decode, widen};
use crate::text::{length, reverse, substring};
use std::time::Instant;

pub struct BenchResult {
    pub name: &'static str,
    pub iterations: usize,
    pub total_ms: f64,
    pub per_iter_us: f64,
    pub throughput_mb_s: Option<f64>,
}

impl std::fmt::Display for BenchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:.1}µs/iter ({} iters, {:.1}ms total",
               self.name, self.per_iter_us, self.iterations, self.total_ms)?;
        if let Some(tp) = self.throughput_mb_s {
            write!(f, ", {:.1} MB/s", tp)?;
        }
        write!(f, ")")
    }
}

/// Mixed-width text: ASCII, Latin-1, CJK, emoji.
fn sample_text() -> Vec<u8> {
    "Hello, World! héllo wörld 日本語のテキスト 😀🎉 ".repeat(2_000).into_bytes()
}

fn measure(name: &'static str, iterations: usize, bytes: usize, mut f: impl FnMut()) -> BenchResult {
    let start = Instant::now();
    for _ in 0..iterations {
        f();
    }
    let elapsed = start.elapsed();
    BenchResult {
        name,
        iterations,
        total_ms: elapsed.as_secs_f64() * 1000.0,
        per_iter_us: elapsed.as_secs_f64() * 1_000_000.0 / iterations as f64,
        throughput_mb_s: if bytes > 0 {
            Some((bytes * iterations) as f64 / elapsed.as_secs_f64() / 1_048_576.0)
        } else {
            None
        },
    }
}

/// Benchmark raw decode throughput.
pub fn bench_decode_throughput() -> BenchResult {
    let data = sample_text();
    let iterations = if cfg!(debug_assertions) { 5 } else { 100 };
    measure("decode_throughput", iterations, data.len(), || {
        let mut offset = 0;
        let mut sum = 0u64;
        while let Some((cp, n)) = decode(&data, offset) {
            sum = sum.wrapping_add(cp as u64);
            offset += n;
        }
        std::hint::black_box(sum);
    })
}

/// Benchmark codepoint length.
pub fn bench_length() -> BenchResult {
    let data = sample_text();
    let iterations = if cfg!(debug_assertions) { 5 } else { 100 };
    measure("length", iterations, data.len(), || {
        std::hint::black_box(length(&data));
    })
}

/// Benchmark substring with negative bounds (two scans).
pub fn bench_substring() -> BenchResult {
    let data = sample_text();
    let iterations = if cfg!(debug_assertions) { 5 } else { 100 };
    measure("substring", iterations, data.len(), || {
        std::hint::black_box(substring(&data, -500, -10));
    })
}

/// Benchmark reverse.
pub fn bench_reverse() -> BenchResult {
    let data = sample_text();
    let iterations = if cfg!(debug_assertions) { 5 } else { 100 };
    measure("reverse", iterations, data.len(), || {
        std::hint::black_box(reverse(&data));
    })
}

/// Benchmark UTF-16 conversion.
pub fn bench_widen() -> BenchResult {
    let data = sample_text();
    let iterations = if cfg!(debug_assertions) { 5 } else { 100 };
    measure("widen", iterations, data.len(), || {
        std::hint::black_box(widen(&data));
    })
}

/// Benchmark many short strings, where per-call overhead dominates.
pub fn bench_short_strings() -> BenchResult {
    let words = ["a", "é", "中", "😀", "héllo", "日本"];
    let iterations = 100_000;
    measure("short_strings", iterations, 0, || {
        for w in &words {
            std::hint::black_box(reverse(w.as_bytes()));
        }
    })
}

/// Run all benchmarks and return results.
pub fn run_all() -> Vec<BenchResult> {
    vec![
        bench_decode_throughput(),
        bench_length(),
        bench_substring(),
        bench_reverse(),
        bench_widen(),
        bench_short_strings(),
    ]
}
