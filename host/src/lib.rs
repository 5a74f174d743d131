use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{anyhow, Context, Result};

pub mod bots;
pub mod cancel;
pub mod client;
pub mod controller;
pub mod sink;

pub use cancel::CancelToken;
pub use client::{LeaderboardClient, RankedScore, SubmitResult};
pub use controller::{ControllerOptions, SessionController, SessionHandle, SessionOutcome};
pub use sink::{FinalScore, LogSink, MemorySink, ScoreSink, SubmitFuture};

pub fn parse_seed(seed: &str) -> Result<u32> {
    let s = seed.trim();
    if s.is_empty() {
        return Err(anyhow!("empty seed"));
    }
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).with_context(|| format!("invalid hex seed: {s}"))
    } else {
        s.parse::<u32>()
            .with_context(|| format!("invalid decimal seed: {s}"))
    }
}

pub fn seed_to_hex(seed: u32) -> String {
    format!("0x{seed:08x}")
}

/// Seed for sessions that do not need to be reproducible.
pub fn seed_from_clock() -> u32 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|duration| duration.as_nanos())
        .unwrap_or(0);
    (nanos as u32) ^ ((nanos >> 32) as u32)
}
