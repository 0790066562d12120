use rand::Rng;
use slotring::{RingBuffer, RingBufferError};
use std::env;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEFAULT_LAYOUT: &str = "16";
const DEFAULT_ROUNDS: usize = 1000;

#[derive(Default)]
struct Stats {
    written: usize,
    rejected: usize,
    evicted: usize,
    read: usize,
    empty_reads: usize,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn main() {
    init_tracing();

    let mut args = env::args().skip(1);
    let layout = args.next().unwrap_or_else(|| DEFAULT_LAYOUT.to_string());
    let rounds = args
        .next()
        .and_then(|r| r.parse::<usize>().ok())
        .unwrap_or(DEFAULT_ROUNDS);

    let mut buffer: RingBuffer<u64> = match layout.parse() {
        Ok(buffer) => buffer,
        Err(e) => {
            warn!(layout = layout.as_str(), error = %e, "invalid buffer layout");
            std::process::exit(2);
        }
    };
    info!(capacity = buffer.capacity(), initial = buffer.size(), rounds, "starting workload");

    let mut rng = rand::thread_rng();
    let mut stats = Stats::default();

    for round in 0..rounds {
        // producer bursts slightly outpace the consumer
        let burst = rng.gen_range(0..4);
        for _ in 0..burst {
            let sample: u64 = rng.gen();
            if rng.gen_bool(0.2) {
                if buffer.is_full() {
                    stats.evicted += 1;
                }
                buffer.force_write(sample);
                stats.written += 1;
                continue;
            }
            match buffer.write(sample, false) {
                Ok(()) => stats.written += 1,
                Err(RingBufferError::BufferFull) => stats.rejected += 1,
                Err(e) => warn!(error = %e, "unexpected write failure"),
            }
        }

        let reads = rng.gen_range(0..3);
        for _ in 0..reads {
            match buffer.read() {
                Ok(_) => stats.read += 1,
                Err(RingBufferError::BufferEmpty) => stats.empty_reads += 1,
                Err(e) => warn!(error = %e, "unexpected read failure"),
            }
        }

        if round % 100 == 0 {
            info!(round, size = buffer.size(), "buffer : {:?}", buffer);
        }
    }

    let remaining = buffer.drain().count();
    info!(
        written = stats.written,
        rejected = stats.rejected,
        evicted = stats.evicted,
        read = stats.read,
        empty_reads = stats.empty_reads,
        remaining,
        "workload finished"
    );
}
