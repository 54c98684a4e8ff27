/*!
 * memsim - Main Entry Point
 *
 * Reads a request stream from the file named by the first argument, or from
 * stdin when no argument is given, and prints one response per allocation.
 */

use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use tracing::info;

use memsim::{
    init_tracing, read_requests, write_responses, MemoryInfo, MemoryManager, RunSpan,
    SimulatorConfig,
};

fn main() -> Result<()> {
    let config = SimulatorConfig::from_env().context("Invalid simulator configuration")?;
    init_tracing(config.trace_json);

    let stream = match std::env::args_os().nth(1) {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("Failed to open {}", path.to_string_lossy()))?;
            read_requests(BufReader::new(file))
        }
        None => read_requests(io::stdin().lock()),
    }
    .context("Failed to load request stream")?;

    info!(
        capacity = stream.capacity,
        requests = stream.requests.len(),
        skipped = stream.skipped,
        verify = config.verify,
        "serving request stream"
    );

    let mut manager = MemoryManager::new(stream.capacity);
    let responses = {
        let run = RunSpan::new(stream.capacity, stream.requests.len());
        let _entered = run.enter();
        let responses = if config.verify {
            manager
                .serve_requests_verified(&stream.requests)
                .context("Allocator invariant check failed")?
        } else {
            manager.serve_requests(&stream.requests)
        };
        run.record_responses(responses.len());
        responses
    };

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    write_responses(&responses, &mut out).context("Failed to write responses")?;
    out.flush().context("Failed to flush responses")?;

    let stats = manager.allocator().stats();
    info!(
        used = stats.used_memory,
        fragments = stats.fragments,
        failed = stats.failed_allocations,
        "run finished"
    );
    if config.stats_json {
        eprintln!("{}", serde_json::to_string(&stats)?);
    }

    Ok(())
}
