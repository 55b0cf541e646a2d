use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use hotelsim::{Coordinator, DeskLog, GuestTracker, SimConfig, Subscribe};

/// Concurrent hotel room-allocation simulator.
///
/// Spawns the requested number of guest actors (men and women
/// alternating) that contend for the single- and double-room pools until
/// the process receives a termination signal.
#[derive(Parser, Debug)]
#[command(name = "hotelsim", version, about)]
struct Args {
    /// Number of concurrent guests to simulate.
    guests: usize,

    /// Capacity of the single-room pool.
    #[arg(long, default_value_t = 10)]
    single_rooms: usize,

    /// Capacity of the double-room pool.
    #[arg(long, default_value_t = 15)]
    double_rooms: usize,

    /// Graceful-shutdown window, in seconds.
    #[arg(long, default_value_t = 5)]
    grace_secs: u64,
}

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let cfg = SimConfig {
        guests: args.guests,
        single_rooms: args.single_rooms,
        double_rooms: args.double_rooms,
        grace: Duration::from_secs(args.grace_secs),
        ..SimConfig::default()
    };

    let tracker = Arc::new(GuestTracker::new());
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(DeskLog), tracker.clone()];

    let coordinator = Coordinator::new(cfg, subs, tracker);
    coordinator.run().await?;

    println!("hotel closed; all guests checked out");
    Ok(())
}
