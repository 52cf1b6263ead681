//! Demo driver exercising the queue API.
//!
//! Runs the reference workload: two queues interleaved, partially drained,
//! destroyed. Expected output:
//!
//! ```text
//! 01
//! 25
//! 346
//! ```

use clap::Parser;
use tracing_subscriber::EnvFilter;

use fragq::{dump_arena, ByteQueues};

#[derive(Parser)]
#[command(name = "fragq-demo", about = "Exercise the fragment-pool byte queues")]
struct Args {
    /// Print the raw arena contents after the run.
    #[arg(long)]
    dump: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut queues = ByteQueues::new();

    let q0 = queues.create_queue()?;
    let q0 = queues.enqueue_byte(q0, 0)?;
    let q0 = queues.enqueue_byte(q0, 1)?;
    let q1 = queues.create_queue()?;
    let q1 = queues.enqueue_byte(q1, 3)?;
    let q0 = queues.enqueue_byte(q0, 2)?;
    let q1 = queues.enqueue_byte(q1, 4)?;

    let (a, q0) = queues.dequeue_byte(q0)?;
    let (b, q0) = queues.dequeue_byte(q0)?;
    println!("{a}{b}");

    let q0 = queues.enqueue_byte(q0, 5)?;
    let q1 = queues.enqueue_byte(q1, 6)?;

    let (a, q0) = queues.dequeue_byte(q0)?;
    let (b, q0) = queues.dequeue_byte(q0)?;
    println!("{a}{b}");

    let _ = queues.destroy_queue(q0);

    let (a, q1) = queues.dequeue_byte(q1)?;
    let (b, q1) = queues.dequeue_byte(q1)?;
    let (c, q1) = queues.dequeue_byte(q1)?;
    println!("{a}{b}{c}");

    let _ = queues.destroy_queue(q1);

    if args.dump {
        print!("{}", dump_arena(queues.pool()));
    }

    Ok(())
}
