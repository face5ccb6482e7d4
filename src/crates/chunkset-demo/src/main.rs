use chunkset::{Builder, BuilderConfig, Container, DEFAULT_THRESHOLD};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

const SAMPLE: [u32; 12] = [4, 8, 23, 35, 2, 128, 200, 31, 32, 33, 1, 0];

#[derive(Parser)]
#[command(name = "chunkset-demo")]
#[command(about = "Builds a chunk index from sparse and dense keys and prints membership")]
struct Args {
    /// Distinct remainders per chunk at which the bitset form is used
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    threshold: usize,

    /// Tracing log level
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&args.log_level).unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let remainders: Vec<u16> = SAMPLE.iter().map(|&x| x as u16).collect();
    if let Some(words) = Container::bitset(&remainders).words_display() {
        print!("{words}");
    }

    let mut builder = Builder::with_config(BuilderConfig::new(args.threshold)?);
    builder.extend((0..10_000).step_by(2));
    builder.extend(SAMPLE.iter().map(|&x| x * 10_000));

    let index = builder.finalize();
    let stats = index.stats();
    info!(
        chunks = index.chunk_count(),
        arrays = stats.array_containers,
        bitsets = stats.bitset_containers,
        heap_bytes = stats.heap_bytes,
        "chunk index ready"
    );

    for x in SAMPLE {
        println!("{}", index.contains(x));
    }

    Ok(())
}
