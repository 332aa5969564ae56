use anyhow::Context;
use clap::Parser;
use kepler_processor::PlanetProcessor;
use kepler_processor::cli::{Args, print_results, setup_logging};
use std::process;

fn main() {
    let args = Args::parse();
    setup_logging(&args);

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    match runtime.block_on(run(args)) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    let dataset_path = args.get_dataset_path();
    let processor = PlanetProcessor::new(dataset_path.clone())
        .with_context(|| format!("Cannot open dataset {}", dataset_path.display()))?
        .with_config(args.to_config());

    let result = processor
        .process()
        .await
        .with_context(|| format!("Failed to process {}", dataset_path.display()))?;

    print_results(&result);
    Ok(())
}
