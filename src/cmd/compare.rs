use crate::reports;
use clap::Args;
use std::sync::Arc;
use weightforge::config::Config;
use weightforge::error::WfResult;
use weightforge::landscape::FitnessLandscape;
use weightforge::optimizer::{Comparison, NoProgress, Runner};

#[derive(Args, Debug, Clone)]
pub struct CompareArgs {
    #[command(flatten)]
    pub config: Config,

    /// Run the four algorithms concurrently
    #[arg(short, long, default_value_t = false)]
    pub parallel: bool,

    /// Write the comparison as JSON
    #[arg(short, long)]
    pub output: Option<String>,
}

pub fn run(
    args: CompareArgs,
    landscape: Arc<FitnessLandscape>,
    config: Config,
    seed: Option<u64>,
) -> WfResult<()> {
    println!("\n=== ALGORITHM COMPARISON ===");

    let runner = Runner::new(landscape, config);
    let results = runner.run_each(seed, args.parallel, &NoProgress)?;
    let Some(comparison) = Comparison::from_results(&results) else {
        return Ok(());
    };

    reports::print_ranking(&results, &comparison);
    reports::print_accuracy_series(&comparison, 10);

    if let Some(path) = &args.output {
        comparison.save_json(path)?;
        println!("Saved results to {}", path);
    }
    Ok(())
}
