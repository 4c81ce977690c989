use crate::reports;
use clap::Args;
use std::io::Write;
use std::sync::Arc;
use weightforge::algorithms::Algorithm;
use weightforge::config::Config;
use weightforge::error::WfResult;
use weightforge::landscape::FitnessLandscape;
use weightforge::optimizer::{ProgressCallback, Runner};

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// ga | pso | aco | tabu
    pub algorithm: Algorithm,

    #[command(flatten)]
    pub config: Config,

    /// Print every N-th entry of the accuracy history (0 hides it)
    #[arg(long, default_value_t = 10)]
    pub history_every: usize,
}

/// Prints a single status line that is rewritten in place.
struct ConsoleProgress;

impl ProgressCallback for ConsoleProgress {
    fn on_progress(
        &self,
        algorithm: Algorithm,
        iteration: usize,
        total: usize,
        best_accuracy: f64,
        _secondary: f64,
    ) {
        if iteration % 10 == 0 || iteration == total {
            print!(
                "\r   [{}] {:>4}/{:<4} best accuracy {:.4}",
                algorithm.label(),
                iteration,
                total,
                best_accuracy
            );
            if iteration == total {
                println!();
            } else {
                let _ = std::io::stdout().flush();
            }
        }
    }
}

pub fn run(
    args: RunArgs,
    landscape: Arc<FitnessLandscape>,
    config: Config,
    seed: Option<u64>,
) -> WfResult<()> {
    println!(
        "\n=== {} on a {}-{}-{} network ({} weights) ===",
        args.algorithm.full_name(),
        landscape.topology.input_size,
        landscape.topology.hidden_size,
        landscape.topology.output_size,
        landscape.dimensions()
    );

    let runner = Runner::new(landscape, config);
    let result = runner.run_observed(args.algorithm, seed, &ConsoleProgress)?;

    reports::print_run_summary(&result);
    if args.history_every > 0 {
        reports::print_history(&result, args.history_every);
    }
    Ok(())
}
