//! autolysis CLI entry point

use std::process::ExitCode;

use autolysis::cli::{Cli, Invocation};
use autolysis::pipeline::{run_analysis, ConsoleOptions};
use autolysis::plot::PlottersRenderer;
use autolysis::utils::{print_banner, print_completion, print_paths, print_usage};
use autolysis::AnalysisConfig;

fn main() -> ExitCode {
    let input = match Cli::invocation_from(std::env::args_os()) {
        Invocation::Analyze(input) => input,
        Invocation::Usage => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        Invocation::Info(info) => {
            let _ = info.print();
            return ExitCode::SUCCESS;
        }
    };

    let config = AnalysisConfig::new(input);

    print_banner(env!("CARGO_PKG_VERSION"));
    print_paths(&config.input, &config.output_dir());

    let console = ConsoleOptions { show_profile: true };
    match run_analysis(&config, &PlottersRenderer::new(), console) {
        Ok(_) => {
            print_completion();
            ExitCode::SUCCESS
        }
        // The cause has already been printed by the failing step
        Err(e) => ExitCode::from(e.exit_code()),
    }
}
