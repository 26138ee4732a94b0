// ============================================================
// Layer 1 - CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap and hands off to Layer 2. This is the only layer that
// prints to stdout.
//
// Commands:
//   1. `eval`           - score a network on dev/test corpora
//   2. `init`           - write a fresh network directory
//   3. `export-vectors` - dump the word vectors as text

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, EvalArgs, ExportArgs, InitArgs};

use crate::infra::metrics::SplitMetrics;

#[derive(Parser, Debug)]
#[command(
    name = "mplm-context",
    version = "0.1.0",
    about = "Evaluate a multilingual context-window language model on dev/test corpora."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Eval(args)          => run_eval(args),
            Commands::Init(args)          => run_init(args),
            Commands::ExportVectors(args) => run_export(args),
        }
    }
}

fn run_eval(args: EvalArgs) -> Result<()> {
    use crate::application::evaluate_use_case::EvaluateUseCase;

    let metrics = EvaluateUseCase::new(args.into()).execute()?;

    for m in &metrics {
        for line in report_lines(m) {
            println!("{line}");
        }
    }
    Ok(())
}

/// The two stdout lines reported for an evaluated split.
fn report_lines(m: &SplitMetrics) -> [String; 2] {
    [
        format!("{} set evaluation", m.split),
        format!("{} cost mean: {} perplexity: {}", m.split, m.mean_loss, m.perplexity),
    ]
}

fn run_init(args: InitArgs) -> Result<()> {
    use crate::application::init_use_case::InitUseCase;

    let dir = args.network.network_dir.clone();
    InitUseCase::new(args.network.into()).execute()?;

    println!("Network initialised in {}", dir.display());
    Ok(())
}

fn run_export(args: ExportArgs) -> Result<()> {
    use crate::application::export_use_case::ExportVectorsUseCase;

    let written = ExportVectorsUseCase::new(args.network.into(), &args.output).execute()?;

    println!("Wrote {} vectors to {}", written, args.output.display());
    Ok(())
}
