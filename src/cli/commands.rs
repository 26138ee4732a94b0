// ============================================================
// Layer 1 - CLI Commands and Arguments
// ============================================================
// Defines the subcommands `eval`, `init` and `export-vectors`
// and all their configurable flags.
//
// The network flags are shared by every command through a
// flattened `NetworkArgs`, so a network built with `init` is
// loaded by `eval` with exactly the same flag spelling.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::evaluate_use_case::EvalConfig;
use crate::application::network::NetworkConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract context windows for dev/test corpora and report
    /// mean cost and perplexity of a saved network
    Eval(EvalArgs),

    /// Write a freshly initialised network for the given settings
    Init(InitArgs),

    /// Dump the network's word vectors as text
    ExportVectors(ExportArgs),
}

/// Flags describing the network and its vocabulary.
#[derive(Args, Debug, Clone)]
pub struct NetworkArgs {
    /// Directory holding model_config.json and model.mpk
    #[arg(long, default_value = "work/context")]
    pub network_dir: PathBuf,

    /// One symbol per line; the suffix after the last '.' lists
    /// the network's languages, underscore-delimited
    #[arg(long, default_value = "work/symbol_table.en_ru_fr_ro_it_mt_sw_hi_ar")]
    pub symbol_table: PathBuf,

    /// Override the network languages taken from the symbol table name
    #[arg(long)]
    pub model_langs: Option<String>,

    /// Word vector dimension
    #[arg(long, default_value_t = 100)]
    pub vector_size: usize,

    /// Tokens on each side of the centre word
    #[arg(long, default_value_t = 2)]
    pub context_size: usize,

    /// Weight of the language-specific output head
    #[arg(long, default_value_t = 1.0)]
    pub alpha: f64,

    /// Label smoothing applied to the cost, in [0, 1)
    #[arg(long, default_value_t = 0.0)]
    pub betta: f64,
}

impl From<NetworkArgs> for NetworkConfig {
    fn from(a: NetworkArgs) -> Self {
        NetworkConfig {
            network_dir:  a.network_dir,
            symbol_table: a.symbol_table,
            model_langs:  a.model_langs,
            vector_size:  a.vector_size,
            context_size: a.context_size,
            alpha:        a.alpha,
            betta:        a.betta,
        }
    }
}

/// All arguments for the `eval` command
#[derive(Args, Debug)]
pub struct EvalArgs {
    #[command(flatten)]
    pub network: NetworkArgs,

    /// Dataset languages, underscore-delimited, in row order
    #[arg(long, default_value = "ar")]
    pub lang_list: String,

    /// Dev corpus file, read once per dataset language
    #[arg(long)]
    pub dev_path: Option<PathBuf>,

    /// Test corpus file, read once per dataset language
    #[arg(long)]
    pub test_path: Option<PathBuf>,

    /// Rows per evaluation batch
    #[arg(long, default_value_t = 100)]
    pub batch_size: usize,

    /// Append one line per evaluated split to this CSV file
    #[arg(long)]
    pub metrics_csv: Option<PathBuf>,
}

impl From<EvalArgs> for EvalConfig {
    fn from(a: EvalArgs) -> Self {
        EvalConfig {
            network:     a.network.into(),
            lang_list:   a.lang_list,
            dev_path:    a.dev_path,
            test_path:   a.test_path,
            batch_size:  a.batch_size,
            metrics_csv: a.metrics_csv,
        }
    }
}

/// All arguments for the `init` command
#[derive(Args, Debug)]
pub struct InitArgs {
    #[command(flatten)]
    pub network: NetworkArgs,
}

/// All arguments for the `export-vectors` command
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[command(flatten)]
    pub network: NetworkArgs,

    /// Output text file, one "word v1 v2 ..." line per symbol
    #[arg(long)]
    pub output: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_eval_defaults() {
        let cli = Cli::try_parse_from(["mplm-context", "eval", "--dev-path", "data/dev.txt"]).unwrap();
        let Commands::Eval(args) = cli.command else { panic!("expected eval") };
        let cfg: EvalConfig = args.into();
        assert_eq!(cfg.lang_list, "ar");
        assert_eq!(cfg.batch_size, 100);
        assert_eq!(cfg.network.context_size, 2);
        assert_eq!(cfg.network.vector_size, 100);
        assert_eq!(cfg.dev_path, Some(PathBuf::from("data/dev.txt")));
        assert!(cfg.test_path.is_none());
    }

    #[test]
    fn test_export_requires_output() {
        assert!(Cli::try_parse_from(["mplm-context", "export-vectors"]).is_err());
        let cli = Cli::try_parse_from([
            "mplm-context", "export-vectors", "--output", "vec.txt", "--model-langs", "en_fr",
        ])
        .unwrap();
        let Commands::ExportVectors(args) = cli.command else { panic!("expected export-vectors") };
        assert_eq!(args.network.model_langs.as_deref(), Some("en_fr"));
    }
}
