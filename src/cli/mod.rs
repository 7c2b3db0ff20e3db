// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and hands off to Layer 2.
// This is the only layer that prints to stdout.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, ElboArgs, GenerateArgs, InitConfigArgs, ModelArgs, TransformArgs};

use crate::application::{
    codec_use_case::{CodecOp, CodecUseCase},
    evaluate_use_case::EvaluateUseCase,
    RunConfig,
};
use crate::domain::traits::Persistable;

#[derive(Parser, Debug)]
#[command(
    name = "vae-elbo",
    version = "0.1.0",
    about = "Build a variational auto-encoder graph, evaluate its ELBO, and encode/decode through it."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Elbo(args)        => run_elbo(args),
            Commands::Encode(args)      => run_codec(args.model.clone(), encode_op(args)),
            Commands::Decode(args)      => run_codec(args.model.clone(), decode_op(args)),
            Commands::Reconstruct(args) => run_codec(args.model.clone(), reconstruct_op(args)),
            Commands::Generate(args)    => run_generate(args),
            Commands::InitConfig(args)  => run_init_config(args),
        }
    }
}

/// --config wins over the individual model flags.
fn resolve_config(model: ModelArgs) -> Result<RunConfig> {
    match &model.config {
        Some(path) => {
            tracing::info!("Loading settings from '{}'", path.display());
            RunConfig::load(path)
        }
        None => Ok(model.into()),
    }
}

fn run_elbo(args: ElboArgs) -> Result<()> {
    let mut cfg = resolve_config(args.model)?;
    if args.report_dir.is_some() {
        cfg.report_dir = args.report_dir;
    }

    let report = EvaluateUseCase::new(cfg, args.input, args.seed).execute()?;

    println!("likelihood       {:>14.4}", report.likelihood);
    println!("latent_prior     {:>14.4}", report.latent_prior);
    println!("latent_posterior {:>14.4}", report.latent_posterior);
    println!("elbo             {:>14.4}", report.elbo);
    println!("analytic_kl      {:>14.4}", report.analytic_kl);
    Ok(())
}

fn encode_op(a: TransformArgs) -> CodecOp {
    CodecOp::Encode { input: a.input, output: a.output }
}

fn decode_op(a: TransformArgs) -> CodecOp {
    CodecOp::Decode { input: a.input, output: a.output }
}

fn reconstruct_op(a: TransformArgs) -> CodecOp {
    CodecOp::Reconstruct { input: a.input, output: a.output }
}

fn run_codec(model: ModelArgs, op: CodecOp) -> Result<()> {
    let cfg = resolve_config(model)?;
    let result = CodecUseCase::new(cfg, op).execute()?;
    println!("Wrote array of shape {:?}", result.shape);
    Ok(())
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    run_codec(args.model, CodecOp::Generate { output: args.output })
}

fn run_init_config(args: InitConfigArgs) -> Result<()> {
    let cfg = resolve_config(args.model)?;
    cfg.validate()?;
    cfg.save(&args.output)?;
    println!("Config written to '{}'", args.output.display());
    Ok(())
}
