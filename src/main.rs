use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;

use top1_eval::{eval, EvalContext, EvalOptions, Registry};

#[derive(Parser)]
#[command(
    name = "top1-eval",
    version,
    about = "Test the top-1 error of pretrained networks on clean or adversarial image sets"
)]
struct Cli {
    /// Dataset directory, e.g. ./DAmageNet or ./ILSVRC2012_img_val
    dataset: PathBuf,

    /// Networks to test, comma-separated without spaces
    net_list: String,

    /// Accelerator id (reserved; the ONNX backend runs on the CPU)
    accelerator: Option<String>,

    /// Label index file with `<filename> <class_id>` lines
    #[arg(long, default_value = "val.txt")]
    labels: PathBuf,

    /// Directory containing the ONNX weight files
    #[arg(long, default_value = "models")]
    models: PathBuf,

    /// Extra network descriptors as a JSON manifest
    #[arg(long)]
    manifest: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    if let Err(e) = try_main() {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn try_main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    anyhow::ensure!(
        cli.dataset.is_dir(),
        "dataset directory not found: {}",
        cli.dataset.display()
    );
    anyhow::ensure!(
        cli.labels.is_file(),
        "label index not found: {}",
        cli.labels.display()
    );
    if let Some(accelerator) = &cli.accelerator {
        log::info!("Accelerator {} requested; inference runs on the CPU", accelerator);
    }

    let mut registry = Registry::builtin();
    if let Some(path) = &cli.manifest {
        registry
            .extend_from_manifest(path)
            .with_context(|| format!("loading manifest {}", path.display()))?;
    }

    let names: Vec<String> = cli
        .net_list
        .split(',')
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    anyhow::ensure!(!names.is_empty(), "no networks requested");

    let ctx = EvalContext::load(&registry, &names, &cli.models)?;
    let opts = EvalOptions {
        labels_path: cli.labels.clone(),
        show_progress: true,
    };
    let report = eval::run(&ctx, &cli.dataset, &opts)?;
    println!("\n{}", report.render());
    Ok(())
}
