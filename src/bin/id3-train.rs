//! Developer utility to train and export an ID3 decision tree.

use std::path::{Path, PathBuf};

use id3tree::config::{self, TrainConfig};
use id3tree::logging;
use id3tree::ml::id3::{
    DepthPolicy, Id3Model, SplitBudget, TrainDataset, TrainOptions, train_id3, validate_inputs,
};
use id3tree::ml::metrics::{Evaluation, evaluate, precision_recall_by_class};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let options = parse_args(std::env::args().skip(1).collect())?;
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let mut train_config = match &options.config {
        Some(path) => config::load_from(path),
        None => config::load_or_default(),
    }
    .map_err(|err| err.to_string())?;
    apply_overrides(&mut train_config, &options);

    let dataset = TrainDataset::load_json(&options.dataset).map_err(|err| err.to_string())?;
    let train_options = TrainOptions::from(&train_config);
    let model = train_id3(&dataset, &train_options, train_config.numeric_splits)
        .map_err(|err| err.to_string())?;
    model
        .save_json(&options.model_out)
        .map_err(|err| err.to_string())?;
    println!("model written to {}", options.model_out.display());
    println!(
        "tree: {} nodes, {} leaves, depth {}",
        model.root.node_count(),
        model.root.leaf_count(),
        model.root.depth()
    );
    if options.print_tree {
        print!("{}", model.root);
    }

    report("train", &model, &evaluate(&model, &dataset.rows));
    if let Some(path) = &options.validate {
        let holdout = load_holdout(path, &model)?;
        report("validation", &model, &evaluate(&model, &holdout.rows));
    }
    Ok(())
}

#[derive(Debug, Clone)]
struct CliOptions {
    dataset: PathBuf,
    model_out: PathBuf,
    config: Option<PathBuf>,
    validate: Option<PathBuf>,
    max_depth: Option<i32>,
    stride: Option<usize>,
    depth_policy: Option<DepthPolicy>,
    print_tree: bool,
}

fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut dataset: Option<PathBuf> = None;
    let mut model_out = PathBuf::from("model.json");
    let mut config = None;
    let mut validate = None;
    let mut max_depth = None;
    let mut stride = None;
    let mut depth_policy = None;
    let mut print_tree = false;

    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "-h" | "--help" => return Err(help_text()),
            "--print-tree" => print_tree = true,
            flag @ ("--dataset" | "--out" | "--config" | "--validate" | "--max-depth"
            | "--stride" | "--depth-policy") => {
                idx += 1;
                let value = args
                    .get(idx)
                    .ok_or_else(|| format!("{flag} requires a value"))?;
                match flag {
                    "--dataset" => dataset = Some(PathBuf::from(value)),
                    "--out" => model_out = PathBuf::from(value),
                    "--config" => config = Some(PathBuf::from(value)),
                    "--validate" => validate = Some(PathBuf::from(value)),
                    "--max-depth" => {
                        max_depth = Some(
                            value
                                .parse::<i32>()
                                .map_err(|_| format!("Invalid --max-depth value: {value}"))?,
                        );
                    }
                    "--stride" => {
                        stride = Some(
                            value
                                .parse::<usize>()
                                .map_err(|_| format!("Invalid --stride value: {value}"))?,
                        );
                    }
                    _ => depth_policy = Some(parse_depth_policy(value)?),
                }
            }
            unknown => return Err(format!("Unknown argument: {unknown}\n\n{}", help_text())),
        }
        idx += 1;
    }

    let dataset = dataset.ok_or_else(help_text)?;
    Ok(CliOptions {
        dataset,
        model_out,
        config,
        validate,
        max_depth,
        stride,
        depth_policy,
        print_tree,
    })
}

fn parse_depth_policy(value: &str) -> Result<DepthPolicy, String> {
    match value {
        "per-child" | "per_child" => Ok(DepthPolicy::PerChild),
        "per-node" | "per_node" => Ok(DepthPolicy::PerNode),
        other => Err(format!(
            "Invalid --depth-policy value: {other} (expected per-child or per-node)"
        )),
    }
}

fn apply_overrides(config: &mut TrainConfig, options: &CliOptions) {
    if let Some(max_depth) = options.max_depth {
        config.max_depth = max_depth;
    }
    if let Some(stride) = options.stride {
        config.numeric_stride = stride;
    }
    if let Some(policy) = options.depth_policy {
        config.depth_policy = policy;
    }
}

fn help_text() -> String {
    [
        "id3-train",
        "",
        "Trains an ID3 decision tree (gain-ratio splits) from a JSON dataset.",
        "",
        "Usage:",
        "  id3-train --dataset <file.json> [--out model.json] [options]",
        "",
        "Options:",
        "  --dataset <file>        Training data: attributes, rows, optional numeric_splits (required).",
        "  --out <file>            Output model path (default: model.json).",
        "  --config <file>         TOML config (default: id3tree.toml in the app directory).",
        "  --validate <file>       Held-out dataset to report accuracy on.",
        "  --max-depth <n>         Remaining depth at the root.",
        "  --stride <n>            Row stride for numeric threshold candidates.",
        "  --depth-policy <p>      per-child or per-node depth charging on nominal splits.",
        "  --print-tree            Print the trained tree.",
    ]
    .join("\n")
}

fn load_holdout(path: &Path, model: &Id3Model) -> Result<TrainDataset, String> {
    let holdout = TrainDataset::load_json(path).map_err(|err| err.to_string())?;
    if holdout.attributes != model.attributes {
        return Err(format!(
            "Validation attributes in {} do not match the training attributes",
            path.display()
        ));
    }
    let budget = SplitBudget::uniform(&holdout.attributes, 0);
    validate_inputs(&holdout.rows, &holdout.attributes, &budget)
        .map_err(|err| format!("Invalid validation data in {}: {err}", path.display()))?;
    Ok(holdout)
}

fn report(split: &str, model: &Id3Model, eval: &Evaluation) {
    println!(
        "{split} accuracy: {:.4} (unclassified: {})",
        eval.accuracy(),
        eval.unclassified
    );
    let label_name = model
        .attributes
        .first()
        .map(|attr| attr.name.as_str())
        .unwrap_or("label");
    for (idx, stats) in precision_recall_by_class(&eval.matrix).iter().enumerate() {
        println!(
            "  {label_name}={:<8} precision={:.3}  recall={:.3}  support={}",
            eval.matrix.labels[idx].to_string(),
            stats.precision,
            stats.recall,
            stats.support
        );
    }
}
