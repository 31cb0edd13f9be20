//! Developer utility to check artifacts the way the form loads them.
//!
//! Usage: `trendcast-inspect [--model PATH] [--encoder PATH] [--predict YYYY-MM-DD PERCENT CATEGORY]`
//! Paths default to the ones in `config.toml`.

use std::path::PathBuf;

use time::{Date, format_description::FormatItem, macros::format_description};
use trendcast::artifacts::{self, LoadOutcome};
use trendcast::config::{self, ArtifactPaths};
use trendcast::ml::Regressor;
use trendcast::pipeline;

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

fn main() {
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

#[derive(Debug, Default)]
struct CliOptions {
    model: Option<PathBuf>,
    encoder: Option<PathBuf>,
    predict: Option<PredictArgs>,
}

#[derive(Debug)]
struct PredictArgs {
    date: Date,
    percentage: f64,
    category: String,
}

fn run() -> Result<(), String> {
    let options = parse_args(std::env::args().skip(1).collect())?;
    let paths = resolve_paths(&options)?;
    println!("model:   {}", paths.model.display());
    println!("encoder: {}", paths.encoder.display());

    let outcome = artifacts::load(&paths).map_err(|err| err.to_string())?;
    let artifacts = match outcome {
        LoadOutcome::Ready(artifacts) => artifacts,
        LoadOutcome::Unavailable(reason) => return Err(reason.advisory()),
    };

    let model = &artifacts.model;
    println!(
        "forest: {} trees, {} nodes, {} features",
        model.trees.len(),
        model.node_count(),
        model.n_features()
    );
    match model.feature_names() {
        Some(names) => println!("feature names: {}", names.join(", ")),
        None => println!("feature names: not recorded"),
    }
    println!("categories ({}):", artifacts.encoder.len());
    for (code, label) in artifacts.encoder.classes().iter().enumerate() {
        println!("  {code:>3}  {label}");
    }

    if let Some(args) = options.predict {
        let prediction = pipeline::predict(
            args.date,
            args.percentage,
            &args.category,
            model,
            &artifacts.encoder,
        )
        .map_err(|err| err.to_string())?;
        println!("features: {:?}", prediction.features.to_row());
        println!("raw: {}", prediction.raw);
        println!("predicted search volume: {}", prediction.display_value());
    }
    Ok(())
}

fn resolve_paths(options: &CliOptions) -> Result<ArtifactPaths, String> {
    let settings = config::load_or_default().map_err(|err| err.to_string())?;
    let defaults = settings.artifacts.resolve().map_err(|err| err.to_string())?;
    Ok(ArtifactPaths {
        model: options.model.clone().unwrap_or(defaults.model),
        encoder: options.encoder.clone().unwrap_or(defaults.encoder),
    })
}

fn parse_args(args: Vec<String>) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--model" => options.model = Some(next_value(&mut iter, "--model")?.into()),
            "--encoder" => options.encoder = Some(next_value(&mut iter, "--encoder")?.into()),
            "--predict" => {
                let date = next_value(&mut iter, "--predict")?;
                let date = Date::parse(&date, DATE_FORMAT)
                    .map_err(|err| format!("Invalid date {date:?}: {err}"))?;
                let percentage = next_value(&mut iter, "--predict")?;
                let percentage = percentage
                    .parse::<f64>()
                    .map_err(|err| format!("Invalid percentage {percentage:?}: {err}"))?;
                let category = next_value(&mut iter, "--predict")?;
                options.predict = Some(PredictArgs {
                    date,
                    percentage,
                    category,
                });
            }
            "-h" | "--help" => {
                return Err(
                    "Usage: trendcast-inspect [--model PATH] [--encoder PATH] [--predict YYYY-MM-DD PERCENT CATEGORY]"
                        .to_string(),
                );
            }
            other => return Err(format!("Unknown argument {other:?}")),
        }
    }
    Ok(options)
}

fn next_value(iter: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, String> {
    iter.next()
        .ok_or_else(|| format!("{flag} is missing a value"))
}
