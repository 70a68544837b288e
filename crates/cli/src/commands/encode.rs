use anyhow::{Context, Result};
use dnavault_core::constraints::{ComplianceReport, Motif};
use dnavault_core::{EncodedUnit, Pipeline, PipelineConfig};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::args::EncodeArgs;
use crate::defaults;
use crate::printing::{print_encode_summary, print_report};
use crate::record::RecordSet;

struct Encoded {
    input: PathBuf,
    output: PathBuf,
    payload_len: usize,
    unit: EncodedUnit,
}

/// Resolve the pipeline configuration: file (if any), then flag overrides.
pub fn build_config(args: &EncodeArgs) -> Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => PipelineConfig::default(),
    };
    if let Some(nsym) = args.nsym {
        config.nsym = nsym;
    }
    if args.repair {
        config.repair.enabled = true;
    }
    if args.seed.is_some() {
        config.repair.seed = args.seed;
    }
    Ok(config)
}

fn record_id(input: &Path) -> String {
    input
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty() && !s.contains(char::is_whitespace))
        .unwrap_or(defaults::RECORD_ID)
        .to_string()
}

fn output_path(input: &Path, out_dir: &Path) -> PathBuf {
    out_dir.join(format!("{}.{}", record_id(input), defaults::RECORD_EXTENSION))
}

/// Pair every input with its record path, refusing inputs that share one.
fn plan_outputs(inputs: &[PathBuf], out_dir: &Path) -> Result<Vec<(PathBuf, PathBuf)>> {
    let mut seen: HashMap<PathBuf, &Path> = HashMap::new();
    let mut plan = Vec::with_capacity(inputs.len());
    for input in inputs {
        let output = output_path(input, out_dir);
        if let Some(previous) = seen.insert(output.clone(), input) {
            anyhow::bail!(
                "Inputs {} and {} would both write {}",
                previous.display(),
                input.display(),
                output.display()
            );
        }
        plan.push((input.clone(), output));
    }
    Ok(plan)
}

fn encode_one(pipeline: &Pipeline, input: &Path, output: PathBuf) -> Result<Encoded> {
    let payload =
        fs::read(input).with_context(|| format!("Failed to read {}", input.display()))?;
    let unit = pipeline
        .encode(&payload)
        .with_context(|| format!("Failed to encode {}", input.display()))?;

    let records = RecordSet {
        id: record_id(input),
        nsym: Some(pipeline.config().nsym),
        sequence: unit.sequence.clone(),
        metadata: Some(unit.metadata.clone()),
        filename: input
            .file_name()
            .and_then(|s| s.to_str())
            .map(str::to_string),
    };
    records.save(&output)?;

    Ok(Encoded {
        input: input.to_path_buf(),
        output,
        payload_len: payload.len(),
        unit,
    })
}

pub fn encode_files(args: &EncodeArgs) -> Result<()> {
    println!("🧬 dnavault - Encoding");
    println!("============================================");

    let config = build_config(args)?;
    let pipeline = Pipeline::new(config).context("Invalid pipeline configuration")?;
    let profile = pipeline.config().profile.clone();
    let motifs: Vec<Motif> = if args.motifs.is_empty() {
        profile.forbidden_motifs.clone()
    } else {
        args.motifs.clone()
    };

    println!("  • Inputs: {}", args.inputs.len());
    println!("  • nsym: {} [--nsym]", pipeline.config().nsym);
    println!(
        "  • Repair: {} [--repair]",
        if pipeline.config().repair.enabled { "enabled" } else { "disabled" }
    );

    let plan = plan_outputs(&args.inputs, &args.out_dir)?;
    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;

    let results: Vec<Result<Encoded>> = if args.inputs.len() > 1 {
        let pb = ProgressBar::new(args.inputs.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len}")
                .context("Invalid progress template")?
                .progress_chars("#>-"),
        );
        let results = plan
            .into_par_iter()
            .map(|(input, output)| {
                let result = encode_one(&pipeline, &input, output);
                pb.inc(1);
                result
            })
            .collect();
        pb.finish_and_clear();
        results
    } else {
        plan.into_iter()
            .map(|(input, output)| encode_one(&pipeline, &input, output))
            .collect()
    };

    let mut failures = 0;
    for result in results {
        match result {
            Ok(encoded) => {
                print_encode_summary(
                    &encoded.input,
                    &encoded.output,
                    encoded.payload_len,
                    &encoded.unit,
                );
                print_report(&ComplianceReport::new(&encoded.unit.sequence, &profile, &motifs));
            }
            Err(e) => {
                failures += 1;
                eprintln!("❌ {e:#}");
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} of {} input(s) failed to encode", args.inputs.len());
    }

    println!("\n✓ Encoding complete");
    Ok(())
}
