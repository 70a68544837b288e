use anyhow::{Context, Result};
use dnavault_core::constraints::{ComplianceReport, ConstraintProfile};
use dnavault_core::PipelineConfig;

use crate::args::AuditArgs;
use crate::printing::print_report;
use crate::record::RecordSet;

pub fn audit_record(args: &AuditArgs) -> Result<()> {
    let records = RecordSet::load(&args.input)?;
    let profile = match &args.config {
        Some(path) => {
            PipelineConfig::load(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?
                .profile
        }
        None => ConstraintProfile::default(),
    };
    let motifs = if args.motifs.is_empty() {
        profile.forbidden_motifs.clone()
    } else {
        args.motifs.clone()
    };
    let report = ComplianceReport::new(&records.sequence, &profile, &motifs);

    if args.json {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{json}");
        return Ok(());
    }

    println!("🔍 Auditing record '{}'", records.id);
    match (&records.metadata, records.nsym) {
        (Some(metadata), Some(nsym)) => {
            println!("  • Metadata: {} bases, nsym={nsym}", metadata.len())
        }
        (Some(metadata), None) => println!("  • Metadata: {} bases", metadata.len()),
        (None, _) => println!("  ⚠️  No metadata record: this sequence cannot be decoded"),
    }
    if let Some(name) = &records.filename {
        println!("  • Original filename: {name}");
    }
    print_report(&report);
    Ok(())
}
