use dnavault_core::constraints::ComplianceReport;
use dnavault_core::EncodedUnit;
use std::path::Path;

pub fn print_encode_summary(input: &Path, output: &Path, payload_len: usize, unit: &EncodedUnit) {
    println!("\n🧬 {}", input.display());
    println!("  • Payload: {payload_len} bytes");
    println!(
        "  • Sequence: {} bases ({} rotated)",
        unit.sequence.len(),
        unit.offsets.rotated()
    );
    println!(
        "  • Metadata: {} bases ({} stuffing)",
        unit.metadata.len(),
        unit.stuffed
    );
    if let Some(mutations) = unit.repair_mutations {
        println!("  • Repair: {mutations} substitutions");
    }
    if !unit.fallbacks.is_empty() {
        println!(
            "  ⚠️  {} position(s) could not satisfy the constraints",
            unit.fallbacks.len()
        );
    }
    println!("  ✓ Written to {}", output.display());
}

pub fn print_report(report: &ComplianceReport) {
    println!("\n📊 Constraint Report");
    println!("  • Length: {} bases", report.length);
    println!(
        "  • GC content: {:.2}% {}",
        report.gc_content,
        if report.gc_in_band { "✓" } else { "✗ (out of band)" }
    );
    println!(
        "  • Long homopolymers: {} (longest run {}, limit {})",
        report.homopolymer_violation,
        report.longest_run,
        report.max_homopolymer
    );
    if report.motifs_found.is_empty() {
        println!("  • Unstable motifs present: false");
    } else {
        println!(
            "  • Unstable motifs present: true ({})",
            report.motifs_found.join(", ")
        );
    }
}
