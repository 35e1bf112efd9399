//! Grouped Violin Plot Example
//!
//! Draws one violin per treatment group onto an in-memory canvas, prints the
//! per-group statistics, then restyles the plots without recomputing them.
//!
//! Run with: `cargo run --example violin_groups`
//! Set `RUST_LOG=violin_viz=debug` to see the drawing trace.

use tracing_subscriber::EnvFilter;
use violin_viz::prelude::*;
use violin_viz::stats::Whiskers;

fn main() -> violin_viz::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Grouped Violin Plot Example");
    println!("===========================\n");

    // Step 1: Generate sample data for three groups
    println!("Step 1: Generating sample data...");
    let (values, groups) = generate_sample_data();
    println!("  {} samples in 3 groups", values.len());

    // Step 2: Draw the violins
    println!("\nStep 2: Drawing violins...");
    let mut canvas = Canvas::new();
    let input = PlotInput::categorical(&values, &groups);
    let opts = ViolinOptions::new()
        .width(0.4)
        .show_mean(true)
        .group_order(&["Control", "Treatment A", "Treatment B"])
        .seed(42);
    let mut violins = violinplot(&mut canvas, &input, &opts)?;
    println!("  Primitives on canvas: {}", canvas.len());

    // Step 3: Display statistics
    println!("\nStep 3: Statistics...");
    for violin in &violins {
        let stats = violin.stats();
        println!("\n  {}:", violin.label());
        println!("    n:      {}", stats.n);
        println!("    Median: {:.2}", stats.median);
        if let (Some(q), Some(iqr)) = (stats.quartiles, stats.iqr()) {
            println!("    Q1:     {:.2}", q.q1);
            println!("    Q3:     {:.2}", q.q3);
            println!("    IQR:    {iqr:.2}");
        }
        if let Some((low, high)) = stats.whiskers.as_ref().and_then(Whiskers::bounds) {
            println!("    Whiskers: {low:.2} .. {high:.2}");
        }
        if !stats.outliers.is_empty() {
            println!("    Outliers: {:?}", stats.outliers);
        }
        if let Some(h) = violin.density().and_then(DensityCurve::bandwidth) {
            println!("    Bandwidth: {h:.3}");
        }
    }

    // Step 4: Restyle in place
    println!("\nStep 4: Restyling...");
    for violin in &mut violins {
        violin.set_box_color(&mut canvas, Rgb::BLACK)?;
        violin.set_violin_alpha(&mut canvas, 0.5)?;
    }
    violins[2].set_show_notches(&mut canvas, true)?;
    println!("  Primitives on canvas: {}", canvas.len());
    println!("  Ticks: {:?}", canvas.tick_labels());

    println!("\nViolin plots successfully laid out!");
    Ok(())
}

/// Generate three deterministic groups; the last one carries outliers.
fn generate_sample_data() -> (Vec<f64>, Vec<&'static str>) {
    let mut values = Vec::new();
    let mut groups = Vec::new();

    let specs: [(&str, f64, u32, f64); 3] = [
        ("Control", 50.0, 1103, 50.0),
        ("Treatment A", 65.0, 6361, 100.0),
        ("Treatment B", 40.0, 7919, 62.5),
    ];
    for (name, base, mult, div) in specs {
        for i in 0u32..80 {
            let noise = f64::from(i.wrapping_mul(mult).wrapping_add(12_345) % 1000) / div - 10.0;
            values.push(base + noise);
            groups.push(name);
        }
    }

    values.extend_from_slice(&[10.0, 95.0]);
    groups.extend_from_slice(&["Treatment B", "Treatment B"]);

    (values, groups)
}
