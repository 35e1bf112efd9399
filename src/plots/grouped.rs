//! Grouped plot entry points.
//!
//! Both entry points resolve the input into groups, compute every group's
//! statistics before anything touches the renderer, then draw the groups at
//! positions `1..=n` and label the x ticks. A failing group therefore leaves
//! the renderer untouched.

use tracing::{debug, field, instrument, Span};

use crate::data::{apply_group_order, extract_groups, Group, PlotInput};
use crate::error::Result;
use crate::jitter::RandomJitter;
use crate::options::{BoxOptions, ViolinOptions};
use crate::plots::boxplot::{BoxGeometryBuilder, BoxStyle, MiniBoxPlot};
use crate::plots::violin::{Violin, ViolinGeometryBuilder, ViolinLayout};
use crate::render::Renderer;
use crate::stats::BoxStats;

/// Draw one violin per group of `input`.
///
/// Groups without an explicit [`ViolinOptions::violin_color`] take the next
/// color of the renderer's palette, in group order.
///
/// # Errors
///
/// Returns the first configuration, shape or empty-sample error; nothing is
/// drawn in that case.
///
/// # Example
///
/// ```rust
/// use violin_viz::prelude::*;
///
/// let mut canvas = Canvas::new();
/// let input = PlotInput::categorical(&[1.0, 2.0, 3.0, 4.0], &["a", "a", "b", "b"]);
/// let violins = violinplot(&mut canvas, &input, &ViolinOptions::new().seed(1)).unwrap();
///
/// assert_eq!(violins.len(), 2);
/// assert_eq!(canvas.tick_labels(), &["a".to_string(), "b".to_string()]);
/// ```
#[instrument(skip(renderer, input, opts), fields(seed = ?opts.seed, groups = field::Empty))]
pub fn violinplot<R: Renderer + ?Sized>(
    renderer: &mut R,
    input: &PlotInput,
    opts: &ViolinOptions,
) -> Result<Vec<Violin>> {
    opts.validate()?;
    let groups = resolve_groups(input, opts.group_order.as_deref())?;
    Span::current().record("groups", groups.len());

    let analyzer = ViolinGeometryBuilder::new(0.0).bandwidth(opts.bandwidth);
    let analyzed = groups
        .iter()
        .map(|g| analyzer.analyze(&g.sample))
        .collect::<Result<Vec<_>>>()?;

    let mut jitter = RandomJitter::from_seed_option(opts.seed);
    let mut violins = Vec::with_capacity(groups.len());
    for (position, (group, (stats, density))) in positions().zip(groups.into_iter().zip(analyzed)) {
        let color = opts.violin_color.unwrap_or_else(|| renderer.next_color());
        let geometry = ViolinGeometryBuilder::from_options(position, opts, color).layout(
            &group.sample,
            &stats,
            density.as_ref(),
            &mut jitter,
        );
        debug!(label = %group.label, n = stats.n, position, "drawing violin");
        let layout = ViolinLayout {
            stats,
            density,
            geometry,
        };
        violins.push(Violin::draw(renderer, group.label, layout));
    }

    set_group_ticks(renderer, violins.iter().map(Violin::label));
    Ok(violins)
}

/// Draw one stand-alone mini box plot per group of `input`.
///
/// # Errors
///
/// Returns the first configuration, shape or empty-sample error; nothing is
/// drawn in that case.
#[instrument(skip(renderer, input, opts), fields(seed = ?opts.seed, groups = field::Empty))]
pub fn boxplot<R: Renderer + ?Sized>(
    renderer: &mut R,
    input: &PlotInput,
    opts: &BoxOptions,
) -> Result<Vec<MiniBoxPlot>> {
    opts.validate()?;
    let groups = resolve_groups(input, opts.group_order.as_deref())?;
    Span::current().record("groups", groups.len());

    let stats = groups
        .iter()
        .map(|g| BoxStats::compute(&g.sample))
        .collect::<Result<Vec<_>>>()?;

    let style = BoxStyle::from(opts);
    let mut jitter = RandomJitter::from_seed_option(opts.seed);
    let mut plots = Vec::with_capacity(groups.len());
    for (position, (group, stats)) in positions().zip(groups.into_iter().zip(stats)) {
        let geometry = BoxGeometryBuilder::new(position)
            .width(opts.width)
            .box_width(opts.box_width)
            .style(style)
            .build(&stats, &mut jitter);
        debug!(
            label = %group.label,
            n = stats.n,
            outliers = stats.outliers.len(),
            position,
            "drawing box"
        );
        plots.push(MiniBoxPlot::draw(renderer, group.label, stats, geometry));
    }

    set_group_ticks(renderer, plots.iter().map(MiniBoxPlot::label));
    Ok(plots)
}

fn resolve_groups(input: &PlotInput, order: Option<&[String]>) -> Result<Vec<Group>> {
    let groups = extract_groups(input)?;
    match order {
        Some(order) => apply_group_order(groups, order),
        None => Ok(groups),
    }
}

/// Group positions 1, 2, 3, ...
fn positions() -> impl Iterator<Item = f64> {
    (1u32..).map(f64::from)
}

fn set_group_ticks<'a, R: Renderer + ?Sized>(
    renderer: &mut R,
    labels: impl Iterator<Item = &'a str>,
) {
    let labels: Vec<String> = labels.map(str::to_string).collect();
    let ticks: Vec<f64> = positions().take(labels.len()).collect();
    renderer.set_ticks(&ticks, &labels);
}
