//! Integration tests for the grouped plot entry points.
//!
//! Covers input dispatch, tick labelling, palette handling, post-hoc
//! restyling and all-or-nothing failure.

#![allow(clippy::unwrap_used, clippy::float_cmp, missing_docs)]

use approx::assert_relative_eq;

use violin_viz::color::DEFAULT_PALETTE;
use violin_viz::data::extract_groups;
use violin_viz::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("violin_viz=debug")
        .with_test_writer()
        .try_init();
}

fn labels(canvas: &Canvas) -> Vec<&str> {
    canvas.tick_labels().iter().map(String::as_str).collect()
}

fn markers(canvas: &Canvas, handle: Handle) -> Markers {
    match canvas.get(handle).unwrap() {
        Primitive::Markers(m) => m.clone(),
        other => panic!("expected markers, got {}", other.kind()),
    }
}

// ============================================================================
// Input dispatch
// ============================================================================

#[test]
fn test_category_groups_in_label_order() {
    init_tracing();
    let input = PlotInput::categorical(&[1.0, 2.0, 10.0, 20.0], &["a", "a", "b", "b"]);
    let groups = extract_groups(&input).unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].label, "a");
    assert_eq!(groups[0].sample, vec![1.0, 2.0]);
    assert_eq!(groups[1].label, "b");
    assert_eq!(groups[1].sample, vec![10.0, 20.0]);

    let mut canvas = Canvas::new();
    let violins = violinplot(&mut canvas, &input, &ViolinOptions::new().seed(1)).unwrap();
    assert_eq!(violins.len(), 2);
    assert_eq!(labels(&canvas), vec!["a", "b"]);
    assert_eq!(canvas.tick_positions(), &[1.0, 2.0]);
}

#[test]
fn test_numeric_categories_sort_numerically() {
    let input = PlotInput::categorical(&[1.0, 2.0, 3.0, 4.0], &[10.0, 2.0, 10.0, 2.0]);
    let mut canvas = Canvas::new();
    violinplot(&mut canvas, &input, &ViolinOptions::new().seed(1)).unwrap();
    assert_eq!(labels(&canvas), vec!["2", "10"]);
}

#[test]
fn test_matrix_columns_become_groups() {
    let matrix = Matrix::from_rows(&[vec![1.0, 10.0], vec![2.0, 20.0], vec![3.0, 30.0]]).unwrap();
    let mut canvas = Canvas::new();
    let input = PlotInput::matrix(matrix.clone());
    let violins = violinplot(&mut canvas, &input, &ViolinOptions::new().seed(1)).unwrap();
    assert_eq!(violins.len(), 2);
    assert_eq!(labels(&canvas), vec!["1", "2"]);
    assert_relative_eq!(violins[1].stats().median, 20.0);

    let mut canvas = Canvas::new();
    violinplot(
        &mut canvas,
        &PlotInput::named_matrix(matrix, &["low", "high"]),
        &ViolinOptions::new().seed(1),
    )
    .unwrap();
    assert_eq!(labels(&canvas), vec!["low", "high"]);
}

#[test]
fn test_table_numeric_columns_only() {
    let table = Table::new()
        .numeric("height", &[1.6, 1.7, 1.8, 1.75])
        .text("name", &["a", "b", "c", "d"])
        .numeric("weight", &[60.0, 72.0, 80.0, 68.0]);
    let mut canvas = Canvas::new();
    let plots = boxplot(&mut canvas, &PlotInput::from(table), &BoxOptions::new().seed(4)).unwrap();
    assert_eq!(plots.len(), 2);
    assert_eq!(labels(&canvas), vec!["height", "weight"]);
}

#[test]
fn test_nan_values_are_filtered() {
    let input = PlotInput::vector(&[1.0, f64::NAN, 2.0, 3.0, f64::NAN]);
    let mut canvas = Canvas::new();
    let violins = violinplot(&mut canvas, &input, &ViolinOptions::new().seed(1)).unwrap();
    assert_eq!(violins[0].stats().n, 3);
    assert_relative_eq!(violins[0].stats().median, 2.0);
}

// ============================================================================
// Statistics surface
// ============================================================================

#[test]
fn test_one_to_ten_reference_values() {
    let data: Vec<f64> = (1..=10).map(f64::from).collect();
    let mut canvas = Canvas::new();
    let input = PlotInput::vector(&data);
    let violins = violinplot(&mut canvas, &input, &ViolinOptions::new().seed(1)).unwrap();
    let stats = violins[0].stats();
    let q = stats.quartiles.unwrap();
    assert_relative_eq!(q.q1, 3.25);
    assert_relative_eq!(q.q2, 5.5);
    assert_relative_eq!(q.q3, 7.75);
    assert_relative_eq!(stats.iqr().unwrap(), 4.5);
    assert_eq!(stats.whiskers.unwrap().bounds(), Some((1.0, 10.0)));
    assert!(stats.outliers.is_empty());

    let density = violins[0].density().unwrap();
    assert_eq!(density.values()[0], 1.0);
    assert_eq!(*density.values().last().unwrap(), 10.0);
}

#[test]
fn test_values_on_fences_are_outliers() {
    let mut canvas = Canvas::new();
    let input = PlotInput::vector(&[-3.0, 0.0, 1.0, 2.0, 5.0]);
    let plots = boxplot(&mut canvas, &input, &BoxOptions::new().seed(1)).unwrap();
    let stats = plots[0].stats();
    assert_eq!(stats.whiskers.unwrap().bounds(), Some((0.0, 2.0)));
    assert_eq!(stats.outliers, vec![-3.0, 5.0]);
}

#[test]
fn test_infinite_values_do_not_panic() {
    init_tracing();
    let mut canvas = Canvas::new();
    let input = PlotInput::vector(&[f64::NEG_INFINITY, 0.0, 1.0, 2.0, f64::INFINITY]);
    let violins = violinplot(&mut canvas, &input, &ViolinOptions::new().seed(1)).unwrap();
    assert_eq!(violins[0].stats().outliers, vec![f64::NEG_INFINITY, f64::INFINITY]);
    assert_eq!(violins[0].handles().len(), canvas.len());
}

#[test]
fn test_single_value_group_renders_point() {
    let input = PlotInput::categorical(&[1.0, 2.0, 3.0, 7.0], &["a", "a", "a", "b"]);
    let mut canvas = Canvas::new();
    let violins = violinplot(&mut canvas, &input, &ViolinOptions::new().seed(1)).unwrap();
    assert!(violins[1].density().is_none());
    assert_eq!(violins[1].handles().len(), 1);
    let point = markers(&canvas, violins[1].handles()[0]);
    assert_eq!(point.points, vec![Point::new(2.0, 7.0)]);
}

// ============================================================================
// Styling
// ============================================================================

#[test]
fn test_box_color_restyle_leaves_median_elements() {
    let data = [-30.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 40.0];
    let mut canvas = Canvas::new();
    let opts = BoxOptions::new().show_notches(true).seed(8);
    let mut plots = boxplot(&mut canvas, &PlotInput::vector(&data), &opts).unwrap();
    let plot = &mut plots[0];

    plot.set_box_color(&mut canvas, Rgb::RED).unwrap();

    let geometry = plot.geometry();
    let b = geometry.box_patch.as_ref().unwrap();
    assert_eq!((b.face, b.edge), (Rgb::RED, Rgb::RED));
    assert_eq!(geometry.whisker.as_ref().unwrap().color, Rgb::RED);
    assert_eq!(geometry.outliers.as_ref().unwrap().edge, Some(Rgb::RED));
    let (lo, hi) = geometry.notches.as_ref().unwrap();
    assert_eq!((lo.face, hi.face), (Some(Rgb::RED), Some(Rgb::RED)));

    assert_eq!(geometry.median.as_ref().unwrap().face, Some(Rgb::WHITE));
    assert_eq!((lo.edge, hi.edge), (Some(Rgb::WHITE), Some(Rgb::WHITE)));

    for (handle, primitive) in plot.handles().iter().zip(geometry.primitives()) {
        assert_eq!(canvas.get(*handle).unwrap(), &primitive);
    }
}

#[test]
fn test_restyle_never_recomputes() {
    let data = [2.0, 4.0, 4.5, 5.0, 7.0, 9.0];
    let mut canvas = Canvas::new();
    let input = PlotInput::vector(&data);
    let mut violins = violinplot(&mut canvas, &input, &ViolinOptions::new().seed(2)).unwrap();
    let before_stats = violins[0].stats().clone();
    let before_scatter = violins[0].geometry().scatter.as_ref().unwrap().points.clone();

    let violin = &mut violins[0];
    violin.set_violin_color(&mut canvas, Rgb::BLUE).unwrap();
    violin.set_edge_color(&mut canvas, Rgb::BLACK).unwrap();
    violin.set_show_data(&mut canvas, false).unwrap();
    violin.set_show_notches(&mut canvas, true).unwrap();
    violin.set_median_color(&mut canvas, Rgb::GREEN).unwrap();

    assert_eq!(violin.stats(), &before_stats);
    let scatter = violin.geometry().scatter.as_ref().unwrap();
    assert_eq!(scatter.points, before_scatter);
    assert!(!scatter.visible);
    assert_eq!(scatter.face, Some(Rgb::BLUE));
    assert_eq!(violin.edge_color(), Rgb::BLACK);
    assert_eq!(violin.median_color(), Rgb::GREEN);
    assert!(violin.geometry().boxplot.notches.as_ref().unwrap().0.visible);
}

#[test]
fn test_palette_is_deterministic() {
    let input = PlotInput::categorical(&[1.0, 2.0, 3.0, 4.0], &["a", "a", "b", "b"]);
    let colors = |canvas: &mut Canvas| -> Vec<Rgb> {
        violinplot(canvas, &input, &ViolinOptions::new().seed(1))
            .unwrap()
            .iter()
            .map(Violin::violin_color)
            .collect()
    };

    let first = colors(&mut Canvas::new());
    let second = colors(&mut Canvas::new());
    assert_eq!(first, second);
    assert_eq!(first, DEFAULT_PALETTE[..2].to_vec());

    let mut shared = Canvas::new();
    colors(&mut shared);
    assert_eq!(colors(&mut shared), DEFAULT_PALETTE[2..4].to_vec());
}

#[test]
fn test_seed_reproduces_jitter() {
    let data: Vec<f64> = (0..40).map(|i| f64::from(i % 7) * 1.5).collect();
    let input = PlotInput::vector(&data);
    let run = |seed| {
        let mut canvas = Canvas::new();
        let violins = violinplot(&mut canvas, &input, &ViolinOptions::new().seed(seed)).unwrap();
        violins[0].geometry().scatter.as_ref().unwrap().points.clone()
    };
    assert_eq!(run(5), run(5));
    assert_ne!(run(5), run(6));
}

#[test]
fn test_parsed_options_drive_plot() {
    let opts =
        parse_options("Width=0.4 ViolinColor=[0,0,1] ShowMean=true ShowData=false Seed=3").unwrap();
    let mut canvas = Canvas::new();
    let input = PlotInput::vector(&[1.0, 2.0, 2.0, 3.0, 8.0]);
    let violins = violinplot(&mut canvas, &input, &opts).unwrap();
    let geometry = violins[0].geometry();
    assert_relative_eq!(geometry.silhouette.as_ref().unwrap().width(), 0.8, epsilon = 1e-9);
    assert!(geometry.mean.as_ref().unwrap().visible);
    assert!(!geometry.scatter.as_ref().unwrap().visible);
    assert_eq!(violins[0].violin_color(), Rgb::BLUE);
}

// ============================================================================
// Failure handling
// ============================================================================

#[test]
fn test_errors_render_nothing() {
    init_tracing();
    let mut canvas = Canvas::new();
    let cases = [
        (PlotInput::categorical(&[1.0, 2.0], &["a"]), ViolinOptions::new()),
        (PlotInput::vector(&[f64::NAN, f64::NAN]), ViolinOptions::new()),
        (PlotInput::vector(&[]), ViolinOptions::new()),
        (PlotInput::vector(&[1.0, 2.0]), ViolinOptions::new().width(0.0)),
        (PlotInput::vector(&[1.0, 2.0]), ViolinOptions::new().group_order(&["x"])),
        (
            PlotInput::categorical(&[1.0, 2.0, f64::NAN, f64::NAN], &["a", "a", "b", "b"]),
            ViolinOptions::new().seed(1),
        ),
    ];
    for (input, opts) in &cases {
        assert!(violinplot(&mut canvas, input, opts).is_err());
        assert!(canvas.is_empty());
        assert!(canvas.tick_labels().is_empty());
    }
    assert_eq!(canvas.next_color(), DEFAULT_PALETTE[0]);
}

#[test]
fn test_error_kinds() {
    let mut canvas = Canvas::new();
    let mismatched = PlotInput::categorical(&[1.0], &["a", "b"]);
    let shape = violinplot(&mut canvas, &mismatched, &ViolinOptions::new());
    assert!(matches!(shape, Err(Error::ShapeMismatch { expected: 1, actual: 2, .. })));

    let empty = violinplot(&mut canvas, &PlotInput::vector(&[f64::NAN]), &ViolinOptions::new());
    assert!(matches!(empty, Err(Error::EmptySample { .. })));

    let config = parse_options("ShowNotches=maybe");
    assert!(matches!(config, Err(Error::Configuration(_))));
}
