mod common;

use common::{G, assert_close, cube_graph, cube_layout, isolated_nodes};
use narwhal::graphlib::{Graph, NodeId};
use narwhal::{
    CalibrationOptions, DEFAULT_NODE_DISTANCE, Error, Layout, Point, StressMode, compute_stress,
    compute_stress_fit_nodesep, compute_stress_fit_scale, evaluate, fit_nodesep_with,
    fit_scale_with,
};
use serde_json::json;

/// Two adjacent nodes 100 units apart.
fn single_edge() -> G {
    let mut g: G = Graph::new();
    g.set_edge("v1", "v2");
    g
}

fn single_edge_layout(g: &G) -> Layout<'_, (), ()> {
    Layout::from_fn(g, |v| Point::new(60.0 * v.index() as f64, 80.0 * v.index() as f64))
}

#[test]
fn modes_parse_and_print() {
    for mode in [StressMode::Fixed, StressMode::FitNodesep, StressMode::FitScale] {
        assert_eq!(mode.to_string().parse::<StressMode>().unwrap(), mode);
    }
    assert_eq!("fit-scale".parse::<StressMode>().unwrap(), StressMode::FitScale);
    assert_eq!(StressMode::default(), StressMode::Fixed);

    let err = "fit_scale".parse::<StressMode>().unwrap_err();
    assert!(matches!(err, Error::UnknownMode(ref s) if s == "fit_scale"));
    assert_eq!(err.to_string(), "unknown stress mode: fit_scale");
}

#[test]
fn modes_serialize_in_kebab_case() {
    assert_eq!(serde_json::to_value(StressMode::FitNodesep).unwrap(), json!("fit-nodesep"));
    let mode: StressMode = serde_json::from_value(json!("fixed")).unwrap();
    assert_eq!(mode, StressMode::Fixed);
}

#[test]
fn fixed_report() {
    let g = cube_graph();
    let layout = cube_layout(&g).scaled(DEFAULT_NODE_DISTANCE);
    let report = evaluate(&layout, StressMode::Fixed, &CalibrationOptions::default()).unwrap();
    let stress = compute_stress(&layout, DEFAULT_NODE_DISTANCE);
    assert_eq!(report.stress, stress);
    assert_eq!(report.to_json().unwrap(), json!({"stress": stress, "producer": "stress"}));
}

#[test]
fn scale_report() {
    let g = single_edge();
    let layout = single_edge_layout(&g);
    let opts = CalibrationOptions::default();
    let report = evaluate(&layout, StressMode::FitScale, &opts).unwrap();
    let fit = compute_stress_fit_scale(&layout);

    assert_eq!(report.stress, fit.y0);
    assert_eq!(report.scale, Some(fit.x0));
    assert_eq!(report.nodesep, None);
    assert_close(1e-10, 1.0, fit.x0);
    assert_eq!(
        report.to_json().unwrap(),
        json!({
            "stress": fit.y0,
            "scale": fit.x0,
            "polynomial": [fit.a, fit.b, fit.c],
            "producer": "stress",
        })
    );
}

#[test]
fn nodesep_report() {
    let g = cube_graph();
    let layout = cube_layout(&g).scaled(DEFAULT_NODE_DISTANCE);
    let report = evaluate(&layout, StressMode::FitNodesep, &CalibrationOptions::default()).unwrap();
    let fit = compute_stress_fit_nodesep(&layout);

    let value = report.to_json().unwrap();
    assert_eq!(value["nodesep"], json!(fit.x0));
    assert_eq!(value["polynomial"], json!(fit.polynomial()));
    assert!(value.get("scale").is_none());
    assert_eq!(value["producer"], "stress");
}

#[test]
fn graphs_without_edges_report_the_default_answer() {
    let g = isolated_nodes(4);
    let layout = Layout::from_fn(&g, |v| Point::new(v.index() as f64, 0.0));
    let opts = CalibrationOptions::default();
    for mode in [StressMode::FitNodesep, StressMode::FitScale] {
        let report = evaluate(&layout, mode, &opts).unwrap();
        assert_eq!(report.stress, 0.0);
        assert_eq!(report.polynomial, Some([0.0, 0.0, 0.0]));
    }
    let report = evaluate(&layout, StressMode::FitNodesep, &opts).unwrap();
    assert_eq!(report.nodesep, Some(DEFAULT_NODE_DISTANCE));
}

#[test]
fn evaluation_rejects_non_finite_layouts() {
    let g = single_edge();
    let mut layout = single_edge_layout(&g);
    layout.set_position(NodeId::from_index(1), Point::new(f64::NAN, 0.0));
    for mode in [StressMode::Fixed, StressMode::FitNodesep, StressMode::FitScale] {
        let err = evaluate(&layout, mode, &CalibrationOptions::default()).unwrap_err();
        assert!(matches!(err, Error::NonFiniteCoordinates { .. }), "{err}");
    }
}

#[test]
fn lenient_fits_return_implausible_results() {
    // Stress at the probes is 81, 1 and 0; the interpolant dips below zero.
    let g = single_edge();
    let layout = single_edge_layout(&g);
    let fit = fit_nodesep_with(&layout, &CalibrationOptions::default()).unwrap();
    assert!(fit.y0 < 0.0);
    assert_eq!(fit, compute_stress_fit_nodesep(&layout));
}

#[test]
fn strict_fits_reject_implausible_results() {
    let g = single_edge();
    let layout = single_edge_layout(&g);
    let opts = CalibrationOptions {
        strict: true,
        ..Default::default()
    };
    let err = fit_nodesep_with(&layout, &opts).unwrap_err();
    match &err {
        Error::ImplausibleFit { issues, .. } => {
            assert!(issues.contains("y0 is negative"), "{issues}");
            assert!(issues.contains("f(x0) != y0"), "{issues}");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(evaluate(&layout, StressMode::FitNodesep, &opts).is_err());

    // The scale fit of the same layout is exact and passes.
    let fit = fit_scale_with(&layout, &opts).unwrap();
    assert_close(1e-10, 1.0, fit.x0);
}

#[test]
fn custom_probes_are_used() {
    let g = single_edge();
    let layout = single_edge_layout(&g);
    let opts = CalibrationOptions {
        scale_probes: [0.25, 2.0, 4.0],
        ..Default::default()
    };
    let fit = fit_scale_with(&layout, &opts).unwrap();
    assert_close(1e-9, 1.0, fit.x0);
    assert_close(1e-9, 0.0, fit.y0);
}

#[test]
fn invalid_options_are_rejected() {
    let g = single_edge();
    let layout = single_edge_layout(&g);
    let bad = [
        CalibrationOptions {
            nodesep_probes: [0.5, 0.5, 1.0],
            ..Default::default()
        },
        CalibrationOptions {
            scale_probes: [0.0, 1.0, 2.0],
            ..Default::default()
        },
        CalibrationOptions {
            scale_probes: [f64::NAN, 1.0, 2.0],
            ..Default::default()
        },
    ];
    for opts in &bad {
        assert!(matches!(
            evaluate(&layout, StressMode::FitScale, opts),
            Err(Error::InvalidOptions(_))
        ));
    }
}

#[test]
fn options_deserialize_with_defaults() {
    let opts: CalibrationOptions = serde_json::from_value(json!({"strict": true})).unwrap();
    assert!(opts.strict);
    assert_eq!(opts.nodesep_probes, CalibrationOptions::default().nodesep_probes);

    let opts: CalibrationOptions =
        serde_json::from_value(json!({"scale_probes": [0.8, 1.0, 1.25]})).unwrap();
    assert_eq!(opts.scale_probes, [0.8, 1.0, 1.25]);
    assert!(!opts.strict);
}
