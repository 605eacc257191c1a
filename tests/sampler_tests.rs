use plotfn::core::{Domain, SampleIter, sample};
use plotfn::eval::{BoundExpression, normalize};

fn expr(text: &str) -> BoundExpression {
    let canonical = normalize(text).expect("normalize");
    BoundExpression::parse(&canonical).expect("parse")
}

#[test]
fn constant_curve_covers_the_whole_domain() {
    let domain = Domain::new(-10.0, 10.0, 0.1).expect("valid domain");
    let points = sample(&expr("3"), domain);

    assert_eq!(points.len(), 201);
    assert!(points.iter().all(|point| point.y == 3.0));
}

#[test]
fn emitted_x_is_strictly_increasing() {
    let domain = Domain::new(-10.0, 10.0, 0.1).expect("valid domain");
    let points = sample(&expr("sin(x)*x"), domain);

    assert_eq!(points.len(), 201);
    for pair in points.windows(2) {
        assert!(pair[0].x < pair[1].x);
    }
}

#[test]
fn every_emitted_point_is_finite() {
    let domain = Domain::new(-10.0, 10.0, 0.1).expect("valid domain");
    for text in ["1/x", "sqrt(x)", "log(x)", "tan(x)"] {
        let points = sample(&expr(text), domain);
        assert!(
            points.iter().all(|point| point.is_finite()),
            "`{text}` leaked a non-finite point"
        );
    }
}

#[test]
fn pole_positions_are_dropped_and_the_pass_continues() {
    // step 0.5 is exactly representable, so x = 0 is hit exactly
    let domain = Domain::new(-1.0, 1.0, 0.5).expect("valid domain");
    let points = sample(&expr("1/x"), domain);

    let xs: Vec<f64> = points.iter().map(|point| point.x).collect();
    assert_eq!(xs, vec![-1.0, -0.5, 0.5, 1.0]);
}

#[test]
fn out_of_domain_prefix_is_filtered() {
    let domain = Domain::new(-10.0, 10.0, 0.1).expect("valid domain");
    let points = sample(&expr("sqrt(x)"), domain);

    // only the nonnegative half of the domain survives
    assert_eq!(points.len(), 101);
    assert!(points.iter().all(|point| point.x >= -1e-9));
}

#[test]
fn everywhere_undefined_expression_yields_an_empty_curve() {
    let domain = Domain::new(-10.0, 10.0, 0.1).expect("valid domain");
    assert!(sample(&expr("sqrt(-1-x^2)"), domain).is_empty());
    assert!(sample(&expr("log(0-1)"), domain).is_empty());
}

#[test]
fn fractional_span_keeps_both_endpoints() {
    let domain = Domain::new(0.0, 1.0, 0.1).expect("valid domain");
    let points = sample(&expr("2*x"), domain);

    assert_eq!(points.len(), 11);
    assert_eq!(points[0].x, 0.0);
    assert!((points[10].x - 1.0).abs() < 1e-9);
}

#[test]
fn iteration_is_restartable_and_deterministic() {
    let domain = Domain::new(-5.0, 5.0, 0.25).expect("valid domain");
    let expression = expr("sin(x)/x");

    let first: Vec<_> = SampleIter::new(expression.clone(), domain).collect();
    let second: Vec<_> = SampleIter::new(expression, domain).collect();
    assert_eq!(first, second);
}

#[test]
fn cursor_tracks_the_next_index() {
    let domain = Domain::new(0.0, 1.0, 0.1).expect("valid domain");
    let mut iter = SampleIter::new(expr("x"), domain);
    assert_eq!(iter.position(), 0);

    let _ = iter.next();
    assert_eq!(iter.position(), 1);

    let drained: Vec<_> = iter.by_ref().collect();
    assert_eq!(drained.len(), 10);
    assert_eq!(iter.position(), 11);
}

#[cfg(feature = "parallel-sampling")]
#[test]
fn parallel_sampling_matches_sequential_order() {
    use plotfn::core::sample_parallel;

    let domain = Domain::new(-10.0, 10.0, 0.01).expect("valid domain");
    let expression = expr("sin(x)*x^2");
    assert_eq!(
        sample_parallel(&expression, domain),
        sample(&expression, domain)
    );
}
