use approx::assert_relative_eq;
use plotfn::eval::{BoundExpression, CanonicalEquation, EvalError, evaluate, normalize, probe};

fn parse(text: &str) -> BoundExpression {
    let canonical = normalize(text).expect("normalize");
    BoundExpression::parse(&canonical).expect("parse")
}

#[test]
fn arithmetic_follows_standard_precedence() {
    assert_eq!(parse("2+3*4").eval_at(0.0).unwrap(), 14.0);
    assert_eq!(parse("(2+3)*4").eval_at(0.0).unwrap(), 20.0);
    assert_eq!(parse("10-4-3").eval_at(0.0).unwrap(), 3.0);
    assert_eq!(parse("7/2").eval_at(0.0).unwrap(), 3.5);
}

#[test]
fn power_is_right_associative_and_binds_tighter_than_negation() {
    assert_eq!(parse("2^3^2").eval_at(0.0).unwrap(), 512.0);
    assert_eq!(parse("-x^2").eval_at(3.0).unwrap(), -9.0);
    assert_eq!(parse("-2*x").eval_at(3.0).unwrap(), -6.0);
}

#[test]
fn variable_binding_is_symbolic() {
    let expr = parse("2x + 3");
    assert_eq!(expr.eval_at(5.0).unwrap(), 13.0);
    assert_eq!(expr.eval_at(-5.0).unwrap(), -7.0);
    // exp(x) contains the variable letter inside a function name; textual
    // substitution would corrupt it
    assert_relative_eq!(parse("exp(x)").eval_at(1.0).unwrap(), std::f64::consts::E);
}

#[test]
fn builtin_functions_evaluate() {
    assert_relative_eq!(parse("sin(0)").eval_at(0.0).unwrap(), 0.0);
    assert_relative_eq!(parse("cos(0)").eval_at(0.0).unwrap(), 1.0);
    assert_relative_eq!(parse("tan(0)").eval_at(0.0).unwrap(), 0.0);
    assert_relative_eq!(parse("sqrt(4)").eval_at(0.0).unwrap(), 2.0);
    assert_relative_eq!(parse("exp(0)").eval_at(0.0).unwrap(), 1.0);
    assert_relative_eq!(
        parse("asin(1)").eval_at(0.0).unwrap(),
        std::f64::consts::FRAC_PI_2
    );
    assert_relative_eq!(parse("acos(1)").eval_at(0.0).unwrap(), 0.0);
    assert_relative_eq!(
        parse("atan(1)").eval_at(0.0).unwrap(),
        std::f64::consts::FRAC_PI_4
    );
}

#[test]
fn log_is_the_natural_logarithm() {
    assert_relative_eq!(parse("log(e)").eval_at(0.0).unwrap(), 1.0);
    assert_relative_eq!(parse("log(10)").eval_at(0.0).unwrap(), 10.0_f64.ln());
}

#[test]
fn constants_pi_and_e_are_recognized() {
    assert_relative_eq!(parse("pi").eval_at(0.0).unwrap(), std::f64::consts::PI);
    assert_relative_eq!(parse("sin(pi)").eval_at(0.0).unwrap(), 0.0, epsilon = 1e-12);
    assert_relative_eq!(parse("log(e^2)").eval_at(0.0).unwrap(), 2.0, epsilon = 1e-12);
}

#[test]
fn domain_violations_are_typed_errors() {
    assert_eq!(
        parse("1/x").eval_at(0.0).unwrap_err(),
        EvalError::DivisionByZero
    );
    assert_eq!(
        parse("sqrt(x)").eval_at(-1.0).unwrap_err(),
        EvalError::OutOfDomain { function: "sqrt" }
    );
    assert_eq!(
        parse("asin(x)").eval_at(2.0).unwrap_err(),
        EvalError::OutOfDomain { function: "asin" }
    );
    assert_eq!(
        parse("log(x)").eval_at(0.0).unwrap_err(),
        EvalError::OutOfDomain { function: "log" }
    );
    assert_eq!(
        parse("log(x)").eval_at(-3.0).unwrap_err(),
        EvalError::OutOfDomain { function: "log" }
    );
}

#[test]
fn non_finite_results_are_reported_not_returned() {
    // a negative base with a fractional exponent has no real value
    assert_eq!(
        parse("(0-2)^0.5").eval_at(0.0).unwrap_err(),
        EvalError::NonFinite
    );
    // overflow to infinity
    assert_eq!(
        parse("exp(x)^x").eval_at(1000.0).unwrap_err(),
        EvalError::NonFinite
    );
}

#[test]
fn evaluation_never_panics_on_garbage() {
    let garbage = [
        "",
        " ",
        "==",
        "sin(",
        ")(",
        "2**x",
        "1.2.3",
        "x x",
        "unknownfn(x)",
        "#$%",
        "2 +",
        "sin",
        "sin x",
        "(((((",
    ];
    for text in garbage {
        let canonical = CanonicalEquation::from_canonical_text(text);
        assert!(
            evaluate(&canonical, 0.0).is_err(),
            "`{text}` should fail, not evaluate"
        );
    }
}

#[test]
fn pathological_nesting_degrades_to_an_error() {
    let deep = format!("{}x{}", "(".repeat(4000), ")".repeat(4000));
    let canonical = CanonicalEquation::from_canonical_text(deep);
    assert_eq!(evaluate(&canonical, 0.0).unwrap_err(), EvalError::TooDeep);

    let negs = format!("{}x", "-".repeat(4000));
    let canonical = CanonicalEquation::from_canonical_text(negs);
    assert_eq!(evaluate(&canonical, 0.0).unwrap_err(), EvalError::TooDeep);
}

#[test]
fn evaluation_is_deterministic() {
    let expr = parse("sin(x)*x^2 + sqrt(x+20)");
    let first = expr.eval_at(1.2345).unwrap();
    let second = expr.eval_at(1.2345).unwrap();
    assert_eq!(first.to_bits(), second.to_bits());
}

#[test]
fn probe_accepts_expressions_finite_at_zero() {
    assert!(probe(&parse("sqrt(x)")));
    assert!(probe(&parse("3")));
    assert!(probe(&parse("sin(x)/cos(x)")));
}

#[test]
fn probe_rejects_expressions_undefined_at_zero() {
    assert!(!probe(&parse("1/x")));
    assert!(!probe(&parse("log(x)")));
}
