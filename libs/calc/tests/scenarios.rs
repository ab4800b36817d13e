use mensura_calc::{Angle, NoPrompt, Number, Session, Settings, VariableStore};

fn run_with(settings: Settings, input: &str) -> (String, Number) {
    let mut vars = VariableStore::new();
    let mut prompt = NoPrompt;
    let mut session = Session::new(&mut vars, &mut prompt, settings);
    let result = session.execute(input).expect("expected a result");
    (session.render(&result), result)
}

fn run(input: &str) -> String {
    run_with(Settings::default(), input).0
}

#[test]
fn greedy_binding_has_no_precedence() {
    assert_eq!(run("2+3*4"), "20");
    assert_eq!(run("2*3+4"), "10");
}

#[test]
fn float_results_display_clean() {
    let (text, result) = run_with(Settings::default(), "30/5.0");
    assert_eq!(text, "6");
    assert!(result.is_float());
}

#[test]
fn integer_division_promotes_on_remainder() {
    let (text, result) = run_with(Settings::default(), "30/5");
    assert_eq!(text, "6");
    assert!(result.is_int());

    let (text, result) = run_with(Settings::default(), "7/2");
    assert_eq!(text, "3.5");
    assert!(result.is_float());

    let (text, _) = run_with(Settings::default(), "32/5");
    assert_eq!(text, "6.4");
}

#[test]
fn leading_signs_on_literals() {
    assert_eq!(run("45--6"), "51");
    assert_eq!(run("1+-2"), "-1");
    assert_eq!(run("-5*-6"), "30");
    assert_eq!(run("-4.2+1"), "-3.2");
}

#[test]
fn adjacency_multiplies() {
    assert_eq!(run("3.4 5.3"), "18.02");
    assert_eq!(run("2pi/180"), "0.034906585rad");
}

#[test]
fn grouped_subexpressions_run_first() {
    // Left-to-right: the group's value applies to the subtraction, then
    // the product: (4 - 0.5/7) * 14.
    assert_eq!(run("4-(.5/7)*14"), "55");
    assert_eq!(run("6.*(9-1)/inv(10.0+2)-4.2"), "571.8");
}

#[test]
fn power_root_and_modulo() {
    assert_eq!(run("2^10"), "1024");
    assert_eq!(run("8\\3"), "2");
    assert_eq!(run("7%3"), "1");
    assert_eq!(run("3 max 7"), "7");
    assert_eq!(run("3 min 7"), "3");
}

#[test]
fn hex_literals() {
    assert_eq!(run("0x5A"), "0x5A");
    // Arithmetic results render in decimal; only the literal keeps its
    // hex display format.
    assert_eq!(run("0x5A*0x48"), "6480");
}

#[test]
fn hex_literals_reject_unit_suffixes() {
    let mut vars = VariableStore::new();
    let mut prompt = NoPrompt;
    let mut session = Session::new(&mut vars, &mut prompt, Settings::default());
    // The literal ends at the hex digits; the dangling ":sec" cannot
    // parse as anything.
    assert!(session.execute("0x10:sec").is_none());
    assert!(session.messages().has_errors());
}

#[test]
fn trig_defaults_to_degrees() {
    assert_eq!(run("30 sin"), "0.5");
    assert_eq!(run("60 cos"), "0.5");
    assert_eq!(run("45 tan"), "1");
}

#[test]
fn trig_honors_explicit_radians() {
    // An explicit rad unit skips the degree conversion.
    assert_eq!(run("pi/6 sin"), "0.5");
}

#[test]
fn trig_with_radian_default() {
    let settings = Settings {
        angle: Angle::Radians,
        ..Settings::default()
    };
    let (text, _) = run_with(settings, "pi/6 sin");
    assert_eq!(text, "0.5");
}

#[test]
fn arc_functions_answer_in_the_default_angle() {
    assert_eq!(run("0.5 asin"), "30deg");

    let settings = Settings {
        angle: Angle::Radians,
        ..Settings::default()
    };
    let (text, result) = run_with(settings, "1 atan");
    assert_eq!(text, "0.785398163rad");
    assert!(result.unit().is_rad());
}

#[test]
fn unary_math() {
    assert_eq!(run("2 sqrt"), "1.414213562");
    assert_eq!(run("5 sqr"), "25");
    assert_eq!(run("-7 abs"), "7");
    assert_eq!(run("4 neg"), "-4");
    assert_eq!(run("8.0 inv"), "0.125");
    assert_eq!(run("3 exp2"), "8");
    assert_eq!(run("2 exp10"), "100");
    assert_eq!(run("100.0 log10"), "2");
    assert_eq!(run("2.7 floor"), "2");
    assert_eq!(run("2.3 ceil"), "3");
    assert_eq!(run("2.25 frac"), "0.25");
}

#[test]
fn swap_reorders_the_stack() {
    let mut vars = VariableStore::new();
    let mut prompt = NoPrompt;
    let mut session = Session::new(&mut vars, &mut prompt, Settings::default());
    session.execute("10");
    session.execute("2");
    let out = session.execute("swap /").expect("result");
    assert_eq!(session.render(&out), "0.2");
}

#[test]
fn division_by_zero_reports_and_keeps_operands() {
    let mut vars = VariableStore::new();
    let mut prompt = NoPrompt;
    let mut session = Session::new(&mut vars, &mut prompt, Settings::default());
    assert!(session.execute("1/0").is_some());
    assert!(session.messages().has_errors());
    assert_eq!(session.stack().len(), 2);
}

#[test]
fn unimplemented_operator_fails_at_run_time() {
    let mut vars = VariableStore::new();
    let mut prompt = NoPrompt;
    let mut session = Session::new(&mut vars, &mut prompt, Settings::default());
    session.execute("1,2");
    assert!(session.messages().has_errors());
}
