use mensura_calc::{NoPrompt, Session, Settings, VariableStore};

fn convert(input: &str) -> String {
    let mut vars = VariableStore::new();
    let mut prompt = NoPrompt;
    let mut session = Session::new(&mut vars, &mut prompt, Settings::default());
    let result = session.execute(input).expect("expected a result");
    session.render(&result)
}

#[test]
fn temperature_both_directions() {
    assert_eq!(convert("25C::F"), "77F");
    assert_eq!(convert("77F::C"), "25C");
    assert_eq!(convert("-40F::C"), "-40C");
    assert_eq!(convert("-40C::F"), "-40F");
}

#[test]
fn colon_unit_override_feeds_conversion() {
    assert_eq!(convert("25:C::F"), "77F");
}

#[test]
fn length_conversions() {
    assert_eq!(convert("1in::cm"), "2.54cm");
    assert_eq!(convert("2.54cm::in"), "1in");
    assert_eq!(convert("100cm::m"), "1m");
    assert_eq!(convert("1mi::ft"), "5280ft");
    assert_eq!(convert("36in::yds"), "1yds");
    assert_eq!(convert("5km::mi"), "3.106855961mi");
}

#[test]
fn length_conversions_round_trip() {
    let keys = ["mm", "cm", "m", "km", "in", "ft", "yds", "mi"];
    for a in keys {
        for b in keys {
            if a == b {
                continue;
            }
            let mut vars = VariableStore::new();
            let mut prompt = NoPrompt;
            let mut session = Session::new(&mut vars, &mut prompt, Settings::default());
            let input = format!("12.5{a}::{b}::{a}");
            let out = session.execute(&input).expect("round trip result");
            assert!(
                (out.as_f64() - 12.5).abs() < 1e-9,
                "{input} came back as {}",
                out.as_f64()
            );
            assert_eq!(out.unit().key(), a, "{input} lost its unit");
        }
    }
}

#[test]
fn speed_conversions() {
    assert_eq!(convert("60mph::kph"), "96.56064kph");
}

#[test]
fn angle_conversions_route_through_pi() {
    assert_eq!(convert("pi::deg"), "180deg");
    assert_eq!(convert("pi/180::deg"), "1deg");
    assert_eq!(convert("2pi/180"), "0.034906585rad");
}

#[test]
fn plain_values_adopt_the_target_unit() {
    assert_eq!(convert("2::deg"), "2deg");
}

#[test]
fn converting_to_the_same_unit_is_a_no_op() {
    assert_eq!(convert("5cm::cm"), "5cm");
}

#[test]
fn category_mismatch_restores_operands() {
    let mut vars = VariableStore::new();
    let mut prompt = NoPrompt;
    let mut session = Session::new(&mut vars, &mut prompt, Settings::default());
    session.execute("25C::mm");
    assert!(session.messages().has_errors());
    // Source value and target carrier both survive for inspection.
    let stack = session.stack();
    assert_eq!(stack.len(), 2);
    assert_eq!(stack[0].unit().key(), "C");
    assert_eq!(stack[1].unit().key(), "mm");
}

#[test]
fn unknown_target_unit_fails_at_run_time() {
    let mut vars = VariableStore::new();
    let mut prompt = NoPrompt;
    let mut session = Session::new(&mut vars, &mut prompt, Settings::default());
    session.execute("25C::zz");
    assert!(session.messages().has_errors());
    // The source value survives the failed conversion.
    assert_eq!(session.stack()[0].unit().key(), "C");
}

#[test]
fn conversion_results_are_floating_point() {
    let mut vars = VariableStore::new();
    let mut prompt = NoPrompt;
    let mut session = Session::new(&mut vars, &mut prompt, Settings::default());
    let out = session.execute("25C::F").expect("result");
    assert!(out.is_float());
}
