use mensura_units::{find_conversion, find_unit, Category, Unit};

#[test]
fn spelling_aliases_share_a_key() {
    for (a, b) in [("D", "deg"), ("R", "rad"), ("degC", "C"), ("\"", "in")] {
        let ua = Unit::parse(a).expect(a);
        let ub = Unit::parse(b).expect(b);
        assert_eq!(ua, ub, "{a} and {b} should share a conversion key");
    }
}

#[test]
fn prefix_match_reports_consumed_length() {
    // "degC::F" should consume 4 characters, not stop at "deg".
    let (len, def) = find_unit("degC::F").unwrap();
    assert_eq!(len, 4);
    assert_eq!(def.category, Category::Temperature);

    // A trailing operator does not confuse the match.
    let (len, def) = find_unit("cm+2").unwrap();
    assert_eq!(len, 2);
    assert_eq!(def.key, "cm");
}

#[test]
fn conversions_stay_within_category() {
    assert!(find_conversion(Category::Angle, "deg", "rad").is_ok());
    // Same key strings under the wrong category must not match.
    assert!(find_conversion(Category::Length, "deg", "rad").is_err());
}

#[test]
fn angle_formulas_reference_pi() {
    let rule = find_conversion(Category::Angle, "deg", "rad").unwrap();
    assert!(rule.formula.contains("pi"));
}

#[test]
fn display_suffixes() {
    assert_eq!(Unit::parse("F").unwrap().display(), "F");
    assert_eq!(Unit::none().display(), "");
    assert_eq!(Unit::parse("Ang").unwrap().display(), "A");
}
