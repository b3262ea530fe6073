//! Tests for option derivation from signatures

use rstest::rstest;

use cmdr::{build_options, NamingConfig, OptionKind, Signature, Value, ValueType};

#[ctor::ctor]
fn init() {
    cmdr::util::testing::init_test_setup();
}

fn derive_one(default: Option<Value>) -> OptionKind {
    let sig = match default {
        Some(value) => Signature::new().arg_default("alpha", value),
        None => Signature::new().arg("alpha"),
    };
    build_options(&sig, false, &NamingConfig::default())[0].kind
}

#[rstest]
#[case(None, OptionKind::Typed(ValueType::Str))]
#[case(Some(Value::Bool(false)), OptionKind::Switch)]
#[case(Some(Value::Bool(true)), OptionKind::NegatedSwitch)]
#[case(Some(Value::Int(7)), OptionKind::Typed(ValueType::Int))]
#[case(Some(Value::Float(0.5)), OptionKind::Typed(ValueType::Float))]
#[case(Some(Value::str("x")), OptionKind::Typed(ValueType::Str))]
#[case(Some(Value::None), OptionKind::Typed(ValueType::Str))]
#[case(Some(Value::list(Vec::<String>::new())), OptionKind::ListAppend)]
fn given_default_value_when_building_then_kind_follows_type(
    #[case] default: Option<Value>,
    #[case] expected: OptionKind,
) {
    assert_eq!(derive_one(default), expected);
}

#[test]
fn given_true_default_when_building_then_flag_is_negated() {
    // Arrange
    let sig = Signature::new().arg_default("caps_lock", Value::Bool(true));

    // Act
    let specs = build_options(&sig, false, &NamingConfig::default());

    // Assert
    assert_eq!(specs[0].flag_base, "no_caps_lock");
    assert_eq!(specs[0].canonical(), "no-caps-lock");
    assert_eq!(specs[0].spellings.hidden, vec!["no_caps_lock"]);
}

#[test]
fn given_required_param_when_building_then_no_default_is_carried() {
    let sig = Signature::new().arg("name");
    let specs = build_options(&sig, false, &NamingConfig::default());
    assert!(specs[0].required());
    assert_eq!(specs[0].kind, OptionKind::Typed(ValueType::Str));
}

#[test]
fn given_greet_signature_when_building_then_short_letters_assign_in_order() {
    // Arrange: the classic greet signature.
    let sig = Signature::new()
        .arg("name")
        .arg_default("title", Value::str("Mr."))
        .arg_default("times", Value::Int(1))
        .arg_default("comma", Value::Bool(false))
        .arg_default("caps_lock", Value::Bool(false));

    // Act
    let specs = build_options(&sig, false, &NamingConfig::default());
    let shorts: Vec<Option<char>> = specs.iter().map(|s| s.short).collect();

    // Assert: 'h' is reserved; 'times' loses 't' to 'title' and falls back
    // to 'T'; 'caps_lock' loses 'c' to 'comma' and falls back to 'C'.
    assert_eq!(
        shorts,
        vec![Some('n'), Some('t'), Some('T'), Some('c'), Some('C')]
    );
}

#[test]
fn given_h_initial_param_when_building_then_help_letter_stays_reserved() {
    let sig = Signature::new().arg("host").arg("handle");
    let specs = build_options(&sig, false, &NamingConfig::default());
    assert_eq!(specs[0].short, Some('H'));
    assert_eq!(specs[1].short, None);
}

#[test]
fn given_single_letter_param_when_building_then_that_letter_is_blocked() {
    // A parameter whose full name is one letter blocks that candidate for
    // every parameter, itself included.
    let sig = Signature::new().arg("t").arg("title");
    let specs = build_options(&sig, false, &NamingConfig::default());
    assert_eq!(specs[0].short, Some('T'));
    assert_eq!(specs[1].short, None);
}

#[test]
fn given_show_all_variants_when_building_then_both_spellings_visible() {
    let naming = NamingConfig {
        hyphenate: true,
        show_all_variants: true,
    };
    let sig = Signature::new().arg_default("caps_lock", Value::Bool(false));
    let specs = build_options(&sig, false, &naming);
    assert_eq!(specs[0].spellings.visible, vec!["caps-lock", "caps_lock"]);
    assert!(specs[0].spellings.hidden.is_empty());
}

#[test]
fn given_ignore_self_when_building_then_self_param_disappears() {
    let sig = Signature::new().arg("self").arg("name");
    let specs = build_options(&sig, true, &NamingConfig::default());
    let params: Vec<&str> = specs.iter().map(|s| s.param.as_str()).collect();
    assert_eq!(params, vec!["name"]);
}
