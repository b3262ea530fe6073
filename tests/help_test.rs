//! Tests for help text rendering

use cmdr::{
    help, BoundArgs, CommandDef, Commandr, FnHandler, Registry, RunConfig, Signature, UsageError,
    Value,
};

#[ctor::ctor]
fn init() {
    cmdr::util::testing::init_test_setup();
}

fn argv(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|s| s.to_string()).collect()
}

fn command(name: &str, signature: Signature) -> CommandDef {
    CommandDef::new(
        name,
        FnHandler::new(signature, |_: &BoundArgs| Ok::<_, UsageError>(None)),
    )
}

fn greet_signature() -> Signature {
    Signature::new()
        .arg("name")
        .arg_default("title", Value::str("Mr."))
        .arg_default("times", Value::Int(1))
        .arg_default("caps_lock", Value::Bool(false))
}

#[test]
fn given_same_state_when_rendering_twice_then_output_is_identical() {
    // Arrange
    let mut registry = Registry::new();
    registry
        .register(command("greet", greet_signature()).docs("Greet someone."))
        .unwrap();
    let cli = Commandr::new(registry);

    // Act
    let first = cli.dispatch(&argv(&["greet", "-h"]));
    let second = cli.dispatch(&argv(&["greet", "-h"]));

    // Assert
    assert_eq!(first.output, second.output);
    assert_eq!(first.code, second.code);
}

#[test]
fn given_command_help_then_docs_are_framed_and_usage_follows() {
    let mut registry = Registry::new();
    registry
        .register(
            command("greet", greet_signature())
                .docs("Greet someone.\n\nArguments:\n  name - Name to greet."),
        )
        .unwrap();
    let cli = Commandr::new(registry);

    let output = cli.dispatch(&argv(&["greet", "-h"])).output;

    assert!(output.contains("Documentation for command 'greet':"));
    assert!(output.contains("----------------------------------------"));
    assert!(output.contains("Arguments:"));
    assert!(output.contains("Usage: greet [options] [args]"));
    assert!(output.contains("[default: \"Mr.\"]"));
    assert!(output.contains("[default: 1]"));
    assert!(output.contains("Options without default values MUST be specified"));
}

#[test]
fn given_no_docs_then_notice_replaces_documentation_block() {
    let mut registry = Registry::new();
    registry
        .register(command("bare", Signature::new()))
        .unwrap();
    let cli = Commandr::new(registry);

    let output = cli.dispatch(&argv(&["bare", "-h"])).output;
    assert!(output.contains("No documentation for command 'bare'."));
    assert!(!output.contains("----------------------------------------"));
}

#[test]
fn given_hidden_spelling_then_it_is_absent_from_help() {
    // Arrange: 'caps_lock' gets a hidden underscore alias by default.
    let mut registry = Registry::new();
    registry
        .register(command("greet", greet_signature()))
        .unwrap();
    let cli = Commandr::new(registry);

    // Act
    let output = cli.dispatch(&argv(&["greet", "-h"])).output;

    // Assert
    assert!(output.contains("--caps-lock"));
    assert!(!output.contains("caps_lock"));
}

#[test]
fn given_show_all_variants_then_both_spellings_appear() {
    let mut registry = Registry::new();
    registry
        .register(command("greet", greet_signature()))
        .unwrap();
    let cli =
        Commandr::new(registry).with_config(RunConfig::default().show_all_variants(true));

    let output = cli.dispatch(&argv(&["greet", "-h"])).output;
    assert!(output.contains("--caps-lock"));
    assert!(output.contains("caps_lock"));
}

#[test]
fn given_categories_and_main_then_global_listing_groups_and_brackets() {
    // Arrange
    let mut registry = Registry::new();
    registry
        .register(command("serve", Signature::new()).docs("Run the server.").main())
        .unwrap();
    registry
        .register(
            command("pull", Signature::new())
                .category("Sync")
                .docs("Pull remote state.\n\nDetails follow."),
        )
        .unwrap();
    let cli = Commandr::new(registry);

    // Act
    let output = cli.dispatch(&argv(&["nope"])).output;

    // Assert: General first, main bracketed, first paragraph as summary.
    assert!(output.starts_with("Unknown command 'nope'"));
    let general = output.find("General Commands:").expect("general group");
    let sync = output.find("Sync Commands:").expect("sync group");
    assert!(general < sync);
    assert!(output.contains("  [serve] - Run the server."));
    assert!(output.contains("  pull - Pull remote state."));
    assert!(!output.contains("Details follow."));
}

#[test]
fn given_banner_config_then_global_help_leads_with_it() {
    let mut registry = Registry::new();
    registry.register(command("serve", Signature::new())).unwrap();

    let config = RunConfig::default().docs("mytool 1.0 - Copyright Example Corp");
    let cli = Commandr::new(registry).with_config(config.clone());
    let output = cli.dispatch(&argv(&[])).output;
    assert!(output.starts_with("mytool 1.0 - Copyright Example Corp"));

    // Suppressed when main_docs is off.
    let mut registry = Registry::new();
    registry.register(command("serve", Signature::new())).unwrap();
    let cli = Commandr::new(registry).with_config(config.main_docs(false));
    let output = cli.dispatch(&argv(&[])).output;
    assert!(output.starts_with("Command must be specified"));
}

#[test]
fn given_list_values_then_current_options_repeats_the_flag() {
    // The exact join format is an output contract.
    let mut args = BoundArgs::new();
    args.insert("name", Value::str("John"));
    args.insert("tag", Value::list(["a", "b", "c"]));
    let dump = help::current_options(&args);
    assert_eq!(
        dump,
        "Current Options:\n --name=John\n --tag=a --tag=b --tag=c\n"
    );
}
