//! Binding an argument vector onto a command's parameters.
//!
//! Tokenizing is delegated to a per-command `clap::Command` built from the
//! derived option specs; everything after that (positional reconciliation,
//! conflict detection, default filling, required enforcement) happens here.
//! This module is the entire type-coercion contract: handlers never cast.

use clap::parser::ValueSource;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing::{debug, instrument};

use crate::errors::BindError;
use crate::naming::NamingConfig;
use crate::options::{build_options, OptionKind, OptionSpec};
use crate::signature::{BoundArgs, Signature};
use crate::value::{Value, ValueType};

// Arg ids that cannot collide with parameter names.
const HELP_ID: &str = "__help";
const REST_ID: &str = "__rest";

/// Outcome of a successful parse: either a complete keyword set, or the
/// help switch short-circuiting before any binding takes place.
#[derive(Debug, PartialEq)]
pub enum Bound {
    Args(BoundArgs),
    HelpRequested,
}

/// A binding failure plus the options state at the time, for the
/// "Current Options:" section of per-command help. Tokenizer rejections
/// carry no state; nothing was resolved yet.
#[derive(Debug, PartialEq)]
pub struct BindFailure {
    pub error: BindError,
    pub state: Option<BoundArgs>,
}

/// Binds tokens for one command. Option specs are derived once at
/// construction and reused for binding and usage rendering.
pub struct Binder {
    name: String,
    specs: Vec<OptionSpec>,
}

impl Binder {
    pub fn new(
        name: impl Into<String>,
        signature: &Signature,
        ignore_self: bool,
        naming: &NamingConfig,
    ) -> Self {
        Binder {
            name: name.into(),
            specs: build_options(signature, ignore_self, naming),
        }
    }

    pub fn specs(&self) -> &[OptionSpec] {
        &self.specs
    }

    /// Render the option-parser usage block for help output. The long
    /// format is used so visible alias spellings are listed.
    pub fn usage(&self) -> String {
        let mut cmd = self.tokenizer();
        cmd.render_long_help().to_string()
    }

    /// Parse and reconcile an argument vector (tokens after the command
    /// name) into a fully resolved keyword set.
    #[instrument(skip(self, tokens), fields(command = %self.name))]
    pub fn bind(&self, tokens: &[String]) -> Result<Bound, BindFailure> {
        let matches = self.tokenizer().try_get_matches_from(tokens).map_err(|e| {
            BindFailure {
                error: BindError::Tokenize(e.render().to_string().trim_end().to_string()),
                state: None,
            }
        })?;

        if matches.get_flag(HELP_ID) {
            return Ok(Bound::HelpRequested);
        }

        let mut resolved: Vec<Option<Value>> = self
            .specs
            .iter()
            .map(|spec| self.explicit_value(spec, &matches))
            .collect();

        let leftover: Vec<String> = matches
            .get_many::<String>(REST_ID)
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default();
        debug!(options = ?resolved, ?leftover, "tokenized");

        if let Err(error) = self.fill_positionals(&leftover, &mut resolved) {
            let state = self.snapshot(&resolved);
            return Err(BindFailure {
                error,
                state: Some(state),
            });
        }

        // Remaining gaps take their defaults; required parameters may not
        // stay unset.
        let mut bound = BoundArgs::new();
        for (spec, value) in self.specs.iter().zip(resolved.iter()) {
            let value = match value {
                Some(v) => v.clone(),
                None => match &spec.default {
                    Some(d) => d.clone(),
                    None => {
                        return Err(BindFailure {
                            error: BindError::MissingRequired,
                            state: Some(self.snapshot(&resolved)),
                        })
                    }
                },
            };
            bound.insert(spec.param.clone(), value);
        }
        Ok(Bound::Args(bound))
    }

    /// The options state as it stands mid-bind: explicit values, else
    /// defaults, else `None` for unset required parameters.
    fn snapshot(&self, resolved: &[Option<Value>]) -> BoundArgs {
        let mut state = BoundArgs::new();
        for (spec, value) in self.specs.iter().zip(resolved) {
            let value = value
                .clone()
                .or_else(|| spec.default.clone())
                .unwrap_or(Value::None);
            state.insert(spec.param.clone(), value);
        }
        state
    }

    /// Walk positional leftovers onto still-assignable parameters.
    /// Switch-typed parameters are never positionally assignable.
    fn fill_positionals(
        &self,
        leftover: &[String],
        resolved: &mut [Option<Value>],
    ) -> Result<(), BindError> {
        let mut cursor = 0usize;
        for raw in leftover {
            if cursor >= self.specs.len() {
                return Err(BindError::TooManyArguments);
            }
            while self.specs[cursor].kind.is_switch() {
                cursor += 1;
                if cursor >= self.specs.len() {
                    return Err(BindError::TooManyArgumentsForSwitches);
                }
            }

            let spec = &self.specs[cursor];
            match spec.kind {
                OptionKind::ListAppend => {
                    // Lists legitimately take values from both origins.
                    match &mut resolved[cursor] {
                        Some(Value::List(items)) => items.push(raw.clone()),
                        slot => *slot = Some(Value::List(vec![raw.clone()])),
                    }
                }
                _ => {
                    let vtype = spec.kind.positional_type().unwrap_or(ValueType::Str);
                    let coerced = vtype.parse(raw).map_err(|_| BindError::InvalidValue {
                        name: spec.param.clone(),
                        expected: vtype,
                        value: raw.clone(),
                    })?;
                    if let Some(existing) = &resolved[cursor] {
                        if *existing != coerced {
                            return Err(BindError::RepeatedOption {
                                name: spec.param.clone(),
                                option: existing.to_string(),
                                argument: raw.clone(),
                            });
                        }
                    }
                    resolved[cursor] = Some(coerced);
                }
            }
            cursor += 1;
        }
        Ok(())
    }

    /// The value an option was explicitly given on the command line, if any.
    /// No defaults are registered with the tokenizer; absence stays absent
    /// until the final fill.
    fn explicit_value(&self, spec: &OptionSpec, matches: &ArgMatches) -> Option<Value> {
        if matches.value_source(&spec.param) != Some(ValueSource::CommandLine) {
            return None;
        }
        match spec.kind {
            OptionKind::Switch => Some(Value::Bool(true)),
            OptionKind::NegatedSwitch => Some(Value::Bool(false)),
            OptionKind::Typed(ValueType::Int) => {
                matches.get_one::<i64>(&spec.param).map(|v| Value::Int(*v))
            }
            OptionKind::Typed(ValueType::Float) => matches
                .get_one::<f64>(&spec.param)
                .map(|v| Value::Float(*v)),
            OptionKind::Typed(ValueType::Str) => matches
                .get_one::<String>(&spec.param)
                .cloned()
                .map(Value::Str),
            OptionKind::ListAppend => Some(Value::List(
                matches
                    .get_many::<String>(&spec.param)
                    .map(|vals| vals.cloned().collect())
                    .unwrap_or_default(),
            )),
        }
    }

    /// Build the external tokenizer: one clap `Command` with the derived
    /// options, an explicit help switch (clap's own is disabled so help can
    /// short-circuit binding) and a hidden catch-all for positionals.
    fn tokenizer(&self) -> Command {
        let mut cmd = Command::new(self.name.clone())
            .no_binary_name(true)
            .disable_help_flag(true)
            .disable_version_flag(true)
            .override_usage(format!("{} [options] [args]", self.name))
            .after_help("Options without default values MUST be specified");

        cmd = cmd.arg(
            Arg::new(HELP_ID)
                .short('h')
                .long("help")
                .action(ArgAction::SetTrue)
                .help("show this help message and exit"),
        );

        for spec in &self.specs {
            let mut arg = Arg::new(spec.param.clone()).long(spec.canonical().to_string());
            if let Some(letter) = spec.short {
                arg = arg.short(letter);
            }
            if spec.spellings.visible.len() > 1 {
                arg = arg.visible_aliases(spec.spellings.visible[1..].to_vec());
            }
            if !spec.spellings.hidden.is_empty() {
                arg = arg.aliases(spec.spellings.hidden.clone());
            }
            arg = match spec.kind {
                OptionKind::Switch | OptionKind::NegatedSwitch => arg.action(ArgAction::SetTrue),
                OptionKind::Typed(ValueType::Int) => arg
                    .action(ArgAction::Set)
                    .value_parser(value_parser!(i64))
                    .value_name("INT"),
                OptionKind::Typed(ValueType::Float) => arg
                    .action(ArgAction::Set)
                    .value_parser(value_parser!(f64))
                    .value_name("FLOAT"),
                OptionKind::Typed(ValueType::Str) => {
                    arg.action(ArgAction::Set).value_name("STRING")
                }
                OptionKind::ListAppend => arg.action(ArgAction::Append).value_name("STRING"),
            };
            if let Some(help) = default_help(spec) {
                arg = arg.help(help);
            }
            cmd = cmd.arg(arg);
        }

        cmd.arg(
            Arg::new(REST_ID)
                .action(ArgAction::Append)
                .num_args(0..)
                .value_name("ARGS")
                .hide(true),
        )
    }
}

/// The `[default: ...]` help note for typed options. Switches and required
/// parameters carry none; string defaults render quoted, null as `None`.
fn default_help(spec: &OptionSpec) -> Option<String> {
    if spec.kind.is_switch() {
        return None;
    }
    match spec.default.as_ref()? {
        Value::Str(s) => Some(format!("[default: \"{}\"]", s)),
        other => Some(format!("[default: {}]", other)),
    }
}
