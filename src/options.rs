//! Deriving option definitions from a command signature.
//!
//! One [`OptionSpec`] per parameter, with the option kind inferred from the
//! default value. Booleans become switches (a `true` default flips to a
//! `no_`-prefixed negation), lists accumulate, ints/floats parse typed, and
//! everything else stays a string. Parameters without a default are required
//! strings.

use std::collections::HashSet;

use tracing::debug;

use crate::naming::{spellings, NamingConfig, Spellings};
use crate::signature::Signature;
use crate::value::{Value, ValueType};

/// What supplying the option does to the bound value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Present/absent flag; presence binds `true`.
    Switch,
    /// Present/absent flag on a `no_`-prefixed name; presence binds `false`.
    NegatedSwitch,
    /// Takes one value of the given type.
    Typed(ValueType),
    /// Takes string values, accumulating across repeated occurrences.
    ListAppend,
}

impl OptionKind {
    pub fn is_switch(self) -> bool {
        matches!(self, OptionKind::Switch | OptionKind::NegatedSwitch)
    }

    /// The type a positional value for this parameter coerces to.
    /// Switches are never positionally assignable.
    pub fn positional_type(self) -> Option<ValueType> {
        match self {
            OptionKind::Switch | OptionKind::NegatedSwitch => None,
            OptionKind::Typed(t) => Some(t),
            OptionKind::ListAppend => Some(ValueType::Str),
        }
    }
}

/// A derived command-line option for one parameter.
#[derive(Debug, Clone)]
pub struct OptionSpec {
    /// Parameter (destination) name in the signature.
    pub param: String,
    /// Flag name before spelling expansion; differs from `param` only for
    /// negated switches (`no_` prefix).
    pub flag_base: String,
    pub kind: OptionKind,
    pub spellings: Spellings,
    pub short: Option<char>,
    /// `None` = required: must be bound before invocation.
    pub default: Option<Value>,
}

impl OptionSpec {
    /// The spelling used for registration and help.
    pub fn canonical(&self) -> &str {
        self.spellings.canonical()
    }

    pub fn required(&self) -> bool {
        self.default.is_none()
    }
}

/// Derive the option list for a signature, in declaration order.
///
/// A parameter literally named `self` is dropped entirely when
/// `ignore_self` is set.
pub fn build_options(
    signature: &Signature,
    ignore_self: bool,
    naming: &NamingConfig,
) -> Vec<OptionSpec> {
    let param_names: Vec<&str> = signature.names().collect();
    // -h is reserved for help before any parameter is considered.
    let mut letters: HashSet<char> = HashSet::from(['h']);
    let mut specs = Vec::new();

    for param in signature.params() {
        if ignore_self && param.name == "self" {
            continue;
        }

        let (kind, flag_base) = match &param.default {
            None => (OptionKind::Typed(ValueType::Str), param.name.clone()),
            Some(Value::Bool(false)) => (OptionKind::Switch, param.name.clone()),
            Some(Value::Bool(true)) => (OptionKind::NegatedSwitch, format!("no_{}", param.name)),
            Some(Value::List(_)) => (OptionKind::ListAppend, param.name.clone()),
            Some(Value::Int(_)) => (OptionKind::Typed(ValueType::Int), param.name.clone()),
            Some(Value::Float(_)) => (OptionKind::Typed(ValueType::Float), param.name.clone()),
            Some(Value::Str(_)) | Some(Value::None) => {
                (OptionKind::Typed(ValueType::Str), param.name.clone())
            }
        };

        let short = assign_short(&flag_base, &param_names, &mut letters);
        debug!(param = %param.name, ?kind, ?short, "derived option");

        specs.push(OptionSpec {
            param: param.name.clone(),
            spellings: spellings(&flag_base, naming),
            flag_base,
            kind,
            short,
            default: param.default.clone(),
        });
    }

    specs
}

/// Try the flag's lower-case first character, then the upper-case one.
/// A candidate is blocked if already assigned or if it equals another
/// parameter's full name. Assigned letters are never given back.
fn assign_short(
    flag_base: &str,
    param_names: &[&str],
    letters: &mut HashSet<char>,
) -> Option<char> {
    let first = flag_base.chars().next()?;
    for candidate in [first.to_ascii_lowercase(), first.to_ascii_uppercase()] {
        let shadows_param = param_names
            .iter()
            .any(|name| name.len() == 1 && name.starts_with(candidate));
        if !letters.contains(&candidate) && !shadows_param {
            letters.insert(candidate);
            return Some(candidate);
        }
    }
    None
}
