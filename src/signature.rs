//! Command signatures, handler trait and introspection.
//!
//! A [`Signature`] is the declared parameter list of a command: ordered
//! names plus optional default values. Declaration order is load-bearing
//! downstream (short-letter assignment and positional fill both walk it).
//!
//! Handlers may be layered (logging wrappers, adapters). Introspection
//! follows the [`Handler::inner`] relation to a fixed point so a wrapped
//! command still exposes the original parameter list.

use tracing::trace;

use crate::errors::{SignatureError, UsageError};
use crate::value::Value;

/// One declared parameter. `default: None` means required.
#[derive(Debug, Clone, PartialEq)]
pub struct ParamSpec {
    pub name: String,
    pub default: Option<Value>,
}

impl ParamSpec {
    pub fn required(name: impl Into<String>) -> Self {
        ParamSpec {
            name: name.into(),
            default: None,
        }
    }

    pub fn with_default(name: impl Into<String>, default: Value) -> Self {
        ParamSpec {
            name: name.into(),
            default: Some(default),
        }
    }
}

/// Ordered parameter list of a command.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Signature {
    params: Vec<ParamSpec>,
}

impl Signature {
    pub fn new() -> Self {
        Signature::default()
    }

    /// Append a required parameter.
    pub fn arg(mut self, name: impl Into<String>) -> Self {
        self.params.push(ParamSpec::required(name));
        self
    }

    /// Append a parameter with a default value.
    pub fn arg_default(mut self, name: impl Into<String>, default: Value) -> Self {
        self.params.push(ParamSpec::with_default(name, default));
        self
    }

    /// Build from a name list and a right-aligned defaults slice: with
    /// names `[a, b, c]` and defaults `[1, 2]`, the defaults bind to `b`
    /// and `c`, leaving `a` required.
    pub fn with_defaults(names: &[&str], defaults: &[Value]) -> Self {
        let required = names.len().saturating_sub(defaults.len());
        let params = names
            .iter()
            .enumerate()
            .map(|(i, name)| {
                if i < required {
                    ParamSpec::required(*name)
                } else {
                    ParamSpec::with_default(*name, defaults[i - required].clone())
                }
            })
            .collect();
        Signature { params }
    }

    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }

    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// A command implementation.
///
/// `signature()` may be absent on wrapper layers; introspection keeps
/// following `inner()` until the chain bottoms out.
pub trait Handler {
    /// The declared parameter list, if this layer carries one.
    fn signature(&self) -> Option<&Signature> {
        None
    }

    /// The handler this one wraps, if any.
    fn inner(&self) -> Option<&dyn Handler> {
        None
    }

    /// Run the command with a fully bound, fully typed argument set.
    /// A returned `Some(text)` is printed by the dispatcher.
    fn invoke(&self, args: &BoundArgs) -> Result<Option<String>, UsageError>;
}

/// Resolve the innermost signature of a (possibly wrapped) handler.
pub fn introspect<'a>(
    name: &str,
    handler: &'a dyn Handler,
) -> Result<&'a Signature, SignatureError> {
    let mut current = handler;
    let mut depth = 0usize;
    while let Some(inner) = current.inner() {
        current = inner;
        depth += 1;
    }
    trace!(command = name, depth, "introspected handler chain");
    current
        .signature()
        .ok_or_else(|| SignatureError::Opaque(name.to_string()))
}

/// Adapts a closure plus a signature into a [`Handler`].
pub struct FnHandler<F> {
    signature: Signature,
    func: F,
}

impl<F> FnHandler<F>
where
    F: Fn(&BoundArgs) -> Result<Option<String>, UsageError>,
{
    pub fn new(signature: Signature, func: F) -> Self {
        FnHandler { signature, func }
    }
}

impl<F> Handler for FnHandler<F>
where
    F: Fn(&BoundArgs) -> Result<Option<String>, UsageError>,
{
    fn signature(&self) -> Option<&Signature> {
        Some(&self.signature)
    }

    fn invoke(&self, args: &BoundArgs) -> Result<Option<String>, UsageError> {
        (self.func)(args)
    }
}

/// A transparent handler layer: delegates invocation, carries no signature
/// of its own. Custom wrapper types get the same introspection behavior by
/// implementing [`Handler::inner`] themselves.
pub struct Wrapped<H> {
    inner: H,
}

impl<H: Handler> Wrapped<H> {
    pub fn new(inner: H) -> Self {
        Wrapped { inner }
    }
}

impl<H: Handler> Handler for Wrapped<H> {
    fn inner(&self) -> Option<&dyn Handler> {
        Some(&self.inner)
    }

    fn invoke(&self, args: &BoundArgs) -> Result<Option<String>, UsageError> {
        self.inner.invoke(args)
    }
}

/// The fully resolved keyword set a handler is invoked with.
/// Iteration order is the command's declaration order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundArgs {
    values: Vec<(String, Value)>,
}

impl BoundArgs {
    pub fn new() -> Self {
        BoundArgs::default()
    }

    /// Append a binding; replaces an existing one of the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        let name = name.into();
        if let Some(slot) = self.values.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.values.push((name, value));
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_float)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_list(&self, name: &str) -> Option<&[String]> {
        self.get(name).and_then(Value::as_list)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greet_signature() -> Signature {
        Signature::new()
            .arg("name")
            .arg_default("title", Value::str("Mr."))
            .arg_default("times", Value::Int(1))
    }

    fn noop(_: &BoundArgs) -> Result<Option<String>, UsageError> {
        Ok(None)
    }

    struct Opaque;
    impl Handler for Opaque {
        fn invoke(&self, _: &BoundArgs) -> Result<Option<String>, UsageError> {
            Ok(None)
        }
    }

    #[test]
    fn defaults_bind_right_aligned() {
        let sig = Signature::with_defaults(
            &["a", "b", "c"],
            &[Value::Int(1), Value::Int(2)],
        );
        assert_eq!(sig.param("a").unwrap().default, None);
        assert_eq!(sig.param("b").unwrap().default, Some(Value::Int(1)));
        assert_eq!(sig.param("c").unwrap().default, Some(Value::Int(2)));
    }

    #[test]
    fn introspect_unwraps_nested_handlers() {
        let handler = Wrapped::new(Wrapped::new(FnHandler::new(greet_signature(), noop)));
        let sig = introspect("greet", &handler).unwrap();
        assert_eq!(sig.names().collect::<Vec<_>>(), vec!["name", "title", "times"]);
    }

    #[test]
    fn introspect_fails_on_opaque_handler() {
        let err = introspect("raw", &Wrapped::new(Opaque)).unwrap_err();
        assert_eq!(err, SignatureError::Opaque("raw".to_string()));
    }

    #[test]
    fn bound_args_preserve_insertion_order_and_replace() {
        let mut args = BoundArgs::new();
        args.insert("name", Value::str("Smith"));
        args.insert("times", Value::Int(1));
        args.insert("name", Value::str("Jones"));
        let names: Vec<_> = args.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["name", "times"]);
        assert_eq!(args.get_str("name"), Some("Jones"));
    }
}
