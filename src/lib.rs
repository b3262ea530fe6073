//! Uniform command-line interface over registered command handlers.
//!
//! Commands declare an ordered parameter [`Signature`]; default values drive
//! option derivation. A `false` boolean default makes a switch, a `true`
//! default makes a `no-`prefixed negation, a list default accumulates across
//! repeated occurrences, int/float defaults parse typed, and parameters
//! without a default are required strings. Leftover positional tokens fill
//! still-unset parameters in declaration order, skipping switches. Help is
//! generated from the same metadata.
//!
//! ```
//! use cmdr::{BoundArgs, CommandDef, Commandr, FnHandler, Registry, Signature, Value};
//!
//! let mut registry = Registry::new();
//! registry
//!     .register(
//!         CommandDef::new(
//!             "greet",
//!             FnHandler::new(
//!                 Signature::new()
//!                     .arg("name")
//!                     .arg_default("title", Value::str("Mr."))
//!                     .arg_default("comma", Value::Bool(false)),
//!                 |args: &BoundArgs| {
//!                     let comma = if args.get_bool("comma") == Some(true) { "," } else { "" };
//!                     Ok(Some(format!(
//!                         "Hi{} {} {}!",
//!                         comma,
//!                         args.get_str("title").unwrap_or_default(),
//!                         args.get_str("name").unwrap_or_default(),
//!                     )))
//!                 },
//!             ),
//!         )
//!         .docs("Greet someone."),
//!     )
//!     .unwrap();
//!
//! let cli = Commandr::new(registry);
//! let report = cli.dispatch(&["greet".to_string(), "--name=John".to_string()]);
//! assert_eq!(report.output, "Hi Mr. John!\n");
//! assert_eq!(report.code, 0);
//! ```

pub mod binder;
pub mod dispatch;
pub mod errors;
pub mod exitcode;
pub mod help;
pub mod naming;
pub mod options;
pub mod registry;
pub mod signature;
pub mod util;
pub mod value;

pub use binder::{Binder, BindFailure, Bound};
pub use dispatch::{Commandr, Report, RunConfig};
pub use errors::{BindError, RegistryError, SignatureError, UsageError};
pub use naming::NamingConfig;
pub use options::{build_options, OptionKind, OptionSpec};
pub use registry::{CommandDef, CommandInfo, Registry};
pub use signature::{introspect, BoundArgs, FnHandler, Handler, ParamSpec, Signature, Wrapped};
pub use value::{Value, ValueType};
