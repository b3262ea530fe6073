//! Command registration: names, categories, the single main command.
//!
//! The registry is an explicit value owned by the dispatcher rather than
//! process-wide state, so one process can host several independent CLIs and
//! tests need no global reset.

use tracing::debug;

use crate::errors::{RegistryError, SignatureError};
use crate::signature::{introspect, Handler, Signature};
use crate::value::Value;

/// What runs when a command is selected. `help` is a registered command
/// like any other, but its behavior needs registry access, so the
/// dispatcher executes it instead of a user handler.
pub(crate) enum Action {
    User(Box<dyn Handler>),
    Help(Signature),
}

/// A command under construction, consumed by [`Registry::register`].
pub struct CommandDef {
    name: String,
    handler: Box<dyn Handler>,
    category: Option<String>,
    ignore_self: Option<bool>,
    docs: Option<String>,
    main: bool,
}

impl CommandDef {
    pub fn new(name: impl Into<String>, handler: impl Handler + 'static) -> Self {
        CommandDef {
            name: name.into(),
            handler: Box::new(handler),
            category: None,
            ignore_self: None,
            docs: None,
            main: false,
        }
    }

    /// Group this command under a category in the global listing.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Documentation shown in listings and per-command help.
    pub fn docs(mut self, docs: impl Into<String>) -> Self {
        self.docs = Some(docs.into());
        self
    }

    /// Per-command override of the engine-wide `ignore_self` setting.
    pub fn ignore_self(mut self, ignore: bool) -> Self {
        self.ignore_self = Some(ignore);
        self
    }

    /// Mark as the fallback command invoked when no command name is given.
    pub fn main(mut self) -> Self {
        self.main = true;
        self
    }
}

/// A registered command.
pub struct CommandInfo {
    pub name: String,
    pub(crate) action: Action,
    pub category: Option<String>,
    pub ignore_self: Option<bool>,
    pub docs: Option<String>,
    pub main: bool,
}

impl CommandInfo {
    /// The innermost declared signature (unwrapping handler layers).
    pub fn signature(&self) -> Result<&Signature, SignatureError> {
        match &self.action {
            Action::User(handler) => introspect(&self.name, handler.as_ref()),
            Action::Help(signature) => Ok(signature),
        }
    }

    pub fn is_builtin_help(&self) -> bool {
        matches!(self.action, Action::Help(_))
    }
}

/// Holds all registered commands. Append-only; insertion order is preserved
/// and drives both listing order and category grouping.
pub struct Registry {
    commands: Vec<CommandInfo>,
    main: Option<String>,
}

impl Registry {
    /// An empty registry apart from the built-in `help` command.
    pub fn new() -> Self {
        let help_signature = Signature::new().arg_default("command", Value::None);
        Registry {
            commands: vec![CommandInfo {
                name: "help".to_string(),
                action: Action::Help(help_signature),
                category: None,
                ignore_self: None,
                docs: Some("Show the command listing, or help for one command.".to_string()),
                main: false,
            }],
            main: None,
        }
    }

    /// Register a command. Names must be unique; at most one command may be
    /// the main command.
    pub fn register(&mut self, def: CommandDef) -> Result<(), RegistryError> {
        if self.lookup(&def.name).is_some() {
            return Err(RegistryError::DuplicateName(def.name));
        }
        if def.main {
            if let Some(first) = &self.main {
                return Err(RegistryError::DuplicateMain {
                    first: first.clone(),
                    second: def.name,
                });
            }
            self.main = Some(def.name.clone());
        }
        debug!(command = %def.name, category = ?def.category, main = def.main, "registered");
        self.commands.push(CommandInfo {
            name: def.name,
            action: Action::User(def.handler),
            category: def.category,
            ignore_self: def.ignore_self,
            docs: def.docs,
            main: def.main,
        });
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<&CommandInfo> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// All commands in registration order.
    pub fn list(&self) -> impl Iterator<Item = &CommandInfo> {
        self.commands.iter()
    }

    /// The command registered with [`CommandDef::main`], if any.
    pub fn main_command(&self) -> Option<&CommandInfo> {
        self.main.as_deref().and_then(|name| self.lookup(name))
    }

    /// Commands grouped by category: the no-category ("General") group
    /// first, then categories by first appearance, commands within each by
    /// first appearance.
    pub fn grouped(&self) -> Vec<(Option<&str>, Vec<&CommandInfo>)> {
        let mut order: Vec<Option<&str>> = vec![None];
        for command in &self.commands {
            let category = command.category.as_deref();
            if !order.contains(&category) {
                order.push(category);
            }
        }
        order
            .into_iter()
            .filter_map(|category| {
                let members: Vec<&CommandInfo> = self
                    .commands
                    .iter()
                    .filter(|c| c.category.as_deref() == category)
                    .collect();
                if members.is_empty() {
                    None
                } else {
                    Some((category, members))
                }
            })
            .collect()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Registry::new()
    }
}
