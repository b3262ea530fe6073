//! Top-level dispatch: command selection, binding, invocation and help
//! routing.
//!
//! `dispatch()` is pure (argv in, exit code and output text out) so the
//! whole surface is testable; `run()` is the thin process entry around it.

use std::process;

use tracing::{debug, instrument};

use crate::binder::{Binder, Bound};
use crate::errors::SignatureError;
use crate::exitcode;
use crate::help;
use crate::naming::NamingConfig;
use crate::registry::{Action, CommandInfo, Registry};
use crate::signature::BoundArgs;

/// Completion support for shells: prints matching command names.
const COMPLETION_FLAG: &str = "--list_command_completions";

/// Engine-wide configuration for one dispatch surface.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Accept dash spellings for underscore parameter names.
    pub hyphenate: bool,
    /// Show every accepted spelling in help.
    pub show_all_variants: bool,
    /// Drop parameters literally named `self`.
    pub ignore_self: bool,
    /// Print the top-level banner on the global listing.
    pub main_docs: bool,
    /// Name of the fallback command when no command name is supplied.
    pub main: Option<String>,
    /// Top-level documentation/copyright banner.
    pub docs: Option<String>,
}

impl Default for RunConfig {
    fn default() -> Self {
        RunConfig {
            hyphenate: true,
            show_all_variants: false,
            ignore_self: false,
            main_docs: true,
            main: None,
            docs: None,
        }
    }
}

impl RunConfig {
    pub fn main(mut self, name: impl Into<String>) -> Self {
        self.main = Some(name.into());
        self
    }

    pub fn docs(mut self, docs: impl Into<String>) -> Self {
        self.docs = Some(docs.into());
        self
    }

    pub fn hyphenate(mut self, on: bool) -> Self {
        self.hyphenate = on;
        self
    }

    pub fn show_all_variants(mut self, on: bool) -> Self {
        self.show_all_variants = on;
        self
    }

    pub fn ignore_self(mut self, on: bool) -> Self {
        self.ignore_self = on;
        self
    }

    pub fn main_docs(mut self, on: bool) -> Self {
        self.main_docs = on;
        self
    }
}

/// What one dispatch produced: the process exit code and the text to print.
#[derive(Debug, PartialEq, Eq)]
pub struct Report {
    pub code: i32,
    pub output: String,
}

impl Report {
    fn ok(output: String) -> Self {
        Report {
            code: exitcode::OK,
            output,
        }
    }
}

/// The dispatcher: owns the registry and configuration, drives selection,
/// binding and invocation for one argument vector at a time.
pub struct Commandr {
    registry: Registry,
    config: RunConfig,
}

impl Commandr {
    pub fn new(registry: Registry) -> Self {
        Commandr {
            registry,
            config: RunConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Process entry: dispatch `std::env::args`, print, exit.
    pub fn run(&self) -> ! {
        let argv: Vec<String> = std::env::args().skip(1).collect();
        let report = self.dispatch(&argv);
        if !report.output.is_empty() {
            print!("{}", report.output);
        }
        process::exit(report.code)
    }

    /// Select a command, bind the tokens and invoke it; every failure path
    /// resolves to a help report with the appropriate exit code.
    #[instrument(skip(self))]
    pub fn dispatch(&self, argv: &[String]) -> Report {
        if argv.first().map(String::as_str) == Some(COMPLETION_FLAG) {
            return self.completion_list(argv.get(1).map(String::as_str).unwrap_or(""));
        }

        // A configured main command that was never registered is a setup
        // mistake, not a user error.
        if let Some(main) = &self.config.main {
            if self.registry.lookup(main).is_none() {
                return Report {
                    code: exitcode::SOFTWARE,
                    output: format!(
                        "{}\n",
                        crate::errors::RegistryError::UnknownMain(main.clone())
                    ),
                };
            }
        }

        let (info, tokens): (&CommandInfo, &[String]) = match argv.first() {
            Some(token) if !token.starts_with('-') => match self.registry.lookup(token) {
                Some(info) => (info, &argv[1..]),
                None => {
                    return self.global_report(Some(&format!("Unknown command '{}'", token)))
                }
            },
            // No tokens, or the first token is an option: fall back to the
            // main command with the full vector.
            _ => match self.effective_main() {
                Some(info) => (info, argv),
                None => return self.global_report(Some("Command must be specified")),
            },
        };
        debug!(command = %info.name, ?tokens, "selected");

        let signature = match info.signature() {
            Ok(signature) => signature,
            Err(e) => return software_report(&e),
        };
        let binder = Binder::new(
            &info.name,
            signature,
            info.ignore_self.unwrap_or(self.config.ignore_self),
            &self.naming(),
        );

        match binder.bind(tokens) {
            Ok(Bound::HelpRequested) => {
                self.command_report(info, exitcode::COMMAND_USAGE, None, None)
            }
            Err(failure) => self.command_report(
                info,
                exitcode::COMMAND_USAGE,
                Some(failure.error.to_string()),
                failure.state.as_ref(),
            ),
            Ok(Bound::Args(args)) => self.invoke(info, &args),
        }
    }

    fn invoke(&self, info: &CommandInfo, args: &BoundArgs) -> Report {
        match &info.action {
            Action::Help(_) => self.help_command(args),
            Action::User(handler) => match handler.invoke(args) {
                Ok(Some(text)) if !text.is_empty() => {
                    let mut output = text;
                    if !output.ends_with('\n') {
                        output.push('\n');
                    }
                    Report::ok(output)
                }
                Ok(_) => Report::ok(String::new()),
                // A usage error from the command body routes to its help.
                Err(usage) => {
                    let message = if usage.message.is_empty() {
                        None
                    } else {
                        Some(usage.message)
                    };
                    self.command_report(info, exitcode::COMMAND_USAGE, message, Some(args))
                }
            },
        }
    }

    /// The built-in `help` command: bare prints the global listing, with a
    /// name it mirrors that command's `-h` output.
    fn help_command(&self, args: &BoundArgs) -> Report {
        match args.get_str("command") {
            Some(name) => match self.registry.lookup(name) {
                Some(target) => self.command_report(target, exitcode::COMMAND_USAGE, None, None),
                None => self.global_report(Some(&format!("Unknown command '{}'", name))),
            },
            None => self.global_report(None),
        }
    }

    fn completion_list(&self, prefix: &str) -> Report {
        let names: Vec<&str> = self
            .registry
            .list()
            .map(|c| c.name.as_str())
            .filter(|name| name.starts_with(prefix))
            .collect();
        Report::ok(format!("{}\n", names.join(" ")))
    }

    /// The fallback command: the configured name wins over a registration
    /// marked main.
    fn effective_main(&self) -> Option<&CommandInfo> {
        self.config
            .main
            .as_deref()
            .and_then(|name| self.registry.lookup(name))
            .or_else(|| self.registry.main_command())
    }

    fn naming(&self) -> NamingConfig {
        NamingConfig {
            hyphenate: self.config.hyphenate,
            show_all_variants: self.config.show_all_variants,
        }
    }

    fn global_report(&self, error: Option<&str>) -> Report {
        let banner = if self.config.main_docs {
            self.config.docs.as_deref()
        } else {
            None
        };
        let main = self.effective_main().map(|info| info.name.clone());
        Report {
            code: exitcode::NO_COMMAND,
            output: help::global_help(&self.registry, banner, error, main.as_deref()),
        }
    }

    fn command_report(
        &self,
        info: &CommandInfo,
        code: i32,
        error: Option<String>,
        current: Option<&BoundArgs>,
    ) -> Report {
        match self.render_command_help(info, error.as_deref(), current) {
            Ok(output) => Report { code, output },
            Err(e) => software_report(&e),
        }
    }

    /// Render one command's help. Pure: the same inputs produce identical
    /// text.
    fn render_command_help(
        &self,
        info: &CommandInfo,
        error: Option<&str>,
        current: Option<&BoundArgs>,
    ) -> Result<String, SignatureError> {
        let signature = info.signature()?;
        let binder = Binder::new(
            &info.name,
            signature,
            info.ignore_self.unwrap_or(self.config.ignore_self),
            &self.naming(),
        );
        Ok(help::command_help(
            &info.name,
            info.docs.as_deref(),
            &binder.usage(),
            error,
            current,
        ))
    }
}

fn software_report(error: &SignatureError) -> Report {
    Report {
        code: exitcode::SOFTWARE,
        output: format!("{}\n", error),
    }
}
