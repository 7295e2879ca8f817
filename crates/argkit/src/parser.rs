use std::collections::HashMap;
use std::fmt::Display;
use std::io::{self, Write};
use std::str::FromStr;

use crate::config::{LayoutConfig, ParserConfig};
use crate::error::{ArgError, Result};
use crate::layout::TextLayout;
use crate::option::{ArgOption, OptionKey};

const TERMINATOR: &str = "--";
const HELP_ALIASES: [&str; 2] = ["-h", "--help"];
const VERSION_ALIASES: [&str; 2] = ["-v", "--version"];

/// A declared positional argument. Only its position binds it to a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Positional {
    name: String,
    description: String,
}

impl Positional {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// What the caller should do after [`ArgParser::parse`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Nothing special was requested; read the parsed values.
    Continue,
    /// The registered help flag was given.
    Help,
    /// The registered version flag was given.
    Version,
    /// Tokens that looked like options but match no alias, in input order.
    UnknownOptions(Vec<String>),
}

impl ParseOutcome {
    /// Process exit status implied by the outcome, if the program should stop.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Continue => None,
            Self::Help | Self::Version => Some(0),
            Self::UnknownOptions(_) => Some(1),
        }
    }
}

/// Values collected by the last `parse` call.
#[derive(Debug, Clone, Default)]
struct ParseState {
    /// slot -> values, present (possibly empty) once the option was seen
    values: HashMap<usize, Vec<String>>,
    positionals: Vec<String>,
    unknown: Vec<String>,
}

/// Option registry and parser.
///
/// Options are looked up by any of their aliases; every alias resolves to the
/// same slot, so lookups through different aliases of one option agree.
#[derive(Debug, Clone)]
pub struct ArgParser {
    program_name: String,
    description: String,
    version: String,
    unknown_option_message: String,
    layout: TextLayout,
    has_help: bool,
    has_version: bool,
    options: Vec<ArgOption>,
    positionals: Vec<Positional>,
    slots: HashMap<String, usize>,
    state: ParseState,
}

impl ArgParser {
    /// Parser with the default configuration and the given program name.
    pub fn new(program_name: impl Into<String>) -> Self {
        let defaults = ParserConfig::default();
        Self {
            program_name: program_name.into(),
            description: defaults.description,
            version: defaults.version,
            unknown_option_message: defaults.unknown_option_message,
            layout: TextLayout::default(),
            has_help: false,
            has_version: false,
            options: Vec::new(),
            positionals: Vec::new(),
            slots: HashMap::new(),
            state: ParseState::default(),
        }
    }

    pub fn with_config(config: ParserConfig) -> Result<Self> {
        let layout = TextLayout::new(config.layout)?;
        let mut parser = Self::new(config.program_name);
        parser.description = config.description;
        parser.version = config.version;
        parser.unknown_option_message = config.unknown_option_message;
        parser.layout = layout;
        Ok(parser)
    }

    /// Replace the help layout. Registered options and parsed values are kept.
    pub fn set_layout(&mut self, config: LayoutConfig) -> Result<()> {
        self.layout = TextLayout::new(config)?;
        Ok(())
    }

    pub fn layout(&self) -> &TextLayout {
        &self.layout
    }

    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    pub fn add_positional(&mut self, name: impl Into<String>, description: impl Into<String>) {
        let positional = Positional {
            name: name.into(),
            description: description.into(),
        };
        tracing::debug!(name = %positional.name, "registered positional");
        self.positionals.push(positional);
    }

    /// Register `option` under all of its aliases.
    ///
    /// Fails without touching the registry when the option has no aliases or
    /// one of them is already taken.
    pub fn add_option(&mut self, option: ArgOption) -> Result<()> {
        if option.aliases().is_empty() {
            return Err(ArgError::NoAliases);
        }
        if let Some(taken) = option
            .aliases()
            .iter()
            .find(|alias| self.slots.contains_key(alias.as_str()))
        {
            return Err(ArgError::DuplicateAlias(taken.clone()));
        }

        let slot = self.options.len();
        for alias in option.aliases() {
            self.slots.insert(alias.clone(), slot);
        }
        tracing::debug!(slot, aliases = ?option.aliases(), "registered option");
        self.options.push(option);
        Ok(())
    }

    /// Register `-h/--help`; `parse` reports [`ParseOutcome::Help`] when given.
    pub fn add_help_option(&mut self) -> Result<()> {
        self.add_option(ArgOption::new(HELP_ALIASES, "Show help."))?;
        self.has_help = true;
        Ok(())
    }

    /// Register `-v/--version`; `parse` reports [`ParseOutcome::Version`] when given.
    pub fn add_version_option(&mut self) -> Result<()> {
        self.add_option(ArgOption::new(VERSION_ALIASES, "Show version."))?;
        self.has_version = true;
        Ok(())
    }

    /// Parse a full argument vector, `argv[0]` being the program name.
    ///
    /// Results of any previous call are discarded. A value-taking option
    /// consumes the next token whatever it looks like, and every occurrence
    /// appends one value. Help wins over version, version over unknown
    /// options.
    pub fn parse<I, S>(&mut self, argv: I) -> ParseOutcome
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.state = ParseState::default();

        let mut args = argv.into_iter().map(Into::<String>::into);
        if let Some(program) = args.next() {
            if self.program_name.is_empty() {
                self.program_name = program;
            }
        }

        while let Some(arg) = args.next() {
            if arg == TERMINATOR {
                // TODO: keep the tokens after `--` as unparsed arguments
                tracing::debug!("ignoring argument terminator");
            } else if arg.starts_with('-') {
                self.parse_option(arg, &mut args);
            } else {
                self.state.positionals.push(arg);
            }
        }

        let outcome = self.outcome();
        tracing::debug!(
            options = self.state.values.len(),
            positionals = self.state.positionals.len(),
            unknown = self.state.unknown.len(),
            ?outcome,
            "parsed arguments"
        );
        outcome
    }

    fn parse_option(&mut self, arg: String, rest: &mut impl Iterator<Item = String>) {
        let Some(&slot) = self.slots.get(&arg) else {
            tracing::debug!(option = %arg, "unrecognized option");
            self.state.unknown.push(arg);
            return;
        };

        let takes_value = self.options[slot].takes_value();
        let values = self.state.values.entry(slot).or_default();
        if !takes_value {
            return;
        }
        match rest.next() {
            Some(value) => values.push(value),
            None => tracing::debug!(option = %arg, "no value left for option"),
        }
    }

    fn outcome(&self) -> ParseOutcome {
        if self.has_help && self.is_set(HELP_ALIASES[0]) {
            ParseOutcome::Help
        } else if self.has_version && self.is_set(VERSION_ALIASES[0]) {
            ParseOutcome::Version
        } else if !self.state.unknown.is_empty() {
            ParseOutcome::UnknownOptions(self.state.unknown.clone())
        } else {
            ParseOutcome::Continue
        }
    }

    /// Write what `outcome` calls for: help or version text to `out`, or the
    /// unknown-option message to `err` followed by help text to `out`.
    pub fn report(
        &self,
        outcome: &ParseOutcome,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> Result<()> {
        match outcome {
            ParseOutcome::Continue => {}
            ParseOutcome::Help => self.show_help(out)?,
            ParseOutcome::Version => self.show_version(out)?,
            ParseOutcome::UnknownOptions(tokens) => {
                writeln!(err, "{}[{}]", self.unknown_option_message, tokens.join(", "))?;
                self.show_help(out)?;
            }
        }
        Ok(())
    }

    pub fn parse_and_report<I, S>(
        &mut self,
        argv: I,
        out: &mut impl Write,
        err: &mut impl Write,
    ) -> Result<ParseOutcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let outcome = self.parse(argv);
        self.report(&outcome, out, err)?;
        Ok(outcome)
    }

    /// [`Self::parse_and_report`] on the process arguments, stdout and stderr.
    pub fn parse_and_report_stdio(&mut self) -> Result<ParseOutcome> {
        let stdout = io::stdout();
        let stderr = io::stderr();
        self.parse_and_report(process_args(), &mut stdout.lock(), &mut stderr.lock())
    }

    fn slot(&self, key: &(impl OptionKey + ?Sized)) -> Option<usize> {
        key.lookup_aliases()
            .find_map(|alias| self.slots.get(alias).copied())
    }

    fn require_slot(&self, key: &(impl OptionKey + ?Sized)) -> Result<usize> {
        self.slot(key)
            .ok_or_else(|| ArgError::UnknownOption(key_name(key)))
    }

    /// Whether the option appeared in the last parse, with or without values.
    pub fn is_set(&self, key: &(impl OptionKey + ?Sized)) -> bool {
        self.slot(key)
            .is_some_and(|slot| self.state.values.contains_key(&slot))
    }

    /// Parsed values of the option, or its defaults when it was not given.
    pub fn values(&self, key: &(impl OptionKey + ?Sized)) -> Result<&[String]> {
        let slot = self.require_slot(key)?;
        Ok(match self.state.values.get(&slot) {
            Some(values) => values.as_slice(),
            None => self.options[slot].defaults(),
        })
    }

    /// First entry of [`Self::values`].
    pub fn value(&self, key: &(impl OptionKey + ?Sized)) -> Result<&str> {
        self.values(key)?
            .first()
            .map(String::as_str)
            .ok_or_else(|| ArgError::NoValue(key_name(key)))
    }

    /// [`Self::value`] converted with `FromStr`.
    pub fn value_as<T>(&self, key: &(impl OptionKey + ?Sized)) -> Result<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        let raw = self.value(key)?;
        raw.parse().map_err(|e: T::Err| ArgError::InvalidValue {
            option: key_name(key),
            value: raw.to_string(),
            reason: e.to_string(),
        })
    }

    /// Non-option tokens of the last parse, in input order.
    pub fn positional_values(&self) -> &[String] {
        &self.state.positionals
    }

    /// Value bound to the declared positional `name` by declaration order.
    pub fn positional(&self, name: &str) -> Option<&str> {
        let index = self.positionals.iter().position(|p| p.name == name)?;
        self.state.positionals.get(index).map(String::as_str)
    }

    pub fn unknown_options(&self) -> &[String] {
        &self.state.unknown
    }

    pub fn available_options(&self) -> &[ArgOption] {
        &self.options
    }

    pub fn positionals(&self) -> &[Positional] {
        &self.positionals
    }

    /// Render usage, description, positional arguments and options.
    ///
    /// Both sections share one label width so their descriptions line up.
    pub fn help(&self) -> String {
        let mut out = String::new();
        if !self.program_name.is_empty() {
            out.push_str("Usage: ");
            out.push_str(&self.program_name);
            if !self.options.is_empty() {
                out.push_str(" [Options]");
            }
            for positional in &self.positionals {
                out.push(' ');
                out.push_str(&positional.name);
            }
            out.push('\n');
        }
        if !self.description.is_empty() {
            out.push_str(&self.description);
            out.push_str("\n\n");
        }

        let labels: Vec<String> = self.options.iter().map(ArgOption::display_text).collect();
        let width = self
            .positionals
            .iter()
            .map(|p| p.name.chars().count())
            .chain(labels.iter().map(|l| l.chars().count()))
            .max()
            .unwrap_or(0);

        if !self.positionals.is_empty() {
            out.push_str("Positional arguments:\n");
            for positional in &self.positionals {
                out.push_str(&self.layout.wrap(&positional.name, width, &positional.description));
            }
            out.push('\n');
        }
        if !self.options.is_empty() {
            out.push_str("Options:\n");
            for (option, label) in self.options.iter().zip(&labels) {
                out.push_str(&self.layout.wrap(label, width, option.description()));
            }
            out.push('\n');
        }
        out
    }

    pub fn show_help(&self, out: &mut impl Write) -> Result<()> {
        out.write_all(self.help().as_bytes())?;
        Ok(())
    }

    pub fn version(&self) -> String {
        format!("{} {}\n", self.program_name, self.version)
    }

    pub fn show_version(&self, out: &mut impl Write) -> Result<()> {
        out.write_all(self.version().as_bytes())?;
        Ok(())
    }
}

/// Process arguments, with invalid UTF-8 replaced rather than panicking.
pub fn process_args() -> impl Iterator<Item = String> {
    std::env::args_os().map(|arg| arg.to_string_lossy().into_owned())
}

fn key_name(key: &(impl OptionKey + ?Sized)) -> String {
    key.lookup_aliases().next().unwrap_or_default().to_string()
}
