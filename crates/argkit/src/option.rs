/// A declared option: one or more aliases sharing a single value slot.
///
/// An option without a value name is a flag. Options are built once and
/// never change after being handed to [`crate::ArgParser::add_option`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgOption {
    aliases: Vec<String>,
    description: String,
    value_name: String,
    default_values: Vec<String>,
    left_value_symbol: String,
    right_value_symbol: String,
}

impl ArgOption {
    pub fn new<I, S>(aliases: I, description: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            aliases: aliases.into_iter().map(Into::into).collect(),
            description: description.into(),
            value_name: String::new(),
            default_values: Vec::new(),
            left_value_symbol: "<".to_string(),
            right_value_symbol: ">".to_string(),
        }
    }

    /// Make the option consume the next argument as its value.
    pub fn value_name(mut self, name: impl Into<String>) -> Self {
        self.value_name = name.into();
        self
    }

    /// Append a value returned by lookups when the option is not supplied.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default_values.push(value.into());
        self
    }

    pub fn default_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_values.extend(values.into_iter().map(Into::into));
        self
    }

    /// Symbols around the value name in help text (`<` and `>` by default).
    pub fn value_symbols(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.left_value_symbol = left.into();
        self.right_value_symbol = right.into();
        self
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn value(&self) -> Option<&str> {
        if self.value_name.is_empty() {
            None
        } else {
            Some(&self.value_name)
        }
    }

    pub fn takes_value(&self) -> bool {
        !self.value_name.is_empty()
    }

    pub fn defaults(&self) -> &[String] {
        &self.default_values
    }

    /// Left column text for help output, e.g. `-f, --file <file>`.
    pub fn display_text(&self) -> String {
        let mut out = self.aliases.join(", ");
        if self.takes_value() {
            out.push(' ');
            out.push_str(&self.left_value_symbol);
            out.push_str(&self.value_name);
            out.push_str(&self.right_value_symbol);
        }
        out
    }
}

/// Anything that can name a registered option: an alias or the option itself.
///
/// The registry resolves a key through the first of its aliases that is
/// registered.
pub trait OptionKey {
    /// Aliases to try, in order. The first one also names the key in errors.
    fn lookup_aliases(&self) -> impl Iterator<Item = &str>;
}

impl OptionKey for str {
    fn lookup_aliases(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self)
    }
}

impl OptionKey for String {
    fn lookup_aliases(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.as_str())
    }
}

impl OptionKey for ArgOption {
    fn lookup_aliases(&self) -> impl Iterator<Item = &str> {
        self.aliases.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_display_text_joins_aliases() {
        let opt = ArgOption::new(["-h", "--help"], "Show help.");
        assert_eq!(opt.display_text(), "-h, --help");
        assert!(!opt.takes_value());
        assert_eq!(opt.value(), None);
    }

    #[test]
    fn value_option_display_text_includes_value_name() {
        let opt = ArgOption::new(["-f", "--file"], "Input").value_name("file");
        assert_eq!(opt.display_text(), "-f, --file <file>");
        assert_eq!(opt.value(), Some("file"));

        let opt = opt.value_symbols("[", "]");
        assert_eq!(opt.display_text(), "-f, --file [file]");
    }

    #[test]
    fn defaults_keep_declaration_order() {
        let opt = ArgOption::new(["--level"], "Levels")
            .value_name("n")
            .default_value("1")
            .default_values(["2", "3"]);
        assert_eq!(opt.defaults(), ["1", "2", "3"]);
    }

    #[test]
    fn option_key_offers_every_alias_in_order() {
        let opt = ArgOption::new(["-o", "--out"], "");
        assert_eq!(opt.lookup_aliases().collect::<Vec<_>>(), ["-o", "--out"]);
        let none = ArgOption::new(Vec::<String>::new(), "");
        assert_eq!(none.lookup_aliases().next(), None);
        assert_eq!("--out".lookup_aliases().collect::<Vec<_>>(), ["--out"]);
    }
}
