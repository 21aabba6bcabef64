//! Tensor build configuration
//!
//! `TensorConfig` describes one conversion: which files to read, which
//! columns become tensor modes (and in what order), the per-mode index
//! ordering policy, and the optional value column. It is assembled by the
//! CLI layer and validated before the first input byte is read.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::index::KeyOrder;

use super::errors::{ConfigError, ConfigResult};

/// Selects a column either by header name or by 1-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSelector {
    /// Column named in the header line
    Name(String),
    /// 1-based column position
    Position(usize),
}

impl FieldSelector {
    /// Parses a CLI selector: an all-digit string is a 1-based position,
    /// anything else a header name.
    pub fn parse(raw: &str) -> ConfigResult<Self> {
        if !raw.is_empty() && raw.bytes().all(|b| b.is_ascii_digit()) {
            let position: usize = raw
                .parse()
                .map_err(|_| ConfigError::InvalidPosition(raw.to_string()))?;
            if position == 0 {
                return Err(ConfigError::InvalidPosition(raw.to_string()));
            }
            Ok(FieldSelector::Position(position))
        } else {
            Ok(FieldSelector::Name(raw.to_string()))
        }
    }
}

impl fmt::Display for FieldSelector {
    /// Displays as the text the selector was parsed from. The display form
    /// doubles as the mode name in logs, errors, and map-file names.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldSelector::Name(name) => write!(f, "{}", name),
            FieldSelector::Position(position) => write!(f, "{}", position),
        }
    }
}

/// One tensor mode: the column it reads and its index ordering policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeSpec {
    /// Source column
    pub field: FieldSelector,
    /// Index ordering policy for this mode
    pub order: KeyOrder,
}

/// Full description of one CSV-to-tensor conversion.
#[derive(Debug, Clone)]
pub struct TensorConfig {
    /// Input files, read in the given order
    inputs: Vec<PathBuf>,
    /// Output tensor path
    output: PathBuf,
    /// Field separator; `None` means auto-detect from the first line
    separator: Option<char>,
    /// Whether inputs carry a header line
    has_header: bool,
    /// Modes in declared order
    modes: Vec<ModeSpec>,
    /// Value column; `None` builds a binary tensor
    value_field: Option<FieldSelector>,
    /// Directory for inverse map files; `None` means next to the tensor
    map_dir: Option<PathBuf>,
}

impl TensorConfig {
    /// Creates a configuration with no modes and all defaults: separator
    /// auto-detection, header line expected, binary tensor.
    pub fn new(inputs: Vec<PathBuf>, output: PathBuf) -> Self {
        Self {
            inputs,
            output,
            separator: None,
            has_header: true,
            modes: Vec::new(),
            value_field: None,
            map_dir: None,
        }
    }

    /// Overrides separator auto-detection.
    ///
    /// The raw CLI string must be exactly one character (`\t` arrives as a
    /// literal tab from the shell).
    pub fn set_separator(&mut self, raw: &str) -> ConfigResult<()> {
        let mut chars = raw.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                self.separator = Some(c);
                Ok(())
            }
            _ => Err(ConfigError::InvalidSeparator(raw.to_string())),
        }
    }

    /// Declares that inputs carry no header line. Only positional column
    /// selectors are valid afterwards (checked by `validate`).
    pub fn set_no_header(&mut self) {
        self.has_header = false;
    }

    /// Appends a tensor mode reading `field`, with the default first-seen
    /// index order. Mode order is declaration order.
    pub fn add_mode(&mut self, field: FieldSelector) -> ConfigResult<()> {
        if self.modes.iter().any(|m| m.field == field) {
            return Err(ConfigError::DuplicateMode(field.to_string()));
        }
        self.modes.push(ModeSpec {
            field,
            order: KeyOrder::default(),
        });
        Ok(())
    }

    /// Sets the index ordering policy of an already-declared mode.
    pub fn set_mode_order(&mut self, field: &FieldSelector, order: KeyOrder) -> ConfigResult<()> {
        match self.modes.iter_mut().find(|m| m.field == *field) {
            Some(mode) => {
                mode.order = order;
                Ok(())
            }
            None => Err(ConfigError::UnknownSortField(field.to_string())),
        }
    }

    /// Designates the value column. Absent, the tensor is binary.
    pub fn set_value_field(&mut self, field: FieldSelector) {
        self.value_field = Some(field);
    }

    /// Overrides the directory inverse map files are written into.
    pub fn set_map_dir(&mut self, dir: PathBuf) {
        self.map_dir = Some(dir);
    }

    /// Checks cross-field consistency. Called once, after assembly.
    pub fn validate(&self) -> ConfigResult<()> {
        if !self.has_header {
            let named = self
                .modes
                .iter()
                .map(|m| &m.field)
                .chain(self.value_field.as_ref())
                .find(|f| matches!(f, FieldSelector::Name(_)));
            if let Some(field) = named {
                return Err(ConfigError::NameSelectorWithoutHeader(field.to_string()));
            }
        }
        Ok(())
    }

    /// Input files, in read order.
    pub fn inputs(&self) -> &[PathBuf] {
        &self.inputs
    }

    /// Output tensor path.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Separator override, if any.
    pub fn separator(&self) -> Option<char> {
        self.separator
    }

    /// Whether inputs carry a header line.
    pub fn has_header(&self) -> bool {
        self.has_header
    }

    /// Modes in declared order.
    pub fn modes(&self) -> &[ModeSpec] {
        &self.modes
    }

    /// Value column, if the tensor is not binary.
    pub fn value_field(&self) -> Option<&FieldSelector> {
        self.value_field.as_ref()
    }

    /// Directory for inverse map files: the override if set, otherwise the
    /// tensor's parent directory.
    pub fn map_dir(&self) -> &Path {
        match &self.map_dir {
            Some(dir) => dir,
            None => self.output.parent().unwrap_or_else(|| Path::new(".")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> TensorConfig {
        TensorConfig::new(vec![PathBuf::from("in.csv")], PathBuf::from("out.tns"))
    }

    #[test]
    fn test_selector_parse() {
        assert_eq!(
            FieldSelector::parse("user").unwrap(),
            FieldSelector::Name("user".to_string())
        );
        assert_eq!(FieldSelector::parse("3").unwrap(), FieldSelector::Position(3));
        // Mixed digits and letters are a name
        assert_eq!(
            FieldSelector::parse("2nd").unwrap(),
            FieldSelector::Name("2nd".to_string())
        );
        assert_eq!(
            FieldSelector::parse("0"),
            Err(ConfigError::InvalidPosition("0".to_string()))
        );
    }

    #[test]
    fn test_duplicate_mode_rejected() {
        let mut config = config();
        config.add_mode(FieldSelector::parse("user").unwrap()).unwrap();

        let err = config
            .add_mode(FieldSelector::parse("user").unwrap())
            .unwrap_err();
        assert_eq!(err, ConfigError::DuplicateMode("user".to_string()));
    }

    #[test]
    fn test_sort_requires_declared_mode() {
        let mut config = config();
        config.add_mode(FieldSelector::parse("user").unwrap()).unwrap();

        config
            .set_mode_order(&FieldSelector::parse("user").unwrap(), KeyOrder::Numeric)
            .unwrap();
        assert_eq!(config.modes()[0].order, KeyOrder::Numeric);

        let err = config
            .set_mode_order(&FieldSelector::parse("item").unwrap(), KeyOrder::Lexicographic)
            .unwrap_err();
        assert_eq!(err, ConfigError::UnknownSortField("item".to_string()));
    }

    #[test]
    fn test_separator_must_be_single_char() {
        let mut config = config();
        config.set_separator("|").unwrap();
        assert_eq!(config.separator(), Some('|'));

        assert!(config.set_separator("||").is_err());
        assert!(config.set_separator("").is_err());
    }

    #[test]
    fn test_no_header_forbids_name_selectors() {
        let mut config = config();
        config.add_mode(FieldSelector::parse("1").unwrap()).unwrap();
        config.add_mode(FieldSelector::parse("user").unwrap()).unwrap();
        config.set_no_header();

        let err = config.validate().unwrap_err();
        assert_eq!(err, ConfigError::NameSelectorWithoutHeader("user".to_string()));
    }

    #[test]
    fn test_positional_selectors_allowed_without_header() {
        let mut config = config();
        config.add_mode(FieldSelector::parse("1").unwrap()).unwrap();
        config.add_mode(FieldSelector::parse("2").unwrap()).unwrap();
        config.set_no_header();

        config.validate().unwrap();
    }

    #[test]
    fn test_map_dir_defaults_to_tensor_directory() {
        let config = TensorConfig::new(
            vec![PathBuf::from("in.csv")],
            PathBuf::from("/data/out/result.tns"),
        );
        assert_eq!(config.map_dir(), Path::new("/data/out"));

        let mut config = config;
        config.set_map_dir(PathBuf::from("/tmp/maps"));
        assert_eq!(config.map_dir(), Path::new("/tmp/maps"));
    }
}
