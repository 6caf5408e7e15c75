//! Terminal progress bars for iterators of known length.
//!
//! Wrapping an iterator never changes what it yields; the bar is purely an
//! observable side effect on standard output (or any [`std::io::Write`]).
//!
//! # Progress Behavior
//!
//! - **Debug gate**: nothing is rendered unless `DEBUG` is on (or
//!   [`ProgressConfig::debug`] is set)
//! - **Timing gate**: the elapsed/remaining segment only appears with
//!   `TIMING` on
//! - **Empty input**: a zero-length iterator renders nothing
//! - **Render failures**: logged once per error kind, iteration continues
//!
//! # Examples
//!
//! ```rust,no_run
//! use dev_tools::progress::{ProgressConfig, ProgressIteratorExt};
//!
//! let config = ProgressConfig::from_env().prefix("Import").suffix("rows");
//! let mut total = 0;
//! for row in (0..500).progress_with(config) {
//!     total += row;
//! }
//! ```

pub mod iter;
pub mod render;

pub use iter::{progress_bar, ProgressIter, ProgressIteratorExt, ProgressState};

use crate::config::Flags;
use crate::errors::RenderError;

pub const DEFAULT_FILL: &str = "█";
pub const DEFAULT_LENGTH: usize = 50;
pub const DEFAULT_DECIMALS: usize = 1;
pub const DEFAULT_LINE_END: &str = "\r";

/// Character set the output stream can represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputEncoding {
    #[default]
    Utf8,
    Ascii,
}

impl OutputEncoding {
    /// Detect from `LC_ALL`, `LC_CTYPE` and `LANG`, first non-empty wins.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Only a locale naming a non-UTF-8 codeset (`en_US.ISO-8859-1`) selects
    /// ASCII. Unset, `C` and `POSIX` locales keep UTF-8.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let locale = ["LC_ALL", "LC_CTYPE", "LANG"]
            .iter()
            .find_map(|key| lookup(key).filter(|v| !v.is_empty()));

        let Some(locale) = locale else {
            return Self::Utf8;
        };
        let codeset = locale
            .split('.')
            .nth(1)
            .map(|rest| rest.split('@').next().unwrap_or_default().to_lowercase());

        match codeset {
            Some(cs) if cs != "utf-8" && cs != "utf8" => Self::Ascii,
            _ => Self::Utf8,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Ascii => "ASCII",
        }
    }

    /// Fail on the first character the encoding cannot represent.
    pub fn check(&self, text: &str) -> Result<(), RenderError> {
        match self {
            Self::Utf8 => Ok(()),
            Self::Ascii => match text.chars().find(|c| !c.is_ascii()) {
                Some(glyph) => Err(RenderError::UnsupportedGlyph {
                    glyph,
                    encoding: self.name(),
                }),
                None => Ok(()),
            },
        }
    }
}

/// Display options for a progress bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgressConfig {
    /// Text before the bar
    pub prefix: String,
    /// Text after the percentage
    pub suffix: String,
    /// Glyph repeated for completed cells
    pub fill: String,
    /// Number of bar cells
    pub length: usize,
    /// Fractional digits of the percentage
    pub decimals: usize,
    /// Written after every frame; `"\r"` redraws in place
    pub line_end: String,
    /// Render anything at all
    pub debug: bool,
    /// Append elapsed and remaining time
    pub timing: bool,
    pub encoding: OutputEncoding,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            suffix: String::new(),
            fill: DEFAULT_FILL.to_string(),
            length: DEFAULT_LENGTH,
            decimals: DEFAULT_DECIMALS,
            line_end: DEFAULT_LINE_END.to_string(),
            debug: false,
            timing: false,
            encoding: OutputEncoding::Utf8,
        }
    }
}

impl ProgressConfig {
    /// Defaults with the debug/timing gates and encoding taken from the
    /// environment.
    pub fn from_env() -> Self {
        Self::from_flags(Flags::from_env()).encoding(OutputEncoding::from_env())
    }

    pub fn from_flags(flags: Flags) -> Self {
        Self {
            debug: flags.debug,
            timing: flags.timing,
            ..Self::default()
        }
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = fill.into();
        self
    }

    pub fn length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    pub fn decimals(mut self, decimals: usize) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn line_end(mut self, line_end: impl Into<String>) -> Self {
        self.line_end = line_end.into();
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn timing(mut self, timing: bool) -> Self {
        self.timing = timing;
        self
    }

    pub fn encoding(mut self, encoding: OutputEncoding) -> Self {
        self.encoding = encoding;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn encoding(pairs: &[(&str, &str)]) -> OutputEncoding {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        OutputEncoding::from_lookup(|key| map.get(key).map(|v| v.to_string()))
    }

    #[test]
    fn test_default_config() {
        let config = ProgressConfig::default();
        assert_eq!(config.fill, "█");
        assert_eq!(config.length, 50);
        assert_eq!(config.decimals, 1);
        assert_eq!(config.line_end, "\r");
        assert!(!config.debug);
        assert!(!config.timing);
    }

    #[test]
    fn test_from_flags_copies_gates() {
        let flags = Flags {
            debug: true,
            timing: true,
            ..Flags::default()
        };
        let config = ProgressConfig::from_flags(flags);
        assert!(config.debug && config.timing);
    }

    #[test]
    fn test_encoding_detection() {
        assert_eq!(encoding(&[]), OutputEncoding::Utf8);
        assert_eq!(encoding(&[("LANG", "C")]), OutputEncoding::Utf8);
        assert_eq!(encoding(&[("LANG", "en_US.UTF-8")]), OutputEncoding::Utf8);
        assert_eq!(encoding(&[("LANG", "de_DE.utf8@euro")]), OutputEncoding::Utf8);
        assert_eq!(encoding(&[("LANG", "en_US.ISO-8859-1")]), OutputEncoding::Ascii);
        assert_eq!(
            encoding(&[("LC_ALL", "en_US.ISO-8859-1"), ("LANG", "en_US.UTF-8")]),
            OutputEncoding::Ascii
        );
    }

    #[test]
    fn test_ascii_rejects_block_glyph() {
        assert!(OutputEncoding::Ascii.check("|##--|").is_ok());
        let err = OutputEncoding::Ascii.check("|██--|").unwrap_err();
        assert!(matches!(err, RenderError::UnsupportedGlyph { glyph: '█', .. }));
        assert!(OutputEncoding::Utf8.check("|██--|").is_ok());
    }
}
