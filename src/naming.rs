//! Flag spelling resolution: dash/underscore variants, visible vs hidden.

/// How parameter names with underscores are spelled on the command line.
#[derive(Debug, Clone, Copy)]
pub struct NamingConfig {
    /// Accept the dash-substituted spelling in addition to the underscore one.
    pub hyphenate: bool,
    /// Show every accepted spelling in help instead of just the first.
    pub show_all_variants: bool,
}

impl Default for NamingConfig {
    fn default() -> Self {
        NamingConfig {
            hyphenate: true,
            show_all_variants: false,
        }
    }
}

/// The accepted spellings of one flag. `visible[0]` is the canonical form;
/// hidden spellings are parsed but suppressed from help.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spellings {
    pub visible: Vec<String>,
    pub hidden: Vec<String>,
}

impl Spellings {
    pub fn canonical(&self) -> &str {
        &self.visible[0]
    }

    /// Every accepted spelling, canonical first.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.visible
            .iter()
            .chain(self.hidden.iter())
            .map(String::as_str)
    }
}

/// Expand a flag base name into its accepted spellings.
///
/// Without an underscore, or with hyphenation off, the single spelling is
/// used as-is. Otherwise the dash form leads and the underscore form is
/// either shown alongside it or accepted silently.
pub fn spellings(base: &str, config: &NamingConfig) -> Spellings {
    if !base.contains('_') || !config.hyphenate {
        return Spellings {
            visible: vec![base.to_string()],
            hidden: Vec::new(),
        };
    }

    let dashed = base.replace('_', "-");
    if config.show_all_variants {
        Spellings {
            visible: vec![dashed, base.to_string()],
            hidden: Vec::new(),
        }
    } else {
        Spellings {
            visible: vec![dashed],
            hidden: vec![base.to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_name_has_single_visible_spelling() {
        let s = spellings("name", &NamingConfig::default());
        assert_eq!(s.visible, vec!["name"]);
        assert!(s.hidden.is_empty());
    }

    #[test]
    fn underscore_name_hides_underscore_form_by_default() {
        let s = spellings("caps_lock", &NamingConfig::default());
        assert_eq!(s.canonical(), "caps-lock");
        assert_eq!(s.hidden, vec!["caps_lock"]);
    }

    #[test]
    fn show_all_variants_makes_both_visible() {
        let config = NamingConfig {
            hyphenate: true,
            show_all_variants: true,
        };
        let s = spellings("caps_lock", &config);
        assert_eq!(s.visible, vec!["caps-lock", "caps_lock"]);
        assert!(s.hidden.is_empty());
    }

    #[test]
    fn hyphenation_off_keeps_underscores() {
        let config = NamingConfig {
            hyphenate: false,
            show_all_variants: false,
        };
        let s = spellings("caps_lock", &config);
        assert_eq!(s.visible, vec!["caps_lock"]);
        assert!(s.hidden.is_empty());
    }
}
