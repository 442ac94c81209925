use regex::Regex;

/// Matches VM names belonging to a prefix.
///
/// VMs are named `<prefix>-<ordinal>` but the scripts disagree on how strictly the
/// convention is enforced, so each flavour gets its own constructor.
#[derive(Debug, Clone)]
pub struct VmNamePattern {
    re: Regex,
}

impl VmNamePattern {
    /// `<prefix>-<digits>`, as produced by the OpenStack provisioning scripts.
    pub fn ordinal(prefix: &str) -> Self {
        Self::from_pattern(&format!(r"^{}-\d+$", regex::escape(prefix)))
    }

    /// `<prefix>`, an optional `-` or `_`, then at least one more character.
    pub fn loose(prefix: &str) -> Self {
        Self::from_pattern(&format!(r"^{}[-_]?\S+$", regex::escape(prefix)))
    }

    /// Anything starting with `<prefix>-`.
    pub fn dashed(prefix: &str) -> Self {
        Self::from_pattern(&format!(r"^{}-\S*$", regex::escape(prefix)))
    }

    fn from_pattern(pattern: &str) -> Self {
        // The prefix is escaped so the pattern is always valid
        let re = Regex::new(pattern).expect("Escaped VM name pattern to be valid");
        Self { re }
    }

    pub fn is_match(&self, name: &str) -> bool {
        self.re.is_match(name)
    }
}
