use std::fmt::{self, Display};

use itertools::Itertools as _;

pub const ANSIBLE_HOST: &str = "ansible_host";
pub const ANSIBLE_USER: &str = "ansible_user";
pub const TRAINING_PASSWORD: &str = "training_password";

/// The remote user written on every host line the scripts create.
pub const DEFAULT_ANSIBLE_USER: &str = "ubuntu";

/// A token following the host name on an inventory line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostToken {
    /// `key=value` or `key="value"`
    Var {
        key: String,
        value: String,
        quoted: bool,
    },
    /// Anything without an `=`, kept as is
    Bare(String),
}

impl HostToken {
    pub fn var(key: &str, value: &str) -> Self {
        HostToken::Var {
            key: key.to_string(),
            value: value.to_string(),
            quoted: false,
        }
    }

    pub fn quoted_var(key: &str, value: &str) -> Self {
        HostToken::Var {
            key: key.to_string(),
            value: value.to_string(),
            quoted: true,
        }
    }

    fn parse(token: &str) -> Self {
        let Some((key, value)) = token.split_once('=') else {
            return HostToken::Bare(token.to_string());
        };

        match value.strip_prefix('"').and_then(|v| v.strip_suffix('"')) {
            Some(unquoted) => HostToken::quoted_var(key, unquoted),
            None => HostToken::var(key, value),
        }
    }

    pub fn key(&self) -> Option<&str> {
        match self {
            HostToken::Var { key, .. } => Some(key),
            HostToken::Bare(_) => None,
        }
    }
}

impl Display for HostToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostToken::Var {
                key,
                value,
                quoted: true,
            } => write!(f, "{key}=\"{value}\""),
            HostToken::Var { key, value, .. } => write!(f, "{key}={value}"),
            HostToken::Bare(token) => f.write_str(token),
        }
    }
}

/// A host line: the host name followed by whitespace separated variables.
///
/// ```text
/// demo-01 ansible_host=203.0.113.9 ansible_user=ubuntu training_password="s3cr3t"
/// ```
///
/// A line read from disk remembers its original text and is written back unchanged
/// until one of the mutating operations touches it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostLine {
    name: String,
    tokens: Vec<HostToken>,
    original: Option<String>,
}

impl HostLine {
    fn new(name: &str, tokens: Vec<HostToken>) -> Self {
        Self {
            name: name.to_string(),
            tokens,
            original: None,
        }
    }

    /// `<name> ansible_host=<ip> ansible_user=ubuntu`
    pub fn with_address(name: &str, ip: &str) -> Self {
        Self::new(
            name,
            vec![
                HostToken::var(ANSIBLE_HOST, ip),
                HostToken::var(ANSIBLE_USER, DEFAULT_ANSIBLE_USER),
            ],
        )
    }

    /// `<name> ansible_host= ansible_user=ubuntu training_password="<password>"`
    pub fn with_password(name: &str, password: &str) -> Self {
        Self::new(
            name,
            vec![
                HostToken::var(ANSIBLE_HOST, ""),
                HostToken::var(ANSIBLE_USER, DEFAULT_ANSIBLE_USER),
                HostToken::quoted_var(TRAINING_PASSWORD, password),
            ],
        )
    }

    /// Parse a line, returns `None` for a line without any token.
    pub fn parse(line: &str) -> Option<Self> {
        let mut words = split_words(line).into_iter();
        let name = words.next()?;

        Some(Self {
            name,
            tokens: words.map(|w| HostToken::parse(&w)).collect(),
            original: Some(line.trim_end().to_string()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has(&self, key: &str) -> bool {
        self.tokens.iter().any(|t| t.key() == Some(key))
    }

    pub fn get(&self, key: &str) -> Option<&HostToken> {
        self.tokens.iter().find(|t| t.key() == Some(key))
    }

    /// The value of `key`, with any surrounding quotes removed.
    pub fn value(&self, key: &str) -> Option<&str> {
        match self.get(key)? {
            HostToken::Var { value, .. } => Some(value),
            HostToken::Bare(_) => None,
        }
    }

    /// The password, only if it is written as a non-empty quoted value.
    pub fn training_password(&self) -> Option<&str> {
        match self.get(TRAINING_PASSWORD)? {
            HostToken::Var {
                value,
                quoted: true,
                ..
            } if !value.is_empty() => Some(value),
            _ => None,
        }
    }

    /// Set the first `key` variable to `value`, appending it when absent.
    /// Setting a variable to the value it already holds leaves the line untouched.
    pub fn set(&mut self, key: &str, value: &str) {
        let position = self.tokens.iter().position(|t| t.key() == Some(key));

        match position {
            Some(i) => {
                if let HostToken::Var { value: current, .. } = &self.tokens[i] {
                    if current == value {
                        return;
                    }
                }
                let quoted = matches!(self.tokens[i], HostToken::Var { quoted: true, .. });
                self.tokens[i] = HostToken::Var {
                    key: key.to_string(),
                    value: value.to_string(),
                    quoted,
                };
            }
            None => self.tokens.push(HostToken::var(key, value)),
        }
        self.original = None;
    }

    pub fn push(&mut self, token: HostToken) {
        self.tokens.push(token);
        self.original = None;
    }

    /// Insert a token directly after the host name.
    pub fn insert_after_name(&mut self, token: HostToken) {
        self.tokens.insert(0, token);
        self.original = None;
    }

    /// The text written to disk for this line.
    pub fn render(&self) -> String {
        match &self.original {
            Some(original) => original.clone(),
            None => std::iter::once(self.name.clone())
                .chain(self.tokens.iter().map(ToString::to_string))
                .join(" "),
        }
    }
}

impl Display for HostLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

/// Split on whitespace, except inside double quotes.
fn split_words(line: &str) -> Vec<String> {
    let mut words = vec![];
    let mut current = String::new();
    let mut in_quotes = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                current.push(c);
            }
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}
