use rand::{seq::SliceRandom, Rng};

pub const DEFAULT_PASSWORD_LENGTH: usize = 36;

const LETTERS: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
const DIGITS: &str = "0123456789";

// Neither set contains a quote or a backslash so passwords can be embedded in
// `training_password="..."` without escaping.
const STANDARD_PUNCTUATION: &str = "!@#$%^&*()_+-={}[]|:;<>,.?/";
const INVENTORY_PUNCTUATION: &str = "!@#$%^&*_+-=|:;,.?/";

/// The character set a password is drawn from.
///
/// The two sets differ on purpose: passwords written straight into the inventory by
/// `update-keys` avoid brackets, braces, parentheses and angle brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordPolicy {
    /// Letters, digits and the wider punctuation set used by `generate-keys`
    Standard,
    /// Letters, digits and the narrower punctuation set used when filling in the inventory
    Inventory,
}

impl PasswordPolicy {
    pub fn punctuation(&self) -> &'static str {
        match self {
            PasswordPolicy::Standard => STANDARD_PUNCTUATION,
            PasswordPolicy::Inventory => INVENTORY_PUNCTUATION,
        }
    }

    pub fn characters(&self) -> Vec<char> {
        LETTERS
            .chars()
            .chain(DIGITS.chars())
            .chain(self.punctuation().chars())
            .collect()
    }
}

/// A password generator drawing every character independently and uniformly from a policy's set
pub struct PasswordGenerator {
    characters: Vec<char>,
}

impl PasswordGenerator {
    pub fn new(policy: PasswordPolicy) -> Self {
        Self {
            characters: policy.characters(),
        }
    }

    /// Returns true if `c` may appear in a password generated under this policy
    pub fn allows(&self, c: char) -> bool {
        self.characters.contains(&c)
    }

    /// Create a new password of `length` characters using the thread local RNG
    pub fn generate(&self, length: usize) -> String {
        self.generate_with_rng(&mut rand::thread_rng(), length)
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R, length: usize) -> String {
        (0..length)
            .map(|_| {
                *self
                    .characters
                    .choose(rng)
                    .expect("Character set to be non-empty")
            })
            .collect()
    }
}
