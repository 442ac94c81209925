use std::io::{BufRead, Write};

use common::generators::{PasswordGenerator, PasswordPolicy};

pub fn generate_passwords(count: usize, length: usize) -> Vec<String> {
    let generator = PasswordGenerator::new(PasswordPolicy::Standard);
    (0..count).map(|_| generator.generate(length)).collect()
}

/// Ask how many passwords to generate.
pub fn read_user_count(mut input: impl BufRead, mut output: impl Write) -> anyhow::Result<usize> {
    write!(output, "Enter the number of users: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;

    let count = line.trim();
    count
        .parse::<usize>()
        .map_err(|_| anyhow::anyhow!("'{count}' is not a number of users"))
}
