use std::io;

use clap::Parser;
use common::{
    clap::parse_args_or_exit, generators::DEFAULT_PASSWORD_LENGTH, tracing::init_tracing,
};
use training_admin::{exit_on_error, generate_passwords, read_user_count};

/// Print random passwords for training VM users
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// How many passwords to generate, asked for interactively when omitted
    #[clap(long)]
    count: Option<usize>,
    /// Number of characters in each password
    #[clap(long, default_value_t = DEFAULT_PASSWORD_LENGTH)]
    length: usize,
}

fn main() {
    let cli: Cli = parse_args_or_exit();
    init_tracing("warn");

    let count = match cli.count {
        Some(count) => count,
        None => exit_on_error(read_user_count(io::stdin().lock(), io::stdout())),
    };

    for (i, password) in generate_passwords(count, cli.length).iter().enumerate() {
        println!("Generated password for user {}: {}", i + 1, password);
    }
}
