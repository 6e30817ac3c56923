//! Command line parsing.

use std::path::PathBuf;

use crate::error::{AppError, AppResult};

pub const USAGE: &str = "\
Till Checkout

Usage: checkout [OPTIONS] [CART.json]

Prices a cart and prints the receipt. Without CART.json the demo cart is used.

Options:
  -c, --config <PATH>  Config file (default: platform config dir/checkout.toml)
  -j, --json           Print the order as JSON
  -h, --help           Show this help message
";

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Checkout(Args),
}

/// Options for a checkout run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Args {
    pub config: Option<PathBuf>,
    pub json: bool,
    pub cart: Option<PathBuf>,
}

impl Command {
    /// Parses arguments, excluding the program name.
    pub fn parse<I>(args: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut parsed = Args::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = args
                        .next()
                        .ok_or_else(|| AppError::Usage(format!("{arg} needs a path")))?;
                    parsed.config = Some(PathBuf::from(path));
                }
                "--json" | "-j" => parsed.json = true,
                "--help" | "-h" => return Ok(Command::Help),
                flag if flag.starts_with('-') => {
                    return Err(AppError::Usage(format!("Unknown option: {flag}")));
                }
                _ if parsed.cart.is_some() => {
                    return Err(AppError::Usage("Only one cart file can be given".to_string()));
                }
                path => parsed.cart = Some(PathBuf::from(path)),
            }
        }

        Ok(Command::Checkout(parsed))
    }
}
