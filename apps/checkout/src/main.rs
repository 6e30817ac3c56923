//! `checkout` - prices a cart and prints the receipt.

use anyhow::Context;

use till_checkout::cli::{Command, USAGE};
use till_checkout::config::CheckoutConfig;
use till_checkout::logging;

fn main() -> anyhow::Result<()> {
    let args = match Command::parse(std::env::args().skip(1))? {
        Command::Help => {
            print!("{USAGE}");
            return Ok(());
        }
        Command::Checkout(args) => args,
    };

    let config = CheckoutConfig::load(args.config.clone()).context("Failed to load configuration")?;
    logging::init(&config.logging.level);
    config.log_summary();

    let receipt = till_checkout::run(&args, &config)?;
    print!("{receipt}");
    Ok(())
}
