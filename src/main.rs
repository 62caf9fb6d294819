use anyhow::Result;
use exportenv::{cli, config::Config, setup_logging};

fn main() -> Result<()> {
    let args = cli::parse_args();

    setup_logging(args.debug, args.log_json)?;

    let config = Config::from_args(&args)?;

    cli::execute(&config)
}
