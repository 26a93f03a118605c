use clap::Parser;

/// thermoglowd — temperature and daylight driven RGB lighting daemon
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Seconds between cooler updates; negative runs exactly one update and exits
    #[arg(allow_negative_numbers = true)]
    pub interval: f64,

    /// Seconds between motherboard zone updates
    #[arg(allow_negative_numbers = true)]
    pub aura_interval: f64,

    /// Run in background as a daemon
    #[arg(short = 'd', long = "daemonize", default_value = "false")]
    pub daemonize: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intervals_parse_as_floats() {
        let cli = Cli::parse_from(["thermoglowd", "2.5", "10"]);
        assert_eq!(cli.interval, 2.5);
        assert_eq!(cli.aura_interval, 10.0);
        assert!(!cli.daemonize);
    }

    #[test]
    fn negative_interval_selects_one_shot() {
        let cli = Cli::parse_from(["thermoglowd", "-1", "10"]);
        assert_eq!(cli.interval, -1.0);
    }

    #[test]
    fn missing_arguments_are_an_error() {
        assert!(Cli::try_parse_from(["thermoglowd", "2"]).is_err());
    }
}
