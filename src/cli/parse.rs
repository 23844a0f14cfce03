use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use otter_arena::config::{Config, Fraction};

pub fn cli() -> Command {
    Command::new("otter_arena")
        .about("Loads a formula and exercises the collection and compaction of its clauses")
        .version(env!("CARGO_PKG_VERSION"))

        .arg(Arg::new("path")
            .required(true)
            .value_parser(value_parser!(PathBuf))
            .help("The DIMACS form CNF file to parse."))

        .arg(Arg::new("seed")
            .long("seed")
            .value_parser(value_parser!(u64))
            .required(false)
            .num_args(1)
            .default_value("0")
            .help("The seed used to choose garbage clauses and eliminated variables."))

        .arg(Arg::new("garbage")
            .long("garbage")
            .value_parser(value_parser!(Fraction))
            .required(false)
            .num_args(1)
            .default_value("0.5")
            .help("The fraction of large clauses to mark as garbage before collecting."))

        .arg(Arg::new("eliminate")
            .long("eliminate")
            .value_parser(value_parser!(Fraction))
            .required(false)
            .num_args(1)
            .default_value("0.0")
            .help("The fraction of unassigned variables to eliminate before compacting.")
            .long_help("The fraction of unassigned variables to eliminate before compacting.

Every clause containing an eliminated variable is removed, so the formula changes.
Only the bookkeeping of the arena, the watches, and the variables is exercised."))

        .arg(Arg::new("garbage_fraction")
            .long("garbage-fraction")
            .value_parser(value_parser!(Fraction))
            .required(false)
            .num_args(1)
            .help("The fraction of garbage bytes at which a collection is due."))

        .arg(Arg::new("tombstone_fraction")
            .long("tombstone-fraction")
            .value_parser(value_parser!(Fraction))
            .required(false)
            .num_args(1)
            .help("The fraction of tombstoned slots at which the watch pool is defragmented."))

        .arg(Arg::new("no_compaction")
            .long("no-compaction")
            .action(ArgAction::SetTrue)
            .help("Prevent variables from being renumbered."))

        .arg(Arg::new("detail")
            .short('d')
            .long("detail")
            .value_parser(value_parser!(u8))
            .required(false)
            .num_args(1)
            .default_value("1")
            .help("The level of detail to print."))
}

/// The configuration of the context, from the arguments given.
///
/// Values outside the range of an option are reported and ignored.
pub fn config_from_args(args: &ArgMatches) -> Config {
    let mut the_config = Config::default();

    if let Ok(Some(fraction)) = args.try_get_one::<Fraction>("garbage_fraction") {
        if !the_config.arena.garbage_fraction.set(*fraction) {
            println!("c Ignored garbage fraction {fraction}");
        }
    };

    if let Ok(Some(fraction)) = args.try_get_one::<Fraction>("tombstone_fraction") {
        if !the_config.watches.tombstone_fraction.set(*fraction) {
            println!("c Ignored tombstone fraction {fraction}");
        }
    };

    if let Ok(Some(true)) = args.try_get_one::<bool>("no_compaction") {
        the_config.compact.enabled.value = false;
    };

    the_config
}

/// Options of the binary itself, rather than of the context.
#[derive(Clone, Debug)]
pub struct ConfigIO {
    pub path: PathBuf,
    pub seed: u64,
    pub garbage: Fraction,
    pub eliminate: Fraction,
    pub detail: u8,
}

impl ConfigIO {
    pub fn from_args(args: &ArgMatches) -> Self {
        ConfigIO {
            path: args.get_one::<PathBuf>("path").cloned().unwrap_or_default(),
            seed: args.get_one::<u64>("seed").copied().unwrap_or_default(),
            garbage: args.get_one::<Fraction>("garbage").copied().unwrap_or_default().clamp(0.0, 1.0),
            eliminate: args.get_one::<Fraction>("eliminate").copied().unwrap_or_default().clamp(0.0, 1.0),
            detail: args.get_one::<u8>("detail").copied().unwrap_or(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_reach_the_config() {
        let args = cli()
            .try_get_matches_from(["otter_arena", "f.cnf", "--no-compaction", "--garbage-fraction", "1.5"])
            .unwrap();
        let the_config = config_from_args(&args);

        assert!(!the_config.compact.enabled.value);
        assert_eq!(the_config.arena.garbage_fraction.value, Config::default().arena.garbage_fraction.value);

        let config_io = ConfigIO::from_args(&args);
        assert_eq!(config_io.path, PathBuf::from("f.cnf"));
        assert_eq!(config_io.seed, 0);
        assert_eq!(config_io.detail, 1);
        assert_eq!(config_io.garbage, 0.5);
    }
}
