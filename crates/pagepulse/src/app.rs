use clap::{Arg, ArgAction, Command};

use pagepulse_core::poller::MAX_POLL_INTERVAL_SECS;

pub fn build_cli() -> Command {
    Command::new("pagepulse")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Drive a page shell's refresh registry through scripted lifecycle steps")
        .long_about(
            "pagepulse models the polling fragments of an admin console page. \
             Fragments register with the page's refresh registry; blocking modals \
             pause and resume all of them. The simulate command runs a sequence of \
             steps and prints every refresher call it caused.",
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging output")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("simulate")
                .about("Run lifecycle steps against a page shell and print the call trace")
                .after_help(
                    "Steps:\n  \
                     page:<name>      navigate, clearing the outgoing page's refreshers\n  \
                     add:<fragment>   register a poller\n  \
                     main:<fragment>  register a poller as the main-content refresher\n  \
                     fail:<fragment>  register a refresher whose stop/restart always fail\n  \
                     disable          stop every refresher\n  \
                     enable           restart every refresher\n  \
                     modal-open       open a blocking modal\n  \
                     modal-close      close a blocking modal\n  \
                     after:<fragment> queue a callback on the main refresher\n  \
                     cycle:<fragment> report a finished refresh of a fragment\n  \
                     clear            empty the registry",
                )
                .arg(
                    Arg::new("steps")
                        .help("Steps to run, in order")
                        .required(true)
                        .num_args(1..)
                        .index(1),
                )
                .arg(
                    Arg::new("policy")
                        .long("policy")
                        .short('p')
                        .help("Broadcast failure policy (overrides config)")
                        .value_parser(["isolate", "abort"]),
                )
                .arg(
                    Arg::new("interval")
                        .long("interval")
                        .help("Polling interval in seconds (overrides config)")
                        .value_parser(clap::value_parser!(u64).range(1..=MAX_POLL_INTERVAL_SECS)),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("config")
                .about("Show the effective configuration")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Output in JSON format")
                        .action(ArgAction::SetTrue),
                ),
        )
}
