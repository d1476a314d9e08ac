use std::time::Duration;

use anyhow::Result;
use clap::{arg, value_parser, ArgAction, ArgMatches, Command};
use httpreplay::capture_file_parser::{embedded_base_request, parse_capture_file};
use httpreplay::execute::{replay_request, ReplayOptions};
use httpreplay::http_request::OverrideSet;
use httpreplay::http_request_executor::TransportConfig;
use httpreplay::logger::{init_logger, level_from_verbosity};

fn command() -> Command {
    return Command::new("httpreplay")
        .author(clap::crate_authors!())
        .version(clap::crate_version!())
        .about(clap::crate_description!())
        .arg(
            arg!(-m --method <METHOD>)
                .help("change the method of the request")
                .value_parser(value_parser!(String))
                .action(ArgAction::Set),
        )
        .arg(
            arg!(-u --url <URL>)
                .help("change the url of the request")
                .value_parser(value_parser!(String))
                .action(ArgAction::Set),
        )
        .arg(
            arg!(-H --header <HEADER>)
                .help("add a header to the request. Format: \"name: value\"")
                .value_parser(value_parser!(String))
                .action(ArgAction::Append),
        )
        .arg(
            arg!(-r --"remove-header" <NAME>)
                .help("remove the specified header")
                .value_parser(value_parser!(String))
                .action(ArgAction::Append),
        )
        .arg(
            arg!(-b --body <BODY>)
                .help("replace body")
                .value_parser(value_parser!(String))
                .action(ArgAction::Set),
        )
        .arg(
            arg!(-q --"print-request")
                .help("print raw request")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(-p --"print-response")
                .help("print raw response")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(-c --capture <FILE>)
                .help("read the base request from a capture file instead of the embedded one")
                .value_parser(value_parser!(std::path::PathBuf))
                .action(ArgAction::Set),
        )
        .arg(
            arg!(-n --"dry-run")
                .help("resolve the request without sending it")
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(-t --timeout <SECONDS>)
                .help("request timeout in seconds")
                .value_parser(value_parser!(u64))
                .action(ArgAction::Set),
        )
        .arg(
            arg!(-v --verbose)
                .help("more logging, can be repeated")
                .action(ArgAction::Count),
        );
}

fn replay_options(matches: &ArgMatches) -> Result<ReplayOptions> {
    let mut overrides = OverrideSet::new();
    overrides.method = matches.get_one::<String>("method").cloned();
    overrides.url = matches.get_one::<String>("url").cloned();
    for header in matches.get_many::<String>("header").unwrap_or_default() {
        overrides.add_header(header)?;
    }
    for name in matches.get_many::<String>("remove-header").unwrap_or_default() {
        overrides.remove_header(name);
    }
    overrides.body = matches.get_one::<String>("body").map(|b| b.clone().into_bytes());

    return Ok(ReplayOptions {
        overrides,
        print_request: matches.get_flag("print-request"),
        print_response: matches.get_flag("print-response"),
        dry_run: matches.get_flag("dry-run"),
        transport: TransportConfig {
            follow_redirects: false,
            timeout: matches.get_one::<u64>("timeout").map(|s| Duration::from_secs(*s)),
        },
    });
}

fn main() -> Result<()> {
    let matches = command().get_matches();
    init_logger(level_from_verbosity(matches.get_count("verbose")))?;

    let options = replay_options(&matches)?;
    let base = match matches.get_one::<std::path::PathBuf>("capture") {
        Some(path) => parse_capture_file(path)?,
        None => embedded_base_request()?,
    };

    let mut stdout = std::io::stdout().lock();
    replay_request(&base, options, &mut stdout)?;
    return Ok(());
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpreplay::errors::ReplayError;

    #[test]
    fn command_is_consistent() {
        command().debug_assert();
    }

    #[test]
    fn options_from_arguments() {
        let matches = command().get_matches_from([
            "httpreplay", "-m", "PUT", "-H", "X-A: 1", "--header", "X-B:2",
            "-r", "Cookie", "-b", "new", "-q", "-p", "-t", "5",
        ]);
        let options = replay_options(&matches).unwrap();
        assert_eq!(options.overrides.method.as_deref(), Some("PUT"));
        assert_eq!(options.overrides.url, None);
        assert_eq!(options.overrides.headers_to_add.len(), 2);
        assert!(options.overrides.removes("cookie"));
        assert_eq!(options.overrides.body, Some(b"new".to_vec()));
        assert!(options.print_request && options.print_response && !options.dry_run);
        assert_eq!(options.transport.timeout, Some(Duration::from_secs(5)));
        assert!(!options.transport.follow_redirects);
    }

    #[test]
    fn malformed_header_is_rejected() {
        let matches = command().get_matches_from(["httpreplay", "-H", "no-separator"]);
        let err = replay_options(&matches).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ReplayError>(),
            Some(ReplayError::MalformedHeaderOverride(s)) if s == "no-separator"
        ));
    }
}
