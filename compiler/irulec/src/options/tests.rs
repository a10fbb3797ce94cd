#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;

fn parse(args: &[&str]) -> Result<(Command, CliOptions), CliError> {
    CliOptions::parse(args.iter().copied())
}

#[test]
fn test_no_arguments_starts_repl() {
    let (command, options) = parse(&[]).unwrap();
    assert_eq!(command, Command::Repl);
    assert_eq!(options, CliOptions::default());
}

#[test]
fn test_path_and_flags() {
    let (command, options) = parse(&["-p", "rule.irule", "--debug"]).unwrap();
    assert_eq!(command, Command::Check(PathBuf::from("rule.irule")));
    assert!(options.print_errors);
    assert!(options.debug);
    assert_eq!(options.color, ColorMode::Auto);
}

#[test]
fn test_long_flags() {
    let (_, options) = parse(&["--print-errors", "--color=never", "x"]).unwrap();
    assert!(options.print_errors);
    assert_eq!(options.color, ColorMode::Never);
}

#[test]
fn test_help_and_version_win() {
    assert_eq!(parse(&["-h", "--bogus"]).unwrap().0, Command::Help);
    assert_eq!(parse(&["rule.irule", "--version"]).unwrap().0, Command::Version);
}

#[test]
fn test_unknown_flag() {
    let err = parse(&["-x"]).unwrap_err();
    assert!(matches!(err, CliError::UnknownFlag(ref flag) if flag == "-x"));
    assert_eq!(err.to_string(), "unknown option '-x'");
}

#[test]
fn test_invalid_color() {
    let err = parse(&["--color=sometimes"]).unwrap_err();
    assert!(matches!(err, CliError::InvalidColor(_)));
}

#[test]
fn test_second_path_is_rejected() {
    let err = parse(&["a.irule", "b.irule"]).unwrap_err();
    assert_eq!(err.to_string(), "more than one input file: 'a.irule' and 'b.irule'");
}

#[test]
fn test_lone_dash_is_a_path() {
    let (command, _) = parse(&["-"]).unwrap();
    assert_eq!(command, Command::Check(PathBuf::from("-")));
}
