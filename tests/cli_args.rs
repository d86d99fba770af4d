// tests/cli_args.rs

use clap::Parser;
use wbsplan::cli::CliArgs;
use wbsplan::types::HoldPointPlacement;
use wbsplan_test_utils::day;

#[test]
fn test_minimal_invocation() {
    let args = CliArgs::try_parse_from(["wbsplan", "--deliverables", "d.json"]).unwrap();

    assert_eq!(args.deliverables, "d.json");
    assert!(args.config.is_none());
    assert!(args.today.is_none());
    assert!(args.hold_point_placement.is_none());
    assert!(!args.json);
    assert!(!args.dry_run);
}

#[test]
fn test_placement_and_reference_date_are_parsed() {
    let args = CliArgs::try_parse_from([
        "wbsplan",
        "--deliverables",
        "d.json",
        "--hold-point-placement",
        "Entry",
        "--today",
        "2025-03-05",
        "--json",
    ])
    .unwrap();

    assert_eq!(args.hold_point_placement, Some(HoldPointPlacement::Entry));
    assert_eq!(args.today, Some(day(2)));
    assert!(args.json);
}

#[test]
fn test_unknown_placement_is_rejected() {
    let result = CliArgs::try_parse_from([
        "wbsplan",
        "--deliverables",
        "d.json",
        "--hold-point-placement",
        "sideways",
    ]);

    let err = result.unwrap_err().to_string();
    assert!(err.contains("sideways"));
}
