#![allow(missing_docs)]

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help() {
    Command::cargo_bin("pineappl-plot")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::starts_with(
                "Render multi-panel comparison plots of PineAPPL predictions\n\nUsage: pineappl-plot [OPTIONS] <COMMAND>",
            )
            .and(predicate::str::contains(
                "  layout  Shows which panels are drawn for every slice of a payload",
            ))
            .and(predicate::str::contains(
                "  limits  Shows the y-axis limits and ticks chosen for a range of relative values",
            ))
            .and(predicate::str::contains(
                "  render  Renders every slice of a payload into a figure",
            ))
            .and(predicate::str::contains("--no-tex"))
            .and(predicate::str::contains("[default: WARN]")),
        );
}

#[test]
fn no_arguments_print_help() {
    Command::cargo_bin("pineappl-plot")
        .unwrap()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage: pineappl-plot"));
}
