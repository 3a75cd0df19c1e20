// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Help output specs
//!
//! Verify the command surface is discoverable.

use crate::prelude::*;

#[test]
fn top_level_help_lists_commands() {
    let temp = Project::empty();
    temp.rc()
        .args(&["--help"])
        .passes()
        .stdout_has("register")
        .stdout_has("check-in")
        .stdout_has("volunteer")
        .stdout_has("stats");
}

#[test]
fn event_help_lists_subcommands() {
    let temp = Project::empty();
    temp.rc()
        .args(&["event", "--help"])
        .passes()
        .stdout_has("create")
        .stdout_has("participants")
        .stdout_has("delete");
}

#[test]
fn missing_subcommand_fails() {
    let temp = Project::empty();
    temp.rc().args(&[]).fails().stderr_has("Usage");
}
