// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use clap::ValueEnum;
use serde::Serialize;
use std::fmt::Display;

#[cfg(test)]
#[path = "output_tests.rs"]
mod tests;

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Table cell for an optional value, `-` when absent.
pub fn cell<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Print a one-line result of an action, or the JSON object for it.
pub fn print_action(format: OutputFormat, text: &str, json: serde_json::Value) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{text}");
            Ok(())
        }
        OutputFormat::Json => print_json(&json),
    }
}
