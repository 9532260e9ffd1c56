// SPDX-FileCopyrightText: 2025 RAprogramm
// SPDX-License-Identifier: MIT

use std::path::PathBuf;

use clap::Parser;
use sql_doc_lint::cli::{Cli, Commands, Format};

#[test]
fn test_format_variants() {
    let _text = Format::Text;
    let _json = Format::Json;
    let _yaml = Format::Yaml;
    let _sarif = Format::Sarif;
}

#[test]
fn test_parse_check_with_all_flags() {
    let cli = Cli::try_parse_from([
        "sql-doc-lint",
        "check",
        "docs",
        "--strict",
        "-f",
        "sarif",
        "-c",
        "lint.toml",
        "--no-color",
        "--verbose"
    ])
    .unwrap();

    assert!(cli.verbose);
    match cli.command {
        Commands::Check {
            root,
            strict,
            output_format,
            config,
            no_color
        } => {
            assert_eq!(root, PathBuf::from("docs"));
            assert!(strict);
            assert!(matches!(output_format, Format::Sarif));
            assert_eq!(config, Some(PathBuf::from("lint.toml")));
            assert!(no_color);
        }
        Commands::Anchors {
            ..
        } => panic!("expected check command")
    }
}

#[test]
fn test_parse_anchors() {
    let cli = Cli::try_parse_from(["sql-doc-lint", "anchors", "docs/a.md"]).unwrap();

    match cli.command {
        Commands::Anchors {
            file,
            json
        } => {
            assert_eq!(file, PathBuf::from("docs/a.md"));
            assert!(!json);
        }
        Commands::Check {
            ..
        } => panic!("expected anchors command")
    }
}

#[test]
fn test_subcommand_required() {
    assert!(Cli::try_parse_from(["sql-doc-lint"]).is_err());
}
