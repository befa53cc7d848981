use std::io::Read;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use orders_core::{acknowledge, Order, ValidationError};

#[derive(Parser)]
#[command(name = "orders")]
#[command(about = "Validate patient orders without running the server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate an order and print its acknowledgement
    Check {
        /// Order JSON (reads stdin when neither this nor --file is given)
        json: Option<String>,
        /// Read the order from a file
        #[arg(long, conflicts_with = "json")]
        file: Option<PathBuf>,
        /// Print validation failures as JSON
        #[arg(long)]
        json_errors: bool,
    },
}

/// Validate `input` and render either the acknowledgement or the list of failures.
fn run(input: &str, json_errors: bool) -> Result<String, String> {
    Order::from_json_str(input)
        .map(|order| acknowledge(&order))
        .map_err(|err| render_errors(&err, json_errors))
}

fn render_errors(err: &ValidationError, as_json: bool) -> String {
    if as_json {
        let violations: Vec<serde_json::Value> = err
            .violations()
            .iter()
            .map(|v| {
                serde_json::json!({
                    "field": v.field,
                    "constraint": v.constraint.as_str(),
                    "message": v.message,
                })
            })
            .collect();
        serde_json::Value::Array(violations).to_string()
    } else {
        err.messages()
            .iter()
            .map(|m| format!("- {m}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Check {
            json,
            file,
            json_errors,
        }) => {
            let input = match (json, file) {
                (Some(json), _) => json,
                (None, Some(path)) => std::fs::read_to_string(path)?,
                (None, None) => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };

            match run(&input, json_errors) {
                Ok(ack) => println!("{ack}"),
                Err(report) => {
                    eprintln!("Order rejected:\n{report}");
                    std::process::exit(2);
                }
            }
        }
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prints_acknowledgement_for_valid_order() {
        let out = run(r#"{"patient":{"kind":"existing","patientId":"P-42"}}"#, false)
            .expect("valid order");
        assert_eq!(out, "Existing patient: P-42");
    }

    #[test]
    fn lists_each_failure_on_its_own_line() {
        let report = run(r#"{"patient":{"kind":"new"}}"#, false).expect_err("invalid order");
        assert_eq!(
            report,
            "- patient.firstName should not be empty\n- patient.lastName should not be empty"
        );
    }

    #[test]
    fn renders_failures_as_json() {
        let report = run("{}", true).expect_err("invalid order");
        let parsed: serde_json::Value = serde_json::from_str(&report).expect("json report");
        assert_eq!(parsed[0]["field"], "patient");
        assert_eq!(parsed[0]["constraint"], "isNotEmpty");
    }

    #[test]
    fn cli_parses_check_with_file() {
        let cli = Cli::try_parse_from(["orders", "check", "--file", "order.json"])
            .expect("parse args");
        assert!(matches!(
            cli.command,
            Some(Commands::Check { file: Some(_), json: None, json_errors: false })
        ));
    }
}
