//! Command handlers: run one operation, print its report, pick the exit code.

use anyhow::{Context, Result};
use imgnum::{Imgnum, ImgnumConfig, VerifyReport};
use serde::Serialize;

use crate::error::CliExitCode;
use crate::render;
use crate::Commands;

pub fn dispatch(command: Commands) -> Result<CliExitCode> {
    match command {
        Commands::Encode { input, output } => {
            let report = Imgnum::default().encode(&input, &output)?;
            print!("{}", render::encode(&report));
            Ok(CliExitCode::Success)
        }
        Commands::Decode { input, output } => {
            let report = Imgnum::default().decode(&input, &output)?;
            print!("{}", render::decode(&report));
            Ok(CliExitCode::Success)
        }
        Commands::Decimal {
            input,
            output,
            max_bytes,
        } => {
            let bench = Imgnum::new(ImgnumConfig {
                decimal_limit: max_bytes,
                ..ImgnumConfig::default()
            });
            let report = bench.decimal(&input, &output)?;
            print!("{}", render::decimal(&report));
            Ok(CliExitCode::Success)
        }
        Commands::Info { input, json } => {
            let report = Imgnum::default().info(&input)?;
            if json {
                print_json(&report)?;
            } else {
                print!("{}", render::info(&report));
            }
            Ok(CliExitCode::Success)
        }
        Commands::Hash { input, json } => {
            let report = Imgnum::default().hash(&input)?;
            if json {
                print_json(&report)?;
            } else {
                print!("{}", render::hash(&report));
            }
            Ok(CliExitCode::Success)
        }
        Commands::Verify { input, image } => {
            let report = Imgnum::default().verify(&input, &image)?;
            print!("{}", render::verify(&report));
            Ok(match report {
                VerifyReport::DimensionMismatch { .. } => CliExitCode::DimensionMismatch,
                VerifyReport::Compared { matched: true, .. } => CliExitCode::Success,
                VerifyReport::Compared { matched: false, .. } => CliExitCode::Mismatch,
            })
        }
        Commands::Seal { input, output } => {
            let report = Imgnum::default().seal(&input, &output)?;
            print!("{}", render::seal(&report));
            Ok(CliExitCode::Success)
        }
        Commands::Checkseal { input, seal } => {
            let report = Imgnum::default().check_seal(&input, &seal)?;
            print!("{}", render::check_seal(&report));
            Ok(if report.is_match() {
                CliExitCode::Success
            } else {
                CliExitCode::Mismatch
            })
        }
        Commands::Batchseal {
            folder,
            recursive,
            index,
        } => {
            let summary = Imgnum::default().batch_seal(&folder, recursive, index.as_deref())?;
            print!("{}", render::batch(&summary));
            Ok(if summary.all_sealed() {
                CliExitCode::Success
            } else {
                CliExitCode::PartialFailure
            })
        }
    }
}

fn print_json<T: Serialize>(report: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(report).context("serializing report")?;
    println!("{text}");
    Ok(())
}
