// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Share Matrix
//!
//! Without arguments, prints how a second subscriber fares under every share
//! policy and canonical timing, followed by each cell's transcript.
//!
//! With a scenario file, plays that scenario back in real time:
//!
//! ```text
//! share-matrix [--json] [--pace <micros>] [scenario.json]
//! ```

use anyhow::{bail, Context, Result};
use sharesim::{matrix, playback, render, Scenario};
use std::time::Duration;

struct Args {
    json: bool,
    pace: Duration,
    scenario: Option<String>,
}

fn parse_args() -> Result<Args> {
    let mut args = Args {
        json: false,
        pace: Duration::from_millis(1),
        scenario: None,
    };

    let mut raw = std::env::args().skip(1);
    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "--json" => args.json = true,
            "--pace" => {
                let micros = raw.next().context("--pace needs a value in microseconds")?;
                let micros: u64 = micros
                    .parse()
                    .with_context(|| format!("Invalid pace {micros:?}"))?;
                args.pace = Duration::from_micros(micros);
            }
            flag if flag.starts_with("--") => bail!("Unknown option {flag}"),
            path => args.scenario = Some(path.to_string()),
        }
    }
    Ok(args)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = parse_args()?;

    let Some(path) = args.scenario else {
        let rows = matrix::run_matrix()?;
        if args.json {
            let logs = rows.iter().map(|row| &row.log).collect::<Vec<_>>();
            println!("{}", serde_json::to_string_pretty(&logs)?);
            return Ok(());
        }

        print!("{}", matrix::summary(&rows));
        for row in &rows {
            println!("\n{} / {}: {}", row.policy, row.timing.name, row.sharing);
            print!("{}", render::text(&row.log));
        }
        return Ok(());
    };

    let scenario = Scenario::load(&path)?;
    let log = scenario.run()?;

    if args.json {
        println!("{}", render::json(&log)?);
        return Ok(());
    }

    println!("{} ({})", scenario.name, scenario.policy);
    let played = playback::play(&log, args.pace, |time, line| {
        println!("{:>7}  {line}", time.to_string());
    })
    .await;
    println!("\n{played} entries, {} activation(s)", log.activation_count());

    Ok(())
}
