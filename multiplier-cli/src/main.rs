use std::error::Error;
use std::io::{self, BufRead, Write};

use clap::{Args, Parser, Subcommand};
use multiplier_common::cli::{env_truthy, format_register_panel, format_snapshot_row};
use multiplier_common::digest::run_digest;
use multiplier_common::explain::SECTIONS;
use multiplier_common::playback::Playback;
use multiplier_common::{BitWidthMode, Run, generate};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

type AppResult<T> = Result<T, Box<dyn Error>>;

#[derive(Parser)]
#[command(author, version, about = "Shift-and-add multiplier built from PIPO registers")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every register snapshot of one multiplication
    Run {
        #[command(flatten)]
        operands: OperandArgs,
        /// Emit the run as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Advance one snapshot per Enter press (`q` quits)
    Step {
        #[command(flatten)]
        operands: OperandArgs,
    },
    /// Generate every operand pair concurrently and check the products
    Verify {
        /// Only sweep one width; both by default
        #[arg(short, long)]
        mode: Option<BitWidthMode>,
    },
    /// Print the shift-and-add and PIPO register explanations
    Explain,
}

#[derive(Args)]
struct OperandArgs {
    /// Multiplicand (A)
    #[arg(allow_hyphen_values = true)]
    multiplicand: i64,
    /// Multiplier (B)
    #[arg(allow_hyphen_values = true)]
    multiplier: i64,
    #[arg(short, long, env = "PIPO_MODE", default_value = "4-bit")]
    mode: BitWidthMode,
    /// Pass operands through unclamped so out-of-range values are rejected
    #[arg(long)]
    strict: bool,
}

impl OperandArgs {
    /// Applies the caller-side clamp unless strict mode is on.
    fn resolve(&self) -> AppResult<(u64, u64)> {
        if self.strict || env_truthy("PIPO_STRICT") {
            let a = u64::try_from(self.multiplicand)
                .map_err(|_| format!("multiplicand must be non-negative: {}", self.multiplicand))?;
            let b = u64::try_from(self.multiplier)
                .map_err(|_| format!("multiplier must be non-negative: {}", self.multiplier))?;
            return Ok((a, b));
        }

        let a = self.mode.clamp_operand(self.multiplicand);
        let b = self.mode.clamp_operand(self.multiplier);
        if (a as i64, b as i64) != (self.multiplicand, self.multiplier) {
            warn!(
                mode = %self.mode,
                multiplicand = a,
                multiplier = b,
                "operands clamped to [0, {}]",
                self.mode.max_operand_value()
            );
        }
        Ok((a, b))
    }

    fn generate(&self) -> AppResult<Run> {
        let (a, b) = self.resolve()?;
        Ok(generate(a, b, self.mode)?)
    }
}

fn print_run(run: &Run) {
    println!(
        "{} x {} ({}-bit operands)",
        run.multiplicand_value, run.multiplier_value, run.operand_bits
    );
    for (idx, snap) in run.iter().enumerate() {
        println!("{}", format_snapshot_row(idx, snap));
    }
    if let Some(product) = run.final_product() {
        println!("product={product}");
    }
    println!("digest=0x{}", hex::encode(run_digest(run)));
}

fn step_interactive(run: Run) -> AppResult<()> {
    let mut playback = Playback::new(run);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let idx = playback.index();
        if let Some(snap) = playback.current() {
            println!("{}", format_snapshot_row(idx, snap));
            println!("{}", format_register_panel(snap));
        }
        if playback.is_finished() {
            break;
        }

        print!("[Enter] next step, q to quit > ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        if line?.trim().eq_ignore_ascii_case("q") {
            break;
        }
        playback.advance();
    }
    Ok(())
}

/// Fans every operand pair of `mode` out as an independent blocking task.
async fn verify_mode(mode: BitWidthMode) -> AppResult<usize> {
    let max = mode.max_operand_value();
    let mut handles = Vec::new();
    for a in 0..=max {
        for b in 0..=max {
            handles.push(tokio::task::spawn_blocking(move || {
                generate(a, b, mode).map(|run| (a, b, run))
            }));
        }
    }

    let mut checked = 0usize;
    for handle in handles {
        let (a, b, run) = handle.await??;
        if run.final_product() != Some(a * b) {
            return Err(format!("{mode}: {a} x {b} settled at {:?}", run.final_product()).into());
        }
        let widths_ok = run.iter().all(|snap| {
            snap.multiplicand.len() == mode.operand_bits()
                && snap.multiplier.len() == mode.operand_bits()
                && snap.accumulator.len() == mode.operand_bits()
                && snap.product.len() == mode.product_bits()
        });
        if !widths_ok {
            return Err(format!("{mode}: {a} x {b} changed a register width").into());
        }
        debug!(%mode, a, b, steps = run.len(), "verified");
        checked += 1;
    }
    Ok(checked)
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Run { operands, json } => {
            let run = operands.generate()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&run)?);
            } else {
                print_run(&run);
            }
        }
        Command::Step { operands } => {
            let run = operands.generate()?;
            tokio::task::spawn_blocking(move || step_interactive(run).map_err(|e| e.to_string()))
                .await??;
        }
        Command::Verify { mode } => {
            let modes = match mode {
                Some(mode) => vec![mode],
                None => BitWidthMode::ALL.to_vec(),
            };
            for mode in modes {
                let checked = verify_mode(mode).await?;
                info!(%mode, checked, "all operand pairs multiply correctly");
                println!("{mode}_verified={checked}");
            }
        }
        Command::Explain => {
            for section in SECTIONS {
                println!("== {}", section.title);
                for line in section.lines {
                    println!("{line}");
                }
                println!();
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use multiplier_common::MultiplierError;

    fn operands(
        multiplicand: i64,
        multiplier: i64,
        mode: BitWidthMode,
        strict: bool,
    ) -> OperandArgs {
        OperandArgs {
            multiplicand,
            multiplier,
            mode,
            strict,
        }
    }

    #[test]
    fn clamps_raw_operands_into_mode_range() {
        let args = operands(9, -1, BitWidthMode::TwoBit, false);
        assert_eq!(args.resolve().unwrap(), (3, 0));
        let run = args.generate().unwrap();
        assert_eq!(run.final_product(), Some(0));
    }

    #[test]
    fn strict_rejects_negative_operands() {
        let err = operands(-1, 0, BitWidthMode::TwoBit, true)
            .resolve()
            .unwrap_err();
        assert!(err.to_string().contains("multiplicand must be non-negative"));
    }

    #[test]
    fn strict_lets_generator_reject_out_of_range() {
        let err = operands(4, 0, BitWidthMode::TwoBit, true)
            .generate()
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<MultiplierError>(),
            Some(&MultiplierError::InvalidOperand {
                name: "multiplicand",
                value: 4,
                max: 3
            })
        );
    }

    #[test]
    fn parses_negative_operands_and_mode_alias() {
        let cli =
            Cli::try_parse_from(["pipo-multiplier", "run", "-1", "2", "-m", "two"]).unwrap();
        let Command::Run { operands, json } = cli.command else {
            panic!("expected run subcommand");
        };
        assert!(!json);
        assert_eq!(operands.multiplicand, -1);
        assert_eq!(operands.multiplier, 2);
        assert_eq!(operands.mode, BitWidthMode::TwoBit);
        assert_eq!(operands.resolve().unwrap(), (0, 2));
    }
}
