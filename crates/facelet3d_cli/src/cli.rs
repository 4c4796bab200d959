use std::io::Read;
use std::path::PathBuf;

use eyre::{Context, Result, bail, eyre};
use facelet3d::{CubeView, Face, FaceColorTable, Playback, TraceDivergence};
use facelet3d_prefs::Preferences;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use web_time::{Duration, Instant};

/// Headless driver for the facelet3d cube engine
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    #[command(subcommand)]
    pub subcommand: Subcommand,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Play moves through the engine and print the resulting state.
    Play {
        /// Initial facelet state (defaults to solved).
        #[arg(short, long)]
        state: Option<String>,
        /// Solver response JSON to play, use '-' for stdin.
        #[arg(short, long, value_parser)]
        input: Option<clio::Input>,
        /// Frames per second of the simulated animation. If omitted, each
        /// turn settles immediately.
        #[arg(long)]
        fps: Option<u32>,
        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
        /// Preferences file to use instead of the default one.
        #[arg(long)]
        prefs: Option<PathBuf>,

        /// Move tokens (such as `R`, `U'`, or `F2`), played after any moves
        /// from the input.
        moves: Vec<String>,
    },
    /// Check that a facelet state is well-formed and survives a round trip
    /// through the lattice.
    Check {
        /// Facelet state to check.
        state: String,
    },
    /// Print the effective preferences as YAML.
    Prefs {
        /// Preferences file to use instead of the default one.
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

/// Response from the solving service.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
struct SolverResponse {
    /// State expected after every move has been played.
    facelets: Option<String>,
    moves: MoveList,
    /// `trace[0]` is the initial state and `trace[i + 1]` is the state after
    /// move `i`.
    trace: Option<Vec<String>>,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum MoveList {
    Tokens(Vec<String>),
    Text(String),
}
impl Default for MoveList {
    fn default() -> Self {
        Self::Tokens(vec![])
    }
}
impl MoveList {
    fn into_tokens(self) -> Vec<String> {
        match self {
            Self::Tokens(tokens) => tokens,
            Self::Text(text) => text.split_whitespace().map(str::to_owned).collect(),
        }
    }
}

#[derive(Serialize, Debug)]
struct PlayOutput<'a> {
    facelets: String,
    moves: usize,
    /// Whether the final state matches the solver's result, if it sent one.
    matches_result: Option<bool>,
    divergences: &'a [TraceDivergence],
}

pub(crate) fn exec(subcommand: Subcommand) -> Result<()> {
    match subcommand {
        Subcommand::Play {
            state,
            input,
            fps,
            json,
            prefs,
            moves,
        } => {
            let response = match input {
                Some(mut input) => {
                    let mut buffer = String::new();
                    input
                        .read_to_string(&mut buffer)
                        .context("error reading solver response")?;
                    serde_json::from_str::<SolverResponse>(&buffer)
                        .context("error deserializing solver response")?
                }
                None => SolverResponse::default(),
            };
            if state.is_some() && response.trace.is_some() {
                bail!("--state conflicts with the trace's initial state");
            }

            let mut tokens = response.moves.into_tokens();
            tokens.extend(moves);
            let mut playback = Playback::parse(&tokens, response.trace)?;

            let prefs = Preferences::load(prefs.as_deref());
            let mut view = CubeView::new(&prefs.view_settings());
            if let Some(state) = &state {
                view.apply_full_state(state)
                    .with_context(|| format!("error applying state {state:?}"))?;
            }
            playback.start(&mut view)?;

            let frame_interval = match fps {
                Some(0) | None => Duration::ZERO,
                Some(fps) => Duration::from_secs(1) / fps,
            };
            let start = Instant::now();
            let end = playback.run(&mut view, start, frame_interval);
            log::debug!("simulated {:?} of animation", end - start);

            let facelets = view.current_facelet_string();
            let matches_result = response.facelets.as_ref().map(|r| *r == facelets);
            if matches_result == Some(false) {
                log::warn!("final state differs from the solver's result");
            }

            if json {
                write_json_output(&PlayOutput {
                    facelets,
                    moves: playback.moves().len(),
                    matches_result,
                    divergences: playback.divergences(),
                })?;
            } else {
                println!("{facelets}");
                if let (Some(false), Some(expected)) = (matches_result, &response.facelets) {
                    println!("solver result {expected} does not match");
                }
                for d in playback.divergences() {
                    println!(
                        "step {}: expected {} but got {}",
                        d.step, d.expected, d.actual,
                    );
                }
            }
            Ok(())
        }

        Subcommand::Check { state } => {
            let table = FaceColorTable::decode(&state)?;
            let mut view = CubeView::default();
            view.apply_full_state(&state)?;
            let rebuilt = view.current_facelet_string();
            if rebuilt != state {
                return Err(eyre!("state {state:?} was rebuilt as {rebuilt:?}"));
            }
            for face in Face::iter() {
                println!("{face}: {}", table.center(face));
            }
            println!("ok");
            Ok(())
        }

        Subcommand::Prefs { path } => {
            let prefs = Preferences::load(path.as_deref());
            print!("{}", prefs.to_yaml()?);
            Ok(())
        }
    }
}

fn write_json_output<T: Serialize>(value: &T) -> Result<()> {
    serde_json::to_writer_pretty(std::io::stdout(), value)
        .context("error serializing data and writing to stdout")?;
    println!();
    Ok(())
}
