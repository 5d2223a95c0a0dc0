//! Swatch CLI - color conversions, ΔE00, near-white ranking and blend guesses.

#![allow(clippy::needless_pass_by_value, clippy::doc_markdown)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;
use swatch_blend::{
    BlendError, BlendInferenceEngine, ConfigError, EngineConfig, Guess, GuessRequest,
    MemoryStore, StoreError,
};
use swatch_color::{
    ciede2000, quantize, rank_candidates, ColorError, DeltaECategory, LchBucket, RankMode, Swatch,
};
use thiserror::Error;

#[derive(Parser)]
#[command(name = "swatch")]
#[command(about = "Paint color science and blend-settings inference")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a hex color in every supported color space
    Convert {
        /// Six-digit hex code, with or without '#'
        hex: String,

        /// Published light reflectance value (percent)
        #[arg(long)]
        lrv: Option<f64>,
    },

    /// CIEDE2000 difference between two hex colors
    DeltaE {
        first: String,
        second: String,
    },

    /// Order candidate colors by closeness to a seed
    Rank {
        /// Seed hex color
        #[arg(short, long)]
        seed: String,

        /// Candidate hex colors
        #[arg(required = true)]
        candidates: Vec<String>,

        /// Rank near-white seeds by hue before ΔE00
        #[arg(long)]
        hue_first: bool,
    },

    /// Guess blend settings for a mask role and color
    Guess {
        /// JSON fixture with "colors" and "samples"
        #[arg(short, long)]
        data: PathBuf,

        /// Mask role (e.g. body, trim_fascia)
        #[arg(short, long)]
        role: String,

        /// Catalog color id
        #[arg(short, long)]
        color: i64,

        /// Photo id for photo-scoped precedents
        #[arg(short, long)]
        photo: Option<i64>,

        /// Neighbors to aggregate
        #[arg(short)]
        k: Option<usize>,

        /// Engine config (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Color(#[from] ColorError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Blend(#[from] BlendError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct ConvertReport {
    #[serde(flatten)]
    swatch: Swatch,
    bucket: LchBucket,
    bucket_key: String,
    lrv_lightness: Option<f64>,
}

#[derive(Serialize)]
struct DeltaEReport {
    delta_e: f64,
    category: DeltaECategory,
}

#[derive(Serialize)]
struct RankEntry {
    hex: String,
    delta_e: f64,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Convert { hex, lrv } => {
            let swatch = Swatch::from_hex(0, &hex, lrv)?;
            let bucket = quantize(swatch.lab);
            print_json(&ConvertReport {
                bucket_key: bucket.key(),
                bucket,
                lrv_lightness: swatch.lrv_lightness(),
                swatch,
            })
        }
        Commands::DeltaE { first, second } => {
            let a = Swatch::from_hex(0, &first, None)?;
            let b = Swatch::from_hex(1, &second, None)?;
            let delta_e = ciede2000(a.lab, b.lab);
            print_json(&DeltaEReport {
                delta_e,
                category: DeltaECategory::from_delta_e(delta_e),
            })
        }
        Commands::Rank {
            seed,
            candidates,
            hue_first,
        } => {
            let seed = Swatch::from_hex(0, &seed, None)?;
            let swatches = candidates
                .iter()
                .map(|hex| Swatch::from_hex(0, hex, None))
                .collect::<Result<Vec<_>, _>>()?;
            let labs: Vec<_> = swatches.iter().map(|s| s.lab).collect();
            let mode = if hue_first {
                RankMode::HueFirst
            } else {
                RankMode::DeltaE
            };
            let ranked: Vec<RankEntry> = rank_candidates(seed.lab, &labs, mode)
                .into_iter()
                .map(|i| RankEntry {
                    hex: swatches[i].hex.clone(),
                    delta_e: ciede2000(seed.lab, labs[i]),
                })
                .collect();
            print_json(&ranked)
        }
        Commands::Guess {
            data,
            role,
            color,
            photo,
            k,
            config,
        } => {
            let mut request = GuessRequest::new(role, color);
            request.photo_id = photo;
            request.k = k;
            // unknown colors print `null`
            print_json(&guess_from_fixture(&data, config.as_deref(), &request)?)
        }
    }
}

fn guess_from_fixture(
    data: &Path,
    config: Option<&Path>,
    request: &GuessRequest,
) -> Result<Option<Guess>, CliError> {
    let store = MemoryStore::from_path(data)?;
    let config = match config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let engine = BlendInferenceEngine::with_config(&store, &store, config)?;
    if store.color(request.color_id).is_none() {
        log::info!("color {} not in catalog", request.color_id);
    }
    Ok(engine.guess(request)?)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_guess() {
        let cli = Cli::try_parse_from([
            "swatch", "guess", "--data", "f.json", "--role", "body", "--color", "4", "-k", "3",
        ])
        .unwrap();
        match cli.command {
            Commands::Guess {
                role, color, k, photo, ..
            } => {
                assert_eq!(role, "body");
                assert_eq!(color, 4);
                assert_eq!(k, Some(3));
                assert_eq!(photo, None);
            }
            _ => panic!("expected guess"),
        }
    }

    #[test]
    fn test_rank_requires_candidates() {
        assert!(Cli::try_parse_from(["swatch", "rank", "--seed", "ffffff"]).is_err());
    }

    #[test]
    fn test_convert_rejects_bad_hex() {
        let err = run(Commands::Convert {
            hex: "#12345".to_string(),
            lrv: None,
        })
        .unwrap_err();
        assert!(matches!(err, CliError::Color(ColorError::InvalidHex(_))));
    }

    fn fixture(name: &str) -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(name)
    }

    #[test]
    fn test_guess_unknown_color_is_null() {
        let request = GuessRequest::new("body", 999);
        let guess = guess_from_fixture(&fixture("catalog.json"), None, &request).unwrap();
        assert!(guess.is_none());
        assert_eq!(serde_json::to_string(&guess).unwrap(), "null");
    }

    #[test]
    fn test_guess_known_color_with_config() {
        let request = GuessRequest::new("body", 1);
        let guess = guess_from_fixture(
            &fixture("catalog.json"),
            Some(&fixture("engine.toml")),
            &request,
        )
        .unwrap()
        .unwrap();
        assert_eq!(guess.mask_role, "body");
        assert_eq!(guess.color_id, Some(1));
    }

    #[test]
    fn test_run_guess_unknown_color_succeeds() {
        assert!(run(Commands::Guess {
            data: fixture("catalog.json"),
            role: "body".to_string(),
            color: 999,
            photo: None,
            k: None,
            config: None,
        })
        .is_ok());
    }

    #[test]
    fn test_guess_missing_fixture() {
        let err = run(Commands::Guess {
            data: PathBuf::from("/nonexistent/fixture.json"),
            role: "body".to_string(),
            color: 1,
            photo: None,
            k: None,
            config: None,
        })
        .unwrap_err();
        assert!(matches!(err, CliError::Store(StoreError::Io(_))));
    }
}
