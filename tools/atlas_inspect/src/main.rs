//! Offline inspection of a location list: runs layout and terrain derivation
//! and prints the resulting snapshot as JSON or a per-tile table.

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use atlas_core::{
    atlas::build_atlas_with,
    fingerprint::layout_key,
    location::{parse_locations, validate_locations},
    AtlasSnapshot, LayoutParams,
};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Table,
}

#[derive(Parser, Debug)]
#[command(name = "atlas_inspect", about = "Lay out a location graph and derive per-tile terrain")]
struct Args {
    /// JSON array of location records.
    input: PathBuf,

    /// Output format.
    #[arg(short, long, value_enum, default_value = "table")]
    format: Format,

    /// Version number stamped on the snapshot.
    #[arg(long, default_value_t = 0)]
    snapshot_version: u64,

    /// Optional JSON file overriding layout parameters.
    #[arg(short, long)]
    params: Option<PathBuf>,

    /// Reject input with duplicate ids or repeated compass exits.
    #[arg(long)]
    strict: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn load_params(path: Option<&PathBuf>) -> Result<LayoutParams> {
    let Some(path) = path else {
        return Ok(LayoutParams::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let params: LayoutParams =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    params
        .validate()
        .with_context(|| format!("checking {}", path.display()))?;
    Ok(params)
}

fn print_table(snapshot: &AtlasSnapshot) {
    println!(
        "{:<16} {:>5} {:>5} {:>6} {:>6} {:>6} {:<15} {:>6} {:>6}  {}",
        "Id", "GX", "GY", "NX", "NY", "Elev", "Band", "FlowX", "FlowY", "Tags"
    );
    println!("{}", "-".repeat(110));
    for (id, tile) in &snapshot.tiles {
        let (Some(cell), Some(pos)) = (snapshot.layout.cell(id), snapshot.layout.position(id)) else {
            continue;
        };
        let tags: Vec<String> = tile.profile.iter().map(|t| format!("{t:?}")).collect();
        println!(
            "{:<16} {:>5} {:>5} {:>6.3} {:>6.3} {:>6.2} {:<15} {:>6.2} {:>6.2}  {}",
            id,
            cell.x,
            cell.y,
            pos.x,
            pos.y,
            tile.elevation,
            tile.band.label(),
            tile.flow.x,
            tile.flow.y,
            tags.join(",")
        );
    }
    if let Some(b) = snapshot.layout.bounds {
        println!(
            "\nbounds x {}..{} y {}..{} (padding {})",
            b.min_x, b.max_x, b.min_y, b.max_y, b.padding
        );
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let locations = parse_locations(&text)
        .with_context(|| format!("parsing {}", args.input.display()))?;
    if args.strict {
        validate_locations(&locations).context("input failed validation")?;
    }
    let params = load_params(args.params.as_ref())?;

    let key = format!("{:016x}", layout_key(&locations));
    tracing::info!(locations = locations.len(), key = %key, "building snapshot");
    let snapshot = build_atlas_with(&locations, args.snapshot_version, &params);

    match args.format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
        Format::Table => print_table(&snapshot),
    }
    Ok(())
}
