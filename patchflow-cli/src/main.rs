use clap::Parser;
use patchflow::image::io::load_gray_image;
use patchflow::viz::flow_to_rgb;
use patchflow::{Matcher, OffsetField, SearchParams};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Dense PatchMatch correspondence between two images")]
struct Cli {
    /// First frame (any format the `image` crate decodes; converted to
    /// grayscale).
    image1: PathBuf,
    /// Second frame, same dimensions as the first.
    image2: PathBuf,
    /// Propagation/random-search iterations per pyramid level.
    #[arg(short, long, default_value_t = 4)]
    iterations: usize,
    /// Half-width of the comparison window.
    #[arg(short = 'r', long, default_value_t = 4)]
    match_radius: usize,
    /// Maximal displacement per axis.
    #[arg(short = 'm', long, default_value_t = 20)]
    max_offset: i32,
    /// Initial random-search radius; defaults to the maximal displacement.
    #[arg(short = 's', long)]
    search_radius: Option<u32>,
    /// Contraction of the random-search radius per step, in (0, 1).
    #[arg(short = 'w', long, default_value_t = 0.5)]
    search_ratio: f32,
    /// Number of pyramid levels.
    #[arg(short = 'p', long, default_value_t = 3)]
    pyramid: usize,
    /// Random seed; a fixed seed makes the run reproducible.
    #[arg(long)]
    seed: Option<u64>,
    /// Path of the flow visualization to write.
    #[arg(short, long, default_value = "flow.png")]
    output: PathBuf,
    /// Optional path for a JSON dump of the interior offsets.
    #[arg(long)]
    dump_field: Option<PathBuf>,
    /// Enable tracing output for performance profiling.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Serialize)]
struct CellRecord {
    x: usize,
    y: usize,
    dx: i32,
    dy: i32,
    quality: f32,
}

#[derive(Debug, Serialize)]
struct FieldDump {
    width: usize,
    height: usize,
    border: usize,
    cells: Vec<CellRecord>,
}

fn dump_interior(field: &OffsetField, border: usize) -> FieldDump {
    let mut cells = Vec::new();
    for y in border..field.height().saturating_sub(border) {
        for x in border..field.width().saturating_sub(border) {
            let cell = field.get(x, y).expect("interior cell in bounds");
            cells.push(CellRecord {
                x,
                y,
                dx: cell.offset.dx,
                dy: cell.offset.dy,
                quality: cell.quality,
            });
        }
    }
    FieldDump {
        width: field.width(),
        height: field.height(),
        border,
        cells,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("patchflow=info".parse()?))
            .with_target(false)
            .init();
    }

    let params = SearchParams {
        match_radius: cli.match_radius,
        max_offset: cli.max_offset,
        search_radius: cli.search_radius,
        search_ratio: cli.search_ratio,
        iterations: cli.iterations,
        levels: cli.pyramid,
        ..SearchParams::default()
    };
    let matcher = Matcher::new(params)?;

    let image1 = load_gray_image(&cli.image1)?;
    let image2 = load_gray_image(&cli.image2)?;

    let seed = cli.seed.unwrap_or_else(rand::random);
    println!("Parameters:");
    println!("  iterations:    {}", cli.iterations);
    println!("  pyramid:       {}", cli.pyramid);
    println!("  match-radius:  {}", cli.match_radius);
    println!("  max-offset:    {}", cli.max_offset);
    println!(
        "  search-radius: {}",
        cli.search_radius.unwrap_or(cli.max_offset as u32)
    );
    println!("  search-ratio:  {}", cli.search_ratio);
    println!("  seed:          {seed}");
    println!();
    println!("Image size: {}x{}", image1.width(), image1.height());

    let mut rng = StdRng::seed_from_u64(seed);
    let field = matcher.compute(image1.view(), image2.view(), &mut rng)?;

    flow_to_rgb(&field).save(&cli.output)?;
    println!("Flow visualization written to {}", cli.output.display());

    if let Some(path) = cli.dump_field {
        let dump = dump_interior(&field, matcher.params().border());
        fs::write(&path, serde_json::to_string_pretty(&dump)?)?;
        println!("Field dump written to {}", path.display());
    }

    Ok(())
}
