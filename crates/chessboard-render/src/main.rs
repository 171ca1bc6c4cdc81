//! Command-line renderer for the chessboard widget.
//!
//! Builds a board from an optional TOML options file, applies placements and
//! highlights given on the command line, and prints the result as an HTML
//! table or a JSON snapshot.
//!
//! ```text
//! chessboard-render --start --place "E4=WP" --remove E2 --highlight E2,E4
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use chessboard_widget::{Board, BoardOptions, HtmlSurface, PawnLayout};

#[derive(Parser)]
#[command(name = "chessboard-render")]
#[command(about = "Render a chessboard widget to HTML or JSON")]
struct Cli {
    /// TOML file with board options
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Set up the initial position first
    #[arg(short, long)]
    start: bool,
    /// Pawn layout for --start, overriding the options file
    #[arg(long, value_enum)]
    pawn_layout: Option<LayoutArg>,
    /// Placements as SQUARES=TYPE, e.g. "E4,E5=WHITE_PAWN" (repeatable)
    #[arg(short, long)]
    place: Vec<String>,
    /// Squares to empty, comma separated
    #[arg(short, long, value_delimiter = ',')]
    remove: Vec<String>,
    /// Squares to highlight, comma separated
    #[arg(long, value_delimiter = ',')]
    highlight: Vec<String>,
    /// Output format
    #[arg(short, long, value_enum, default_value = "html")]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum LayoutArg {
    Mirrored,
    Standard,
}

impl From<LayoutArg> for PawnLayout {
    fn from(arg: LayoutArg) -> Self {
        match arg {
            LayoutArg::Mirrored => PawnLayout::Mirrored,
            LayoutArg::Standard => PawnLayout::Standard,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Html,
    Json,
}

/// Splits "E4,E5=WHITE_PAWN" into its squares and piece type.
fn parse_placement(arg: &str) -> Result<(Vec<&str>, &str)> {
    let Some((squares, piece)) = arg.split_once('=') else {
        bail!("placement '{}' is not of the form SQUARES=TYPE", arg);
    };
    let squares: Vec<&str> = squares.split(',').filter(|s| !s.trim().is_empty()).collect();
    if squares.is_empty() {
        bail!("placement '{}' names no squares", arg);
    }
    Ok((squares, piece))
}

fn run(cli: &Cli) -> Result<String> {
    let options = match &cli.config {
        Some(path) => BoardOptions::load(path)
            .with_context(|| format!("loading options from {}", path.display()))?,
        None => BoardOptions::default(),
    };
    let mut board = Board::builder(HtmlSurface::new()).options(options).build();

    if cli.start {
        let layout = cli
            .pawn_layout
            .map(PawnLayout::from)
            .unwrap_or(board.config().pawn_layout);
        board.set_start_position_with(layout)?;
    }
    for arg in &cli.place {
        let (squares, piece) = parse_placement(arg)?;
        board
            .place(squares, piece)
            .with_context(|| format!("placing '{}'", arg))?;
    }
    if !cli.remove.is_empty() {
        board.remove(cli.remove.as_slice())?;
    }
    if !cli.highlight.is_empty() {
        board.highlight(cli.highlight.as_slice())?;
    }
    tracing::info!(
        pieces = board.fields().iter().filter(|f| f.occupant().is_some()).count(),
        highlighted = board.get_highlighted().len(),
        "board ready"
    );

    let output = match cli.format {
        Format::Html => board.surface().render()?,
        Format::Json => board.snapshot().to_json()?,
    };
    Ok(output)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output = run(&cli)?;
    println!("{}", output);
    Ok(())
}
