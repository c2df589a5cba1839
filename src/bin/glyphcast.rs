use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use glyphcast::{Options, Palette, StreamDecoder, StreamEncoder};

#[derive(Parser, Debug)]
#[command(name = "glyphcast", version)]
struct Cli {
    /// Log at debug level (RUST_LOG still applies).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert an image or GIF into glyph text.
    Encode(EncodeArgs),
    /// Read a glyph stream and print a JSON summary of its frames.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct EncodeArgs {
    /// Input image. `.gif` files are encoded as animations.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path. Defaults to stdout.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Options JSON file; flags below override its values.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Force animated GIF decoding regardless of the file extension.
    #[arg(long)]
    gif: bool,

    /// Resize to width×height (a zero or missing dimension keeps the aspect ratio).
    #[arg(short = 'r', long)]
    resize: bool,

    /// Target width; enables resizing.
    #[arg(short = 'w', long)]
    width: Option<u32>,

    /// Target height; enables resizing.
    #[arg(short = 'H', long)]
    height: Option<u32>,

    /// Fit inside width×height instead of resizing exactly.
    #[arg(short = 't', long)]
    thumbnail: bool,

    /// Horizontal glyph stride.
    #[arg(long)]
    stride_w: Option<f64>,

    /// Vertical glyph stride.
    #[arg(long)]
    stride_h: Option<f64>,

    /// Pixels cropped from the left edge.
    #[arg(long)]
    crop_left: Option<u32>,

    /// Pixels cropped from the right edge.
    #[arg(long)]
    crop_right: Option<u32>,

    /// Pixels cropped from the top edge.
    #[arg(long)]
    crop_top: Option<u32>,

    /// Pixels cropped from the bottom edge.
    #[arg(long)]
    crop_bottom: Option<u32>,

    /// Crop before resizing.
    #[arg(long)]
    crop_first: bool,

    /// Palette characters, darkest first.
    #[arg(short = 'p', long, conflicts_with = "preset")]
    palette: Option<String>,

    /// Built-in palette.
    #[arg(long, value_enum)]
    preset: Option<PresetChoice>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Glyph stream produced by `encode` on an animation.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PresetChoice {
    Blocks,
    BlocksReverse,
    Ascii,
    AsciiReverse,
}

impl PresetChoice {
    fn palette(self) -> Palette {
        match self {
            PresetChoice::Blocks => Palette::blocks(),
            PresetChoice::BlocksReverse => Palette::blocks_reverse(),
            PresetChoice::Ascii => Palette::ascii(),
            PresetChoice::AsciiReverse => Palette::ascii_reverse(),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.cmd {
        Command::Encode(args) => cmd_encode(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn cmd_encode(args: EncodeArgs) -> anyhow::Result<()> {
    let opts = build_options(&args)?;
    let is_gif = args.gif
        || matches!(
            image::ImageFormat::from_path(&args.in_path),
            Ok(image::ImageFormat::Gif)
        );

    let sink = open_output(args.out.as_deref())?;
    let mut enc = StreamEncoder::new(sink, &opts)?;
    if is_gif {
        let file = File::open(&args.in_path)
            .with_context(|| format!("open '{}'", args.in_path.display()))?;
        let anim = glyphcast::decode_gif(BufReader::new(file))?;
        let n = enc.encode_animation(&anim)?;
        tracing::info!(frames = n, "encoded gif");
    } else {
        let img = image::open(&args.in_path)
            .with_context(|| format!("decode image '{}'", args.in_path.display()))?;
        enc.encode_still(&img.to_rgba16())?;
    }
    enc.finish()?.flush()?;

    if let Some(out) = &args.out {
        eprintln!("wrote {}", out.display());
    }
    Ok(())
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let file =
        File::open(&args.in_path).with_context(|| format!("open '{}'", args.in_path.display()))?;
    let mut decoder = StreamDecoder::new(BufReader::new(file));

    let mut frames = Vec::new();
    let mut total_ms = 0u64;
    while let Some(frame) = decoder.next_frame()? {
        total_ms += frame.delay_ms();
        frames.push(serde_json::json!({
            "index": frames.len(),
            "delay": frame.delay,
            "rows": frame.row_count(),
            "cols": frame.rows().map(|r| r.chars().count()).max().unwrap_or(0),
        }));
    }

    let summary = serde_json::json!({
        "frame_count": frames.len(),
        "total_delay_ms": total_ms,
        "frames": frames,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn build_options(args: &EncodeArgs) -> anyhow::Result<Options> {
    let mut opts = match &args.config {
        Some(path) => Options::from_path(path)?,
        None => Options::default(),
    };

    if args.resize {
        opts.resize = true;
    }
    if let Some(w) = args.width {
        opts.width = w;
        opts.resize = true;
    }
    if let Some(h) = args.height {
        opts.height = h;
        opts.resize = true;
    }
    if args.thumbnail {
        opts.thumbnail = true;
        opts.resize = true;
    }
    if let Some(v) = args.stride_w {
        opts.stride_w = v;
    }
    if let Some(v) = args.stride_h {
        opts.stride_h = v;
    }
    if let Some(v) = args.crop_left {
        opts.crop_left = v;
    }
    if let Some(v) = args.crop_right {
        opts.crop_right = v;
    }
    if let Some(v) = args.crop_top {
        opts.crop_top = v;
    }
    if let Some(v) = args.crop_bottom {
        opts.crop_bottom = v;
    }
    if args.crop_first {
        opts.crop_first = true;
    }
    if let Some(p) = &args.palette {
        opts.palette = Palette::from_chars(p)?;
    }
    if let Some(preset) = args.preset {
        opts.palette = preset.palette();
    }

    opts.validate()?;
    Ok(opts)
}

fn open_output(out: Option<&Path>) -> anyhow::Result<Box<dyn Write>> {
    let Some(path) = out else {
        return Ok(Box::new(BufWriter::new(std::io::stdout().lock())));
    };
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let file = File::create(path).with_context(|| format!("create '{}'", path.display()))?;
    Ok(Box::new(BufWriter::new(file)))
}
