use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use signvox::icon::DEFAULT_ALPHA_THRESHOLD;
use signvox::palette::{self, PALETTE};
use signvox::text::BitmapFont;
use signvox::{model, vox, SignSpec};

mod icon_png;
mod preview_png;

/// Voxel sign generator
#[derive(Parser)]
#[command(name = "signvox", version)]
struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a .vox model from a TOML sign description
    Generate {
        /// Path to the sign .toml
        #[arg(long)]
        config: PathBuf,
        /// PNG icon placed next to the text
        #[arg(long)]
        icon: Option<PathBuf>,
        /// Minimum alpha for an icon pixel to count as filled
        #[arg(long, default_value_t = DEFAULT_ALPHA_THRESHOLD)]
        alpha_threshold: u8,
        /// Output .vox path
        #[arg(short, long, default_value = "sign.vox")]
        output: PathBuf,
        /// Also write a PNG of the sign face
        #[arg(long)]
        preview: Option<PathBuf>,
        /// Pixels per voxel in the preview
        #[arg(long, default_value = "8")]
        scale: usize,
    },
    /// Show the contents of a .vox file
    Inspect {
        /// Path to the .vox file
        path: PathBuf,
    },
    /// List the palette slots used by generated signs
    Palette,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    match cli.command {
        Command::Generate {
            config,
            icon,
            alpha_threshold,
            output,
            preview,
            scale,
        } => cmd_generate(
            &config,
            icon.as_deref(),
            alpha_threshold,
            &output,
            preview.as_deref(),
            scale,
        ),
        Command::Inspect { path } => cmd_inspect(&path),
        Command::Palette => cmd_palette(),
    }
}

/// Load a sign description, attaching the icon if one was given.
fn load_spec(config: &Path, icon: Option<&Path>, alpha_threshold: u8) -> Result<SignSpec> {
    let toml_str = std::fs::read_to_string(config)
        .with_context(|| format!("reading {}", config.display()))?;
    let mut spec = SignSpec::from_toml(&toml_str)
        .with_context(|| format!("parsing sign from {}", config.display()))?;

    if let Some(icon_path) = icon {
        spec.icon = Some(icon_png::load_icon(
            icon_path,
            spec.icon_scale,
            alpha_threshold,
        )?);
    }
    Ok(spec)
}

fn cmd_generate(
    config: &Path,
    icon: Option<&Path>,
    alpha_threshold: u8,
    output: &Path,
    preview: Option<&Path>,
    scale: usize,
) -> Result<()> {
    anyhow::ensure!(scale >= 1, "preview scale must be at least 1");

    let spec = load_spec(config, icon, alpha_threshold)?;
    let grid = model::build(&spec, &BitmapFont).context("generating sign")?;
    let sign = model::assemble(&spec, &grid);

    std::fs::write(output, &sign.payload)
        .with_context(|| format!("writing {}", output.display()))?;
    println!(
        "wrote {} ({}, {}x{}x{}, {} voxels)",
        output.display(),
        sign.label,
        sign.width,
        sign.height,
        sign.depth,
        sign.total_voxels
    );

    if let Some(preview_path) = preview {
        preview_png::write_face_png(&grid, sign.width, sign.height, scale, preview_path)?;
        println!("wrote {}", preview_path.display());
    }
    Ok(())
}

fn cmd_inspect(path: &Path) -> Result<()> {
    let data = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let model =
        vox::decode(&data).with_context(|| format!("decoding {}", path.display()))?;

    println!("Version:   {}", model.version);
    println!(
        "Size:      {} x {} x {} (x, y, z; z up)",
        model.size[0], model.size[1], model.size[2]
    );
    println!("Voxels:    {}", model.voxels.len());

    let mut counts: BTreeMap<u8, usize> = BTreeMap::new();
    for v in &model.voxels {
        *counts.entry(v.index).or_default() += 1;
    }
    println!();
    println!("{:>5} {:>9} {:>8}", "Index", "Color", "Voxels");
    println!("{}", "-".repeat(24));
    for (index, count) in counts {
        println!(
            "{:>5} {:>9} {:>8}",
            index,
            hex_color(model.palette[index as usize]),
            count
        );
    }
    Ok(())
}

fn cmd_palette() -> Result<()> {
    let slots = [
        (palette::BACKPLATE, "hanging sign backplate"),
        (palette::FRAME, "anchor, standard frame and content"),
        (palette::STICKER, "hanging sign content"),
    ];
    println!("{:>5} {:>9}  {}", "Slot", "Color", "Use");
    println!("{}", "-".repeat(52));
    for (slot, usage) in slots {
        println!(
            "{:>5} {:>9}  {}",
            slot,
            hex_color(PALETTE[slot as usize]),
            usage
        );
    }
    Ok(())
}

fn hex_color([r, g, b, a]: [u8; 4]) -> String {
    format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use signvox::spec::SignKind;

    #[test]
    fn bundled_signs_parse_and_generate() {
        for toml_str in [
            include_str!("../signs/wall.toml"),
            include_str!("../signs/tavern.toml"),
        ] {
            let spec = SignSpec::from_toml(toml_str).unwrap();
            let sign = signvox::generate(&spec, &BitmapFont).unwrap();
            assert!(sign.total_voxels > 0, "{}", sign.label);
        }
    }

    #[test]
    fn tavern_is_hanging() {
        let spec = SignSpec::from_toml(include_str!("../signs/tavern.toml")).unwrap();
        assert!(matches!(spec.sign, SignKind::Hanging(_)));
        assert_eq!(spec.depth(), 20);
    }

    #[test]
    fn hex_color_formats_rgba() {
        assert_eq!(hex_color([0xf2, 0xc1, 0x4e, 0xff]), "#f2c14eff");
    }
}
