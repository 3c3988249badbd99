use clap::{Parser, Subcommand};
use mscz::meta::{AUDIO_ENTRY, AUDIO_SETTINGS_ENTRY, THUMBNAIL_ENTRY};
use mscz::{Mode, MsczReader};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mscz", about = "The .mscz score container CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the classified container entries
    List {
        input: PathBuf,
    },
    /// Show container metadata
    Info {
        input: PathBuf,
    },
    /// Extract the score and every auxiliary resource
    Extract {
        input: PathBuf,
        #[arg(short = 'C', long, default_value = ".")]
        output_dir: PathBuf,
    },
    /// Write the preview image to a file
    Thumbnail {
        input: PathBuf,
        #[arg(short, long, default_value = "thumbnail.png")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    match Cli::parse().command {
        // ── List ─────────────────────────────────────────────────────────────
        Commands::List { input } => {
            let mut reader = open_reader(&input)?;
            let meta = reader.meta().clone();
            match &meta.score_path {
                Some(path) => println!("score      {path}"),
                None => println!("score      (none)"),
            }
            for path in &meta.image_paths {
                println!("image      {path}");
            }
            for name in [THUMBNAIL_ENTRY, AUDIO_ENTRY, AUDIO_SETTINGS_ENTRY] {
                let size = reader.file_data(name).len();
                if size > 0 {
                    println!("resource   {name}  {size} B");
                }
            }
        }

        // ── Info ─────────────────────────────────────────────────────────────
        Commands::Info { input } => {
            let mut reader = open_reader(&input)?;
            let meta = reader.meta().clone();
            println!("── .mscz container ─────────────────────────────────────");
            println!("  Path       {}", input.display());
            println!("  Mode       {:?}", reader.mode());
            println!("  Root       {}", reader.root_path().display());
            println!("  Score      {}", meta.score_path.as_deref().unwrap_or("(none)"));
            println!("  Images     {}", meta.image_paths.len());
            println!("  Thumbnail  {} B", reader.read_thumbnail_file().len());
            println!("  Audio      {} B", reader.read_audio_file().len());
        }

        // ── Extract ──────────────────────────────────────────────────────────
        Commands::Extract { input, output_dir } => {
            let mut reader = open_reader(&input)?;
            fs::create_dir_all(&output_dir)?;
            let meta = reader.meta().clone();

            let mut entries: Vec<String> = Vec::new();
            entries.extend(meta.score_path.clone());
            entries.extend(meta.image_paths.iter().cloned());
            entries.extend(
                [THUMBNAIL_ENTRY, AUDIO_ENTRY, AUDIO_SETTINGS_ENTRY]
                    .into_iter()
                    .map(str::to_string),
            );

            for name in entries {
                let data = reader.file_data(&name);
                if data.is_empty() {
                    continue;
                }
                let dest = output_dir.join(&name);
                if let Some(parent) = dest.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::write(&dest, &data)?;
                println!("  extracted  {name}");
            }
        }

        // ── Thumbnail ────────────────────────────────────────────────────────
        Commands::Thumbnail { input, output } => {
            let mut reader = open_reader(&input)?;
            let data = reader.read_thumbnail_file();
            if data.is_empty() {
                return Err("container holds no thumbnail".into());
            }
            fs::write(&output, &data)?;
            println!("Wrote {} ({} B)", output.display(), data.len());
        }
    }

    Ok(())
}

// ── helpers ──────────────────────────────────────────────────────────────────

fn open_reader(input: &Path) -> Result<MsczReader, Box<dyn std::error::Error>> {
    let mut reader = if input.is_dir() {
        // Unpacked tree: bind a leaf inside it so the tree is the scan root.
        MsczReader::new(input.join("score.mscx"), Mode::Dir)
    } else {
        MsczReader::new(input, Mode::Zip)
    };
    if !reader.open() {
        return Err(format!("cannot open container: {}", input.display()).into());
    }
    Ok(reader)
}
