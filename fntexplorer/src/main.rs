//! Inspect, render, measure and convert bitmap font files.
//!
//! Set `RUST_LOG=debug` to see what the library does while loading, growing
//! and saving fonts.

use std::path::PathBuf;

use bitfont::{BitmapFont, FontData};

mod code_point;
mod print;

use code_point::CodePoint;

#[derive(clap::Parser, Debug)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Print the header, metrics and block coverage of a font
    Info {
        /// The font file
        font: PathBuf,
    },
    /// Draw glyphs as text
    Glyph {
        /// The font file
        font: PathBuf,
        /// Code points to draw, as U+XXXX, 0xXXXX or decimal
        #[arg(required = true)]
        code_points: Vec<CodePoint>,
    },
    /// Print the advance width of a string
    Measure {
        /// The font file
        font: PathBuf,
        /// The text to measure
        text: String,
    },
    /// Convert a font in the legacy dense '!Fnt' format
    Convert {
        /// The legacy font file
        legacy: PathBuf,
        /// Where to write the converted font
        output: PathBuf,
    },
    /// Allocate storage for the block holding a code point, then save
    Grow {
        /// The font file
        font: PathBuf,
        /// A code point in the block to allocate
        code_point: CodePoint,
        /// Where to write the grown font
        output: PathBuf,
    },
}

fn main() -> Result<(), Error> {
    env_logger::init();
    use clap::Parser as _;
    let args = Args::parse();

    match args.command {
        Command::Info { font } => {
            let font = BitmapFont::load(&font)?;
            print::print_info(&font, &mut std::io::stdout().lock())?;
        }
        Command::Glyph { font, code_points } => {
            let font = BitmapFont::load(&font)?;
            let stdout = std::io::stdout();
            let mut locked = stdout.lock();
            for code_point in code_points {
                print::print_glyph(&font, code_point, &mut locked)?;
            }
        }
        Command::Measure { font, text } => {
            let font = BitmapFont::load(&font)?;
            println!("{}", font.width(&text));
        }
        Command::Convert { legacy, output } => {
            let bytes = std::fs::read(&legacy)
                .map_err(|e| Error(format!("could not read '{}': {e}", legacy.display())))?;
            let font = BitmapFont::from_legacy(FontData::new(&bytes))?;
            font.save(&output)?;
            log::info!(
                "converted {} glyphs into {} blocks",
                font.code_points().count(),
                font.materialized_blocks().count()
            );
        }
        Command::Grow {
            font,
            code_point,
            output,
        } => {
            // output may be the input file; release the mapping first
            let mut font = BitmapFont::load(&font)?.into_owned();
            let blocks = font.materialized_blocks().count();
            font.ensure_space_for(code_point.0);
            if font.materialized_blocks().count() == blocks {
                log::warn!("{code_point} already has storage; writing font unchanged");
            }
            font.save(&output)?;
        }
    }
    Ok(())
}

#[derive(Debug, Clone)]
struct Error(String);

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for Error {}

impl From<bitfont::Error> for Error {
    fn from(err: bitfont::Error) -> Self {
        Error(err.to_string())
    }
}

impl From<bitfont::FormatError> for Error {
    fn from(err: bitfont::FormatError) -> Self {
        Error(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error(err.to_string())
    }
}
