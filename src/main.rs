//! Plainsight - hide a sentence in plain sight
//!
//! A CLI for sentence steganography: embeds a short 7-bit ASCII payload
//! into the least significant bits of image pixels or the spacing of a
//! text document, and emits an audit record of the encoding.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use std::path::PathBuf;

use plainsight::audit::AuditRecord;
use plainsight::{bitstream, ImageStego, StegoConfig, TextStego, BITS_PER_CHAR};

/// Plainsight - hide a sentence in plain sight
///
/// Embeds a 7-bit ASCII payload into the least significant bits of image
/// pixels or the spacing of a text document. This conceals presence, not
/// content: there is no encryption. Always save image output in a lossless
/// format (PNG, BMP) - a lossy re-encode destroys the hidden bits.
#[derive(Parser)]
#[command(name = "plainsight")]
#[command(version)]
#[command(about = "Hide a sentence in image pixels or text spacing")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Embed a sentence into one or more carriers
    ///
    /// At least one carrier must be given. Carriers are never modified in
    /// place: the embedded image goes to --output-image and the embedded
    /// document to --output-text.
    Encode {
        /// Sentence to hide (reads from stdin if not provided)
        #[arg(short, long)]
        message: Option<String>,

        /// Path to an image carrier
        #[arg(short, long, requires = "output_image")]
        image: Option<PathBuf>,

        /// Output path for the embedded image (PNG recommended)
        #[arg(long, requires = "image")]
        output_image: Option<PathBuf>,

        /// Path to a text document carrier
        #[arg(short, long, requires = "output_text")]
        text: Option<PathBuf>,

        /// Output path for the embedded text document
        #[arg(long, requires = "text")]
        output_text: Option<PathBuf>,

        /// Write a plain-text audit record of the encoding to this path
        #[arg(long)]
        audit: Option<PathBuf>,

        /// Write a JSON audit record of the encoding to this path
        #[arg(long)]
        audit_json: Option<PathBuf>,

        /// Embed a 32-bit length prefix ahead of the payload (image only),
        /// so decoding does not need --chars
        #[arg(long)]
        length_prefix: bool,

        /// Verbose output (skipped characters, capacities, the bit-stream)
        #[arg(short, long)]
        verbose: bool,
    },

    /// Recover a sentence from an embedded carrier
    ///
    /// The carriers hold no length field by default, so --chars must say
    /// how many characters to read back. Images embedded with
    /// --length-prefix carry their own length instead.
    Decode {
        /// Path to an embedded image
        #[arg(short, long, conflicts_with = "text")]
        image: Option<PathBuf>,

        /// Path to an embedded text document
        #[arg(short, long)]
        text: Option<PathBuf>,

        /// Payload length in characters
        #[arg(short, long)]
        chars: Option<usize>,

        /// The image was embedded with a 32-bit length prefix
        #[arg(long)]
        length_prefix: bool,

        /// Verbose output (extracted bit counts, the bit-stream)
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show how much payload a carrier can hold
    Capacity {
        /// Path to an image carrier
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// Path to a text document carrier
        #[arg(short, long)]
        text: Option<PathBuf>,
    },

    /// Build an audit record for a sentence without touching any carrier
    Audit {
        /// Sentence to describe (reads from stdin if not provided)
        #[arg(short, long)]
        message: Option<String>,

        /// Write the record to this path instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit JSON instead of the plain-text report
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encode {
            message,
            image,
            output_image,
            text,
            output_text,
            audit,
            audit_json,
            length_prefix,
            verbose,
        } => encode_cmd(
            message,
            image.as_deref().zip(output_image.as_deref()),
            text.as_deref().zip(output_text.as_deref()),
            audit.as_deref(),
            audit_json.as_deref(),
            length_prefix,
            verbose,
        ),

        Commands::Decode {
            image,
            text,
            chars,
            length_prefix,
            verbose,
        } => decode_cmd(image.as_deref(), text.as_deref(), chars, length_prefix, verbose),

        Commands::Capacity { image, text } => capacity_cmd(image.as_deref(), text.as_deref()),

        Commands::Audit {
            message,
            output,
            json,
        } => audit_cmd(message, output.as_deref(), json),
    }
}

/// Reads the message from the argument or falls back to stdin.
fn read_message(message: Option<String>) -> Result<String> {
    match message {
        Some(m) => Ok(m),
        None => {
            eprintln!("Reading message from stdin (Ctrl+D to finish):");
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read message from stdin")?;
            Ok(buffer.trim().to_string())
        }
    }
}

/// Reports out-of-range characters on stderr. They are informational:
/// the rest of the sentence still encodes.
fn report_skipped(encoding: &plainsight::Encoding) {
    for skip in &encoding.skipped {
        eprintln!(
            "Character '{}' (index {}) is outside the 7-bit ASCII range and will be skipped",
            skip.ch, skip.index
        );
    }
}

/// Encodes a sentence and embeds it into the given carriers, writing audit
/// records if requested.
fn encode_cmd(
    message: Option<String>,
    image: Option<(&std::path::Path, &std::path::Path)>,
    text: Option<(&std::path::Path, &std::path::Path)>,
    audit: Option<&std::path::Path>,
    audit_json: Option<&std::path::Path>,
    length_prefix: bool,
    verbose: bool,
) -> Result<()> {
    if image.is_none() && text.is_none() {
        anyhow::bail!("Provide at least one carrier (--image or --text)");
    }

    let message = read_message(message)?;
    if message.is_empty() {
        anyhow::bail!("Message cannot be empty");
    }

    let encoding = bitstream::encode(&message);
    report_skipped(&encoding);
    if encoding.bits.is_empty() {
        anyhow::bail!("No encodable characters in message");
    }

    if verbose {
        eprintln!(
            "Bit-stream: {} ({} bits, {} characters)",
            encoding.bits,
            encoding.bits.len(),
            encoding.bits.len() / BITS_PER_CHAR
        );
    }

    if let Some((carrier_path, output_path)) = image {
        let mut carrier = ImageStego::from_file(carrier_path)
            .with_context(|| format!("Failed to load image carrier from {}", carrier_path.display()))?;

        if verbose {
            eprintln!(
                "Image carrier: {}x{} pixels, capacity {} bits",
                carrier.width(),
                carrier.height(),
                carrier.capacity()
            );
        }

        let config = StegoConfig {
            length_prefixed: length_prefix,
        };
        carrier
            .embed_with_config(&encoding.bits, &config)
            .context("Failed to embed into image")?;
        carrier
            .save(output_path)
            .with_context(|| format!("Failed to save embedded image to {}", output_path.display()))?;

        println!("Embedded image saved to {}", output_path.display());
    }

    if let Some((carrier_path, output_path)) = text {
        if length_prefix && verbose {
            eprintln!("Note: --length-prefix applies to image carriers only");
        }

        let carrier = TextStego::from_file(carrier_path).with_context(|| {
            format!("Failed to load text carrier from {}", carrier_path.display())
        })?;

        if verbose {
            let spaces = carrier.capacity();
            eprintln!("Text carrier: {} spaces", spaces);
            if spaces < encoding.bits.len() {
                eprintln!(
                    "Warning: only {} of {} bits embed without cycling; extraction from this document will be lossy",
                    spaces,
                    encoding.bits.len()
                );
            }
        }

        let embedded = carrier
            .embed(&encoding.bits)
            .context("Failed to embed into text document")?;
        embedded
            .save(output_path)
            .with_context(|| format!("Failed to save embedded text to {}", output_path.display()))?;

        println!("Embedded text saved to {}", output_path.display());
    }

    let record = AuditRecord::build(&message, &encoding);
    if let Some(path) = audit {
        std::fs::write(path, record.render_text())
            .with_context(|| format!("Failed to write audit record to {}", path.display()))?;
        println!("Audit record saved to {}", path.display());
    }
    if let Some(path) = audit_json {
        let json = record.to_json().context("Failed to serialize audit record")?;
        std::fs::write(path, json)
            .with_context(|| format!("Failed to write JSON audit record to {}", path.display()))?;
        println!("JSON audit record saved to {}", path.display());
    }

    Ok(())
}

/// Extracts a bit-stream from a carrier and decodes it back to a sentence.
fn decode_cmd(
    image: Option<&std::path::Path>,
    text: Option<&std::path::Path>,
    chars: Option<usize>,
    length_prefix: bool,
    verbose: bool,
) -> Result<()> {
    let bits = if let Some(path) = image {
        let carrier = ImageStego::from_file(path)
            .with_context(|| format!("Failed to load image from {}", path.display()))?;

        let config = StegoConfig {
            length_prefixed: length_prefix,
        };
        carrier
            .extract_with_config(chars.map(|c| c * BITS_PER_CHAR), &config)
            .context("Failed to extract from image")?
    } else if let Some(path) = text {
        let chars = chars.context("--chars is required when decoding a text carrier")?;
        let carrier = TextStego::from_file(path)
            .with_context(|| format!("Failed to load text document from {}", path.display()))?;

        carrier
            .extract(chars * BITS_PER_CHAR)
            .context("Failed to extract from text document")?
    } else {
        anyhow::bail!("Provide a carrier (--image or --text)");
    };

    if verbose {
        eprintln!("Extracted bit-stream: {} ({} bits)", bits, bits.len());
    }

    let sentence = bitstream::decode(&bits).context("Extracted bit-stream is malformed")?;
    println!("{}", sentence);

    Ok(())
}

/// Shows carrier capacity in bits and equivalent characters.
fn capacity_cmd(image: Option<&std::path::Path>, text: Option<&std::path::Path>) -> Result<()> {
    if image.is_none() && text.is_none() {
        anyhow::bail!("Provide a carrier (--image or --text)");
    }

    if let Some(path) = image {
        let carrier = ImageStego::from_file(path)
            .with_context(|| format!("Failed to load image from {}", path.display()))?;
        let bits = carrier.capacity();

        println!("Image carrier: {}", path.display());
        println!("  Dimensions: {}x{} pixels", carrier.width(), carrier.height());
        println!(
            "  Capacity: {} bits ({} characters)",
            bits,
            bits / BITS_PER_CHAR
        );
    }

    if let Some(path) = text {
        let carrier = TextStego::from_file(path)
            .with_context(|| format!("Failed to load text document from {}", path.display()))?;
        let spaces = carrier.capacity();

        println!("Text carrier: {}", path.display());
        println!("  Spaces: {}", spaces);
        println!(
            "  Lossless up to {} bits ({} characters); longer payloads cycle",
            spaces,
            spaces / BITS_PER_CHAR
        );
    }

    Ok(())
}

/// Builds and emits an audit record without touching any carrier.
fn audit_cmd(message: Option<String>, output: Option<&std::path::Path>, json: bool) -> Result<()> {
    let message = read_message(message)?;
    if message.is_empty() {
        anyhow::bail!("Message cannot be empty");
    }

    let encoding = bitstream::encode(&message);
    report_skipped(&encoding);

    let record = AuditRecord::build(&message, &encoding);
    let rendered = if json {
        record.to_json().context("Failed to serialize audit record")?
    } else {
        record.render_text()
    };

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("Failed to write audit record to {}", path.display()))?;
            println!("Audit record saved to {}", path.display());
        }
        None => {
            print!("{}", rendered);
            if json {
                println!();
            }
        }
    }

    Ok(())
}
