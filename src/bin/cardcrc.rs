use std::error::Error;
use std::io::{self, BufRead, Read, StdinLock, StdoutLock, Write};

use cardcrc::parser::{hex_array, hex_tokens, to_hex};
use cardcrc::{compare_variants, compute, patch_and_checksum, CardRecord, CardStream, Preset};
use clap::{builder::BoolishValueParser, ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "cardcrc", version, about = "CRC-16 tools for access card records")]
struct Cli {
    /// Log debug output to stderr (RUST_LOG also works)
    #[arg(
        short,
        long,
        global = true,
        env = "CARDCRC_DEBUG",
        action = ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    debug: bool,

    /// Give up after this many invalid answers to a prompt
    #[arg(long, global = true, value_name = "N")]
    attempts: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replace the 3-byte tail of a 16-byte card number and rewrite its checksum
    Patch {
        /// Card number as hex, prompted for when omitted
        #[arg(long, value_name = "HEX")]
        record: Option<String>,

        /// New tail as hex, prompted for when omitted
        #[arg(long, value_name = "HEX")]
        tail: Option<String>,
    },
    /// Compute the checksum of 14 bytes under every known preset
    Variants {
        /// Bytes as hex tokens, prompted for when omitted
        #[arg(value_name = "BYTE")]
        data: Vec<String>,
    },
    /// Compute a single checksum
    Compute {
        #[arg(short, long, env = "CARDCRC_PRESET", default_value = "modbus")]
        preset: Preset,

        /// Bytes as hex, any separators
        #[arg(value_name = "HEX")]
        data: Vec<String>,
    },
    /// List the known presets and their parameters
    Presets,
}

/// stdin and stdout as one line oriented stream
struct Terminal {
    stdin: StdinLock<'static>,
    stdout: StdoutLock<'static>,
}

impl Terminal {
    fn new() -> Self {
        Self {
            stdin: io::stdin().lock(),
            stdout: io::stdout().lock(),
        }
    }
}

impl Read for Terminal {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.stdin.read(buf)
    }
}

impl BufRead for Terminal {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.stdin.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.stdin.consume(amt)
    }
}

impl Write for Terminal {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.stdout.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if cli.debug {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .parse_default_env()
            .init();
    } else {
        env_logger::init();
    }

    let mut stream = CardStream::with_capacity(Terminal::new(), 128, cli.attempts);

    match cli.command {
        Commands::Patch { record, tail } => {
            let record: CardRecord = match record {
                Some(hex) => hex_array::<16>(&hex)?.into(),
                None => stream.read_record()?,
            };
            let tail = match tail {
                Some(hex) => hex_array::<3>(&hex)?,
                None => stream.read_tail()?,
            };
            let (patched, crc) = patch_and_checksum(record.as_bytes(), &tail)?;
            stream.write_patched(&patched, crc)?;
        }
        Commands::Variants { data } => {
            let data = if data.is_empty() {
                stream.read_variant_input()?.to_vec()
            } else {
                hex_tokens(&data.join(" "))?
            };
            let reports = compare_variants(&data)?;
            stream.write_reports(&data, &reports)?;
        }
        Commands::Compute { preset, data } => {
            let data = cardcrc::parser::scan_hex_bytes(&data.join(" "));
            let crc = compute(&data, &preset.params());
            log::debug!("{} over {}", preset.name(), to_hex(&data));
            writeln!(stream.inner_mut(), "0x{crc:04X}")?;
        }
        Commands::Presets => {
            let out = stream.inner_mut();
            for preset in Preset::ALL {
                let params = preset.params();
                writeln!(
                    out,
                    "{:9} {:16} poly=0x{:04X} init=0x{:04X} refin={} refout={} xorout=0x{:04X}{}",
                    preset.key(),
                    preset.name(),
                    params.polynomial,
                    params.initial_value,
                    params.reflect_input,
                    params.reflect_output,
                    params.xor_out,
                    if preset.is_verified() { "" } else { " (unverified)" }
                )?;
            }
        }
    }

    Ok(())
}
