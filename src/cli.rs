/// Command-line surface over the codec and string operations.
///
/// ```text
/// utf8 len "héllo"            # 5
/// utf8 sub "héllo" -2 -1      # lo
/// utf8 reverse "héllo"        # olléh
/// utf8 widen "😀"             # d83d de00
/// echo -n "héllo" | utf8 inspect -
/// ```

use std::io::{self, Read, Write};

use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::{Config, OutputFormat};
use crate::core::{decode_strict, show, size_at, validate, widen};
use crate::text;

#[derive(Parser, Debug)]
#[command(name = "utf8")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Codepoint-aware UTF-8 text utilities", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Reject malformed UTF-8 instead of substituting U+FFFD
    #[arg(long, global = true)]
    pub strict: bool,

    /// Emit JSON instead of plain text
    #[arg(long, global = true)]
    pub json: bool,
}

/// Every command takes TEXT; `-` reads raw bytes from stdin.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Count codepoints
    Len { text: String },

    /// Encoded size of the codepoint at a byte offset
    Size {
        text: String,
        #[arg(long, default_value_t = 0)]
        offset: usize,
    },

    /// Substring by 1-based codepoint index; negative indices count from the end
    #[command(after_help = "Examples:\n  utf8 sub héllo 2 4\n  utf8 sub héllo -2")]
    Sub {
        text: String,
        #[arg(allow_negative_numbers = true)]
        start: i64,
        #[arg(allow_negative_numbers = true, default_value_t = -1)]
        end: i64,
    },

    /// Reverse codepoint order
    Reverse { text: String },

    /// Print text through the wide-character display path
    Show { text: String },

    /// Print UTF-16 code units in hex
    Widen { text: String },

    /// List every decoded codepoint with its byte offset and length
    Inspect { text: String },
}

impl Command {
    fn text(&self) -> &str {
        match self {
            Command::Len { text }
            | Command::Size { text, .. }
            | Command::Sub { text, .. }
            | Command::Reverse { text }
            | Command::Show { text }
            | Command::Widen { text }
            | Command::Inspect { text } => text,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Command::Len { .. } => "len",
            Command::Size { .. } => "size",
            Command::Sub { .. } => "sub",
            Command::Reverse { .. } => "reverse",
            Command::Show { .. } => "show",
            Command::Widen { .. } => "widen",
            Command::Inspect { .. } => "inspect",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodepointRecord {
    pub offset: usize,
    pub codepoint: u32,
    pub len: usize,
    pub valid: bool,
}

/// Result of a command, before formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Count(usize),
    Bytes(Vec<u8>),
    Text(String),
    Units(Vec<u16>),
    Records(Vec<CodepointRecord>),
}

/// Run a command on already-loaded input. Pure; no I/O.
pub fn execute(command: &Command, input: &[u8]) -> Output {
    match command {
        Command::Len { .. } => Output::Count(text::length(input)),
        Command::Size { offset, .. } => Output::Count(size_at(input, *offset)),
        Command::Sub { start, end, .. } => {
            Output::Bytes(text::substring(input, *start, *end).to_vec())
        }
        Command::Reverse { .. } => Output::Bytes(text::reverse(input)),
        Command::Show { .. } => Output::Text(show(input)),
        Command::Widen { .. } => Output::Units(widen(input)),
        Command::Inspect { .. } => Output::Records(inspect(input)),
    }
}

fn inspect(input: &[u8]) -> Vec<CodepointRecord> {
    let mut records = Vec::new();
    let mut offset = 0;
    while let Some(decoded) = decode_strict(input, offset) {
        records.push(CodepointRecord {
            offset,
            codepoint: decoded.codepoint(),
            len: decoded.len(),
            valid: decoded.is_valid(),
        });
        offset += decoded.len();
    }
    records
}

fn read_input(text: &str) -> io::Result<Vec<u8>> {
    if text == "-" {
        let mut buf = Vec::new();
        io::stdin().lock().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        Ok(text.as_bytes().to_vec())
    }
}

/// Load input, run the command, write the result.
pub fn run<W: Write>(cli: &Cli, config: &Config, out: &mut W) -> io::Result<()> {
    let input = read_input(cli.command.text())?;
    run_with_input(cli, config, &input, out)
}

pub fn run_with_input<W: Write>(
    cli: &Cli,
    config: &Config,
    input: &[u8],
    out: &mut W,
) -> io::Result<()> {
    let strict = cli.strict || config.input.strict;
    let format = if cli.json { OutputFormat::Json } else { config.output.format };
    log::debug!(
        "{}: {} bytes, strict={}, format={:?}",
        cli.command.name(),
        input.len(),
        strict,
        format
    );

    if strict {
        validate(input).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    }

    let output = execute(&cli.command, input);
    match format {
        OutputFormat::Text => write_text(&output, out)?,
        OutputFormat::Json => write_json(&output, out)?,
    }
    if config.output.newline {
        out.write_all(b"\n")?;
    }
    out.flush()
}

fn write_text<W: Write>(output: &Output, out: &mut W) -> io::Result<()> {
    match output {
        Output::Count(n) => write!(out, "{}", n),
        Output::Bytes(bytes) => out.write_all(bytes),
        Output::Text(s) => out.write_all(s.as_bytes()),
        Output::Units(units) => {
            let hex: Vec<String> = units.iter().map(|u| format!("{:04x}", u)).collect();
            out.write_all(hex.join(" ").as_bytes())
        }
        Output::Records(records) => {
            for (i, r) in records.iter().enumerate() {
                if i > 0 {
                    out.write_all(b"\n")?;
                }
                let status = if r.valid { "ok" } else { "malformed" };
                write!(out, "{}\tU+{:04X}\t{}\t{}", r.offset, r.codepoint, r.len, status)?;
            }
            Ok(())
        }
    }
}

fn write_json<W: Write>(output: &Output, out: &mut W) -> io::Result<()> {
    let value = match output {
        Output::Count(n) => serde_json::json!({ "count": n }),
        // Malformed bytes have no faithful JSON string; "text" is null then
        Output::Bytes(bytes) => serde_json::json!({
            "text": std::str::from_utf8(bytes).ok(),
            "bytes": bytes.len(),
        }),
        Output::Text(s) => serde_json::json!({ "text": s }),
        Output::Units(units) => serde_json::json!({ "units": units }),
        Output::Records(records) => serde_json::json!(records),
    };
    serde_json::to_writer(&mut *out, &value)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(args: &[&str], config: &Config) -> io::Result<String> {
        let cli = Cli::try_parse_from(args).unwrap();
        let input = cli.command.text().as_bytes().to_vec();
        let mut out = Vec::new();
        run_with_input(&cli, config, &input, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    fn run_bytes(args: &[&str], input: &[u8], config: &Config) -> io::Result<Vec<u8>> {
        let cli = Cli::try_parse_from(args).unwrap();
        let mut out = Vec::new();
        run_with_input(&cli, config, input, &mut out)?;
        Ok(out)
    }

    #[test]
    fn test_len() {
        let cfg = Config::default();
        assert_eq!(run_args(&["utf8", "len", "héllo"], &cfg).unwrap(), "5\n");
    }

    #[test]
    fn test_size_with_offset() {
        let cfg = Config::default();
        assert_eq!(run_args(&["utf8", "size", "héllo", "--offset", "1"], &cfg).unwrap(), "2\n");
        assert_eq!(run_args(&["utf8", "size", "héllo"], &cfg).unwrap(), "1\n");
    }

    #[test]
    fn test_sub_negative_indices() {
        let cfg = Config::default();
        assert_eq!(run_args(&["utf8", "sub", "héllo", "-2", "-1"], &cfg).unwrap(), "lo\n");
        assert_eq!(run_args(&["utf8", "sub", "héllo", "2", "4"], &cfg).unwrap(), "éll\n");
        assert_eq!(run_args(&["utf8", "sub", "héllo", "2"], &cfg).unwrap(), "éllo\n");
    }

    #[test]
    fn test_reverse() {
        let cfg = Config::default();
        assert_eq!(run_args(&["utf8", "reverse", "héllo"], &cfg).unwrap(), "olléh\n");
    }

    #[test]
    fn test_show_and_widen() {
        let cfg = Config::default();
        assert_eq!(run_args(&["utf8", "show", "a😀"], &cfg).unwrap(), "a😀\n");
        assert_eq!(run_args(&["utf8", "widen", "a😀"], &cfg).unwrap(), "0061 d83d de00\n");
    }

    #[test]
    fn test_inspect_text() {
        let cfg = Config::default();
        let out = run_bytes(&["utf8", "inspect", "-"], b"a\x80", &cfg).unwrap();
        assert_eq!(out, b"0\tU+0061\t1\tok\n1\tU+FFFD\t1\tmalformed\n");
    }

    #[test]
    fn test_no_newline() {
        let mut cfg = Config::default();
        cfg.output.newline = false;
        assert_eq!(run_args(&["utf8", "len", "abc"], &cfg).unwrap(), "3");
    }

    #[test]
    fn test_json_flag() {
        let cfg = Config::default();
        let out = run_args(&["utf8", "--json", "len", "héllo"], &cfg).unwrap();
        assert_eq!(out, "{\"count\":5}\n");
        let out = run_args(&["utf8", "widen", "😀", "--json"], &cfg).unwrap();
        assert_eq!(out, "{\"units\":[55357,56832]}\n");
    }

    #[test]
    fn test_json_bytes_malformed_has_null_text() {
        let cfg = Config::default();
        let out = run_bytes(&["utf8", "--json", "reverse", "-"], b"a\x80", &cfg).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert!(value["text"].is_null());
        assert_eq!(value["bytes"], 2);

        let out = run_args(&["utf8", "--json", "reverse", "héllo"], &cfg).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["text"], "olléh");
        assert_eq!(value["bytes"], 6);
    }

    #[test]
    fn test_json_from_config() {
        let mut cfg = Config::default();
        cfg.output.format = OutputFormat::Json;
        let out = run_bytes(&["utf8", "inspect", "-"], "é".as_bytes(), &cfg).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value[0]["codepoint"], 0xE9);
        assert_eq!(value[0]["len"], 2);
        assert_eq!(value[0]["valid"], true);
    }

    #[test]
    fn test_strict_rejects_malformed() {
        let cfg = Config::default();
        let err = run_bytes(&["utf8", "--strict", "len", "-"], b"ab\xC0\x80", &cfg).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        assert!(err.to_string().contains("byte 2"));
    }

    #[test]
    fn test_lenient_counts_malformed() {
        let cfg = Config::default();
        assert_eq!(run_bytes(&["utf8", "len", "-"], b"ab\xC0\x80", &cfg).unwrap(), b"3\n");
    }

    #[test]
    fn test_strict_from_config() {
        let mut cfg = Config::default();
        cfg.input.strict = true;
        assert!(run_bytes(&["utf8", "reverse", "-"], b"\x80", &cfg).is_err());
        assert_eq!(run_bytes(&["utf8", "reverse", "-"], b"ab", &cfg).unwrap(), b"ba\n");
    }

    #[test]
    fn test_execute_is_pure() {
        let cmd = Command::Sub { text: String::new(), start: -3, end: -2 };
        assert_eq!(execute(&cmd, "中文字".as_bytes()), Output::Bytes("中文".as_bytes().to_vec()));
    }
}
