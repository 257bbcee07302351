//! Interactive console demo.
//!
//! `$ cargo run --bin sha3r_demo -- [peekable|self-mutating] [--json]`
//!
//! Reads `r`/`w` commands from stdin against one reusable SHAKE256 sponge.
//! EOF ends the session.

use reusable_sponge::{ReusableSponge, Variant};
use serde::Serialize;
use std::env;
use std::io::{self, BufRead, Write};

/// One result line, as printed in `--json` mode.
#[derive(Serialize)]
#[serde(tag = "op", rename_all = "lowercase")]
enum Record<'a> {
    Write {
        data: &'a str,
        bytes: usize,
        error: Option<String>,
    },
    Read {
        requested: usize,
        bytes: usize,
        digest: Option<String>,
        error: Option<String>,
    },
}

struct Session<'a, W> {
    sponge: &'a mut dyn ReusableSponge,
    out: W,
    json: bool,
}

impl<W: Write> Session<'_, W> {
    fn prompt(&mut self, text: &str) -> io::Result<()> {
        if !self.json {
            write!(self.out, "{text}")?;
            self.out.flush()?;
        }
        Ok(())
    }

    fn write(&mut self, data: &str) -> Result<(), Box<dyn std::error::Error>> {
        if !self.json {
            writeln!(self.out, "writing '{data}'...")?;
        }
        let (bytes, error) = match self.sponge.write(data.as_bytes()) {
            Ok(n) => (n, None),
            Err(e) => (e.partial_count(), Some(e.to_string())),
        };
        if self.json {
            let record = Record::Write { data, bytes, error };
            writeln!(self.out, "{}", serde_json::to_string(&record)?)?;
        } else {
            writeln!(self.out, "wrote {bytes} bytes, err={error:?}")?;
        }
        Ok(())
    }

    fn read(&mut self, requested: usize) -> Result<(), Box<dyn std::error::Error>> {
        if !self.json {
            writeln!(self.out, "reading {requested} bytes...")?;
        }
        let mut buf = vec![0u8; requested];
        let (bytes, error) = match self.sponge.read(&mut buf) {
            Ok(n) => (n, None),
            Err(e) => (e.partial_count(), Some(e.to_string())),
        };
        // only a full, error-free read is a digest
        let digest = (bytes == requested && error.is_none()).then(|| hex::encode(&buf));
        if self.json {
            let record = Record::Read {
                requested,
                bytes,
                digest,
                error,
            };
            writeln!(self.out, "{}", serde_json::to_string(&record)?)?;
        } else {
            if let Some(digest) = digest {
                writeln!(self.out, "{digest}")?;
            }
            writeln!(self.out, "got {bytes} bytes, err={error:?}")?;
        }
        Ok(())
    }

    /// Drive the r/w command loop until `input` runs dry.
    fn run<R: BufRead>(&mut self, input: R) -> Result<(), Box<dyn std::error::Error>> {
        let mut lines = input.lines();
        loop {
            self.prompt("choose action (r/w): ")?;
            let Some(line) = lines.next().transpose()? else {
                return Ok(());
            };
            match line.as_str() {
                "w" => {
                    self.prompt("enter data: ")?;
                    let Some(data) = lines.next().transpose()? else {
                        return Ok(());
                    };
                    self.write(&data)?;
                }
                "r" => loop {
                    self.prompt("enter nbytes to read: ")?;
                    let Some(text) = lines.next().transpose()? else {
                        return Ok(());
                    };
                    match parse_length(&text) {
                        Some(n) => {
                            self.read(n)?;
                            break;
                        }
                        None => writeln!(self.out, "invalid integer. try again.")?,
                    }
                },
                _ => writeln!(self.out, "invalid command. try again.")?,
            }
        }
    }
}

/// Read length typed at the prompt; anything past the 32-bit marker range
/// is refused before a buffer is allocated.
fn parse_length(text: &str) -> Option<usize> {
    let n = text.trim().parse::<u32>().ok()?;
    usize::try_from(n).ok()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ----------------------------------------------- read CLI arguments
    let mut variant = Variant::default();
    let mut json = false;
    for arg in env::args().skip(1) {
        match arg.as_str() {
            "--json" => json = true,
            other => variant = other.parse()?,
        }
    }

    let mut sponge = variant.build();
    let stdout = io::stdout();
    let mut session = Session {
        sponge: sponge.as_mut(),
        out: stdout.lock(),
        json,
    };
    if !json {
        writeln!(session.out, "using {variant} SHAKE256 sponge")?;
    }

    // ----------------------------------------------- command loop
    session.run(io::stdin().lock())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive(variant: Variant, json: bool, script: &str) -> String {
        let mut sponge = variant.build();
        let mut session = Session {
            sponge: sponge.as_mut(),
            out: Vec::new(),
            json,
        };
        session.run(script.as_bytes()).unwrap();
        String::from_utf8(session.out).unwrap()
    }

    #[test]
    fn console_write_then_reads() {
        let out = drive(Variant::SelfMutating, false, "w\nabc\nr\n4\nr\n4\n");
        assert!(out.contains("writing 'abc'..."));
        assert!(out.contains("wrote 3 bytes, err=None"));
        let first = out.find("c932b7b8").expect("first digest");
        let second = out.find("d6dff933").expect("second digest");
        assert!(first < second);
        assert_eq!(out.matches("got 4 bytes, err=None").count(), 2);
    }

    #[test]
    fn console_retries_bad_input() {
        let out = drive(
            Variant::Peekable,
            false,
            "x\nw\nabc\nr\n-1\n18446744073709551615\n4294967296\nfour\n4\n",
        );
        assert_eq!(out.matches("invalid command. try again.").count(), 1);
        assert_eq!(out.matches("invalid integer. try again.").count(), 4);
        assert!(out.contains("48336660"));
    }

    #[test]
    fn json_records() {
        let out = drive(Variant::Peekable, true, "w\nabc\nr\n4\nr\n4\n");
        let records: Vec<serde_json::Value> = out
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0]["op"], "write");
        assert_eq!(records[0]["bytes"], 3);
        assert!(records[0]["error"].is_null());
        for record in &records[1..] {
            assert_eq!(record["op"], "read");
            assert_eq!(record["requested"], 4);
            assert_eq!(record["digest"], "48336660");
        }
    }

    #[test]
    fn eof_mid_command_ends_quietly() {
        let out = drive(Variant::SelfMutating, true, "w\n");
        assert!(out.is_empty());
    }

    #[test]
    fn length_limits() {
        assert_eq!(parse_length(" 4 "), Some(4));
        assert_eq!(parse_length("4294967295"), Some(u32::MAX as usize));
        assert_eq!(parse_length("4294967296"), None);
        assert_eq!(parse_length("-3"), None);
    }
}
