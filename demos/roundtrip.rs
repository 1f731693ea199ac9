//! Encrypts a file with a fresh random key, decrypts it again and
//! checks the result.
//!
//! ```text
//! cargo run --example roundtrip -- [INPUT] [ROUNDS] [WORD_BITS] [KEY_BITS]
//! ```
//!
//! Writes `INPUT.rc5` and `INPUT.dec` next to the input.  Settings left
//! out fall back to 12 rounds, 64-bit words and a 128-bit key.

use std::env;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::process;
use std::result;
use std::str::FromStr;

use rand::rngs::OsRng;
use rc5::io::{decrypt_stream, encrypt_stream};
use rc5::params::{DEFAULT_KEY_BITS, DEFAULT_ROUNDS, DEFAULT_WORD_BITS};
use rc5::{Params, Result};

const DEFAULT_INPUT: &str = "original_message.txt";

const USAGE: &str = "usage: roundtrip [INPUT] [ROUNDS] [WORD_BITS] [KEY_BITS]";

// A missing argument takes its default; one that doesn't parse is a
// usage error.
fn arg<T: FromStr>(args: &[String], index: usize, name: &str, default: T) -> result::Result<T, String> {
    match args.get(index) {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| format!("invalid {}: {:?}", name, raw)),
    }
}

fn parse_args(args: &[String]) -> result::Result<(String, Params), String> {
    let input = args.get(1).cloned().unwrap_or_else(|| DEFAULT_INPUT.to_string());
    let params = Params::new(
        arg(args, 3, "word size", DEFAULT_WORD_BITS)?,
        arg(args, 2, "round count", DEFAULT_ROUNDS)?,
        arg(args, 4, "key size", DEFAULT_KEY_BITS)?,
    )
    .map_err(|e| e.to_string())?;
    Ok((input, params))
}

fn run(input: &str, params: &Params) -> Result<bool> {
    let encrypted = format!("{}.rc5", input);
    let decrypted = format!("{}.dec", input);

    let key = params.generate_key(&mut OsRng);
    let seed = params.generate_seed(&mut OsRng);
    let rc5 = params.cipher(&key);
    println!("RC5-{}/{}/{}", params.word.bits(), params.rounds, params.key_len);

    let mut source = BufReader::new(File::open(input)?);
    encrypt_stream(&rc5, seed, &mut source, BufWriter::new(File::create(&encrypted)?))?;
    println!("encrypted {} -> {}", input, encrypted);

    let mut source = BufReader::new(File::open(&encrypted)?);
    decrypt_stream(&rc5, &mut source, BufWriter::new(File::create(&decrypted)?))?;
    println!("decrypted {} -> {}", encrypted, decrypted);

    let original = std::fs::read(input)?;
    let restored = std::fs::read(&decrypted)?;
    // Zero bytes at the very end of the input can't be told apart from
    // padding, so they may be missing.
    let end = original.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1);
    Ok(restored.len() >= end
        && restored.len() <= original.len()
        && restored[..] == original[..restored.len()])
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let (input, params) = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("{}", USAGE);
            process::exit(2);
        }
    };
    match run(&input, &params) {
        Ok(true) => println!("round trip ok"),
        Ok(false) => {
            eprintln!("round trip mismatch");
            process::exit(1);
        }
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn missing_arguments_take_defaults() {
        let (input, params) = parse_args(&args(&["roundtrip"])).unwrap();
        assert_eq!(input, DEFAULT_INPUT);
        assert_eq!(params, Params::default());
    }

    #[test]
    fn given_arguments_are_used() {
        let (input, params) = parse_args(&args(&["roundtrip", "in.txt", "20", "32", "96"])).unwrap();
        assert_eq!(input, "in.txt");
        assert_eq!(params, Params::new(32, 20, 96).unwrap());
    }

    #[test]
    fn unparseable_arguments_are_rejected() {
        let err = parse_args(&args(&["roundtrip", "in.txt", "abc"])).unwrap_err();
        assert_eq!(err, "invalid round count: \"abc\"");
        assert!(parse_args(&args(&["roundtrip", "in.txt", "12", "-1"])).is_err());
        assert!(parse_args(&args(&["roundtrip", "in.txt", "12", "24"])).is_err());
    }
}
