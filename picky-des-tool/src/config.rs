use std::str::FromStr;

use anyhow::anyhow;
use clap::{crate_authors, crate_description, crate_name, crate_version, App, Arg, ArgGroup, ArgMatches};
use log::LevelFilter;
use picky_des::Padding;

pub const ARG_ALGORITHM: &str = "algorithm";
pub const ARG_ALGORITHM_DES: &str = "des";
pub const ARG_ALGORITHM_3DES: &str = "3des";

pub const ARG_ENCRYPT: &str = "encrypt";
pub const ARG_DECRYPT: &str = "decrypt";

pub const ARG_KEY: &str = "key";
pub const ARG_HEX_KEY: &str = "hex-key";
pub const ARG_IV: &str = "iv";
pub const ARG_HEX_IV: &str = "hex-iv";

pub const ARG_INPUT: &str = "input";
pub const ARG_TEXT: &str = "text";
pub const ARG_NO_PADDING: &str = "no-padding";

pub const ARG_LOGGING: &str = "logging";
pub const ARG_LOGGING_VALUES: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

const GROUP_OPERATION: &str = "operation";
const GROUP_KEY: &str = "key-source";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    Des,
    Tdes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Encrypt,
    Decrypt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub algorithm: Algorithm,
    pub operation: Operation,
    pub key: Vec<u8>,
    pub iv: Vec<u8>,
    /// Payload given on the command line, stdin is used otherwise
    pub input: Option<String>,
    pub text: bool,
    pub padding: Padding,
    pub log_level: LevelFilter,
}

impl Options {
    pub fn from_matches(matches: &ArgMatches<'_>) -> anyhow::Result<Self> {
        let algorithm = match matches.value_of(ARG_ALGORITHM) {
            Some(ARG_ALGORITHM_DES) => Algorithm::Des,
            Some(ARG_ALGORITHM_3DES) => Algorithm::Tdes,
            other => unreachable!("Unexpected algorithm value: {:?}", other),
        };

        let operation = if matches.is_present(ARG_DECRYPT) {
            Operation::Decrypt
        } else {
            Operation::Encrypt
        };

        let key = bytes_argument(matches, ARG_KEY, ARG_HEX_KEY)?;
        let iv = bytes_argument(matches, ARG_IV, ARG_HEX_IV)?;

        let padding = if matches.is_present(ARG_NO_PADDING) {
            Padding::None
        } else {
            Padding::Pkcs5
        };

        let log_level = match matches.value_of(ARG_LOGGING) {
            Some(level) => LevelFilter::from_str(level).map_err(|err| anyhow!("Invalid log level `{}`: {}", level, err))?,
            None => LevelFilter::Warn,
        };

        Ok(Self {
            algorithm,
            operation,
            key,
            iv,
            input: matches.value_of(ARG_INPUT).map(str::to_owned),
            text: matches.is_present(ARG_TEXT),
            padding,
            log_level,
        })
    }
}

fn bytes_argument(matches: &ArgMatches<'_>, text_arg: &str, hex_arg: &str) -> anyhow::Result<Vec<u8>> {
    if let Some(value) = matches.value_of(hex_arg) {
        hex::decode(value).map_err(|err| anyhow!("`--{}` is not valid hex: {}", hex_arg, err))
    } else {
        Ok(matches.value_of(text_arg).map(|value| value.as_bytes().to_vec()).unwrap_or_default())
    }
}

pub fn app() -> App<'static, 'static> {
    App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .arg(
            Arg::with_name(ARG_ALGORITHM)
                .short("a")
                .long(ARG_ALGORITHM)
                .value_name("ALGORITHM")
                .help("Cipher family")
                .takes_value(true)
                .possible_values(&[ARG_ALGORITHM_DES, ARG_ALGORITHM_3DES])
                .default_value(ARG_ALGORITHM_3DES)
                .display_order(0),
        )
        .arg(
            Arg::with_name(ARG_ENCRYPT)
                .short("e")
                .long(ARG_ENCRYPT)
                .help("Encrypt the input")
                .display_order(1),
        )
        .arg(
            Arg::with_name(ARG_DECRYPT)
                .short("d")
                .long(ARG_DECRYPT)
                .help("Decrypt the hex encoded input")
                .display_order(2),
        )
        .group(
            ArgGroup::with_name(GROUP_OPERATION)
                .args(&[ARG_ENCRYPT, ARG_DECRYPT])
                .required(true),
        )
        .arg(
            Arg::with_name(ARG_KEY)
                .short("k")
                .long(ARG_KEY)
                .value_name("KEY")
                .help("Key as text, 1 to 24 bytes")
                .takes_value(true)
                .display_order(3),
        )
        .arg(
            Arg::with_name(ARG_HEX_KEY)
                .long(ARG_HEX_KEY)
                .value_name("HEX")
                .help("Key as hex string")
                .takes_value(true)
                .display_order(4),
        )
        .group(
            ArgGroup::with_name(GROUP_KEY)
                .args(&[ARG_KEY, ARG_HEX_KEY])
                .required(true),
        )
        .arg(
            Arg::with_name(ARG_IV)
                .long(ARG_IV)
                .value_name("IV")
                .help("Initialization vector as text; enables CBC")
                .takes_value(true)
                .conflicts_with(ARG_HEX_IV)
                .display_order(5),
        )
        .arg(
            Arg::with_name(ARG_HEX_IV)
                .long(ARG_HEX_IV)
                .value_name("HEX")
                .help("Initialization vector as hex string; enables CBC")
                .takes_value(true)
                .display_order(6),
        )
        .arg(
            Arg::with_name(ARG_INPUT)
                .short("i")
                .long(ARG_INPUT)
                .value_name("DATA")
                .help("Payload, read from stdin when omitted. Hex encoded unless `--text` is used for encryption")
                .takes_value(true)
                .display_order(7),
        )
        .arg(
            Arg::with_name(ARG_TEXT)
                .short("t")
                .long(ARG_TEXT)
                .help("Plaintext is handled as UTF-8 text instead of hex")
                .display_order(8),
        )
        .arg(
            Arg::with_name(ARG_NO_PADDING)
                .long(ARG_NO_PADDING)
                .help("Keep the PKCS#5 padding when decrypting")
                .requires(ARG_DECRYPT)
                .display_order(9),
        )
        .arg(
            Arg::with_name(ARG_LOGGING)
                .short("l")
                .long(ARG_LOGGING)
                .value_name("LOG_LEVEL")
                .help("Logging level")
                .takes_value(true)
                .possible_values(&ARG_LOGGING_VALUES)
                .display_order(10),
        )
}

pub fn config() -> ArgMatches<'static> {
    app().get_matches()
}
