mod config;
mod logging;

use std::io::Read;

use anyhow::anyhow;
use picky_des::{Cipher, DesSchedule, KeySchedule, TdesSchedule};

use crate::config::{Algorithm, Operation, Options};

fn main() -> anyhow::Result<()> {
    let matches = config::config();
    let options = Options::from_matches(&matches)?;

    let _handle = logging::init_logs(options.log_level)?;

    let input = match &options.input {
        Some(input) => input.clone(),
        None => read_stdin()?,
    };

    println!("{}", run(&options, input.trim_end_matches(&['\r', '\n'][..]))?);

    Ok(())
}

fn run(options: &Options, input: &str) -> anyhow::Result<String> {
    match options.algorithm {
        Algorithm::Des => process::<DesSchedule>(options, input),
        Algorithm::Tdes => process::<TdesSchedule>(options, input),
    }
}

fn process<S: KeySchedule>(options: &Options, input: &str) -> anyhow::Result<String> {
    let cipher = Cipher::<S>::new(&options.key, &options.iv)
        .map_err(|err| anyhow!("Failed to set up {} cipher: {}", S::NAME, err))?;

    log::info!(
        "{} {:?} in {} mode",
        S::NAME,
        options.operation,
        if cipher.mode().is_cbc() { "CBC" } else { "ECB" }
    );

    match options.operation {
        Operation::Encrypt => {
            let plaintext = if options.text {
                input.as_bytes().to_vec()
            } else {
                decode_hex(input)?
            };

            Ok(hex::encode(cipher.encrypt(&plaintext)))
        }
        Operation::Decrypt => {
            let ciphertext = decode_hex(input)?;
            let plaintext = cipher
                .decrypt_with(&ciphertext, options.padding)
                .map_err(|err| anyhow!("Failed to decrypt: {}", err))?;

            if options.text {
                Ok(String::from_utf8_lossy(&plaintext).into_owned())
            } else {
                Ok(hex::encode(plaintext))
            }
        }
    }
}

fn decode_hex(input: &str) -> anyhow::Result<Vec<u8>> {
    hex::decode(input.trim()).map_err(|err| anyhow!("Input is not valid hex: {}", err))
}

fn read_stdin() -> anyhow::Result<String> {
    let mut input = String::new();

    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(|err| anyhow!("Failed to read stdin: {}", err))?;

    Ok(input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::LevelFilter;
    use picky_des::Padding;

    fn options(algorithm: Algorithm, operation: Operation, key: &[u8], iv: &[u8], text: bool) -> Options {
        Options {
            algorithm,
            operation,
            key: key.to_vec(),
            iv: iv.to_vec(),
            input: None,
            text,
            padding: Padding::Pkcs5,
            log_level: LevelFilter::Off,
        }
    }

    #[test]
    fn text_roundtrip_through_hex() {
        let encrypt = options(Algorithm::Tdes, Operation::Encrypt, b"ABCDEFGHIJKLMNOP", b"12345678", true);
        let decrypt = options(Algorithm::Tdes, Operation::Decrypt, b"ABCDEFGHIJKLMNOP", b"12345678", true);

        let ciphertext = run(&encrypt, "attack at dawn").unwrap();
        assert_eq!(ciphertext.len(), 32);
        assert_eq!(run(&decrypt, &ciphertext).unwrap(), "attack at dawn");
    }

    #[test]
    fn des_known_answer_first_block() {
        let key = hex::decode("133457799BBCDFF1").unwrap();
        let encrypt = options(Algorithm::Des, Operation::Encrypt, &key, b"", false);

        let ciphertext = run(&encrypt, "0123456789ABCDEF").unwrap();
        assert!(ciphertext.starts_with("85e813540f0ab405"));
    }

    #[test]
    fn keeps_padding_on_request() {
        let encrypt = options(Algorithm::Des, Operation::Encrypt, b"12345678", b"", false);
        let mut decrypt = options(Algorithm::Des, Operation::Decrypt, b"12345678", b"", false);
        decrypt.padding = Padding::None;

        let ciphertext = run(&encrypt, "").unwrap();
        assert_eq!(run(&decrypt, &ciphertext).unwrap(), "0808080808080808");
    }

    #[test]
    fn reports_errors() {
        let empty_key = options(Algorithm::Des, Operation::Encrypt, b"", b"", true);
        assert!(run(&empty_key, "data").is_err());

        let decrypt = options(Algorithm::Des, Operation::Decrypt, b"12345678", b"", false);
        assert!(run(&decrypt, "not hex").is_err());
        assert!(run(&decrypt, "00112233").is_err());
    }
}
