// src/bin/crypto_compat.rs
//! crypto-compat — run the fixture suite or a single primitive from the shell
//!
//! Data goes to stdout, logs to stderr. Exit status: 0 success, 1 mismatch,
//! 2 anything else.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crypto_compat::codec::{base64_decode, base64_encode, from_hex, to_hex};
use crypto_compat::consts::{DEFAULT_PBKDF2_KEY_LEN, DEFAULT_PBKDF2_ROUNDS, NOT_VERIFIED, VERIFIED};
use crypto_compat::digest::{digest, hmac};
use crypto_compat::kdf::pbkdf2;
use crypto_compat::rsa_key::{load_private_key, load_public_key};
use crypto_compat::signature::{sign_sha1, verify_sha1};
use crypto_compat::{
    load_config, AesCryptor, BlockMode, CompatError, DigestAlgorithm, HmacKey, InitVector,
    Padding, Passphrase, Report, RsaPadding, RsaSmallCryptor, Suite, SymmetricKey,
};

/// Cross-validate a crypto stack against known-good fixture files.
#[derive(Parser, Debug)]
#[command(name = "crypto-compat", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run every fixture case in order, stopping at the first failure.
    Run(RunArgs),

    /// Print the names of all fixture cases.
    List(FixtureDirArg),

    /// Base64-encode a file.
    Base64Encode {
        /// Wrap output at 64 columns
        #[arg(short = 'l', long = "lines")]
        wrap: bool,
        file: PathBuf,
    },

    /// Decode a Base64 text file to raw bytes.
    Base64Decode { file: PathBuf },

    /// Hex digest of a file.
    Digest(DigestArgs),

    /// MD5 digest of a file.
    Md5Digest(FileArg),

    /// SHA-1 digest of a file.
    Sha1Digest(FileArg),

    /// Hex HMAC of a file.
    Hmac(HmacArgs),

    /// Hex HMAC-SHA1 of a file.
    HmacSha1(HmacKeyArgs),

    /// Derive a key with PBKDF2 and print it as hex.
    Pbkdf2(Pbkdf2Args),

    /// AES without padding (CBC, or ECB with -e).
    AesEncrypt(AesArgs),
    AesDecrypt(AesArgs),

    /// AES-CBC with PKCS#7 padding.
    AesPadEncrypt(AesPadArgs),
    AesPadDecrypt(AesPadArgs),

    /// AES-CBC with PKCS#7 padding, streamed file to file.
    AesPadBigEncrypt(AesBigArgs),
    AesPadBigDecrypt(AesBigArgs),

    /// Sign a file with RSA/SHA-1 and print the signature as hex.
    RsaSha1Sign { keyfile: PathBuf, file: PathBuf },

    /// Check an RSA/SHA-1 signature over a file.
    RsaSha1Verify {
        keyfile: PathBuf,
        sigfile: PathBuf,
        file: PathBuf,
    },

    /// RSA-encrypt a small file with a public key.
    RsaSmallEncrypt(RsaSmallArgs),

    /// RSA-decrypt a small file with a private key.
    RsaSmallDecrypt(RsaSmallArgs),
}

#[derive(Args, Debug)]
struct FixtureDirArg {
    /// Fixture directory (overrides config and CRYPTO_COMPAT_FIXTURES)
    #[arg(long)]
    fixtures: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    dir: FixtureDirArg,

    /// Write a JSON run report here
    #[arg(long)]
    report: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FileArg {
    file: PathBuf,
}

#[derive(Args, Debug)]
struct DigestArgs {
    #[arg(short = 'a', long = "algorithm")]
    algorithm: DigestAlgorithm,
    file: PathBuf,
}

#[derive(Args, Debug)]
struct HmacArgs {
    #[arg(short = 'a', long = "algorithm")]
    algorithm: DigestAlgorithm,
    #[command(flatten)]
    keyed: HmacKeyArgs,
}

#[derive(Args, Debug)]
struct HmacKeyArgs {
    /// Key as hex; may be empty
    #[arg(short = 'k', long = "key", allow_hyphen_values = true)]
    key: String,
    file: PathBuf,
}

#[derive(Args, Debug)]
struct Pbkdf2Args {
    #[arg(short = 'p', long = "password")]
    password: String,
    #[arg(short = 's', long = "salt")]
    salt: String,
    #[arg(short = 'r', long = "rounds", default_value_t = DEFAULT_PBKDF2_ROUNDS)]
    rounds: u32,
    /// Derived key length in bytes
    #[arg(short = 'l', long = "length", default_value_t = DEFAULT_PBKDF2_KEY_LEN)]
    key_len: usize,
    #[arg(short = 'a', long = "algorithm", default_value = "sha1")]
    prf: DigestAlgorithm,
}

#[derive(Args, Debug)]
struct AesArgs {
    #[arg(short = 'k', long = "key")]
    key: String,
    #[arg(short = 'i', long = "iv", conflicts_with = "ecb")]
    iv: Option<String>,
    /// ECB instead of CBC
    #[arg(short = 'e', long = "ecb")]
    ecb: bool,
    file: PathBuf,
}

#[derive(Args, Debug)]
struct AesPadArgs {
    #[arg(short = 'k', long = "key")]
    key: String,
    #[arg(short = 'i', long = "iv")]
    iv: String,
    file: PathBuf,
}

#[derive(Args, Debug)]
struct AesBigArgs {
    #[arg(short = 'k', long = "key")]
    key: String,
    #[arg(short = 'i', long = "iv")]
    iv: String,
    input: PathBuf,
    output: PathBuf,
}

#[derive(Args, Debug)]
struct RsaSmallArgs {
    #[arg(short = 'p', long = "padding", default_value = "pkcs1")]
    padding: RsaPadding,
    keyfile: PathBuf,
    file: PathBuf,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match dispatch(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            match err.downcast_ref::<CompatError>() {
                Some(e) => e.exit_code(),
                None => ExitCode::from(2),
            }
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Run(args) => run_suite(args),
        Command::List(args) => {
            let suite = open_suite(args.fixtures.as_deref())?;
            for case in suite.cases() {
                println!("{}", case.name);
            }
            Ok(())
        }
        Command::Base64Encode { wrap, file } => {
            let text = base64_encode(&read(&file)?, wrap);
            if wrap {
                print!("{text}");
            } else {
                println!("{text}");
            }
            Ok(())
        }
        Command::Base64Decode { file } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            write_stdout(&base64_decode(&text)?)
        }
        Command::Digest(args) => print_hex(&digest(args.algorithm, &read(&args.file)?)),
        Command::Md5Digest(args) => print_hex(&digest(DigestAlgorithm::Md5, &read(&args.file)?)),
        Command::Sha1Digest(args) => {
            print_hex(&digest(DigestAlgorithm::Sha1, &read(&args.file)?))
        }
        Command::Hmac(args) => keyed_hmac(args.algorithm, &args.keyed),
        Command::HmacSha1(args) => keyed_hmac(DigestAlgorithm::Sha1, &args),
        Command::Pbkdf2(args) => {
            let password = Passphrase::new(args.password);
            let key = pbkdf2(
                args.prf,
                &password,
                args.salt.as_bytes(),
                args.rounds,
                args.key_len,
            )?;
            print_hex(&key)
        }
        Command::AesEncrypt(args) => aes_unpadded(args, true),
        Command::AesDecrypt(args) => aes_unpadded(args, false),
        Command::AesPadEncrypt(args) => aes_padded(args, true),
        Command::AesPadDecrypt(args) => aes_padded(args, false),
        Command::AesPadBigEncrypt(args) => aes_padded_file(args, true),
        Command::AesPadBigDecrypt(args) => aes_padded_file(args, false),
        Command::RsaSha1Sign { keyfile, file } => {
            let key = load_private_key(&keyfile)
                .with_context(|| format!("loading private key {}", keyfile.display()))?;
            print_hex(&sign_sha1(&key, &read(&file)?)?)
        }
        Command::RsaSha1Verify {
            keyfile,
            sigfile,
            file,
        } => {
            let key = load_public_key(&keyfile)
                .with_context(|| format!("loading public key {}", keyfile.display()))?;
            let ok = verify_sha1(&key, &read(&file)?, &read(&sigfile)?);
            println!("{}", if ok { VERIFIED } else { NOT_VERIFIED });
            Ok(())
        }
        Command::RsaSmallEncrypt(args) => {
            let key = load_public_key(&args.keyfile)
                .with_context(|| format!("loading public key {}", args.keyfile.display()))?;
            let out = RsaSmallCryptor::new(args.padding).encrypt(&key, &read(&args.file)?)?;
            print_hex(&out)
        }
        Command::RsaSmallDecrypt(args) => {
            let key = load_private_key(&args.keyfile)
                .with_context(|| format!("loading private key {}", args.keyfile.display()))?;
            let out = RsaSmallCryptor::new(args.padding).decrypt(&key, &read(&args.file)?)?;
            print_hex(&out)
        }
    }
}

fn run_suite(args: RunArgs) -> Result<()> {
    let config = load_config().context("loading configuration")?;
    let suite = open_suite(args.dir.fixtures.as_deref())?;
    info!(
        "Running {} cases from {}",
        suite.cases().len(),
        suite.fixtures().dir().display()
    );

    let mut report = Report::new(suite.fixtures()).context("building fixture inventory")?;
    let outcome = suite.run(&mut report);

    for result in report.results.iter().filter(|r| r.passed) {
        println!("{}: OK", result.name);
    }

    if let Some(path) = args.report.as_ref().or(config.report.path.as_ref()) {
        report
            .write(path)
            .with_context(|| format!("writing report {}", path.display()))?;
        info!("Report written to {}", path.display());
    }

    outcome?;
    println!("Success");
    Ok(())
}

fn open_suite(dir: Option<&Path>) -> Result<Suite> {
    let config = load_config().context("loading configuration")?;
    Suite::from_config(config, dir).context("loading fixture suite")
}

fn aes_unpadded(args: AesArgs, encrypt: bool) -> Result<()> {
    let key = SymmetricKey::new(from_hex(&args.key).context("parsing AES key")?);
    let iv = match args.iv {
        Some(hex) => Some(InitVector::new(from_hex(&hex).context("parsing IV")?)),
        None => None,
    };
    let mode = if args.ecb {
        BlockMode::Ecb
    } else {
        BlockMode::Cbc
    };
    let cryptor = AesCryptor::new(&key, iv.as_ref(), mode, Padding::None)?;
    let data = read(&args.file)?;
    let out = if encrypt {
        cryptor.encrypt(&data)?
    } else {
        cryptor.decrypt(&data)?
    };
    write_stdout(&out)
}

fn aes_padded(args: AesPadArgs, encrypt: bool) -> Result<()> {
    let key = SymmetricKey::new(from_hex(&args.key).context("parsing AES key")?);
    let iv = InitVector::new(from_hex(&args.iv).context("parsing IV")?);
    let cryptor = AesCryptor::new(&key, Some(&iv), BlockMode::Cbc, Padding::Pkcs7)?;
    let data = read(&args.file)?;
    let out = if encrypt {
        cryptor.encrypt(&data)?
    } else {
        cryptor.decrypt(&data)?
    };
    write_stdout(&out)
}

fn aes_padded_file(args: AesBigArgs, encrypt: bool) -> Result<()> {
    let key = SymmetricKey::new(from_hex(&args.key).context("parsing AES key")?);
    let iv = InitVector::new(from_hex(&args.iv).context("parsing IV")?);
    let cryptor = AesCryptor::new(&key, Some(&iv), BlockMode::Cbc, Padding::Pkcs7)?;
    let written = if encrypt {
        cryptor.encrypt_file(&args.input, &args.output)?
    } else {
        cryptor.decrypt_file(&args.input, &args.output)?
    };
    info!("Wrote {} bytes to {}", written, args.output.display());
    Ok(())
}

fn keyed_hmac(algorithm: DigestAlgorithm, args: &HmacKeyArgs) -> Result<()> {
    let key = HmacKey::new(from_hex(&args.key).context("parsing HMAC key")?);
    print_hex(&hmac(algorithm, &key, &read(&args.file)?)?)
}

fn read(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("reading {}", path.display()))
}

fn print_hex(data: &[u8]) -> Result<()> {
    println!("{}", to_hex(data));
    Ok(())
}

fn write_stdout(data: &[u8]) -> Result<()> {
    let mut out = std::io::stdout().lock();
    out.write_all(data)?;
    out.flush()?;
    Ok(())
}
