//! Command-line interface for the AES context store.

#![forbid(unsafe_code)]

use aes_core::{Block, KeySize};
use aes_ctx::{ContextStore, StoreConfig};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info, LevelFilter};
use rand::{CryptoRng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// AES block cipher CLI.
#[derive(Parser)]
#[command(name = "rijndael", version, author, about = "AES (Rijndael) block cipher CLI")]
struct Cli {
    /// Cap on simultaneously live contexts.
    #[arg(long, global = true, value_name = "N")]
    max_contexts: Option<usize>,
    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt one 16-byte block.
    Enc {
        /// AES key as 32, 48, or 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Plaintext block as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        block_hex: String,
    },
    /// Decrypt one 16-byte block.
    Dec {
        /// AES key as 32, 48, or 64 hex characters.
        #[arg(long, value_name = "HEX")]
        key_hex: String,
        /// Ciphertext block as 32 hex characters.
        #[arg(long, value_name = "HEX")]
        block_hex: String,
    },
    /// Run the published known-answer vectors for every key size.
    Kat,
    /// Verify decrypt(encrypt(b)) == b for random keys and blocks.
    Check {
        /// Number of random samples to test.
        #[arg(long, default_value_t = 64)]
        samples: usize,
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
        /// Key size to exercise.
        #[arg(long, value_enum, default_value_t = KeyBits::B128)]
        key_bits: KeyBits,
    },
    /// Run a local demo: create a context, encrypt random data, decrypt back.
    Demo {
        /// Optional RNG seed for reproducibility.
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KeyBits {
    #[value(name = "128")]
    B128,
    #[value(name = "192")]
    B192,
    #[value(name = "256")]
    B256,
}

impl From<KeyBits> for KeySize {
    fn from(bits: KeyBits) -> Self {
        match bits {
            KeyBits::B128 => KeySize::Aes128,
            KeyBits::B192 => KeySize::Aes192,
            KeyBits::B256 => KeySize::Aes256,
        }
    }
}

/// Published vectors: (key, plaintext, ciphertext).
const KNOWN_ANSWERS: [(&str, &str, &str); 6] = [
    (
        "00000000000000000000000000000000",
        "00000000000000000000000000000000",
        "66e94bd4ef8a2c3b884cfa59ca342b2e",
    ),
    (
        "000000000000000000000000000000000000000000000000",
        "00000000000000000000000000000000",
        "aae06992acbf52a3e8f4a96ec9300bd7",
    ),
    (
        "0000000000000000000000000000000000000000000000000000000000000000",
        "00000000000000000000000000000000",
        "dc95c078a2408989ad48a21492842087",
    ),
    (
        "000102030405060708090a0b0c0d0e0f",
        "00112233445566778899aabbccddeeff",
        "69c4e0d86a7b0430d8cdb78070b4c55a",
    ),
    (
        "000102030405060708090a0b0c0d0e0f1011121314151617",
        "00112233445566778899aabbccddeeff",
        "dda97ca4864cdfe06eaf70a0ec0d7191",
    ),
    (
        "000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f",
        "00112233445566778899aabbccddeeff",
        "8ea2b7ca516745bfeafc49904b496089",
    ),
];

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let store = ContextStore::with_config(StoreConfig {
        max_contexts: cli.max_contexts,
    });
    match cli.command {
        Commands::Enc { key_hex, block_hex } => cmd_transform(&store, &key_hex, &block_hex, true),
        Commands::Dec { key_hex, block_hex } => cmd_transform(&store, &key_hex, &block_hex, false),
        Commands::Kat => cmd_kat(&store),
        Commands::Check {
            samples,
            seed,
            key_bits,
        } => cmd_check(&store, samples, seed, key_bits.into()),
        Commands::Demo { seed } => cmd_demo(&store, seed),
    }
}

fn init_logging(verbose: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.init();
}

fn cmd_transform(
    store: &ContextStore,
    key_hex: &str,
    block_hex: &str,
    encrypt: bool,
) -> Result<()> {
    let key = parse_key_hex(key_hex)?;
    let block = parse_block_hex(block_hex)?;
    let ctx = store.scoped(&key).context("create context")?;
    let out = if encrypt {
        ctx.encrypt(&block)?
    } else {
        ctx.decrypt(&block)?
    };
    ctx.release().context("release context")?;
    println!("{}", hex::encode(out));
    Ok(())
}

fn cmd_kat(store: &ContextStore) -> Result<()> {
    let mut failures = 0usize;
    for (key_hex, pt_hex, ct_hex) in KNOWN_ANSWERS {
        let key = parse_key_hex(key_hex)?;
        let pt = parse_block_hex(pt_hex)?;
        let expected = parse_block_hex(ct_hex)?;

        let ctx = store.scoped(&key).context("create context")?;
        let ct = ctx.encrypt(&pt)?;
        let back = ctx.decrypt(&ct)?;
        let size = KeySize::from_len(key.len())?;
        let ok = ct == expected && back == pt;
        if !ok {
            failures += 1;
        }
        println!(
            "{} {size} key={key_hex} ct={}",
            if ok { "PASS" } else { "FAIL" },
            hex::encode(ct)
        );
    }
    if failures > 0 {
        bail!("{failures} known-answer vector(s) failed");
    }
    Ok(())
}

fn cmd_check(
    store: &ContextStore,
    samples: usize,
    seed: Option<u64>,
    size: KeySize,
) -> Result<()> {
    let mut rng = seeded_rng(seed);
    for sample in 0..samples {
        let mut key = vec![0u8; size.key_bytes()];
        rng.fill_bytes(&mut key);
        let mut block: Block = [0u8; 16];
        rng.fill_bytes(&mut block);

        let ctx = store.scoped(&key).context("create context")?;
        let ct = ctx.encrypt(&block)?;
        if ct == block {
            bail!("sample {sample}: encryption left the block unchanged");
        }
        if ctx.decrypt(&ct)? != block {
            bail!("sample {sample}: decrypt(encrypt(b)) != b for {size}");
        }
        debug!("sample {sample} ok");
    }
    if !store.is_empty() {
        bail!("{} context(s) leaked", store.len());
    }
    println!("{samples} {size} samples round-tripped");
    Ok(())
}

fn cmd_demo(store: &ContextStore, seed: Option<u64>) -> Result<()> {
    let mut rng = seeded_rng(seed);
    let mut key = [0u8; 16];
    rng.fill_bytes(&mut key);

    let handle = store.create(&key).context("create context")?;
    info!("demo context {handle}");

    let mut block: Block = [0u8; 16];
    rng.fill_bytes(&mut block);
    let ciphertext = store.encrypt(handle, &block)?;
    let decrypted = store.decrypt(handle, &ciphertext)?;
    store.destroy(handle).context("destroy context")?;

    println!("demo key: {}", hex::encode(key));
    println!("handle: {handle}");
    println!("plaintext: {}", hex::encode(block));
    println!("ciphertext: {}", hex::encode(ciphertext));
    println!("decrypted: {}", hex::encode(decrypted));
    if decrypted != block {
        bail!("demo roundtrip failed");
    }
    Ok(())
}

fn parse_key_hex(hex_str: &str) -> Result<Vec<u8>> {
    let bytes = hex::decode(hex_str.trim()).context("decode key hex")?;
    KeySize::from_len(bytes.len())
        .with_context(|| format!("AES key must be 16, 24, or 32 bytes, got {}", bytes.len()))?;
    Ok(bytes)
}

fn parse_block_hex(hex_str: &str) -> Result<Block> {
    let bytes = hex::decode(hex_str.trim()).context("decode block hex")?;
    aes_core::block_from_slice(&bytes).with_context(|| {
        format!(
            "block must be 16 bytes (32 hex characters), got {}",
            bytes.len()
        )
    })
}

fn seeded_rng(seed: Option<u64>) -> impl RngCore + CryptoRng {
    match seed {
        Some(value) => {
            let mut seed_bytes = [0u8; 32];
            seed_bytes[..8].copy_from_slice(&value.to_le_bytes());
            ChaCha20Rng::from_seed(seed_bytes)
        }
        None => {
            let mut seed_bytes = [0u8; 32];
            rand::rngs::OsRng.fill_bytes(&mut seed_bytes);
            ChaCha20Rng::from_seed(seed_bytes)
        }
    }
}
