// src/consts.rs
//! Shared constants — block sizes, CLI defaults, output conventions

/// AES block size in bytes (also the CBC IV length)
pub const AES_BLOCK_SIZE: usize = 16;

/// Accepted AES key lengths in bytes
pub const AES_KEY_SIZES: [usize; 3] = [16, 24, 32];

/// Bytes of overhead PKCS#1 v1.5 encryption padding needs
pub const PKCS1_PADDING_OVERHEAD: usize = 11;

/// Column width of wrapped Base64 output (OpenSSL `enc -base64` layout)
pub const BASE64_LINE_WIDTH: usize = 64;

/// Default PBKDF2 rounds for the CLI when `-r` is not given
pub const DEFAULT_PBKDF2_ROUNDS: u32 = 1000;

/// Default derived key length for the CLI when `-l` is not given
pub const DEFAULT_PBKDF2_KEY_LEN: usize = 16;

/// Chunk size used when streaming large files through AES-CBC
pub const STREAM_CHUNK_SIZE: usize = 64 * 1024;

/// Name of the vector manifest inside the fixture directory
pub const VECTOR_MANIFEST: &str = "vectors.json";

/// Output of `rsa-sha1-verify` for a good signature
pub const VERIFIED: &str = "verified";

/// Output of `rsa-sha1-verify` for a bad signature
pub const NOT_VERIFIED: &str = "not verified";
