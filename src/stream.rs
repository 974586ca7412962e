// src/stream.rs
//! Streaming AES for inputs too large to hold in memory
//!
//! Output is byte-for-byte what the one-shot [`AesCryptor`] would produce.
//! Decryption holds back the final block until EOF so PKCS#7 padding can be
//! stripped from it.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind, Read, Write};
use std::path::Path;

use aes::cipher::block_padding::Pkcs7;
use aes::cipher::generic_array::GenericArray;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit};
use aes::{Aes128, Aes192, Aes256};
use tracing::debug;

use crate::consts::{AES_BLOCK_SIZE, STREAM_CHUNK_SIZE};
use crate::cryptor::{with_aes, AesCryptor, BlockMode, Padding};
use crate::error::{CompatError, Result};

impl AesCryptor<'_> {
    /// Encrypt everything `reader` yields into `writer`; returns bytes written
    pub fn encrypt_stream<R: Read, W: Write>(&self, reader: R, writer: W) -> Result<u64> {
        let key = self.key.expose_secret();
        let padding = self.padding();
        match self.mode() {
            BlockMode::Ecb => with_aes!(key, C => {
                let mode = ecb::Encryptor::<C>::new_from_slice(key)
                    .map_err(|_| CompatError::InvalidKeyLength(key.len()))?;
                encrypt_stream_with(mode, padding, reader, writer)
            }),
            BlockMode::Cbc => {
                let iv = self.iv_bytes()?;
                with_aes!(key, C => {
                    let mode = cbc::Encryptor::<C>::new_from_slices(key, iv)
                        .map_err(|_| CompatError::InvalidIvLength(iv.len()))?;
                    encrypt_stream_with(mode, padding, reader, writer)
                })
            }
        }
    }

    /// Decrypt everything `reader` yields into `writer`; returns bytes written
    pub fn decrypt_stream<R: Read, W: Write>(&self, reader: R, writer: W) -> Result<u64> {
        let key = self.key.expose_secret();
        let padding = self.padding();
        match self.mode() {
            BlockMode::Ecb => with_aes!(key, C => {
                let mode = ecb::Decryptor::<C>::new_from_slice(key)
                    .map_err(|_| CompatError::InvalidKeyLength(key.len()))?;
                decrypt_stream_with(mode, padding, reader, writer)
            }),
            BlockMode::Cbc => {
                let iv = self.iv_bytes()?;
                with_aes!(key, C => {
                    let mode = cbc::Decryptor::<C>::new_from_slices(key, iv)
                        .map_err(|_| CompatError::InvalidIvLength(iv.len()))?;
                    decrypt_stream_with(mode, padding, reader, writer)
                })
            }
        }
    }

    /// Encrypt a file on disk; returns ciphertext size in bytes
    pub fn encrypt_file<P: AsRef<Path>>(&self, input_path: P, output_path: P) -> Result<u64> {
        let reader = BufReader::new(File::open(input_path.as_ref())?);
        let writer = BufWriter::new(File::create(output_path.as_ref())?);
        let written = self.encrypt_stream(reader, writer)?;
        debug!(
            "encrypted {} → {} ({written} bytes)",
            input_path.as_ref().display(),
            output_path.as_ref().display()
        );
        Ok(written)
    }

    /// Decrypt a file on disk; returns plaintext size in bytes
    pub fn decrypt_file<P: AsRef<Path>>(&self, input_path: P, output_path: P) -> Result<u64> {
        let reader = BufReader::new(File::open(input_path.as_ref())?);
        let writer = BufWriter::new(File::create(output_path.as_ref())?);
        let written = self.decrypt_stream(reader, writer)?;
        debug!(
            "decrypted {} → {} ({written} bytes)",
            input_path.as_ref().display(),
            output_path.as_ref().display()
        );
        Ok(written)
    }
}

/// `read` that retries on `Interrupted`
fn read_some<R: Read>(reader: &mut R, buf: &mut [u8]) -> Result<usize> {
    loop {
        match reader.read(buf) {
            Ok(n) => return Ok(n),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

fn encrypt_stream_with<M, R, W>(mut mode: M, padding: Padding, mut reader: R, mut writer: W) -> Result<u64>
where
    M: BlockEncryptMut,
    R: Read,
    W: Write,
{
    let block = M::block_size();
    let mut buf = vec![0u8; STREAM_CHUNK_SIZE + block];
    let mut pending = 0usize;
    let mut total_in = 0usize;
    let mut written = 0u64;

    loop {
        let n = read_some(&mut reader, &mut buf[pending..pending + STREAM_CHUNK_SIZE])?;
        if n == 0 {
            break;
        }
        total_in += n;
        pending += n;

        let whole = pending - pending % block;
        for chunk in buf[..whole].chunks_exact_mut(block) {
            mode.encrypt_block_mut(GenericArray::from_mut_slice(chunk));
        }
        writer.write_all(&buf[..whole])?;
        written += whole as u64;

        buf.copy_within(whole..pending, 0);
        pending -= whole;
    }

    match padding {
        Padding::Pkcs7 => {
            let last = mode
                .encrypt_padded_mut::<Pkcs7>(&mut buf, pending)
                .map_err(|_| CompatError::BadPadding)?;
            writer.write_all(last)?;
            written += last.len() as u64;
        }
        Padding::None if pending != 0 => {
            return Err(CompatError::UnalignedInput {
                len: total_in,
                block: AES_BLOCK_SIZE,
            })
        }
        Padding::None => {}
    }

    writer.flush()?;
    Ok(written)
}

fn decrypt_stream_with<M, R, W>(mut mode: M, padding: Padding, mut reader: R, mut writer: W) -> Result<u64>
where
    M: BlockDecryptMut,
    R: Read,
    W: Write,
{
    let block = M::block_size();
    let mut buf = vec![0u8; STREAM_CHUNK_SIZE + block];
    let mut pending = 0usize;
    let mut total_in = 0usize;
    let mut written = 0u64;

    loop {
        let n = read_some(&mut reader, &mut buf[pending..pending + STREAM_CHUNK_SIZE])?;
        if n == 0 {
            break;
        }
        total_in += n;
        pending += n;

        // Always keep the newest complete block back; it may carry the padding
        let whole = if pending % block == 0 {
            pending - block
        } else {
            pending - pending % block
        };
        for chunk in buf[..whole].chunks_exact_mut(block) {
            mode.decrypt_block_mut(GenericArray::from_mut_slice(chunk));
        }
        writer.write_all(&buf[..whole])?;
        written += whole as u64;

        buf.copy_within(whole..pending, 0);
        pending -= whole;
    }

    if total_in % block != 0 {
        return Err(CompatError::UnalignedInput {
            len: total_in,
            block: AES_BLOCK_SIZE,
        });
    }

    match padding {
        Padding::Pkcs7 => {
            if pending != block {
                return Err(CompatError::BadPadding);
            }
            let last = mode
                .decrypt_padded_mut::<Pkcs7>(&mut buf[..block])
                .map_err(|_| CompatError::BadPadding)?;
            writer.write_all(last)?;
            written += last.len() as u64;
        }
        Padding::None => {
            for chunk in buf[..pending].chunks_exact_mut(block) {
                mode.decrypt_block_mut(GenericArray::from_mut_slice(chunk));
            }
            writer.write_all(&buf[..pending])?;
            written += pending as u64;
        }
    }

    writer.flush()?;
    Ok(written)
}
