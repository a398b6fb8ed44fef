//! Cipher and Base64 nodes.
//!
//! XOR, RC4 and AES take their key (and AES its IV) from the `key`/`iv`
//! ports when those carry data, and otherwise from the hex-text parameters
//! the ports shadow.

use crate::pipeline::error::{TransformError, TransformResult};
use crate::pipeline::node::NodeContext;
use crate::pipeline::node_type::AES_MODES;
use crate::pipeline::nodes::params::{parse_hex, Choice, CodecMode};
use aes::cipher::block_padding::{NoPadding, Pkcs7};
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit, StreamCipher};
use aes::{Aes128, Aes192, Aes256};
use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use base64::Engine;

const AES_BLOCK: usize = 16;

/// Standard alphabet, padded, tolerant of non-zero trailing bits.
const BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Wired key if it carries data, else the hex parameter, else `fallback`.
fn key_material(ctx: &NodeContext, port: &str, param: &str, fallback: &[u8]) -> Vec<u8> {
    let wired = ctx.input(port);
    if !wired.is_empty() {
        return wired.to_vec();
    }
    parse_hex(ctx.param(param)).unwrap_or_else(|| fallback.to_vec())
}

/// Repeating-key XOR. Empty data or key yields empty output.
pub fn xor_bytes(data: &[u8], key: &[u8]) -> Vec<u8> {
    if data.is_empty() || key.is_empty() {
        return Vec::new();
    }
    data.iter()
        .zip(key.iter().cycle())
        .map(|(d, k)| d ^ k)
        .collect()
}

pub(super) fn xor(ctx: &NodeContext) -> TransformResult {
    let data = ctx.input("data");
    let key = key_material(ctx, "key", "key_hex", &[0x00]);
    Ok(xor_bytes(data, &key))
}

/// RC4 keystream XORed with `data`. Keys must be 1..=256 bytes.
pub fn rc4_apply(key: &[u8], data: &[u8]) -> TransformResult {
    if key.is_empty() || key.len() > 256 {
        return Err(TransformError::Cipher(format!(
            "RC4 key must be 1 to 256 bytes, got {}",
            key.len()
        )));
    }

    let mut s: [u8; 256] = std::array::from_fn(|i| i as u8);
    let mut j: u8 = 0;
    for i in 0..256 {
        j = j.wrapping_add(s[i]).wrapping_add(key[i % key.len()]);
        s.swap(i, j as usize);
    }

    let (mut i, mut j) = (0u8, 0u8);
    Ok(data
        .iter()
        .map(|&byte| {
            i = i.wrapping_add(1);
            j = j.wrapping_add(s[i as usize]);
            s.swap(i as usize, j as usize);
            let k = s[s[i as usize].wrapping_add(s[j as usize]) as usize];
            byte ^ k
        })
        .collect())
}

pub(super) fn rc4(ctx: &NodeContext) -> TransformResult {
    let data = ctx.input("data");
    let key = key_material(ctx, "key", "key_hex", &[0x00]);
    if data.is_empty() || key.is_empty() {
        return Ok(Vec::new());
    }
    rc4_apply(&key, data)
}

/// AES operating mode, in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AesMode {
    #[default]
    CbcEncrypt,
    CbcDecrypt,
    EcbEncrypt,
    EcbDecrypt,
    CtrEncrypt,
    CtrDecrypt,
}

impl Choice for AesMode {
    const LABELS: &'static [&'static str] = AES_MODES;

    fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(AesMode::CbcEncrypt),
            1 => Some(AesMode::CbcDecrypt),
            2 => Some(AesMode::EcbEncrypt),
            3 => Some(AesMode::EcbDecrypt),
            4 => Some(AesMode::CtrEncrypt),
            5 => Some(AesMode::CtrDecrypt),
            _ => None,
        }
    }
}

/// Zero-pad or truncate to `len` bytes.
fn fit(bytes: &[u8], len: usize) -> Vec<u8> {
    let mut out = bytes[..bytes.len().min(len)].to_vec();
    out.resize(len, 0);
    out
}

/// Keys that are not a valid AES length are fitted to 16 bytes.
fn coerce_key(key: &[u8]) -> Vec<u8> {
    match key.len() {
        16 | 24 | 32 => key.to_vec(),
        _ => fit(key, 16),
    }
}

/// Remove PKCS#7 padding, or `None` if the padding is malformed.
fn strip_pkcs7(data: &[u8]) -> Option<&[u8]> {
    if data.is_empty() || data.len() % AES_BLOCK != 0 {
        return None;
    }
    let pad = *data.last()? as usize;
    if pad == 0 || pad > AES_BLOCK.min(data.len()) {
        return None;
    }
    let (body, padding) = data.split_at(data.len() - pad);
    padding.iter().all(|&b| b as usize == pad).then_some(body)
}

fn check_blocks(data: &[u8]) -> Result<(), TransformError> {
    if data.len() % AES_BLOCK == 0 {
        Ok(())
    } else {
        Err(TransformError::Cipher(format!(
            "ciphertext length {} is not a multiple of {AES_BLOCK}",
            data.len()
        )))
    }
}

fn cipher_err(err: impl std::fmt::Display) -> TransformError {
    TransformError::Cipher(err.to_string())
}

macro_rules! aes_with {
    ($cipher:ty, $key:expr, $iv:expr, $data:expr, $mode:expr) => {{
        let (key, iv, data): (&[u8], &[u8], &[u8]) = ($key, $iv, $data);
        match $mode {
            AesMode::CbcEncrypt => Ok(cbc::Encryptor::<$cipher>::new_from_slices(key, iv)
                .map_err(cipher_err)?
                .encrypt_padded_vec_mut::<Pkcs7>(data)),
            AesMode::CbcDecrypt => {
                check_blocks(data)?;
                cbc::Decryptor::<$cipher>::new_from_slices(key, iv)
                    .map_err(cipher_err)?
                    .decrypt_padded_vec_mut::<NoPadding>(data)
                    .map_err(cipher_err)
            }
            AesMode::EcbEncrypt => Ok(ecb::Encryptor::<$cipher>::new_from_slice(key)
                .map_err(cipher_err)?
                .encrypt_padded_vec_mut::<Pkcs7>(data)),
            AesMode::EcbDecrypt => {
                check_blocks(data)?;
                ecb::Decryptor::<$cipher>::new_from_slice(key)
                    .map_err(cipher_err)?
                    .decrypt_padded_vec_mut::<NoPadding>(data)
                    .map_err(cipher_err)
            }
            AesMode::CtrEncrypt | AesMode::CtrDecrypt => {
                let mut buf = data.to_vec();
                ctr::Ctr128BE::<$cipher>::new_from_slices(key, iv)
                    .map_err(cipher_err)?
                    .apply_keystream(&mut buf);
                Ok(buf)
            }
        }
    }};
}

/// Run AES over `data`.
///
/// `key` is fitted to 16 bytes unless it is already 16, 24 or 32 bytes long;
/// `iv` is always fitted to 16 bytes. Decrypted output whose PKCS#7 padding
/// does not check out is returned as-is. CTR uses the IV as a big-endian
/// 128-bit counter and never pads.
pub fn aes_apply(data: &[u8], key: &[u8], iv: &[u8], mode: AesMode) -> TransformResult {
    let key = coerce_key(key);
    let iv = fit(iv, AES_BLOCK);

    let out: TransformResult = match key.len() {
        16 => aes_with!(Aes128, &key, &iv, data, mode),
        24 => aes_with!(Aes192, &key, &iv, data, mode),
        _ => aes_with!(Aes256, &key, &iv, data, mode),
    };
    let out = out?;

    match mode {
        AesMode::CbcDecrypt | AesMode::EcbDecrypt => Ok(match strip_pkcs7(&out) {
            Some(body) => body.to_vec(),
            None => out,
        }),
        _ => Ok(out),
    }
}

pub(super) fn aes(ctx: &NodeContext) -> TransformResult {
    let data = ctx.input("data");
    let key = key_material(ctx, "key", "key_hex", &[0u8; 16]);
    let iv = key_material(ctx, "iv", "iv_hex", &[0u8; 16]);
    if data.is_empty() {
        return Ok(Vec::new());
    }
    aes_apply(data, &key, &iv, AesMode::parse_or_default(ctx.param("mode")))
}

pub fn base64_encode(data: &[u8]) -> Vec<u8> {
    BASE64.encode(data).into_bytes()
}

/// Decode Base64, skipping bytes outside the alphabet (line breaks etc.).
pub fn base64_decode(data: &[u8]) -> TransformResult {
    let filtered: Vec<u8> = data
        .iter()
        .copied()
        .filter(|&b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='))
        .collect();
    BASE64
        .decode(filtered)
        .map_err(|e| TransformError::Decode(format!("invalid base64: {e}")))
}

pub(super) fn base64(ctx: &NodeContext) -> TransformResult {
    let data = ctx.input("data");
    if data.is_empty() {
        return Ok(Vec::new());
    }
    match CodecMode::parse_or_default(ctx.param("mode")) {
        CodecMode::Encode => Ok(base64_encode(data)),
        CodecMode::Decode => base64_decode(data),
    }
}
