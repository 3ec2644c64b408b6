//! Cache keys for generated chunks
//!
//! A key covers everything that determines a chunk's output: master seed, chunk
//! coordinates, generator version, content type, and a hash of the parameters.
//! Parameter hashing uses a canonical JSON text (sorted keys, `", "` and `": "`
//! separators, DEL and non-ASCII escaped as `\uXXXX`, shortest float repr with
//! two-digit signed exponents) so keys agree with other tools hashing the same
//! parameter set.

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;
use sha2::{Digest, Sha256};

use crate::core::Result;
use crate::generation::config::{ChunkCoord, ContentType};

/// Version tag mixed into every cache key. Bump when output changes.
pub const GENERATION_VERSION: &str = "1.0.0-alpha";

/// Hex digits of the parameter hash kept in keys.
pub const PARAMS_HASH_LEN: usize = 16;

/// JSON formatter producing the canonical parameter text.
#[derive(Clone, Copy, Debug, Default)]
struct CanonicalFormatter;

impl Formatter for CanonicalFormatter {
    fn begin_array_value<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_key<W: ?Sized + io::Write>(&mut self, writer: &mut W, first: bool) -> io::Result<()> {
        if first { Ok(()) } else { writer.write_all(b", ") }
    }

    fn begin_object_value<W: ?Sized + io::Write>(&mut self, writer: &mut W) -> io::Result<()> {
        writer.write_all(b": ")
    }

    fn write_f64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f64) -> io::Result<()> {
        writer.write_all(float_repr(value).as_bytes())
    }

    fn write_string_fragment<W: ?Sized + io::Write>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()> {
        // printable ASCII passes through; DEL and everything above is escaped
        if fragment.bytes().all(|b| b < 0x7f) {
            return writer.write_all(fragment.as_bytes());
        }
        let mut units = [0u16; 2];
        for c in fragment.chars() {
            if (c as u32) < 0x7f {
                writer.write_all(&[c as u8])?;
            } else {
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
        }
        Ok(())
    }
}

/// Shortest round-trip float text, positional for exponents in [-4, 16).
fn float_repr(value: f64) -> String {
    // `{:e}` yields the shortest round-trip digits, e.g. "-1.25e-5"
    let sci = format!("{:e}", value);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let exp: i32 = exp.parse().unwrap_or(0);
    let (sign, mantissa) = match mantissa.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", mantissa),
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();

    if (-4..16).contains(&exp) {
        if exp >= 0 {
            let int_len = exp as usize + 1;
            let (int_part, frac_part) = if digits.len() > int_len {
                (digits[..int_len].to_string(), digits[int_len..].to_string())
            } else {
                (format!("{:0<width$}", digits, width = int_len), "0".to_string())
            };
            format!("{}{}.{}", sign, int_part, frac_part)
        } else {
            format!("{}0.{}{}", sign, "0".repeat((-exp - 1) as usize), digits)
        }
    } else {
        let (lead, rest) = digits.split_at(1);
        let exp_sign = if exp < 0 { '-' } else { '+' };
        if rest.is_empty() {
            format!("{}{}e{}{:02}", sign, lead, exp_sign, exp.abs())
        } else {
            format!("{}{}.{}e{}{:02}", sign, lead, rest, exp_sign, exp.abs())
        }
    }
}

/// Canonical JSON text of `params`.
pub fn canonical_json<T: Serialize + ?Sized>(params: &T) -> Result<String> {
    // Value maps are ordered, which sorts the keys
    let value = serde_json::to_value(params)?;
    let mut out = Vec::new();
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, CanonicalFormatter);
    value.serialize(&mut serializer)?;
    // the formatter only ever writes ASCII
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// First 16 hex digits of the SHA-256 of the canonical parameter text.
pub fn params_hash<T: Serialize + ?Sized>(params: &T) -> Result<String> {
    let digest = Sha256::digest(canonical_json(params)?.as_bytes());
    let mut hash = hex::encode(digest);
    hash.truncate(PARAMS_HASH_LEN);
    Ok(hash)
}

/// Full SHA-256 hex key of `"{seed}:{x},{y},{z}:{version}:{type}:{params_hash}"`.
pub fn compute_cache_key(
    master_seed: u64,
    coord: ChunkCoord,
    version: &str,
    content_type: &ContentType,
    params_hash: &str,
) -> String {
    let raw = format!(
        "{}:{},{},{}:{}:{}:{}",
        master_seed, coord.x, coord.y, coord.z, version, content_type, params_hash
    );
    hex::encode(Sha256::digest(raw.as_bytes()))
}
