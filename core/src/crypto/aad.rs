//! crypto/aad.rs
//! Associated data binding a sealed payload to its request context.
//!
//! AAD = UTF-8 of `url|appId|timestamp|symSn`. Both sides must build it from
//! the same four values or the tag check fails.

use crate::constants::AAD_SEPARATOR;

#[inline]
pub fn build_aad(url: &str, app_id: &str, timestamp: i64, sym_sn: &str) -> Vec<u8> {
    let ts = timestamp.to_string();
    let mut out = Vec::with_capacity(url.len() + app_id.len() + ts.len() + sym_sn.len() + 3);

    out.extend_from_slice(url.as_bytes());
    out.push(AAD_SEPARATOR as u8);
    out.extend_from_slice(app_id.as_bytes());
    out.push(AAD_SEPARATOR as u8);
    out.extend_from_slice(ts.as_bytes());
    out.push(AAD_SEPARATOR as u8);
    out.extend_from_slice(sym_sn.as_bytes());

    out
}
