use sha2::{Digest, Sha256};

use crate::color::Rgb;

const SATURATION: f32 = 0.6;
const BASE_LIGHTNESS: f32 = 0.5;
const DARK_LIGHTNESS: f32 = 0.3;

/// Derive a (base, dark) color pair from a server's friendly name.
///
/// Pure and deterministic across process restarts: the hue comes from a
/// content hash of the name, not from a runtime-seeded hasher. Two servers
/// sharing a name share colors.
pub fn fallback_colors(name: &str) -> (Rgb, Rgb) {
    let digest = Sha256::digest(name.as_bytes());
    let hue = f32::from(u16::from_be_bytes([digest[0], digest[1]]) % 360);
    (
        Rgb::from_hsl(hue, SATURATION, BASE_LIGHTNESS),
        Rgb::from_hsl(hue, SATURATION, DARK_LIGHTNESS),
    )
}
