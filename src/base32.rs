//! Crockford base32 alphabet and the fixed 16-byte ↔ 26-character packing.

/// The 32 symbols of the text representation, indexed by digit value.
pub(crate) const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";

/// Marker for bytes that are not alphabet members in [`DECODE_MAP`].
const INVALID: u8 = 0xff;

/// Inverse of [`ALPHABET`]: maps an ASCII byte to its digit value or [`INVALID`].
///
/// Only uppercase symbols are mapped; lowercase letters and the excluded `I`, `L`, `O`, and `U`
/// stay invalid.
const DECODE_MAP: [u8; 256] = {
    let mut map = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        map[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    map
};

/// Encodes 16 bytes into 26 ASCII symbols, five bits per symbol read MSB-first.
///
/// The first ten symbols carry the 48-bit timestamp behind two implicit zero bits; the last
/// sixteen carry the 80-bit payload.
pub(crate) const fn encode(d: &[u8; 16]) -> [u8; 26] {
    let c = [
        d[0] >> 5,
        d[0] & 0x1f,
        d[1] >> 3,
        ((d[1] & 0x07) << 2) | (d[2] >> 6),
        (d[2] & 0x3e) >> 1,
        ((d[2] & 0x01) << 4) | (d[3] >> 4),
        ((d[3] & 0x0f) << 1) | (d[4] >> 7),
        (d[4] & 0x7c) >> 2,
        ((d[4] & 0x03) << 3) | (d[5] >> 5),
        d[5] & 0x1f,
        d[6] >> 3,
        ((d[6] & 0x07) << 2) | (d[7] >> 6),
        (d[7] & 0x3e) >> 1,
        ((d[7] & 0x01) << 4) | (d[8] >> 4),
        ((d[8] & 0x0f) << 1) | (d[9] >> 7),
        (d[9] & 0x7c) >> 2,
        ((d[9] & 0x03) << 3) | (d[10] >> 5),
        d[10] & 0x1f,
        d[11] >> 3,
        ((d[11] & 0x07) << 2) | (d[12] >> 6),
        (d[12] & 0x3e) >> 1,
        ((d[12] & 0x01) << 4) | (d[13] >> 4),
        ((d[13] & 0x0f) << 1) | (d[14] >> 7),
        (d[14] & 0x7c) >> 2,
        ((d[14] & 0x03) << 3) | (d[15] >> 5),
        d[15] & 0x1f,
    ];

    let mut dst = [0u8; 26];
    let mut i = 0;
    while i < dst.len() {
        dst[i] = ALPHABET[c[i] as usize];
        i += 1;
    }
    dst
}

/// Decodes 26 ASCII symbols into 16 bytes.
///
/// Returns the zero-based position of the first symbol that is not in the alphabet. The leading
/// symbol carries only three significant bits, so anything above `7` there is rejected as well.
pub(crate) fn decode(src: &[u8; 26]) -> Result<[u8; 16], usize> {
    let mut c = [0u8; 26];
    for (i, (dst, &e)) in c.iter_mut().zip(src).enumerate() {
        *dst = DECODE_MAP[e as usize];
        if *dst == INVALID {
            return Err(i);
        }
    }
    if c[0] > 7 {
        return Err(0);
    }

    Ok([
        (c[0] << 5) | c[1],
        (c[2] << 3) | (c[3] >> 2),
        (c[3] << 6) | (c[4] << 1) | (c[5] >> 4),
        (c[5] << 4) | (c[6] >> 1),
        (c[6] << 7) | (c[7] << 2) | (c[8] >> 3),
        (c[8] << 5) | c[9],
        (c[10] << 3) | (c[11] >> 2),
        (c[11] << 6) | (c[12] << 1) | (c[13] >> 4),
        (c[13] << 4) | (c[14] >> 1),
        (c[14] << 7) | (c[15] << 2) | (c[16] >> 3),
        (c[16] << 5) | c[17],
        (c[18] << 3) | (c[19] >> 2),
        (c[19] << 6) | (c[20] << 1) | (c[21] >> 4),
        (c[21] << 4) | (c[22] >> 1),
        (c[22] << 7) | (c[23] << 2) | (c[24] >> 3),
        (c[24] << 5) | c[25],
    ])
}
