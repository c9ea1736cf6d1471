// XOR engine for one-time pad operations.
// - Processes data in 8-byte words followed by a byte tail.
// - No secret-dependent branching; keystream length checks are enforced at callers.

/// XOR over `input` with `keystream`, writing into `out`.
/// Requires: `out.len() == input.len()` and `keystream.len() >= input.len()`.
#[inline(always)]
pub fn xor(input: &[u8], keystream: &[u8], out: &mut [u8]) {
    let len = out.len();
    let words = len / 8 * 8;

    let chunks = out[..words]
        .chunks_exact_mut(8)
        .zip(input[..words].chunks_exact(8))
        .zip(keystream[..words].chunks_exact(8));
    for ((o, a), b) in chunks {
        let mut wa = [0u8; 8];
        let mut wb = [0u8; 8];
        wa.copy_from_slice(a);
        wb.copy_from_slice(b);
        let x = u64::from_ne_bytes(wa) ^ u64::from_ne_bytes(wb);
        o.copy_from_slice(&x.to_ne_bytes());
    }

    for i in words..len {
        out[i] = input[i] ^ keystream[i];
    }
}
