use rand::rngs::SmallRng;
use rand::SeedableRng;

/// A fresh 64-bit seed from whatever entropy the platform offers.
#[cfg(target_arch = "wasm32")]
pub(crate) fn entropy_seed() -> u64 {
    let hi = (js_sys::Math::random() * 4_294_967_296.0) as u64;
    let lo = (js_sys::Math::random() * 4_294_967_296.0) as u64;
    (hi << 32) | lo
}

/// A fresh 64-bit seed from whatever entropy the platform offers.
#[cfg(not(target_arch = "wasm32"))]
pub(crate) fn entropy_seed() -> u64 {
    use std::sync::atomic::{AtomicU64, Ordering};
    use std::time::{SystemTime, UNIX_EPOCH};

    // Worlds created within the same clock tick still get distinct streams.
    static COUNTER: AtomicU64 = AtomicU64::new(0);

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let n = COUNTER.fetch_add(1, Ordering::Relaxed);
    nanos ^ n.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

pub(crate) fn entropy_rng() -> SmallRng {
    SmallRng::seed_from_u64(entropy_seed())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consecutive_seeds_differ() {
        assert_ne!(entropy_seed(), entropy_seed());
    }
}
