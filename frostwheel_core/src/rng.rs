use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

// Winning-slot draws. Uniform over the slots; the engine calls `draw` exactly
// once per accepted trigger.

pub type HmacSha256 = Hmac<Sha256>;

pub trait PrizeDraw {
    /// Returns an index in `[0, slots)`. `slots` is never zero.
    fn draw(&mut self, slots: usize) -> usize;
}

impl<F> PrizeDraw for F
where
    F: FnMut(usize) -> usize,
{
    fn draw(&mut self, slots: usize) -> usize {
        self(slots) % slots
    }
}

/// Thread-local OS-seeded generator.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomDraw;

impl PrizeDraw for RandomDraw {
    fn draw(&mut self, slots: usize) -> usize {
        rand::thread_rng().gen_range(0..slots)
    }
}

pub fn derive_hash_hex(input: &[u8]) -> String {
    use sha2::Digest;
    let mut hasher = Sha256::new();
    hasher.update(input);
    hex::encode(hasher.finalize())
}

/// Maps successive 4-byte big-endian chunks to floats in `[0,1)`.
pub fn derive_floats(bytes: &[u8]) -> impl Iterator<Item = f64> + '_ {
    bytes.chunks_exact(4).map(|chunk| {
        let v = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        (v as f64) / (u32::MAX as f64 + 1.0)
    })
}

/// Reproducible draws: HMAC-SHA256(seed, "stream:nonce") -> float -> slot.
/// The nonce advances once per draw, so a (seed, stream) pair always yields
/// the same sequence of outcomes.
#[derive(Debug, Clone)]
pub struct SeededDraw {
    seed: String,
    stream: String,
    nonce: u64,
}

impl SeededDraw {
    pub fn new(seed: impl Into<String>) -> Self {
        Self::with_stream(seed, "wheel")
    }

    pub fn with_stream(seed: impl Into<String>, stream: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            stream: stream.into(),
            nonce: 0,
        }
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Label for a run; lets two runs be compared without printing the seed.
    pub fn seed_hash_hex(&self) -> String {
        derive_hash_hex(self.seed.as_bytes())
    }

    fn hmac_bytes(&self, nonce: u64) -> [u8; 32] {
        let mut mac = HmacSha256::new_from_slice(self.seed.as_bytes()).expect("HMAC key");
        mac.update(format!("{}:{}", self.stream, nonce).as_bytes());
        let res = mac.finalize().into_bytes();
        let mut out = [0u8; 32];
        out.copy_from_slice(&res);
        out
    }

    pub fn next_float(&mut self) -> f64 {
        self.nonce += 1;
        let bytes = self.hmac_bytes(self.nonce);
        let value = derive_floats(&bytes).next().unwrap_or_default();
        value
    }
}

impl PrizeDraw for SeededDraw {
    fn draw(&mut self, slots: usize) -> usize {
        let f = self.next_float();
        ((f * slots as f64).floor() as usize).min(slots - 1)
    }
}
