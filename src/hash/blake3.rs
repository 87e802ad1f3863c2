//! BLAKE3 accumulator for the `digest` 0.10 trait family.

use ::digest::consts::U32;
use ::digest::{FixedOutput, FixedOutputReset, HashMarker, Output, OutputSizeUser, Reset, Update};

/// Streams bytes into a BLAKE3 hasher and produces the 32-byte default output.
#[derive(Debug, Clone, Default)]
pub(crate) struct Blake3Hasher {
    state: ::blake3::Hasher,
}

impl HashMarker for Blake3Hasher {}

impl OutputSizeUser for Blake3Hasher {
    type OutputSize = U32;
}

impl Update for Blake3Hasher {
    fn update(&mut self, data: &[u8]) {
        self.state.update(data);
    }
}

impl FixedOutput for Blake3Hasher {
    fn finalize_into(self, out: &mut Output<Self>) {
        out.copy_from_slice(self.state.finalize().as_bytes());
    }
}

impl Reset for Blake3Hasher {
    fn reset(&mut self) {
        self.state.reset();
    }
}

impl FixedOutputReset for Blake3Hasher {
    fn finalize_into_reset(&mut self, out: &mut Output<Self>) {
        out.copy_from_slice(self.state.finalize().as_bytes());
        self.state.reset();
    }
}
