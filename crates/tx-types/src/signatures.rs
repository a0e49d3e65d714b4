use plasma_primitives::{RawSignature, SIGNATURE_LEN};

use crate::{NUM_INPUTS, TxDecodeError, TxDecodeResult};

/// Signature blob accompanying a transaction.
///
/// Layout is `sig1 ‖ sig2` followed by zero, one or two confirmation
/// signatures.  Unused input slots are zero-filled.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TxSignatures {
    input_sigs: [RawSignature; NUM_INPUTS],
    confirmations: Vec<RawSignature>,
}

impl TxSignatures {
    pub fn new(input_sigs: [RawSignature; NUM_INPUTS], confirmations: Vec<RawSignature>) -> Self {
        Self {
            input_sigs,
            confirmations,
        }
    }

    /// Parses a signature blob.
    pub fn parse(buf: &[u8]) -> TxDecodeResult<Self> {
        let min_len = NUM_INPUTS * SIGNATURE_LEN;
        let max_len = 2 * min_len;
        if buf.len() % SIGNATURE_LEN != 0 || buf.len() < min_len || buf.len() > max_len {
            return Err(TxDecodeError::SignatureBlobLength(buf.len()));
        }

        let mut sigs = buf.chunks_exact(SIGNATURE_LEN).map(to_raw_sig);
        let mut input_sigs = [[0u8; SIGNATURE_LEN]; NUM_INPUTS];
        for slot in input_sigs.iter_mut() {
            // Length was checked above, so both slots are there.
            if let Some(sig) = sigs.next() {
                *slot = sig;
            }
        }

        Ok(Self {
            input_sigs,
            confirmations: sigs.collect(),
        })
    }

    pub fn input_sigs(&self) -> &[RawSignature; NUM_INPUTS] {
        &self.input_sigs
    }

    pub fn input_sig(&self, idx: usize) -> Option<&RawSignature> {
        self.input_sigs.get(idx)
    }

    pub fn confirmation(&self, idx: usize) -> Option<&RawSignature> {
        self.confirmations.get(idx)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.input_sigs
            .iter()
            .chain(self.confirmations.iter())
            .flat_map(|s| s.iter().copied())
            .collect()
    }
}

fn to_raw_sig(chunk: &[u8]) -> RawSignature {
    let mut sig = [0u8; SIGNATURE_LEN];
    sig.copy_from_slice(chunk);
    sig
}

/// An all-zero signature marks an unused input slot.
pub fn is_empty_signature(sig: &RawSignature) -> bool {
    sig.iter().all(|b| *b == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layouts() {
        let two = [[1u8; 65], [0u8; 65]].concat();
        let parsed = TxSignatures::parse(&two).unwrap();
        assert_eq!(parsed.input_sig(0), Some(&[1u8; 65]));
        assert!(is_empty_signature(parsed.input_sig(1).unwrap()));
        assert_eq!(parsed.confirmation(0), None);

        let four = [[1u8; 65], [2u8; 65], [3u8; 65], [4u8; 65]].concat();
        let parsed = TxSignatures::parse(&four).unwrap();
        assert_eq!(parsed.confirmation(1), Some(&[4u8; 65]));
        assert_eq!(parsed.to_bytes(), four);
    }

    #[test]
    fn test_parse_rejects_bad_lengths() {
        for len in [0, 64, 65, 129, 131, 325] {
            assert_eq!(
                TxSignatures::parse(&vec![0u8; len]),
                Err(TxDecodeError::SignatureBlobLength(len))
            );
        }
    }
}
