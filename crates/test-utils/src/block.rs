use plasma_primitives::{B256, RawSignature, SIGNATURE_LEN};
use plasma_tx_types::{NUM_INPUTS, Transaction, TxSignatures, compute_leaf_hash};

use crate::{FixedMerkleTree, TestAccount};

/// Transaction together with its input owner signatures.
#[derive(Clone, Debug)]
pub struct SignedTx {
    tx: Transaction,
    input_sigs: [RawSignature; NUM_INPUTS],
}

impl SignedTx {
    /// Signs `tx` with the owner of each input.  `None` leaves the slot
    /// zero-filled.
    pub fn new(tx: Transaction, signers: [Option<&TestAccount>; NUM_INPUTS]) -> Self {
        let hash = tx.hash();
        let input_sigs =
            signers.map(|s| s.map_or([0u8; SIGNATURE_LEN], |acct| acct.sign(&hash)));
        Self { tx, input_sigs }
    }

    pub fn tx(&self) -> &Transaction {
        &self.tx
    }

    pub fn bytes(&self) -> Vec<u8> {
        self.tx.encode()
    }

    pub fn hash(&self) -> B256 {
        self.tx.hash()
    }

    pub fn input_sigs(&self) -> &[RawSignature; NUM_INPUTS] {
        &self.input_sigs
    }

    pub fn leaf(&self) -> B256 {
        compute_leaf_hash(&self.hash(), &TxSignatures::new(self.input_sigs, Vec::new()))
    }

    /// Signature blob with the given confirmation signatures appended.
    pub fn sigs_with(&self, confirmations: &[RawSignature]) -> Vec<u8> {
        TxSignatures::new(self.input_sigs, confirmations.to_vec()).to_bytes()
    }
}

/// Child chain block built from signed transactions, in order.
#[derive(Clone, Debug)]
pub struct BlockFixture {
    txs: Vec<SignedTx>,
    tree: FixedMerkleTree,
}

impl BlockFixture {
    pub fn new(txs: Vec<SignedTx>) -> Self {
        let leaves: Vec<_> = txs.iter().map(SignedTx::leaf).collect();
        let tree = FixedMerkleTree::new(&leaves);
        Self { txs, tree }
    }

    pub fn root(&self) -> B256 {
        self.tree.root()
    }

    pub fn tx(&self, txindex: usize) -> &SignedTx {
        &self.txs[txindex]
    }

    pub fn proof(&self, txindex: usize) -> Vec<u8> {
        self.tree.proof(txindex).to_bytes()
    }

    /// Signature blob for the tx at `txindex`, each confirmer signing over
    /// this block's root.
    pub fn confirmed_sigs(&self, txindex: usize, confirmers: &[&TestAccount]) -> Vec<u8> {
        let stx = self.tx(txindex);
        let hash = stx.hash();
        let root = self.root();
        let confs: Vec<_> = confirmers.iter().map(|a| a.confirm(&hash, &root)).collect();
        stx.sigs_with(&confs)
    }
}
