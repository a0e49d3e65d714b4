//! Utxo position helpers.

use plasma_primitives::UtxoPos;
use serde::Serialize;

use crate::args::PositionCmd;

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub(crate) struct PositionInfo {
    pub(crate) raw: u64,
    pub(crate) blknum: u64,
    pub(crate) txindex: u64,
    pub(crate) oindex: u8,
}

pub(crate) fn exec_position(cmd: &PositionCmd) -> anyhow::Result<PositionInfo> {
    let pos = match cmd {
        PositionCmd::Encode(args) => UtxoPos::new(args.blknum, args.txindex, args.oindex)?,
        PositionCmd::Decode(args) => UtxoPos::from_raw(args.raw),
    };

    let parts = pos.parts()?;
    Ok(PositionInfo {
        raw: pos.raw(),
        blknum: parts.blknum,
        txindex: parts.txindex,
        oindex: parts.oindex,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::{SubcDecode, SubcEncode};

    #[test]
    fn test_encode() {
        let info = exec_position(&PositionCmd::Encode(SubcEncode {
            blknum: 1000,
            txindex: 3,
            oindex: 1,
        }))
        .unwrap();
        assert_eq!(info.raw, 1_000_000_030_001);
    }

    #[test]
    fn test_decode() {
        let info = exec_position(&PositionCmd::Decode(SubcDecode { raw: 2_000_000_050_000 })).unwrap();
        assert_eq!(
            info,
            PositionInfo {
                raw: 2_000_000_050_000,
                blknum: 2000,
                txindex: 5,
                oindex: 0,
            }
        );
    }

    #[test]
    fn test_rejects_bad_output_index() {
        assert!(
            exec_position(&PositionCmd::Encode(SubcEncode {
                blknum: 1,
                txindex: 0,
                oindex: 2,
            }))
            .is_err()
        );
        assert!(exec_position(&PositionCmd::Decode(SubcDecode { raw: 1_000_000_002 })).is_err());
    }
}
