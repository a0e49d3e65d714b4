//! Command line arguments for the `plasma-sim` binary.

use std::path::PathBuf;

use argh::FromArgs;

/// Replays root chain scenarios and inspects utxo positions.
#[derive(FromArgs, Debug)]
pub(crate) struct Args {
    #[argh(option, short = 'c', description = "path to configuration")]
    pub(crate) config: Option<PathBuf>,

    #[argh(subcommand)]
    pub(crate) subc: Subcommand,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
pub(crate) enum Subcommand {
    Replay(SubcReplay),
    Position(SubcPosition),
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "replay",
    description = "runs a scenario file against a fresh root chain"
)]
pub(crate) struct SubcReplay {
    #[argh(positional, description = "scenario JSON file")]
    pub(crate) path: PathBuf,

    #[argh(switch, description = "stop at the first rejected step")]
    pub(crate) strict: bool,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(
    subcommand,
    name = "position",
    description = "packs or unpacks a utxo position"
)]
pub(crate) struct SubcPosition {
    #[argh(subcommand)]
    pub(crate) cmd: PositionCmd,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand)]
pub(crate) enum PositionCmd {
    Encode(SubcEncode),
    Decode(SubcDecode),
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "encode", description = "packs block, tx index and output index")]
pub(crate) struct SubcEncode {
    #[argh(positional, description = "block number")]
    pub(crate) blknum: u64,

    #[argh(positional, description = "transaction index")]
    pub(crate) txindex: u64,

    #[argh(positional, description = "output index")]
    pub(crate) oindex: u8,
}

#[derive(FromArgs, PartialEq, Debug)]
#[argh(subcommand, name = "decode", description = "unpacks a raw position")]
pub(crate) struct SubcDecode {
    #[argh(positional, description = "raw position")]
    pub(crate) raw: u64,
}
