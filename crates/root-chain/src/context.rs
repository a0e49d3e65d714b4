use plasma_primitives::{Address, Timestamp};

/// Who is calling and when.  Supplied by the environment with every
/// operation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct CallContext {
    caller: Address,
    now: Timestamp,
}

impl CallContext {
    pub const fn new(caller: Address, now: Timestamp) -> Self {
        Self { caller, now }
    }

    pub const fn caller(&self) -> Address {
        self.caller
    }

    pub const fn now(&self) -> Timestamp {
        self.now
    }
}
