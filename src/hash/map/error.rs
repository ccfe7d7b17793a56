use derive_more::{Display, Error};

/// The capacity required to hold the requested number of entries can't be represented or
/// allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
#[display("Capacity overflow while reserving space in HashMap!")]
pub struct CapacityOverflow;
