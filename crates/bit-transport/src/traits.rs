use crate::Result;
use std::time::Duration;

/// A blocking, synchronous sink for timed binary levels.
///
/// Implementations must:
/// - emit `levels` strictly in order, never reordering or dropping one;
/// - hold each level for at least `interval` before moving on;
/// - hold for at least one more `interval` after the last level before returning,
///   so consecutive transmissions do not run into each other.
///
/// The call occupies the calling thread for the whole transmission and cannot be cancelled.
/// [`crate::pace`] implements this discipline for backends that can set a single level.
pub trait BitTransport {
    fn output(&mut self, levels: &[bool], interval: Duration) -> Result<()>;
}

impl<T: BitTransport + ?Sized> BitTransport for Box<T> {
    fn output(&mut self, levels: &[bool], interval: Duration) -> Result<()> {
        (**self).output(levels, interval)
    }
}
