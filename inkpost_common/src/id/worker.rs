use std::time::Duration;
use time::OffsetDateTime;

use crate::id::{Id, IdParts};

/// Mints ids for one node of a deployment.
///
/// Nodes are told apart by their worker number, and ids from a single
/// generator are strictly increasing within a millisecond by sequence.
#[derive(Debug, Clone, Copy)]
pub struct WorkerIdGenerator {
    worker: u16,
    sequence: u16,
}

/// Pause after the sequence wraps so the next ids land in a later millisecond.
const WRAP_PAUSE: Duration = Duration::from_secs(1);

impl WorkerIdGenerator {
    #[must_use]
    pub const fn new(worker: u16) -> Self {
        Self {
            worker,
            sequence: 0,
        }
    }

    #[must_use]
    pub const fn worker(&self) -> u16 {
        self.worker
    }

    /// Mints the next id and reports whether the sequence wrapped.
    fn mint(&mut self) -> (Id, bool) {
        let id = Id::pack(IdParts {
            minted_at: OffsetDateTime::now_utc(),
            worker: self.worker,
            sequence: self.sequence,
        });
        self.sequence = self.sequence.wrapping_add(1);
        (id, self.sequence == 0)
    }

    /// Mints a new id, blocking the thread when the sequence wraps.
    ///
    /// # Examples
    ///
    /// ```
    /// use inkpost_common::id::worker::WorkerIdGenerator;
    ///
    /// let mut g = WorkerIdGenerator::new(1);
    /// assert_ne!(g.generate(), g.generate());
    /// ```
    pub fn generate(&mut self) -> Id {
        let (id, wrapped) = self.mint();
        if wrapped {
            std::thread::sleep(WRAP_PAUSE);
        }
        id
    }

    /// Mints a new id, yielding to the runtime when the sequence wraps.
    #[cfg(feature = "tokio")]
    pub async fn generate_async(&mut self) -> Id {
        let (id, wrapped) = self.mint();
        if wrapped {
            tokio::time::sleep(WRAP_PAUSE).await;
        }
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let mut g = WorkerIdGenerator::new(42);
        let first = g.generate().parts();
        let second = g.generate().parts();
        assert_eq!((first.worker, second.worker), (42, 42));
        assert_eq!(second.sequence, first.sequence + 1);
    }

    #[test]
    fn wraps_sequence() {
        let mut g = WorkerIdGenerator {
            worker: 1,
            sequence: u16::MAX - 1,
        };
        assert_eq!(g.mint().0.parts().sequence, u16::MAX - 1);
        let (id, wrapped) = g.mint();
        assert_eq!(id.parts().sequence, u16::MAX);
        assert!(wrapped);
        assert_eq!(g.sequence, 0);
    }

    #[cfg(feature = "tokio")]
    #[tokio::test]
    async fn generate_async() {
        let mut g = WorkerIdGenerator::new(1);
        let mut previous = g.generate_async().await;
        for _ in 0..10 {
            let id = g.generate_async().await;
            assert!(previous < id);
            previous = id;
        }
    }
}
