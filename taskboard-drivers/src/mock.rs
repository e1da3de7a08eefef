//! Host-side I2C bus double

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::vec::Vec;

use embedded_hal::i2c::{ErrorKind, ErrorType, I2c, NoAcknowledgeSource, Operation};

#[derive(Default)]
struct BusState {
    writes: Vec<(u8, Vec<u8>)>,
    reads: VecDeque<Vec<u8>>,
    failing: bool,
}

/// Bus that records writes and replays queued read data
///
/// Clones share state, so a test can keep a handle after moving the bus
/// into a driver.
#[derive(Clone, Default)]
pub struct MockI2c {
    state: Rc<RefCell<BusState>>,
}

impl MockI2c {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue bytes for the next read; missing bytes read as zero
    pub fn queue_read(&self, data: &[u8]) {
        self.state.borrow_mut().reads.push_back(data.to_vec());
    }

    /// Make every transfer fail with a NACK
    pub fn set_failing(&self, failing: bool) {
        self.state.borrow_mut().failing = failing;
    }

    pub fn writes(&self) -> Vec<(u8, Vec<u8>)> {
        self.state.borrow().writes.clone()
    }
}

impl ErrorType for MockI2c {
    type Error = ErrorKind;
}

impl I2c for MockI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        let mut state = self.state.borrow_mut();
        if state.failing {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }

        for operation in operations {
            match operation {
                Operation::Write(data) => state.writes.push((address, data.to_vec())),
                Operation::Read(buf) => {
                    let data = state.reads.pop_front().unwrap_or_default();
                    for (i, byte) in buf.iter_mut().enumerate() {
                        *byte = data.get(i).copied().unwrap_or(0);
                    }
                }
            }
        }
        Ok(())
    }
}
