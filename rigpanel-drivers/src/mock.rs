//! Recording bus and delay for driver tests

use std::collections::BTreeMap;
use std::vec::Vec;

use embedded_hal::delay::DelayNs;
use rigpanel_hal::{DeviceAddress, I2cBus, I2cRead};

/// One completed bus transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transaction {
    Write { address: u8, data: Vec<u8> },
    Read { address: u8, register: u8, len: usize },
}

/// Error injected by [`MockBus`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockBusError;

/// Bus that records completed transactions and serves register reads
#[derive(Debug, Default)]
pub struct MockBus {
    /// Completed transactions, in order
    pub log: Vec<Transaction>,
    /// Bytes returned for reads, keyed by (address, register)
    pub registers: BTreeMap<(u8, u8), Vec<u8>>,
    /// Attempt index (0-based, counting failed attempts) that fails
    pub fail_on: Option<usize>,
    attempts: usize,
}

impl MockBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_register(mut self, address: u8, register: u8, bytes: &[u8]) -> Self {
        self.registers.insert((address, register), bytes.to_vec());
        self
    }

    pub fn writes(&self) -> Vec<Vec<u8>> {
        self.log
            .iter()
            .filter_map(|t| match t {
                Transaction::Write { data, .. } => Some(data.clone()),
                Transaction::Read { .. } => None,
            })
            .collect()
    }

    fn attempt(&mut self) -> Result<(), MockBusError> {
        let index = self.attempts;
        self.attempts += 1;
        if self.fail_on == Some(index) {
            Err(MockBusError)
        } else {
            Ok(())
        }
    }
}

impl I2cBus for MockBus {
    type Error = MockBusError;

    fn write(&mut self, address: DeviceAddress, data: &[u8]) -> Result<(), MockBusError> {
        self.attempt()?;
        self.log.push(Transaction::Write {
            address: address.get(),
            data: data.to_vec(),
        });
        Ok(())
    }
}

impl I2cRead for MockBus {
    fn read(
        &mut self,
        address: DeviceAddress,
        register: u8,
        buf: &mut [u8],
    ) -> Result<(), MockBusError> {
        self.attempt()?;
        let bytes = self
            .registers
            .get(&(address.get(), register))
            .ok_or(MockBusError)?;
        if bytes.len() < buf.len() {
            return Err(MockBusError);
        }
        buf.copy_from_slice(&bytes[..buf.len()]);
        self.log.push(Transaction::Read {
            address: address.get(),
            register,
            len: buf.len(),
        });
        Ok(())
    }
}

/// Delay that returns immediately and records what was asked for
#[derive(Debug, Default)]
pub struct MockDelay {
    pub calls_ns: Vec<u32>,
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.calls_ns.push(ns);
    }
}
