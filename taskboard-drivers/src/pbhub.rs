//! PbHub I2C port expander
//!
//! Six channels, each with two I/O pins. IO0 can also be sampled by the
//! hub's ADC. Every register is addressed as `channel base + operation`.
//!
//! Reads are a register-select write followed by a separate read; the hub
//! does not answer a repeated-start `write_read`.

use core::cell::RefCell;

use embedded_hal::i2c::{Error as _, ErrorKind, I2c};

/// Default 7-bit bus address
pub const DEFAULT_ADDRESS: u8 = 0x61;

/// Bus frequency the hub is rated for
pub const BUS_FREQUENCY_HZ: u32 = 400_000;

/// Hub shared between the sensors wired to it
pub type SharedPbHub<I2C> = RefCell<PbHub<I2C>>;

/// Operation offsets within a channel's register block
pub mod op {
    pub const WRITE_IO0: u8 = 0x00;
    pub const WRITE_IO1: u8 = 0x01;
    pub const PWM_IO0: u8 = 0x02;
    pub const PWM_IO1: u8 = 0x03;
    pub const READ_IO0: u8 = 0x04;
    pub const READ_IO1: u8 = 0x05;
    pub const ANALOG_READ_IO0: u8 = 0x06;
}

/// Hub channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Channel {
    Ch0,
    Ch1,
    Ch2,
    Ch3,
    Ch4,
    Ch5,
}

impl Channel {
    /// All channels in connector order
    pub const ALL: [Channel; 6] = [
        Channel::Ch0,
        Channel::Ch1,
        Channel::Ch2,
        Channel::Ch3,
        Channel::Ch4,
        Channel::Ch5,
    ];

    /// First register of this channel's block
    ///
    /// Channel 5 sits at 0xA0, not 0x90.
    pub const fn base(self) -> u8 {
        match self {
            Channel::Ch0 => 0x40,
            Channel::Ch1 => 0x50,
            Channel::Ch2 => 0x60,
            Channel::Ch3 => 0x70,
            Channel::Ch4 => 0x80,
            Channel::Ch5 => 0xA0,
        }
    }

    /// Channel by connector index
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }
}

/// Pin within a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Port {
    #[default]
    Io0,
    Io1,
}

impl Port {
    const fn read_op(self) -> u8 {
        match self {
            Port::Io0 => op::READ_IO0,
            Port::Io1 => op::READ_IO1,
        }
    }

    const fn write_op(self) -> u8 {
        match self {
            Port::Io0 => op::WRITE_IO0,
            Port::Io1 => op::WRITE_IO1,
        }
    }

    const fn pwm_op(self) -> u8 {
        match self {
            Port::Io0 => op::PWM_IO0,
            Port::Io1 => op::PWM_IO1,
        }
    }
}

/// Hub communication error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PbHubError {
    /// Bus transfer failed
    Bus(ErrorKind),
}

/// PbHub driver
pub struct PbHub<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> PbHub<I2C> {
    /// Driver at [`DEFAULT_ADDRESS`]
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DEFAULT_ADDRESS)
    }

    /// Driver at a custom address
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Bus address
    pub fn address(&self) -> u8 {
        self.address
    }

    /// Probe the hub by reading channel 0 IO0
    pub fn check_status(&mut self) -> Result<(), PbHubError> {
        self.read_digital(Channel::Ch0, Port::Io0).map(|_| ())
    }

    /// Read a digital input
    pub fn read_digital(&mut self, channel: Channel, port: Port) -> Result<bool, PbHubError> {
        let mut buf = [0u8; 1];
        self.read_register(channel.base() + port.read_op(), &mut buf)?;
        Ok(buf[0] != 0)
    }

    /// Read the ADC on a channel's IO0
    pub fn read_analog(&mut self, channel: Channel) -> Result<u16, PbHubError> {
        let mut buf = [0u8; 2];
        self.read_register(channel.base() + op::ANALOG_READ_IO0, &mut buf)?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Drive a digital output
    pub fn write_digital(
        &mut self,
        channel: Channel,
        port: Port,
        value: bool,
    ) -> Result<(), PbHubError> {
        self.write_register(channel.base() + port.write_op(), u8::from(value))
    }

    /// Set a PWM duty cycle (0-255)
    pub fn write_pwm(&mut self, channel: Channel, port: Port, duty: u8) -> Result<(), PbHubError> {
        self.write_register(channel.base() + port.pwm_op(), duty)
    }

    /// Release the bus
    pub fn release(self) -> I2C {
        self.i2c
    }

    fn read_register(&mut self, register: u8, buf: &mut [u8]) -> Result<(), PbHubError> {
        self.i2c
            .write(self.address, &[register])
            .map_err(|e| PbHubError::Bus(e.kind()))?;
        self.i2c
            .read(self.address, buf)
            .map_err(|e| PbHubError::Bus(e.kind()))
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), PbHubError> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(|e| PbHubError::Bus(e.kind()))
    }
}
