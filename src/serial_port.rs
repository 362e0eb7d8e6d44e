//! Opening the serial endpoint of the DuoFern USB stick.

use std::borrow::Cow;
use std::time::Duration;

pub use serialport::{SerialPort, TTYPort};
use serialport::{DataBits, FlowControl, Parity, StopBits};

/// Serial speed of the DuoFern USB stick.
pub const BAUD_RATE: u32 = 115_200;

/// Read timeout of the port.
///
/// Doubles as the poll interval of the worker loop: an expired read is not
/// an error but an opportunity to look at timers and pending requests.
const READ_TIMEOUT: Duration = Duration::from_millis(100);

/// Opens the stick's serial endpoint at 115200 baud, 8-N-1.
///
/// # Errors
///
/// For errors please refer to [`SerialPortBuilder::open_native()`](serialport::SerialPortBuilder::open_native())
/// and [`serialport::new()`].
pub fn open<'a>(path: impl Into<Cow<'a, str>>) -> serialport::Result<TTYPort> {
    serialport::new(path, BAUD_RATE)
        .data_bits(DataBits::Eight)
        .parity(Parity::None)
        .stop_bits(StopBits::One)
        .flow_control(FlowControl::None)
        .timeout(READ_TIMEOUT)
        .open_native()
}
