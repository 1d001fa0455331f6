//! Live serial line source
//!
//! Opens the serial connection to the sensor bridge and performs the
//! startup handshake before streaming lines: flush the output buffer, send
//! the reset command byte (`&`) to clear device state, wait for the bridge
//! firmware to come back up, then send the start command byte (`!`) to
//! request framed JSON output, and finally clear both buffers so the stream
//! begins on a frame boundary.
//!
//! A read that times out (or returns no data) is a transient condition on a
//! live link, not end-of-input; it surfaces as an error so the pipeline can
//! log it and retry the iteration.

use crate::config::SerialConfig;
use crate::error::Result;
use crate::source::LineSource;
use serialport::{ClearBuffer, SerialPort};
use std::io::{BufRead, BufReader, ErrorKind};
use std::time::Duration;

/// Command byte requesting the bridge start streaming framed JSON lines
pub const START_CMD: u8 = b'!';

/// Command byte resetting the bridge state machine
pub const RESET_CMD: u8 = b'&';

/// How often the reset command is repeated during the handshake
const RESET_REPEATS: usize = 1;

/// How long the bridge firmware takes to come back up after a reset
const DEVICE_STARTUP_TIME: Duration = Duration::from_secs(3);

/// Line source backed by a live serial connection to the sensor bridge
pub struct SerialSource {
    reader: BufReader<Box<dyn SerialPort>>,
}

impl SerialSource {
    /// Open the serial port and run the reset/start handshake
    pub fn open(config: &SerialConfig) -> Result<Self> {
        tracing::info!(
            port = %config.port,
            baud = config.baud_rate,
            timeout_secs = config.timeout_secs,
            "opening serial port to sensor bridge"
        );
        let mut port = serialport::new(&config.port, config.baud_rate)
            .timeout(Duration::from_secs(config.timeout_secs))
            .open()?;

        // Make sure we only send what we intend to
        port.clear(ClearBuffer::Output)?;
        tracing::info!(cmd = RESET_CMD, "sending reset byte to clear device state");
        send_cmd(&mut *port, RESET_CMD, RESET_REPEATS)?;
        tracing::info!("waiting for device to start up");
        std::thread::sleep(DEVICE_STARTUP_TIME);
        tracing::info!(cmd = START_CMD, "sending start byte to initiate communication");
        send_cmd(&mut *port, START_CMD, 1)?;
        port.clear(ClearBuffer::All)?;

        Ok(Self {
            reader: BufReader::new(port),
        })
    }
}

impl LineSource for SerialSource {
    fn next_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            // A live link never terminates cleanly; zero bytes means the
            // read window elapsed with nothing buffered
            Ok(0) => Err(std::io::Error::new(
                ErrorKind::TimedOut,
                "no data from sensor bridge within the read timeout",
            )
            .into()),
            Ok(_) => Ok(Some(line)),
            // A timeout mid-line hands the torn fragment to the frame
            // validator, which rejects and logs it
            Err(err) if err.kind() == ErrorKind::TimedOut && !line.is_empty() => Ok(Some(line)),
            Err(err) => Err(err.into()),
        }
    }
}

/// Send a one-byte command `n` times over the serial connection
fn send_cmd(port: &mut dyn SerialPort, cmd: u8, n: usize) -> Result<()> {
    for _ in 0..n {
        port.write_all(&[cmd])?;
    }
    port.flush()?;
    Ok(())
}
