//! Core OLED driver for the SSD1331 (96×64, 65k colour) over SPI.
//!
//! [`OledDriver`] manages the panel lifecycle: construction without bus
//! traffic, explicit async initialisation, and full-frame flush of a
//! [`FrameBuffer`].

use display_interface::DisplayError;
use embedded_hal::digital::OutputPin;
use embedded_hal_async::{delay::DelayNs, spi::SpiDevice};

use crate::error::OledError;
use crate::framebuffer::{FrameBuffer, HEIGHT, WIDTH};

// SSD1331 command bytes. Parameters follow in command mode (D/C low).
const SET_COLUMN: u8 = 0x15;
const SET_ROW: u8 = 0x75;
const CONTRAST_A: u8 = 0x81;
const CONTRAST_B: u8 = 0x82;
const CONTRAST_C: u8 = 0x83;
const MASTER_CURRENT: u8 = 0x87;
const PRECHARGE_A: u8 = 0x8A;
const PRECHARGE_B: u8 = 0x8B;
const PRECHARGE_C: u8 = 0x8C;
const SET_REMAP: u8 = 0xA0;
const START_LINE: u8 = 0xA1;
const DISPLAY_OFFSET: u8 = 0xA2;
const NORMAL_DISPLAY: u8 = 0xA4;
const SET_MULTIPLEX: u8 = 0xA8;
const SET_MASTER: u8 = 0xAD;
const DISPLAY_OFF: u8 = 0xAE;
const DISPLAY_ON: u8 = 0xAF;
const POWER_MODE: u8 = 0xB0;
const PRECHARGE: u8 = 0xB1;
const CLOCK_DIV: u8 = 0xB3;
const PRECHARGE_LEVEL: u8 = 0xBB;
const VCOMH: u8 = 0xBE;

/// Panel orientation, applied through the SSD1331 remap register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelOrientation {
    /// Connector at the top.
    #[default]
    Normal,
    /// Rotated by 180°.
    UpsideDown,
}

impl PanelOrientation {
    /// Remap byte: 65k colour, COM split, RGB order plus scan direction.
    fn remap(self) -> u8 {
        match self {
            PanelOrientation::Normal => 0x72,
            PanelOrientation::UpsideDown => 0x60,
        }
    }
}

/// Async driver for an SSD1331 96×64 colour OLED over SPI.
///
/// Drawing happens in a [`FrameBuffer`]; the driver only owns the bus and
/// pushes finished frames to the panel.
///
/// # Lifecycle
///
/// 1. [`OledDriver::new()`] — constructs the driver without any SPI traffic.
/// 2. [`OledDriver::init()`] — pulses reset and sends the SSD1331
///    initialisation sequence.
/// 3. Draw into a [`FrameBuffer`] (usually through a
///    [`StatusDisplay`](crate::StatusDisplay)).
/// 4. [`OledDriver::flush()`] — transfers the frame to the panel.
///
/// # Example
///
/// ```no_run
/// use status_oled_display_rs::{FrameBuffer, OledDriver, PanelOrientation};
///
/// # async fn example(
/// #     spi: impl embedded_hal_async::spi::SpiDevice,
/// #     dc: impl embedded_hal::digital::OutputPin,
/// #     mut rst: impl embedded_hal::digital::OutputPin,
/// #     mut delay: impl embedded_hal_async::delay::DelayNs,
/// # ) {
/// let mut oled = OledDriver::new(spi, dc, PanelOrientation::Normal);
/// oled.init(&mut rst, &mut delay).await.unwrap();
/// let frame = FrameBuffer::new();
/// oled.flush(&frame).await.unwrap();
/// # }
/// ```
pub struct OledDriver<SPI, DC> {
    spi: SPI,
    /// Data/command select: low for commands, high for pixel data.
    dc: DC,
    orientation: PanelOrientation,
    /// Set to `true` after a successful `init()` call.
    initialized: bool,
}

impl<SPI, DC> OledDriver<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    /// Construct an uninitialised driver.
    ///
    /// No SPI traffic is generated. You **must** call [`init()`](Self::init)
    /// before flushing.
    ///
    /// # Arguments
    /// * `spi` — SPI device (chip select handled by the device).
    /// * `dc` — data/command output pin.
    /// * `orientation` — panel mounting.
    pub fn new(spi: SPI, dc: DC, orientation: PanelOrientation) -> Self {
        Self {
            spi,
            dc,
            orientation,
            initialized: false,
        }
    }

    /// Reset and initialise the SSD1331 hardware.
    ///
    /// Drives `rst` through a reset pulse, then sends the command sequence
    /// that selects 65k colour mode and switches the panel on.
    ///
    /// # Errors
    ///
    /// Returns [`OledError::Pin`] if the reset pin cannot be driven, or
    /// [`OledError::InitializationFailed`] if the command sequence fails.
    pub async fn init<RST, DELAY>(&mut self, rst: &mut RST, delay: &mut DELAY) -> Result<(), OledError>
    where
        RST: OutputPin,
        DELAY: DelayNs,
    {
        self.initialized = false;

        rst.set_high().map_err(|_| OledError::Pin)?;
        delay.delay_ms(1).await;
        rst.set_low().map_err(|_| OledError::Pin)?;
        delay.delay_ms(10).await;
        rst.set_high().map_err(|_| OledError::Pin)?;
        delay.delay_ms(10).await;

        let sequence = [
            DISPLAY_OFF,
            SET_REMAP,
            self.orientation.remap(),
            START_LINE,
            0x00,
            DISPLAY_OFFSET,
            0x00,
            NORMAL_DISPLAY,
            SET_MULTIPLEX,
            (HEIGHT - 1) as u8,
            SET_MASTER,
            0x8E,
            POWER_MODE,
            0x0B,
            PRECHARGE,
            0x31,
            CLOCK_DIV,
            0xF0,
            PRECHARGE_A,
            0x64,
            PRECHARGE_B,
            0x78,
            PRECHARGE_C,
            0x64,
            PRECHARGE_LEVEL,
            0x3A,
            VCOMH,
            0x3E,
            MASTER_CURRENT,
            0x06,
            CONTRAST_A,
            0x91,
            CONTRAST_B,
            0x50,
            CONTRAST_C,
            0x7D,
            DISPLAY_ON,
        ];
        self.command(&sequence)
            .await
            .map_err(|_| OledError::InitializationFailed)?;

        self.initialized = true;
        Ok(())
    }

    /// Transfer a full frame to the panel.
    ///
    /// At 8 MHz SPI this takes roughly 12 ms for the 12 KiB frame.
    ///
    /// # Errors
    ///
    /// Returns [`OledError::NotInitialized`] if [`init()`](Self::init) has
    /// not succeeded, or [`OledError::Display`] on a bus-level failure.
    pub async fn flush(&mut self, frame: &FrameBuffer) -> Result<(), OledError> {
        if !self.initialized {
            return Err(OledError::NotInitialized);
        }
        let window = [
            SET_COLUMN,
            0,
            (WIDTH - 1) as u8,
            SET_ROW,
            0,
            (HEIGHT - 1) as u8,
        ];
        self.command(&window).await?;
        self.data(frame.as_bytes()).await
    }

    /// Switch the panel output on or off without touching display RAM.
    ///
    /// # Errors
    ///
    /// Returns [`OledError::NotInitialized`] before [`init()`](Self::init),
    /// or [`OledError::Display`] on a bus-level failure.
    pub async fn set_display_on(&mut self, on: bool) -> Result<(), OledError> {
        if !self.initialized {
            return Err(OledError::NotInitialized);
        }
        self.command(&[if on { DISPLAY_ON } else { DISPLAY_OFF }]).await
    }

    /// Check whether the panel has been successfully initialised.
    ///
    /// No SPI traffic is generated.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Release the bus and pin.
    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }

    async fn command(&mut self, bytes: &[u8]) -> Result<(), OledError> {
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;
        self.spi
            .write(bytes)
            .await
            .map_err(|_| DisplayError::BusWriteError)?;
        Ok(())
    }

    async fn data(&mut self, bytes: &[u8]) -> Result<(), OledError> {
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;
        self.spi
            .write(bytes)
            .await
            .map_err(|_| DisplayError::BusWriteError)?;
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use core::cell::RefCell;
    use core::convert::Infallible;

    use embassy_futures::block_on;
    use embedded_hal::digital::ErrorType as PinErrorType;
    use embedded_hal_async::spi::{ErrorKind, ErrorType, Operation};
    use heapless::Vec;

    use super::*;

    /// Bus traffic seen by the mocks.
    #[derive(Default)]
    struct Bus {
        dc_high: bool,
        commands: Vec<u8, 128>,
        data_bytes: usize,
        fail_writes: bool,
    }

    struct MockSpi<'a>(&'a RefCell<Bus>);
    struct MockDc<'a>(&'a RefCell<Bus>);

    #[derive(Default)]
    struct MockRst {
        levels: Vec<bool, 8>,
    }

    struct NoDelay;

    impl ErrorType for MockSpi<'_> {
        type Error = ErrorKind;
    }

    impl SpiDevice for MockSpi<'_> {
        async fn transaction(&mut self, operations: &mut [Operation<'_, u8>]) -> Result<(), ErrorKind> {
            let mut bus = self.0.borrow_mut();
            if bus.fail_writes {
                return Err(ErrorKind::Other);
            }
            for op in operations {
                if let Operation::Write(bytes) = op {
                    if bus.dc_high {
                        bus.data_bytes += bytes.len();
                    } else {
                        bus.commands.extend_from_slice(*bytes).unwrap();
                    }
                }
            }
            Ok(())
        }
    }

    impl PinErrorType for MockDc<'_> {
        type Error = Infallible;
    }

    impl OutputPin for MockDc<'_> {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().dc_high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.0.borrow_mut().dc_high = true;
            Ok(())
        }
    }

    impl PinErrorType for MockRst {
        type Error = Infallible;
    }

    impl OutputPin for MockRst {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.levels.push(false).unwrap();
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.levels.push(true).unwrap();
            Ok(())
        }
    }

    impl DelayNs for NoDelay {
        async fn delay_ns(&mut self, _ns: u32) {}
    }

    #[test]
    fn new_driver_sends_nothing() {
        let bus = RefCell::new(Bus::default());
        let oled = OledDriver::new(MockSpi(&bus), MockDc(&bus), PanelOrientation::Normal);
        assert!(!oled.is_initialized());
        assert!(bus.borrow().commands.is_empty());
    }

    #[test]
    fn init_pulses_reset_and_sends_sequence() {
        let bus = RefCell::new(Bus::default());
        let mut oled = OledDriver::new(MockSpi(&bus), MockDc(&bus), PanelOrientation::Normal);
        let mut rst = MockRst::default();

        block_on(oled.init(&mut rst, &mut NoDelay)).unwrap();

        assert!(oled.is_initialized());
        assert_eq!(rst.levels.as_slice(), &[true, false, true]);
        let bus = bus.borrow();
        assert_eq!(&bus.commands[..3], &[DISPLAY_OFF, SET_REMAP, 0x72]);
        assert_eq!(bus.commands.last(), Some(&DISPLAY_ON));
        assert_eq!(bus.data_bytes, 0);
    }

    #[test]
    fn upside_down_uses_flipped_remap() {
        let bus = RefCell::new(Bus::default());
        let mut oled = OledDriver::new(MockSpi(&bus), MockDc(&bus), PanelOrientation::UpsideDown);
        block_on(oled.init(&mut MockRst::default(), &mut NoDelay)).unwrap();
        assert_eq!(bus.borrow().commands[2], 0x60);
    }

    #[test]
    fn init_failure_is_reported() {
        let bus = RefCell::new(Bus {
            fail_writes: true,
            ..Bus::default()
        });
        let mut oled = OledDriver::new(MockSpi(&bus), MockDc(&bus), PanelOrientation::Normal);
        let result = block_on(oled.init(&mut MockRst::default(), &mut NoDelay));
        assert!(matches!(result, Err(OledError::InitializationFailed)));
        assert!(!oled.is_initialized());
    }

    #[test]
    fn flush_before_init_is_rejected() {
        let bus = RefCell::new(Bus::default());
        let mut oled = OledDriver::new(MockSpi(&bus), MockDc(&bus), PanelOrientation::Normal);
        let frame = FrameBuffer::new();
        assert!(matches!(
            block_on(oled.flush(&frame)),
            Err(OledError::NotInitialized)
        ));
        assert!(bus.borrow().commands.is_empty());
    }

    #[test]
    fn flush_sets_window_then_streams_frame() {
        let bus = RefCell::new(Bus::default());
        let mut oled = OledDriver::new(MockSpi(&bus), MockDc(&bus), PanelOrientation::Normal);
        block_on(oled.init(&mut MockRst::default(), &mut NoDelay)).unwrap();
        bus.borrow_mut().commands.clear();

        let frame = FrameBuffer::new();
        block_on(oled.flush(&frame)).unwrap();

        let bus = bus.borrow();
        assert_eq!(bus.commands.as_slice(), &[SET_COLUMN, 0, 95, SET_ROW, 0, 63]);
        assert_eq!(bus.data_bytes, 96 * 64 * 2);
    }

    #[test]
    fn flush_bus_error_is_wrapped() {
        let bus = RefCell::new(Bus::default());
        let mut oled = OledDriver::new(MockSpi(&bus), MockDc(&bus), PanelOrientation::Normal);
        block_on(oled.init(&mut MockRst::default(), &mut NoDelay)).unwrap();
        bus.borrow_mut().fail_writes = true;

        let result = block_on(oled.flush(&FrameBuffer::new()));
        assert!(matches!(
            result,
            Err(OledError::Display(DisplayError::BusWriteError))
        ));
    }

    #[test]
    fn display_on_off_commands() {
        let bus = RefCell::new(Bus::default());
        let mut oled = OledDriver::new(MockSpi(&bus), MockDc(&bus), PanelOrientation::Normal);
        block_on(oled.init(&mut MockRst::default(), &mut NoDelay)).unwrap();
        bus.borrow_mut().commands.clear();

        block_on(oled.set_display_on(false)).unwrap();
        block_on(oled.set_display_on(true)).unwrap();
        assert_eq!(bus.borrow().commands.as_slice(), &[DISPLAY_OFF, DISPLAY_ON]);
    }
}
