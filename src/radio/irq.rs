//! Interrupt line abstraction for host-attached transports.

use embedded_hal::digital::InputPin;

use crate::types::Edge;

/// An input line that can report edge transitions through a callback.
///
/// [`embedded_hal`] models digital inputs as polled values, but a host-side
/// transport (a USB bridge, a GPIO character device, a networked adapter)
/// usually delivers edges asynchronously. This trait adds that capability on
/// top of [`InputPin`] so the radio's active-low IRQ line can drive the
/// driver instead of being polled.
///
/// Contract for implementors:
/// - The handler is invoked from the transport's notification context (a
///   background thread or event loop), never re-entrantly.
/// - [`IrqPin::attach()`] replaces any previously registered handler.
/// - Edges that occur while no handler is attached are not buffered.
/// - Dropping the pin releases the registration with the transport.
pub trait IrqPin: InputPin {
    /// Register `handler` to be invoked on every `edge` transition of this line.
    fn attach(
        &mut self,
        edge: Edge,
        handler: Box<dyn FnMut() + Send>,
    ) -> Result<(), Self::Error>;

    /// Remove the registered handler, if any.
    fn detach(&mut self) -> Result<(), Self::Error>;
}
