use crate::Result;
use bit_transport::BitTransport;
use shock_protocol::Message;

/// A transport as held by an encoder once bound.
pub type BoxedTransport = Box<dyn BitTransport + Send>;

/// High-level driver that sends finalized protocol messages.
///
/// `output` blocks for the whole transmission. Encoders do no locking of their own; callers
/// sending from several threads must serialize access to one encoder.
pub trait MessageEncoder {
    fn output(&mut self, message: &Message) -> Result<()>;

    /// Binding capability. Encoders that need a transport return `Some(self)`; the default
    /// is a standalone encoder that cannot be bound.
    fn as_bindable(&mut self) -> Option<&mut dyn Bindable> {
        None
    }
}

/// An encoder that emits through a separately constructed [`BitTransport`].
pub trait Bindable {
    fn bind(&mut self, transport: BoxedTransport) -> Result<()>;
}

impl<T: MessageEncoder + ?Sized> MessageEncoder for Box<T> {
    fn output(&mut self, message: &Message) -> Result<()> {
        (**self).output(message)
    }

    fn as_bindable(&mut self) -> Option<&mut dyn Bindable> {
        (**self).as_bindable()
    }
}
