//! Worker driving the DuoFern USB transceiver stick.

use std::io::{Read, Write};
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering::Relaxed;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;
use std::thread::{sleep, spawn, JoinHandle};
use std::time::{Duration, Instant};

use log::{debug, error, info, trace, warn};

pub use session::State;

use channels::Channels;
use queue::Queue;
use registrar::Registrar;
use session::Session;

use crate::config::Config;
use crate::device::DeviceCode;
use crate::error::Error;
use crate::event::Event;
use crate::frame::{Frame, FrameKind};
use crate::frame_buffer::FrameBuffer;
use crate::host::Host;
use crate::protocol::handshake;
use crate::request::Request;
use crate::{protocol, status};

mod channels;
mod queue;
mod registrar;
mod session;

/// Pacing interval of the worker while no session is running.
const IDLE_INTERVAL: Duration = Duration::from_millis(100);

/// DuoFern transceiver worker.
///
/// The worker owns the serial endpoint and is the single authority over
/// session state, the outbound queue and the pair list. It is supposed to
/// be run in a separate thread, see [`Transceiver::spawn`].
#[derive(Debug)]
pub struct Transceiver<T> {
    frame_buffer: FrameBuffer<T>,
    channels: Channels,
    session: Session,
    queue: Queue,
    registrar: Registrar,
    config: Config,
    shutdown: bool,
}

impl<T> Transceiver<T> {
    /// Create a new transceiver worker.
    #[must_use]
    pub fn new(
        endpoint: T,
        config: Config,
        requests: Receiver<Request>,
        events: Sender<Event>,
    ) -> Self {
        Self {
            frame_buffer: FrameBuffer::new(endpoint),
            channels: Channels::new(requests, events),
            session: Session::new(config.pairs.clone()),
            queue: Queue::default(),
            registrar: Registrar::default(),
            config,
            shutdown: false,
        }
    }
}

impl<T> Transceiver<T>
where
    T: Read + Write,
{
    /// Spawn a new transceiver worker.
    ///
    /// # Returns
    ///
    /// Returns a tuple of the host handle, the event receiver and the
    /// worker thread handle.
    pub fn spawn(
        endpoint: T,
        config: Config,
        running: Arc<AtomicBool>,
    ) -> (Host, Receiver<Event>, JoinHandle<T>)
    where
        T: Send + 'static,
    {
        let (request_tx, request_rx) = channel();
        let (event_tx, event_rx) = channel();
        let host = Host::new(request_tx, config.code, config.channel);
        let transceiver = Self::new(endpoint, config, request_rx, event_tx);
        (host, event_rx, spawn(move || transceiver.run(running)))
    }

    /// Run the transceiver worker.
    ///
    /// This should be called in a separate thread.
    ///
    /// # Returns
    ///
    /// Returns the inner serial endpoint after the worker has stopped running.
    #[allow(clippy::needless_pass_by_value)]
    pub fn run(mut self, running: Arc<AtomicBool>) -> T {
        info!("DuoFern transceiver starting.");
        self.channels.emit(Event::Opened);
        self.session.set_state(State::Opening);

        while running.load(Relaxed) && !self.shutdown {
            if let Err(error) = self.main() {
                self.handle_error(error);
            }
        }

        self.close();
        self.frame_buffer.into_inner()
    }

    /// One iteration of the worker loop.
    fn main(&mut self) -> Result<(), Error> {
        match self.session.state() {
            State::Closed | State::Opening => self.start(),
            State::Ready => self.communicate(),
            State::Handshaking | State::Reinitializing | State::Failed => self.idle(),
        }
    }

    /// Handle an error surfaced by the worker loop.
    fn handle_error(&mut self, error: Error) {
        if matches!(error, Error::ChannelDisconnected) {
            warn!("Host disconnected. Shutting down.");
            self.shutdown = true;
            return;
        }

        error!("{error}");
        self.session.set_state(State::Failed);
        self.channels.emit(Event::Error(error));
    }

    /// Start the session by running the initialization handshake.
    fn start(&mut self) -> Result<(), Error> {
        if let Err(error) = self.initialize() {
            self.session.set_state(State::Failed);
            return Err(error);
        }

        Ok(())
    }

    /// Steady-state operation: dispatch traffic and pump the queue.
    fn communicate(&mut self) -> Result<(), Error> {
        // The poll on the serial endpoint doubles as the loop's pacing delay.
        while let Some(frame) = self.receive()? {
            self.handle_frame(frame)?;
        }

        while let Some(request) = self.channels.receive()? {
            self.handle_request(request)?;
        }

        if let Some(frame) = self.queue.expire(Instant::now()) {
            warn!("{}", Error::QueueAckTimeout(frame));
        }

        if self.session.state() == State::Ready {
            if let Some(frame) = self
                .queue
                .next_to_send(Instant::now(), self.config.ack_timeout)
            {
                self.write_frame(&frame)?;
            }
        }

        self.try_register()
    }

    /// Wait for host requests while no session is running.
    fn idle(&mut self) -> Result<(), Error> {
        sleep(IDLE_INTERVAL);

        while let Some(request) = self.channels.receive()? {
            self.handle_request(request)?;
        }

        self.try_register()
    }

    /// Handle a request from the host.
    fn handle_request(&mut self, request: Request) -> Result<(), Error> {
        match request {
            Request::Submit(frame) => {
                debug!("Queueing frame: {frame}");
                self.queue.push(frame);
            }
            Request::Reopen(pairs) => self.reopen(pairs)?,
            Request::Close => self.shutdown = true,
        }

        Ok(())
    }

    /// Handle an inbound frame.
    fn handle_frame(&mut self, frame: Frame) -> Result<(), Error> {
        match frame.kind() {
            FrameKind::Ack => {
                if let Some(sent) = self.queue.confirm() {
                    debug!("Frame acknowledged: {sent}");
                }
            }
            FrameKind::Paired(device) => {
                info!("Transceiver paired device {device}.");
                self.channels.emit(Event::Paired(device));
            }
            FrameKind::Unpaired(device) => {
                info!("Transceiver unpaired device {device}.");
                self.channels.emit(Event::Unpaired(device));
            }
            FrameKind::Message => {
                // Every device message is acknowledged on the wire before
                // anything downstream sees it.
                self.write_frame(&Frame::ACK)?;
                self.channels.emit(Event::Message(frame));
                self.handle_message(frame);
            }
        }

        Ok(())
    }

    /// Decode a device message and track unknown senders.
    fn handle_message(&mut self, frame: Frame) {
        if !frame.is_status() {
            return;
        }

        let device = frame.device_code();
        self.channels.emit(Event::Status(device, status::parse(&frame)));

        if !device.is_broadcast() && !self.session.knows(device) {
            self.registrar
                .observe(device, Instant::now(), self.config.debounce);
        }
    }

    /// Run a due registration of pending devices, if any.
    fn try_register(&mut self) -> Result<(), Error> {
        let now = Instant::now();

        if !self.registrar.is_due(now) {
            return Ok(());
        }

        if matches!(
            self.session.state(),
            State::Opening | State::Handshaking | State::Reinitializing
        ) {
            self.registrar.defer(now, self.config.debounce);
            return Ok(());
        }

        let batch = self.registrar.pending().to_vec();

        if batch.is_empty() {
            self.registrar.succeed();
            return Ok(());
        }

        let mut pairs = self.session.pairs().to_vec();
        pairs.extend(batch.iter().copied());
        info!("Registering {} new device(s).", batch.len());

        match self.reopen(pairs) {
            Ok(()) => self.registrar.succeed(),
            Err(error) => {
                self.channels.emit(Event::Error(error));

                if let Some(dropped) = self.registrar.fail(Instant::now(), self.config.debounce) {
                    let exhausted = Error::RegistrationExhausted(dropped);
                    error!("{exhausted}");
                    self.channels.emit(Event::Error(exhausted));
                }
            }
        }

        Ok(())
    }

    /// Re-initialize the session with a new pair list.
    ///
    /// Queued frames are discarded rather than retried after the handshake:
    /// a command may already have reached its device, and sending it again
    /// could actuate the device twice.
    fn reopen(&mut self, pairs: Vec<DeviceCode>) -> Result<(), Error> {
        info!("Re-initializing session with {} device(s).", pairs.len());
        self.session.set_state(State::Reinitializing);
        self.discard_queue();
        self.frame_buffer.reset();
        let previous = self.session.replace_pairs(pairs);

        if let Err(error) = self.initialize() {
            self.session.replace_pairs(previous);
            self.session.set_state(State::Failed);
            return Err(Error::ReopenFailed(Box::new(error)));
        }

        Ok(())
    }

    /// Run the handshake and mark the session ready.
    fn initialize(&mut self) -> Result<(), Error> {
        self.session.set_state(State::Handshaking);
        self.handshake()?;
        self.session.set_state(State::Ready);
        info!(
            "Session initialized with {} paired device(s).",
            self.session.pairs().len()
        );
        self.channels.emit(Event::Initialized);
        Ok(())
    }

    /// The fixed initialization sequence.
    ///
    /// Strictly sequential: every step waits for one inbound frame before
    /// the next one is sent. The response content is not validated.
    fn handshake(&mut self) -> Result<(), Error> {
        debug!("Running initialization handshake.");
        self.step("init1", handshake::init1(), false)?;
        self.step("init2", handshake::init2(), false)?;
        self.step("setDongle", handshake::set_dongle(self.config.code), true)?;
        self.step("init3", handshake::init3(), true)?;

        for (counter, device) in self.session.pairs().to_vec().into_iter().enumerate() {
            let counter = u8::try_from(counter)
                .map_err(|_| Error::InvalidArgument("more than 255 paired devices".to_string()))?;
            self.step("setPairs", handshake::set_pairs(counter, device), true)?;
        }

        self.step("initEnd", handshake::init_end(), true)?;
        self.step("statusRequest", protocol::broadcast_status_request(), true)?;
        Ok(())
    }

    /// Send one handshake frame and await any inbound frame.
    fn step(&mut self, name: &'static str, frame: Frame, ack: bool) -> Result<(), Error> {
        trace!("Handshake step {name}: {frame}");
        self.write_frame(&frame)?;
        let deadline = Instant::now() + self.config.step_timeout;

        loop {
            if let Some(response) = self.receive()? {
                trace!("Handshake step {name} answered: {response}");

                if ack {
                    self.write_frame(&Frame::ACK)?;
                }

                return Ok(());
            }

            if Instant::now() >= deadline {
                return Err(Error::HandshakeStepTimeout(name));
            }
        }
    }

    /// Poll the serial endpoint for one inbound frame.
    fn receive(&mut self) -> Result<Option<Frame>, Error> {
        let Some(frame) = self.frame_buffer.poll_frame()? else {
            return Ok(None);
        };

        self.channels.emit(Event::FrameRx(frame));
        Ok(Some(frame))
    }

    /// Write one frame to the serial endpoint.
    fn write_frame(&mut self, frame: &Frame) -> Result<(), Error> {
        self.frame_buffer.write_frame(frame)?;
        self.channels.emit(Event::FrameTx(*frame));
        Ok(())
    }

    /// Tear the session down.
    fn close(&mut self) {
        self.discard_queue();
        self.registrar.cancel();
        self.session.set_state(State::Closed);
        self.channels.emit(Event::Closed);
        info!("DuoFern transceiver closed.");
    }

    /// Drop all queued frames.
    fn discard_queue(&mut self) {
        for frame in self.queue.drain() {
            warn!("Discarding queued frame: {frame}");
        }
    }
}
