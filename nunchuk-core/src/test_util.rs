//! Shared mocks for host tests.

extern crate std;

use crate::input::{Axis, InputDeviceInfo, Key};
use crate::sink::{EventSink, SinkError};
use crate::transport::Transport;
use core::future::Future;
use core::pin::Pin;
use core::task::{Context, Poll, RawWaker, RawWakerVTable, Waker};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::vec::Vec;

/// Everything a mock transport or delay observed, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BusEvent {
    Send(Vec<u8>),
    Receive(usize),
    /// Yielding delay, in ns.
    Sleep(u32),
    /// Blocking delay, in ns.
    BusyWait(u32),
}

pub type BusLog = Arc<Mutex<Vec<BusEvent>>>;

/// Scripted transport. Unscripted sends accept every byte; unscripted
/// receives fill the buffer with zeros.
pub struct MockTransport {
    log: BusLog,
    sends: VecDeque<Result<usize, i32>>,
    receives: VecDeque<Result<Vec<u8>, i32>>,
}

impl MockTransport {
    pub fn new() -> (Self, BusLog) {
        let log = BusLog::default();
        let transport = Self {
            log: log.clone(),
            sends: VecDeque::new(),
            receives: VecDeque::new(),
        };
        (transport, log)
    }

    pub fn push_send(&mut self, result: Result<usize, i32>) {
        self.sends.push_back(result);
    }

    pub fn push_receive(&mut self, result: Result<Vec<u8>, i32>) {
        self.receives.push_back(result);
    }
}

impl Transport for MockTransport {
    type Error = i32;

    fn send(&mut self, bytes: &[u8]) -> impl Future<Output = Result<usize, i32>> {
        self.log.lock().unwrap().push(BusEvent::Send(bytes.to_vec()));
        let result = self.sends.pop_front().unwrap_or(Ok(bytes.len()));
        core::future::ready(result)
    }

    fn receive(&mut self, buf: &mut [u8]) -> impl Future<Output = Result<usize, i32>> {
        self.log.lock().unwrap().push(BusEvent::Receive(buf.len()));
        let result = match self.receives.pop_front() {
            Some(Ok(data)) => {
                let n = data.len().min(buf.len());
                buf[..n].copy_from_slice(&data[..n]);
                Ok(data.len())
            }
            Some(Err(e)) => Err(e),
            None => {
                buf.fill(0);
                Ok(buf.len())
            }
        };
        core::future::ready(result)
    }
}

/// Delay that records instead of waiting.
pub struct MockDelay {
    log: BusLog,
}

impl MockDelay {
    pub fn new(log: &BusLog) -> Self {
        Self { log: log.clone() }
    }
}

impl embedded_hal_async::delay::DelayNs for MockDelay {
    async fn delay_ns(&mut self, ns: u32) {
        self.log.lock().unwrap().push(BusEvent::Sleep(ns));
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.log.lock().unwrap().push(BusEvent::BusyWait(ns));
    }
}

/// Everything a mock sink observed, in order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SinkEvent {
    Register(&'static str),
    Unregister,
    Key(Key, bool),
    Abs(Axis, i32),
    Sync,
}

pub type SinkLog = Arc<Mutex<Vec<SinkEvent>>>;

/// Recording sink.
pub struct MockSink {
    pub log: SinkLog,
    pub registered: bool,
    pub fail_register: bool,
    pub fail_sync: bool,
}

impl MockSink {
    pub fn new() -> Self {
        Self {
            log: SinkLog::default(),
            registered: false,
            fail_register: false,
            fail_sync: false,
        }
    }

    pub fn events(&self) -> Vec<SinkEvent> {
        self.log.lock().unwrap().clone()
    }
}

impl EventSink for MockSink {
    fn register(&mut self, info: &InputDeviceInfo) -> Result<(), SinkError> {
        if self.fail_register {
            return Err(SinkError::NotReady);
        }
        if self.registered {
            return Err(SinkError::AlreadyRegistered);
        }
        self.registered = true;
        self.log.lock().unwrap().push(SinkEvent::Register(info.name));
        Ok(())
    }

    fn unregister(&mut self) {
        self.registered = false;
        self.log.lock().unwrap().push(SinkEvent::Unregister);
    }

    fn report_key(&mut self, key: Key, pressed: bool) {
        self.log.lock().unwrap().push(SinkEvent::Key(key, pressed));
    }

    fn report_abs(&mut self, axis: Axis, value: i32) {
        self.log.lock().unwrap().push(SinkEvent::Abs(axis, value));
    }

    fn sync(&mut self) -> impl Future<Output = Result<(), SinkError>> {
        self.log.lock().unwrap().push(SinkEvent::Sync);
        let result = if self.fail_sync {
            Err(SinkError::Io)
        } else {
            Ok(())
        };
        core::future::ready(result)
    }
}

/// Run a future to completion (simple blocking executor).
pub fn block_on<F: Future>(mut f: F) -> F::Output {
    fn noop_raw_waker() -> RawWaker {
        fn noop(_: *const ()) {}
        fn clone(_: *const ()) -> RawWaker {
            noop_raw_waker()
        }
        static VTABLE: RawWakerVTable = RawWakerVTable::new(clone, noop, noop, noop);
        RawWaker::new(core::ptr::null(), &VTABLE)
    }

    let waker = unsafe { Waker::from_raw(noop_raw_waker()) };
    let mut cx = Context::from_waker(&waker);

    // SAFETY: We don't move f after pinning
    let mut f = unsafe { Pin::new_unchecked(&mut f) };

    loop {
        match f.as_mut().poll(&mut cx) {
            Poll::Ready(result) => return result,
            Poll::Pending => {
                panic!("Mock future returned Pending unexpectedly");
            }
        }
    }
}
