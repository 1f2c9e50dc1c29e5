//! Open/close state for dialogs and similar overlays
//!
//! A [`Disclosure`] tracks whether something is open and an optional payload
//! handed to it when it was opened (the row a confirm dialog is about, for
//! example). It can also follow a flag owned by someone else via
//! [`Disclosure::sync`].

use std::fmt;

type Callback = Box<dyn FnMut() + Send>;

/// Open/closed state with an optional payload.
pub struct Disclosure<P> {
    is_open: bool,
    variable: Option<P>,
    controlled: Option<bool>,
    on_open: Option<Callback>,
    on_close: Option<Callback>,
}

impl<P> Default for Disclosure<P> {
    fn default() -> Self {
        Self::new(false)
    }
}

impl<P: fmt::Debug> fmt::Debug for Disclosure<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disclosure")
            .field("is_open", &self.is_open)
            .field("variable", &self.variable)
            .field("controlled", &self.controlled)
            .finish_non_exhaustive()
    }
}

impl<P> Disclosure<P> {
    pub fn new(initially_open: bool) -> Self {
        Self {
            is_open: initially_open,
            variable: None,
            controlled: None,
            on_open: None,
            on_close: None,
        }
    }

    /// Runs `callback` every time the disclosure opens.
    pub fn on_open(mut self, callback: impl FnMut() + Send + 'static) -> Self {
        self.on_open = Some(Box::new(callback));
        self
    }

    /// Runs `callback` every time the disclosure closes.
    pub fn on_close(mut self, callback: impl FnMut() + Send + 'static) -> Self {
        self.on_close = Some(Box::new(callback));
        self
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Payload of the most recent `open` that carried one.
    pub fn variable(&self) -> Option<&P> {
        self.variable.as_ref()
    }

    /// Opens, replacing the payload if one is given.
    pub fn open(&mut self, payload: Option<P>) {
        self.is_open = true;
        if let Some(payload) = payload {
            self.variable = Some(payload);
        }
        if let Some(callback) = self.on_open.as_mut() {
            callback();
        }
    }

    /// Closes and drops the payload.
    pub fn close(&mut self) {
        self.is_open = false;
        self.variable = None;
        if let Some(callback) = self.on_close.as_mut() {
            callback();
        }
    }

    pub fn toggle(&mut self) {
        if self.is_open {
            self.close();
        } else {
            self.open(None);
        }
    }

    /// Follows an externally owned flag.
    ///
    /// Only a change of `flag` since the previous call has an effect, so a
    /// caller can pass its flag on every update without undoing what the
    /// user did in between. Callbacks do not fire for synced transitions.
    pub fn sync(&mut self, flag: bool) {
        if self.controlled == Some(flag) {
            return;
        }
        self.controlled = Some(flag);
        self.is_open = flag;
        if !flag {
            self.variable = None;
        }
    }
}
