//! Line-oriented terminal shared by the prompt and the manual wait.

use std::cell::RefCell;
use std::io::BufRead;
use std::io::Write;
use std::rc::Rc;

/// Input and output of an interactive session.
///
/// The member prompt and the manual wait read from the same input; sharing
/// one buffered reader keeps piped input from being split between two
/// buffers.
#[derive(Debug)]
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

/// A [`Terminal`] shared between several consumers on one thread.
pub type SharedTerminal<R, W> = Rc<RefCell<Terminal<R, W>>>;

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Wraps an input/output pair.
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Wraps the terminal for sharing.
    #[must_use]
    pub fn shared(self) -> SharedTerminal<R, W> {
        Rc::new(RefCell::new(self))
    }

    /// Borrows input and output at once.
    pub fn split(&mut self) -> (&mut R, &mut W) {
        (&mut self.input, &mut self.output)
    }

    /// Returns the output sink.
    pub const fn output(&self) -> &W {
        &self.output
    }
}
