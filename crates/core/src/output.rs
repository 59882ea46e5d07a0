use std::cell::RefCell;
use std::fmt;
use std::io::{self, Write};
use std::rc::Rc;

/// Shared text sink for command output.
///
/// Each write borrows the sink only for its own duration, so a command that
/// runs another command through the dispatcher can keep printing around the
/// nested call.
#[derive(Clone)]
pub struct Output {
	sink: Rc<RefCell<dyn Write>>,
}

impl Output {
	pub fn new<W: Write + 'static>(writer: W) -> Self {
		Self {
			sink: Rc::new(RefCell::new(writer)),
		}
	}

	pub fn stdout() -> Self {
		Self::new(io::stdout())
	}

	/// An output that records everything written to it.
	pub fn capture() -> (Self, Capture) {
		let capture = Capture::default();
		(Self::new(capture.clone()), capture)
	}

	/// Target of `write!`/`writeln!`.
	pub fn write_fmt(&self, args: fmt::Arguments<'_>) -> io::Result<()> {
		self.sink.borrow_mut().write_fmt(args)
	}

	pub fn flush(&self) -> io::Result<()> {
		self.sink.borrow_mut().flush()
	}
}

impl fmt::Debug for Output {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Output").finish_non_exhaustive()
	}
}

/// In-memory buffer behind [`Output::capture`].
#[derive(Clone, Default, Debug)]
pub struct Capture(Rc<RefCell<Vec<u8>>>);

impl Capture {
	pub fn contents(&self) -> String {
		String::from_utf8_lossy(&self.0.borrow()).into_owned()
	}

	/// Returns the contents and clears the buffer.
	pub fn take(&self) -> String {
		let bytes = std::mem::take(&mut *self.0.borrow_mut());
		String::from_utf8_lossy(&bytes).into_owned()
	}
}

impl Write for Capture {
	fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
		self.0.borrow_mut().extend_from_slice(buf);
		Ok(buf.len())
	}

	fn flush(&mut self) -> io::Result<()> {
		Ok(())
	}
}
