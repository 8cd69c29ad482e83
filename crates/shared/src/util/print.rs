use std::io::{Stdout, Write};

/// String used program-wide for most indentation
pub const INDENT_STR: &str = "    ";

/// Used to print text that is replaced
#[derive(Debug)]
pub struct ReplPrinter {
	stdout: Stdout,
	chars_written: usize,
	finished: bool,
	indent_str: String,
}

impl ReplPrinter {
	/// Make a new ReplPrinter writing to stdout
	pub fn new() -> Self {
		Self {
			stdout: std::io::stdout(),
			chars_written: 0,
			finished: false,
			indent_str: String::new(),
		}
	}

	/// Set the indent level of the printer
	pub fn indent(&mut self, indent: usize) {
		self.indent_str = INDENT_STR.repeat(indent);
	}

	/// Print text to the output, replacing the current line
	pub fn print(&mut self, text: &str) {
		let _ = write!(self.stdout, "\r{}{text}", self.indent_str);

		let written = get_terminal_width(text) + self.indent_str.chars().count();

		// Clear leftover characters from the last print
		let clear_count = self.chars_written.saturating_sub(written);
		let _ = write!(self.stdout, "{}", " ".repeat(clear_count));

		self.chars_written = written;
		let _ = self.stdout.flush();
	}

	/// Make a line break
	pub fn newline(&mut self) {
		self.chars_written = 0;
		let _ = writeln!(self.stdout);
		let _ = self.stdout.flush();
	}

	/// Finish printing and make a newline
	pub fn finish(&mut self) {
		if self.finished {
			return;
		}
		if self.chars_written != 0 {
			self.newline();
		}
		self.finished = true;
	}
}

impl Default for ReplPrinter {
	fn default() -> Self {
		Self::new()
	}
}

impl Drop for ReplPrinter {
	fn drop(&mut self) {
		self.finish();
	}
}

/// Calculate how many characters long something will appear to be in the terminal,
/// skipping over escape sequences and the such
pub fn get_terminal_width(text: &str) -> usize {
	let esc = 0o33 as char;
	let mut out = 0;
	let mut in_escape = false;
	for c in text.chars() {
		if c == esc {
			in_escape = true;
		}

		if !in_escape {
			out += 1;
		}

		if c == 'm' {
			in_escape = false;
		}
	}
	out
}
