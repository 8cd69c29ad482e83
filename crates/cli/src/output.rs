use color_print::{cformat, cstr};
use mcpack::shared::output::{Message, MessageContents, MessageLevel, PackOutput};
use mcpack::shared::util::add_period;
use mcpack::shared::util::print::ReplPrinter;

/// A nice colored bullet point for terminal output
pub const HYPHEN_POINT: &str = cstr!("<k!> - </k!>");

/// Terminal PackOutput
pub struct TerminalOutput {
	printer: ReplPrinter,
	level: MessageLevel,
	in_process: bool,
	indent_level: u8,
}

impl PackOutput for TerminalOutput {
	fn display_text(&mut self, text: String, level: MessageLevel) {
		self.display_text_impl(text, level);
	}

	fn display_message(&mut self, message: Message) {
		self.display_text_impl(Self::format_message(message.contents), message.level);
	}

	fn start_process(&mut self) {
		if self.in_process {
			self.printer.newline();
		} else {
			self.in_process = true;
		}
	}

	fn end_process(&mut self) {
		if self.in_process {
			self.printer.newline();
		}
		self.in_process = false;
	}

	fn start_section(&mut self) {
		self.indent_level += 1;
		self.printer.indent(self.indent_level.into());
	}

	fn end_section(&mut self) {
		if self.indent_level != 0 {
			self.indent_level -= 1;
			self.printer.indent(self.indent_level.into());
		}
	}
}

impl TerminalOutput {
	pub fn new() -> Self {
		Self {
			printer: ReplPrinter::new(),
			level: MessageLevel::Important,
			in_process: false,
			indent_level: 0,
		}
	}

	/// Display text
	fn display_text_impl(&mut self, text: String, level: MessageLevel) {
		if !level.at_least(&self.level) {
			return;
		}

		self.printer.print(&text);
		if !self.in_process {
			self.printer.newline();
		}
	}

	/// Formatting for messages
	fn format_message(contents: MessageContents) -> String {
		match contents {
			MessageContents::Simple(text) => text,
			MessageContents::Notice(text) => cformat!("<y>Notice: {}", text),
			MessageContents::Warning(text) => cformat!("<y><s>Warning:</> {}", text),
			MessageContents::Error(text) => cformat!("<r><s,u>Error:</> {}", text),
			MessageContents::Success(text) => cformat!("<g>{}", add_period(text)),
			MessageContents::Property(key, value) => {
				cformat!("<s>{}:</> {}", key, Self::format_message(*value))
			}
			MessageContents::Header(text) => cformat!("<s>{}", text),
			MessageContents::StartProcess(text) => cformat!("{text}..."),
			MessageContents::Associated(item, message) => {
				// Don't parenthesize progress bars
				if let MessageContents::Progress { .. } = item.as_ref() {
					cformat!(
						"{} {}",
						Self::format_message(*item),
						Self::format_message(*message)
					)
				} else {
					cformat!(
						"[{}] {}",
						Self::format_message(*item),
						Self::format_message(*message)
					)
				}
			}
			MessageContents::ListItem(item) => {
				HYPHEN_POINT.to_string() + &Self::format_message(*item)
			}
			MessageContents::Progress { current, total } => {
				cformat!("<s>(</><g>{}</g><k!>/{}</><s>)</>", current, total)
			}
			contents => contents.default_format(),
		}
	}

	/// Set the log level of the output
	pub fn set_log_level(&mut self, level: MessageLevel) {
		self.level = level;
	}
}
