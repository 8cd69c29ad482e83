/// Trait for a type that can output information about mcpack processes
pub trait PackOutput {
	/// Base function for a simple message. Used as a fallback
	fn display_text(&mut self, text: String, level: MessageLevel);

	/// Function to display a message to the user
	fn display_message(&mut self, message: Message) {
		self.display_text(message.contents.default_format(), message.level);
	}

	/// Convenience function to remove the need to construct a message
	fn display(&mut self, contents: MessageContents, level: MessageLevel) {
		self.display_message(Message { contents, level })
	}

	/// Start a process of multiple messages. Implementations can use this to replace a line
	/// multiple times
	fn start_process(&mut self) {}

	/// End an existing process
	fn end_process(&mut self) {}

	/// Start a new section / level of hierarchy. Implementations can use this to set the indent level
	fn start_section(&mut self) {}

	/// End the current section and go down a level of hierarchy
	fn end_section(&mut self) {}
}

/// A message supplied to the output
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
	/// The contents of the message
	pub contents: MessageContents,
	/// The printing level of the message
	pub level: MessageLevel,
}

/// Contents of a message. Different types represent different formatting
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageContents {
	/// Simple message with no formatting
	Simple(String),
	/// An important notice to the user
	Notice(String),
	/// A warning to the user
	Warning(String),
	/// An error
	Error(String),
	/// A success / finish message
	Success(String),
	/// A key-value property
	Property(String, Box<MessageContents>),
	/// A header / big message
	Header(String),
	/// An start of some long running process. Usually ends with ...
	StartProcess(String),
	/// A message with an associated value displayed along with it.
	Associated(Box<MessageContents>, Box<MessageContents>),
	/// An item in an unordered list
	ListItem(Box<MessageContents>),
	/// A progress indicator
	Progress {
		/// The current amount completed
		current: u32,
		/// The total amount that needs to be completed
		total: u32,
	},
}

impl MessageContents {
	/// Message formatting for the default implementation
	pub fn default_format(self) -> String {
		match self {
			MessageContents::Simple(text) | MessageContents::Success(text) => text,
			MessageContents::Notice(text) => format!("Notice: {text}"),
			MessageContents::Warning(text) => format!("Warning: {text}"),
			MessageContents::Error(text) => format!("Error: {text}"),
			MessageContents::Property(key, value) => {
				format!("{key}: {}", value.default_format())
			}
			MessageContents::Header(text) => text.to_uppercase(),
			MessageContents::StartProcess(text) => format!("{text}..."),
			MessageContents::Associated(item, message) => {
				format!("[{}] {}", item.default_format(), message.default_format())
			}
			MessageContents::ListItem(item) => format!(" - {}", item.default_format()),
			MessageContents::Progress { current, total } => format!("{current}/{total}"),
		}
	}
}

/// The level of logging that a message has
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MessageLevel {
	/// Messages that should always be displayed
	Important,
	/// Messages that can be displayed but are not required
	Extra,
	/// Debug-level messages. Good for logging but should not be displayed to
	/// the user unless they ask
	Debug,
	/// Very Debug-level messages. Should only be used for logging
	Trace,
}

impl MessageLevel {
	/// Checks if this level is at least another level
	pub fn at_least(&self, other: &Self) -> bool {
		match &self {
			Self::Important => matches!(
				other,
				Self::Important | Self::Extra | Self::Debug | Self::Trace
			),
			Self::Extra => matches!(other, Self::Extra | Self::Debug | Self::Trace),
			Self::Debug => matches!(other, Self::Debug | Self::Trace),
			Self::Trace => matches!(other, Self::Trace),
		}
	}
}

/// Dummy PackOutput that doesn't print anything
pub struct NoOp;

impl PackOutput for NoOp {
	fn display_text(&mut self, _text: String, _level: MessageLevel) {}
}

/// PackOutput that keeps every message it is given. Useful for inspecting
/// what a build reported, such as the warnings for skipped files
#[derive(Default, Debug)]
pub struct Collect {
	/// The messages in the order they were displayed
	pub messages: Vec<Message>,
}

impl Collect {
	/// Create an empty collector
	pub fn new() -> Self {
		Self::default()
	}

	/// Iterate over the text of all warning messages
	pub fn warnings(&self) -> impl Iterator<Item = &str> {
		self.messages.iter().filter_map(|x| match &x.contents {
			MessageContents::Warning(text) => Some(text.as_str()),
			_ => None,
		})
	}
}

impl PackOutput for Collect {
	fn display_text(&mut self, text: String, level: MessageLevel) {
		self.messages.push(Message {
			contents: MessageContents::Simple(text),
			level,
		});
	}

	fn display_message(&mut self, message: Message) {
		self.messages.push(message);
	}
}

/// RAII struct that opens and closes an output process
pub struct OutputProcess<'a, O: PackOutput + ?Sized>(pub &'a mut O);

impl<'a, O> OutputProcess<'a, O>
where
	O: PackOutput + ?Sized,
{
	/// Create a new OutputProcess from a PackOutput
	pub fn new(o: &'a mut O) -> Self {
		o.start_process();
		Self(o)
	}
}

impl<'a, O> Drop for OutputProcess<'a, O>
where
	O: PackOutput + ?Sized,
{
	fn drop(&mut self) {
		self.0.end_process();
	}
}

/// RAII struct that opens and closes an output section
pub struct OutputSection<'a, O: PackOutput + ?Sized>(pub &'a mut O);

impl<'a, O> OutputSection<'a, O>
where
	O: PackOutput + ?Sized,
{
	/// Create a new OutputSection from a PackOutput
	pub fn new(o: &'a mut O) -> Self {
		o.start_section();
		Self(o)
	}
}

impl<'a, O> Drop for OutputSection<'a, O>
where
	O: PackOutput + ?Sized,
{
	fn drop(&mut self) {
		self.0.end_section();
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_level_is_at_least() {
		assert!(MessageLevel::Extra.at_least(&MessageLevel::Debug));
		assert!(MessageLevel::Debug.at_least(&MessageLevel::Debug));
		assert!(!MessageLevel::Debug.at_least(&MessageLevel::Extra));
	}

	#[test]
	fn test_default_format() {
		let contents = MessageContents::Associated(
			Box::new(MessageContents::Progress {
				current: 1,
				total: 3,
			}),
			Box::new(MessageContents::StartProcess("Extracting".into())),
		);
		assert_eq!(contents.default_format(), "[1/3] Extracting...");
	}

	#[test]
	fn test_list_item_property_format() {
		let contents = MessageContents::ListItem(Box::new(MessageContents::Property(
			"mods".into(),
			Box::new(MessageContents::Simple("3".into())),
		)));
		assert_eq!(contents.default_format(), " - mods: 3");
		assert_eq!(
			MessageContents::Notice("foo".into()).default_format(),
			"Notice: foo"
		);
	}

	#[test]
	fn test_collect_warnings() {
		let mut o = Collect::new();
		o.display(
			MessageContents::Warning("foo".into()),
			MessageLevel::Important,
		);
		o.display(MessageContents::Simple("bar".into()), MessageLevel::Extra);
		assert_eq!(o.warnings().collect::<Vec<_>>(), vec!["foo"]);
		assert_eq!(o.messages.len(), 2);
	}
}
