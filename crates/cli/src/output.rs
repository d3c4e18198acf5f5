use color_print::{cformat, cstr};

use neobuild::output::{Message, MessageContents, MessageLevel, NeobuildOutput};

/// A nice colored bullet point for terminal output
pub const HYPHEN_POINT: &str = cstr!("<k!> - </k!>");

/// Terminal NeobuildOutput
pub struct TerminalOutput {
	level: MessageLevel,
}

impl NeobuildOutput for TerminalOutput {
	fn display_text(&mut self, text: String, level: MessageLevel) {
		if !level.at_least(&self.level) {
			return;
		}

		println!("{text}");
	}

	fn display_message(&mut self, message: Message) {
		self.display_text(Self::format_message(message.contents), message.level);
	}
}

impl TerminalOutput {
	pub fn new(level: MessageLevel) -> Self {
		Self { level }
	}

	/// Formatting for messages
	fn format_message(contents: MessageContents) -> String {
		match contents {
			MessageContents::Simple(text) => text,
			MessageContents::Warning(text) => cformat!("<y><s>Warning:</> {}", text),
			MessageContents::Error(text) => cformat!("<r><s,u>Error:</> {}", text),
			MessageContents::Success(text) => cformat!("<g>{}", text),
			MessageContents::Property(key, value) => {
				cformat!("<s>{}:</> {}", key, Self::format_message(*value))
			}
			MessageContents::Header(text) => cformat!("<s>{}", text),
			MessageContents::StartProcess(text) => cformat!("{text}..."),
			MessageContents::ListItem(item) => {
				HYPHEN_POINT.to_string() + &Self::format_message(*item)
			}
			contents => contents.default_format(),
		}
	}
}
