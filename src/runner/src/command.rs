use rope::controller_message::ControllerMessage;

use crate::error::{RunnerError, RunnerResult};

/// Parses one line of controller input:
/// `p` toggles pause, `s` steps one frame while paused, `m x y z` moves the
/// anchor, `q` quits.
pub fn parse_command(line: &str) -> RunnerResult<ControllerMessage> {
	let mut words = line.split_whitespace();
	let bad = || RunnerError::Command(line.trim().to_string());
	let msg = match words.next().ok_or_else(bad)? {
		"p" | "pause" => ControllerMessage::TogglePause,
		"s" | "step" => ControllerMessage::FrameForward,
		"q" | "quit" => ControllerMessage::Quit,
		"m" | "move" => {
			let mut pos = [0f32; 3];
			for p in pos.iter_mut() {
				*p = words
					.next()
					.and_then(|w| w.parse().ok())
					.filter(|v: &f32| v.is_finite())
					.ok_or_else(bad)?;
			}
			ControllerMessage::MoveAnchor(pos)
		}
		_ => return Err(bad()),
	};
	if words.next().is_some() {
		return Err(bad());
	}
	Ok(msg)
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn test_parse_commands() {
		assert_eq!(parse_command("p").unwrap(), ControllerMessage::TogglePause);
		assert_eq!(parse_command(" step \n").unwrap(), ControllerMessage::FrameForward);
		assert_eq!(parse_command("q").unwrap(), ControllerMessage::Quit);
		assert_eq!(
			parse_command("m 1 -2.5 0").unwrap(),
			ControllerMessage::MoveAnchor([1., -2.5, 0.])
		);
	}

	#[test]
	fn test_rejects_malformed() {
		for line in ["", "x", "m 1 2", "m 1 2 a", "m 1 2 inf", "p now"] {
			assert!(matches!(parse_command(line), Err(RunnerError::Command(_))), "{}", line);
		}
	}
}
