#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ControllerMessage {
	TogglePause,
	FrameForward,
	MoveAnchor([f32; 3]),
	Quit,
}
