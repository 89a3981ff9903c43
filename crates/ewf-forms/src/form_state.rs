//! Stack-scoped default actions and data modifications

use crate::form_action::FormAction;
use crate::post_back::PostBack;

/// One scope of the form state
///
/// Frames are immutable once pushed; nested scopes push a replacement frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormStateFrame {
	default_action: Option<FormAction>,
	data_modifications: Vec<PostBack>,
}

impl FormStateFrame {
	pub fn new(default_action: Option<FormAction>, data_modifications: Vec<PostBack>) -> Self {
		Self {
			default_action,
			data_modifications,
		}
	}

	/// A frame whose default action runs the first of `data_modifications`
	pub fn for_data_modifications(data_modifications: Vec<PostBack>) -> Self {
		let default_action = data_modifications.first().cloned().map(FormAction::from);
		Self::new(default_action, data_modifications)
	}

	/// A frame that keeps `parent`'s data modifications but replaces its default action
	pub fn with_default_action(parent: &FormStateFrame, default_action: FormAction) -> Self {
		Self::new(Some(default_action), parent.data_modifications.clone())
	}

	pub fn default_action(&self) -> Option<&FormAction> {
		self.default_action.as_ref()
	}

	pub fn data_modifications(&self) -> &[PostBack] {
		&self.data_modifications
	}

	/// The post-back of the first data modification in scope
	pub fn post_back(&self) -> Option<&PostBack> {
		self.data_modifications.first()
	}
}

/// A stack of [`FormStateFrame`]s
///
/// The stack always has a root frame, which cannot be popped.
///
/// # Examples
///
/// ```
/// use ewf_forms::{FormAction, FormState, FormStateFrame, PostBack};
///
/// let main = PostBack::create_full("main");
/// let mut state = FormState::new(FormStateFrame::for_data_modifications(vec![main.clone()]));
/// let save = PostBack::create_full("save");
///
/// let inner = state.execute_with_data_modifications_and_default_action(vec![save.clone()], |state| {
///     state.current().default_action().cloned()
/// });
///
/// assert_eq!(inner, Some(FormAction::from(save)));
/// assert_eq!(state.current().default_action(), Some(&FormAction::from(main)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct FormState {
	root: FormStateFrame,
	nested: Vec<FormStateFrame>,
}

impl FormState {
	pub fn new(root: FormStateFrame) -> Self {
		Self {
			root,
			nested: Vec::new(),
		}
	}

	/// The active frame
	pub fn current(&self) -> &FormStateFrame {
		self.nested.last().unwrap_or(&self.root)
	}

	/// The number of frames pushed above the root
	pub fn depth(&self) -> usize {
		self.nested.len()
	}

	pub fn push_frame(&mut self, frame: FormStateFrame) {
		self.nested.push(frame);
		tracing::debug!("pushed form state frame (depth {})", self.nested.len());
	}

	/// Pop the innermost frame; the root frame is never popped
	pub fn pop_frame(&mut self) -> Option<FormStateFrame> {
		let frame = self.nested.pop();
		if frame.is_some() {
			tracing::debug!("popped form state frame (depth {})", self.nested.len());
		}
		frame
	}

	/// Run `body` with `data_modifications` in scope
	///
	/// The default action inside the scope runs the first of the modifications.
	/// The frame is popped on every exit path, including panics.
	pub fn execute_with_data_modifications_and_default_action<R>(
		&mut self,
		data_modifications: Vec<PostBack>,
		body: impl FnOnce(&mut FormState) -> R,
	) -> R {
		self.execute_in_frame(FormStateFrame::for_data_modifications(data_modifications), body)
	}

	/// Run `body` with `default_action` overriding the current default action
	pub fn execute_with_default_action<R>(
		&mut self,
		default_action: FormAction,
		body: impl FnOnce(&mut FormState) -> R,
	) -> R {
		let frame = FormStateFrame::with_default_action(self.current(), default_action);
		self.execute_in_frame(frame, body)
	}

	fn execute_in_frame<R>(&mut self, frame: FormStateFrame, body: impl FnOnce(&mut FormState) -> R) -> R {
		self.push_frame(frame);
		let mut guard = scopeguard::guard(self, |state| {
			state.pop_frame();
		});
		body(&mut guard)
	}
}
