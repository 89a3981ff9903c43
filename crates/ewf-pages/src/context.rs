//! Per-request construction state

use crate::error::{PageError, PageResult};
use ewf_conf::FrameworkSettings;
use ewf_forms::{
	DEFAULT_POST_BACK_ID, DataModificationError, FormAction, FormError, FormState, FormStateFrame, FormValue,
	PageModificationValueSource, PostBack, PostBackId, PostBackOutcome, PostBackPipeline, PostBackRegistry,
	PostBackValues, Validation,
};
use std::fmt;
use std::sync::Arc;

/// The id of an element, assigned when the element is constructed
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ElementId(String);

impl ElementId {
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for ElementId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl AsRef<str> for ElementId {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

/// Everything page construction reads and writes for one request
///
/// A fresh context is created for every request. It owns the form-state
/// stack, the registered post-backs and validations, the submit-button slot,
/// and the element id counter, so nothing leaks between requests.
///
/// # Examples
///
/// ```
/// use ewf_conf::FrameworkSettings;
/// use ewf_forms::PostBack;
/// use ewf_pages::BuildContext;
/// use std::sync::Arc;
///
/// let mut ctx = BuildContext::new(Arc::new(FrameworkSettings::default()));
/// assert_eq!(ctx.next_element_id().as_str(), "ewf1");
///
/// let save = PostBack::create_full("save");
/// let depth = ctx.execute_with_data_modifications_and_default_action(vec![save], |ctx| ctx.form_state().depth());
/// assert_eq!(depth, 1);
/// assert_eq!(ctx.form_state().depth(), 0);
/// ```
pub struct BuildContext {
	settings: Arc<FrameworkSettings>,
	main_post_back: PostBack,
	form_state: FormState,
	post_backs: PostBackRegistry,
	validations: Vec<Validation>,
	form_values: Vec<Arc<dyn PageModificationValueSource>>,
	submit_button_post_back: Option<PostBack>,
	next_id: usize,
	post_back_values: Option<PostBackValues>,
	focused_element: Option<ElementId>,
}

impl BuildContext {
	/// A context for rendering a page without submitted data
	///
	/// The root form-state frame holds the page's main post-back, which is
	/// the default action of every control that does not specify one.
	pub fn new(settings: Arc<FrameworkSettings>) -> Self {
		let main = PostBack::create_full(DEFAULT_POST_BACK_ID);
		Self {
			settings,
			form_state: FormState::new(FormStateFrame::for_data_modifications(vec![main.clone()])),
			main_post_back: main,
			post_backs: PostBackRegistry::new(),
			validations: Vec::new(),
			form_values: Vec::new(),
			submit_button_post_back: None,
			next_id: 0,
			post_back_values: None,
			focused_element: None,
		}
	}

	/// A context for processing a submission
	pub fn for_post_back(settings: Arc<FrameworkSettings>, values: PostBackValues) -> Self {
		Self {
			post_back_values: Some(values),
			..Self::new(settings)
		}
	}

	pub fn settings(&self) -> &FrameworkSettings {
		&self.settings
	}

	pub fn form_state(&self) -> &FormState {
		&self.form_state
	}

	pub fn current_frame(&self) -> &FormStateFrame {
		self.form_state.current()
	}

	/// The page's main post-back, the data modification of the root form-state frame
	pub fn main_post_back(&self) -> &PostBack {
		&self.main_post_back
	}

	pub fn post_backs(&self) -> &PostBackRegistry {
		&self.post_backs
	}

	pub fn validations(&self) -> &[Validation] {
		&self.validations
	}

	pub(crate) fn form_values(&self) -> &[Arc<dyn PageModificationValueSource>] {
		&self.form_values
	}

	pub fn post_back_values(&self) -> Option<&PostBackValues> {
		self.post_back_values.as_ref()
	}

	/// Allocate the next element id
	pub fn next_element_id(&mut self) -> ElementId {
		self.next_id += 1;
		ElementId(format!("{}{}", self.settings.element_id_prefix, self.next_id))
	}

	/// Run `body` with `data_modifications` in scope
	///
	/// Inside the scope the default action runs the first of the
	/// modifications, and validations are bound to them. The scope is left on
	/// every exit path.
	pub fn execute_with_data_modifications_and_default_action<R>(
		&mut self,
		data_modifications: Vec<PostBack>,
		body: impl FnOnce(&mut BuildContext) -> R,
	) -> R {
		self.execute_in_frame(FormStateFrame::for_data_modifications(data_modifications), body)
	}

	/// Run `body` with `default_action` as the default action for descendants
	pub fn execute_with_default_action<R>(
		&mut self,
		default_action: FormAction,
		body: impl FnOnce(&mut BuildContext) -> R,
	) -> R {
		let frame = FormStateFrame::with_default_action(self.form_state.current(), default_action);
		self.execute_in_frame(frame, body)
	}

	fn execute_in_frame<R>(&mut self, frame: FormStateFrame, body: impl FnOnce(&mut BuildContext) -> R) -> R {
		self.form_state.push_frame(frame);
		let mut guard = scopeguard::guard(self, |ctx| {
			ctx.form_state.pop_frame();
		});
		body(&mut guard)
	}

	/// Register an action's post-back with the page unless it already is
	pub fn add_to_page_if_necessary(&mut self, action: &FormAction) -> PageResult<()> {
		action.add_to_page_if_necessary(&mut self.post_backs)?;
		Ok(())
	}

	/// Append a data modification to a post-back, registering it if needed
	pub fn add_modification_method<F>(&mut self, post_back: &PostBack, method: F) -> PageResult<()>
	where
		F: Fn() -> Result<(), DataModificationError> + Send + Sync + 'static,
	{
		self.post_backs.register(post_back)?;
		self.post_backs
			.add_modification_method(post_back.id().as_str(), method)?;
		Ok(())
	}

	/// Register a validation
	///
	/// A validation that is not yet bound to any post-back is bound to the
	/// data modifications of the current form-state frame.
	pub fn add_validation(&mut self, validation: Validation) {
		let validation = if validation.data_modifications().is_empty() {
			let ids: Vec<PostBackId> = self
				.form_state
				.current()
				.data_modifications()
				.iter()
				.map(|pb| pb.id().clone())
				.collect();
			validation.with_data_modifications(ids)
		} else {
			validation
		};
		self.validations.push(validation);
	}

	/// Register a form value so its page modification values are set before rendering
	pub fn register_form_value<T: 'static>(&mut self, form_value: &FormValue<T>) {
		self.form_values.push(Arc::new(form_value.clone()));
	}

	/// The post-back of the page's submit button, once one has been constructed
	pub fn submit_button_post_back(&self) -> Option<&PostBack> {
		self.submit_button_post_back.as_ref()
	}

	/// Claim the page's single submit-button slot
	pub fn claim_submit_button(&mut self, post_back: &PostBack) -> PageResult<()> {
		if let Some(existing) = &self.submit_button_post_back {
			return Err(PageError::SubmitButtonAlreadyExists {
				existing: existing.id().clone(),
			});
		}
		self.submit_button_post_back = Some(post_back.clone());
		Ok(())
	}

	/// Give an element the initial keyboard focus
	pub fn set_focus(&mut self, element_id: &ElementId) {
		self.focused_element = Some(element_id.clone());
	}

	pub fn focused_element(&self) -> Option<&ElementId> {
		self.focused_element.as_ref()
	}

	/// The post-back that fired, according to the submitted button value
	///
	/// The submit value selects the submit button's post-back; any other value
	/// is a post-back id. A submission without a button value fires nothing.
	pub fn resolve_fired_post_back(&self) -> PageResult<Option<PostBack>> {
		let Some(values) = &self.post_back_values else {
			return Ok(None);
		};
		self.resolve_fired_post_back_in(values)
	}

	fn resolve_fired_post_back_in(&self, values: &PostBackValues) -> PageResult<Option<PostBack>> {
		let Some(button_value) = values.button_value() else {
			return Ok(None);
		};
		if button_value == self.settings.submit_button_value {
			return match &self.submit_button_post_back {
				Some(post_back) => Ok(Some(post_back.clone())),
				None => Err(FormError::InvalidSubmission("the page has no submit button".to_string()).into()),
			};
		}
		match self.post_backs.get(button_value) {
			Some(post_back) => Ok(Some(post_back.clone())),
			None => Err(FormError::UnknownPostBack(button_value.to_string()).into()),
		}
	}

	/// Validate the submission and run the fired post-back
	///
	/// Returns `None` when the request carries no submission or no post-back fired.
	pub fn process_post_back(&self) -> PageResult<Option<PostBackOutcome>> {
		let Some(values) = &self.post_back_values else {
			return Ok(None);
		};
		let Some(post_back) = self.resolve_fired_post_back_in(values)? else {
			return Ok(None);
		};
		let outcome = PostBackPipeline::new(&self.post_backs, &self.validations)
			.execute(post_back.id().as_str(), values)?;
		Ok(Some(outcome))
	}
}

impl fmt::Debug for BuildContext {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("BuildContext")
			.field("form_state", &self.form_state)
			.field("post_backs", &self.post_backs)
			.field("validations", &self.validations.len())
			.field("submit_button_post_back", &self.submit_button_post_back)
			.field("next_id", &self.next_id)
			.finish_non_exhaustive()
	}
}
