//! Building, submitting, and rendering whole pages

use crate::component::Component;
use crate::context::BuildContext;
use crate::error::PageResult;
use crate::render::{RenderedPage, render};
use ewf_conf::FrameworkSettings;
use ewf_forms::{PostBackAction, PostBackOutcome, PostBackValues};
use std::sync::Arc;

/// A page built fresh for every request
pub trait Page {
	/// Construct the page's components
	///
	/// Controls register their post-backs and validations on `ctx` while they
	/// are constructed, so a page must build the same controls in the same
	/// order for a submission as it did when it was displayed.
	fn build(&self, ctx: &mut BuildContext) -> PageResult<Vec<Component>>;
}

impl<F> Page for F
where
	F: Fn(&mut BuildContext) -> PageResult<Vec<Component>>,
{
	fn build(&self, ctx: &mut BuildContext) -> PageResult<Vec<Component>> {
		self(ctx)
	}
}

/// What to send back to the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageResponse {
	Html(RenderedPage),
	Redirect(String),
}

/// Serves pages for display and for submissions
///
/// # Examples
///
/// ```
/// use ewf_conf::FrameworkSettings;
/// use ewf_pages::{BuildContext, ButtonStyle, Component, PageHandler, PageResponse, PageResult, SubmitButton};
/// use std::sync::Arc;
///
/// let page = |ctx: &mut BuildContext| -> PageResult<Vec<Component>> {
///     Ok(vec![SubmitButton::new(ButtonStyle::standard("Go")).build(ctx)?])
/// };
/// let handler = PageHandler::new(Arc::new(FrameworkSettings::default()));
///
/// let PageResponse::Html(rendered) = handler.get(&page).unwrap() else {
///     panic!("expected markup");
/// };
/// assert!(rendered.html.contains("value=\"v\""));
/// ```
#[derive(Debug, Clone)]
pub struct PageHandler {
	settings: Arc<FrameworkSettings>,
}

impl PageHandler {
	pub fn new(settings: Arc<FrameworkSettings>) -> Self {
		Self { settings }
	}

	pub fn settings(&self) -> &FrameworkSettings {
		&self.settings
	}

	/// Build and render a page without submitted data
	pub fn get(&self, page: &dyn Page) -> PageResult<PageResponse> {
		let mut ctx = BuildContext::new(Arc::clone(&self.settings));
		let components = page.build(&mut ctx)?;
		let rendered = render(&ctx, components, None)?;
		tracing::info!("rendered page with {} post-back(s)", ctx.post_backs().len());
		Ok(PageResponse::Html(rendered))
	}

	/// Handle a submission
	///
	/// The page is rebuilt against the posted values and the fired post-back
	/// is executed. A failed validation renders the page again with the posted
	/// values and the error messages; a completed post-back either redirects
	/// or renders a fresh page.
	pub fn post(&self, page: &dyn Page, values: PostBackValues) -> PageResult<PageResponse> {
		let mut ctx = BuildContext::for_post_back(Arc::clone(&self.settings), values);
		let components = page.build(&mut ctx)?;

		match ctx.process_post_back()? {
			None => {
				tracing::info!("submission fired no post-back");
				Ok(PageResponse::Html(render(&ctx, components, None)?))
			}
			Some(PostBackOutcome::ValidationFailed(errors)) => {
				tracing::info!("rendering page with validation errors");
				Ok(PageResponse::Html(render(&ctx, components, Some(&errors))?))
			}
			Some(PostBackOutcome::Completed(PostBackAction::Redirect(url))) => {
				tracing::info!("redirecting to {}", url);
				Ok(PageResponse::Redirect(url))
			}
			Some(PostBackOutcome::Completed(PostBackAction::Rerender)) => self.get(page),
		}
	}

	/// Handle an `application/x-www-form-urlencoded` submission body
	pub fn post_urlencoded(&self, page: &dyn Page, body: &str) -> PageResult<PageResponse> {
		let values = PostBackValues::from_urlencoded(body, &self.settings.button_element_name)?;
		self.post(page, values)
	}
}
