//! Whole pages built, rendered, and submitted through `PageHandler`

use ewf_conf::FrameworkSettings;
use ewf_core::ExternalResource;
use ewf_forms::{FormAction, PageModificationValue, PostBack, PostBackAction};
use ewf_pages::{
	BuildContext, ButtonBehavior, ButtonStyle, Checkbox, CheckboxSetup, Component, ConfirmationDialog,
	ConfirmationDialogId, EwfButton, NO_SELECTION_MESSAGE, PageError, PageHandler, PageResponse, PageResult,
	RadioButtonGroup, RadioButtonSetup, SubmitButton, TextControl, TextControlSetup, render,
};
use parking_lot::Mutex;
use rstest::{fixture, rstest};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[fixture]
fn settings() -> Arc<FrameworkSettings> {
	Arc::new(FrameworkSettings::default())
}

#[fixture]
fn handler(settings: Arc<FrameworkSettings>) -> PageHandler {
	PageHandler::new(settings)
}

fn html(response: PageResponse) -> String {
	match response {
		PageResponse::Html(rendered) => rendered.html,
		PageResponse::Redirect(url) => panic!("unexpected redirect to {url}"),
	}
}

#[rstest]
fn test_sibling_controls_share_one_registration(settings: Arc<FrameworkSettings>) {
	// Arrange
	let mut ctx = BuildContext::new(settings);

	// Act
	for _ in 0..3 {
		TextControl::new(&mut ctx, "", true, None, TextControlSetup::create(), |_, _| {}).unwrap();
	}
	Checkbox::new(&mut ctx, false, "Also", CheckboxSetup::create(), |_, _| {}).unwrap();

	// Assert
	assert_eq!(ctx.post_backs().len(), 1);
	assert!(ctx.post_backs().contains("main"));
}

#[rstest]
fn test_second_submit_button_fails_the_request(handler: PageHandler) {
	// Arrange
	let page = |ctx: &mut BuildContext| -> PageResult<Vec<Component>> {
		let first = SubmitButton::new(ButtonStyle::standard("Save")).build(ctx)?;
		let second = SubmitButton::new(ButtonStyle::standard("Save too")).build(ctx)?;
		Ok(vec![first, second])
	};

	// Act
	let result = handler.get(&page);

	// Assert
	assert!(matches!(result, Err(PageError::SubmitButtonAlreadyExists { .. })));
}

#[rstest]
fn test_enter_key_handler_depends_on_submit_button(handler: PageHandler) {
	// Arrange
	let page = |ctx: &mut BuildContext| -> PageResult<Vec<Component>> {
		let search = PostBack::create_full("search");
		let query = TextControl::new(
			ctx,
			"",
			true,
			None,
			TextControlSetup::create().with_action(FormAction::from(search)),
			|_, _| {},
		)?;
		let name = TextControl::new(ctx, "", true, None, TextControlSetup::create(), |_, _| {})?;
		let button = SubmitButton::new(ButtonStyle::standard("Save")).build(ctx)?;
		Ok(vec![query.into(), name.into(), button])
	};

	// Act
	let PageResponse::Html(rendered) = handler.get(&page).unwrap() else {
		panic!("expected markup");
	};

	// Assert
	assert_eq!(
		rendered.js_init_statements,
		"$( '#ewf1' ).keypress( function( e ) { if( e.which == 13 ) { e.preventDefault(); postBack( 'search' ); } } );"
	);
}

#[rstest]
fn test_checkbox_default_action_follows_scope(settings: Arc<FrameworkSettings>) {
	// Arrange
	let mut ctx = BuildContext::new(settings);
	let refresh = FormAction::from(PostBack::create_intermediate(None, "refresh"));

	// Act
	let inside = ctx
		.execute_with_default_action(refresh.clone(), |ctx| {
			Checkbox::new(ctx, false, "Inside", CheckboxSetup::create(), |_, _| {})
		})
		.unwrap();
	let after = Checkbox::new(&mut ctx, false, "After", CheckboxSetup::create(), |_, _| {}).unwrap();

	// Assert
	assert_eq!(inside.action(), Some(&refresh));
	assert_eq!(
		after.action().and_then(FormAction::post_back).map(|pb| pb.id().as_str()),
		Some("main")
	);
}

#[rstest]
fn test_read_only_text_control_posts_nothing(settings: Arc<FrameworkSettings>) {
	// Arrange
	let mut ctx = BuildContext::new(settings);

	// Act
	let control = TextControl::new(
		&mut ctx,
		"fixed",
		false,
		None,
		TextControlSetup::create_read_only(),
		|_, _| {},
	)
	.unwrap();

	// Assert
	assert_eq!(control.form_value().client_id(), "");
	assert!(ctx.validations().is_empty());
}

#[rstest]
fn test_checkbox_projector_runs_once_per_render(settings: Arc<FrameworkSettings>) {
	// Arrange
	let mut ctx = BuildContext::new(settings);
	let checkbox = Checkbox::new(&mut ctx, true, "Count", CheckboxSetup::create(), |_, _| {}).unwrap();
	let negated = PageModificationValue::new();
	let calls = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&calls);
	checkbox.form_value().add_page_modification_value(&negated, move |checked| {
		counter.fetch_add(1, Ordering::SeqCst);
		!checked
	});

	// Act
	render(&ctx, vec![checkbox.into()], None).unwrap();

	// Assert
	assert_eq!(calls.load(Ordering::SeqCst), 1);
	assert!(!negated.value().unwrap());
}

#[rstest]
fn test_log_out_button_redirects(handler: PageHandler) {
	// Arrange
	let logged_out = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&logged_out);
	let home = ExternalResource::new("https://example.com/").unwrap();
	let page = move |ctx: &mut BuildContext| -> PageResult<Vec<Component>> {
		let counter = Arc::clone(&counter);
		let home = home.clone();
		let log_out = PostBack::create_full("logOut")
			.with_first_modification(move || {
				counter.fetch_add(1, Ordering::SeqCst);
				Ok(())
			})
			.with_action_getter(move || PostBackAction::redirect(&home));
		let button = EwfButton::new(ButtonStyle::text("Log out"))
			.with_behavior(ButtonBehavior::PostBack(Some(log_out)))
			.build(ctx)?;
		Ok(vec![Component::text("Logged in as Jane. "), button])
	};

	// Act
	let response = handler.post_urlencoded(&page, "ewfButton=logOut").unwrap();

	// Assert
	assert_eq!(response, PageResponse::Redirect("https://example.com/".to_string()));
	assert_eq!(logged_out.load(Ordering::SeqCst), 1);
}

#[rstest]
fn test_confirmation_dialog_continue_runs_post_back(handler: PageHandler) {
	// Arrange
	let deleted = Arc::new(AtomicUsize::new(0));
	let counter = Arc::clone(&deleted);
	let page = move |ctx: &mut BuildContext| -> PageResult<Vec<Component>> {
		let counter = Arc::clone(&counter);
		let delete = PostBack::create_full("delete").with_first_modification(move || {
			counter.fetch_add(1, Ordering::SeqCst);
			Ok(())
		});
		let dialog_id = ConfirmationDialogId::new(ctx);
		let open = EwfButton::new(ButtonStyle::standard("Delete"))
			.with_behavior(ButtonBehavior::Action(Some(dialog_id.open_action())))
			.build(ctx)?;
		let dialog = ConfirmationDialog::new(ctx, &dialog_id, ["Really delete?"], Some(delete))?;
		Ok(vec![open, dialog.into()])
	};

	// Act
	let shown = handler.get(&page).unwrap();
	let submitted = handler.post_urlencoded(&page, "ewfButton=delete").unwrap();

	// Assert
	assert!(html(shown).starts_with("<button id=\"ewf2\""));
	assert!(matches!(submitted, PageResponse::Html(_)));
	assert_eq!(deleted.load(Ordering::SeqCst), 1);
}

#[rstest]
fn test_radio_group_round_trip(handler: PageHandler) {
	// Arrange
	let chosen = Arc::new(Mutex::new(Vec::new()));
	let sink = Arc::clone(&chosen);
	let page = move |ctx: &mut BuildContext| -> PageResult<Vec<Component>> {
		let group = RadioButtonGroup::new(ctx, false, None)?;
		let mut components: Vec<Component> = Vec::new();
		for label in ["Red", "Green", "Blue"] {
			let sink = Arc::clone(&sink);
			let button = group.create_radio_button(ctx, false, label, RadioButtonSetup::create(), move |value, _| {
				if value.value {
					sink.lock().push(label);
				}
			})?;
			components.push(button.into());
		}
		components.push(SubmitButton::new(ButtonStyle::standard("Pick")).build(ctx)?);
		Ok(components)
	};

	// Act
	let missing = html(handler.post_urlencoded(&page, "ewfButton=v").unwrap());
	let picked = handler.post_urlencoded(&page, "ewf1=ewf3&ewfButton=v").unwrap();

	// Assert
	assert!(missing.starts_with(&format!("<ul class=\"ewfErrorMessages\"><li>{NO_SELECTION_MESSAGE}</li></ul>")));
	assert!(matches!(picked, PageResponse::Html(_)));
	assert_eq!(*chosen.lock(), ["Green"]);
}

#[rstest]
fn test_invalid_text_keeps_posted_values(handler: PageHandler) {
	// Arrange
	let page = |ctx: &mut BuildContext| -> PageResult<Vec<Component>> {
		let first = TextControl::new(ctx, "", false, None, TextControlSetup::create(), |_, _| {})?;
		let second = TextControl::new(ctx, "", false, Some(3), TextControlSetup::create(), |_, _| {})?;
		let button = SubmitButton::new(ButtonStyle::standard("Save")).build(ctx)?;
		Ok(vec![first.into(), second.into(), button])
	};

	// Act
	let rendered = html(handler.post_urlencoded(&page, "ewf1=kept&ewf2=toolong&ewfButton=v").unwrap());

	// Assert
	assert_eq!(
		rendered,
		"<input type=\"text\" name=\"ewf1\" value=\"kept\" />\
		 <input type=\"text\" name=\"ewf2\" value=\"toolong\" maxlength=\"3\" />\
		 <ul class=\"ewfErrorMessages\"><li>The text must be no longer than 3 characters.</li></ul>\
		 <button class=\"ewfStandardButton ewfButtonNormal\" name=\"ewfButton\" value=\"v\">Save</button>"
	);
}
