//! The letter editor: formatting toolbar, placeholder, email form and
//! image export, bound to the page's existing markup.
//!
//! Every mutating operation on the region (typing, paste, formatting
//! commands, mount) goes through [`Editor::content_changed`], which keeps
//! the placeholder in sync.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, HtmlDocument, HtmlElement, HtmlInputElement};

use crate::config::AppConfig;
use crate::dom;
use crate::error::{AppError, Result};
use crate::http;

pub mod email;
pub mod export;
pub mod placeholder;
pub mod toolbar;

use email::EmailFlow;
use toolbar::{FormatCommand, Toolbar};

/// Page elements the editor drives. Only the editable region is required.
pub struct EditorElements {
    pub region: HtmlElement,
    pub send_button: Option<HtmlElement>,
    pub download_button: Option<HtmlElement>,
    pub actions_row: Option<HtmlElement>,
    pub email_form: Option<HtmlElement>,
    pub sender_input: Option<HtmlInputElement>,
    pub recipient_input: Option<HtmlInputElement>,
    pub send_email_button: Option<HtmlElement>,
    pub cancel_email_button: Option<HtmlElement>,
}

impl EditorElements {
    pub fn find(document: &Document, config: &AppConfig) -> Result<Self> {
        let ids = &config.elements;
        let region = dom::element_by_id(document, &ids.letter_content)
            .ok_or_else(|| AppError::MissingElement(ids.letter_content.clone()))?;
        Ok(Self {
            region,
            send_button: dom::element_by_id(document, &ids.send_button),
            download_button: dom::element_by_id(document, &ids.download_button),
            actions_row: dom::query_selector(document, &ids.actions_row),
            email_form: dom::element_by_id(document, &ids.email_form),
            sender_input: dom::element_by_id(document, &ids.sender_email),
            recipient_input: dom::element_by_id(document, &ids.recipient_email),
            send_email_button: dom::element_by_id(document, &ids.send_email_button),
            cancel_email_button: dom::element_by_id(document, &ids.cancel_email_button),
        })
    }

    /// Hide the editor UI and show the email form.
    fn show_email_form(&self) {
        dom::set_display(&self.region, "none");
        if let Some(row) = &self.actions_row {
            dom::set_display(row, "none");
        }
        if let Some(button) = &self.download_button {
            dom::set_display(button, "none");
        }
        if let Some(form) = &self.email_form {
            dom::set_display(form, "flex");
        }
    }

    /// Hide the email form, clear its fields and bring the editor back.
    fn restore_editor(&self) {
        if let Some(form) = &self.email_form {
            dom::set_display(form, "none");
        }
        self.clear_email_fields();
        dom::set_display(&self.region, "block");
        if let Some(row) = &self.actions_row {
            dom::set_display(row, "flex");
        }
        if let Some(button) = &self.download_button {
            dom::set_display(button, "block");
        }
    }

    fn clear_email_fields(&self) {
        for input in [&self.sender_input, &self.recipient_input].into_iter().flatten() {
            input.set_value("");
        }
    }

    fn input_value(input: &Option<HtmlInputElement>) -> String {
        input.as_ref().map(|i| i.value()).unwrap_or_default()
    }
}

struct EditorInner {
    document: HtmlDocument,
    elements: EditorElements,
    toolbar: Toolbar,
    flow: RefCell<EmailFlow>,
    config: Rc<AppConfig>,
}

/// Cheap-to-clone handle shared by all editor event handlers.
#[derive(Clone)]
pub struct Editor {
    inner: Rc<EditorInner>,
}

impl Editor {
    /// Find the editor markup and bind every handler.
    pub fn mount(config: Rc<AppConfig>) -> Result<Self> {
        let document = dom::html_document()?;
        let elements = EditorElements::find(&document, &config)?;
        let buttons = FormatCommand::ALL
            .iter()
            .filter_map(|command| {
                dom::element_by_id::<HtmlElement>(&document, command.button_id(&config.elements))
                    .map(|button| (*command, button))
            })
            .collect();

        let editor = Self {
            inner: Rc::new(EditorInner {
                document,
                elements,
                toolbar: Toolbar::new(buttons),
                flow: RefCell::new(EmailFlow::new()),
                config,
            }),
        };
        editor.bind_toolbar()?;
        editor.bind_region()?;
        editor.bind_email_form()?;
        editor.bind_export()?;

        editor.content_changed();
        editor.refresh_toolbar();
        Ok(editor)
    }

    /// Current rich-text markup of the letter.
    pub fn draft(&self) -> String {
        self.inner.elements.region.inner_html()
    }

    pub fn email_state(&self) -> email::EmailState {
        self.inner.flow.borrow().state()
    }

    /// Notify that the region's content changed.
    pub fn content_changed(&self) {
        placeholder::sync(&self.inner.elements.region);
    }

    pub fn refresh_toolbar(&self) -> toolbar::ToolbarState {
        self.inner.toolbar.refresh(&self.inner.document)
    }

    fn bind_toolbar(&self) -> Result<()> {
        for (command, button) in self.inner.toolbar.buttons() {
            let editor = self.clone();
            let command = *command;
            dom::listen(button, "click", move |event| {
                // Keep the selection in the region.
                event.prevent_default();
                Toolbar::apply(&editor.inner.document, command);
                let _ = editor.inner.elements.region.focus();
                editor.content_changed();
                editor.refresh_toolbar();
            })?;
        }
        Ok(())
    }

    fn bind_region(&self) -> Result<()> {
        let region = &self.inner.elements.region;
        for event in ["mouseup", "keyup", "click"] {
            let editor = self.clone();
            dom::listen(region, event, move |_| {
                editor.refresh_toolbar();
            })?;
        }
        let editor = self.clone();
        dom::listen(region, "input", move |_| editor.content_changed())
    }

    fn bind_email_form(&self) -> Result<()> {
        let elements = &self.inner.elements;

        if let Some(button) = &elements.send_button {
            let editor = self.clone();
            dom::listen(button, "click", move |_| editor.open_email_form())?;
        }
        if let Some(button) = &elements.cancel_email_button {
            let editor = self.clone();
            dom::listen(button, "click", move |_| editor.cancel_email())?;
        }
        if let Some(button) = &elements.send_email_button {
            let editor = self.clone();
            dom::listen(button, "click", move |_| editor.send_email())?;
        }
        Ok(())
    }

    fn bind_export(&self) -> Result<()> {
        let Some(button) = &self.inner.elements.download_button else {
            return Ok(());
        };
        let editor = self.clone();
        dom::listen(button, "click", move |_| {
            let editor = editor.clone();
            spawn_local(async move {
                let inner = &editor.inner;
                let exported = export::export_letter(&inner.elements.region, &inner.config).await;
                if let Err(e) = exported {
                    log::error!("Error converting HTML to image [{:?}]: {}", e.code(), e);
                    let text = if e.is_user_visible() {
                        e.user_message()
                    } else {
                        AppError::Render(e.to_string()).user_message()
                    };
                    dom::alert(&text);
                }
            });
        })
    }

    /// "Send letter" click.
    pub fn open_email_form(&self) {
        let draft = self.draft();
        let opened = self.inner.flow.borrow_mut().open(&draft);
        match opened {
            Ok(()) => self.inner.elements.show_email_form(),
            Err(e) => dom::alert(e.alert_text()),
        }
    }

    /// "Cancel" click. The form stays up while a request is in flight.
    pub fn cancel_email(&self) {
        let cancelled = self.inner.flow.borrow_mut().cancel();
        if cancelled {
            self.inner.elements.restore_editor();
        }
    }

    /// "Send email" click.
    pub fn send_email(&self) {
        let elements = &self.inner.elements;
        let sender = EditorElements::input_value(&elements.sender_input);
        let recipient = EditorElements::input_value(&elements.recipient_input);
        let draft = self.draft();

        let submitted = self.inner.flow.borrow_mut().begin_submit(&sender, &recipient, &draft);
        let request = match submitted {
            Ok(request) => request,
            Err(e) => {
                dom::alert(e.alert_text());
                return;
            }
        };

        log::info!(
            "Preparing to send email from {} to {} ({} bytes of letter)",
            request.sender_email,
            request.recipient_email,
            request.letter_content.len()
        );

        let editor = self.clone();
        spawn_local(async move {
            let endpoint = editor.inner.config.send_email_endpoint.clone();
            match http::post_json(&endpoint, &request).await {
                Ok(response) => {
                    log::info!("Success sending email: {}", response);
                    editor.inner.flow.borrow_mut().finish(true);
                    dom::alert("Email sent successfully!");
                    editor.inner.elements.restore_editor();
                }
                Err(e) => {
                    log::error!("Error sending email [{:?}]: {}", e.code(), e);
                    editor.inner.flow.borrow_mut().finish(false);
                    let text = if e.is_user_visible() {
                        format!("An error occurred while sending the email: {}", e)
                    } else {
                        e.user_message()
                    };
                    dom::alert(&text);
                }
            }
        });
    }
}
