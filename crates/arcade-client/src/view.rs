use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement};

use arcade_core::page;

use crate::diag;
use crate::view_model::ViewModel;

/// Handles to the server-rendered player markup.
pub struct PlayerView {
    container: HtmlElement,
    canvas: HtmlCanvasElement,
    loading: HtmlElement,
    loading_label: Element,
    progress_bar: HtmlElement,
    error: HtmlElement,
    error_message: Element,
    button: Element,
}

fn by_id(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
}

fn html_by_id(document: &Document, id: &str) -> Result<HtmlElement, JsValue> {
    Ok(by_id(document, id)?.dyn_into()?)
}

impl PlayerView {
    pub fn from_document(document: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            container: html_by_id(document, page::CONTAINER_ID)?,
            canvas: by_id(document, page::CANVAS_ID)?.dyn_into()?,
            loading: html_by_id(document, page::LOADING_ID)?,
            loading_label: by_id(document, page::LOADING_LABEL_ID)?,
            progress_bar: html_by_id(document, page::PROGRESS_BAR_ID)?,
            error: html_by_id(document, page::ERROR_ID)?,
            error_message: by_id(document, page::ERROR_MESSAGE_ID)?,
            button: by_id(document, page::FULLSCREEN_BUTTON_ID)?,
        })
    }

    pub fn container(&self) -> &HtmlElement {
        &self.container
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    pub fn button(&self) -> &Element {
        &self.button
    }

    pub fn render(&self, vm: &ViewModel) {
        if let Err(e) = self.apply(vm) {
            diag::console_warn!("Failed to update player view: {e:?}");
        }
    }

    fn apply(&self, vm: &ViewModel) -> Result<(), JsValue> {
        let (width, height) = vm.container.css();
        let style = self.container.style();
        style.set_property("width", &width)?;
        style.set_property("height", &height)?;
        self.container
            .class_list()
            .toggle_with_force("fullscreen", vm.fullscreen)?;

        self.canvas.set_width(vm.canvas_width);
        self.canvas.set_height(vm.canvas_height);
        let canvas_style = self.canvas.style();
        canvas_style.set_property("width", &format!("{}px", vm.canvas_width))?;
        canvas_style.set_property("height", &format!("{}px", vm.canvas_height))?;
        canvas_style.set_property("margin-top", &format!("{}px", vm.canvas_margin_top))?;

        self.loading.set_hidden(!vm.loading_visible);
        self.loading_label
            .set_text_content(Some(vm.loading_label.as_str()));
        self.progress_bar
            .style()
            .set_property("width", &vm.progress_width)?;

        self.error.set_hidden(vm.error.is_none());
        self.error_message.set_text_content(vm.error.as_deref());

        self.button.set_attribute("title", vm.button_title)?;
        Ok(())
    }
}
