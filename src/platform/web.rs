//! Browser implementations of the platform capabilities
//!
//! Callbacks are bound after the driver is placed in its `Rc<RefCell<_>>`,
//! since they need a handle back to it. They hold a `Weak` so the driver and
//! its closures do not keep each other alive, and go through
//! `try_with_driver` so a trigger that arrives while the driver is busy is
//! dropped instead of re-entering it.

use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, KeyboardEvent, MouseEvent};

use super::{InputSource, Notifier, Scheduler};

/// `setInterval`-backed timer
#[derive(Default)]
pub struct WebScheduler {
    handle: Option<i32>,
    callback: Option<Closure<dyn FnMut()>>,
}

impl WebScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the function each interval fires
    pub fn bind(&mut self, callback: impl FnMut() + 'static) {
        self.callback = Some(Closure::<dyn FnMut()>::new(callback));
    }
}

impl Scheduler for WebScheduler {
    fn start(&mut self, period_ms: u32) {
        // Never leave a second interval running
        self.cancel();

        let Some(window) = web_sys::window() else {
            log::error!("no window, timer not started");
            return;
        };
        let Some(callback) = self.callback.as_ref() else {
            log::error!("timer started before a callback was bound");
            return;
        };
        let Ok(timeout) = i32::try_from(period_ms) else {
            log::error!("period {} ms out of range, timer not started", period_ms);
            return;
        };
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            timeout,
        ) {
            Ok(id) => self.handle = Some(id),
            Err(e) => log::error!("failed to start interval: {:?}", e),
        }
    }

    fn cancel(&mut self) {
        if let Some(id) = self.handle.take() {
            if let Some(window) = web_sys::window() {
                window.clear_interval_with_handle(id);
            }
        }
    }
}

impl Drop for WebScheduler {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Any key on the page body or a mousedown on the click target
pub struct WebInput {
    body: Option<HtmlElement>,
    click_target: Option<Element>,
    keydown: Option<Closure<dyn FnMut(KeyboardEvent)>>,
    mousedown: Option<Closure<dyn FnMut(MouseEvent)>>,
    attached: bool,
}

impl WebInput {
    pub fn new(document: &Document, click_target_id: &str) -> Self {
        let click_target = document.get_element_by_id(click_target_id);
        if click_target.is_none() {
            log::warn!("#{} not found, keyboard input only", click_target_id);
        }
        Self {
            body: document.body(),
            click_target,
            keydown: None,
            mousedown: None,
            attached: false,
        }
    }

    /// Set the function every trigger calls
    pub fn bind(&mut self, on_trigger: impl Fn() + 'static) {
        let on_trigger = Rc::new(on_trigger);
        let on_key = on_trigger.clone();
        self.keydown = Some(Closure::<dyn FnMut(_)>::new(move |_event: KeyboardEvent| {
            on_key();
        }));
        self.mousedown = Some(Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            on_trigger();
        }));
    }
}

impl InputSource for WebInput {
    fn attach(&mut self) {
        if self.attached {
            return;
        }
        if let (Some(body), Some(cb)) = (&self.body, &self.keydown) {
            let _ = body.add_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
        }
        if let (Some(target), Some(cb)) = (&self.click_target, &self.mousedown) {
            let _ =
                target.add_event_listener_with_callback("mousedown", cb.as_ref().unchecked_ref());
        }
        self.attached = true;
    }

    fn detach(&mut self) {
        if !self.attached {
            return;
        }
        if let (Some(body), Some(cb)) = (&self.body, &self.keydown) {
            let _ =
                body.remove_event_listener_with_callback("keydown", cb.as_ref().unchecked_ref());
        }
        if let (Some(target), Some(cb)) = (&self.click_target, &self.mousedown) {
            let _ = target
                .remove_event_listener_with_callback("mousedown", cb.as_ref().unchecked_ref());
        }
        self.attached = false;
        log::info!("input detached");
    }
}

/// Notification box with a message line and a Replay link
pub struct DomNotifier {
    container: Option<HtmlElement>,
    message: Option<Element>,
    // Kept alive for the page lifetime
    _replay: Option<Closure<dyn FnMut(MouseEvent)>>,
}

impl DomNotifier {
    /// Build the (hidden) notification box and append it to `parent`
    pub fn new(document: &Document, parent: &Element) -> Self {
        let built = (|| -> Result<_, JsValue> {
            let container: HtmlElement = document.create_element("div")?.dyn_into()?;
            container.class_list().add_1("notification-container")?;

            let message = document.create_element("div")?;
            message.class_list().add_1("notification")?;

            let replay = document.create_element("a")?;
            replay.set_inner_html("Replay");
            replay.class_list().add_1("replay")?;
            let on_replay = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                log::info!("replay requested");
                if let Some(window) = web_sys::window() {
                    let _ = window.location().reload();
                }
            });
            replay.add_event_listener_with_callback("click", on_replay.as_ref().unchecked_ref())?;

            container.append_child(&message)?;
            container.append_child(&replay)?;
            parent.append_child(&container)?;
            Ok((container, message, on_replay))
        })();

        match built {
            Ok((container, message, on_replay)) => Self {
                container: Some(container),
                message: Some(message),
                _replay: Some(on_replay),
            },
            Err(e) => {
                log::error!("failed to build notification box: {:?}", e);
                Self {
                    container: None,
                    message: None,
                    _replay: None,
                }
            }
        }
    }

    fn show(&self, text: &str) {
        if let Some(message) = &self.message {
            message.set_inner_html(text);
        }
        if let Some(container) = &self.container {
            let _ = container.style().set_property("display", "flex");
        }
    }
}

impl Notifier for DomNotifier {
    fn on_win(&mut self) {
        self.show("You won!");
    }

    fn on_loss(&mut self) {
        self.show("You lost! :(");
    }
}
