//! Browser adapters: the DOM view and the `setInterval` scheduler.
//!
//! Page elements are reused when the host page already provides them
//! (`#gameboard-grid`, `#score-display`, `#countdown`, `#start-btn`,
//! `#round-status`) and created with inline styling otherwise.

use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Window};

use crate::controller::{Scheduler, Tick};
use crate::state::{Hole, HoleId};
use crate::view::View;

const MOLE_IMAGE: &str = "mole.jpg";
const HAS_MOLE: &str = "has-mole";
const HOLE_STYLE: &str = "width:96px; height:96px; border-radius:50%; background:#3b2a1a; \
    box-shadow:inset 0 8px 16px rgba(0,0,0,0.6); display:flex; align-items:center; \
    justify-content:center; overflow:hidden; cursor:pointer;";
const MOLE_STYLE: &str = "width:80%; height:80%; object-fit:cover; pointer-events:none;";

pub struct DomView {
    document: Document,
    grid: Element,
    score: Element,
    countdown: Element,
    start_button: Element,
    status: Element,
    // Built by render_board, indexed by hole id.
    holes: Vec<Element>,
}

impl DomView {
    pub fn mount(document: Document) -> Result<Self, JsValue> {
        let body = document
            .body()
            .ok_or_else(|| JsValue::from_str("no body"))?;
        let score = ensure_element(
            &document,
            &body,
            "score-display",
            "div",
            "font-family:'Fira Code', monospace; font-size:18px; margin:8px 0; color:#ffd166;",
        )?;
        let countdown = ensure_element(
            &document,
            &body,
            "countdown",
            "div",
            "font-family:'Fira Code', monospace; font-size:28px; margin:8px 0; color:#f0f0f0;",
        )?;
        let start_button = ensure_element(
            &document,
            &body,
            "start-btn",
            "button",
            "font-size:16px; padding:6px 18px; border-radius:6px; cursor:pointer;",
        )?;
        if start_button.text_content().unwrap_or_default().is_empty() {
            start_button.set_text_content(Some("Start"));
        }
        let grid = ensure_element(
            &document,
            &body,
            "gameboard-grid",
            "div",
            "display:grid; grid-template-columns:repeat(4, 96px); gap:12px; margin:16px 0;",
        )?;
        let status = ensure_element(
            &document,
            &body,
            "round-status",
            "div",
            "font-family:'Fira Code', monospace; font-size:20px; min-height:1.4em; color:#ff4d4d;",
        )?;
        Ok(Self {
            document,
            grid,
            score,
            countdown,
            start_button,
            status,
            holes: Vec::new(),
        })
    }

    pub fn bind_start_click(&self, mut handler: impl FnMut() + 'static) -> Result<(), JsValue> {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            handler();
        }) as Box<dyn FnMut(_)>);
        self.start_button
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        // Bound once for the life of the page.
        closure.forget();
        Ok(())
    }

    /// One delegated listener on the grid; the hole id comes from `data-id`.
    pub fn bind_hole_click(&self, mut handler: impl FnMut(HoleId) + 'static) -> Result<(), JsValue> {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let hole = evt
                .target()
                .and_then(|t| t.dyn_into::<Element>().ok())
                .and_then(|el| el.closest(".hole").ok().flatten());
            if let Some(id) = hole
                .and_then(|h| h.get_attribute("data-id"))
                .and_then(|v| v.parse::<HoleId>().ok())
            {
                handler(id);
            }
        }) as Box<dyn FnMut(_)>);
        self.grid
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn build_hole(&self, hole: &Hole) -> Result<Element, JsValue> {
        let el = self.document.create_element("div")?;
        el.set_class_name("hole");
        el.set_attribute("data-id", &hole.id.to_string())?;
        el.set_attribute("style", HOLE_STYLE).ok();
        if hole.has_mole {
            self.show_mole(&el)?;
        }
        Ok(el)
    }

    fn show_mole(&self, el: &Element) -> Result<(), JsValue> {
        if el.class_list().contains(HAS_MOLE) {
            return Ok(());
        }
        el.class_list().add_1(HAS_MOLE)?;
        let img = self.document.create_element("img")?;
        img.set_attribute("src", MOLE_IMAGE)?;
        img.set_attribute("alt", "mole")?;
        img.set_attribute("style", MOLE_STYLE).ok();
        el.append_child(&img)?;
        Ok(())
    }
}

fn hide_mole(el: &Element) {
    el.class_list().remove_1(HAS_MOLE).ok();
    el.set_inner_html("");
}

impl View for DomView {
    fn render_board(&mut self, holes: &[Hole]) {
        // All or nothing: a failed build keeps the previous board and id map.
        let built: Result<Vec<Element>, JsValue> =
            holes.iter().map(|h| self.build_hole(h)).collect();
        let elements = match built {
            Ok(elements) => elements,
            Err(e) => {
                web_sys::console::error_2(&JsValue::from_str("hole render failed"), &e);
                return;
            }
        };
        self.grid.set_inner_html("");
        for el in &elements {
            self.grid.append_child(el).ok();
        }
        self.holes = elements;
    }

    fn update_hole(&mut self, id: HoleId, has_mole: bool) {
        let Some(el) = self.holes.get(id) else {
            return;
        };
        if has_mole {
            self.show_mole(el).ok();
        } else {
            hide_mole(el);
        }
    }

    fn update_score(&mut self, score: u32) {
        self.score
            .set_text_content(Some(&format!("Let's Go, your total score is {score}")));
    }

    fn update_timer(&mut self, seconds: u32) {
        self.countdown.set_text_content(Some(&seconds.to_string()));
    }

    fn reset_board(&mut self) {
        for el in &self.holes {
            hide_mole(el);
        }
        self.status.set_text_content(Some(""));
    }

    fn notify_round_over(&mut self, final_score: u32) {
        self.status.set_text_content(Some("Time is up !!!"));
        self.status
            .set_attribute("data-final-score", &final_score.to_string())
            .ok();
    }
}

/// Look up `#id`, creating it as a `tag` child of `body` when absent.
fn ensure_element(
    doc: &Document,
    body: &web_sys::HtmlElement,
    id: &str,
    tag: &str,
    style: &str,
) -> Result<Element, JsValue> {
    if let Some(el) = doc.get_element_by_id(id) {
        return Ok(el);
    }
    let el = doc.create_element(tag)?;
    el.set_id(id);
    el.set_attribute("style", style).ok();
    body.append_child(&el)?;
    Ok(el)
}

// --- Scheduling ---------------------------------------------------------------

/// Browser interval id returned by `setInterval`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntervalId(i32);

/// `setInterval`-backed scheduler. The two tick callbacks are created once and
/// reused for every round, so restarting never allocates new closures.
pub struct IntervalScheduler {
    window: Window,
    spawn_cb: Closure<dyn FnMut()>,
    timer_cb: Closure<dyn FnMut()>,
}

impl IntervalScheduler {
    pub fn new(window: Window, on_tick: impl Fn(Tick) + 'static) -> Self {
        let dispatch: Rc<dyn Fn(Tick)> = Rc::new(on_tick);
        let d = dispatch.clone();
        let spawn_cb = Closure::wrap(Box::new(move || d(Tick::Spawn)) as Box<dyn FnMut()>);
        let timer_cb = Closure::wrap(Box::new(move || dispatch(Tick::Timer)) as Box<dyn FnMut()>);
        Self {
            window,
            spawn_cb,
            timer_cb,
        }
    }
}

impl Scheduler for IntervalScheduler {
    type Handle = IntervalId;
    type Error = JsValue;

    fn every(&mut self, tick: Tick, period_ms: u32) -> Result<IntervalId, JsValue> {
        let cb = match tick {
            Tick::Spawn => &self.spawn_cb,
            Tick::Timer => &self.timer_cb,
        };
        let timeout = i32::try_from(period_ms).unwrap_or(i32::MAX);
        let id = self
            .window
            .set_interval_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                timeout,
            )?;
        Ok(IntervalId(id))
    }

    fn cancel(&mut self, handle: IntervalId) {
        self.window.clear_interval_with_handle(handle.0);
    }
}
