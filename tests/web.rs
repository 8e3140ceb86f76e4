// Browser tests for the DOM adapter. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::HtmlElement;
use whack_a_mole::dom::DomView;
use whack_a_mole::{GameConfig, GameState, View};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
    web_sys::window().unwrap().document().unwrap()
}

fn click(selector: &str) {
    document()
        .query_selector(selector)
        .unwrap()
        .unwrap_or_else(|| panic!("no element for {selector}"))
        .dyn_into::<HtmlElement>()
        .unwrap()
        .click();
}

#[wasm_bindgen_test]
fn mount_creates_missing_elements() {
    let _view = DomView::mount(document()).unwrap();
    for id in ["gameboard-grid", "score-display", "countdown", "start-btn", "round-status"] {
        assert!(document().get_element_by_id(id).is_some(), "missing #{id}");
    }
}

#[wasm_bindgen_test]
fn hole_updates_toggle_mole_image() {
    let mut view = DomView::mount(document()).unwrap();
    let state = GameState::default();
    view.render_board(state.holes());

    let doc = document();
    let holes = doc.query_selector_all(".hole").unwrap();
    assert_eq!(holes.length(), 12);

    view.update_hole(3, true);
    view.update_hole(3, true);
    assert_eq!(doc.query_selector_all(".hole.has-mole img").unwrap().length(), 1);

    view.update_hole(3, false);
    assert_eq!(doc.query_selector_all(".has-mole").unwrap().length(), 0);

    // Ids off the board are ignored.
    view.update_hole(40, true);
}

#[wasm_bindgen_test]
fn score_timer_and_round_over_text() {
    let mut view = DomView::mount(document()).unwrap();
    view.update_score(7);
    view.update_timer(12);
    view.notify_round_over(7);

    let doc = document();
    let text = |id: &str| doc.get_element_by_id(id).unwrap().text_content().unwrap();
    assert_eq!(text("score-display"), "Let's Go, your total score is 7");
    assert_eq!(text("countdown"), "12");
    assert_eq!(text("round-status"), "Time is up !!!");

    view.reset_board();
    assert_eq!(text("round-status"), "");
}

#[wasm_bindgen_test]
fn hole_clicks_report_parsed_ids_only() {
    let mut view = DomView::mount(document()).unwrap();
    view.render_board(GameState::default().holes());
    view.update_hole(5, true);

    let seen: Rc<RefCell<Vec<usize>>> = Rc::default();
    let sink = seen.clone();
    view.bind_hole_click(move |id| sink.borrow_mut().push(id)).unwrap();

    click("#gameboard-grid .hole[data-id='3']");
    // Clicks on the mole image bubble up to its hole.
    click("#gameboard-grid .hole[data-id='5'] img");

    let doc = document();
    let stray = doc.create_element("div").unwrap();
    stray.set_class_name("hole");
    stray.set_attribute("data-id", "not-a-number").unwrap();
    doc.get_element_by_id("gameboard-grid")
        .unwrap()
        .append_child(&stray)
        .unwrap();
    stray.dyn_into::<HtmlElement>().unwrap().click();

    // Grid itself is not inside any hole.
    click("#gameboard-grid");

    assert_eq!(*seen.borrow(), vec![3, 5]);
}

#[wasm_bindgen_test]
fn start_button_click_reaches_handler() {
    let view = DomView::mount(document()).unwrap();
    let clicks = Rc::new(RefCell::new(0u32));
    let sink = clicks.clone();
    view.bind_start_click(move || *sink.borrow_mut() += 1).unwrap();
    click("#start-btn");
    click("#start-btn");
    assert_eq!(*clicks.borrow(), 2);
}

#[wasm_bindgen_test]
fn rerender_replaces_board_and_id_map() {
    let mut view = DomView::mount(document()).unwrap();
    view.render_board(GameState::default().holes());
    let small = GameState::new(GameConfig {
        board_size: 4,
        max_moles: 2,
        ..GameConfig::default()
    });
    view.render_board(small.holes());

    let doc = document();
    assert_eq!(doc.query_selector_all("#gameboard-grid .hole").unwrap().length(), 4);

    // Ids from the old, larger board no longer map to anything.
    view.update_hole(8, true);
    assert_eq!(doc.query_selector_all(".has-mole").unwrap().length(), 0);
    view.update_hole(2, true);
    assert_eq!(doc.query_selector_all("#gameboard-grid .has-mole").unwrap().length(), 1);
}
