//! Browser entry point
//!
//! Wires the session to the page: canvas `#gameCanvas`, text labels
//! `#levelLabel` / `#gameMessage`, window key events and the animation frame
//! loop. Only one game instance exists per page; calling `start_game` again
//! restarts the live session instead of stacking a second loop.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, HtmlCanvasElement, KeyboardEvent};

use super::input::{KeyBindings, KeyState};
use crate::renderer::{CanvasRenderer, build_scene};
use crate::sim::{Session, SessionEvent, autopilot_input, normalize_level};
use crate::tuning::Tuning;

const CANVAS_ID: &str = "gameCanvas";
const LEVEL_LABEL_ID: &str = "levelLabel";
const MESSAGE_ID: &str = "gameMessage";

/// Game instance holding all state
struct Game {
    session: Session,
    renderer: CanvasRenderer,
    keys: KeyState,
    bindings: KeyBindings,
    last_time: f64,
    autopilot: bool,
}

impl Game {
    /// Run one frame: sample input, step the session, refresh labels, draw
    fn update(&mut self, time: f64) {
        let dt = if self.last_time > 0.0 {
            ((time - self.last_time) / 1000.0) as f32
        } else {
            0.0
        };
        self.last_time = time;

        let input = if self.autopilot {
            autopilot_input(self.session.round())
        } else {
            self.bindings.sample(&self.keys)
        };

        if let Some(event) = self.session.frame(&input, dt) {
            match event {
                SessionEvent::RoundEnded { .. } | SessionEvent::Finished { .. } => {
                    set_label(MESSAGE_ID, &self.session.round().message);
                }
                SessionEvent::RoundStarted { level } => show_level(level),
            }
        }

        self.renderer.draw(&build_scene(self.session.round()));
    }

    fn restart(&mut self, level: u32, tuning: Tuning) {
        self.session.start_with(level, tuning);
        self.last_time = 0.0;
        self.keys.clear();
        show_level(self.session.round().level());
    }
}

thread_local! {
    static GAME: RefCell<Option<Rc<RefCell<Game>>>> = const { RefCell::new(None) };
}

fn document() -> Option<Document> {
    web_sys::window()?.document()
}

fn set_label(id: &str, text: &str) {
    match document().and_then(|d| d.get_element_by_id(id)) {
        Some(el) => el.set_text_content(Some(text)),
        None => log::debug!("No #{} element", id),
    }
}

/// Level label shows the level, message label is blanked
fn show_level(level: u32) {
    set_label(LEVEL_LABEL_ID, &level.to_string());
    set_label(MESSAGE_ID, " ");
}

/// Level written into `#levelLabel` by the page, if any
fn initial_level() -> u32 {
    document()
        .and_then(|d| d.get_element_by_id(LEVEL_LABEL_ID))
        .and_then(|el| el.text_content())
        .and_then(|text| text.trim().parse::<u32>().ok())
        .map(normalize_level)
        .unwrap_or(1)
}

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    log::info!("Tree Lights starting...");

    let Some(doc) = document() else {
        log::error!("No document");
        return;
    };

    // Script may run before the body is parsed
    if doc.get_element_by_id(CANVAS_ID).is_none() {
        let closure = Closure::once(move |_event: web_sys::Event| {
            start_game(Some(initial_level()));
        });
        if let Err(e) = doc
            .add_event_listener_with_callback("DOMContentLoaded", closure.as_ref().unchecked_ref())
        {
            log::error!("Could not wait for DOMContentLoaded: {:?}", e);
        }
        closure.forget();
    } else {
        start_game(Some(initial_level()));
    }
}

/// Start (or restart) the game at `level` with the default tuning
#[wasm_bindgen]
pub fn start_game(level: Option<u32>) {
    if let Err(e) = launch(level.unwrap_or(1), Tuning::default()) {
        log::error!("start_game failed: {:?}", e);
    }
}

/// Start the game with a JSON tuning document (partial documents are fine)
#[wasm_bindgen]
pub fn start_game_with_tuning(level: Option<u32>, tuning_json: &str) -> Result<(), JsValue> {
    let tuning = Tuning::from_json(tuning_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    launch(level.unwrap_or(1), tuning)
}

fn launch(level: u32, mut tuning: Tuning) -> Result<(), JsValue> {
    let level = normalize_level(level);

    let doc = document().ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = doc
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| JsValue::from_str("no #gameCanvas"))?
        .dyn_into()?;

    // The canvas decides the play field size
    tuning.canvas_width = canvas.width() as f32;
    tuning.canvas_height = canvas.height() as f32;
    tuning
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    // Restart in place when a loop is already running
    let existing = GAME.with(|cell| cell.borrow().clone());
    if let Some(game) = existing {
        log::info!("Restarting at level {}", level);
        game.borrow_mut().restart(level, tuning);
        return Ok(());
    }

    let renderer = CanvasRenderer::new(&canvas)?;
    let seed = js_sys::Date::now() as u64;
    let session = Session::new(level, tuning, seed);

    let game = Rc::new(RefCell::new(Game {
        session,
        renderer,
        keys: KeyState::new(),
        bindings: KeyBindings::default(),
        last_time: 0.0,
        autopilot: false,
    }));
    GAME.with(|cell| *cell.borrow_mut() = Some(game.clone()));

    show_level(level);
    setup_input_handlers(game.clone())?;
    request_animation_frame(game);

    log::info!("Tree Lights running at level {}", level);
    Ok(())
}

fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

    // Key down
    {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            let code = event.code();
            if g.bindings.is_bound(&code) {
                event.prevent_default();
            }
            if code == g.bindings.autopilot {
                if !event.repeat() {
                    g.autopilot = !g.autopilot;
                    log::info!("Autopilot: {}", g.autopilot);
                }
            } else {
                g.keys.press(&code);
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Key up
    {
        let game = game.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            game.borrow_mut().keys.release(&event.code());
        });
        window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Window blur: key-ups will not arrive, drop everything held
    {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            game.borrow_mut().keys.clear();
            log::debug!("Keys cleared (window blur)");
        });
        window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    Ok(())
}

fn request_animation_frame(game: Rc<RefCell<Game>>) {
    let Some(window) = web_sys::window() else {
        log::error!("No window, frame loop stopped");
        return;
    };
    let closure = Closure::once(move |time: f64| {
        game_loop(game, time);
    });
    if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
        log::error!("request_animation_frame failed, frame loop stopped: {:?}", e);
    }
    closure.forget();
}

fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
    game.borrow_mut().update(time);
    request_animation_frame(game);
}
