//! Browser boundary: canvas renderer, DOM HUD, keyboard listeners and the
//! `requestAnimationFrame` loop. Everything here is a thin shell around
//! [`GameEngine`]; no game rule lives in this module.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, window};

use crate::config::EngineConfig;
use crate::engine::GameEngine;
use crate::entities::{BombHighlight, CoinKind};
use crate::render::{Frame, Renderer};
use crate::store::GameStatus;

const CANVAS_ID: &str = "bd-canvas";
const HUD_STYLE: &str = "position:fixed; top:10px; font-family:'Fira Code', monospace; font-size:15px; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; z-index:45; letter-spacing:0.5px;";
/// Simulation steps allowed per animation frame after a stall.
const MAX_STEPS_PER_FRAME: u32 = 5;

// --- Logging -----------------------------------------------------------------

struct ConsoleLogger;

static LOGGER: ConsoleLogger = ConsoleLogger;

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            log::Level::Error => web_sys::console::error_1(&line),
            log::Level::Warn => web_sys::console::warn_1(&line),
            _ => web_sys::console::log_1(&line),
        }
    }

    fn flush(&self) {}
}

/// Route `log` records to the browser console. Safe to call twice.
pub(crate) fn init_logging() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Info);
    }
}

// --- Canvas renderer -----------------------------------------------------------

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    document: Document,
    width: f64,
    height: f64,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement, document: Document) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        ctx.set_text_align("center");
        Ok(Self {
            ctx,
            document,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    fn draw_background(&self, color: &str) {
        let grad = self.ctx.create_linear_gradient(0.0, 0.0, 0.0, self.height);
        if grad.add_color_stop(0.0, color).is_ok() && grad.add_color_stop(1.0, "#000000").is_ok() {
            self.ctx.set_fill_style_canvas_gradient(&grad);
        } else {
            self.ctx.set_fill_style_str(color);
        }
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
    }

    fn draw_world(&self, frame: &Frame<'_>) {
        self.ctx.set_fill_style_str("#64748B");
        for p in frame.platforms {
            self.ctx.fill_rect(p.x, p.y, p.width, p.height);
        }

        self.ctx.set_font("11px 'Fira Code', monospace");
        for (bomb, hl) in frame.bombs.iter().zip(frame.highlights) {
            if bomb.collected {
                continue;
            }
            self.ctx.set_fill_style_str(bomb_color(hl));
            self.ctx.fill_rect(bomb.x, bomb.y, bomb.width, bomb.height);
            self.ctx.set_fill_style_str("#ffffff");
            self.ctx
                .fill_text(&bomb.order.to_string(), bomb.x + bomb.width / 2.0, bomb.y + bomb.height / 2.0 + 4.0)
                .ok();
        }

        for m in frame.monsters {
            self.ctx.set_fill_style_str(m.color);
            self.ctx.fill_rect(m.x, m.y, m.width, m.height);
        }

        self.ctx.set_font("bold 14px 'Fira Code', monospace");
        for c in frame.coins.iter().filter(|c| !c.collected) {
            let (cx, cy) = c.rect().center();
            self.ctx.set_fill_style_str(c.color);
            self.ctx.begin_path();
            self.ctx.arc(cx, cy, c.width / 2.0, 0.0, std::f64::consts::TAU).ok();
            self.ctx.fill();
            self.ctx.set_fill_style_str(if c.kind == CoinKind::B { "#000000" } else { "#ffffff" });
            self.ctx.fill_text(c.kind.label(), cx, cy + 5.0).ok();
        }

        let p = frame.player;
        let color = if frame.state.power_mode_active { "#FDE047" } else { p.color.as_str() };
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(p.x, p.y, p.width, p.height);
    }

    fn draw_status(&self, frame: &Frame<'_>) {
        let s = frame.state;
        let (title, sub) = match s.status {
            GameStatus::Playing => return,
            GameStatus::Menu => (frame.map.name.clone(), "Press Enter to start".to_string()),
            GameStatus::Countdown => ("Get ready".to_string(), frame.map.name.clone()),
            GameStatus::Paused => ("Paused".to_string(), "P to resume".to_string()),
            GameStatus::BonusScreen => (
                "Level complete".to_string(),
                format!("Bonus +{}  Score {}", s.last_bonus, s.score),
            ),
            GameStatus::GameOver if s.game_completed => {
                ("You win!".to_string(), format!("Final score {}  Enter to play again", s.score))
            }
            GameStatus::GameOver => ("GAME OVER".to_string(), "Enter to try again".to_string()),
        };
        let cx = self.width / 2.0;
        let cy = self.height / 2.0;
        self.ctx.set_fill_style_str("rgba(0,0,0,0.55)");
        self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
        self.ctx.set_fill_style_str("#ffffff");
        self.ctx.set_font("48px 'Fira Code', monospace");
        self.ctx.fill_text(&title, cx, cy).ok();
        self.ctx.set_font("20px 'Fira Code', monospace");
        self.ctx.fill_text(&sub, cx, cy + 40.0).ok();
    }

    fn update_hud(&self, frame: &Frame<'_>) {
        let s = frame.state;
        if let Some(el) = self.document.get_element_by_id("bd-score") {
            el.set_text_content(Some(&format!("Score: {}", s.score)));
        }
        if let Some(el) = self.document.get_element_by_id("bd-lives") {
            el.set_text_content(Some(&format!("Lives: {}", s.lives)));
        }
        if let Some(el) = self.document.get_element_by_id("bd-multiplier") {
            let text = if s.power_mode_active {
                format!("x{}  POWER {:.1}s", s.multiplier, s.power_mode_remaining_ms / 1000.0)
            } else {
                format!("x{}", s.multiplier)
            };
            el.set_text_content(Some(&text));
        }
    }
}

fn bomb_color(hl: &BombHighlight) -> &'static str {
    match (hl.is_correct_next, hl.is_in_active_group) {
        (true, _) => "#FACC15",
        (false, true) => "#F97316",
        (false, false) => "#DC2626",
    }
}

impl Renderer for CanvasRenderer {
    fn render(&mut self, frame: &Frame<'_>) {
        self.draw_background(&frame.map.background_color);
        self.draw_world(frame);
        self.draw_status(frame);
        self.update_hud(frame);
    }
}

// --- Bootstrapping -------------------------------------------------------------

struct WebGame {
    engine: GameEngine,
    renderer: CanvasRenderer,
    last_ts: Option<f64>,
    acc_ms: f64,
}

thread_local! {
    static GAME: RefCell<Option<WebGame>> = const { RefCell::new(None) };
}

fn ensure_hud(doc: &Document) -> Result<(), JsValue> {
    let Some(body) = doc.body() else {
        return Ok(());
    };
    for (id, left, color) in [
        ("bd-score", 12, "#ffd166"),
        ("bd-lives", 170, "#ff4d4d"),
        ("bd-multiplier", 290, "#7dd3fc"),
    ] {
        if doc.get_element_by_id(id).is_some() {
            continue;
        }
        let div = doc.create_element("div")?;
        div.set_id(id);
        div.set_attribute("style", &format!("{HUD_STYLE} left:{left}px; color:{color};")).ok();
        body.append_child(&div)?;
    }
    Ok(())
}

fn canvas(doc: &Document, width: u32, height: u32) -> Result<HtmlCanvasElement, JsValue> {
    if let Some(el) = doc.get_element_by_id(CANVAS_ID) {
        return el.dyn_into().map_err(JsValue::from);
    }
    let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
    c.set_id(CANVAS_ID);
    c.set_width(width);
    c.set_height(height);
    c.set_attribute(
        "style",
        "position:fixed; left:50%; top:50%; transform:translate(-50%,-50%); border:2px solid #222; border-radius:8px; z-index:20;",
    )
    .ok();
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    body.append_child(&c)?;
    Ok(c)
}

fn seeded_config() -> EngineConfig {
    #[allow(unused_mut)]
    let mut config = EngineConfig::default();
    #[cfg(feature = "rng")]
    {
        let mut buf = [0u8; 8];
        match getrandom::getrandom(&mut buf) {
            Ok(()) => config.seed = u64::from_le_bytes(buf),
            Err(e) => log::warn!("browser entropy unavailable, using fixed seed: {e}"),
        }
    }
    config
}

/// Mount the game onto the page and start the animation loop.
pub fn start(playground: bool) -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win.document().ok_or_else(|| JsValue::from_str("no document"))?;

    let config = seeded_config();
    let canvas = canvas(&doc, config.canvas_width as u32, config.canvas_height as u32)?;
    let renderer = CanvasRenderer::new(&canvas, doc.clone())?;
    ensure_hud(&doc)?;

    let mut engine = GameEngine::with_defaults(config);
    if playground {
        engine.load_playground();
    }
    let already_running = GAME.with(|g| g.borrow().is_some());
    GAME.with(|g| {
        g.replace(Some(WebGame {
            engine,
            renderer,
            last_ts: None,
            acc_ms: 0.0,
        }))
    });
    if already_running {
        return Ok(());
    }

    install_keyboard(&doc)?;
    start_loop();
    Ok(())
}

// --- Input ---------------------------------------------------------------------

fn install_keyboard(doc: &Document) -> Result<(), JsValue> {
    let down = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        GAME.with(|cell| {
            if let Some(game) = cell.borrow_mut().as_mut() {
                let code = evt.code();
                if game.engine.input_mut().apply_key(&code, true) {
                    evt.prevent_default();
                    return;
                }
                match code.as_str() {
                    "Enter" => game.engine.start(),
                    "KeyP" | "Escape" => game.engine.toggle_pause(),
                    "KeyR" => game.engine.reset(),
                    _ => {}
                }
            }
        });
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keydown", down.as_ref().unchecked_ref())?;
    down.forget();

    let up = Closure::wrap(Box::new(move |evt: web_sys::KeyboardEvent| {
        GAME.with(|cell| {
            if let Some(game) = cell.borrow_mut().as_mut() {
                if game.engine.input_mut().apply_key(&evt.code(), false) {
                    evt.prevent_default();
                }
            }
        });
    }) as Box<dyn FnMut(_)>);
    doc.add_event_listener_with_callback("keyup", up.as_ref().unchecked_ref())?;
    up.forget();
    Ok(())
}

// --- Frame loop ----------------------------------------------------------------

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn request_frame(cb: &FrameCallback) {
    if let (Some(w), Some(f)) = (window(), cb.borrow().as_ref()) {
        let _ = w.request_animation_frame(f.as_ref().unchecked_ref());
    }
}

fn frame(game: &mut WebGame, ts: f64) {
    let tick = game.engine.config().tick_ms;
    let elapsed = game.last_ts.map_or(tick, |last| ts - last);
    game.last_ts = Some(ts);
    game.acc_ms = (game.acc_ms + elapsed).min(tick * MAX_STEPS_PER_FRAME as f64);
    while game.acc_ms >= tick {
        game.engine.update();
        game.acc_ms -= tick;
    }
    game.engine.render(&mut game.renderer);
}

fn start_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        GAME.with(|cell| {
            if let Some(game) = cell.borrow_mut().as_mut() {
                frame(game, ts);
            }
        });
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}
