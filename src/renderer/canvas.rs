//! HTML canvas 2D renderer
//!
//! Also keeps the score / high score text and the start button state in
//! sync with the board.

use std::f64::consts::PI;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Element, HtmlButtonElement, HtmlCanvasElement};

use super::{Frame, RenderSink};
use crate::sim::GamePhase;

const HEAD_COLOR: &str = "#2E8B57";
const BODY_COLOR: &str = "#3CB371";
const BORDER_COLOR: &str = "#1E5631";
const FOOD_COLOR: &str = "#FF6347";
const OVERLAY_COLOR: &str = "rgba(0, 0, 0, 0.7)";

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    score_el: Option<Element>,
    high_score_el: Option<Element>,
    start_btn: Option<HtmlButtonElement>,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let start_btn = document
            .get_element_by_id("startBtn")
            .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());

        Ok(Self {
            score_el: document.get_element_by_id("score"),
            high_score_el: document.get_element_by_id("highScore"),
            start_btn,
            canvas,
            ctx,
        })
    }

    fn draw_board(&self, frame: &Frame<'_>) {
        let cell = frame.cell_size as f64;
        let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
        self.ctx.clear_rect(0.0, 0.0, w, h);

        for (i, segment) in frame.snake.iter().enumerate() {
            let (x, y) = (segment.x as f64, segment.y as f64);
            self.ctx
                .set_fill_style_str(if i == 0 { HEAD_COLOR } else { BODY_COLOR });
            self.ctx.fill_rect(x, y, cell, cell);
            self.ctx.set_stroke_style_str(BORDER_COLOR);
            self.ctx.stroke_rect(x, y, cell, cell);
        }

        let Some(food) = frame.food else {
            return;
        };
        self.ctx.set_fill_style_str(FOOD_COLOR);
        self.ctx.begin_path();
        self.ctx
            .arc(
                food.x as f64 + cell / 2.0,
                food.y as f64 + cell / 2.0,
                cell / 2.0,
                0.0,
                PI * 2.0,
            )
            .ok();
        self.ctx.fill();
    }

    fn update_hud(&self, frame: &Frame<'_>) {
        if let Some(el) = &self.score_el {
            el.set_text_content(Some(&frame.score.to_string()));
        }
        if let Some(el) = &self.high_score_el {
            el.set_text_content(Some(&frame.high_score.to_string()));
        }
        if let Some(btn) = &self.start_btn {
            btn.set_disabled(frame.phase == GamePhase::Running);
        }
    }
}

impl RenderSink for CanvasRenderer {
    fn draw(&mut self, frame: &Frame<'_>) {
        self.draw_board(frame);
        self.update_hud(frame);
    }

    fn draw_game_over(&mut self, frame: &Frame<'_>) {
        self.draw_board(frame);
        self.update_hud(frame);

        let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
        self.ctx.set_fill_style_str(OVERLAY_COLOR);
        self.ctx.fill_rect(0.0, 0.0, w, h);

        self.ctx.set_fill_style_str("white");
        self.ctx.set_text_align("center");
        self.ctx.set_font("30px Arial");
        self.ctx.fill_text("Game Over!", w / 2.0, h / 2.0 - 20.0).ok();
        self.ctx.set_font("20px Arial");
        self.ctx
            .fill_text(&format!("Score: {}", frame.score), w / 2.0, h / 2.0 + 20.0)
            .ok();
    }
}
