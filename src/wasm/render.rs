use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement};

use super::dom;
use crate::particles::{glow_style, Particle, ParticleField, Viewport, GLOW_BLUR};

/// Start the particle backdrop on `canvas`: fit it to the window, follow
/// resizes and redraw on every animation frame.
pub fn start(canvas: HtmlCanvasElement) -> Result<(), JsValue> {
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or("2D canvas not supported")?
        .dyn_into()?;

    let viewport = fit(&canvas, dom::viewport(&dom::window()?)?);
    let field = Rc::new(RefCell::new(ParticleField::new(
        &mut rand::thread_rng(),
        viewport,
    )));

    // Resize canvas to fit window; particles keep their positions.
    let resize_closure = {
        let canvas = canvas.clone();
        let field = Rc::clone(&field);
        Closure::wrap(Box::new(move || {
            let Some(win) = window() else { return };
            match dom::viewport(&win) {
                Ok(size) => field.borrow_mut().resize(fit(&canvas, size)),
                Err(err) => dom::warn(&format!("resize ignored: {err:?}")),
            }
        }) as Box<dyn FnMut()>)
    };
    dom::window()?
        .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref())?;
    resize_closure.forget();

    // Animation loop
    // `f` holds the animation-frame closure so that we can keep calling
    // `request_animation_frame` recursively. Storing it inside an `Option`
    // allows us to create the `Closure` first and then obtain a reference to
    // it from within itself.
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();
    let glow = glow_style();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let now = js_sys::Date::now();
        ctx.clear_rect(
            0.0,
            0.0,
            f64::from(canvas.width()),
            f64::from(canvas.height()),
        );

        let mut field = field.borrow_mut();
        field.advance(now);
        for particle in field.particles() {
            draw(&ctx, particle, &glow);
        }

        // schedule next
        if let (Some(win), Some(next)) = (window(), f.borrow().as_ref()) {
            if let Err(err) = win.request_animation_frame(next.as_ref().unchecked_ref()) {
                dom::warn(&format!("animation stopped: {err:?}"));
            }
        }
    }) as Box<dyn FnMut()>));

    dom::window()?.request_animation_frame(
        g.borrow()
            .as_ref()
            .ok_or("animation closure missing")?
            .as_ref()
            .unchecked_ref(),
    )?;

    Ok(())
}

/// Size the canvas to `size` and return the drawable area it ended up with.
fn fit(canvas: &HtmlCanvasElement, size: Viewport) -> Viewport {
    canvas.set_width(size.width as u32);
    canvas.set_height(size.height as u32);
    Viewport::new(f64::from(canvas.width()), f64::from(canvas.height()))
}

fn draw(ctx: &CanvasRenderingContext2d, particle: &Particle, glow: &str) {
    ctx.begin_path();
    if ctx
        .arc(particle.x, particle.y, particle.size, 0.0, TAU)
        .is_err()
    {
        return;
    }
    ctx.set_fill_style_str(&particle.fill_style());
    ctx.set_shadow_blur(GLOW_BLUR);
    ctx.set_shadow_color(glow);
    ctx.fill();
}
