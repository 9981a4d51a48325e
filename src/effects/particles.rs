//! Soft glowing dots drifting up through the hero.

use std::cell::RefCell;
use std::f64::consts::TAU;
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_render::{request_animation_frame, AnimationFrame};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::config::SiteConfig;
use crate::dom::{self, anchors, Bindings};
use crate::error::{SiteError, SiteResult};
use crate::observer::{ViewportWatcher, Watch, WatchOptions};

#[cfg(test)]
#[path = "particles_test.rs"]
mod particles_test;

/// How far past an edge a particle travels before it is recycled.
pub const EDGE_MARGIN: f64 = 10.0;
const PULSE_STEP: f64 = 0.02;

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed_x: f64,
    pub speed_y: f64,
    pub opacity: f64,
    pub pulse: f64,
}

impl Particle {
    fn spawn<R: Rng>(rng: &mut R, width: f64, height: f64) -> Self {
        Self {
            x: rng.gen::<f64>() * width,
            y: rng.gen::<f64>() * height,
            size: rng.gen::<f64>() * 2.0 + 0.5,
            speed_y: -(rng.gen::<f64>() * 0.3 + 0.1),
            speed_x: (rng.gen::<f64>() - 0.5) * 0.2,
            opacity: rng.gen::<f64>() * 0.5 + 0.1,
            pulse: rng.gen::<f64>() * TAU,
        }
    }

    /// Current opacity, breathing between 40% and 100% of the base.
    pub fn alpha(&self) -> f64 {
        self.opacity * (0.7 + 0.3 * self.pulse.sin())
    }
}

/// A fixed pool of particles. Particles are recycled, never added or
/// removed.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    width: f64,
    height: f64,
}

impl ParticleField {
    pub fn new<R: Rng>(count: usize, width: f64, height: f64, rng: &mut R) -> Self {
        let particles = (0..count)
            .map(|_| Particle::spawn(rng, width, height))
            .collect();
        Self {
            particles,
            width,
            height,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Advances every particle by one frame. Particles that float off the
    /// top come back in below the bottom edge at a random x.
    pub fn step<R: Rng>(&mut self, rng: &mut R) {
        for p in &mut self.particles {
            p.y += p.speed_y;
            p.x += p.speed_x;
            p.pulse += PULSE_STEP;
            if p.y < -EDGE_MARGIN {
                p.y = self.height + EDGE_MARGIN;
                p.x = rng.gen::<f64>() * self.width;
            }
        }
    }
}

struct ParticleCanvas {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    field: RefCell<ParticleField>,
    rng: RefCell<SmallRng>,
    frame: RefCell<Option<AnimationFrame>>,
}

/// Matches the canvas backing store to its laid-out size.
fn fit_canvas(canvas: &HtmlCanvasElement) -> (f64, f64) {
    let width = canvas.offset_width().max(0) as u32;
    let height = canvas.offset_height().max(0) as u32;
    canvas.set_width(width);
    canvas.set_height(height);
    (f64::from(width), f64::from(height))
}

impl ParticleCanvas {
    fn fit(&self) {
        let (width, height) = fit_canvas(&self.canvas);
        self.field.borrow_mut().resize(width, height);
    }

    fn is_running(&self) -> bool {
        self.frame.borrow().is_some()
    }

    fn start(self: &Rc<Self>) {
        if self.is_running() {
            return;
        }
        log::debug!("Hero particles running ({})", self.field.borrow().len());
        self.schedule();
    }

    fn stop(&self) {
        if self.frame.borrow_mut().take().is_some() {
            log::debug!("Hero particles paused");
        }
    }

    fn schedule(self: &Rc<Self>) {
        let this = Rc::clone(self);
        let handle = request_animation_frame(move |_| {
            this.draw();
            this.schedule();
        });
        *self.frame.borrow_mut() = Some(handle);
    }

    fn draw(&self) {
        let width = f64::from(self.canvas.width());
        let height = f64::from(self.canvas.height());
        let mut field = self.field.borrow_mut();
        field.step(&mut *self.rng.borrow_mut());

        self.ctx.clear_rect(0.0, 0.0, width, height);
        for p in field.particles() {
            self.ctx.begin_path();
            if self.ctx.arc(p.x, p.y, p.size, 0.0, TAU).is_err() {
                continue;
            }
            self.ctx
                .set_fill_style_str(&format!("rgba(143, 208, 255, {})", p.alpha()));
            self.ctx.fill();
        }
    }
}

fn seed() -> u64 {
    (web_sys::js_sys::Math::random() * u64::MAX as f64) as u64
}

pub fn attach(document: &Document, config: &SiteConfig) -> SiteResult<Bindings> {
    let canvas = document
        .get_element_by_id(anchors::HERO_PARTICLES)
        .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        .ok_or(SiteError::MissingAnchor(anchors::HERO_PARTICLES))?;
    let mut bindings = Bindings::default();
    if dom::prefers_reduced_motion() {
        return Ok(bindings);
    }
    let hero = dom::query(document, anchors::HERO)?;
    let ctx = canvas
        .get_context("2d")?
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
        .ok_or(SiteError::Unsupported("2d canvas"))?;

    let (width, height) = fit_canvas(&canvas);
    let mut rng = SmallRng::seed_from_u64(seed());
    let field = ParticleField::new(config.particle_count, width, height, &mut rng);
    let particles = Rc::new(ParticleCanvas {
        canvas,
        ctx,
        field: RefCell::new(field),
        rng: RefCell::new(rng),
        frame: RefCell::new(None),
    });

    let window = dom::window()?;
    let on_resize = Rc::clone(&particles);
    bindings.listen(EventListener::new(&window, "resize", move |_| on_resize.fit()));

    let options = WatchOptions::threshold(config.particle_threshold);
    let watcher = ViewportWatcher::new(&options, move |sighting| {
        if sighting.visible {
            particles.start();
        } else {
            particles.stop();
        }
        Watch::Continue
    })?;
    watcher.observe(&hero);
    bindings.watch(watcher);
    Ok(bindings)
}
