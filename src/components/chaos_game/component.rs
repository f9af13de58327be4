use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{error, warn};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent, Window};

use super::controls::{DEFAULT_ITERATIONS, DEFAULT_RADIUS, StartParams};
use super::render::CanvasRenderer;
use super::state::{ChaosSession, Schedule, SessionEvent};
use super::types::Viewport;

struct Host {
	session: ChaosSession,
	renderer: CanvasRenderer,
}

type SharedHost = Rc<RefCell<Option<Host>>>;
type SharedCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

fn window_size(window: &Window) -> Option<Viewport> {
	let width = window.inner_width().ok()?.as_f64()?;
	let height = window.inner_height().ok()?.as_f64()?;
	Some(Viewport::new(width, height))
}

fn request_frame(frame: &SharedCallback) {
	let Some(window) = web_sys::window() else {
		return;
	};
	if let Some(ref cb) = *frame.borrow() {
		let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
	}
}

fn dispatch(host: &SharedHost, frame: &SharedCallback, event: SessionEvent) {
	let schedule = match host.borrow_mut().as_mut() {
		Some(h) => h.session.handle(event, &mut h.renderer),
		None => return,
	};
	if schedule == Schedule::NextFrame {
		request_frame(frame);
	}
}

fn canvas_point(canvas: Option<HtmlCanvasElement>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let rect = canvas?.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Full-window chaos game canvas with its start/stop/reset overlay.
#[component]
pub fn ChaosGameCanvas(
	/// Initial value of the iterations input.
	#[prop(default = DEFAULT_ITERATIONS)]
	default_iterations: u32,
	/// Initial value of the radius input.
	#[prop(default = DEFAULT_RADIUS)]
	default_radius: f64,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let host: SharedHost = Rc::new(RefCell::new(None));
	let frame: SharedCallback = Rc::new(RefCell::new(None));
	let resize_cb: SharedCallback = Rc::new(RefCell::new(None));
	let (host_init, frame_init, resize_cb_init) = (host.clone(), frame.clone(), resize_cb.clone());

	let (iterations_text, set_iterations_text) = signal(default_iterations.to_string());
	let (radius_text, set_radius_text) = signal(default_radius.to_string());

	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let Some(window) = web_sys::window() else {
			error!("no window available, canvas left blank");
			return;
		};
		let Some(viewport) = window_size(&window) else {
			error!("could not read window size");
			return;
		};
		canvas.set_width(viewport.width as u32);
		canvas.set_height(viewport.height as u32);

		let Some(ctx) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			error!("2d canvas context unavailable");
			return;
		};

		let seed = (js_sys::Math::random() * u64::MAX as f64) as u64;
		let session = ChaosSession::new(viewport, seed);
		let mut renderer = CanvasRenderer::new(ctx);
		session.redraw(&mut renderer);
		*host_init.borrow_mut() = Some(Host { session, renderer });

		let (host_resize, frame_resize, canvas_resize) =
			(host_init.clone(), frame_init.clone(), canvas.clone());
		*resize_cb_init.borrow_mut() = Some(Closure::new(move || {
			let Some(viewport) = web_sys::window().as_ref().and_then(window_size) else {
				return;
			};
			canvas_resize.set_width(viewport.width as u32);
			canvas_resize.set_height(viewport.height as u32);
			dispatch(
				&host_resize,
				&frame_resize,
				SessionEvent::Resize {
					width: viewport.width,
					height: viewport.height,
				},
			);
		}));
		if let Some(ref cb) = *resize_cb_init.borrow() {
			let _ = window.add_event_listener_with_callback("resize", cb.as_ref().unchecked_ref());
		}

		let (host_anim, frame_inner) = (host_init.clone(), frame_init.clone());
		*frame_init.borrow_mut() = Some(Closure::new(move || {
			let schedule = match host_anim.borrow_mut().as_mut() {
				Some(h) => h.session.advance(&mut h.renderer),
				None => Schedule::Idle,
			};
			if schedule == Schedule::NextFrame {
				request_frame(&frame_inner);
			}
		}));
	});

	let (host_md, frame_md) = (host.clone(), frame.clone());
	let on_mousedown = move |_: MouseEvent| {
		dispatch(&host_md, &frame_md, SessionEvent::PointerDown);
	};

	let (host_mm, frame_mm) = (host.clone(), frame.clone());
	let on_mousemove = move |ev: MouseEvent| {
		if let Some((x, y)) = canvas_point(canvas_ref.get(), &ev) {
			dispatch(&host_mm, &frame_mm, SessionEvent::PointerMove { x, y });
		}
	};

	let (host_mu, frame_mu) = (host.clone(), frame.clone());
	let on_mouseup = move |_: MouseEvent| {
		dispatch(&host_mu, &frame_mu, SessionEvent::PointerUp);
	};

	// Drops an active drag; mouseup outside the canvas is never delivered here.
	let (host_ml, frame_ml) = (host.clone(), frame.clone());
	let on_mouseleave = move |_: MouseEvent| {
		dispatch(&host_ml, &frame_ml, SessionEvent::PointerUp);
	};

	let (host_wh, frame_wh) = (host.clone(), frame.clone());
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		dispatch(
			&host_wh,
			&frame_wh,
			SessionEvent::Scroll {
				delta_y: ev.delta_y(),
			},
		);
	};

	let (host_start, frame_start) = (host.clone(), frame.clone());
	let on_start = move |_: MouseEvent| {
		match StartParams::parse(&iterations_text.get_untracked(), &radius_text.get_untracked()) {
			Ok(params) => dispatch(&host_start, &frame_start, SessionEvent::Start(params)),
			Err(err) => warn!("start ignored: {err}"),
		}
	};

	let (host_stop, frame_stop) = (host.clone(), frame.clone());
	let on_stop = move |_: MouseEvent| {
		dispatch(&host_stop, &frame_stop, SessionEvent::Stop);
	};

	let (host_reset, frame_reset) = (host, frame);
	let on_reset = move |_: MouseEvent| {
		dispatch(&host_reset, &frame_reset, SessionEvent::Reset);
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="chaos-game-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; background: black;"
		/>
		<div class="chaos-game-controls">
			<button id="start" on:click=on_start>"Start"</button>
			<button id="stop" on:click=on_stop>"Stop"</button>
			<button id="reset" on:click=on_reset>"Reset"</button>
			<label>
				"Iterations "
				<input
					id="iterations-input"
					type="number"
					min="1"
					prop:value=move || iterations_text.get()
					on:input=move |ev| set_iterations_text.set(event_target_value(&ev))
				/>
			</label>
			<label>
				"Radius "
				<input
					id="radius-input"
					type="number"
					step="0.5"
					prop:value=move || radius_text.get()
					on:input=move |ev| set_radius_text.set(event_target_value(&ev))
				/>
			</label>
		</div>
	}
}
