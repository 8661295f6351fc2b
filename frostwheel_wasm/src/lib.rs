use std::cell::RefCell;
use std::rc::Rc;

use frostwheel_core::{Catalog, Engine, Prize, WheelConfig, WinRecord};
use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use yew::prelude::*;

mod feedback;
mod panels;
mod wheel;

use feedback::WebFeedback;
use panels::{banner_text, HistoryList, ResultModal};
use wheel::WheelCanvas;

type SharedEngine = Rc<RefCell<Engine>>;
type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn performance_now() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_default()
}

fn request_animation_frame(callback: &Closure<dyn FnMut(f64)>) {
    if let Some(window) = web_sys::window() {
        if let Err(err) = window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {err:?}");
        }
    }
}

/// Drives `Engine::frame` from requestAnimationFrame until the engine asks to
/// stop. The closure owns itself through `handle` and drops it on the last frame.
fn start_frame_loop(
    engine: SharedEngine,
    feedback: Rc<RefCell<WebFeedback>>,
    rotation: UseStateHandle<f64>,
) {
    let handle: FrameCallback = Rc::new(RefCell::new(None));
    let next = handle.clone();

    *handle.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
        let update = engine
            .borrow_mut()
            .frame(timestamp, &mut *feedback.borrow_mut());
        match update {
            Some(update) if update.reschedule => {
                rotation.set(update.rotation);
                if let Some(callback) = next.borrow().as_ref() {
                    request_animation_frame(callback);
                }
            }
            Some(update) => {
                rotation.set(update.rotation);
                let _ = next.borrow_mut().take();
            }
            None => {
                let _ = next.borrow_mut().take();
            }
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(callback) = handle.borrow().as_ref() {
        request_animation_frame(callback);
    };
}

#[function_component(App)]
fn app() -> Html {
    let engine = use_mut_ref(|| Engine::with_random(Catalog::winter(), WheelConfig::default()));
    let feedback = use_mut_ref(WebFeedback::default);
    let timer = use_mut_ref(|| None as Option<Timeout>);

    let rotation = use_state(|| 0.0_f64);
    let spinning = use_state(|| false);
    let selected = use_state(|| None as Option<Prize>);
    let show_result = use_state(|| false);
    let history = use_state(Vec::<WinRecord>::new);

    let on_spin = {
        let engine = engine.clone();
        let feedback = feedback.clone();
        let timer = timer.clone();
        let rotation = rotation.clone();
        let spinning = spinning.clone();
        let selected = selected.clone();
        let show_result = show_result.clone();
        let history = history.clone();
        Callback::from(move |_: MouseEvent| {
            feedback.borrow_mut().unlock();
            let plan = engine
                .borrow_mut()
                .trigger(performance_now(), &mut *feedback.borrow_mut());
            let Some(plan) = plan else {
                return;
            };
            log::debug!("spin towards slice {}", plan.winning_index);

            spinning.set(true);
            selected.set(None);
            show_result.set(false);
            start_frame_loop(engine.clone(), feedback.clone(), rotation.clone());

            let resolve_after = engine.borrow().config().resolve_after_ms();
            let engine = engine.clone();
            let feedback = feedback.clone();
            let rotation = rotation.clone();
            let spinning = spinning.clone();
            let selected = selected.clone();
            let show_result = show_result.clone();
            let history = history.clone();
            *timer.borrow_mut() = Some(Timeout::new(resolve_after, move || {
                let mut engine = engine.borrow_mut();
                if let Some(record) = engine.resolve(performance_now(), &mut *feedback.borrow_mut())
                {
                    rotation.set(engine.visual_rotation());
                    selected.set(Some(record.prize));
                    history.set(engine.history().records().to_vec());
                    show_result.set(true);
                }
                spinning.set(false);
            }));
        })
    };

    let on_close = {
        let show_result = show_result.clone();
        Callback::from(move |_: MouseEvent| show_result.set(false))
    };

    let catalog = engine.borrow().catalog().clone();
    let size = engine.borrow().config().wheel_size;
    let banner = match banner_text((*selected).as_ref(), *spinning, *show_result) {
        Some(text) => html! { <div class="banner">{ text }</div> },
        None => html! {},
    };

    html! {
        <main class="frost-wheel">
            <h1>{"Frost Wheel"}</h1>
            { banner }
            <WheelCanvas catalog={catalog} rotation={*rotation} spinning={*spinning} size={size} />
            <button class="spin" onclick={on_spin} disabled={*spinning}>
                { if *spinning { "SPINNING..." } else { "SPIN THE FROST" } }
            </button>
            <HistoryList records={(*history).clone()} />
            <ResultModal prize={(*selected).clone()} open={*show_result} on_close={on_close} />
        </main>
    }
}

#[wasm_bindgen(start)]
pub fn run() {
    console_error_panic_hook::set_once();
    wasm_logger::init(wasm_logger::Config::default());
    yew::Renderer::<App>::new().render();
}
