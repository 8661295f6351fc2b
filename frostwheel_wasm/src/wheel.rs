use std::f64::consts::PI;

use frostwheel_core::geometry::{layout, to_screen_radians};
use frostwheel_core::Catalog;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct WheelCanvasProps {
    pub catalog: Catalog,
    pub rotation: f64,
    pub spinning: bool,
    pub size: f64,
}

#[function_component(WheelCanvas)]
pub fn wheel_canvas(props: &WheelCanvasProps) -> Html {
    let node_ref = use_node_ref();
    {
        let node_ref = node_ref.clone();
        let catalog = props.catalog.clone();
        use_effect_with(
            (props.rotation, props.spinning, props.size),
            move |(rotation, spinning, size)| {
                if let Some(ctx) = node_ref
                    .cast::<HtmlCanvasElement>()
                    .and_then(|canvas| context_2d(&canvas))
                {
                    if let Err(err) = draw_wheel(&ctx, &catalog, *rotation, *spinning, *size) {
                        log::warn!("wheel draw failed: {err:?}");
                    }
                }
            },
        );
    }

    let size = props.size.to_string();
    html! { <canvas ref={node_ref} width={size.clone()} height={size}></canvas> }
}

fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
}

fn draw_wheel(
    ctx: &CanvasRenderingContext2d,
    catalog: &Catalog,
    rotation: f64,
    spinning: bool,
    size: f64,
) -> Result<(), JsValue> {
    let center = size / 2.0;
    let radius = center - 12.0;
    ctx.clear_rect(0.0, 0.0, size, size);

    // Rim glow, brighter while spinning
    ctx.begin_path();
    ctx.set_fill_style(&JsValue::from_str(if spinning {
        "rgba(56, 189, 248, 0.35)"
    } else {
        "rgba(14, 165, 233, 0.15)"
    }));
    ctx.arc(center, center, radius + 10.0, 0.0, 2.0 * PI)?;
    ctx.fill();

    ctx.save();
    ctx.translate(center, center)?;
    ctx.rotate(rotation.to_radians())?;

    for (slice, prize) in layout(catalog.len()).iter().zip(catalog.prizes()) {
        ctx.begin_path();
        ctx.move_to(0.0, 0.0);
        ctx.arc(
            0.0,
            0.0,
            radius,
            to_screen_radians(slice.start_angle),
            to_screen_radians(slice.end_angle),
        )?;
        ctx.close_path();
        ctx.set_fill_style(&JsValue::from_str(&prize.color));
        ctx.fill();
        ctx.set_stroke_style(&JsValue::from_str("#0f172a"));
        ctx.set_line_width(1.0);
        ctx.stroke();

        ctx.save();
        ctx.rotate(slice.center_angle.to_radians())?;
        ctx.set_text_align("center");
        ctx.set_fill_style(&JsValue::from_str("#0c4a6e"));
        ctx.set_font("900 14px sans-serif");
        ctx.fill_text(&prize.label.to_uppercase(), 0.0, -radius + 40.0)?;
        ctx.set_font("36px sans-serif");
        ctx.fill_text(&prize.icon, 0.0, -radius + 85.0)?;
        ctx.restore();
    }

    // Hub
    ctx.begin_path();
    ctx.set_fill_style(&JsValue::from_str("#f8fafc"));
    ctx.arc(0.0, 0.0, 38.0, 0.0, 2.0 * PI)?;
    ctx.fill();
    ctx.restore();

    // Pointer stays put at 12 o'clock
    ctx.begin_path();
    ctx.set_fill_style(&JsValue::from_str("#ffffff"));
    ctx.move_to(center - 16.0, 0.0);
    ctx.line_to(center + 16.0, 0.0);
    ctx.line_to(center, 36.0);
    ctx.close_path();
    ctx.fill();
    ctx.set_stroke_style(&JsValue::from_str("#38bdf8"));
    ctx.set_line_width(2.0);
    ctx.stroke();
    Ok(())
}
