use std::f64::consts::PI;

use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use rust_decimal::prelude::ToPrimitive;
use shared::pivot::DonutSlice;
use shared::MoneyMask;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use super::color_at;

const SIZE: u32 = 320;
const OUTER_RADIUS: f64 = 140.0;
const INNER_RADIUS: f64 = 80.0;
const ARC_STEPS: usize = 90;

#[derive(Properties, PartialEq)]
pub struct DonutChartProps {
    pub title: AttrValue,
    pub slices: Vec<DonutSlice>,
}

/// Share of each label in the total, drawn as a ring.
pub struct DonutChart {
    canvas_ref: NodeRef,
}

impl Component for DonutChart {
    type Message = ();
    type Properties = DonutChartProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        self.draw_chart(&ctx.props().slices);
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let mask = MoneyMask::new();
        let total: rust_decimal::Decimal = props.slices.iter().map(|s| s.value).sum();

        html! {
            <div class="chart-container donut">
                <h3 class="chart-title">{&props.title}</h3>
                {if total.is_zero() {
                    html! { <div class="chart-empty"><p>{"Sin datos para graficar"}</p></div> }
                } else {
                    html! {
                        <>
                            <canvas
                                ref={self.canvas_ref.clone()}
                                class="chart-canvas"
                                width={SIZE.to_string()}
                                height={SIZE.to_string()}
                            ></canvas>
                            <ul class="chart-legend">
                                {for props.slices.iter().enumerate().map(|(i, s)| {
                                    let RGBColor(r, g, b) = color_at(i);
                                    html! {
                                        <li>
                                            <span class="swatch" style={format!("background: rgb({}, {}, {})", r, g, b)}></span>
                                            {format!("{}: {}", s.label, mask.format_currency(s.value))}
                                        </li>
                                    }
                                })}
                            </ul>
                        </>
                    }
                }}
            </div>
        }
    }
}

impl DonutChart {
    fn draw_chart(&self, slices: &[DonutSlice]) {
        let canvas = match self.canvas_ref.cast::<HtmlCanvasElement>() {
            Some(canvas) => canvas,
            None => return,
        };

        let backend = match CanvasBackend::with_canvas_object(canvas) {
            Some(backend) => backend,
            None => return,
        };

        let root = backend.into_drawing_area();
        if root.fill(&WHITE).is_err() {
            return;
        }

        let values: Vec<f64> = slices
            .iter()
            .map(|s| s.value.to_f64().unwrap_or(0.0).max(0.0))
            .collect();
        let total: f64 = values.iter().sum();
        if total <= 0.0 {
            return;
        }

        let center = (SIZE as f64 / 2.0, SIZE as f64 / 2.0);
        let mut start = -PI / 2.0;
        for (i, value) in values.iter().enumerate() {
            if *value <= 0.0 {
                continue;
            }
            let sweep = value / total * 2.0 * PI;
            let ring = ring_segment(center, start, start + sweep);
            if root.draw(&Polygon::new(ring, color_at(i).filled())).is_err() {
                return;
            }
            start += sweep;
        }

        let _ = root.present();
    }
}

/// Outline of one ring slice: outer arc forward, inner arc back.
fn ring_segment(center: (f64, f64), from: f64, to: f64) -> Vec<(i32, i32)> {
    let steps = ((to - from) / (2.0 * PI) * ARC_STEPS as f64).ceil().max(1.0) as usize;
    let point = |radius: f64, angle: f64| {
        (
            (center.0 + radius * angle.cos()).round() as i32,
            (center.1 + radius * angle.sin()).round() as i32,
        )
    };

    let outer = (0..=steps).map(|k| point(OUTER_RADIUS, from + (to - from) * k as f64 / steps as f64));
    let inner = (0..=steps)
        .rev()
        .map(|k| point(INNER_RADIUS, from + (to - from) * k as f64 / steps as f64));
    outer.chain(inner).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_ring_closes_on_itself() {
        let ring = ring_segment((160.0, 160.0), -PI / 2.0, 3.0 * PI / 2.0);
        let first = ring[0];
        let last_outer = ring[ring.len() / 2 - 1];
        assert_eq!(first, last_outer);
        assert_eq!(first, (160, 20));
    }

    #[test]
    fn test_quarter_has_both_arcs() {
        let ring = ring_segment((0.0, 0.0), 0.0, PI / 2.0);
        assert_eq!(ring.len() % 2, 0);
        assert_eq!(ring[0], (140, 0));
        assert_eq!(*ring.last().unwrap(), (80, 0));
    }
}
