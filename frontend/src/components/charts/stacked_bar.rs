use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use rust_decimal::prelude::ToPrimitive;
use shared::pivot::ChartSeries;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use super::{color_at, short_amount};

#[derive(Properties, PartialEq)]
pub struct StackedBarChartProps {
    pub title: AttrValue,
    /// X axis labels, one per value of every series
    pub periods: Vec<String>,
    pub series: Vec<ChartSeries>,
}

/// Stacked bars: one bar per period, one segment per account.
pub struct StackedBarChart {
    canvas_ref: NodeRef,
}

impl Component for StackedBarChart {
    type Message = ();
    type Properties = StackedBarChartProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        self.draw_chart(ctx.props());
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let empty = props.series.iter().all(|s| s.values.iter().all(|v| v.is_zero()));

        html! {
            <div class="chart-container">
                <h3 class="chart-title">{&props.title}</h3>
                {if empty {
                    html! { <div class="chart-empty"><p>{"Sin datos para graficar"}</p></div> }
                } else {
                    html! {
                        <>
                            <canvas ref={self.canvas_ref.clone()} class="chart-canvas" width="720" height="340"></canvas>
                            <ul class="chart-legend">
                                {for props.series.iter().enumerate().map(|(i, s)| {
                                    let RGBColor(r, g, b) = color_at(i);
                                    html! {
                                        <li>
                                            <span class="swatch" style={format!("background: rgb({}, {}, {})", r, g, b)}></span>
                                            {&s.label}
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

impl StackedBarChart {
    fn draw_chart(&self, props: &StackedBarChartProps) {
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

        let periods = props.periods.len();
        if periods == 0 {
            return;
        }

        let values: Vec<Vec<f64>> = props
            .series
            .iter()
            .map(|s| s.values.iter().map(|v| v.to_f64().unwrap_or(0.0).max(0.0)).collect())
            .collect();

        let stack_height = (0..periods)
            .map(|p| values.iter().map(|v| v.get(p).copied().unwrap_or(0.0)).sum::<f64>())
            .fold(0.0_f64, f64::max);
        let y_max = (stack_height * 1.1).max(1.0);

        let mut chart = match ChartBuilder::on(&root)
            .margin(15)
            .x_label_area_size(35)
            .y_label_area_size(80)
            .build_cartesian_2d((0..periods as i32).into_segmented(), 0.0..y_max)
        {
            Ok(chart) => chart,
            Err(_) => return,
        };

        let period_labels = &props.periods;
        if chart
            .configure_mesh()
            .disable_x_mesh()
            .x_label_formatter(&|v| match v {
                SegmentValue::CenterOf(i) => period_labels.get(*i as usize).cloned().unwrap_or_default(),
                _ => String::new(),
            })
            .y_label_formatter(&|v| short_amount(*v))
            .label_style(("sans-serif", 12, &RGBColor(80, 80, 80)))
            .axis_style(&RGBColor(220, 220, 220))
            .bold_line_style(&RGBColor(240, 240, 240))
            .light_line_style(&RGBColor(248, 248, 248))
            .y_labels(8)
            .draw()
            .is_err()
        {
            return;
        }

        let mut base = vec![0.0_f64; periods];
        for (i, series) in values.iter().enumerate() {
            let color = color_at(i);
            let bars = (0..periods).filter_map(|p| {
                let value = series.get(p).copied().unwrap_or(0.0);
                if value <= 0.0 {
                    return None;
                }
                let bottom = base[p];
                base[p] += value;
                Some(Rectangle::new(
                    [
                        (SegmentValue::Exact(p as i32), bottom),
                        (SegmentValue::Exact(p as i32 + 1), bottom + value),
                    ],
                    color.filled(),
                ))
            });
            let bars: Vec<_> = bars.collect();
            if chart.draw_series(bars).is_err() {
                return;
            }
        }

        let _ = root.present();
    }
}

#[cfg(test)]
mod wasm_tests {
    use super::*;
    use rust_decimal::Decimal;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_draw_without_canvas_is_a_no_op() {
        let chart = StackedBarChart {
            canvas_ref: NodeRef::default(),
        };
        chart.draw_chart(&StackedBarChartProps {
            title: "INGRESOS".into(),
            periods: vec!["2025-1".to_string()],
            series: vec![ChartSeries {
                label: "NEQUI".to_string(),
                values: vec![Decimal::ONE_HUNDRED],
            }],
        });
    }
}
