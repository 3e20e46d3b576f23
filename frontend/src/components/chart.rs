use plotters::prelude::*;
use plotters_canvas::CanvasBackend;
use web_sys::HtmlCanvasElement;
use yew::prelude::*;

use crate::services::Logger;

const CANVAS_WIDTH: u32 = 720;
const CANVAS_HEIGHT: u32 = 320;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
}

#[derive(Properties, PartialEq)]
pub struct ChartProps {
    pub title: AttrValue,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    #[prop_or_default]
    pub kind: ChartKind,
    #[prop_or((59, 130, 246))]
    pub color: (u8, u8, u8),
    #[prop_or_default]
    pub y_desc: AttrValue,
    /// Format y labels as money
    #[prop_or(true)]
    pub currency: bool,
}

pub enum Msg {
    Draw,
}

/// Bar or line chart drawn onto a canvas with plotters
pub struct Chart {
    canvas_ref: NodeRef,
}

impl Component for Chart {
    type Message = Msg;
    type Properties = ChartProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            canvas_ref: NodeRef::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Draw => {
                self.draw(ctx.props());
                false
            }
        }
    }

    fn changed(&mut self, _ctx: &Context<Self>, _old_props: &Self::Properties) -> bool {
        true
    }

    fn rendered(&mut self, ctx: &Context<Self>, _first_render: bool) {
        if !ctx.props().values.is_empty() {
            ctx.link().send_message(Msg::Draw);
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        html! {
            <div class="chart-card">
                <h3 class="chart-title">{props.title.clone()}</h3>
                {if props.values.is_empty() {
                    html! {
                        <div class="chart-empty">
                            <p>{"No data for this period"}</p>
                        </div>
                    }
                } else {
                    html! {
                        <canvas
                            ref={self.canvas_ref.clone()}
                            class="chart-canvas"
                            width={CANVAS_WIDTH.to_string()}
                            height={CANVAS_HEIGHT.to_string()}
                        ></canvas>
                    }
                }}
            </div>
        }
    }
}

impl Chart {
    fn draw(&self, props: &ChartProps) {
        let canvas = match self.canvas_ref.cast::<HtmlCanvasElement>() {
            Some(canvas) => canvas,
            None => return,
        };
        canvas.set_width(CANVAS_WIDTH);
        canvas.set_height(CANVAS_HEIGHT);

        let backend = match CanvasBackend::with_canvas_object(canvas) {
            Some(backend) => backend,
            None => return,
        };
        let root = backend.into_drawing_area();
        if root.fill(&WHITE).is_err() {
            return;
        }

        let (r, g, b) = props.color;
        let color = RGBColor(r, g, b);
        let result = match props.kind {
            ChartKind::Bar => draw_bars(&root, props, color),
            ChartKind::Line => draw_line(&root, props, color),
        };
        if let Err(err) = result {
            Logger::warn_with_component("chart", &format!("failed to draw {}: {}", props.title, err));
            return;
        }
        Logger::warn_on_failure("chart", "presenting canvas", root.present());
    }
}

type DrawResult = Result<(), String>;

fn draw_bars(root: &DrawingArea<CanvasBackend, plotters::coord::Shift>, props: &ChartProps, color: RGBColor) -> DrawResult {
    let count = props.values.len() as u32;
    let y_max = y_axis_max(&props.values);
    let labels = &props.labels;

    let mut chart = ChartBuilder::on(root)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d((0u32..count).into_segmented(), 0.0..y_max)
        .map_err(|e| e.to_string())?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .y_desc(props.y_desc.as_str())
        .y_label_formatter(&|v| value_label(*v, props.currency))
        .x_label_formatter(&|segment| match segment {
            SegmentValue::CenterOf(index) | SegmentValue::Exact(index) => {
                labels.get(*index as usize).cloned().unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        })
        .label_style(("sans-serif", 12, &RGBColor(75, 85, 99)))
        .axis_style(&RGBColor(229, 231, 235))
        .bold_line_style(&RGBColor(243, 244, 246))
        .draw()
        .map_err(|e| e.to_string())?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(color.filled())
                .margin(12)
                .data(props.values.iter().enumerate().map(|(index, value)| (index as u32, *value))),
        )
        .map_err(|e| e.to_string())?;

    Ok(())
}

fn draw_line(root: &DrawingArea<CanvasBackend, plotters::coord::Shift>, props: &ChartProps, color: RGBColor) -> DrawResult {
    let last = props.values.len().saturating_sub(1).max(1) as u32;
    let y_max = y_axis_max(&props.values);
    let labels = &props.labels;

    let mut chart = ChartBuilder::on(root)
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0u32..last, 0.0..y_max)
        .map_err(|e| e.to_string())?;

    chart
        .configure_mesh()
        .y_desc(props.y_desc.as_str())
        .y_label_formatter(&|v| value_label(*v, props.currency))
        .x_label_formatter(&|index| labels.get(*index as usize).cloned().unwrap_or_default())
        .x_labels(props.values.len())
        .label_style(("sans-serif", 12, &RGBColor(75, 85, 99)))
        .axis_style(&RGBColor(229, 231, 235))
        .bold_line_style(&RGBColor(243, 244, 246))
        .draw()
        .map_err(|e| e.to_string())?;

    let points: Vec<(u32, f64)> = props
        .values
        .iter()
        .enumerate()
        .map(|(index, value)| (index as u32, *value))
        .collect();

    chart
        .draw_series(LineSeries::new(points.iter().copied(), color.stroke_width(3)))
        .map_err(|e| e.to_string())?;
    chart
        .draw_series(points.iter().map(|point| Circle::new(*point, 4, color.filled())))
        .map_err(|e| e.to_string())?;

    Ok(())
}

/// Top of the y axis: 10% above the largest value, never below 1.
fn y_axis_max(values: &[f64]) -> f64 {
    let max = values.iter().copied().fold(0.0_f64, f64::max);
    (max * 1.1).max(1.0)
}

fn value_label(value: f64, currency: bool) -> String {
    if currency {
        format!("${:.0}", value)
    } else {
        format!("{:.0}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_y_axis_max() {
        assert_eq!(y_axis_max(&[]), 1.0);
        assert_eq!(y_axis_max(&[0.0, 0.0]), 1.0);
        assert!((y_axis_max(&[10.0, 50.0]) - 55.0).abs() < 1e-9);
    }

    #[test]
    fn test_value_label() {
        assert_eq!(value_label(12.4, true), "$12");
        assert_eq!(value_label(3.0, false), "3");
    }
}
