use std::f64::consts::FRAC_PI_2;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

use crate::application::chart_adapter::{ChartHandle, RenderingSurface};
use crate::domain::{
    chart::{
        ChartPayload, ChartType, LegendPosition,
        geometry::{Rect, ValueAxis, bar_geometry, pie_slices, plot_area},
    },
    errors::{DashboardError, DashboardResult},
    logging::LogComponent,
};
use crate::view_state::MountId;
use crate::{log_debug, log_trace};

const TEXT_COLOR: &str = "#626C71";
const GRID_COLOR: &str = "rgba(94, 82, 64, 0.2)";
const FONT: &str = "12px sans-serif";

/// Canvas 2D implementation of the rendering surface.
pub struct CanvasSurface {
    document: Document,
    width: u32,
    height: u32,
}

impl CanvasSurface {
    pub fn new(document: Document, width: u32, height: u32) -> Self {
        Self { document, width, height }
    }

    fn canvas_context(&self, mount: &MountId) -> DashboardResult<(HtmlCanvasElement, CanvasRenderingContext2d)> {
        let selector = mount.selector();
        let unavailable = || DashboardError::RenderingSurfaceUnavailable(selector.clone());

        let canvas = self
            .document
            .query_selector(&selector)
            .ok()
            .flatten()
            .and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok())
            .ok_or_else(unavailable)?;

        canvas.set_width(self.width);
        canvas.set_height(self.height);

        let context = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
            .ok_or_else(unavailable)?;

        Ok((canvas, context))
    }
}

impl RenderingSurface for CanvasSurface {
    type Handle = CanvasChart;

    fn create(&mut self, mount: &MountId, chart_type: ChartType, payload: &ChartPayload) -> DashboardResult<CanvasChart> {
        let (canvas, context) = self.canvas_context(mount)?;
        let painter = Painter { context: &context, width: self.width as f64, height: self.height as f64 };

        let drawn = match chart_type {
            ChartType::Bar => painter.bar_chart(payload),
            ChartType::Pie => painter.pie_chart(payload),
        };
        drawn.map_err(|e| {
            DashboardError::RenderingSurfaceUnavailable(format!("{}: {:?}", mount.selector(), e))
        })?;

        log_debug!(
            LogComponent::Infrastructure("Canvas"),
            "{} chart drawn into {}",
            chart_type,
            mount.selector()
        );
        Ok(CanvasChart { canvas, context, live: true })
    }
}

/// A chart painted on a canvas; destroying it clears the canvas.
pub struct CanvasChart {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    live: bool,
}

impl CanvasChart {
    pub fn is_live(&self) -> bool {
        self.live
    }
}

impl ChartHandle for CanvasChart {
    fn destroy(&mut self) {
        if !self.live {
            return;
        }
        self.context
            .clear_rect(0.0, 0.0, self.canvas.width() as f64, self.canvas.height() as f64);
        self.live = false;
    }
}

struct Painter<'a> {
    context: &'a CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl Painter<'_> {
    fn clear(&self) {
        self.context.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn bar_chart(&self, payload: &ChartPayload) -> Result<(), JsValue> {
        self.clear();
        let ctx = self.context;
        let area = plot_area(self.width, self.height, payload.legend, true);
        let axis = ValueAxis::fit(
            payload.datasets.iter().flat_map(|d| d.data.iter().copied()),
            payload.begin_at_zero,
        );

        ctx.set_font(FONT);
        ctx.set_line_width(1.0);

        // grid and tick labels
        ctx.set_text_align("right");
        for tick in axis.ticks() {
            let y = axis.project(tick, &area);
            ctx.set_stroke_style_str(GRID_COLOR);
            ctx.begin_path();
            ctx.move_to(area.x, y);
            ctx.line_to(area.right(), y);
            ctx.stroke();
            ctx.set_fill_style_str(TEXT_COLOR);
            ctx.fill_text(&format!("{}", tick), area.x - 6.0, y + 4.0)?;
        }

        for bar in bar_geometry(payload, &area, &axis) {
            let width = payload.datasets[bar.dataset].border_width as f64;
            ctx.set_fill_style_str(bar.color.as_str());
            ctx.fill_rect(bar.rect.x, bar.rect.y, bar.rect.width, bar.rect.height);
            ctx.set_line_width(width);
            ctx.set_stroke_style_str(bar.color.as_str());
            ctx.stroke_rect(bar.rect.x, bar.rect.y, bar.rect.width, bar.rect.height);
        }

        ctx.set_fill_style_str(TEXT_COLOR);
        ctx.set_text_align("center");
        let group_width = area.width / payload.labels.len().max(1) as f64;
        for (i, label) in payload.labels.iter().enumerate() {
            let x = area.x + group_width * (i as f64 + 0.5);
            ctx.fill_text(label, x, area.bottom() + 18.0)?;
        }

        if let Some(title) = &payload.y_axis_title {
            ctx.save();
            ctx.translate(14.0, area.y + area.height / 2.0)?;
            ctx.rotate(-FRAC_PI_2)?;
            ctx.fill_text(title, 0.0, 0.0)?;
            ctx.restore();
        }

        if payload.legend == LegendPosition::Top {
            let entries: Vec<(String, &str)> = payload
                .datasets
                .iter()
                .map(|d| (d.label.clone().unwrap_or_default(), d.color_at(0).as_str()))
                .collect();
            self.legend_row(&entries, 18.0)?;
        }
        log_trace!(LogComponent::Infrastructure("Canvas"), "bar axis {:?}", axis);
        Ok(())
    }

    fn pie_chart(&self, payload: &ChartPayload) -> Result<(), JsValue> {
        self.clear();
        let ctx = self.context;
        let area = plot_area(self.width, self.height, payload.legend, false);
        let center_x = area.x + area.width / 2.0;
        let center_y = area.y + area.height / 2.0;
        let radius = (area.width.min(area.height) / 2.0).max(0.0);
        let border_width = payload.datasets.first().map(|d| d.border_width).unwrap_or(1) as f64;

        for slice in pie_slices(payload) {
            ctx.begin_path();
            ctx.move_to(center_x, center_y);
            ctx.arc(center_x, center_y, radius, slice.start_angle, slice.end_angle)?;
            ctx.close_path();
            ctx.set_fill_style_str(slice.color.as_str());
            ctx.fill();
            ctx.set_line_width(border_width);
            ctx.set_stroke_style_str(slice.color.as_str());
            ctx.stroke();
        }

        if payload.legend == LegendPosition::Bottom {
            let entries: Vec<(String, &str)> = payload
                .labels
                .iter()
                .enumerate()
                .map(|(i, label)| {
                    let color = payload.datasets.first().map(|d| d.color_at(i).as_str()).unwrap_or(TEXT_COLOR);
                    (label.clone(), color)
                })
                .collect();
            self.legend_row(&entries, area.bottom() + 24.0)?;
        }
        Ok(())
    }

    /// Swatch + label entries, centred on one row at `y`.
    fn legend_row(&self, entries: &[(String, &str)], y: f64) -> Result<(), JsValue> {
        let ctx = self.context;
        let slot = self.width / entries.len().max(1) as f64;
        ctx.set_font(FONT);
        ctx.set_text_align("left");
        for (i, (label, color)) in entries.iter().enumerate() {
            let swatch = Rect { x: slot * i as f64 + 8.0, y: y - 9.0, width: 12.0, height: 10.0 };
            ctx.set_fill_style_str(color);
            ctx.fill_rect(swatch.x, swatch.y, swatch.width, swatch.height);
            ctx.set_fill_style_str(TEXT_COLOR);
            ctx.fill_text(label, swatch.right() + 6.0, y)?;
        }
        Ok(())
    }
}
