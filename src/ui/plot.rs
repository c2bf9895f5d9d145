use std::f32::consts::TAU;

use eframe::egui::{self, Color32, FontId, Pos2, Shape, Stroke, Ui};
use egui_plot::{Legend, Plot, PlotPoints, Points};

use crate::chart::{Figure, Trace};
use crate::color::{generate_palette, parse_color, Rgb};

const PIE_SIZE: f32 = 320.0;
/// Arc segments per full turn when tessellating slices.
const PIE_SEGMENTS: usize = 180;

fn color32([r, g, b]: Rgb) -> Color32 {
    Color32::from_rgb(r, g, b)
}

/// Slice colours: explicit marker colours where given, a generated palette
/// otherwise.
fn slice_colors(labels: usize, explicit: &[String]) -> Vec<Color32> {
    let fallback = generate_palette(labels);
    (0..labels)
        .map(|i| {
            explicit
                .get(i)
                .and_then(|c| parse_color(c))
                .or_else(|| fallback.get(i).copied())
                .map(color32)
                .unwrap_or(Color32::GRAY)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Pie / donut chart
// ---------------------------------------------------------------------------

/// Render a pie figure with the painter (egui_plot has no pie chart).
pub fn pie_chart(ui: &mut Ui, figure: &Figure) {
    ui.heading(figure.title());

    let Some(Trace::Pie(pie)) = figure.data.first() else {
        return;
    };
    let total = pie.total();
    if total == 0 {
        ui.label("No launches match this selection.");
        return;
    }
    let colors = slice_colors(pie.labels.len(), &pie.marker.colors);

    ui.horizontal(|ui: &mut Ui| {
        let (response, painter) =
            ui.allocate_painter(egui::vec2(PIE_SIZE, PIE_SIZE), egui::Sense::hover());
        let center = response.rect.center();
        let outer = PIE_SIZE * 0.45;
        let inner = outer * pie.hole.unwrap_or(0.0) as f32;
        let point = |radius: f32, angle: f32| {
            center + radius * egui::vec2(angle.sin(), -angle.cos())
        };

        // Slices run clockwise from twelve o'clock, as plotly draws them.
        let mut start = 0.0_f32;
        for (i, &value) in pie.values.iter().enumerate() {
            if value == 0 {
                continue;
            }
            let sweep = TAU * value as f32 / total as f32;
            let steps = ((PIE_SEGMENTS as f32 * sweep / TAU).ceil() as usize).max(1);
            for s in 0..steps {
                let a0 = start + sweep * s as f32 / steps as f32;
                let a1 = start + sweep * (s + 1) as f32 / steps as f32;
                let quad: Vec<Pos2> =
                    vec![point(inner, a0), point(outer, a0), point(outer, a1), point(inner, a1)];
                painter.add(Shape::convex_polygon(quad, colors[i], Stroke::NONE));
            }

            let mid = start + sweep / 2.0;
            let share = 100.0 * value as f32 / total as f32;
            painter.text(
                point((inner + outer) / 2.0, mid),
                egui::Align2::CENTER_CENTER,
                format!("{share:.1}%"),
                FontId::proportional(13.0),
                Color32::WHITE,
            );
            start += sweep;
        }

        // ---- Legend ----
        ui.vertical(|ui: &mut Ui| {
            for ((label, value), color) in pie.labels.iter().zip(&pie.values).zip(&colors) {
                ui.colored_label(*color, format!("■ {label}  ({value})"));
            }
        });
    });
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Render a scatter figure with egui_plot, one point series per trace.
pub fn scatter_chart(ui: &mut Ui, figure: &Figure) {
    ui.heading(figure.title());
    if figure.is_empty() {
        ui.label("No launches match this selection.");
    }

    let axis_title = |axis: &Option<crate::chart::Axis>| {
        axis.as_ref().map(|a| a.title.text.clone()).unwrap_or_default()
    };

    Plot::new("success_payload_scatter")
        .legend(Legend::default())
        .height(360.0)
        .x_axis_label(axis_title(&figure.layout.xaxis))
        .y_axis_label(axis_title(&figure.layout.yaxis))
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for trace in &figure.data {
                let Trace::Scatter(scatter) = trace else {
                    continue;
                };
                let color = scatter
                    .marker
                    .color
                    .as_deref()
                    .and_then(parse_color)
                    .map(color32)
                    .unwrap_or(Color32::LIGHT_BLUE);

                let points: PlotPoints = scatter
                    .x
                    .iter()
                    .zip(scatter.y.iter())
                    .map(|(&x, &y)| [x, y])
                    .collect();

                plot_ui.points(
                    Points::new(points)
                        .name(&scatter.name)
                        .color(color)
                        .radius(4.0),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_slice_colours_win() {
        let colors = slice_colors(2, &["red".to_string(), "green".to_string()]);
        assert_eq!(colors, [Color32::from_rgb(255, 0, 0), Color32::from_rgb(0, 128, 0)]);
    }

    #[test]
    fn missing_slice_colours_fall_back_to_palette() {
        let colors = slice_colors(3, &[]);
        let expected: Vec<Color32> = generate_palette(3).into_iter().map(color32).collect();
        assert_eq!(colors, expected);
    }
}
