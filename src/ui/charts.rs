use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, PlotPoints, Polygon, Text};

use crate::color::{lift_color, ColorMap, DISTRIBUTION_BASE};
use crate::data::aggregate::{DashboardOutcome, Distribution, LiftRanking, RankedLifter};
use crate::data::error::MissingColumn;
use crate::state::AppState;

const CHART_HEIGHT: f32 = 300.0;

/// Segments used to approximate a full circle.
const PIE_RESOLUTION: usize = 120;

// ---------------------------------------------------------------------------
// Dashboard (central panel)
// ---------------------------------------------------------------------------

/// Render the charts for the current selection.
pub fn dashboard(ui: &mut Ui, state: &AppState) {
    let dashboard = match &state.outcome {
        None => {
            ui.centered_and_justified(|ui: &mut Ui| {
                ui.heading("Open a file to view results  (File → Open…)");
            });
            return;
        }
        Some(DashboardOutcome::NoData) => {
            ui.label(
                RichText::new("No data available for the selected criteria.")
                    .color(Color32::from_rgb(220, 160, 0))
                    .strong(),
            );
            return;
        }
        Some(DashboardOutcome::Charts(d)) => d,
    };

    ui.heading("Distribution by Sex");
    match &dashboard.sex {
        Ok(dist) => sex_pie(ui, dist),
        Err(e) => missing_column(ui, e),
    }
    ui.add_space(12.0);

    for LiftRanking { lift, ranking } in &dashboard.rankings {
        ui.heading(format!("Top {} Athletes by Best {}", state.config.top_n, lift.label()));
        match ranking {
            Ok(ranking) => {
                let y_label = format!("Best {} (kg)", lift.label());
                top_bar_chart(ui, lift.column(), &y_label, lift_color(*lift), ranking);
            }
            Err(e) => missing_column(ui, e),
        }
        ui.add_space(12.0);
    }
}

fn missing_column(ui: &mut Ui, err: &MissingColumn) {
    ui.label(RichText::new(err.to_string()).color(Color32::RED));
}

// ---------------------------------------------------------------------------
// Pie chart
// ---------------------------------------------------------------------------

/// One wedge of the pie, angles in radians measured clockwise from 12 o'clock.
#[derive(Debug, Clone, PartialEq)]
struct Slice {
    label: String,
    share: f64,
    start: f64,
    end: f64,
}

fn pie_slices(dist: &Distribution) -> Vec<Slice> {
    let total = dist.total() as f64;
    if total == 0.0 {
        return Vec::new();
    }
    let mut start = 0.0;
    dist.counts
        .iter()
        .map(|(label, count)| {
            let share = *count as f64 / total;
            let end = start + share * TAU;
            let slice = Slice {
                label: if label.is_empty() { "(blank)".to_string() } else { label.clone() },
                share,
                start,
                end,
            };
            start = end;
            slice
        })
        .collect()
}

/// Point on the unit circle for a clockwise angle from 12 o'clock.
fn polar(angle: f64, radius: f64) -> [f64; 2] {
    [radius * angle.sin(), radius * angle.cos()]
}

/// Split a wedge into equal sub-wedges of at most a quarter turn.
///
/// Plot polygons are filled as convex shapes, and a wedge wider than half a
/// turn is not convex.
fn wedge_pieces(start: f64, end: f64) -> Vec<(f64, f64)> {
    let span = end - start;
    let count = ((span / FRAC_PI_2 - 1e-9).ceil() as usize).max(1);
    (0..count)
        .map(|i| {
            let from = start + span * i as f64 / count as f64;
            let to = if i + 1 == count { end } else { start + span * (i + 1) as f64 / count as f64 };
            (from, to)
        })
        .collect()
}

/// Outline of one sub-wedge: the centre followed by points along the arc.
fn wedge_points(start: f64, end: f64) -> Vec<[f64; 2]> {
    let steps = (((end - start) / TAU * PIE_RESOLUTION as f64).ceil() as usize).max(1);
    std::iter::once([0.0, 0.0])
        .chain((0..=steps).map(|i| polar(start + (end - start) * i as f64 / steps as f64, 1.0)))
        .collect()
}

fn sex_pie(ui: &mut Ui, dist: &Distribution) {
    let slices = pie_slices(dist);
    let colors = ColorMap::new(slices.iter().map(|s| s.label.as_str()), &DISTRIBUTION_BASE);

    Plot::new("sex_distribution")
        .legend(Legend::default())
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for slice in &slices {
                let color = colors.color_for(&slice.label);
                // Same name on every piece, so the legend shows one entry.
                for (from, to) in wedge_pieces(slice.start, slice.end) {
                    let points = PlotPoints::new(wedge_points(from, to));
                    plot_ui.polygon(
                        Polygon::new(points)
                            .name(&slice.label)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, color)),
                    );
                }

                let [x, y] = polar((slice.start + slice.end) / 2.0, 0.6);
                plot_ui.text(Text::new(
                    PlotPoint::new(x, y),
                    RichText::new(format!("{:.1}%", slice.share * 100.0))
                        .color(Color32::WHITE)
                        .strong(),
                ));
            }
        });
}

// ---------------------------------------------------------------------------
// Top-N bar chart
// ---------------------------------------------------------------------------

/// Label for an x-axis grid mark: the athlete name at integer positions.
fn axis_label(names: &[String], value: f64) -> String {
    let index = value.round();
    if (value - index).abs() > 1e-6 || index < 0.0 {
        return String::new();
    }
    names.get(index as usize).cloned().unwrap_or_default()
}

fn top_bar_chart(ui: &mut Ui, id: &str, y_label: &str, color: Color32, ranking: &[RankedLifter]) {
    if ranking.is_empty() {
        ui.label("No lifter in this selection has a recorded value.");
        return;
    }

    let bars: Vec<Bar> = ranking
        .iter()
        .enumerate()
        .map(|(i, r)| {
            Bar::new(i as f64, r.value)
                .name(format!("{} – {:.1} kg", r.name, r.value))
                .fill(color)
                .width(0.7)
        })
        .collect();
    let names: Vec<String> = ranking.iter().map(|r| r.name.clone()).collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label("Athlete")
        .y_axis_label(y_label)
        .x_axis_formatter(move |mark, _range| axis_label(&names, mark.value))
        .include_y(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(color));
        });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Category;

    #[test]
    fn slices_cover_the_full_circle() {
        let dist = Distribution {
            category: Category::Sex,
            counts: vec![("M".into(), 3), ("F".into(), 1)],
        };
        let slices = pie_slices(&dist);
        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].share, 0.75);
        assert_eq!(slices[0].start, 0.0);
        assert_eq!(slices[1].start, slices[0].end);
        assert!((slices[1].end - TAU).abs() < 1e-9);
    }

    fn is_convex(points: &[[f64; 2]]) -> bool {
        let n = points.len();
        let cross = |i: usize| {
            let [ax, ay] = points[i];
            let [bx, by] = points[(i + 1) % n];
            let [cx, cy] = points[(i + 2) % n];
            (bx - ax) * (cy - by) - (by - ay) * (cx - bx)
        };
        let turns: Vec<f64> = (0..n).map(cross).collect();
        turns.iter().all(|&c| c <= 1e-12) || turns.iter().all(|&c| c >= -1e-12)
    }

    #[test]
    fn wedge_pieces_cover_the_slice_without_gaps() {
        let pieces = wedge_pieces(0.0, 0.75 * TAU);
        assert_eq!(pieces.len(), 3);
        assert_eq!(pieces[0].0, 0.0);
        assert_eq!(pieces.last().unwrap().1, 0.75 * TAU);
        assert!(pieces.windows(2).all(|w| w[0].1 == w[1].0));
        assert!(pieces.iter().all(|(from, to)| to - from <= FRAC_PI_2 + 1e-12));
    }

    #[test]
    fn tiny_slice_is_a_single_piece() {
        assert_eq!(wedge_pieces(1.0, 1.01), vec![(1.0, 1.01)]);
    }

    #[test]
    fn majority_slice_is_drawn_with_convex_pieces() {
        let dist = Distribution {
            category: Category::Sex,
            counts: vec![("M".into(), 3), ("F".into(), 1)],
        };
        for slice in pie_slices(&dist) {
            let pieces = wedge_pieces(slice.start, slice.end);
            assert!(pieces.iter().all(|(from, to)| to - from <= std::f64::consts::PI));
            for (from, to) in pieces {
                assert!(is_convex(&wedge_points(from, to)), "{} {from}..{to}", slice.label);
            }
        }
    }

    #[test]
    fn whole_circle_wedge_is_split() {
        let pieces = wedge_pieces(0.0, TAU);
        assert_eq!(pieces.len(), 4);
        for (from, to) in pieces {
            assert!(is_convex(&wedge_points(from, to)));
        }
    }

    #[test]
    fn blank_category_gets_a_label() {
        let dist = Distribution {
            category: Category::Sex,
            counts: vec![(String::new(), 2)],
        };
        assert_eq!(pie_slices(&dist)[0].label, "(blank)");
    }

    #[test]
    fn empty_distribution_has_no_slices() {
        let dist = Distribution {
            category: Category::Sex,
            counts: Vec::new(),
        };
        assert!(pie_slices(&dist).is_empty());
    }

    #[test]
    fn axis_labels_only_at_bar_positions() {
        let names = vec!["Ben".to_string(), "Dana".to_string()];
        assert_eq!(axis_label(&names, 0.0), "Ben");
        assert_eq!(axis_label(&names, 1.0), "Dana");
        assert_eq!(axis_label(&names, 0.5), "");
        assert_eq!(axis_label(&names, 2.0), "");
        assert_eq!(axis_label(&names, -1.0), "");
    }
}
