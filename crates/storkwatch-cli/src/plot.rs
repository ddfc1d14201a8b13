//! Comparative box plot of behavior percentages
//!
//! One pair of boxes per status: the first age group at `x = 3i + 1`, the
//! second at `x = 3i + 2`. Each pair is annotated with `*` when the t-test is
//! significant and `NS` otherwise.

use std::path::Path;

use anyhow::Context;
use plotters::{
    coord::{Shift, cartesian::Cartesian2d, types::RangedCoordf64},
    prelude::*,
    style::text_anchor::{HPos, Pos, VPos},
};
use storkwatch_stats::boxplot::BoxPlotStats;

use crate::util;

/// Outer limit of the percentage axis.
pub const DEFAULT_Y_MAX: f64 = 20.0;

const BOX_WIDTH: f64 = 0.75;
const SLOT_WIDTH: f64 = 3.0;
const GROUP_COLORS: [RGBColor; 2] = [RGBColor(0xCB, 0xD5, 0xE8), RGBColor(0xE6, 0xF5, 0xC9)];
const FIGURE_SIZE: (u32, u32) = (1000, 700);

/// Data of one status panel.
#[derive(Debug, Clone)]
pub struct StatusPanel<'a> {
    pub label: &'a str,
    pub groups: [&'a [f64]; 2],
    pub significant: bool,
}

#[derive(Debug, Clone)]
pub struct BoxPlot<'a> {
    pub group_labels: [&'a str; 2],
    pub panels: Vec<StatusPanel<'a>>,
    pub y_max: f64,
}

impl BoxPlot<'_> {
    /// Renders the figure to `path`: SVG when the extension is `svg`, a
    /// bitmap image otherwise.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        util::create_parent_dir(path)?;
        let is_svg = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"));
        let result = if is_svg {
            self.draw(&SVGBackend::new(path, FIGURE_SIZE).into_drawing_area())
        } else {
            self.draw(&BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area())
        };
        result.with_context(|| format!("Failed to render box plot: {}", path.display()))
    }

    #[expect(clippy::cast_precision_loss)]
    fn draw<DB>(&self, root: &DrawingArea<DB, Shift>) -> anyhow::Result<()>
    where
        DB: DrawingBackend,
        DB::ErrorType: 'static,
    {
        let x_max = SLOT_WIDTH * self.panels.len() as f64;
        let y_max = self.y_max;

        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(root)
            .margin(20)
            .x_label_area_size(40)
            .y_label_area_size(60)
            .build_cartesian_2d(0.0..x_max, 0.0..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .x_labels(0)
            .y_desc("Pecking Relative Duration [%]")
            .draw()?;

        for k in 1..self.panels.len() {
            let x = SLOT_WIDTH * k as f64;
            chart.draw_series(DashedLineSeries::new(
                [(x, 0.0), (x, y_max)],
                6,
                4,
                BLACK.mix(0.15).into(),
            ))?;
        }

        for (color, label) in GROUP_COLORS.iter().zip(self.group_labels) {
            let color = *color;
            chart
                .draw_series(std::iter::empty::<Rectangle<(f64, f64)>>())?
                .label(label)
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 6), (x + 16, y + 6)], color.filled())
                });
        }

        let label_style = TextStyle::from(("sans-serif", 16).into_font())
            .pos(Pos::new(HPos::Center, VPos::Top));
        let marker_style = TextStyle::from(("sans-serif", 18).into_font())
            .pos(Pos::new(HPos::Center, VPos::Bottom));

        for (i, panel) in self.panels.iter().enumerate() {
            let left = SLOT_WIDTH * i as f64;
            for (offset, (values, color)) in panel.groups.iter().zip(GROUP_COLORS).enumerate() {
                let Some(stats) = BoxPlotStats::new(values.iter().copied()) else {
                    continue;
                };
                draw_box(&mut chart, left + 1.0 + offset as f64, &stats, color)?;
            }

            let center = left + 1.5;
            let marker = if panel.significant { "*" } else { "NS" };
            chart.draw_series(std::iter::once(Text::new(
                marker,
                (center, 0.85 * y_max),
                marker_style.clone(),
            )))?;

            let (px, py) = chart.backend_coord(&(center, 0.0));
            root.draw(&Text::new(panel.label, (px, py + 8), label_style.clone()))?;
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;

        root.present()?;
        Ok(())
    }
}

fn draw_box<DB>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    x: f64,
    stats: &BoxPlotStats,
    color: RGBColor,
) -> anyhow::Result<()>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    let half = BOX_WIDTH / 2.0;
    let cap = BOX_WIDTH / 4.0;

    chart.draw_series([
        Rectangle::new([(x - half, stats.q1), (x + half, stats.q3)], color.filled()),
        Rectangle::new([(x - half, stats.q1), (x + half, stats.q3)], BLACK.stroke_width(1)),
    ])?;
    chart.draw_series([
        PathElement::new(vec![(x, stats.q3), (x, stats.whisker_high)], BLACK),
        PathElement::new(vec![(x, stats.q1), (x, stats.whisker_low)], BLACK),
        PathElement::new(
            vec![(x - cap, stats.whisker_high), (x + cap, stats.whisker_high)],
            BLACK,
        ),
        PathElement::new(
            vec![(x - cap, stats.whisker_low), (x + cap, stats.whisker_low)],
            BLACK,
        ),
    ])?;
    chart.draw_series(std::iter::once(PathElement::new(
        vec![(x - half, stats.median), (x + half, stats.median)],
        BLACK.stroke_width(2),
    )))?;
    chart.draw_series(std::iter::once(TriangleMarker::new(
        (x, stats.mean),
        5,
        BLACK.filled(),
    )))?;
    Ok(())
}
