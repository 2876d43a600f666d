use serde::Serialize;

use super::model::{Bounds, PercentBounds, Size};

/// Named layout of tappable areas over a fixed canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Template {
    pub id: &'static str,
    pub label: &'static str,
    pub size: Size,
    pub areas: Vec<Bounds>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateArea {
    pub bounds: Bounds,
    pub percent: PercentBounds,
}

#[derive(Debug, Clone, Serialize)]
pub struct TemplateView {
    pub id: &'static str,
    pub label: &'static str,
    pub size: Size,
    pub areas: Vec<TemplateArea>,
}

/// Split `total` into `parts` integer lengths that sum to `total`.
/// Leftover pixels go to the middle cells, matching LINE's stock layouts
/// (2500 / 3 = 833, 834, 833).
fn split(total: u32, parts: u32) -> Vec<u32> {
    let base = total / parts;
    let extra = total % parts;
    let first_extra = (parts - extra) / 2;
    (0..parts)
        .map(|i| if i >= first_extra && i < first_extra + extra { base + 1 } else { base })
        .collect()
}

/// One row of cells spanning the full canvas width.
fn row(y: u32, height: u32, widths: &[u32]) -> Vec<Bounds> {
    let mut x = 0;
    widths
        .iter()
        .map(|&width| {
            let bounds = Bounds::new(x, y, width, height);
            x += width;
            bounds
        })
        .collect()
}

fn grid(size: Size, columns: u32, rows: u32) -> Vec<Bounds> {
    let widths = split(size.width, columns);
    let mut y = 0;
    split(size.height, rows)
        .into_iter()
        .flat_map(|height| {
            let cells = row(y, height, &widths);
            y += height;
            cells
        })
        .collect()
}

/// Built-in templates, large canvases first.
pub fn catalog() -> Vec<Template> {
    let large = Size::LARGE;
    let compact = Size::COMPACT;
    let half_height = split(large.height, 2);

    let mut top_wide = row(0, half_height[0], &[large.width]);
    top_wide.extend(row(half_height[0], half_height[1], &split(large.width, 3)));

    vec![
        Template { id: "large-6", label: "Large, 6 buttons", size: large, areas: grid(large, 3, 2) },
        Template { id: "large-4", label: "Large, 4 buttons", size: large, areas: grid(large, 2, 2) },
        Template { id: "large-3", label: "Large, wide top + 3 buttons", size: large, areas: top_wide },
        Template { id: "large-2-columns", label: "Large, 2 columns", size: large, areas: grid(large, 2, 1) },
        Template { id: "large-2-rows", label: "Large, 2 rows", size: large, areas: grid(large, 1, 2) },
        Template { id: "large-1", label: "Large, single button", size: large, areas: grid(large, 1, 1) },
        Template { id: "compact-3", label: "Compact, 3 buttons", size: compact, areas: grid(compact, 3, 1) },
        Template { id: "compact-2", label: "Compact, 2 buttons", size: compact, areas: grid(compact, 2, 1) },
        Template {
            id: "compact-2-wide-left",
            label: "Compact, wide left + 1 button",
            size: compact,
            areas: row(0, compact.height, &[1666, compact.width - 1666]),
        },
        Template { id: "compact-1", label: "Compact, single button", size: compact, areas: grid(compact, 1, 1) },
    ]
}

pub fn find(id: &str) -> Option<Template> {
    catalog().into_iter().find(|t| t.id == id)
}

/// Template used when a publish request names none.
pub fn default_template() -> Template {
    Template { id: "large-1", label: "Large, single button", size: Size::LARGE, areas: grid(Size::LARGE, 1, 1) }
}

impl Template {
    pub fn view(&self) -> TemplateView {
        TemplateView {
            id: self.id,
            label: self.label,
            size: self.size,
            areas: self
                .areas
                .iter()
                .map(|b| TemplateArea { bounds: *b, percent: b.as_percent(self.size) })
                .collect(),
        }
    }

    pub fn percent_layout(&self) -> Vec<PercentBounds> {
        self.areas.iter().map(|b| b.as_percent(self.size)).collect()
    }

    /// Areas must cover the canvas exactly: inside it, pairwise disjoint,
    /// and summing to its full area.
    pub fn check_tiling(&self) -> Result<(), String> {
        for (i, area) in self.areas.iter().enumerate() {
            if !area.fits_within(self.size) {
                return Err(format!("{}: area {} exceeds the canvas", self.id, i));
            }
            if let Some(j) = self.areas[i + 1..].iter().position(|other| area.overlaps(other)) {
                return Err(format!("{}: areas {} and {} overlap", self.id, i, i + 1 + j));
            }
        }

        let covered: u64 = self.areas.iter().map(Bounds::area).sum();
        if covered != self.size.area() {
            return Err(format!("{}: areas cover {} of {} px", self.id, covered, self.size.area()));
        }
        Ok(())
    }
}
