//! Text rendering of a carousel frame.

use slidekit::{page_dots, CarouselSnapshot, LayoutMode};

/// Pixels represented by one terminal column.
pub const PX_PER_COLUMN: f32 = 8.0;

/// Renders the visible strip of cards for `snapshot`, followed by the page
/// dots.
pub fn render_frame(snapshot: &CarouselSnapshot, labels: &[&str]) -> String {
    let strip = match snapshot.layout_mode {
        LayoutMode::Grid => render_grid(labels),
        LayoutMode::Carousel => render_strip(snapshot, labels),
    };
    format!("{strip}\n{}", page_dots(snapshot))
}

fn render_grid(labels: &[&str]) -> String {
    labels
        .iter()
        .map(|label| format!("[ {label} ]"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_strip(snapshot: &CarouselSnapshot, labels: &[&str]) -> String {
    let width = snapshot.page_width;
    if !(width.is_finite() && width > 0.0) || labels.is_empty() {
        return String::from("(not laid out)");
    }
    let columns = (width / PX_PER_COLUMN).round().max(1.0) as usize;
    let mut line = String::with_capacity(columns);
    for column in 0..columns {
        let x = snapshot.offset + (column as f32 + 0.5) * PX_PER_COLUMN;
        line.push(cell_at(x, width, labels));
    }
    line
}

fn cell_at(x: f32, page_width: f32, labels: &[&str]) -> char {
    let page = (x / page_width).floor();
    if page < 0.0 || page as usize >= labels.len() {
        return ' ';
    }
    let page = page as usize;
    let local = x - page as f32 * page_width;
    if local < PX_PER_COLUMN || local > page_width - PX_PER_COLUMN {
        return '|';
    }
    let label: Vec<char> = labels[page].chars().collect();
    let center = page_width / 2.0;
    let start = center - label.len() as f32 * PX_PER_COLUMN / 2.0;
    let slot = ((local - start) / PX_PER_COLUMN).floor();
    if slot >= 0.0 && (slot as usize) < label.len() {
        label[slot as usize]
    } else {
        ' '
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(offset: f32, layout_mode: LayoutMode) -> CarouselSnapshot {
        CarouselSnapshot {
            current_index: 0,
            item_count: 2,
            is_dragging: false,
            can_go_next: true,
            can_go_previous: false,
            offset,
            page_width: 160.0,
            layout_mode,
            is_settled: true,
        }
    }

    #[test]
    fn resting_page_shows_its_label() {
        let frame = render_frame(&snapshot(0.0, LayoutMode::Carousel), &["Pro", "Team"]);
        let strip = frame.lines().next().unwrap();
        assert_eq!(strip.chars().count(), 20);
        assert!(strip.contains("Pro"));
        assert!(strip.starts_with('|') && strip.ends_with('|'));
        assert!(frame.ends_with("* o"));
    }

    #[test]
    fn half_way_shows_both_pages() {
        let frame = render_frame(&snapshot(80.0, LayoutMode::Carousel), &["Pro", "Team"]);
        let strip = frame.lines().next().unwrap();
        assert!(strip.contains('|'));
        assert!(!strip.contains("Pro"));
    }

    #[test]
    fn grid_lists_every_card() {
        let frame = render_frame(&snapshot(0.0, LayoutMode::Grid), &["Pro", "Team"]);
        assert!(frame.starts_with("[ Pro ] [ Team ]"));
    }
}
