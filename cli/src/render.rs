use std::fmt::Write;

use minefield_core::{CellView, Grid};

/// Draws the grid as an ASCII table with row and column indices.
///
/// Opened cells show their mine count, flags show `?`, hidden cells `.`, and
/// mines `*` once they are revealed. A mines-left counter follows the table.
pub fn render_grid(grid: &Grid, reveal_mines: bool) -> String {
    let (height, width) = grid.size();
    let largest_index = height.max(width).saturating_sub(1);
    let digits = largest_index.to_string().len().max(2);
    let cell_width = digits + 3;

    let mut out = String::new();
    let separator = format!("{}+", "-".repeat(cell_width)).repeat(usize::from(width) + 1);

    out.push_str(&" ".repeat(cell_width));
    out.push('|');
    for col in 0..width {
        let _ = write!(out, "  {col:^digits$} |");
    }
    out.push('\n');
    out.push_str(&separator);
    out.push('\n');

    for (row, cells) in grid.rows(reveal_mines).enumerate() {
        let _ = write!(out, "  {row:^digits$} |");
        for view in cells {
            let _ = write!(out, "{:^cell_width$}|", marker(view));
        }
        out.push('\n');
        out.push_str(&separator);
        out.push('\n');
    }

    let _ = writeln!(out, "Mines left: {}", grid.mines_left());
    out
}

fn marker(view: CellView) -> String {
    match view {
        CellView::Opened(count) => count.to_string(),
        CellView::Mine => "*".into(),
        CellView::Flagged => "?".into(),
        CellView::Hidden => ".".into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_grid_is_all_hidden() {
        let grid = Grid::with_mines((4, 4), &[(0, 0)]).unwrap();

        let expected = "     |  0  |  1  |  2  |  3  |\n\
                        -----+-----+-----+-----+-----+\n  \
                        0  |  .  |  .  |  .  |  .  |\n\
                        -----+-----+-----+-----+-----+\n  \
                        1  |  .  |  .  |  .  |  .  |\n\
                        -----+-----+-----+-----+-----+\n  \
                        2  |  .  |  .  |  .  |  .  |\n\
                        -----+-----+-----+-----+-----+\n  \
                        3  |  .  |  .  |  .  |  .  |\n\
                        -----+-----+-----+-----+-----+\n\
                        Mines left: 1\n";
        assert_eq!(render_grid(&grid, false), expected);
    }

    #[test]
    fn markers_follow_cell_state() {
        let mut grid = Grid::with_mines((4, 5), &[(0, 0), (3, 4)]).unwrap();
        grid.open_cell((0, 3)).unwrap();
        grid.set_flag((3, 4)).unwrap();

        let playing = render_grid(&grid, false);
        let lines: Vec<_> = playing.lines().collect();
        assert_eq!(lines[2], "  0  |  .  |  1  |  0  |  0  |  0  |");
        assert_eq!(lines[8], "  3  |  0  |  0  |  0  |  1  |  ?  |");

        assert!(playing.ends_with("Mines left: 1\n"));

        let lost = render_grid(&grid, true);
        let lines: Vec<_> = lost.lines().collect();
        assert_eq!(lines[2], "  0  |  *  |  1  |  0  |  0  |  0  |");
        assert_eq!(lines[8], "  3  |  0  |  0  |  0  |  1  |  *  |");
    }

    #[test]
    fn mines_left_goes_negative_when_over_flagged() {
        let mut grid = Grid::with_mines((4, 4), &[(0, 0)]).unwrap();
        grid.set_flag((2, 2)).unwrap();
        grid.set_flag((3, 3)).unwrap();

        assert!(render_grid(&grid, false).ends_with("Mines left: -1\n"));
    }

    #[test]
    fn wide_grid_keeps_columns_aligned() {
        let grid = Grid::with_mines((4, 120), &[(0, 0)]).unwrap();

        let rendered = render_grid(&grid, false);
        let widths: Vec<_> = rendered
            .lines()
            .take_while(|line| !line.starts_with("Mines left"))
            .map(str::len)
            .collect();

        assert_eq!(widths.len(), 1 + 2 * 4 + 1);
        assert!(widths.iter().all(|&width| width == widths[0]));
        assert!(rendered.starts_with("      |   0  |   1  |"));
    }
}
