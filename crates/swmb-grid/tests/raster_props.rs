use proptest::prelude::*;
use swmb_grid::RasterGrid;

fn render(ncols: usize, nrows: usize, x0: f64, y0: f64, cell: f64, rows: &[Vec<f64>]) -> String {
    let mut text = format!(
        "ncols {ncols}\nnrows {nrows}\nxllcenter {x0}\nyllcenter {y0}\ncellsize {cell}\n"
    );
    for row in rows {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        text.push_str(&line.join(" "));
        text.push('\n');
    }
    text
}

proptest! {
    #[test]
    fn parsed_grid_is_flipped_and_transposed(
        ncols in 1usize..6,
        nrows in 1usize..6,
        x0 in -1000i32..1000,
        y0 in -1000i32..1000,
        cell in 1u32..50,
    ) {
        let rows: Vec<Vec<f64>> = (0..nrows)
            .map(|r| (0..ncols).map(|c| (r * 100 + c) as f64).collect())
            .collect();
        let text = render(ncols, nrows, x0 as f64, y0 as f64, cell as f64, &rows);
        let grid = RasterGrid::parse(&text).unwrap();
        prop_assert_eq!(grid.shape(), (ncols, nrows));
        for (i, x) in grid.x().iter().enumerate() {
            prop_assert_eq!(*x, x0 as f64 + i as f64 * cell as f64);
        }
        for r in 0..nrows {
            for c in 0..ncols {
                prop_assert_eq!(grid.value(c, nrows - 1 - r), Some(rows[r][c]));
            }
        }
        prop_assert_eq!(grid.column_major().count(), ncols * nrows);
    }
}
