//! Text and JSON output of board snapshots

use std::collections::HashMap;

use anyhow::Result;

use hexfort_core::{BoardView, Hex, Side, Terrain, TileView, UnitKind};

/// Print a snapshot as JSON or as a text map with a summary
pub fn print_board(view: &BoardView, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(view)?);
    } else {
        print_text_board(view);
    }
    Ok(())
}

fn print_text_board(view: &BoardView) {
    println!("\n=== Turn {} ===", view.turn);
    println!("To play:  {:?}", view.current_player);
    for player in &view.players {
        println!("{:<8}  {} gold", format!("{:?}", player.side), player.gold);
    }
    if let Some(winner) = view.winner {
        println!("Winner:   {:?}", winner);
    }

    println!();
    match render_map(&view.tiles) {
        Some(lines) => {
            for line in lines {
                println!("{}", line.trim_end());
            }
        }
        None => println!("(board spans more than {} rows or columns, map omitted)", MAX_MAP_SPAN),
    }

    println!("\nUnits:");
    for tile in &view.tiles {
        if let Some(unit) = &tile.unit {
            let carrying = match unit.carrying {
                Some(owner) => format!(", carrying {:?} flag", owner),
                None => String::new(),
            };
            println!(
                "  {} {:?} {:?}: {}/{} hp, {} moves{}",
                tile.hex, unit.owner, unit.kind, unit.health, unit.max_health, unit.moves_remaining, carrying
            );
        }
    }
}

/// Widest or tallest text map drawn, in cells
const MAX_MAP_SPAN: i64 = 200;

/// Flat-topped hex map: column `x`, row `2y + x`, three characters per cell.
/// `None` when the tiles spread beyond `MAX_MAP_SPAN` rows or columns.
fn render_map(tiles: &[TileView]) -> Option<Vec<String>> {
    let Some(first) = tiles.first() else {
        return Some(Vec::new());
    };

    let by_hex: HashMap<(i64, i64), &TileView> = tiles
        .iter()
        .map(|tile| ((i64::from(tile.hex.x), i64::from(tile.hex.y)), tile))
        .collect();
    let row_of = |hex: Hex| 2 * i64::from(hex.y) + i64::from(hex.x);

    let first_x = i64::from(first.hex.x);
    let (mut min_x, mut max_x) = (first_x, first_x);
    let (mut min_row, mut max_row) = (row_of(first.hex), row_of(first.hex));
    for tile in tiles {
        min_x = min_x.min(i64::from(tile.hex.x));
        max_x = max_x.max(i64::from(tile.hex.x));
        min_row = min_row.min(row_of(tile.hex));
        max_row = max_row.max(row_of(tile.hex));
    }
    if max_x - min_x >= MAX_MAP_SPAN || max_row - min_row >= MAX_MAP_SPAN {
        return None;
    }

    let lines = (min_row..=max_row)
        .map(|row| {
            (min_x..=max_x)
                .map(|x| {
                    let offset = row - x;
                    if offset.rem_euclid(2) != 0 {
                        return "   ".to_string();
                    }
                    match by_hex.get(&(x, offset / 2)) {
                        Some(tile) => cell(tile),
                        None => "   ".to_string(),
                    }
                })
                .collect::<String>()
        })
        .collect();
    Some(lines)
}

fn cell(tile: &TileView) -> String {
    let flag = if tile.flags.is_empty() { ' ' } else { '*' };

    if let Some(unit) = &tile.unit {
        let letter = match unit.kind {
            UnitKind::Marines => 'm',
            UnitKind::Antitank => 'a',
            UnitKind::Tank => 't',
        };
        let letter = match unit.owner {
            Side::Orange => letter,
            Side::Blue => letter.to_ascii_uppercase(),
        };
        let carrying = if unit.carrying.is_some() { '!' } else { flag };
        return format!("{}{}{}", terrain_char(tile), letter, carrying);
    }

    format!(" {}{}", terrain_char(tile), flag)
}

fn terrain_char(tile: &TileView) -> char {
    match tile.terrain {
        Terrain::Plain => '.',
        Terrain::Mountain => '^',
        Terrain::Gold => '$',
        Terrain::Fort(Side::Orange) => 'O',
        Terrain::Fort(Side::Blue) => 'B',
        Terrain::ForwardFort => match tile.owner {
            Some(Side::Orange) => 'o',
            Some(Side::Blue) => 'b',
            None => 'F',
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hexfort_core::{hexagon, Board, GameConfig, TileRecord, MAX_COORDINATE};

    #[test]
    fn test_render_map_shape() {
        let board = Board::new(hexagon(1, Terrain::Plain), &GameConfig::default().with_seed(0));
        let lines = render_map(&board.snapshot().tiles).unwrap();
        // Rows -2..=2 for a radius-1 hexagon
        assert_eq!(lines.len(), 5);
        let cells: usize = lines.iter().map(|line| line.matches('.').count()).sum();
        assert_eq!(cells, 7);
    }

    #[test]
    fn test_render_map_skips_sprawling_boards() {
        let records = vec![
            TileRecord::new(Hex::new(-MAX_COORDINATE, 0), Terrain::Plain),
            TileRecord::new(Hex::new(MAX_COORDINATE, MAX_COORDINATE), Terrain::Plain),
        ];
        let board = Board::new(records, &GameConfig::default().with_seed(0));
        assert_eq!(render_map(&board.snapshot().tiles), None);
        assert_eq!(render_map(&[]), Some(Vec::new()));
    }

    #[test]
    fn test_cell_marks_units_and_flags() {
        let mut board = Board::new(hexagon(1, Terrain::Plain), &GameConfig::default().with_seed(0));
        board.deploy(Hex::new(0, 0), UnitKind::Tank, Side::Blue);
        let view = board.snapshot();
        let center = view.tiles.iter().find(|tile| tile.hex == Hex::new(0, 0)).unwrap();
        assert_eq!(cell(center), ".T ");
    }
}
