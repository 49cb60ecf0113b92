//! Line-oriented board layout files
//!
//! Each record is `x,y,TypeModifiers`:
//! - `T` plain, `M` mountain, `G` gold, `F` forward fort,
//!   `O` / `B` fort owned by Orange / Blue
//! - modifier `o` / `b` places an Orange / Blue flag on the tile
//!
//! Coordinates must lie within `MAX_COORDINATE`.
//! Blank lines and `#` comments are skipped. Bad records are logged and
//! dropped; the rest of the file still loads.

use std::path::Path;

use crate::error::LayoutError;
use crate::grid::TileRecord;
use crate::hex::Hex;
use crate::player::Side;
use crate::tile::Terrain;

/// Parse one line. `Ok(None)` for blank and comment lines.
pub fn parse_record(line: &str) -> Result<Option<TileRecord>, LayoutError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split(',').map(str::trim).collect();
    let &[x, y, kind] = fields.as_slice() else {
        return Err(LayoutError::FieldCount(fields.len()));
    };

    let x = x.parse::<i32>().map_err(|_| LayoutError::Coordinate(x.to_string()))?;
    let y = y.parse::<i32>().map_err(|_| LayoutError::Coordinate(y.to_string()))?;
    let hex = Hex::new(x, y);
    if !hex.in_bounds() {
        return Err(LayoutError::OutOfBounds(hex));
    }

    let mut chars = kind.chars();
    let terrain = match chars.next().ok_or(LayoutError::MissingType)? {
        'T' => Terrain::Plain,
        'M' => Terrain::Mountain,
        'G' => Terrain::Gold,
        'F' => Terrain::ForwardFort,
        'O' => Terrain::Fort(Side::Orange),
        'B' => Terrain::Fort(Side::Blue),
        other => return Err(LayoutError::UnknownType(other)),
    };

    let mut record = TileRecord::new(hex, terrain);
    for modifier in chars {
        let owner = match modifier {
            'o' => Side::Orange,
            'b' => Side::Blue,
            other => return Err(LayoutError::UnknownModifier(other)),
        };
        record = record.with_flag(owner);
    }
    Ok(Some(record))
}

/// Parse a whole layout, skipping bad records
pub fn parse_layout(text: &str) -> Vec<TileRecord> {
    let mut records = Vec::new();
    for (index, line) in text.lines().enumerate() {
        match parse_record(line) {
            Ok(Some(record)) => records.push(record),
            Ok(None) => {}
            Err(e) => tracing::warn!("Skipping layout line {}: {} ({:?})", index + 1, e, line.trim()),
        }
    }
    records
}

/// Read and parse a layout file
pub fn load_layout(path: &Path) -> Result<Vec<TileRecord>, LayoutError> {
    let text = std::fs::read_to_string(path)?;
    let records = parse_layout(&text);
    tracing::debug!("Loaded {} tiles from {}", records.len(), path.display());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_terrain() {
        let record = parse_record("3,-2,M").unwrap().unwrap();
        assert_eq!(record.hex, Hex::new(3, -2));
        assert_eq!(record.terrain, Terrain::Mountain);
        assert!(record.flags.is_empty());

        assert_eq!(parse_record(" 0 , 4 , B ").unwrap().unwrap().terrain, Terrain::Fort(Side::Blue));
        assert_eq!(parse_record("0,0,F").unwrap().unwrap().terrain, Terrain::ForwardFort);
    }

    #[test]
    fn test_parse_flags() {
        let record = parse_record("0,-4,Ob").unwrap().unwrap();
        assert_eq!(record.terrain, Terrain::Fort(Side::Orange));
        assert_eq!(record.flags, vec![Side::Blue]);
    }

    #[test]
    fn test_skip_lines() {
        assert!(parse_record("").unwrap().is_none());
        assert!(parse_record("   # river crossing").unwrap().is_none());
    }

    #[test]
    fn test_malformed_records() {
        assert!(matches!(parse_record("1,2"), Err(LayoutError::FieldCount(2))));
        assert!(matches!(parse_record("1,2,T,T"), Err(LayoutError::FieldCount(4))));
        assert!(matches!(parse_record("a,2,T"), Err(LayoutError::Coordinate(_))));
        assert!(matches!(parse_record("1,2,"), Err(LayoutError::MissingType)));
        assert!(matches!(parse_record("1,2,X"), Err(LayoutError::UnknownType('X'))));
        assert!(matches!(parse_record("1,2,Tz"), Err(LayoutError::UnknownModifier('z'))));
    }

    #[test]
    fn test_extreme_coordinates_rejected() {
        assert!(matches!(parse_record("2147483647,0,T"), Err(LayoutError::OutOfBounds(_))));
        assert!(matches!(parse_record("0,-2147483648,T"), Err(LayoutError::OutOfBounds(_))));
        let edge = format!("{},0,T", crate::hex::MAX_COORDINATE);
        assert!(parse_record(&edge).unwrap().is_some());

        let records = parse_layout("2147483647,0,T\n0,0,T\n");
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].hex, Hex::new(0, 0));
    }

    #[test]
    fn test_layout_keeps_good_records() {
        let text = "# demo\n0,0,T\n1,0,Q\n\n0,1,G\nbroken\n-1,0,Bo\n";
        let records = parse_layout(text);
        assert_eq!(records.len(), 3);
        assert_eq!(records[2].flags, vec![Side::Orange]);
    }
}
