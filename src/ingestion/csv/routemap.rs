use std::{fs::File, io::Read, path::Path};

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use crate::{
    ingestion::IngestError,
    structures::{Graph, LatLng, TransportMode},
};

/// How the segments of a row are turned into edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Roads: every segment can be driven both ways.
    Bidirectional,
    /// Transit lines: edges follow the order of the row.
    Forward,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RoutemapSummary {
    pub rows: usize,
    pub skipped_rows: usize,
    pub edges: usize,
}

pub fn load_routemap_file(
    path: &Path,
    mode: TransportMode,
    direction: Direction,
    g: &mut Graph,
) -> Result<RoutemapSummary, IngestError> {
    let file = File::open(path)?;
    load_routemap(file, mode, direction, g)
}

/// Reads rows of `label,lon,lat,lon,lat,...` and adds one edge (or two, for
/// roads) per consecutive pair of coordinates.
pub fn load_routemap<R: Read>(
    reader: R,
    mode: TransportMode,
    direction: Direction,
    g: &mut Graph,
) -> Result<RoutemapSummary, IngestError> {
    let mode_name = mode.name.clone();
    let mode_id = g.add_mode(mode)?;
    let mut summary = RoutemapSummary::default();

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        summary.rows += 1;

        let coords = parse_coordinates(&record);
        if coords.len() < 2 {
            debug!(line, "Skipping row with fewer than two coordinates");
            summary.skipped_rows += 1;
            continue;
        }

        for pair in coords.windows(2) {
            let row_err = |source| IngestError::Row { line, source };
            let u = g.intern_node(pair[0]).map_err(row_err)?;
            let v = g.intern_node(pair[1]).map_err(row_err)?;

            g.connect(u, v, mode_id).map_err(row_err)?;
            summary.edges += 1;
            if direction == Direction::Bidirectional {
                g.connect(v, u, mode_id).map_err(row_err)?;
                summary.edges += 1;
            }
        }
    }

    if summary.skipped_rows > 0 {
        warn!(
            mode = mode_name.as_str(),
            skipped = summary.skipped_rows,
            "Some rows had no usable segment"
        );
    }

    Ok(summary)
}

/// Leading `lon,lat` pairs after the label. Stops at the first field that is
/// not a number, or at a 0 once a full pair has been read; an unpaired
/// trailing value is dropped.
fn parse_coordinates(record: &StringRecord) -> Vec<LatLng> {
    let mut values = Vec::<f64>::new();

    for field in record.iter().skip(1) {
        match field.parse::<f64>() {
            Ok(v) if v.is_finite() && !(v == 0.0 && values.len() >= 2) => values.push(v),
            _ => break,
        }
    }

    values
        .chunks_exact(2)
        .map(|c| LatLng::new(c[1], c[0]))
        .collect()
}
