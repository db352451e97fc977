//! Pipe-delimited annotation files.
//!
//! Layout: six single-field header rows (application, format version, entity
//! kind, details, `origin`, source file name), the column row
//! `Style|Image x|Image y|Appearance|String`, then one row per entity.
//! Comments are written as `plain text|x|y|color|text`, rulers as
//! `ruler|x1|y1|unit|x2,y2`. Fields containing the delimiter, a quote or a
//! line break are quoted with `"` and inner quotes doubled.

use std::path::Path;

use csv::{ReaderBuilder, Terminator, WriterBuilder};
use tracing::{info, warn};

use super::comment::{Comment, CommentColor};
use super::overlay::{Annotation, AnnotationOverlay};
use super::units::{LengthUnit, PixelConversion};
use crate::consts::{ANNOTATION_APP_NAME, ANNOTATION_DELIMITER, ANNOTATION_FORMAT_VERSION};
use crate::error::{QuadviewError, Result};
use crate::geometry::Point;

pub const COLUMN_ROW: [&str; 5] = ["Style", "Image x", "Image y", "Appearance", "String"];
pub const COMMENT_STYLE: &str = "plain text";
pub const RULER_STYLE: &str = "ruler";

const ENTITY_KIND: &str = "comments";
const NO_DETAILS: &str = "no details";
const ORIGIN_LABEL: &str = "origin";
const CONVERSION_PREFIX: &str = "px per mm ";

/// A row that was not imported, by zero-based record index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedRow {
    pub record: usize,
    pub reason: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub comments: usize,
    pub rulers: usize,
    pub skipped: Vec<SkippedRow>,
}

impl ImportReport {
    pub fn total(&self) -> usize {
        self.comments + self.rulers
    }
}

enum Parsed {
    Comment(Comment),
    Ruler(LengthUnit, Point, Point),
}

/// Serialize all annotations of an overlay.
pub fn export_annotations(overlay: &AnnotationOverlay, source_name: &str) -> Result<String> {
    let details = match overlay.conversion() {
        Some(c) => format!("{CONVERSION_PREFIX}{}", c.px_per_mm()),
        None => NO_DETAILS.to_string(),
    };

    let mut writer = WriterBuilder::new()
        .delimiter(ANNOTATION_DELIMITER)
        .terminator(Terminator::CRLF)
        .flexible(true)
        .from_writer(Vec::new());
    for field in [
        ANNOTATION_APP_NAME,
        ANNOTATION_FORMAT_VERSION,
        ENTITY_KIND,
        details.as_str(),
        ORIGIN_LABEL,
        source_name,
    ] {
        writer.write_record([field])?;
    }
    writer.write_record(COLUMN_ROW)?;

    for (_, annotation) in overlay.iter() {
        match annotation {
            Annotation::Comment(c) => {
                let (x, y) = (c.anchor.x.to_string(), c.anchor.y.to_string());
                let row: [&str; 5] = [COMMENT_STYLE, &x, &y, c.color.name(), &c.text];
                writer.write_record(row)?;
            }
            Annotation::Ruler(r) => {
                let p1 = r.endpoint(super::Endpoint::First);
                let p2 = r.endpoint(super::Endpoint::Second);
                let (x, y) = (p1.x.to_string(), p1.y.to_string());
                let end = format!("{},{}", p2.x, p2.y);
                let row: [&str; 5] = [RULER_STYLE, &x, &y, r.unit().symbol(), &end];
                writer.write_record(row)?;
            }
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| QuadviewError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| QuadviewError::InvalidArgument(e.to_string()))
}

/// Write all annotations of an overlay to `path`.
pub fn save_annotations(overlay: &AnnotationOverlay, source_name: &str, path: &Path) -> Result<()> {
    std::fs::write(path, export_annotations(overlay, source_name)?)?;
    info!(path = %path.display(), count = overlay.len(), "Saved annotations");
    Ok(())
}

/// Parse annotation text and add every valid entity to `overlay`.
///
/// A file without the column row is rejected as unrecognized; a file with no
/// valid entity rows is rejected as empty. In both cases `overlay` is left
/// unchanged. Malformed rows are skipped and listed in the report.
pub fn import_annotations(text: &str, overlay: &mut AnnotationOverlay) -> Result<ImportReport> {
    let records = parse_records(text)?;
    let header_idx = records
        .iter()
        .position(|r| r.iter().map(String::as_str).eq(COLUMN_ROW))
        .ok_or(QuadviewError::UnrecognizedFormat)?;

    let file_conversion = records[..header_idx]
        .iter()
        .filter_map(|r| r.first())
        .filter_map(|f| f.strip_prefix(CONVERSION_PREFIX))
        .find_map(|v| v.trim().parse::<f64>().ok())
        .and_then(|v| PixelConversion::from_px_per_mm(v).ok());
    let has_conversion = file_conversion.is_some() || overlay.conversion().is_some();

    let mut report = ImportReport::default();
    let mut parsed = Vec::new();
    for (idx, record) in records.iter().enumerate().skip(header_idx + 1) {
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        match parse_entity(record, has_conversion) {
            Ok(p) => parsed.push(p),
            Err(reason) => {
                warn!(record = idx, %reason, "Skipping annotation row");
                report.skipped.push(SkippedRow { record: idx, reason });
            }
        }
    }

    if parsed.is_empty() {
        return Err(QuadviewError::NoAnnotations);
    }

    if let Some(c) = file_conversion {
        overlay.apply_conversion(c);
    }
    for p in parsed {
        match p {
            Parsed::Comment(c) => {
                overlay.add_comment(c);
                report.comments += 1;
            }
            Parsed::Ruler(unit, p1, p2) => {
                overlay.add_ruler(unit, p1, p2)?;
                report.rulers += 1;
            }
        }
    }

    info!(
        comments = report.comments,
        rulers = report.rulers,
        skipped = report.skipped.len(),
        "Imported annotations"
    );
    Ok(report)
}

/// Read an annotation file into `overlay`.
pub fn load_annotations(path: &Path, overlay: &mut AnnotationOverlay) -> Result<ImportReport> {
    let text = std::fs::read_to_string(path)?;
    import_annotations(&text, overlay)
}

fn parse_entity(record: &[String], has_conversion: bool) -> std::result::Result<Parsed, String> {
    if record.len() < COLUMN_ROW.len() {
        return Err(format!(
            "expected {} fields, found {}",
            COLUMN_ROW.len(),
            record.len()
        ));
    }
    let x = parse_coord(&record[1])?;
    let y = parse_coord(&record[2])?;

    match record[0].as_str() {
        COMMENT_STYLE => {
            let color: CommentColor = record[3].parse().map_err(|e| format!("{e}"))?;
            Ok(Parsed::Comment(Comment::with_text(
                Point::new(x, y),
                record[4].clone(),
                color,
            )))
        }
        RULER_STYLE => {
            let unit: LengthUnit = record[3].parse().map_err(|e| format!("{e}"))?;
            if !unit.is_pixels() && !has_conversion {
                return Err(format!("no unit conversion available for {unit} ruler"));
            }
            let (x2, y2) = record[4]
                .split_once(',')
                .ok_or_else(|| format!("invalid ruler end point '{}'", record[4]))?;
            let p2 = Point::new(parse_coord(x2)?, parse_coord(y2)?);
            Ok(Parsed::Ruler(unit, Point::new(x, y), p2))
        }
        other => Err(format!("unknown style '{other}'")),
    }
}

fn parse_coord(s: &str) -> std::result::Result<f64, String> {
    s.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("invalid coordinate '{s}'"))
}

/// Split delimited text into records. Quoted fields may contain the
/// delimiter, doubled quotes and line breaks; blank lines are dropped.
fn parse_records(text: &str) -> Result<Vec<Vec<String>>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(ANNOTATION_DELIMITER)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    reader
        .records()
        .map(|record| -> Result<Vec<String>> {
            Ok(record?.iter().map(str::to_string).collect())
        })
        .collect()
}
