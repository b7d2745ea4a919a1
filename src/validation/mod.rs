//! Region document validation.
//!
//! This module checks region documents before conversion, reporting:
//! - Geometric validity (finite coordinates, non-negative box sizes, paths)
//! - Content that converts to nothing (empty point lists, empty areas)
//! - Toolkit regions that have no source equivalent or become general areas

mod report;

pub use report::{IssueCode, IssueContext, Severity, ValidationIssue, ValidationReport};

use crate::geom::BBoxXYXY;
use crate::io_json::{SourceDocument, ToolkitDocument};
use crate::source::SourceRegion;
use crate::toolkit::{PolygonKind, ToolkitRegion};

/// Options for validation behavior.
#[derive(Clone, Debug, Default)]
pub struct ValidateOptions {
    /// If true, treat warnings as errors.
    pub strict: bool,
}

/// Validates every region of a source document.
pub fn validate_source_document(doc: &SourceDocument, _opts: &ValidateOptions) -> ValidationReport {
    let mut report = ValidationReport::new();
    if doc.regions.is_empty() {
        report.add(empty_document());
    }
    for (index, region) in doc.regions.iter().enumerate() {
        validate_source_region(index, region, &mut report);
    }
    report
}

/// Validates every region of a toolkit document.
pub fn validate_toolkit_document(
    doc: &ToolkitDocument,
    _opts: &ValidateOptions,
) -> ValidationReport {
    let mut report = ValidationReport::new();
    if doc.regions.is_empty() {
        report.add(empty_document());
    }
    for (index, region) in doc.regions.iter().enumerate() {
        validate_toolkit_region(index, region, &mut report);
    }
    report
}

fn validate_source_region(index: usize, region: &SourceRegion, report: &mut ValidationReport) {
    let context = || IssueContext::Region {
        index,
        kind: region.kind().name(),
    };

    if !region.is_finite() {
        report.add(ValidationIssue::error(
            IssueCode::NonFiniteCoordinate,
            "Region has NaN or infinite coordinates",
            context(),
        ));
        return;
    }

    match region {
        SourceRegion::Rectangle { bounds, .. } | SourceRegion::Ellipse { bounds, .. } => {
            check_box_size(bounds, context, report);
        }
        SourceRegion::Line { start, end, .. } => {
            if start == end {
                report.add(ValidationIssue::warning(
                    IssueCode::DegenerateLine,
                    "Line has zero length",
                    context(),
                ));
            }
        }
        SourceRegion::Polygon { points, .. } => {
            check_points(points.len(), true, context, report);
        }
        SourceRegion::Polyline { points, .. } | SourceRegion::PointSet { points, .. } => {
            check_points(points.len(), false, context, report);
        }
        SourceRegion::Area { geometry, .. } => {
            if geometry.is_empty() {
                report.add(ValidationIssue::warning(
                    IssueCode::EmptyGeometry,
                    "Area has no contours and will be skipped",
                    context(),
                ));
            }
        }
    }
}

fn validate_toolkit_region(index: usize, region: &ToolkitRegion, report: &mut ValidationReport) {
    let context = || IssueContext::Region {
        index,
        kind: region.kind().name(),
    };

    if !region.is_finite() {
        report.add(ValidationIssue::error(
            IssueCode::NonFiniteCoordinate,
            "Region has NaN or infinite coordinates",
            context(),
        ));
        return;
    }

    match region {
        ToolkitRegion::Rectangle(roi) => {
            check_box_size(&roi.bounds, context, report);
            if roi.is_rounded() {
                report.add(ValidationIssue::warning(
                    IssueCode::ConvertsToArea,
                    format!(
                        "Rounded rectangle (corner diameter {}) converts to an area",
                        roi.corner_diameter
                    ),
                    context(),
                ));
            }
        }
        ToolkitRegion::Oval(roi) => check_box_size(&roi.bounds, context, report),
        ToolkitRegion::Line(roi) => {
            if roi.length() == 0.0 {
                report.add(ValidationIssue::warning(
                    IssueCode::DegenerateLine,
                    "Line has zero length",
                    context(),
                ));
            }
        }
        ToolkitRegion::Polygon(roi) => match roi.kind {
            PolygonKind::Angle => report.add(ValidationIssue::error(
                IssueCode::UnsupportedToolkitKind,
                "Angle regions have no source equivalent",
                context(),
            )),
            PolygonKind::Freehand | PolygonKind::Traced => {
                report.add(ValidationIssue::warning(
                    IssueCode::ConvertsToArea,
                    "Closed freehand outline converts to an area",
                    context(),
                ));
                check_points(roi.points.len(), true, context, report);
            }
            PolygonKind::Polygon => check_points(roi.points.len(), true, context, report),
            PolygonKind::Polyline | PolygonKind::Freeline => {
                check_points(roi.points.len(), false, context, report)
            }
        },
        ToolkitRegion::PointSet(roi) => check_points(roi.points.len(), false, context, report),
        ToolkitRegion::Shape(roi) => {
            if !roi.path.is_well_formed() {
                report.add(ValidationIssue::error(
                    IssueCode::MalformedPath,
                    "Shape path must start with a move",
                    context(),
                ));
            } else if roi.path.is_empty() {
                report.add(ValidationIssue::warning(
                    IssueCode::EmptyGeometry,
                    "Shape has no drawing segments and will be skipped",
                    context(),
                ));
            }
        }
    }
}

fn empty_document() -> ValidationIssue {
    ValidationIssue::warning(
        IssueCode::EmptyGeometry,
        "Document contains no regions",
        IssueContext::Document,
    )
}

fn check_box_size<TSpace>(
    bounds: &BBoxXYXY<TSpace>,
    context: impl Fn() -> IssueContext,
    report: &mut ValidationReport,
) {
    if !bounds.is_ordered() {
        report.add(ValidationIssue::error(
            IssueCode::NegativeSize,
            format!("Negative size {}x{}", bounds.width(), bounds.height()),
            context(),
        ));
    }
}

fn check_points(
    count: usize,
    closed: bool,
    context: impl Fn() -> IssueContext,
    report: &mut ValidationReport,
) {
    if count == 0 {
        report.add(ValidationIssue::warning(
            IssueCode::EmptyGeometry,
            "Region has no points and will be skipped",
            context(),
        ));
    } else if closed && count < 3 {
        report.add(ValidationIssue::warning(
            IssueCode::TooFewPolygonPoints,
            format!("Polygon has {} point(s) and encloses no area", count),
            context(),
        ));
    }
}
