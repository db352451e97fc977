use std::path::Path;

use console::Style;
use quadview_core::annotate::export::ImportReport;
use quadview_core::annotate::{AnnotationOverlay, Endpoint, Ruler};
use quadview_core::geometry::Rect;
use quadview_core::viewer::{PanePosition, Viewer};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn print_title(s: &Styles, title: &str) {
    println!();
    println!("  {}", s.title.apply_to(title));
    println!(
        "  {}",
        s.title.apply_to("\u{2550}".repeat(title.chars().count()))
    );
    println!();
}

fn format_rect(r: &Rect) -> String {
    format!(
        "({:.1}, {:.1}) {:.1} x {:.1}",
        r.x, r.y, r.width, r.height
    )
}

pub fn print_split_summary(viewer: &Viewer) {
    let s = Styles::new();
    let layout = viewer.split_layout();

    print_title(&s, "Split View");

    let vp = viewer.viewport();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Viewport"),
        s.value.apply_to(format!("{} x {}", vp.width, vp.height))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Zoom"),
        s.value.apply_to(viewer.zoom_percent())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Sync by"),
        s.method.apply_to(viewer.sync_by())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Split widget"),
        s.value.apply_to(format!(
            "({:.1}, {:.1})",
            layout.split_widget.x, layout.split_widget.y
        ))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Split scene"),
        s.value.apply_to(format!(
            "({:.1}, {:.1})",
            layout.split_scene.x, layout.split_scene.y
        ))
    );
    println!();

    for position in PanePosition::ALL {
        let pane = viewer.pane(position);
        let Some(region) = layout.region(position) else {
            println!(
                "  {:<14}{}",
                s.header.apply_to(position),
                s.disabled.apply_to("empty")
            );
            continue;
        };
        println!("  {}", s.header.apply_to(position));
        if let Some(name) = pane.raster().and_then(|r| r.file_name()) {
            println!("    {:<12}{}", s.label.apply_to("Image"), s.path.apply_to(name));
        }
        println!(
            "    {:<12}{}",
            s.label.apply_to("Widget"),
            s.value.apply_to(format_rect(&region.widget_rect))
        );
        println!(
            "    {:<12}{}",
            s.label.apply_to("Scene"),
            s.value.apply_to(format_rect(&region.scene_rect))
        );
        println!(
            "    {:<12}{}",
            s.label.apply_to("Factor"),
            s.value.apply_to(format!("{:.4}", pane.adjust_factor()))
        );
        println!(
            "    {:<12}{}",
            s.label.apply_to("Opacity"),
            s.value.apply_to(format!("{}%", pane.opacity()))
        );
    }
    println!();
}

pub fn print_measure_summary(ruler: &Ruler) {
    let s = Styles::new();

    print_title(&s, "Ruler");

    println!(
        "  {:<14}{}",
        s.label.apply_to("Length"),
        s.value.apply_to(ruler.center_label())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Origin"),
        s.method.apply_to(ruler.origin())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Px per unit"),
        s.value.apply_to(format!("{:.4}", ruler.px_per_unit()))
    );
    println!();

    for (title, which) in [("From first", Endpoint::First), ("From second", Endpoint::Second)] {
        let labels = ruler.endpoint_labels(which);
        println!("  {}", s.header.apply_to(title));
        for line in [&labels.length, &labels.dx, &labels.dy, &labels.angle] {
            println!("    {}", s.value.apply_to(line));
        }
        println!();
    }
}

pub fn print_import_summary(path: &Path, report: &ImportReport, overlay: &AnnotationOverlay) {
    let s = Styles::new();

    print_title(&s, "Annotations");

    println!(
        "  {:<14}{}",
        s.label.apply_to("File"),
        s.path.apply_to(path.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Origin"),
        s.method.apply_to(overlay.origin())
    );
    match overlay.conversion() {
        Some(c) => println!(
            "  {:<14}{}",
            s.label.apply_to("Px per mm"),
            s.value.apply_to(c.px_per_mm())
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Px per mm"),
            s.disabled.apply_to("not set")
        ),
    }
    println!();

    println!(
        "  {:<14}{}",
        s.header.apply_to("Rulers"),
        s.value.apply_to(report.rulers)
    );
    for (id, ruler) in overlay.rulers() {
        println!(
            "    {}. {}",
            s.label.apply_to(id.0),
            s.value.apply_to(ruler.center_label())
        );
    }
    println!(
        "  {:<14}{}",
        s.header.apply_to("Comments"),
        s.value.apply_to(report.comments)
    );
    for (id, comment) in overlay.comments() {
        println!(
            "    {}. {} {}",
            s.label.apply_to(id.0),
            s.value.apply_to(&comment.text),
            s.method.apply_to(format!("[{}]", comment.color))
        );
    }

    if report.skipped.is_empty() {
        println!(
            "  {:<14}{}",
            s.header.apply_to("Skipped"),
            s.disabled.apply_to("none")
        );
    } else {
        println!("  {}", s.header.apply_to("Skipped"));
        for row in &report.skipped {
            println!(
                "    {} {}",
                s.label.apply_to(format!("record {}:", row.record)),
                s.disabled.apply_to(&row.reason)
            );
        }
    }
    println!();
}
