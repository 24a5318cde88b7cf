use std::io::Write;

use anyhow::Result;

use crate::render::{Surface, TextLabel, Tooltip};

use super::{escape_xml, write_svg_footer, write_svg_header};

/// Write a whole container: region shapes, title, footer and the tooltip overlay.
/// A cleared surface produces an empty `<svg>`.
pub(crate) fn write_choropleth<W: Write>(writer: &mut W, surface: &Surface, tooltip: &Tooltip) -> Result<()> {
    let (width, height) = surface.size();
    write_svg_header(writer, surface.id(), width, height)?;

    if let Some(scene) = surface.scene() {
        let margins = scene.viewport.margins;
        writeln!(writer, r#"<g transform="translate({},{})">"#, margins.left, margins.top)?;

        writeln!(writer, r#"<g class="map-all">"#)?;
        for shape in &scene.shapes {
            writeln!(writer,
                r#"<path class="{class}" data-name="{name}" data-value="{value}" d="{d}" fill="{fill}" style="opacity:{opacity};stroke:{stroke};stroke-width:{stroke_width}"/>"#,
                class = escape_xml(&shape.class),
                name = escape_xml(shape.region.as_str()),
                value = shape.value,
                d = shape.path,
                fill = shape.fill.to_hex(),
                opacity = shape.opacity,
                stroke = escape_xml(&shape.stroke.color),
                stroke_width = shape.stroke.width,
            )?;
        }
        writeln!(writer, "</g>")?;

        write_label(writer, &scene.title)?;
        write_label(writer, &scene.footer)?;
        writeln!(writer, "</g>")?;

        writeln!(writer,
            r#"<g class="tooltip" transform="translate({x},{y})" style="opacity:{opacity}"><text>{content}</text></g>"#,
            x = tooltip.x,
            y = tooltip.y,
            opacity = if tooltip.visible { 1 } else { 0 },
            content = escape_xml(&tooltip.content),
        )?;
    }

    write_svg_footer(writer)
}

fn write_label<W: Write>(writer: &mut W, label: &TextLabel) -> Result<()> {
    writeln!(writer, r#"<text class="{class}" x="{x}" y="{y}" text-anchor="middle">{text}</text>"#,
        class = escape_xml(&label.class),
        x = label.x,
        y = label.y,
        text = escape_xml(&label.text),
    )?;
    Ok(())
}
