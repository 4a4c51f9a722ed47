//! SVG rendering of a laid-out family tree.
//!
//! Output is organized in two groups: connectors first, so cards are painted
//! over the lines that reach them, then the cards themselves. A couple is
//! drawn as two cards joined by a short horizontal line.

use log::{debug, info};
use svg::{
    Document,
    node::{Text as SvgText, element as svg_element},
};

use famtree_core::{
    color::Color,
    geometry::{Bounds, Point},
    identifier::PersonId,
};

use crate::{
    cells::CellForest,
    config::StyleConfig,
    export::Error,
    layout::Layout,
    snapshot::PeopleById,
};

/// Resolved colors for one render.
struct Palette {
    background: Option<Color>,
    card_fill: Color,
    card_stroke: Color,
    highlight: Color,
    connector: Color,
    text: Color,
    font_size: u16,
}

impl Palette {
    fn from_style(style: &StyleConfig) -> Result<Self, Error> {
        Ok(Self {
            background: style.background_color()?,
            card_fill: style.card_fill()?,
            card_stroke: style.card_stroke()?,
            highlight: style.highlight_color()?,
            connector: style.connector_color()?,
            text: style.text_color()?,
            font_size: style.font_size(),
        })
    }
}

/// Renders the chart to an SVG string.
///
/// The canvas extends from the origin to the far edge of the layout bounds
/// plus the layout's left margin, so the chart keeps the same margin on every
/// side.
///
/// # Errors
///
/// Returns [`Error::Style`] if a configured color cannot be parsed.
pub fn render(
    forest: &CellForest,
    layout: &Layout,
    people: &PeopleById,
    style: &StyleConfig,
) -> Result<String, Error> {
    let palette = Palette::from_style(style)?;
    let bounds = layout.bounds();
    let margin = bounds.min_x().max(0.0);
    let width = bounds.max_x() + margin;
    let height = bounds.max_y() + bounds.min_y().max(0.0);
    debug!(width = width, height = height; "SVG canvas size");

    let mut document = Document::new()
        .set("viewBox", format!("0 0 {width} {height}"))
        .set("width", width)
        .set("height", height);

    if let Some(background) = palette.background {
        document = document.add(
            svg_element::Rectangle::new()
                .set("x", 0)
                .set("y", 0)
                .set("width", width)
                .set("height", height)
                .set("fill", background),
        );
    }

    let mut connectors = svg_element::Group::new()
        .set("data-layer", "connectors")
        .set("fill", "none")
        .set("stroke", palette.connector)
        .set("stroke-width", 1.5);
    let mut cards = svg_element::Group::new().set("data-layer", "cards");

    let active_user = forest.active_user();
    let mut card_count = 0;

    for (id, _) in layout.iter() {
        let Some(cell) = forest.get(id) else {
            continue;
        };
        let Some(parent_bounds) = layout.cell_bounds(id) else {
            continue;
        };
        let member_cards = layout.member_cards(cell);

        for &child in cell.child_cells() {
            if let Some(child_bounds) = layout.cell_bounds(child) {
                connectors = connectors.add(connector_path(parent_bounds, child_bounds));
            }
        }

        let mut group = svg_element::Group::new().set("data-cell", id.to_string());
        if let [(_, left), (_, right)] = member_cards.as_slice() {
            let y = left.min_y() + left.height() / 2.0;
            group = group.add(
                svg_element::Line::new()
                    .set("x1", left.max_x())
                    .set("y1", y)
                    .set("x2", right.min_x())
                    .set("y2", y)
                    .set("stroke", palette.card_stroke)
                    .set("stroke-width", 2),
            );
        }
        for (member, bounds) in &member_cards {
            let highlighted = active_user == Some(*member);
            group = group.add(render_card(*member, *bounds, people, &palette, highlighted));
            card_count += 1;
        }
        cards = cards.add(group);
    }

    document = document.add(connectors).add(cards);

    info!(cards = card_count; "SVG rendered");
    Ok(document.to_string())
}

/// Orthogonal path from the bottom center of the parent to the top center of
/// the child: down to the midpoint, across, then down.
fn connector_path(parent: Bounds, child: Bounds) -> svg_element::Path {
    let start = Point::new(parent.min_x() + parent.width() / 2.0, parent.max_y());
    let end = Point::new(child.min_x() + child.width() / 2.0, child.min_y());
    let mid_y = start.midpoint(end).y();

    let data = format!(
        "M {} {} L {} {} L {} {} L {} {}",
        start.x(),
        start.y(),
        start.x(),
        mid_y,
        end.x(),
        mid_y,
        end.x(),
        end.y()
    );
    svg_element::Path::new().set("d", data)
}

fn render_card(
    member: PersonId,
    bounds: Bounds,
    people: &PeopleById,
    palette: &Palette,
    highlighted: bool,
) -> svg_element::Group {
    let name = people
        .get(&member)
        .map(|person| person.display_name())
        .unwrap_or_else(|| member.to_string());

    let (stroke, stroke_width) = if highlighted {
        (palette.highlight, 3.0)
    } else {
        (palette.card_stroke, 1.0)
    };

    let rect = svg_element::Rectangle::new()
        .set("x", bounds.min_x())
        .set("y", bounds.min_y())
        .set("width", bounds.width())
        .set("height", bounds.height())
        .set("rx", 6.0)
        .set("fill", palette.card_fill)
        .set("stroke", stroke)
        .set("stroke-width", stroke_width);

    let text = svg_element::Text::new("")
        .set("x", bounds.min_x() + bounds.width() / 2.0)
        .set("y", bounds.min_y() + bounds.height() / 2.0)
        .set("text-anchor", "middle")
        .set("dominant-baseline", "central")
        .set("font-family", "sans-serif")
        .set("font-size", f32::from(palette.font_size))
        .set("fill", palette.text)
        .add(SvgText::new(name));

    let mut group = svg_element::Group::new()
        .set("data-person", member.to_string())
        .add(rect)
        .add(text);
    if highlighted {
        group = group.set("class", "active");
    }
    group
}

#[cfg(test)]
mod tests {
    use famtree_core::model::{Person, Relation};

    use super::*;
    use crate::{cells::build_cells, config::LayoutConfig, layout::LayoutEngine};

    fn render_family(active: Option<&str>, style: &StyleConfig) -> Result<String, Error> {
        let people: PeopleById = [("a", "Ann"), ("b", "Ben"), ("k", "Kid & Co <3>")]
            .iter()
            .map(|&(id, name)| (PersonId::new(id), Person::named(id, name)))
            .collect();
        let relations = [Relation::spouse("a", "b"), Relation::parent("b", "k")];

        let forest = build_cells(active.map(PersonId::new), &people, &relations);
        let layout = LayoutEngine::new(LayoutConfig::default()).layout(&forest);
        render(&forest, &layout, &people, style)
    }

    #[test]
    fn test_renders_cards_and_connectors() {
        let svg = render_family(None, &StyleConfig::default()).unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains("</svg>"));
        assert_eq!(svg.matches("<rect").count(), 3);
        assert_eq!(svg.matches("<path").count(), 1);
        assert_eq!(svg.matches("<line").count(), 1);
        assert!(svg.contains("data-cell=\"couple:a-b\""));
        assert!(svg.contains("data-cell=\"person:k\""));
        assert!(!svg.contains("class=\"active\""));
    }

    #[test]
    fn test_names_are_escaped() {
        let svg = render_family(None, &StyleConfig::default()).unwrap();
        assert!(svg.contains("Kid &amp; Co"));
        assert!(!svg.contains("Co <3>"));
    }

    #[test]
    fn test_active_user_highlighted() {
        let svg = render_family(Some("k"), &StyleConfig::default()).unwrap();
        assert_eq!(svg.matches("class=\"active\"").count(), 1);
    }

    #[test]
    fn test_background_rect_added() {
        let style = StyleConfig::default().with_background_color("white");
        let svg = render_family(None, &style).unwrap();
        assert_eq!(svg.matches("<rect").count(), 4);
    }

    #[test]
    fn test_invalid_style_color() {
        let style = StyleConfig::default().with_highlight_color("nope");
        assert!(matches!(
            render_family(None, &style),
            Err(Error::Style(_))
        ));
    }
}
