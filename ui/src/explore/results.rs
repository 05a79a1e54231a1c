use abstutil::prettyprint_usize;
use widgetry::tools::{ColorLegend, ColorScale};
use widgetry::{Color, EventCtx, GeomBatch, Line, Text, TextExt, Widget};

use api::RouteID;
use model::{Cell, DisplayedPois, RenderedRow, Tone};

use crate::components::clickable_rows;
use crate::App;

// Green means the requested frequency is met; red means service runs but
// misses it.
const MEETS: Color = Color::GREEN;
const BELOW: Color = Color::RED;

pub fn section(ctx: &mut EventCtx, app: &App) -> Widget {
    let mut col = vec![Line("Nearby routes").small_heading().into_widget(ctx)];

    if let Some(time) = app.results_updated {
        col.push(
            Line(format!("Updated {}", time.format("%H:%M:%S")))
                .secondary()
                .into_widget(ctx),
        );
    }

    let rows = model::render_rows(&app.session.rows);
    if rows.is_empty() {
        col.push("No results yet. Set a location and search.".text_widget(ctx));
        return Widget::col(col).section(ctx);
    }

    col.push(table(ctx, &rows));
    col.push(
        Line("Click a row for actions. N/A means no trips run that schedule.")
            .secondary()
            .into_widget(ctx),
    );

    let mut actions = vec![ctx
        .style()
        .btn_outline
        .text("Export results to CSV")
        .build_def(ctx)];
    if app.session.shape.is_some() {
        actions.push(
            ctx.style()
                .btn_outline
                .text("Clear route shape")
                .build_def(ctx),
        );
    }
    col.push(Widget::row(actions));

    if let Some(ref pois) = app.session.pois {
        col.push(poi_section(ctx, pois));
    }

    Widget::col(col).section(ctx)
}

fn table(ctx: &mut EventCtx, rows: &[RenderedRow]) -> Widget {
    let mut headers = vec!["Route".text_widget(ctx)];
    for (name, _) in &rows[0].cells {
        headers.push(name.text_widget(ctx));
    }

    let mut table_rows = Vec::new();
    for row in rows {
        let key = format!(
            "row {}|{}",
            row.route_id.0,
            row.branch_letter.clone().unwrap_or_default()
        );
        let mut cells = vec![text_cell(
            ctx,
            &format!("{} ({})", row.route_label, row.branch_label),
        )];
        for (_, cell) in &row.cells {
            cells.push(badge_cell(ctx, *cell));
        }
        table_rows.push((key, cells));
    }

    clickable_rows(ctx, headers, table_rows, 10.0)
}

fn text_cell(ctx: &mut EventCtx, label: &str) -> GeomBatch {
    Text::from(label)
        .render_autocropped(ctx)
        .batch()
        .container()
        .padding(10.0)
        .into_geom(ctx, None)
        .0
}

fn badge_cell(ctx: &mut EventCtx, cell: Cell) -> GeomBatch {
    let (line, background) = match cell {
        Cell::NoService => (Line("N/A").secondary(), None),
        Cell::Badge(Tone::Warning) => (Line("Below"), Some(BELOW)),
        Cell::Badge(Tone::Success) => (Line("Meets"), Some(MEETS)),
    };
    let (mut batch, hitbox) = Text::from(line)
        .render_autocropped(ctx)
        .batch()
        .container()
        .padding(10.0)
        .into_geom(ctx, None);
    if let Some(color) = background {
        batch.push(color.alpha(0.2), hitbox);
    }
    batch
}

fn poi_section(ctx: &mut EventCtx, pois: &DisplayedPois) -> Widget {
    let mut col = vec![Line(format!(
        "{} POIs along {}",
        prettyprint_usize(pois.pois.len()),
        pois.describe()
    ))
    .small_heading()
    .into_widget(ctx)];

    col.push(ColorLegend::gradient(
        ctx,
        &ColorScale::from_colorous(colorous::COOL),
        vec!["closest".to_string(), "farthest".to_string()],
    ));

    let mut txt = Text::new();
    for poi in pois.pois.iter().take(8) {
        txt.add_line(Line(format!(
            "{} ({}, {} ft)",
            poi.name,
            poi.poi_type,
            poi.distance.round() as i64
        )));
    }
    if pois.pois.len() > 8 {
        txt.add_line(
            Line(format!(
                "... and {} more on the map",
                prettyprint_usize(pois.pois.len() - 8)
            ))
            .secondary(),
        );
    }
    col.push(txt.into_widget(ctx));

    Widget::col(col)
}

pub fn parse_row_key(key: &str) -> (RouteID, Option<String>) {
    // The branch is a single letter, so split at the rightmost separator in
    // case a route id contains one
    match key.rsplit_once('|') {
        Some((route, "")) => (RouteID(route.to_string()), None),
        Some((route, branch)) => (RouteID(route.to_string()), Some(branch.to_string())),
        None => (RouteID(key.to_string()), None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_row_key() {
        assert_eq!(
            parse_row_key("21|A"),
            (RouteID("21".to_string()), Some("A".to_string()))
        );
        assert_eq!(parse_row_key("21|"), (RouteID("21".to_string()), None));
        assert_eq!(parse_row_key("5"), (RouteID("5".to_string()), None));
    }

    #[test]
    fn test_route_ids_may_contain_the_separator() {
        assert_eq!(
            parse_row_key("Green|Line|A"),
            (RouteID("Green|Line".to_string()), Some("A".to_string()))
        );
        assert_eq!(
            parse_row_key("Green|Line|"),
            (RouteID("Green|Line".to_string()), None)
        );
    }
}
