use geom::{Circle, Distance, LonLat, PolyLine, Pt2D};
use widgetry::mapspace::{ObjectID, World};
use widgetry::tools::{ColorScale, PopupMsg};
use widgetry::{Color, EventCtx, GeomBatch, Line, Text};

use crate::components::describe;
use crate::{App, Transition};

const FEET_TO_METERS: f64 = 0.3048;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Obj {
    Marker,
    Poi(usize),
}
impl ObjectID for Obj {}

/// The map contents: the walking-distance circle, the one displayed route
/// shape, the location marker, and a dot per POI.
pub fn make_world(ctx: &mut EventCtx, app: &App) -> World<Obj> {
    let mut world = World::bounded(&app.bounds);

    let mut master = GeomBatch::new();
    // On web, Mapbox tiles show through underneath instead
    if cfg!(not(target_arch = "wasm32")) {
        master.push(Color::grey(0.1), app.bounds.get_rectangle());
    }

    if let Some(center) = app.location_pt() {
        if app.session.params.distance_ft > 0.0 {
            let radius = Distance::meters(FEET_TO_METERS * app.session.params.distance_ft);
            master.push(
                Color::CYAN.alpha(0.15),
                Circle::new(center, radius).to_polygon(),
            );
        }
    }

    if let Some(ref shape) = app.session.shape {
        for path in &shape.paths {
            let pts: Vec<Pt2D> = path
                .points
                .iter()
                .map(|(lon, lat)| LonLat::new(*lon, *lat).to_pt(&app.gps_bounds))
                .collect();
            let pts = Pt2D::approx_dedupe(pts, Distance::meters(1.0));
            if pts.len() >= 2 {
                master.push(
                    Color::RED,
                    PolyLine::unchecked_new(pts).make_polygons(Distance::meters(10.0)),
                );
            }
        }
    }

    world.draw_master_batch(ctx, master);

    if let Some(center) = app.location_pt() {
        let circle = Circle::new(center, Distance::meters(40.0)).to_polygon();
        let mut batch = GeomBatch::new();
        batch.push(Color::BLUE, circle.clone());
        batch.push(
            Color::WHITE,
            Circle::new(center, Distance::meters(40.0))
                .to_outline(Distance::meters(8.0))
                .unwrap(),
        );

        let mut txt = Text::from("Your location");
        if let Some((location, source)) = app.session.location {
            txt.add_line(Line(location.describe()).secondary());
            txt.add_line(Line(describe::location_source(source)).secondary());
        }

        world
            .add(Obj::Marker)
            .hitbox(circle)
            .draw(batch)
            .hover_alpha(0.5)
            .tooltip(txt)
            .build(ctx);
    }

    if let Some(ref displayed) = app.session.pois {
        let max_distance = displayed
            .pois
            .iter()
            .map(|poi| poi.distance)
            .fold(0.0_f64, f64::max);
        let scale = ColorScale::from_colorous(colorous::COOL);
        // Optimization
        let circle = Circle::new(Pt2D::zero(), Distance::meters(25.0)).to_polygon();

        for (idx, poi) in displayed.pois.iter().enumerate() {
            // Not every POI comes with a position
            let (lat, lon) = match poi.coordinates {
                Some(pair) => pair,
                None => continue,
            };
            let center = LonLat::new(lon, lat).to_pt(&app.gps_bounds);
            let color = if max_distance > 0.0 {
                scale.eval(poi.distance / max_distance)
            } else {
                scale.eval(0.0)
            };

            world
                .add(Obj::Poi(idx))
                .hitbox(circle.translate(center.x(), center.y()))
                .draw_color(color)
                .hover_alpha(0.5)
                .tooltip(describe::poi(poi))
                .clickable()
                .build(ctx);
        }
    }

    world.initialize_hover(ctx);
    world
}

pub fn clicked_poi(ctx: &mut EventCtx, app: &App, idx: usize) -> Transition {
    if let Some(poi) = app
        .session
        .pois
        .as_ref()
        .and_then(|displayed| displayed.pois.get(idx))
    {
        let mut lines = vec![
            format!("Type: {}", poi.poi_type),
            format!("{} ft from your location", poi.distance.round() as i64),
        ];
        if let Some(label) = poi.stop.as_ref().and_then(|stop| stop.label()) {
            lines.push(format!("Near stop: {label}"));
        }
        return Transition::Push(PopupMsg::new_state(ctx, &poi.name, lines));
    }
    Transition::Keep
}
