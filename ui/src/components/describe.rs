use widgetry::{Line, Text};

use api::Poi;
use model::LocationSource;

pub fn poi(poi: &Poi) -> Text {
    let mut txt = Text::from(poi.name.clone());
    txt.add_line(Line(format!("Type: {}", poi.poi_type)).secondary());
    txt.add_line(Line(format!("{} ft away", poi.distance.round() as i64)).secondary());
    if let Some(label) = poi.stop.as_ref().and_then(|stop| stop.label()) {
        txt.add_line(Line(format!("Near stop: {label}")).secondary());
    }
    txt
}

pub fn location_source(source: LocationSource) -> &'static str {
    match source {
        LocationSource::Device => "your device",
        LocationSource::Manual => "entered manually",
        LocationSource::MapCenter => "map center",
        LocationSource::Fallback => "default",
    }
}
