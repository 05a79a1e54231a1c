use widgetry::tools::PopupMsg;
use widgetry::{EventCtx, Line, Panel, Spinner, TextBox, TextExt, Toggle, Widget};

use model::{Location, LocationSource, QueryParams, DEFAULT_LOCATION};

use crate::components::describe;
use crate::{App, Transition};

pub fn location_section(ctx: &mut EventCtx, app: &App) -> Widget {
    let status = match app.session.location {
        Some((location, source)) => format!(
            "Your location: {} ({})",
            location.describe(),
            describe::location_source(source)
        ),
        None => "Your location: not determined yet".to_string(),
    };

    let mut col = vec![
        Line("Location").small_heading().into_widget(ctx),
        status.text_widget(ctx),
        Widget::row(vec![
            ctx.style()
                .btn_outline
                .text("Use my location")
                .build_def(ctx),
            ctx.style().btn_outline.text("Use map center").build_def(ctx),
        ]),
        Toggle::checkbox(ctx, "enter coordinates manually", None, app.manual_entry),
    ];

    if app.manual_entry {
        let (lat, lon) = match app.session.resolved_location() {
            Some(location) => (
                format!("{:.6}", location.lat),
                format!("{:.6}", location.lon),
            ),
            None => (String::new(), String::new()),
        };
        col.push(Widget::row(vec![
            "Latitude:".text_widget(ctx),
            TextBox::widget(ctx, "latitude", lat, false, 12),
            "Longitude:".text_widget(ctx),
            TextBox::widget(ctx, "longitude", lon, false, 12),
        ]));
        col.push(
            ctx.style()
                .btn_outline
                .text("Set coordinates")
                .build_def(ctx),
        );
    }

    Widget::col(col).section(ctx)
}

pub fn query_section(ctx: &mut EventCtx, app: &App, submit_label: &str) -> Widget {
    Widget::col(vec![
        Line("Search").small_heading().into_widget(ctx),
        Widget::row(vec![
            "Walking distance (feet):".text_widget(ctx),
            Spinner::widget(
                ctx,
                "walking distance",
                (1, 26400),
                app.session.params.distance_ft as usize,
                100,
            ),
        ]),
        Widget::row(vec![
            "Minutes between trips:".text_widget(ctx),
            Spinner::widget(
                ctx,
                "frequency threshold",
                (1, 180),
                app.session.params.frequency_min as usize,
                1,
            ),
        ]),
        ctx.style().btn_solid.text(submit_label).build_def(ctx),
    ])
    .section(ctx)
}

/// Clicks every page with these controls handles the same way.
pub fn handle_click(
    ctx: &mut EventCtx,
    app: &mut App,
    panel: &Panel,
    x: &str,
) -> Option<Transition> {
    match x {
        "Use my location" => Some(use_device_location(ctx, app)),
        "Use map center" => Some(use_map_center(ctx, app)),
        "Set coordinates" => Some(set_manual_coordinates(ctx, app, panel)),
        _ => None,
    }
}

pub fn handle_change(panel: &Panel, app: &mut App) -> Option<Transition> {
    if panel.has_widget("enter coordinates manually") {
        let manual = panel.is_checked("enter coordinates manually");
        if manual != app.manual_entry {
            app.manual_entry = manual;
            return Some(Transition::Recreate);
        }
    }
    if let Some(params) = params_from_panel(panel) {
        app.session.params = params;
    }
    None
}

fn params_from_panel(panel: &Panel) -> Option<QueryParams> {
    if !panel.has_widget("walking distance") {
        return None;
    }
    let distance_ft: usize = panel.spinner("walking distance");
    let frequency_min: usize = panel.spinner("frequency threshold");
    Some(QueryParams {
        distance_ft: distance_ft as f64,
        frequency_min: frequency_min as f64,
    })
}

fn use_device_location(ctx: &mut EventCtx, app: &mut App) -> Transition {
    match app.device_location {
        Some(location) => {
            app.session.set_location(location, LocationSource::Device);
            app.recenter_map(ctx);
            Transition::Recreate
        }
        None => {
            warn!("No position fix available; using the default location");
            app.session
                .set_location(DEFAULT_LOCATION, LocationSource::Fallback);
            app.recenter_map(ctx);
            Transition::Multi(vec![
                Transition::Recreate,
                Transition::Push(PopupMsg::new_state(
                    ctx,
                    "Location unavailable",
                    vec![
                        "There's no position fix, so you've been placed at the default location."
                            .to_string(),
                        "Pass --lat and --lon at startup, or enter coordinates manually."
                            .to_string(),
                    ],
                )),
            ])
        }
    }
}

fn use_map_center(ctx: &mut EventCtx, app: &mut App) -> Transition {
    let center = ctx
        .canvas
        .get_screen_bounds()
        .center()
        .to_gps(&app.gps_bounds);
    match Location::new(center.y(), center.x()) {
        Ok(location) => {
            app.session.set_location(location, LocationSource::MapCenter);
            app.recenter_map(ctx);
            Transition::Recreate
        }
        Err(err) => Transition::Push(PopupMsg::new_state(
            ctx,
            "Bad coordinates",
            vec![err.to_string()],
        )),
    }
}

fn set_manual_coordinates(ctx: &mut EventCtx, app: &mut App, panel: &Panel) -> Transition {
    let lat = panel.text_box("latitude");
    let lon = panel.text_box("longitude");
    match Location::parse(&lat, &lon) {
        Ok(location) => {
            app.session.set_location(location, LocationSource::Manual);
            app.recenter_map(ctx);
            Transition::Recreate
        }
        // The previous location stays until the input makes sense
        Err(err) => Transition::Push(PopupMsg::new_state(
            ctx,
            "Bad coordinates",
            vec![err.to_string()],
        )),
    }
}
