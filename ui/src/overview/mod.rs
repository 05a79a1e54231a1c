use abstutil::prettyprint_usize;
use widgetry::mapspace::{World, WorldOutcome};
use widgetry::tools::PopupMsg;
use widgetry::{Color, EventCtx, GfxCtx, Line, Outcome, Panel, State, Text, Widget};

use api::{RouteSummary, SummaryColor};

use crate::components::{MainMenu, Mode};
use crate::explore::{controls, world};
use crate::fetch::FetchLoader;
use crate::{App, Transition};

/// The coarser page: every route with a stop near the location, one line
/// each, tinted by the server's verdict on its service.
pub struct Overview {
    panel: Panel,
    world: World<world::Obj>,
}

impl Overview {
    pub fn new_state(ctx: &mut EventCtx, app: &App) -> Box<dyn State<App>> {
        let mut panel = MainMenu::panel(ctx, Mode::Overview);
        let contents = Widget::col(vec![
            controls::location_section(ctx, app),
            controls::query_section(ctx, app, "Find routes near me"),
            summary_section(ctx, app),
        ]);
        panel.replace(ctx, "contents", contents);

        Box::new(Self {
            panel,
            world: world::make_world(ctx, app),
        })
    }

    fn fetch_overview(&self, ctx: &mut EventCtx, app: &mut App) -> Transition {
        let location = match app.session.resolved_location() {
            Some(location) => location,
            None => {
                return Transition::Push(PopupMsg::new_state(
                    ctx,
                    "Can't search yet",
                    vec![model::InvalidInput::LocationNotResolved.to_string()],
                ));
            }
        };
        if let Err(err) = app.session.params.validate() {
            return Transition::Push(PopupMsg::new_state(
                ctx,
                "Check your inputs",
                vec![err.to_string()],
            ));
        }

        let generation = app.session.begin_overview();
        let client = app.client.clone();
        let params = app.session.params;
        Transition::Push(FetchLoader::new_state(
            ctx,
            "Finding routes near you",
            async move {
                let summaries = client
                    .routes_overview(
                        location.lat,
                        location.lon,
                        params.distance_ft,
                        params.frequency_min,
                    )
                    .await?;
                Ok(summaries)
            },
            Box::new(
                move |ctx, app: &mut App, result: anyhow::Result<Vec<RouteSummary>>| match result {
                    Ok(summaries) => {
                        info!("Got {} route summaries", summaries.len());
                        app.session.finish_overview(generation, Some(summaries));
                        Transition::Multi(vec![Transition::Pop, Transition::Recreate])
                    }
                    Err(err) => {
                        warn!("Routes overview request failed: {err}");
                        app.session.finish_overview(generation, None);
                        Transition::Replace(PopupMsg::new_state(
                            ctx,
                            "Request failed",
                            vec![
                                err.to_string(),
                                "Check that the backend is running, then try again.".to_string(),
                            ],
                        ))
                    }
                },
            ),
        ))
    }
}

impl State<App> for Overview {
    fn event(&mut self, ctx: &mut EventCtx, app: &mut App) -> Transition {
        ctx.canvas_movement();
        app.sync_mapbox(ctx);

        if let WorldOutcome::ClickedObject(world::Obj::Poi(idx)) = self.world.event(ctx) {
            self.world.hack_unset_hovering();
            return world::clicked_poi(ctx, app, idx);
        }

        match self.panel.event(ctx) {
            Outcome::Clicked(x) => {
                if let Some(t) = MainMenu::on_click(ctx, app, x.as_ref()) {
                    return t;
                }
                if let Some(t) = controls::handle_click(ctx, app, &self.panel, x.as_ref()) {
                    return t;
                }
                match x.as_ref() {
                    "Find routes near me" => {
                        return self.fetch_overview(ctx, app);
                    }
                    _ => unreachable!(),
                }
            }
            Outcome::Changed(_) => {
                if let Some(t) = controls::handle_change(&self.panel, app) {
                    return t;
                }
            }
            _ => {}
        }

        Transition::Keep
    }

    fn draw(&self, g: &mut GfxCtx, _: &App) {
        self.panel.draw(g);
        self.world.draw(g);
    }

    fn recreate(&mut self, ctx: &mut EventCtx, app: &mut App) -> Box<dyn State<App>> {
        Self::new_state(ctx, app)
    }
}

fn summary_section(ctx: &mut EventCtx, app: &App) -> Widget {
    let mut col = vec![Line("Routes near you").small_heading().into_widget(ctx)];

    if app.session.summaries.is_empty() {
        col.push(
            Line("Nothing loaded yet. Set a location and search.")
                .secondary()
                .into_widget(ctx),
        );
        return Widget::col(col).section(ctx);
    }

    col.push(
        Line(format!(
            "{} routes stop within {} ft",
            prettyprint_usize(app.session.summaries.len()),
            app.session.params.distance_ft.round() as i64
        ))
        .secondary()
        .into_widget(ctx),
    );

    let mut txt = Text::new();
    for summary in &app.session.summaries {
        txt.add_line(
            Line(format!("Route {}: {}", summary.route_id, summary.description))
                .fg(tint(summary.color)),
        );
        let departures = match summary.num_departures {
            Some(n) => format!("{} departures today", prettyprint_usize(n)),
            None => "departures unknown".to_string(),
        };
        txt.add_line(
            Line(format!(
                "{} ft to the closest stop; {}; {}",
                summary.distance.round() as i64,
                departures,
                model::fmt_headway(summary.frequency)
            ))
            .secondary(),
        );
    }
    col.push(txt.into_widget(ctx));

    Widget::col(col).section(ctx)
}

fn tint(color: SummaryColor) -> Color {
    match color {
        SummaryColor::White => Color::WHITE,
        // Pure black vanishes on the dark background
        SummaryColor::Black => Color::grey(0.6),
        SummaryColor::Green => Color::GREEN,
        SummaryColor::Red => Color::RED,
        SummaryColor::Unknown => Color::grey(0.8),
    }
}
