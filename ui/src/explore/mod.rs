pub mod controls;
mod results;
mod route_actions;
pub mod world;

use widgetry::mapspace::{World, WorldOutcome};
use widgetry::tools::PopupMsg;
use widgetry::{EventCtx, GfxCtx, Outcome, Panel, State, Widget};

use api::RouteRow;

use crate::components::{MainMenu, Mode};
use crate::fetch::FetchLoader;
use crate::{App, Transition};

/// The main page: pick a location and search parameters, then browse the
/// nearby routes in a table and on the map.
pub struct Explorer {
    panel: Panel,
    world: World<world::Obj>,
}

impl Explorer {
    pub fn new_state(ctx: &mut EventCtx, app: &App) -> Box<dyn State<App>> {
        let mut panel = MainMenu::panel(ctx, Mode::Explore);
        let contents = Widget::col(vec![
            controls::location_section(ctx, app),
            controls::query_section(ctx, app, "Find nearby schedules"),
            results::section(ctx, app),
        ]);
        panel.replace(ctx, "contents", contents);

        Box::new(Self {
            panel,
            world: world::make_world(ctx, app),
        })
    }

    fn fetch_nearby(&self, ctx: &mut EventCtx, app: &mut App) -> Transition {
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

        let generation = app.session.begin_nearby();
        let client = app.client.clone();
        let params = app.session.params;
        Transition::Push(FetchLoader::new_state(
            ctx,
            "Finding nearby schedules",
            async move {
                let rows = client
                    .nearby_schedules(
                        location.lat,
                        location.lon,
                        params.distance_ft,
                        params.frequency_min,
                    )
                    .await?;
                Ok(rows)
            },
            Box::new(
                move |ctx, app: &mut App, result: anyhow::Result<Vec<RouteRow>>| match result {
                    Ok(rows) => {
                        info!("Got {} nearby schedule rows", rows.len());
                        app.session.finish_nearby(generation, Some(rows));
                        app.results_updated = Some(chrono::Local::now());
                        Transition::Multi(vec![Transition::Pop, Transition::Recreate])
                    }
                    Err(err) => {
                        warn!("Nearby schedules request failed: {err}");
                        app.session.finish_nearby(generation, None);
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

impl State<App> for Explorer {
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
                    "Find nearby schedules" => {
                        return self.fetch_nearby(ctx, app);
                    }
                    "Export results to CSV" => {
                        return export_csv(ctx, app);
                    }
                    "Clear route shape" => {
                        app.session.clear_shape();
                        return Transition::Recreate;
                    }
                    _ => {
                        // Every remaining click is one of the table's rows
                        if let Some(key) = x.strip_prefix("row ") {
                            let (route_id, branch_letter) = results::parse_row_key(key);
                            return Transition::Push(route_actions::RouteActions::new_state(
                                ctx,
                                app,
                                route_id,
                                branch_letter,
                            ));
                        }
                        unreachable!()
                    }
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

fn export_csv(ctx: &mut EventCtx, app: &App) -> Transition {
    match model::rows_to_csv(&app.session.rows)
        .and_then(|csv| abstio::write_file("nearby_schedules.csv".to_string(), csv))
    {
        Ok(()) => Transition::Push(PopupMsg::new_state(
            ctx,
            "Exported",
            vec!["Wrote nearby_schedules.csv".to_string()],
        )),
        Err(err) => Transition::Push(PopupMsg::new_state(
            ctx,
            "Export failed",
            vec![err.to_string()],
        )),
    }
}
