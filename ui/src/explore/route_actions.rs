use widgetry::tools::PopupMsg;
use widgetry::{DrawBaselayer, EventCtx, GfxCtx, Line, Outcome, Panel, State, Text, Widget};

use api::RouteID;
use model::{DisplayedPois, DisplayedShape};

use crate::fetch::FetchLoader;
use crate::{App, Transition};

/// Actions on one row of the results: draw the route's shape on the map,
/// or list POIs along it. Each is its own request; either can run without
/// the other.
pub struct RouteActions {
    panel: Panel,
    route_id: RouteID,
    branch_letter: Option<String>,
}

impl RouteActions {
    pub fn new_state(
        ctx: &mut EventCtx,
        app: &App,
        route_id: RouteID,
        branch_letter: Option<String>,
    ) -> Box<dyn State<App>> {
        let rendered = model::render_rows(&app.session.rows);
        let row = rendered
            .iter()
            .find(|row| row.route_id == route_id && row.branch_letter == branch_letter);

        let mut txt = Text::new();
        if let Some(row) = row {
            for line in &row.detail {
                txt.add_line(Line(line.clone()).secondary());
            }
        }

        let heading = match &branch_letter {
            Some(branch) => format!("Route {route_id} ({branch})"),
            None => format!("Route {route_id} (Main)"),
        };

        Box::new(Self {
            panel: Panel::new_builder(Widget::col(vec![
                Widget::row(vec![
                    Line(heading).small_heading().into_widget(ctx),
                    ctx.style().btn_close_widget(ctx),
                ]),
                txt.into_widget(ctx),
                Widget::row(vec![
                    ctx.style()
                        .btn_solid
                        .text("Show route on map")
                        .build_def(ctx),
                    ctx.style()
                        .btn_solid
                        .text("Find POIs along this route")
                        .build_def(ctx),
                ]),
            ]))
            .build(ctx),
            route_id,
            branch_letter,
        })
    }

    fn fetch_shape(&self, ctx: &mut EventCtx, app: &mut App) -> Transition {
        let generation = app.session.begin_shape();
        let client = app.client.clone();
        let route_id = self.route_id.clone();
        let branch_letter = self.branch_letter.clone();
        Transition::Push(FetchLoader::new_state(
            ctx,
            "Loading the route's shape",
            async move {
                let paths = client.route_shape(&route_id, branch_letter.as_deref()).await?;
                Ok(DisplayedShape {
                    route_id,
                    branch_letter,
                    paths,
                })
            },
            Box::new(
                move |ctx, app: &mut App, result: anyhow::Result<DisplayedShape>| match result {
                    Ok(shape) => {
                        info!(
                            "Drawing {} shape paths for {}",
                            shape.paths.len(),
                            shape.describe()
                        );
                        app.session.finish_shape(generation, Some(shape));
                        // Pop the loader and this dialog, then rebuild the
                        // page underneath
                        Transition::Multi(vec![
                            Transition::Pop,
                            Transition::Pop,
                            Transition::Recreate,
                        ])
                    }
                    Err(err) => {
                        warn!("Route shape request failed: {err}");
                        app.session.finish_shape(generation, None);
                        Transition::Replace(PopupMsg::new_state(
                            ctx,
                            "Request failed",
                            vec![err.to_string(), "Try again in a moment.".to_string()],
                        ))
                    }
                },
            ),
        ))
    }

    fn fetch_pois(&self, ctx: &mut EventCtx, app: &mut App) -> Transition {
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

        let generation = app.session.begin_pois();
        let client = app.client.clone();
        let route_id = self.route_id.clone();
        let branch_letter = self.branch_letter.clone();
        let distance = app.session.params.distance_ft;
        Transition::Push(FetchLoader::new_state(
            ctx,
            "Finding POIs along the route",
            async move {
                let pois = client
                    .pois_along_route(
                        &route_id,
                        branch_letter.as_deref(),
                        location.lat,
                        location.lon,
                        distance,
                    )
                    .await?;
                Ok(DisplayedPois {
                    route_id,
                    branch_letter,
                    pois,
                })
            },
            Box::new(
                move |ctx, app: &mut App, result: anyhow::Result<DisplayedPois>| match result {
                    Ok(pois) => {
                        info!("Got {} POIs along {}", pois.pois.len(), pois.describe());
                        app.session.finish_pois(generation, Some(pois));
                        Transition::Multi(vec![
                            Transition::Pop,
                            Transition::Pop,
                            Transition::Recreate,
                        ])
                    }
                    Err(err) => {
                        warn!("POI request failed: {err}");
                        app.session.finish_pois(generation, None);
                        Transition::Replace(PopupMsg::new_state(
                            ctx,
                            "Request failed",
                            vec![err.to_string(), "Try again in a moment.".to_string()],
                        ))
                    }
                },
            ),
        ))
    }
}

impl State<App> for RouteActions {
    fn event(&mut self, ctx: &mut EventCtx, app: &mut App) -> Transition {
        match self.panel.event(ctx) {
            Outcome::Clicked(x) => match x.as_ref() {
                "close" => Transition::Pop,
                "Show route on map" => self.fetch_shape(ctx, app),
                "Find POIs along this route" => self.fetch_pois(ctx, app),
                _ => unreachable!(),
            },
            _ => Transition::Keep,
        }
    }

    fn draw(&self, g: &mut GfxCtx, _: &App) {
        self.panel.draw(g);
    }

    fn draw_baselayer(&self) -> DrawBaselayer {
        // Keep the map and results visible behind this
        DrawBaselayer::PreviousState
    }
}
