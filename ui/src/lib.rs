#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod components;
mod explore;
mod fetch;
mod overview;

use anyhow::Result;
use geom::{Bounds, GPSBounds, LonLat, Pt2D};
use serde::{Deserialize, Serialize};
use structopt::StructOpt;
use widgetry::{Canvas, Color, EventCtx, GfxCtx, Settings, SharedAppState};

use model::{Location, LocationSource, Session, DEFAULT_LOCATION};

use self::components::Mode;

#[derive(StructOpt)]
struct Args {
    /// Base URL of the schedule backend
    #[structopt(long, default_value = "http://localhost:5000")]
    api: String,
    /// Latitude of the device's position, if it has a fix
    #[structopt(long)]
    lat: Option<f64>,
    /// Longitude of the device's position, if it has a fix
    #[structopt(long)]
    lon: Option<f64>,
}

impl Args {
    fn device_location(&self) -> Result<Option<Location>> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Ok(Some(Location::new(lat, lon)?)),
            (None, None) => Ok(None),
            _ => bail!("Specify both --lat and --lon, or neither"),
        }
    }
}

fn run(settings: Settings) {
    abstutil::logger::setup();

    let args = Args::from_iter(abstutil::cli_args());

    widgetry::run(settings, move |ctx| {
        let client = api::ApiClient::new(&args.api).unwrap();
        let device_location = args.device_location().unwrap();

        let mut app = App::new(ctx, client, device_location);

        let mut states = vec![crate::explore::Explorer::new_state(ctx, &app)];

        // This only makes sense on native. before_quit is never called on
        // web, and web always starts fresh.
        if let Ok(savestate) = abstio::maybe_read_json::<Savestate>(
            "data/save.json".to_string(),
            &mut abstutil::Timer::throwaway(),
        ) {
            ctx.canvas.cam_x = savestate.cam_x;
            ctx.canvas.cam_y = savestate.cam_y;
            ctx.canvas.cam_zoom = savestate.cam_zoom;
            if savestate.mode == Mode::Overview {
                states = vec![crate::overview::Overview::new_state(ctx, &app)];
            }
            app.savestate_mode = savestate.mode;
        }

        (app, states)
    });
}

pub fn main() {
    let settings = Settings::new("Schedule Scout");
    run(settings);
}

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn run_wasm() {
    run(Settings::new("Schedule Scout").root_dom_element_id("loading".to_string()));
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = window)]
    fn sync_mapbox_canvas(lon1: f64, lat1: f64, lon2: f64, lat2: f64);
}

pub struct App {
    pub client: api::ApiClient,
    pub session: Session,

    /// The position fix the process was started with, if any. "Use my
    /// location" falls back to DEFAULT_LOCATION without one.
    pub device_location: Option<Location>,

    /// The world coordinate system is built around this GPS rectangle,
    /// recentered whenever the location changes.
    pub gps_bounds: GPSBounds,
    pub bounds: Bounds,

    /// When the nearby results last changed
    pub results_updated: Option<chrono::DateTime<chrono::Local>>,

    /// Sticky UI preference: show the manual coordinate fields?
    pub manual_entry: bool,

    // Avoid syncing when bounds match
    #[allow(unused)]
    mapbox_bounds: Bounds,

    savestate_mode: Mode,
}

impl SharedAppState for App {
    fn draw_default(&self, g: &mut GfxCtx) {
        if cfg!(not(target_arch = "wasm32")) {
            g.clear(Color::BLACK);
        }
    }

    fn before_quit(&self, canvas: &Canvas) {
        let ss = Savestate {
            cam_x: canvas.cam_x,
            cam_y: canvas.cam_y,
            cam_zoom: canvas.cam_zoom,
            mode: self.savestate_mode,
        };
        abstio::write_json("data/save.json".to_string(), &ss);
    }
}

pub type Transition = widgetry::Transition<App>;

impl App {
    pub fn new(
        ctx: &mut EventCtx,
        client: api::ApiClient,
        device_location: Option<Location>,
    ) -> Self {
        let session = Session::new(device_location.map(|loc| (loc, LocationSource::Device)));
        let mut app = Self {
            client,
            session,
            device_location,
            gps_bounds: GPSBounds::new(),
            bounds: Bounds::new(),
            results_updated: None,
            manual_entry: false,
            mapbox_bounds: Bounds::new(),
            savestate_mode: Mode::Explore,
        };
        app.recenter_map(ctx);
        app
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.savestate_mode = mode;
    }

    /// Rebuild the map coordinate system around the current location and
    /// jump the camera there. The rectangle is roughly 9km x 9km, enough
    /// for any walking radius plus most route shapes.
    pub fn recenter_map(&mut self, ctx: &mut EventCtx) {
        let center = self.session.resolved_location().unwrap_or(DEFAULT_LOCATION);

        let mut gps_bounds = GPSBounds::new();
        gps_bounds.update(LonLat::new(center.lon - 0.06, center.lat - 0.04));
        gps_bounds.update(LonLat::new(center.lon + 0.06, center.lat + 0.04));
        self.bounds = gps_bounds.to_bounds();
        self.gps_bounds = gps_bounds;

        ctx.canvas.map_dims = (self.bounds.max_x, self.bounds.max_y);
        ctx.canvas.center_on_map_pt(self.bounds.center());
    }

    /// The current location in map space, if one's been determined.
    pub fn location_pt(&self) -> Option<Pt2D> {
        self.session
            .resolved_location()
            .map(|loc| LonLat::new(loc.lon, loc.lat).to_pt(&self.gps_bounds))
    }

    #[allow(unused)]
    pub fn sync_mapbox(&mut self, ctx: &mut EventCtx) {
        #[cfg(target_arch = "wasm32")]
        {
            // This is called for every single event, but the camera hasn't
            // always moved
            let bounds = ctx.canvas.get_screen_bounds();
            if self.mapbox_bounds == bounds {
                return;
            }
            self.mapbox_bounds = bounds;

            let pt1 = Pt2D::new(bounds.min_x, bounds.min_y).to_gps(&self.gps_bounds);
            let pt2 = Pt2D::new(bounds.max_x, bounds.max_y).to_gps(&self.gps_bounds);
            sync_mapbox_canvas(pt1.x(), pt1.y(), pt2.x(), pt2.y());
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct Savestate {
    cam_x: f64,
    cam_y: f64,
    cam_zoom: f64,
    mode: Mode,
}
