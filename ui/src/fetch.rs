use std::future::Future;

use anyhow::Result;
use widgetry::tools::FutureLoader;
use widgetry::{EventCtx, State, Transition};

/// Runs one backend request behind a modal loading screen, then hands the
/// result back on the UI thread. Nothing else happens until the request
/// settles, so at most one of these is ever alive.
pub struct FetchLoader;

impl FetchLoader {
    pub fn new_state<A: 'static, T: 'static + Send>(
        ctx: &mut EventCtx,
        description: &str,
        request: impl Future<Output = Result<T>> + Send + 'static,
        on_load: Box<dyn FnOnce(&mut EventCtx, &mut A, Result<T>) -> Transition<A>>,
    ) -> Box<dyn State<A>> {
        // We could have a real progress bar if the backend streamed
        // anything, but these requests are all small
        let (_, outer_progress_rx) = futures_channel::mpsc::channel(1);
        let (_, inner_progress_rx) = futures_channel::mpsc::channel(1);
        FutureLoader::<A, T>::new_state(
            ctx,
            Box::pin(async move {
                let result = request.await?;
                let wrap: Box<dyn Send + FnOnce(&A) -> T> = Box::new(move |_: &A| result);
                Ok(wrap)
            }),
            outer_progress_rx,
            inner_progress_rx,
            description,
            on_load,
        )
    }
}
