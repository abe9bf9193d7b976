//! Language-change reactor.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::domain::Language;
use crate::geo::GeoSensor;

use super::orchestrator::SearchEngine;
use super::route::RouteService;
use super::search::LookupService;

/// Forward every language published on `languages` to the engine.
///
/// The task ends when the sender side is dropped.
pub fn spawn_language_reactor<L, R, G>(
    engine: SearchEngine<L, R, G>,
    mut languages: watch::Receiver<Language>,
) -> JoinHandle<()>
where
    L: LookupService,
    R: RouteService,
    G: GeoSensor,
{
    tokio::spawn(async move {
        while languages.changed().await.is_ok() {
            let language = *languages.borrow_and_update();
            engine.on_language_change(language).await;
        }
        debug!("language channel closed");
    })
}
