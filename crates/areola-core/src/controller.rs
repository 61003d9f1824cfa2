use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{debug, instrument, warn};

use crate::service::{SweepError, SweepService};
use crate::store::{self, KeyValueStore};
use crate::sweep::{AnomalyRecord, SweepResult, SweepStats};

/// The two independently routed views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    Auditor,
}

/// Navigation is an external collaborator; the controller only issues
/// transitions and never owns routing itself.
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn navigate(&self, route: Route) -> Result<()>;
}

/// Placeholder navigator for hosts without a routing layer.
#[derive(Debug, Default, Clone)]
pub struct NoopNavigator;

#[async_trait]
impl Navigator for NoopNavigator {
    async fn navigate(&self, route: Route) -> Result<()> {
        debug!(?route, "navigation transition requested");
        Ok(())
    }
}

/// Deferral before navigating home, so an exit transition can begin before
/// the view unmounts. Navigation occurs no earlier than this delay.
pub const EXIT_TRANSITION_DELAY: Duration = Duration::from_millis(300);

/// Owns the in-memory sweep result and drives the two external
/// interactions: the scan request and the navigation transition.
///
/// At most one sweep is expected in flight at a time, by convention rather
/// than enforcement; there is no lock and no cancellation of an in-flight
/// request.
pub struct AuditController<S, K, N> {
    service: S,
    store: K,
    navigator: N,
    anomalies: Vec<AnomalyRecord>,
    stats: SweepStats,
    loading: bool,
    panel_open: bool,
}

impl<S, K, N> AuditController<S, K, N>
where
    S: SweepService,
    K: KeyValueStore,
    N: Navigator,
{
    pub fn new(service: S, store: K, navigator: N) -> Self {
        Self {
            service,
            store,
            navigator,
            anomalies: Vec::new(),
            stats: SweepStats::default(),
            loading: false,
            panel_open: false,
        }
    }

    /// Run a sweep; upload mode when a file payload is supplied.
    ///
    /// On success the in-memory result is replaced wholesale, mirrored into
    /// the store, and the results panel opens when anything was flagged. On
    /// failure no state changes and the loading flag is cleared; the error
    /// is logged here and also returned so a host can message the user.
    #[instrument(name = "run_sweep", skip(self, file), fields(upload = file.is_some()))]
    pub async fn run_sweep(&mut self, file: Option<(String, Vec<u8>)>) -> Result<(), SweepError> {
        self.loading = true;
        let outcome = match file {
            Some((name, payload)) => self.service.upload_sweep(&name, payload).await,
            None => self.service.run_sweep().await,
        };
        let response = match outcome {
            Ok(response) => response,
            Err(err) => {
                self.loading = false;
                warn!(%err, "audit failed");
                return Err(err);
            }
        };

        let result = SweepResult::from_response(response);
        if let Err(err) = store::save_audit_data(&self.store, &result).await {
            // Mirroring is best-effort; in-memory state is still authoritative.
            warn!(%err, "failed to mirror sweep result into the store");
        }
        self.stats = result.stats;
        self.anomalies = result.anomalies;
        if self.stats.found > 0 {
            self.panel_open = true;
        }
        self.loading = false;
        debug!(
            scanned = self.stats.total,
            found = self.stats.found,
            "sweep completed"
        );
        Ok(())
    }

    /// Persist the current result and move to the auditor view.
    ///
    /// A no-op while there is nothing to show: no store write, no
    /// navigation.
    pub async fn open_detail_view(&self) -> Result<()> {
        if self.anomalies.is_empty() {
            return Ok(());
        }
        store::save_audit_data(&self.store, &self.current_result()).await?;
        self.navigator.navigate(Route::Auditor).await
    }

    /// Return to the dashboard once the exit transition has had time to
    /// begin.
    pub async fn return_home(&self) -> Result<()> {
        sleep(EXIT_TRANSITION_DELAY).await;
        self.navigator.navigate(Route::Dashboard).await
    }

    /// Restore the result mirrored by a previous view, if any.
    ///
    /// Returns `false` when the store is empty; the caller shows the
    /// waiting placeholder and state stays untouched. A restored result
    /// keeps the panel closed.
    pub async fn load_persisted(&mut self) -> Result<bool> {
        match store::load_audit_data(&self.store).await? {
            Some(result) => {
                self.anomalies = result.anomalies;
                self.stats = result.stats;
                self.panel_open = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Slide-out panel affordance on the dashboard.
    pub fn toggle_panel(&mut self) {
        self.panel_open = !self.panel_open;
    }

    pub fn current_result(&self) -> SweepResult {
        SweepResult {
            anomalies: self.anomalies.clone(),
            stats: self.stats,
        }
    }

    pub fn anomalies(&self) -> &[AnomalyRecord] {
        &self.anomalies
    }

    pub fn stats(&self) -> SweepStats {
        self.stats
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn panel_open(&self) -> bool {
        self.panel_open
    }
}
